use tracing::debug;

use super::state::{
    ControlsSettings, DerivedControlsState, compute_is_loading, resolve_audio_label,
    resolve_server_label, resolve_subtitle_label, seek_label,
};
use crate::models::{SourceDataState, SourceLink};
use crate::player::{PlayerSnapshot, SeekMultiplier};
use crate::utils::errors::Result;
use crate::utils::requires_hours;

#[derive(Debug, Clone, PartialEq)]
struct DerivationInputs {
    snapshot: PlayerSnapshot,
    seek_multiplier: SeekMultiplier,
    source_state: SourceDataState,
    servers: Vec<SourceLink>,
    selected_server: i32,
}

/// Hour-segment decision, remembered per total duration
#[derive(Debug, Clone, Copy)]
struct HourFormat {
    duration_ms: i64,
    include_hours: bool,
}

/// Memoizing wrapper around the derivation functions.
///
/// Returns the cached state while the input tuple is unchanged and only
/// re-decides the hour format when the total duration changes.
#[derive(Debug)]
pub struct ControlsDeriver {
    settings: ControlsSettings,
    last: Option<(DerivationInputs, DerivedControlsState)>,
    hour_format: Option<HourFormat>,
    recomputations: u64,
}

impl ControlsDeriver {
    pub fn new(settings: ControlsSettings) -> Result<Self> {
        settings.validate()?;
        Ok(Self {
            settings,
            last: None,
            hour_format: None,
            recomputations: 0,
        })
    }

    pub fn settings(&self) -> &ControlsSettings {
        &self.settings
    }

    /// Number of times the state was actually recomputed rather than served from cache
    pub fn recomputations(&self) -> u64 {
        self.recomputations
    }

    pub fn derive(
        &mut self,
        snapshot: &PlayerSnapshot,
        seek_multiplier: SeekMultiplier,
        source_state: &SourceDataState,
        servers: &[SourceLink],
        selected_server: i32,
    ) -> DerivedControlsState {
        if let Some((inputs, state)) = &self.last
            && inputs.seek_multiplier == seek_multiplier
            && inputs.selected_server == selected_server
            && &inputs.snapshot == snapshot
            && &inputs.source_state == source_state
            && inputs.servers == servers
        {
            return state.clone();
        }

        let include_hours = self.include_hours(snapshot.duration_ms);
        let state = DerivedControlsState {
            is_loading: compute_is_loading(snapshot, seek_multiplier, source_state),
            seek_label: seek_label(
                snapshot,
                seek_multiplier,
                self.settings.seek_step_ms,
                include_hours,
            ),
            selected_subtitle_label: resolve_subtitle_label(snapshot),
            selected_audio_label: resolve_audio_label(
                &snapshot.available_audios,
                snapshot.selected_audio_index,
            ),
            selected_server_label: resolve_server_label(
                servers,
                selected_server,
                &self.settings.default_server_label,
            ),
        };

        self.recomputations += 1;
        self.last = Some((
            DerivationInputs {
                snapshot: snapshot.clone(),
                seek_multiplier,
                source_state: source_state.clone(),
                servers: servers.to_vec(),
                selected_server,
            },
            state.clone(),
        ));

        state
    }

    /// Drop the cached state; the next call recomputes
    pub fn invalidate(&mut self) {
        self.last = None;
        self.hour_format = None;
    }

    fn include_hours(&mut self, duration_ms: i64) -> bool {
        match self.hour_format {
            Some(format) if format.duration_ms == duration_ms => format.include_hours,
            _ => {
                let include_hours = requires_hours(duration_ms);
                debug!(duration_ms, include_hours, "Duration changed, re-deciding seek label format");
                self.hour_format = Some(HourFormat {
                    duration_ms,
                    include_hours,
                });
                include_hours
            }
        }
    }
}

impl Default for ControlsDeriver {
    fn default() -> Self {
        Self {
            settings: ControlsSettings::default(),
            last: None,
            hour_format: None,
            recomputations: 0,
        }
    }
}
