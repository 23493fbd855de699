use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::constants::{DEFAULT_SEEK_STEP_MS, DEFAULT_SERVER_LABEL};
use crate::models::{SourceDataState, SourceLink};
use crate::player::{
    AudioTrack, PlayerSnapshot, SeekMultiplier, TrackLabel, seek_target_with_step,
};
use crate::utils::errors::Result;
use crate::utils::{ControlsError, format_duration, requires_hours};

/// Knobs the derivation takes from configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlsSettings {
    pub seek_step_ms: i64,
    pub default_server_label: String,
}

impl ControlsSettings {
    /// A non-positive step would turn forward seeks into rewinds
    pub fn validate(&self) -> Result<()> {
        if self.seek_step_ms <= 0 {
            return Err(ControlsError::Configuration(format!(
                "seek_step_ms must be positive, got {}",
                self.seek_step_ms
            )));
        }
        Ok(())
    }
}

impl Default for ControlsSettings {
    fn default() -> Self {
        Self {
            seek_step_ms: DEFAULT_SEEK_STEP_MS,
            default_server_label: DEFAULT_SERVER_LABEL.to_string(),
        }
    }
}

/// Everything the overlay shows that is not read straight off the player
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DerivedControlsState {
    pub is_loading: bool,
    /// Empty exactly when no seek is pending
    pub seek_label: String,
    pub selected_subtitle_label: Option<String>,
    pub selected_audio_label: Option<String>,
    pub selected_server_label: String,
}

/// Whether the loading spinner should be shown.
///
/// Source resolution that has not succeeded always shows the spinner. Player
/// buffering only does when no seek is queued, since the seek label already
/// tells the user something is happening.
pub fn compute_is_loading(
    snapshot: &PlayerSnapshot,
    seek_multiplier: SeekMultiplier,
    source_state: &SourceDataState,
) -> bool {
    (snapshot.is_buffering && !seek_multiplier.is_pending()) || !source_state.is_success()
}

/// Seek offset label with the default step, e.g. `"+0:30:10"` or `"-04:50"`
pub fn compute_seek_label(snapshot: &PlayerSnapshot, seek_multiplier: SeekMultiplier) -> String {
    seek_label(
        snapshot,
        seek_multiplier,
        DEFAULT_SEEK_STEP_MS,
        requires_hours(snapshot.duration_ms),
    )
}

/// Seek offset label with an explicit step and hour format.
///
/// `include_hours` should be decided from the total duration, not from the
/// target, so the label keeps one shape for the whole seek.
pub fn seek_label(
    snapshot: &PlayerSnapshot,
    seek_multiplier: SeekMultiplier,
    seek_step_ms: i64,
    include_hours: bool,
) -> String {
    let Some(symbol) = seek_multiplier.direction_symbol() else {
        return String::new();
    };

    let target = seek_target_with_step(
        snapshot.position_ms,
        snapshot.duration_ms,
        seek_multiplier,
        seek_step_ms,
    );

    format!("{}{}", symbol, format_duration(target, include_hours))
}

pub fn resolve_track_label<T: TrackLabel>(tracks: &[T], index: i32) -> Option<String> {
    let label = usize::try_from(index)
        .ok()
        .and_then(|i| tracks.get(i))
        .map(|track| track.label().to_string());

    if label.is_none() && index >= 0 {
        trace!(index, available = tracks.len(), "Track index out of range");
    }
    label
}

/// Like [`resolve_track_label`], but a lone audio track is never reported as a selection
pub fn resolve_audio_label(tracks: &[AudioTrack], index: i32) -> Option<String> {
    if tracks.len() == 1 {
        return None;
    }
    resolve_track_label(tracks, index)
}

pub fn resolve_subtitle_label(snapshot: &PlayerSnapshot) -> Option<String> {
    resolve_track_label(
        &snapshot.available_subtitles,
        snapshot.selected_subtitle_index,
    )
}

pub fn resolve_server_label(servers: &[SourceLink], index: i32, fallback: &str) -> String {
    usize::try_from(index)
        .ok()
        .and_then(|i| servers.get(i))
        .map(|link| link.name.clone())
        .unwrap_or_else(|| fallback.to_string())
}

/// Derive the full overlay state in one pass, without memoization
pub fn derive_controls_state(
    snapshot: &PlayerSnapshot,
    seek_multiplier: SeekMultiplier,
    source_state: &SourceDataState,
    servers: &[SourceLink],
    selected_server: i32,
    settings: &ControlsSettings,
) -> Result<DerivedControlsState> {
    settings.validate()?;

    Ok(DerivedControlsState {
        is_loading: compute_is_loading(snapshot, seek_multiplier, source_state),
        seek_label: seek_label(
            snapshot,
            seek_multiplier,
            settings.seek_step_ms,
            requires_hours(snapshot.duration_ms),
        ),
        selected_subtitle_label: resolve_subtitle_label(snapshot),
        selected_audio_label: resolve_audio_label(
            &snapshot.available_audios,
            snapshot.selected_audio_index,
        ),
        selected_server_label: resolve_server_label(
            servers,
            selected_server,
            &settings.default_server_label,
        ),
    })
}
