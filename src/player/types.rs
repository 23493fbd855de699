/// Common types shared between the player collaborator and the controls overlay
use serde::{Deserialize, Serialize};

use crate::constants::DURATION_UNSET;

/// Anything that can be listed in a track selection menu
pub trait TrackLabel {
    fn label(&self) -> &str;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubtitleTrack {
    pub language: String,
}

impl SubtitleTrack {
    pub fn new(language: impl Into<String>) -> Self {
        Self {
            language: language.into(),
        }
    }
}

impl TrackLabel for SubtitleTrack {
    fn label(&self) -> &str {
        &self.language
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudioTrack {
    pub label: String,
}

impl AudioTrack {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }
}

impl TrackLabel for AudioTrack {
    fn label(&self) -> &str {
        &self.label
    }
}

/// Read-only view of the player at one point in time.
///
/// Produced by the player collaborator; the controls only ever read it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerSnapshot {
    pub position_ms: i64,
    /// Total media length; zero, negative or [`DURATION_UNSET`] when unknown
    pub duration_ms: i64,
    pub is_buffering: bool,
    pub available_subtitles: Vec<SubtitleTrack>,
    /// `-1` when subtitles are off
    pub selected_subtitle_index: i32,
    pub available_audios: Vec<AudioTrack>,
    pub selected_audio_index: i32,
}

impl Default for PlayerSnapshot {
    fn default() -> Self {
        Self {
            position_ms: 0,
            duration_ms: DURATION_UNSET,
            is_buffering: false,
            available_subtitles: Vec::new(),
            selected_subtitle_index: -1,
            available_audios: Vec::new(),
            selected_audio_index: 0,
        }
    }
}

impl PlayerSnapshot {
    pub fn has_known_duration(&self) -> bool {
        self.duration_ms > 0
    }
}

/// Number of discrete seek steps queued by repeated key presses.
///
/// Zero means no seek is pending; the sign gives the direction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SeekMultiplier(pub i64);

impl SeekMultiplier {
    pub const NONE: SeekMultiplier = SeekMultiplier(0);

    pub fn value(self) -> i64 {
        self.0
    }

    pub fn is_pending(self) -> bool {
        self.0 != 0
    }

    /// True only for forward seeks, which keep the bottom bar in seeking mode
    pub fn is_forward(self) -> bool {
        self.0 > 0
    }

    pub fn forward(self) -> Self {
        SeekMultiplier(self.0.saturating_add(1))
    }

    pub fn backward(self) -> Self {
        SeekMultiplier(self.0.saturating_sub(1))
    }

    /// `"+"`, `"-"`, or `None` when nothing is queued
    pub fn direction_symbol(self) -> Option<&'static str> {
        match self.0.signum() {
            1 => Some("+"),
            -1 => Some("-"),
            _ => None,
        }
    }
}

impl From<i64> for SeekMultiplier {
    fn from(value: i64) -> Self {
        SeekMultiplier(value)
    }
}
