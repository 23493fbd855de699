use serde::{Deserialize, Serialize};

use crate::player::SeekMultiplier;

/// What the title bar shows about the current playback
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TopBarState {
    pub title: String,
    pub is_tv_show: bool,
    pub is_last_episode: bool,
}

impl TopBarState {
    pub fn movie(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            is_tv_show: false,
            is_last_episode: false,
        }
    }

    pub fn episode(title: impl Into<String>, is_last_episode: bool) -> Self {
        Self {
            title: title.into(),
            is_tv_show: true,
            is_last_episode,
        }
    }

    pub fn has_next_episode(&self) -> bool {
        self.is_tv_show && !self.is_last_episode
    }
}

/// Which overlay pieces are on screen
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverlayVisibility {
    pub top_bar: bool,
    /// "Next episode" button in the top bar
    pub show_next_episode: bool,
    pub seek_indicator: bool,
    pub spinner: bool,
    pub bottom_bar: bool,
    /// Bottom bar shows the seek preview instead of its buttons
    pub bottom_bar_seeking: bool,
}

impl OverlayVisibility {
    pub fn compute(
        controls_visible: bool,
        seek_multiplier: SeekMultiplier,
        is_loading: bool,
        has_next_episode: bool,
    ) -> Self {
        Self {
            top_bar: controls_visible,
            show_next_episode: controls_visible && has_next_episode,
            seek_indicator: seek_multiplier.is_pending(),
            spinner: is_loading,
            // Forward seeks keep the seek bar up even with the controls hidden
            bottom_bar: controls_visible || seek_multiplier.is_forward(),
            bottom_bar_seeking: seek_multiplier.is_forward(),
        }
    }
}

/// Outcome of a back press while the player is in front
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackAction {
    /// Consumed: reveal the hidden controls
    ShowControls,
    /// Not handled here; the host navigates away
    PassThrough,
}

pub fn handle_back(controls_visible: bool) -> BackAction {
    if controls_visible {
        BackAction::PassThrough
    } else {
        BackAction::ShowControls
    }
}

/// Side panels reachable from the bottom bar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SideSheet {
    Servers,
    Subtitles,
    Audio,
    Speed,
}
