// Derived state for a television playback-controls overlay: loading spinner,
// seek offset label, track and server labels, and which overlay parts are shown.

pub mod config;
pub mod constants;
pub mod controls;
pub mod core;
pub mod models;
pub mod player;
pub mod ui;
pub mod utils;

pub use config::Config;
pub use controls::{ControlsDeriver, DerivedControlsState, OverlayVisibility};
pub use crate::core::PlaybackControlsViewModel;
pub use models::{SourceDataState, SourceLink};
pub use player::{AudioTrack, PlayerSnapshot, SeekMultiplier, SubtitleTrack};
pub use utils::ControlsError;
