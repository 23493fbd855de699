//! Derived state for the television playback-controls overlay.
//!
//! [`state`] holds the pure derivation operations, [`deriver`] memoizes them
//! against the input tuple, and [`visibility`] decides which overlay pieces are
//! on screen.

pub mod deriver;
pub mod state;
pub mod visibility;

pub use deriver::ControlsDeriver;
pub use state::{
    ControlsSettings, DerivedControlsState, compute_is_loading, compute_seek_label,
    derive_controls_state, resolve_audio_label, resolve_server_label, resolve_subtitle_label,
    resolve_track_label, seek_label,
};
pub use visibility::{BackAction, OverlayVisibility, SideSheet, TopBarState, handle_back};
