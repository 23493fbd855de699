pub mod viewmodels;

pub use viewmodels::{PlaybackControlsViewModel, ViewModel};
