pub mod seek;
pub mod traits;
pub mod types;

pub use seek::{seek_target, seek_target_with_step};
pub use traits::{PlayerStateProvider, SourceStateProvider};
pub use types::{AudioTrack, PlayerSnapshot, SeekMultiplier, SubtitleTrack, TrackLabel};
