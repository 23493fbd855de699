pub mod errors;
pub mod time;

pub use errors::ControlsError;
pub use time::{format_duration, requires_hours};
