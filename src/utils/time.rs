use crate::constants::{MILLIS_PER_HOUR, MILLIS_PER_SECOND};

/// Format a millisecond timestamp as `MM:SS`, or `H:MM:SS` when `include_hours` is set.
///
/// Non-positive values render as zero. A value of an hour or more always gets the
/// hour segment, even when `include_hours` is false, so a time is never truncated.
pub fn format_duration(millis: i64, include_hours: bool) -> String {
    let total_secs = millis.max(0) / MILLIS_PER_SECOND;
    let hours = total_secs / 3600;
    let minutes = (total_secs % 3600) / 60;
    let seconds = total_secs % 60;

    if include_hours || hours > 0 {
        format!("{}:{:02}:{:02}", hours, minutes, seconds)
    } else {
        format!("{:02}:{:02}", minutes, seconds)
    }
}

/// Whether a media of this total length needs the hour segment.
///
/// Unknown durations (zero, negative, or the unset sentinel) use the minimal format.
pub fn requires_hours(duration_ms: i64) -> bool {
    duration_ms >= MILLIS_PER_HOUR
}
