use super::types::SeekMultiplier;
use crate::constants::DEFAULT_SEEK_STEP_MS;

/// Position the player would land on if the queued seek steps were committed now,
/// using the default step size.
pub fn seek_target(current_ms: i64, duration_ms: i64, multiplier: SeekMultiplier) -> i64 {
    seek_target_with_step(current_ms, duration_ms, multiplier, DEFAULT_SEEK_STEP_MS)
}

/// Offset `current_ms` by `multiplier * step_ms`, clamped to `[0, duration_ms]`.
///
/// With an unknown duration only the lower bound applies.
pub fn seek_target_with_step(
    current_ms: i64,
    duration_ms: i64,
    multiplier: SeekMultiplier,
    step_ms: i64,
) -> i64 {
    let offset = multiplier.value().saturating_mul(step_ms);
    let target = current_ms.max(0).saturating_add(offset).max(0);

    if duration_ms > 0 {
        target.min(duration_ms)
    } else {
        target
    }
}
