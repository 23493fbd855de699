// Playback controls tuning constants

// === Seeking ===
/// Milliseconds covered by a single queued seek step
pub const DEFAULT_SEEK_STEP_MS: i64 = 10_000;

/// Duration reported by a player that does not know the media length yet
pub const DURATION_UNSET: i64 = i64::MIN + 1;

// === Labels ===
/// Shown in the bottom bar when the selected source link cannot be resolved
pub const DEFAULT_SERVER_LABEL: &str = "Default Server";

// === Refresh ===
/// How often the view model pulls a fresh player snapshot
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 500;

// === Time ===
pub const MILLIS_PER_SECOND: i64 = 1_000;
pub const MILLIS_PER_HOUR: i64 = 3_600_000;
