use chrono::{DateTime, TimeZone, Utc};

/// Frecency workspace version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default half-life: one day, in seconds.
pub const DEFAULT_TIMESCALE_SECS: f64 = 24.0 * 60.0 * 60.0;

/// Relative margin used when lowering the weighted-average offset below a sample.
pub const DEFAULT_OFFSET_EPSILON: f64 = 1e-5;

/// Starting offset of a weighted average. Slightly below zero so that
/// non-negative samples never trigger a rescale.
pub const DEFAULT_INITIAL_OFFSET: f64 = -DEFAULT_OFFSET_EPSILON;

/// Unix seconds of the default time origin, 2014-01-01T00:00:00Z.
pub const DEFAULT_TIME_ORIGIN_UNIX_SECS: i64 = 1_388_534_400;

/// The default time origin used to normalize log2 weights.
///
/// Arbitrary, but it must stay fixed for the life of an accumulator.
pub fn default_time_origin() -> DateTime<Utc> {
    Utc.timestamp_opt(DEFAULT_TIME_ORIGIN_UNIX_SECS, 0)
        .single()
        .unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
}
