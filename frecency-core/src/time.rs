//! Conversions between timestamps and the `f64` seconds the decay math works in.

use chrono::{DateTime, Utc};

/// Seconds elapsed from `origin` to `t`, negative when `t` precedes `origin`.
///
/// Nanosecond precision within roughly ±292 years of `origin`, millisecond
/// precision beyond that.
pub fn seconds_since(origin: DateTime<Utc>, t: DateTime<Utc>) -> f64 {
    let delta = t.signed_duration_since(origin);
    match delta.num_nanoseconds() {
        Some(ns) => ns as f64 / 1e9,
        None => delta.num_milliseconds() as f64 / 1e3,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn sub_second_precision() {
        let origin = Utc::now();
        let t = origin + Duration::milliseconds(1500);
        assert!((seconds_since(origin, t) - 1.5).abs() < 1e-9);
        assert!((seconds_since(t, origin) + 1.5).abs() < 1e-9);
    }

    #[test]
    fn falls_back_to_milliseconds_for_huge_spans() {
        let origin = DateTime::<Utc>::UNIX_EPOCH;
        let t = origin + Duration::days(365 * 400);
        let secs = seconds_since(origin, t);
        assert!((secs - (365.0 * 400.0 * 86400.0)).abs() < 1.0);
    }
}
