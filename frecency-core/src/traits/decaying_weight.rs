//! Common view of anything holding a decaying total weight.

use chrono::{DateTime, Utc};

/// Anything that carries a single exponentially decaying total weight.
///
/// Implemented by the decay accumulator and by the structures composed from
/// it, so callers can rank or threshold them uniformly.
pub trait DecayingWeight {
    /// Half-life in seconds.
    fn timescale(&self) -> f64;

    /// Total weight decayed to `t`.
    fn present_weight_at(&self, t: DateTime<Utc>) -> f64;

    /// Whether the decayed weight at `t` has fallen below `threshold`.
    fn is_negligible_at(&self, t: DateTime<Utc>, threshold: f64) -> bool {
        self.present_weight_at(t) < threshold
    }
}
