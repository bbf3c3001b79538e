//! Ordering accumulators by decayed weight.
//!
//! Fast comparison works on raw log2 values and needs a shared timescale.
//! Careful comparison evaluates both present weights at one instant and
//! accepts differing timescales, with a warning, because the resulting order
//! can flip as time passes.

use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use frecency_core::config::{ComparisonPolicy, DecayConfig};
use frecency_core::errors::{FrecencyError, FrecencyResult};

use crate::accumulator::DecayAccumulator;

/// A comparison policy plus whether cross-timescale warnings are emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Comparator {
    pub policy: ComparisonPolicy,
    pub suppress_warnings: bool,
}

impl Comparator {
    pub fn new(policy: ComparisonPolicy) -> Self {
        Self {
            policy,
            suppress_warnings: false,
        }
    }

    pub fn from_config(config: &DecayConfig) -> Self {
        Self {
            policy: config.effective_comparison(),
            suppress_warnings: config.effective_suppress_warnings(),
        }
    }

    /// Order `a` against `b`. Careful comparisons are evaluated at `a`'s clock.
    pub fn compare(&self, a: &DecayAccumulator, b: &DecayAccumulator) -> FrecencyResult<Ordering> {
        match self.policy {
            ComparisonPolicy::Fast => compare_fast(a, b),
            ComparisonPolicy::Careful => Ok(self.compare_careful_at(a, b, a.now())),
        }
    }

    /// Order by present weight at `t`, whatever the timescales.
    pub fn compare_careful_at(
        &self,
        a: &DecayAccumulator,
        b: &DecayAccumulator,
        t: DateTime<Utc>,
    ) -> Ordering {
        if a.timescale() != b.timescale() && !self.suppress_warnings {
            tracing::warn!(
                left = a.timescale(),
                right = b.timescale(),
                "comparing frecencies with different timescales; the order may change over time"
            );
        }
        a.present_weight_at(t).total_cmp(&b.present_weight_at(t))
    }
}

/// Order two accumulators sharing a timescale by their origin-corrected log2 values.
pub fn compare_fast(a: &DecayAccumulator, b: &DecayAccumulator) -> FrecencyResult<Ordering> {
    if a.timescale() != b.timescale() {
        return Err(FrecencyError::IncompatibleTimescales {
            left: a.timescale(),
            right: b.timescale(),
        });
    }
    let a_key = a.log2_value_relative_to(b.time_origin());
    Ok(a_key.total_cmp(&b.log2_value()))
}

impl DecayAccumulator {
    /// Order against `other` under `policy`, warning on mismatched timescales
    /// for the careful policy.
    pub fn compare(&self, other: &DecayAccumulator, policy: ComparisonPolicy) -> FrecencyResult<Ordering> {
        Comparator::new(policy).compare(self, other)
    }
}

/// Accumulators are equal when they share a timescale and would report the
/// same present weight at every instant.
impl PartialEq for DecayAccumulator {
    fn eq(&self, other: &Self) -> bool {
        self.partial_cmp(other) == Some(Ordering::Equal)
    }
}

/// Fast ordering; `None` when the timescales differ.
impl PartialOrd for DecayAccumulator {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        compare_fast(self, other).ok()
    }
}
