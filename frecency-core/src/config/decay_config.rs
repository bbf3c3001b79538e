//! Decay accumulator configuration.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::constants;

/// How two accumulators are ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ComparisonPolicy {
    /// Compare origin-corrected log2 values. Both sides must share a timescale.
    #[default]
    Fast,
    /// Compare present weights at one instant. Works across timescales but
    /// warns, since the ordering then depends on when it is asked.
    Careful,
}

/// Configuration for decay accumulators.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct DecayConfig {
    /// Half-life in seconds. Default: 86400 (one day).
    pub timescale_secs: Option<f64>,
    /// Reference time for log2 normalization. Default: 2014-01-01T00:00:00Z.
    pub time_origin: Option<DateTime<Utc>>,
    /// Comparison policy. Default: fast.
    pub comparison: Option<ComparisonPolicy>,
    /// Silence cross-timescale comparison warnings. Default: false.
    pub suppress_warnings: Option<bool>,
}

impl DecayConfig {
    /// Returns the effective half-life, defaulting to one day.
    pub fn effective_timescale_secs(&self) -> f64 {
        self.timescale_secs
            .unwrap_or(constants::DEFAULT_TIMESCALE_SECS)
    }

    /// Returns the effective time origin, defaulting to the start of 2014.
    pub fn effective_time_origin(&self) -> DateTime<Utc> {
        self.time_origin
            .unwrap_or_else(constants::default_time_origin)
    }

    /// Returns the effective comparison policy, defaulting to fast.
    pub fn effective_comparison(&self) -> ComparisonPolicy {
        self.comparison.unwrap_or_default()
    }

    /// Returns whether warnings are suppressed, defaulting to false.
    pub fn effective_suppress_warnings(&self) -> bool {
        self.suppress_warnings.unwrap_or(false)
    }
}
