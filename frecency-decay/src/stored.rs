//! Persisted form of an accumulator.
//!
//! Storage adapters keep the raw log2 value in a nullable float column and
//! carry the timescale and origin alongside it. Negative infinity (no weight
//! yet) has no portable float encoding, so it maps to `None`.

use chrono::{DateTime, Utc};
use frecency_core::errors::FrecencyResult;
use frecency_core::traits::SharedClock;
use serde::{Deserialize, Serialize};

use crate::accumulator::{AccumulatorOptions, DecayAccumulator};

/// Everything needed to rebuild an accumulator without replaying increments.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StoredAccumulator {
    /// Raw log2 value; `None` for an empty accumulator.
    pub log2_value: Option<f64>,
    /// Half-life in seconds.
    pub timescale: f64,
    /// Reference time the log2 value is normalized to.
    pub time_origin: DateTime<Utc>,
}

impl DecayAccumulator {
    /// The column value for this accumulator: its log2 value, or `None` when empty.
    pub fn to_column(&self) -> Option<f64> {
        if self.is_empty() {
            None
        } else {
            Some(self.log2_value())
        }
    }

    /// Rebuild from a column value. `options.start_value` is ignored.
    pub fn from_column(value: Option<f64>, options: AccumulatorOptions) -> FrecencyResult<Self> {
        let mut acc = Self::with_options(options.with_start_value(0.0))?;
        acc.set_log2_value(value.unwrap_or(f64::NEG_INFINITY))?;
        Ok(acc)
    }

    pub fn to_stored(&self) -> StoredAccumulator {
        StoredAccumulator {
            log2_value: self.to_column(),
            timescale: self.timescale(),
            time_origin: self.time_origin(),
        }
    }

    pub fn from_stored(stored: &StoredAccumulator, clock: SharedClock) -> FrecencyResult<Self> {
        let options = AccumulatorOptions::new(stored.timescale)
            .with_time_origin(stored.time_origin)
            .with_clock(clock);
        Self::from_column(stored.log2_value, options)
    }
}
