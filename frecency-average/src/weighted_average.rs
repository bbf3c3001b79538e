//! Exponentially weighted average with an adaptive offset.
//!
//! Three accumulators hold, in decay-normalized form:
//!
//! ```text
//! N  = Σ w
//! X  = Σ w (x - off)
//! X2 = Σ w (x - off)²
//! ```
//!
//! Accumulators only take non-negative weight, so every sample is shifted by
//! `off`, which is kept strictly below every sample seen. When a sample arrives
//! at or below the offset, the offset is lowered and `X`, `X2` are rewritten as
//! if the new offset had always been in force.

use chrono::{DateTime, Utc};
use frecency_core::config::FrecencyConfig;
use frecency_core::constants;
use frecency_core::errors::{FrecencyError, FrecencyResult};
use frecency_core::traits::{DecayingWeight, SharedClock};
use frecency_decay::{AccumulatorOptions, DecayAccumulator};

use crate::estimate::Estimate;

/// Construction parameters for a [`WeightedAverage`].
#[derive(Debug, Clone)]
pub struct AverageOptions {
    /// Shared by all three accumulators. `start_value` is ignored.
    pub accumulator: AccumulatorOptions,
    /// Offset before any sample is seen.
    pub initial_offset: f64,
    /// Relative margin between a lowered offset and the sample that forced it.
    pub offset_epsilon: f64,
}

impl AverageOptions {
    pub fn new(timescale: f64) -> Self {
        Self {
            accumulator: AccumulatorOptions::new(timescale),
            initial_offset: constants::DEFAULT_INITIAL_OFFSET,
            offset_epsilon: constants::DEFAULT_OFFSET_EPSILON,
        }
    }

    pub fn from_config(config: &FrecencyConfig, clock: SharedClock) -> Self {
        Self {
            accumulator: AccumulatorOptions::from_config(&config.decay, clock),
            initial_offset: config.average.effective_initial_offset(),
            offset_epsilon: config.average.effective_offset_epsilon(),
        }
    }
}

/// Exponentially weighted average of a variable sampled over time.
#[derive(Debug, Clone)]
pub struct WeightedAverage {
    n_sum: DecayAccumulator,
    x_sum: DecayAccumulator,
    x2_sum: DecayAccumulator,
    offset: f64,
    offset_epsilon: f64,
}

impl WeightedAverage {
    /// An empty average with the given half-life, reading the wall clock.
    pub fn new(timescale: f64) -> FrecencyResult<Self> {
        Self::with_options(AverageOptions::new(timescale))
    }

    pub fn with_clock(timescale: f64, clock: SharedClock) -> FrecencyResult<Self> {
        let mut options = AverageOptions::new(timescale);
        options.accumulator = options.accumulator.with_clock(clock);
        Self::with_options(options)
    }

    pub fn from_config(config: &FrecencyConfig, clock: SharedClock) -> FrecencyResult<Self> {
        Self::with_options(AverageOptions::from_config(config, clock))
    }

    pub fn with_options(options: AverageOptions) -> FrecencyResult<Self> {
        if !options.initial_offset.is_finite() {
            return Err(FrecencyError::invalid("initial_offset", "must be finite"));
        }
        if !(options.offset_epsilon > 0.0 && options.offset_epsilon < 1.0) {
            return Err(FrecencyError::invalid(
                "offset_epsilon",
                format!("{} is not in (0, 1)", options.offset_epsilon),
            ));
        }
        let n_sum = DecayAccumulator::with_options(options.accumulator.with_start_value(0.0))?;
        Ok(Self {
            x_sum: n_sum.empty_like(),
            x2_sum: n_sum.empty_like(),
            n_sum,
            offset: options.initial_offset,
            offset_epsilon: options.offset_epsilon,
        })
    }

    pub fn timescale(&self) -> f64 {
        self.n_sum.timescale()
    }

    /// The current offset; always strictly below every sample added so far.
    pub fn offset(&self) -> f64 {
        self.offset
    }

    /// Total sample weight decayed to now.
    pub fn total_weight(&self) -> f64 {
        self.n_sum.present_weight()
    }

    pub fn total_weight_at(&self, t: DateTime<Utc>) -> f64 {
        self.n_sum.present_weight_at(t)
    }

    /// True until a sample with positive weight has been added.
    pub fn is_empty(&self) -> bool {
        self.n_sum.is_empty()
    }

    /// Add `sample` with `weight` at the clock's current time.
    pub fn add_sample(&mut self, sample: f64, weight: f64) -> FrecencyResult<()> {
        let now = self.n_sum.now();
        self.add_sample_at(sample, weight, now)
    }

    /// Add `sample` with `weight` as of `event_time`.
    ///
    /// A sample at or below the current offset first lowers the offset.
    /// Nothing is modified if the call fails.
    pub fn add_sample_at(&mut self, sample: f64, weight: f64, event_time: DateTime<Utc>) -> FrecencyResult<()> {
        if !sample.is_finite() {
            return Err(FrecencyError::invalid("sample", format!("{sample} is not finite")));
        }
        if !(weight.is_finite() && weight >= 0.0) {
            return Err(FrecencyError::invalid(
                "weight",
                format!("{weight} is not a non-negative, finite weight"),
            ));
        }

        let offset = if sample <= self.offset {
            lowered_offset(sample, self.offset_epsilon)
        } else {
            self.offset
        };
        let shifted = sample - offset;
        let x = weight * shifted;
        let x2 = x * shifted;
        if !x2.is_finite() {
            return Err(FrecencyError::invalid(
                "sample",
                format!("{sample} is too far from the offset {offset} to square"),
            ));
        }
        if !(self.offset - offset).is_finite() {
            return Err(FrecencyError::invalid(
                "sample",
                format!("{sample} is too far below the offset {} to rebase", self.offset),
            ));
        }

        if offset != self.offset {
            self.rebase_offset(offset)?;
        }
        self.n_sum.increment_at(weight, event_time)?;
        self.x_sum.increment_at(x, event_time)?;
        self.x2_sum.increment_at(x2, event_time)?;
        Ok(())
    }

    /// Present mean, standard deviation, and uncertainty of the mean.
    pub fn mean_std_uncertainty(&self) -> FrecencyResult<Estimate> {
        self.mean_std_uncertainty_at(self.n_sum.now())
    }

    /// Estimates as of `event_time`.
    ///
    /// Mean and standard deviation do not depend on `event_time`, since all
    /// three sums decay at the same rate; the uncertainty grows as the total
    /// weight decays. Fails with `DivisionUndefined` when no weight has been
    /// added. Rounding can make the variance come out slightly negative; it is
    /// clamped to zero.
    pub fn mean_std_uncertainty_at(&self, event_time: DateTime<Utc>) -> FrecencyResult<Estimate> {
        if self.n_sum.is_empty() {
            return Err(FrecencyError::DivisionUndefined);
        }
        // Ratios of sums taken in log space, where the shared decay cancels.
        let log2_n = self.n_sum.log2_value();
        let log2_x = self.x_sum.log2_value();
        let log2_x2 = self.x2_sum.log2_value();
        let offset_mean = (log2_x - log2_n).exp2();
        // std = mean · sqrt(E[x²] / mean² - 1), which stays finite even when
        // E[x²] alone would overflow.
        let std = if self.x_sum.is_empty() {
            (0.5 * (log2_x2 - log2_n)).exp2()
        } else {
            let excess = (log2_x2 + log2_n - 2.0 * log2_x).exp2() - 1.0;
            offset_mean * excess.max(0.0).sqrt()
        };

        let log2_present_n = self.n_sum.log2_present_weight_at(event_time);
        let uncertainty = std * (-0.5 * log2_present_n).exp2();

        Ok(Estimate {
            mean: offset_mean + self.offset,
            std,
            uncertainty,
        })
    }

    /// Move the offset down to `new_offset`, rewriting the sums exactly:
    ///
    /// ```text
    /// δ   = old - new
    /// X2' = X2 + 2δ·X + δ²·N
    /// X'  = X + δ·N
    /// N'  = N
    /// ```
    ///
    /// The combination happens accumulator-to-accumulator in log space, with
    /// the factors passed as log2, so it holds however extreme the
    /// linear-space values are, `δ²` included.
    fn rebase_offset(&mut self, new_offset: f64) -> FrecencyResult<()> {
        let delta = self.offset - new_offset;
        debug_assert!(delta > 0.0);
        let log2_delta = delta.log2();

        let mut x2_sum = self.x2_sum.clone();
        let mut x_sum = self.x_sum.clone();
        x2_sum.increment_by_accumulator_log2(&self.x_sum, 1.0 + log2_delta)?;
        x2_sum.increment_by_accumulator_log2(&self.n_sum, 2.0 * log2_delta)?;
        x_sum.increment_by_accumulator_log2(&self.n_sum, log2_delta)?;

        tracing::debug!(
            old_offset = self.offset,
            new_offset,
            delta,
            "lowering weighted average offset"
        );
        self.x2_sum = x2_sum;
        self.x_sum = x_sum;
        self.offset = new_offset;
        Ok(())
    }
}

impl DecayingWeight for WeightedAverage {
    fn timescale(&self) -> f64 {
        self.n_sum.timescale()
    }

    fn present_weight_at(&self, t: DateTime<Utc>) -> f64 {
        self.n_sum.present_weight_at(t)
    }
}

/// An offset strictly below `sample`: `sample · (1 + ε)` for negative samples,
/// falling back to an absolute margin where that would not move it.
fn lowered_offset(sample: f64, epsilon: f64) -> f64 {
    let scaled = sample * (1.0 + epsilon);
    if scaled < sample {
        scaled
    } else {
        sample - epsilon * sample.abs().max(1.0)
    }
}
