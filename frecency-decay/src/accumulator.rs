//! The decaying accumulator: one log2 value per counter, decayed at read time.

use std::fmt;

use chrono::{DateTime, Utc};
use frecency_core::config::DecayConfig;
use frecency_core::constants;
use frecency_core::errors::{FrecencyError, FrecencyResult};
use frecency_core::time::seconds_since;
use frecency_core::traits::{DecayingWeight, SharedClock, SystemClock};

use crate::log2::log2_add_exp2;

/// Construction parameters for a [`DecayAccumulator`].
#[derive(Clone)]
pub struct AccumulatorOptions {
    /// Half-life in seconds. Must be positive and finite.
    pub timescale: f64,
    /// Weight added at construction time, read from `clock`. Zero adds nothing.
    pub start_value: f64,
    /// Reference time for log2 normalization. Fixed for the accumulator's life.
    pub time_origin: DateTime<Utc>,
    /// Source of "now" for operations without an explicit event time.
    pub clock: SharedClock,
}

impl AccumulatorOptions {
    /// Options with the given half-life and defaults for everything else.
    pub fn new(timescale: f64) -> Self {
        Self {
            timescale,
            ..Self::default()
        }
    }

    /// Options taken from a decay config section.
    pub fn from_config(config: &DecayConfig, clock: SharedClock) -> Self {
        Self {
            timescale: config.effective_timescale_secs(),
            start_value: 0.0,
            time_origin: config.effective_time_origin(),
            clock,
        }
    }

    pub fn with_clock(mut self, clock: SharedClock) -> Self {
        self.clock = clock;
        self
    }

    pub fn with_time_origin(mut self, time_origin: DateTime<Utc>) -> Self {
        self.time_origin = time_origin;
        self
    }

    pub fn with_start_value(mut self, start_value: f64) -> Self {
        self.start_value = start_value;
        self
    }
}

impl Default for AccumulatorOptions {
    fn default() -> Self {
        Self {
            timescale: constants::DEFAULT_TIMESCALE_SECS,
            start_value: 0.0,
            time_origin: constants::default_time_origin(),
            clock: SystemClock::shared(),
        }
    }
}

impl fmt::Debug for AccumulatorOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccumulatorOptions")
            .field("timescale", &self.timescale)
            .field("start_value", &self.start_value)
            .field("time_origin", &self.time_origin)
            .finish_non_exhaustive()
    }
}

/// Exponentially decaying event counter.
///
/// The only mutable state is `log2_value`, the log2 of the accumulated weight
/// normalized to `time_origin`. Decay is applied at read time, so the stored
/// value never decreases. An empty accumulator holds negative infinity.
#[derive(Clone)]
pub struct DecayAccumulator {
    timescale: f64,
    time_origin: DateTime<Utc>,
    log2_value: f64,
    clock: SharedClock,
}

impl DecayAccumulator {
    /// An empty accumulator with the given half-life, reading the wall clock.
    pub fn new(timescale: f64) -> FrecencyResult<Self> {
        Self::with_options(AccumulatorOptions::new(timescale))
    }

    /// An empty accumulator with the given half-life and clock.
    pub fn with_clock(timescale: f64, clock: SharedClock) -> FrecencyResult<Self> {
        Self::with_options(AccumulatorOptions::new(timescale).with_clock(clock))
    }

    /// An accumulator configured from a decay config section.
    pub fn from_config(config: &DecayConfig, clock: SharedClock) -> FrecencyResult<Self> {
        Self::with_options(AccumulatorOptions::from_config(config, clock))
    }

    /// Build from explicit options. A non-zero `start_value` is added at the
    /// clock's current time.
    pub fn with_options(options: AccumulatorOptions) -> FrecencyResult<Self> {
        validate_timescale(options.timescale)?;
        let mut acc = Self {
            timescale: options.timescale,
            time_origin: options.time_origin,
            log2_value: f64::NEG_INFINITY,
            clock: options.clock,
        };
        if options.start_value != 0.0 {
            acc.increment(options.start_value)?;
        }
        Ok(acc)
    }

    /// A fresh, empty accumulator sharing this one's timescale, origin, and clock.
    pub fn empty_like(&self) -> Self {
        Self {
            timescale: self.timescale,
            time_origin: self.time_origin,
            log2_value: f64::NEG_INFINITY,
            clock: self.clock.clone(),
        }
    }

    /// Same as [`empty_like`](Self::empty_like) but with a different half-life.
    pub fn empty_with_timescale(&self, timescale: f64) -> FrecencyResult<Self> {
        validate_timescale(timescale)?;
        Ok(Self {
            timescale,
            ..self.empty_like()
        })
    }

    pub fn timescale(&self) -> f64 {
        self.timescale
    }

    pub fn time_origin(&self) -> DateTime<Utc> {
        self.time_origin
    }

    pub fn clock(&self) -> &SharedClock {
        &self.clock
    }

    /// Current time according to the injected clock.
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Raw log2 state, normalized to `time_origin`.
    pub fn log2_value(&self) -> f64 {
        self.log2_value
    }

    /// Overwrite the raw log2 state, bypassing `increment`.
    ///
    /// Used when restoring persisted state. Negative infinity means no weight;
    /// NaN and positive infinity are rejected.
    pub fn set_log2_value(&mut self, log2_value: f64) -> FrecencyResult<()> {
        if log2_value.is_nan() || log2_value == f64::INFINITY {
            return Err(FrecencyError::invalid(
                "log2_value",
                format!("{log2_value} is not a storable accumulator state"),
            ));
        }
        self.log2_value = log2_value;
        Ok(())
    }

    /// True until something with positive weight has been added.
    pub fn is_empty(&self) -> bool {
        self.log2_value == f64::NEG_INFINITY
    }

    /// Add `value_added` at the clock's current time.
    pub fn increment(&mut self, value_added: f64) -> FrecencyResult<()> {
        let now = self.now();
        self.increment_at(value_added, now)
    }

    /// Add `value_added` as of `event_time`, which may lie in the past or future.
    ///
    /// Zero is accepted and changes nothing. Negative, NaN, and infinite
    /// values are rejected; there is no decrement.
    pub fn increment_at(&mut self, value_added: f64, event_time: DateTime<Utc>) -> FrecencyResult<()> {
        if value_added.is_nan() || value_added < 0.0 {
            return Err(FrecencyError::invalid(
                "value_added",
                format!("{value_added} is not a non-negative weight"),
            ));
        }
        if value_added.is_infinite() {
            return Err(FrecencyError::invalid("value_added", "weight must be finite"));
        }
        let log2_weight_added = self.elapsed_timescales(event_time) + value_added.log2();
        self.log2_value = log2_add_exp2(self.log2_value, log2_weight_added);
        tracing::trace!(
            value_added,
            log2_weight_added,
            log2_value = self.log2_value,
            "frecency increment"
        );
        Ok(())
    }

    /// Add `multiplier` times `other`'s accumulated weight, entirely in log space.
    ///
    /// Equivalent at every instant to adding `multiplier * other.present_weight_at(t)`.
    /// Both accumulators must share a timescale; differing origins are corrected for.
    /// A zero multiplier adds nothing.
    pub fn increment_by_accumulator(&mut self, other: &DecayAccumulator, multiplier: f64) -> FrecencyResult<()> {
        if self.timescale != other.timescale {
            return Err(FrecencyError::IncompatibleTimescales {
                left: self.timescale,
                right: other.timescale,
            });
        }
        if !(multiplier.is_finite() && multiplier >= 0.0) {
            return Err(FrecencyError::invalid(
                "multiplier",
                format!("{multiplier} is not a non-negative, finite factor"),
            ));
        }
        self.increment_by_accumulator_log2(other, multiplier.log2())
    }

    /// [`increment_by_accumulator`](Self::increment_by_accumulator) with the
    /// factor given as its log2, for factors too large to hold as an `f64`.
    ///
    /// Negative infinity (a zero factor) adds nothing; NaN and positive
    /// infinity are rejected.
    pub fn increment_by_accumulator_log2(
        &mut self,
        other: &DecayAccumulator,
        log2_multiplier: f64,
    ) -> FrecencyResult<()> {
        if self.timescale != other.timescale {
            return Err(FrecencyError::IncompatibleTimescales {
                left: self.timescale,
                right: other.timescale,
            });
        }
        if log2_multiplier.is_nan() || log2_multiplier == f64::INFINITY {
            return Err(FrecencyError::invalid(
                "log2_multiplier",
                format!("{log2_multiplier} is not the log2 of a finite factor"),
            ));
        }
        let rebased = other.log2_value_relative_to(self.time_origin);
        self.log2_value = log2_add_exp2(self.log2_value, rebased + log2_multiplier);
        Ok(())
    }

    /// The weight that `increment` would have to add right now to reach the
    /// current state, i.e. everything accumulated so far decayed to now.
    pub fn present_weight(&self) -> f64 {
        self.present_weight_at(self.now())
    }

    /// Accumulated weight decayed to `event_time`. Zero when empty.
    pub fn present_weight_at(&self, event_time: DateTime<Utc>) -> f64 {
        self.log2_present_weight_at(event_time).exp2()
    }

    /// log2 of [`present_weight_at`](Self::present_weight_at), safe from
    /// overflow and underflow for any span of time.
    pub fn log2_present_weight_at(&self, event_time: DateTime<Utc>) -> f64 {
        self.log2_value - self.elapsed_timescales(event_time)
    }

    /// The raw log2 value this accumulator would hold if its origin were `origin`.
    pub(crate) fn log2_value_relative_to(&self, origin: DateTime<Utc>) -> f64 {
        self.log2_value + seconds_since(origin, self.time_origin) / self.timescale
    }

    fn elapsed_timescales(&self, event_time: DateTime<Utc>) -> f64 {
        seconds_since(self.time_origin, event_time) / self.timescale
    }
}

impl DecayingWeight for DecayAccumulator {
    fn timescale(&self) -> f64 {
        self.timescale
    }

    fn present_weight_at(&self, t: DateTime<Utc>) -> f64 {
        DecayAccumulator::present_weight_at(self, t)
    }
}

impl fmt::Debug for DecayAccumulator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DecayAccumulator")
            .field("timescale", &self.timescale)
            .field("time_origin", &self.time_origin)
            .field("log2_value", &self.log2_value)
            .finish_non_exhaustive()
    }
}

pub(crate) fn validate_timescale(timescale: f64) -> FrecencyResult<()> {
    if timescale.is_finite() && timescale > 0.0 {
        Ok(())
    } else {
        Err(FrecencyError::invalid(
            "timescale",
            format!("{timescale} is not a positive, finite half-life"),
        ))
    }
}
