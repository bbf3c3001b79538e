//! Weighted bootstrap over decaying observations.

use chrono::{DateTime, Utc};
use frecency_core::config::FrecencyConfig;
use frecency_core::errors::{FrecencyError, FrecencyResult};
use frecency_core::traits::{DecayingWeight, SharedClock};
use frecency_decay::{AccumulatorOptions, DecayAccumulator};
use rand::Rng;

/// Bootstrap random variable over exponentially weighted observations.
///
/// Append-only. `samples`, `weights`, `event_times`, and
/// `cumulative_log2_weights` always have the same length; the cumulants are
/// sorted ascending.
#[derive(Debug, Clone)]
pub struct WeightedBootstrap<T> {
    samples: Vec<T>,
    weights: Vec<f64>,
    event_times: Vec<DateTime<Utc>>,
    cumulative_log2_weights: Vec<f64>,
    total_weight: DecayAccumulator,
}

impl<T> WeightedBootstrap<T> {
    /// An empty bootstrap with the given half-life, reading the wall clock.
    pub fn new(timescale: f64) -> FrecencyResult<Self> {
        Self::with_options(AccumulatorOptions::new(timescale))
    }

    pub fn with_clock(timescale: f64, clock: SharedClock) -> FrecencyResult<Self> {
        Self::with_options(AccumulatorOptions::new(timescale).with_clock(clock))
    }

    /// Uses `bootstrap.timescale_secs`, falling back to the decay timescale.
    pub fn from_config(config: &FrecencyConfig, clock: SharedClock) -> FrecencyResult<Self> {
        let mut options = AccumulatorOptions::from_config(&config.decay, clock);
        options.timescale = config.effective_bootstrap_timescale_secs();
        Self::with_options(options)
    }

    /// `options.start_value` is ignored; a bootstrap starts with no weight.
    pub fn with_options(options: AccumulatorOptions) -> FrecencyResult<Self> {
        let total_weight = DecayAccumulator::with_options(options.with_start_value(0.0))?;
        Ok(Self::from_accumulator(total_weight))
    }

    fn from_accumulator(total_weight: DecayAccumulator) -> Self {
        Self {
            samples: Vec::new(),
            weights: Vec::new(),
            event_times: Vec::new(),
            cumulative_log2_weights: Vec::new(),
            total_weight,
        }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn timescale(&self) -> f64 {
        self.total_weight.timescale()
    }

    /// Total weight of all observations decayed to now.
    pub fn total_weight(&self) -> f64 {
        self.total_weight.present_weight()
    }

    pub fn total_weight_at(&self, t: DateTime<Utc>) -> f64 {
        self.total_weight.present_weight_at(t)
    }

    /// The log2 total weight recorded after each observation, in insertion order.
    pub fn cumulative_log2_weights(&self) -> &[f64] {
        &self.cumulative_log2_weights
    }

    /// Observations with their original weights and event times, in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&T, f64, DateTime<Utc>)> + '_ {
        self.samples
            .iter()
            .zip(self.weights.iter().copied())
            .zip(self.event_times.iter().copied())
            .map(|((sample, weight), event_time)| (sample, weight, event_time))
    }

    /// Add an observation with `weight` at the clock's current time.
    pub fn add_sample(&mut self, sample: T, weight: f64) -> FrecencyResult<()> {
        let now = self.total_weight.now();
        self.add_sample_at(sample, weight, now)
    }

    /// Add an observation with `weight` as of `event_time`.
    ///
    /// The event time is recorded so that [`resample`](Self::resample) replays it exactly.
    pub fn add_sample_at(&mut self, sample: T, weight: f64, event_time: DateTime<Utc>) -> FrecencyResult<()> {
        self.total_weight.increment_at(weight, event_time)?;
        self.samples.push(sample);
        self.cumulative_log2_weights
            .push(self.total_weight.log2_value());
        self.weights.push(weight);
        self.event_times.push(event_time);
        Ok(())
    }

    /// Draw one observation using the thread-local RNG.
    pub fn sample(&self) -> FrecencyResult<&T> {
        self.sample_with(&mut rand::thread_rng())
    }

    /// Draw one observation, with probability proportional to its decayed weight.
    ///
    /// Fails with `EmptySampler` when there is nothing to draw, including
    /// when every observation so far had zero weight.
    pub fn sample_with<R: Rng + ?Sized>(&self, rng: &mut R) -> FrecencyResult<&T> {
        self.ensure_drawable()?;
        let index = self.locate(self.seek_position(rng));
        Ok(&self.samples[index])
    }

    /// Draw `count` observations with replacement using the thread-local RNG.
    pub fn samples(&self, count: usize) -> FrecencyResult<Vec<&T>> {
        self.samples_with(count, &mut rand::thread_rng())
    }

    /// Draw `count` independent observations with replacement.
    ///
    /// Consumes the RNG exactly as `count` calls to [`sample_with`](Self::sample_with)
    /// would, and returns the same draws.
    pub fn samples_with<R: Rng + ?Sized>(&self, count: usize, rng: &mut R) -> FrecencyResult<Vec<&T>> {
        self.ensure_drawable()?;
        let seeks: Vec<f64> = (0..count).map(|_| self.seek_position(rng)).collect();
        Ok(seeks
            .into_iter()
            .map(|seek| &self.samples[self.locate(seek)])
            .collect())
    }

    fn ensure_drawable(&self) -> FrecencyResult<()> {
        if self.samples.is_empty() || self.total_weight.is_empty() {
            return Err(FrecencyError::EmptySampler);
        }
        Ok(())
    }

    /// A point in `(-inf, total]` of the cumulant scale: `log2(u · 2^total)` for
    /// `u` uniform on `(0, 1]`.
    fn seek_position<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        let u = 1.0 - rng.gen::<f64>();
        self.total_weight.log2_value() + u.log2()
    }

    /// Index of the first cumulant at or above `seek`.
    ///
    /// Zero-weight observations repeat the previous cumulant, so the search
    /// lands on the earlier, weighted entry and never selects them.
    fn locate(&self, seek: f64) -> usize {
        let index = self
            .cumulative_log2_weights
            .partition_point(|&c| c < seek);
        index.min(self.cumulative_log2_weights.len() - 1)
    }
}

impl<T: Clone> WeightedBootstrap<T> {
    /// A new, independent bootstrap replaying every observation, optionally
    /// under a different half-life.
    pub fn resample(&self, timescale: Option<f64>) -> FrecencyResult<Self> {
        self.resample_filtered(|_| true, timescale)
    }

    /// A new, independent bootstrap replaying, in order, the observations for
    /// which `filter` returns true. With `timescale` set, the replacement
    /// half-life changes relative decay but not which observations are kept
    /// or their original weights and times.
    pub fn resample_filtered<F>(&self, mut filter: F, timescale: Option<f64>) -> FrecencyResult<Self>
    where
        F: FnMut(&T) -> bool,
    {
        let accumulator = match timescale {
            Some(t) => self.total_weight.empty_with_timescale(t)?,
            None => self.total_weight.empty_like(),
        };
        let mut resampled = Self::from_accumulator(accumulator);
        for (sample, weight, event_time) in self.iter() {
            if filter(sample) {
                resampled.add_sample_at(sample.clone(), weight, event_time)?;
            }
        }
        tracing::debug!(
            original = self.len(),
            retained = resampled.len(),
            timescale = resampled.timescale(),
            "resampled bootstrap"
        );
        Ok(resampled)
    }
}

impl<T> DecayingWeight for WeightedBootstrap<T> {
    fn timescale(&self) -> f64 {
        self.total_weight.timescale()
    }

    fn present_weight_at(&self, t: DateTime<Utc>) -> f64 {
        self.total_weight.present_weight_at(t)
    }
}
