//! # frecency
//!
//! One dependency for the whole workspace: the decaying accumulator, the
//! weighted average built on it, and the weighted bootstrap sampler, plus the
//! config, clock, and error types they share.
//!
//! ```
//! use frecency::{DecayAccumulator, FrecencyConfig, SystemClock};
//!
//! frecency::init_tracing();
//! let config = FrecencyConfig::default();
//! let mut visits = DecayAccumulator::from_config(&config.decay, SystemClock::shared())?;
//! visits.increment(1.0)?;
//! assert!(visits.present_weight() > 0.0);
//! # Ok::<(), frecency::FrecencyError>(())
//! ```

pub use frecency_core::config::{
    AverageConfig, BootstrapConfig, ComparisonPolicy, DecayConfig, FrecencyConfig,
};
pub use frecency_core::constants;
pub use frecency_core::errors::{ConfigError, FrecencyError, FrecencyErrorCode, FrecencyResult};
pub use frecency_core::tracing::{init_tracing, init_tracing_with_filter};
pub use frecency_core::traits::{Clock, DecayingWeight, ManualClock, SharedClock, SystemClock};

pub use frecency_average::{AverageOptions, Estimate, WeightedAverage};
pub use frecency_bootstrap::WeightedBootstrap;
pub use frecency_decay::{
    compare_fast, log2_add_exp2, AccumulatorOptions, Comparator, DecayAccumulator,
    StoredAccumulator,
};
