//! # frecency-average
//!
//! Streaming mean / standard deviation / uncertainty of a sampled variable,
//! with every sample's influence halving once per timescale.

pub mod estimate;
pub mod weighted_average;

pub use estimate::Estimate;
pub use weighted_average::{AverageOptions, WeightedAverage};
