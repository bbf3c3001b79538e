//! # frecency-decay
//!
//! A single scalar that fuses frequency and recency: every event adds its
//! weight, and all weight halves once per timescale. State is kept as a
//! log2 value relative to a fixed time origin, so it grows only linearly with
//! elapsed time instead of overflowing.

pub mod accumulator;
pub mod compare;
pub mod log2;
pub mod stored;

pub use accumulator::{AccumulatorOptions, DecayAccumulator};
pub use compare::{compare_fast, Comparator};
pub use frecency_core::config::ComparisonPolicy;
pub use log2::log2_add_exp2;
pub use stored::StoredAccumulator;
