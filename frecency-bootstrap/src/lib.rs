//! # frecency-bootstrap
//!
//! Draw observations with probability proportional to their decayed weight.
//!
//! Each observation is stored next to the log2 total weight right after it
//! was added. Those cumulants are non-decreasing, so a uniform draw scaled to
//! the current total (in log2 space) can be located by binary search. All
//! observations decay at the same rate, so sampling against the undecayed
//! cumulants gives the same distribution as sampling against present weights.

pub mod sampler;

pub use sampler::WeightedBootstrap;
