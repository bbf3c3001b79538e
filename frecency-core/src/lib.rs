//! # frecency-core
//!
//! Foundation crate for the frecency workspace.
//! Defines the errors, config, clock capability, shared traits, and constants
//! that the accumulator, average, and bootstrap crates build on.

pub mod config;
pub mod constants;
pub mod errors;
pub mod time;
pub mod tracing;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::FrecencyConfig;
pub use errors::{ConfigError, FrecencyError, FrecencyErrorCode, FrecencyResult};
pub use traits::{Clock, DecayingWeight, ManualClock, SharedClock, SystemClock};
