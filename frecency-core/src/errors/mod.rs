//! Error handling for the frecency workspace.
//! One error enum per concern, `thiserror` only, zero `anyhow`.

pub mod config_error;
pub mod error_code;
pub mod frecency_error;

pub use config_error::ConfigError;
pub use error_code::FrecencyErrorCode;
pub use frecency_error::{FrecencyError, FrecencyResult};
