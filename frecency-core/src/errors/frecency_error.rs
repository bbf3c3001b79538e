//! Errors raised by accumulators, averages, and samplers.

use super::error_code::{self, FrecencyErrorCode};
use super::ConfigError;

/// Contract violations surfaced synchronously at the offending call.
///
/// None of these are retried or recovered internally.
#[derive(Debug, thiserror::Error)]
pub enum FrecencyError {
    #[error("invalid argument `{name}`: {reason}")]
    InvalidArgument { name: &'static str, reason: String },

    #[error("mean is undefined with zero accumulated weight")]
    DivisionUndefined,

    #[error("cannot sample from an empty bootstrap")]
    EmptySampler,

    #[error("timescales differ: {left}s vs {right}s")]
    IncompatibleTimescales { left: f64, right: f64 },

    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
}

impl FrecencyError {
    /// Shorthand for building an `InvalidArgument`.
    pub fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            name,
            reason: reason.into(),
        }
    }
}

impl FrecencyErrorCode for FrecencyError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidArgument { .. } => error_code::INVALID_ARGUMENT,
            Self::DivisionUndefined => error_code::DIVISION_UNDEFINED,
            Self::EmptySampler => error_code::PRECONDITION_VIOLATION,
            Self::IncompatibleTimescales { .. } => error_code::INCOMPATIBLE_TIMESCALES,
            Self::Config(e) => e.error_code(),
        }
    }
}

pub type FrecencyResult<T> = Result<T, FrecencyError>;
