//! Stable error codes for callers that cross a language or process boundary.

/// Every error enum implements this to expose a structured code string.
pub trait FrecencyErrorCode {
    /// Returns the error code string (e.g., "INVALID_ARGUMENT").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted error string: `[ERROR_CODE] message`.
    fn coded_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const INVALID_ARGUMENT: &str = "INVALID_ARGUMENT";
pub const DIVISION_UNDEFINED: &str = "DIVISION_UNDEFINED";
pub const PRECONDITION_VIOLATION: &str = "PRECONDITION_VIOLATION";
pub const INCOMPATIBLE_TIMESCALES: &str = "INCOMPATIBLE_TIMESCALES";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
