//! Weighted average configuration.

use serde::{Deserialize, Serialize};

use crate::constants;

/// Configuration for weighted average estimators.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct AverageConfig {
    /// Offset before any sample is seen. Default: -1e-5.
    pub initial_offset: Option<f64>,
    /// Relative margin placed between a new offset and the sample that forced it. Default: 1e-5.
    pub offset_epsilon: Option<f64>,
}

impl AverageConfig {
    /// Returns the effective initial offset, defaulting to -1e-5.
    pub fn effective_initial_offset(&self) -> f64 {
        self.initial_offset
            .unwrap_or(constants::DEFAULT_INITIAL_OFFSET)
    }

    /// Returns the effective offset epsilon, defaulting to 1e-5.
    pub fn effective_offset_epsilon(&self) -> f64 {
        self.offset_epsilon
            .unwrap_or(constants::DEFAULT_OFFSET_EPSILON)
    }
}
