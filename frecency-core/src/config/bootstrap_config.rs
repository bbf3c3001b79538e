//! Bootstrap sampler configuration.

use serde::{Deserialize, Serialize};

/// Configuration for weighted bootstrap samplers.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct BootstrapConfig {
    /// Half-life in seconds. Falls back to `decay.timescale_secs`.
    pub timescale_secs: Option<f64>,
}
