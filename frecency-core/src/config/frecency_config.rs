//! Top-level frecency configuration with layered resolution.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::{AverageConfig, BootstrapConfig, ComparisonPolicy, DecayConfig};
use crate::errors::ConfigError;

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. Environment variables (`FRECENCY_*`)
/// 2. TOML file, when a path is given
/// 3. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct FrecencyConfig {
    pub decay: DecayConfig,
    pub average: AverageConfig,
    pub bootstrap: BootstrapConfig,
}

impl FrecencyConfig {
    /// Load configuration, merging `path` (if any) and then the environment
    /// over the defaults.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(path) = path {
            Self::merge_toml_file(&mut config, path)?;
        }

        Self::apply_env_overrides(&mut config);

        Self::validate(&config)?;

        Ok(config)
    }

    /// Load configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })?;
        Self::validate(&config)?;
        Ok(config)
    }

    /// Half-life for bootstrap samplers: the bootstrap override, else the decay setting.
    pub fn effective_bootstrap_timescale_secs(&self) -> f64 {
        self.bootstrap
            .timescale_secs
            .unwrap_or_else(|| self.decay.effective_timescale_secs())
    }

    /// Validate the configuration values.
    pub fn validate(config: &FrecencyConfig) -> Result<(), ConfigError> {
        check_timescale("decay.timescale_secs", config.decay.timescale_secs)?;
        check_timescale("bootstrap.timescale_secs", config.bootstrap.timescale_secs)?;

        if let Some(offset) = config.average.initial_offset {
            if !offset.is_finite() {
                return Err(ConfigError::ValidationFailed {
                    field: "average.initial_offset".to_string(),
                    message: "must be finite".to_string(),
                });
            }
        }
        if let Some(epsilon) = config.average.offset_epsilon {
            if !(epsilon > 0.0 && epsilon < 1.0) {
                return Err(ConfigError::ValidationFailed {
                    field: "average.offset_epsilon".to_string(),
                    message: "must be between 0.0 and 1.0 (exclusive)".to_string(),
                });
            }
        }
        Ok(())
    }

    /// Merge a TOML file into the existing config.
    /// Unknown keys are silently ignored (forward-compatible).
    fn merge_toml_file(config: &mut FrecencyConfig, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let file_config: FrecencyConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`, where `other` values override `base` values
    /// only when `other` has a `Some` value.
    fn merge(base: &mut FrecencyConfig, other: &FrecencyConfig) {
        // Decay
        if other.decay.timescale_secs.is_some() {
            base.decay.timescale_secs = other.decay.timescale_secs;
        }
        if other.decay.time_origin.is_some() {
            base.decay.time_origin = other.decay.time_origin;
        }
        if other.decay.comparison.is_some() {
            base.decay.comparison = other.decay.comparison;
        }
        if other.decay.suppress_warnings.is_some() {
            base.decay.suppress_warnings = other.decay.suppress_warnings;
        }

        // Average
        if other.average.initial_offset.is_some() {
            base.average.initial_offset = other.average.initial_offset;
        }
        if other.average.offset_epsilon.is_some() {
            base.average.offset_epsilon = other.average.offset_epsilon;
        }

        // Bootstrap
        if other.bootstrap.timescale_secs.is_some() {
            base.bootstrap.timescale_secs = other.bootstrap.timescale_secs;
        }
    }

    /// Apply environment variable overrides.
    /// Pattern: `FRECENCY_DECAY_TIMESCALE_SECS`, `FRECENCY_AVERAGE_OFFSET_EPSILON`, etc.
    /// Unparseable values are logged and skipped.
    fn apply_env_overrides(config: &mut FrecencyConfig) {
        if let Some(v) = env_parse::<f64>("FRECENCY_DECAY_TIMESCALE_SECS") {
            config.decay.timescale_secs = Some(v);
        }
        if let Ok(val) = std::env::var("FRECENCY_DECAY_COMPARISON") {
            match val.to_ascii_lowercase().as_str() {
                "fast" => config.decay.comparison = Some(ComparisonPolicy::Fast),
                "careful" => config.decay.comparison = Some(ComparisonPolicy::Careful),
                other => tracing::warn!(value = other, "ignoring FRECENCY_DECAY_COMPARISON"),
            }
        }
        if let Some(v) = env_parse::<bool>("FRECENCY_DECAY_SUPPRESS_WARNINGS") {
            config.decay.suppress_warnings = Some(v);
        }
        if let Some(v) = env_parse::<f64>("FRECENCY_AVERAGE_OFFSET_EPSILON") {
            config.average.offset_epsilon = Some(v);
        }
        if let Some(v) = env_parse::<f64>("FRECENCY_BOOTSTRAP_TIMESCALE_SECS") {
            config.bootstrap.timescale_secs = Some(v);
        }
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    let val = std::env::var(key).ok()?;
    match val.parse::<T>() {
        Ok(v) => Some(v),
        Err(_) => {
            tracing::warn!(key, value = %val, "ignoring unparseable environment override");
            None
        }
    }
}

fn check_timescale(field: &str, value: Option<f64>) -> Result<(), ConfigError> {
    match value {
        Some(t) if !(t.is_finite() && t > 0.0) => Err(ConfigError::ValidationFailed {
            field: field.to_string(),
            message: "must be a positive, finite number of seconds".to_string(),
        }),
        _ => Ok(()),
    }
}
