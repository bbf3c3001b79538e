//! Configuration system for the frecency workspace.
//! TOML-based, 3-layer resolution: env > file > defaults.

pub mod average_config;
pub mod bootstrap_config;
pub mod decay_config;
pub mod frecency_config;

pub use average_config::AverageConfig;
pub use bootstrap_config::BootstrapConfig;
pub use decay_config::{ComparisonPolicy, DecayConfig};
pub use frecency_config::FrecencyConfig;
