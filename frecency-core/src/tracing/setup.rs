//! Tracing initialization and configuration.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

/// Default directive when `FRECENCY_LOG` is unset or invalid.
pub const DEFAULT_FILTER: &str = "warn";

/// Initialize the tracing/logging system.
///
/// Reads the `FRECENCY_LOG` environment variable for per-crate log levels.
/// Format: `FRECENCY_LOG=frecency_average=debug,frecency_decay=trace`
///
/// This function is idempotent; only the first call installs a subscriber.
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_env("FRECENCY_LOG").unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    install(filter);
}

/// Initialize tracing with an explicit filter directive, ignoring `FRECENCY_LOG`.
pub fn init_tracing_with_filter(directive: &str) {
    install(EnvFilter::new(directive));
}

fn install(filter: EnvFilter) {
    INIT.call_once(|| {
        // A subscriber installed by the host application wins.
        let _ = tracing_subscriber::registry()
            .with(fmt::layer().with_target(true).with_line_number(true))
            .with(filter)
            .try_init();
    });
}
