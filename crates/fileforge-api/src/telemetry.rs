//! Tracing initialization.

use fileforge_core::Config;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the global tracing subscriber.
///
/// `RUST_LOG` overrides the default filter; production defaults to `info`,
/// everything else to `debug` for this crate and `info` elsewhere.
pub fn init_telemetry(config: &Config) {
    let default_filter = if config.is_production() {
        "info"
    } else {
        "info,fileforge_api=debug,fileforge_processing=debug"
    };

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!(environment = %config.environment, "Telemetry initialized");
}
