//! Boot: logging init and config load.

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::conf::{ConfigError, LogweaveConfig, OutputFormat};

/// Initialise the tracing / logging subsystem. Logs go to stderr so stdout
/// stays machine-readable.
pub fn init_logging(json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "logweave=info".into());

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

/// Load config (file, then env), then apply command-line overrides.
pub fn boot(output: Option<OutputFormat>) -> Result<LogweaveConfig, ConfigError> {
    info!("Starting logweave v{}", env!("CARGO_PKG_VERSION"));

    let mut config = LogweaveConfig::load()?;
    if let Some(output) = output {
        config.output = output;
    }

    info!(
        "Loaded configuration: sample_size={}, orphan_policy={:?}, output={:?}",
        config.sample_size, config.orphan_policy, config.output
    );

    Ok(config)
}
