//! Structured logging setup.
//!
//! Logs go to stderr so they never interleave with rendered calendars on
//! stdout. `RUST_LOG` wins over the configured level.

use anyhow::{Context, Result};
use tracing_subscriber::EnvFilter;

pub fn init(default_level: &str) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(default_level)
            .with_context(|| format!("Invalid log level '{default_level}'"))?,
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to initialise logging: {e}"))?;

    tracing::debug!(version = env!("CARGO_PKG_VERSION"), "logging initialised");
    Ok(())
}
