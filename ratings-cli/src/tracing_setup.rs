//! Tracing setup for the ratings CLI
//!
//! Usage:
//!   ratings --log-level debug serve     # Debug logging to console
//!   RUST_LOG=ratings_server=debug ratings serve
//!
//! `RUST_LOG` wins over `--log-level` when both are set.

use anyhow::{anyhow, Result};
use tracing_subscriber::EnvFilter;

/// Tracing configuration options
#[derive(Debug, Clone)]
pub struct TracingConfig {
    /// Filter used when RUST_LOG is not set
    pub default_filter: String,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            default_filter: "info".to_string(),
        }
    }
}

/// Build the env filter, preferring RUST_LOG over the configured default.
fn env_filter(config: &TracingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.default_filter))
}

/// Initialize console tracing.
pub fn init_tracing(config: &TracingConfig) -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(config))
        .with_target(false)
        .compact()
        .try_init()
        .map_err(|err| anyhow!(err))
}
