//! Command implementations.
//!
//! Commands write their output to stdout; logs go to stderr.

pub mod metrics;
pub mod orders;

use order_desk_client::{ApiConfig, ConfigError, FetchError, MetricsError, OrdersClient};
use thiserror::Error;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Configuration is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Request to the orders API failed.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// Metrics could not be computed (only in `--strict` mode).
    #[error(transparent)]
    Metrics(#[from] MetricsError),

    /// JSON output could not be produced.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Writing to stdout failed.
    #[error("Output error: {0}")]
    Io(#[from] std::io::Error),
}

/// Build an API client from the environment.
pub fn client() -> Result<OrdersClient, CommandError> {
    let config = ApiConfig::from_env()?;
    tracing::debug!(?config, "Loaded configuration");
    Ok(OrdersClient::new(&config)?)
}

/// Write a block of text to stdout.
fn emit(text: &str) -> Result<(), CommandError> {
    use std::io::Write;

    let mut stdout = std::io::stdout().lock();
    writeln!(stdout, "{text}")?;
    Ok(())
}
