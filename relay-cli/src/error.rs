//! Error types for the CLI.

use thiserror::Error;

/// Errors raised by CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration loading or parsing failed.
    #[error("config error: {0}")]
    Config(#[from] crate::config::ConfigError),

    /// A relay operation failed.
    #[error(transparent)]
    Relay(#[from] relay::Error),

    /// Terminal or file IO failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for CLI operations.
pub type Result<T, E = CliError> = std::result::Result<T, E>;
