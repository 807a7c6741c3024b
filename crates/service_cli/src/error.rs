//! CLI error types.

use std::path::PathBuf;

use pricer_core::market_data::MarketDataError;
use pricer_risk::{PortfolioError, RiskError};
use thiserror::Error;

use crate::config::ConfigError;

/// Errors surfaced to the command line.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration could not be built.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// An input file could not be read.
    #[error("Cannot read {path}: {source}")]
    Io {
        /// File path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// An input file is not valid JSON for its record type.
    #[error("Cannot parse {path}: {source}")]
    Json {
        /// File path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: serde_json::Error,
    },

    /// Market data failed validation.
    #[error("Invalid market data: {0}")]
    Market(#[from] MarketDataError),

    /// A portfolio record failed validation.
    #[error(transparent)]
    Portfolio(#[from] PortfolioError),

    /// Risk computation failed.
    #[error(transparent)]
    Risk(#[from] RiskError),

    /// Output could not be serialised.
    #[error("Cannot serialise output: {0}")]
    Output(#[source] serde_json::Error),

    /// Invalid command-line argument.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// Result type for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CliError::InvalidArgument("--spot-shock without a value".to_string());
        assert_eq!(
            format!("{}", err),
            "Invalid argument: --spot-shock without a value"
        );
    }

    #[test]
    fn test_io_error_names_path() {
        let err = CliError::Io {
            path: PathBuf::from("book.json"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        };
        assert!(format!("{}", err).contains("book.json"));
    }
}
