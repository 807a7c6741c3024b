//! Portfolio error types.
//!
//! Structured errors for the instrument repository and strategy import,
//! derived with `thiserror`.

use pricer_core::types::DateError;
use pricer_models::instruments::{InstrumentError, InstrumentId};
use thiserror::Error;

/// Errors that can occur during portfolio operations.
#[derive(Debug, Error)]
pub enum PortfolioError {
    /// Instrument not found in the repository.
    #[error("Instrument not found: {0}")]
    InstrumentNotFound(InstrumentId),

    /// Duplicate instrument ID encountered.
    #[error("Duplicate instrument ID: {0}")]
    DuplicateInstrument(InstrumentId),

    /// Instrument failed field validation.
    #[error("Invalid instrument {id}: {source}")]
    InvalidInstrument {
        /// Offending instrument
        id: InstrumentId,
        /// Validation failure
        #[source]
        source: InstrumentError,
    },

    /// Strategy-level import parameters are unusable.
    #[error("Invalid strategy: {0}")]
    InvalidStrategy(String),

    /// A strategy leg could not be converted.
    #[error("Invalid strategy leg {index}: {reason}")]
    InvalidLeg {
        /// Zero-based leg index
        index: usize,
        /// Why the leg was rejected
        reason: String,
    },

    /// Maturity date could not be computed.
    #[error("Invalid maturity: {0}")]
    Date(#[from] DateError),
}
