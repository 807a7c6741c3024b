//! Pricing error types.

use pricer_models::analytical::AnalyticalError;
use thiserror::Error;

use crate::mc::ConfigError;

/// Errors raised while valuing one instrument.
///
/// The infallible entry points turn every variant into a zero price plus a
/// warning. Portfolio passes call the fallible entry points and propagate
/// only [`PricingError::Cancelled`].
///
/// # Examples
///
/// ```
/// use pricer_pricing::PricingError;
///
/// let err = PricingError::MissingField { field: "barrier", kind: "One-Touch".into() };
/// assert_eq!(err.to_string(), "Missing barrier for One-Touch");
/// assert!(!err.is_cancelled());
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PricingError {
    /// A level the instrument kind requires is absent.
    #[error("Missing {field} for {kind}")]
    MissingField {
        /// Missing field name
        field: &'static str,
        /// Instrument kind label
        kind: String,
    },

    /// Input outside the domain of the pricer (σ = 0, S ≤ 0, K ≤ 0, ...).
    #[error("Degenerate input: {reason}")]
    DegenerateInput {
        /// What was degenerate
        reason: String,
    },

    /// Kind label that maps to no pricer while the call fallback is disabled.
    #[error("Unknown instrument kind '{label}' (unknown-kind fallback disabled)")]
    UnknownKind {
        /// Original label
        label: String,
    },

    /// Closed-form failure with no Monte Carlo alternative.
    #[error("Closed-form pricing failed: {0}")]
    Analytical(#[from] AnalyticalError),

    /// Invalid Monte Carlo configuration.
    #[error("Invalid Monte Carlo configuration: {0}")]
    Config(#[from] ConfigError),

    /// Non-finite result.
    #[error("Numerical instability: {message}")]
    NumericalInstability {
        /// Description of the numerical issue
        message: String,
    },

    /// The run was cancelled between path batches.
    #[error("Pricing cancelled")]
    Cancelled,
}

impl PricingError {
    /// Whether the error is a cancellation rather than a per-instrument failure.
    #[inline]
    pub fn is_cancelled(&self) -> bool {
        matches!(self, PricingError::Cancelled)
    }
}
