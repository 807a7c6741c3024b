//! Risk aggregation error types.

use pricer_core::types::CurrencyPair;
use pricer_pricing::PricingError;
use thiserror::Error;

use crate::portfolio::PortfolioError;

/// Errors raised by portfolio-level risk computations.
///
/// Per-instrument pricing failures do not surface here: they price to zero
/// with a warning. Only cancellation and configuration problems abort a
/// pass.
#[derive(Debug, Error)]
pub enum RiskError {
    /// A risk parameter is out of range.
    #[error("Invalid risk parameter {name}: {value}")]
    InvalidConfig {
        /// Parameter name
        name: &'static str,
        /// Offending value
        value: f64,
    },

    /// No market snapshot for a pair that must be priced.
    #[error("No market data for {pair}")]
    MissingMarket {
        /// Currency pair without a snapshot
        pair: CurrencyPair,
    },

    /// The valuation pass was cancelled.
    #[error("Risk computation cancelled")]
    Cancelled,

    /// Pricing failure that could not be absorbed.
    #[error(transparent)]
    Pricing(#[from] PricingError),

    /// Portfolio repository failure.
    #[error(transparent)]
    Portfolio(#[from] PortfolioError),
}
