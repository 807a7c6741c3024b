//! Market data error types.

use thiserror::Error;

use crate::types::CurrencyPair;

/// Market data validation and lookup errors.
///
/// # Examples
///
/// ```
/// use pricer_core::market_data::MarketDataError;
///
/// let err = MarketDataError::InvalidSpot { spot: -1.0 };
/// assert!(format!("{}", err).contains("-1"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MarketDataError {
    /// Spot must be strictly positive and finite.
    #[error("Invalid spot: S = {spot}")]
    InvalidSpot {
        /// The invalid spot value
        spot: f64,
    },

    /// Volatility must be non-negative and finite.
    #[error("Invalid volatility: sigma = {volatility}")]
    InvalidVolatility {
        /// The invalid volatility value
        volatility: f64,
    },

    /// Interest rates must be finite.
    #[error("Invalid {name} rate: {rate}")]
    InvalidRate {
        /// Which rate ("domestic" or "foreign")
        name: &'static str,
        /// The invalid rate value
        rate: f64,
    },

    /// No snapshot is available for the pair.
    #[error("No market data for {0}")]
    MissingPair(CurrencyPair),
}
