//! Instrument error types.
//!
//! This module provides structured error handling for instrument
//! construction and label parsing.

use thiserror::Error;

/// Instrument construction and parsing errors.
///
/// # Examples
///
/// ```
/// use pricer_models::instruments::InstrumentError;
///
/// let err = InstrumentError::InvalidNotional { notional: -1.0 };
/// assert_eq!(format!("{}", err), "Invalid notional: N = -1");
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum InstrumentError {
    /// Strike must be strictly positive.
    #[error("Invalid strike: K = {strike}")]
    InvalidStrike {
        /// The invalid strike value
        strike: f64,
    },

    /// Notional must be a finite non-negative magnitude.
    #[error("Invalid notional: N = {notional}")]
    InvalidNotional {
        /// The invalid notional value
        notional: f64,
    },

    /// Barrier levels must be strictly positive.
    #[error("Invalid barrier: H = {barrier}")]
    InvalidBarrier {
        /// The invalid barrier value
        barrier: f64,
    },

    /// Volatility inputs must be non-negative.
    #[error("Invalid volatility: σ = {volatility}")]
    InvalidVolatility {
        /// The invalid volatility value
        volatility: f64,
    },

    /// Rebate must be a fraction in `[0, 1]`.
    #[error("Invalid rebate: {rebate}")]
    InvalidRebate {
        /// The invalid rebate value
        rebate: f64,
    },

    /// Label does not name a known instrument kind.
    #[error("Unknown instrument kind: '{label}'")]
    UnknownKind {
        /// The unparsed label
        label: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_strike_display() {
        let err = InstrumentError::InvalidStrike { strike: 0.0 };
        assert_eq!(format!("{}", err), "Invalid strike: K = 0");
    }

    #[test]
    fn test_unknown_kind_display() {
        let err = InstrumentError::UnknownKind {
            label: "collar".to_string(),
        };
        assert_eq!(format!("{}", err), "Unknown instrument kind: 'collar'");
    }
}
