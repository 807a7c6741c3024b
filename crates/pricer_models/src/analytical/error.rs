//! Error types for analytical pricing operations.
//!
//! This module provides:
//! - `AnalyticalError`: input validation and applicability failures of the
//!   closed-form Garman–Kohlhagen and barrier pricers

use thiserror::Error;

/// Analytical pricing errors.
///
/// A closed form returning `Err` is not fatal to valuation: the dispatcher
/// treats it as "closed form inapplicable" and falls back to Monte Carlo
/// where one exists.
///
/// # Examples
/// ```
/// use pricer_models::analytical::AnalyticalError;
///
/// let err = AnalyticalError::InvalidVolatility { volatility: -0.2 };
/// assert!(format!("{}", err).contains("volatility"));
/// ```
#[derive(Debug, Clone, Error, PartialEq)]
pub enum AnalyticalError {
    /// Invalid volatility (non-positive).
    #[error("Invalid volatility: σ = {volatility}")]
    InvalidVolatility {
        /// The invalid volatility value
        volatility: f64,
    },

    /// Invalid spot price (non-positive).
    #[error("Invalid spot price: S = {spot}")]
    InvalidSpot {
        /// The invalid spot price value
        spot: f64,
    },

    /// Invalid strike (non-positive).
    #[error("Invalid strike: K = {strike}")]
    InvalidStrike {
        /// The invalid strike value
        strike: f64,
    },

    /// Invalid barrier level (non-positive).
    #[error("Invalid barrier: H = {barrier}")]
    InvalidBarrier {
        /// The invalid barrier value
        barrier: f64,
    },

    /// Time to expiry is zero or negative.
    #[error("Option expired: T = {expiry}")]
    Expired {
        /// The non-positive time to expiry
        expiry: f64,
    },

    /// Barrier/spot/strike combination matched none of the eight
    /// single-barrier type flags.
    #[error("Unmatched barrier type flag: {reason}")]
    UnmatchedBarrierFlag {
        /// Why the flag could not be resolved
        reason: String,
    },

    /// Spot is not strictly inside the double-barrier corridor.
    #[error("Spot {spot} outside barrier corridor ({lower}, {upper})")]
    SpotOutsideBarriers {
        /// Spot level
        spot: f64,
        /// Lower barrier
        lower: f64,
        /// Upper barrier
        upper: f64,
    },

    /// Numerical instability during computation.
    #[error("Numerical instability: {message}")]
    NumericalInstability {
        /// Description of the numerical issue
        message: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_volatility_display() {
        let err = AnalyticalError::InvalidVolatility { volatility: -0.2 };
        assert_eq!(format!("{}", err), "Invalid volatility: σ = -0.2");
    }

    #[test]
    fn test_unmatched_flag_display() {
        let err = AnalyticalError::UnmatchedBarrierFlag {
            reason: "barrier equals spot".to_string(),
        };
        assert!(format!("{}", err).contains("barrier equals spot"));
    }

    #[test]
    fn test_spot_outside_display() {
        let err = AnalyticalError::SpotOutsideBarriers {
            spot: 1.3,
            lower: 1.0,
            upper: 1.2,
        };
        assert_eq!(
            format!("{}", err),
            "Spot 1.3 outside barrier corridor (1, 1.2)"
        );
    }

    #[test]
    fn test_error_is_clone_and_eq() {
        let err = AnalyticalError::Expired { expiry: 0.0 };
        assert_eq!(err.clone(), err);
    }
}
