//! Per-pair market snapshot.

use super::error::MarketDataError;
use crate::types::Date;

/// Market state for one currency pair at a valuation date.
///
/// Rates are continuously compounded decimals (`0.0525` for 5.25%), and
/// volatility is annualised (`0.0875` for 8.75%). The domestic rate belongs
/// to the quote currency and the foreign rate to the base currency.
///
/// # Invariants
/// - `spot > 0`
/// - `volatility >= 0` (zero is representable; pricers guard the division)
///
/// # Examples
///
/// ```
/// use pricer_core::market_data::MarketSnapshot;
/// use pricer_core::types::Date;
///
/// let valuation = Date::from_ymd(2024, 6, 3).unwrap();
/// let market = MarketSnapshot::new(1.0856, 0.0525, 0.04, 0.0875, valuation).unwrap();
///
/// let fwd = market.forward(1.0);
/// assert!(fwd > market.spot);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MarketSnapshot {
    /// Spot rate (quote units per base unit)
    pub spot: f64,
    /// Domestic (quote currency) interest rate
    pub domestic_rate: f64,
    /// Foreign (base currency) interest rate
    pub foreign_rate: f64,
    /// Annualised volatility of the pair
    pub volatility: f64,
    /// Valuation date
    pub valuation_date: Date,
}

impl MarketSnapshot {
    /// Creates a validated snapshot.
    ///
    /// # Errors
    /// Returns `MarketDataError` when spot is not strictly positive, volatility
    /// is negative, or any input is non-finite.
    pub fn new(
        spot: f64,
        domestic_rate: f64,
        foreign_rate: f64,
        volatility: f64,
        valuation_date: Date,
    ) -> Result<Self, MarketDataError> {
        let snapshot = Self {
            spot,
            domestic_rate,
            foreign_rate,
            volatility,
            valuation_date,
        };
        snapshot.validate()?;
        Ok(snapshot)
    }

    /// Checks the snapshot invariants.
    pub fn validate(&self) -> Result<(), MarketDataError> {
        if !self.spot.is_finite() || self.spot <= 0.0 {
            return Err(MarketDataError::InvalidSpot { spot: self.spot });
        }
        if !self.volatility.is_finite() || self.volatility < 0.0 {
            return Err(MarketDataError::InvalidVolatility {
                volatility: self.volatility,
            });
        }
        if !self.domestic_rate.is_finite() {
            return Err(MarketDataError::InvalidRate {
                name: "domestic",
                rate: self.domestic_rate,
            });
        }
        if !self.foreign_rate.is_finite() {
            return Err(MarketDataError::InvalidRate {
                name: "foreign",
                rate: self.foreign_rate,
            });
        }
        Ok(())
    }

    /// Cost of carry `b = r_d − r_f`.
    #[inline]
    pub fn carry(&self) -> f64 {
        self.domestic_rate - self.foreign_rate
    }

    /// Outright forward `S·e^{(r_d − r_f)t}`.
    #[inline]
    pub fn forward(&self, t: f64) -> f64 {
        self.spot * (self.carry() * t).exp()
    }

    /// Returns a copy with spot scaled by `1 + relative` and volatility
    /// moved by `absolute_vol` (floored at zero).
    ///
    /// `relative = 0.10` is a 10% rise in spot; `absolute_vol = 0.05` adds
    /// five volatility points.
    pub fn shocked(&self, relative: f64, absolute_vol: f64) -> Self {
        Self {
            spot: self.spot * (1.0 + relative),
            volatility: (self.volatility + absolute_vol).max(0.0),
            ..*self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn valuation() -> Date {
        Date::from_ymd(2024, 6, 3).unwrap()
    }

    #[test]
    fn test_snapshot_rejects_non_positive_spot() {
        let result = MarketSnapshot::new(0.0, 0.01, 0.0, 0.1, valuation());
        assert_eq!(result, Err(MarketDataError::InvalidSpot { spot: 0.0 }));
    }

    #[test]
    fn test_snapshot_accepts_zero_volatility() {
        assert!(MarketSnapshot::new(1.1, 0.01, 0.0, 0.0, valuation()).is_ok());
        assert!(MarketSnapshot::new(1.1, 0.01, 0.0, -0.01, valuation()).is_err());
    }

    #[test]
    fn test_snapshot_rejects_nan_rate() {
        let result = MarketSnapshot::new(1.1, f64::NAN, 0.0, 0.1, valuation());
        assert!(matches!(
            result,
            Err(MarketDataError::InvalidRate {
                name: "domestic",
                ..
            })
        ));
    }

    #[test]
    fn test_forward_interest_parity() {
        let m = MarketSnapshot::new(1.0856, 0.0525, 0.04, 0.0875, valuation()).unwrap();
        assert_relative_eq!(
            m.forward(0.5),
            1.0856 * (0.0125_f64 * 0.5).exp(),
            epsilon = 1e-14
        );
        assert_relative_eq!(m.forward(0.0), 1.0856);
    }

    #[test]
    fn test_shocked_floors_volatility() {
        let m = MarketSnapshot::new(1.20, 0.02, 0.01, 0.03, valuation()).unwrap();
        let s = m.shocked(-0.10, -0.05);
        assert_relative_eq!(s.spot, 1.08, epsilon = 1e-12);
        assert_eq!(s.volatility, 0.0);
        assert_eq!(s.domestic_rate, m.domestic_rate);
    }
}
