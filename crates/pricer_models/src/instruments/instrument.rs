//! Hedging instrument records.

use std::fmt;

use pricer_core::types::{CurrencyPair, Date};

use super::error::InstrumentError;
use super::kind::InstrumentKind;
use super::volatility::VolatilityInputs;

/// Rebate paid by digital instruments when none is recorded (5%).
pub const DEFAULT_DIGITAL_REBATE: f64 = 0.05;

/// Unique instrument identifier.
///
/// # Examples
///
/// ```
/// use pricer_models::instruments::InstrumentId;
///
/// let id = InstrumentId::new("HDG-001");
/// assert_eq!(id.as_str(), "HDG-001");
/// assert_eq!(format!("{}", id), "HDG-001");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct InstrumentId(String);

impl InstrumentId {
    /// Creates a new identifier.
    #[inline]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InstrumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for InstrumentId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for InstrumentId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// A hedging instrument held in the portfolio.
///
/// Prices are per unit of notional; `notional` is a magnitude and the sign
/// of `quantity` carries the position direction (negative is short).
///
/// # Examples
///
/// ```
/// use pricer_core::types::Date;
/// use pricer_models::instruments::{Instrument, InstrumentKind};
///
/// let maturity = Date::from_ymd(2025, 6, 30).unwrap();
/// let option = Instrument::new("HDG-1", InstrumentKind::VanillaCall, "EURUSD".parse().unwrap(), 1_000_000.0, maturity)
///     .with_strike(1.10)
///     .with_quantity(-100.0)
///     .with_original_price(0.012);
///
/// assert!(option.validate().is_ok());
/// assert!(option.is_short());
/// assert_eq!(option.position_sign(), -1.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Instrument {
    /// Unique identifier
    pub id: InstrumentId,
    /// Payoff kind
    pub kind: InstrumentKind,
    /// Underlying currency pair
    pub pair: CurrencyPair,
    /// Notional magnitude in base currency
    pub notional: f64,
    /// Signed quantity; only its sign is used (negative is short)
    #[cfg_attr(feature = "serde", serde(default = "default_quantity"))]
    pub quantity: f64,
    /// Absolute strike
    #[cfg_attr(feature = "serde", serde(default))]
    pub strike: Option<f64>,
    /// First barrier level (absolute)
    #[cfg_attr(feature = "serde", serde(default))]
    pub barrier1: Option<f64>,
    /// Second barrier level (absolute), for double-barrier and double-touch kinds
    #[cfg_attr(feature = "serde", serde(default))]
    pub barrier2: Option<f64>,
    /// Digital rebate as a fraction of notional
    #[cfg_attr(feature = "serde", serde(default))]
    pub rebate: Option<f64>,
    /// Maturity date
    pub maturity: Date,
    /// Instrument-level volatility inputs
    #[cfg_attr(feature = "serde", serde(default))]
    pub volatility: VolatilityInputs,
    /// Premium paid or received at inception, per unit of notional
    #[cfg_attr(feature = "serde", serde(default))]
    pub original_price: f64,
}

#[cfg(feature = "serde")]
fn default_quantity() -> f64 {
    1.0
}

impl Instrument {
    /// Creates a long instrument with no strike, barriers or premium.
    pub fn new(
        id: impl Into<InstrumentId>,
        kind: InstrumentKind,
        pair: CurrencyPair,
        notional: f64,
        maturity: Date,
    ) -> Self {
        Self {
            id: id.into(),
            kind,
            pair,
            notional,
            quantity: 1.0,
            strike: None,
            barrier1: None,
            barrier2: None,
            rebate: None,
            maturity,
            volatility: VolatilityInputs::default(),
            original_price: 0.0,
        }
    }

    /// Sets the strike.
    pub fn with_strike(mut self, strike: f64) -> Self {
        self.strike = Some(strike);
        self
    }

    /// Sets the first barrier.
    pub fn with_barrier(mut self, barrier: f64) -> Self {
        self.barrier1 = Some(barrier);
        self
    }

    /// Sets the second barrier.
    pub fn with_second_barrier(mut self, barrier: f64) -> Self {
        self.barrier2 = Some(barrier);
        self
    }

    /// Sets the digital rebate (fraction).
    pub fn with_rebate(mut self, rebate: f64) -> Self {
        self.rebate = Some(rebate);
        self
    }

    /// Sets the signed quantity.
    pub fn with_quantity(mut self, quantity: f64) -> Self {
        self.quantity = quantity;
        self
    }

    /// Sets the inception price.
    pub fn with_original_price(mut self, price: f64) -> Self {
        self.original_price = price;
        self
    }

    /// Sets the instrument-level volatility inputs.
    pub fn with_volatility(mut self, volatility: VolatilityInputs) -> Self {
        self.volatility = volatility;
        self
    }

    /// Whether the position is short.
    #[inline]
    pub fn is_short(&self) -> bool {
        self.quantity < 0.0
    }

    /// `+1` for long positions, `−1` for short positions.
    #[inline]
    pub fn position_sign(&self) -> f64 {
        if self.is_short() {
            -1.0
        } else {
            1.0
        }
    }

    /// Recorded rebate, or [`DEFAULT_DIGITAL_REBATE`].
    #[inline]
    pub fn rebate_or_default(&self) -> f64 {
        self.rebate.unwrap_or(DEFAULT_DIGITAL_REBATE)
    }

    /// Lower and upper barrier, when both are present.
    pub fn barrier_range(&self) -> Option<(f64, f64)> {
        match (self.barrier1, self.barrier2) {
            (Some(a), Some(b)) => Some((a.min(b), a.max(b))),
            _ => None,
        }
    }

    /// Checks numeric fields.
    ///
    /// Missing strikes or barriers are not errors here: the pricing pass
    /// reports them per instrument without aborting aggregation.
    pub fn validate(&self) -> Result<(), InstrumentError> {
        if !self.notional.is_finite() || self.notional < 0.0 {
            return Err(InstrumentError::InvalidNotional {
                notional: self.notional,
            });
        }
        if let Some(strike) = self.strike {
            if !strike.is_finite() || strike <= 0.0 {
                return Err(InstrumentError::InvalidStrike { strike });
            }
        }
        for barrier in [self.barrier1, self.barrier2].into_iter().flatten() {
            if !barrier.is_finite() || barrier <= 0.0 {
                return Err(InstrumentError::InvalidBarrier { barrier });
            }
        }
        if let Some(rebate) = self.rebate {
            if !(0.0..=1.0).contains(&rebate) {
                return Err(InstrumentError::InvalidRebate { rebate });
            }
        }
        let vols = &self.volatility;
        for volatility in [vols.implied_override, vols.strategy_leg, vols.stored]
            .into_iter()
            .flatten()
        {
            if volatility < 0.0 {
                return Err(InstrumentError::InvalidVolatility { volatility });
            }
        }
        Ok(())
    }
}
