//! Currency pair types for FX calculations.
//!
//! A [`CurrencyPair`] names the base and quote currencies of an FX rate.
//! It carries no rate itself: spot, rates and volatility live in the
//! market snapshot keyed by the pair.
//!
//! # Examples
//!
//! ```
//! use pricer_core::types::{Currency, CurrencyPair};
//!
//! let pair: CurrencyPair = "EURUSD".parse().unwrap();
//! assert_eq!(pair.base(), Currency::EUR);
//! assert_eq!(pair.quote(), Currency::USD);
//! assert_eq!(pair.code(), "EUR/USD");
//!
//! // Separators are accepted
//! assert_eq!("usd/jpy".parse::<CurrencyPair>().unwrap().code(), "USD/JPY");
//! ```

use std::fmt;
use std::str::FromStr;

use super::currency::Currency;
use super::error::CurrencyError;

/// An ordered base/quote currency pair (`BASE/QUOTE`).
///
/// The quoted rate is the number of quote-currency units per base unit, so
/// for Garman–Kohlhagen the quote currency is domestic and the base is foreign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String", into = "String"))]
pub struct CurrencyPair {
    base: Currency,
    quote: Currency,
}

impl CurrencyPair {
    /// Creates a new currency pair.
    ///
    /// # Errors
    /// Returns `CurrencyError::SameCurrency` if base and quote are the same.
    pub fn new(base: Currency, quote: Currency) -> Result<Self, CurrencyError> {
        if base == quote {
            return Err(CurrencyError::SameCurrency(base.code().to_string()));
        }
        Ok(Self { base, quote })
    }

    /// Base (foreign) currency.
    #[inline]
    pub fn base(&self) -> Currency {
        self.base
    }

    /// Quote (domestic) currency.
    #[inline]
    pub fn quote(&self) -> Currency {
        self.quote
    }

    /// Pair code in `BASE/QUOTE` form.
    pub fn code(&self) -> String {
        format!("{}/{}", self.base.code(), self.quote.code())
    }

    /// Returns the pair with base and quote swapped.
    pub fn invert(&self) -> Self {
        Self {
            base: self.quote,
            quote: self.base,
        }
    }

    /// Whether either leg of the pair is `currency`.
    #[inline]
    pub fn contains(&self, currency: Currency) -> bool {
        self.base == currency || self.quote == currency
    }
}

impl FromStr for CurrencyPair {
    type Err = CurrencyError;

    /// Parses `EURUSD`, `EUR/USD`, `EUR-USD` or `EUR USD` (case-insensitive).
    fn from_str(s: &str) -> Result<Self, CurrencyError> {
        let compact: String = s
            .chars()
            .filter(|c| !matches!(c, '/' | '-' | ' ' | '_'))
            .collect();
        if compact.len() != 6 || !compact.is_ascii() {
            return Err(CurrencyError::ParseError(format!(
                "expected six-letter pair code, got '{}'",
                s
            )));
        }
        let base: Currency = compact[..3].parse()?;
        let quote: Currency = compact[3..].parse()?;
        CurrencyPair::new(base, quote)
    }
}

impl TryFrom<String> for CurrencyPair {
    type Error = CurrencyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<CurrencyPair> for String {
    fn from(pair: CurrencyPair) -> Self {
        pair.code()
    }
}

impl fmt::Display for CurrencyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.base, self.quote)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currency_pair_new() {
        let pair = CurrencyPair::new(Currency::EUR, Currency::USD).unwrap();
        assert_eq!(pair.base(), Currency::EUR);
        assert_eq!(pair.quote(), Currency::USD);
    }

    #[test]
    fn test_currency_pair_same_currency_error() {
        match CurrencyPair::new(Currency::USD, Currency::USD) {
            Err(CurrencyError::SameCurrency(code)) => assert_eq!(code, "USD"),
            other => panic!("Expected SameCurrency error, got {:?}", other),
        }
    }

    #[test]
    fn test_currency_pair_parse_variants() {
        let expected = CurrencyPair::new(Currency::GBP, Currency::CHF).unwrap();
        for s in ["GBPCHF", "GBP/CHF", "gbp-chf", "GBP CHF"] {
            assert_eq!(s.parse::<CurrencyPair>().unwrap(), expected);
        }
    }

    #[test]
    fn test_currency_pair_parse_errors() {
        assert!(matches!(
            "EURUS".parse::<CurrencyPair>(),
            Err(CurrencyError::ParseError(_))
        ));
        assert!(matches!(
            "EURXXX".parse::<CurrencyPair>(),
            Err(CurrencyError::UnknownCurrency(_))
        ));
        assert!(matches!(
            "EUREUR".parse::<CurrencyPair>(),
            Err(CurrencyError::SameCurrency(_))
        ));
    }

    #[test]
    fn test_currency_pair_invert_and_contains() {
        let pair: CurrencyPair = "USDJPY".parse().unwrap();
        let inverted = pair.invert();
        assert_eq!(inverted.code(), "JPY/USD");
        assert!(pair.contains(Currency::JPY));
        assert!(!pair.contains(Currency::EUR));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_currency_pair_serde_as_code() {
        let pair: CurrencyPair = "EURUSD".parse().unwrap();
        let json = serde_json::to_string(&pair).unwrap();
        assert_eq!(json, "\"EUR/USD\"");
        let back: CurrencyPair = serde_json::from_str("\"EURUSD\"").unwrap();
        assert_eq!(back, pair);
    }
}
