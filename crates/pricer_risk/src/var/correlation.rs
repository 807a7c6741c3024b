//! Static currency correlation table.

use std::collections::BTreeMap;

use pricer_core::types::Currency;

/// Symmetric currency-to-currency correlation lookup.
///
/// Identical currencies correlate at `1.0`; pairs missing from the table
/// fall back to the configured default.
///
/// # Examples
///
/// ```
/// use pricer_core::types::Currency;
/// use pricer_risk::var::CorrelationTable;
///
/// let table = CorrelationTable::standard(0.3);
/// assert_eq!(table.get(Currency::EUR, Currency::EUR), 1.0);
/// assert_eq!(table.get(Currency::GBP, Currency::EUR), 0.75);
/// assert_eq!(table.get(Currency::AUD, Currency::CAD), 0.3);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct CorrelationTable {
    entries: BTreeMap<(Currency, Currency), f64>,
    default: f64,
}

impl CorrelationTable {
    /// Empty table: every distinct pair uses `default`.
    pub fn new(default: f64) -> Self {
        Self {
            entries: BTreeMap::new(),
            default,
        }
    }

    /// Table with the desk's standard G10 correlations.
    pub fn standard(default: f64) -> Self {
        Self::new(default)
            .with(Currency::EUR, Currency::GBP, 0.75)
            .with(Currency::EUR, Currency::CHF, 0.85)
            .with(Currency::GBP, Currency::CHF, 0.65)
            .with(Currency::USD, Currency::JPY, -0.25)
            .with(Currency::EUR, Currency::USD, -0.15)
            .with(Currency::GBP, Currency::USD, -0.10)
    }

    /// Sets the correlation of `a` and `b` (order-insensitive).
    pub fn with(mut self, a: Currency, b: Currency, rho: f64) -> Self {
        self.insert(a, b, rho);
        self
    }

    /// Sets the correlation of `a` and `b` in place.
    pub fn insert(&mut self, a: Currency, b: Currency, rho: f64) {
        if a != b {
            self.entries.insert(key(a, b), rho);
        }
    }

    /// Correlation of `a` and `b`.
    pub fn get(&self, a: Currency, b: Currency) -> f64 {
        if a == b {
            return 1.0;
        }
        self.entries.get(&key(a, b)).copied().unwrap_or(self.default)
    }

    /// Fallback correlation for unlisted pairs.
    #[inline]
    pub fn default_correlation(&self) -> f64 {
        self.default
    }
}

#[inline]
fn key(a: Currency, b: Currency) -> (Currency, Currency) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}
