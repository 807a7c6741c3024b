//! Collection of market snapshots keyed by currency pair.

use std::collections::BTreeMap;

use super::error::MarketDataError;
use super::snapshot::MarketSnapshot;
use crate::types::{Currency, CurrencyPair, Date};

/// Market snapshots for every pair in a valuation pass.
///
/// Iteration order is the pair ordering (base, then quote), so lookups such
/// as [`MarketSet::volatility_of`] are deterministic.
///
/// # Examples
///
/// ```
/// use pricer_core::market_data::{MarketSet, MarketSnapshot};
/// use pricer_core::types::{Currency, Date};
///
/// let valuation = Date::from_ymd(2024, 6, 3).unwrap();
/// let mut markets = MarketSet::new();
/// markets.insert(
///     "EURUSD".parse().unwrap(),
///     MarketSnapshot::new(1.0856, 0.0525, 0.04, 0.0875, valuation).unwrap(),
/// );
///
/// assert_eq!(markets.volatility_of(Currency::EUR), Some(0.0875));
/// assert_eq!(markets.volatility_of(Currency::JPY), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct MarketSet {
    snapshots: BTreeMap<CurrencyPair, MarketSnapshot>,
}

impl MarketSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces the snapshot for `pair`.
    pub fn insert(&mut self, pair: CurrencyPair, snapshot: MarketSnapshot) -> Option<MarketSnapshot> {
        self.snapshots.insert(pair, snapshot)
    }

    /// Snapshot for `pair`, if present.
    pub fn get(&self, pair: &CurrencyPair) -> Option<&MarketSnapshot> {
        self.snapshots.get(pair)
    }

    /// Snapshot for `pair`, or `MarketDataError::MissingPair`.
    pub fn require(&self, pair: &CurrencyPair) -> Result<&MarketSnapshot, MarketDataError> {
        self.snapshots
            .get(pair)
            .ok_or(MarketDataError::MissingPair(*pair))
    }

    /// Number of pairs.
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Whether the set holds no pairs.
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Iterates pairs and snapshots in pair order.
    pub fn iter(&self) -> impl Iterator<Item = (&CurrencyPair, &MarketSnapshot)> {
        self.snapshots.iter()
    }

    /// Volatility of the first pair (in pair order) that contains `currency`.
    pub fn volatility_of(&self, currency: Currency) -> Option<f64> {
        self.snapshots
            .iter()
            .find(|(pair, _)| pair.contains(currency))
            .map(|(_, snapshot)| snapshot.volatility)
    }

    /// Returns a new set with `f` applied to every snapshot.
    pub fn map<F>(&self, mut f: F) -> Self
    where
        F: FnMut(&CurrencyPair, &MarketSnapshot) -> MarketSnapshot,
    {
        Self {
            snapshots: self
                .snapshots
                .iter()
                .map(|(pair, snapshot)| (*pair, f(pair, snapshot)))
                .collect(),
        }
    }

    /// Validates every snapshot.
    pub fn validate(&self) -> Result<(), MarketDataError> {
        self.snapshots.values().try_for_each(MarketSnapshot::validate)
    }

    /// Reference G10 quotes for demonstrations and smoke tests.
    ///
    /// Spots and volatilities per pair, short rates per currency; the quote
    /// currency's rate is domestic and the base currency's rate is foreign.
    pub fn reference(valuation_date: Date) -> Self {
        const QUOTES: [(Currency, Currency, f64, f64); 10] = [
            (Currency::EUR, Currency::USD, 1.0856, 0.0875),
            (Currency::GBP, Currency::USD, 1.2734, 0.1125),
            (Currency::USD, Currency::JPY, 161.85, 0.0945),
            (Currency::USD, Currency::CHF, 0.9642, 0.0785),
            (Currency::AUD, Currency::USD, 0.6523, 0.1235),
            (Currency::USD, Currency::CAD, 1.3845, 0.0695),
            (Currency::NZD, Currency::USD, 0.5987, 0.1345),
            (Currency::EUR, Currency::GBP, 0.8523, 0.0625),
            (Currency::EUR, Currency::JPY, 175.68, 0.0985),
            (Currency::EUR, Currency::CHF, 1.0468, 0.0545),
        ];

        let rate = |c: Currency| match c {
            Currency::USD => 0.0525,
            Currency::EUR => 0.0400,
            Currency::GBP => 0.0525,
            Currency::JPY => -0.0010,
            Currency::CHF => 0.0175,
            Currency::AUD => 0.0435,
            Currency::CAD => 0.0500,
            Currency::NZD => 0.0550,
        };

        QUOTES
            .iter()
            .filter_map(|&(base, quote, spot, volatility)| {
                let pair = CurrencyPair::new(base, quote).ok()?;
                let snapshot = MarketSnapshot {
                    spot,
                    domestic_rate: rate(quote),
                    foreign_rate: rate(base),
                    volatility,
                    valuation_date,
                };
                Some((pair, snapshot))
            })
            .collect()
    }
}

impl FromIterator<(CurrencyPair, MarketSnapshot)> for MarketSet {
    fn from_iter<I: IntoIterator<Item = (CurrencyPair, MarketSnapshot)>>(iter: I) -> Self {
        Self {
            snapshots: iter.into_iter().collect(),
        }
    }
}
