//! Underlying currency exposures and hedge coverage.

use std::collections::BTreeMap;

use pricer_core::market_data::MarketSet;
use pricer_core::types::Currency;
use pricer_models::instruments::Instrument;

use crate::config::RiskConfig;
use crate::portfolio::ExposureId;

/// Cash-flow direction of a commercial exposure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ExposureDirection {
    /// Foreign-currency inflow (long the currency)
    Receivable,
    /// Foreign-currency outflow (short the currency)
    Payable,
}

impl ExposureDirection {
    /// `+1` for receivables, `−1` for payables.
    #[inline]
    pub fn sign(&self) -> f64 {
        match self {
            ExposureDirection::Receivable => 1.0,
            ExposureDirection::Payable => -1.0,
        }
    }
}

/// A commercial exposure the hedges protect.
///
/// # Examples
///
/// ```
/// use pricer_core::types::Currency;
/// use pricer_risk::exposure::{Exposure, ExposureDirection};
///
/// let payable = Exposure::new("EXP-1", Currency::EUR, 2_000_000.0, ExposureDirection::Payable)
///     .with_hedged_amount(1_500_000.0);
/// assert_eq!(payable.signed_amount(), -2_000_000.0);
/// assert_eq!(payable.unhedged_amount(), -500_000.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Exposure {
    /// Identifier
    pub id: ExposureId,
    /// Exposure currency
    pub currency: Currency,
    /// Amount (magnitude)
    pub amount: f64,
    /// Receivable or payable
    pub direction: ExposureDirection,
    /// Amount already covered by hedges (magnitude)
    #[cfg_attr(feature = "serde", serde(default))]
    pub hedged_amount: f64,
}

impl Exposure {
    /// Creates an unhedged exposure.
    pub fn new(
        id: impl Into<ExposureId>,
        currency: Currency,
        amount: f64,
        direction: ExposureDirection,
    ) -> Self {
        Self {
            id: id.into(),
            currency,
            amount,
            direction,
            hedged_amount: 0.0,
        }
    }

    /// Sets the hedged amount.
    pub fn with_hedged_amount(mut self, hedged: f64) -> Self {
        self.hedged_amount = hedged;
        self
    }

    /// Amount signed by direction.
    #[inline]
    pub fn signed_amount(&self) -> f64 {
        self.direction.sign() * self.amount.abs()
    }

    /// Uncovered part of the exposure, signed by direction.
    #[inline]
    pub fn unhedged_amount(&self) -> f64 {
        self.direction.sign() * (self.amount.abs() - self.hedged_amount.abs()).max(0.0)
    }
}

/// Exposures aggregated per currency.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CurrencyExposure {
    /// Currency
    pub currency: Currency,
    /// Sum of exposure magnitudes
    pub gross: f64,
    /// Receivables minus payables
    pub net: f64,
    /// Sum of hedged magnitudes
    pub hedged: f64,
    /// `hedged / gross` in percent (0 when gross is 0)
    pub hedge_ratio_pct: f64,
    /// Stand-alone one-day VaR 95 of the net position
    pub var95: f64,
}

/// Volatility of the first market pair containing `currency`, or the
/// configured default.
pub fn currency_volatility(markets: &MarketSet, currency: Currency, config: &RiskConfig) -> f64 {
    markets
        .volatility_of(currency)
        .unwrap_or(config.default_volatility)
}

/// Aggregates exposures by currency, in currency order.
pub fn currency_exposures(
    exposures: &[Exposure],
    markets: &MarketSet,
    config: &RiskConfig,
) -> Vec<CurrencyExposure> {
    let mut by_currency: BTreeMap<Currency, (f64, f64, f64)> = BTreeMap::new();
    for exposure in exposures {
        let entry = by_currency.entry(exposure.currency).or_default();
        entry.0 += exposure.amount.abs();
        entry.1 += exposure.signed_amount();
        entry.2 += exposure.hedged_amount.abs();
    }

    by_currency
        .into_iter()
        .map(|(currency, (gross, net, hedged))| {
            let volatility = currency_volatility(markets, currency, config);
            CurrencyExposure {
                currency,
                gross,
                net,
                hedged,
                hedge_ratio_pct: hedge_ratio_pct(hedged, gross),
                var95: net.abs() * volatility * config.z_95 * config.horizon_factor(),
            }
        })
        .collect()
}

/// Exposures implied by the hedges themselves, one per instrument in its
/// pair's base currency: signed notional as net, notional as gross and
/// hedged.
pub fn exposures_from_instruments<'a, I>(instruments: I) -> Vec<Exposure>
where
    I: IntoIterator<Item = &'a Instrument>,
{
    instruments
        .into_iter()
        .map(|instrument| {
            let direction = if instrument.is_short() {
                ExposureDirection::Payable
            } else {
                ExposureDirection::Receivable
            };
            let notional = instrument.notional.abs();
            Exposure::new(
                instrument.id.as_str(),
                instrument.pair.base(),
                notional,
                direction,
            )
            .with_hedged_amount(notional)
        })
        .collect()
}

/// `hedged / total` in percent, `0` for an empty book.
#[inline]
pub(crate) fn hedge_ratio_pct(hedged: f64, total: f64) -> f64 {
    if total > 0.0 {
        hedged / total * 100.0
    } else {
        0.0
    }
}
