//! Strategy import.
//!
//! Converts the legs of a hedging strategy into [`Instrument`]s. Legs
//! quote strikes and barriers either as a percentage of spot or as
//! absolute levels, and quantities as a signed percentage of the strategy's
//! base volume.

use pricer_core::types::{CurrencyPair, Date};
use pricer_models::instruments::{
    Instrument, InstrumentKind, VolatilityInputs, DEFAULT_DIGITAL_REBATE,
};
use tracing::{debug, warn};

use super::error::PortfolioError;
use super::ids::StrategyId;
use super::repository::PortfolioRepository;

/// How a strike or barrier level is quoted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum LevelType {
    /// Percentage of spot (`105.0` is 105% of spot)
    #[default]
    Percent,
    /// Absolute rate
    Absolute,
}

impl LevelType {
    /// Absolute level for `value` at `spot`.
    #[inline]
    pub fn resolve(&self, value: f64, spot: f64) -> f64 {
        match self {
            LevelType::Percent => spot * value / 100.0,
            LevelType::Absolute => value,
        }
    }
}

/// One component of a hedging strategy.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StrategyLeg {
    /// Component code or label (`"call-knockout"`, `"One-Touch"`, ...)
    pub kind: String,
    /// Strike
    #[cfg_attr(feature = "serde", serde(default))]
    pub strike: Option<f64>,
    /// Strike quotation
    #[cfg_attr(feature = "serde", serde(default))]
    pub strike_type: LevelType,
    /// First barrier
    #[cfg_attr(feature = "serde", serde(default))]
    pub barrier: Option<f64>,
    /// Second barrier
    #[cfg_attr(feature = "serde", serde(default))]
    pub second_barrier: Option<f64>,
    /// Barrier quotation
    #[cfg_attr(feature = "serde", serde(default))]
    pub barrier_type: LevelType,
    /// Digital rebate in percent
    #[cfg_attr(feature = "serde", serde(default))]
    pub rebate: Option<f64>,
    /// Leg volatility in percent
    #[cfg_attr(feature = "serde", serde(default))]
    pub volatility: Option<f64>,
    /// Signed quantity in percent of base volume (negative is short)
    pub quantity: f64,
    /// Premium per unit of notional paid at inception
    #[cfg_attr(feature = "serde", serde(default))]
    pub premium: Option<f64>,
}

impl StrategyLeg {
    /// A long leg of `kind` at 100% of base volume.
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            strike: None,
            strike_type: LevelType::Percent,
            barrier: None,
            second_barrier: None,
            barrier_type: LevelType::Percent,
            rebate: None,
            volatility: None,
            quantity: 100.0,
            premium: None,
        }
    }
}

/// Strategy-wide import parameters.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StrategyParams {
    /// Strategy identifier, used as the instrument ID prefix
    pub id: StrategyId,
    /// Underlying pair
    pub pair: CurrencyPair,
    /// Spot used to resolve percentage levels
    pub spot: f64,
    /// Hedge start date
    pub start_date: Date,
    /// Hedge horizon in months
    pub months_to_hedge: u32,
    /// Base-currency volume at 100% quantity
    pub base_volume: f64,
}

/// Converts strategy legs into hedging instruments.
///
/// # Examples
///
/// ```
/// use pricer_core::types::Date;
/// use pricer_models::instruments::InstrumentKind;
/// use pricer_risk::portfolio::{StrategyImporter, StrategyLeg, StrategyParams};
///
/// let params = StrategyParams {
///     id: "STRAT-1".into(),
///     pair: "EURUSD".parse().unwrap(),
///     spot: 1.10,
///     start_date: Date::from_ymd(2024, 1, 15).unwrap(),
///     months_to_hedge: 12,
///     base_volume: 10_000_000.0,
/// };
/// let mut leg = StrategyLeg::new("call-knockout");
/// leg.strike = Some(100.0);
/// leg.barrier = Some(110.0);
/// leg.quantity = -50.0;
///
/// let instruments = StrategyImporter::new().import(&params, &[leg]).unwrap();
/// let ko = &instruments[0];
/// assert_eq!(ko.kind.label(), "Knock-Out Call");
/// assert_eq!(ko.notional, 5_000_000.0);
/// assert!(ko.is_short());
/// assert!((ko.barrier1.unwrap() - 1.21).abs() < 1e-12);
/// assert_eq!(ko.maturity, Date::from_ymd(2025, 1, 15).unwrap());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct StrategyImporter;

impl StrategyImporter {
    /// Creates an importer.
    pub fn new() -> Self {
        Self
    }

    /// Converts every leg; IDs are `<strategy>-<n>` with `n` 1-based.
    pub fn import(
        &self,
        params: &StrategyParams,
        legs: &[StrategyLeg],
    ) -> Result<Vec<Instrument>, PortfolioError> {
        if !(params.spot.is_finite() && params.spot > 0.0) {
            return Err(PortfolioError::InvalidStrategy(format!(
                "spot {} is not positive",
                params.spot
            )));
        }
        if !(params.base_volume.is_finite() && params.base_volume >= 0.0) {
            return Err(PortfolioError::InvalidStrategy(format!(
                "base volume {} is negative",
                params.base_volume
            )));
        }
        let maturity = params.start_date.add_months(params.months_to_hedge)?;

        let instruments = legs
            .iter()
            .enumerate()
            .map(|(index, leg)| self.convert(params, maturity, index, leg))
            .collect::<Result<Vec<_>, _>>()?;
        debug!(
            strategy_id = %params.id,
            legs = instruments.len(),
            "strategy imported"
        );
        Ok(instruments)
    }

    /// Imports the strategy and stores the instruments.
    pub fn import_into<R: PortfolioRepository>(
        &self,
        repository: &mut R,
        params: &StrategyParams,
        legs: &[StrategyLeg],
    ) -> Result<usize, PortfolioError> {
        let instruments = self.import(params, legs)?;
        repository.add_all(instruments)
    }

    fn convert(
        &self,
        params: &StrategyParams,
        maturity: Date,
        index: usize,
        leg: &StrategyLeg,
    ) -> Result<Instrument, PortfolioError> {
        if !leg.quantity.is_finite() {
            return Err(PortfolioError::InvalidLeg {
                index,
                reason: format!("quantity {} is not finite", leg.quantity),
            });
        }
        let kind = leg
            .kind
            .parse::<InstrumentKind>()
            .unwrap_or_else(|_| {
                warn!(
                    strategy_id = %params.id,
                    leg = index,
                    label = %leg.kind,
                    "unrecognised strategy component"
                );
                InstrumentKind::Unrecognized {
                    label: leg.kind.clone(),
                }
            });

        let notional = params.base_volume * leg.quantity.abs() / 100.0;
        let mut instrument = Instrument::new(
            params.id.instrument_id(index + 1),
            kind,
            params.pair,
            notional,
            maturity,
        )
        .with_quantity(if leg.quantity < 0.0 { -1.0 } else { 1.0 })
        .with_original_price(leg.premium.unwrap_or(0.0))
        .with_volatility(VolatilityInputs {
            strategy_leg: leg.volatility.map(|v| v / 100.0),
            ..Default::default()
        });

        instrument.strike = leg
            .strike
            .map(|level| leg.strike_type.resolve(level, params.spot));
        if instrument.kind.needs_barrier() {
            instrument.barrier1 = leg
                .barrier
                .map(|level| leg.barrier_type.resolve(level, params.spot));
            instrument.barrier2 = leg
                .second_barrier
                .map(|level| leg.barrier_type.resolve(level, params.spot));
        }
        if matches!(instrument.kind, InstrumentKind::Digital { .. }) {
            instrument.rebate = Some(
                leg.rebate
                    .map(|pct| pct / 100.0)
                    .unwrap_or(DEFAULT_DIGITAL_REBATE),
            );
        }

        instrument
            .validate()
            .map_err(|source| PortfolioError::InvalidLeg {
                index,
                reason: source.to_string(),
            })?;
        Ok(instrument)
    }
}
