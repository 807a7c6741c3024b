//! Scenario revaluation.
//!
//! Every instrument is priced twice, against the base and the shocked
//! snapshot of its pair. The volatility move of the pair is carried over to
//! instrument-level volatilities, so a shocked pair moves every instrument
//! on it whatever its volatility source.

use pricer_core::market_data::MarketSet;
use pricer_core::types::{Currency, CurrencyPair};
use pricer_models::instruments::{Instrument, InstrumentId};
use tracing::{info, warn};

use super::presets::PresetScenario;
use super::shocks::Scenario;
use crate::error::RiskError;
use crate::exposure::Exposure;
use crate::metrics::RiskAggregator;

/// Effect of a scenario on one instrument.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PerInstrumentImpact {
    /// Instrument identifier
    pub id: InstrumentId,
    /// Underlying pair
    pub pair: CurrencyPair,
    /// Price under the base market
    pub base_price: f64,
    /// Price under the shocked market
    pub shocked_price: f64,
    /// MTM under the base market
    pub base_mtm: f64,
    /// MTM under the shocked market
    pub shocked_mtm: f64,
    /// `shocked_mtm − base_mtm`
    pub change: f64,
    /// Change relative to `|base_mtm|`, in percent; `None` when the base
    /// MTM is zero
    pub change_pct: Option<f64>,
}

/// Portfolio-level outcome of one scenario.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScenarioResult {
    /// Scenario name
    pub name: String,
    /// Scenario description
    pub description: String,
    /// Per-instrument effects, in input order
    pub impacts: Vec<PerInstrumentImpact>,
    /// Total MTM under the base market
    pub base_mtm: f64,
    /// Total MTM under the shocked market
    pub shocked_mtm: f64,
    /// `shocked_mtm − base_mtm`
    pub change: f64,
    /// Change relative to `|base_mtm|`, in percent
    pub change_pct: Option<f64>,
    /// Value change of the unhedged underlying exposures
    pub exposure_impact: f64,
    /// Instruments missing a base or shocked snapshot
    pub excluded: Vec<InstrumentId>,
}

impl ScenarioResult {
    /// Hedge MTM change plus exposure impact.
    pub fn net_impact(&self) -> f64 {
        self.change + self.exposure_impact
    }
}

fn percent_change(change: f64, base: f64) -> Option<f64> {
    (base != 0.0).then(|| change / base.abs() * 100.0)
}

/// Runs stress scenarios over a book.
///
/// # Examples
///
/// ```
/// use pricer_core::market_data::MarketSet;
/// use pricer_core::types::Date;
/// use pricer_models::instruments::{Instrument, InstrumentKind};
/// use pricer_risk::scenarios::{PresetScenario, ScenarioEngine};
///
/// let base = MarketSet::reference(Date::from_ymd(2024, 6, 3).unwrap());
/// let forward = Instrument::new(
///     "FWD-1",
///     InstrumentKind::Forward,
///     "EURUSD".parse().unwrap(),
///     1_000_000.0,
///     Date::from_ymd(2025, 6, 3).unwrap(),
/// )
/// .with_strike(1.09);
///
/// let engine = ScenarioEngine::default();
/// let result = engine
///     .run(&PresetScenario::UsdStrength.scenario(&base), &[forward], &base, &[])
///     .unwrap();
/// // A long EUR/USD forward loses when the dollar strengthens
/// assert!(result.change < 0.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScenarioEngine {
    aggregator: RiskAggregator,
}

impl ScenarioEngine {
    /// Creates an engine valuing with `aggregator`'s pricer.
    pub fn new(aggregator: RiskAggregator) -> Self {
        Self { aggregator }
    }

    /// Per-instrument impacts of moving from `base` to `shocked`.
    ///
    /// Instruments without a snapshot in either set are skipped and
    /// returned as excluded.
    ///
    /// # Errors
    /// `Cancelled` if the pricer's token fires.
    pub fn impacts(
        &self,
        instruments: &[Instrument],
        base: &MarketSet,
        shocked: &MarketSet,
    ) -> Result<(Vec<PerInstrumentImpact>, Vec<InstrumentId>), RiskError> {
        let (priceable, mut excluded): (Vec<&Instrument>, Vec<&Instrument>) = instruments
            .iter()
            .partition(|i| base.get(&i.pair).is_some() && shocked.get(&i.pair).is_some());
        for instrument in &excluded {
            warn!(
                instrument_id = %instrument.id,
                pair = %instrument.pair,
                "no base or shocked market data, excluded from scenario"
            );
        }
        let priceable: Vec<Instrument> = priceable.into_iter().cloned().collect();

        let (base_values, _) = self.aggregator.value_portfolio(&priceable, base)?;
        let (shocked_values, _) =
            self.aggregator
                .value_portfolio_shifted(&priceable, shocked, |instrument| {
                    match (base.get(&instrument.pair), shocked.get(&instrument.pair)) {
                        (Some(b), Some(s)) => s.volatility - b.volatility,
                        _ => 0.0,
                    }
                })?;

        let impacts = base_values
            .into_iter()
            .zip(shocked_values)
            .map(|(before, after)| {
                let change = after.mtm - before.mtm;
                PerInstrumentImpact {
                    id: before.id,
                    pair: before.pair,
                    base_price: before.today_price,
                    shocked_price: after.today_price,
                    base_mtm: before.mtm,
                    shocked_mtm: after.mtm,
                    change,
                    change_pct: percent_change(change, before.mtm),
                }
            })
            .collect();

        excluded.sort_by(|a, b| a.id.cmp(&b.id));
        Ok((impacts, excluded.into_iter().map(|i| i.id.clone()).collect()))
    }

    /// Applies `scenario` to `base` and revalues the book and exposures.
    ///
    /// # Errors
    /// `Cancelled` if the pricer's token fires.
    pub fn run(
        &self,
        scenario: &Scenario,
        instruments: &[Instrument],
        base: &MarketSet,
        exposures: &[Exposure],
    ) -> Result<ScenarioResult, RiskError> {
        let shocked = scenario.apply(base);
        let (impacts, excluded) = self.impacts(instruments, base, &shocked)?;

        let base_mtm: f64 = impacts.iter().map(|i| i.base_mtm).sum();
        let shocked_mtm: f64 = impacts.iter().map(|i| i.shocked_mtm).sum();
        let change = shocked_mtm - base_mtm;
        let exposure_impact = exposure_impact(scenario, base, exposures);

        info!(
            scenario = scenario.name(),
            change,
            exposure_impact,
            "scenario evaluated"
        );

        Ok(ScenarioResult {
            name: scenario.name().to_string(),
            description: scenario.description().to_string(),
            impacts,
            base_mtm,
            shocked_mtm,
            change,
            change_pct: percent_change(change, base_mtm),
            exposure_impact,
            excluded,
        })
    }

    /// Runs every preset scenario.
    pub fn run_presets(
        &self,
        instruments: &[Instrument],
        base: &MarketSet,
        exposures: &[Exposure],
    ) -> Result<Vec<ScenarioResult>, RiskError> {
        PresetScenario::all()
            .iter()
            .map(|preset| self.run(&preset.scenario(base), instruments, base, exposures))
            .collect()
    }
}

/// Value change of the unhedged exposures under `scenario`.
///
/// Each currency takes the spot shock of the first market pair containing
/// it, read as the move of that currency: the shock itself when it is the
/// base, the inverse move `1/(1+s) − 1` when it is the quote.
pub fn exposure_impact(scenario: &Scenario, base: &MarketSet, exposures: &[Exposure]) -> f64 {
    exposures
        .iter()
        .filter_map(|exposure| {
            currency_move(scenario, base, exposure.currency)
                .map(|shock| exposure.unhedged_amount() * shock)
        })
        .sum()
}

fn currency_move(scenario: &Scenario, base: &MarketSet, currency: Currency) -> Option<f64> {
    let (pair, _) = base.iter().find(|(pair, _)| pair.contains(currency))?;
    let spot = scenario.shock_for(pair).spot;
    if pair.base() == currency {
        Some(spot)
    } else {
        Some(1.0 / (1.0 + spot) - 1.0)
    }
}

/// Per-instrument impacts with the default engine.
///
/// # Errors
/// Only cancellation aborts, and the default pricer carries no token.
pub fn run_scenario(
    instruments: &[Instrument],
    base: &MarketSet,
    shocked: &MarketSet,
) -> Result<Vec<PerInstrumentImpact>, RiskError> {
    ScenarioEngine::default()
        .impacts(instruments, base, shocked)
        .map(|(impacts, _)| impacts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use pricer_core::types::Date;
    use pricer_models::instruments::{InstrumentKind, VolatilityInputs};

    use crate::exposure::ExposureDirection;
    use crate::scenarios::MarketShock;

    fn base() -> MarketSet {
        MarketSet::reference(Date::from_ymd(2024, 6, 3).unwrap())
    }

    fn maturity() -> Date {
        Date::from_ymd(2025, 6, 3).unwrap()
    }

    fn call(id: &str) -> Instrument {
        Instrument::new(
            id,
            InstrumentKind::VanillaCall,
            "EURUSD".parse().unwrap(),
            1e6,
            maturity(),
        )
        .with_strike(1.10)
        .with_original_price(0.02)
    }

    #[test]
    fn test_zero_shock_has_no_impact() {
        let book = [call("C1"), call("C2").with_quantity(-1.0)];
        let impacts = run_scenario(&book, &base(), &base()).unwrap();
        assert_eq!(impacts.len(), 2);
        for impact in impacts {
            assert_eq!(impact.change, 0.0);
            assert_eq!(impact.base_price, impact.shocked_price);
        }
    }

    #[test]
    fn test_spot_up_helps_long_call_hurts_short() {
        let shocked = Scenario::uniform("up", MarketShock::spot(0.05)).apply(&base());
        let book = [call("LONG"), call("SHORT").with_quantity(-1.0)];
        let impacts = run_scenario(&book, &base(), &shocked).unwrap();
        assert!(impacts[0].change > 0.0);
        assert_relative_eq!(impacts[1].change, -impacts[0].change, max_relative = 1e-12);
        assert!(impacts[0].change_pct.unwrap() > 0.0);
    }

    #[test]
    fn test_vol_shock_moves_instrument_level_volatility() {
        let vols = VolatilityInputs {
            implied_override: Some(0.12),
            ..Default::default()
        };
        let book = [call("V").with_volatility(vols)];
        let shocked = Scenario::uniform("vol up", MarketShock::new(0.0, 0.05)).apply(&base());
        let impacts = run_scenario(&book, &base(), &shocked).unwrap();
        assert!(impacts[0].shocked_price > impacts[0].base_price);
    }

    #[test]
    fn test_missing_shocked_pair_is_excluded() {
        let book = [call("C1")];
        let engine = ScenarioEngine::default();
        let (impacts, excluded) = engine.impacts(&book, &base(), &MarketSet::new()).unwrap();
        assert!(impacts.is_empty());
        assert_eq!(excluded, vec![InstrumentId::new("C1")]);
    }

    #[test]
    fn test_exposure_impact_orientation() {
        let scenario = PresetScenario::UsdStrength.scenario(&base());
        let eur = Exposure::new("E", Currency::EUR, 1e6, ExposureDirection::Receivable)
            .with_hedged_amount(4e5);
        // EUR/USD is the first pair with EUR; EUR is its base
        assert_relative_eq!(
            exposure_impact(&scenario, &base(), &[eur]),
            6e5 * -0.10,
            max_relative = 1e-12
        );

        let jpy = Exposure::new("J", Currency::JPY, 1e8, ExposureDirection::Payable);
        // USD/JPY up 10%: JPY loses 1 − 1/1.1, a gain on a payable
        assert_relative_eq!(
            exposure_impact(&scenario, &base(), &[jpy]),
            -1e8 * (1.0 / 1.1 - 1.0),
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_presets_cover_all() {
        let book = [call("C1")];
        let results = ScenarioEngine::default()
            .run_presets(&book, &base(), &[])
            .unwrap();
        let names: Vec<_> = results.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["USD Strength", "EUR Crisis", "Risk-Off"]);
        // Long EUR call loses in both EUR-negative scenarios
        assert!(results[0].change < 0.0);
        assert!(results[1].change < 0.0);
    }
}
