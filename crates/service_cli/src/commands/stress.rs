//! Stress command implementation
//!
//! Runs preset or custom scenarios over a portfolio and its exposures.

use std::path::PathBuf;

use pricer_core::market_data::MarketSet;
use pricer_risk::scenarios::{MarketShock, PresetScenario, Scenario, ScenarioEngine, ScenarioResult};
use tracing::info;

use super::Context;
use crate::error::{CliError, Result};
use crate::input::{load_exposures, load_markets, load_portfolio, read_scenario, valuation_date};
use crate::output::{amount, percent, price, to_json, OutputFormat, Table};

/// Stress command arguments
#[derive(Debug, Clone, Default)]
pub struct StressArgs {
    /// Portfolio JSON file
    pub portfolio: PathBuf,
    /// Market set JSON file; reference quotes when absent
    pub market: Option<PathBuf>,
    /// Underlying exposures JSON file
    pub exposures: Option<PathBuf>,
    /// Valuation date for reference quotes
    pub date: Option<String>,
    /// Single preset to run
    pub preset: Option<PresetScenario>,
    /// Scenario JSON file
    pub scenario_file: Option<PathBuf>,
    /// Uniform spot shock in percent
    pub spot_shock: Option<f64>,
    /// Uniform volatility shock in volatility points
    pub vol_shock: Option<f64>,
    /// Print per-instrument impacts
    pub detail: bool,
}

impl StressArgs {
    /// Scenarios selected by the arguments; every preset when none is
    /// named.
    fn scenarios(&self, base: &MarketSet) -> Result<Vec<Scenario>> {
        let custom = self.spot_shock.is_some() || self.vol_shock.is_some();
        let selected = [custom, self.preset.is_some(), self.scenario_file.is_some()]
            .iter()
            .filter(|&&s| s)
            .count();
        if selected > 1 {
            return Err(CliError::InvalidArgument(
                "choose one of --preset, --scenario or --spot-shock/--vol-shock".to_string(),
            ));
        }

        if custom {
            let spot = self.spot_shock.unwrap_or(0.0) / 100.0;
            let vol = self.vol_shock.unwrap_or(0.0) / 100.0;
            let name = format!(
                "Custom (spot {:+.2}%, vol {:+.2} pts)",
                spot * 100.0,
                vol * 100.0
            );
            return Ok(vec![Scenario::uniform(name, MarketShock::new(spot, vol))
                .with_description("Uniform shock to every pair")]);
        }
        if let Some(path) = &self.scenario_file {
            return Ok(vec![read_scenario(path)?]);
        }
        let presets: Vec<PresetScenario> = match self.preset {
            Some(preset) => vec![preset],
            None => PresetScenario::all().to_vec(),
        };
        Ok(presets.iter().map(|p| p.scenario(base)).collect())
    }
}

/// Run the stress command
pub fn run(ctx: &Context, args: &StressArgs) -> Result<String> {
    let instruments = load_portfolio(&args.portfolio)?;
    let markets = load_markets(args.market.as_ref(), valuation_date(args.date.as_deref())?)?;
    let exposures = load_exposures(args.exposures.as_ref())?;

    let engine = ScenarioEngine::new(ctx.aggregator());
    let results = args
        .scenarios(&markets)?
        .iter()
        .map(|scenario| engine.run(scenario, &instruments, &markets, &exposures))
        .collect::<std::result::Result<Vec<_>, _>>()?;
    info!(scenarios = results.len(), "Stress run complete");

    match ctx.format {
        OutputFormat::Json => to_json(&results),
        OutputFormat::Table => Ok(render(&results, args.detail)),
    }
}

fn render(results: &[ScenarioResult], detail: bool) -> String {
    let mut summary = Table::new([
        "Scenario",
        "Base MTM",
        "Shocked MTM",
        "Change",
        "Change %",
        "Exposure Impact",
        "Net Impact",
    ]);
    for r in results {
        summary.row([
            r.name.clone(),
            amount(r.base_mtm),
            amount(r.shocked_mtm),
            amount(r.change),
            percent(r.change_pct),
            amount(r.exposure_impact),
            amount(r.net_impact()),
        ]);
    }
    let mut out = summary.render();

    if detail {
        for r in results {
            out.push_str(&format!("\n{}: {}\n", r.name, r.description));
            let mut table = Table::new([
                "Instrument",
                "Pair",
                "Base Price",
                "Shocked Price",
                "Change",
                "Change %",
            ]);
            for i in &r.impacts {
                table.row([
                    i.id.to_string(),
                    i.pair.code(),
                    price(i.base_price),
                    price(i.shocked_price),
                    amount(i.change),
                    percent(i.change_pct),
                ]);
            }
            out.push_str(&table.render());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use pricer_core::types::Date;

    fn base() -> MarketSet {
        MarketSet::reference(Date::from_ymd(2024, 6, 3).unwrap())
    }

    #[test]
    fn test_default_runs_every_preset() {
        let scenarios = StressArgs::default().scenarios(&base()).unwrap();
        assert_eq!(scenarios.len(), 3);
    }

    #[test]
    fn test_custom_shock_in_percent_and_points() {
        let args = StressArgs {
            spot_shock: Some(-10.0),
            vol_shock: Some(5.0),
            ..Default::default()
        };
        let scenarios = args.scenarios(&base()).unwrap();
        let shock = scenarios[0].shock_for(&"EURUSD".parse().unwrap());
        assert_abs_diff_eq!(shock.spot, -0.10, epsilon = 1e-12);
        assert_abs_diff_eq!(shock.volatility, 0.05, epsilon = 1e-12);
        assert!(scenarios[0].name().starts_with("Custom (spot -10.00%"));
    }

    #[test]
    fn test_conflicting_selection_rejected() {
        let args = StressArgs {
            spot_shock: Some(1.0),
            preset: Some(PresetScenario::RiskOff),
            ..Default::default()
        };
        assert!(matches!(
            args.scenarios(&base()),
            Err(CliError::InvalidArgument(_))
        ));
    }
}
