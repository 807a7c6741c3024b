//! Risk command implementation
//!
//! Aggregates MTM, parametric VaR and exposure coverage for a portfolio.

use std::path::PathBuf;

use pricer_risk::RiskReport;

use super::Context;
use crate::error::Result;
use crate::input::{load_exposures, load_markets, load_portfolio, valuation_date};
use crate::output::{amount, percent, to_json, OutputFormat, Table};

/// Risk command arguments
#[derive(Debug, Clone)]
pub struct RiskArgs {
    /// Portfolio JSON file
    pub portfolio: PathBuf,
    /// Market set JSON file; reference quotes when absent
    pub market: Option<PathBuf>,
    /// Underlying exposures JSON file; derived from the hedges when absent
    pub exposures: Option<PathBuf>,
    /// Valuation date for reference quotes
    pub date: Option<String>,
}

/// Run the risk command
pub fn run(ctx: &Context, args: &RiskArgs) -> Result<String> {
    let instruments = load_portfolio(&args.portfolio)?;
    let markets = load_markets(args.market.as_ref(), valuation_date(args.date.as_deref())?)?;
    let exposures = args
        .exposures
        .as_ref()
        .map(|path| load_exposures(Some(path)))
        .transpose()?;

    let report = ctx
        .aggregator()
        .aggregate(&instruments, &markets, exposures.as_deref())?;

    match ctx.format {
        OutputFormat::Json => to_json(&report),
        OutputFormat::Table => Ok(render(&report)),
    }
}

fn render(report: &RiskReport) -> String {
    let m = &report.metrics;
    let rows = [
        ("MTM", amount(m.mtm_impact)),
        ("VaR 95% (1d)", amount(m.var95)),
        ("VaR 99% (1d)", amount(m.var99)),
        ("ES 95% (1d)", amount(m.expected_shortfall95)),
        ("ES 99% (1d)", amount(m.expected_shortfall99)),
        ("Total exposure", amount(m.total_exposure)),
        ("Hedged exposure", amount(m.hedged_exposure)),
        ("Unhedged risk", amount(m.unhedged_risk)),
        ("Hedge ratio", percent(Some(m.hedge_ratio))),
    ];
    let mut metrics = Table::new(["Metric", "Value"]);
    for (name, value) in rows {
        metrics.row([name.to_string(), value]);
    }

    let mut currencies = Table::new(["Currency", "Gross", "Net", "Hedged", "Hedge Ratio", "VaR 95%"]);
    for c in &report.currency_exposures {
        currencies.row([
            c.currency.code().to_string(),
            amount(c.gross),
            amount(c.net),
            amount(c.hedged),
            percent(Some(c.hedge_ratio_pct)),
            amount(c.var95),
        ]);
    }

    let mut out = metrics.render();
    out.push_str(&currencies.render());
    if !report.excluded.is_empty() {
        let ids: Vec<String> = report.excluded.iter().map(ToString::to_string).collect();
        out.push_str(&format!("Excluded (no market data): {}\n", ids.join(", ")));
    }
    out
}
