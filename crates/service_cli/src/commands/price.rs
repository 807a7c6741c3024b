//! Price command implementation
//!
//! Prices every instrument of a portfolio and reports its MTM.

use std::path::PathBuf;

use pricer_models::instruments::InstrumentId;
use pricer_risk::InstrumentValuation;
use serde::Serialize;
use tracing::info;

use super::Context;
use crate::error::Result;
use crate::input::{load_markets, load_portfolio, valuation_date};
use crate::output::{amount, price, to_json, OutputFormat, Table};

/// Price command arguments
#[derive(Debug, Clone)]
pub struct PriceArgs {
    /// Portfolio JSON file
    pub portfolio: PathBuf,
    /// Market set JSON file; reference quotes when absent
    pub market: Option<PathBuf>,
    /// Valuation date for reference quotes
    pub date: Option<String>,
}

#[derive(Debug, Serialize)]
struct PriceReport {
    valuations: Vec<InstrumentValuation>,
    total_mtm: f64,
    excluded: Vec<InstrumentId>,
}

/// Run the price command
pub fn run(ctx: &Context, args: &PriceArgs) -> Result<String> {
    let instruments = load_portfolio(&args.portfolio)?;
    let markets = load_markets(args.market.as_ref(), valuation_date(args.date.as_deref())?)?;

    let (valuations, excluded) = ctx.aggregator().value_portfolio(&instruments, &markets)?;
    let total_mtm: f64 = valuations.iter().map(|v| v.mtm).sum();
    info!(
        priced = valuations.len(),
        excluded = excluded.len(),
        total_mtm,
        "Pricing complete"
    );

    let report = PriceReport {
        valuations,
        total_mtm,
        excluded,
    };
    match ctx.format {
        OutputFormat::Json => to_json(&report),
        OutputFormat::Table => Ok(render(&report)),
    }
}

fn render(report: &PriceReport) -> String {
    let mut table = Table::new(["Instrument", "Pair", "Price", "MTM", "Method", "Std Error"]);
    for v in &report.valuations {
        table.row([
            v.id.to_string(),
            v.pair.code(),
            price(v.today_price),
            amount(v.mtm),
            v.method.map_or_else(|| "failed".to_string(), |m| m.to_string()),
            v.std_error.map_or_else(String::new, price),
        ]);
    }
    let mut out = table.render();
    out.push_str(&format!("Total MTM: {}\n", amount(report.total_mtm)));
    if !report.excluded.is_empty() {
        let ids: Vec<String> = report.excluded.iter().map(ToString::to_string).collect();
        out.push_str(&format!("Excluded (no market data): {}\n", ids.join(", ")));
    }
    out
}
