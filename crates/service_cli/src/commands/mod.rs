//! CLI command implementations
//!
//! Each submodule implements a specific CLI command.

pub mod check;
pub mod price;
pub mod risk;
pub mod stress;

use pricer_pricing::InstrumentPricer;
use pricer_risk::RiskAggregator;

use crate::config::AppConfig;
use crate::output::OutputFormat;

/// Settings shared by every command.
#[derive(Debug, Clone)]
pub struct Context {
    /// Effective configuration
    pub config: AppConfig,
    /// Output format
    pub format: OutputFormat,
}

impl Context {
    /// Aggregator built from the engine and risk settings.
    pub fn aggregator(&self) -> RiskAggregator {
        RiskAggregator::new(
            InstrumentPricer::new(self.config.engine.clone()),
            self.config.risk.clone(),
        )
    }
}
