//! Stress scenarios.
//!
//! - [`MarketShock`], [`Scenario`]: spot and volatility moves per pair
//! - [`PresetScenario`]: USD strength, EUR crisis and risk-off presets
//! - [`ScenarioEngine`], [`run_scenario`]: revaluation under shocked markets

mod engine;
mod presets;
mod shocks;

pub use engine::{exposure_impact, run_scenario, PerInstrumentImpact, ScenarioEngine, ScenarioResult};
pub use presets::{
    PresetScenario, EUR_CRISIS_MOVE, EUR_CRISIS_VOL_SHOCK, RISK_OFF_MOVE, SAFE_HAVENS,
    USD_STRENGTH_MOVE,
};
pub use shocks::{MarketShock, Scenario};
