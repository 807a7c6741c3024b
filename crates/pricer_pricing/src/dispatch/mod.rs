//! Instrument-level pricing.
//!
//! [`InstrumentPricer`] resolves effective volatility and time to maturity,
//! picks a closed form or Monte Carlo estimator per [`InstrumentKind`], and
//! applies the engine's degenerate-input policy.
//!
//! [`InstrumentKind`]: pricer_models::instruments::InstrumentKind

mod config;
mod pricer;

pub use config::{EngineConfig, MonteCarloSettings};
pub use pricer::{
    price_instrument, try_price_instrument, InstrumentPricer, PriceMethod, PricingOutcome,
};
