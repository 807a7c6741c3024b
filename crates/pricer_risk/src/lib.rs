//! # Pricer Risk (L4: Application)
//!
//! Portfolio-level analytics for FX hedging books.
//!
//! This crate provides:
//! - Mark-to-market of hedging instruments against their inception price
//! - Parametric one-day VaR and expected shortfall over currency positions
//! - Exposure aggregation and hedge coverage per currency
//! - Stress scenarios with preset and custom market shocks
//! - An injectable instrument repository and strategy-leg importer
//! - Rayon-based parallel valuation of independent instruments
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │            pricer_risk (L4)             │
//! ├─────────────────────────────────────────┤
//! │  mtm/        - per-instrument MTM       │
//! │  metrics/    - RiskAggregator, report   │
//! │  var/        - correlations, VaR, ES    │
//! │  exposure/   - currency exposures       │
//! │  scenarios/  - shocks, presets, engine  │
//! │  portfolio/  - repository, import       │
//! │  parallel/   - Rayon utilities          │
//! └─────────────────────────────────────────┘
//!          ↓
//! ┌─────────────────────────────────────────┐
//! │           pricer_pricing (L3)           │
//! │  Instrument dispatch, Monte Carlo       │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Example
//!
//! ```
//! use pricer_core::market_data::MarketSet;
//! use pricer_core::types::Date;
//! use pricer_models::instruments::{Instrument, InstrumentKind};
//! use pricer_risk::scenarios::{MarketShock, Scenario};
//! use pricer_risk::{aggregate_risk, run_scenario};
//!
//! let markets = MarketSet::reference(Date::from_ymd(2024, 6, 3).unwrap());
//! let put = Instrument::new(
//!     "P-1",
//!     InstrumentKind::VanillaPut,
//!     "EURUSD".parse().unwrap(),
//!     5_000_000.0,
//!     Date::from_ymd(2024, 12, 3).unwrap(),
//! )
//! .with_strike(1.08)
//! .with_original_price(0.012);
//!
//! let metrics = aggregate_risk(std::slice::from_ref(&put), &markets).unwrap();
//! assert!(metrics.var99 > metrics.var95);
//!
//! let shocked = Scenario::uniform("spot -5%", MarketShock::spot(-0.05)).apply(&markets);
//! let impacts = run_scenario(&[put], &markets, &shocked).unwrap();
//! assert!(impacts[0].change > 0.0);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` (default): Serialisation for reports, exposures and scenarios

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod config;
pub mod error;
pub mod exposure;
pub mod metrics;
pub mod mtm;
pub mod parallel;
pub mod portfolio;
pub mod scenarios;
pub mod var;

pub use config::RiskConfig;
pub use error::RiskError;
pub use exposure::{CurrencyExposure, Exposure, ExposureDirection};
pub use metrics::{aggregate_risk, RiskAggregator, RiskMetrics, RiskReport};
pub use mtm::{compute_mtm, mtm_from_price, InstrumentValuation};
pub use portfolio::{InMemoryPortfolioRepository, PortfolioError, PortfolioRepository, StrategyImporter};
pub use scenarios::{run_scenario, PerInstrumentImpact, ScenarioEngine, ScenarioResult};
pub use var::{CorrelationTable, VarEstimate};
