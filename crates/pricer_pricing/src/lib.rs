//! # pricer_pricing: Pricing Engine for FX Hedging Instruments
//!
//! ## Layer 3 Role
//!
//! pricer_pricing turns an instrument and a market snapshot into a price
//! per unit of notional:
//! - Instrument dispatch with effective-volatility resolution (`dispatch`)
//! - Monte Carlo estimators on a shared GBM path simulator (`mc`)
//! - Seeded, stream-split random number generation (`rng`)
//!
//! Closed forms live in `pricer_models::analytical`; this crate decides
//! when they apply and falls back to simulation when they do not.
//!
//! ## Usage Example
//!
//! ```rust
//! use pricer_core::market_data::MarketSnapshot;
//! use pricer_core::types::Date;
//! use pricer_models::instruments::{Instrument, InstrumentKind};
//! use pricer_pricing::{EngineConfig, InstrumentPricer};
//!
//! let valuation = Date::from_ymd(2024, 6, 3).unwrap();
//! let market = MarketSnapshot::new(1.0856, 0.0525, 0.04, 0.0875, valuation).unwrap();
//!
//! let touch = Instrument::new(
//!     "OT-1",
//!     "One-Touch".parse::<InstrumentKind>().unwrap(),
//!     "EURUSD".parse().unwrap(),
//!     1_000_000.0,
//!     Date::from_ymd(2024, 12, 2).unwrap(),
//! )
//! .with_barrier(1.12);
//!
//! let pricer = InstrumentPricer::new(EngineConfig::default().with_seed(7));
//! let outcome = pricer.try_price(&touch, &market).unwrap();
//! assert!(outcome.price > 0.0 && outcome.price < 0.05);
//! assert!(outcome.std_error.is_some());
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` (default): Serialisation for engine configuration and outcomes

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod dispatch;
pub mod error;
pub mod mc;
pub mod rng;

pub use dispatch::{
    price_instrument, try_price_instrument, EngineConfig, InstrumentPricer, MonteCarloSettings,
    PriceMethod, PricingOutcome,
};
pub use error::PricingError;
pub use mc::{CancellationToken, McEstimate};
