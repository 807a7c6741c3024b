//! # pricer_core: Numerical Foundation for the FX Hedging Engine
//!
//! ## Layer 1 (Foundation) Role
//!
//! pricer_core is the bottom layer of the engine, providing:
//! - Standard normal distribution and error function (`math::distributions`)
//! - Time types: `Date`, year fractions, tenors (`types::time`)
//! - Currency types: `Currency`, `CurrencyPair` (`types`)
//! - Market state: `MarketSnapshot`, `MarketSet` (`market_data`)
//!
//! ## Zero Dependency Principle
//!
//! Layer 1 has no dependencies on other pricer_* crates, with minimal external dependencies:
//! - num-traits: Traits for generic numerical computation
//! - chrono: Date arithmetic
//! - thiserror: Error derivation
//! - serde: Serialisation support (optional)
//!
//! ## Usage Examples
//!
//! ```rust
//! use pricer_core::math::distributions::norm_cdf;
//! use pricer_core::market_data::MarketSnapshot;
//! use pricer_core::types::{year_fraction, Date};
//!
//! let valuation = Date::from_ymd(2024, 1, 1).unwrap();
//! let maturity = Date::from_ymd(2024, 7, 1).unwrap();
//! let t = year_fraction(valuation, maturity);
//!
//! let market = MarketSnapshot::new(1.0850, 0.01, 0.005, 0.20, valuation).unwrap();
//! let forward = market.forward(t);
//! # assert!(forward > 1.0850);
//! # assert!((norm_cdf(0.0_f64) - 0.5).abs() < 1e-7);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` (default): Enable serialisation for Date, Currency, CurrencyPair and market data

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod market_data;
pub mod math;
pub mod types;
