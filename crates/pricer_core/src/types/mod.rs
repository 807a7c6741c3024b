//! Core time and financial types.
//!
//! This module provides:
//! - `time`: `Date`, ACT/365.25 year fractions and tenor parsing
//! - `currency`: ISO 4217 currency codes with metadata
//! - `currency_pair`: base/quote currency pairs
//! - `error`: Structured error types for date and currency operations
//!
//! # Re-exports
//!
//! - [`Date`], [`year_fraction`], [`tenor_to_years`] from `time`
//! - [`Currency`] from `currency`, [`CurrencyPair`] from `currency_pair`
//! - [`DateError`], [`CurrencyError`] from `error`

pub mod currency;
pub mod currency_pair;
pub mod error;
pub mod time;

pub use currency::Currency;
pub use currency_pair::CurrencyPair;
pub use error::{CurrencyError, DateError};
pub use time::{tenor_to_years, year_fraction, Date};
