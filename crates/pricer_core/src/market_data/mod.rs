//! Market data for a valuation pass.
//!
//! - [`MarketSnapshot`]: spot, domestic/foreign rates, volatility and
//!   valuation date for one currency pair
//! - [`MarketSet`]: snapshots keyed by [`CurrencyPair`](crate::types::CurrencyPair)
//! - [`MarketDataError`]: validation and lookup failures

mod error;
mod market_set;
mod snapshot;

pub use error::MarketDataError;
pub use market_set::MarketSet;
pub use snapshot::MarketSnapshot;
