//! Hedging book storage and strategy import.
//!
//! - [`PortfolioRepository`]: add/get/update/remove/list/clear over
//!   instruments, with [`InMemoryPortfolioRepository`] as the default store
//! - [`StrategyImporter`]: converts strategy legs into instruments
//! - [`StrategyId`], [`ExposureId`]: identifier newtypes
//! - [`PortfolioError`]: repository and import failures

mod error;
mod ids;
mod import;
mod repository;

pub use error::PortfolioError;
pub use ids::{ExposureId, StrategyId};
pub use import::{LevelType, StrategyImporter, StrategyLeg, StrategyParams};
pub use repository::{InMemoryPortfolioRepository, PortfolioRepository};
