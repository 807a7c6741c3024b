//! Input file loading.
//!
//! Portfolios, market sets and exposures are JSON documents. A portfolio is
//! either an array of instruments or an object with `instruments` and
//! `strategies`; strategies are expanded through the strategy importer.

use std::path::{Path, PathBuf};

use pricer_core::market_data::MarketSet;
use pricer_core::types::Date;
use pricer_models::instruments::Instrument;
use pricer_risk::exposure::Exposure;
use pricer_risk::portfolio::{
    InMemoryPortfolioRepository, PortfolioRepository, StrategyImporter, StrategyLeg,
    StrategyParams,
};
use pricer_risk::scenarios::Scenario;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, info};

use crate::error::{CliError, Result};

/// A strategy and its legs.
#[derive(Debug, Clone, Deserialize)]
pub struct StrategyRecord {
    /// Strategy-level parameters
    #[serde(flatten)]
    pub params: StrategyParams,
    /// Legs in display order
    pub legs: Vec<StrategyLeg>,
}

/// Accepted portfolio layouts.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum PortfolioFile {
    /// Bare instrument array
    Instruments(Vec<Instrument>),
    /// Instruments plus strategies to import
    Book {
        /// Instruments stored as-is
        #[serde(default)]
        instruments: Vec<Instrument>,
        /// Strategies converted leg by leg
        #[serde(default)]
        strategies: Vec<StrategyRecord>,
    },
}

impl PortfolioFile {
    /// Validates every record into a repository.
    pub fn into_repository(self) -> Result<InMemoryPortfolioRepository> {
        let mut repository = InMemoryPortfolioRepository::new();
        match self {
            PortfolioFile::Instruments(instruments) => {
                repository.add_all(instruments)?;
            }
            PortfolioFile::Book {
                instruments,
                strategies,
            } => {
                repository.add_all(instruments)?;
                let importer = StrategyImporter::new();
                for strategy in &strategies {
                    importer.import_into(&mut repository, &strategy.params, &strategy.legs)?;
                }
            }
        }
        Ok(repository)
    }
}

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path).map_err(|source| CliError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| CliError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Loads and validates a portfolio file.
pub fn load_portfolio(path: &Path) -> Result<Vec<Instrument>> {
    let repository = read_json::<PortfolioFile>(path)?.into_repository()?;
    info!(path = %path.display(), instruments = repository.len(), "portfolio loaded");
    Ok(repository.list())
}

/// Loads a market set, or the reference quotes at `valuation_date` when no
/// file is given.
pub fn load_markets(path: Option<&PathBuf>, valuation_date: Date) -> Result<MarketSet> {
    let markets = match path {
        Some(path) => {
            let markets: MarketSet = read_json(path)?;
            markets.validate()?;
            markets
        }
        None => {
            debug!(%valuation_date, "using reference market quotes");
            MarketSet::reference(valuation_date)
        }
    };
    Ok(markets)
}

/// Loads underlying exposures; an absent file means none.
pub fn load_exposures(path: Option<&PathBuf>) -> Result<Vec<Exposure>> {
    path.map(|path| read_json(path)).transpose().map(Option::unwrap_or_default)
}

/// Loads a scenario definition.
pub fn read_scenario(path: &Path) -> Result<Scenario> {
    read_json(path)
}

/// Parses `--date`, defaulting to today.
pub fn valuation_date(date: Option<&str>) -> Result<Date> {
    match date {
        Some(s) => Date::parse(s).map_err(|e| CliError::InvalidArgument(e.to_string())),
        None => Ok(Date::today()),
    }
}
