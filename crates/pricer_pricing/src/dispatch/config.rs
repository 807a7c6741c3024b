//! Engine configuration.
//!
//! All fields default to the production settings, so an empty TOML table
//! or `EngineConfig::default()` gives the standard engine.

use crate::mc::{steps_for_expiry, ConfigError, MonteCarloConfig, DEFAULT_BATCH_SIZE};

/// Monte Carlo settings per pricer.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MonteCarloSettings {
    /// Paths for the barrier fallback
    pub barrier_paths: usize,
    /// Paths for digital options
    pub digital_paths: usize,
    /// Paths for the vanilla validation mode
    pub vanilla_paths: usize,
    /// Barrier monitoring steps per year (daily)
    pub barrier_steps_per_year: f64,
    /// Digital monitoring steps per trading day
    pub digital_steps_per_day: f64,
    /// Minimum steps per path
    pub min_steps: usize,
    /// Paths per batch
    pub batch_size: usize,
    /// Base seed; `None` draws from entropy on every run
    pub seed: Option<u64>,
}

impl Default for MonteCarloSettings {
    fn default() -> Self {
        Self {
            barrier_paths: 1_000,
            digital_paths: 10_000,
            vanilla_paths: 100_000,
            barrier_steps_per_year: 252.0,
            digital_steps_per_day: 4.0,
            min_steps: 50,
            batch_size: DEFAULT_BATCH_SIZE,
            seed: None,
        }
    }
}

impl MonteCarloSettings {
    /// Run configuration for the barrier fallback at `expiry` years.
    pub fn barrier_config(&self, expiry: f64) -> Result<MonteCarloConfig, ConfigError> {
        self.run_config(
            self.barrier_paths,
            steps_for_expiry(expiry, self.barrier_steps_per_year, self.min_steps),
        )
    }

    /// Run configuration for digital options at `expiry` years.
    pub fn digital_config(&self, expiry: f64) -> Result<MonteCarloConfig, ConfigError> {
        self.run_config(
            self.digital_paths,
            steps_for_expiry(
                expiry,
                self.barrier_steps_per_year * self.digital_steps_per_day,
                self.min_steps,
            ),
        )
    }

    /// Run configuration for vanilla validation.
    ///
    /// Terminal-only payoffs need a single exact GBM step.
    pub fn vanilla_config(&self) -> Result<MonteCarloConfig, ConfigError> {
        self.run_config(self.vanilla_paths, 1)
    }

    fn run_config(&self, n_paths: usize, n_steps: usize) -> Result<MonteCarloConfig, ConfigError> {
        MonteCarloConfig::builder()
            .n_paths(n_paths)
            .n_steps(n_steps)
            .batch_size(self.batch_size)
            .maybe_seed(self.seed)
            .build()
    }

    /// Checks every derived run configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("barrier_steps_per_year", self.barrier_steps_per_year),
            ("digital_steps_per_day", self.digital_steps_per_day),
        ] {
            if !(value > 0.0 && value.is_finite()) {
                return Err(ConfigError::InvalidParameter {
                    name,
                    value: format!("must be positive, got {}", value),
                });
            }
        }
        self.barrier_config(1.0)?;
        self.digital_config(1.0)?;
        self.vanilla_config()?;
        Ok(())
    }
}

/// Pricing engine configuration.
///
/// # Examples
///
/// ```
/// use pricer_pricing::EngineConfig;
///
/// let config = EngineConfig::default();
/// assert_eq!(config.double_barrier_terms, 5);
/// assert!(!config.fallback_unknown_kind_to_call);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EngineConfig {
    /// Monte Carlo settings
    pub monte_carlo: MonteCarloSettings,
    /// Double-barrier series terms on each side of zero
    pub double_barrier_terms: usize,
    /// Price unrecognised kinds as vanilla calls instead of failing
    pub fallback_unknown_kind_to_call: bool,
    /// Price vanilla options by simulation instead of the closed form
    pub vanilla_monte_carlo: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            monte_carlo: MonteCarloSettings::default(),
            double_barrier_terms: pricer_models::analytical::DOUBLE_BARRIER_SERIES_TERMS,
            fallback_unknown_kind_to_call: false,
            vanilla_monte_carlo: false,
        }
    }
}

impl EngineConfig {
    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.monte_carlo.validate()
    }

    /// Returns a copy with a fixed Monte Carlo seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.monte_carlo.seed = Some(seed);
        self
    }
}
