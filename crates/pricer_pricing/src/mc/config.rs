//! Monte Carlo simulation configuration.
//!
//! This module provides the validated run configuration consumed by the
//! path simulator.

use super::error::ConfigError;

/// Maximum number of simulation paths allowed.
pub const MAX_PATHS: usize = 10_000_000;

/// Maximum number of time steps allowed per path.
pub const MAX_STEPS: usize = 100_000;

/// Default number of paths per batch.
///
/// Batches are the unit of parallel work and of cancellation checks.
pub const DEFAULT_BATCH_SIZE: usize = 256;

/// Monte Carlo simulation configuration.
///
/// Immutable configuration specifying simulation parameters.
/// Use [`MonteCarloConfigBuilder`] to construct instances.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::mc::MonteCarloConfig;
///
/// let config = MonteCarloConfig::builder()
///     .n_paths(10_000)
///     .n_steps(252)
///     .seed(42)
///     .build()
///     .expect("valid configuration");
///
/// assert_eq!(config.n_paths(), 10_000);
/// assert_eq!(config.n_batches(), 40);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MonteCarloConfig {
    n_paths: usize,
    n_steps: usize,
    batch_size: usize,
    seed: Option<u64>,
}

impl MonteCarloConfig {
    /// Creates a new configuration builder.
    #[inline]
    pub fn builder() -> MonteCarloConfigBuilder {
        MonteCarloConfigBuilder::default()
    }

    /// Returns the number of simulation paths.
    #[inline]
    pub fn n_paths(&self) -> usize {
        self.n_paths
    }

    /// Returns the number of time steps per path.
    #[inline]
    pub fn n_steps(&self) -> usize {
        self.n_steps
    }

    /// Returns the number of paths per batch.
    #[inline]
    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Returns the number of batches (last one may be partial).
    #[inline]
    pub fn n_batches(&self) -> usize {
        self.n_paths.div_ceil(self.batch_size)
    }

    /// Returns the optional seed for reproducibility.
    #[inline]
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - `n_paths` is 0 or greater than [`MAX_PATHS`]
    /// - `n_steps` is 0 or greater than [`MAX_STEPS`]
    /// - `batch_size` is 0
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.n_paths == 0 || self.n_paths > MAX_PATHS {
            return Err(ConfigError::InvalidPathCount(self.n_paths));
        }
        if self.n_steps == 0 || self.n_steps > MAX_STEPS {
            return Err(ConfigError::InvalidStepCount(self.n_steps));
        }
        if self.batch_size == 0 {
            return Err(ConfigError::InvalidParameter {
                name: "batch_size",
                value: "must be positive".to_string(),
            });
        }
        Ok(())
    }
}

/// Builder for [`MonteCarloConfig`].
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::mc::MonteCarloConfig;
///
/// let config = MonteCarloConfig::builder()
///     .n_paths(1_000)
///     .n_steps(252)  // Daily steps for 1 year
///     .batch_size(100)
///     .build()
///     .expect("valid config");
/// assert_eq!(config.seed(), None);
/// ```
#[derive(Clone, Debug, Default)]
pub struct MonteCarloConfigBuilder {
    n_paths: Option<usize>,
    n_steps: Option<usize>,
    batch_size: Option<usize>,
    seed: Option<u64>,
}

impl MonteCarloConfigBuilder {
    /// Sets the number of simulation paths.
    #[inline]
    pub fn n_paths(mut self, n_paths: usize) -> Self {
        self.n_paths = Some(n_paths);
        self
    }

    /// Sets the number of time steps per path.
    #[inline]
    pub fn n_steps(mut self, n_steps: usize) -> Self {
        self.n_steps = Some(n_steps);
        self
    }

    /// Sets the number of paths per batch (default [`DEFAULT_BATCH_SIZE`]).
    #[inline]
    pub fn batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = Some(batch_size);
        self
    }

    /// Sets the seed for reproducibility.
    #[inline]
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets or clears the seed.
    #[inline]
    pub fn maybe_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Builds the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if `n_paths` or `n_steps` is missing or any
    /// value is out of range.
    pub fn build(self) -> Result<MonteCarloConfig, ConfigError> {
        let n_paths = self.n_paths.ok_or(ConfigError::InvalidParameter {
            name: "n_paths",
            value: "must be specified".to_string(),
        })?;

        let n_steps = self.n_steps.ok_or(ConfigError::InvalidParameter {
            name: "n_steps",
            value: "must be specified".to_string(),
        })?;

        let config = MonteCarloConfig {
            n_paths,
            n_steps,
            batch_size: self.batch_size.unwrap_or(DEFAULT_BATCH_SIZE),
            seed: self.seed,
        };

        config.validate()?;
        Ok(config)
    }
}

/// Number of time steps for a horizon of `expiry` years at `steps_per_year`,
/// floored at `min_steps` and capped at [`MAX_STEPS`].
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::mc::steps_for_expiry;
///
/// assert_eq!(steps_for_expiry(1.0, 252.0, 50), 252);
/// assert_eq!(steps_for_expiry(0.05, 252.0, 50), 50);
/// ```
pub fn steps_for_expiry(expiry: f64, steps_per_year: f64, min_steps: usize) -> usize {
    let raw = (expiry.max(0.0) * steps_per_year).ceil();
    let raw = if raw.is_finite() { raw as usize } else { MAX_STEPS };
    raw.max(min_steps).clamp(1, MAX_STEPS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builder_valid() {
        let config = MonteCarloConfig::builder()
            .n_paths(10_000)
            .n_steps(252)
            .seed(7)
            .build()
            .unwrap();

        assert_eq!(config.n_paths(), 10_000);
        assert_eq!(config.n_steps(), 252);
        assert_eq!(config.batch_size(), DEFAULT_BATCH_SIZE);
        assert_eq!(config.seed(), Some(7));
    }

    #[test]
    fn test_config_builder_missing_paths() {
        let err = MonteCarloConfig::builder().n_steps(10).build().unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidParameter { name: "n_paths", .. }
        ));
    }

    #[test]
    fn test_config_limits() {
        assert_eq!(
            MonteCarloConfig::builder().n_paths(0).n_steps(10).build(),
            Err(ConfigError::InvalidPathCount(0))
        );
        assert_eq!(
            MonteCarloConfig::builder()
                .n_paths(MAX_PATHS + 1)
                .n_steps(10)
                .build(),
            Err(ConfigError::InvalidPathCount(MAX_PATHS + 1))
        );
        assert_eq!(
            MonteCarloConfig::builder()
                .n_paths(10)
                .n_steps(MAX_STEPS + 1)
                .build(),
            Err(ConfigError::InvalidStepCount(MAX_STEPS + 1))
        );
        assert!(MonteCarloConfig::builder()
            .n_paths(10)
            .n_steps(10)
            .batch_size(0)
            .build()
            .is_err());
    }

    #[test]
    fn test_batches_round_up() {
        let config = MonteCarloConfig::builder()
            .n_paths(1_000)
            .n_steps(10)
            .batch_size(256)
            .build()
            .unwrap();
        assert_eq!(config.n_batches(), 4);
    }

    #[test]
    fn test_steps_for_expiry() {
        assert_eq!(steps_for_expiry(0.5, 252.0, 50), 126);
        assert_eq!(steps_for_expiry(0.5, 1008.0, 50), 504);
        assert_eq!(steps_for_expiry(0.0, 252.0, 50), 50);
        assert_eq!(steps_for_expiry(1e9, 252.0, 50), MAX_STEPS);
        assert_eq!(steps_for_expiry(f64::NAN, 252.0, 50), 50);
    }
}
