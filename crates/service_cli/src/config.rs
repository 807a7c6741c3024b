//! CLI configuration management
//!
//! Builds the run configuration from a TOML file, `FXHEDGE_*` environment
//! variables and command-line flags.
//!
//! ```toml
//! log_level = "info"
//!
//! [engine]
//! fallback_unknown_kind_to_call = false
//!
//! [engine.monte_carlo]
//! digital_paths = 20000
//! seed = 42
//!
//! [risk]
//! default_correlation = 0.3
//! ```

use std::path::{Path, PathBuf};
use std::str::FromStr;

use pricer_pricing::EngineConfig;
use pricer_risk::RiskConfig;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "FXHEDGE_";

/// Configuration error types
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Configuration file error: {0}")]
    FileError(String),

    #[error("Environment variable {name}: cannot parse '{value}'")]
    EnvError { name: String, value: String },

    #[error("Invalid engine settings: {0}")]
    Engine(String),

    #[error("Invalid risk settings: {0}")]
    Risk(String),
}

/// Log levels accepted by the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl FromStr for LogLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "trace" => Ok(LogLevel::Trace),
            "debug" => Ok(LogLevel::Debug),
            "info" => Ok(LogLevel::Info),
            "warn" => Ok(LogLevel::Warn),
            "error" => Ok(LogLevel::Error),
            _ => Err(ConfigError::InvalidLogLevel(s.to_string())),
        }
    }
}

impl LogLevel {
    /// Tracing filter directive
    pub fn as_filter_str(&self) -> &'static str {
        match self {
            LogLevel::Trace => "trace",
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
            LogLevel::Warn => "warn",
            LogLevel::Error => "error",
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_filter_str())
    }
}

/// Run configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Log level when `RUST_LOG` is unset
    pub log_level: LogLevel,
    /// Pricing engine settings
    pub engine: EngineConfig,
    /// Risk aggregation settings
    pub risk: RiskConfig,
}

impl AppConfig {
    /// Parses a TOML document
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content)
            .map_err(|e| ConfigError::FileError(format!("Failed to parse TOML: {}", e)))
    }

    /// Loads a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ConfigError::FileError(format!("Failed to read {}: {}", path.display(), e))
        })?;
        Self::from_toml(&content)
    }

    /// Applies `FXHEDGE_*` overrides read through `lookup`
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |suffix: &str| {
            let name = format!("{ENV_PREFIX}{suffix}");
            lookup(&name).map(|value| (name, value))
        };

        if let Some((_, value)) = var("LOG_LEVEL") {
            self.log_level = LogLevel::from_str(&value)?;
        }
        if let Some((name, value)) = var("SEED") {
            self.engine.monte_carlo.seed = Some(parse_env(&name, &value)?);
        }
        if let Some((name, value)) = var("BARRIER_PATHS") {
            self.engine.monte_carlo.barrier_paths = parse_env(&name, &value)?;
        }
        if let Some((name, value)) = var("DIGITAL_PATHS") {
            self.engine.monte_carlo.digital_paths = parse_env(&name, &value)?;
        }
        if let Some((name, value)) = var("VANILLA_MONTE_CARLO") {
            self.engine.vanilla_monte_carlo = parse_env(&name, &value)?;
        }
        if let Some((name, value)) = var("UNKNOWN_KIND_FALLBACK") {
            self.engine.fallback_unknown_kind_to_call = parse_env(&name, &value)?;
        }
        if let Some((name, value)) = var("DEFAULT_CORRELATION") {
            self.risk.default_correlation = parse_env(&name, &value)?;
        }
        Ok(())
    }

    /// Merges command-line overrides (highest priority)
    pub fn merge_with_cli(&mut self, cli: &CliOverrides) {
        if let Some(level) = cli.log_level {
            self.log_level = level;
        }
        if let Some(seed) = cli.seed {
            self.engine.monte_carlo.seed = Some(seed);
        }
        if cli.allow_unknown_kinds {
            self.engine.fallback_unknown_kind_to_call = true;
        }
    }

    /// Validates engine and risk settings
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.engine
            .validate()
            .map_err(|e| ConfigError::Engine(e.to_string()))?;
        self.risk
            .validate()
            .map_err(|e| ConfigError::Risk(e.to_string()))
    }
}

fn parse_env<T: FromStr>(name: &str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::EnvError {
        name: name.to_string(),
        value: value.to_string(),
    })
}

/// Overrides taken from command-line flags
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    /// Config file path
    pub config_file: Option<PathBuf>,
    /// Log level override
    pub log_level: Option<LogLevel>,
    /// Monte Carlo seed override
    pub seed: Option<u64>,
    /// Enable the unknown-kind call fallback
    pub allow_unknown_kinds: bool,
}

/// Build configuration from all sources
///
/// Priority (highest to lowest):
/// 1. CLI arguments
/// 2. Environment variables
/// 3. Config file
/// 4. Default values
pub fn build_config(cli: &CliOverrides) -> Result<AppConfig, ConfigError> {
    let mut config = match &cli.config_file {
        Some(path) => AppConfig::from_file(path)?,
        None => AppConfig::default(),
    };
    config.apply_env(|name| std::env::var(name).ok())?;
    config.merge_with_cli(cli);
    config.validate()?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.log_level, LogLevel::Info);
        assert_eq!(config.engine, EngineConfig::default());
        assert_eq!(config.risk, RiskConfig::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = AppConfig::from_toml(
            r#"
            log_level = "debug"

            [engine.monte_carlo]
            digital_paths = 20000
            seed = 7

            [risk]
            default_correlation = 0.5
            "#,
        )
        .unwrap();
        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.engine.monte_carlo.digital_paths, 20_000);
        assert_eq!(config.engine.monte_carlo.seed, Some(7));
        assert_eq!(config.engine.monte_carlo.barrier_paths, 1_000);
        assert_eq!(config.risk.default_correlation, 0.5);
        assert_eq!(config.risk.z_95, 1.645);
    }

    #[test]
    fn test_invalid_toml() {
        assert!(matches!(
            AppConfig::from_toml("log_level = 3"),
            Err(ConfigError::FileError(_))
        ));
    }

    #[test]
    fn test_env_overrides() {
        let mut config = AppConfig::default();
        config
            .apply_env(env(&[
                ("FXHEDGE_LOG_LEVEL", "WARN"),
                ("FXHEDGE_SEED", "99"),
                ("FXHEDGE_UNKNOWN_KIND_FALLBACK", "true"),
            ]))
            .unwrap();
        assert_eq!(config.log_level, LogLevel::Warn);
        assert_eq!(config.engine.monte_carlo.seed, Some(99));
        assert!(config.engine.fallback_unknown_kind_to_call);
    }

    #[test]
    fn test_env_parse_error_names_variable() {
        let mut config = AppConfig::default();
        let err = config
            .apply_env(env(&[("FXHEDGE_DIGITAL_PATHS", "many")]))
            .unwrap_err();
        assert!(format!("{}", err).contains("FXHEDGE_DIGITAL_PATHS"));
    }

    #[test]
    fn test_cli_takes_precedence() {
        let mut config = AppConfig::default();
        config.apply_env(env(&[("FXHEDGE_SEED", "1")])).unwrap();
        config.merge_with_cli(&CliOverrides {
            seed: Some(2),
            log_level: Some(LogLevel::Trace),
            ..Default::default()
        });
        assert_eq!(config.engine.monte_carlo.seed, Some(2));
        assert_eq!(config.log_level, LogLevel::Trace);
    }

    #[test]
    fn test_validate_rejects_bad_risk_settings() {
        let mut config = AppConfig::default();
        config.risk.default_correlation = 1.5;
        assert!(matches!(config.validate(), Err(ConfigError::Risk(_))));
    }

    #[test]
    fn test_log_level_parsing() {
        assert_eq!(LogLevel::from_str("DEBUG").unwrap(), LogLevel::Debug);
        assert!(LogLevel::from_str("verbose").is_err());
    }
}
