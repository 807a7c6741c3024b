//! Risk aggregation parameters.

use crate::error::RiskError;

/// Parameters of the parametric VaR and exposure analytics.
///
/// All fields default to the production values, so a partially specified
/// TOML table only overrides what it names.
///
/// # Examples
///
/// ```
/// use pricer_risk::RiskConfig;
///
/// let config = RiskConfig::default();
/// assert_eq!(config.z_95, 1.645);
/// assert!((config.horizon_factor() - (1.0_f64 / 252.0).sqrt()).abs() < 1e-15);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RiskConfig {
    /// One-sided z-score at 95% confidence
    pub z_95: f64,
    /// One-sided z-score at 99% confidence
    pub z_99: f64,
    /// Expected shortfall multiplier applied to VaR 95
    pub es_multiplier_95: f64,
    /// Expected shortfall multiplier applied to VaR 99
    pub es_multiplier_99: f64,
    /// Trading days per year; VaR horizon is one day
    pub trading_days_per_year: f64,
    /// Correlation for currency pairs missing from the table
    pub default_correlation: f64,
    /// Volatility for currencies without a market snapshot
    pub default_volatility: f64,
}

impl Default for RiskConfig {
    fn default() -> Self {
        Self {
            z_95: 1.645,
            z_99: 2.326,
            es_multiplier_95: 1.28,
            es_multiplier_99: 1.15,
            trading_days_per_year: 252.0,
            default_correlation: 0.3,
            default_volatility: 0.10,
        }
    }
}

impl RiskConfig {
    /// One-day scaling `√(1 / trading_days_per_year)`.
    #[inline]
    pub fn horizon_factor(&self) -> f64 {
        (1.0 / self.trading_days_per_year).sqrt()
    }

    /// Checks parameter ranges.
    pub fn validate(&self) -> Result<(), RiskError> {
        let positive = [
            ("z_95", self.z_95),
            ("z_99", self.z_99),
            ("es_multiplier_95", self.es_multiplier_95),
            ("es_multiplier_99", self.es_multiplier_99),
            ("trading_days_per_year", self.trading_days_per_year),
        ];
        for (name, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(RiskError::InvalidConfig { name, value });
            }
        }
        if !(-1.0..=1.0).contains(&self.default_correlation) {
            return Err(RiskError::InvalidConfig {
                name: "default_correlation",
                value: self.default_correlation,
            });
        }
        if !(self.default_volatility.is_finite() && self.default_volatility >= 0.0) {
            return Err(RiskError::InvalidConfig {
                name: "default_volatility",
                value: self.default_volatility,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_rejects_bad_values() {
        let config = RiskConfig {
            trading_days_per_year: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(RiskError::InvalidConfig {
                name: "trading_days_per_year",
                ..
            })
        ));

        let config = RiskConfig {
            default_correlation: 1.5,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_partial_json_uses_defaults() {
        let config: RiskConfig = serde_json::from_str(r#"{"z_99": 2.33}"#).unwrap();
        assert_eq!(config.z_99, 2.33);
        assert_eq!(config.z_95, 1.645);
        assert_eq!(config.default_volatility, 0.10);
    }
}
