//! Parametric (variance–covariance) VaR.
//!
//! ```text
//! VaR_c = z_c · √(Σᵢ Σⱼ nᵢ·nⱼ·σᵢ·σⱼ·ρᵢⱼ) · √(1/252)
//! ES_c  = VaR_c · k_c
//! ```
//!
//! `nᵢ` is the net exposure in currency `i` and `σᵢ` its annualised
//! volatility.

use pricer_core::types::Currency;

use super::correlation::CorrelationTable;
use crate::config::RiskConfig;

/// One-day VaR and expected shortfall at 95% and 99%.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VarEstimate {
    /// VaR at 95%
    pub var95: f64,
    /// VaR at 99%
    pub var99: f64,
    /// Expected shortfall at 95%
    pub expected_shortfall95: f64,
    /// Expected shortfall at 99%
    pub expected_shortfall99: f64,
}

/// Annualised standard deviation of the net currency positions.
///
/// Negative variance from an inconsistent correlation table is floored at
/// zero.
pub fn portfolio_std_dev<V>(
    positions: &[(Currency, f64)],
    volatility: V,
    correlations: &CorrelationTable,
) -> f64
where
    V: Fn(Currency) -> f64,
{
    let scaled: Vec<(Currency, f64)> = positions
        .iter()
        .map(|&(currency, net)| (currency, net * volatility(currency)))
        .collect();
    let variance: f64 = scaled
        .iter()
        .map(|&(ci, xi)| {
            scaled
                .iter()
                .map(|&(cj, xj)| xi * xj * correlations.get(ci, cj))
                .sum::<f64>()
        })
        .sum();
    variance.max(0.0).sqrt()
}

/// One-day parametric VaR and ES of net currency positions.
///
/// # Examples
///
/// ```
/// use pricer_core::types::Currency;
/// use pricer_risk::var::{parametric_var, CorrelationTable};
/// use pricer_risk::RiskConfig;
///
/// let config = RiskConfig::default();
/// let table = CorrelationTable::standard(config.default_correlation);
/// let est = parametric_var(&[(Currency::EUR, 1_000_000.0)], |_| 0.10, &table, &config);
///
/// let expected = 1.645 * 1_000_000.0 * 0.10 * (1.0_f64 / 252.0).sqrt();
/// assert!((est.var95 - expected).abs() < 1e-6);
/// assert!((est.expected_shortfall95 - 1.28 * expected).abs() < 1e-6);
/// ```
pub fn parametric_var<V>(
    positions: &[(Currency, f64)],
    volatility: V,
    correlations: &CorrelationTable,
    config: &RiskConfig,
) -> VarEstimate
where
    V: Fn(Currency) -> f64,
{
    let daily = portfolio_std_dev(positions, volatility, correlations) * config.horizon_factor();
    let var95 = config.z_95 * daily;
    let var99 = config.z_99 * daily;
    VarEstimate {
        var95,
        var99,
        expected_shortfall95: var95 * config.es_multiplier_95,
        expected_shortfall99: var99 * config.es_multiplier_99,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    fn table() -> CorrelationTable {
        CorrelationTable::standard(0.3)
    }

    #[test]
    fn test_two_currency_variance() {
        let positions = [(Currency::EUR, 2_000_000.0), (Currency::GBP, -1_000_000.0)];
        let vol = |c: Currency| match c {
            Currency::EUR => 0.0875,
            _ => 0.1125,
        };
        let (a, b) = (2_000_000.0 * 0.0875, -1_000_000.0 * 0.1125);
        let expected = (a * a + b * b + 2.0 * a * b * 0.75_f64).sqrt();
        assert_relative_eq!(
            portfolio_std_dev(&positions, vol, &table()),
            expected,
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_empty_positions_have_zero_var() {
        let est = parametric_var(&[], |_| 0.1, &table(), &RiskConfig::default());
        assert_eq!(est, VarEstimate::default());
    }

    #[test]
    fn test_var99_exceeds_var95() {
        let est = parametric_var(
            &[(Currency::USD, 5e6), (Currency::JPY, 3e6)],
            |_| 0.09,
            &table(),
            &RiskConfig::default(),
        );
        assert!(est.var99 > est.var95);
        assert_relative_eq!(est.var99 / est.var95, 2.326 / 1.645, max_relative = 1e-12);
    }

    proptest! {
        #[test]
        fn prop_var_is_homogeneous(
            eur in -1e7f64..1e7,
            usd in -1e7f64..1e7,
            scale in 0.1f64..10.0,
        ) {
            let config = RiskConfig::default();
            let base = parametric_var(&[(Currency::EUR, eur), (Currency::USD, usd)], |_| 0.1, &table(), &config);
            let scaled = parametric_var(
                &[(Currency::EUR, eur * scale), (Currency::USD, usd * scale)],
                |_| 0.1,
                &table(),
                &config,
            );
            prop_assert!(base.var95 >= 0.0);
            prop_assert!((scaled.var95 - scale * base.var95).abs() <= 1e-6 * scaled.var95.max(1.0));
        }
    }
}
