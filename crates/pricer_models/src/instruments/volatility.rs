//! Effective volatility resolution.
//!
//! Every pricer takes σ from [`VolatilityInputs::resolve`] so that the
//! inception price and today's price of an instrument see the same
//! volatility unless a scenario deliberately moves the market.
//!
//! Priority, highest first:
//! 1. instrument-specific implied-volatility override
//! 2. volatility of the strategy leg the instrument was imported from
//! 3. the instrument's own stored volatility
//! 4. the pair's market-snapshot volatility
//!
//! A level is used only when it is present, finite and strictly positive.

/// Where the effective volatility came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum VolatilitySource {
    /// Instrument-specific implied volatility override
    ImpliedOverride,
    /// Originating strategy leg
    StrategyLeg,
    /// Instrument's stored volatility
    Instrument,
    /// Market snapshot
    Market,
}

/// Volatility levels attached to an instrument (annualised decimals).
///
/// # Examples
///
/// ```
/// use pricer_models::instruments::{VolatilityInputs, VolatilitySource};
///
/// let inputs = VolatilityInputs {
///     implied_override: None,
///     strategy_leg: Some(0.10),
///     stored: Some(0.12),
/// };
/// assert_eq!(inputs.resolve(0.0875), (0.10, VolatilitySource::StrategyLeg));
///
/// // Shocked market volatility does not leak through an override
/// assert_eq!(inputs.resolve(0.20).0, 0.10);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct VolatilityInputs {
    /// Implied-volatility override set on the instrument
    pub implied_override: Option<f64>,
    /// Volatility of the originating strategy leg
    pub strategy_leg: Option<f64>,
    /// Volatility stored on the instrument record
    pub stored: Option<f64>,
}

impl VolatilityInputs {
    /// Resolves the effective volatility against the market level.
    pub fn resolve(&self, market: f64) -> (f64, VolatilitySource) {
        self.instrument_level()
            .unwrap_or((market, VolatilitySource::Market))
    }

    /// Resolves against a shocked market, shifting instrument-level
    /// volatilities by the same absolute amount as the market.
    ///
    /// Used by stress scenarios so that a volatility shock applies to every
    /// instrument regardless of which level it resolves to.
    pub fn resolve_shifted(&self, shocked_market: f64, shift: f64) -> (f64, VolatilitySource) {
        match self.instrument_level() {
            Some((level, source)) => ((level + shift).max(0.0), source),
            None => (shocked_market, VolatilitySource::Market),
        }
    }

    /// Highest-priority usable instrument-level volatility.
    fn instrument_level(&self) -> Option<(f64, VolatilitySource)> {
        [
            (self.implied_override, VolatilitySource::ImpliedOverride),
            (self.strategy_leg, VolatilitySource::StrategyLeg),
            (self.stored, VolatilitySource::Instrument),
        ]
        .into_iter()
        .find_map(|(level, source)| level.filter(|v| usable(*v)).map(|v| (v, source)))
    }

    /// Whether any instrument-level volatility is set.
    pub fn is_empty(&self) -> bool {
        self.implied_override.is_none() && self.strategy_leg.is_none() && self.stored.is_none()
    }
}

#[inline]
fn usable(v: f64) -> bool {
    v.is_finite() && v > 0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_priority_order() {
        let all = VolatilityInputs {
            implied_override: Some(0.15),
            strategy_leg: Some(0.10),
            stored: Some(0.12),
        };
        assert_eq!(all.resolve(0.08), (0.15, VolatilitySource::ImpliedOverride));

        let no_override = VolatilityInputs {
            implied_override: None,
            ..all
        };
        assert_eq!(
            no_override.resolve(0.08),
            (0.10, VolatilitySource::StrategyLeg)
        );

        let stored_only = VolatilityInputs {
            stored: Some(0.12),
            ..Default::default()
        };
        assert_eq!(stored_only.resolve(0.08), (0.12, VolatilitySource::Instrument));

        assert_eq!(
            VolatilityInputs::default().resolve(0.08),
            (0.08, VolatilitySource::Market)
        );
    }

    #[test]
    fn test_zero_and_nan_levels_are_skipped() {
        let inputs = VolatilityInputs {
            implied_override: Some(0.0),
            strategy_leg: Some(f64::NAN),
            stored: Some(0.11),
        };
        assert_eq!(inputs.resolve(0.08), (0.11, VolatilitySource::Instrument));
    }

    #[test]
    fn test_resolve_shifted() {
        let leg = VolatilityInputs {
            strategy_leg: Some(0.10),
            ..Default::default()
        };
        let (vol, source) = leg.resolve_shifted(0.13, 0.05);
        assert!((vol - 0.15).abs() < 1e-12);
        assert_eq!(source, VolatilitySource::StrategyLeg);

        let market = VolatilityInputs::default();
        assert_eq!(
            market.resolve_shifted(0.13, 0.05),
            (0.13, VolatilitySource::Market)
        );
    }
}
