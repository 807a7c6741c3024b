//! Market shocks and named stress scenarios.
//!
//! - `MarketShock`: relative spot move plus absolute volatility move
//! - `Scenario`: named collection of per-pair shocks with an optional
//!   shock for every other pair

use std::collections::BTreeMap;

use pricer_core::market_data::{MarketSet, MarketSnapshot};
use pricer_core::types::CurrencyPair;

/// Shock to one market snapshot.
///
/// # Examples
///
/// ```
/// use pricer_core::market_data::MarketSnapshot;
/// use pricer_core::types::Date;
/// use pricer_risk::scenarios::MarketShock;
///
/// let base = MarketSnapshot::new(1.10, 0.05, 0.04, 0.08, Date::from_ymd(2024, 6, 3).unwrap()).unwrap();
/// let shocked = MarketShock::new(-0.10, 0.05).apply(&base);
/// assert!((shocked.spot - 0.99).abs() < 1e-12);
/// assert!((shocked.volatility - 0.13).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct MarketShock {
    /// Relative spot move (`0.10` = +10%)
    pub spot: f64,
    /// Absolute volatility move (`0.05` = +5 points)
    pub volatility: f64,
}

impl MarketShock {
    /// No move.
    pub const NONE: Self = Self {
        spot: 0.0,
        volatility: 0.0,
    };

    /// Creates a shock.
    pub fn new(spot: f64, volatility: f64) -> Self {
        Self { spot, volatility }
    }

    /// Spot-only shock.
    pub fn spot(relative: f64) -> Self {
        Self::new(relative, 0.0)
    }

    /// Whether the shock leaves a snapshot unchanged.
    #[inline]
    pub fn is_none(&self) -> bool {
        self.spot == 0.0 && self.volatility == 0.0
    }

    /// Shocked copy of `snapshot`; volatility is floored at zero.
    #[inline]
    pub fn apply(&self, snapshot: &MarketSnapshot) -> MarketSnapshot {
        snapshot.shocked(self.spot, self.volatility)
    }
}

/// Named stress scenario.
///
/// Pairs listed explicitly take their own shock; every other pair takes
/// the uniform shock, if any.
///
/// # Examples
///
/// ```
/// use pricer_core::market_data::MarketSet;
/// use pricer_core::types::Date;
/// use pricer_risk::scenarios::{MarketShock, Scenario};
///
/// let base = MarketSet::reference(Date::from_ymd(2024, 6, 3).unwrap());
/// let eurusd = "EURUSD".parse().unwrap();
/// let scenario = Scenario::new("EUR/USD down")
///     .with_shock(eurusd, MarketShock::spot(-0.05));
///
/// let shocked = scenario.apply(&base);
/// let ratio = shocked.get(&eurusd).unwrap().spot / base.get(&eurusd).unwrap().spot;
/// assert!((ratio - 0.95).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Scenario {
    name: String,
    #[cfg_attr(feature = "serde", serde(default))]
    description: String,
    #[cfg_attr(feature = "serde", serde(default))]
    shocks: BTreeMap<CurrencyPair, MarketShock>,
    #[cfg_attr(feature = "serde", serde(default))]
    uniform: Option<MarketShock>,
}

impl Scenario {
    /// Creates an empty scenario.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Scenario applying the same shock to every pair.
    pub fn uniform(name: impl Into<String>, shock: MarketShock) -> Self {
        Self::new(name).with_uniform(shock)
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Sets the shock of one pair.
    pub fn with_shock(mut self, pair: CurrencyPair, shock: MarketShock) -> Self {
        self.shocks.insert(pair, shock);
        self
    }

    /// Sets the shock applied to pairs without their own.
    pub fn with_uniform(mut self, shock: MarketShock) -> Self {
        self.uniform = Some(shock);
        self
    }

    /// Scenario name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Scenario description.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Explicit per-pair shocks, in pair order.
    pub fn shocks(&self) -> impl Iterator<Item = (&CurrencyPair, &MarketShock)> {
        self.shocks.iter()
    }

    /// Shock applied to `pair`.
    pub fn shock_for(&self, pair: &CurrencyPair) -> MarketShock {
        self.shocks
            .get(pair)
            .copied()
            .or(self.uniform)
            .unwrap_or(MarketShock::NONE)
    }

    /// Shocked copy of `markets`.
    pub fn apply(&self, markets: &MarketSet) -> MarketSet {
        markets.map(|pair, snapshot| self.shock_for(pair).apply(snapshot))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use pricer_core::types::Date;

    fn base() -> MarketSet {
        MarketSet::reference(Date::from_ymd(2024, 6, 3).unwrap())
    }

    fn pair(code: &str) -> CurrencyPair {
        code.parse().unwrap()
    }

    #[test]
    fn test_explicit_shock_overrides_uniform() {
        let scenario = Scenario::uniform("all up", MarketShock::spot(0.02))
            .with_shock(pair("USDJPY"), MarketShock::new(-0.03, 0.01));
        assert_eq!(scenario.shock_for(&pair("USDJPY")), MarketShock::new(-0.03, 0.01));
        assert_eq!(scenario.shock_for(&pair("GBPUSD")), MarketShock::spot(0.02));
    }

    #[test]
    fn test_unlisted_pairs_unchanged_without_uniform() {
        let scenario = Scenario::new("one").with_shock(pair("EURUSD"), MarketShock::spot(0.1));
        let base = base();
        let shocked = scenario.apply(&base);
        assert_eq!(shocked.get(&pair("GBPUSD")), base.get(&pair("GBPUSD")));
        assert_relative_eq!(
            shocked.get(&pair("EURUSD")).unwrap().spot,
            1.0856 * 1.1,
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_volatility_floor() {
        let shocked = Scenario::uniform("vol crush", MarketShock::new(0.0, -1.0)).apply(&base());
        assert!(shocked.iter().all(|(_, s)| s.volatility == 0.0));
    }

    #[test]
    fn test_shock_none() {
        assert!(MarketShock::NONE.is_none());
        assert!(!MarketShock::spot(0.01).is_none());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_scenario_from_json() {
        let json = r#"{"name":"custom","shocks":{"EURUSD":{"spot":-0.05}}}"#;
        let scenario: Scenario = serde_json::from_str(json).unwrap();
        assert_eq!(scenario.name(), "custom");
        assert_eq!(scenario.shock_for(&pair("EURUSD")), MarketShock::spot(-0.05));
        assert_eq!(scenario.shock_for(&pair("GBPUSD")), MarketShock::NONE);
    }
}
