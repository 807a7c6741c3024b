//! Preset stress scenarios for FX hedging books.
//!
//! Each preset inspects the pairs of a market set and assigns a spot (and
//! possibly volatility) shock depending on which side of the pair the
//! stressed currency sits.

use pricer_core::market_data::MarketSet;
use pricer_core::types::{Currency, CurrencyPair};

use super::shocks::{MarketShock, Scenario};

/// USD appreciation used by [`PresetScenario::UsdStrength`].
pub const USD_STRENGTH_MOVE: f64 = 0.10;

/// EUR depreciation used by [`PresetScenario::EurCrisis`].
pub const EUR_CRISIS_MOVE: f64 = 0.15;

/// Volatility added to EUR pairs in [`PresetScenario::EurCrisis`].
pub const EUR_CRISIS_VOL_SHOCK: f64 = 0.05;

/// Safe-haven appreciation used by [`PresetScenario::RiskOff`].
pub const RISK_OFF_MOVE: f64 = 0.05;

/// Currencies treated as safe havens in [`PresetScenario::RiskOff`].
pub const SAFE_HAVENS: [Currency; 3] = [Currency::USD, Currency::CHF, Currency::JPY];

/// Built-in stress scenarios.
///
/// # Examples
///
/// ```
/// use pricer_core::market_data::MarketSet;
/// use pricer_core::types::Date;
/// use pricer_risk::scenarios::PresetScenario;
///
/// let base = MarketSet::reference(Date::from_ymd(2024, 6, 3).unwrap());
/// let scenario = PresetScenario::UsdStrength.scenario(&base);
///
/// // EUR/USD falls, USD/JPY rises
/// assert_eq!(scenario.shock_for(&"EURUSD".parse().unwrap()).spot, -0.10);
/// assert_eq!(scenario.shock_for(&"USDJPY".parse().unwrap()).spot, 0.10);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum PresetScenario {
    /// USD appreciates 10% against every currency
    UsdStrength,
    /// EUR depreciates 15% with EUR volatility up 5 points
    EurCrisis,
    /// USD, CHF and JPY appreciate 5% against risk currencies
    RiskOff,
}

impl PresetScenario {
    /// All presets.
    pub fn all() -> [Self; 3] {
        [Self::UsdStrength, Self::EurCrisis, Self::RiskOff]
    }

    /// Display name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::UsdStrength => "USD Strength",
            Self::EurCrisis => "EUR Crisis",
            Self::RiskOff => "Risk-Off",
        }
    }

    /// One-line description.
    pub fn description(&self) -> &'static str {
        match self {
            Self::UsdStrength => "10% USD appreciation across all pairs",
            Self::EurCrisis => "15% EUR depreciation with increased volatility",
            Self::RiskOff => "Flight to safe havens (USD, CHF, JPY)",
        }
    }

    /// Concrete scenario over the pairs of `markets`.
    pub fn scenario(&self, markets: &MarketSet) -> Scenario {
        markets
            .iter()
            .filter_map(|(pair, _)| self.shock(pair).map(|shock| (*pair, shock)))
            .fold(
                Scenario::new(self.name()).with_description(self.description()),
                |scenario, (pair, shock)| scenario.with_shock(pair, shock),
            )
    }

    fn shock(&self, pair: &CurrencyPair) -> Option<MarketShock> {
        let (base, quote) = (pair.base(), pair.quote());
        match self {
            Self::UsdStrength => {
                if quote == Currency::USD {
                    Some(MarketShock::spot(-USD_STRENGTH_MOVE))
                } else if base == Currency::USD {
                    Some(MarketShock::spot(USD_STRENGTH_MOVE))
                } else {
                    None
                }
            }
            Self::EurCrisis => {
                if base == Currency::EUR {
                    Some(MarketShock::new(-EUR_CRISIS_MOVE, EUR_CRISIS_VOL_SHOCK))
                } else if quote == Currency::EUR {
                    Some(MarketShock::new(EUR_CRISIS_MOVE, EUR_CRISIS_VOL_SHOCK))
                } else {
                    None
                }
            }
            Self::RiskOff => {
                let safe = |c: Currency| SAFE_HAVENS.contains(&c);
                match (safe(base), safe(quote)) {
                    (true, false) => Some(MarketShock::spot(RISK_OFF_MOVE)),
                    (false, true) => Some(MarketShock::spot(-RISK_OFF_MOVE)),
                    _ => None,
                }
            }
        }
    }
}

impl std::fmt::Display for PresetScenario {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for PresetScenario {
    type Err = String;

    /// Accepts `usd-strength`, `eur-crisis` and `risk-off`, case-insensitive,
    /// with spaces, hyphens or underscores.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .flat_map(char::to_lowercase)
            .collect();
        match key.as_str() {
            "usdstrength" => Ok(Self::UsdStrength),
            "eurcrisis" => Ok(Self::EurCrisis),
            "riskoff" => Ok(Self::RiskOff),
            _ => Err(format!("unknown stress preset: {s}")),
        }
    }
}
