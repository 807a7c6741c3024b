//! Identifier types for portfolio entities.
//!
//! Instruments carry [`InstrumentId`](pricer_models::instruments::InstrumentId);
//! the newtypes here name the strategies they are imported from and the
//! commercial exposures they hedge.

use std::fmt;

/// Identifier of an imported hedging strategy.
///
/// # Examples
///
/// ```
/// use pricer_risk::portfolio::StrategyId;
///
/// let id = StrategyId::new("STRAT-7");
/// assert_eq!(id.as_str(), "STRAT-7");
/// assert_eq!(id.instrument_id(2).as_str(), "STRAT-7-2");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct StrategyId(String);

impl StrategyId {
    /// Creates a new strategy ID.
    #[inline]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the ID as a string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Identifier of the `n`-th (1-based) instrument of this strategy.
    pub fn instrument_id(&self, n: usize) -> pricer_models::instruments::InstrumentId {
        pricer_models::instruments::InstrumentId::new(format!("{}-{}", self.0, n))
    }
}

impl fmt::Display for StrategyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for StrategyId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for StrategyId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Identifier of a commercial exposure.
///
/// # Examples
///
/// ```
/// use pricer_risk::portfolio::ExposureId;
///
/// let id = ExposureId::new("EXP-001");
/// assert_eq!(format!("{}", id), "EXP-001");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ExposureId(String);

impl ExposureId {
    /// Creates a new exposure ID.
    #[inline]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the ID as a string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ExposureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ExposureId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for ExposureId {
    fn from(s: String) -> Self {
        Self(s)
    }
}
