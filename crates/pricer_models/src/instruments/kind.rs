//! Instrument kind taxonomy.
//!
//! [`InstrumentKind`] is the closed set of payoff shapes the engine can
//! value. Labels coming from strategy imports (`"call-knockout"`,
//! `"Knock-Out Call"`, `"One-Touch"`) are parsed once into this enum, and
//! every later decision is an exhaustive `match`.
//!
//! # Examples
//!
//! ```
//! use pricer_models::instruments::{InstrumentKind, KnockDirection, OptionType};
//!
//! let kind: InstrumentKind = "Knock-Out Call".parse().unwrap();
//! assert_eq!(
//!     kind,
//!     InstrumentKind::SingleBarrier {
//!         option: OptionType::Call,
//!         knock: KnockDirection::Out,
//!         reverse: false,
//!     }
//! );
//! assert_eq!(kind.label(), "Knock-Out Call");
//!
//! // Strategy component codes parse to the same kind
//! assert_eq!("call-knockout".parse::<InstrumentKind>().unwrap(), kind);
//! ```

use std::fmt;
use std::str::FromStr;

use super::error::InstrumentError;

/// Option payoff class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum OptionType {
    /// Right to buy the base currency at the strike
    Call,
    /// Right to sell the base currency at the strike
    Put,
}

impl OptionType {
    /// Payoff sign φ: +1 for calls, −1 for puts.
    #[inline]
    pub fn phi(&self) -> f64 {
        match self {
            OptionType::Call => 1.0,
            OptionType::Put => -1.0,
        }
    }

    /// The opposite payoff class.
    #[inline]
    pub fn flip(&self) -> Self {
        match self {
            OptionType::Call => OptionType::Put,
            OptionType::Put => OptionType::Call,
        }
    }

    /// Intrinsic value `max(φ(S − K), 0)`.
    #[inline]
    pub fn intrinsic(&self, spot: f64, strike: f64) -> f64 {
        (self.phi() * (spot - strike)).max(0.0)
    }
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionType::Call => write!(f, "Call"),
            OptionType::Put => write!(f, "Put"),
        }
    }
}

/// Whether a barrier activates or extinguishes the option.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum KnockDirection {
    /// Option comes alive when the barrier is touched
    In,
    /// Option dies when the barrier is touched
    Out,
}

/// Digital (binary) payoff subtypes, all paying a fixed rebate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum DigitalKind {
    /// Pays if the barrier is touched before maturity
    OneTouch,
    /// Pays if the barrier is never touched
    NoTouch,
    /// Pays if either of two barriers is touched
    DoubleTouch,
    /// Pays if neither barrier is touched
    DoubleNoTouch,
    /// Pays if the terminal spot ends between strike and barrier
    RangeBinary,
    /// Pays if the terminal spot ends outside strike and barrier
    OutsideBinary,
}

impl DigitalKind {
    /// Whether the subtype needs a second barrier.
    pub fn needs_second_barrier(&self) -> bool {
        matches!(self, DigitalKind::DoubleTouch | DigitalKind::DoubleNoTouch)
    }

    fn label(&self) -> &'static str {
        match self {
            DigitalKind::OneTouch => "One-Touch",
            DigitalKind::NoTouch => "No-Touch",
            DigitalKind::DoubleTouch => "Double-Touch",
            DigitalKind::DoubleNoTouch => "Double-No-Touch",
            DigitalKind::RangeBinary => "Range Binary",
            DigitalKind::OutsideBinary => "Outside Binary",
        }
    }
}

/// Closed set of hedging instrument kinds.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "snake_case"))]
pub enum InstrumentKind {
    /// Outright forward struck at `strike`
    Forward,
    /// FX swap valued at the outright forward rate
    Swap,
    /// European call
    VanillaCall,
    /// European put
    VanillaPut,
    /// Single continuously monitored barrier
    SingleBarrier {
        /// Call or put payoff
        option: OptionType,
        /// Knock-in or knock-out
        knock: KnockDirection,
        /// Barrier sits on the in-the-money side of the strike
        reverse: bool,
    },
    /// Two barriers bracketing the spot
    DoubleBarrier {
        /// Call or put payoff
        option: OptionType,
        /// Knock-in or knock-out
        knock: KnockDirection,
    },
    /// Fixed-rebate binary payoff
    Digital {
        /// Touch or range condition
        subtype: DigitalKind,
    },
    /// Label that did not map to a known kind; priced only when the
    /// engine's unknown-kind fallback is enabled
    Unrecognized {
        /// Original label
        label: String,
    },
}

impl InstrumentKind {
    /// Human-readable label, as shown in hedging blotters.
    pub fn label(&self) -> String {
        match self {
            InstrumentKind::Forward => "Forward".to_string(),
            InstrumentKind::Swap => "Swap".to_string(),
            InstrumentKind::VanillaCall => "Vanilla Call".to_string(),
            InstrumentKind::VanillaPut => "Vanilla Put".to_string(),
            InstrumentKind::SingleBarrier {
                option,
                knock,
                reverse,
            } => {
                let prefix = if *reverse { "Reverse " } else { "" };
                format!("{}{} {}", prefix, knock_label(*knock), option)
            }
            InstrumentKind::DoubleBarrier { option, knock } => {
                format!("Double {} {}", knock_label(*knock), option)
            }
            InstrumentKind::Digital { subtype } => subtype.label().to_string(),
            InstrumentKind::Unrecognized { label } => label.clone(),
        }
    }

    /// Whether the payoff depends on a barrier (barrier or digital kinds).
    pub fn needs_barrier(&self) -> bool {
        matches!(
            self,
            InstrumentKind::SingleBarrier { .. }
                | InstrumentKind::DoubleBarrier { .. }
                | InstrumentKind::Digital { .. }
        )
    }

    /// Whether the payoff needs a second barrier.
    pub fn needs_second_barrier(&self) -> bool {
        match self {
            InstrumentKind::DoubleBarrier { .. } => true,
            InstrumentKind::Digital { subtype } => subtype.needs_second_barrier(),
            _ => false,
        }
    }

    /// Whether the value may be negative (forwards and swaps).
    pub fn is_linear(&self) -> bool {
        matches!(self, InstrumentKind::Forward | InstrumentKind::Swap)
    }
}

fn knock_label(knock: KnockDirection) -> &'static str {
    match knock {
        KnockDirection::In => "Knock-In",
        KnockDirection::Out => "Knock-Out",
    }
}

impl fmt::Display for InstrumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label())
    }
}

impl FromStr for InstrumentKind {
    type Err = InstrumentError;

    /// Parses strategy component codes and blotter labels.
    ///
    /// Matching works on a normalised token (lowercase, separators removed)
    /// and decomposes it into barrier, digital and vanilla components, so
    /// `"Knock-Out Call"` and `"call-knockout"` resolve identically.
    fn from_str(s: &str) -> Result<Self, InstrumentError> {
        let token: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect();
        let unknown = || InstrumentError::UnknownKind {
            label: s.to_string(),
        };

        let knock = if token.contains("knockout") {
            Some(KnockDirection::Out)
        } else if token.contains("knockin") {
            Some(KnockDirection::In)
        } else {
            None
        };

        if let Some(knock) = knock {
            let option = option_in(&token).ok_or_else(unknown)?;
            if token.contains("double") {
                return Ok(InstrumentKind::DoubleBarrier { option, knock });
            }
            return Ok(InstrumentKind::SingleBarrier {
                option,
                knock,
                reverse: token.contains("reverse"),
            });
        }

        let digital = match token.as_str() {
            "onetouch" => Some(DigitalKind::OneTouch),
            "notouch" => Some(DigitalKind::NoTouch),
            "doubletouch" => Some(DigitalKind::DoubleTouch),
            "doublenotouch" => Some(DigitalKind::DoubleNoTouch),
            "rangebinary" => Some(DigitalKind::RangeBinary),
            "outsidebinary" => Some(DigitalKind::OutsideBinary),
            _ => None,
        };
        if let Some(subtype) = digital {
            return Ok(InstrumentKind::Digital { subtype });
        }

        match token.as_str() {
            "call" | "vanillacall" => Ok(InstrumentKind::VanillaCall),
            "put" | "vanillaput" => Ok(InstrumentKind::VanillaPut),
            "forward" | "fxforward" | "outrightforward" => Ok(InstrumentKind::Forward),
            "swap" | "fxswap" => Ok(InstrumentKind::Swap),
            _ => Err(unknown()),
        }
    }
}

fn option_in(token: &str) -> Option<OptionType> {
    match (token.contains("call"), token.contains("put")) {
        (true, false) => Some(OptionType::Call),
        (false, true) => Some(OptionType::Put),
        _ => None,
    }
}
