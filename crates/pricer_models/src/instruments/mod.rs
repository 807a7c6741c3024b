//! Hedging instrument definitions.
//!
//! This module provides:
//! - [`InstrumentKind`]: closed tagged enumeration of payoff kinds
//! - [`Instrument`]: portfolio record consumed by the pricing engine
//! - [`VolatilityInputs`]: instrument-level volatility levels and the
//!   resolution order every pricer applies
//!
//! # Examples
//!
//! ```
//! use pricer_models::instruments::{InstrumentKind, KnockDirection, OptionType};
//!
//! let kind: InstrumentKind = "Reverse Knock-Out Put".parse().unwrap();
//! assert_eq!(
//!     kind,
//!     InstrumentKind::SingleBarrier {
//!         option: OptionType::Put,
//!         knock: KnockDirection::Out,
//!         reverse: true,
//!     }
//! );
//! assert!(kind.needs_barrier());
//! ```

mod error;
mod instrument;
mod kind;
mod volatility;

pub use error::InstrumentError;
pub use instrument::{Instrument, InstrumentId, DEFAULT_DIGITAL_REBATE};
pub use kind::{DigitalKind, InstrumentKind, KnockDirection, OptionType};
pub use volatility::{VolatilityInputs, VolatilitySource};
