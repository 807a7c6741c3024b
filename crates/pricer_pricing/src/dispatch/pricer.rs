//! Instrument pricing dispatcher.
//!
//! Maps an [`Instrument`]'s kind to its pricer, assembles barrier levels,
//! rebate and effective volatility, and applies the engine's degenerate
//! input policy:
//!
//! | Condition                         | Result                              |
//! |-----------------------------------|-------------------------------------|
//! | `t ≤ 0`                           | 0, no diagnostic                    |
//! | missing strike/barrier            | `MissingField`                      |
//! | `S ≤ 0`, `K ≤ 0`, `σ = 0`         | `DegenerateInput`                   |
//! | closed form fails or is non-finite| Monte Carlo fallback (barriers)     |
//! | unrecognised kind                 | `UnknownKind`, or vanilla call when enabled |
//!
//! [`InstrumentPricer::price`] turns every error into `0` with a `warn!`
//! so a portfolio pass never aborts on one instrument.

use std::fmt;

use pricer_core::market_data::MarketSnapshot;
use pricer_core::types::year_fraction;
use pricer_models::analytical::{
    double_barrier_price, forward_value, fx_option_price, single_barrier_price, swap_value,
    AnalyticalError, BarrierParams, DoubleBarrierParams,
};
use pricer_models::instruments::{
    DigitalKind, Instrument, InstrumentKind, KnockDirection, OptionType, VolatilitySource,
};
use tracing::{debug, trace, warn};

use super::config::EngineConfig;
use crate::error::PricingError;
use crate::mc::{
    price_barrier_mc, price_digital_mc, price_vanilla_mc, BarrierPayoff, CancellationToken,
    DigitalPayoff, GbmParams, McEstimate,
};

/// How a price was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum PriceMethod {
    /// Maturity on or before the valuation date
    Expired,
    /// Closed-form formula
    ClosedForm,
    /// Monte Carlo as the primary method
    MonteCarlo,
    /// Monte Carlo after the closed form failed
    MonteCarloFallback,
    /// Double barrier already breached at valuation
    AlreadyKnocked,
    /// Unrecognised kind priced as a vanilla call
    UnknownKindFallback,
}

impl fmt::Display for PriceMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            PriceMethod::Expired => "expired",
            PriceMethod::ClosedForm => "closed-form",
            PriceMethod::MonteCarlo => "monte-carlo",
            PriceMethod::MonteCarloFallback => "monte-carlo-fallback",
            PriceMethod::AlreadyKnocked => "already-knocked",
            PriceMethod::UnknownKindFallback => "unknown-kind-fallback",
        };
        f.write_str(s)
    }
}

/// Result of pricing one instrument, per unit of notional.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PricingOutcome {
    /// Theoretical price per unit of notional
    pub price: f64,
    /// Pricing method used
    pub method: PriceMethod,
    /// Effective volatility
    pub volatility: f64,
    /// Where the volatility came from
    pub volatility_source: VolatilitySource,
    /// Time to maturity in years
    pub expiry: f64,
    /// Monte Carlo standard error, when simulated
    pub std_error: Option<f64>,
}

/// Per-call market inputs after guards.
#[derive(Clone, Copy)]
struct Inputs {
    spot: f64,
    rate_domestic: f64,
    rate_foreign: f64,
    volatility: f64,
    expiry: f64,
}

impl Inputs {
    fn gbm(&self) -> GbmParams {
        GbmParams::new(
            self.spot,
            self.rate_domestic,
            self.rate_foreign,
            self.volatility,
            self.expiry,
        )
    }

    fn vanilla(&self, option: OptionType, strike: f64) -> Result<f64, AnalyticalError> {
        fx_option_price(
            option,
            self.spot,
            strike,
            self.rate_domestic,
            self.rate_foreign,
            self.expiry,
            self.volatility,
        )
    }
}

/// Price, method and optional standard error.
type Priced = (f64, PriceMethod, Option<f64>);

fn from_mc(estimate: McEstimate, method: PriceMethod) -> Priced {
    (estimate.price, method, Some(estimate.std_error))
}

/// Prices instruments against market snapshots.
///
/// # Examples
///
/// ```
/// use pricer_core::market_data::MarketSnapshot;
/// use pricer_core::types::Date;
/// use pricer_models::instruments::{Instrument, InstrumentKind};
/// use pricer_pricing::{InstrumentPricer, PriceMethod};
///
/// let valuation = Date::from_ymd(2024, 1, 2).unwrap();
/// let market = MarketSnapshot::new(1.0850, 0.01, 0.005, 0.20, valuation).unwrap();
/// let call = Instrument::new(
///     "C-1",
///     InstrumentKind::VanillaCall,
///     "EURUSD".parse().unwrap(),
///     1_000_000.0,
///     Date::from_ymd(2025, 1, 1).unwrap(),
/// )
/// .with_strike(1.0850);
///
/// let pricer = InstrumentPricer::default();
/// let outcome = pricer.try_price(&call, &market).unwrap();
/// assert_eq!(outcome.method, PriceMethod::ClosedForm);
/// assert!((outcome.price - 0.0885).abs() < 1e-3);
/// ```
#[derive(Debug, Clone, Default)]
pub struct InstrumentPricer {
    config: EngineConfig,
    cancel: Option<CancellationToken>,
}

impl InstrumentPricer {
    /// Creates a pricer with the given configuration.
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            cancel: None,
        }
    }

    /// Attaches a cancellation token checked between Monte Carlo batches.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Returns the engine configuration.
    #[inline]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Prices an instrument; any failure prices to `0` with a warning.
    pub fn price(&self, instrument: &Instrument, market: &MarketSnapshot) -> f64 {
        match self.try_price(instrument, market) {
            Ok(outcome) => outcome.price,
            Err(err) => {
                warn!(
                    instrument_id = %instrument.id,
                    kind = %instrument.kind,
                    reason = %err,
                    "pricing failed, using zero price"
                );
                0.0
            }
        }
    }

    /// Prices an instrument, reporting failures as [`PricingError`].
    pub fn try_price(
        &self,
        instrument: &Instrument,
        market: &MarketSnapshot,
    ) -> Result<PricingOutcome, PricingError> {
        self.try_price_shifted(instrument, market, 0.0)
    }

    /// Prices against a shocked market whose volatility moved by
    /// `vol_shift`; instrument-level volatilities move by the same amount.
    pub fn try_price_shifted(
        &self,
        instrument: &Instrument,
        market: &MarketSnapshot,
        vol_shift: f64,
    ) -> Result<PricingOutcome, PricingError> {
        let expiry = year_fraction(market.valuation_date, instrument.maturity);
        let (volatility, volatility_source) = instrument
            .volatility
            .resolve_shifted(market.volatility, vol_shift);

        if expiry <= 0.0 {
            trace!(instrument_id = %instrument.id, "expired");
            return Ok(PricingOutcome {
                price: 0.0,
                method: PriceMethod::Expired,
                volatility,
                volatility_source,
                expiry: 0.0,
                std_error: None,
            });
        }
        if !(market.spot > 0.0 && market.spot.is_finite()) {
            return Err(PricingError::DegenerateInput {
                reason: format!("spot {} is not positive", market.spot),
            });
        }

        let inputs = Inputs {
            spot: market.spot,
            rate_domestic: market.domestic_rate,
            rate_foreign: market.foreign_rate,
            volatility,
            expiry,
        };

        let (price, method, std_error) = match &instrument.kind {
            InstrumentKind::SingleBarrier {
                option,
                knock,
                reverse,
            } => self.single_barrier(instrument, &inputs, *option, *knock, *reverse)?,
            InstrumentKind::DoubleBarrier { option, knock } => {
                self.double_barrier(instrument, &inputs, *option, *knock)?
            }
            InstrumentKind::Digital { subtype } => self.digital(instrument, &inputs, *subtype)?,
            InstrumentKind::VanillaCall => self.vanilla(instrument, &inputs, OptionType::Call)?,
            InstrumentKind::VanillaPut => self.vanilla(instrument, &inputs, OptionType::Put)?,
            InstrumentKind::Forward => {
                let strike = require_strike(instrument)?;
                let value = forward_value(
                    inputs.spot,
                    strike,
                    inputs.rate_domestic,
                    inputs.rate_foreign,
                    expiry,
                );
                (value, PriceMethod::ClosedForm, None)
            }
            InstrumentKind::Swap => {
                let value = swap_value(inputs.spot, inputs.rate_domestic, inputs.rate_foreign, expiry);
                (value, PriceMethod::ClosedForm, None)
            }
            InstrumentKind::Unrecognized { label } => {
                if !self.config.fallback_unknown_kind_to_call {
                    return Err(PricingError::UnknownKind {
                        label: label.clone(),
                    });
                }
                warn!(
                    instrument_id = %instrument.id,
                    label = %label,
                    "unrecognised instrument kind priced as a vanilla call"
                );
                let strike = require_option_inputs(instrument, &inputs)?;
                (
                    inputs.vanilla(OptionType::Call, strike)?,
                    PriceMethod::UnknownKindFallback,
                    None,
                )
            }
        };

        if !price.is_finite() {
            return Err(PricingError::NumericalInstability {
                message: format!("{} produced a non-finite price", method),
            });
        }

        debug!(
            instrument_id = %instrument.id,
            kind = %instrument.kind,
            price,
            method = %method,
            volatility,
            expiry,
            "priced instrument"
        );

        Ok(PricingOutcome {
            price,
            method,
            volatility,
            volatility_source,
            expiry,
            std_error,
        })
    }

    fn single_barrier(
        &self,
        instrument: &Instrument,
        inputs: &Inputs,
        option: OptionType,
        knock: KnockDirection,
        reverse: bool,
    ) -> Result<Priced, PricingError> {
        let barrier = require_barrier(instrument, instrument.barrier1, "barrier")?;
        let strike = require_option_inputs(instrument, inputs)?;

        let closed = BarrierParams::new(
            inputs.spot,
            strike,
            barrier,
            inputs.rate_domestic,
            inputs.rate_foreign,
            inputs.volatility,
            inputs.expiry,
        )
        .and_then(|params| single_barrier_price(option, knock, reverse, &params));

        match closed {
            Ok(price) => Ok((price, PriceMethod::ClosedForm, None)),
            Err(err) => {
                warn!(
                    instrument_id = %instrument.id,
                    reason = %err,
                    "single-barrier closed form inapplicable, falling back to Monte Carlo"
                );
                let payoff = BarrierPayoff::Single {
                    option,
                    knock,
                    reverse,
                    strike,
                    barrier,
                };
                self.barrier_mc(&payoff, inputs)
            }
        }
    }

    fn double_barrier(
        &self,
        instrument: &Instrument,
        inputs: &Inputs,
        option: OptionType,
        knock: KnockDirection,
    ) -> Result<Priced, PricingError> {
        let first = require_barrier(instrument, instrument.barrier1, "barrier")?;
        let second = require_barrier(instrument, instrument.barrier2, "second barrier")?;
        let strike = require_option_inputs(instrument, inputs)?;
        let (lower, upper) = (first.min(second), first.max(second));

        if inputs.spot <= lower || inputs.spot >= upper {
            debug!(
                instrument_id = %instrument.id,
                spot = inputs.spot,
                lower,
                upper,
                "double barrier already breached"
            );
            let price = match knock {
                KnockDirection::Out => 0.0,
                KnockDirection::In => inputs.vanilla(option, strike)?,
            };
            return Ok((price, PriceMethod::AlreadyKnocked, None));
        }

        let closed = DoubleBarrierParams::new(
            inputs.spot,
            strike,
            lower,
            upper,
            inputs.rate_domestic,
            inputs.rate_foreign,
            inputs.volatility,
            inputs.expiry,
        )
        .and_then(|params| {
            double_barrier_price(option, knock, &params, self.config.double_barrier_terms)
        });

        match closed {
            Ok(price) => Ok((price, PriceMethod::ClosedForm, None)),
            Err(err) => {
                warn!(
                    instrument_id = %instrument.id,
                    reason = %err,
                    "double-barrier closed form inapplicable, falling back to Monte Carlo"
                );
                let payoff = BarrierPayoff::Double {
                    option,
                    knock,
                    strike,
                    lower,
                    upper,
                };
                self.barrier_mc(&payoff, inputs)
            }
        }
    }

    fn barrier_mc(&self, payoff: &BarrierPayoff, inputs: &Inputs) -> Result<Priced, PricingError> {
        let config = self.config.monte_carlo.barrier_config(inputs.expiry)?;
        let estimate = price_barrier_mc(payoff, &inputs.gbm(), &config, self.cancel.as_ref())?;
        Ok(from_mc(estimate, PriceMethod::MonteCarloFallback))
    }

    fn digital(
        &self,
        instrument: &Instrument,
        inputs: &Inputs,
        subtype: DigitalKind,
    ) -> Result<Priced, PricingError> {
        let barrier = require_barrier(instrument, instrument.barrier1, "barrier")?;
        let second = match subtype {
            DigitalKind::OneTouch | DigitalKind::NoTouch => None,
            DigitalKind::DoubleTouch | DigitalKind::DoubleNoTouch => Some(require_barrier(
                instrument,
                instrument.barrier2,
                "second barrier",
            )?),
            DigitalKind::RangeBinary | DigitalKind::OutsideBinary => {
                let level = instrument
                    .strike
                    .or(instrument.barrier2)
                    .ok_or_else(|| missing(instrument, "strike"))?;
                Some(require_barrier(instrument, Some(level), "strike")?)
            }
        };
        require_volatility(inputs)?;

        let payoff = DigitalPayoff::new(subtype, barrier, second, instrument.rebate_or_default())?;
        let config = self.config.monte_carlo.digital_config(inputs.expiry)?;
        let estimate = price_digital_mc(&payoff, &inputs.gbm(), &config, self.cancel.as_ref())?;
        Ok(from_mc(estimate, PriceMethod::MonteCarlo))
    }

    fn vanilla(
        &self,
        instrument: &Instrument,
        inputs: &Inputs,
        option: OptionType,
    ) -> Result<Priced, PricingError> {
        let strike = require_option_inputs(instrument, inputs)?;
        if self.config.vanilla_monte_carlo {
            let config = self.config.monte_carlo.vanilla_config()?;
            let estimate =
                price_vanilla_mc(option, strike, &inputs.gbm(), &config, self.cancel.as_ref())?;
            return Ok(from_mc(estimate, PriceMethod::MonteCarlo));
        }
        Ok((inputs.vanilla(option, strike)?, PriceMethod::ClosedForm, None))
    }
}

fn missing(instrument: &Instrument, field: &'static str) -> PricingError {
    PricingError::MissingField {
        field,
        kind: instrument.kind.label(),
    }
}

fn require_strike(instrument: &Instrument) -> Result<f64, PricingError> {
    let strike = instrument.strike.ok_or_else(|| missing(instrument, "strike"))?;
    if !(strike > 0.0 && strike.is_finite()) {
        return Err(PricingError::DegenerateInput {
            reason: format!("strike {} is not positive", strike),
        });
    }
    Ok(strike)
}

fn require_barrier(
    instrument: &Instrument,
    level: Option<f64>,
    field: &'static str,
) -> Result<f64, PricingError> {
    let level = level.ok_or_else(|| missing(instrument, field))?;
    if !(level > 0.0 && level.is_finite()) {
        return Err(PricingError::DegenerateInput {
            reason: format!("{} {} is not positive", field, level),
        });
    }
    Ok(level)
}

fn require_volatility(inputs: &Inputs) -> Result<(), PricingError> {
    if !(inputs.volatility > 0.0 && inputs.volatility.is_finite()) {
        return Err(PricingError::DegenerateInput {
            reason: format!("volatility {} is not positive", inputs.volatility),
        });
    }
    Ok(())
}

/// Strike plus the σ guard shared by every option kind.
fn require_option_inputs(instrument: &Instrument, inputs: &Inputs) -> Result<f64, PricingError> {
    let strike = require_strike(instrument)?;
    require_volatility(inputs)?;
    Ok(strike)
}

/// Prices an instrument with the default engine; failures price to `0`.
///
/// # Examples
///
/// ```
/// use pricer_core::market_data::MarketSnapshot;
/// use pricer_core::types::Date;
/// use pricer_models::instruments::{Instrument, InstrumentKind};
/// use pricer_pricing::price_instrument;
///
/// let valuation = Date::from_ymd(2024, 6, 3).unwrap();
/// let market = MarketSnapshot::new(1.0850, 0.01, 0.005, 0.10, valuation).unwrap();
///
/// // Matured on the valuation date
/// let expired = Instrument::new("F-1", InstrumentKind::Forward, "EURUSD".parse().unwrap(), 1e6, valuation)
///     .with_strike(1.05);
/// assert_eq!(price_instrument(&expired, &market), 0.0);
/// ```
pub fn price_instrument(instrument: &Instrument, market: &MarketSnapshot) -> f64 {
    InstrumentPricer::default().price(instrument, market)
}

/// Prices an instrument with the default engine, reporting failures.
pub fn try_price_instrument(
    instrument: &Instrument,
    market: &MarketSnapshot,
) -> Result<PricingOutcome, PricingError> {
    InstrumentPricer::default().try_price(instrument, market)
}
