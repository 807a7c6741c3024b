//! Garman-Kohlhagen model for FX option pricing.
//!
//! This module provides the Garman-Kohlhagen closed-form solution for pricing
//! European FX options, together with forward and swap valuation.
//!
//! # Mathematical Background
//!
//! - S: spot exchange rate (domestic per foreign)
//! - K: strike price
//! - rd: domestic risk-free rate (continuous compounding)
//! - rf: foreign risk-free rate (continuous compounding)
//! - σ: volatility of the exchange rate
//! - T: time to maturity in years
//!
//! ## Call Option Price
//! C = S * e^(-rf*T) * N(d1) - K * e^(-rd*T) * N(d2)
//!
//! ## Put Option Price
//! P = K * e^(-rd*T) * N(-d2) - S * e^(-rf*T) * N(-d1)
//!
//! where:
//! d1 = [ln(S/K) + (rd - rf + σ²/2) * T] / (σ * √T)
//! d2 = d1 - σ * √T
//!
//! # Examples
//!
//! ```
//! use pricer_models::analytical::garman_kohlhagen::{
//!     GarmanKohlhagen, GarmanKohlhagenParams,
//! };
//! use pricer_models::instruments::OptionType;
//!
//! let params = GarmanKohlhagenParams::new(
//!     1.0850, // spot
//!     1.0850, // strike
//!     0.01,   // domestic rate
//!     0.005,  // foreign rate
//!     0.20,   // volatility
//!     1.0,    // expiry
//! ).unwrap();
//!
//! let model = GarmanKohlhagen::new(params);
//! let call = model.price(OptionType::Call);
//! let put = model.price(OptionType::Put);
//!
//! let parity = call - put - (1.0850 * (-0.005_f64).exp() - 1.0850 * (-0.01_f64).exp());
//! assert!(parity.abs() < 1e-10);
//! ```

use num_traits::Float;
use pricer_core::math::{lit, norm_cdf, norm_pdf};

use super::error::AnalyticalError;
use crate::instruments::OptionType;

/// Parameters for the Garman-Kohlhagen model.
///
/// # Type Parameters
///
/// * `T` - Floating-point type implementing `Float`
#[derive(Debug, Clone, Copy)]
pub struct GarmanKohlhagenParams<T: Float> {
    /// Spot exchange rate (domestic per foreign).
    pub spot: T,
    /// Strike price.
    pub strike: T,
    /// Domestic risk-free rate (continuous compounding).
    pub rate_domestic: T,
    /// Foreign risk-free rate (continuous compounding).
    pub rate_foreign: T,
    /// Volatility of the exchange rate.
    pub volatility: T,
    /// Time to expiry in years.
    pub expiry: T,
}

impl<T: Float> GarmanKohlhagenParams<T> {
    /// Creates new Garman-Kohlhagen parameters.
    ///
    /// # Errors
    ///
    /// - `InvalidSpot` / `InvalidStrike` for non-positive levels
    /// - `InvalidVolatility` for non-positive volatility
    /// - `Expired` for non-positive expiry
    pub fn new(
        spot: T,
        strike: T,
        rate_domestic: T,
        rate_foreign: T,
        volatility: T,
        expiry: T,
    ) -> Result<Self, AnalyticalError> {
        if !(spot > T::zero()) {
            return Err(AnalyticalError::InvalidSpot {
                spot: to_f64(spot),
            });
        }
        if !(strike > T::zero()) {
            return Err(AnalyticalError::InvalidStrike {
                strike: to_f64(strike),
            });
        }
        if !(volatility > T::zero()) {
            return Err(AnalyticalError::InvalidVolatility {
                volatility: to_f64(volatility),
            });
        }
        if !(expiry > T::zero()) {
            return Err(AnalyticalError::Expired {
                expiry: to_f64(expiry),
            });
        }

        Ok(Self {
            spot,
            strike,
            rate_domestic,
            rate_foreign,
            volatility,
            expiry,
        })
    }

    /// Returns the forward exchange rate.
    ///
    /// F = S * exp((rd - rf) * T)
    #[inline]
    pub fn forward(&self) -> T {
        forward_rate(self.spot, self.rate_domestic, self.rate_foreign, self.expiry)
    }
}

#[inline]
pub(crate) fn to_f64<T: Float>(value: T) -> f64 {
    value.to_f64().unwrap_or(f64::NAN)
}

/// Garman-Kohlhagen sensitivities for one option.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GarmanKohlhagenGreeks<T: Float> {
    /// ∂V/∂S
    pub delta: T,
    /// ∂²V/∂S²
    pub gamma: T,
    /// Per 1% volatility change
    pub vega: T,
    /// Per calendar day
    pub theta: T,
    /// Per 1% domestic rate change
    pub rho_domestic: T,
    /// Per 1% foreign rate change
    pub rho_foreign: T,
}

/// Garman-Kohlhagen model for FX option pricing.
///
/// Provides closed-form solutions for European FX options including
/// price and Greeks calculations.
#[derive(Debug, Clone)]
pub struct GarmanKohlhagen<T: Float> {
    params: GarmanKohlhagenParams<T>,
    d1: T,
    d2: T,
    sqrt_t: T,
    /// e^(-rd * T)
    df_domestic: T,
    /// e^(-rf * T)
    df_foreign: T,
}

impl<T: Float> GarmanKohlhagen<T> {
    /// Creates a new model instance, pre-computing d1, d2 and discount factors.
    pub fn new(params: GarmanKohlhagenParams<T>) -> Self {
        let sqrt_t = params.expiry.sqrt();
        let vol_sqrt_t = params.volatility * sqrt_t;

        let log_sk = (params.spot / params.strike).ln();
        let drift = params.rate_domestic - params.rate_foreign
            + params.volatility * params.volatility / lit::<T>(2.0);
        let d1 = (log_sk + drift * params.expiry) / vol_sqrt_t;
        let d2 = d1 - vol_sqrt_t;

        let df_domestic = (-params.rate_domestic * params.expiry).exp();
        let df_foreign = (-params.rate_foreign * params.expiry).exp();

        Self {
            params,
            d1,
            d2,
            sqrt_t,
            df_domestic,
            df_foreign,
        }
    }

    /// Returns a reference to the parameters.
    #[inline]
    pub fn params(&self) -> &GarmanKohlhagenParams<T> {
        &self.params
    }

    /// Returns d1.
    #[inline]
    pub fn d1(&self) -> T {
        self.d1
    }

    /// Returns d2.
    #[inline]
    pub fn d2(&self) -> T {
        self.d2
    }

    /// Computes the option price in domestic currency per unit of foreign notional.
    pub fn price(&self, option_type: OptionType) -> T {
        let p = &self.params;
        match option_type {
            OptionType::Call => {
                p.spot * self.df_foreign * norm_cdf(self.d1)
                    - p.strike * self.df_domestic * norm_cdf(self.d2)
            }
            OptionType::Put => {
                p.strike * self.df_domestic * norm_cdf(-self.d2)
                    - p.spot * self.df_foreign * norm_cdf(-self.d1)
            }
        }
    }

    /// Computes Delta.
    pub fn delta(&self, option_type: OptionType) -> T {
        let nd1 = norm_cdf(self.d1);
        match option_type {
            OptionType::Call => self.df_foreign * nd1,
            OptionType::Put => self.df_foreign * (nd1 - T::one()),
        }
    }

    /// Computes Gamma (same for calls and puts).
    pub fn gamma(&self) -> T {
        // Γ = e^(-rf*T) * N'(d1) / (S * σ * √T)
        self.df_foreign * norm_pdf(self.d1)
            / (self.params.spot * self.params.volatility * self.sqrt_t)
    }

    /// Computes Vega per 1% volatility change (same for calls and puts).
    pub fn vega(&self) -> T {
        self.params.spot * self.df_foreign * norm_pdf(self.d1) * self.sqrt_t / lit::<T>(100.0)
    }

    /// Computes Theta per calendar day.
    pub fn theta(&self, option_type: OptionType) -> T {
        let p = &self.params;
        let nd1 = norm_cdf(self.d1);
        let nd2 = norm_cdf(self.d2);

        let decay = -p.spot * self.df_foreign * norm_pdf(self.d1) * p.volatility
            / (lit::<T>(2.0) * self.sqrt_t);

        let annual = match option_type {
            OptionType::Call => {
                decay + p.rate_foreign * p.spot * self.df_foreign * nd1
                    - p.rate_domestic * p.strike * self.df_domestic * nd2
            }
            OptionType::Put => {
                decay - p.rate_foreign * p.spot * self.df_foreign * (T::one() - nd1)
                    + p.rate_domestic * p.strike * self.df_domestic * (T::one() - nd2)
            }
        };
        annual / lit::<T>(365.0)
    }

    /// Computes domestic Rho per 1% rate change.
    pub fn rho_domestic(&self, option_type: OptionType) -> T {
        let p = &self.params;
        let scale = p.strike * p.expiry * self.df_domestic / lit::<T>(100.0);
        match option_type {
            OptionType::Call => scale * norm_cdf(self.d2),
            OptionType::Put => -scale * norm_cdf(-self.d2),
        }
    }

    /// Computes foreign Rho per 1% rate change.
    pub fn rho_foreign(&self, option_type: OptionType) -> T {
        let p = &self.params;
        let scale = p.spot * p.expiry * self.df_foreign / lit::<T>(100.0);
        match option_type {
            OptionType::Call => -scale * norm_cdf(self.d1),
            OptionType::Put => scale * norm_cdf(-self.d1),
        }
    }

    /// All Greeks for one option.
    pub fn greeks(&self, option_type: OptionType) -> GarmanKohlhagenGreeks<T> {
        GarmanKohlhagenGreeks {
            delta: self.delta(option_type),
            gamma: self.gamma(),
            vega: self.vega(),
            theta: self.theta(option_type),
            rho_domestic: self.rho_domestic(option_type),
            rho_foreign: self.rho_foreign(option_type),
        }
    }
}

/// Prices a European FX option, validating inputs.
///
/// # Errors
///
/// Propagates [`GarmanKohlhagenParams::new`] validation failures.
///
/// # Examples
///
/// ```
/// use pricer_models::analytical::garman_kohlhagen::fx_option_price;
/// use pricer_models::instruments::OptionType;
///
/// let call: f64 = fx_option_price(OptionType::Call, 1.0850, 1.0850, 0.01, 0.005, 1.0, 0.20).unwrap();
/// assert!((call - 0.0885).abs() < 1e-3);
/// ```
pub fn fx_option_price<T: Float>(
    option_type: OptionType,
    spot: T,
    strike: T,
    rate_domestic: T,
    rate_foreign: T,
    expiry: T,
    volatility: T,
) -> Result<T, AnalyticalError> {
    let params =
        GarmanKohlhagenParams::new(spot, strike, rate_domestic, rate_foreign, volatility, expiry)?;
    Ok(GarmanKohlhagen::new(params).price(option_type))
}

/// Outright forward rate `S·e^{(rd−rf)T}`.
///
/// # Examples
///
/// ```
/// use pricer_models::analytical::garman_kohlhagen::forward_rate;
///
/// let f = forward_rate(1.0_f64, 0.03, 0.01, 1.0);
/// assert!((f - 0.02_f64.exp()).abs() < 1e-12);
/// ```
#[inline]
pub fn forward_rate<T: Float>(spot: T, rate_domestic: T, rate_foreign: T, expiry: T) -> T {
    spot * ((rate_domestic - rate_foreign) * expiry).exp()
}

/// Present value of a long forward struck at `strike`: `(F − K)·e^{−rd·T}`.
///
/// Signed; returns 0 when `expiry <= 0`.
pub fn forward_value<T: Float>(
    spot: T,
    strike: T,
    rate_domestic: T,
    rate_foreign: T,
    expiry: T,
) -> T {
    if !(expiry > T::zero()) {
        return T::zero();
    }
    let fwd = forward_rate(spot, rate_domestic, rate_foreign, expiry);
    (fwd - strike) * (-rate_domestic * expiry).exp()
}

/// FX swap value: the outright forward rate, without strike netting.
///
/// Returns 0 when `expiry <= 0`.
pub fn swap_value<T: Float>(spot: T, rate_domestic: T, rate_foreign: T, expiry: T) -> T {
    if !(expiry > T::zero()) {
        return T::zero();
    }
    forward_rate(spot, rate_domestic, rate_foreign, expiry)
}
