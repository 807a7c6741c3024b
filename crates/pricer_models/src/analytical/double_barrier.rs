//! Double-barrier knock-out and knock-in options (Ikeda–Kunitomo).
//!
//! The knock-out value is an infinite series over integer `n`, truncated
//! to `n ∈ [−terms, terms]`. Barriers are flat (curvatures δ1 = δ2 = 0), so
//! the exponents reduce to `μ1 = μ3 = 2b/σ² + 1` and `μ2 = 0`.
//!
//! Knock-in is obtained by in/out parity: `KI = GK vanilla − KO`.
//!
//! # Examples
//!
//! ```
//! use pricer_models::analytical::double_barrier::{
//!     double_barrier_price, DoubleBarrierParams, DOUBLE_BARRIER_SERIES_TERMS,
//! };
//! use pricer_models::instruments::{KnockDirection, OptionType};
//!
//! let params = DoubleBarrierParams::new(1.0, 1.0, 0.9, 1.1, 0.02, 0.01, 0.10, 0.5).unwrap();
//! let ko: f64 = double_barrier_price(
//!     OptionType::Call,
//!     KnockDirection::Out,
//!     &params,
//!     DOUBLE_BARRIER_SERIES_TERMS,
//! )
//! .unwrap();
//! assert!((ko - 0.011617).abs() < 1e-5);
//! ```

use num_traits::Float;
use pricer_core::math::{lit, norm_cdf};

use super::error::AnalyticalError;
use super::garman_kohlhagen::{to_f64, GarmanKohlhagen, GarmanKohlhagenParams};
use crate::instruments::{KnockDirection, OptionType};

/// Default truncation of the series: `n ∈ [−5, 5]`.
pub const DOUBLE_BARRIER_SERIES_TERMS: usize = 5;

/// Inputs to the double-barrier closed form.
#[derive(Debug, Clone, Copy)]
pub struct DoubleBarrierParams<T: Float> {
    /// Spot exchange rate
    pub spot: T,
    /// Strike
    pub strike: T,
    /// Lower barrier `L`
    pub lower: T,
    /// Upper barrier `U`
    pub upper: T,
    /// Domestic risk-free rate
    pub rate_domestic: T,
    /// Foreign risk-free rate
    pub rate_foreign: T,
    /// Volatility
    pub volatility: T,
    /// Time to expiry in years
    pub expiry: T,
}

impl<T: Float> DoubleBarrierParams<T> {
    /// Creates validated parameters; the two barriers may be given in any order.
    ///
    /// # Errors
    ///
    /// - Non-positive spot, strike, barriers, volatility or expiry
    /// - `SpotOutsideBarriers` unless `L < S < U`
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        spot: T,
        strike: T,
        barrier1: T,
        barrier2: T,
        rate_domestic: T,
        rate_foreign: T,
        volatility: T,
        expiry: T,
    ) -> Result<Self, AnalyticalError> {
        // Validation shared with the vanilla leg used for knock-in parity.
        GarmanKohlhagenParams::new(spot, strike, rate_domestic, rate_foreign, volatility, expiry)?;
        for barrier in [barrier1, barrier2] {
            if !(barrier > T::zero()) {
                return Err(AnalyticalError::InvalidBarrier {
                    barrier: to_f64(barrier),
                });
            }
        }
        let lower = barrier1.min(barrier2);
        let upper = barrier1.max(barrier2);
        if !(spot > lower && spot < upper) {
            return Err(AnalyticalError::SpotOutsideBarriers {
                spot: to_f64(spot),
                lower: to_f64(lower),
                upper: to_f64(upper),
            });
        }
        Ok(Self {
            spot,
            strike,
            lower,
            upper,
            rate_domestic,
            rate_foreign,
            volatility,
            expiry,
        })
    }

    fn vanilla(&self) -> GarmanKohlhagen<T> {
        GarmanKohlhagen::new(GarmanKohlhagenParams {
            spot: self.spot,
            strike: self.strike,
            rate_domestic: self.rate_domestic,
            rate_foreign: self.rate_foreign,
            volatility: self.volatility,
            expiry: self.expiry,
        })
    }
}

/// Prices a double-barrier option per unit of notional with `terms`
/// series terms on each side of zero.
///
/// Returns `max(0, value)`.
///
/// # Errors
///
/// `NumericalInstability` when the series produces a non-finite value.
pub fn double_barrier_price<T: Float>(
    option: OptionType,
    knock: KnockDirection,
    params: &DoubleBarrierParams<T>,
    terms: usize,
) -> Result<T, AnalyticalError> {
    let knock_out = knock_out_value(option, params, terms);
    if !knock_out.is_finite() {
        return Err(AnalyticalError::NumericalInstability {
            message: format!("non-finite double-barrier series with {} terms", terms),
        });
    }
    let knock_out = knock_out.max(T::zero());
    let value = match knock {
        KnockDirection::Out => knock_out,
        KnockDirection::In => params.vanilla().price(option) - knock_out,
    };
    Ok(value.max(T::zero()))
}

/// Raw knock-out series value before flooring.
///
/// The payoff region is the part of `(L, U)` where the option is in the
/// money: `[max(K, L), U]` for calls and `[L, min(K, U)]` for puts.
fn knock_out_value<T: Float>(option: OptionType, p: &DoubleBarrierParams<T>, terms: usize) -> T {
    let (s, k, l, u) = (p.spot, p.strike, p.lower, p.upper);
    let (from, to) = match option {
        OptionType::Call => (k.max(l), u),
        OptionType::Put => (l, k.min(u)),
    };
    if from >= to {
        return T::zero();
    }

    let two = lit::<T>(2.0);
    let b = p.rate_domestic - p.rate_foreign;
    let var = p.volatility * p.volatility;
    let sst = p.volatility * p.expiry.sqrt();
    let drift = (b + var / two) * p.expiry;
    let mu = two * b / var + T::one();

    let ln_ul = (u / l).ln();
    let ln_lu = -ln_ul;
    let ln_sf = (s / from).ln();
    let ln_st = (s / to).ln();
    let ln_reflect_f = (l * l / (from * s)).ln();
    let ln_reflect_t = (l * l / (to * s)).ln();

    let mut sum_spot = T::zero();
    let mut sum_strike = T::zero();
    let n_max = terms as i64;
    for n in -n_max..=n_max {
        let n = lit::<T>(n as f64);
        let shift = two * n * ln_ul;

        let d1 = (ln_sf + shift + drift) / sst;
        let d2 = (ln_st + shift + drift) / sst;
        let d3 = (ln_reflect_f + two * n * ln_lu + drift) / sst;
        let d4 = (ln_reflect_t + two * n * ln_lu + drift) / sst;

        // (U^n / L^n) and (L^{n+1} / (U^n S)) in log form
        let ln_direct = n * ln_ul;
        let ln_reflected = n * ln_lu + (l / s).ln();

        sum_spot = sum_spot + (ln_direct * mu).exp() * (norm_cdf(d1) - norm_cdf(d2))
            - (ln_reflected * mu).exp() * (norm_cdf(d3) - norm_cdf(d4));
        sum_strike = sum_strike
            + (ln_direct * (mu - two)).exp() * (norm_cdf(d1 - sst) - norm_cdf(d2 - sst))
            - (ln_reflected * (mu - two)).exp() * (norm_cdf(d3 - sst) - norm_cdf(d4 - sst));
    }

    let carry_df = ((b - p.rate_domestic) * p.expiry).exp();
    let df = (-p.rate_domestic * p.expiry).exp();
    match option {
        OptionType::Call => s * carry_df * sum_spot - k * df * sum_strike,
        OptionType::Put => k * df * sum_strike - s * carry_df * sum_spot,
    }
}
