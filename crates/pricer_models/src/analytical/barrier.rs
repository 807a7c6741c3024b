//! Single-barrier options (Reiner–Rubinstein).
//!
//! Continuously monitored knock-in and knock-out calls and puts under
//! Garman–Kohlhagen dynamics with cost of carry `b = rd − rf`. Cash rebates
//! on knock are not part of these instruments, so the rebate terms of the
//! general formula vanish and only `f1..f4` contribute.
//!
//! # Type flag
//!
//! The barrier side is read from the market, not from the instrument:
//! `H < S` is a down barrier (η = +1), `H > S` an up barrier (η = −1).
//! Together with the payoff sign φ and the knock direction this selects one
//! of eight combinations; the terms used then depend on `K ≥ H` or `K < H`.
//!
//! A reverse barrier swaps φ while keeping η, so a reverse knock-out call is
//! valued as the knock-out put on the same side of the barrier. Knock-in plus
//! knock-out therefore equals the vanilla of the *swapped* payoff.
//!
//! # Examples
//!
//! ```
//! use pricer_models::analytical::barrier::{single_barrier_price, BarrierParams};
//! use pricer_models::analytical::garman_kohlhagen::fx_option_price;
//! use pricer_models::instruments::{KnockDirection, OptionType};
//!
//! let params = BarrierParams::new(1.0, 1.0, 0.9, 0.02, 0.01, 0.10, 0.5).unwrap();
//! let ko: f64 = single_barrier_price(OptionType::Call, KnockDirection::Out, false, &params).unwrap();
//! let ki: f64 = single_barrier_price(OptionType::Call, KnockDirection::In, false, &params).unwrap();
//! let vanilla: f64 = fx_option_price(OptionType::Call, 1.0, 1.0, 0.02, 0.01, 0.5, 0.10).unwrap();
//!
//! assert!((ko + ki - vanilla).abs() < 1e-10);
//! ```

use std::fmt;

use num_traits::Float;
use pricer_core::math::{lit, norm_cdf};

use super::error::AnalyticalError;
use super::garman_kohlhagen::to_f64;
use crate::instruments::{KnockDirection, OptionType};

/// Which side of the spot the barrier sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarrierSide {
    /// Barrier below spot (η = +1)
    Down,
    /// Barrier above spot (η = −1)
    Up,
}

/// Resolved single-barrier type flag (`cdi`, `cuo`, `pdo`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BarrierFlag {
    /// Payoff after reverse mapping
    pub option: OptionType,
    /// Barrier side relative to spot
    pub side: BarrierSide,
    /// Knock direction
    pub knock: KnockDirection,
}

impl BarrierFlag {
    /// Resolves the flag from the instrument description and market levels.
    ///
    /// # Errors
    ///
    /// `UnmatchedBarrierFlag` when the barrier sits exactly at spot, which
    /// leaves the barrier side undefined.
    pub fn resolve(
        option: OptionType,
        knock: KnockDirection,
        reverse: bool,
        spot: f64,
        barrier: f64,
    ) -> Result<Self, AnalyticalError> {
        let side = if barrier < spot {
            BarrierSide::Down
        } else if barrier > spot {
            BarrierSide::Up
        } else {
            return Err(AnalyticalError::UnmatchedBarrierFlag {
                reason: format!("barrier {} equals spot, barrier side undefined", barrier),
            });
        };
        let option = if reverse { option.flip() } else { option };
        Ok(Self { option, side, knock })
    }

    /// η: +1 for down barriers, −1 for up barriers.
    #[inline]
    pub fn eta(&self) -> f64 {
        match self.side {
            BarrierSide::Down => 1.0,
            BarrierSide::Up => -1.0,
        }
    }
}

impl fmt::Display for BarrierFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let o = match self.option {
            OptionType::Call => 'c',
            OptionType::Put => 'p',
        };
        let s = match self.side {
            BarrierSide::Down => 'd',
            BarrierSide::Up => 'u',
        };
        let k = match self.knock {
            KnockDirection::In => 'i',
            KnockDirection::Out => 'o',
        };
        write!(f, "{}{}{}", o, s, k)
    }
}

/// Inputs to the single-barrier closed form.
#[derive(Debug, Clone, Copy)]
pub struct BarrierParams<T: Float> {
    /// Spot exchange rate
    pub spot: T,
    /// Strike
    pub strike: T,
    /// Barrier level
    pub barrier: T,
    /// Domestic risk-free rate
    pub rate_domestic: T,
    /// Foreign risk-free rate
    pub rate_foreign: T,
    /// Volatility
    pub volatility: T,
    /// Time to expiry in years
    pub expiry: T,
}

impl<T: Float> BarrierParams<T> {
    /// Creates validated barrier parameters.
    ///
    /// # Errors
    ///
    /// Non-positive spot, strike, barrier, volatility or expiry.
    pub fn new(
        spot: T,
        strike: T,
        barrier: T,
        rate_domestic: T,
        rate_foreign: T,
        volatility: T,
        expiry: T,
    ) -> Result<Self, AnalyticalError> {
        if !(spot > T::zero()) {
            return Err(AnalyticalError::InvalidSpot { spot: to_f64(spot) });
        }
        if !(strike > T::zero()) {
            return Err(AnalyticalError::InvalidStrike {
                strike: to_f64(strike),
            });
        }
        if !(barrier > T::zero()) {
            return Err(AnalyticalError::InvalidBarrier {
                barrier: to_f64(barrier),
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
            barrier,
            rate_domestic,
            rate_foreign,
            volatility,
            expiry,
        })
    }
}

/// Prices a single-barrier option per unit of notional.
///
/// Returns `max(0, value)`.
///
/// # Errors
///
/// `UnmatchedBarrierFlag` when the type flag cannot be resolved, and
/// `NumericalInstability` when the formula produces a non-finite value.
pub fn single_barrier_price<T: Float>(
    option: OptionType,
    knock: KnockDirection,
    reverse: bool,
    params: &BarrierParams<T>,
) -> Result<T, AnalyticalError> {
    let flag = BarrierFlag::resolve(
        option,
        knock,
        reverse,
        to_f64(params.spot),
        to_f64(params.barrier),
    )?;
    let f = AuxTerms::new(params, flag);
    let strike_above = params.strike >= params.barrier;

    let value = match (flag.option, flag.side, flag.knock) {
        (OptionType::Call, BarrierSide::Down, KnockDirection::In) => {
            pick(strike_above, f.f3, f.f1 - f.f2 + f.f4)
        }
        (OptionType::Call, BarrierSide::Up, KnockDirection::In) => {
            pick(strike_above, f.f1, f.f2 - f.f3 + f.f4)
        }
        (OptionType::Put, BarrierSide::Down, KnockDirection::In) => {
            pick(strike_above, f.f2 - f.f3 + f.f4, f.f1)
        }
        (OptionType::Put, BarrierSide::Up, KnockDirection::In) => {
            pick(strike_above, f.f1 - f.f2 + f.f4, f.f3)
        }
        (OptionType::Call, BarrierSide::Down, KnockDirection::Out) => {
            pick(strike_above, f.f1 - f.f3, f.f2 - f.f4)
        }
        (OptionType::Call, BarrierSide::Up, KnockDirection::Out) => {
            pick(strike_above, T::zero(), f.f1 - f.f2 + f.f3 - f.f4)
        }
        (OptionType::Put, BarrierSide::Down, KnockDirection::Out) => {
            pick(strike_above, f.f1 - f.f2 + f.f3 - f.f4, T::zero())
        }
        (OptionType::Put, BarrierSide::Up, KnockDirection::Out) => {
            pick(strike_above, f.f2 - f.f4, f.f1 - f.f3)
        }
    };

    if !value.is_finite() {
        return Err(AnalyticalError::NumericalInstability {
            message: format!("non-finite single-barrier value for flag {}", flag),
        });
    }
    Ok(value.max(T::zero()))
}

#[inline]
fn pick<T>(strike_above: bool, above: T, below: T) -> T {
    if strike_above {
        above
    } else {
        below
    }
}

/// Reiner–Rubinstein auxiliary terms f1..f4.
struct AuxTerms<T> {
    f1: T,
    f2: T,
    f3: T,
    f4: T,
}

impl<T: Float> AuxTerms<T> {
    fn new(p: &BarrierParams<T>, flag: BarrierFlag) -> Self {
        let phi = lit::<T>(flag.option.phi());
        let eta = lit::<T>(flag.eta());
        let two = lit::<T>(2.0);

        let (s, x, h) = (p.spot, p.strike, p.barrier);
        let b = p.rate_domestic - p.rate_foreign;
        let var = p.volatility * p.volatility;
        let sst = p.volatility * p.expiry.sqrt();
        let mu = (b - var / two) / var;
        let shift = (T::one() + mu) * sst;

        let carry_df = ((b - p.rate_domestic) * p.expiry).exp();
        let df = (-p.rate_domestic * p.expiry).exp();

        let x1 = (s / x).ln() / sst + shift;
        let x2 = (s / h).ln() / sst + shift;
        let y1 = (h * h / (s * x)).ln() / sst + shift;
        let y2 = (h / s).ln() / sst + shift;

        let hs = h / s;
        let hs_spot = hs.powf(two * (mu + T::one()));
        let hs_strike = hs.powf(two * mu);

        let vanilla_like = |arg: T| {
            phi * s * carry_df * norm_cdf(phi * arg) - phi * x * df * norm_cdf(phi * arg - phi * sst)
        };
        let reflected = |arg: T| {
            phi * s * carry_df * hs_spot * norm_cdf(eta * arg)
                - phi * x * df * hs_strike * norm_cdf(eta * arg - eta * sst)
        };

        Self {
            f1: vanilla_like(x1),
            f2: vanilla_like(x2),
            f3: reflected(y1),
            f4: reflected(y2),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analytical::garman_kohlhagen::fx_option_price;
    use approx::assert_abs_diff_eq;
    use proptest::prelude::*;

    const RD: f64 = 0.02;
    const RF: f64 = 0.01;
    const VOL: f64 = 0.10;
    const T: f64 = 0.5;

    fn params(strike: f64, barrier: f64) -> BarrierParams<f64> {
        BarrierParams::new(1.0, strike, barrier, RD, RF, VOL, T).unwrap()
    }

    fn price(option: OptionType, knock: KnockDirection, reverse: bool, strike: f64, barrier: f64) -> f64 {
        single_barrier_price(option, knock, reverse, &params(strike, barrier)).unwrap()
    }

    // ==========================================================
    // Flag resolution
    // ==========================================================

    #[test]
    fn test_flag_side_from_spot() {
        let down = BarrierFlag::resolve(OptionType::Call, KnockDirection::Out, false, 1.0, 0.9).unwrap();
        assert_eq!(down.to_string(), "cdo");
        let up = BarrierFlag::resolve(OptionType::Put, KnockDirection::In, false, 1.0, 1.1).unwrap();
        assert_eq!(up.to_string(), "pui");
        assert_eq!(up.eta(), -1.0);
    }

    #[test]
    fn test_reverse_swaps_payoff_keeps_side() {
        let flag = BarrierFlag::resolve(OptionType::Call, KnockDirection::Out, true, 1.0, 1.1).unwrap();
        assert_eq!(flag.to_string(), "puo");
    }

    #[test]
    fn test_barrier_at_spot_is_unmatched() {
        let err = single_barrier_price(OptionType::Call, KnockDirection::Out, false, &params(1.0, 1.0))
            .unwrap_err();
        assert!(matches!(err, AnalyticalError::UnmatchedBarrierFlag { .. }));
    }

    #[test]
    fn test_params_validation() {
        assert!(matches!(
            BarrierParams::new(1.0, 1.0, 0.0, RD, RF, VOL, T),
            Err(AnalyticalError::InvalidBarrier { .. })
        ));
        assert!(matches!(
            BarrierParams::new(1.0, 1.0, 0.9, RD, RF, VOL, 0.0),
            Err(AnalyticalError::Expired { .. })
        ));
    }

    // ==========================================================
    // Reference values
    // ==========================================================

    #[test]
    fn test_reference_values() {
        assert_abs_diff_eq!(
            price(OptionType::Call, KnockDirection::Out, false, 1.0, 0.9),
            0.030514400263,
            epsilon = 1e-6
        );
        assert_abs_diff_eq!(
            price(OptionType::Call, KnockDirection::Out, false, 1.0, 1.1),
            0.011645223430,
            epsilon = 1e-6
        );
        assert_abs_diff_eq!(
            price(OptionType::Put, KnockDirection::Out, false, 1.0, 0.9),
            0.012961080010,
            epsilon = 1e-6
        );
        assert_abs_diff_eq!(
            price(OptionType::Put, KnockDirection::In, false, 1.0, 1.1),
            7.2254148e-5,
            epsilon = 1e-7
        );
    }

    #[test]
    fn test_up_and_out_call_struck_above_barrier_is_worthless() {
        assert_eq!(price(OptionType::Call, KnockDirection::Out, false, 1.2, 1.1), 0.0);
        assert_eq!(price(OptionType::Put, KnockDirection::Out, false, 0.8, 0.9), 0.0);
    }

    #[test]
    fn test_far_barrier_knock_out_equals_vanilla() {
        let ko = price(OptionType::Call, KnockDirection::Out, false, 1.0, 0.5);
        let vanilla = fx_option_price(OptionType::Call, 1.0, 1.0, RD, RF, T, VOL).unwrap();
        assert_abs_diff_eq!(ko, vanilla, epsilon = 1e-9);
        assert!(price(OptionType::Call, KnockDirection::In, false, 1.0, 0.5) < 1e-9);
    }

    #[test]
    fn test_reverse_knock_out_call_prices_as_put() {
        let reverse = price(OptionType::Call, KnockDirection::Out, true, 1.0, 1.1);
        let put = price(OptionType::Put, KnockDirection::Out, false, 1.0, 1.1);
        assert_eq!(reverse, put);
    }

    // ==========================================================
    // In/out parity
    // ==========================================================

    proptest! {
        #[test]
        fn prop_in_out_parity(
            strike in 0.8f64..1.25,
            barrier in 0.7f64..1.4,
            vol in 0.05f64..0.4,
            t in 0.1f64..2.0,
            is_call in any::<bool>(),
            reverse in any::<bool>(),
        ) {
            prop_assume!((barrier - 1.0).abs() > 1e-3);
            let option = if is_call { OptionType::Call } else { OptionType::Put };
            let p = BarrierParams::new(1.0, strike, barrier, RD, RF, vol, t).unwrap();
            let ko = single_barrier_price(option, KnockDirection::Out, reverse, &p).unwrap();
            let ki = single_barrier_price(option, KnockDirection::In, reverse, &p).unwrap();
            let payoff = if reverse { option.flip() } else { option };
            let vanilla = fx_option_price(payoff, 1.0, strike, RD, RF, t, vol).unwrap();
            prop_assert!((ko + ki - vanilla).abs() <= 1e-6 * vanilla.max(1.0));
        }
    }
}
