//! Standard normal distribution functions.
//!
//! This module provides:
//! - `erf` / `erfc`: Abramowitz–Stegun 7.1.26 approximations
//! - `norm_cdf`: Cumulative distribution function (CDF)
//! - `norm_pdf`: Probability density function (PDF)
//!
//! Every closed-form pricer in the engine evaluates `N(·)` through
//! [`norm_cdf`], so the approximation's maximum absolute error of 1.5e-7
//! bounds the accuracy of all downstream prices.

use num_traits::Float;

use super::lit;

/// Square root of 2.
const SQRT_2: f64 = std::f64::consts::SQRT_2;

/// 1 / sqrt(2 * pi)
const FRAC_1_SQRT_2PI: f64 = 0.398_942_280_401_432_7;

// Abramowitz and Stegun constants (7.1.26)
const A1: f64 = 0.254_829_592;
const A2: f64 = -0.284_496_736;
const A3: f64 = 1.421_413_741;
const A4: f64 = -1.453_152_027;
const A5: f64 = 1.061_405_429;
const P: f64 = 0.327_591_1;

/// erfc(|x|) via the 5-term polynomial in t = 1 / (1 + p|x|), Horner form.
#[inline]
fn erfc_abs<T: Float>(abs_x: T) -> T {
    let one = T::one();
    let t = one / (one + lit::<T>(P) * abs_x);
    let poly = lit::<T>(A1)
        + t * (lit::<T>(A2) + t * (lit::<T>(A3) + t * (lit::<T>(A4) + t * lit::<T>(A5))));
    t * poly * (-abs_x * abs_x).exp()
}

/// Error function approximation.
///
/// Odd extension of the Abramowitz–Stegun 7.1.26 formula: `erf(-x) = -erf(x)`.
///
/// # Examples
/// ```
/// use pricer_core::math::distributions::erf;
///
/// assert!(erf(0.0_f64).abs() < 1e-8);
/// assert!((erf(1.0_f64) - 0.8427007929).abs() < 1.5e-7);
/// ```
#[inline]
pub fn erf<T: Float>(x: T) -> T {
    let value = T::one() - erfc_abs(x.abs());
    if x < T::zero() {
        -value
    } else {
        value
    }
}

/// Complementary error function approximation.
///
/// For negative x uses `erfc(-x) = 2 - erfc(x)`.
#[inline]
pub fn erfc<T: Float>(x: T) -> T {
    let tail = erfc_abs(x.abs());
    if x < T::zero() {
        lit::<T>(2.0) - tail
    } else {
        tail
    }
}

/// Standard normal cumulative distribution function.
///
/// Computes P(X <= x) where X ~ N(0, 1) as `Φ(x) = ½·erfc(-x/√2)`.
///
/// # Returns
/// The probability P(X <= x), always in `[0, 1]`.
///
/// # Examples
/// ```
/// use pricer_core::math::distributions::norm_cdf;
///
/// let cdf_0 = norm_cdf(0.0_f64);
/// assert!((cdf_0 - 0.5).abs() < 1e-7);
///
/// assert!(norm_cdf(-3.0_f64) < 0.01);
/// assert!(norm_cdf(3.0_f64) > 0.99);
/// ```
#[inline]
pub fn norm_cdf<T: Float>(x: T) -> T {
    let arg = -x / lit::<T>(SQRT_2);
    let value = lit::<T>(0.5) * erfc(arg);
    value.max(T::zero()).min(T::one())
}

/// Standard normal probability density function.
///
/// φ(x) = (1 / sqrt(2π)) * exp(-x² / 2)
///
/// # Examples
/// ```
/// use pricer_core::math::distributions::norm_pdf;
///
/// assert!((norm_pdf(0.0_f64) - 0.3989422804).abs() < 1e-9);
/// ```
#[inline]
pub fn norm_pdf<T: Float>(x: T) -> T {
    let exponent = -lit::<T>(0.5) * x * x;
    lit::<T>(FRAC_1_SQRT_2PI) * exponent.exp()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    // ==========================================================
    // erf / erfc tests
    // ==========================================================

    #[test]
    fn test_erf_reference_values() {
        assert_relative_eq!(erf(0.5_f64), 0.5204998778130465, epsilon = 1.5e-7);
        assert_relative_eq!(erf(1.0_f64), 0.8427007929497149, epsilon = 1.5e-7);
        assert_relative_eq!(erf(2.0_f64), 0.9953222650189527, epsilon = 1.5e-7);
    }

    #[test]
    fn test_erf_is_odd() {
        for x in [0.1, 0.7, 1.3, 2.9] {
            assert_relative_eq!(erf(-x), -erf(x), epsilon = 1e-15);
        }
    }

    #[test]
    fn test_erfc_complements_erf() {
        for x in [-2.0, -0.5, 0.0, 0.5, 2.0] {
            assert_relative_eq!(erf(x) + erfc(x), 1.0, epsilon = 1e-12);
        }
    }

    // ==========================================================
    // norm_cdf tests
    // ==========================================================

    #[test]
    fn test_norm_cdf_at_zero() {
        assert_relative_eq!(norm_cdf(0.0_f64), 0.5, epsilon = 1e-7);
    }

    #[test]
    fn test_norm_cdf_reference_values() {
        assert_relative_eq!(norm_cdf(1.0_f64), 0.8413447460685429, epsilon = 1e-7);
        assert_relative_eq!(norm_cdf(-1.0_f64), 0.15865525393145707, epsilon = 1e-7);
        assert_relative_eq!(norm_cdf(1.645_f64), 0.9500150944608786, epsilon = 1e-7);
        assert_relative_eq!(norm_cdf(-2.0_f64), 0.022750131948179195, epsilon = 1e-7);
        assert_relative_eq!(norm_cdf(2.326_f64), 0.9899907246591324, epsilon = 1e-7);
    }

    #[test]
    fn test_norm_cdf_extreme_values() {
        let hi = norm_cdf(10.0_f64);
        assert!(hi > 0.9999999 && hi <= 1.0);

        let lo = norm_cdf(-10.0_f64);
        assert!((0.0..1e-7).contains(&lo));
    }

    #[test]
    fn test_norm_cdf_f32_compatibility() {
        assert!((norm_cdf(0.0_f32) - 0.5).abs() < 1e-5);
    }

    // ==========================================================
    // norm_pdf tests
    // ==========================================================

    #[test]
    fn test_norm_pdf_at_zero() {
        assert_relative_eq!(norm_pdf(0.0_f64), FRAC_1_SQRT_2PI, epsilon = 1e-12);
    }

    #[test]
    fn test_norm_pdf_at_one() {
        assert_relative_eq!(norm_pdf(1.0_f64), 0.24197072451914337, epsilon = 1e-12);
    }

    proptest! {
        #[test]
        fn prop_norm_cdf_symmetric(x in -6.0_f64..6.0) {
            prop_assert!((norm_cdf(x) + norm_cdf(-x) - 1.0).abs() < 1e-6);
        }

        #[test]
        fn prop_norm_cdf_in_unit_interval(x in -40.0_f64..40.0) {
            let p = norm_cdf(x);
            prop_assert!((0.0..=1.0).contains(&p));
        }
    }
}
