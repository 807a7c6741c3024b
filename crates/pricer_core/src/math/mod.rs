//! Mathematical building blocks shared by every pricer.
//!
//! - `distributions`: normal CDF/PDF and the error function

pub mod distributions;

pub use distributions::{erf, erfc, norm_cdf, norm_pdf};

use num_traits::Float;

/// Converts an `f64` literal into `T`.
///
/// Falls back to NaN for types that cannot represent the value, so a bad
/// conversion surfaces as a non-finite result instead of a panic.
#[inline]
pub fn lit<T: Float>(value: f64) -> T {
    T::from(value).unwrap_or_else(T::nan)
}
