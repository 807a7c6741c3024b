//! Closed-form pricing formulas for FX hedging instruments.
//!
//! This module provides:
//! - Garman–Kohlhagen vanilla options, forwards and swaps
//! - Reiner–Rubinstein single-barrier options
//! - Ikeda–Kunitomo double-barrier options
//!
//! ## Design Principles
//!
//! - **Generic over `T: Float`**: the same formulas serve `f32` and `f64`
//! - **Validated inputs**: parameter structs reject degenerate levels before
//!   any `ln` or division, so callers never see NaN from a bad input
//! - **Floored barrier prices**: barrier values are returned as `max(0, ·)`

pub mod barrier;
pub mod double_barrier;
pub mod error;
pub mod garman_kohlhagen;

pub use barrier::{single_barrier_price, BarrierFlag, BarrierParams, BarrierSide};
pub use double_barrier::{double_barrier_price, DoubleBarrierParams, DOUBLE_BARRIER_SERIES_TERMS};
pub use error::AnalyticalError;
pub use garman_kohlhagen::{
    forward_rate, forward_value, fx_option_price, swap_value, GarmanKohlhagen,
    GarmanKohlhagenGreeks, GarmanKohlhagenParams,
};
