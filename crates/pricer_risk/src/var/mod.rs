//! Parametric value-at-risk.
//!
//! - [`CorrelationTable`]: symmetric currency correlations with a default
//! - [`parametric_var`]: one-day VaR and expected shortfall of net positions

mod correlation;
mod parametric;

pub use correlation::CorrelationTable;
pub use parametric::{parametric_var, portfolio_std_dev, VarEstimate};
