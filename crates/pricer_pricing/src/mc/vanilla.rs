//! Monte Carlo vanilla pricer, used to validate the closed form.

use pricer_models::instruments::OptionType;

use super::cancel::CancellationToken;
use super::config::MonteCarloConfig;
use super::paths::{simulate, GbmParams, McEstimate};
use crate::error::PricingError;

/// Prices a European option by simulation.
///
/// # Errors
///
/// Propagates [`simulate`] errors.
pub fn price_vanilla_mc(
    option: OptionType,
    strike: f64,
    params: &GbmParams,
    config: &MonteCarloConfig,
    cancel: Option<&CancellationToken>,
) -> Result<McEstimate, PricingError> {
    simulate(params, config, cancel, |path| option.intrinsic(path.terminal, strike))
}
