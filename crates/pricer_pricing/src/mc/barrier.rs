//! Monte Carlo barrier pricer.
//!
//! Fallback for single- and double-barrier options when the closed form is
//! inapplicable. Barriers are monitored at every simulation step; reverse
//! barriers use the same payoff swap as the closed form so both methods
//! value the same contract.

use pricer_models::instruments::{KnockDirection, OptionType};

use super::cancel::CancellationToken;
use super::config::MonteCarloConfig;
use super::paths::{simulate, GbmParams, McEstimate, PathSummary};
use crate::error::PricingError;

/// Barrier contract as seen by the path simulator.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum BarrierPayoff {
    /// Single barrier on the side of spot given by its level.
    Single {
        /// Call or put
        option: OptionType,
        /// Knock-in or knock-out
        knock: KnockDirection,
        /// Reverse barrier (payoff swapped)
        reverse: bool,
        /// Strike
        strike: f64,
        /// Barrier level
        barrier: f64,
    },
    /// Corridor `(lower, upper)`.
    Double {
        /// Call or put
        option: OptionType,
        /// Knock-in or knock-out
        knock: KnockDirection,
        /// Strike
        strike: f64,
        /// Lower barrier
        lower: f64,
        /// Upper barrier
        upper: f64,
    },
}

impl BarrierPayoff {
    /// Undiscounted payoff of one path started at `spot`.
    pub fn value(&self, spot: f64, path: &PathSummary) -> f64 {
        let (option, knock, strike, touched) = match *self {
            BarrierPayoff::Single {
                option,
                knock,
                reverse,
                strike,
                barrier,
            } => {
                let option = if reverse { option.flip() } else { option };
                (option, knock, strike, path.touched(spot, barrier))
            }
            BarrierPayoff::Double {
                option,
                knock,
                strike,
                lower,
                upper,
            } => (option, knock, strike, path.left_corridor(lower, upper)),
        };
        let alive = match knock {
            KnockDirection::Out => !touched,
            KnockDirection::In => touched,
        };
        if alive {
            option.intrinsic(path.terminal, strike)
        } else {
            0.0
        }
    }
}

/// Prices a barrier option by simulation.
///
/// # Errors
///
/// Propagates [`simulate`] errors.
///
/// # Examples
///
/// ```rust
/// use pricer_models::instruments::{KnockDirection, OptionType};
/// use pricer_pricing::mc::{price_barrier_mc, BarrierPayoff, GbmParams, MonteCarloConfig};
///
/// let payoff = BarrierPayoff::Single {
///     option: OptionType::Call,
///     knock: KnockDirection::Out,
///     reverse: false,
///     strike: 1.0,
///     barrier: 1.0,
/// };
/// let config = MonteCarloConfig::builder().n_paths(100).n_steps(50).seed(1).build().unwrap();
/// let params = GbmParams::new(1.0, 0.02, 0.01, 0.10, 0.5);
///
/// // A barrier at spot is touched at inception
/// let est = price_barrier_mc(&payoff, &params, &config, None).unwrap();
/// assert_eq!(est.price, 0.0);
/// ```
pub fn price_barrier_mc(
    payoff: &BarrierPayoff,
    params: &GbmParams,
    config: &MonteCarloConfig,
    cancel: Option<&CancellationToken>,
) -> Result<McEstimate, PricingError> {
    let spot = params.spot;
    simulate(params, config, cancel, |path| payoff.value(spot, path))
}
