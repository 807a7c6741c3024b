//! Shared GBM path simulator.
//!
//! Every Monte Carlo pricer in the engine (barrier fallback, digitals,
//! vanilla validation mode) runs through [`simulate`] or
//! [`simulate_monitored`]. A pricer supplies only its payoff as a function
//! of the path's [`PathSummary`].
//!
//! Spot follows risk-neutral GBM with cost of carry `rd − rf`, stepped in
//! log space:
//! ```text
//! S(t+dt) = S(t) × exp((rd - rf - 0.5σ²)dt + σ√dt × Z)
//! ```
//! and payoffs are discounted at `e^{-rd·T}`.
//!
//! Paths are split into batches. Each batch draws from its own generator
//! derived from the base seed and batch index, and batch sums are combined
//! in batch order, so a seeded run is reproducible for any thread count.

use rayon::prelude::*;
use tracing::{debug, trace};

use super::cancel::CancellationToken;
use super::config::MonteCarloConfig;
use crate::error::PricingError;
use crate::rng::PricerRng;

/// Parameters for Geometric Brownian Motion path generation.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::mc::GbmParams;
///
/// let params = GbmParams::new(1.085, 0.01, 0.005, 0.10, 1.0);
/// assert!(params.validate().is_ok());
/// assert!((params.discount_factor() - (-0.01_f64).exp()).abs() < 1e-15);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GbmParams {
    /// Initial spot (S₀).
    pub spot: f64,
    /// Domestic rate, used for drift and discounting.
    pub rate_domestic: f64,
    /// Foreign rate.
    pub rate_foreign: f64,
    /// Volatility (σ), annualised.
    pub volatility: f64,
    /// Horizon in years.
    pub maturity: f64,
}

impl GbmParams {
    /// Creates new GBM parameters.
    #[inline]
    pub fn new(
        spot: f64,
        rate_domestic: f64,
        rate_foreign: f64,
        volatility: f64,
        maturity: f64,
    ) -> Self {
        Self {
            spot,
            rate_domestic,
            rate_foreign,
            volatility,
            maturity,
        }
    }

    /// Checks that the parameters describe a simulable path.
    ///
    /// Zero volatility is allowed (deterministic path).
    pub fn validate(&self) -> Result<(), PricingError> {
        let reason = if !(self.spot > 0.0 && self.spot.is_finite()) {
            Some(format!("spot must be positive, got {}", self.spot))
        } else if !(self.volatility >= 0.0 && self.volatility.is_finite()) {
            Some(format!("volatility must be non-negative, got {}", self.volatility))
        } else if !(self.maturity > 0.0 && self.maturity.is_finite()) {
            Some(format!("maturity must be positive, got {}", self.maturity))
        } else if !(self.rate_domestic.is_finite() && self.rate_foreign.is_finite()) {
            Some("rates must be finite".to_string())
        } else {
            None
        };
        match reason {
            Some(reason) => Err(PricingError::DegenerateInput { reason }),
            None => Ok(()),
        }
    }

    /// `e^{-rd·T}`
    #[inline]
    pub fn discount_factor(&self) -> f64 {
        (-self.rate_domestic * self.maturity).exp()
    }
}

/// Closed range `[lower, upper]` checked at every simulated step.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::mc::RangeMonitor;
///
/// let range = RangeMonitor::new(1.10, 1.00);
/// assert_eq!((range.lower, range.upper), (1.00, 1.10));
/// assert!(range.contains(1.10));
/// assert!(!range.contains(0.99));
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RangeMonitor {
    /// Lower bound (inclusive)
    pub lower: f64,
    /// Upper bound (inclusive)
    pub upper: f64,
}

impl RangeMonitor {
    /// Creates a range from two levels in either order.
    #[inline]
    pub fn new(a: f64, b: f64) -> Self {
        Self {
            lower: a.min(b),
            upper: a.max(b),
        }
    }

    /// Whether `spot` lies in the closed range.
    #[inline]
    pub fn contains(&self, spot: f64) -> bool {
        spot >= self.lower && spot <= self.upper
    }
}

/// Sides of a [`RangeMonitor`] a path visited.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RangeVisits {
    /// Some step was inside the range
    pub inside: bool,
    /// Some step was outside the range
    pub outside: bool,
}

impl RangeVisits {
    /// Records one observed spot.
    #[inline]
    pub fn observe(&mut self, monitor: &RangeMonitor, spot: f64) {
        if monitor.contains(spot) {
            self.inside = true;
        } else {
            self.outside = true;
        }
    }
}

/// What a payoff may observe of one simulated path.
///
/// `min` and `max` include the initial spot, so a barrier placed exactly at
/// spot counts as touched. `range` is observed after each step only, and
/// stays all-false when no range is monitored.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PathSummary {
    /// Lowest monitored spot
    pub min: f64,
    /// Highest monitored spot
    pub max: f64,
    /// Spot at maturity
    pub terminal: f64,
    /// Visits to the monitored range
    pub range: RangeVisits,
}

impl PathSummary {
    /// Summary of a path that has not moved from `spot`.
    #[inline]
    pub fn at(spot: f64) -> Self {
        Self {
            min: spot,
            max: spot,
            terminal: spot,
            range: RangeVisits::default(),
        }
    }

    /// Whether the path touched or crossed a barrier at `level`, with the
    /// barrier side inferred from `spot`.
    #[inline]
    pub fn touched(&self, spot: f64, level: f64) -> bool {
        if level < spot {
            self.min <= level
        } else if level > spot {
            self.max >= level
        } else {
            true
        }
    }

    /// Whether the path left the open corridor `(lower, upper)`.
    #[inline]
    pub fn left_corridor(&self, lower: f64, upper: f64) -> bool {
        self.min <= lower || self.max >= upper
    }
}

/// Discounted Monte Carlo estimate.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct McEstimate {
    /// Discounted mean payoff.
    pub price: f64,
    /// Standard error of the price estimate.
    pub std_error: f64,
    /// Paths simulated.
    pub n_paths: usize,
    /// Steps per path.
    pub n_steps: usize,
    /// Base seed of the run.
    pub seed: u64,
}

impl McEstimate {
    /// Returns the 95% confidence interval half-width.
    #[inline]
    pub fn confidence_95(&self) -> f64 {
        1.96 * self.std_error
    }
}

#[derive(Clone, Copy, Debug, Default)]
struct BatchSums {
    sum: f64,
    sum_sq: f64,
    count: usize,
}

impl BatchSums {
    fn merge(&mut self, other: BatchSums) {
        self.sum += other.sum;
        self.sum_sq += other.sum_sq;
        self.count += other.count;
    }
}

/// Simulates `config.n_paths()` GBM paths and returns the discounted mean
/// of `payoff`.
///
/// # Errors
///
/// - `DegenerateInput` for invalid [`GbmParams`]
/// - `Cancelled` when `cancel` fires before all batches have started
/// - `NumericalInstability` when the estimate is not finite
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::mc::{simulate, GbmParams, MonteCarloConfig};
///
/// let config = MonteCarloConfig::builder()
///     .n_paths(2_000)
///     .n_steps(50)
///     .seed(1)
///     .build()
///     .unwrap();
/// let params = GbmParams::new(1.0, 0.02, 0.01, 0.10, 1.0);
///
/// // Undiscounted forward: E[S_T] = S·e^{(rd−rf)T}
/// let est = simulate(&params, &config, None, |path| path.terminal).unwrap();
/// let expected = (0.01_f64).exp() * (-0.02_f64).exp();
/// assert!((est.price - expected).abs() < 4.0 * est.std_error);
/// ```
pub fn simulate<F>(
    params: &GbmParams,
    config: &MonteCarloConfig,
    cancel: Option<&CancellationToken>,
    payoff: F,
) -> Result<McEstimate, PricingError>
where
    F: Fn(&PathSummary) -> f64 + Sync,
{
    simulate_monitored(params, config, cancel, None, payoff)
}

/// [`simulate`] with an optional range checked after every step; the
/// visits are reported in [`PathSummary::range`].
///
/// # Errors
///
/// As [`simulate`].
pub fn simulate_monitored<F>(
    params: &GbmParams,
    config: &MonteCarloConfig,
    cancel: Option<&CancellationToken>,
    monitor: Option<RangeMonitor>,
    payoff: F,
) -> Result<McEstimate, PricingError>
where
    F: Fn(&PathSummary) -> f64 + Sync,
{
    params.validate()?;

    let seed = config
        .seed()
        .unwrap_or_else(|| PricerRng::from_entropy().seed());
    let n_steps = config.n_steps();
    let dt = params.maturity / n_steps as f64;
    let drift = (params.rate_domestic - params.rate_foreign
        - 0.5 * params.volatility * params.volatility)
        * dt;
    let diffusion = params.volatility * dt.sqrt();

    debug!(
        n_paths = config.n_paths(),
        n_steps,
        n_batches = config.n_batches(),
        seed,
        monitored = monitor.is_some(),
        "starting GBM simulation"
    );

    let batch_size = config.batch_size();
    let n_paths = config.n_paths();
    let partials: Vec<Result<BatchSums, PricingError>> = (0..config.n_batches())
        .into_par_iter()
        .map(|batch| {
            if cancel.is_some_and(|token| token.is_cancelled()) {
                return Err(PricingError::Cancelled);
            }
            let start = batch * batch_size;
            let count = batch_size.min(n_paths - start);
            let mut rng = PricerRng::for_stream(seed, batch as u64);
            let mut draws = vec![0.0; n_steps];
            let mut sums = BatchSums::default();

            for _ in 0..count {
                rng.fill_normal(&mut draws);
                let mut spot = params.spot;
                let mut summary = PathSummary::at(spot);
                for z in &draws {
                    spot *= (drift + diffusion * z).exp();
                    summary.min = summary.min.min(spot);
                    summary.max = summary.max.max(spot);
                    if let Some(monitor) = &monitor {
                        summary.range.observe(monitor, spot);
                    }
                }
                summary.terminal = spot;

                let value = payoff(&summary);
                sums.sum += value;
                sums.sum_sq += value * value;
            }
            sums.count = count;
            trace!(batch, count, "batch complete");
            Ok(sums)
        })
        .collect();

    let mut total = BatchSums::default();
    for partial in partials {
        total.merge(partial?);
    }

    let n = total.count as f64;
    let mean = total.sum / n;
    let variance = if total.count > 1 {
        ((total.sum_sq - total.sum * mean) / (n - 1.0)).max(0.0)
    } else {
        0.0
    };
    let df = params.discount_factor();
    let estimate = McEstimate {
        price: df * mean,
        std_error: df * (variance / n).sqrt(),
        n_paths: total.count,
        n_steps,
        seed,
    };

    if !estimate.price.is_finite() {
        return Err(PricingError::NumericalInstability {
            message: format!("non-finite Monte Carlo estimate (seed {})", seed),
        });
    }
    Ok(estimate)
}
