//! Monte Carlo digital (binary) pricer.
//!
//! Touch and range conditions are tested at every simulation step. A range
//! binary pays when some step lies in `[lower, upper]`, an outside binary
//! when some step lies outside it. A satisfied condition pays the fixed
//! rebate.

use pricer_models::instruments::DigitalKind;

use super::cancel::CancellationToken;
use super::config::MonteCarloConfig;
use super::paths::{simulate_monitored, GbmParams, McEstimate, PathSummary, RangeMonitor};
use crate::error::PricingError;

/// Digital contract as seen by the path simulator.
///
/// # Examples
///
/// ```rust
/// use pricer_models::instruments::DigitalKind;
/// use pricer_pricing::mc::DigitalPayoff;
///
/// let range = DigitalPayoff::new(DigitalKind::RangeBinary, 1.10, Some(1.05), 0.05).unwrap();
/// assert_eq!(range.bounds(), (1.05, 1.10));
///
/// // Double-touch kinds need a second barrier
/// assert!(DigitalPayoff::new(DigitalKind::DoubleTouch, 1.10, None, 0.05).is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DigitalPayoff {
    subtype: DigitalKind,
    level: f64,
    other: f64,
    rebate: f64,
}

impl DigitalPayoff {
    /// Creates a digital payoff.
    ///
    /// `second` is the second barrier for double-touch kinds and the other
    /// range bound (strike or second barrier) for range kinds; it is ignored
    /// by single-touch kinds.
    ///
    /// # Errors
    ///
    /// `MissingField` when a double or range kind has no second level.
    pub fn new(
        subtype: DigitalKind,
        barrier: f64,
        second: Option<f64>,
        rebate: f64,
    ) -> Result<Self, PricingError> {
        let needs_second = !matches!(subtype, DigitalKind::OneTouch | DigitalKind::NoTouch);
        let other = match (needs_second, second) {
            (true, Some(level)) => level,
            (true, None) => {
                return Err(PricingError::MissingField {
                    field: "second barrier",
                    kind: format!("{:?}", subtype),
                })
            }
            (false, _) => barrier,
        };
        Ok(Self {
            subtype,
            level: barrier,
            other,
            rebate,
        })
    }

    /// Lower and upper level.
    #[inline]
    pub fn bounds(&self) -> (f64, f64) {
        (self.level.min(self.other), self.level.max(self.other))
    }

    /// Range the simulator must watch, for range kinds.
    pub fn monitor(&self) -> Option<RangeMonitor> {
        match self.subtype {
            DigitalKind::RangeBinary | DigitalKind::OutsideBinary => {
                Some(RangeMonitor::new(self.level, self.other))
            }
            _ => None,
        }
    }

    /// Undiscounted payoff of one path started at `spot`.
    ///
    /// Range kinds read [`PathSummary::range`], which is only filled when
    /// the path was simulated with [`DigitalPayoff::monitor`].
    pub fn value(&self, spot: f64, path: &PathSummary) -> f64 {
        let (lower, upper) = self.bounds();
        let pays = match self.subtype {
            DigitalKind::OneTouch => path.touched(spot, self.level),
            DigitalKind::NoTouch => !path.touched(spot, self.level),
            DigitalKind::DoubleTouch => path.left_corridor(lower, upper),
            DigitalKind::DoubleNoTouch => !path.left_corridor(lower, upper),
            DigitalKind::RangeBinary => path.range.inside,
            DigitalKind::OutsideBinary => path.range.outside,
        };
        if pays {
            self.rebate
        } else {
            0.0
        }
    }
}

/// Prices a digital option by simulation.
///
/// # Errors
///
/// Propagates [`simulate`] errors.
pub fn price_digital_mc(
    payoff: &DigitalPayoff,
    params: &GbmParams,
    config: &MonteCarloConfig,
    cancel: Option<&CancellationToken>,
) -> Result<McEstimate, PricingError> {
    let spot = params.spot;
    simulate_monitored(params, config, cancel, payoff.monitor(), |path| {
        payoff.value(spot, path)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mc::RangeVisits;
    use approx::assert_abs_diff_eq;

    fn summary(min: f64, max: f64, terminal: f64) -> PathSummary {
        PathSummary {
            min,
            max,
            terminal,
            ..PathSummary::at(terminal)
        }
    }

    fn visited(inside: bool, outside: bool, terminal: f64) -> PathSummary {
        PathSummary {
            range: RangeVisits { inside, outside },
            ..PathSummary::at(terminal)
        }
    }

    // ==========================================================
    // Payoff conditions
    // ==========================================================

    #[test]
    fn test_one_touch_and_no_touch_are_complementary() {
        let touch = DigitalPayoff::new(DigitalKind::OneTouch, 1.1, None, 0.05).unwrap();
        let no_touch = DigitalPayoff::new(DigitalKind::NoTouch, 1.1, None, 0.05).unwrap();
        for path in [summary(0.9, 1.12, 1.0), summary(0.9, 1.08, 1.0)] {
            assert_abs_diff_eq!(
                touch.value(1.0, &path) + no_touch.value(1.0, &path),
                0.05,
                epsilon = 1e-15
            );
        }
        assert_eq!(touch.value(1.0, &summary(0.9, 1.12, 1.0)), 0.05);
    }

    #[test]
    fn test_one_touch_below_spot() {
        let touch = DigitalPayoff::new(DigitalKind::OneTouch, 0.9, None, 0.1).unwrap();
        assert_eq!(touch.value(1.0, &summary(0.89, 1.3, 1.2)), 0.1);
        assert_eq!(touch.value(1.0, &summary(0.91, 1.3, 1.2)), 0.0);
    }

    #[test]
    fn test_double_touch_kinds() {
        let dt = DigitalPayoff::new(DigitalKind::DoubleTouch, 1.1, Some(0.9), 0.05).unwrap();
        let dnt = DigitalPayoff::new(DigitalKind::DoubleNoTouch, 0.9, Some(1.1), 0.05).unwrap();
        let quiet = summary(0.95, 1.05, 1.0);
        let wild = summary(0.85, 1.05, 1.0);
        assert_eq!(dt.value(1.0, &quiet), 0.0);
        assert_eq!(dt.value(1.0, &wild), 0.05);
        assert_eq!(dnt.value(1.0, &quiet), 0.05);
        assert_eq!(dnt.value(1.0, &wild), 0.0);
    }

    #[test]
    fn test_range_and_outside_binary() {
        let range = DigitalPayoff::new(DigitalKind::RangeBinary, 1.10, Some(1.00), 0.05).unwrap();
        let outside = DigitalPayoff::new(DigitalKind::OutsideBinary, 1.10, Some(1.00), 0.05).unwrap();
        let only_inside = visited(true, false, 1.05);
        let only_outside = visited(false, true, 1.05);
        assert_eq!(range.value(1.0, &only_inside), 0.05);
        assert_eq!(range.value(1.0, &only_outside), 0.0);
        assert_eq!(outside.value(1.0, &only_inside), 0.0);
        assert_eq!(outside.value(1.0, &only_outside), 0.05);
    }

    #[test]
    fn test_range_binary_pays_on_intermediate_visit() {
        // Traded inside the range, finished above it
        let range = DigitalPayoff::new(DigitalKind::RangeBinary, 1.10, Some(1.00), 0.05).unwrap();
        let path = PathSummary {
            min: 0.98,
            max: 1.22,
            terminal: 1.20,
            range: RangeVisits {
                inside: true,
                outside: true,
            },
        };
        assert_eq!(range.value(1.05, &path), 0.05);

        let outside = DigitalPayoff::new(DigitalKind::OutsideBinary, 1.10, Some(1.00), 0.05).unwrap();
        assert_eq!(outside.value(1.05, &path), 0.05);
    }

    #[test]
    fn test_monitor_only_for_range_kinds() {
        let range = DigitalPayoff::new(DigitalKind::RangeBinary, 1.10, Some(1.00), 0.05).unwrap();
        assert_eq!(range.monitor(), Some(RangeMonitor::new(1.00, 1.10)));
        let touch = DigitalPayoff::new(DigitalKind::OneTouch, 1.10, None, 0.05).unwrap();
        assert_eq!(touch.monitor(), None);
    }

    #[test]
    fn test_missing_second_level() {
        for subtype in [
            DigitalKind::DoubleTouch,
            DigitalKind::DoubleNoTouch,
            DigitalKind::RangeBinary,
            DigitalKind::OutsideBinary,
        ] {
            assert!(matches!(
                DigitalPayoff::new(subtype, 1.1, None, 0.05),
                Err(PricingError::MissingField { .. })
            ));
        }
    }

    // ==========================================================
    // Simulation
    // ==========================================================

    #[test]
    fn test_touch_plus_no_touch_is_discounted_rebate() {
        let params = GbmParams::new(1.0, 0.03, 0.01, 0.12, 0.5);
        let config = MonteCarloConfig::builder()
            .n_paths(2_000)
            .n_steps(100)
            .seed(11)
            .build()
            .unwrap();
        let touch = DigitalPayoff::new(DigitalKind::OneTouch, 1.05, None, 0.05).unwrap();
        let no_touch = DigitalPayoff::new(DigitalKind::NoTouch, 1.05, None, 0.05).unwrap();
        let a = price_digital_mc(&touch, &params, &config, None).unwrap();
        let b = price_digital_mc(&no_touch, &params, &config, None).unwrap();
        assert_abs_diff_eq!(a.price + b.price, 0.05 * params.discount_factor(), epsilon = 1e-12);
    }

    #[test]
    fn test_range_binary_simulation_watches_every_step() {
        // Zero volatility: spot drifts from 1.0 to e^0.1 ≈ 1.105, crossing
        // [1.02, 1.05] on the way and finishing above it
        let params = GbmParams::new(1.0, 0.10, 0.0, 0.0, 1.0);
        let config = MonteCarloConfig::builder()
            .n_paths(100)
            .n_steps(100)
            .seed(3)
            .build()
            .unwrap();
        let rebate = 0.05 * params.discount_factor();

        let crossed = DigitalPayoff::new(DigitalKind::RangeBinary, 1.05, Some(1.02), 0.05).unwrap();
        let est = price_digital_mc(&crossed, &params, &config, None).unwrap();
        assert_abs_diff_eq!(est.price, rebate, epsilon = 1e-12);

        // Steps below 1.02 already count as outside
        let outside = DigitalPayoff::new(DigitalKind::OutsideBinary, 1.05, Some(1.02), 0.05).unwrap();
        let est = price_digital_mc(&outside, &params, &config, None).unwrap();
        assert_abs_diff_eq!(est.price, rebate, epsilon = 1e-12);

        // A range above the whole path is never visited
        let missed = DigitalPayoff::new(DigitalKind::RangeBinary, 1.30, Some(1.20), 0.05).unwrap();
        let est = price_digital_mc(&missed, &params, &config, None).unwrap();
        assert_eq!(est.price, 0.0);
    }
}
