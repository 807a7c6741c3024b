//! Analytical comparison tests for Monte Carlo pricing.
//!
//! The Monte Carlo estimators must converge to the closed forms they back
//! up:
//!
//! 1. **Vanilla**: MC vs Garman–Kohlhagen
//! 2. **Single barrier**: MC vs Reiner–Rubinstein
//! 3. **Double barrier**: MC vs Ikeda–Kunitomo
//! 4. **Convergence**: standard error shrinks as `1/√N`

use pricer_models::analytical::{
    double_barrier_price, fx_option_price, single_barrier_price, BarrierParams,
    DoubleBarrierParams, DOUBLE_BARRIER_SERIES_TERMS,
};
use pricer_models::instruments::{KnockDirection, OptionType};
use pricer_pricing::mc::{
    price_barrier_mc, price_vanilla_mc, BarrierPayoff, GbmParams, McEstimate, MonteCarloConfig,
};

const SPOT: f64 = 1.0;
const STRIKE: f64 = 1.0;
const RD: f64 = 0.02;
const RF: f64 = 0.01;
const VOL: f64 = 0.10;
const EXPIRY: f64 = 0.5;

fn gbm() -> GbmParams {
    GbmParams::new(SPOT, RD, RF, VOL, EXPIRY)
}

fn config(n_paths: usize, n_steps: usize) -> MonteCarloConfig {
    MonteCarloConfig::builder()
        .n_paths(n_paths)
        .n_steps(n_steps)
        .seed(42)
        .build()
        .unwrap()
}

fn assert_within(est: &McEstimate, exact: f64, slack: f64) {
    let tolerance = 4.0 * est.std_error + slack;
    assert!(
        (est.price - exact).abs() < tolerance,
        "MC {} ± {} vs closed form {}",
        est.price,
        est.std_error,
        exact
    );
}

// ============================================================================
// Vanilla
// ============================================================================

#[test]
fn test_vanilla_call_and_put_match_garman_kohlhagen() {
    for option in [OptionType::Call, OptionType::Put] {
        let exact = fx_option_price(option, SPOT, STRIKE, RD, RF, EXPIRY, VOL).unwrap();
        let est = price_vanilla_mc(option, STRIKE, &gbm(), &config(50_000, 1), None).unwrap();
        assert_within(&est, exact, 1e-4);
    }
}

// ============================================================================
// Single barrier
// ============================================================================

#[test]
fn test_far_down_and_out_call_matches_closed_form() {
    let barrier = 0.8;
    let params = BarrierParams::new(SPOT, STRIKE, barrier, RD, RF, VOL, EXPIRY).unwrap();
    let exact = single_barrier_price(OptionType::Call, KnockDirection::Out, false, &params).unwrap();

    let payoff = BarrierPayoff::Single {
        option: OptionType::Call,
        knock: KnockDirection::Out,
        reverse: false,
        strike: STRIKE,
        barrier,
    };
    let est = price_barrier_mc(&payoff, &gbm(), &config(50_000, 126), None).unwrap();
    assert_within(&est, exact, 1e-4);
}

#[test]
fn test_up_and_in_put_is_small_and_matches() {
    let barrier = 1.1;
    let params = BarrierParams::new(SPOT, STRIKE, barrier, RD, RF, VOL, EXPIRY).unwrap();
    let exact = single_barrier_price(OptionType::Put, KnockDirection::In, false, &params).unwrap();

    let payoff = BarrierPayoff::Single {
        option: OptionType::Put,
        knock: KnockDirection::In,
        reverse: false,
        strike: STRIKE,
        barrier,
    };
    let est = price_barrier_mc(&payoff, &gbm(), &config(20_000, 126), None).unwrap();
    assert!(exact < 1e-3);
    assert_within(&est, exact, 2e-4);
}

// ============================================================================
// Double barrier
// ============================================================================

#[test]
fn test_double_knock_out_call_matches_closed_form() {
    let (lower, upper) = (0.85, 1.2);
    let params = DoubleBarrierParams::new(SPOT, STRIKE, lower, upper, RD, RF, VOL, EXPIRY).unwrap();
    let exact = double_barrier_price(
        OptionType::Call,
        KnockDirection::Out,
        &params,
        DOUBLE_BARRIER_SERIES_TERMS,
    )
    .unwrap();

    let payoff = BarrierPayoff::Double {
        option: OptionType::Call,
        knock: KnockDirection::Out,
        strike: STRIKE,
        lower,
        upper,
    };
    let est = price_barrier_mc(&payoff, &gbm(), &config(20_000, 126), None).unwrap();
    // Discrete monitoring leaves a small upward bias
    assert_within(&est, exact, 5e-4);
}

// ============================================================================
// Convergence
// ============================================================================

#[test]
fn test_standard_error_shrinks_with_path_count() {
    let payoff = BarrierPayoff::Single {
        option: OptionType::Call,
        knock: KnockDirection::Out,
        reverse: false,
        strike: STRIKE,
        barrier: 0.8,
    };
    let small = price_barrier_mc(&payoff, &gbm(), &config(200, 126), None).unwrap();
    let large = price_barrier_mc(&payoff, &gbm(), &config(50_000, 126), None).unwrap();

    // √(50_000 / 200) ≈ 15.8
    let ratio = small.std_error / large.std_error;
    assert!((10.0..=25.0).contains(&ratio), "ratio {}", ratio);
}

#[test]
fn test_same_seed_is_reproducible() {
    let payoff = BarrierPayoff::Double {
        option: OptionType::Put,
        knock: KnockDirection::In,
        strike: STRIKE,
        lower: 0.9,
        upper: 1.1,
    };
    let a = price_barrier_mc(&payoff, &gbm(), &config(2_000, 126), None).unwrap();
    let b = price_barrier_mc(&payoff, &gbm(), &config(2_000, 126), None).unwrap();
    assert_eq!(a, b);
}
