//! Criterion benchmarks for the Monte Carlo estimators and dispatcher.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use pricer_core::market_data::MarketSnapshot;
use pricer_core::types::Date;
use pricer_models::instruments::{DigitalKind, Instrument, InstrumentKind};
use pricer_pricing::mc::{price_digital_mc, DigitalPayoff, GbmParams, MonteCarloConfig};
use pricer_pricing::{EngineConfig, InstrumentPricer};

fn bench_digital_paths(c: &mut Criterion) {
    let params = GbmParams::new(1.085, 0.01, 0.005, 0.10, 0.5);
    let payoff = DigitalPayoff::new(DigitalKind::OneTouch, 1.12, None, 0.05).unwrap();
    let mut group = c.benchmark_group("digital_one_touch");
    group.sample_size(20);
    for n_paths in [1_000usize, 10_000] {
        let config = MonteCarloConfig::builder()
            .n_paths(n_paths)
            .n_steps(504)
            .seed(42)
            .build()
            .unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(n_paths), &config, |b, config| {
            b.iter(|| price_digital_mc(black_box(&payoff), &params, config, None))
        });
    }
    group.finish();
}

fn bench_dispatch(c: &mut Criterion) {
    let valuation = Date::from_ymd(2024, 6, 3).unwrap();
    let maturity = Date::from_ymd(2025, 6, 3).unwrap();
    let market = MarketSnapshot::new(1.0856, 0.0525, 0.04, 0.0875, valuation).unwrap();
    let pair = "EURUSD".parse().unwrap();
    let pricer = InstrumentPricer::new(EngineConfig::default().with_seed(42));

    let call = Instrument::new("C", InstrumentKind::VanillaCall, pair, 1e6, maturity)
        .with_strike(1.10);
    let dko = Instrument::new(
        "DKO",
        "Double Knock-Out Call".parse().unwrap(),
        pair,
        1e6,
        maturity,
    )
    .with_strike(1.10)
    .with_barrier(1.00)
    .with_second_barrier(1.20);
    let touch = Instrument::new(
        "OT",
        InstrumentKind::Digital {
            subtype: DigitalKind::OneTouch,
        },
        pair,
        1e6,
        maturity,
    )
    .with_barrier(1.12);

    c.bench_function("dispatch_vanilla", |b| {
        b.iter(|| pricer.price(black_box(&call), &market))
    });
    c.bench_function("dispatch_double_knock_out", |b| {
        b.iter(|| pricer.price(black_box(&dko), &market))
    });
    let mut group = c.benchmark_group("dispatch_digital");
    group.sample_size(10);
    group.bench_function("one_touch", |b| {
        b.iter(|| pricer.price(black_box(&touch), &market))
    });
    group.finish();
}

criterion_group!(benches, bench_digital_paths, bench_dispatch);
criterion_main!(benches);
