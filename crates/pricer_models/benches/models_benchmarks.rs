//! Criterion benchmarks for the closed-form pricers.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use pricer_models::analytical::{
    double_barrier_price, fx_option_price, single_barrier_price, BarrierParams,
    DoubleBarrierParams,
};
use pricer_models::instruments::{KnockDirection, OptionType};

fn bench_garman_kohlhagen(c: &mut Criterion) {
    c.bench_function("gk_call", |b| {
        b.iter(|| {
            fx_option_price(
                OptionType::Call,
                black_box(1.085),
                black_box(1.10),
                0.01,
                0.005,
                1.0,
                0.10,
            )
        })
    });
}

fn bench_single_barrier(c: &mut Criterion) {
    let params = BarrierParams::new(1.085, 1.10, 1.20, 0.01, 0.005, 0.10, 1.0).unwrap();
    c.bench_function("single_barrier_cuo", |b| {
        b.iter(|| {
            single_barrier_price(
                OptionType::Call,
                KnockDirection::Out,
                false,
                black_box(&params),
            )
        })
    });
}

fn bench_double_barrier_terms(c: &mut Criterion) {
    let params = DoubleBarrierParams::new(1.085, 1.10, 1.00, 1.20, 0.01, 0.005, 0.10, 1.0).unwrap();
    let mut group = c.benchmark_group("double_barrier_terms");
    for terms in [2usize, 5, 10] {
        group.bench_with_input(BenchmarkId::from_parameter(terms), &terms, |b, &terms| {
            b.iter(|| {
                double_barrier_price(
                    OptionType::Call,
                    KnockDirection::Out,
                    black_box(&params),
                    terms,
                )
            })
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_garman_kohlhagen,
    bench_single_barrier,
    bench_double_barrier_terms
);
criterion_main!(benches);
