//! Criterion benchmarks for pricer_core numerical primitives.
//!
//! Measures the normal CDF, which every closed-form pricer calls several
//! times per valuation.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use pricer_core::math::distributions::{norm_cdf, norm_pdf};

fn bench_norm_cdf(c: &mut Criterion) {
    let xs: Vec<f64> = (0..1000).map(|i| -5.0 + i as f64 * 0.01).collect();

    c.bench_function("norm_cdf_1000", |b| {
        b.iter(|| xs.iter().map(|&x| norm_cdf(black_box(x))).sum::<f64>())
    });

    c.bench_function("norm_pdf_1000", |b| {
        b.iter(|| xs.iter().map(|&x| norm_pdf(black_box(x))).sum::<f64>())
    });
}

criterion_group!(benches, bench_norm_cdf);
criterion_main!(benches);
