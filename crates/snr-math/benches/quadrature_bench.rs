// ─────────────────────────────────────────────────────────────────────
// SNR Evolution Core — Quadrature Benchmark
// © 1998–2026 Miroslav Šotek. All rights reserved.
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use criterion::{criterion_group, criterion_main, Criterion};
use snr_math::quadrature::{quad, QuadConfig};
use std::hint::black_box;

fn bench_smooth_1d(c: &mut Criterion) {
    let cfg = QuadConfig::default();
    c.bench_function("quad_exp_sin_1d", |b| {
        b.iter(|| quad(|x: f64| Ok((-x).exp() * (3.0 * x).sin()), 0.0, black_box(5.0), &[], &cfg))
    });
}

fn bench_kinked_1d(c: &mut Criterion) {
    let cfg = QuadConfig::with_epsabs(1e-5);
    c.bench_function("quad_kinked_with_points", |b| {
        b.iter(|| {
            quad(
                |x: f64| Ok(if x < 0.8 { x * x } else { 4.0 * x.powi(8) }),
                0.0,
                1.0,
                black_box(&[0.8]),
                &cfg,
            )
        })
    });
}

fn bench_nested_2d(c: &mut Criterion) {
    let cfg = QuadConfig::with_epsabs(1e-5);
    let mut group = c.benchmark_group("quad_nested");
    group.sample_size(20);
    group.bench_function("sphere_chord_2d", |b| {
        b.iter(|| {
            // ∫₀¹ b ∫₀^√(1-b²) ds db
            quad(
                |bb| {
                    let top = (1.0 - bb * bb).max(0.0).sqrt();
                    quad(|_s| Ok(bb), 0.0, top, &[], &cfg)
                },
                0.0,
                1.0,
                &[],
                &cfg,
            )
        })
    });
    group.finish();
}

criterion_group!(benches, bench_smooth_1d, bench_kinked_1d, bench_nested_2d);
criterion_main!(benches);
