// ─────────────────────────────────────────────────────────────────────
// SNR Evolution Core — Root Finding Benchmark
// © 1998–2026 Miroslav Šotek. All rights reserved.
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use criterion::{criterion_group, criterion_main, Criterion};
use snr_math::roots::{brent, expand_bracket, secant};
use std::hint::black_box;

fn bench_brent(c: &mut Criterion) {
    c.bench_function("brent_power_law_crossing", |b| {
        b.iter(|| brent(|t: f64| Ok(t.powf(-0.6) - black_box(0.01)), 1.0, 1e6))
    });
}

fn bench_secant(c: &mut Criterion) {
    c.bench_function("secant_reverse_shock_collapse", |b| {
        b.iter(|| secant(|t: f64| Ok(t * (0.779 - 0.106 * t - 0.533 * t.ln())), black_box(3.0)))
    });
}

fn bench_expand_then_brent(c: &mut Criterion) {
    c.bench_function("expand_bracket_then_brent", |b| {
        b.iter(|| {
            let f = |t: f64| Ok(2000.0 * t.powf(-0.6) - 14.0);
            let (lo, hi) = expand_bracket(f, black_box(10.0), 2.0, 80)?;
            brent(f, lo, hi)
        })
    });
}

criterion_group!(benches, bench_brent, bench_secant, bench_expand_then_brent);
criterion_main!(benches);
