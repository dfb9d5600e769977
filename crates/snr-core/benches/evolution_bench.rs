// ─────────────────────────────────────────────────────────────────────
// SNR Evolution Core — Evolution Benchmark
// © 1998–2026 Miroslav Šotek. All rights reserved.
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use criterion::{criterion_group, criterion_main, Criterion};
use snr_core::evolution::evaluate;
use snr_types::config::{PhysicalInputs, SamplingSettings};
use snr_types::state::PhaseRange;
use std::hint::black_box;

fn inputs(n: u8) -> PhysicalInputs {
    let mut inputs = PhysicalInputs::reference(n);
    inputs.t_ratio = Some(1.0);
    inputs
}

fn bench_evaluate(c: &mut Criterion) {
    let steep = inputs(7);
    c.bench_function("evaluate_n7_standard", |b| {
        b.iter(|| evaluate(black_box(&steep)))
    });
    let shallow = inputs(2);
    c.bench_function("evaluate_n2_standard", |b| {
        b.iter(|| evaluate(black_box(&shallow)))
    });
}

fn bench_output_map(c: &mut Criterion) {
    let Ok(state) = evaluate(&inputs(7)) else {
        return;
    };
    c.bench_function("output_map_n7", |b| b.iter(|| black_box(&state).output_map()));
}

fn bench_plot_data(c: &mut Criterion) {
    let Ok(state) = evaluate(&inputs(7)) else {
        return;
    };
    let sampling = SamplingSettings::default();
    c.bench_function("plot_data_n7_default_sampling", |b| {
        b.iter(|| state.plot_data(black_box(PhaseRange::Current), &sampling))
    });
}

criterion_group!(benches, bench_evaluate, bench_output_map, bench_plot_data);
criterion_main!(benches);
