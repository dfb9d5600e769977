// ─────────────────────────────────────────────────────────────────────
// SNR Evolution Core — Emissivity Benchmark
// © 1998–2026 Miroslav Šotek. All rights reserved.
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use criterion::{criterion_group, criterion_main, Criterion};
use snr_core::emissivity::EmissivityEngine;
use snr_core::evolution::evaluate;
use snr_core::reference::ReferenceData;
use snr_types::config::{EmissivitySettings, PhysicalInputs};
use std::hint::black_box;

fn sedov_inputs() -> PhysicalInputs {
    let mut inputs = PhysicalInputs::reference(7);
    inputs.t_ratio = Some(1.0);
    inputs.t = 5000.0;
    inputs
}

fn bench_emission_measure(c: &mut Criterion) {
    let Ok(state) = evaluate(&sedov_inputs()) else {
        return;
    };
    let reference = ReferenceData::empty();
    c.bench_function("emission_measure_sedov_cold_cache", |b| {
        b.iter(|| {
            let engine = EmissivityEngine::new(&state, &reference, EmissivitySettings::default())?;
            engine.emission_measure()
        })
    });
}

fn bench_spectrum_point(c: &mut Criterion) {
    let Ok(state) = evaluate(&sedov_inputs()) else {
        return;
    };
    let reference = ReferenceData::empty();
    let Ok(engine) = EmissivityEngine::new(&state, &reference, EmissivitySettings::default()) else {
        return;
    };
    c.bench_function("luminosity_spectrum_sedov_warm_cache", |b| {
        b.iter(|| engine.luminosity_spectrum(black_box(1.0)))
    });
}

criterion_group!(benches, bench_emission_measure, bench_spectrum_point);
criterion_main!(benches);
