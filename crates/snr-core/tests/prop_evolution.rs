// ─────────────────────────────────────────────────────────────────────
// SNR Evolution Core — Property-Based Tests (proptest) for snr-core
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Property-based tests for snr-core using proptest.
//!
//! Covers: velocity as the derivative of radius, t(r) round trips,
//! merger-time monotonicity in energy and ambient density.

use proptest::prelude::*;
use snr_core::evolution::{evaluate, EvolutionState};
use snr_types::config::PhysicalInputs;
use snr_types::constants::KMS_PER_PC_YR;
use snr_types::state::Phase;

fn state(n: u8, e_51: f64, n_0: f64) -> EvolutionState {
    let mut inputs = PhysicalInputs::reference(n);
    inputs.e_51 = e_51;
    inputs.n_0 = n_0;
    inputs.t_ratio = Some(1.0);
    evaluate(&inputs).unwrap()
}

/// Central-difference dr/dt [km/s] of `phase` at `t`.
fn slope(state: &EvolutionState, phase: Phase, t: f64) -> f64 {
    let h = 1e-5 * t;
    let r_hi = state.radius(phase, t + h).unwrap();
    let r_lo = state.radius(phase, t - h).unwrap();
    (r_hi - r_lo) / (2.0 * h) * KMS_PER_PC_YR
}

// ── Velocity Consistency ─────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// Closed-form ED velocity is the derivative of the ED radius.
    #[test]
    fn ed_velocity_is_radius_slope(
        n in prop::sample::select(vec![0u8, 6, 7, 9, 12, 14]),
        tau in 0.02f64..0.9,
    ) {
        let s = state(n, 1.0, 1.0);
        let t = tau * s.scales().t_ch;
        let v = s.velocity(Phase::Ed, t).unwrap();
        let fd = slope(&s, Phase::Ed, t);
        prop_assert!((fd - v).abs() / v < 1e-5, "n={} tau={}: fd={}, v={}", n, tau, fd, v);
    }

    /// Same for the Sedov-Taylor blast wave.
    #[test]
    fn st_velocity_is_radius_slope(
        n in prop::sample::select(vec![0u8, 7, 12]),
        tau in 1.0f64..20.0,
    ) {
        let s = state(n, 1.0, 1.0);
        let t = tau * s.scales().t_ch;
        let v = s.velocity(Phase::St, t).unwrap();
        let fd = slope(&s, Phase::St, t);
        prop_assert!((fd - v).abs() / v < 1e-5, "n={} tau={}: fd={}, v={}", n, tau, fd, v);
    }

    /// Shallow-ejecta velocity, a function of radius, matches the slope of
    /// the inverted t(r) fit.
    #[test]
    fn shallow_ed_velocity_is_radius_slope(
        n in prop::sample::select(vec![2u8, 4]),
        frac in 0.05f64..0.9,
    ) {
        let s = state(n, 1.0, 1.0);
        let t = frac * s.law_end(Phase::Ed).unwrap();
        let v = s.velocity(Phase::Ed, t).unwrap();
        let fd = slope(&s, Phase::Ed, t);
        prop_assert!((fd - v).abs() / v < 1e-4, "n={} t={}: fd={}, v={}", n, t, fd, v);
    }
}

// ── Inversion Round Trip ─────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    /// time_of_radius(radius(t)) == t for laws given as t(r).
    #[test]
    fn time_of_radius_round_trip(
        n in prop::sample::select(vec![2u8, 4]),
        frac in 0.01f64..0.95,
    ) {
        let s = state(n, 1.0, 1.0);
        let t = frac * s.law_end(Phase::Ed).unwrap();
        let r = s.radius(Phase::Ed, t).unwrap();
        let back = s.time_of_radius(Phase::Ed, r).unwrap();
        prop_assert!((back - t).abs() / t < 1e-8, "n={} t={}: back={}", n, t, back);
    }
}

// ── Merger Monotonicity ──────────────────────────────────────────────

/// Sedov merger for uniform ejecta.
fn st_merger(e_51: f64, n_0: f64) -> f64 {
    state(0, e_51, n_0).mergers().get(Phase::St).unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    /// More energetic explosions merge later.
    #[test]
    fn mergers_grow_with_energy(
        n in prop::sample::select(vec![7u8, 12]),
        e_51 in 0.3f64..3.0,
        factor in 1.05f64..4.0,
    ) {
        let weak = state(n, e_51, 1.0);
        let strong = state(n, e_51 * factor, 1.0);
        for phase in [Phase::Ed, Phase::St] {
            let a = weak.mergers().get(phase).unwrap();
            let b = strong.mergers().get(phase).unwrap();
            prop_assert!(b >= a, "n={} {}: {} -> {}", n, phase, a, b);
        }
    }

    /// Denser surroundings merge earlier.
    #[test]
    fn mergers_shrink_with_density(
        n in prop::sample::select(vec![7u8, 12]),
        n_0 in 0.05f64..5.0,
        factor in 1.05f64..4.0,
    ) {
        let thin = state(n, 1.0, n_0);
        let dense = state(n, 1.0, n_0 * factor);
        for phase in [Phase::Ed, Phase::St] {
            let a = thin.mergers().get(phase).unwrap();
            let b = dense.mergers().get(phase).unwrap();
            prop_assert!(b <= a, "n={} {}: {} -> {}", n, phase, a, b);
        }
    }

    /// The n = 0 Sedov merger follows the same ordering.
    #[test]
    fn uniform_ejecta_st_merger_ordering(
        e_51 in 0.3f64..3.0,
        n_0 in 0.05f64..5.0,
        factor in 1.05f64..4.0,
    ) {
        prop_assert!(st_merger(e_51 * factor, n_0) >= st_merger(e_51, n_0));
        prop_assert!(st_merger(e_51, n_0 * factor) <= st_merger(e_51, n_0));
    }
}
