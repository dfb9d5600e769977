// ─────────────────────────────────────────────────────────────────────
// SNR Evolution Core — Property-Based Tests (proptest) for snr-math
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Property-based tests for snr-math using proptest.
//!
//! Covers: Brent and secant root finders, bracket expansion,
//! Gauss–Kronrod quadrature, linear interpolation.

use ndarray::Array1;
use proptest::prelude::*;
use snr_math::interp::interp1d;
use snr_math::quadrature::{cumulative_trapezoid, integrate, quad, QuadConfig};
use snr_math::roots::{brent, expand_bracket, secant};

// ── Root Finder Properties ───────────────────────────────────────────

proptest! {
    /// Brent recovers the root of any monotone cubic bracketed around it.
    #[test]
    fn brent_finds_cubic_root(root in -50.0f64..50.0, scale in 0.1f64..10.0) {
        let f = |x: f64| Ok(scale * (x - root).powi(3) + (x - root));
        let x = brent(f, root - 60.0, root + 70.0).unwrap();
        prop_assert!((x - root).abs() < 1e-9, "x = {}, root = {}", x, root);
    }

    /// Secant converges on a power-law decay crossing from nearby starts.
    #[test]
    fn secant_power_law_crossing(target in 1.0f64..100.0, offset in 0.8f64..1.2) {
        // v(t) = t^-0.6 crosses target^-0.6 at t = target
        let level = target.powf(-0.6);
        let x = secant(|t: f64| Ok(t.powf(-0.6) - level), target * offset).unwrap();
        prop_assert!((x - target).abs() / target < 1e-6, "x = {}, target = {}", x, target);
    }

    /// Expanded brackets always contain the crossing.
    #[test]
    fn expanded_bracket_contains_crossing(crossing in 1.5f64..1e6, factor in 1.1f64..4.0) {
        let (lo, hi) = expand_bracket(|t| Ok(crossing - t), 1.0, factor, 500).unwrap();
        prop_assert!(lo <= crossing && crossing <= hi, "[{}, {}] vs {}", lo, hi, crossing);
    }
}

// ── Quadrature Properties ────────────────────────────────────────────

proptest! {
    /// ∫ₐᵇ xᵏ dx matches the closed form for smooth monomials.
    #[test]
    fn monomial_integral(k in 0i32..8, a in 0.0f64..1.0, width in 0.1f64..5.0) {
        let b = a + width;
        let exact = (b.powi(k + 1) - a.powi(k + 1)) / (k as f64 + 1.0);
        let got = quad(|x| Ok(x.powi(k)), a, b, &[], &QuadConfig::default()).unwrap();
        prop_assert!((got - exact).abs() <= 1e-10 * exact.abs().max(1.0),
            "k={} got {} exact {}", k, got, exact);
    }

    /// Break points never change a smooth integral.
    #[test]
    fn break_points_are_neutral(p1 in 0.01f64..0.99, p2 in 0.01f64..0.99) {
        let cfg = QuadConfig::default();
        let plain = quad(|x: f64| Ok(x.exp()), 0.0, 1.0, &[], &cfg).unwrap();
        let split = quad(|x: f64| Ok(x.exp()), 0.0, 1.0, &[p1, p2], &cfg).unwrap();
        prop_assert!((plain - split).abs() < 1e-12);
    }

    /// Non-negative integrands give non-negative integrals.
    #[test]
    fn nonnegative_integrand(a in 0.0f64..10.0, width in 0.01f64..10.0, c in 0.1f64..20.0) {
        let res = integrate(|x: f64| Ok((c * x).sin().powi(2)), a, a + width, &[], &QuadConfig::default())
            .unwrap();
        prop_assert!(res.value >= 0.0);
    }

    /// Trapezoid cumulative integral is monotone for positive samples.
    #[test]
    fn cumulative_trapezoid_monotone(n in 2usize..200, c in 0.1f64..5.0) {
        let x = Array1::linspace(0.0, 1.0, n);
        let y = x.mapv(|v| c + v * v);
        let cum = cumulative_trapezoid(&y, &x);
        for i in 1..n {
            prop_assert!(cum[i] >= cum[i - 1]);
        }
    }
}

// ── Interpolation Properties ─────────────────────────────────────────

proptest! {
    /// Interpolated values stay inside the bracketing samples.
    #[test]
    fn interp_bounded_by_neighbours(x in -1.0f64..2.0, n in 2usize..50) {
        let xp: Vec<f64> = (0..n).map(|i| i as f64 / (n - 1) as f64).collect();
        let fp: Vec<f64> = xp.iter().map(|v| (5.0 * v).sin()).collect();
        let y = interp1d(x, &xp, &fp);
        let lo = fp.iter().copied().fold(f64::INFINITY, f64::min);
        let hi = fp.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        prop_assert!(y >= lo - 1e-12 && y <= hi + 1e-12);
    }
}
