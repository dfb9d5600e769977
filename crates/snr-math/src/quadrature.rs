// ─────────────────────────────────────────────────────────────────────
// SNR Evolution Core — Quadrature
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Globally adaptive Gauss–Kronrod quadrature (G10/K21 pairs) with
//! user-supplied break points, plus cumulative trapezoid integration on
//! sampled tracks.
//!
//! Nested integrals are built by calling [`integrate`] inside the
//! integrand of an outer [`integrate`].

use ndarray::Array1;
use snr_types::error::{SnrError, SnrResult};
use tracing::warn;

/// Kronrod abscissae on [0, 1]; odd indices are the Gauss nodes.
const XGK: [f64; 11] = [
    0.995_657_163_025_808_1,
    0.973_906_528_517_171_7,
    0.930_157_491_355_708_2,
    0.865_063_366_688_984_5,
    0.780_817_726_586_416_9,
    0.679_409_568_299_024_4,
    0.562_757_134_668_604_7,
    0.433_395_394_129_247_2,
    0.294_392_862_701_460_2,
    0.148_874_338_981_631_2,
    0.0,
];

/// Kronrod weights.
const WGK: [f64; 11] = [
    0.011_694_638_867_371_874,
    0.032_558_162_307_964_73,
    0.054_755_896_574_351_996,
    0.075_039_674_810_919_95,
    0.093_125_454_583_697_6,
    0.109_387_158_802_297_64,
    0.123_491_976_262_065_85,
    0.134_709_217_311_473_33,
    0.142_775_938_577_060_08,
    0.147_739_104_901_338_5,
    0.149_445_554_002_916_9,
];

/// 10-point Gauss weights for XGK[1], XGK[3], ..., XGK[9].
const WG: [f64; 5] = [
    0.066_671_344_308_688_14,
    0.149_451_349_150_580_6,
    0.219_086_362_515_982_04,
    0.269_266_719_309_996_35,
    0.295_524_224_714_752_87,
];

/// Tolerances for [`integrate`].
#[derive(Debug, Clone, Copy)]
pub struct QuadConfig {
    pub epsabs: f64,
    pub epsrel: f64,
    /// Maximum number of subintervals
    pub limit: usize,
}

impl Default for QuadConfig {
    fn default() -> Self {
        QuadConfig {
            epsabs: 1.49e-8,
            epsrel: 1.49e-8,
            limit: 50,
        }
    }
}

impl QuadConfig {
    pub fn with_epsabs(epsabs: f64) -> Self {
        QuadConfig {
            epsabs,
            ..Default::default()
        }
    }
}

/// Outcome of one adaptive integration.
#[derive(Debug, Clone, Copy)]
pub struct QuadResult {
    pub value: f64,
    pub abs_error: f64,
    /// False when the subinterval limit was hit before the tolerance
    pub converged: bool,
    pub evaluations: usize,
}

struct Segment {
    a: f64,
    b: f64,
    value: f64,
    error: f64,
}

fn kronrod21<F>(f: &mut F, a: f64, b: f64) -> SnrResult<(f64, f64)>
where
    F: FnMut(f64) -> SnrResult<f64>,
{
    let centre = 0.5 * (a + b);
    let half = 0.5 * (b - a);
    let f_centre = f(centre)?;
    let mut res_g = 0.0;
    let mut res_k = WGK[10] * f_centre;

    for j in 0..5 {
        let jtw = 2 * j + 1;
        let dx = half * XGK[jtw];
        let fsum = f(centre - dx)? + f(centre + dx)?;
        res_g += WG[j] * fsum;
        res_k += WGK[jtw] * fsum;
    }
    for j in 0..5 {
        let jtwm1 = 2 * j;
        let dx = half * XGK[jtwm1];
        let fsum = f(centre - dx)? + f(centre + dx)?;
        res_k += WGK[jtwm1] * fsum;
    }

    Ok((res_k * half, ((res_k - res_g) * half).abs()))
}

/// Adaptive integral of `f` over `[a, b]`.
///
/// `points` are interior break points (discontinuities, kinks); entries
/// outside the open interval are ignored. A non-finite estimate fails with
/// `IntegrationFailed`. Hitting the subinterval limit logs a warning and
/// returns the best estimate with `converged = false`.
pub fn integrate<F>(
    mut f: F,
    a: f64,
    b: f64,
    points: &[f64],
    cfg: &QuadConfig,
) -> SnrResult<QuadResult>
where
    F: FnMut(f64) -> SnrResult<f64>,
{
    if a == b {
        return Ok(QuadResult {
            value: 0.0,
            abs_error: 0.0,
            converged: true,
            evaluations: 0,
        });
    }
    let (lo, hi, sign) = if a < b { (a, b, 1.0) } else { (b, a, -1.0) };

    let mut edges: Vec<f64> = points
        .iter()
        .copied()
        .filter(|p| p.is_finite() && *p > lo && *p < hi)
        .collect();
    edges.sort_by(|x, y| x.total_cmp(y));
    edges.dedup();
    edges.insert(0, lo);
    edges.push(hi);

    let mut segments = Vec::with_capacity(cfg.limit.max(edges.len()));
    let mut evaluations = 0;
    for w in edges.windows(2) {
        let (value, error) = kronrod21(&mut f, w[0], w[1])?;
        evaluations += 21;
        segments.push(Segment {
            a: w[0],
            b: w[1],
            value,
            error,
        });
    }

    let totals = |segs: &[Segment]| -> (f64, f64) {
        segs.iter()
            .fold((0.0, 0.0), |(v, e), s| (v + s.value, e + s.error))
    };

    let (mut value, mut abs_error) = totals(&segments);
    let mut converged = true;
    while abs_error > cfg.epsabs.max(cfg.epsrel * value.abs()) {
        if segments.len() >= cfg.limit {
            converged = false;
            warn!(
                lo,
                hi,
                value,
                abs_error,
                limit = cfg.limit,
                "Quadrature subdivision limit reached"
            );
            break;
        }
        let worst = segments
            .iter()
            .enumerate()
            .max_by(|(_, x), (_, y)| x.error.total_cmp(&y.error))
            .map(|(i, _)| i)
            .unwrap_or(0);
        let seg = segments.swap_remove(worst);
        let mid = 0.5 * (seg.a + seg.b);
        if mid <= seg.a || mid >= seg.b {
            // Interval cannot be split further in floating point
            segments.push(seg);
            converged = false;
            break;
        }
        let (v1, e1) = kronrod21(&mut f, seg.a, mid)?;
        let (v2, e2) = kronrod21(&mut f, mid, seg.b)?;
        evaluations += 42;
        segments.push(Segment {
            a: seg.a,
            b: mid,
            value: v1,
            error: e1,
        });
        segments.push(Segment {
            a: mid,
            b: seg.b,
            value: v2,
            error: e2,
        });
        (value, abs_error) = totals(&segments);
    }

    if !value.is_finite() {
        return Err(SnrError::IntegrationFailed(format!(
            "non-finite integral over [{lo}, {hi}]"
        )));
    }

    Ok(QuadResult {
        value: sign * value,
        abs_error,
        converged,
        evaluations,
    })
}

/// Shorthand returning only the integral value.
pub fn quad<F>(f: F, a: f64, b: f64, points: &[f64], cfg: &QuadConfig) -> SnrResult<f64>
where
    F: FnMut(f64) -> SnrResult<f64>,
{
    integrate(f, a, b, points, cfg).map(|r| r.value)
}

/// Cumulative trapezoid integral of `y(x)`, starting at 0.
pub fn cumulative_trapezoid(y: &Array1<f64>, x: &Array1<f64>) -> Array1<f64> {
    let n = y.len().min(x.len());
    let mut out = Array1::zeros(n);
    for i in 1..n {
        out[i] = out[i - 1] + 0.5 * (y[i] + y[i - 1]) * (x[i] - x[i - 1]);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn test_polynomial_exact() {
        // K21 integrates degree ≤ 31 exactly
        let res = integrate(|x| Ok(x.powi(5) - 3.0 * x * x), 0.0, 2.0, &[], &QuadConfig::default())
            .unwrap();
        let exact = 64.0 / 6.0 - 8.0;
        assert!((res.value - exact).abs() < 1e-12, "got {}", res.value);
        assert!(res.converged);
        assert_eq!(res.evaluations, 21);
    }

    #[test]
    fn test_reversed_limits() {
        let fwd = quad(|x| Ok(x.sin()), 0.0, PI, &[], &QuadConfig::default()).unwrap();
        let rev = quad(|x| Ok(x.sin()), PI, 0.0, &[], &QuadConfig::default()).unwrap();
        assert!((fwd - 2.0).abs() < 1e-10);
        assert!((fwd + rev).abs() < 1e-12);
    }

    #[test]
    fn test_break_point_step_function() {
        let step = |x: f64| Ok(if x < 0.3 { 1.0 } else { 5.0 });
        let with = quad(step, 0.0, 1.0, &[0.3], &QuadConfig::default()).unwrap();
        assert!((with - (0.3 + 3.5)).abs() < 1e-12, "got {with}");
    }

    #[test]
    fn test_points_outside_interval_ignored() {
        let res = quad(|x| Ok(x), 0.0, 1.0, &[-1.0, 0.0, 1.0, 7.0, f64::NAN], &QuadConfig::default())
            .unwrap();
        assert!((res - 0.5).abs() < 1e-14);
    }

    #[test]
    fn test_integrable_singularity() {
        // ∫₀¹ x^-1/2 dx = 2
        let res = integrate(|x| Ok(x.powf(-0.5)), 0.0, 1.0, &[], &QuadConfig::default()).unwrap();
        assert!((res.value - 2.0).abs() < 1e-6, "got {}", res.value);
    }

    #[test]
    fn test_nested_integral() {
        // ∫₀¹∫₀¹ xy dy dx = 1/4
        let cfg = QuadConfig::default();
        let outer = quad(
            |x| quad(|y| Ok(x * y), 0.0, 1.0, &[], &cfg),
            0.0,
            1.0,
            &[],
            &cfg,
        )
        .unwrap();
        assert!((outer - 0.25).abs() < 1e-12);
    }

    #[test]
    fn test_limit_reports_unconverged() {
        let cfg = QuadConfig {
            epsabs: 1e-300,
            epsrel: 0.0,
            limit: 3,
        };
        let res = integrate(|x| Ok((50.0 * x).sin().abs()), 0.0, 10.0, &[], &cfg).unwrap();
        assert!(!res.converged);
        assert!(res.value.is_finite());
    }

    #[test]
    fn test_nonfinite_fails() {
        let err = integrate(|_| Ok(f64::INFINITY), 0.0, 1.0, &[], &QuadConfig::default())
            .unwrap_err();
        assert!(matches!(err, SnrError::IntegrationFailed(_)));
    }

    #[test]
    fn test_cumulative_trapezoid_linear() {
        let x = Array1::linspace(0.0, 2.0, 21);
        let y = x.mapv(|v| 3.0 * v);
        let c = cumulative_trapezoid(&y, &x);
        assert_eq!(c[0], 0.0);
        assert!((c[20] - 6.0).abs() < 1e-12);
    }
}
