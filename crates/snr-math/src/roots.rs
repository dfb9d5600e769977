// ─────────────────────────────────────────────────────────────────────
// SNR Evolution Core — Roots
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Scalar root finding: Brent's bracketing method, the derivative-free
//! secant iteration, and geometric bracket expansion.
//!
//! Closures return `SnrResult<f64>` so that failures inside a solution
//! law (unresolved anchors, failed inner integrals) propagate out of the
//! solver unchanged.

use snr_types::error::{SnrError, SnrResult};

/// Brent solver tolerances.
#[derive(Debug, Clone, Copy)]
pub struct BrentConfig {
    pub xtol: f64,
    pub rtol: f64,
    pub max_iter: usize,
}

impl Default for BrentConfig {
    fn default() -> Self {
        BrentConfig {
            xtol: 2e-12,
            rtol: 4.0 * f64::EPSILON,
            max_iter: 100,
        }
    }
}

/// Secant solver tolerances.
#[derive(Debug, Clone, Copy)]
pub struct SecantConfig {
    pub tol: f64,
    pub max_iter: usize,
}

impl Default for SecantConfig {
    fn default() -> Self {
        SecantConfig {
            tol: 1.48e-8,
            max_iter: 50,
        }
    }
}

/// Brent's method on `[a, b]` with default tolerances.
pub fn brent<F>(f: F, a: f64, b: f64) -> SnrResult<f64>
where
    F: FnMut(f64) -> SnrResult<f64>,
{
    brent_with(f, a, b, &BrentConfig::default())
}

/// Brent's method (inverse quadratic interpolation with bisection fallback).
///
/// Fails with `NoSolutionInBracket` if `f(a)` and `f(b)` share a sign or
/// either end is not finite.
pub fn brent_with<F>(mut f: F, a: f64, b: f64, cfg: &BrentConfig) -> SnrResult<f64>
where
    F: FnMut(f64) -> SnrResult<f64>,
{
    let mut xpre = a;
    let mut xcur = b;
    let mut fpre = f(xpre)?;
    let mut fcur = f(xcur)?;

    if !fpre.is_finite() || !fcur.is_finite() || fpre * fcur > 0.0 {
        return Err(SnrError::NoSolutionInBracket {
            lo: a,
            hi: b,
            f_lo: fpre,
            f_hi: fcur,
        });
    }
    if fpre == 0.0 {
        return Ok(xpre);
    }
    if fcur == 0.0 {
        return Ok(xcur);
    }

    let mut xblk = 0.0;
    let mut fblk = 0.0;
    let mut spre = 0.0;
    let mut scur = 0.0;

    for _ in 0..cfg.max_iter {
        if fpre * fcur < 0.0 {
            xblk = xpre;
            fblk = fpre;
            spre = xcur - xpre;
            scur = spre;
        }
        if fblk.abs() < fcur.abs() {
            xpre = xcur;
            xcur = xblk;
            xblk = xpre;
            fpre = fcur;
            fcur = fblk;
            fblk = fpre;
        }

        let delta = (cfg.xtol + cfg.rtol * xcur.abs()) / 2.0;
        let sbis = (xblk - xcur) / 2.0;
        if fcur == 0.0 || sbis.abs() < delta {
            return Ok(xcur);
        }

        if spre.abs() > delta && fcur.abs() < fpre.abs() {
            let stry = if xpre == xblk {
                // Secant step
                -fcur * (xcur - xpre) / (fcur - fpre)
            } else {
                // Inverse quadratic interpolation
                let dpre = (fpre - fcur) / (xpre - xcur);
                let dblk = (fblk - fcur) / (xblk - xcur);
                -fcur * (fblk * dblk - fpre * dpre) / (dblk * dpre * (fblk - fpre))
            };
            if 2.0 * stry.abs() < spre.abs().min(3.0 * sbis.abs() - delta) {
                spre = scur;
                scur = stry;
            } else {
                spre = sbis;
                scur = sbis;
            }
        } else {
            spre = sbis;
            scur = sbis;
        }

        xpre = xcur;
        fpre = fcur;
        if scur.abs() > delta {
            xcur += scur;
        } else {
            xcur += if sbis > 0.0 { delta } else { -delta };
        }
        fcur = f(xcur)?;
    }

    Err(SnrError::NoConvergence {
        method: "brent",
        iterations: cfg.max_iter,
        last: xcur,
    })
}

/// Derivative-free secant iteration from a single starting point.
///
/// The second point is `x0·(1 + 1e-4) ± 1e-4`.
pub fn secant<F>(f: F, x0: f64) -> SnrResult<f64>
where
    F: FnMut(f64) -> SnrResult<f64>,
{
    secant_with(f, x0, &SecantConfig::default())
}

pub fn secant_with<F>(mut f: F, x0: f64, cfg: &SecantConfig) -> SnrResult<f64>
where
    F: FnMut(f64) -> SnrResult<f64>,
{
    let step = 1e-4;
    let mut p0 = x0;
    let mut p1 = x0 * (1.0 + step);
    p1 += if p1 >= 0.0 { step } else { -step };
    let mut q0 = f(p0)?;
    let mut q1 = f(p1)?;
    if q1.abs() < q0.abs() {
        std::mem::swap(&mut p0, &mut p1);
        std::mem::swap(&mut q0, &mut q1);
    }

    for _ in 0..cfg.max_iter {
        if q1 == q0 {
            return Ok((p1 + p0) / 2.0);
        }
        let p = if q1.abs() > q0.abs() {
            (-q0 / q1 * p1 + p0) / (1.0 - q0 / q1)
        } else {
            (-q1 / q0 * p0 + p1) / (1.0 - q1 / q0)
        };
        if !p.is_finite() {
            break;
        }
        if (p - p1).abs() < cfg.tol {
            return Ok(p);
        }
        p0 = p1;
        q0 = q1;
        p1 = p;
        q1 = f(p1)?;
    }

    Err(SnrError::NoConvergence {
        method: "secant",
        iterations: cfg.max_iter,
        last: p1,
    })
}

/// Grow `[lo, lo·factor^k]` geometrically until `f` changes sign.
///
/// Returns the last two sampled points, which bracket a root. `lo` must
/// be positive and `factor > 1`.
pub fn expand_bracket<F>(mut f: F, lo: f64, factor: f64, max_steps: usize) -> SnrResult<(f64, f64)>
where
    F: FnMut(f64) -> SnrResult<f64>,
{
    if !(lo > 0.0 && factor > 1.0) {
        return Err(SnrError::ConfigError(format!(
            "bracket expansion needs lo > 0 and factor > 1, got lo={lo}, factor={factor}"
        )));
    }
    let f_start = f(lo)?;
    if f_start == 0.0 {
        return Ok((lo, lo));
    }
    let mut a = lo;
    let mut f_a = f_start;
    for _ in 0..max_steps {
        let b = a * factor;
        let f_b = f(b)?;
        if f_b == 0.0 || f_b.signum() != f_start.signum() {
            return Ok((a, b));
        }
        a = b;
        f_a = f_b;
    }
    Err(SnrError::NoSolutionInBracket {
        lo,
        hi: a,
        f_lo: f_start,
        f_hi: f_a,
    })
}
