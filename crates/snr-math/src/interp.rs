// ─────────────────────────────────────────────────────────────────────
// SNR Evolution Core — Interp
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Piecewise-linear interpolation on tabulated profiles.

use ndarray::Array1;

/// Linear interpolation of `fp(xp)` at `x`.
///
/// `xp` must be increasing. Values outside the table clamp to the end
/// points. Returns NaN for an empty table.
pub fn interp1d(x: f64, xp: &[f64], fp: &[f64]) -> f64 {
    let n = xp.len().min(fp.len());
    if n == 0 {
        return f64::NAN;
    }
    if x <= xp[0] {
        return fp[0];
    }
    if x >= xp[n - 1] {
        return fp[n - 1];
    }
    // First index with xp[i] > x
    let hi = xp[..n].partition_point(|&v| v <= x);
    let lo = hi - 1;
    let span = xp[hi] - xp[lo];
    if span == 0.0 {
        return fp[lo];
    }
    let w = (x - xp[lo]) / span;
    fp[lo] + w * (fp[hi] - fp[lo])
}

/// Tabulated 1-D profile y(x) with clamped linear lookup.
#[derive(Debug, Clone)]
pub struct Table1D {
    pub x: Array1<f64>,
    pub y: Array1<f64>,
}

impl Table1D {
    pub fn new(x: Array1<f64>, y: Array1<f64>) -> Self {
        Table1D { x, y }
    }

    pub fn eval(&self, x: f64) -> f64 {
        match (self.x.as_slice(), self.y.as_slice()) {
            (Some(xs), Some(ys)) => interp1d(x, xs, ys),
            _ => {
                let xs = self.x.to_vec();
                let ys = self.y.to_vec();
                interp1d(x, &xs, &ys)
            }
        }
    }

    pub fn len(&self) -> usize {
        self.x.len()
    }

    pub fn is_empty(&self) -> bool {
        self.x.is_empty()
    }
}
