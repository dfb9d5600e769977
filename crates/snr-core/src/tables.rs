// ─────────────────────────────────────────────────────────────────────
// SNR Evolution Core — Constant Tables
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Dimensionless self-similar constants keyed by the ejecta density index.
//!
//! Values follow Truelove & McKee (1999) with the reverse-shock branch
//! change ("_rchg") at t_core, or t_rst for n = 2. Reduced units: radius
//! in r_ch, time in t_ch, velocity in v_ch.

use snr_types::config::Environment;
use snr_types::error::{SnrError, SnrResult};

/// Density indices with a uniform-medium (s = 0) value set.
pub const UNIFORM_INDICES: [u8; 10] = [0, 2, 4, 6, 7, 8, 9, 10, 12, 14];

/// Density indices with a wind (s = 2) solution.
pub const WIND_INDICES: [u8; 4] = [0, 1, 2, 7];

/// Cooling classes C/τ with emission-weighted cloudy-ISM factors.
pub const CLOUDY_CLASSES: [u8; 3] = [1, 2, 4];

/// Self-similar constants shared by every n ≠ 0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Similarity {
    /// Leading-factor ratio R_b / R_r in the ED phase
    pub l_ed: f64,
    /// Reverse-shock pressure ratio in the ED phase
    pub phi_ed: f64,
    /// Forward-shock radius at t_st
    pub r_st: f64,
    /// Reverse-shock radius at the branch change
    pub r_rchg: f64,
    /// Reverse-shock velocity (ejecta frame) at the branch change
    pub v_rchg: f64,
    /// Reverse-shock acceleration after the branch change
    pub a_rchg: f64,
}

/// Fit constants for the n ∈ {2, 4} time-of-radius ED solution.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdFit {
    pub phi_eff: f64,
    pub f_n: f64,
    pub alpha: f64,
}

/// Constants for one density index in a uniform medium.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueSet {
    /// ED → ST transition time
    pub t_st: f64,
    /// Reverse-shock branch change time
    pub t_rchg: f64,
    /// Absent for n = 0, which has its own closed forms
    pub similarity: Option<Similarity>,
    /// Present for n ∈ {2, 4} only
    pub ed_fit: Option<EdFit>,
}

impl ValueSet {
    pub fn similarity(&self, n: u8) -> SnrResult<&Similarity> {
        self.similarity
            .as_ref()
            .ok_or(SnrError::UnsupportedDensityIndex { n, s: 0 })
    }

    pub fn ed_fit(&self, n: u8) -> SnrResult<&EdFit> {
        self.ed_fit
            .as_ref()
            .ok_or(SnrError::UnsupportedDensityIndex { n, s: 0 })
    }
}

const fn similar(
    t_st: f64,
    t_rchg: f64,
    l_ed: f64,
    phi_ed: f64,
    r_st: f64,
    r_rchg: f64,
    v_rchg: f64,
    a_rchg: f64,
) -> ValueSet {
    ValueSet {
        t_st,
        t_rchg,
        similarity: Some(Similarity {
            l_ed,
            phi_ed,
            r_st,
            r_rchg,
            v_rchg,
            a_rchg,
        }),
        ed_fit: None,
    }
}

/// Constant table lookup for a uniform medium.
pub fn value_set(n: u8) -> SnrResult<ValueSet> {
    let set = match n {
        0 => ValueSet {
            t_st: 0.495,
            t_rchg: 0.495,
            similarity: None,
            ed_fit: None,
        },
        // a_rchg for n = 2 is -0.115 (not -0.151)
        2 => ValueSet {
            ed_fit: Some(EdFit {
                phi_eff: 0.0947,
                f_n: 1.0 / (4.0 * std::f64::consts::PI),
                alpha: 1.0 / 3.0,
            }),
            ..similar(0.387, 0.387, 1.10, 0.343, 0.679, 0.503, 0.686, -0.115)
        },
        // a_core = 2 v_core / t_core
        4 => ValueSet {
            ed_fit: Some(EdFit {
                phi_eff: 0.0791,
                f_n: 0.00645,
                alpha: 0.0746,
            }),
            ..similar(0.232, 1.2, 1.10, 0.343, 0.587, 0.775, 0.427, 0.7117)
        },
        6 => similar(1.04, 0.513, 1.39, 0.39, 1.07, 0.541, 0.527, 0.112),
        7 => similar(0.732, 0.363, 1.26, 0.47, 0.881, 0.469, 0.553, 0.116),
        8 => similar(0.605, 0.292, 1.21, 0.52, 0.788, 0.413, 0.530, 0.139),
        9 => similar(0.523, 0.249, 1.19, 0.55, 0.725, 0.371, 0.497, 0.162),
        10 => similar(0.481, 0.220, 1.17, 0.57, 0.687, 0.340, 0.463, 0.192),
        12 => similar(0.424, 0.182, 1.15, 0.60, 0.636, 0.293, 0.403, 0.251),
        14 => similar(0.389, 0.157, 1.14, 0.62, 0.603, 0.259, 0.354, 0.277),
        _ => return Err(SnrError::UnsupportedDensityIndex { n, s: 0 }),
    };
    Ok(set)
}

/// Fails loudly for `(n, s)` pairs without a solution family.
pub fn check_supported(n: u8, environment: Environment) -> SnrResult<()> {
    let supported = match environment {
        Environment::Uniform => UNIFORM_INDICES.contains(&n),
        Environment::Wind => WIND_INDICES.contains(&n),
    };
    if supported {
        Ok(())
    } else {
        Err(SnrError::UnsupportedDensityIndex {
            n,
            s: environment.index(),
        })
    }
}

/// Emission-weighted temperature and density factors of the White & Long
/// interior for one cooling class.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CloudyFactors {
    pub temperature: f64,
    pub density: f64,
}

pub fn cloudy_factors(c_tau: u8) -> SnrResult<CloudyFactors> {
    let (temperature, density) = match c_tau {
        1 => (1.370_302_865_373_082_7, 2.476_838_394_791_874),
        2 => (1.369_303_166_169_338_7, 2.637_864_262_949_064),
        4 => (1.080_319_474_532_910_3, 8.013_391_028_733_173),
        other => {
            return Err(SnrError::ConfigError(format!(
                "cloudy-ISM cooling class C/tau must be one of {CLOUDY_CLASSES:?}, got {other}"
            )))
        }
    };
    Ok(CloudyFactors {
        temperature,
        density,
    })
}
