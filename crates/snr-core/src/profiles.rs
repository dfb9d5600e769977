// ─────────────────────────────────────────────────────────────────────
// SNR Evolution Core — Radial Profiles
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Normalised density and temperature of the shocked gas versus
//! x = r / R_shock, and the geometry the emissivity integrals need.
//!
//! Three sources:
//!
//! - `Chev`: self-similar ED profiles (Chevalier 1982), radius rescaled
//!   by the contact discontinuity r_c
//! - `Cloudy`: White & Long (1991) interior profiles per C/τ class
//! - `Sedov`: analytic power-law fits to the Sedov solution

use crate::evolution::EvolutionState;
use crate::reference::{ReferenceData, SelfSimilarTable};
use serde::Serialize;
use snr_math::interp::Table1D;
use snr_types::config::{Environment, ModelVariant};
use snr_types::constants::{KM_TO_CM, PC_TO_KM};
use snr_types::error::{SnrError, SnrResult};
use snr_types::state::Composition;
use std::fmt;

/// Temperature fit is flat inside this radius.
const SEDOV_CORE_T: f64 = 0.4;
/// Density fit switches from a flat pressure core here.
const SEDOV_CORE_RHO: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ProfileModel {
    Chev,
    Cloudy,
    Sedov,
}

impl ProfileModel {
    pub fn label(&self) -> &'static str {
        match self {
            ProfileModel::Chev => "chev",
            ProfileModel::Cloudy => "wl",
            ProfileModel::Sedov => "sedov",
        }
    }

    /// Profile that describes `state` at its evaluated age.
    pub fn select(state: &EvolutionState) -> ProfileModel {
        let early = match state.transitions() {
            Some(tr) => state.age() <= tr.t_st,
            None => true,
        };
        if early || state.environment() == Environment::Wind {
            ProfileModel::Chev
        } else if state.model() == ModelVariant::CloudyIsm {
            ProfileModel::Cloudy
        } else {
            ProfileModel::Sedov
        }
    }
}

impl fmt::Display for ProfileModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Sedov temperature T / T_shock.
pub fn sedov_temperature(x: f64) -> f64 {
    if x < SEDOV_CORE_T {
        SEDOV_CORE_T.powf(-4.32)
    } else {
        x.powf(-4.32)
    }
}

/// Sedov density ρ / ρ_shock.
pub fn sedov_density(x: f64) -> f64 {
    let pressure = if x < SEDOV_CORE_RHO {
        0.31
    } else {
        let d = x - SEDOV_CORE_RHO;
        0.31 + 2.774 * d.powi(3) + 94.2548 * d.powf(8.1748)
    };
    pressure / sedov_temperature(x)
}

/// Contact discontinuity, inner edge and kink radii of a self-similar
/// profile, all in units of the forward-shock radius.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChevGeometry {
    pub r_c: f64,
    pub r_min: f64,
    pub difficult: Vec<f64>,
}

impl ChevGeometry {
    pub fn for_index(environment: Environment, n: u8) -> ChevGeometry {
        match (environment, n) {
            (Environment::Wind, _) => {
                let r_c = 1.0 / 1.299;
                ChevGeometry {
                    r_c,
                    r_min: 0.970 * r_c,
                    difficult: vec![0.9975 * r_c, 1.02 * r_c],
                }
            }
            (Environment::Uniform, 7) => {
                let r_c = 1.0 / 1.181;
                ChevGeometry {
                    r_c,
                    r_min: 0.935 * r_c,
                    difficult: vec![0.995 * r_c],
                }
            }
            (Environment::Uniform, _) => {
                let r_c = 1.0 / 1.121;
                ChevGeometry {
                    r_c,
                    r_min: 0.974 * r_c,
                    difficult: vec![0.9975 * r_c],
                }
            }
        }
    }
}

#[derive(Debug, Clone)]
enum Source {
    SelfSimilar { density: Table1D, temperature: Table1D },
    Cloudy { density: Table1D, temperature: Table1D },
    Sedov,
}

/// Frozen inputs of one emissivity evaluation.
#[derive(Debug, Clone, Serialize)]
pub struct EmissivitySnapshot {
    pub model: ProfileModel,
    /// Forward-shock radius [cm]
    pub radius: f64,
    /// Forward-shock temperature [K]
    pub t_shock: f64,
    pub n_0: f64,
    pub composition: Composition,
    /// Contact discontinuity; 0 outside the self-similar profile
    pub r_c: f64,
    pub r_min: f64,
    /// Radii where the profile changes steeply
    pub difficult: Vec<f64>,
    /// Emission-measure break points interior and exterior to r_c
    pub em_points_inner: Vec<f64>,
    pub em_points_outer: Vec<f64>,
}

impl EmissivitySnapshot {
    /// Line-of-sight emission scale for ejecta gas relative to ambient gas.
    pub fn ejecta_correction(&self) -> f64 {
        let am = &self.composition.ambient;
        let ej = &self.composition.ejecta;
        ej.z_sq / am.z_sq * am.mu_i / ej.mu_i * am.mu_e / ej.mu_e
    }
}

/// Radial profile of one snapshot.
#[derive(Debug, Clone)]
pub struct RadialProfile {
    source: Source,
}

impl RadialProfile {
    pub fn sedov() -> Self {
        RadialProfile {
            source: Source::Sedov,
        }
    }

    /// Rescale a self-similar table by `r_c`; temperature picks up the
    /// composition ratio interior to the contact discontinuity.
    pub fn self_similar(table: &SelfSimilarTable, r_c: f64, composition: &Composition) -> Self {
        let am = &composition.ambient;
        let ej = &composition.ejecta;
        let mu_norm = (1.0 / am.mu_e + 1.0 / am.mu_i) / (1.0 / ej.mu_e + 1.0 / ej.mu_i);
        let radius = table.radius.mapv(|x| x * r_c);
        let temperature = ndarray::Zip::from(&radius)
            .and(&table.pressure)
            .and(&table.density)
            .map_collect(|&r, &p, &rho| {
                let t = p / rho;
                if r < r_c {
                    t * mu_norm
                } else {
                    t
                }
            });
        RadialProfile {
            source: Source::SelfSimilar {
                density: Table1D::new(radius.clone(), table.density.clone()),
                temperature: Table1D::new(radius, temperature),
            },
        }
    }

    /// Cloudy-ISM profile; temperatures are divided by the cooling `k`.
    pub fn cloudy(density: &Table1D, temperature: &Table1D, k: f64) -> Self {
        RadialProfile {
            source: Source::Cloudy {
                density: density.clone(),
                temperature: Table1D::new(temperature.x.clone(), temperature.y.mapv(|t| t / k)),
            },
        }
    }

    pub fn density(&self, x: f64) -> f64 {
        match &self.source {
            Source::SelfSimilar { density, .. } | Source::Cloudy { density, .. } => density.eval(x),
            Source::Sedov => sedov_density(x),
        }
    }

    pub fn temperature(&self, x: f64) -> f64 {
        match &self.source {
            Source::SelfSimilar { temperature, .. } | Source::Cloudy { temperature, .. } => {
                temperature.eval(x)
            }
            Source::Sedov => sedov_temperature(x),
        }
    }

    /// Tabulated radii of a cloudy-ISM density profile.
    fn sample_radii(&self) -> Vec<f64> {
        match &self.source {
            Source::Cloudy { density, .. } => density.x.to_vec(),
            _ => Vec::new(),
        }
    }
}

/// Snapshot and profile for `state` at its evaluated age.
pub fn build(
    state: &EvolutionState,
    reference: &ReferenceData,
) -> SnrResult<(EmissivitySnapshot, RadialProfile)> {
    if !state.emissivity_available() {
        return Err(SnrError::ConfigError(format!(
            "no emissivity model for n = {}, s = {}, model {} at t = {} yr",
            state.n(),
            state.environment().index(),
            state.model(),
            state.age()
        )));
    }
    let shock = state.snapshot()?.forward;
    let composition = *state.composition();
    let model = ProfileModel::select(state);

    let mut snap = EmissivitySnapshot {
        model,
        radius: shock.radius * PC_TO_KM * KM_TO_CM,
        t_shock: shock.temperature,
        n_0: state.inputs().n_0,
        composition,
        r_c: 0.0,
        r_min: 0.0,
        difficult: Vec::new(),
        em_points_inner: Vec::new(),
        em_points_outer: Vec::new(),
    };

    let profile = match model {
        ProfileModel::Chev => {
            let env = state.environment();
            let geometry = ChevGeometry::for_index(env, state.n());
            let table = reference.self_similar(env.index(), state.n())?;
            let profile = RadialProfile::self_similar(table, geometry.r_c, &composition);
            snap.em_points_inner = geometry.difficult.first().copied().into_iter().collect();
            if env == Environment::Wind {
                snap.em_points_outer = geometry.difficult.get(1).copied().into_iter().collect();
            }
            snap.r_c = geometry.r_c;
            snap.r_min = geometry.r_min;
            snap.difficult = geometry.difficult;
            profile
        }
        ProfileModel::Cloudy => {
            let c_tau = state.inputs().c_tau;
            let tables = reference.cloudy(c_tau)?;
            let k = reference.cooling_k(c_tau)?;
            let profile = RadialProfile::cloudy(&tables.density, &tables.temperature, k);
            snap.em_points_outer = profile.sample_radii();
            profile
        }
        ProfileModel::Sedov => {
            snap.em_points_outer = vec![SEDOV_CORE_T, SEDOV_CORE_RHO];
            RadialProfile::sedov()
        }
    };
    Ok((snap, profile))
}
