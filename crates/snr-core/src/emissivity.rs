// ─────────────────────────────────────────────────────────────────────
// SNR Evolution Core — Emissivity Engine
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Thermal bremsstrahlung observables of one remnant snapshot.
//!
//! Radii are normalised to the forward shock. Line-of-sight integrals run
//! over s = √(r² − b²) at impact parameter b; gas interior to the contact
//! discontinuity is weighted by the ejecta composition.
//!
//! Profile and emission-coefficient values are memoised per engine since
//! the nested quadratures revisit the same (radius, energy) pairs. A new
//! snapshot needs a new engine.

use crate::evolution::EvolutionState;
use crate::profiles::{self, EmissivitySnapshot, ProfileModel, RadialProfile};
use crate::reference::ReferenceData;
use ndarray::Array1;
use serde::Serialize;
use snr_math::memo::{f64_key, MemoCache};
use snr_math::quadrature::{quad, QuadConfig};
use snr_types::config::EmissivitySettings;
use snr_types::constants::{BOLTZMANN, KEV_TO_ERG, PLANCK};
use snr_types::error::SnrResult;
use snr_types::state::{OutputMap, OutputValue};
use std::f64::consts::PI;
use tracing::{debug, info};

/// Break points of the energy integral, in units of kT_shock.
const EDT_POINTS: [f64; 5] = [0.001, 0.1, 1.0, 10.0, 100.0];

/// Absolute tolerance of the emission-measure integrals.
const EM_EPSABS: f64 = 1e-5;

/// Samples per profile curve.
pub const PROFILE_SAMPLES: usize = 150;

/// Gaunt-factor polynomial coefficients in v = (log10(E/kT) + 1.5) / 2.5.
const GAUNT: [f64; 11] = [
    3.158, -2.524, 0.4049, 0.6135, 0.6289, 0.3294, -0.1715, -0.3687, -0.07592, 0.1602, 0.08377,
];

/// Bremsstrahlung emissivity normalisation [erg cm³ s⁻¹ Hz⁻¹ K^½].
const JNU_NORM: f64 = 5.4e-39;

/// Velocity-averaged free-free Gaunt factor at `edt / temperature`.
pub fn gaunt_factor(edt_over_t: f64) -> f64 {
    let v = (edt_over_t.log10() + 1.5) / 2.5;
    GAUNT.iter().rev().fold(0.0, |acc, &c| acc * v + c)
}

/// Emission measure [cm⁻³] and emission-weighted temperature [K].
///
/// The split fields are set for the self-similar profile only.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EmissionMeasure {
    pub total: f64,
    pub forward: Option<f64>,
    pub reverse: Option<f64>,
    pub temperature: f64,
    pub temperature_forward: Option<f64>,
    pub temperature_reverse: Option<f64>,
}

/// Band luminosity [erg/s].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Luminosity {
    pub total: f64,
    pub forward: Option<f64>,
    pub reverse: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Curve {
    pub x: Array1<f64>,
    pub y: Array1<f64>,
}

/// Everything the emissivity view shows for one snapshot.
#[derive(Debug, Clone, Serialize)]
pub struct EmissivityReport {
    pub model: ProfileModel,
    pub emission_measure: EmissionMeasure,
    pub luminosity: Luminosity,
    /// L_ν versus photon energy [keV]
    pub spectrum: Curve,
    /// I_ν versus impact parameter
    pub intensity: Curve,
    /// T / T_shock versus radius
    pub temperature: Curve,
    /// ρ / ρ_shock versus radius
    pub density: Curve,
}

impl EmissivityReport {
    pub fn output_map(&self) -> OutputMap {
        let em = &self.emission_measure;
        let lum = &self.luminosity;
        let mut out = OutputMap::new();
        out.insert("model".into(), OutputValue::Text(self.model.label().to_string()));
        out.insert("lum".into(), lum.total.into());
        out.insert("em".into(), em.total.into());
        out.insert("Tem".into(), em.temperature.into());
        if self.model == ProfileModel::Chev {
            out.insert("lum_f".into(), lum.forward.into());
            out.insert("lum_r".into(), lum.reverse.into());
            out.insert("em_f".into(), em.forward.into());
            out.insert("em_r".into(), em.reverse.into());
            out.insert("Tem_f".into(), em.temperature_forward.into());
            out.insert("Tem_r".into(), em.temperature_reverse.into());
        }
        out
    }
}

/// Which side of the contact discontinuity a luminosity integral covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Region {
    All,
    Forward,
    Reverse,
}

pub struct EmissivityEngine {
    snapshot: EmissivitySnapshot,
    profile: RadialProfile,
    settings: EmissivitySettings,
    /// n₀-, R- and T_s-dependent prefactors
    intensity_scale: f64,
    spectrum_scale: f64,
    luminosity_scale: f64,
    /// Photon energy [keV] → E / kT_shock
    nrg_to_edt: f64,
    ej_correction: f64,
    density_cache: MemoCache<u64, f64>,
    temperature_cache: MemoCache<u64, f64>,
    jnu_cache: MemoCache<(u64, u64), f64>,
}

impl EmissivityEngine {
    /// Engine for `state` at its evaluated age; fails when no profile
    /// model covers the state or a needed table is missing.
    pub fn new(
        state: &EvolutionState,
        reference: &ReferenceData,
        settings: EmissivitySettings,
    ) -> SnrResult<Self> {
        settings.validate()?;
        let (snapshot, profile) = profiles::build(state, reference)?;
        info!(
            model = %snapshot.model,
            radius_cm = snapshot.radius,
            t_shock = snapshot.t_shock,
            "Emissivity model selected"
        );
        Ok(Self::from_parts(snapshot, profile, settings))
    }

    pub fn from_parts(
        snapshot: EmissivitySnapshot,
        profile: RadialProfile,
        settings: EmissivitySettings,
    ) -> Self {
        let am = &snapshot.composition.ambient;
        let intensity_scale = 2.0 * (4.0 * snapshot.n_0).powi(2) * am.mu_h.powi(2) / am.mu_e / am.mu_i
            * snapshot.radius
            / snapshot.t_shock.sqrt();
        let spectrum_scale = 8.0 * PI * PI * snapshot.radius.powi(2) * intensity_scale;
        let luminosity_scale = snapshot.t_shock * BOLTZMANN / PLANCK * spectrum_scale;
        let nrg_to_edt = KEV_TO_ERG / BOLTZMANN / snapshot.t_shock;
        let ej_correction = match snapshot.model {
            ProfileModel::Chev => snapshot.ejecta_correction(),
            _ => 1.0,
        };
        EmissivityEngine {
            snapshot,
            profile,
            settings,
            intensity_scale,
            spectrum_scale,
            luminosity_scale,
            nrg_to_edt,
            ej_correction,
            density_cache: MemoCache::new(),
            temperature_cache: MemoCache::new(),
            jnu_cache: MemoCache::new(),
        }
    }

    pub fn snapshot(&self) -> &EmissivitySnapshot {
        &self.snapshot
    }

    pub fn settings(&self) -> &EmissivitySettings {
        &self.settings
    }

    fn is_chev(&self) -> bool {
        self.snapshot.model == ProfileModel::Chev
    }

    pub fn density(&self, x: f64) -> SnrResult<f64> {
        self.density_cache
            .get_or_try_insert_with(f64_key(x), || Ok(self.profile.density(x)))
    }

    pub fn temperature(&self, x: f64) -> SnrResult<f64> {
        self.temperature_cache
            .get_or_try_insert_with(f64_key(x), || Ok(self.profile.temperature(x)))
    }

    /// Emission coefficient at radius `x` and photon energy `edt` (E / kT_s).
    pub fn jnu(&self, x: f64, edt: f64) -> SnrResult<f64> {
        self.jnu_cache
            .get_or_try_insert_with((f64_key(x), f64_key(edt)), || {
                let temp = self.temperature(x)?;
                if temp <= 0.0 {
                    return Ok(0.0);
                }
                let ratio = edt / temp;
                let z_sq = self.snapshot.composition.ambient.z_sq;
                Ok(JNU_NORM * z_sq / temp.sqrt() * gaunt_factor(ratio) * (-ratio).exp())
            })
    }

    /// Emission measure and emission-weighted temperature.
    pub fn emission_measure(&self) -> SnrResult<EmissionMeasure> {
        let snap = &self.snapshot;
        let am = &snap.composition.ambient;
        let ej = &snap.composition.ejecta;
        let em_scale = 16.0 * snap.n_0.powi(2) * snap.radius.powi(3);

        let em_integrand = |x: f64| -> SnrResult<f64> { Ok(self.density(x)?.powi(2) * 4.0 * PI * x * x) };
        let t_integrand = |x: f64| -> SnrResult<f64> { Ok(em_integrand(x)? * self.temperature(x)?) };

        if self.is_chev() {
            let cfg = QuadConfig::with_epsabs(EM_EPSABS);
            let inner = &snap.em_points_inner;
            let outer = &snap.em_points_outer;
            let em_in = quad(em_integrand, snap.r_min, snap.r_c, inner, &cfg)?;
            let em_out = quad(em_integrand, snap.r_c, 1.0, outer, &cfg)?;
            let t_in = quad(t_integrand, snap.r_min, snap.r_c, inner, &cfg)? * snap.t_shock;
            let t_out = quad(t_integrand, snap.r_c, 1.0, outer, &cfg)? * snap.t_shock;

            let forward = em_scale * am.mu_h * em_out / am.mu_e;
            let reverse = em_scale * am.mu_h.powi(2) * em_in / ej.mu_h / ej.mu_e;
            debug!(em_in, em_out, "Emission measure integrals");
            return Ok(EmissionMeasure {
                total: forward + reverse,
                forward: Some(forward),
                reverse: Some(reverse),
                temperature: (t_in + t_out) / (em_in + em_out),
                temperature_forward: Some(t_out / em_out),
                temperature_reverse: Some(t_in / em_in),
            });
        }

        let points = &snap.em_points_outer;
        let cfg = QuadConfig {
            limit: points.len() + 50,
            ..QuadConfig::with_epsabs(EM_EPSABS)
        };
        let em_all = quad(em_integrand, snap.r_min, 1.0, points, &cfg)?;
        let t_all = quad(t_integrand, snap.r_min, 1.0, points, &cfg)?;
        Ok(EmissionMeasure {
            total: em_all * em_scale * am.mu_h / am.mu_e,
            forward: None,
            reverse: None,
            temperature: t_all / em_all * snap.t_shock,
            temperature_forward: None,
            temperature_reverse: None,
        })
    }

    /// Limits of the s integral at impact parameter `b`.
    fn s_limits(&self, b: f64) -> (f64, f64) {
        let upper = (1.0 - b * b).max(0.0).sqrt();
        let r_min = self.snapshot.r_min;
        if self.is_chev() && b < r_min {
            ((r_min * r_min - b * b).sqrt(), upper)
        } else {
            (0.0, upper)
        }
    }

    /// Break points of the s integral where the line of sight crosses a
    /// kink or the contact discontinuity.
    fn s_points(&self, b: f64) -> Vec<f64> {
        if !self.is_chev() {
            return Vec::new();
        }
        let snap = &self.snapshot;
        let mut points: Vec<f64> = snap
            .difficult
            .iter()
            .filter(|&&r| b < r)
            .map(|&r| (r * r - b * b).sqrt())
            .collect();
        if b < snap.r_c {
            points.push((snap.r_c * snap.r_c - b * b).sqrt());
        }
        points
    }

    /// Composition-weighted j_ν ρ² at (s, b).
    fn column_integrand(&self, s: f64, b: f64, edt: f64, region: Region) -> SnrResult<f64> {
        let radius = (s * s + b * b).sqrt();
        let interior = radius <= self.snapshot.r_c;
        let included = match region {
            Region::All => true,
            Region::Forward => !interior,
            Region::Reverse => interior,
        };
        if !included {
            return Ok(0.0);
        }
        let multiplier = if radius < self.snapshot.r_c {
            self.ej_correction
        } else {
            1.0
        };
        Ok(self.jnu(radius, edt)? * self.density(radius)?.powi(2) * multiplier)
    }

    fn column(&self, b: f64, edt: f64, region: Region) -> SnrResult<f64> {
        let (lo, hi) = self.s_limits(b);
        quad(
            |s| self.column_integrand(s, b, edt, region),
            lo,
            hi,
            &self.s_points(b),
            &QuadConfig::default(),
        )
    }

    fn disc(&self, edt: f64, region: Region) -> SnrResult<f64> {
        quad(
            |b| Ok(b * self.column(b, edt, region)?),
            0.0,
            1.0,
            &[],
            &QuadConfig::default(),
        )
    }

    /// Specific intensity at impact parameter `b` for the configured energy.
    pub fn specific_intensity(&self, b: f64) -> SnrResult<f64> {
        let edt = self.settings.energy_kev * self.nrg_to_edt;
        Ok(self.intensity_scale * self.column(b, edt, Region::All)?)
    }

    /// Luminosity per unit frequency at photon energy `energy_kev`.
    pub fn luminosity_spectrum(&self, energy_kev: f64) -> SnrResult<f64> {
        let edt = energy_kev * self.nrg_to_edt;
        Ok(self.spectrum_scale * self.disc(edt, Region::All)?)
    }

    fn band_luminosity(&self, region: Region) -> SnrResult<f64> {
        let lo = self.settings.emin_kev * self.nrg_to_edt;
        let hi = self.settings.emax_kev * self.nrg_to_edt;
        let integral = quad(
            |edt| self.disc(edt, region),
            lo,
            hi,
            &EDT_POINTS,
            &QuadConfig::default(),
        )?;
        Ok(self.luminosity_scale * integral)
    }

    /// Luminosity over the configured energy band.
    pub fn total_luminosity(&self) -> SnrResult<Luminosity> {
        if self.is_chev() {
            let forward = self.band_luminosity(Region::Forward)?;
            let reverse = self.band_luminosity(Region::Reverse)?;
            return Ok(Luminosity {
                total: forward + reverse,
                forward: Some(forward),
                reverse: Some(reverse),
            });
        }
        Ok(Luminosity {
            total: self.band_luminosity(Region::All)?,
            forward: None,
            reverse: None,
        })
    }

    fn curve<F>(&self, lo: f64, hi: f64, mut f: F) -> SnrResult<Curve>
    where
        F: FnMut(f64) -> SnrResult<f64>,
    {
        let x = Array1::linspace(lo, hi, PROFILE_SAMPLES);
        let y = x.iter().map(|&v| f(v)).collect::<SnrResult<Vec<f64>>>()?;
        Ok(Curve {
            x,
            y: Array1::from(y),
        })
    }

    pub fn spectrum_curve(&self) -> SnrResult<Curve> {
        let s = &self.settings;
        self.curve(s.emin_kev, s.emax_kev, |e| self.luminosity_spectrum(e))
    }

    pub fn intensity_curve(&self) -> SnrResult<Curve> {
        self.curve(0.0, 1.0, |b| self.specific_intensity(b))
    }

    pub fn temperature_curve(&self) -> SnrResult<Curve> {
        self.curve(self.snapshot.r_min, 1.0, |x| self.temperature(x))
    }

    pub fn density_curve(&self) -> SnrResult<Curve> {
        self.curve(self.snapshot.r_min, 1.0, |x| self.density(x))
    }

    /// All observables and profile curves.
    pub fn report(&self) -> SnrResult<EmissivityReport> {
        let report = EmissivityReport {
            model: self.snapshot.model,
            emission_measure: self.emission_measure()?,
            luminosity: self.total_luminosity()?,
            spectrum: self.spectrum_curve()?,
            intensity: self.intensity_curve()?,
            temperature: self.temperature_curve()?,
            density: self.density_curve()?,
        };
        debug!(
            jnu_cached = self.jnu_cache.len(),
            density_cached = self.density_cache.len(),
            "Emissivity report complete"
        );
        Ok(report)
    }
}
