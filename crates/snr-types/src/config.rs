// ─────────────────────────────────────────────────────────────────────
// SNR Evolution Core — Config
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use crate::error::{SnrError, SnrResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Physical input parameters for one remnant.
/// Flat JSON object; optional fields fall back to the defaults below.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhysicalInputs {
    /// Explosion energy [10^51 erg]
    pub e_51: f64,
    /// Ejecta mass [M☉]
    pub m_ej: f64,
    /// Ambient hydrogen number density [cm⁻³]
    pub n_0: f64,
    /// Ambient temperature [K]
    #[serde(default = "default_temp_ism")]
    pub temp_ism: f64,
    /// Turbulent velocity dispersion of the ambient gas [km/s]
    #[serde(default = "default_sigma_v")]
    pub sigma_v: f64,
    /// Ejecta density power-law index
    pub n: u8,
    /// Circumstellar environment
    #[serde(default)]
    pub s: Environment,
    /// Ambient log abundances (H = 12)
    #[serde(default = "Abundances::solar")]
    pub abundance: Abundances,
    /// Ejecta log abundances
    #[serde(default = "Abundances::solar")]
    pub ej_abundance: Abundances,
    /// Electron/ion temperature ratio; estimated from age and density when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub t_ratio: Option<f64>,
    #[serde(default)]
    pub model: ModelVariant,
    /// Age at which outputs are reported [yr]
    pub t: f64,
    /// Cooling-function metallicity correction ζ_m
    #[serde(default = "default_zeta_m")]
    pub zeta_m: f64,
    /// Cloudy-ISM cooling class C/τ (White & Long)
    #[serde(default = "default_c_tau")]
    pub c_tau: u8,
    /// Loss-modified phase onset [yr]; defaults to the PDS onset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub t_lk: Option<f64>,
    /// Liang–Keilty adiabatic index of the unshocked flow
    #[serde(default = "default_gamma_0")]
    pub gamma_0: f64,
    /// Liang–Keilty fractional energy loss ε
    #[serde(default = "default_eps")]
    pub eps: f64,
    /// End of the light-ejecta (TW) model [yr]; defaults to t_c
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub t_tw: Option<f64>,
    /// Wind mass-loss rate [M☉/yr] (s = 2)
    #[serde(default = "default_m_w")]
    pub m_w: f64,
    /// Wind speed [km/s] (s = 2)
    #[serde(default = "default_v_w")]
    pub v_w: f64,
}

fn default_temp_ism() -> f64 {
    100.0
}
fn default_sigma_v() -> f64 {
    7.0
}
fn default_zeta_m() -> f64 {
    1.0
}
fn default_c_tau() -> u8 {
    2
}
fn default_gamma_0() -> f64 {
    5.0 / 3.0
}
fn default_eps() -> f64 {
    0.5
}
fn default_m_w() -> f64 {
    1.0e-5
}
fn default_v_w() -> f64 {
    10.0
}

impl PhysicalInputs {
    /// Load from a JSON parameter file.
    pub fn from_file(path: &str) -> SnrResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        let inputs: Self = serde_json::from_str(&contents)?;
        inputs.validate()?;
        Ok(inputs)
    }

    /// Reference remnant: 1 foe, 1.4 M☉, n₀ = 1, uniform medium.
    pub fn reference(n: u8) -> Self {
        PhysicalInputs {
            e_51: 1.0,
            m_ej: 1.4,
            n_0: 1.0,
            temp_ism: default_temp_ism(),
            sigma_v: default_sigma_v(),
            n,
            s: Environment::Uniform,
            abundance: Abundances::solar(),
            ej_abundance: Abundances::solar(),
            t_ratio: None,
            model: ModelVariant::Standard,
            t: 1000.0,
            zeta_m: default_zeta_m(),
            c_tau: default_c_tau(),
            t_lk: None,
            gamma_0: default_gamma_0(),
            eps: default_eps(),
            t_tw: None,
            m_w: default_m_w(),
            v_w: default_v_w(),
        }
    }

    /// Range checks that do not depend on the constant tables.
    pub fn validate(&self) -> SnrResult<()> {
        let positive = [
            ("e_51", self.e_51),
            ("m_ej", self.m_ej),
            ("n_0", self.n_0),
            ("temp_ism", self.temp_ism),
            ("t", self.t),
            ("zeta_m", self.zeta_m),
            ("m_w", self.m_w),
            ("v_w", self.v_w),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(SnrError::ConfigError(format!(
                    "{name} must be finite and > 0, got {value}"
                )));
            }
        }
        if !self.sigma_v.is_finite() || self.sigma_v < 0.0 {
            return Err(SnrError::ConfigError(format!(
                "sigma_v must be finite and >= 0, got {}",
                self.sigma_v
            )));
        }
        if let Some(ratio) = self.t_ratio {
            if !ratio.is_finite() || ratio <= 0.0 || ratio > 1.0 {
                return Err(SnrError::ConfigError(format!(
                    "t_ratio must lie in (0, 1], got {ratio}"
                )));
            }
        }
        if self.model == ModelVariant::LossModified && (self.gamma_0 <= 1.0 || self.eps <= 0.0) {
            return Err(SnrError::ConfigError(format!(
                "LK model needs gamma_0 > 1 and eps > 0, got gamma_0={}, eps={}",
                self.gamma_0, self.eps
            )));
        }
        if !self.abundance.contains(Element::H) || !self.ej_abundance.contains(Element::H) {
            return Err(SnrError::ConfigError(
                "abundance maps must include hydrogen".to_string(),
            ));
        }
        Ok(())
    }
}

/// Circumstellar environment: uniform ISM (s = 0) or wind-blown ρ ∝ r⁻² (s = 2).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Environment {
    #[default]
    Uniform,
    Wind,
}

impl Environment {
    pub fn index(self) -> u8 {
        match self {
            Environment::Uniform => 0,
            Environment::Wind => 2,
        }
    }
}

impl TryFrom<u8> for Environment {
    type Error = String;

    fn try_from(s: u8) -> Result<Self, Self::Error> {
        match s {
            0 => Ok(Environment::Uniform),
            2 => Ok(Environment::Wind),
            other => Err(format!("environment index s must be 0 or 2, got {other}")),
        }
    }
}

impl From<Environment> for u8 {
    fn from(env: Environment) -> u8 {
        env.index()
    }
}

/// Evolution model variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ModelVariant {
    /// Standard ED → ST → PDS → MCS sequence.
    #[default]
    #[serde(rename = "cf", alias = "standard")]
    Standard,
    /// White & Long cloudy interstellar medium.
    #[serde(rename = "wl", alias = "cloudy-ism")]
    CloudyIsm,
    /// Tang & Wang light-ejecta, high-temperature medium.
    #[serde(rename = "tw", alias = "light-ejecta")]
    LightEjecta,
    /// Liang & Keilty fractional energy loss.
    #[serde(rename = "lk", alias = "loss-modified")]
    LossModified,
}

impl fmt::Display for ModelVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = match self {
            ModelVariant::Standard => "cf",
            ModelVariant::CloudyIsm => "wl",
            ModelVariant::LightEjecta => "tw",
            ModelVariant::LossModified => "lk",
        };
        f.write_str(tag)
    }
}

/// Elements tracked by the composition calculator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Element {
    H,
    He,
    C,
    N,
    O,
    Ne,
    Mg,
    Si,
    S,
    Fe,
}

impl Element {
    pub const ALL: [Element; 10] = [
        Element::H,
        Element::He,
        Element::C,
        Element::N,
        Element::O,
        Element::Ne,
        Element::Mg,
        Element::Si,
        Element::S,
        Element::Fe,
    ];

    /// Mass number.
    pub fn mass_number(self) -> f64 {
        match self {
            Element::H => 1.0,
            Element::He => 4.0,
            Element::C => 12.0,
            Element::N => 14.0,
            Element::O => 16.0,
            Element::Ne => 20.0,
            Element::Mg => 24.0,
            Element::Si => 28.0,
            Element::S => 32.0,
            Element::Fe => 56.0,
        }
    }

    /// Nuclear charge.
    pub fn charge(self) -> f64 {
        match self {
            Element::H => 1.0,
            Element::He => 2.0,
            Element::C => 6.0,
            Element::N => 7.0,
            Element::O => 8.0,
            Element::Ne => 10.0,
            Element::Mg => 12.0,
            Element::Si => 14.0,
            Element::S => 16.0,
            Element::Fe => 26.0,
        }
    }
}

/// Log abundances, log₁₀(N_X/N_H) + 12.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Abundances(pub BTreeMap<Element, f64>);

impl Abundances {
    /// Anders & Grevesse (1989) solar photosphere.
    pub fn solar() -> Self {
        Abundances(BTreeMap::from([
            (Element::H, 12.00),
            (Element::He, 10.99),
            (Element::C, 8.56),
            (Element::N, 8.05),
            (Element::O, 8.93),
            (Element::Ne, 8.09),
            (Element::Mg, 7.58),
            (Element::Si, 7.55),
            (Element::S, 7.21),
            (Element::Fe, 7.67),
        ]))
    }

    /// Pure hydrogen gas.
    pub fn hydrogen_only() -> Self {
        Abundances(BTreeMap::from([(Element::H, 12.0)]))
    }

    pub fn get(&self, element: Element) -> Option<f64> {
        self.0.get(&element).copied()
    }

    pub fn contains(&self, element: Element) -> bool {
        self.0.contains_key(&element)
    }

    pub fn with(mut self, element: Element, log_abundance: f64) -> Self {
        self.0.insert(element, log_abundance);
        self
    }

    pub fn iter(&self) -> impl Iterator<Item = (Element, f64)> + '_ {
        self.0.iter().map(|(&el, &ab)| (el, ab))
    }
}

/// Photon energies used by the emissivity engine.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct EmissivitySettings {
    /// Photon energy for the specific-intensity profile [keV]
    #[serde(default = "default_energy_kev")]
    pub energy_kev: f64,
    /// Lower edge of the luminosity band [keV]
    #[serde(default = "default_emin_kev")]
    pub emin_kev: f64,
    /// Upper edge of the luminosity band [keV]
    #[serde(default = "default_emax_kev")]
    pub emax_kev: f64,
}

fn default_energy_kev() -> f64 {
    1.0
}
fn default_emin_kev() -> f64 {
    0.3
}
fn default_emax_kev() -> f64 {
    8.0
}

impl Default for EmissivitySettings {
    fn default() -> Self {
        EmissivitySettings {
            energy_kev: default_energy_kev(),
            emin_kev: default_emin_kev(),
            emax_kev: default_emax_kev(),
        }
    }
}

impl EmissivitySettings {
    pub fn validate(&self) -> SnrResult<()> {
        if !(self.energy_kev > 0.0 && self.emin_kev > 0.0 && self.emax_kev > self.emin_kev) {
            return Err(SnrError::ConfigError(format!(
                "emissivity energies must satisfy energy > 0, 0 < emin < emax, got {self:?}"
            )));
        }
        Ok(())
    }
}

/// Sample counts for plot tracks.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SamplingSettings {
    /// Samples for ED/ST and reverse-shock segments
    #[serde(default = "default_coarse")]
    pub coarse: usize,
    /// Samples for PDS and MCS segments
    #[serde(default = "default_fine")]
    pub fine: usize,
    /// Samples for LK, WL and wind segments
    #[serde(default = "default_dense")]
    pub dense: usize,
    /// Radius samples for laws given as t(r) in a uniform medium
    #[serde(default = "default_radius_samples")]
    pub radius_samples: usize,
    /// Radius samples for wind laws given as t(r)
    #[serde(default = "default_wind_radius_samples")]
    pub wind_radius_samples: usize,
}

fn default_coarse() -> usize {
    1000
}
fn default_fine() -> usize {
    10_000
}
fn default_dense() -> usize {
    50_000
}
fn default_radius_samples() -> usize {
    100
}
fn default_wind_radius_samples() -> usize {
    100_000
}

impl Default for SamplingSettings {
    fn default() -> Self {
        SamplingSettings {
            coarse: default_coarse(),
            fine: default_fine(),
            dense: default_dense(),
            radius_samples: default_radius_samples(),
            wind_radius_samples: default_wind_radius_samples(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minimal_json_uses_defaults() {
        let json = r#"{"e_51": 1.0, "m_ej": 1.4, "n_0": 1.0, "n": 7, "t": 500.0}"#;
        let inputs: PhysicalInputs = serde_json::from_str(json).unwrap();
        assert_eq!(inputs.s, Environment::Uniform);
        assert_eq!(inputs.model, ModelVariant::Standard);
        assert_eq!(inputs.c_tau, 2);
        assert!(inputs.t_ratio.is_none());
        assert!((inputs.gamma_0 - 5.0 / 3.0).abs() < 1e-12);
        assert_eq!(inputs.abundance, Abundances::solar());
        inputs.validate().unwrap();
    }

    #[test]
    fn test_model_tags() {
        for (tag, model) in [
            ("\"cf\"", ModelVariant::Standard),
            ("\"wl\"", ModelVariant::CloudyIsm),
            ("\"tw\"", ModelVariant::LightEjecta),
            ("\"lk\"", ModelVariant::LossModified),
            ("\"cloudy-ism\"", ModelVariant::CloudyIsm),
        ] {
            let parsed: ModelVariant = serde_json::from_str(tag).unwrap();
            assert_eq!(parsed, model);
        }
        assert_eq!(ModelVariant::LossModified.to_string(), "lk");
    }

    #[test]
    fn test_environment_rejects_unknown_index() {
        let json = r#"{"e_51": 1.0, "m_ej": 1.4, "n_0": 1.0, "n": 7, "t": 500.0, "s": 1}"#;
        assert!(serde_json::from_str::<PhysicalInputs>(json).is_err());
        let json = r#"{"e_51": 1.0, "m_ej": 1.4, "n_0": 1.0, "n": 7, "t": 500.0, "s": 2}"#;
        let inputs: PhysicalInputs = serde_json::from_str(json).unwrap();
        assert_eq!(inputs.s, Environment::Wind);
    }

    #[test]
    fn test_validate_rejects_missing_hydrogen() {
        let mut inputs = PhysicalInputs::reference(7);
        inputs.ej_abundance.0.remove(&Element::H);
        assert!(matches!(inputs.validate(), Err(SnrError::ConfigError(_))));
    }

    #[test]
    fn test_validate_rejects_nonpositive_energy() {
        let mut inputs = PhysicalInputs::reference(7);
        inputs.e_51 = 0.0;
        assert!(inputs.validate().is_err());
        inputs.e_51 = f64::NAN;
        assert!(inputs.validate().is_err());
    }

    #[test]
    fn test_from_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("inputs.json");
        let mut inputs = PhysicalInputs::reference(12);
        inputs.model = ModelVariant::LossModified;
        inputs.t_lk = Some(20_000.0);
        std::fs::write(&path, serde_json::to_string_pretty(&inputs).unwrap()).unwrap();

        let loaded = PhysicalInputs::from_file(&path.to_string_lossy()).unwrap();
        assert_eq!(loaded.n, 12);
        assert_eq!(loaded.model, ModelVariant::LossModified);
        assert_eq!(loaded.t_lk, Some(20_000.0));
        assert_eq!(loaded.abundance, inputs.abundance);
    }

    #[test]
    fn test_emissivity_settings_validation() {
        EmissivitySettings::default().validate().unwrap();
        let bad = EmissivitySettings {
            energy_kev: 1.0,
            emin_kev: 5.0,
            emax_kev: 2.0,
        };
        assert!(bad.validate().is_err());
    }
}
