// ─────────────────────────────────────────────────────────────────────
// SNR Evolution Core — State
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use crate::error::{SnrError, SnrResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Evolutionary phase tag. Forward-shock phases first, then the
/// reverse-shock branches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Phase {
    /// Ejecta-dominated
    Ed,
    /// Sedov-Taylor
    St,
    /// Pressure-driven snowplow
    Pds,
    /// Momentum-conserving snowplow
    Mcs,
    /// Cloudy ISM (White & Long)
    Wl,
    /// Loss-modified (Liang & Keilty)
    Lk,
    /// Light ejecta, hot medium (Tang & Wang)
    Tw,
    /// Ejecta-dominated blast wave in a wind (s = 2)
    WindEd,
    /// Reverse shock before the branch change at t_rchg
    ReverseEarly,
    /// Reverse shock from t_rchg until it reaches the centre
    ReverseLate,
    /// Reverse shock in a wind (s = 2)
    WindReverse,
}

impl Phase {
    pub fn is_reverse(self) -> bool {
        matches!(
            self,
            Phase::ReverseEarly | Phase::ReverseLate | Phase::WindReverse
        )
    }

    pub fn label(self) -> &'static str {
        match self {
            Phase::Ed => "ED",
            Phase::St => "ST",
            Phase::Pds => "PDS",
            Phase::Mcs => "MCS",
            Phase::Wl => "WL",
            Phase::Lk => "LK",
            Phase::Tw => "TW",
            Phase::WindEd => "s2",
            Phase::ReverseEarly => "early",
            Phase::ReverseLate => "late",
            Phase::WindReverse => "s2r",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Characteristic scales of the remnant.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Scales {
    /// Characteristic radius [pc]
    pub r_ch: f64,
    /// Characteristic time [yr]
    pub t_ch: f64,
    /// Characteristic velocity [km/s]
    pub v_ch: f64,
    /// Ejecta velocity scale √(100 E/M) [10³ km/s]
    pub v_ej: f64,
    /// Ambient adiabatic sound speed [km/s]
    pub c_0: f64,
    /// Quadrature sum of sound speed and turbulent velocity [km/s]
    pub c_net: f64,
}

/// Phase transition times for a uniform medium [yr].
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TransitionTimes {
    /// ED → ST
    pub t_st: f64,
    /// Reverse-shock branch change (early → late)
    pub t_rchg: f64,
    /// Reverse shock reaches the centre
    pub t_rev: f64,
    /// PDS onset
    pub t_pds: f64,
    /// MCS onset
    pub t_mcs: f64,
    /// Tang & Wang characteristic time; TW starts at 0.1 t_c
    pub t_c: f64,
    /// LK onset (LK model only)
    pub t_lk: Option<f64>,
}

impl TransitionTimes {
    pub fn t_tw(&self) -> f64 {
        0.1 * self.t_c
    }
}

/// Age at which each phase's forward shock merges with the ambient medium.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MergerTimes(pub BTreeMap<Phase, f64>);

impl MergerTimes {
    pub fn get(&self, phase: Phase) -> Option<f64> {
        self.0.get(&phase).copied()
    }

    pub fn require(&self, phase: Phase) -> SnrResult<f64> {
        self.get(phase).ok_or_else(|| {
            SnrError::ConfigError(format!("no merger time computed for phase {phase}"))
        })
    }

    pub fn insert(&mut self, phase: Phase, t: f64) {
        self.0.insert(phase, t);
    }
}

/// Mean-molecular-weight and charge moments of one gas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GasMoments {
    /// Mass per hydrogen atom [m_H]
    pub mu_h: f64,
    /// Mass per electron [m_H]
    pub mu_e: f64,
    /// Mass per ion [m_H]
    pub mu_i: f64,
    /// Mean squared ion charge
    pub z_sq: f64,
}

impl GasMoments {
    /// Mean mass per particle with ions at `t_ratio` of the electron temperature.
    pub fn mu_thermal(&self, t_ratio: f64) -> f64 {
        1.0 / (1.0 / self.mu_e + 1.0 / t_ratio / self.mu_i)
    }
}

/// Ambient and ejecta composition moments.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Composition {
    pub ambient: GasMoments,
    pub ejecta: GasMoments,
}

/// Radius, velocity and post-shock temperature of one shock.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShockState {
    /// [pc]
    pub radius: f64,
    /// [km/s]
    pub velocity: f64,
    /// [K]
    pub temperature: f64,
}

/// Named entry in the output map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OutputValue {
    Number(f64),
    Text(String),
}

impl OutputValue {
    pub fn not_available() -> Self {
        OutputValue::Text("N/A".to_string())
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            OutputValue::Number(v) => Some(*v),
            OutputValue::Text(_) => None,
        }
    }
}

impl From<f64> for OutputValue {
    fn from(v: f64) -> Self {
        OutputValue::Number(v)
    }
}

impl From<Option<f64>> for OutputValue {
    fn from(v: Option<f64>) -> Self {
        v.map_or_else(OutputValue::not_available, OutputValue::Number)
    }
}

pub type OutputMap = BTreeMap<String, OutputValue>;

/// Selectable time range for plotting.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PhaseRange {
    Current,
    ReverseShockLifetime,
    EdSt,
    Ed,
    EdWl,
    St,
    Pds,
    Mcs,
    Lk,
    Tw,
    Wl,
    Wind,
    Custom { t_min: f64, t_max: f64 },
}

impl PhaseRange {
    pub fn label(&self) -> &'static str {
        match self {
            PhaseRange::Current => "Current",
            PhaseRange::ReverseShockLifetime => "Reverse Shock Lifetime",
            PhaseRange::EdSt => "ED-ST",
            PhaseRange::Ed => "ED",
            PhaseRange::EdWl => "ED-WL",
            PhaseRange::St => "ST",
            PhaseRange::Pds => "PDS",
            PhaseRange::Mcs => "MCS",
            PhaseRange::Lk => "LK",
            PhaseRange::Tw => "TW",
            PhaseRange::Wl => "WL",
            PhaseRange::Wind => "s2",
            PhaseRange::Custom { .. } => "Custom",
        }
    }
}

impl fmt::Display for PhaseRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_labels() {
        assert_eq!(Phase::Ed.to_string(), "ED");
        assert_eq!(Phase::WindEd.to_string(), "s2");
        assert_eq!(Phase::ReverseLate.to_string(), "late");
        assert!(Phase::WindReverse.is_reverse());
        assert!(!Phase::Mcs.is_reverse());
    }

    #[test]
    fn test_merger_times_lookup() {
        let mut mergers = MergerTimes::default();
        mergers.insert(Phase::St, 4.2e4);
        assert_eq!(mergers.get(Phase::St), Some(4.2e4));
        assert!(mergers.get(Phase::Lk).is_none());
        assert!(mergers.require(Phase::Lk).is_err());
    }

    #[test]
    fn test_thermal_mu_full_equilibration() {
        let gas = GasMoments {
            mu_h: 1.0,
            mu_e: 1.0,
            mu_i: 1.0,
            z_sq: 1.0,
        };
        // Pure hydrogen, Te = Ti: μ = 1/2
        assert!((gas.mu_thermal(1.0) - 0.5).abs() < 1e-15);
    }

    #[test]
    fn test_output_value_serializes_flat() {
        let mut map = OutputMap::new();
        map.insert("r".into(), 3.5.into());
        map.insert("rr".into(), OutputValue::not_available());
        let json = serde_json::to_string(&map).unwrap();
        assert_eq!(json, r#"{"r":3.5,"rr":"N/A"}"#);
    }
}
