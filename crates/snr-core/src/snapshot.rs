// ─────────────────────────────────────────────────────────────────────
// SNR Evolution Core — Snapshot
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Shock state at one age and the flat output map built from it.

use crate::evolution::EvolutionState;
use serde::Serialize;
use snr_types::config::Environment;
use snr_types::constants::{BOLTZMANN, KM_TO_CM, M_H};
use snr_types::error::SnrResult;
use snr_types::state::{GasMoments, OutputMap, OutputValue, Phase, ShockState};

/// Notice reported in place of transition times for the wind model.
pub const WIND_NOTICE: &str = "This model only includes the ejecta-dominated phase.";

/// Post-shock temperature [K] for shock velocity `velocity` [km/s].
pub fn shock_temperature(velocity: f64, gas: &GasMoments, t_ratio: f64) -> f64 {
    3.0 / 16.0 * gas.mu_thermal(t_ratio) * M_H / BOLTZMANN * (velocity * KM_TO_CM).powi(2)
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ReverseShock {
    pub phase: Phase,
    pub shock: ShockState,
}

/// Forward and (while it exists) reverse shock at one age.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Snapshot {
    pub t: f64,
    pub phase: Phase,
    pub forward: ShockState,
    pub reverse: Option<ReverseShock>,
}

impl EvolutionState {
    /// Last age [yr] at which `phase`'s law is defined. Laws given as
    /// t(r) stop where their inversion bracket ends.
    pub fn law_end(&self, phase: Phase) -> SnrResult<f64> {
        let law = self.table().get(self.n(), phase)?;
        if law.inverts_radius() {
            let limit = law.radius_limit(self.context())?;
            law.time_of_radius(self.context(), limit)
        } else {
            Ok(f64::INFINITY)
        }
    }

    /// Reverse-shock branch at age `t`, `None` once it has reached the
    /// centre or left its fitted range.
    pub fn reverse_phase_at(&self, t: f64) -> SnrResult<Option<Phase>> {
        let phase = match (self.environment(), self.transitions()) {
            (Environment::Wind, _) => Phase::WindReverse,
            (Environment::Uniform, Some(tr)) if t < tr.t_rchg => Phase::ReverseEarly,
            (Environment::Uniform, Some(tr)) if t < tr.t_rev => Phase::ReverseLate,
            _ => return Ok(None),
        };
        if t > self.law_end(phase)? {
            return Ok(None);
        }
        Ok(Some(phase))
    }

    /// Shock state at age `t`, clamped to the final merger.
    pub fn snapshot_at(&self, t: f64) -> SnrResult<Snapshot> {
        let t = t.min(self.final_merger());
        let phase = self.current_phase(t);
        let velocity = self.velocity(phase, t)?;
        let forward = ShockState {
            radius: self.radius(phase, t)?,
            velocity,
            temperature: shock_temperature(velocity, &self.composition().ambient, self.t_ratio()),
        };
        let reverse = match self.reverse_phase_at(t)? {
            Some(rev) => {
                let velocity = self.velocity(rev, t)?;
                Some(ReverseShock {
                    phase: rev,
                    shock: ShockState {
                        radius: self.radius(rev, t)?,
                        velocity,
                        temperature: shock_temperature(
                            velocity,
                            &self.composition().ejecta,
                            self.t_ratio(),
                        ),
                    },
                })
            }
            None => None,
        };
        Ok(Snapshot {
            t,
            phase,
            forward,
            reverse,
        })
    }

    /// Snapshot at the evaluated age.
    pub fn snapshot(&self) -> SnrResult<Snapshot> {
        self.snapshot_at(self.age())
    }

    /// Flat output map: transition times, final merger and shock values.
    pub fn output_map(&self) -> SnrResult<OutputMap> {
        let mut out = OutputMap::new();
        match self.transitions() {
            Some(tr) => {
                out.insert("t-ST".into(), tr.t_st.into());
                out.insert("t-WL".into(), tr.t_st.into());
                out.insert("t-PDS".into(), tr.t_pds.into());
                out.insert("t-MCS".into(), tr.t_mcs.into());
                out.insert("t-TW".into(), tr.t_tw().into());
                out.insert("t-LK".into(), tr.t_lk.into());
            }
            None => {
                out.insert("t-s2".into(), OutputValue::Text(WIND_NOTICE.to_string()));
            }
        }
        out.insert("t-MRG".into(), self.final_merger().into());
        if let Some(t) = self.lk_reset_merger() {
            out.insert("t-MRG-LK".into(), t.into());
        }

        let snap = self.snapshot()?;
        out.insert("r".into(), snap.forward.radius.into());
        out.insert("v".into(), snap.forward.velocity.into());
        out.insert("T".into(), snap.forward.temperature.into());
        let reverse = snap.reverse.map(|r| r.shock);
        out.insert("rr".into(), reverse.map(|s| s.radius).into());
        out.insert("vr".into(), reverse.map(|s| s.velocity).into());
        out.insert("Tr".into(), reverse.map(|s| s.temperature).into());
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shock_temperature_pure_hydrogen() {
        let gas = GasMoments {
            mu_h: 1.0,
            mu_e: 1.0,
            mu_i: 1.0,
            z_sq: 1.0,
        };
        // μ = 1/2: T = 3/32 m_H v² / k
        let t = shock_temperature(1000.0, &gas, 1.0);
        let expected = 3.0 / 32.0 * M_H / BOLTZMANN * 1.0e16;
        assert!((t - expected).abs() / expected < 1e-12);
        // Cold electrons lower the effective μ
        assert!(shock_temperature(1000.0, &gas, 0.1) < t);
    }
}
