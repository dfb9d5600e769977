// ─────────────────────────────────────────────────────────────────────
// SNR Evolution Core — Plot Data
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Radius and velocity tracks of both shocks over the current phase
//! sequence, plus axis limits for a named range.
//!
//! Laws given as t(r) are sampled on a radius grid; phases whose radius
//! is an integral of the velocity use a cumulative trapezoid from the
//! phase anchor instead of one quadrature per sample.

use crate::evolution::EvolutionState;
use crate::phases::range_for;
use crate::registry::LawKind;
use ndarray::Array1;
use serde::Serialize;
use snr_math::quadrature::cumulative_trapezoid;
use snr_types::config::{Environment, ModelVariant, SamplingSettings};
use snr_types::constants::KMS_PER_PC_YR;
use snr_types::error::{SnrError, SnrResult};
use snr_types::state::{Phase, PhaseRange};
use std::collections::BTreeMap;
use tracing::debug;

/// First sampled age [yr] of tracks that start at the explosion.
const TRACK_START: f64 = 1.0;

/// First sampled radius [pc] of t(r) laws.
const RADIUS_START: f64 = 0.01;

/// Boundary of the coarse and dense wind grids [yr].
const WIND_GRID_SPLIT: f64 = 100.0;

/// Time, radius and velocity samples of one shock.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ShockTrack {
    /// [yr]
    pub t: Array1<f64>,
    /// [pc]
    pub r: Array1<f64>,
    /// [km/s]
    pub v: Array1<f64>,
}

impl ShockTrack {
    pub fn len(&self) -> usize {
        self.t.len()
    }

    pub fn is_empty(&self) -> bool {
        self.t.is_empty()
    }

    fn append(&mut self, other: ShockTrack) {
        let join = |a: &Array1<f64>, b: &Array1<f64>| {
            let mut joined = a.to_vec();
            joined.extend(b.iter());
            Array1::from(joined)
        };
        self.t = join(&self.t, &other.t);
        self.r = join(&self.r, &other.r);
        self.v = join(&self.v, &other.v);
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PlotData {
    pub forward: ShockTrack,
    pub reverse: ShockTrack,
    /// Axis range [yr] for the requested plot range
    pub limits: (f64, f64),
    /// Transition ages [yr] of the phases present, keyed like the output map
    pub markers: BTreeMap<String, f64>,
}

fn linspace(lo: f64, hi: f64, n: usize) -> Array1<f64> {
    if !(hi > lo) || n == 0 {
        return Array1::zeros(0);
    }
    Array1::linspace(lo, hi, n)
}

impl EvolutionState {
    /// Age where LK or TW cuts the standard phases short.
    fn cut_in(&self) -> f64 {
        match (self.model(), self.transitions()) {
            (ModelVariant::LossModified, Some(tr)) => tr.t_lk.unwrap_or(tr.t_pds),
            (ModelVariant::LightEjecta, Some(tr)) => tr.t_tw(),
            _ => f64::INFINITY,
        }
    }

    fn merger_or_inf(&self, phase: Phase) -> f64 {
        self.mergers().get(phase).unwrap_or(f64::INFINITY)
    }

    /// Time span `(start, end)` of `phase` in the current sequence.
    pub fn phase_span(&self, phase: Phase) -> SnrResult<(f64, f64)> {
        let cut = self.cut_in();
        let mrg = |p| self.merger_or_inf(p);
        let span = match (phase, self.transitions()) {
            (Phase::WindEd | Phase::WindReverse, _) => {
                let end = self.final_merger().min(self.law_end(phase)?);
                (TRACK_START, end)
            }
            (_, None) => (0.0, 0.0),
            (Phase::Ed, Some(tr)) => (
                TRACK_START,
                tr.t_st.min(cut).min(tr.t_pds).min(mrg(Phase::Ed)),
            ),
            (Phase::St, Some(tr)) => (tr.t_st, tr.t_pds.min(mrg(Phase::St)).min(cut)),
            (Phase::Pds, Some(tr)) => (tr.t_pds, tr.t_mcs.min(mrg(Phase::Pds)).min(cut)),
            (Phase::Mcs, Some(tr)) => (tr.t_mcs, mrg(Phase::Mcs)),
            (Phase::Lk, Some(tr)) => (tr.t_lk.unwrap_or(tr.t_pds), mrg(Phase::Lk)),
            (Phase::Tw, Some(tr)) => (tr.t_tw(), mrg(Phase::Tw)),
            (Phase::Wl, Some(tr)) => (tr.t_st, mrg(Phase::Wl).min(tr.t_mcs)),
            (Phase::ReverseEarly, Some(tr)) => (TRACK_START, tr.t_rchg),
            (Phase::ReverseLate, Some(tr)) => (tr.t_rchg, tr.t_rev),
        };
        Ok(span)
    }

    fn sample_count(&self, phase: Phase, sampling: &SamplingSettings) -> usize {
        match phase {
            Phase::Pds | Phase::Mcs => sampling.fine,
            Phase::Lk | Phase::Wl => sampling.dense,
            Phase::Tw => {
                let end = self.merger_or_inf(Phase::Tw);
                ((end / 10.0).round() as usize).max(2)
            }
            _ => sampling.coarse,
        }
    }

    fn time_grid(&self, phase: Phase, sampling: &SamplingSettings) -> SnrResult<Array1<f64>> {
        let (lo, hi) = self.phase_span(phase)?;
        if matches!(phase, Phase::WindEd | Phase::WindReverse) {
            let split = WIND_GRID_SPLIT.min(hi);
            let mut grid = linspace(lo, split, sampling.coarse).to_vec();
            grid.extend(linspace(split, hi, sampling.dense).iter());
            return Ok(Array1::from(grid));
        }
        Ok(linspace(lo, hi, self.sample_count(phase, sampling)))
    }

    /// Samples of one phase's shock.
    pub fn phase_track(&self, phase: Phase, sampling: &SamplingSettings) -> SnrResult<ShockTrack> {
        let ctx = self.context();
        let law = self.table().get(self.n(), phase)?;

        if law.inverts_radius() {
            let (_, end) = self.phase_span(phase)?;
            let samples = match phase {
                Phase::WindEd | Phase::WindReverse => sampling.wind_radius_samples,
                _ => sampling.radius_samples,
            };
            let r_max = law.radius_limit(ctx)?;
            let mut t = Vec::with_capacity(samples);
            let mut r = Vec::with_capacity(samples);
            let mut v = Vec::with_capacity(samples);
            for &radius in linspace(RADIUS_START, r_max, samples).iter() {
                let age = law.time_of_radius(ctx, radius)?;
                if age > end {
                    break;
                }
                t.push(age);
                r.push(radius);
                v.push(law.velocity(ctx, radius)?);
            }
            return Ok(ShockTrack {
                t: Array1::from(t),
                r: Array1::from(r),
                v: Array1::from(v),
            });
        }

        let t = self.time_grid(phase, sampling)?;
        let v = t
            .iter()
            .map(|&age| law.velocity(ctx, age))
            .collect::<SnrResult<Vec<f64>>>()?;
        let v = Array1::from(v);

        let integrated = match law.kind {
            LawKind::Pds | LawKind::Wl | LawKind::Tw => true,
            LawKind::Mcs => self.model() != ModelVariant::CloudyIsm,
            _ => false,
        };
        let r = if integrated && !t.is_empty() {
            let anchor = ctx.anchor(phase)?;
            let rate = v.mapv(|x| x / KMS_PER_PC_YR);
            cumulative_trapezoid(&rate, &t) + anchor.radius
        } else {
            let r = t
                .iter()
                .map(|&age| law.radius(ctx, age))
                .collect::<SnrResult<Vec<f64>>>()?;
            Array1::from(r)
        };
        Ok(ShockTrack { t, r, v })
    }

    fn reverse_phases(&self) -> &'static [Phase] {
        match self.environment() {
            Environment::Uniform => &[Phase::ReverseEarly, Phase::ReverseLate],
            Environment::Wind => &[Phase::WindReverse],
        }
    }

    /// Axis limits [yr] for `range`; `Current` resolves to the range
    /// showing the phase at the evaluated age.
    pub fn limits(&self, range: PhaseRange) -> SnrResult<(f64, f64)> {
        let range = match range {
            PhaseRange::Current => range_for(self.current_phase(self.age()), self.ranges()),
            other => other,
        };
        let final_merger = self.final_merger();
        let tr = match self.transitions() {
            Some(tr) => *tr,
            None => {
                return match range {
                    PhaseRange::Custom { t_min, t_max } => clamp_custom(t_min, t_max, final_merger),
                    _ => Ok((0.0, self.scales().t_ch)),
                }
            }
        };

        let alt_upper = match self.model() {
            ModelVariant::LossModified | ModelVariant::LightEjecta => self.cut_in(),
            _ => {
                let ed = self.merger_or_inf(Phase::Ed);
                if ed < tr.t_st {
                    ed
                } else {
                    f64::INFINITY
                }
            }
        };
        let mrg = |p| self.merger_or_inf(p);
        let limits = match range {
            PhaseRange::EdSt | PhaseRange::Ed | PhaseRange::St => {
                (0.0, tr.t_pds.min(mrg(Phase::St)).min(alt_upper))
            }
            PhaseRange::Pds => (tr.t_pds, tr.t_mcs.min(mrg(Phase::Pds)).min(alt_upper)),
            PhaseRange::Mcs => (tr.t_mcs, mrg(Phase::Mcs)),
            PhaseRange::Lk => (tr.t_lk.unwrap_or(tr.t_pds), mrg(Phase::Lk)),
            PhaseRange::Tw => (tr.t_tw(), mrg(Phase::Tw)),
            PhaseRange::Wind => (0.0, self.scales().t_ch),
            PhaseRange::Wl | PhaseRange::EdWl => (0.0, mrg(Phase::Wl).min(tr.t_mcs).min(alt_upper)),
            PhaseRange::Custom { t_min, t_max } => clamp_custom(t_min, t_max, final_merger)?,
            PhaseRange::ReverseShockLifetime | PhaseRange::Current => {
                (0.0, tr.t_rev.min(final_merger))
            }
        };
        Ok(limits)
    }

    /// Transition markers for the phases in the current sequence.
    pub fn markers(&self) -> BTreeMap<String, f64> {
        let mut markers = BTreeMap::new();
        let Some(tr) = self.transitions() else {
            return markers;
        };
        let has = |p| self.phases().contains(&p);
        if has(Phase::St) || has(Phase::Wl) {
            markers.insert("t-ST".to_string(), tr.t_st);
        }
        if has(Phase::Pds) {
            markers.insert("t-PDS".to_string(), tr.t_pds);
        }
        if has(Phase::Mcs) {
            markers.insert("t-MCS".to_string(), tr.t_mcs);
        }
        if has(Phase::Lk) {
            markers.insert("t-LK".to_string(), tr.t_lk.unwrap_or(tr.t_pds));
        }
        if has(Phase::Tw) {
            markers.insert("t-TW".to_string(), tr.t_tw());
        }
        markers
    }

    /// Forward and reverse tracks over the current phase sequence.
    pub fn plot_data(&self, range: PhaseRange, sampling: &SamplingSettings) -> SnrResult<PlotData> {
        let mut forward = ShockTrack::default();
        for &phase in self.phases() {
            forward.append(self.phase_track(phase, sampling)?);
        }
        let mut reverse = ShockTrack::default();
        for &phase in self.reverse_phases() {
            reverse.append(self.phase_track(phase, sampling)?);
        }
        debug!(
            forward = forward.len(),
            reverse = reverse.len(),
            "Plot tracks sampled"
        );
        Ok(PlotData {
            forward,
            reverse,
            limits: self.limits(range)?,
            markers: self.markers(),
        })
    }
}

/// Keep a custom range inside `[0, maximum]`; reversed ranges are rejected.
fn clamp_custom(t_min: f64, t_max: f64, maximum: f64) -> SnrResult<(f64, f64)> {
    if !(t_min <= t_max) {
        return Err(SnrError::ConfigError(format!(
            "custom plot range [{t_min}, {t_max}] is reversed"
        )));
    }
    Ok(if t_min > maximum {
        (0.0, maximum)
    } else {
        (t_min, t_max.min(maximum))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linspace_empty_when_reversed() {
        assert!(linspace(5.0, 1.0, 10).is_empty());
        assert!(linspace(1.0, 1.0, 10).is_empty());
        assert_eq!(linspace(0.0, 1.0, 11).len(), 11);
    }

    #[test]
    fn test_custom_range_clamped() {
        assert_eq!(clamp_custom(10.0, 50.0, 100.0).unwrap(), (10.0, 50.0));
        assert_eq!(clamp_custom(10.0, 500.0, 100.0).unwrap(), (10.0, 100.0));
        assert_eq!(clamp_custom(200.0, 500.0, 100.0).unwrap(), (0.0, 100.0));
        // Start past the merger with an earlier end
        assert!(matches!(
            clamp_custom(200.0, 50.0, 100.0),
            Err(SnrError::ConfigError(_))
        ));
        assert!(clamp_custom(60.0, 50.0, 100.0).is_err());
    }

    #[test]
    fn test_track_append() {
        let mut a = ShockTrack {
            t: Array1::from(vec![1.0, 2.0]),
            r: Array1::from(vec![0.1, 0.2]),
            v: Array1::from(vec![9.0, 8.0]),
        };
        let b = ShockTrack {
            t: Array1::from(vec![3.0]),
            r: Array1::from(vec![0.3]),
            v: Array1::from(vec![7.0]),
        };
        a.append(b);
        assert_eq!(a.len(), 3);
        assert_eq!(a.t.to_vec(), vec![1.0, 2.0, 3.0]);
        assert_eq!(a.r[2], 0.3);
        a.append(ShockTrack::default());
        assert_eq!(a.v.to_vec(), vec![9.0, 8.0, 7.0]);
    }
}
