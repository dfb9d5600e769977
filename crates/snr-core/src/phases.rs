// ─────────────────────────────────────────────────────────────────────
// SNR Evolution Core — Phase Selection
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Phase sequence and selectable plot ranges for one input set.
//!
//! Exactly one path through ED → {ST, WL} → PDS → MCS (with LK or TW
//! cutting in where their model is active) is current; the wind
//! environment has the single ED phase.

use snr_types::config::{Environment, ModelVariant};
use snr_types::error::SnrResult;
use snr_types::state::{MergerTimes, Phase, PhaseRange, TransitionTimes};

/// Ordered phases of the forward shock and the ranges a caller may plot.
#[derive(Debug, Clone, PartialEq)]
pub struct PhasePlan {
    pub phases: Vec<Phase>,
    pub ranges: Vec<PhaseRange>,
}

impl PhasePlan {
    pub fn contains(&self, phase: Phase) -> bool {
        self.phases.contains(&phase)
    }

    pub fn last(&self) -> Option<Phase> {
        self.phases.last().copied()
    }
}

fn ranges(early: PhaseRange, rest: &[PhaseRange]) -> Vec<PhaseRange> {
    let mut out = vec![PhaseRange::Current, PhaseRange::ReverseShockLifetime, early];
    out.extend_from_slice(rest);
    out
}

/// Select the phase sequence for `(environment, model)` from the
/// transition and merger times.
pub fn select(
    environment: Environment,
    model: ModelVariant,
    tr: Option<&TransitionTimes>,
    mergers: &MergerTimes,
) -> SnrResult<PhasePlan> {
    let tr = match (environment, tr) {
        (Environment::Wind, _) | (_, None) => {
            return Ok(PhasePlan {
                phases: vec![Phase::WindEd],
                ranges: vec![PhaseRange::Current],
            })
        }
        (Environment::Uniform, Some(tr)) => tr,
    };

    let plan = match model {
        ModelVariant::LossModified => {
            let t_lk = tr.t_lk.unwrap_or(tr.t_pds);
            if t_lk <= tr.t_st {
                PhasePlan {
                    phases: vec![Phase::Ed, Phase::Lk],
                    ranges: ranges(PhaseRange::Ed, &[PhaseRange::Lk]),
                }
            } else if t_lk <= tr.t_pds.min(mergers.require(Phase::St)?) {
                PhasePlan {
                    phases: vec![Phase::Ed, Phase::St, Phase::Lk],
                    ranges: ranges(PhaseRange::EdSt, &[PhaseRange::Lk]),
                }
            } else if t_lk < tr.t_mcs.min(mergers.require(Phase::Pds)?) {
                PhasePlan {
                    phases: vec![Phase::Ed, Phase::St, Phase::Pds, Phase::Lk],
                    ranges: ranges(PhaseRange::EdSt, &[PhaseRange::Pds, PhaseRange::Lk]),
                }
            } else {
                PhasePlan {
                    phases: vec![Phase::Ed, Phase::St, Phase::Pds, Phase::Mcs, Phase::Lk],
                    ranges: ranges(
                        PhaseRange::EdSt,
                        &[PhaseRange::Pds, PhaseRange::Mcs, PhaseRange::Lk],
                    ),
                }
            }
        }
        ModelVariant::LightEjecta => {
            if tr.t_tw() < tr.t_st {
                PhasePlan {
                    phases: vec![Phase::Ed, Phase::Tw],
                    ranges: ranges(PhaseRange::Ed, &[PhaseRange::Tw]),
                }
            } else {
                PhasePlan {
                    phases: vec![Phase::Ed, Phase::St, Phase::Tw],
                    ranges: ranges(PhaseRange::EdSt, &[PhaseRange::Tw]),
                }
            }
        }
        ModelVariant::CloudyIsm => {
            if tr.t_mcs < mergers.require(Phase::Wl)? {
                PhasePlan {
                    phases: vec![Phase::Ed, Phase::Wl, Phase::Mcs],
                    ranges: ranges(PhaseRange::EdWl, &[PhaseRange::Mcs]),
                }
            } else {
                PhasePlan {
                    phases: vec![Phase::Ed, Phase::Wl],
                    ranges: ranges(PhaseRange::EdWl, &[]),
                }
            }
        }
        ModelVariant::Standard => {
            let mut plan = if tr.t_pds > mergers.require(Phase::St)? {
                PhasePlan {
                    phases: vec![Phase::Ed, Phase::St],
                    ranges: ranges(PhaseRange::EdSt, &[]),
                }
            } else if tr.t_mcs > mergers.require(Phase::Pds)? {
                PhasePlan {
                    phases: vec![Phase::Ed, Phase::St, Phase::Pds],
                    ranges: ranges(PhaseRange::EdSt, &[PhaseRange::Pds]),
                }
            } else {
                PhasePlan {
                    phases: vec![Phase::Ed, Phase::St, Phase::Pds, Phase::Mcs],
                    ranges: ranges(PhaseRange::EdSt, &[PhaseRange::Pds, PhaseRange::Mcs]),
                }
            };
            // ED shock merges before the Sedov phase can start
            if tr.t_st > mergers.require(Phase::Ed)? {
                plan.phases.retain(|&p| p != Phase::St);
                for r in plan.ranges.iter_mut() {
                    if *r == PhaseRange::EdSt {
                        *r = PhaseRange::Ed;
                    }
                }
            }
            plan
        }
    };
    Ok(plan)
}

/// Standard-sequence phase at age `t`, ignoring model cut-ins.
pub fn standard_phase_at(tr: &TransitionTimes, t: f64) -> Phase {
    if (t < tr.t_st && tr.t_st < tr.t_pds) || (t < tr.t_pds && tr.t_pds < tr.t_st) {
        Phase::Ed
    } else if t < tr.t_pds {
        Phase::St
    } else if t < tr.t_mcs {
        Phase::Pds
    } else {
        Phase::Mcs
    }
}

/// Forward-shock phase active at age `t`.
pub fn current_phase(
    environment: Environment,
    model: ModelVariant,
    tr: Option<&TransitionTimes>,
    t: f64,
) -> Phase {
    let tr = match (environment, tr) {
        (Environment::Uniform, Some(tr)) => tr,
        _ => return Phase::WindEd,
    };
    match model {
        ModelVariant::LossModified if t > tr.t_lk.unwrap_or(tr.t_pds) => Phase::Lk,
        ModelVariant::LightEjecta if t > tr.t_tw() => Phase::Tw,
        ModelVariant::CloudyIsm if t > tr.t_st => {
            if t > tr.t_mcs {
                Phase::Mcs
            } else {
                Phase::Wl
            }
        }
        _ => standard_phase_at(tr, t),
    }
}

/// Plot range that shows `phase`, preferring the combined early ranges.
pub fn range_for(phase: Phase, available: &[PhaseRange]) -> PhaseRange {
    match phase {
        Phase::Ed | Phase::St if available.contains(&PhaseRange::EdSt) => PhaseRange::EdSt,
        Phase::Ed | Phase::Wl if available.contains(&PhaseRange::EdWl) => PhaseRange::EdWl,
        Phase::Ed => PhaseRange::Ed,
        Phase::St => PhaseRange::St,
        Phase::Pds => PhaseRange::Pds,
        Phase::Mcs => PhaseRange::Mcs,
        Phase::Lk => PhaseRange::Lk,
        Phase::Tw => PhaseRange::Tw,
        Phase::Wl => PhaseRange::Wl,
        Phase::WindEd | Phase::WindReverse => PhaseRange::Wind,
        Phase::ReverseEarly | Phase::ReverseLate => PhaseRange::ReverseShockLifetime,
    }
}
