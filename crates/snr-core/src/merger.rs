// ─────────────────────────────────────────────────────────────────────
// SNR Evolution Core — Merger Times
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Age at which each phase's forward shock slows to `BETA · c_net` and
//! merges with the ambient medium.
//!
//! Closed forms are used where the velocity law inverts analytically;
//! the remaining phases bracket the crossing by doubling from the phase
//! start and refine with Brent's method.

use crate::laws::uniform_n0;
use crate::registry::{
    chevalier_nadezhin, liang_keilty, offset_sedov, white_long, LawContext, SolutionTable,
};
use snr_math::roots::{brent, expand_bracket};
use snr_types::config::ModelVariant;
use snr_types::constants::BETA;
use snr_types::error::{SnrError, SnrResult};
use snr_types::state::{MergerTimes, Phase};
use tracing::debug;

/// Doublings tried before a decaying velocity is declared non-merging.
const MAX_DOUBLINGS: usize = 200;

/// Start of the ED search for n = 0 and n ∈ {2, 4}, in t_ch.
const ED_SEARCH_START: f64 = 1e-3;

/// Velocity [km/s] below which the shock has merged.
pub fn target_velocity(ctx: &LawContext) -> f64 {
    BETA * ctx.scales.c_net
}

/// First age ≥ `start` at which the decreasing `f` crosses zero.
fn decay_time<F>(mut f: F, start: f64) -> SnrResult<f64>
where
    F: FnMut(f64) -> SnrResult<f64>,
{
    if f(start)? <= 0.0 {
        return Ok(start);
    }
    let (a, b) = expand_bracket(&mut f, start, 2.0, MAX_DOUBLINGS)?;
    if a == b {
        return Ok(a);
    }
    brent(f, a, b)
}

/// ED merger time; `f64::INFINITY` when an n ∈ {2, 4} shock is still
/// faster than the target at the end of its fit.
pub fn ed_merger(table: &SolutionTable, ctx: &LawContext) -> SnrResult<f64> {
    let target = target_velocity(ctx);
    let law = table.get(ctx.n, Phase::Ed)?;
    let start = ED_SEARCH_START * ctx.scales.t_ch;
    match ctx.n {
        0 => decay_time(|t| Ok(law.velocity_at(ctx, t)? - target), start),
        2 | 4 => {
            let r_end = law.radius_limit(ctx)?;
            let t_end = law.time_of_radius(ctx, r_end)?;
            if law.velocity_at(ctx, start)? <= target {
                return Ok(start);
            }
            if law.velocity(ctx, r_end)? > target {
                debug!(n = ctx.n, t_end, "ED shock never slows to merger speed");
                return Ok(f64::INFINITY);
            }
            brent(|t| Ok(law.velocity_at(ctx, t)? - target), start, t_end)
        }
        _ => {
            let cn = chevalier_nadezhin(ctx)?;
            Ok(cn.time_of_velocity(target / ctx.scales.v_ch) * ctx.scales.t_ch)
        }
    }
}

fn st_merger(ctx: &LawContext) -> SnrResult<f64> {
    let v = target_velocity(ctx) / ctx.scales.v_ch;
    let reduced = if ctx.n == 0 {
        uniform_n0::st_time_of_velocity(v)
    } else {
        offset_sedov(ctx)?.time_of_velocity(v)
    };
    Ok(reduced * ctx.scales.t_ch)
}

fn integrated_merger(
    table: &SolutionTable,
    ctx: &LawContext,
    phase: Phase,
    start: f64,
) -> SnrResult<f64> {
    let target = target_velocity(ctx);
    let law = table.get(ctx.n, phase)?;
    decay_time(|t| Ok(law.velocity_at(ctx, t)? - target), start)
}

fn wl_merger(table: &SolutionTable, ctx: &LawContext) -> SnrResult<f64> {
    let wl = white_long(ctx)?;
    let closed = wl.time_of_velocity(target_velocity(ctx));
    if closed >= wl.bridge_end() {
        return Ok(closed);
    }
    // Crossing falls inside the linear join from the ED phase
    integrated_merger(table, ctx, Phase::Wl, wl.t_st)
}

/// MCS merger, or 0 when the Cioffi velocity never reaches the target.
fn mcs_or_zero(found: SnrResult<f64>) -> SnrResult<f64> {
    match found {
        Ok(t) => Ok(t),
        Err(SnrError::NoSolutionInBracket { .. } | SnrError::NoConvergence { .. }) => {
            debug!("MCS merger not found, using 0");
            Ok(0.0)
        }
        Err(e) => Err(e),
    }
}

/// Merger times for every phase that can occur in a uniform medium.
///
/// `ed` is the ED merger from [`ed_merger`]; `t_tw` ends the TW phase.
pub fn uniform_mergers(
    table: &SolutionTable,
    ctx: &LawContext,
    ed: f64,
    t_tw: f64,
) -> SnrResult<MergerTimes> {
    let tr = *ctx.transitions()?;
    let mut mergers = MergerTimes::default();
    mergers.insert(Phase::Ed, ed);
    mergers.insert(Phase::St, st_merger(ctx)?);
    mergers.insert(Phase::Pds, integrated_merger(table, ctx, Phase::Pds, tr.t_pds)?);

    let mcs = mcs_or_zero(integrated_merger(table, ctx, Phase::Mcs, tr.t_mcs))?;
    mergers.insert(Phase::Mcs, mcs);

    if ctx.model == ModelVariant::LossModified {
        let lk = liang_keilty(ctx)?;
        mergers.insert(Phase::Lk, lk.time_of_velocity(target_velocity(ctx)));
    }
    mergers.insert(Phase::Tw, t_tw);
    if ctx.model == ModelVariant::CloudyIsm {
        mergers.insert(Phase::Wl, wl_merger(table, ctx)?);
    }

    debug!(?mergers, "Merger times");
    Ok(mergers)
}

/// End of the wind ED model: t_ch, or earlier for n < 3 when the t(r)
/// fit reaches its bracket limit first.
pub fn wind_mergers(table: &SolutionTable, ctx: &LawContext) -> SnrResult<MergerTimes> {
    let t_ch = ctx.scales.t_ch;
    let end = if ctx.n < 3 {
        let law = table.get(ctx.n, Phase::WindEd)?;
        let limit = law.radius_limit(ctx)?;
        t_ch.min(law.time_of_radius(ctx, limit)?)
    } else {
        t_ch
    };
    let mut mergers = MergerTimes::default();
    mergers.insert(Phase::WindEd, end);
    Ok(mergers)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decay_time_returns_start_when_already_slow() {
        let t = decay_time(|t| Ok(1.0 / t - 2.0), 1.0).unwrap();
        assert_eq!(t, 1.0);
    }

    #[test]
    fn test_decay_time_brackets_forward() {
        let t = decay_time(|t| Ok(100.0 / t - 1.0), 1.0).unwrap();
        assert!((t - 100.0).abs() < 1e-8, "t={t}");
    }

    #[test]
    fn test_decay_time_non_decaying_fails() {
        let err = decay_time(|_| Ok(1.0), 1.0).unwrap_err();
        assert!(matches!(err, SnrError::NoSolutionInBracket { .. }));
    }

    #[test]
    fn test_mcs_without_crossing_is_zero() {
        let never = decay_time(|_| Ok(1.0), 1.0);
        assert_eq!(mcs_or_zero(never).unwrap(), 0.0);
        let found = decay_time(|t| Ok(100.0 / t - 1.0), 1.0);
        assert!((mcs_or_zero(found).unwrap() - 100.0).abs() < 1e-8);
        // Other failures still propagate
        let bad = Err(SnrError::MissingAnchor(Phase::Mcs));
        assert!(matches!(mcs_or_zero(bad), Err(SnrError::MissingAnchor(Phase::Mcs))));
    }
}
