// ─────────────────────────────────────────────────────────────────────
// SNR Evolution Core — Solution Registry
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Typed `(n, Phase) → PhaseLaw` table.
//!
//! A [`PhaseLaw`] is a tag; the numbers it needs (scales, transition
//! times, start anchors) arrive through a [`LawContext`] built once per
//! evaluation. Laws that are naturally t(r) are inverted with Brent's
//! method over `[0, radius_limit]`.

use crate::laws::{
    uniform_n0, wind_n7, ChevalierNadezhin, CioffiMcs, CloudyMcs, EdFitLaw, LiangKeilty,
    OffsetSedov, PdsFit, ReverseAcceleration, TangWang, WhiteLong, WindFit,
};
use crate::tables::{ValueSet, UNIFORM_INDICES, WIND_INDICES};
use snr_math::quadrature::{quad, QuadConfig};
use snr_math::roots::brent;
use snr_types::config::{Environment, ModelVariant};
use snr_types::constants::{KMS_PER_PC_YR, M_H};
use snr_types::error::{SnrError, SnrResult};
use snr_types::state::{Phase, Scales, TransitionTimes};
use std::collections::HashMap;
use std::sync::OnceLock;

/// Radius, velocity and age of a shock at the start of a phase.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Anchor {
    /// [yr]
    pub t: f64,
    /// [pc]
    pub radius: f64,
    /// [km/s]
    pub velocity: f64,
}

/// Start anchors of the phases that continue an earlier one.
#[derive(Debug, Clone, Copy, Default)]
pub struct Anchors {
    pub pds: Option<Anchor>,
    pub mcs: Option<Anchor>,
    pub lk: Option<Anchor>,
    pub tw: Option<Anchor>,
    pub wl: Option<Anchor>,
}

impl Anchors {
    pub fn get(&self, phase: Phase) -> Option<Anchor> {
        match phase {
            Phase::Pds => self.pds,
            Phase::Mcs => self.mcs,
            Phase::Lk => self.lk,
            Phase::Tw => self.tw,
            Phase::Wl => self.wl,
            _ => None,
        }
    }

    pub fn set(&mut self, phase: Phase, anchor: Anchor) {
        match phase {
            Phase::Pds => self.pds = Some(anchor),
            Phase::Mcs => self.mcs = Some(anchor),
            Phase::Lk => self.lk = Some(anchor),
            Phase::Tw => self.tw = Some(anchor),
            Phase::Wl => self.wl = Some(anchor),
            _ => {}
        }
    }
}

/// Liang–Keilty loss parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LossParams {
    pub gamma_0: f64,
    pub gamma_1: f64,
}

impl LossParams {
    pub fn alpha_1(&self) -> f64 {
        crate::laws::lk_alpha_1(self.gamma_0, self.gamma_1)
    }
}

/// Everything a law needs to evaluate, resolved for one input set.
#[derive(Debug, Clone)]
pub struct LawContext {
    pub n: u8,
    pub environment: Environment,
    pub model: ModelVariant,
    pub scales: Scales,
    pub values: Option<ValueSet>,
    pub transitions: Option<TransitionTimes>,
    pub n_0: f64,
    pub e_51: f64,
    pub zeta_m: f64,
    /// Ambient mass per hydrogen atom [m_H]
    pub mu_h: f64,
    /// Cooling coefficient for the cloudy-ISM model
    pub cloudy_k: Option<f64>,
    pub loss: Option<LossParams>,
    pub anchors: Anchors,
}

impl LawContext {
    pub fn values(&self) -> SnrResult<&ValueSet> {
        self.values.as_ref().ok_or(SnrError::UnsupportedDensityIndex {
            n: self.n,
            s: self.environment.index(),
        })
    }

    pub fn transitions(&self) -> SnrResult<&TransitionTimes> {
        self.transitions.as_ref().ok_or_else(|| {
            SnrError::ConfigError(format!(
                "transition times are not defined for environment s={}",
                self.environment.index()
            ))
        })
    }

    pub fn anchor(&self, phase: Phase) -> SnrResult<Anchor> {
        self.anchors.get(phase).ok_or(SnrError::MissingAnchor(phase))
    }

    pub fn cloudy_k(&self) -> SnrResult<f64> {
        self.cloudy_k.ok_or_else(|| {
            SnrError::ConfigError("cloudy-ISM law used without a cooling coefficient".to_string())
        })
    }

    pub fn loss(&self) -> SnrResult<LossParams> {
        self.loss.ok_or_else(|| {
            SnrError::ConfigError("loss-modified law used without loss parameters".to_string())
        })
    }

    /// Ambient mass density [g cm⁻³].
    pub fn rho_0(&self) -> f64 {
        self.n_0 * self.mu_h * M_H
    }
}

/// Whether a law's velocity takes age or shock radius.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Argument {
    Time,
    Radius,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LawKind {
    N0Ed,
    N0St,
    N0Early,
    N0Late,
    CnEd,
    CnEarly,
    FitEd,
    FitEarly,
    StForward,
    StLate,
    Pds,
    Mcs,
    Lk,
    Tw,
    Wl,
    WindN7Forward,
    WindN7Reverse,
    WindFitForward,
    WindFitReverse,
}

/// One shock's solution in one phase for one density index.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhaseLaw {
    pub n: u8,
    pub phase: Phase,
    pub kind: LawKind,
}

impl PhaseLaw {
    pub fn velocity_argument(&self) -> Argument {
        if self.inverts_radius() {
            Argument::Radius
        } else {
            Argument::Time
        }
    }

    /// True for laws given as t(r).
    pub fn inverts_radius(&self) -> bool {
        matches!(
            self.kind,
            LawKind::FitEd | LawKind::FitEarly | LawKind::WindFitForward | LawKind::WindFitReverse
        )
    }

    /// Shock radius [pc] at age `t` [yr].
    pub fn radius(&self, ctx: &LawContext, t: f64) -> SnrResult<f64> {
        let sc = &ctx.scales;
        let tau = t / sc.t_ch;
        let reduced = match self.kind {
            LawKind::N0Ed => uniform_n0::ed_radius(tau),
            LawKind::N0St => uniform_n0::st_radius(tau),
            LawKind::N0Early => uniform_n0::reverse_early_radius(tau),
            LawKind::N0Late => uniform_n0::reverse_late_radius(tau),
            LawKind::CnEd => chevalier_nadezhin(ctx)?.radius(tau),
            LawKind::CnEarly => chevalier_nadezhin(ctx)?.reverse_radius(tau),
            LawKind::StForward => offset_sedov(ctx)?.radius(tau),
            LawKind::StLate => reverse_acceleration(ctx)?.radius(tau),
            LawKind::WindN7Forward => wind_n7::forward_radius(tau),
            LawKind::WindN7Reverse => wind_n7::reverse_radius(tau),
            LawKind::FitEd | LawKind::FitEarly | LawKind::WindFitForward | LawKind::WindFitReverse => {
                return self.invert(ctx, t);
            }
            LawKind::Pds | LawKind::Wl => return self.integrated_radius(ctx, t),
            LawKind::Mcs => {
                return match ctx.model {
                    ModelVariant::CloudyIsm => Ok(cloudy_mcs(ctx)?.radius(t)),
                    _ => self.integrated_radius(ctx, t),
                };
            }
            LawKind::Lk => return Ok(liang_keilty(ctx)?.radius(t)),
            LawKind::Tw => {
                let anchor = ctx.anchor(Phase::Tw)?;
                let tw = tang_wang(ctx)?;
                let integral = quad(
                    |x| Ok(tw.radius_integrand(x)),
                    0.1,
                    t / tw.t_c,
                    &[],
                    &QuadConfig::default(),
                )?;
                return Ok(anchor.radius + tw.radius_scale() * integral);
            }
        };
        Ok(reduced * sc.r_ch)
    }

    /// Shock velocity [km/s]; `x` is an age [yr] or a radius [pc]
    /// according to [`PhaseLaw::velocity_argument`].
    pub fn velocity(&self, ctx: &LawContext, x: f64) -> SnrResult<f64> {
        let sc = &ctx.scales;
        let tau = x / sc.t_ch;
        let rho = x / sc.r_ch;
        let reduced = match self.kind {
            LawKind::N0Ed => uniform_n0::ed_velocity(tau),
            LawKind::N0St => uniform_n0::st_velocity(tau),
            LawKind::N0Early => uniform_n0::reverse_early_velocity(tau),
            LawKind::N0Late => uniform_n0::reverse_late_velocity(tau),
            LawKind::CnEd => chevalier_nadezhin(ctx)?.velocity(tau),
            LawKind::CnEarly => chevalier_nadezhin(ctx)?.reverse_velocity(tau),
            LawKind::StForward => offset_sedov(ctx)?.velocity(tau),
            LawKind::StLate => reverse_acceleration(ctx)?.velocity(tau),
            LawKind::WindN7Forward => wind_n7::forward_velocity(tau),
            LawKind::WindN7Reverse => wind_n7::reverse_velocity(tau),
            LawKind::FitEd => ed_fit(ctx)?.forward_velocity(rho),
            LawKind::FitEarly => ed_fit(ctx)?.reverse_velocity(rho),
            LawKind::WindFitForward => wind_fit(self.n).forward_velocity(rho),
            LawKind::WindFitReverse => wind_fit(self.n).reverse_velocity(rho),
            LawKind::Pds => {
                let anchor = ctx.anchor(Phase::Pds)?;
                return Ok(pds_fit(ctx)?.velocity(x, anchor.velocity));
            }
            LawKind::Mcs => {
                return match ctx.model {
                    ModelVariant::CloudyIsm => Ok(cloudy_mcs(ctx)?.velocity(x)),
                    _ => {
                        let anchor = ctx.anchor(Phase::Mcs)?;
                        Ok(cioffi_mcs(ctx)?.velocity(x, anchor.velocity))
                    }
                };
            }
            LawKind::Wl => {
                let anchor = ctx.anchor(Phase::Wl)?;
                return Ok(white_long(ctx)?.velocity(x, anchor.velocity));
            }
            LawKind::Lk => return Ok(liang_keilty(ctx)?.velocity(x)),
            LawKind::Tw => return Ok(tang_wang(ctx)?.velocity(x)),
        };
        Ok(reduced * sc.v_ch)
    }

    /// Velocity [km/s] at age `t` [yr], whatever the law's argument.
    pub fn velocity_at(&self, ctx: &LawContext, t: f64) -> SnrResult<f64> {
        match self.velocity_argument() {
            Argument::Time => self.velocity(ctx, t),
            Argument::Radius => {
                let r = self.radius(ctx, t)?;
                self.velocity(ctx, r)
            }
        }
    }

    /// Age [yr] at radius `r` [pc]; t(r) laws only.
    pub fn time_of_radius(&self, ctx: &LawContext, r: f64) -> SnrResult<f64> {
        let sc = &ctx.scales;
        let rho = r / sc.r_ch;
        let reduced = match self.kind {
            LawKind::FitEd => ed_fit(ctx)?.forward_time(rho),
            LawKind::FitEarly => ed_fit(ctx)?.reverse_time(rho),
            LawKind::WindFitForward => wind_fit(self.n).forward_time(rho),
            LawKind::WindFitReverse => wind_fit(self.n).reverse_time(rho),
            _ => {
                return Err(SnrError::MissingLaw {
                    n: self.n,
                    phase: self.phase,
                })
            }
        };
        Ok(reduced * sc.t_ch)
    }

    /// Upper radius [pc] of the inversion bracket of a t(r) law.
    pub fn radius_limit(&self, ctx: &LawContext) -> SnrResult<f64> {
        let r_ch = ctx.scales.r_ch;
        match self.kind {
            LawKind::FitEd => Ok(ctx.values()?.similarity(self.n)?.r_st * r_ch),
            LawKind::FitEarly => Ok(ctx.values()?.similarity(self.n)?.r_rchg * r_ch),
            LawKind::WindFitForward => Ok(wind_fit(self.n).singular_radius() * r_ch - 1.0),
            LawKind::WindFitReverse => {
                Ok(wind_fit(self.n).singular_radius() / WindFit::L_ED * r_ch - 1.0)
            }
            _ => Err(SnrError::MissingLaw {
                n: self.n,
                phase: self.phase,
            }),
        }
    }

    fn invert(&self, ctx: &LawContext, t: f64) -> SnrResult<f64> {
        let upper = self.radius_limit(ctx)?;
        brent(|r| Ok(self.time_of_radius(ctx, r)? - t), 0.0, upper)
    }

    fn integrated_radius(&self, ctx: &LawContext, t: f64) -> SnrResult<f64> {
        let anchor = ctx.anchor(self.phase)?;
        let bridge_end = match self.kind {
            LawKind::Pds => pds_fit(ctx)?.bridge_end(),
            LawKind::Mcs => cioffi_mcs(ctx)?.bridge_end(),
            _ => white_long(ctx)?.bridge_end(),
        };
        let travelled = quad(
            |s| Ok(self.velocity(ctx, s)? / KMS_PER_PC_YR),
            anchor.t,
            t,
            &[bridge_end],
            &QuadConfig::default(),
        )?;
        Ok(anchor.radius + travelled)
    }
}

pub(crate) fn chevalier_nadezhin(ctx: &LawContext) -> SnrResult<ChevalierNadezhin> {
    let sim = ctx.values()?.similarity(ctx.n)?;
    Ok(ChevalierNadezhin {
        n: f64::from(ctx.n),
        l_ed: sim.l_ed,
        phi_ed: sim.phi_ed,
    })
}

pub(crate) fn ed_fit(ctx: &LawContext) -> SnrResult<EdFitLaw> {
    let values = ctx.values()?;
    let sim = values.similarity(ctx.n)?;
    let fit = values.ed_fit(ctx.n)?;
    Ok(EdFitLaw {
        n: f64::from(ctx.n),
        l_ed: sim.l_ed,
        phi_ed: sim.phi_ed,
        phi_eff: fit.phi_eff,
        f_n: fit.f_n,
        alpha: fit.alpha,
    })
}

pub(crate) fn offset_sedov(ctx: &LawContext) -> SnrResult<OffsetSedov> {
    let values = ctx.values()?;
    Ok(OffsetSedov {
        t_st: values.t_st,
        r_st: values.similarity(ctx.n)?.r_st,
    })
}

fn reverse_acceleration(ctx: &LawContext) -> SnrResult<ReverseAcceleration> {
    let values = ctx.values()?;
    let sim = values.similarity(ctx.n)?;
    Ok(ReverseAcceleration {
        t_rchg: values.t_rchg,
        r_rchg: sim.r_rchg,
        v_rchg: sim.v_rchg,
        a_rchg: sim.a_rchg,
    })
}

pub(crate) fn wind_fit(n: u8) -> WindFit {
    WindFit { n: f64::from(n) }
}

fn pds_fit(ctx: &LawContext) -> SnrResult<PdsFit> {
    let tr = ctx.transitions()?;
    Ok(PdsFit::new(ctx.n_0, ctx.zeta_m, ctx.e_51, tr.t_pds))
}

fn cioffi_mcs(ctx: &LawContext) -> SnrResult<CioffiMcs> {
    let tr = ctx.transitions()?;
    Ok(CioffiMcs::new(
        ctx.n_0, ctx.zeta_m, ctx.e_51, tr.t_pds, tr.t_mcs,
    ))
}

fn cloudy_mcs(ctx: &LawContext) -> SnrResult<CloudyMcs> {
    let anchor = ctx.anchor(Phase::Mcs)?;
    Ok(CloudyMcs {
        t_mcs: anchor.t,
        r_mcs: anchor.radius,
        v_mcs: anchor.velocity,
    })
}

pub(crate) fn white_long(ctx: &LawContext) -> SnrResult<WhiteLong> {
    Ok(WhiteLong {
        k: ctx.cloudy_k()?,
        e_51: ctx.e_51,
        rho_0: ctx.rho_0(),
        t_st: ctx.transitions()?.t_st,
    })
}

pub(crate) fn liang_keilty(ctx: &LawContext) -> SnrResult<LiangKeilty> {
    let anchor = ctx.anchor(Phase::Lk)?;
    Ok(LiangKeilty {
        t_lk: anchor.t,
        r_0: anchor.radius,
        v_0: anchor.velocity,
        alpha_1: ctx.loss()?.alpha_1(),
    })
}

fn tang_wang(ctx: &LawContext) -> SnrResult<TangWang> {
    let anchor = ctx.anchor(Phase::Tw)?;
    Ok(TangWang::anchored(
        ctx.scales.c_0,
        ctx.transitions()?.t_c,
        anchor.velocity,
    ))
}

/// Immutable `(n, Phase) → PhaseLaw` lookup.
#[derive(Debug, Clone)]
pub struct SolutionTable {
    laws: HashMap<(u8, Phase), PhaseLaw>,
}

impl SolutionTable {
    pub fn build() -> Self {
        let mut laws = HashMap::new();
        let mut add = |n: u8, phase: Phase, kind: LawKind| {
            laws.insert((n, phase), PhaseLaw { n, phase, kind });
        };

        for n in UNIFORM_INDICES {
            add(n, Phase::Pds, LawKind::Pds);
            add(n, Phase::Mcs, LawKind::Mcs);
            add(n, Phase::Lk, LawKind::Lk);
            add(n, Phase::Tw, LawKind::Tw);
            add(n, Phase::Wl, LawKind::Wl);
            match n {
                0 => {
                    add(n, Phase::Ed, LawKind::N0Ed);
                    add(n, Phase::St, LawKind::N0St);
                    add(n, Phase::ReverseEarly, LawKind::N0Early);
                    add(n, Phase::ReverseLate, LawKind::N0Late);
                }
                2 | 4 => {
                    add(n, Phase::Ed, LawKind::FitEd);
                    add(n, Phase::ReverseEarly, LawKind::FitEarly);
                    add(n, Phase::St, LawKind::StForward);
                    add(n, Phase::ReverseLate, LawKind::StLate);
                }
                _ => {
                    add(n, Phase::Ed, LawKind::CnEd);
                    add(n, Phase::ReverseEarly, LawKind::CnEarly);
                    add(n, Phase::St, LawKind::StForward);
                    add(n, Phase::ReverseLate, LawKind::StLate);
                }
            }
        }

        for n in WIND_INDICES {
            if n == 7 {
                add(n, Phase::WindEd, LawKind::WindN7Forward);
                add(n, Phase::WindReverse, LawKind::WindN7Reverse);
            } else {
                add(n, Phase::WindEd, LawKind::WindFitForward);
                add(n, Phase::WindReverse, LawKind::WindFitReverse);
            }
        }

        SolutionTable { laws }
    }

    /// Process-wide table, built on first use.
    pub fn shared() -> &'static SolutionTable {
        static TABLE: OnceLock<SolutionTable> = OnceLock::new();
        TABLE.get_or_init(SolutionTable::build)
    }

    pub fn get(&self, n: u8, phase: Phase) -> SnrResult<&PhaseLaw> {
        self.laws
            .get(&(n, phase))
            .ok_or(SnrError::MissingLaw { n, phase })
    }

    pub fn len(&self) -> usize {
        self.laws.len()
    }

    pub fn is_empty(&self) -> bool {
        self.laws.is_empty()
    }
}
