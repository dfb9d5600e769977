// ─────────────────────────────────────────────────────────────────────
// SNR Evolution Core — Solution Laws
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Closed-form shock solutions.
//!
//! Self-similar families (Truelove & McKee 1999, Chevalier–Nadezhin, wind
//! fits) work in reduced units: time in t_ch, radius in r_ch, velocity in
//! v_ch. Late-phase fits (Cioffi et al. 1988, White & Long 1991, Liang &
//! Keilty 2000, Tang & Wang 2005) work in yr, pc and km/s.
//!
//! Every parameter a law needs is carried by its struct; nothing here
//! reaches back into evolution state.

use snr_types::constants::{
    E_51, GAMMA_ADIABATIC, KMS_PER_PC_YR, KM_TO_CM, PC_TO_KM, XI_0, YR_TO_SEC,
};
use std::f64::consts::PI;

/// Linear join from `(t0, v0)` to `(t1, v1)`, evaluated at `t`.
pub fn linear_bridge(t: f64, t0: f64, v0: f64, t1: f64, v1: f64) -> f64 {
    (v1 - v0) / (t1 - t0) * (t - t0) + v0
}

/// Uniform ejecta (n = 0) in a uniform medium.
pub mod uniform_n0 {
    pub fn ed_radius(t: f64) -> f64 {
        2.01 * t * (1.0 + 1.72 * t.powf(1.5)).powf(-2.0 / 3.0)
    }

    pub fn ed_velocity(t: f64) -> f64 {
        2.01 * (1.0 + 1.72 * t.powf(1.5)).powf(-5.0 / 3.0)
    }

    pub fn st_radius(t: f64) -> f64 {
        (1.42 * t - 0.254).powf(0.4)
    }

    pub fn st_velocity(t: f64) -> f64 {
        0.569 * (1.42 * t - 0.254).powf(-0.6)
    }

    /// Reduced time at which the ST velocity falls to `v`.
    pub fn st_time_of_velocity(v: f64) -> f64 {
        ((0.569 / v).powf(5.0 / 3.0) + 0.254) / 1.42
    }

    pub fn reverse_early_radius(t: f64) -> f64 {
        1.83 * t * (1.0 + 3.26 * t.powf(1.5)).powf(-2.0 / 3.0)
    }

    pub fn reverse_early_velocity(t: f64) -> f64 {
        5.94 * t.powf(1.5) * (1.0 + 3.26 * t.powf(1.5)).powf(-5.0 / 3.0)
    }

    pub fn reverse_late_radius(t: f64) -> f64 {
        t * (0.779 - 0.106 * t - 0.533 * t.ln())
    }

    pub fn reverse_late_velocity(t: f64) -> f64 {
        0.533 + 0.106 * t
    }
}

/// Power-law ED solution for steep ejecta (n ≥ 6).
#[derive(Debug, Clone, Copy)]
pub struct ChevalierNadezhin {
    pub n: f64,
    pub l_ed: f64,
    pub phi_ed: f64,
}

impl ChevalierNadezhin {
    /// Leading factor A in R_b = A t^((n-3)/n).
    pub fn coefficient(&self) -> f64 {
        let n = self.n;
        let inner = 27.0 * self.l_ed.powf(n - 2.0) / (4.0 * PI * n * (n - 3.0) * self.phi_ed)
            * (10.0 / 3.0 * (n - 5.0) / (n - 3.0)).powf((n - 3.0) / 2.0);
        inner.powf(1.0 / n)
    }

    pub fn radius(&self, t: f64) -> f64 {
        self.coefficient() * t.powf((self.n - 3.0) / self.n)
    }

    pub fn velocity(&self, t: f64) -> f64 {
        (self.n - 3.0) / self.n * self.coefficient() * t.powf(-3.0 / self.n)
    }

    pub fn reverse_radius(&self, t: f64) -> f64 {
        self.radius(t) / self.l_ed
    }

    pub fn reverse_velocity(&self, t: f64) -> f64 {
        3.0 / (self.n * self.l_ed) * self.coefficient() * t.powf(-3.0 / self.n)
    }

    /// Reduced time at which the forward velocity falls to `v`.
    pub fn time_of_velocity(&self, v: f64) -> f64 {
        (v * self.n / (self.n - 3.0) / self.coefficient()).powf(-self.n / 3.0)
    }
}

/// Shallow-ejecta (n ∈ {2, 4}) ED fit, given as time of radius.
#[derive(Debug, Clone, Copy)]
pub struct EdFitLaw {
    pub n: f64,
    pub l_ed: f64,
    pub phi_ed: f64,
    pub phi_eff: f64,
    pub f_n: f64,
    pub alpha: f64,
}

impl EdFitLaw {
    fn forward_k(&self) -> f64 {
        (self.phi_eff / self.l_ed / self.f_n).sqrt()
    }

    pub fn forward_time(&self, r: f64) -> f64 {
        let n = self.n;
        let base = 1.0 - (3.0 - n) / 3.0 * self.forward_k() * r.powf(1.5);
        (self.alpha / 2.0).sqrt() * r / self.l_ed * base.powf(-2.0 / (3.0 - n))
    }

    pub fn forward_velocity(&self, r: f64) -> f64 {
        let n = self.n;
        let k = self.forward_k() * r.powf(1.5);
        (2.0 / self.alpha).sqrt() * self.l_ed * (1.0 - (3.0 - n) / 3.0 * k).powf((5.0 - n) / (3.0 - n))
            / (1.0 + n / 3.0 * k)
    }

    pub fn reverse_time(&self, r: f64) -> f64 {
        let n = self.n;
        let k = (self.phi_ed / self.l_ed / self.f_n).sqrt();
        let base = 1.0 - (3.0 - n) / 3.0 * k * (r * self.l_ed).powf(1.5);
        (self.alpha / 2.0).sqrt() * r * base.powf(-2.0 / (3.0 - n))
    }

    pub fn reverse_velocity(&self, r: f64) -> f64 {
        let n = self.n;
        let k = (self.phi_ed / self.f_n).sqrt() * self.l_ed * r.powf(1.5);
        (2.0 * self.phi_ed / self.alpha / self.f_n).sqrt() * self.l_ed * r.powf(1.5)
            * (1.0 - (3.0 - n) / 3.0 * k).powf(2.0 / (3.0 - n))
            / (1.0 + n / 3.0 * k)
    }
}

/// Sedov-Taylor forward shock offset to start at (t_st, r_st).
#[derive(Debug, Clone, Copy)]
pub struct OffsetSedov {
    pub t_st: f64,
    pub r_st: f64,
}

impl OffsetSedov {
    fn base(&self, t: f64) -> f64 {
        self.r_st.powf(2.5) + XI_0.sqrt() * (t - self.t_st)
    }

    pub fn radius(&self, t: f64) -> f64 {
        self.base(t).powf(0.4)
    }

    pub fn velocity(&self, t: f64) -> f64 {
        0.4 * XI_0.sqrt() * self.base(t).powf(-0.6)
    }

    pub fn time_of_velocity(&self, v: f64) -> f64 {
        ((2.0 * XI_0.sqrt() / 5.0 / v).powf(5.0 / 3.0) - self.r_st.powf(2.5)) / XI_0.sqrt() + self.t_st
    }
}

/// Constant-acceleration reverse shock after the branch change.
#[derive(Debug, Clone, Copy)]
pub struct ReverseAcceleration {
    pub t_rchg: f64,
    pub r_rchg: f64,
    pub v_rchg: f64,
    pub a_rchg: f64,
}

impl ReverseAcceleration {
    pub fn radius(&self, t: f64) -> f64 {
        t * (self.r_rchg / self.t_rchg
            - self.a_rchg * (t - self.t_rchg)
            - (self.v_rchg - self.a_rchg * self.t_rchg) * (t / self.t_rchg).ln())
    }

    pub fn velocity(&self, t: f64) -> f64 {
        self.v_rchg + self.a_rchg * (t - self.t_rchg)
    }
}

/// Pressure-driven snowplow velocity fit (Cioffi et al. 1988) [km/s].
#[derive(Debug, Clone, Copy)]
pub struct PdsFit {
    pub v_pds: f64,
    pub t_pds: f64,
}

impl PdsFit {
    pub fn new(n_0: f64, zeta_m: f64, e_51: f64, t_pds: f64) -> Self {
        PdsFit {
            v_pds: 413.0 * n_0.powf(1.0 / 7.0) * zeta_m.powf(3.0 / 14.0) * e_51.powf(1.0 / 14.0),
            t_pds,
        }
    }

    pub fn fitted(&self, t: f64) -> f64 {
        let tau = t / self.t_pds;
        self.v_pds * (4.0 * tau / 3.0 - 1.0 / 3.0).powf(-0.7)
    }

    /// End of the linear join to the preceding phase.
    pub fn bridge_end(&self) -> f64 {
        1.1 * self.t_pds
    }

    /// `v_start` is the preceding phase's velocity at t_pds.
    pub fn velocity(&self, t: f64, v_start: f64) -> f64 {
        let t_end = self.bridge_end();
        if t < t_end {
            linear_bridge(t, self.t_pds, v_start, t_end, self.fitted(t_end))
        } else {
            self.fitted(t)
        }
    }
}

/// Momentum-conserving snowplow velocity (Cioffi et al. 1988) [km/s].
#[derive(Debug, Clone, Copy)]
pub struct CioffiMcs {
    pub r_pds: f64,
    pub t_pds: f64,
    pub t_mcs: f64,
}

impl CioffiMcs {
    pub fn new(n_0: f64, zeta_m: f64, e_51: f64, t_pds: f64, t_mcs: f64) -> Self {
        CioffiMcs {
            r_pds: 14.0 * e_51.powf(2.0 / 7.0) / n_0.powf(3.0 / 7.0) / zeta_m.powf(1.0 / 7.0),
            t_pds,
            t_mcs,
        }
    }

    pub fn fitted(&self, t: f64) -> f64 {
        let tau = t / self.t_pds;
        let tau_m = self.t_mcs / self.t_pds;
        let r_mcs = (4.66 * tau_m * (1.0 - 0.939 * tau_m.powf(-0.17) + 0.153 / tau_m)).powf(0.25)
            * self.r_pds;
        let g = 1.0 - 0.779 * tau_m.powf(-0.17);
        KMS_PER_PC_YR * self.r_pds / 4.0 * (4.66 / self.t_pds * g)
            * (4.66 * (tau - tau_m) * g + (r_mcs / self.r_pds).powi(4)).powf(-0.75)
    }

    pub fn bridge_end(&self) -> f64 {
        1.1 * self.t_mcs
    }

    /// `v_start` is the PDS velocity at t_mcs.
    pub fn velocity(&self, t: f64, v_start: f64) -> f64 {
        let t_end = self.bridge_end();
        if t < t_end {
            linear_bridge(t, self.t_mcs, v_start, t_end, self.fitted(t_end))
        } else {
            self.fitted(t)
        }
    }
}

/// Snowplow after the cloudy-ISM phase, anchored to the WL shock at t_mcs.
#[derive(Debug, Clone, Copy)]
pub struct CloudyMcs {
    pub t_mcs: f64,
    /// [pc]
    pub r_mcs: f64,
    /// [km/s]
    pub v_mcs: f64,
}

impl CloudyMcs {
    fn stretch(&self, t: f64) -> f64 {
        1.0 + 4.0 * self.v_mcs / self.r_mcs * (t - self.t_mcs) / KMS_PER_PC_YR
    }

    pub fn velocity(&self, t: f64) -> f64 {
        self.v_mcs * self.stretch(t).powf(-0.75)
    }

    /// Exact integral of [`CloudyMcs::velocity`] from t_mcs.
    pub fn radius(&self, t: f64) -> f64 {
        self.r_mcs * self.stretch(t).powf(0.25)
    }
}

/// Cloudy-ISM similarity solution (White & Long 1991).
#[derive(Debug, Clone, Copy)]
pub struct WhiteLong {
    /// Cooling coefficient K, already scaled
    pub k: f64,
    pub e_51: f64,
    /// Ambient mass density [g cm⁻³]
    pub rho_0: f64,
    pub t_st: f64,
}

impl WhiteLong {
    /// `Q = K E / (4π ρ₀)` [cm⁵ s⁻²].
    fn energy_term(&self) -> f64 {
        self.k * self.e_51 * E_51 / (4.0 * PI * self.rho_0)
    }

    pub fn fitted(&self, t: f64) -> f64 {
        let gamma = GAMMA_ADIABATIC;
        let r_wl = (25.0 * (gamma + 1.0) * self.k * self.e_51 * E_51 / (16.0 * PI * self.rho_0))
            .powf(0.2)
            * (t * YR_TO_SEC).powf(0.4);
        ((gamma + 1.0) * self.energy_term() / r_wl.powi(3)).sqrt() / KM_TO_CM
    }

    pub fn bridge_end(&self) -> f64 {
        1.1 * self.t_st
    }

    /// `v_start` is the ED velocity at t_st.
    pub fn velocity(&self, t: f64, v_start: f64) -> f64 {
        let t_end = self.bridge_end();
        if t < t_end {
            linear_bridge(t, self.t_st, v_start, t_end, self.fitted(t_end))
        } else {
            self.fitted(t)
        }
    }

    /// Age [yr] at which the fitted velocity falls to `v` [km/s].
    pub fn time_of_velocity(&self, v: f64) -> f64 {
        self.energy_term().powf(1.0 / 3.0) * (0.8 * (4.0f64 / 45.0).powf(0.2)).powf(5.0 / 6.0)
            / (v * KM_TO_CM).powf(5.0 / 3.0)
            / YR_TO_SEC
    }
}

/// Liang–Keilty adiabatic index of the shocked flow, γ₁.
pub fn lk_gamma_1(gamma_0: f64, eps: f64) -> f64 {
    let a = 2.0 / eps / (gamma_0 - 1.0);
    -1.0 - a + ((1.0 + a).powi(2) + 4.0 * gamma_0 / eps / (gamma_0 - 1.0) - 1.0).sqrt()
}

/// Liang–Keilty deceleration exponent α₁.
pub fn lk_alpha_1(gamma_0: f64, gamma_1: f64) -> f64 {
    (2.0 - gamma_0 + ((2.0 - gamma_0).powi(2) + 4.0 * (gamma_1 - 1.0)).sqrt()) / 4.0
}

/// Fractional energy-loss solution (Liang & Keilty 2000), anchored at t_lk.
#[derive(Debug, Clone, Copy)]
pub struct LiangKeilty {
    pub t_lk: f64,
    /// [pc]
    pub r_0: f64,
    /// [km/s]
    pub v_0: f64,
    pub alpha_1: f64,
}

impl LiangKeilty {
    fn slope(&self) -> f64 {
        4.0 - 3.0 * self.alpha_1
    }

    pub fn radius(&self, t: f64) -> f64 {
        let n1 = 1.0 / self.slope();
        (self.r_0.powf(1.0 / n1)
            + self.slope() * self.v_0 / KMS_PER_PC_YR * (t - self.t_lk)
                / self.r_0.powf(3.0 * (self.alpha_1 - 1.0)))
        .powf(n1)
    }

    pub fn velocity(&self, t: f64) -> f64 {
        self.v_0 * (self.radius(t) / self.r_0).powf(3.0 * (self.alpha_1 - 1.0))
    }

    pub fn time_of_velocity(&self, v: f64) -> f64 {
        let x = (self.v_0 / v).powf(-self.slope() / 3.0 / (self.alpha_1 - 1.0));
        (x - 1.0) * self.r_0 * PC_TO_KM / (self.v_0 * YR_TO_SEC) / self.slope() + self.t_lk
    }
}

/// Light-ejecta solution in a hot medium (Tang & Wang 2005).
#[derive(Debug, Clone, Copy)]
pub struct TangWang {
    /// Ambient sound speed [km/s]
    pub c_0: f64,
    pub t_c: f64,
    pub correction: f64,
}

impl TangWang {
    /// Matches the anchor velocity at 0.1 t_c.
    pub fn anchored(c_0: f64, t_c: f64, v_start: f64) -> Self {
        TangWang {
            c_0,
            t_c,
            correction: ((v_start / c_0).powf(5.0 / 3.0) - 1.0) / 10.0,
        }
    }

    pub fn start(&self) -> f64 {
        0.1 * self.t_c
    }

    pub fn velocity(&self, t: f64) -> f64 {
        self.c_0 * (self.correction * self.t_c / t + 1.0).powf(0.6)
    }

    /// Dimensionless integrand of the radius in x = t/t_c.
    pub fn radius_integrand(&self, x: f64) -> f64 {
        (self.correction / x + 1.0).powf(0.6)
    }

    /// pc per unit of the dimensionless radius integral.
    pub fn radius_scale(&self) -> f64 {
        self.c_0 * self.t_c / KMS_PER_PC_YR
    }
}

/// Steep ejecta (n = 7) in a wind, exact self-similar forms.
pub mod wind_n7 {
    pub fn forward_radius(t: f64) -> f64 {
        1.19 * t.powf(0.8)
    }

    pub fn forward_velocity(t: f64) -> f64 {
        0.954 * t.powf(-0.2)
    }

    pub fn reverse_radius(t: f64) -> f64 {
        0.890 * t.powf(0.8)
    }

    pub fn reverse_velocity(t: f64) -> f64 {
        0.178 * t.powf(-0.2)
    }
}

/// Shallow ejecta (n < 3) in a wind, given as time of radius.
#[derive(Debug, Clone, Copy)]
pub struct WindFit {
    pub n: f64,
}

impl WindFit {
    /// Forward-shock ratio R_b / R_r.
    pub const L_ED: f64 = 1.19;

    /// Reduced radius at which the forward time diverges.
    pub fn singular_radius(&self) -> f64 {
        1.0 / 1.5f64.powi(2) / (3.0 - self.n)
    }

    pub fn forward_time(&self, r: f64) -> f64 {
        let n = self.n;
        0.594 * ((3.0 - n) / (5.0 - n)).sqrt() * r
            * (1.0 - 1.5 * (3.0 - n).sqrt() * r.sqrt()).powf(-2.0 / (3.0 - n))
    }

    pub fn reverse_time(&self, r: f64) -> f64 {
        self.forward_time(r * Self::L_ED)
    }

    pub fn forward_velocity(&self, r: f64) -> f64 {
        let n = self.n;
        1.68 * ((5.0 - n) / (3.0 - n)).sqrt() * (1.0 - 1.5 * (3.0 - n).sqrt() * r.sqrt())
            / (1.0 + 1.5 * (n - 2.0) / (3.0 - n).sqrt() * r.sqrt())
    }

    pub fn reverse_velocity(&self, r: f64) -> f64 {
        let n = self.n;
        2.31 * (5.0 - n).sqrt() / (3.0 - n) * r.sqrt()
            * (1.0 - 1.63 * (3.0 - n).sqrt() * r.sqrt()).powf(2.0 / (3.0 - n))
            / (1.0 + 1.63 * (n - 2.0) / (3.0 - n).sqrt() * r.sqrt())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn derivative(f: impl Fn(f64) -> f64, t: f64) -> f64 {
        let h = 1e-6 * t.max(1e-3);
        (f(t + h) - f(t - h)) / (2.0 * h)
    }

    #[test]
    fn test_n0_published_values() {
        // r(1) = 2.01 / 2.72^(2/3)
        assert!((uniform_n0::ed_radius(1.0) - 2.01 / 2.72f64.powf(2.0 / 3.0)).abs() < 1e-12);
        assert!((uniform_n0::reverse_late_velocity(1.0) - 0.639).abs() < 1e-12);
    }

    #[test]
    fn test_n0_velocity_is_radius_slope() {
        for t in [0.1, 0.3, 0.45] {
            let dr = derivative(uniform_n0::ed_radius, t);
            let v = uniform_n0::ed_velocity(t);
            assert!((dr - v).abs() / v < 2e-2, "t={t}: dr/dt={dr}, v={v}");
        }
        for t in [0.6, 2.0, 10.0] {
            let dr = derivative(uniform_n0::st_radius, t);
            let v = uniform_n0::st_velocity(t);
            assert!((dr - v).abs() / v < 2e-2, "t={t}: dr/dt={dr}, v={v}");
        }
    }

    #[test]
    fn test_n0_st_merger_inverts_velocity() {
        let t = uniform_n0::st_time_of_velocity(0.05);
        assert!((uniform_n0::st_velocity(t) - 0.05).abs() < 1e-12);
    }

    #[test]
    fn test_chevalier_nadezhin_consistency() {
        let cn = ChevalierNadezhin {
            n: 7.0,
            l_ed: 1.26,
            phi_ed: 0.47,
        };
        for t in [0.05, 0.2, 0.5] {
            let dr = derivative(|x| cn.radius(x), t);
            assert!((dr - cn.velocity(t)).abs() / cn.velocity(t) < 1e-6);
        }
        let t = cn.time_of_velocity(0.3);
        assert!((cn.velocity(t) - 0.3).abs() < 1e-12);
        assert!((cn.radius(0.4) / cn.reverse_radius(0.4) - 1.26).abs() < 1e-12);
    }

    #[test]
    fn test_offset_sedov_starts_at_r_st() {
        let st = OffsetSedov {
            t_st: 0.732,
            r_st: 0.881,
        };
        assert!((st.radius(0.732) - 0.881).abs() < 1e-12);
        let t = st.time_of_velocity(0.1);
        assert!((st.velocity(t) - 0.1).abs() < 1e-12);
    }

    #[test]
    fn test_reverse_acceleration_anchor() {
        let rev = ReverseAcceleration {
            t_rchg: 0.363,
            r_rchg: 0.469,
            v_rchg: 0.553,
            a_rchg: 0.116,
        };
        assert!((rev.radius(0.363) - 0.469).abs() < 1e-12);
        assert!((rev.velocity(0.363) - 0.553).abs() < 1e-12);
    }

    #[test]
    fn test_pds_bridge_continuity() {
        let pds = PdsFit::new(1.0, 1.0, 1.0, 3.0e4);
        assert!((pds.velocity(3.0e4, 250.0) - 250.0).abs() < 1e-9);
        let end = pds.bridge_end();
        let left = pds.velocity(end * (1.0 - 1e-12), 250.0);
        assert!((left - pds.fitted(end)).abs() < 1e-6);
    }

    #[test]
    fn test_cloudy_mcs_radius_is_velocity_integral() {
        let mcs = CloudyMcs {
            t_mcs: 1.0e5,
            r_mcs: 20.0,
            v_mcs: 80.0,
        };
        let t = 3.0e5;
        let dr = derivative(|x| mcs.radius(x), t);
        assert!((dr * KMS_PER_PC_YR - mcs.velocity(t)).abs() / mcs.velocity(t) < 1e-5);
        assert!((mcs.radius(1.0e5) - 20.0).abs() < 1e-12);
    }

    #[test]
    fn test_liang_keilty_merger_inverts_velocity() {
        let g1 = lk_gamma_1(5.0 / 3.0, 0.5);
        let alpha_1 = lk_alpha_1(5.0 / 3.0, g1);
        assert!(alpha_1 > 0.0 && alpha_1 < 1.0, "alpha_1={alpha_1}");
        let lk = LiangKeilty {
            t_lk: 3.0e4,
            r_0: 20.0,
            v_0: 200.0,
            alpha_1,
        };
        let t = lk.time_of_velocity(14.0);
        assert!((lk.velocity(t) - 14.0).abs() / 14.0 < 1e-9, "v={}", lk.velocity(t));
    }

    #[test]
    fn test_white_long_merger_inverts_fit() {
        let wl = WhiteLong {
            k: 0.6 * 1.528,
            e_51: 1.0,
            rho_0: 1.4 * 1.673e-24,
            t_st: 200.0,
        };
        let t = wl.time_of_velocity(20.0);
        assert!((wl.fitted(t) - 20.0).abs() / 20.0 < 1e-3, "v={}", wl.fitted(t));
    }

    #[test]
    fn test_tang_wang_matches_anchor() {
        let tw = TangWang::anchored(10.0, 1.0e5, 300.0);
        assert!((tw.velocity(tw.start()) - 300.0).abs() < 1e-9);
    }

    #[test]
    fn test_wind_fit_reverse_scaling() {
        let fit = WindFit { n: 1.0 };
        let r = 0.1;
        assert!((fit.reverse_time(r) - fit.forward_time(1.19 * r)).abs() < 1e-15);
        assert!(fit.forward_time(0.99 * fit.singular_radius()) > fit.forward_time(0.5 * fit.singular_radius()));
    }

    #[test]
    fn test_ed_fit_reaches_t_st_at_r_st() {
        // n = 2: t(r_st) ≈ t_st
        let fit = EdFitLaw {
            n: 2.0,
            l_ed: 1.10,
            phi_ed: 0.343,
            phi_eff: 0.0947,
            f_n: 1.0 / (4.0 * PI),
            alpha: 1.0 / 3.0,
        };
        assert!((fit.forward_time(0.679) - 0.387).abs() < 5e-3);
    }
}
