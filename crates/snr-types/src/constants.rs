// ─────────────────────────────────────────────────────────────────────
// SNR Evolution Core — Constants
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Physical constants (CGS) and unit conversions.

/// Parsec in km.
pub const PC_TO_KM: f64 = 3.0857e13;

/// keV in erg.
pub const KEV_TO_ERG: f64 = 1.6021766208e-9;

/// Boltzmann constant (erg/K).
pub const BOLTZMANN: f64 = 1.380658e-16;

/// Planck constant (erg s).
pub const PLANCK: f64 = 6.6260755e-27;

/// Solar mass (g).
pub const SOLAR_MASS: f64 = 1.989e33;

/// Hydrogen atom mass (g).
pub const M_H: f64 = 1.673e-24;

/// Julian year in seconds.
pub const YR_TO_SEC: f64 = 365.25 * 24.0 * 3600.0;

/// km/s → pc/yr divisor: `v[pc/yr] = v[km/s] / KMS_PER_PC_YR`.
pub const KMS_PER_PC_YR: f64 = PC_TO_KM / YR_TO_SEC;

/// km → cm.
pub const KM_TO_CM: f64 = 1.0e5;

/// Explosion energy unit (erg).
pub const E_51: f64 = 1.0e51;

/// Sedov energy coefficient (White & Long K scaling).
pub const K_SED: f64 = 1.528;

/// Sedov-Taylor similarity constant ξ₀.
pub const XI_0: f64 = 2.026;

/// Merger threshold: shock velocity falls to BETA × net sound speed.
pub const BETA: f64 = 2.0;

/// Cloud filling factor used in the MCS onset estimate.
pub const PHI_C: f64 = 0.5;

/// Adiabatic index of the shocked gas.
pub const GAMMA_ADIABATIC: f64 = 5.0 / 3.0;
