// ─────────────────────────────────────────────────────────────────────
// SNR Evolution Core — Composition
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Mean molecular weights and mean squared charge from log abundances.

use snr_types::config::{Abundances, Element, PhysicalInputs};
use snr_types::error::{SnrError, SnrResult};
use snr_types::state::{Composition, GasMoments};

/// Log abundance the ambient mass moments are normalised to.
pub const AMBIENT_REFERENCE: f64 = 12.0;

/// Moments of one gas. `reference` is the log abundance that `mu_h` and
/// `mu_e` are measured against; ion moments always use hydrogen.
pub fn gas_moments(abundances: &Abundances, reference: f64) -> SnrResult<GasMoments> {
    let log_h = abundances
        .get(Element::H)
        .ok_or_else(|| SnrError::ConfigError("abundance map has no hydrogen entry".to_string()))?;

    let mut mass = 0.0;
    let mut charge = 0.0;
    let mut number = 0.0;
    let mut charge_sq = 0.0;
    for (element, log_ab) in abundances.iter() {
        let rel_ref = 10f64.powf(log_ab - reference);
        let rel_h = 10f64.powf(log_ab - log_h);
        mass += element.mass_number() * rel_ref;
        charge += element.charge() * rel_ref;
        number += rel_h;
        charge_sq += element.charge().powi(2) * rel_h;
    }

    Ok(GasMoments {
        mu_h: mass,
        mu_e: mass / charge,
        mu_i: mass / number,
        z_sq: charge_sq / number,
    })
}

/// Ambient moments against H = 12, ejecta moments against their own H.
pub fn composition(inputs: &PhysicalInputs) -> SnrResult<Composition> {
    let ambient = gas_moments(&inputs.abundance, AMBIENT_REFERENCE)?;
    let log_h_ej = inputs
        .ej_abundance
        .get(Element::H)
        .ok_or_else(|| SnrError::ConfigError("ejecta abundance map has no hydrogen entry".to_string()))?;
    let ejecta = gas_moments(&inputs.ej_abundance, log_h_ej)?;
    Ok(Composition { ambient, ejecta })
}
