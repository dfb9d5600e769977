// ─────────────────────────────────────────────────────────────────────
// SNR Evolution Core — Property-Based Tests (proptest) for snr-types
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Property-based tests for snr-types using proptest.
//!
//! Covers: input validation ranges, JSON roundtrip of inputs,
//! thermal mean molecular weight bounds.

use proptest::prelude::*;
use snr_types::config::{Environment, ModelVariant, PhysicalInputs};
use snr_types::state::GasMoments;

fn model_strategy() -> impl Strategy<Value = ModelVariant> {
    prop_oneof![
        Just(ModelVariant::Standard),
        Just(ModelVariant::CloudyIsm),
        Just(ModelVariant::LightEjecta),
        Just(ModelVariant::LossModified),
    ]
}

// ── Input Validation ─────────────────────────────────────────────────

proptest! {
    /// Any strictly positive physical parameter set validates.
    #[test]
    fn positive_inputs_validate(
        e_51 in 0.01f64..100.0,
        m_ej in 0.1f64..50.0,
        n_0 in 1e-4f64..1e3,
        t in 1.0f64..1e6,
    ) {
        let mut inputs = PhysicalInputs::reference(7);
        inputs.e_51 = e_51;
        inputs.m_ej = m_ej;
        inputs.n_0 = n_0;
        inputs.t = t;
        prop_assert!(inputs.validate().is_ok());
    }

    /// Non-positive density is always rejected.
    #[test]
    fn nonpositive_density_rejected(n_0 in -10.0f64..=0.0) {
        let mut inputs = PhysicalInputs::reference(7);
        inputs.n_0 = n_0;
        prop_assert!(inputs.validate().is_err());
    }

    /// Te/Ti outside (0, 1] is rejected.
    #[test]
    fn temperature_ratio_bounds(ratio in 1.0001f64..10.0) {
        let mut inputs = PhysicalInputs::reference(7);
        inputs.t_ratio = Some(ratio);
        prop_assert!(inputs.validate().is_err());
        inputs.t_ratio = Some(1.0 / ratio);
        prop_assert!(inputs.validate().is_ok());
    }
}

// ── Serialization ────────────────────────────────────────────────────

proptest! {
    /// JSON roundtrip preserves every scalar field.
    #[test]
    fn inputs_json_roundtrip(
        e_51 in 0.1f64..10.0,
        n in prop::sample::select(vec![0u8, 2, 4, 6, 7, 8, 9, 10, 12, 14]),
        wind in any::<bool>(),
        model in model_strategy(),
    ) {
        let mut inputs = PhysicalInputs::reference(n);
        inputs.e_51 = e_51;
        inputs.s = if wind { Environment::Wind } else { Environment::Uniform };
        inputs.model = model;

        let json = serde_json::to_string(&inputs).unwrap();
        let back: PhysicalInputs = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(back.n, n);
        prop_assert_eq!(back.s, inputs.s);
        prop_assert_eq!(back.model, model);
        prop_assert!((back.e_51 - e_51).abs() < 1e-12 * e_51);
        prop_assert_eq!(back.abundance, inputs.abundance);
    }
}

// ── Thermal Mean Molecular Weight ────────────────────────────────────

proptest! {
    /// μ lies between the fully equilibrated value and μ_e.
    #[test]
    fn thermal_mu_bounded(
        mu_e in 1.0f64..2.5,
        mu_i in 1.0f64..20.0,
        ratio in 0.01f64..=1.0,
    ) {
        let gas = GasMoments { mu_h: 1.4, mu_e, mu_i, z_sq: 1.5 };
        let mu = gas.mu_thermal(ratio);
        let mu_equilibrated = gas.mu_thermal(1.0);
        prop_assert!(mu >= mu_equilibrated - 1e-12);
        prop_assert!(mu < mu_e);
    }
}
