// ─────────────────────────────────────────────────────────────────────
// SNR Evolution Core — Error
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
use crate::state::Phase;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SnrError {
    #[error("No solution in bracket [{lo}, {hi}]: f(lo)={f_lo}, f(hi)={f_hi}")]
    NoSolutionInBracket {
        lo: f64,
        hi: f64,
        f_lo: f64,
        f_hi: f64,
    },

    #[error("{method} did not converge after {iterations} iterations (last estimate {last})")]
    NoConvergence {
        method: &'static str,
        iterations: usize,
        last: f64,
    },

    #[error("Integration failed: {0}")]
    IntegrationFailed(String),

    #[error("Unsupported density index n={n} for environment s={s}")]
    UnsupportedDensityIndex { n: u8, s: u8 },

    #[error("No solution law registered for n={n}, phase {phase}")]
    MissingLaw { n: u8, phase: Phase },

    #[error("Phase {0} evaluated before its start anchor was resolved")]
    MissingAnchor(Phase),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Reference data error: {0}")]
    ReferenceData(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type SnrResult<T> = Result<T, SnrError>;
