// ─────────────────────────────────────────────────────────────────────
// SNR Evolution Core — SNR CLI
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Command implementations behind the `snr` binary.
//!
//! Each command reads a JSON parameter file and returns the JSON text
//! to print.

use snr_core::emissivity::EmissivityEngine;
use snr_core::evolution::{Evolution, EvolutionState};
use snr_core::reference::ReferenceData;
use snr_types::config::{EmissivitySettings, PhysicalInputs, SamplingSettings};
use snr_types::error::{SnrError, SnrResult};
use snr_types::state::PhaseRange;
use std::path::Path;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

/// Install the fmt subscriber; `RUST_LOG` overrides the default filter.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,snr_core=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Parse a plot range label (case-insensitive), e.g. `current`, `ed-st`,
/// `pds`, or `custom:<t_min>:<t_max>`.
pub fn parse_range(label: &str) -> Result<PhaseRange, String> {
    let lower = label.trim().to_ascii_lowercase();
    if let Some(rest) = lower.strip_prefix("custom:") {
        let (lo, hi) = rest
            .split_once(':')
            .ok_or_else(|| format!("custom range needs <t_min>:<t_max>, got '{rest}'"))?;
        let t_min = lo.parse::<f64>().map_err(|e| format!("t_min '{lo}': {e}"))?;
        let t_max = hi.parse::<f64>().map_err(|e| format!("t_max '{hi}': {e}"))?;
        return Ok(PhaseRange::Custom { t_min, t_max });
    }
    let range = match lower.as_str() {
        "current" => PhaseRange::Current,
        "reverse" | "reverse shock lifetime" => PhaseRange::ReverseShockLifetime,
        "ed-st" => PhaseRange::EdSt,
        "ed" => PhaseRange::Ed,
        "ed-wl" => PhaseRange::EdWl,
        "st" => PhaseRange::St,
        "pds" => PhaseRange::Pds,
        "mcs" => PhaseRange::Mcs,
        "lk" => PhaseRange::Lk,
        "tw" => PhaseRange::Tw,
        "wl" => PhaseRange::Wl,
        "s2" | "wind" => PhaseRange::Wind,
        other => return Err(format!("unknown plot range '{other}'")),
    };
    Ok(range)
}

fn load_reference(data_dir: Option<&Path>) -> SnrResult<ReferenceData> {
    match data_dir {
        Some(dir) => ReferenceData::load(dir),
        None => Ok(ReferenceData::empty()),
    }
}

fn load_state(inputs: &Path, reference: &ReferenceData) -> SnrResult<EvolutionState> {
    let path = inputs
        .to_str()
        .ok_or_else(|| SnrError::ConfigError(format!("non-UTF-8 path {}", inputs.display())))?;
    let inputs = PhysicalInputs::from_file(path)?;
    let state = Evolution::new(reference).evaluate(&inputs)?;
    info!(
        n = state.n(),
        model = %state.model(),
        phases = ?state.phases(),
        final_merger = state.final_merger(),
        "Remnant evaluated"
    );
    Ok(state)
}

/// Output map of the remnant at the requested age.
pub fn run_evolve(inputs: &Path, data_dir: Option<&Path>) -> SnrResult<String> {
    let reference = load_reference(data_dir)?;
    let state = load_state(inputs, &reference)?;
    Ok(serde_json::to_string_pretty(&state.output_map()?)?)
}

/// Shock tracks and axis limits for `range`.
pub fn run_plot(
    inputs: &Path,
    data_dir: Option<&Path>,
    range: PhaseRange,
    sampling: &SamplingSettings,
) -> SnrResult<String> {
    let reference = load_reference(data_dir)?;
    let state = load_state(inputs, &reference)?;
    let plot = state.plot_data(range, sampling)?;
    Ok(serde_json::to_string_pretty(&plot)?)
}

/// Emissivity observables and profile curves.
pub fn run_emissivity(
    inputs: &Path,
    data_dir: &Path,
    settings: EmissivitySettings,
) -> SnrResult<String> {
    let reference = ReferenceData::load(data_dir)?;
    let state = load_state(inputs, &reference)?;
    let engine = EmissivityEngine::new(&state, &reference, settings)?;
    let report = engine.report()?;
    let json = serde_json::json!({
        "output": report.output_map(),
        "report": report,
    });
    Ok(serde_json::to_string_pretty(&json)?)
}
