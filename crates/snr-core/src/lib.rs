// ─────────────────────────────────────────────────────────────────────
// SNR Evolution Core — SNR Core
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Supernova remnant evolution and X-ray emissivity.
//!
//! Stage 1: constant tables, reference data, composition
//! Stage 2: phase laws, evolution, mergers, phase selection
//! Stage 3: snapshot, plot data, emissivity

pub mod composition;
pub mod emissivity;
pub mod evolution;
pub mod laws;
pub mod merger;
pub mod phases;
pub mod plot;
pub mod profiles;
pub mod reference;
pub mod registry;
pub mod snapshot;
pub mod tables;

pub use emissivity::{EmissivityEngine, EmissivityReport};
pub use evolution::{evaluate, Evolution, EvolutionState};
pub use plot::{PlotData, ShockTrack};
pub use reference::ReferenceData;
pub use snapshot::Snapshot;
