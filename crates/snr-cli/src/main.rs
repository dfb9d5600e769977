// ─────────────────────────────────────────────────────────────────────
// SNR Evolution Core — snr
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Supernova remnant calculator.
//!
//! Usage:
//!   `snr evolve <inputs.json> [--data-dir DIR]`
//!   `snr plot <inputs.json> [--range current] [--data-dir DIR]`
//!   `snr emissivity <inputs.json> --data-dir DIR [--energy 1 --emin 0.3 --emax 8]`

use clap::{Parser, Subcommand};
use snr_cli::{init_logging, parse_range, run_emissivity, run_evolve, run_plot};
use snr_types::config::{EmissivitySettings, SamplingSettings};
use snr_types::state::PhaseRange;
use std::path::PathBuf;
use std::process;
use tracing::error;

#[derive(Parser, Debug)]
#[command(name = "snr")]
#[command(about = "Supernova remnant evolution and X-ray emissivity")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Shock radii, velocities, temperatures and phase times at one age
    Evolve {
        /// JSON parameter file
        inputs: PathBuf,

        /// Reference data directory (needed for the cloudy-ISM model)
        #[arg(long = "data-dir")]
        data_dir: Option<PathBuf>,
    },
    /// Forward and reverse shock tracks over the phase sequence
    Plot {
        inputs: PathBuf,

        #[arg(long = "data-dir")]
        data_dir: Option<PathBuf>,

        /// Axis range: current, ed-st, pds, ... or custom:<t_min>:<t_max>
        #[arg(long, default_value = "current", value_parser = parse_range)]
        range: PhaseRange,

        /// Samples for ED/ST and reverse-shock segments
        #[arg(long, default_value_t = 1000)]
        coarse: usize,
    },
    /// Emission measure, luminosity and emissivity profiles
    Emissivity {
        inputs: PathBuf,

        #[arg(long = "data-dir")]
        data_dir: PathBuf,

        /// Photon energy for the intensity profile [keV]
        #[arg(long, default_value_t = 1.0)]
        energy: f64,

        /// Luminosity band [keV]
        #[arg(long, default_value_t = 0.3)]
        emin: f64,
        #[arg(long, default_value_t = 8.0)]
        emax: f64,
    },
}

fn main() {
    init_logging();
    let args = Args::parse();

    let result = match args.command {
        Command::Evolve { inputs, data_dir } => run_evolve(&inputs, data_dir.as_deref()),
        Command::Plot {
            inputs,
            data_dir,
            range,
            coarse,
        } => {
            let sampling = SamplingSettings {
                coarse,
                ..SamplingSettings::default()
            };
            run_plot(&inputs, data_dir.as_deref(), range, &sampling)
        }
        Command::Emissivity {
            inputs,
            data_dir,
            energy,
            emin,
            emax,
        } => {
            let settings = EmissivitySettings {
                energy_kev: energy,
                emin_kev: emin,
                emax_kev: emax,
            };
            run_emissivity(&inputs, &data_dir, settings)
        }
    };

    match result {
        Ok(json) => println!("{json}"),
        Err(e) => {
            error!("{e}");
            eprintln!("Error: {e}");
            process::exit(1);
        }
    }
}
