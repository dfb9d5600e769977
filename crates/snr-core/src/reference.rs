// ─────────────────────────────────────────────────────────────────────
// SNR Evolution Core — Reference Data
// © 1998–2026 Miroslav Šotek. All rights reserved.
// Contact: www.anulum.li | protoscience@anulum.li
// ORCID: https://orcid.org/0009-0009-3560-0851
// License: GNU AGPL v3 | Commercial licensing available
// ─────────────────────────────────────────────────────────────────────
//! Static reference tables: White & Long (1991) cooling coefficients,
//! self-similar ED profiles and cloudy-ISM interior profiles.
//!
//! Files are read once from an explicit directory and never written:
//!
//! - `WL91Parameters.csv`: `c_tau,K` per line
//! - `Chev_s{s}n{n}.txt`: whitespace columns r/r_c, density, pressure
//! - `TvR{c}.csv`, `rhovR{c}.csv`: 6 header rows, then `radius,value`

use snr_math::interp::Table1D;
use snr_types::constants::K_SED;
use snr_types::error::{SnrError, SnrResult};
use ndarray::Array1;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, info};

/// Header rows preceding the data in the cloudy-ISM profile files.
const CLOUDY_HEADER_ROWS: usize = 6;

/// `(s, n)` combinations with a tabulated self-similar profile.
pub const SELF_SIMILAR_TABLES: [(u8, u8); 3] = [(0, 7), (0, 12), (2, 7)];

/// Self-similar ED profile, radius in units of the contact discontinuity.
#[derive(Debug, Clone)]
pub struct SelfSimilarTable {
    pub radius: Array1<f64>,
    pub density: Array1<f64>,
    pub pressure: Array1<f64>,
}

/// Normalised temperature and density of the cloudy-ISM interior.
#[derive(Debug, Clone)]
pub struct CloudyProfiles {
    pub temperature: Table1D,
    pub density: Table1D,
}

/// All reference tables available to one run.
#[derive(Debug, Clone, Default)]
pub struct ReferenceData {
    /// C/τ → K, already scaled by K_SED
    cooling: BTreeMap<u8, f64>,
    self_similar: BTreeMap<(u8, u8), SelfSimilarTable>,
    cloudy: BTreeMap<u8, CloudyProfiles>,
}

impl ReferenceData {
    /// No tables; enough for every model except cloudy-ISM and emissivity.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Load every known table present in `dir`.
    ///
    /// The cooling table is required; profile tables are optional and only
    /// fail later if a calculation asks for one that is missing.
    pub fn load(dir: impl AsRef<Path>) -> SnrResult<Self> {
        let dir = dir.as_ref();
        let mut data = ReferenceData::empty();

        let cooling_path = dir.join("WL91Parameters.csv");
        let text = read(&cooling_path)?;
        for (c_tau, k) in parse_cooling(&text, &cooling_path)? {
            data.cooling.insert(c_tau, k);
        }

        for (s, n) in SELF_SIMILAR_TABLES {
            let path = dir.join(format!("Chev_s{s}n{n}.txt"));
            if path.exists() {
                let table = parse_self_similar(&read(&path)?, &path)?;
                debug!(s, n, rows = table.radius.len(), "Loaded self-similar profile");
                data.self_similar.insert((s, n), table);
            }
        }

        for &c_tau in data.cooling.keys().collect::<Vec<_>>() {
            let t_path = dir.join(format!("TvR{c_tau}.csv"));
            let rho_path = dir.join(format!("rhovR{c_tau}.csv"));
            if t_path.exists() && rho_path.exists() {
                let temperature = parse_cloudy(&read(&t_path)?, &t_path)?;
                let density = parse_cloudy(&read(&rho_path)?, &rho_path)?;
                data.cloudy.insert(
                    c_tau,
                    CloudyProfiles {
                        temperature,
                        density,
                    },
                );
            }
        }

        info!(
            dir = %dir.display(),
            cooling_classes = data.cooling.len(),
            self_similar = data.self_similar.len(),
            cloudy = data.cloudy.len(),
            "Reference data loaded"
        );
        Ok(data)
    }

    /// Store a raw (unscaled) cooling coefficient for class `c_tau`.
    pub fn with_cooling(mut self, c_tau: u8, k_raw: f64) -> Self {
        self.cooling.insert(c_tau, k_raw * K_SED);
        self
    }

    pub fn with_self_similar(mut self, s: u8, n: u8, table: SelfSimilarTable) -> Self {
        self.self_similar.insert((s, n), table);
        self
    }

    pub fn with_cloudy(mut self, c_tau: u8, profiles: CloudyProfiles) -> Self {
        self.cloudy.insert(c_tau, profiles);
        self
    }

    /// Scaled cooling coefficient K for class `c_tau`.
    pub fn cooling_k(&self, c_tau: u8) -> SnrResult<f64> {
        self.cooling.get(&c_tau).copied().ok_or_else(|| {
            SnrError::ReferenceData(format!("no cooling coefficient for C/tau = {c_tau}"))
        })
    }

    pub fn self_similar(&self, s: u8, n: u8) -> SnrResult<&SelfSimilarTable> {
        self.self_similar.get(&(s, n)).ok_or_else(|| {
            SnrError::ReferenceData(format!("no self-similar profile Chev_s{s}n{n}"))
        })
    }

    pub fn cloudy(&self, c_tau: u8) -> SnrResult<&CloudyProfiles> {
        self.cloudy.get(&c_tau).ok_or_else(|| {
            SnrError::ReferenceData(format!("no cloudy-ISM profiles for C/tau = {c_tau}"))
        })
    }

    pub fn cooling_classes(&self) -> impl Iterator<Item = u8> + '_ {
        self.cooling.keys().copied()
    }
}

fn read(path: &Path) -> SnrResult<String> {
    std::fs::read_to_string(path)
        .map_err(|e| SnrError::ReferenceData(format!("{}: {e}", path.display())))
}

fn parse_number(field: &str, path: &Path, line: usize) -> SnrResult<f64> {
    field.trim().parse::<f64>().map_err(|_| {
        SnrError::ReferenceData(format!(
            "{}:{}: cannot parse '{}' as a number",
            path.display(),
            line + 1,
            field.trim()
        ))
    })
}

/// `c_tau,K` lines; class values are stored as floats in the file.
fn parse_cooling(text: &str, path: &Path) -> SnrResult<Vec<(u8, f64)>> {
    let mut out = Vec::new();
    for (i, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split(',').collect();
        if fields.len() < 2 {
            return Err(SnrError::ReferenceData(format!(
                "{}:{}: expected 'c_tau,K'",
                path.display(),
                i + 1
            )));
        }
        let c = parse_number(fields[0], path, i)?;
        let k = parse_number(fields[1], path, i)?;
        if c.fract() != 0.0 || !(0.0..=255.0).contains(&c) {
            // Non-integral classes have no profile files; skip them
            continue;
        }
        out.push((c as u8, k * K_SED));
    }
    if out.is_empty() {
        return Err(SnrError::ReferenceData(format!(
            "{}: no cooling coefficients",
            path.display()
        )));
    }
    Ok(out)
}

fn parse_self_similar(text: &str, path: &Path) -> SnrResult<SelfSimilarTable> {
    let mut radius = Vec::new();
    let mut density = Vec::new();
    let mut pressure = Vec::new();
    for (i, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let cols: Vec<&str> = line.split_whitespace().collect();
        if cols.len() < 3 {
            return Err(SnrError::ReferenceData(format!(
                "{}:{}: expected 3 columns, got {}",
                path.display(),
                i + 1,
                cols.len()
            )));
        }
        radius.push(parse_number(cols[0], path, i)?);
        density.push(parse_number(cols[1], path, i)?);
        pressure.push(parse_number(cols[2], path, i)?);
    }
    if radius.len() < 2 {
        return Err(SnrError::ReferenceData(format!(
            "{}: profile needs at least 2 rows",
            path.display()
        )));
    }
    Ok(SelfSimilarTable {
        radius: Array1::from(radius),
        density: Array1::from(density),
        pressure: Array1::from(pressure),
    })
}

fn parse_cloudy(text: &str, path: &Path) -> SnrResult<Table1D> {
    let mut x = Vec::new();
    let mut y = Vec::new();
    for (i, line) in text.lines().enumerate().skip(CLOUDY_HEADER_ROWS) {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split(',').collect();
        if fields.len() < 2 {
            return Err(SnrError::ReferenceData(format!(
                "{}:{}: expected 'radius,value'",
                path.display(),
                i + 1
            )));
        }
        x.push(parse_number(fields[0], path, i)?);
        y.push(parse_number(fields[1], path, i)?);
    }
    if x.len() < 2 {
        return Err(SnrError::ReferenceData(format!(
            "{}: profile needs at least 2 rows",
            path.display()
        )));
    }
    Ok(Table1D::new(Array1::from(x), Array1::from(y)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_minimal_set(dir: &Path) {
        fs::write(dir.join("WL91Parameters.csv"), "1,0.5\n2,0.6\n4,0.8\n").unwrap();
        fs::write(
            dir.join("Chev_s0n7.txt"),
            "# r rho p\n0.93 2.0 0.4\n1.0 1.0 1.0\n1.18 4.0 1.2\n",
        )
        .unwrap();
        let header = "h\nh\nh\nh\nh\nh\n";
        fs::write(dir.join("TvR2.csv"), format!("{header}0.0,2.0\n1.0,1.0\n")).unwrap();
        fs::write(dir.join("rhovR2.csv"), format!("{header}0.0,0.5\n0.5,0.7\n1.0,4.0\n"))
            .unwrap();
    }

    #[test]
    fn test_load_from_tempdir() {
        let dir = tempfile::tempdir().unwrap();
        write_minimal_set(dir.path());
        let data = ReferenceData::load(dir.path()).unwrap();

        assert!((data.cooling_k(2).unwrap() - 0.6 * K_SED).abs() < 1e-12);
        let chev = data.self_similar(0, 7).unwrap();
        assert_eq!(chev.radius.len(), 3);
        assert!((chev.pressure[2] - 1.2).abs() < 1e-15);
        assert!(data.self_similar(0, 12).is_err());

        let cloudy = data.cloudy(2).unwrap();
        assert_eq!(cloudy.density.len(), 3);
        assert!((cloudy.temperature.eval(0.5) - 1.5).abs() < 1e-12);
        assert!(data.cloudy(1).is_err());
    }

    #[test]
    fn test_missing_cooling_table_fails() {
        let dir = tempfile::tempdir().unwrap();
        let err = ReferenceData::load(dir.path()).unwrap_err();
        assert!(matches!(err, SnrError::ReferenceData(_)));
    }

    #[test]
    fn test_malformed_row_reports_line() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("WL91Parameters.csv"), "1,0.5\n2,abc\n").unwrap();
        let err = ReferenceData::load(dir.path()).unwrap_err();
        assert!(err.to_string().contains(":2:"), "{err}");
    }

    #[test]
    fn test_in_memory_builders() {
        let data = ReferenceData::empty().with_cooling(4, 1.0);
        assert!((data.cooling_k(4).unwrap() - K_SED).abs() < 1e-15);
        assert_eq!(data.cooling_classes().collect::<Vec<_>>(), vec![4]);
    }
}
