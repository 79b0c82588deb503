//! NNC JSON format.
//!
//! A registry is written as a list of `{ "cell1", "cell2", "trans" }`
//! records in registry order. Records read back must carry a finite,
//! non-negative transmissibility.

use crate::Nnc;
use anyhow::{Context, Result, ensure};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

/// Writes an NNC registry to a JSON file.
///
/// # Arguments
/// * `path` - Output file, created or truncated
/// * `nnc` - Connections to write, in registry order
///
/// # Example
/// ```no_run
/// use pinchout::Nnc;
/// use pinchout::io::write_nnc_json;
/// use std::path::Path;
///
/// let mut nnc = Nnc::new();
/// nnc.add_nnc(1, 37, 4.26);
/// write_nnc_json(Path::new("pinch.json"), &nnc).unwrap();
/// ```
pub fn write_nnc_json(path: &Path, nnc: &Nnc) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Cannot create NNC file {}", path.display()))?;

    serde_json::to_writer_pretty(BufWriter::new(file), nnc)
        .with_context(|| format!("Cannot write {} NNC(s) to {}", nnc.num_nnc(), path.display()))
}

/// Reads an NNC registry from a JSON file.
///
/// # Arguments
/// * `path` - File written by [`write_nnc_json`]
///
/// # Returns
/// The registry with records in file order. A record with a negative or
/// non-finite `trans` is an error.
pub fn read_nnc_json(path: &Path) -> Result<Nnc> {
    let file =
        File::open(path).with_context(|| format!("Cannot open NNC file {}", path.display()))?;

    let nnc: Nnc = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("{} is not an NNC record list", path.display()))?;
    check_trans(&nnc).with_context(|| format!("Bad NNC record in {}", path.display()))?;

    Ok(nnc)
}

pub fn to_nnc_string(nnc: &Nnc) -> Result<String> {
    serde_json::to_string_pretty(nnc).context("Cannot write NNC records to string")
}

pub fn from_nnc_string(json: &str) -> Result<Nnc> {
    let nnc: Nnc = serde_json::from_str(json).context("Not an NNC record list")?;
    check_trans(&nnc)?;
    Ok(nnc)
}

fn check_trans(nnc: &Nnc) -> Result<()> {
    for (index, entry) in nnc.iter().enumerate() {
        ensure!(
            entry.trans.is_finite() && entry.trans >= 0.0,
            "record {index} ({} -> {}) has transmissibility {}",
            entry.cell1,
            entry.cell2,
            entry.trans
        );
    }
    Ok(())
}
