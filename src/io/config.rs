use crate::pinch::PinchConfig;
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

/// Reads and validates a [`PinchConfig`] from a JSON file.
///
/// Missing fields take their default values.
pub fn read_pinch_config(path: &Path) -> Result<PinchConfig> {
    let file =
        File::open(path).with_context(|| format!("Cannot open pinch config {}", path.display()))?;
    let config: PinchConfig = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("{} is not a pinch config", path.display()))?;
    config
        .validate()
        .with_context(|| format!("Invalid pinch config: {}", path.display()))?;
    Ok(config)
}

pub fn write_pinch_config(path: &Path, config: &PinchConfig) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("Cannot create pinch config {}", path.display()))?;
    serde_json::to_writer_pretty(BufWriter::new(file), config)
        .with_context(|| format!("Cannot write pinch config to {}", path.display()))?;
    Ok(())
}
