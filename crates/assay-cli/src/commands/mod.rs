//! CLI command implementations.

pub mod analyze;
pub mod facts;
pub mod summary;

use std::path::Path;

use assay::{Assay, AssayConfig, ProfilingConfig};

/// Build an engine, applying threshold overrides when a config file is given.
pub fn build_assay(config: Option<&Path>) -> Result<Assay, Box<dyn std::error::Error>> {
    let profiling = match config {
        Some(path) => ProfilingConfig::from_json_file(path)?,
        None => ProfilingConfig::default(),
    };

    Ok(Assay::with_config(AssayConfig {
        profiling,
        ..AssayConfig::default()
    }))
}

/// Fail early with a readable message when the input is missing.
pub fn ensure_exists(file: &Path) -> Result<(), Box<dyn std::error::Error>> {
    if !file.exists() {
        return Err(format!("File not found: {}", file.display()).into());
    }
    Ok(())
}
