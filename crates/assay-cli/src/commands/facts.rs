//! Facts command - print the grounded fact list.

use std::path::PathBuf;

use super::{build_assay, ensure_exists};

pub fn run(file: PathBuf, config: Option<PathBuf>) -> Result<(), Box<dyn std::error::Error>> {
    ensure_exists(&file)?;

    let assay = build_assay(config.as_deref())?;
    let report = assay.analyze_file(&file)?;

    if !report.facts.is_empty() {
        println!("{}", report.facts);
    }

    Ok(())
}
