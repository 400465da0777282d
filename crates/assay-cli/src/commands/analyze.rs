//! Analyze command - profile a data file and write the JSON report.

use std::path::PathBuf;

use assay::DataDictionary;
use colored::Colorize;

use super::{build_assay, ensure_exists};

pub fn run(
    file: PathBuf,
    schema: Option<PathBuf>,
    config: Option<PathBuf>,
    output: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    ensure_exists(&file)?;

    eprintln!(
        "{} {}",
        "Analyzing".cyan().bold(),
        file.display().to_string().white()
    );

    let assay = build_assay(config.as_deref())?;
    let mut report = assay.analyze_file(&file)?;

    if let Some(schema_path) = schema {
        ensure_exists(&schema_path)?;
        report = report.with_dictionary(DataDictionary::load(&schema_path)?);
    }

    let json = serde_json::to_string_pretty(&report)?;

    match output {
        Some(path) => {
            std::fs::write(&path, json)?;
            eprintln!(
                "{} {}",
                "Saved to".green().bold(),
                path.display().to_string().white()
            );
        }
        None => println!("{}", json),
    }

    let overview = &report.analysis.overview;
    eprintln!(
        "Profiled {} rows x {} columns, {} facts",
        overview.total_rows.to_string().white().bold(),
        overview.total_columns.to_string().white().bold(),
        report.facts.len().to_string().white().bold()
    );

    Ok(())
}
