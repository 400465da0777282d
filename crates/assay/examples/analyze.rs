//! Example: Profile a tabular data file with Assay.
//!
//! Usage:
//!   cargo run --example analyze -- <file_path>

use std::env;
use std::path::Path;

use assay::Assay;
use assay::format::number;

fn main() -> assay::Result<()> {
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Usage: cargo run --example analyze -- <file_path>");
        std::process::exit(1);
    }

    let file_path = &args[1];
    let path = Path::new(file_path);

    if !path.exists() {
        eprintln!("Error: File not found: {}", file_path);
        std::process::exit(1);
    }

    let separator = "=".repeat(80);
    println!("{}", separator);
    println!("Assay Profile: {}", file_path);
    println!("{}", separator);
    println!();

    let report = Assay::new().analyze_file(path)?;
    let analysis = &report.analysis;

    println!("## Source Metadata");
    println!("  File: {}", report.source.file);
    println!("  Format: {}", report.source.format);
    println!("  Rows: {}", report.source.row_count);
    println!("  Columns: {}", report.source.column_count);
    println!();

    println!("## Columns");
    println!();
    for col in &analysis.overview.columns {
        println!(
            "  {:20} {:12} nulls={:<6} unique={:<6} samples={}",
            col.name,
            col.role,
            col.null_count,
            col.unique_count,
            col.sample_values.join(", ")
        );
    }
    println!();

    if !analysis.numeric_analysis.is_empty() {
        println!("## Numeric");
        println!();
        for (name, s) in &analysis.numeric_analysis {
            println!(
                "  {:20} min={} q25={} median={} q75={} max={} skew={}",
                name,
                number(s.min, 2),
                number(s.q25, 2),
                number(s.median, 2),
                number(s.q75, 2),
                number(s.max, 2),
                number(s.skewness, 2)
            );
        }
        println!();
    }

    println!("## Facts");
    println!();
    println!("{}", report.facts);
    println!();

    Ok(())
}
