//! Summary command - human-readable profile of a data file.

use std::path::PathBuf;

use assay::format::number;
use assay::{ColumnRole, Report};
use colored::Colorize;

use super::{build_assay, ensure_exists};

pub fn run(file: PathBuf, config: Option<PathBuf>) -> Result<(), Box<dyn std::error::Error>> {
    ensure_exists(&file)?;

    let assay = build_assay(config.as_deref())?;
    let report = assay.analyze_file(&file)?;

    print_report(&report);
    Ok(())
}

fn print_report(report: &Report) {
    let analysis = &report.analysis;
    let overview = &analysis.overview;

    println!(
        "{} {}",
        "Profile of".cyan().bold(),
        report.source.path.display().to_string().white()
    );
    println!(
        "{} rows x {} columns, {}% missing, {} duplicate rows",
        overview.total_rows.to_string().white().bold(),
        overview.total_columns.to_string().white().bold(),
        overview.missing_pct,
        overview.duplicate_rows
    );
    println!();

    println!("{}", "Columns:".yellow().bold());
    for column in &overview.columns {
        let finding = &analysis.data_quality.missing_by_column[column.name.as_str()];
        println!(
            "  {:20} {:12} {:8} missing {:>6}%  unique {}",
            column.name,
            role_label(column.role),
            format!("{:?}", column.storage).to_lowercase(),
            finding.missing_pct,
            column.unique_count
        );
    }

    let quality = &analysis.data_quality;
    let has_issues = !quality.high_missing_columns.is_empty()
        || !quality.constant_columns.is_empty()
        || !quality.high_cardinality_columns.is_empty()
        || !quality.suspected_missing_codes.is_empty()
        || !quality.sensitive_columns.is_empty();

    if has_issues {
        println!();
        println!("{}", "Quality:".yellow().bold());
        for entry in &quality.high_missing_columns {
            println!(
                "  {} {} is {}% missing",
                "!".red().bold(),
                entry.column,
                entry.missing_pct
            );
        }
        for name in &quality.constant_columns {
            println!("  {} {} is constant", "!".yellow(), name);
        }
        for entry in &quality.high_cardinality_columns {
            println!(
                "  {} {} has high cardinality ({} unique, ratio {})",
                "!".yellow(),
                entry.column,
                entry.unique_count,
                entry.unique_ratio
            );
        }
        for (name, codes) in &quality.suspected_missing_codes {
            println!(
                "  {} {} may encode missing values as {}",
                "?".blue(),
                name,
                codes.join(", ")
            );
        }
        for name in &quality.sensitive_columns {
            println!("  {} {} may contain personal data", "?".blue(), name);
        }
    }

    if !analysis.numeric_analysis.is_empty() {
        println!();
        println!("{}", "Numeric:".yellow().bold());
        for (name, summary) in &analysis.numeric_analysis {
            println!(
                "  {:20} mean {:>12}  median {:>12}  std {:>12}  outliers {}",
                name,
                number(summary.mean, 2),
                number(summary.median, 2),
                number(summary.std, 2),
                summary.outlier_count
            );
        }
    }

    if !analysis.categorical_analysis.is_empty() {
        println!();
        println!("{}", "Categorical:".yellow().bold());
        for (name, summary) in &analysis.categorical_analysis {
            println!(
                "  {:20} {} unique, top '{}' ({}%)",
                name, summary.unique_count, summary.top_value, summary.top_pct
            );
        }
    }

    let strong = analysis
        .relationships
        .as_ref()
        .map(|r| r.strong_correlations.as_slice())
        .unwrap_or_default();
    if !strong.is_empty() {
        println!();
        println!("{}", "Correlations:".yellow().bold());
        for entry in strong {
            let coefficient = format!("{:+.3}", entry.coefficient);
            let coefficient = if entry.coefficient >= 0.0 {
                coefficient.green()
            } else {
                coefficient.red()
            };
            println!("  {} <-> {}  {}", entry.column_a, entry.column_b, coefficient);
        }
    }

    println!();
    println!("{}", "Facts:".yellow().bold());
    if report.facts.is_empty() {
        println!("  (none)");
    }
    for fact in &report.facts {
        println!("  - {}", fact);
    }
}

fn role_label(role: ColumnRole) -> colored::ColoredString {
    match role {
        ColumnRole::Numeric => role.as_str().green(),
        ColumnRole::Categorical | ColumnRole::Binary => role.as_str().blue(),
        ColumnRole::Datetime => role.as_str().magenta(),
        ColumnRole::Identifier => role.as_str().dimmed(),
        ColumnRole::Text => role.as_str().normal(),
    }
}
