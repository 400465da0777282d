//! Grounded fact extraction.
//!
//! Flattens an [`AnalysisResult`] into short statements that quote the
//! computed numbers. Nothing is recomputed here: every figure comes from the
//! result, only formatted. The order and the caps below are fixed so the same
//! table always yields the same list.

use std::fmt;
use std::ops::Deref;

use serde::{Deserialize, Serialize};

use crate::format::{decimal, grouped, number};
use crate::model::AnalysisResult;

/// High-missing columns mentioned.
pub const MAX_HIGH_MISSING_FACTS: usize = 3;
/// Constant column names listed.
pub const MAX_CONSTANT_COLUMNS: usize = 5;
/// Categorical summaries described.
pub const MAX_CATEGORICAL_FACTS: usize = 3;
/// Numeric summaries described.
pub const MAX_NUMERIC_FACTS: usize = 5;
/// Strong correlations mentioned.
pub const MAX_CORRELATION_FACTS: usize = 5;

/// Ordered, immutable list of fact statements.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Facts(Vec<String>);

impl Deref for Facts {
    type Target = [String];

    fn deref(&self) -> &[String] {
        &self.0
    }
}

impl<'a> IntoIterator for &'a Facts {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Renders one `- fact` bullet per line.
impl fmt::Display for Facts {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, fact) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            write!(f, "- {}", fact)?;
        }
        Ok(())
    }
}

/// Flatten an analysis result into facts.
pub fn extract_facts(result: &AnalysisResult) -> Facts {
    let mut facts = Vec::new();

    let overview = &result.overview;
    facts.push(format!(
        "Dataset has {} rows and {} columns",
        grouped(overview.total_rows),
        overview.total_columns
    ));
    facts.push(format!("Total of {} cells", grouped(overview.total_cells)));

    if overview.duplicate_rows > 0 {
        facts.push(format!(
            "Found {} duplicate rows",
            grouped(overview.duplicate_rows)
        ));
    }

    let quality = &result.data_quality;
    for item in quality.high_missing_columns.iter().take(MAX_HIGH_MISSING_FACTS) {
        facts.push(format!(
            "Column '{}' has {}% missing values",
            item.column,
            decimal(item.missing_pct)
        ));
    }

    if !quality.constant_columns.is_empty() {
        let names: Vec<&str> = quality
            .constant_columns
            .iter()
            .take(MAX_CONSTANT_COLUMNS)
            .map(String::as_str)
            .collect();
        facts.push(format!(
            "Constant columns (single value): {}",
            names.join(", ")
        ));
    }

    for (column, summary) in result.categorical_analysis.iter().take(MAX_CATEGORICAL_FACTS) {
        facts.push(format!(
            "Column '{}' has {} unique values",
            column,
            grouped(summary.unique_count)
        ));
        if !summary.top_value.is_empty() {
            facts.push(format!(
                "Most frequent value in '{}': '{}' ({}%)",
                column,
                summary.top_value,
                decimal(summary.top_pct)
            ));
        }
    }

    for (column, summary) in result.numeric_analysis.iter().take(MAX_NUMERIC_FACTS) {
        facts.push(format!(
            "Column '{}': mean={}, median={}, std={}",
            column,
            number(summary.mean, 2),
            number(summary.median, 2),
            number(summary.std, 2)
        ));
        if summary.outlier_count > 0 {
            facts.push(format!(
                "Column '{}' has {} outliers ({}% of data)",
                column,
                grouped(summary.outlier_count),
                decimal(summary.outlier_pct)
            ));
        }
    }

    if let Some(relationships) = &result.relationships {
        for entry in relationships
            .strong_correlations
            .iter()
            .take(MAX_CORRELATION_FACTS)
        {
            facts.push(format!(
                "Strong correlation between '{}' and '{}': r={}",
                entry.column_a,
                entry.column_b,
                decimal(entry.coefficient)
            ));
        }
    }

    Facts(facts)
}
