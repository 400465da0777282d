//! Data quality audit: missingness, constants, cardinality and duplicates.

use std::collections::HashSet;

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::ProfilingConfig;
use crate::format::round_to;
use crate::inference::RoleMap;
use crate::input::{Cell, Column, Table};
use crate::model::{
    ColumnRole, DataQuality, HighCardinalityColumn, HighMissingColumn, QualityFinding,
};

// =============================================================================
// SENTINEL AND NAME PATTERNS
// =============================================================================

/// Numeric values commonly used as "no data" codes.
const NUMERIC_MISSING_CODES: &[f64] = &[-999.0, -99.0, -1.0, 999.0, 9999.0];

/// Text values commonly used as "no data" codes (compared trimmed, lowercase).
const TEXT_MISSING_CODES: &[&str] = &["", "unknown", "none", "n/a", "na", "null", "nan"];

static SENSITIVE_NAME_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"ssn|social.security",
        r"email",
        r"phone|tel|mobile",
        r"address|street|zip",
        r"credit|card|account",
        r"password|pwd",
        r"dob|birth.date",
        r"license|passport",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("sensitive name pattern is valid"))
    .collect()
});

/// Computes per-column and table-wide quality signals.
pub struct QualityAuditor {
    high_missing_pct: f64,
    high_cardinality_ratio: f64,
}

impl QualityAuditor {
    /// Create an auditor with default thresholds.
    pub fn new() -> Self {
        Self::with_config(&ProfilingConfig::default())
    }

    /// Create an auditor using the thresholds in `config`.
    pub fn with_config(config: &ProfilingConfig) -> Self {
        Self {
            high_missing_pct: config.high_missing_pct,
            high_cardinality_ratio: config.high_cardinality_ratio,
        }
    }

    /// Audit every column of the table.
    pub fn audit(&self, table: &Table, roles: &RoleMap) -> DataQuality {
        let rows = table.row_count();

        let mut missing_by_column = IndexMap::new();
        let mut high_missing_columns = Vec::new();
        let mut constant_columns = Vec::new();
        let mut high_cardinality_columns = Vec::new();
        let mut suspected_missing_codes = IndexMap::new();
        let mut sensitive_columns = Vec::new();

        for column in table.columns() {
            let name = column.name().to_string();
            let role = roles.get(column.name()).copied().unwrap_or(ColumnRole::Text);

            let missing_count = column.missing_count();
            let exact_missing_pct = percentage(missing_count, rows);
            let missing_pct = round_to(exact_missing_pct, 2);
            let unique_count = column.unique_count();
            let is_constant = unique_count == 1;

            let unique_ratio = if rows == 0 {
                0.0
            } else {
                unique_count as f64 / rows as f64
            };
            let is_high_cardinality = role.is_label() && unique_ratio > self.high_cardinality_ratio;

            if exact_missing_pct > self.high_missing_pct {
                high_missing_columns.push(HighMissingColumn {
                    column: name.clone(),
                    missing_pct,
                });
            }
            if is_constant {
                constant_columns.push(name.clone());
            }
            if is_high_cardinality {
                high_cardinality_columns.push(HighCardinalityColumn {
                    column: name.clone(),
                    unique_count,
                    unique_ratio: round_to(unique_ratio, 3),
                });
            }

            let codes = missing_codes(column);
            if !codes.is_empty() {
                suspected_missing_codes.insert(name.clone(), codes);
            }
            if is_sensitive_name(column.name()) {
                sensitive_columns.push(name.clone());
            }

            tracing::trace!(
                column = %name,
                missing_count,
                unique_count,
                is_constant,
                is_high_cardinality,
                "audited column"
            );

            missing_by_column.insert(
                name,
                QualityFinding {
                    missing_count,
                    missing_pct,
                    unique_count,
                    is_constant,
                    is_high_cardinality,
                },
            );
        }

        DataQuality {
            missing_by_column,
            high_missing_columns,
            constant_columns,
            high_cardinality_columns,
            duplicate_row_count: duplicate_row_count(table),
            suspected_missing_codes,
            sensitive_columns,
        }
    }
}

impl Default for QualityAuditor {
    fn default() -> Self {
        Self::new()
    }
}

/// `100 * part / whole`, or 0 when `whole` is 0.
pub(crate) fn percentage(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64 * 100.0
    }
}

/// Rows identical to some earlier row across all columns.
pub fn duplicate_row_count(table: &Table) -> usize {
    if table.column_count() == 0 {
        return 0;
    }

    let mut seen = HashSet::with_capacity(table.row_count());
    (0..table.row_count())
        .filter(|&row| !seen.insert(table.row_key(row)))
        .count()
}

/// Sentinel values present in the column, in first-seen order.
fn missing_codes(column: &Column) -> Vec<String> {
    let mut found: Vec<String> = Vec::new();

    for cell in column.present() {
        let is_code = match cell {
            Cell::Text(s) => {
                let lower = s.trim().to_lowercase();
                TEXT_MISSING_CODES.contains(&lower.as_str())
            }
            other => other
                .as_f64()
                .is_some_and(|v| NUMERIC_MISSING_CODES.contains(&v)),
        };

        if is_code {
            let text = cell.to_string();
            if !found.contains(&text) {
                found.push(text);
            }
        }
    }

    found
}

/// Whether a column name looks like it holds personal data.
pub fn is_sensitive_name(name: &str) -> bool {
    let lower = name.to_lowercase();
    SENSITIVE_NAME_PATTERNS.iter().any(|p| p.is_match(&lower))
}
