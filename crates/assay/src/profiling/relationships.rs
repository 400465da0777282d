//! Pairwise correlation among numeric columns.

use indexmap::IndexMap;

use super::stats::pearson_pairwise;
use crate::config::ProfilingConfig;
use crate::format::round_to;
use crate::inference::RoleMap;
use crate::input::Table;
use crate::model::{ColumnRole, CorrelationEntry, CorrelationMatrix, Relationships};

/// Computes the correlation matrix and the strongest pairs.
pub struct RelationshipProfiler {
    strong_threshold: f64,
    max_strong: usize,
}

impl RelationshipProfiler {
    /// Create a profiler with default settings.
    pub fn new() -> Self {
        Self::with_config(&ProfilingConfig::default())
    }

    /// Create a profiler using the settings in `config`.
    pub fn with_config(config: &ProfilingConfig) -> Self {
        Self {
            strong_threshold: config.strong_correlation_threshold,
            max_strong: config.max_strong_correlations,
        }
    }

    /// Correlate every numeric-role column with every other.
    ///
    /// Returns `None` with fewer than two numeric columns.
    pub fn profile(&self, table: &Table, roles: &RoleMap) -> Option<Relationships> {
        let columns: Vec<(&str, Vec<Option<f64>>)> = table
            .columns()
            .iter()
            .filter(|c| roles.get(c.name()) == Some(&ColumnRole::Numeric))
            .map(|c| (c.name(), c.numeric_cells()))
            .collect();

        if columns.len() < 2 {
            return None;
        }

        let k = columns.len();
        let mut coefficients = vec![vec![None; k]; k];
        for i in 0..k {
            for j in i..k {
                let r = pearson_pairwise(&columns[i].1, &columns[j].1);
                coefficients[i][j] = r;
                coefficients[j][i] = r;
            }
        }

        let matrix: CorrelationMatrix = columns
            .iter()
            .enumerate()
            .map(|(i, (a, _))| {
                let row = columns
                    .iter()
                    .enumerate()
                    .map(|(j, (b, _))| (b.to_string(), coefficients[i][j].map(|r| round_to(r, 3))))
                    .collect();
                (a.to_string(), row)
            })
            .collect();

        let mut strong_correlations = Vec::new();
        for i in 0..k {
            for j in (i + 1)..k {
                // Threshold applies to the reported (rounded) value
                if let Some(r) = coefficients[i][j].map(|r| round_to(r, 3)) {
                    if r.abs() > self.strong_threshold {
                        strong_correlations.push(CorrelationEntry {
                            column_a: columns[i].0.to_string(),
                            column_b: columns[j].0.to_string(),
                            coefficient: r,
                        });
                    }
                }
            }
        }

        // Stable: equal magnitudes keep column-pair order
        strong_correlations.sort_by(|a, b| {
            b.coefficient
                .abs()
                .partial_cmp(&a.coefficient.abs())
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        strong_correlations.truncate(self.max_strong);

        tracing::debug!(
            columns = k,
            strong = strong_correlations.len(),
            "computed correlations"
        );

        Some(Relationships {
            matrix,
            strong_correlations,
        })
    }
}

impl Default for RelationshipProfiler {
    fn default() -> Self {
        Self::new()
    }
}

/// Look up a coefficient in a matrix by column names.
pub fn coefficient(matrix: &CorrelationMatrix, a: &str, b: &str) -> Option<f64> {
    matrix.get(a)?.get(b).copied().flatten()
}
