//! Frequency profiles for categorical and binary columns.

use indexmap::IndexMap;

use super::quality::percentage;
use crate::config::ProfilingConfig;
use crate::format::round_to;
use crate::inference::RoleMap;
use crate::input::{Column, Table};
use crate::model::{CategoricalSummary, ValueFrequency};

/// Builds value distributions for the leading categorical columns.
pub struct CategoricalProfiler {
    max_columns: usize,
    max_distribution_entries: usize,
}

impl CategoricalProfiler {
    /// Create a profiler with default caps.
    pub fn new() -> Self {
        Self::with_config(&ProfilingConfig::default())
    }

    /// Create a profiler using the caps in `config`.
    pub fn with_config(config: &ProfilingConfig) -> Self {
        Self {
            max_columns: config.max_categorical_columns,
            max_distribution_entries: config.max_distribution_entries,
        }
    }

    /// Profile the first categorical/binary columns in table order.
    ///
    /// Columns without any non-missing value are left out of the result.
    pub fn profile(&self, table: &Table, roles: &RoleMap) -> IndexMap<String, CategoricalSummary> {
        table
            .columns()
            .iter()
            .filter(|c| roles.get(c.name()).is_some_and(|r| r.is_categorical()))
            .take(self.max_columns)
            .filter_map(|c| {
                let summary = self.summarize(c);
                if summary.is_none() {
                    tracing::debug!(column = c.name(), "no values to profile, skipping");
                }
                summary.map(|s| (c.name().to_string(), s))
            })
            .collect()
    }

    /// Summarize one column, or `None` if every value is missing.
    pub fn summarize(&self, column: &Column) -> Option<CategoricalSummary> {
        let counts = value_counts(column);
        let total: usize = counts.iter().map(|(_, count)| count).sum();
        let (top_value, top_count) = counts.first().cloned()?;

        let distribution = counts
            .iter()
            .take(self.max_distribution_entries)
            .map(|(value, count)| ValueFrequency {
                value: value.clone(),
                count: *count,
                pct: round_to(percentage(*count, total), 2),
            })
            .collect();

        Some(CategoricalSummary {
            unique_count: counts.len(),
            top_value,
            top_count,
            top_pct: round_to(percentage(top_count, total), 2),
            distribution,
        })
    }
}

impl Default for CategoricalProfiler {
    fn default() -> Self {
        Self::new()
    }
}

/// Stringified value counts, count descending, first-seen order on ties.
pub fn value_counts(column: &Column) -> Vec<(String, usize)> {
    let mut counts: IndexMap<String, usize> = IndexMap::new();
    for cell in column.present() {
        *counts.entry(cell.to_string()).or_insert(0) += 1;
    }

    let mut counts: Vec<(String, usize)> = counts.into_iter().collect();
    // Stable sort keeps insertion order among equal counts
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inference::RoleInferencer;
    use crate::model::ColumnRole;

    #[test]
    fn test_top_value_scenario() {
        let col = Column::text("grade", [Some("A"), Some("A"), Some("A"), Some("B")]);
        let summary = CategoricalProfiler::new().summarize(&col).unwrap();

        assert_eq!(summary.top_value, "A");
        assert_eq!(summary.top_count, 3);
        assert_eq!(summary.top_pct, 75.0);
        assert_eq!(summary.unique_count, 2);
        assert_eq!(summary.distribution[1].value, "B");
        assert_eq!(summary.distribution[1].pct, 25.0);
    }

    #[test]
    fn test_ties_keep_first_seen_order() {
        let col = Column::text("c", [Some("x"), Some("y"), Some("z"), Some("y"), Some("x")]);
        let counts = value_counts(&col);
        assert_eq!(
            counts,
            vec![("x".to_string(), 2), ("y".to_string(), 2), ("z".to_string(), 1)]
        );
    }

    #[test]
    fn test_percentages_ignore_missing() {
        let col = Column::text("c", [Some("a"), None, None, Some("b")]);
        let summary = CategoricalProfiler::new().summarize(&col).unwrap();
        assert_eq!(summary.top_pct, 50.0);
    }

    #[test]
    fn test_distribution_capped() {
        let values = (0..15).flat_map(|i| std::iter::repeat(Some(format!("v{}", i))).take(15 - i));
        let col = Column::text("many", values);
        let summary = CategoricalProfiler::new().summarize(&col).unwrap();

        assert_eq!(summary.unique_count, 15);
        assert_eq!(summary.distribution.len(), 10);
        assert_eq!(summary.distribution[0].value, "v0");
        assert_eq!(summary.distribution[9].value, "v9");
    }

    #[test]
    fn test_all_missing_is_skipped() {
        let col = Column::text::<String>("empty", [None, None]);
        assert!(CategoricalProfiler::new().summarize(&col).is_none());
    }

    #[test]
    fn test_binary_numeric_values_are_stringified() {
        let col = Column::integer("flag", [Some(1), Some(0), Some(1)]);
        let summary = CategoricalProfiler::new().summarize(&col).unwrap();
        assert_eq!(summary.top_value, "1");
        assert_eq!(summary.top_count, 2);
        assert_eq!(summary.top_pct, 66.67);
    }

    #[test]
    fn test_column_cap_and_selection() {
        let mut columns = Vec::new();
        for i in 0..7 {
            columns.push(Column::text(format!("cat{}", i), [Some("a"), Some("b"), Some("a")]));
        }
        columns.insert(2, Column::float("x", [Some(1.5), Some(2.5), Some(3.5)]));
        let table = Table::new(columns).unwrap();

        let roles = RoleInferencer::new().infer(&table);
        assert_eq!(roles["x"], ColumnRole::Identifier);

        let profiles = CategoricalProfiler::new().profile(&table, &roles);
        let names: Vec<&str> = profiles.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["cat0", "cat1", "cat2", "cat3", "cat4"]);
    }
}
