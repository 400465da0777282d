//! Descriptive statistics and IQR outliers for numeric columns.

use indexmap::IndexMap;

use super::quality::percentage;
use super::stats;
use crate::config::ProfilingConfig;
use crate::format::round_to;
use crate::inference::RoleMap;
use crate::input::Table;
use crate::model::{ColumnRole, NumericSummary};

/// Summarizes the leading numeric columns.
pub struct NumericProfiler {
    max_columns: usize,
    iqr_multiplier: f64,
}

impl NumericProfiler {
    /// Create a profiler with default settings.
    pub fn new() -> Self {
        Self::with_config(&ProfilingConfig::default())
    }

    /// Create a profiler using the settings in `config`.
    pub fn with_config(config: &ProfilingConfig) -> Self {
        Self {
            max_columns: config.max_numeric_columns,
            iqr_multiplier: config.iqr_multiplier,
        }
    }

    /// Profile the first numeric-role columns in table order.
    ///
    /// Columns with no non-missing values are left out of the result.
    pub fn profile(&self, table: &Table, roles: &RoleMap) -> IndexMap<String, NumericSummary> {
        table
            .columns()
            .iter()
            .filter(|c| roles.get(c.name()) == Some(&ColumnRole::Numeric))
            .take(self.max_columns)
            .filter_map(|c| {
                let summary = self.summarize(&c.numeric_values());
                if summary.is_none() {
                    tracing::debug!(column = c.name(), "no values to profile, skipping");
                }
                summary.map(|s| (c.name().to_string(), s))
            })
            .collect()
    }

    /// Summarize non-missing values, or `None` if there are none.
    pub fn summarize(&self, values: &[f64]) -> Option<NumericSummary> {
        let mean = stats::mean(values)?;
        let sorted = stats::sorted(values);

        let min = sorted[0];
        let max = sorted[sorted.len() - 1];
        let median = stats::quantile_sorted(&sorted, 0.5)?;
        let q25 = stats::quantile_sorted(&sorted, 0.25)?;
        let q75 = stats::quantile_sorted(&sorted, 0.75)?;

        // All-equal values: report exact zeros rather than rounding noise
        let constant = min == max;
        let std = if constant {
            0.0
        } else {
            stats::sample_std(values, mean).unwrap_or(0.0)
        };
        let (skewness, kurtosis) = if constant {
            (0.0, 0.0)
        } else {
            stats::shape_moments(values, mean)
        };

        let iqr = q75 - q25;
        let lower_bound = q25 - self.iqr_multiplier * iqr;
        let upper_bound = q75 + self.iqr_multiplier * iqr;
        let outlier_count = values
            .iter()
            .filter(|&&v| v < lower_bound || v > upper_bound)
            .count();

        Some(NumericSummary {
            count: values.len(),
            mean,
            median,
            std,
            min,
            max,
            q25,
            q75,
            iqr,
            outlier_count,
            outlier_pct: round_to(percentage(outlier_count, values.len()), 2),
            lower_bound,
            upper_bound,
            skewness,
            kurtosis,
        })
    }
}

impl Default for NumericProfiler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inference::RoleInferencer;
    use crate::input::Column;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_outlier_scenario() {
        let summary = NumericProfiler::new()
            .summarize(&[1.0, 2.0, 3.0, 4.0, 5.0, 100.0])
            .unwrap();

        assert!((summary.q25 - 2.25).abs() < EPS);
        assert!((summary.q75 - 4.75).abs() < EPS);
        assert!((summary.iqr - 2.5).abs() < EPS);
        assert!((summary.lower_bound - (-1.5)).abs() < EPS);
        assert!((summary.upper_bound - 8.5).abs() < EPS);
        assert_eq!(summary.outlier_count, 1);
        assert_eq!(summary.outlier_pct, 16.67);
        assert!(summary.is_outlier(100.0));
        assert_eq!(summary.min, 1.0);
        assert_eq!(summary.max, 100.0);
        assert!((summary.median - 3.5).abs() < EPS);
        assert!(summary.skewness > 1.0);
    }

    #[test]
    fn test_constant_column() {
        let summary = NumericProfiler::new().summarize(&[0.1, 0.1, 0.1, 0.1]).unwrap();

        assert_eq!(summary.std, 0.0);
        assert_eq!(summary.skewness, 0.0);
        assert_eq!(summary.kurtosis, 0.0);
        assert_eq!(summary.outlier_count, 0);
    }

    #[test]
    fn test_single_value() {
        let summary = NumericProfiler::new().summarize(&[42.0]).unwrap();
        assert_eq!(summary.count, 1);
        assert_eq!(summary.std, 0.0);
        assert_eq!(summary.median, 42.0);
    }

    #[test]
    fn test_empty_values() {
        assert!(NumericProfiler::new().summarize(&[]).is_none());
    }

    #[test]
    fn test_sample_std() {
        let summary = NumericProfiler::new()
            .summarize(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0])
            .unwrap();
        assert!((summary.mean - 5.0).abs() < EPS);
        assert!((summary.std - (32.0f64 / 7.0).sqrt()).abs() < EPS);
    }

    #[test]
    fn test_profile_skips_all_missing_and_respects_order() {
        let spread = |offset: i64| (0..40).map(move |i| Some((i % 12) + offset));
        let table = Table::new(vec![
            Column::integer("b", spread(0)),
            Column::float("hollow", std::iter::repeat(None).take(40)),
            Column::integer("a", spread(100)),
        ])
        .unwrap();

        let roles = RoleInferencer::new().infer(&table);
        assert_eq!(roles["hollow"], ColumnRole::Numeric);

        let profiles = NumericProfiler::new().profile(&table, &roles);
        let names: Vec<&str> = profiles.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["b", "a"]);
        assert_eq!(profiles["a"].count, 40);
    }

    #[test]
    fn test_column_cap() {
        let columns: Vec<Column> = (0..12)
            .map(|c| Column::integer(format!("n{}", c), (0..30).map(|i| Some(i % 5))))
            .collect();
        let table = Table::new(columns).unwrap();
        let roles = RoleInferencer::new().infer(&table);

        let profiles = NumericProfiler::new().profile(&table, &roles);
        assert_eq!(profiles.len(), 10);
        assert!(!profiles.contains_key("n10"));
    }
}
