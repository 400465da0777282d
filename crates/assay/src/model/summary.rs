//! Per-column summaries produced by the profilers.

use serde::{Deserialize, Serialize};

/// Missingness and cardinality flags for one column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityFinding {
    /// Number of missing cells.
    pub missing_count: usize,
    /// Missing cells as a percentage of rows (0-100, 2 decimals).
    pub missing_pct: f64,
    /// Number of distinct non-missing values.
    pub unique_count: usize,
    /// Exactly one distinct non-missing value.
    pub is_constant: bool,
    /// Label column whose values are nearly all distinct.
    pub is_high_cardinality: bool,
}

/// One row of a value distribution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueFrequency {
    pub value: String,
    pub count: usize,
    /// Share of non-missing values (2 decimals).
    pub pct: f64,
}

/// Frequency profile of a categorical or binary column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoricalSummary {
    /// Number of distinct non-missing values.
    pub unique_count: usize,
    /// Most frequent value (first seen wins ties).
    pub top_value: String,
    pub top_count: usize,
    /// Share of non-missing values held by the top value (2 decimals).
    pub top_pct: f64,
    /// Most frequent values, count descending.
    pub distribution: Vec<ValueFrequency>,
}

/// Descriptive statistics for a numeric column, over non-missing values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumericSummary {
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    /// Sample standard deviation.
    pub std: f64,
    pub min: f64,
    pub max: f64,
    /// First quartile (25th percentile).
    pub q25: f64,
    /// Third quartile (75th percentile).
    pub q75: f64,
    /// Interquartile range, `q75 - q25`.
    pub iqr: f64,
    /// Values strictly outside `[lower_bound, upper_bound]`.
    pub outlier_count: usize,
    /// Outliers as a percentage of `count` (2 decimals).
    pub outlier_pct: f64,
    pub lower_bound: f64,
    pub upper_bound: f64,
    pub skewness: f64,
    /// Excess kurtosis (normal distribution = 0).
    pub kurtosis: f64,
}

impl NumericSummary {
    /// Check if a value falls outside the IQR fences.
    pub fn is_outlier(&self, value: f64) -> bool {
        value < self.lower_bound || value > self.upper_bound
    }
}

/// A strongly correlated pair of numeric columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationEntry {
    /// Earlier column in table order.
    pub column_a: String,
    /// Later column in table order.
    pub column_b: String,
    /// Pearson coefficient (3 decimals).
    pub coefficient: f64,
}
