//! Dataset-level results assembled from the profilers.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::summary::{CategoricalSummary, CorrelationEntry, NumericSummary, QualityFinding};
use super::types::ColumnRole;
use crate::facts::{Facts, extract_facts};
use crate::input::StorageType;

/// Basic facts about one column.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnOverview {
    pub name: String,
    pub storage: StorageType,
    pub role: ColumnRole,
    pub non_null_count: usize,
    pub null_count: usize,
    pub unique_count: usize,
    /// First few non-missing values, stringified.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sample_values: Vec<String>,
}

/// Shape and composition of the dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Overview {
    pub total_rows: usize,
    pub total_columns: usize,
    pub total_cells: usize,
    pub total_missing_cells: usize,
    /// Missing cells as a percentage of all cells (2 decimals).
    pub missing_pct: f64,
    pub duplicate_rows: usize,
    /// Role of every column, in table order.
    pub column_roles: IndexMap<String, ColumnRole>,
    pub columns: Vec<ColumnOverview>,
}

/// A column with more than the allowed share of missing values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighMissingColumn {
    pub column: String,
    pub missing_pct: f64,
}

/// A label column whose values are nearly all distinct.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HighCardinalityColumn {
    pub column: String,
    pub unique_count: usize,
    /// Distinct values per row (3 decimals).
    pub unique_ratio: f64,
}

/// Output of the quality audit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataQuality {
    /// Per-column finding, in table order.
    pub missing_by_column: IndexMap<String, QualityFinding>,
    pub high_missing_columns: Vec<HighMissingColumn>,
    pub constant_columns: Vec<String>,
    pub high_cardinality_columns: Vec<HighCardinalityColumn>,
    /// Rows identical to an earlier row across every column.
    pub duplicate_row_count: usize,
    /// Sentinel values present in a column that often stand in for "missing".
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub suspected_missing_codes: IndexMap<String, Vec<String>>,
    /// Columns whose names suggest personal or sensitive data.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sensitive_columns: Vec<String>,
}

/// Pearson coefficients keyed by column, then column. `None` means undefined.
pub type CorrelationMatrix = IndexMap<String, IndexMap<String, Option<f64>>>;

/// Correlation structure among numeric columns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Relationships {
    /// Full matrix (3 decimals).
    pub matrix: CorrelationMatrix,
    /// Strongest pairs, absolute coefficient descending.
    pub strong_correlations: Vec<CorrelationEntry>,
}

/// Everything one analysis run produces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub overview: Overview,
    pub data_quality: DataQuality,
    /// Summaries keyed by column; columns with no values are absent.
    pub categorical_analysis: IndexMap<String, CategoricalSummary>,
    /// Summaries keyed by column; columns with no values are absent.
    pub numeric_analysis: IndexMap<String, NumericSummary>,
    /// Present when at least two numeric columns exist.
    #[serde(default)]
    pub relationships: Option<Relationships>,
}

impl AnalysisResult {
    /// Flatten the result into grounded facts.
    pub fn facts(&self) -> Facts {
        extract_facts(self)
    }

    /// Role assigned to a column.
    pub fn role_of(&self, column: &str) -> Option<ColumnRole> {
        self.overview.column_roles.get(column).copied()
    }
}
