//! Column role inference from storage type and cardinality.

use indexmap::IndexMap;

use crate::config::ProfilingConfig;
use crate::input::{Column, StorageType, Table};
use crate::model::ColumnRole;

/// Column name to role, in table order.
pub type RoleMap = IndexMap<String, ColumnRole>;

/// Assigns a [`ColumnRole`] to every column.
pub struct RoleInferencer {
    categorical_max_unique: usize,
    categorical_max_ratio: f64,
    identifier_ratio: f64,
}

impl RoleInferencer {
    /// Create an inferencer with default thresholds.
    pub fn new() -> Self {
        Self::with_config(&ProfilingConfig::default())
    }

    /// Create an inferencer using the thresholds in `config`.
    pub fn with_config(config: &ProfilingConfig) -> Self {
        Self {
            categorical_max_unique: config.categorical_max_unique,
            categorical_max_ratio: config.categorical_max_ratio,
            identifier_ratio: config.identifier_ratio,
        }
    }

    /// Infer the role of every column in the table.
    pub fn infer(&self, table: &Table) -> RoleMap {
        table
            .columns()
            .iter()
            .map(|column| (column.name().to_string(), self.infer_column(column)))
            .collect()
    }

    /// Infer the role of a single column.
    pub fn infer_column(&self, column: &Column) -> ColumnRole {
        let rows = column.len();
        if rows == 0 {
            return ColumnRole::Text;
        }

        self.classify(column.storage_type(), column.unique_count(), rows)
    }

    fn classify(&self, storage: StorageType, unique: usize, rows: usize) -> ColumnRole {
        let n = rows as f64;
        let u = unique as f64;

        if storage.is_numeric() {
            if unique == 2 {
                ColumnRole::Binary
            } else if unique == rows || u > self.identifier_ratio * n {
                ColumnRole::Identifier
            } else {
                ColumnRole::Numeric
            }
        } else if storage.is_temporal() {
            ColumnRole::Datetime
        } else if unique <= self.categorical_max_unique || u < self.categorical_max_ratio * n {
            ColumnRole::Categorical
        } else if unique == rows {
            ColumnRole::Identifier
        } else {
            ColumnRole::Text
        }
    }
}

impl Default for RoleInferencer {
    fn default() -> Self {
        Self::new()
    }
}
