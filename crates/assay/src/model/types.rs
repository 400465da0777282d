//! Core type definitions for column classification.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Semantic role of a column, assigned once per analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnRole {
    /// Continuous or count-like numbers.
    Numeric,
    /// Low-cardinality labels.
    Categorical,
    /// Numbers taking exactly two distinct values.
    Binary,
    /// Dates and timestamps.
    Datetime,
    /// Row identifiers (nearly every value distinct).
    Identifier,
    /// Free text.
    Text,
}

impl ColumnRole {
    /// Roles covered by the categorical profiler.
    pub fn is_categorical(&self) -> bool {
        matches!(self, ColumnRole::Categorical | ColumnRole::Binary)
    }

    /// Roles eligible for the high-cardinality check.
    pub fn is_label(&self) -> bool {
        matches!(self, ColumnRole::Categorical | ColumnRole::Text)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnRole::Numeric => "numeric",
            ColumnRole::Categorical => "categorical",
            ColumnRole::Binary => "binary",
            ColumnRole::Datetime => "datetime",
            ColumnRole::Identifier => "identifier",
            ColumnRole::Text => "text",
        }
    }
}

impl fmt::Display for ColumnRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}
