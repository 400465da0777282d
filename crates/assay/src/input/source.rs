//! In-memory table model and source metadata.

use std::collections::HashSet;
use std::fmt;
use std::path::PathBuf;

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{AssayError, Result};
use crate::format;

/// Metadata about the source data file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceMetadata {
    /// File name without path.
    pub file: String,
    /// Full path to the file.
    pub path: PathBuf,
    /// SHA-256 hash of the file contents.
    pub hash: String,
    /// File size in bytes.
    pub size_bytes: u64,
    /// Detected format (csv, tsv, etc.).
    pub format: String,
    /// Detected encoding.
    pub encoding: String,
    /// Number of data rows (excluding header).
    pub row_count: usize,
    /// Number of columns.
    pub column_count: usize,
    /// When the file was loaded.
    pub analyzed_at: DateTime<Utc>,
}

impl SourceMetadata {
    /// Create metadata for a file that has been loaded.
    pub fn new(
        path: PathBuf,
        hash: String,
        size_bytes: u64,
        format: String,
        row_count: usize,
        column_count: usize,
    ) -> Self {
        let file = path
            .file_name()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();

        Self {
            file,
            path,
            hash,
            size_bytes,
            format,
            encoding: "utf-8".to_string(),
            row_count,
            column_count,
            analyzed_at: Utc::now(),
        }
    }
}

/// Physical storage type of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageType {
    /// Whole numbers.
    Integer,
    /// Floating-point numbers.
    Float,
    /// Boolean values, profiled as 0/1.
    Boolean,
    /// Date and/or time values.
    DateTime,
    /// Text/string values.
    Text,
}

impl StorageType {
    /// Returns true if values can be treated as numbers.
    pub fn is_numeric(&self) -> bool {
        matches!(
            self,
            StorageType::Integer | StorageType::Float | StorageType::Boolean
        )
    }

    /// Returns true if this type is temporal.
    pub fn is_temporal(&self) -> bool {
        matches!(self, StorageType::DateTime)
    }
}

/// Typed cell storage for one column. `None` marks a missing value.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnData {
    Integer(Vec<Option<i64>>),
    Float(Vec<Option<f64>>),
    Boolean(Vec<Option<bool>>),
    DateTime(Vec<Option<NaiveDateTime>>),
    Text(Vec<Option<String>>),
}

impl ColumnData {
    fn len(&self) -> usize {
        match self {
            ColumnData::Integer(v) => v.len(),
            ColumnData::Float(v) => v.len(),
            ColumnData::Boolean(v) => v.len(),
            ColumnData::DateTime(v) => v.len(),
            ColumnData::Text(v) => v.len(),
        }
    }

    fn storage_type(&self) -> StorageType {
        match self {
            ColumnData::Integer(_) => StorageType::Integer,
            ColumnData::Float(_) => StorageType::Float,
            ColumnData::Boolean(_) => StorageType::Boolean,
            ColumnData::DateTime(_) => StorageType::DateTime,
            ColumnData::Text(_) => StorageType::Text,
        }
    }
}

/// Borrowed view of a single value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Cell<'a> {
    Integer(i64),
    Float(f64),
    Boolean(bool),
    DateTime(NaiveDateTime),
    Text(&'a str),
    Missing,
}

impl<'a> Cell<'a> {
    /// Returns true for the missing marker.
    pub fn is_missing(&self) -> bool {
        matches!(self, Cell::Missing)
    }

    /// Numeric value for numeric storage; booleans map to 0/1.
    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            Cell::Integer(v) => Some(v as f64),
            Cell::Float(v) => Some(v),
            Cell::Boolean(v) => Some(if v { 1.0 } else { 0.0 }),
            _ => None,
        }
    }

    /// Hashable identity used for distinct counts and duplicate detection.
    pub fn key(&self) -> CellKey<'a> {
        match *self {
            Cell::Integer(v) => CellKey::Integer(v),
            // -0.0 and 0.0 are the same value
            Cell::Float(v) => CellKey::Float(if v == 0.0 { 0u64 } else { v.to_bits() }),
            Cell::Boolean(v) => CellKey::Boolean(v),
            Cell::DateTime(v) => CellKey::DateTime(v),
            Cell::Text(v) => CellKey::Text(v),
            Cell::Missing => CellKey::Missing,
        }
    }
}

impl fmt::Display for Cell<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Integer(v) => write!(f, "{}", v),
            Cell::Float(v) => f.write_str(&format::decimal(*v)),
            Cell::Boolean(v) => write!(f, "{}", v),
            Cell::DateTime(v) => write!(f, "{}", v.format("%Y-%m-%d %H:%M:%S")),
            Cell::Text(v) => f.write_str(v),
            Cell::Missing => Ok(()),
        }
    }
}

/// Hashable form of a [`Cell`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellKey<'a> {
    Integer(i64),
    Float(u64),
    Boolean(bool),
    DateTime(NaiveDateTime),
    Text(&'a str),
    Missing,
}

/// A named column of typed values.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    name: String,
    data: ColumnData,
}

impl Column {
    /// Create a column from typed data. Non-finite floats (`NaN`, `inf`) become missing.
    pub fn new(name: impl Into<String>, data: ColumnData) -> Self {
        let data = match data {
            ColumnData::Float(values) => ColumnData::Float(
                values
                    .into_iter()
                    .map(|v| v.filter(|x| x.is_finite()))
                    .collect(),
            ),
            other => other,
        };
        Self {
            name: name.into(),
            data,
        }
    }

    pub fn integer(name: impl Into<String>, values: impl IntoIterator<Item = Option<i64>>) -> Self {
        Self::new(name, ColumnData::Integer(values.into_iter().collect()))
    }

    pub fn float(name: impl Into<String>, values: impl IntoIterator<Item = Option<f64>>) -> Self {
        Self::new(name, ColumnData::Float(values.into_iter().collect()))
    }

    pub fn boolean(name: impl Into<String>, values: impl IntoIterator<Item = Option<bool>>) -> Self {
        Self::new(name, ColumnData::Boolean(values.into_iter().collect()))
    }

    pub fn datetime(
        name: impl Into<String>,
        values: impl IntoIterator<Item = Option<NaiveDateTime>>,
    ) -> Self {
        Self::new(name, ColumnData::DateTime(values.into_iter().collect()))
    }

    pub fn text<S: Into<String>>(
        name: impl Into<String>,
        values: impl IntoIterator<Item = Option<S>>,
    ) -> Self {
        Self::new(
            name,
            ColumnData::Text(values.into_iter().map(|v| v.map(Into::into)).collect()),
        )
    }

    /// Column name.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn storage_type(&self) -> StorageType {
        self.data.storage_type()
    }

    /// Number of rows, missing included.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Value at a row index; out-of-range reads as missing.
    pub fn cell(&self, row: usize) -> Cell<'_> {
        let cell = match &self.data {
            ColumnData::Integer(v) => v.get(row).copied().flatten().map(Cell::Integer),
            ColumnData::Float(v) => v.get(row).copied().flatten().map(Cell::Float),
            ColumnData::Boolean(v) => v.get(row).copied().flatten().map(Cell::Boolean),
            ColumnData::DateTime(v) => v.get(row).copied().flatten().map(Cell::DateTime),
            ColumnData::Text(v) => v
                .get(row)
                .and_then(|s| s.as_deref())
                .map(Cell::Text),
        };
        cell.unwrap_or(Cell::Missing)
    }

    /// All cells in row order.
    pub fn cells(&self) -> impl Iterator<Item = Cell<'_>> + '_ {
        (0..self.len()).map(move |row| self.cell(row))
    }

    /// Non-missing cells in row order.
    pub fn present(&self) -> impl Iterator<Item = Cell<'_>> + '_ {
        self.cells().filter(|c| !c.is_missing())
    }

    pub fn missing_count(&self) -> usize {
        self.cells().filter(Cell::is_missing).count()
    }

    /// Number of distinct non-missing values.
    pub fn unique_count(&self) -> usize {
        self.present().map(|c| c.key()).collect::<HashSet<_>>().len()
    }

    /// Per-row numeric values (`None` for missing or non-numeric storage).
    pub fn numeric_cells(&self) -> Vec<Option<f64>> {
        self.cells().map(|c| c.as_f64()).collect()
    }

    /// Non-missing numeric values in row order.
    pub fn numeric_values(&self) -> Vec<f64> {
        self.present().filter_map(|c| c.as_f64()).collect()
    }
}

/// An ordered set of equally long, uniquely named columns.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    columns: Vec<Column>,
    row_count: usize,
}

impl Table {
    /// Assemble a table, checking names are unique and lengths agree.
    pub fn new(columns: Vec<Column>) -> Result<Self> {
        let row_count = columns.first().map(Column::len).unwrap_or(0);

        let mut seen = HashSet::new();
        for column in &columns {
            if !seen.insert(column.name()) {
                return Err(AssayError::DuplicateColumn(column.name().to_string()));
            }
            if column.len() != row_count {
                return Err(AssayError::ColumnLength {
                    column: column.name().to_string(),
                    expected: row_count,
                    found: column.len(),
                });
            }
        }

        Ok(Self { columns, row_count })
    }

    /// Get the number of columns.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Get the number of rows.
    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Get all column names in order.
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(Column::name).collect()
    }

    /// Get a specific cell value.
    pub fn get(&self, row: usize, col: usize) -> Option<Cell<'_>> {
        if row >= self.row_count {
            return None;
        }
        self.columns.get(col).map(|c| c.cell(row))
    }

    /// Hashable identity of a whole row.
    pub fn row_key(&self, row: usize) -> Vec<CellKey<'_>> {
        self.columns.iter().map(|c| c.cell(row).key()).collect()
    }

    /// Total number of missing cells across the table.
    pub fn missing_cell_count(&self) -> usize {
        self.columns.iter().map(Column::missing_count).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_rejects_length_mismatch() {
        let err = Table::new(vec![
            Column::integer("a", [Some(1), Some(2)]),
            Column::integer("b", [Some(1)]),
        ])
        .unwrap_err();

        assert!(matches!(err, AssayError::ColumnLength { expected: 2, found: 1, .. }));
    }

    #[test]
    fn test_table_rejects_duplicate_names() {
        let err = Table::new(vec![
            Column::integer("a", [Some(1)]),
            Column::text("a", [Some("x")]),
        ])
        .unwrap_err();

        assert!(matches!(err, AssayError::DuplicateColumn(name) if name == "a"));
    }

    #[test]
    fn test_non_finite_is_missing() {
        let col = Column::float(
            "x",
            [Some(1.0), Some(f64::NAN), None, Some(f64::INFINITY), Some(f64::NEG_INFINITY)],
        );
        assert_eq!(col.len(), 5);
        assert!(!col.is_empty());
        assert_eq!(col.missing_count(), 4);
        assert_eq!(col.numeric_values(), vec![1.0]);
    }

    #[test]
    fn test_unique_count_ignores_missing() {
        let col = Column::text("c", [Some("A"), None, Some("A"), Some("B")]);
        assert_eq!(col.unique_count(), 2);

        let col = Column::float("f", [Some(0.0), Some(-0.0)]);
        assert_eq!(col.unique_count(), 1);
    }

    #[test]
    fn test_cell_display() {
        assert_eq!(Cell::Integer(3).to_string(), "3");
        assert_eq!(Cell::Float(1.0).to_string(), "1.0");
        assert_eq!(Cell::Float(2.5).to_string(), "2.5");
        assert_eq!(Cell::Boolean(true).to_string(), "true");
        assert_eq!(Cell::Text("CD").to_string(), "CD");
    }

    #[test]
    fn test_boolean_as_numeric() {
        let col = Column::boolean("flag", [Some(true), Some(false), None]);
        assert!(col.storage_type().is_numeric());
        assert_eq!(col.numeric_values(), vec![1.0, 0.0]);
    }
}
