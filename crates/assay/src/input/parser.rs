//! CSV/TSV parser with delimiter detection and column typing.

use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;
use sha2::{Digest, Sha256};

use super::source::{Column, ColumnData, SourceMetadata, StorageType, Table};
use crate::error::{AssayError, Result};

/// Delimiters to try when auto-detecting.
const DELIMITERS: &[u8] = &[b'\t', b',', b';', b'|'];

/// Tokens read as a missing value (compared case-insensitively).
const MISSING_TOKENS: &[&str] = &["", "na", "n/a", "nan", "null", "none", "nil", "#n/a", "<na>"];

// Cheap pre-filter before handing a value to chrono.
static DATE_SHAPE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{4}[-/]\d{2}[-/]\d{2}|\d{2}/\d{2}/\d{4})([ T]\d{2}:\d{2}(:\d{2})?)?$")
        .expect("date shape pattern is valid")
});

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%Y/%m/%d %H:%M:%S",
    "%m/%d/%Y %H:%M:%S",
];

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];

/// Parser configuration.
#[derive(Debug, Clone)]
pub struct ParserConfig {
    /// Delimiter to use (None = auto-detect).
    pub delimiter: Option<u8>,
    /// Whether the file has a header row.
    pub has_header: bool,
    /// Maximum rows to read (None = all).
    pub max_rows: Option<usize>,
    /// Quote character.
    pub quote: u8,
    /// Type date-like text columns as datetime.
    pub detect_dates: bool,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            delimiter: None,
            has_header: true,
            max_rows: None,
            quote: b'"',
            detect_dates: true,
        }
    }
}

/// Parses tabular data files into typed tables.
pub struct Parser {
    config: ParserConfig,
}

impl Parser {
    /// Create a new parser with default configuration.
    pub fn new() -> Self {
        Self {
            config: ParserConfig::default(),
        }
    }

    /// Create a parser with custom configuration.
    pub fn with_config(config: ParserConfig) -> Self {
        Self { config }
    }

    /// Parse a file and return the table and its metadata.
    pub fn parse_file(&self, path: impl AsRef<Path>) -> Result<(Table, SourceMetadata)> {
        let path = path.as_ref();

        let mut file = File::open(path).map_err(|e| AssayError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        let mut contents = Vec::new();
        file.read_to_end(&mut contents).map_err(|e| AssayError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let size_bytes = contents.len() as u64;

        let mut hasher = Sha256::new();
        hasher.update(&contents);
        let hash = format!("sha256:{:x}", hasher.finalize());

        let delimiter = match self.config.delimiter {
            Some(d) => d,
            None => detect_delimiter(&contents)?,
        };
        tracing::debug!(
            path = %path.display(),
            delimiter = ?(delimiter as char),
            "parsing delimited file"
        );

        let table = self.parse_bytes(&contents, delimiter)?;

        let format = match delimiter {
            b'\t' => "tsv",
            b',' => "csv",
            b';' => "csv-semicolon",
            b'|' => "psv",
            _ => "delimited",
        }
        .to_string();

        let source_metadata = SourceMetadata::new(
            path.to_path_buf(),
            hash,
            size_bytes,
            format,
            table.row_count(),
            table.column_count(),
        );

        Ok((table, source_metadata))
    }

    /// Parse in-memory delimited text.
    pub fn parse_str(&self, data: &str) -> Result<Table> {
        let bytes = data.as_bytes();
        let delimiter = match self.config.delimiter {
            Some(d) => d,
            None => detect_delimiter(bytes)?,
        };
        self.parse_bytes(bytes, delimiter)
    }

    /// Parse bytes with a known delimiter.
    fn parse_bytes(&self, bytes: &[u8], delimiter: u8) -> Result<Table> {
        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(false)
            .quote(self.config.quote)
            .flexible(true)
            .from_reader(bytes);

        let mut records = reader.records();

        let first = match records.next() {
            Some(record) => record?,
            None => return Err(AssayError::EmptyData("No header or data rows found".to_string())),
        };

        let (headers, mut rows): (Vec<String>, Vec<Vec<String>>) = if self.config.has_header {
            (first.iter().map(|s| s.trim().to_string()).collect(), Vec::new())
        } else {
            let headers = (0..first.len()).map(|i| format!("column_{}", i + 1)).collect();
            (headers, vec![first.iter().map(|s| s.to_string()).collect()])
        };

        if headers.is_empty() {
            return Err(AssayError::EmptyData("No columns found".to_string()));
        }

        let expected_cols = headers.len();

        for result in records {
            if let Some(max) = self.config.max_rows {
                if rows.len() >= max {
                    break;
                }
            }

            let record = result?;
            let mut row: Vec<String> = record.iter().map(|s| s.to_string()).collect();

            // Pad short rows, truncate long ones
            row.resize(expected_cols, String::new());

            rows.push(row);
        }

        let columns = headers
            .into_iter()
            .enumerate()
            .map(|(index, name)| {
                let raw: Vec<&str> = rows.iter().map(|row| row[index].as_str()).collect();
                let column = self.build_column(name, &raw);
                tracing::trace!(
                    column = column.name(),
                    storage = ?column.storage_type(),
                    "typed column"
                );
                column
            })
            .collect();

        Table::new(columns)
    }

    /// Pick the narrowest storage type every non-missing value fits.
    fn build_column(&self, name: String, raw: &[&str]) -> Column {
        let values: Vec<Option<&str>> = raw
            .iter()
            .map(|v| {
                let trimmed = v.trim();
                (!is_missing_token(trimmed)).then_some(trimmed)
            })
            .collect();

        let storage = self.detect_storage(&values);

        let data = match storage {
            StorageType::Integer => {
                ColumnData::Integer(values.iter().map(|v| v.and_then(|s| s.parse().ok())).collect())
            }
            StorageType::Float => {
                ColumnData::Float(values.iter().map(|v| v.and_then(|s| s.parse().ok())).collect())
            }
            StorageType::Boolean => {
                ColumnData::Boolean(values.iter().map(|v| v.and_then(parse_bool)).collect())
            }
            StorageType::DateTime => {
                ColumnData::DateTime(values.iter().map(|v| v.and_then(parse_datetime)).collect())
            }
            StorageType::Text => ColumnData::Text(
                values
                    .iter()
                    .zip(raw)
                    .map(|(v, original)| v.map(|_| original.to_string()))
                    .collect(),
            ),
        };

        Column::new(name, data)
    }

    fn detect_storage(&self, values: &[Option<&str>]) -> StorageType {
        let present: Vec<&str> = values.iter().flatten().copied().collect();

        // Nothing to go on: all-missing columns stay text
        if present.is_empty() {
            return StorageType::Text;
        }

        if present.iter().all(|v| v.parse::<i64>().is_ok()) {
            return StorageType::Integer;
        }
        // `inf` and `NaN` parse as f64 but are not measurements
        if present
            .iter()
            .all(|v| v.parse::<f64>().is_ok_and(f64::is_finite))
        {
            return StorageType::Float;
        }
        if present.iter().all(|v| parse_bool(v).is_some()) {
            return StorageType::Boolean;
        }
        if self.config.detect_dates && present.iter().all(|v| parse_datetime(v).is_some()) {
            return StorageType::DateTime;
        }

        StorageType::Text
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

/// Check if a trimmed value represents a missing value.
pub fn is_missing_token(value: &str) -> bool {
    MISSING_TOKENS
        .iter()
        .any(|token| value.eq_ignore_ascii_case(token))
}

fn parse_bool(value: &str) -> Option<bool> {
    if value.eq_ignore_ascii_case("true") {
        Some(true)
    } else if value.eq_ignore_ascii_case("false") {
        Some(false)
    } else {
        None
    }
}

fn parse_datetime(value: &str) -> Option<NaiveDateTime> {
    if !DATE_SHAPE.is_match(value) {
        return None;
    }

    DATETIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

/// Detect the delimiter by analyzing the first few lines.
fn detect_delimiter(bytes: &[u8]) -> Result<u8> {
    let reader = BufReader::new(bytes);
    let lines: Vec<String> = reader
        .lines()
        .take(10)
        .filter_map(|l| l.ok())
        .filter(|l| !l.trim().is_empty())
        .collect();

    if lines.is_empty() {
        return Err(AssayError::EmptyData("No lines to analyze".to_string()));
    }

    let mut best_delimiter = b',';
    let mut best_score = 0;

    for &delim in DELIMITERS {
        let counts: Vec<usize> = lines
            .iter()
            .map(|line| count_delimiter_in_line(line, delim))
            .collect();

        let first_count = counts[0];
        if first_count == 0 {
            continue;
        }

        let consistent = counts.iter().all(|&c| c == first_count);
        let variance: f64 = if counts.len() > 1 {
            let mean = counts.iter().sum::<usize>() as f64 / counts.len() as f64;
            counts.iter().map(|&c| (c as f64 - mean).powi(2)).sum::<f64>() / counts.len() as f64
        } else {
            0.0
        };

        // Higher count with lower variance wins; tab gets a small bonus
        let score = if consistent {
            first_count * 1000 + (if delim == b'\t' { 100 } else { 0 })
        } else if variance < 1.0 {
            first_count * 100
        } else {
            first_count
        };

        if score > best_score {
            best_score = score;
            best_delimiter = delim;
        }
    }

    Ok(best_delimiter)
}

/// Count delimiter occurrences in a line, respecting quotes.
fn count_delimiter_in_line(line: &str, delimiter: u8) -> usize {
    let delim_char = delimiter as char;
    let mut count = 0;
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            c if c == delim_char && !in_quotes => count += 1,
            _ => {}
        }
    }

    count
}
