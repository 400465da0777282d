//! Optional data dictionary accompanying a dataset.
//!
//! The profiling engine never reads the dictionary; it is carried alongside
//! the analysis so whoever consumes the report can use it.

use std::fs::{self, File};
use std::io::BufReader;
use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{AssayError, Result};

/// A loaded data dictionary, kept in the shape it was written in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "content", rename_all = "snake_case")]
pub enum DataDictionary {
    /// Arbitrary JSON document.
    Json(serde_json::Value),
    /// One record per row of a CSV dictionary, keyed by its header.
    Records(Vec<IndexMap<String, String>>),
    /// Free-form text or Markdown.
    Text(String),
}

impl DataDictionary {
    /// Load a dictionary, choosing the reader from the file extension.
    ///
    /// Supports `.json`, `.csv`, `.txt` and `.md`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        let io_err = |e| AssayError::Io {
            path: path.to_path_buf(),
            source: e,
        };

        let dictionary = match extension.as_str() {
            "json" => {
                let file = File::open(path).map_err(io_err)?;
                DataDictionary::Json(serde_json::from_reader(BufReader::new(file))?)
            }
            "csv" => {
                let mut reader = csv::Reader::from_path(path)?;
                let headers: Vec<String> = reader.headers()?.iter().map(String::from).collect();
                let mut records = Vec::new();
                for record in reader.records() {
                    let record = record?;
                    records.push(
                        headers
                            .iter()
                            .cloned()
                            .zip(record.iter().map(String::from))
                            .collect(),
                    );
                }
                DataDictionary::Records(records)
            }
            "txt" | "md" => DataDictionary::Text(fs::read_to_string(path).map_err(io_err)?),
            other => {
                return Err(AssayError::UnsupportedFormat(format!(
                    "data dictionary with extension '{}'",
                    other
                )));
            }
        };

        tracing::debug!(path = %path.display(), "loaded data dictionary");
        Ok(dictionary)
    }
}
