//! Assay: statistical profiling and grounded fact extraction for tabular data.
//!
//! Assay inspects a table, infers the role of every column, computes
//! verified statistics and quality signals, and reduces them to a short list
//! of facts that later narrative steps may quote but never contradict.
//!
//! # Core Principles
//!
//! - **Read-only**: The table is never modified
//! - **Deterministic**: The same table always yields the same result
//! - **Grounded**: Every number in a fact comes from the computed result
//!
//! # Example
//!
//! ```
//! use assay::{Assay, Column, Table};
//!
//! let table = Table::new(vec![
//!     Column::text("grade", [Some("A"), Some("A"), Some("A"), Some("B")]),
//! ])
//! .unwrap();
//!
//! let result = Assay::new().analyze(&table);
//! let grade = &result.categorical_analysis["grade"];
//! assert_eq!(grade.top_value, "A");
//! assert_eq!(grade.top_pct, 75.0);
//!
//! for fact in &result.facts() {
//!     println!("{}", fact);
//! }
//! ```

pub mod config;
pub mod error;
pub mod facts;
pub mod format;
pub mod inference;
pub mod input;
pub mod model;
pub mod profiling;

mod assay;

pub use crate::assay::{Assay, AssayConfig, Report};
pub use config::ProfilingConfig;
pub use error::{AssayError, Result};
pub use facts::{Facts, extract_facts};
pub use inference::{RoleInferencer, RoleMap};
pub use input::{
    Cell, Column, ColumnData, DataDictionary, Parser, ParserConfig, SourceMetadata, StorageType,
    Table,
};
pub use model::{
    AnalysisResult, CategoricalSummary, ColumnRole, CorrelationEntry, DataQuality,
    NumericSummary, Overview, QualityFinding, Relationships,
};
