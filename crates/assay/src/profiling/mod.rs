//! Profilers that run after role inference.
//!
//! Each profiler is a pure function of the table and the role map.

mod categorical;
mod numeric;
mod quality;
mod relationships;
pub mod stats;

pub use categorical::{CategoricalProfiler, value_counts};
pub use numeric::NumericProfiler;
pub use quality::{QualityAuditor, duplicate_row_count, is_sensitive_name};
pub use relationships::{RelationshipProfiler, coefficient};
