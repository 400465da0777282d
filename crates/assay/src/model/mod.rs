//! Result types: column roles, per-column summaries and the analysis result.

mod report;
mod summary;
mod types;

pub use report::{
    AnalysisResult, ColumnOverview, CorrelationMatrix, DataQuality, HighCardinalityColumn,
    HighMissingColumn, Overview, Relationships,
};
pub use summary::{
    CategoricalSummary, CorrelationEntry, NumericSummary, QualityFinding, ValueFrequency,
};
pub use types::ColumnRole;
