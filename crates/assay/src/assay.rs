//! Main Assay struct and public API.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::ProfilingConfig;
use crate::error::Result;
use crate::facts::Facts;
use crate::format::round_to;
use crate::inference::{RoleInferencer, RoleMap};
use crate::input::{DataDictionary, Parser, ParserConfig, SourceMetadata, Table};
use crate::model::{AnalysisResult, ColumnOverview, ColumnRole, Overview};
use crate::profiling::{
    CategoricalProfiler, NumericProfiler, QualityAuditor, RelationshipProfiler,
};

/// Sample values kept per column in the overview.
const SAMPLE_VALUES: usize = 5;

/// Configuration for an Assay run.
#[derive(Debug, Clone, Default)]
pub struct AssayConfig {
    /// Parser configuration.
    pub parser: ParserConfig,
    /// Profiling thresholds and caps.
    pub profiling: ProfilingConfig,
}

/// Analysis of a file together with where it came from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    /// Metadata about the source file.
    pub source: SourceMetadata,
    /// Structured profiling results.
    pub analysis: AnalysisResult,
    /// Grounded facts derived from `analysis`.
    pub facts: Facts,
    /// Data dictionary supplied with the file, passed through untouched.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dictionary: Option<DataDictionary>,
}

impl Report {
    /// Attach a data dictionary.
    pub fn with_dictionary(mut self, dictionary: DataDictionary) -> Self {
        self.dictionary = Some(dictionary);
        self
    }
}

/// The profiling engine.
pub struct Assay {
    config: AssayConfig,
    parser: Parser,
    inferencer: RoleInferencer,
    auditor: QualityAuditor,
    categorical: CategoricalProfiler,
    numeric: NumericProfiler,
    relationships: RelationshipProfiler,
}

impl Assay {
    /// Create an engine with default configuration.
    pub fn new() -> Self {
        Self::with_config(AssayConfig::default())
    }

    /// Create an engine with custom configuration.
    pub fn with_config(config: AssayConfig) -> Self {
        let profiling = &config.profiling;

        Self {
            parser: Parser::with_config(config.parser.clone()),
            inferencer: RoleInferencer::with_config(profiling),
            auditor: QualityAuditor::with_config(profiling),
            categorical: CategoricalProfiler::with_config(profiling),
            numeric: NumericProfiler::with_config(profiling),
            relationships: RelationshipProfiler::with_config(profiling),
            config,
        }
    }

    /// The configuration this engine was built with.
    pub fn config(&self) -> &AssayConfig {
        &self.config
    }

    /// Profile a table.
    ///
    /// Never fails: empty tables, all-missing columns and zero-variance
    /// columns produce defaults or absent entries.
    pub fn analyze(&self, table: &Table) -> AnalysisResult {
        let roles = self.inferencer.infer(table);
        tracing::debug!(
            rows = table.row_count(),
            columns = table.column_count(),
            "inferred column roles"
        );

        let data_quality = self.auditor.audit(table, &roles);
        let categorical_analysis = self.categorical.profile(table, &roles);
        let numeric_analysis = self.numeric.profile(table, &roles);
        let relationships = self.relationships.profile(table, &roles);

        let overview = build_overview(table, &roles, data_quality.duplicate_row_count);

        tracing::debug!(
            categorical = categorical_analysis.len(),
            numeric = numeric_analysis.len(),
            correlated = relationships.is_some(),
            "profiling complete"
        );

        AnalysisResult {
            overview,
            data_quality,
            categorical_analysis,
            numeric_analysis,
            relationships,
        }
    }

    /// Load a delimited file, profile it and extract facts.
    pub fn analyze_file(&self, path: impl AsRef<Path>) -> Result<Report> {
        let (table, source) = self.parser.parse_file(path)?;
        tracing::info!(
            file = %source.file,
            rows = source.row_count,
            columns = source.column_count,
            "loaded dataset"
        );

        let analysis = self.analyze(&table);
        let facts = analysis.facts();

        Ok(Report {
            source,
            analysis,
            facts,
            dictionary: None,
        })
    }
}

impl Default for Assay {
    fn default() -> Self {
        Self::new()
    }
}

fn build_overview(table: &Table, roles: &RoleMap, duplicate_rows: usize) -> Overview {
    let total_rows = table.row_count();
    let total_columns = table.column_count();
    let total_cells = total_rows * total_columns;
    let total_missing_cells = table.missing_cell_count();

    let missing_pct = if total_cells == 0 {
        0.0
    } else {
        round_to(total_missing_cells as f64 / total_cells as f64 * 100.0, 2)
    };

    let columns = table
        .columns()
        .iter()
        .map(|column| {
            let null_count = column.missing_count();
            ColumnOverview {
                name: column.name().to_string(),
                storage: column.storage_type(),
                role: roles
                    .get(column.name())
                    .copied()
                    .unwrap_or(ColumnRole::Text),
                non_null_count: column.len() - null_count,
                null_count,
                unique_count: column.unique_count(),
                sample_values: column
                    .present()
                    .take(SAMPLE_VALUES)
                    .map(|c| c.to_string())
                    .collect(),
            }
        })
        .collect();

    Overview {
        total_rows,
        total_columns,
        total_cells,
        total_missing_cells,
        missing_pct,
        duplicate_rows,
        column_roles: roles.clone(),
        columns,
    }
}
