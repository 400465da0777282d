//! Profiling thresholds and caps.
//!
//! Defaults reproduce the reference behaviour. Every value can be
//! overridden from a JSON file; unspecified keys keep their defaults.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AssayError, Result};

/// Thresholds used by the role inferencer and the profilers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfilingConfig {
    /// Text columns with at most this many distinct values are categorical.
    pub categorical_max_unique: usize,
    /// Text columns with fewer distinct values than this share of rows are categorical.
    pub categorical_max_ratio: f64,
    /// Numeric columns with more distinct values than this share of rows are identifiers.
    pub identifier_ratio: f64,
    /// Label columns with more distinct values than this share of rows are high cardinality.
    pub high_cardinality_ratio: f64,
    /// Columns missing more than this percentage are flagged.
    pub high_missing_pct: f64,
    /// Fence multiplier for IQR outliers.
    pub iqr_multiplier: f64,
    /// Absolute Pearson coefficient a pair must exceed to be "strong".
    pub strong_correlation_threshold: f64,
    pub max_categorical_columns: usize,
    pub max_numeric_columns: usize,
    pub max_distribution_entries: usize,
    pub max_strong_correlations: usize,
}

impl Default for ProfilingConfig {
    fn default() -> Self {
        Self {
            categorical_max_unique: 20,
            categorical_max_ratio: 0.05,
            identifier_ratio: 0.9,
            high_cardinality_ratio: 0.9,
            high_missing_pct: 50.0,
            iqr_multiplier: 1.5,
            strong_correlation_threshold: 0.5,
            max_categorical_columns: 5,
            max_numeric_columns: 10,
            max_distribution_entries: 10,
            max_strong_correlations: 10,
        }
    }
}

impl ProfilingConfig {
    /// Creates a new profiling config with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load overrides from a JSON file and validate them.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| AssayError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config: Self = serde_json::from_reader(BufReader::new(file))?;
        config.validate()?;
        Ok(config)
    }

    /// Builder method to set the identifier ratio.
    pub fn with_identifier_ratio(mut self, ratio: f64) -> Self {
        if !(0.0..=1.0).contains(&ratio) {
            tracing::warn!("identifier_ratio {} clamped to valid range [0.0, 1.0]", ratio);
        }
        self.identifier_ratio = ratio.clamp(0.0, 1.0);
        self
    }

    /// Builder method to set the high-cardinality ratio.
    pub fn with_high_cardinality_ratio(mut self, ratio: f64) -> Self {
        if !(0.0..=1.0).contains(&ratio) {
            tracing::warn!(
                "high_cardinality_ratio {} clamped to valid range [0.0, 1.0]",
                ratio
            );
        }
        self.high_cardinality_ratio = ratio.clamp(0.0, 1.0);
        self
    }

    /// Builder method to set the strong-correlation threshold.
    pub fn with_strong_correlation_threshold(mut self, threshold: f64) -> Self {
        if !(0.0..=1.0).contains(&threshold) {
            tracing::warn!(
                "strong_correlation_threshold {} clamped to valid range [0.0, 1.0]",
                threshold
            );
        }
        self.strong_correlation_threshold = threshold.clamp(0.0, 1.0);
        self
    }

    /// Builder method to set the IQR fence multiplier.
    pub fn with_iqr_multiplier(mut self, multiplier: f64) -> Self {
        self.iqr_multiplier = multiplier.max(0.0);
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        let ratios = [
            ("categorical_max_ratio", self.categorical_max_ratio),
            ("identifier_ratio", self.identifier_ratio),
            ("high_cardinality_ratio", self.high_cardinality_ratio),
            ("strong_correlation_threshold", self.strong_correlation_threshold),
        ];
        for (name, value) in ratios {
            if !(0.0..=1.0).contains(&value) {
                return Err(AssayError::Config(format!(
                    "{} must be between 0.0 and 1.0, got {}",
                    name, value
                )));
            }
        }
        if !(0.0..=100.0).contains(&self.high_missing_pct) {
            return Err(AssayError::Config(format!(
                "high_missing_pct must be between 0 and 100, got {}",
                self.high_missing_pct
            )));
        }
        if self.iqr_multiplier.is_nan() || self.iqr_multiplier < 0.0 {
            return Err(AssayError::Config(format!(
                "iqr_multiplier must be non-negative, got {}",
                self.iqr_multiplier
            )));
        }
        Ok(())
    }
}
