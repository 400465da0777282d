//! Integration tests for Assay.

use std::io::Write;
use tempfile::NamedTempFile;

use assay::profiling::{NumericProfiler, coefficient};
use assay::{
    AnalysisResult, Assay, AssayConfig, AssayError, Column, ColumnRole, DataDictionary,
    ProfilingConfig, StorageType, Table,
};

/// Helper to create a temporary file with given content.
fn create_test_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(content.as_bytes())
        .expect("Failed to write to temp file");
    file
}

/// Helper to create a temporary file with a specific extension.
fn create_file_with_suffix(content: &str, suffix: &str) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(suffix)
        .tempfile()
        .expect("Failed to create temp file");
    file.write_all(content.as_bytes())
        .expect("Failed to write to temp file");
    file
}

// =============================================================================
// Loading
// =============================================================================

#[test]
fn test_analyze_basic_csv() {
    let content = "id,name,age,active\n\
                   1,Alice,30,true\n\
                   2,Bob,25,false\n\
                   3,Carol,28,true\n";
    let file = create_test_file(content);

    let report = Assay::new().analyze_file(file.path()).expect("Analysis failed");

    assert_eq!(report.source.row_count, 3);
    assert_eq!(report.source.column_count, 4);
    assert_eq!(report.source.format, "csv");
    assert!(report.source.hash.starts_with("sha256:"));
    assert_eq!(report.analysis.overview.total_rows, 3);
    assert_eq!(report.analysis.overview.total_columns, 4);

    let storage: Vec<StorageType> = report
        .analysis
        .overview
        .columns
        .iter()
        .map(|c| c.storage)
        .collect();
    assert_eq!(
        storage,
        vec![
            StorageType::Integer,
            StorageType::Text,
            StorageType::Integer,
            StorageType::Boolean
        ]
    );
}

#[test]
fn test_analyze_tsv_auto_detect() {
    let content = "sample_id\tdiagnosis\tage\n\
                   S001\tCD\t25\n\
                   S002\tUC\t30\n\
                   S003\tControl\t28\n";
    let file = create_test_file(content);

    let report = Assay::new().analyze_file(file.path()).expect("Analysis failed");

    assert_eq!(report.source.format, "tsv");
    assert_eq!(report.analysis.overview.total_columns, 3);
}

#[test]
fn test_missing_tokens_are_missing() {
    let content = "score,label\n\
                   1.5,a\n\
                   NA,b\n\
                   ,n/a\n\
                   2.5,NULL\n";
    let file = create_test_file(content);

    let report = Assay::new().analyze_file(file.path()).expect("Analysis failed");
    let quality = &report.analysis.data_quality;

    assert_eq!(quality.missing_by_column["score"].missing_count, 2);
    assert_eq!(quality.missing_by_column["label"].missing_count, 2);
    assert_eq!(report.analysis.overview.total_missing_cells, 4);
    assert_eq!(report.analysis.overview.missing_pct, 50.0);
}

#[test]
fn test_header_only_file_yields_empty_profile() {
    let file = create_test_file("a,b,c\n");

    let report = Assay::new().analyze_file(file.path()).expect("Analysis failed");
    let analysis = &report.analysis;

    assert_eq!(analysis.overview.total_rows, 0);
    assert_eq!(analysis.overview.total_columns, 3);
    assert!(analysis.categorical_analysis.is_empty());
    assert!(analysis.numeric_analysis.is_empty());
    assert!(analysis.relationships.is_none());
    assert_eq!(analysis.data_quality.missing_by_column["a"].missing_pct, 0.0);
    assert_eq!(report.facts[0], "Dataset has 0 rows and 3 columns");
}

#[test]
fn test_infinite_values_never_reach_the_report() {
    let file = create_test_file("v,w\n1,1\ninf,2\n3,3\n3,4\n");

    let report = Assay::new().analyze_file(file.path()).expect("Analysis failed");
    assert_eq!(report.analysis.role_of("v"), Some(ColumnRole::Categorical));

    assert!(!report.analysis.numeric_analysis.contains_key("v"));

    let json = serde_json::to_string(&report.analysis).unwrap();
    let restored: AnalysisResult = serde_json::from_str(&json).expect("result reads back");
    assert_eq!(restored.overview, report.analysis.overview);
}

#[test]
fn test_infinite_floats_count_as_missing() {
    let values = [1.0, 2.0, 3.0, f64::INFINITY, 1.0, 2.0, 3.0];
    let table = Table::new(vec![Column::float("m", values.map(Some))]).unwrap();

    let result = Assay::new().analyze(&table);
    let summary = &result.numeric_analysis["m"];

    assert_eq!(result.data_quality.missing_by_column["m"].missing_count, 1);
    assert_eq!(summary.count, 6);
    assert_eq!(summary.mean, 2.0);
    assert!(summary.std.is_finite() && summary.upper_bound.is_finite());
}

#[test]
fn test_empty_file_is_an_error() {
    let file = create_test_file("");

    let result = Assay::new().analyze_file(file.path());
    assert!(matches!(result, Err(AssayError::EmptyData(_))));
}

#[test]
fn test_missing_file_is_io_error() {
    let result = Assay::new().analyze_file("/nonexistent/data.csv");
    assert!(matches!(result, Err(AssayError::Io { .. })));
}

// =============================================================================
// Reference Scenarios
// =============================================================================

#[test]
fn test_constant_age_and_sparse_income() {
    let mut content = String::from("age,income\n");
    for i in 0..1000 {
        if i == 500 {
            content.push_str("30,\n");
        } else {
            content.push_str(&format!("30,{}\n", 20_000 + i * 37));
        }
    }
    let file = create_test_file(&content);

    let report = Assay::new().analyze_file(file.path()).expect("Analysis failed");
    let quality = &report.analysis.data_quality;

    assert!(quality.constant_columns.contains(&"age".to_string()));
    assert_eq!(quality.missing_by_column["income"].missing_count, 1);
    assert_eq!(quality.missing_by_column["income"].missing_pct, 0.1);
    assert!(quality.high_missing_columns.is_empty());
    assert_eq!(quality.duplicate_row_count, 0);
}

#[test]
fn test_outlier_bounds() {
    let summary = NumericProfiler::new()
        .summarize(&[1.0, 2.0, 3.0, 4.0, 5.0, 100.0])
        .expect("non-empty values");

    assert_eq!(summary.q25, 2.25);
    assert_eq!(summary.q75, 4.75);
    assert_eq!(summary.iqr, 2.5);
    assert_eq!(summary.upper_bound, 8.5);
    assert_eq!(summary.outlier_count, 1);
    assert!(summary.is_outlier(100.0));
}

#[test]
fn test_perfect_linear_relationship() {
    let mut content = String::from("x,y\n");
    for i in 0..50 {
        let x = i % 10;
        content.push_str(&format!("{},{}\n", x, 2 * x));
    }
    let file = create_test_file(&content);

    let report = Assay::new().analyze_file(file.path()).expect("Analysis failed");
    let analysis = &report.analysis;

    assert_eq!(analysis.role_of("x"), Some(ColumnRole::Numeric));
    assert_eq!(analysis.role_of("y"), Some(ColumnRole::Numeric));

    let relationships = analysis.relationships.as_ref().expect("two numeric columns");
    assert_eq!(coefficient(&relationships.matrix, "x", "y"), Some(1.0));
    assert_eq!(coefficient(&relationships.matrix, "y", "x"), Some(1.0));
    assert_eq!(relationships.strong_correlations.len(), 1);
    assert_eq!(relationships.strong_correlations[0].coefficient, 1.0);

    assert!(
        report
            .facts
            .contains(&"Strong correlation between 'x' and 'y': r=1.0".to_string())
    );
}

#[test]
fn test_categorical_top_value() {
    let file = create_test_file("grade\nA\nA\nA\nB\n");

    let report = Assay::new().analyze_file(file.path()).expect("Analysis failed");
    let grade = &report.analysis.categorical_analysis["grade"];

    assert_eq!(grade.top_value, "A");
    assert_eq!(grade.top_count, 3);
    assert_eq!(grade.top_pct, 75.0);
    assert_eq!(grade.unique_count, 2);
    assert!(
        report
            .facts
            .contains(&"Most frequent value in 'grade': 'A' (75.0%)".to_string())
    );
}

// =============================================================================
// Report Surface
// =============================================================================

#[test]
fn test_report_facts_match_analysis() {
    let content = "city,temp,humidity\n\
                   Oslo,3.5,80\n\
                   Oslo,4.0,82\n\
                   Rome,18.5,60\n\
                   Rome,19.0,58\n\
                   Oslo,3.5,80\n";
    let file = create_test_file(content);

    let report = Assay::new().analyze_file(file.path()).expect("Analysis failed");

    assert_eq!(report.facts, report.analysis.facts());
    assert_eq!(report.analysis.data_quality.duplicate_row_count, 1);
    assert!(report.facts.contains(&"Found 1 duplicate rows".to_string()));
}

#[test]
fn test_analysis_is_deterministic() {
    let content = "group,a,b,c\n\
                   x,1.0,2.0,9\n\
                   y,2.0,4.1,7\n\
                   x,3.0,5.9,8\n\
                   y,4.0,8.2,3\n\
                   x,5.0,9.8,1\n\
                   y,5.0,9.8,1\n\
                   x,,3.3,2\n";
    let file = create_test_file(content);

    let assay = Assay::new();
    let first = assay.analyze_file(file.path()).expect("Analysis failed");
    let second = assay.analyze_file(file.path()).expect("Analysis failed");

    let first_json = serde_json::to_string(&first.analysis).unwrap();
    let second_json = serde_json::to_string(&second.analysis).unwrap();
    assert_eq!(first_json, second_json);
    assert_eq!(first.facts.to_string(), second.facts.to_string());
}

#[test]
fn test_analysis_serializes_and_restores() {
    let file = create_test_file("k,v\na,1\nb,2\na,3\nb,4\na,5\nb,5\n");

    let report = Assay::new().analyze_file(file.path()).expect("Analysis failed");
    let json = serde_json::to_string_pretty(&report).unwrap();
    let restored: assay::Report = serde_json::from_str(&json).unwrap();

    assert_eq!(restored.analysis.overview, report.analysis.overview);
    assert_eq!(restored.analysis.data_quality, report.analysis.data_quality);
    assert_eq!(
        restored.analysis.categorical_analysis,
        report.analysis.categorical_analysis
    );
    assert_eq!(restored.facts, report.facts);
    assert!(json.contains("\"column_roles\""));
}

#[test]
fn test_report_with_dictionary() {
    let data = create_test_file("id,score\n1,10\n2,20\n");
    let schema = create_file_with_suffix(
        r#"{"id": "Row identifier", "score": "Exam score"}"#,
        ".json",
    );

    let report = Assay::new()
        .analyze_file(data.path())
        .expect("Analysis failed")
        .with_dictionary(DataDictionary::load(schema.path()).expect("dictionary loads"));

    match &report.dictionary {
        Some(DataDictionary::Json(value)) => assert_eq!(value["score"], "Exam score"),
        other => panic!("unexpected dictionary: {:?}", other),
    }
}

#[test]
fn test_config_file_overrides_thresholds() {
    let config_file = create_file_with_suffix(r#"{"strong_correlation_threshold": 0.99}"#, ".json");
    let profiling = ProfilingConfig::from_json_file(config_file.path()).expect("config loads");
    assert_eq!(profiling.strong_correlation_threshold, 0.99);
    assert_eq!(profiling.max_numeric_columns, 10);

    let mut content = String::from("x,y\n");
    for i in 0..40 {
        let x = i % 8;
        let noise = if i % 2 == 0 { 1 } else { -1 };
        content.push_str(&format!("{},{}\n", x, 3 * x + noise));
    }
    let file = create_test_file(&content);

    let strict = Assay::with_config(AssayConfig {
        profiling,
        ..AssayConfig::default()
    });
    let strict_report = strict.analyze_file(file.path()).expect("Analysis failed");
    let default_report = Assay::new().analyze_file(file.path()).expect("Analysis failed");

    let strict_strong = &strict_report
        .analysis
        .relationships
        .as_ref()
        .unwrap()
        .strong_correlations;
    let default_strong = &default_report
        .analysis
        .relationships
        .as_ref()
        .unwrap()
        .strong_correlations;

    assert!(strict_strong.is_empty());
    assert_eq!(default_strong.len(), 1);
}

#[test]
fn test_invalid_config_file_rejected() {
    let config_file = create_file_with_suffix(r#"{"identifier_ratio": 1.5}"#, ".json");
    let result = ProfilingConfig::from_json_file(config_file.path());
    assert!(matches!(result, Err(AssayError::Config(_))));
}

#[test]
fn test_quality_extras_surface_in_report() {
    let content = "email,reading\n\
                   a@x.org,12\n\
                   b@x.org,-999\n\
                   c@x.org,15\n\
                   d@x.org,11\n\
                   e@x.org,12\n";
    let file = create_test_file(content);

    let report = Assay::new().analyze_file(file.path()).expect("Analysis failed");
    let quality = &report.analysis.data_quality;

    assert_eq!(quality.sensitive_columns, vec!["email".to_string()]);
    assert_eq!(
        quality.suspected_missing_codes.get("reading"),
        Some(&vec!["-999".to_string()])
    );
}
