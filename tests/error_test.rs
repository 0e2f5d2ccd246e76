//! Tests for error types

use bench_report::series::Metric;
use bench_report::Error;
use std::path::PathBuf;

#[test]
fn test_input_not_found_error() {
    let error = Error::InputNotFound {
        path: PathBuf::from("bench/out/results.csv"),
    };
    let error_str = format!("{error}");
    assert!(error_str.contains("bench/out/results.csv"));
    assert!(error_str.contains("./scripts/run_bench.sh"));
    assert!(!error_str.contains('\n'));
    assert!(error.is_fatal());
}

#[test]
fn test_malformed_input_error() {
    let error = Error::MalformedInput {
        path: PathBuf::from("results.csv"),
        detail: "row 3 has 4 columns but the header has 5".to_string(),
    };
    let error_str = format!("{error}");
    assert!(error_str.contains("Malformed results file results.csv"));
    assert!(error_str.contains("row 3"));
}

#[test]
fn test_schema_violation_error() {
    let error = Error::SchemaViolation {
        row: 7,
        field: "N".to_string(),
        detail: "cannot parse \"ten\"".to_string(),
    };
    let error_str = format!("{error}");
    assert!(error_str.contains("row 7"));
    assert!(error_str.contains("`N`"));
    assert!(error.is_fatal());
}

#[test]
fn test_soft_skip_errors_are_not_fatal() {
    let no_data = Error::NoDataForMetric(Metric::BuildTime);
    assert!(format!("{no_data}").contains("build_time"));
    assert!(!no_data.is_fatal());

    let empty = Error::EmptyResultSet;
    assert!(format!("{empty}").contains("summary table"));
    assert!(!empty.is_fatal());
}

#[test]
fn test_render_and_config_errors() {
    let render = Error::Render("ef_vs_qps.svg: backend failure".to_string());
    assert!(format!("{render}").contains("Render error"));

    let config = Error::Config("chart size must be non-zero".to_string());
    assert!(format!("{config}").contains("Configuration error"));
}

#[test]
fn test_io_error_conversion() {
    let io_error = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
    let error: Error = io_error.into();
    let error_str = format!("{error}");
    assert!(error_str.contains("IO error"));
    assert!(error_str.contains("denied"));
}
