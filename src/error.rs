//! Error types for bench-report
//!
//! Every message is a single actionable line: what is missing and which
//! command produces it.

use std::path::PathBuf;
use thiserror::Error;

use crate::series::Metric;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// bench-report error types
#[derive(Error, Debug)]
pub enum Error {
    /// The benchmark results file does not exist
    #[error(
        "Results file not found at {}; run benchmarks first: ./scripts/run_bench.sh",
        path.display()
    )]
    InputNotFound {
        /// Path that was expected to hold the results
        path: PathBuf,
    },

    /// Header missing or a row does not line up with the header
    #[error("Malformed results file {}: {detail}", path.display())]
    MalformedInput {
        /// Offending file
        path: PathBuf,
        /// What was wrong with it
        detail: String,
    },

    /// A field required by the row's mode could not be coerced
    #[error("Schema violation at row {row}, field `{field}`: {detail}")]
    SchemaViolation {
        /// 1-based data row number (header excluded)
        row: usize,
        /// Column name
        field: String,
        /// Why coercion failed
        detail: String,
    },

    /// No record qualifies for a metric; the chart is skipped
    #[error("No data for metric `{0}`, skipping")]
    NoDataForMetric(Metric),

    /// No query rows with `ef_search`; the summary table is skipped
    #[error("No query rows with ef_search found, skipping summary table")]
    EmptyResultSet,

    /// Chart drawing failed
    #[error("Render error: {0}")]
    Render(String),

    /// Invalid configuration or artifact name
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Whether this error aborts the run.
    ///
    /// `NoDataForMetric` and `EmptyResultSet` only skip one artifact.
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        !matches!(self, Self::NoDataForMetric(_) | Self::EmptyResultSet)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_soft_errors_are_not_fatal() {
        assert!(!Error::NoDataForMetric(Metric::Recall).is_fatal());
        assert!(!Error::EmptyResultSet.is_fatal());
        assert!(Error::Render("boom".to_string()).is_fatal());
    }

    #[test]
    fn test_input_not_found_is_one_line() {
        let error = Error::InputNotFound {
            path: PathBuf::from("bench/out/results.csv"),
        };
        let message = error.to_string();
        assert!(!message.contains('\n'));
        assert!(message.contains("bench/out/results.csv"));
        assert!(message.contains("run_bench.sh"));
    }
}
