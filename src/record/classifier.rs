//! Schema classifier - raw rows to typed records
//!
//! Required fields (`mode`, `N`, `d`, and a present `build_time_s` on build
//! rows) abort the run when they cannot be coerced. Optional query fields
//! that fail to parse are dropped to "absent" and counted.

use serde::Serialize;
use std::fmt::Display;
use std::str::FromStr;

use super::{BenchRecord, BuildRecord, QueryRecord, RunMode};
use crate::reader::{RawRow, RecordReader};
use crate::{Error, Result};

/// Columns every results file must carry.
pub const REQUIRED_COLUMNS: [&str; 3] = ["mode", "N", "d"];

/// Per-run classification counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ClassifyStats {
    /// Rows classified.
    pub rows: usize,
    /// Rows in build mode.
    pub build_rows: usize,
    /// Rows in query mode.
    pub query_rows: usize,
    /// Optional fields that were present but unusable and were dropped.
    pub degraded_fields: usize,
}

/// Converts [`RawRow`]s into [`BenchRecord`]s.
#[derive(Debug, Default)]
pub struct SchemaClassifier {
    stats: ClassifyStats,
}

impl SchemaClassifier {
    /// Create a classifier with zeroed counters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Counters accumulated so far.
    #[must_use]
    pub const fn stats(&self) -> ClassifyStats {
        self.stats
    }

    /// Classify every row of a loaded results file, in input order.
    ///
    /// # Errors
    ///
    /// - [`Error::MalformedInput`] if the header lacks `mode`, `N` or `d`
    /// - [`Error::SchemaViolation`] on the first row with a bad required field
    pub fn classify(&mut self, reader: &RecordReader) -> Result<Vec<BenchRecord>> {
        if let Some(missing) = REQUIRED_COLUMNS
            .iter()
            .find(|col| !reader.headers().iter().any(|h| h == *col))
        {
            return Err(Error::MalformedInput {
                path: reader.path().to_path_buf(),
                detail: format!("header is missing required column `{missing}`"),
            });
        }

        let records = reader
            .rows()
            .iter()
            .map(|row| self.classify_row(row))
            .collect::<Result<Vec<_>>>()?;

        if self.stats.degraded_fields > 0 {
            tracing::warn!(
                degraded_fields = self.stats.degraded_fields,
                "dropped unparsable optional fields"
            );
        }

        Ok(records)
    }

    /// Classify a single row.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SchemaViolation`] if `mode`, `N`, `d` or a present
    /// `build_time_s` on a build row cannot be parsed.
    pub fn classify_row(&mut self, row: &RawRow) -> Result<BenchRecord> {
        let mode: RunMode = required(row, "mode")?;
        let n: u64 = required(row, "N")?;
        let d: u32 = required(row, "d")?;

        self.stats.rows += 1;

        let record = match mode {
            RunMode::Build => {
                self.stats.build_rows += 1;
                let mut builder = BuildRecord::builder(n, d);
                if let Some(raw) = present(row, "build_time_s") {
                    let seconds = parse_finite(raw).map_err(|detail| Error::SchemaViolation {
                        row: row.row(),
                        field: "build_time_s".to_string(),
                        detail,
                    })?;
                    builder = builder.build_time_s(seconds);
                }
                BenchRecord::Build(builder.build())
            }
            RunMode::Query => {
                self.stats.query_rows += 1;
                let mut builder = QueryRecord::builder(n, d);
                if let Some(ef) = self.optional(row, "ef_search", |v| v.parse::<u32>().ok()) {
                    builder = builder.ef_search(ef);
                }
                if let Some(recall) = self.optional(row, "recall_at_10", finite) {
                    builder = builder.recall_at_10(recall);
                }
                if let Some(qps) = self.optional(row, "qps", finite) {
                    builder = builder.qps(qps);
                }
                if let Some(p50) = self.optional(row, "p50_ms", finite) {
                    builder = builder.p50_ms(p50);
                }
                if let Some(p95) = self.optional(row, "p95_ms", finite) {
                    builder = builder.p95_ms(p95);
                }
                if let Some(p99) = self.optional(row, "p99_ms", finite) {
                    builder = builder.p99_ms(p99);
                }
                BenchRecord::Query(builder.build())
            }
        };

        Ok(record)
    }

    fn optional<T>(
        &mut self,
        row: &RawRow,
        field: &str,
        parse: impl Fn(&str) -> Option<T>,
    ) -> Option<T> {
        let raw = present(row, field)?;
        let parsed = parse(raw);
        if parsed.is_none() {
            self.stats.degraded_fields += 1;
            tracing::debug!(row = row.row(), field, value = raw, "optional field treated as absent");
        }
        parsed
    }
}

/// Non-empty value of `field`, if the column exists.
fn present<'a>(row: &'a RawRow, field: &str) -> Option<&'a str> {
    row.get(field).filter(|v| !v.is_empty())
}

fn required<T>(row: &RawRow, field: &str) -> Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    let violation = |detail: String| Error::SchemaViolation {
        row: row.row(),
        field: field.to_string(),
        detail,
    };

    let raw = present(row, field).ok_or_else(|| violation("value is missing".to_string()))?;
    raw.parse::<T>()
        .map_err(|e| violation(format!("cannot parse {raw:?}: {e}")))
}

fn finite(raw: &str) -> Option<f64> {
    raw.parse::<f64>().ok().filter(|v| v.is_finite())
}

fn parse_finite(raw: &str) -> std::result::Result<f64, String> {
    finite(raw).ok_or_else(|| format!("cannot parse {raw:?} as a finite number"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    fn classify(text: &str) -> (Result<Vec<BenchRecord>>, ClassifyStats) {
        let reader = RecordReader::from_reader(text.as_bytes(), Path::new("results.csv")).unwrap();
        let mut classifier = SchemaClassifier::new();
        let result = classifier.classify(&reader);
        (result, classifier.stats())
    }

    #[test]
    fn test_query_row_all_fields() {
        let (records, stats) = classify(
            "mode,N,d,ef_search,recall_at_10,qps,p50_ms,p95_ms,p99_ms,build_time_s\n\
             query,10000,384,10,0.82,500,1.2,3.4,5.0,\n",
        );
        let records = records.unwrap();
        let query = records[0].as_query().unwrap();
        assert_eq!(query.ef_search(), Some(10));
        assert_eq!(query.recall_at_10(), Some(0.82));
        assert_eq!(query.p99_ms(), Some(5.0));
        assert_eq!(stats.query_rows, 1);
        assert_eq!(stats.degraded_fields, 0);
    }

    #[test]
    fn test_unparsable_optional_field_degrades() {
        let (records, stats) = classify("mode,N,d,ef_search,recall_at_10\nquery,10,4,50,abc\n");
        let records = records.unwrap();
        let query = records[0].as_query().unwrap();
        assert_eq!(query.ef_search(), Some(50));
        assert!(query.recall_at_10().is_none());
        assert_eq!(stats.degraded_fields, 1);
    }

    #[test]
    fn test_nan_optional_field_degrades() {
        let (records, stats) = classify("mode,N,d,qps\nquery,10,4,NaN\n");
        assert!(records.unwrap()[0].as_query().unwrap().qps().is_none());
        assert_eq!(stats.degraded_fields, 1);
    }

    #[test]
    fn test_bad_required_field_names_row_and_field() {
        let (result, _) = classify("mode,N,d\nquery,10,4\nquery,ten,4\n");
        match result.unwrap_err() {
            Error::SchemaViolation { row, field, .. } => {
                assert_eq!(row, 2);
                assert_eq!(field, "N");
            }
            other => panic!("Expected SchemaViolation, got {other:?}"),
        }
    }

    #[test]
    fn test_unknown_mode_is_violation() {
        let (result, _) = classify("mode,N,d\nall,10,4\n");
        assert!(matches!(result, Err(Error::SchemaViolation { ref field, .. }) if field == "mode"));
    }

    #[test]
    fn test_build_time_absent_is_allowed_but_garbage_is_not() {
        let (records, _) = classify("mode,N,d,build_time_s\nbuild,10,4,\n");
        assert!(records.unwrap()[0].as_build().unwrap().build_time_s().is_none());

        let (result, _) = classify("mode,N,d,build_time_s\nbuild,10,4,slow\n");
        assert!(
            matches!(result, Err(Error::SchemaViolation { ref field, .. }) if field == "build_time_s")
        );
    }

    #[test]
    fn test_header_missing_required_column() {
        let (result, _) = classify("mode,N,ef_search\nquery,10,50\n");
        match result.unwrap_err() {
            Error::MalformedInput { detail, .. } => assert!(detail.contains("`d`")),
            other => panic!("Expected MalformedInput, got {other:?}"),
        }
    }

    #[test]
    fn test_build_rows_ignore_query_columns() {
        let (records, stats) = classify("mode,N,d,qps,build_time_s\nbuild,10,4,garbage,2.5\n");
        assert_eq!(records.unwrap()[0].mode(), RunMode::Build);
        assert_eq!(stats.degraded_fields, 0);
        assert_eq!(stats.build_rows, 1);
    }
}
