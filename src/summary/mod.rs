//! Summary table rendering
//!
//! One row per qualifying query record (query mode with `ef_search`),
//! sorted ascending by `ef_search`. Duplicate `ef_search` values are kept as
//! separate rows in input order.
//!
//! ```text
//! | efSearch | P50 Latency | P95 Latency | QPS | Recall@10 |
//! |----------|-------------|-------------|-----|----------|
//! | 10 | 1.20ms | 3.40ms | 500 | 82.0% |
//! ```

mod format;

pub use format::{format_latency, format_qps, format_recall, group_thousands};

use serde::Serialize;

use crate::record::{BenchRecord, SeriesKey};
use crate::{Error, Result};

const MARKDOWN_HEADER: &str = "| efSearch | P50 Latency | P95 Latency | QPS | Recall@10 |";
const MARKDOWN_SEPARATOR: &str = "|----------|-------------|-------------|-----|----------|";
const CONSOLE_RULE_WIDTH: usize = 70;

/// One summarised query measurement.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryRow {
    /// Search-quality parameter
    pub ef_search: u32,
    /// Dataset the row was measured on
    pub key: SeriesKey,
    /// Median latency (ms)
    pub p50_ms: Option<f64>,
    /// 95th percentile latency (ms)
    pub p95_ms: Option<f64>,
    /// Throughput
    pub qps: Option<f64>,
    /// Recall@10 as a fraction
    pub recall_at_10: Option<f64>,
}

/// Condensed, ordered view of the query sweep.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryTable {
    rows: Vec<SummaryRow>,
    datasets: Vec<SeriesKey>,
}

impl SummaryTable {
    /// File name of the markdown artifact.
    pub const FILE_NAME: &'static str = "summary_table.md";

    /// Build the table from records in input order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyResultSet`] if no query record has `ef_search`.
    /// Callers treat this as "skip the table", not as a failed run.
    pub fn from_records(records: &[BenchRecord]) -> Result<Self> {
        let mut rows: Vec<SummaryRow> = records
            .iter()
            .filter_map(|record| {
                let query = record.as_query()?;
                Some(SummaryRow {
                    ef_search: query.ef_search()?,
                    key: record.dataset_key(),
                    p50_ms: query.p50_ms(),
                    p95_ms: query.p95_ms(),
                    qps: query.qps(),
                    recall_at_10: query.recall_at_10(),
                })
            })
            .collect();

        if rows.is_empty() {
            return Err(Error::EmptyResultSet);
        }

        let mut datasets: Vec<SeriesKey> = Vec::new();
        for row in &rows {
            if !datasets.contains(&row.key) {
                datasets.push(row.key);
            }
        }

        rows.sort_by_key(|row| row.ef_search);

        Ok(Self { rows, datasets })
    }

    /// Rows in ascending `ef_search` order.
    #[must_use]
    pub fn rows(&self) -> &[SummaryRow] {
        &self.rows
    }

    /// Dataset keys present, in first-seen order.
    #[must_use]
    pub fn datasets(&self) -> &[SeriesKey] {
        &self.datasets
    }

    /// Markdown table: header, separator, one line per row.
    #[must_use]
    pub fn to_markdown(&self) -> String {
        let mut lines = vec![MARKDOWN_HEADER.to_string(), MARKDOWN_SEPARATOR.to_string()];
        lines.extend(self.rows.iter().map(|row| {
            format!(
                "| {} | {} | {} | {} | {} |",
                row.ef_search,
                format_latency(row.p50_ms),
                format_latency(row.p95_ms),
                format_qps(row.qps),
                format_recall(row.recall_at_10),
            )
        }));
        terminated(&lines)
    }

    /// Console rendering of the same rows.
    #[must_use]
    pub fn to_console(&self) -> String {
        let rule = "=".repeat(CONSOLE_RULE_WIDTH);
        let datasets = self
            .datasets
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ");

        let mut lines = vec![
            rule.clone(),
            format!("BENCHMARK SUMMARY ({datasets})"),
            rule.clone(),
        ];
        lines.extend(self.rows.iter().map(|row| {
            format!(
                "ef={:>3}  |  P50: {:>7}  |  P95: {:>7}  |  QPS: {:>5}  |  Recall@10: {:>5}",
                row.ef_search,
                format_latency(row.p50_ms),
                format_latency(row.p95_ms),
                format_qps(row.qps),
                format_recall(row.recall_at_10),
            )
        }));
        lines.push(rule);
        terminated(&lines)
    }
}

/// Join lines, each ending in a newline.
fn terminated(lines: &[String]) -> String {
    let mut out = lines.join("\n");
    out.push('\n');
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{BuildRecord, QueryRecord};

    fn scenario() -> Vec<BenchRecord> {
        vec![
            BenchRecord::Query(
                QueryRecord::builder(10_000, 384)
                    .ef_search(50)
                    .recall_at_10(0.95)
                    .qps(200.0)
                    .latency_ms(2.0, 4.0, 6.0)
                    .build(),
            ),
            BenchRecord::Query(
                QueryRecord::builder(10_000, 384)
                    .ef_search(10)
                    .recall_at_10(0.82)
                    .qps(500.0)
                    .latency_ms(1.2, 3.4, 5.0)
                    .build(),
            ),
        ]
    }

    #[test]
    fn test_markdown_rows_sorted_and_formatted() {
        let table = SummaryTable::from_records(&scenario()).unwrap();
        let markdown = table.to_markdown();
        let lines: Vec<&str> = markdown.lines().collect();

        assert_eq!(lines.len(), 4);
        assert_eq!(lines[0], MARKDOWN_HEADER);
        assert_eq!(lines[1], MARKDOWN_SEPARATOR);
        assert_eq!(lines[2], "| 10 | 1.20ms | 3.40ms | 500 | 82.0% |");
        assert_eq!(lines[3], "| 50 | 2.00ms | 4.00ms | 200 | 95.0% |");
    }

    #[test]
    fn test_console_mirrors_rows() {
        let table = SummaryTable::from_records(&scenario()).unwrap();
        let console = table.to_console();

        assert!(console.contains("BENCHMARK SUMMARY (N=10000, d=384)"));
        assert!(console.contains(
            "ef= 10  |  P50:  1.20ms  |  P95:  3.40ms  |  QPS:   500  |  Recall@10: 82.0%"
        ));
        let ef10 = console.find("ef= 10").unwrap();
        let ef50 = console.find("ef= 50").unwrap();
        assert!(ef10 < ef50);
    }

    #[test]
    fn test_missing_fields_render_dash() {
        let records = vec![BenchRecord::Query(
            QueryRecord::builder(10, 4).ef_search(16).qps(12_345.9).build(),
        )];
        let table = SummaryTable::from_records(&records).unwrap();
        assert_eq!(
            table.to_markdown().lines().nth(2),
            Some("| 16 | - | - | 12,345 | - |")
        );
    }

    #[test]
    fn test_every_line_is_newline_terminated() {
        let table = SummaryTable::from_records(&scenario()).unwrap();

        let markdown = table.to_markdown();
        assert!(markdown.ends_with("| 50 | 2.00ms | 4.00ms | 200 | 95.0% |\n"));
        assert_eq!(markdown.matches('\n').count(), 4);

        let console = table.to_console();
        assert_eq!(console.lines().count(), 6);
        assert_eq!(console.lines().last(), Some("=".repeat(70).as_str()));
        assert!(console.ends_with('\n'));
    }

    #[test]
    fn test_build_only_is_empty_result_set() {
        let records = vec![BenchRecord::Build(
            BuildRecord::builder(10, 4).build_time_s(1.0).build(),
        )];
        assert!(matches!(
            SummaryTable::from_records(&records),
            Err(Error::EmptyResultSet)
        ));
    }

    #[test]
    fn test_duplicate_ef_kept_in_input_order() {
        let records = vec![
            BenchRecord::Query(QueryRecord::builder(10, 4).ef_search(10).qps(1.0).build()),
            BenchRecord::Query(QueryRecord::builder(20, 8).ef_search(10).qps(2.0).build()),
        ];
        let table = SummaryTable::from_records(&records).unwrap();
        assert_eq!(table.rows().len(), 2);
        assert_eq!(table.rows()[0].qps, Some(1.0));
        assert_eq!(table.rows()[1].qps, Some(2.0));
        assert_eq!(table.datasets().len(), 2);
    }
}
