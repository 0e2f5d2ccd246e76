//! Grouping & series building
//!
//! Turns validated records into ordered `(x, y)` sequences per metric:
//!
//! 1. **Filter**: keep records whose mode matches the metric and which carry
//!    every field the metric needs.
//! 2. **Group**: bucket by [`SeriesKey`], keeping first-seen key order.
//! 3. **Order**: stable ascending sort on the independent variable, so equal
//!    `x` values stay in input order.
//!
//! No hash-ordered containers are involved; output is a pure function of the
//! input row order.

mod metric;

pub use metric::Metric;

use serde::Serialize;

use crate::record::{BenchRecord, SeriesKey};
use crate::{Error, Result};

/// One plotted point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    /// Independent variable (`ef_search` or `N`)
    pub x: u64,
    /// Metric value
    pub y: f64,
}

/// One line of a chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    label: String,
    points: Vec<Point>,
}

impl Series {
    /// Legend label.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Points sorted ascending by `x`.
    #[must_use]
    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// X values in plotted order.
    #[must_use]
    pub fn xs(&self) -> Vec<u64> {
        self.points.iter().map(|p| p.x).collect()
    }

    /// Y values in plotted order.
    #[must_use]
    pub fn ys(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.y).collect()
    }
}

/// All lines that belong to one [`SeriesKey`].
///
/// Single-valued metrics hold one line; latency holds P50, P95, P99.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesGroup {
    key: SeriesKey,
    lines: Vec<Series>,
}

impl SeriesGroup {
    /// Group identity.
    #[must_use]
    pub const fn key(&self) -> SeriesKey {
        self.key
    }

    /// Lines in fixed drawing order.
    #[must_use]
    pub fn lines(&self) -> &[Series] {
        &self.lines
    }
}

/// Every group for one metric, in first-seen key order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricSeries {
    metric: Metric,
    groups: Vec<SeriesGroup>,
}

impl MetricSeries {
    /// Metric these series describe.
    #[must_use]
    pub const fn metric(&self) -> Metric {
        self.metric
    }

    /// Groups in first-seen key order.
    #[must_use]
    pub fn groups(&self) -> &[SeriesGroup] {
        &self.groups
    }

    /// Keys in first-seen order.
    #[must_use]
    pub fn keys(&self) -> Vec<SeriesKey> {
        self.groups.iter().map(SeriesGroup::key).collect()
    }

    /// Number of source records that contributed.
    #[must_use]
    pub fn record_count(&self) -> usize {
        self.groups
            .iter()
            .map(|g| g.lines.first().map_or(0, |l| l.points.len()))
            .sum()
    }
}

/// A record reduced to what one metric needs.
struct Sample {
    key: SeriesKey,
    x: u64,
    ys: Vec<f64>,
}

/// Builds [`MetricSeries`] from a validated record set.
#[derive(Debug, Clone, Copy)]
pub struct SeriesBuilder<'a> {
    records: &'a [BenchRecord],
}

impl<'a> SeriesBuilder<'a> {
    /// Create a builder over records in input order.
    #[must_use]
    pub const fn new(records: &'a [BenchRecord]) -> Self {
        Self { records }
    }

    /// Build the series for `metric`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NoDataForMetric`] when no record qualifies. This is
    /// a skip signal, not a failure of the run.
    pub fn build(&self, metric: Metric) -> Result<MetricSeries> {
        let mut buckets: Vec<(SeriesKey, Vec<(u64, Vec<f64>)>)> = Vec::new();

        for sample in self.records.iter().filter_map(|r| sample(metric, r)) {
            match buckets.iter_mut().find(|(key, _)| *key == sample.key) {
                Some((_, bucket)) => bucket.push((sample.x, sample.ys)),
                None => buckets.push((sample.key, vec![(sample.x, sample.ys)])),
            }
        }

        if buckets.is_empty() {
            return Err(Error::NoDataForMetric(metric));
        }

        let groups = buckets
            .into_iter()
            .map(|(key, mut bucket)| {
                // Stable: equal x keep input order.
                bucket.sort_by_key(|(x, _)| *x);
                SeriesGroup {
                    key,
                    lines: transpose(metric, key, &bucket),
                }
            })
            .collect();

        Ok(MetricSeries { metric, groups })
    }
}

fn transpose(metric: Metric, key: SeriesKey, bucket: &[(u64, Vec<f64>)]) -> Vec<Series> {
    let labels: Vec<String> = match metric.line_labels() {
        Some(fixed) => fixed.iter().map(|l| (*l).to_string()).collect(),
        None => vec![key.to_string()],
    };

    labels
        .into_iter()
        .enumerate()
        .map(|(idx, label)| Series {
            label,
            points: bucket
                .iter()
                .map(|(x, ys)| Point { x: *x, y: ys[idx] })
                .collect(),
        })
        .collect()
}

fn sample(metric: Metric, record: &BenchRecord) -> Option<Sample> {
    match (metric, record) {
        (Metric::Recall, BenchRecord::Query(q)) => Some(Sample {
            key: record.dataset_key(),
            x: u64::from(q.ef_search()?),
            ys: vec![q.recall_at_10()?],
        }),
        (Metric::Qps, BenchRecord::Query(q)) => Some(Sample {
            key: record.dataset_key(),
            x: u64::from(q.ef_search()?),
            ys: vec![q.qps()?],
        }),
        (Metric::Latency, BenchRecord::Query(q)) => Some(Sample {
            key: record.dataset_key(),
            x: u64::from(q.ef_search()?),
            ys: vec![q.p50_ms()?, q.p95_ms()?, q.p99_ms()?],
        }),
        (Metric::BuildTime, BenchRecord::Build(b)) => Some(Sample {
            key: SeriesKey::Dimension { d: b.d() },
            x: b.n(),
            ys: vec![b.build_time_s()?],
        }),
        _ => None,
    }
}
