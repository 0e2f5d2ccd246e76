//! Metric catalogue

use serde::Serialize;
use std::fmt;

use crate::record::{RunMode, SeriesKey};

const LATENCY_LINES: &[&str] = &["P50", "P95", "P99"];

/// A reported quantity and everything the renderers need to know about it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    /// Recall@10 against `ef_search`.
    Recall,
    /// Throughput against `ef_search`.
    Qps,
    /// P50/P95/P99 latency against `ef_search`, one chart per dataset.
    Latency,
    /// Index build time against dataset size.
    BuildTime,
}

impl Metric {
    /// Every metric, in rendering order.
    pub const ALL: [Self; 4] = [Self::Recall, Self::Qps, Self::Latency, Self::BuildTime];

    /// Mode a record must have to contribute.
    #[must_use]
    pub const fn mode(self) -> RunMode {
        match self {
            Self::BuildTime => RunMode::Build,
            Self::Recall | Self::Qps | Self::Latency => RunMode::Query,
        }
    }

    /// Short identifier used in logs.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Recall => "recall",
            Self::Qps => "qps",
            Self::Latency => "latency",
            Self::BuildTime => "build_time",
        }
    }

    /// Whether each series key gets its own chart file.
    #[must_use]
    pub const fn is_per_key(self) -> bool {
        matches!(self, Self::Latency)
    }

    /// Fixed line labels for multi-line metrics.
    ///
    /// `None` means one line per key, labelled with the key.
    #[must_use]
    pub const fn line_labels(self) -> Option<&'static [&'static str]> {
        match self {
            Self::Latency => Some(LATENCY_LINES),
            Self::Recall | Self::Qps | Self::BuildTime => None,
        }
    }

    /// X axis description.
    #[must_use]
    pub const fn x_desc(self) -> &'static str {
        match self {
            Self::BuildTime => "Number of Vectors",
            Self::Recall | Self::Qps | Self::Latency => "efSearch",
        }
    }

    /// Y axis description, with unit.
    #[must_use]
    pub const fn y_desc(self) -> &'static str {
        match self {
            Self::Recall => "Recall@10",
            Self::Qps => "Queries Per Second",
            Self::Latency => "Latency (ms)",
            Self::BuildTime => "Build Time (seconds)",
        }
    }

    /// Y range that ignores the data, if the metric has one.
    ///
    /// Recall is a probability-like value capped near 1.
    #[must_use]
    pub const fn fixed_y_range(self) -> Option<(f64, f64)> {
        match self {
            Self::Recall => Some((0.0, 1.05)),
            Self::Qps | Self::Latency | Self::BuildTime => None,
        }
    }

    /// Chart title. `key` is only consulted for per-key metrics.
    #[must_use]
    pub fn title(self, key: Option<SeriesKey>) -> String {
        match (self, key) {
            (Self::Recall, _) => "HNSW: efSearch vs Recall@10".to_string(),
            (Self::Qps, _) => "HNSW: efSearch vs QPS".to_string(),
            (Self::Latency, Some(key)) => format!("Query Latency Percentiles ({key})"),
            (Self::Latency, None) => "Query Latency Percentiles".to_string(),
            (Self::BuildTime, _) => "Index Build Time".to_string(),
        }
    }

    /// Output file name. Per-key metrics embed the key values verbatim.
    #[must_use]
    pub fn file_name(self, key: Option<SeriesKey>) -> String {
        match (self, key) {
            (Self::Recall, _) => "ef_vs_recall.svg".to_string(),
            (Self::Qps, _) => "ef_vs_qps.svg".to_string(),
            (Self::Latency, Some(key)) => format!("latency_{}.svg", key.file_stem()),
            (Self::Latency, None) => "latency.svg".to_string(),
            (Self::BuildTime, _) => "build_time.svg".to_string(),
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
