//! Bench Record - one validated row of benchmark output

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::SeriesKey;

/// Run mode declared by the `mode` column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunMode {
    /// Index construction run.
    Build,
    /// Query sweep run.
    Query,
}

impl FromStr for RunMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "build" => Ok(Self::Build),
            "query" => Ok(Self::Query),
            other => Err(format!("unknown mode {other:?} (expected \"build\" or \"query\")")),
        }
    }
}

impl fmt::Display for RunMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Build => "build",
            Self::Query => "query",
        })
    }
}

/// A validated benchmark record, tagged by run mode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum BenchRecord {
    /// Build-mode row.
    Build(BuildRecord),
    /// Query-mode row.
    Query(QueryRecord),
}

impl BenchRecord {
    /// Run mode of this record.
    #[must_use]
    pub const fn mode(&self) -> RunMode {
        match self {
            Self::Build(_) => RunMode::Build,
            Self::Query(_) => RunMode::Query,
        }
    }

    /// Dataset size (`N`).
    #[must_use]
    pub const fn n(&self) -> u64 {
        match self {
            Self::Build(r) => r.n,
            Self::Query(r) => r.n,
        }
    }

    /// Vector dimensionality (`d`).
    #[must_use]
    pub const fn d(&self) -> u32 {
        match self {
            Self::Build(r) => r.d,
            Self::Query(r) => r.d,
        }
    }

    /// `(N, d)` identity of the dataset this record was measured on.
    #[must_use]
    pub const fn dataset_key(&self) -> SeriesKey {
        SeriesKey::Dataset {
            n: self.n(),
            d: self.d(),
        }
    }

    /// The query payload, if this is a query record.
    #[must_use]
    pub const fn as_query(&self) -> Option<&QueryRecord> {
        match self {
            Self::Query(r) => Some(r),
            Self::Build(_) => None,
        }
    }

    /// The build payload, if this is a build record.
    #[must_use]
    pub const fn as_build(&self) -> Option<&BuildRecord> {
        match self {
            Self::Build(r) => Some(r),
            Self::Query(_) => None,
        }
    }
}

/// Index build measurement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BuildRecord {
    n: u64,
    d: u32,
    build_time_s: Option<f64>,
}

impl BuildRecord {
    /// Create a build record without a timing.
    #[must_use]
    pub const fn new(n: u64, d: u32) -> Self {
        Self {
            n,
            d,
            build_time_s: None,
        }
    }

    /// Create a builder for a build record with optional fields.
    #[must_use]
    pub const fn builder(n: u64, d: u32) -> BuildRecordBuilder {
        BuildRecordBuilder::new(n, d)
    }

    /// Dataset size.
    #[must_use]
    pub const fn n(&self) -> u64 {
        self.n
    }

    /// Dimensionality.
    #[must_use]
    pub const fn d(&self) -> u32 {
        self.d
    }

    /// Wall-clock build time in seconds, if recorded.
    #[must_use]
    pub const fn build_time_s(&self) -> Option<f64> {
        self.build_time_s
    }
}

/// Builder for `BuildRecord`.
#[derive(Debug)]
pub struct BuildRecordBuilder {
    inner: BuildRecord,
}

impl BuildRecordBuilder {
    /// Create a new builder with required fields.
    #[must_use]
    pub const fn new(n: u64, d: u32) -> Self {
        Self {
            inner: BuildRecord::new(n, d),
        }
    }

    /// Set the build time in seconds.
    #[must_use]
    pub const fn build_time_s(mut self, seconds: f64) -> Self {
        self.inner.build_time_s = Some(seconds);
        self
    }

    /// Build the `BuildRecord`.
    #[must_use]
    pub const fn build(self) -> BuildRecord {
        self.inner
    }
}

/// Query sweep measurement at one `ef_search` setting.
///
/// Percentiles are expected to be non-decreasing (p50 ≤ p95 ≤ p99) but this
/// is not enforced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryRecord {
    n: u64,
    d: u32,
    ef_search: Option<u32>,
    recall_at_10: Option<f64>,
    qps: Option<f64>,
    p50_ms: Option<f64>,
    p95_ms: Option<f64>,
    p99_ms: Option<f64>,
}

impl QueryRecord {
    /// Create a query record with every optional field absent.
    #[must_use]
    pub const fn new(n: u64, d: u32) -> Self {
        Self {
            n,
            d,
            ef_search: None,
            recall_at_10: None,
            qps: None,
            p50_ms: None,
            p95_ms: None,
            p99_ms: None,
        }
    }

    /// Create a builder for a query record with optional fields.
    #[must_use]
    pub const fn builder(n: u64, d: u32) -> QueryRecordBuilder {
        QueryRecordBuilder::new(n, d)
    }

    /// Dataset size.
    #[must_use]
    pub const fn n(&self) -> u64 {
        self.n
    }

    /// Dimensionality.
    #[must_use]
    pub const fn d(&self) -> u32 {
        self.d
    }

    /// Search-quality parameter.
    #[must_use]
    pub const fn ef_search(&self) -> Option<u32> {
        self.ef_search
    }

    /// Fraction of the true top-10 neighbours returned.
    #[must_use]
    pub const fn recall_at_10(&self) -> Option<f64> {
        self.recall_at_10
    }

    /// Queries per second.
    #[must_use]
    pub const fn qps(&self) -> Option<f64> {
        self.qps
    }

    /// Median latency in milliseconds.
    #[must_use]
    pub const fn p50_ms(&self) -> Option<f64> {
        self.p50_ms
    }

    /// 95th percentile latency in milliseconds.
    #[must_use]
    pub const fn p95_ms(&self) -> Option<f64> {
        self.p95_ms
    }

    /// 99th percentile latency in milliseconds.
    #[must_use]
    pub const fn p99_ms(&self) -> Option<f64> {
        self.p99_ms
    }
}

/// Builder for `QueryRecord`.
#[derive(Debug)]
pub struct QueryRecordBuilder {
    inner: QueryRecord,
}

impl QueryRecordBuilder {
    /// Create a new builder with required fields.
    #[must_use]
    pub const fn new(n: u64, d: u32) -> Self {
        Self {
            inner: QueryRecord::new(n, d),
        }
    }

    /// Set `ef_search`.
    #[must_use]
    pub const fn ef_search(mut self, ef: u32) -> Self {
        self.inner.ef_search = Some(ef);
        self
    }

    /// Set recall@10.
    #[must_use]
    pub const fn recall_at_10(mut self, recall: f64) -> Self {
        self.inner.recall_at_10 = Some(recall);
        self
    }

    /// Set throughput.
    #[must_use]
    pub const fn qps(mut self, qps: f64) -> Self {
        self.inner.qps = Some(qps);
        self
    }

    /// Set all three latency percentiles (milliseconds).
    #[must_use]
    pub const fn latency_ms(mut self, p50: f64, p95: f64, p99: f64) -> Self {
        self.inner.p50_ms = Some(p50);
        self.inner.p95_ms = Some(p95);
        self.inner.p99_ms = Some(p99);
        self
    }

    /// Set the median latency only.
    #[must_use]
    pub const fn p50_ms(mut self, ms: f64) -> Self {
        self.inner.p50_ms = Some(ms);
        self
    }

    /// Set the 95th percentile latency only.
    #[must_use]
    pub const fn p95_ms(mut self, ms: f64) -> Self {
        self.inner.p95_ms = Some(ms);
        self
    }

    /// Set the 99th percentile latency only.
    #[must_use]
    pub const fn p99_ms(mut self, ms: f64) -> Self {
        self.inner.p99_ms = Some(ms);
        self
    }

    /// Build the `QueryRecord`.
    #[must_use]
    pub const fn build(self) -> QueryRecord {
        self.inner
    }
}
