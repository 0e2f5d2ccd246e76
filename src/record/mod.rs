//! Typed benchmark records
//!
//! Raw rows become one of two tagged record kinds:
//!
//! ```text
//! RawRow ──classify──> BenchRecord::Build(BuildRecord)   [build_time_s]
//!                  └─> BenchRecord::Query(QueryRecord)   [ef_search, recall, qps, p50/p95/p99]
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use bench_report::record::{BenchRecord, QueryRecord, RunMode, SeriesKey};
//!
//! let record = BenchRecord::Query(
//!     QueryRecord::builder(10_000, 384)
//!         .ef_search(50)
//!         .recall_at_10(0.95)
//!         .build(),
//! );
//!
//! assert_eq!(record.mode(), RunMode::Query);
//! assert_eq!(record.dataset_key(), SeriesKey::Dataset { n: 10_000, d: 384 });
//! ```

mod bench_record;
mod classifier;
mod series_key;

pub use bench_record::{
    BenchRecord, BuildRecord, BuildRecordBuilder, QueryRecord, QueryRecordBuilder, RunMode,
};
pub use classifier::{ClassifyStats, SchemaClassifier};
pub use series_key::SeriesKey;
