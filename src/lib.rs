//! # bench-report: HNSW Benchmark Results Reporting
//!
//! Turns the flat CSV written by the benchmark harness into charts and a
//! summary table. Rows are either index builds (`mode=build`) or search
//! sweeps (`mode=query`); each kind feeds different outputs.
//!
//! ## Pipeline
//!
//! - [`reader`]: loads `results.csv` into header-keyed raw rows
//! - [`record`]: classifies rows into typed build/query records
//! - [`series`]: groups records per metric into ordered series
//! - [`chart`]: draws one SVG chart per metric (latency: per dataset)
//! - [`summary`]: renders the efSearch trade-off table
//! - [`artifact`]: durable writes into the output directory
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use bench_report::config::ReportConfig;
//! use bench_report::pipeline::ReportPipeline;
//!
//! let report = ReportPipeline::new(ReportConfig::default()).run()?;
//! for artifact in &report.artifacts {
//!     println!("Saved: {}", artifact.path().display());
//! }
//! # Ok::<(), bench_report::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

pub mod artifact;
pub mod chart;
pub mod config;
pub mod error;
pub mod logging;
pub mod pipeline;
pub mod reader;
pub mod record;
pub mod series;
pub mod summary;

pub use error::{Error, Result};
