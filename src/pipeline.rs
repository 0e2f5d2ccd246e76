//! Report pipeline
//!
//! Runs the stages in a fixed order:
//!
//! ```text
//! RecordReader -> SchemaClassifier -> charts (recall, qps, latency, build time)
//!                                  -> summary table
//! ```
//!
//! A metric without qualifying records, or a sweep without any `ef_search`
//! rows, is skipped and noted in the [`RunReport`]. Everything else that goes
//! wrong aborts the run.

use serde::Serialize;
use std::fmt;
use std::path::PathBuf;

use crate::artifact::{ArtifactRecord, ArtifactWriter};
use crate::chart::ChartRenderer;
use crate::config::ReportConfig;
use crate::reader::RecordReader;
use crate::record::{BenchRecord, ClassifyStats, SchemaClassifier};
use crate::series::{Metric, SeriesBuilder};
use crate::summary::SummaryTable;
use crate::{Error, Result};

/// An output that was not produced because there was nothing to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipNotice {
    /// No record qualified for this metric's chart(s)
    Metric(Metric),
    /// No query record carried `ef_search`
    SummaryTable,
}

impl fmt::Display for SkipNotice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Metric(metric) => write!(f, "No {metric} data found, skipping chart"),
            Self::SummaryTable => f.write_str("No query data found, skipping summary table"),
        }
    }
}

/// Outcome of a successful run.
#[derive(Debug, Clone, Serialize)]
pub struct RunReport {
    /// Data rows read from the results file
    pub rows_loaded: usize,
    /// Classification counters
    pub stats: ClassifyStats,
    /// Skipped outputs, in pipeline order
    pub skipped: Vec<SkipNotice>,
    /// Artifacts written, in save order
    pub artifacts: Vec<ArtifactRecord>,
    /// Console rendering of the summary, if enabled and produced
    pub console_summary: Option<String>,
    /// Directory the artifacts were written to
    pub output_dir: PathBuf,
}

/// Drives one report run.
#[derive(Debug, Clone)]
pub struct ReportPipeline {
    config: ReportConfig,
    root: PathBuf,
}

impl ReportPipeline {
    /// Pipeline resolving relative paths against the current directory.
    #[must_use]
    pub fn new(config: ReportConfig) -> Self {
        Self {
            config,
            root: PathBuf::from("."),
        }
    }

    /// Resolve relative config paths against `root` instead.
    #[must_use]
    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = root.into();
        self
    }

    /// Results file this pipeline reads.
    #[must_use]
    pub fn input_path(&self) -> PathBuf {
        self.config.input_path(&self.root)
    }

    /// Directory this pipeline writes to.
    #[must_use]
    pub fn output_dir(&self) -> PathBuf {
        self.config.output_dir_path(&self.root)
    }

    /// Read, classify, render and write everything.
    ///
    /// # Errors
    ///
    /// Returns the first fatal error: [`Error::InputNotFound`],
    /// [`Error::MalformedInput`], [`Error::SchemaViolation`],
    /// [`Error::Render`], [`Error::Config`] or [`Error::Io`].
    pub fn run(&self) -> Result<RunReport> {
        self.config.validate()?;

        let input = self.input_path();
        let reader = RecordReader::open(&input)?;
        tracing::info!(rows = reader.len(), path = %input.display(), "loaded benchmark results");

        let mut classifier = SchemaClassifier::new();
        let records = classifier.classify(&reader)?;

        let mut writer = ArtifactWriter::create(self.output_dir())?;
        let mut skipped = Vec::new();

        self.render_charts(&records, &mut writer, &mut skipped)?;
        let console_summary = self.write_summary(&records, &mut writer, &mut skipped)?;

        Ok(RunReport {
            rows_loaded: reader.len(),
            stats: classifier.stats(),
            skipped,
            output_dir: writer.dir().to_path_buf(),
            artifacts: writer.into_written(),
            console_summary,
        })
    }

    fn render_charts(
        &self,
        records: &[BenchRecord],
        writer: &mut ArtifactWriter,
        skipped: &mut Vec<SkipNotice>,
    ) -> Result<()> {
        let renderer = ChartRenderer::new(self.config.chart_size())
            .recall_labels(self.config.recall_labels());
        let builder = SeriesBuilder::new(records);

        for metric in Metric::ALL {
            match builder.build(metric) {
                Ok(series) => {
                    let paths = renderer.render(&series, writer)?;
                    tracing::debug!(%metric, charts = paths.len(), "rendered metric");
                }
                Err(Error::NoDataForMetric(metric)) => {
                    tracing::warn!(%metric, "no qualifying records, skipping chart");
                    skipped.push(SkipNotice::Metric(metric));
                }
                Err(e) => return Err(e),
            }
        }
        Ok(())
    }

    fn write_summary(
        &self,
        records: &[BenchRecord],
        writer: &mut ArtifactWriter,
        skipped: &mut Vec<SkipNotice>,
    ) -> Result<Option<String>> {
        match SummaryTable::from_records(records) {
            Ok(table) => {
                writer.save(SummaryTable::FILE_NAME, table.to_markdown().as_bytes())?;
                Ok(self.config.console_summary().then(|| table.to_console()))
            }
            Err(Error::EmptyResultSet) => {
                tracing::warn!("no query rows with ef_search, skipping summary table");
                skipped.push(SkipNotice::SummaryTable);
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }
}
