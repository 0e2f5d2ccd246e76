//! Chart rendering
//!
//! Rendering is split in two steps:
//!
//! 1. [`ChartRenderer::plan`] turns a [`MetricSeries`] into [`ChartSpec`]s:
//!    pure data (file name, title, axis ranges, lines, labels) that can be
//!    inspected in tests.
//! 2. A [`Figure`] is created per spec, drawn, and consumed by the save into
//!    the [`ArtifactWriter`]. No drawing state outlives one chart.

mod figure;

pub use figure::Figure;

use std::path::PathBuf;

use crate::artifact::ArtifactWriter;
use crate::record::SeriesKey;
use crate::series::{Metric, MetricSeries, Series};
use crate::Result;

/// Default canvas size: 10x6 inches at 150 dpi.
pub const DEFAULT_SIZE: (u32, u32) = (1500, 900);

/// Point marker shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Marker {
    /// Filled circle
    Circle,
    /// Filled square
    Square,
    /// Filled triangle
    Triangle,
}

/// Legend placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LegendPosition {
    /// Top left corner
    UpperLeft,
    /// Top right corner
    UpperRight,
    /// Bottom right corner
    LowerRight,
}

/// One drawn line.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartLine {
    label: String,
    marker: Marker,
    points: Vec<(f64, f64)>,
}

impl ChartLine {
    /// Legend label.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Marker drawn at each point.
    #[must_use]
    pub const fn marker(&self) -> Marker {
        self.marker
    }

    /// Points in drawing order, already clamped to the Y range.
    #[must_use]
    pub fn points(&self) -> &[(f64, f64)] {
        &self.points
    }
}

/// Text drawn at a data coordinate.
#[derive(Debug, Clone, PartialEq)]
pub struct Annotation {
    /// Anchor (bottom centre of the text)
    pub at: (f64, f64),
    /// Label text
    pub text: String,
}

/// Everything needed to draw one chart file.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    file_name: String,
    title: String,
    x_desc: &'static str,
    y_desc: &'static str,
    x_range: (f64, f64),
    y_range: (f64, f64),
    lines: Vec<ChartLine>,
    annotations: Vec<Annotation>,
    fill_to_baseline: bool,
    legend: LegendPosition,
}

impl ChartSpec {
    /// Output file name.
    #[must_use]
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Chart caption.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// X axis description.
    #[must_use]
    pub const fn x_desc(&self) -> &'static str {
        self.x_desc
    }

    /// Y axis description.
    #[must_use]
    pub const fn y_desc(&self) -> &'static str {
        self.y_desc
    }

    /// X axis bounds.
    #[must_use]
    pub const fn x_range(&self) -> (f64, f64) {
        self.x_range
    }

    /// Y axis bounds.
    #[must_use]
    pub const fn y_range(&self) -> (f64, f64) {
        self.y_range
    }

    /// Lines in drawing (and legend) order.
    #[must_use]
    pub fn lines(&self) -> &[ChartLine] {
        &self.lines
    }

    /// Per-point text labels.
    #[must_use]
    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    /// Whether the area under each line is shaded.
    #[must_use]
    pub const fn fill_to_baseline(&self) -> bool {
        self.fill_to_baseline
    }

    /// Legend corner.
    #[must_use]
    pub const fn legend(&self) -> LegendPosition {
        self.legend
    }
}

/// Plans and draws charts for a metric.
#[derive(Debug, Clone, Copy)]
pub struct ChartRenderer {
    size: (u32, u32),
    recall_labels: bool,
}

impl Default for ChartRenderer {
    fn default() -> Self {
        Self::new(DEFAULT_SIZE)
    }
}

impl ChartRenderer {
    /// Create a renderer drawing `(width, height)` pixel canvases.
    #[must_use]
    pub const fn new(size: (u32, u32)) -> Self {
        Self {
            size,
            recall_labels: true,
        }
    }

    /// Enable or disable percentage labels on recall points.
    #[must_use]
    pub const fn recall_labels(mut self, enabled: bool) -> Self {
        self.recall_labels = enabled;
        self
    }

    /// Lay out the charts for `series`: one per metric, or one per key for
    /// per-key metrics, in first-seen key order.
    #[must_use]
    pub fn plan(&self, series: &MetricSeries) -> Vec<ChartSpec> {
        let metric = series.metric();
        if metric.is_per_key() {
            series
                .groups()
                .iter()
                .map(|group| self.spec(metric, Some(group.key()), group.lines().iter()))
                .collect()
        } else {
            let lines = series.groups().iter().flat_map(|g| g.lines().iter());
            vec![self.spec(metric, None, lines)]
        }
    }

    /// Draw and save every chart for `series`. Returns the written paths in
    /// order.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Render`] if drawing fails or
    /// [`crate::Error::Io`] if saving fails.
    pub fn render(
        &self,
        series: &MetricSeries,
        writer: &mut ArtifactWriter,
    ) -> Result<Vec<PathBuf>> {
        self.plan(series)
            .iter()
            .map(|spec| {
                let mut figure = Figure::new(self.size);
                figure.draw(spec)?;
                figure.save(spec.file_name(), writer)
            })
            .collect()
    }

    fn spec<'s>(
        &self,
        metric: Metric,
        key: Option<SeriesKey>,
        series: impl Iterator<Item = &'s Series>,
    ) -> ChartSpec {
        let raw: Vec<(&Series, Vec<(f64, f64)>)> = series
            .map(|s| (s, s.points().iter().map(|p| (to_f64(p.x), p.y)).collect()))
            .collect();

        let x_range = x_range(raw.iter().flat_map(|(_, pts)| pts.iter().map(|p| p.0)));
        let y_range = metric.fixed_y_range().unwrap_or_else(|| {
            padded_y_range(raw.iter().flat_map(|(_, pts)| pts.iter().map(|p| p.1)))
        });
        let (y_lo, y_hi) = y_range;

        let mut annotations = Vec::new();
        let lines = raw
            .into_iter()
            .enumerate()
            .map(|(idx, (s, pts))| {
                let points: Vec<(f64, f64)> =
                    pts.iter().map(|&(x, y)| (x, y.clamp(y_lo, y_hi))).collect();

                if metric == Metric::Recall && self.recall_labels {
                    annotations.extend(pts.iter().zip(&points).map(|(&(_, y), &(x, drawn))| {
                        Annotation {
                            at: (x, (drawn + 0.02).min(y_hi)),
                            text: format!("{:.2}%", y * 100.0),
                        }
                    }));
                }

                ChartLine {
                    label: s.label().to_string(),
                    marker: marker_for(metric, idx),
                    points,
                }
            })
            .collect();

        ChartSpec {
            file_name: metric.file_name(key),
            title: metric.title(key),
            x_desc: metric.x_desc(),
            y_desc: metric.y_desc(),
            x_range,
            y_range,
            lines,
            annotations,
            fill_to_baseline: metric == Metric::Recall,
            legend: match metric {
                Metric::Recall => LegendPosition::LowerRight,
                Metric::Qps => LegendPosition::UpperRight,
                Metric::Latency | Metric::BuildTime => LegendPosition::UpperLeft,
            },
        }
    }
}

const fn marker_for(metric: Metric, line_idx: usize) -> Marker {
    match metric {
        Metric::Qps => Marker::Square,
        Metric::Latency => match line_idx {
            0 => Marker::Circle,
            1 => Marker::Square,
            _ => Marker::Triangle,
        },
        Metric::Recall | Metric::BuildTime => Marker::Circle,
    }
}

#[allow(clippy::cast_precision_loss)]
fn to_f64(x: u64) -> f64 {
    x as f64
}

/// Data bounds with 5% padding; a single x value is widened by one unit.
fn x_range(xs: impl Iterator<Item = f64>) -> (f64, f64) {
    let (lo, hi) = xs.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), x| {
        (lo.min(x), hi.max(x))
    });
    if !lo.is_finite() || !hi.is_finite() {
        return (0.0, 1.0);
    }
    let span = hi - lo;
    if span <= f64::EPSILON {
        return (lo - 1.0, hi + 1.0);
    }
    (lo - span * 0.05, hi + span * 0.05)
}

/// Zero-based range with 10% headroom above the largest value.
fn padded_y_range(ys: impl Iterator<Item = f64>) -> (f64, f64) {
    let (lo, hi) = ys.fold((0.0_f64, 0.0_f64), |(lo, hi), y| (lo.min(y), hi.max(y)));
    let lo = if lo < 0.0 { lo * 1.1 } else { 0.0 };
    let hi = if hi > 0.0 { hi * 1.1 } else { 1.0 };
    (lo, hi)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::{BenchRecord, QueryRecord};
    use crate::series::SeriesBuilder;

    fn query(n: u64, d: u32, ef: u32, recall: f64) -> BenchRecord {
        BenchRecord::Query(
            QueryRecord::builder(n, d)
                .ef_search(ef)
                .recall_at_10(recall)
                .qps(1000.0 / f64::from(ef))
                .latency_ms(f64::from(ef) * 0.01, f64::from(ef) * 0.02, f64::from(ef) * 0.03)
                .build(),
        )
    }

    #[test]
    fn test_recall_range_is_fixed_and_points_clamped() {
        let records = vec![query(10, 4, 10, 0.5), query(10, 4, 20, 1.7)];
        let series = SeriesBuilder::new(&records).build(Metric::Recall).unwrap();
        let specs = ChartRenderer::default().plan(&series);

        assert_eq!(specs.len(), 1);
        assert_eq!(specs[0].y_range(), (0.0, 1.05));
        assert_eq!(specs[0].lines()[0].points()[1], (20.0, 1.05));
        assert_eq!(specs[0].annotations()[1].text, "170.00%");
        assert!(specs[0].fill_to_baseline());
    }

    #[test]
    fn test_recall_labels_can_be_disabled() {
        let records = vec![query(10, 4, 10, 0.5)];
        let series = SeriesBuilder::new(&records).build(Metric::Recall).unwrap();
        let specs = ChartRenderer::default().recall_labels(false).plan(&series);
        assert!(specs[0].annotations().is_empty());
    }

    #[test]
    fn test_latency_one_chart_per_key_in_first_seen_order() {
        let records = vec![query(10, 4, 10, 0.5), query(20, 8, 10, 0.5), query(10, 4, 20, 0.6)];
        let series = SeriesBuilder::new(&records).build(Metric::Latency).unwrap();
        let specs = ChartRenderer::default().plan(&series);

        let names: Vec<&str> = specs.iter().map(ChartSpec::file_name).collect();
        assert_eq!(names, vec!["latency_N10_d4.svg", "latency_N20_d8.svg"]);

        let markers: Vec<Marker> = specs[0].lines().iter().map(ChartLine::marker).collect();
        assert_eq!(markers, vec![Marker::Circle, Marker::Square, Marker::Triangle]);
        assert_eq!(specs[0].title(), "Query Latency Percentiles (N=10, d=4)");
    }

    #[test]
    fn test_qps_single_chart_with_line_per_key() {
        let records = vec![query(10, 4, 10, 0.5), query(20, 8, 10, 0.5)];
        let series = SeriesBuilder::new(&records).build(Metric::Qps).unwrap();
        let specs = ChartRenderer::default().plan(&series);

        assert_eq!(specs.len(), 1);
        let labels: Vec<&str> = specs[0].lines().iter().map(ChartLine::label).collect();
        assert_eq!(labels, vec!["N=10, d=4", "N=20, d=8"]);
        assert_eq!(specs[0].x_range(), (9.0, 11.0));
        assert!((specs[0].y_range().1 - 110.0).abs() < 1e-9);
    }

    #[test]
    fn test_ranges() {
        assert_eq!(x_range([10.0, 110.0].into_iter()), (5.0, 115.0));
        assert_eq!(x_range(std::iter::empty()), (0.0, 1.0));
        assert_eq!(padded_y_range(std::iter::empty()), (0.0, 1.0));
    }
}
