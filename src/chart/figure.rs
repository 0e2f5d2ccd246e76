//! Figure - an explicit, per-chart drawing canvas
//!
//! The SVG backend only borrows the figure's buffer for the duration of
//! [`Figure::draw`]. Saving consumes the figure.

use plotters::coord::Shift;
use plotters::drawing::DrawingAreaErrorKind;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::path::PathBuf;

use super::{ChartSpec, LegendPosition, Marker};
use crate::artifact::ArtifactWriter;
use crate::{Error, Result};

/// Line colours, cycled by line index.
const PALETTE: [RGBColor; 6] = [
    RGBColor(31, 119, 180),
    RGBColor(255, 127, 14),
    RGBColor(44, 160, 44),
    RGBColor(214, 39, 40),
    RGBColor(148, 103, 189),
    RGBColor(0, 217, 255),
];

const MARKER_SIZE: i32 = 5;

/// A single chart canvas rendered to SVG in memory.
#[derive(Debug)]
pub struct Figure {
    size: (u32, u32),
    svg: String,
}

impl Figure {
    /// Create an empty `(width, height)` canvas.
    #[must_use]
    pub const fn new(size: (u32, u32)) -> Self {
        Self {
            size,
            svg: String::new(),
        }
    }

    /// Draw `spec` onto the canvas, replacing any previous drawing.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Render`] if plotting fails.
    pub fn draw(&mut self, spec: &ChartSpec) -> Result<()> {
        self.svg.clear();
        let outcome = {
            let root = SVGBackend::with_string(&mut self.svg, self.size).into_drawing_area();
            draw_chart(&root, spec).and_then(|()| root.present())
        };
        outcome.map_err(|e| Error::Render(format!("{}: {e}", spec.file_name())))
    }

    /// Rendered SVG document.
    #[must_use]
    pub fn svg(&self) -> &str {
        &self.svg
    }

    /// Save the rendered document as `name`, releasing the canvas.
    ///
    /// # Errors
    ///
    /// Propagates [`ArtifactWriter::save`] errors.
    pub fn save(self, name: &str, writer: &mut ArtifactWriter) -> Result<PathBuf> {
        writer.save(name, self.svg.as_bytes())
    }
}

fn draw_chart<DB>(
    root: &DrawingArea<DB, Shift>,
    spec: &ChartSpec,
) -> std::result::Result<(), DrawingAreaErrorKind<DB::ErrorType>>
where
    DB: DrawingBackend,
    DB::ErrorType: 'static,
{
    root.fill(&WHITE)?;

    let (x_lo, x_hi) = spec.x_range();
    let (y_lo, y_hi) = spec.y_range();

    let mut chart = ChartBuilder::on(root)
        .caption(spec.title(), ("sans-serif", 24))
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(80)
        .build_cartesian_2d(x_lo..x_hi, y_lo..y_hi)?;

    chart
        .configure_mesh()
        .x_desc(spec.x_desc())
        .y_desc(spec.y_desc())
        .light_line_style(BLACK.mix(0.05))
        .bold_line_style(BLACK.mix(0.15))
        .x_label_formatter(&|v: &f64| format!("{v:.0}"))
        .draw()?;

    for (idx, line) in spec.lines().iter().enumerate() {
        let color = PALETTE[idx % PALETTE.len()];

        if spec.fill_to_baseline() {
            if let (Some(first), Some(last)) = (line.points().first(), line.points().last()) {
                let mut outline = line.points().to_vec();
                outline.push((last.0, y_lo));
                outline.push((first.0, y_lo));
                chart.draw_series(std::iter::once(Polygon::new(outline, color.mix(0.3).filled())))?;
            }
        }

        let stroke = color.stroke_width(2);
        chart
            .draw_series(LineSeries::new(line.points().iter().copied(), stroke))?
            .label(line.label())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 24, y)], stroke));

        let points = line.points().iter().copied();
        match line.marker() {
            Marker::Circle => {
                chart.draw_series(points.map(|p| Circle::new(p, MARKER_SIZE, color.filled())))?;
            }
            Marker::Square => {
                chart.draw_series(points.map(|p| {
                    EmptyElement::at(p)
                        + Rectangle::new(
                            [(-MARKER_SIZE, -MARKER_SIZE), (MARKER_SIZE, MARKER_SIZE)],
                            color.filled(),
                        )
                }))?;
            }
            Marker::Triangle => {
                chart.draw_series(
                    points.map(|p| TriangleMarker::new(p, MARKER_SIZE + 1, color.filled())),
                )?;
            }
        }
    }

    let label_style = TextStyle::from(("sans-serif", 13).into_font())
        .pos(Pos::new(HPos::Center, VPos::Bottom));
    chart.draw_series(
        spec.annotations()
            .iter()
            .map(|a| Text::new(a.text.clone(), a.at, label_style.clone())),
    )?;

    chart
        .configure_series_labels()
        .position(match spec.legend() {
            LegendPosition::UpperLeft => SeriesLabelPosition::UpperLeft,
            LegendPosition::UpperRight => SeriesLabelPosition::UpperRight,
            LegendPosition::LowerRight => SeriesLabelPosition::LowerRight,
        })
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK.mix(0.3))
        .draw()?;

    Ok(())
}
