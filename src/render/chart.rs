use super::style::EllipseStyle;
use super::{EllipsePatch, RenderSurface};
use crate::utils::sampling::{sample_ellipse_points, split_dashes};
use crate::Error;
use anyhow::anyhow;
use plotters::coord::cartesian::Cartesian2d;
use plotters::coord::types::RangedCoordf64;
use plotters::prelude::*;

/// Boundary points used to approximate an ellipse outline.
pub const DEFAULT_RESOLUTION: usize = 200;

/// A [`RenderSurface`] drawing onto a `plotters` chart with `f64` Cartesian axes.
///
/// `plotters` renders immediately, so patches are drawn in the order they are added and
/// `z_order` is not reordered here. Use a [`Canvas`](super::canvas::Canvas) and
/// [`Canvas::replay`](super::canvas::Canvas::replay) to get z-ordered output.
pub struct ChartSurface<'c, 'a, DB: DrawingBackend> {
    chart: &'c mut ChartContext<'a, DB, Cartesian2d<RangedCoordf64, RangedCoordf64>>,
    resolution: usize,
}

impl<'c, 'a, DB: DrawingBackend> ChartSurface<'c, 'a, DB> {
    pub fn new(
        chart: &'c mut ChartContext<'a, DB, Cartesian2d<RangedCoordf64, RangedCoordf64>>,
    ) -> Self {
        Self {
            chart,
            resolution: DEFAULT_RESOLUTION,
        }
    }

    /// Sets the number of boundary points per ellipse, at least 3.
    pub fn with_resolution(mut self, resolution: usize) -> Self {
        self.resolution = resolution.max(3);
        self
    }
}

fn shape_style(style: &EllipseStyle) -> ShapeStyle {
    let c = style.edge_color;
    ShapeStyle {
        color: RGBAColor(c.r, c.g, c.b, style.alpha),
        filled: false,
        stroke_width: style.line_width.round().max(1.0) as u32,
    }
}

impl<'c, 'a, DB: DrawingBackend> RenderSurface<f64> for ChartSurface<'c, 'a, DB> {
    fn name(&self) -> &'static str {
        "plotters-chart"
    }

    fn add_patch(&mut self, patch: EllipsePatch<f64>) -> Result<(), Error> {
        let mut outline: Vec<(f64, f64)> =
            sample_ellipse_points(&patch.geometry, self.resolution)
                .iter()
                .map(|p| (p.x, p.y))
                .collect();
        if let Some(&first) = outline.first() {
            outline.push(first);
        }

        let pieces = match patch.style.line_style.dash_pattern() {
            None => vec![outline],
            Some(pattern) => {
                // Dash lengths scale with the stroke and are measured in pixels
                let scale = patch.style.line_width.max(1.0);
                let pattern: Vec<f64> = pattern.iter().map(|l| l * scale).collect();
                let chart = &*self.chart;
                split_dashes(&outline, &pattern, |a, b| {
                    let (ax, ay) = chart.backend_coord(&a);
                    let (bx, by) = chart.backend_coord(&b);
                    f64::from(bx - ax).hypot(f64::from(by - ay))
                })
            }
        };

        let style = shape_style(&patch.style);
        self.chart
            .draw_series(pieces.into_iter().map(|piece| PathElement::new(piece, style)))
            .map_err(|e| anyhow!("Failed to draw ellipse patch: {}", e))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::covariance::CovarianceMatrix;
    use crate::render::draw_error_ellipse;
    use crate::render::style::{Color, LineStyle};
    use anyhow::Result;

    fn render_svg(style: &EllipseStyle) -> Result<String> {
        let mut svg = String::new();
        {
            let root = SVGBackend::with_string(&mut svg, (400, 400)).into_drawing_area();
            let mut chart = ChartBuilder::on(&root).build_cartesian_2d(-5.0..5.0, -5.0..5.0)?;

            let mut surface = ChartSurface::new(&mut chart).with_resolution(64);
            let cov = CovarianceMatrix::from_components(4.0, 1.0, 0.5);
            draw_error_ellipse(&mut surface, 0.0, 0.0, &cov, 1.0, style)?;

            root.present()?;
        }
        Ok(svg)
    }

    #[test]
    fn test_solid_outline() -> Result<()> {
        let svg = render_svg(&EllipseStyle::default().with_edge_color(Color::RED))?;

        assert_eq!(svg.matches("<polyline").count(), 1);
        assert!(svg.contains("#FF0000"));

        Ok(())
    }

    #[test]
    fn test_dashed_outline() -> Result<()> {
        let style = EllipseStyle::default()
            .with_edge_color(Color::BLUE)
            .with_line_style(LineStyle::Dashed);
        let svg = render_svg(&style)?;

        assert!(svg.matches("<polyline").count() > 1);
        assert!(svg.contains("#0000FF"));

        Ok(())
    }

    #[test]
    fn test_resolution_floor() -> Result<()> {
        let mut svg = String::new();
        let root = SVGBackend::with_string(&mut svg, (100, 100)).into_drawing_area();
        let mut chart = ChartBuilder::on(&root).build_cartesian_2d(-1.0..1.0, -1.0..1.0)?;

        let surface = ChartSurface::new(&mut chart).with_resolution(0);
        assert_eq!(surface.resolution, 3);

        Ok(())
    }
}
