//! Streams correlated samples and their 1, 2 and 3 sigma confidence ellipses to the rerun viewer.

#[path = "common/mod.rs"]
mod common;

use anyhow::Result;
use covellipse::math::covariance::sample_mean;
use covellipse::utils::sampling::sample_ellipse_points;
use covellipse::{
    draw_error_ellipse, Canvas, Color, CovarianceMatrix, EllipsePatch, EllipseStyle, LineStyle,
    RenderSurface,
};
use nalgebra as na;
use rerun as rr;

/// Logs every patch as a closed 2D line strip under `contours/<n>`.
struct RerunSurface<'a> {
    rec: &'a rr::RecordingStream,
    logged: usize,
}

fn to_rr_color(color: Color, alpha: f64) -> rr::Color {
    rr::Color::from_unmultiplied_rgba(color.r, color.g, color.b, (alpha * 255.0).round() as u8)
}

impl RenderSurface<f64> for RerunSurface<'_> {
    fn name(&self) -> &'static str {
        "rerun"
    }

    fn add_patch(&mut self, patch: EllipsePatch<f64>) -> Result<(), covellipse::Error> {
        let mut outline: Vec<rr::datatypes::Vec2D> = sample_ellipse_points(&patch.geometry, 200)
            .iter()
            .map(|p| rr::datatypes::Vec2D::new(p.x as f32, p.y as f32))
            .collect();
        if let Some(&first) = outline.first() {
            outline.push(first);
        }

        if patch.style.line_style != LineStyle::Solid {
            tracing::warn!(style = ?patch.style.line_style, "rerun draws every line solid");
        }

        self.rec.log(
            format!("contours/{}", self.logged),
            &rr::LineStrips2D::new([rr::components::LineStrip2D(outline)])
                .with_colors([to_rr_color(patch.style.edge_color, patch.style.alpha)])
                .with_radii([rr::Radius::new_ui_points(patch.style.line_width as f32)])
                .with_draw_order(patch.style.z_order as f32),
        )
        .map_err(anyhow::Error::from)?;
        self.logged += 1;

        Ok(())
    }
}

fn main() -> Result<()> {
    common::init_logging();

    let rec = rr::RecordingStreamBuilder::new("covellipse_contours").spawn()?;

    let points = common::correlated_samples(
        na::Point2::new(common::MEAN.0, common::MEAN.1),
        common::true_covariance(),
        common::NUM_SAMPLES,
    )?;
    let mean = sample_mean(&points)?;
    let cov = CovarianceMatrix::from_samples(&points)?;

    // Build the scene first, then replay it in z-order
    let mut canvas = Canvas::new();
    canvas.scatter(points.iter().copied(), Color::BLACK);
    for (sigma, color) in [(1.0, Color::RED), (2.0, Color::GREEN), (3.0, Color::BLUE)] {
        let style = EllipseStyle::default().with_edge_color(color);
        draw_error_ellipse(&mut canvas, mean.x, mean.y, &cov, sigma, &style)?;
    }

    rec.log(
        "samples",
        &rr::Points2D::new(
            canvas
                .markers()
                .iter()
                .map(|m| [m.position.x as f32, m.position.y as f32]),
        )
        .with_colors([to_rr_color(Color::BLACK, 1.0)])
        .with_radii([rr::Radius::new_ui_points(3.0)]),
    )?;

    let mut surface = RerunSurface {
        rec: &rec,
        logged: 0,
    };
    canvas.replay(&mut surface)?;

    Ok(())
}
