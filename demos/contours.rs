//! Scatter-plots correlated samples and overlays their 1, 2 and 3 sigma confidence ellipses.
//!
//! Writes an SVG to the path given as first argument, `contours.svg` by default.

#[path = "common/mod.rs"]
mod common;

use anyhow::Result;
use covellipse::math::covariance::sample_mean;
use covellipse::{draw_error_ellipse, ChartSurface, ConfidenceEllipse, CovarianceMatrix, EllipseStyle};
use nalgebra as na;
use plotters::prelude::*;

fn main() -> Result<()> {
    common::init_logging();

    let out = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "contours.svg".to_string());

    let points = common::correlated_samples(
        na::Point2::new(common::MEAN.0, common::MEAN.1),
        common::true_covariance(),
        common::NUM_SAMPLES,
    )?;
    let mean = sample_mean(&points)?;
    let cov = CovarianceMatrix::from_samples(&points)?;
    tracing::info!(%cov, ?mean, "empirical covariance");

    // Frame the outermost contour and every sample
    let outer = ConfidenceEllipse::from_covariance(mean, &cov, 3.0)?;
    let half = points
        .iter()
        .map(|p| (p.x - mean.x).abs().max((p.y - mean.y).abs()))
        .fold(outer.semi_major(), f64::max)
        * 1.1;

    let root = SVGBackend::new(&out, (800, 800)).into_drawing_area();
    root.fill(&WHITE)?;
    let mut chart = ChartBuilder::on(&root)
        .margin(20)
        .build_cartesian_2d((mean.x - half)..(mean.x + half), (mean.y - half)..(mean.y + half))?;

    chart.draw_series(
        points
            .iter()
            .map(|p| Circle::new((p.x, p.y), 3, BLACK.filled())),
    )?;

    let mut surface = ChartSurface::new(&mut chart);
    let contours = [
        (1.0, covellipse::Color::RED),
        (2.0, covellipse::Color::GREEN),
        (3.0, covellipse::Color::BLUE),
    ];
    for (sigma, color) in contours {
        let style = EllipseStyle::default()
            .with_edge_color(color)
            .with_line_width(2.0);
        draw_error_ellipse(&mut surface, mean.x, mean.y, &cov, sigma, &style)?;

        let ellipse = ConfidenceEllipse::from_covariance(mean, &cov, sigma)?;
        let inside = points.iter().filter(|p| ellipse.contains(p)).count();
        tracing::info!(sigma, inside, total = points.len(), "samples inside contour");
    }

    root.present()?;
    tracing::info!(path = %out, "wrote figure");

    Ok(())
}
