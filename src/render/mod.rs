pub mod canvas;
pub mod chart;
pub mod style;

use crate::geom::ellipse::ConfidenceEllipse;
use crate::math::covariance::CovarianceMatrix;
use crate::Error;
use nalgebra as na;
use style::{EllipseStyle, Fill};
use tracing::debug;

/// Number of standard deviations drawn when the caller has no preference.
pub const DEFAULT_SIGMA: f64 = 1.0;

/// An ellipse outline ready to be attached to a [`RenderSurface`].
#[derive(Debug, Clone, PartialEq)]
pub struct EllipsePatch<F: na::RealField + Copy> {
    pub geometry: ConfidenceEllipse<F>,
    /// Caller's style with `fill` reset to [`Fill::None`]
    pub style: EllipseStyle,
    /// Always [`Fill::None`]
    pub fill: Fill,
}

impl<F: na::RealField + Copy> EllipsePatch<F> {
    /// Builds an unfilled patch. A solid fill in `style` is dropped.
    pub fn new(geometry: ConfidenceEllipse<F>, style: EllipseStyle) -> Self {
        Self {
            geometry,
            style: style.with_fill(Fill::None),
            fill: Fill::None,
        }
    }
}

/// A drawable surface owned by the caller, such as a chart or a canvas.
pub trait RenderSurface<F: na::RealField + Copy> {
    /// Name used in diagnostics
    fn name(&self) -> &'static str;

    /// Attaches `patch` as a persistent overlay.
    ///
    /// Surfaces that cannot hold shapes keep the default, which reports
    /// [`Error::MissingCapability`].
    fn add_patch(&mut self, _patch: EllipsePatch<F>) -> Result<(), Error> {
        Err(Error::MissingCapability(self.name()))
    }
}

/// Draws the `sigma` confidence ellipse of `covariance` around `(center_x, center_y)` onto
/// `surface`.
///
/// The geometry is fully derived before the surface is touched, so on error nothing is attached.
/// Calling this repeatedly on one surface with different `sigma` yields nested, independent
/// ellipses.
///
/// # Errors
/// * [`Error::InvalidGeometry`] - if `covariance` is not positive semi-definite or not finite
/// * [`Error::MissingCapability`] - if `surface` cannot attach shapes
/// * [`Error::Render`] - if the surface's back end fails to draw
pub fn draw_error_ellipse<F, S>(
    surface: &mut S,
    center_x: F,
    center_y: F,
    covariance: &CovarianceMatrix<F>,
    sigma: F,
    style: &EllipseStyle,
) -> Result<(), Error>
where
    F: na::RealField + Copy,
    S: RenderSurface<F> + ?Sized,
{
    let geometry =
        ConfidenceEllipse::from_covariance(na::Point2::new(center_x, center_y), covariance, sigma)?;

    debug!(
        surface = surface.name(),
        center = ?geometry.center,
        width = ?geometry.width,
        height = ?geometry.height,
        angle = ?geometry.angle,
        "drawing confidence ellipse"
    );

    surface.add_patch(EllipsePatch::new(geometry, style.clone()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::ellipse::GeometryError;
    use crate::render::canvas::Canvas;
    use crate::render::style::Color;
    use anyhow::Result;
    use approx::assert_relative_eq;

    /// A surface that only supports scatter data.
    struct PointsOnly;

    impl RenderSurface<f64> for PointsOnly {
        fn name(&self) -> &'static str {
            "points-only"
        }
    }

    #[test]
    fn test_draw_attaches_patch() -> Result<()> {
        let mut canvas = Canvas::new();
        let cov = CovarianceMatrix::from_components(4.0, 1.0, 0.0);
        let style = EllipseStyle::default().with_edge_color(Color::RED);

        draw_error_ellipse(&mut canvas, 1.0, -2.0, &cov, DEFAULT_SIGMA, &style)?;

        let patches = canvas.patches();
        assert_eq!(patches.len(), 1);

        let patch = patches[0];
        assert_relative_eq!(patch.geometry.center.x, 1.0);
        assert_relative_eq!(patch.geometry.center.y, -2.0);
        assert_relative_eq!(patch.geometry.width, 4.0, epsilon = 1e-12);
        assert_relative_eq!(patch.geometry.height, 2.0, epsilon = 1e-12);
        assert_relative_eq!(patch.geometry.angle, 0.0, epsilon = 1e-9);
        assert_eq!(patch.style.edge_color, Color::RED);

        Ok(())
    }

    #[test]
    fn test_fill_is_always_none() -> Result<()> {
        let mut canvas = Canvas::new();
        let cov = CovarianceMatrix::from_components(2.0, 1.0, 0.5);
        let style = EllipseStyle::default().with_fill(Fill::Solid(Color::BLUE));

        draw_error_ellipse(&mut canvas, 0.0, 0.0, &cov, 1.0, &style)?;

        let patch = canvas.patches()[0];
        assert_eq!(patch.fill, Fill::None);
        assert_eq!(patch.style.fill, Fill::None);
        // Everything but the fill is forwarded
        assert_eq!(patch.style, style.clone().with_fill(Fill::None));
        assert_eq!(style.fill, Fill::Solid(Color::BLUE));

        Ok(())
    }

    #[test]
    fn test_nested_sigma_contours() -> Result<()> {
        let mut canvas = Canvas::new();
        let cov = CovarianceMatrix::from_components(5.0, 6.0, 4.0);
        let colors = [Color::RED, Color::GREEN, Color::BLUE];

        for (sigma, color) in [1.0, 2.0, 3.0].into_iter().zip(colors) {
            let style = EllipseStyle::default().with_edge_color(color);
            draw_error_ellipse(&mut canvas, 1.0, 1.0, &cov, sigma, &style)?;
        }

        let patches = canvas.patches();
        assert_eq!(patches.len(), 3);

        let base = patches[0].geometry;
        for (i, patch) in patches.iter().enumerate() {
            let k = (i + 1) as f64;
            assert_eq!(patch.style.edge_color, colors[i]);
            assert_relative_eq!(patch.geometry.width, k * base.width, epsilon = 1e-12);
            assert_relative_eq!(patch.geometry.height, k * base.height, epsilon = 1e-12);
            assert_relative_eq!(patch.geometry.angle, base.angle, epsilon = 1e-12);
        }

        Ok(())
    }

    #[test]
    fn test_identical_inputs_on_fresh_surfaces() -> Result<()> {
        let cov = CovarianceMatrix::from_components(3.0, 2.0, -1.2);
        let style = EllipseStyle::default();

        let mut first = Canvas::new();
        let mut second = Canvas::new();
        draw_error_ellipse(&mut first, 0.5, 0.25, &cov, 2.0, &style)?;
        draw_error_ellipse(&mut second, 0.5, 0.25, &cov, 2.0, &style)?;

        let (e1, e2) = (first.patches()[0].geometry, second.patches()[0].geometry);
        assert_relative_eq!(e1.center.x, e2.center.x);
        assert_relative_eq!(e1.center.y, e2.center.y);
        assert_relative_eq!(e1.width, e2.width, epsilon = 1e-12);
        assert_relative_eq!(e1.height, e2.height, epsilon = 1e-12);
        assert_relative_eq!(e1.angle, e2.angle, epsilon = 1e-12);

        Ok(())
    }

    #[test]
    fn test_non_psd_attaches_nothing() {
        let mut canvas = Canvas::new();
        let cov = CovarianceMatrix::from_components(1.0, 1.0, 2.0);

        let result = draw_error_ellipse(&mut canvas, 0.0, 0.0, &cov, 1.0, &EllipseStyle::default());

        assert!(matches!(
            result,
            Err(Error::InvalidGeometry(GeometryError::NegativeEigenvalue(_)))
        ));
        assert!(canvas.patches().is_empty());
    }

    #[test]
    fn test_missing_capability() {
        let cov = CovarianceMatrix::from_components(1.0, 1.0, 0.0);
        let result = draw_error_ellipse(
            &mut PointsOnly,
            0.0,
            0.0,
            &cov,
            1.0,
            &EllipseStyle::default(),
        );

        assert!(matches!(result, Err(Error::MissingCapability("points-only"))));
    }

    #[test]
    fn test_geometry_error_wins_over_capability() {
        // Geometry is checked before the surface is asked to attach anything
        let cov = CovarianceMatrix::from_components(f64::NAN, 1.0, 0.0);
        let result = draw_error_ellipse(
            &mut PointsOnly,
            0.0,
            0.0,
            &cov,
            1.0,
            &EllipseStyle::default(),
        );

        assert!(matches!(
            result,
            Err(Error::InvalidGeometry(GeometryError::NonFinite))
        ));
    }

    #[test]
    fn test_dyn_surface() -> Result<()> {
        let mut canvas = Canvas::new();
        let surface: &mut dyn RenderSurface<f64> = &mut canvas;
        let cov = CovarianceMatrix::from_components(1.0, 1.0, 0.0);

        draw_error_ellipse(surface, 0.0, 0.0, &cov, 1.0, &EllipseStyle::default())?;
        assert_eq!(canvas.patches().len(), 1);

        Ok(())
    }
}
