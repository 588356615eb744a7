use crate::math::covariance::{CovarianceMatrix, PrincipalAxes};
use nalgebra as na;
use thiserror::Error;
use tracing::trace;

#[derive(Debug, Error, PartialEq)]
pub enum GeometryError {
    #[error("Covariance matrix has negative eigenvalue {0}, it is not positive semi-definite")]
    NegativeEigenvalue(f64),

    #[error("Covariance matrix contains NaN or infinite values")]
    NonFinite,
}

/// A confidence ellipse derived from a covariance matrix at a given number of standard deviations.
///
/// `width` and `height` are full axis lengths (diameters), not semi-axes. `width` lies along the
/// eigenvector of the largest eigenvalue, so `width >= height` always holds. `angle` is in degrees,
/// counter-clockwise from the positive x-axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConfidenceEllipse<F: na::RealField + Copy> {
    pub center: na::Point2<F>,
    pub width: F,
    pub height: F,
    pub angle: F,
}

impl<F: na::RealField + Copy> ConfidenceEllipse<F> {
    /// Derives the ellipse enclosing `sigma` standard deviations of the distribution described by
    /// `covariance`, centered at `center`.
    ///
    /// `sigma` is not validated.
    ///
    /// # Errors
    /// * [`GeometryError::NonFinite`] - if the covariance matrix contains NaN or infinite values
    /// * [`GeometryError::NegativeEigenvalue`] - if the covariance matrix is not positive
    ///   semi-definite. Eigenvalues are not clamped, so a singular matrix whose smallest
    ///   eigenvalue rounds to a tiny negative value (for instance the covariance of collinear
    ///   samples) is rejected as well.
    pub fn from_covariance(
        center: na::Point2<F>,
        covariance: &CovarianceMatrix<F>,
        sigma: F,
    ) -> Result<Self, GeometryError> {
        let PrincipalAxes { major, minor } = covariance
            .principal_axes()
            .ok_or(GeometryError::NonFinite)?;

        for value in [major.value, minor.value] {
            if value < F::zero() {
                return Err(GeometryError::NegativeEigenvalue(
                    value.to_subset_unchecked(),
                ));
            }
        }

        let v = canonical_direction(major.vector);
        let angle = to_degrees(v[1].atan2(v[0]));

        let two: F = na::convert(2.0);
        let ellipse = Self {
            center,
            width: two * sigma * major.value.sqrt(),
            height: two * sigma * minor.value.sqrt(),
            angle,
        };
        trace!(?ellipse, "derived confidence ellipse");

        Ok(ellipse)
    }

    pub fn semi_major(&self) -> F {
        let two: F = na::convert(2.0);
        self.width / two
    }

    pub fn semi_minor(&self) -> F {
        let two: F = na::convert(2.0);
        self.height / two
    }

    /// Rotation in radians
    pub fn rotation(&self) -> F {
        let half_turn: F = na::convert(180.0);
        self.angle * F::pi() / half_turn
    }

    /// Unit vector along the major axis.
    pub fn major_direction(&self) -> na::Vector2<F> {
        let theta = self.rotation();
        na::Vector2::new(theta.cos(), theta.sin())
    }

    /// Whether `point` lies inside or on the boundary of the ellipse.
    ///
    /// For a non-singular covariance this is the same as the Mahalanobis distance of `point` being
    /// at most `sigma`. A degenerate ellipse contains only the segment along its major axis.
    pub fn contains(&self, point: &na::Point2<F>) -> bool {
        let (a, b) = (self.semi_major().abs(), self.semi_minor().abs());
        let d = *point - self.center;
        let theta = self.rotation();
        let (sin, cos) = (theta.sin(), theta.cos());

        // Coordinates in the ellipse frame
        let u = d.x * cos + d.y * sin;
        let v = -d.x * sin + d.y * cos;

        // Slack for points on the boundary
        let eps: F = na::convert(1e-9);
        let lhs = u * u * b * b + v * v * a * a;
        let rhs = a * a * b * b;

        u.abs() <= a * (F::one() + eps)
            && v.abs() <= b * (F::one() + eps)
            && lhs <= rhs * (F::one() + eps)
    }
}

/// Flips `v` so it points into the right half-plane, or straight up when vertical.
///
/// Eigen solvers are free to return either sign; this pins the angle to (-90, 90] degrees.
fn canonical_direction<F: na::RealField + Copy>(v: na::Vector2<F>) -> na::Vector2<F> {
    if v[0] < F::zero() || (v[0] == F::zero() && v[1] < F::zero()) {
        -v
    } else {
        v
    }
}

fn to_degrees<F: na::RealField + Copy>(radians: F) -> F {
    let half_turn: F = na::convert(180.0);
    radians * half_turn / F::pi()
}
