use std::fmt::{self, Display, Formatter};
use std::ops::Deref;

use nalgebra as na;
use thiserror::Error;
use tracing::trace;

#[derive(Debug, Error, PartialEq)]
pub enum CovarianceError {
    #[error("At least two samples are required to estimate a covariance, got {0}")]
    InsufficientSamples(usize),

    #[error("Samples contain NaN or infinite values")]
    NonFiniteSamples,
}

/// A 2x2 covariance matrix of a planar distribution.
///
/// The matrix is assumed to be symmetric. This is not checked: the eigendecomposition only reads
/// the lower triangle, so an asymmetric input silently behaves like its lower-triangle mirror.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CovarianceMatrix<F: na::RealField + Copy>(na::Matrix2<F>);

/// One eigenvalue of a covariance matrix together with its unit eigenvector.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EigenPair<F: na::RealField + Copy> {
    pub value: F,
    pub vector: na::Vector2<F>,
}

/// Eigen pairs of a covariance matrix, sorted by descending eigenvalue.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PrincipalAxes<F: na::RealField + Copy> {
    /// Pair with the largest eigenvalue
    pub major: EigenPair<F>,
    /// Pair with the smallest eigenvalue
    pub minor: EigenPair<F>,
}

impl<F: na::RealField + Copy> CovarianceMatrix<F> {
    pub fn new(matrix: na::Matrix2<F>) -> Self {
        Self(matrix)
    }

    /// Builds the matrix `[[var_x, cov_xy], [cov_xy, var_y]]`.
    pub fn from_components(var_x: F, var_y: F, cov_xy: F) -> Self {
        Self(na::Matrix2::new(var_x, cov_xy, cov_xy, var_y))
    }

    /// Unbiased sample covariance (normalized by `N - 1`) of a set of planar points.
    ///
    /// Collinear samples give a singular matrix whose smallest eigenvalue may round slightly
    /// below zero, which [`ConfidenceEllipse::from_covariance`] rejects.
    ///
    /// [`ConfidenceEllipse::from_covariance`]: crate::geom::ellipse::ConfidenceEllipse::from_covariance
    pub fn from_samples(samples: &[na::Point2<F>]) -> Result<Self, CovarianceError> {
        let mean = sample_mean(samples)?;
        let n: F = na::convert(samples.len() as f64);

        let scatter = samples
            .iter()
            .map(|p| {
                let d = *p - mean;
                d * d.transpose()
            })
            .fold(na::Matrix2::zeros(), |acc, m| acc + m);

        Ok(Self(scatter / (n - F::one())))
    }

    pub fn var_x(&self) -> F {
        self.0[(0, 0)]
    }

    pub fn var_y(&self) -> F {
        self.0[(1, 1)]
    }

    /// Off-diagonal term, read from the lower triangle.
    pub fn cov_xy(&self) -> F {
        self.0[(1, 0)]
    }

    /// Symmetric eigendecomposition with the pairs sorted by descending eigenvalue.
    ///
    /// Returns `None` if the matrix contains NaN or infinite values. When both eigenvalues are
    /// equal the pair stored second by the solver is reported as the major one.
    pub fn principal_axes(&self) -> Option<PrincipalAxes<F>> {
        if self.0.iter().any(|v| !v.is_finite()) {
            return None;
        }

        let eigen = self.0.symmetric_eigen();
        let pair = |i: usize| EigenPair {
            value: eigen.eigenvalues[i],
            vector: eigen.eigenvectors.column(i).into_owned(),
        };
        let (first, second) = (pair(0), pair(1));
        trace!(?first, ?second, "symmetric eigendecomposition");

        let (major, minor) = if second.value >= first.value {
            (second, first)
        } else {
            (first, second)
        };

        Some(PrincipalAxes { major, minor })
    }
}

/// Arithmetic mean of a set of planar points.
pub fn sample_mean<F: na::RealField + Copy>(
    samples: &[na::Point2<F>],
) -> Result<na::Point2<F>, CovarianceError> {
    if samples.len() < 2 {
        return Err(CovarianceError::InsufficientSamples(samples.len()));
    }
    if samples.iter().any(|p| !(p.x.is_finite() && p.y.is_finite())) {
        return Err(CovarianceError::NonFiniteSamples);
    }

    let n: F = na::convert(samples.len() as f64);
    let sum = samples
        .iter()
        .fold(na::Vector2::zeros(), |acc, p| acc + p.coords);

    Ok(na::Point2::from(sum / n))
}

impl<F: na::RealField + Copy> From<na::Matrix2<F>> for CovarianceMatrix<F> {
    fn from(matrix: na::Matrix2<F>) -> Self {
        Self(matrix)
    }
}

impl<F: na::RealField + Copy> Deref for CovarianceMatrix<F> {
    type Target = na::Matrix2<F>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<F: na::RealField + Copy> AsRef<na::Matrix2<F>> for CovarianceMatrix<F> {
    fn as_ref(&self) -> &na::Matrix2<F> {
        &self.0
    }
}

impl<F: na::RealField + Copy + Display> Display for CovarianceMatrix<F> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(&self.0, f)
    }
}
