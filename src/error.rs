use crate::geom::ellipse::GeometryError;
use crate::math::covariance::CovarianceError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid ellipse geometry: {0}")]
    InvalidGeometry(#[from] GeometryError),

    #[error(transparent)]
    Covariance(#[from] CovarianceError),

    #[error("Surface '{0}' does not support attaching shapes")]
    MissingCapability(&'static str),

    #[error("Rendering failed: {0}")]
    Render(#[from] anyhow::Error),
}
