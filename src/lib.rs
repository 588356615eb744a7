pub mod geom;
pub mod math;
pub mod render;
pub mod utils;

mod error;

pub use error::Error;
pub use geom::ellipse::{ConfidenceEllipse, GeometryError};
pub use math::covariance::{CovarianceError, CovarianceMatrix};
pub use render::canvas::Canvas;
pub use render::chart::ChartSurface;
pub use render::style::{Color, EllipseStyle, Fill, LineStyle};
pub use render::{draw_error_ellipse, EllipsePatch, RenderSurface, DEFAULT_SIGMA};
