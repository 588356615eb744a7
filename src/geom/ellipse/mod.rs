pub mod confidence;

pub use confidence::{ConfidenceEllipse, GeometryError};
