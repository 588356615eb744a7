use anyhow::{anyhow, Result};
use nalgebra as na;
use rand::distributions::Distribution;
use statrs::distribution::Normal;

/// Mean of the synthetic distribution
pub const MEAN: (f64, f64) = (1.0, 1.0);

/// Number of synthetic samples
pub const NUM_SAMPLES: usize = 100;

/// Covariance of the synthetic distribution
pub fn true_covariance() -> na::Matrix2<f64> {
    na::Matrix2::new(5.0, 4.0, 4.0, 6.0)
}

/// Draws correlated samples from a bivariate normal distribution by coloring standard normal
/// draws with the Cholesky factor of `covariance`.
pub fn correlated_samples(
    mean: na::Point2<f64>,
    covariance: na::Matrix2<f64>,
    n: usize,
) -> Result<Vec<na::Point2<f64>>> {
    let l = covariance
        .cholesky()
        .ok_or(anyhow!("Covariance is not positive definite"))?
        .l();
    let normal = Normal::new(0.0, 1.0)?;
    let mut rng = rand::thread_rng();

    Ok((0..n)
        .map(|_| {
            let z = na::Vector2::new(normal.sample(&mut rng), normal.sample(&mut rng));
            mean + l * z
        })
        .collect())
}

pub fn init_logging() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();
}
