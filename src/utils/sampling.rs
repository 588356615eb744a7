use crate::geom::ellipse::ConfidenceEllipse;
use nalgebra as na;

/// Samples `num_points` points along the boundary of an ellipse, evenly spaced in the parametric
/// angle and starting at the positive end of the major axis.
///
/// The polyline is open: the first point is not repeated at the end.
pub fn sample_ellipse_points<F: na::RealField + Copy>(
    ellipse: &ConfidenceEllipse<F>,
    num_points: usize,
) -> Vec<na::Point2<F>> {
    let (a, b) = (ellipse.semi_major(), ellipse.semi_minor());
    let rotation = na::Rotation2::new(ellipse.rotation());
    let n: F = na::convert(num_points as f64);

    (0..num_points)
        .map(|i| {
            let i: F = na::convert(i as f64);
            let t = F::two_pi() * i / n;

            // Point in the ellipse frame, then rotated and moved onto the center
            let local = na::Vector2::new(a * t.cos(), b * t.sin());
            ellipse.center + rotation * local
        })
        .collect()
}

/// Splits a polyline into the visible pieces of a dash pattern.
///
/// `pattern` holds alternating on/off lengths, measured with `distance` so callers can dash in
/// device units while keeping the points in data coordinates. Segments are cut by linear
/// interpolation. An empty pattern or one without positive length yields the polyline unchanged.
pub fn split_dashes<D>(points: &[(f64, f64)], pattern: &[f64], distance: D) -> Vec<Vec<(f64, f64)>>
where
    D: Fn((f64, f64), (f64, f64)) -> f64,
{
    if pattern.iter().sum::<f64>() <= 0.0 || points.len() < 2 {
        return vec![points.to_vec()];
    }

    let mut pieces = Vec::new();
    let mut current = vec![points[0]];
    let mut slot = 0;
    let mut remaining = pattern[0];

    for window in points.windows(2) {
        let (mut start, end) = (window[0], window[1]);
        let mut length = distance(start, end);

        while length > remaining {
            let s = remaining / length;
            let cut = (
                start.0 + (end.0 - start.0) * s,
                start.1 + (end.1 - start.1) * s,
            );

            if slot % 2 == 0 {
                current.push(cut);
                pieces.push(std::mem::take(&mut current));
            } else {
                current = vec![cut];
            }

            length -= remaining;
            start = cut;
            slot = (slot + 1) % pattern.len();
            remaining = pattern[slot];
        }

        remaining -= length;
        if slot % 2 == 0 {
            current.push(end);
        }
    }

    if slot % 2 == 0 && current.len() > 1 {
        pieces.push(current);
    }

    pieces
}
