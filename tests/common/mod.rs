use approx::assert_abs_diff_eq;
use servetrack::{CourtCorners, CourtDefinition, CourtProjection, Observation, Point2D};

/// Corners equal to the canonical square: the mapping is the identity.
pub fn identity_court() -> CourtDefinition {
    CourtDefinition::Corners(CourtCorners::from_flat([
        0.0, 0.0, 900.0, 0.0, 900.0, 900.0, 0.0, 900.0,
    ]))
}

/// Court seen from behind the baseline by a raised camera: the far side is narrower.
pub fn broadcast_corners() -> CourtCorners {
    CourtCorners::from_flat([412.0, 180.0, 868.0, 183.0, 1190.0, 655.0, 88.0, 650.0])
}

/// Turn a canonical flight path into pixel observations, one every `dt` seconds.
pub fn observations_along<P: CourtProjection>(
    projection: &P,
    path: &[(f64, f64)],
    dt: f64,
) -> Vec<Observation> {
    path.iter()
        .enumerate()
        .map(|(i, &(tx, ty))| {
            let pixel = projection.to_pixel(Point2D::new(tx, ty));
            Observation::new(i as f64 * dt, pixel, 0.9)
        })
        .collect()
}

pub fn assert_point_close(actual: Point2D, expected: Point2D, epsilon: f64) {
    assert_abs_diff_eq!(actual.x, expected.x, epsilon = epsilon);
    assert_abs_diff_eq!(actual.y, expected.y, epsilon = epsilon);
}
