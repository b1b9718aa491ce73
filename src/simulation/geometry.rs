//! Geometric helpers shared by sensing and interaction resolution.

use geo::algorithm::Distance;
use geo::{Euclidean, Line, Point};
use ndarray::Array1;

/// Euclidean distance between two 2D positions.
pub fn distance(a: &Array1<f32>, b: &Array1<f32>) -> f32 {
    (a[0] - b[0]).hypot(a[1] - b[1])
}

/// Minimum distance between a line segment and a circle center.
///
/// A vision ray intersects a food circle when this drops below the food
/// radius.
pub fn line_circle_distance(
    line_start: &Array1<f32>,
    line_end: &Array1<f32>,
    circle_center: &Array1<f32>,
) -> f32 {
    let p = Point::new(circle_center[0], circle_center[1]);
    let line = Line::new(
        Point::new(line_start[0], line_start[1]),
        Point::new(line_end[0], line_end[1]),
    );
    Euclidean.distance(&p, &line)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distance_is_symmetric() {
        let a = Array1::from_vec(vec![0.0, 0.0]);
        let b = Array1::from_vec(vec![3.0, 4.0]);
        assert!((distance(&a, &b) - 5.0).abs() < 1e-6);
        assert!((distance(&b, &a) - 5.0).abs() < 1e-6);
    }

    #[test]
    fn segment_distance_to_point_beside_it() {
        let start = Array1::from_vec(vec![0.0, 0.0]);
        let end = Array1::from_vec(vec![10.0, 0.0]);
        let center = Array1::from_vec(vec![5.0, 3.0]);
        assert!((line_circle_distance(&start, &end, &center) - 3.0).abs() < 1e-6);
    }

    #[test]
    fn segment_distance_to_point_past_the_end() {
        let start = Array1::from_vec(vec![0.0, 0.0]);
        let end = Array1::from_vec(vec![10.0, 0.0]);
        let center = Array1::from_vec(vec![14.0, 3.0]);
        assert!((line_circle_distance(&start, &end, &center) - 5.0).abs() < 1e-6);
    }
}
