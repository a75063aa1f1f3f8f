//! Planar geometry used by scoring and route estimation.
//!
//! Locations are (longitude, latitude) pairs in practice, but every
//! computation here treats them as points on a flat Euclidean plane.

/// A point on the allocation plane.
pub type Point = (f64, f64);

/// Straight-line distance between two points.
pub fn euclidean(from: Point, to: Point) -> f64 {
    let dx = from.0 - to.0;
    let dy = from.1 - to.1;
    (dx * dx + dy * dy).sqrt()
}

/// Length of the polyline that starts at `start` and visits `points` in order.
pub fn path_length<I>(start: Point, points: I) -> f64
where
    I: IntoIterator<Item = Point>,
{
    let mut total = 0.0;
    let mut current = start;
    for point in points {
        total += euclidean(current, point);
        current = point;
    }
    total
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_point() {
        assert_eq!(euclidean((3.5, -2.0), (3.5, -2.0)), 0.0);
    }

    #[test]
    fn test_three_four_five() {
        let dist = euclidean((0.0, 0.0), (3.0, 4.0));
        assert!((dist - 5.0).abs() < 1e-12, "expected 5, got {}", dist);
    }

    #[test]
    fn test_symmetric() {
        let a = (10.0, 20.0);
        let b = (13.0, 19.0);
        assert_eq!(euclidean(a, b), euclidean(b, a));
    }

    #[test]
    fn test_path_length_empty() {
        assert_eq!(path_length((1.0, 1.0), Vec::new()), 0.0);
    }

    #[test]
    fn test_path_length_chains_hops() {
        // (0,0) -> (3,4) -> (3,0): 5 + 4
        let total = path_length((0.0, 0.0), vec![(3.0, 4.0), (3.0, 0.0)]);
        assert!((total - 9.0).abs() < 1e-12);
    }
}
