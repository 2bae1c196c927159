use imageproc::geometry;
use nalgebra::Point2;

use crate::contour::{from_pixels, to_pixels};

/// Convex hull vertices of `points`, without collinear points.
///
/// Input is deduplicated first: traced contours revisit pixels along
/// one-pixel-wide spurs.
pub fn convex_hull(points: &[Point2<i32>]) -> Vec<Point2<i32>> {
    let mut unique = points.to_vec();
    unique.sort_unstable_by_key(|p| (p.y, p.x));
    unique.dedup();
    from_pixels(&geometry::convex_hull(to_pixels(&unique)))
}

/// Area enclosed by the convex hull of `points`; zero for collinear input.
pub fn convex_hull_area(points: &[Point2<i32>]) -> f64 {
    crate::polygon_area(&convex_hull(points))
}
