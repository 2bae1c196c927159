//! Minimum-area oriented bounding rectangles.
//!
//! Angle convention: `angle_deg` lies in `[0, 90)` and is the rotation of the
//! `width` edge away from the +x image axis (image y points down, so positive
//! angles turn clockwise on screen). `height` is the extent along the
//! perpendicular direction. Each rectangle has exactly one representation.

use imageproc::geometry;
use nalgebra::{Point2, Vector2};
use serde::{Deserialize, Serialize};

use crate::contour::to_pixels;
use crate::convex_hull;

const ANGLE_SNAP_DEG: f64 = 1e-9;

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct RotatedRect {
    pub center: Point2<f64>,
    pub width: f64,
    pub height: f64,
    pub angle_deg: f64,
}

impl RotatedRect {
    #[inline]
    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    /// `height >= width`.
    #[inline]
    pub fn is_tall(&self) -> bool {
        self.height >= self.width
    }

    pub fn long_side(&self) -> f64 {
        self.width.max(self.height)
    }

    pub fn short_side(&self) -> f64 {
        self.width.min(self.height)
    }

    /// Corners in order: start, start + width edge, opposite, start + height edge.
    pub fn corners(&self) -> [Point2<f64>; 4] {
        let (sin, cos) = self.angle_deg.to_radians().sin_cos();
        let u = Vector2::new(cos, sin) * (0.5 * self.width);
        let v = Vector2::new(-sin, cos) * (0.5 * self.height);
        let c = self.center;
        [c - u - v, c + u - v, c + u + v, c - u + v]
    }
}

/// Smallest-area rectangle enclosing `points`. Returns `None` for an empty
/// slice.
///
/// A single point yields a zero-size rectangle; collinear points a rectangle
/// with one zero side along the segment.
pub fn min_area_rect(points: &[Point2<i32>]) -> Option<RotatedRect> {
    RotatedRect::from_hull(&convex_hull(points))
}

impl RotatedRect {
    /// Minimum-area rectangle of an already computed convex hull.
    ///
    /// `imageproc` picks the orientation; its corners are rounded outwards to
    /// whole pixels, so the angle is snapped back onto the hull edge it came
    /// from and the extent is measured by projecting the hull on that axis.
    pub fn from_hull(hull: &[Point2<i32>]) -> Option<Self> {
        if hull.is_empty() {
            return None;
        }
        let corners = geometry::min_area_rect(&to_pixels(hull));
        let side = |a: usize, b: usize| {
            Vector2::new(
                (corners[b].x - corners[a].x) as f64,
                (corners[b].y - corners[a].y) as f64,
            )
        };
        // two opposite sides, so outward rounding cancels
        let dir = side(0, 1) + side(3, 2);
        let angle = if dir.norm_squared() > 0.0 {
            snap_to_hull_edge(hull, normalize_deg(dir.y.atan2(dir.x).to_degrees()))
        } else {
            0.0
        };
        Some(Self::enclosing(hull, angle))
    }

    /// Tight rectangle around `points` whose width edge lies at `angle_deg`.
    fn enclosing(points: &[Point2<i32>], angle_deg: f64) -> Self {
        let (sin, cos) = angle_deg.to_radians().sin_cos();
        let u = Vector2::new(cos, sin);
        let v = Vector2::new(-sin, cos);

        let (mut u0, mut u1) = (f64::INFINITY, f64::NEG_INFINITY);
        let (mut v0, mut v1) = (f64::INFINITY, f64::NEG_INFINITY);
        for p in points {
            let p = Vector2::new(p.x as f64, p.y as f64);
            u0 = u0.min(p.dot(&u));
            u1 = u1.max(p.dot(&u));
            v0 = v0.min(p.dot(&v));
            v1 = v1.max(p.dot(&v));
        }
        let center = u * (0.5 * (u0 + u1)) + v * (0.5 * (v0 + v1));
        Self {
            center: Point2::new(center.x, center.y),
            width: u1 - u0,
            height: v1 - v0,
            angle_deg,
        }
    }
}

/// Fold any direction into `[0, 90)`.
fn normalize_deg(deg: f64) -> f64 {
    let a = deg.rem_euclid(90.0);
    if a >= 90.0 - ANGLE_SNAP_DEG {
        0.0
    } else {
        a
    }
}

/// Angle of the hull edge closest to `estimate`, both folded into `[0, 90)`.
fn snap_to_hull_edge(hull: &[Point2<i32>], estimate: f64) -> f64 {
    let n = hull.len();
    (0..n)
        .filter_map(|i| {
            let (a, b) = (hull[i], hull[(i + 1) % n]);
            let (dx, dy) = ((b.x - a.x) as f64, (b.y - a.y) as f64);
            (dx != 0.0 || dy != 0.0).then(|| normalize_deg(dy.atan2(dx).to_degrees()))
        })
        .min_by(|a, b| fold_diff(*a, estimate).total_cmp(&fold_diff(*b, estimate)))
        .unwrap_or(estimate)
}

fn fold_diff(a: f64, b: f64) -> f64 {
    let d = (a - b).abs();
    d.min(90.0 - d)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn rotated_corners(cx: f64, cy: f64, w: f64, h: f64, deg: f64) -> Vec<Point2<i32>> {
        let r = RotatedRect {
            center: Point2::new(cx, cy),
            width: w,
            height: h,
            angle_deg: deg,
        };
        r.corners()
            .iter()
            .map(|p| Point2::new(p.x.round() as i32, p.y.round() as i32))
            .collect()
    }

    #[test]
    fn axis_aligned_boxes() {
        let wide = [
            Point2::new(0, 0),
            Point2::new(10, 0),
            Point2::new(10, 4),
            Point2::new(0, 4),
        ];
        let r = min_area_rect(&wide).unwrap();
        assert_abs_diff_eq!(r.angle_deg, 0.0);
        assert_abs_diff_eq!(r.width, 10.0, epsilon = 1e-9);
        assert_abs_diff_eq!(r.height, 4.0, epsilon = 1e-9);
        assert_abs_diff_eq!(r.center.x, 5.0, epsilon = 1e-9);
        assert_abs_diff_eq!(r.center.y, 2.0, epsilon = 1e-9);
        assert!(!r.is_tall());

        let tall: Vec<_> = wide.iter().map(|p| Point2::new(p.y, p.x)).collect();
        let r = min_area_rect(&tall).unwrap();
        assert_abs_diff_eq!(r.angle_deg, 0.0);
        assert_abs_diff_eq!(r.width, 4.0, epsilon = 1e-9);
        assert_abs_diff_eq!(r.height, 10.0, epsilon = 1e-9);
        assert!(r.is_tall());
    }

    #[test]
    fn recovers_rotation_of_wide_rect() {
        let pts = rotated_corners(200.0, 150.0, 400.0, 100.0, 30.0);
        let r = min_area_rect(&pts).unwrap();
        assert_abs_diff_eq!(r.angle_deg, 30.0, epsilon = 0.5);
        assert_abs_diff_eq!(r.width, 400.0, epsilon = 2.0);
        assert_abs_diff_eq!(r.height, 100.0, epsilon = 2.0);
        assert_abs_diff_eq!(r.center.x, 200.0, epsilon = 1.0);
        assert_abs_diff_eq!(r.center.y, 150.0, epsilon = 1.0);
    }

    #[test]
    fn long_axis_past_ninety_reports_tall() {
        // Long axis at 120 deg: the width edge is the short one, at 30 deg.
        let pts = rotated_corners(0.0, 0.0, 400.0, 100.0, 120.0);
        let r = min_area_rect(&pts).unwrap();
        assert_abs_diff_eq!(r.angle_deg, 30.0, epsilon = 0.5);
        assert!(r.is_tall());
        assert_abs_diff_eq!(r.height, 400.0, epsilon = 2.0);
    }

    #[test]
    fn degenerate_inputs() {
        assert!(min_area_rect(&[]).is_none());

        let r = min_area_rect(&[Point2::new(4, 5)]).unwrap();
        assert_eq!(r.area(), 0.0);
        assert_eq!(r.center, Point2::new(4.0, 5.0));

        let r = min_area_rect(&[Point2::new(0, 0), Point2::new(6, 0), Point2::new(3, 0)]).unwrap();
        assert_abs_diff_eq!(r.area(), 0.0);
        assert_abs_diff_eq!(r.long_side(), 6.0, epsilon = 1e-9);
        assert_abs_diff_eq!(r.center.x, 3.0, epsilon = 1e-9);
    }

    #[test]
    fn corners_are_ordered_around_the_rect() {
        let r = RotatedRect {
            center: Point2::new(0.0, 0.0),
            width: 4.0,
            height: 2.0,
            angle_deg: 0.0,
        };
        let c = r.corners();
        assert_abs_diff_eq!(c[0].x, -2.0);
        assert_abs_diff_eq!(c[0].y, -1.0);
        assert_abs_diff_eq!(c[2].x, 2.0);
        assert_abs_diff_eq!(c[2].y, 1.0);
    }
}
