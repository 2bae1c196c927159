//! Closed pixel contours and their axis-aligned measurements.

use imageproc::geometry;
use imageproc::point::Point;
use nalgebra::Point2;
use serde::{Deserialize, Serialize};

/// Whether a contour bounds a foreground region from outside or a hole inside it.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BorderKind {
    #[default]
    Outer,
    Hole,
}

/// Closed boundary polygon in integer pixel coordinates.
///
/// The last point connects back to the first.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contour {
    pub points: Vec<Point2<i32>>,
    #[serde(default)]
    pub kind: BorderKind,
    /// Index of the enclosing contour in the list this contour came from.
    #[serde(default)]
    pub parent: Option<usize>,
}

impl Contour {
    pub fn new(points: Vec<Point2<i32>>) -> Self {
        Self {
            points,
            kind: BorderKind::Outer,
            parent: None,
        }
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.points.len()
    }

    pub fn bounding_box(&self) -> BoundingBox {
        BoundingBox::from_points(&self.points).unwrap_or_default()
    }

    pub fn area(&self) -> f64 {
        polygon_area(&self.points)
    }

    pub fn perimeter(&self) -> f64 {
        closed_perimeter(&self.points)
    }
}

/// Upright integer bounding box; both edges inclusive, so a single pixel is 1x1.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl BoundingBox {
    pub fn from_points(points: &[Point2<i32>]) -> Option<Self> {
        let first = points.first()?;
        let (mut min_x, mut min_y) = (first.x, first.y);
        let (mut max_x, mut max_y) = (first.x, first.y);
        for p in &points[1..] {
            min_x = min_x.min(p.x);
            min_y = min_y.min(p.y);
            max_x = max_x.max(p.x);
            max_y = max_y.max(p.y);
        }
        Some(Self {
            x: min_x,
            y: min_y,
            width: max_x - min_x + 1,
            height: max_y - min_y + 1,
        })
    }

    /// Width over height, `+inf` for a zero-height box.
    pub fn aspect_ratio(&self) -> f64 {
        if self.height == 0 {
            return f64::INFINITY;
        }
        self.width as f64 / self.height as f64
    }
}

pub(crate) fn to_pixels(points: &[Point2<i32>]) -> Vec<Point<i32>> {
    points.iter().map(|p| Point::new(p.x, p.y)).collect()
}

pub(crate) fn from_pixels(points: &[Point<i32>]) -> Vec<Point2<i32>> {
    points.iter().map(|p| Point2::new(p.x, p.y)).collect()
}

/// Absolute area of a closed polygon; zero below three points.
pub fn polygon_area(points: &[Point2<i32>]) -> f64 {
    geometry::contour_area(&to_pixels(points))
}

/// Length of the closed polyline through `points`. Two points count their
/// segment once.
pub fn closed_perimeter(points: &[Point2<i32>]) -> f64 {
    geometry::arc_length(&to_pixels(points), true)
}
