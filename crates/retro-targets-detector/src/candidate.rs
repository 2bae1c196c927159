use retro_targets_core::{convex_hull, polygon_area, BoundingBox, Contour, RotatedRect};
use serde::{Deserialize, Serialize};

use crate::filter::solidity;

/// A contour with every measurement the filter and identifier use.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub contour: Contour,
    pub bounding_box: BoundingBox,
    pub area: f64,
    pub perimeter: f64,
    pub hull_area: f64,
    pub solidity: f64,
    pub vertices: usize,
    /// Bounding-box width / height.
    pub ratio: f64,
    pub rect: RotatedRect,
}

impl Candidate {
    /// Measure `contour`. `None` only for an empty contour.
    pub fn measure(contour: &Contour) -> Option<Self> {
        let hull = convex_hull(&contour.points);
        let rect = RotatedRect::from_hull(&hull)?;
        let bounding_box = contour.bounding_box();
        let area = contour.area();
        let hull_area = polygon_area(&hull);
        Some(Self {
            contour: contour.clone(),
            bounding_box,
            area,
            perimeter: contour.perimeter(),
            hull_area,
            solidity: solidity(area, hull_area),
            vertices: contour.vertex_count(),
            ratio: bounding_box.aspect_ratio(),
            rect,
        })
    }

    #[inline]
    pub fn center_x(&self) -> f64 {
        self.rect.center.x
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::Point2;

    #[test]
    fn measures_axis_aligned_rect() {
        let contour = Contour::new(vec![
            Point2::new(10, 20),
            Point2::new(40, 20),
            Point2::new(40, 30),
            Point2::new(10, 30),
        ]);
        let c = Candidate::measure(&contour).unwrap();
        assert_relative_eq!(c.area, 300.0);
        assert_relative_eq!(c.perimeter, 80.0);
        assert_relative_eq!(c.solidity, 100.0);
        assert_eq!(c.vertices, 4);
        assert_relative_eq!(c.ratio, 31.0 / 11.0);
        assert_relative_eq!(c.center_x(), 25.0, epsilon = 1e-9);
        assert!(!c.rect.is_tall());
    }

    #[test]
    fn concave_contour_shares_one_hull() {
        let contour = Contour::new(vec![
            Point2::new(0, 0),
            Point2::new(10, 0),
            Point2::new(10, 5),
            Point2::new(5, 5),
            Point2::new(5, 10),
            Point2::new(0, 10),
        ]);
        let c = Candidate::measure(&contour).unwrap();
        assert_relative_eq!(c.area, 75.0);
        assert_relative_eq!(c.hull_area, 87.5);
        assert_relative_eq!(c.solidity, 75.0 / 87.5 * 100.0);
        assert_relative_eq!(c.rect.area(), 100.0, epsilon = 1e-9);
        assert_relative_eq!(c.rect.center.x, 5.0, epsilon = 1e-9);
        assert_relative_eq!(c.rect.center.y, 5.0, epsilon = 1e-9);
    }

    #[test]
    fn empty_contour_has_no_measurement() {
        assert!(Candidate::measure(&Contour::default()).is_none());
    }
}
