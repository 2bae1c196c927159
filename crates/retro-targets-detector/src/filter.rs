//! Geometric contour filtering.

use log::{debug, trace};
use retro_targets_core::{convex_hull_area, Contour};
use serde::{Deserialize, Serialize};

use crate::ValueRange;

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Thresholds for [`filter_contours`]. Ranges are inclusive.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContourFilterParams {
    /// Minimum polygon area in square pixels.
    pub min_area: f64,
    /// Minimum closed perimeter in pixels.
    pub min_perimeter: f64,
    /// Bounding-box width in pixels.
    pub width: ValueRange,
    /// Bounding-box height in pixels.
    pub height: ValueRange,
    /// `100 * area / hull_area`, in percent.
    pub solidity: ValueRange,
    /// Number of contour points after chain approximation.
    pub vertices: ValueRange,
    /// Bounding-box width / height.
    pub ratio: ValueRange,
}

impl Default for ContourFilterParams {
    fn default() -> Self {
        Self {
            min_area: 100.0,
            min_perimeter: 0.0,
            width: ValueRange::new(0.0, 1000.0),
            height: ValueRange::new(0.0, 1000.0),
            solidity: ValueRange::new(0.0, 100.0),
            vertices: ValueRange::new(0.0, 1_000_000.0),
            ratio: ValueRange::new(0.0, 1000.0),
        }
    }
}

/// First predicate a contour failed.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "reason")]
pub enum FilterRejection {
    Width { width: i32 },
    Height { height: i32 },
    Area { area: f64 },
    Perimeter { perimeter: f64 },
    DegenerateHull,
    Solidity { solidity: f64 },
    Vertices { count: usize },
    Ratio { ratio: f64 },
}

/// `100 * area / hull_area`, or 0 when the hull has no area.
#[inline]
pub fn solidity(area: f64, hull_area: f64) -> f64 {
    if hull_area > 0.0 {
        100.0 * area / hull_area
    } else {
        0.0
    }
}

/// Run every predicate in order, stopping at the first failure.
pub fn check_contour(
    contour: &Contour,
    params: &ContourFilterParams,
) -> Result<(), FilterRejection> {
    let bb = contour.bounding_box();
    if !params.width.contains(bb.width as f64) {
        return Err(FilterRejection::Width { width: bb.width });
    }
    if !params.height.contains(bb.height as f64) {
        return Err(FilterRejection::Height { height: bb.height });
    }

    let area = contour.area();
    if area < params.min_area {
        return Err(FilterRejection::Area { area });
    }

    let perimeter = contour.perimeter();
    if perimeter < params.min_perimeter {
        return Err(FilterRejection::Perimeter { perimeter });
    }

    let hull_area = convex_hull_area(&contour.points);
    if hull_area <= 0.0 {
        return Err(FilterRejection::DegenerateHull);
    }
    let solidity = solidity(area, hull_area);
    if !params.solidity.contains(solidity) {
        return Err(FilterRejection::Solidity { solidity });
    }

    let count = contour.vertex_count();
    if !params.vertices.contains(count as f64) {
        return Err(FilterRejection::Vertices { count });
    }

    // +inf for zero height: passes only an unbounded max.
    let ratio = bb.aspect_ratio();
    if !params.ratio.contains(ratio) {
        return Err(FilterRejection::Ratio { ratio });
    }

    Ok(())
}

/// Keep the contours passing every threshold, in input order.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "debug", skip(contours, params), fields(count = contours.len()))
)]
pub fn filter_contours(contours: &[Contour], params: &ContourFilterParams) -> Vec<Contour> {
    let out: Vec<Contour> = contours
        .iter()
        .enumerate()
        .filter_map(|(idx, c)| match check_contour(c, params) {
            Ok(()) => Some(c.clone()),
            Err(why) => {
                trace!("contour {idx} rejected: {why:?}");
                None
            }
        })
        .collect();
    debug!("filter_contours: {} of {} kept", out.len(), contours.len());
    out
}
