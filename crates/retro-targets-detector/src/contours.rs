//! Border following on binary masks.
//!
//! Tracing is delegated to `imageproc` (Suzuki-Abe). This module maps its
//! output onto [`Contour`], applies the retrieval mode and optionally
//! compresses straight runs.

use imageproc::contours::{find_contours, BorderType};
use log::{debug, warn};
use nalgebra::Point2;
use retro_targets_core::{BinaryMask, BorderKind, Contour};
use serde::{Deserialize, Serialize};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// How many boundary points to keep per contour.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChainApprox {
    /// Every boundary pixel.
    None,
    /// End points of horizontal, vertical and diagonal runs only.
    #[default]
    Simple,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContourExtractParams {
    /// Keep only outermost boundaries (no holes, nothing nested inside a hole).
    pub external_only: bool,
    pub chain_approx: ChainApprox,
}

/// Extract closed boundaries of the foreground regions in `mask`.
///
/// With `external_only = false`, `Contour::parent` indexes into the returned
/// vector. With `external_only = true` every contour is an outer border and
/// has no parent.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "debug", skip(mask, params), fields(width = mask.width, height = mask.height))
)]
pub fn extract_contours(mask: &BinaryMask, params: &ContourExtractParams) -> Vec<Contour> {
    if mask.width == 0 || mask.height == 0 {
        return Vec::new();
    }
    let Some(img) = image::GrayImage::from_raw(
        mask.width as u32,
        mask.height as u32,
        mask.data.clone(),
    ) else {
        warn!(
            "mask buffer does not match {}x{}, skipping contour extraction",
            mask.width, mask.height
        );
        return Vec::new();
    };

    let traced = find_contours::<i32>(&img);
    let total = traced.len();

    let out: Vec<Contour> = traced
        .into_iter()
        .filter(|c| !params.external_only || c.parent.is_none())
        .map(|c| {
            let points: Vec<Point2<i32>> = c.points.iter().map(|p| Point2::new(p.x, p.y)).collect();
            let points = match params.chain_approx {
                ChainApprox::None => points,
                ChainApprox::Simple => compress_straight_runs(&points),
            };
            Contour {
                points,
                kind: match c.border_type {
                    BorderType::Outer => BorderKind::Outer,
                    BorderType::Hole => BorderKind::Hole,
                },
                parent: if params.external_only { None } else { c.parent },
            }
        })
        .collect();

    debug!(
        "extract_contours: {} traced, {} kept (external_only={})",
        total,
        out.len(),
        params.external_only
    );
    out
}

/// Drop points whose incoming and outgoing step directions agree.
pub fn compress_straight_runs(points: &[Point2<i32>]) -> Vec<Point2<i32>> {
    let n = points.len();
    if n <= 2 {
        return points.to_vec();
    }
    let step = |a: Point2<i32>, b: Point2<i32>| ((b.x - a.x).signum(), (b.y - a.y).signum());

    let mut out = Vec::with_capacity(n);
    for i in 0..n {
        let prev = points[(i + n - 1) % n];
        let next = points[(i + 1) % n];
        if step(prev, points[i]) != step(points[i], next) {
            out.push(points[i]);
        }
    }
    if out.is_empty() {
        out.push(points[0]);
    }
    out
}
