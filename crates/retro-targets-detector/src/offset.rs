//! Horizontal offset of the target midpoint from a reference column.
//!
//! Image x grows to the right, so a positive offset means the midpoint is
//! left of the reference column. Moving the midpoint by `+d` pixels changes
//! the offset by exactly `-d`.

use serde::{Deserialize, Serialize};

use crate::identify::{Identification, TargetPair};

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "status")]
pub enum TargetOffset {
    Found { pixels: f64 },
    NotFound,
}

impl TargetOffset {
    pub fn pixels(&self) -> Option<f64> {
        match *self {
            TargetOffset::Found { pixels } => Some(pixels),
            TargetOffset::NotFound => None,
        }
    }

    /// The offset, or 0 when nothing was found. Zero is also a legitimate
    /// centered reading; prefer [`TargetOffset::pixels`].
    pub fn pixels_or_zero(&self) -> f64 {
        self.pixels().unwrap_or(0.0)
    }

    pub fn is_found(&self) -> bool {
        matches!(self, TargetOffset::Found { .. })
    }
}

/// `reference_column - mean(rotated-rect center x)` for the pair.
pub fn pair_offset(pair: &TargetPair, reference_column: f64) -> f64 {
    let (left, right) = pair.left_right();
    let mid = 0.5 * (left.center_x() + right.center_x());
    reference_column - mid
}

pub fn compute_offset(identification: &Identification, reference_column: f64) -> TargetOffset {
    match identification {
        Identification::Found(pair) => TargetOffset::Found {
            pixels: pair_offset(pair, reference_column),
        },
        Identification::NotFound(_) => TargetOffset::NotFound,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::candidate::Candidate;
    use crate::identify::{GoodCandidate, NotFoundReason, Orientation, PairConfidence};
    use approx::assert_abs_diff_eq;
    use nalgebra::Point2;
    use retro_targets_core::Contour;

    fn upright(cx: i32, half_w: i32) -> GoodCandidate {
        let contour = Contour::new(vec![
            Point2::new(cx - half_w, 0),
            Point2::new(cx + half_w, 0),
            Point2::new(cx + half_w, 60),
            Point2::new(cx - half_w, 60),
        ]);
        GoodCandidate {
            candidate: Candidate::measure(&contour).unwrap(),
            orientation: Orientation::Tall,
            elongation: 60.0 / (2 * half_w) as f64,
        }
    }

    fn pair_at(a: i32, b: i32) -> TargetPair {
        TargetPair {
            primary: upright(a, 5),
            partner: upright(b, 5),
            confidence: PairConfidence::Full,
        }
    }

    #[test]
    fn centered_pair_has_zero_offset() {
        let off = compute_offset(&Identification::Found(pair_at(180, 246)), 213.0);
        assert_abs_diff_eq!(off.pixels().unwrap(), 0.0, epsilon = 1e-9);
    }

    #[test]
    fn shifting_right_decreases_offset() {
        let base = pair_offset(&pair_at(150, 280), 213.0);
        assert_abs_diff_eq!(base, -2.0, epsilon = 1e-9);
        for d in [1, 7, 40] {
            let shifted = pair_offset(&pair_at(150 + d, 280 + d), 213.0);
            assert_abs_diff_eq!(shifted, base - d as f64, epsilon = 1e-9);
        }
    }

    #[test]
    fn order_of_pair_members_does_not_matter() {
        let a = pair_offset(&pair_at(100, 300), 213.0);
        let b = pair_offset(&pair_at(300, 100), 213.0);
        assert_abs_diff_eq!(a, b, epsilon = 1e-12);
        let p = pair_at(300, 100);
        let (l, r) = p.left_right();
        assert!(l.center_x() < r.center_x());
    }

    #[test]
    fn no_pair_is_not_found() {
        let off = compute_offset(
            &Identification::NotFound(NotFoundReason::TooFewCandidates { count: 1 }),
            213.0,
        );
        assert_eq!(off, TargetOffset::NotFound);
        assert_eq!(off.pixels(), None);
        assert_eq!(off.pixels_or_zero(), 0.0);
        assert!(!off.is_found());
    }

    #[test]
    fn serializes_with_status_tag() {
        let json = serde_json::to_string(&TargetOffset::Found { pixels: -2.0 }).unwrap();
        assert_eq!(json, r#"{"status":"found","pixels":-2.0}"#);
        let json = serde_json::to_string(&TargetOffset::NotFound).unwrap();
        assert_eq!(json, r#"{"status":"not_found"}"#);
    }
}
