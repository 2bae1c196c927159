//! Left/right target pair identification.
//!
//! 1. Measure each filtered contour and keep the elongated ones whose rotated
//!    rectangle angle sits near the angle expected for its orientation.
//! 2. Rank the survivors by contour area, largest first (stable).
//! 3. Pair the largest survivor with a partner on the expected side of it:
//!    partners of a tall reference lie to its left, partners of a wide
//!    reference to its right. With three or more survivors the partner must
//!    also match the pairing angle configured for the reference's
//!    orientation, which is independent of the classification angles.

use log::{debug, log_enabled, warn, Level};
use retro_targets_core::Contour;
use serde::{Deserialize, Serialize};

use crate::candidate::Candidate;

#[cfg(feature = "tracing")]
use tracing::instrument;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// Rotated-rect `height >= width`.
    Tall,
    /// Rotated-rect `height < width`.
    Wide,
}

/// What to do when three or more candidates survive but none pairs with the
/// largest one.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoMatchPolicy {
    /// Report no target.
    #[default]
    Reject,
    /// Pair the largest candidate with the next-ranked one anyway and mark the
    /// pair [`PairConfidence::Degraded`].
    NextRanked,
}

/// Identification thresholds, tuned for 2019 FRC field tape.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IdentifyParams {
    /// Contours with area at or below this are ignored.
    pub min_area: f64,
    /// Long side / short side of the rotated rectangle must exceed this.
    pub min_elongation: f64,
    /// Allowed deviation from the expected angle (exclusive), degrees.
    pub angle_tolerance_deg: f64,
    /// Expected rotated-rect angle of a wide candidate, degrees.
    pub wide_angle_deg: f64,
    /// Expected rotated-rect angle of a tall candidate, degrees.
    pub tall_angle_deg: f64,
    /// Angle a partner must show when the largest candidate is tall.
    pub pair_tall_angle_deg: f64,
    /// Angle a partner must show when the largest candidate is wide.
    pub pair_wide_angle_deg: f64,
    pub no_match_policy: NoMatchPolicy,
}

impl Default for IdentifyParams {
    fn default() -> Self {
        Self {
            min_area: 250.0,
            min_elongation: 1.5,
            angle_tolerance_deg: 22.5,
            wide_angle_deg: 14.5,
            tall_angle_deg: 75.5,
            pair_tall_angle_deg: 75.5,
            pair_wide_angle_deg: 14.5,
            no_match_policy: NoMatchPolicy::Reject,
        }
    }
}

impl IdentifyParams {
    pub fn expected_angle(&self, orientation: Orientation) -> f64 {
        match orientation {
            Orientation::Tall => self.tall_angle_deg,
            Orientation::Wide => self.wide_angle_deg,
        }
    }

    /// Target angle for the partner of a primary with `orientation`.
    pub fn pairing_angle(&self, orientation: Orientation) -> f64 {
        match orientation {
            Orientation::Tall => self.pair_tall_angle_deg,
            Orientation::Wide => self.pair_wide_angle_deg,
        }
    }

    #[inline]
    fn angle_matches(&self, angle_deg: f64, expected_deg: f64) -> bool {
        (angle_deg.abs() - expected_deg).abs() < self.angle_tolerance_deg
    }
}

/// A candidate that passed classification.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GoodCandidate {
    pub candidate: Candidate,
    pub orientation: Orientation,
    /// Long side / short side of the rotated rectangle.
    pub elongation: f64,
}

impl GoodCandidate {
    #[inline]
    pub fn area(&self) -> f64 {
        self.candidate.area
    }

    #[inline]
    pub fn center_x(&self) -> f64 {
        self.candidate.center_x()
    }

    #[inline]
    pub fn angle_deg(&self) -> f64 {
        self.candidate.rect.angle_deg
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PairConfidence {
    Full,
    /// Produced by [`NoMatchPolicy::NextRanked`]; the partner did not
    /// satisfy the angle/position checks.
    Degraded,
}

/// The two halves of one goal.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TargetPair {
    /// Largest-area candidate.
    pub primary: GoodCandidate,
    pub partner: GoodCandidate,
    pub confidence: PairConfidence,
}

impl TargetPair {
    /// `(left, right)` by bounding-box x.
    pub fn left_right(&self) -> (&GoodCandidate, &GoodCandidate) {
        if self.primary.candidate.bounding_box.x > self.partner.candidate.bounding_box.x {
            (&self.partner, &self.primary)
        } else {
            (&self.primary, &self.partner)
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotFoundReason {
    /// Fewer than two candidates survived classification.
    TooFewCandidates { count: usize },
    /// Exactly two survived but the smaller is on the wrong side.
    PositionMismatch,
    /// No candidate matched the largest one's angle and side.
    NoPartner { scanned: usize },
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Identification {
    Found(TargetPair),
    NotFound(NotFoundReason),
}

impl Identification {
    pub fn pair(&self) -> Option<&TargetPair> {
        match self {
            Identification::Found(pair) => Some(pair),
            Identification::NotFound(_) => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Identification::Found(_))
    }
}

/// Orientation/elongation/angle test for one measured contour.
pub fn classify(candidate: Candidate, params: &IdentifyParams) -> Option<GoodCandidate> {
    if candidate.area <= params.min_area {
        return None;
    }
    let rect = candidate.rect;
    if rect.short_side() <= 0.0 {
        return None;
    }

    let (orientation, elongation) = if rect.height < rect.width {
        (Orientation::Wide, rect.width / rect.height)
    } else {
        (Orientation::Tall, rect.height / rect.width)
    };
    if elongation <= params.min_elongation {
        return None;
    }
    if !params.angle_matches(rect.angle_deg, params.expected_angle(orientation)) {
        return None;
    }

    Some(GoodCandidate {
        candidate,
        orientation,
        elongation,
    })
}

/// Sort by area, largest first; equal areas keep their relative order.
pub fn rank_by_area(good: &mut [GoodCandidate]) {
    good.sort_by(|a, b| b.area().total_cmp(&a.area()));
}

/// Measure, classify and rank `contours`.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "debug", skip(contours, params), fields(count = contours.len()))
)]
pub fn classify_candidates(contours: &[Contour], params: &IdentifyParams) -> Vec<GoodCandidate> {
    let mut good: Vec<GoodCandidate> = contours
        .iter()
        .filter_map(Candidate::measure)
        .filter_map(|c| classify(c, params))
        .collect();
    rank_by_area(&mut good);
    debug!(
        "classify_candidates: {} of {} contours are good",
        good.len(),
        contours.len()
    );
    good
}

fn on_expected_side(reference: &GoodCandidate, other: &GoodCandidate) -> bool {
    match reference.orientation {
        Orientation::Tall => other.center_x() < reference.center_x(),
        Orientation::Wide => other.center_x() > reference.center_x(),
    }
}

fn pair(primary: &GoodCandidate, partner: &GoodCandidate, confidence: PairConfidence) -> TargetPair {
    TargetPair {
        primary: primary.clone(),
        partner: partner.clone(),
        confidence,
    }
}

/// Pick one pair out of candidates already ranked by [`rank_by_area`].
pub fn select_pair(ranked: &[GoodCandidate], params: &IdentifyParams) -> Identification {
    let outcome = match ranked {
        [] | [_] => Identification::NotFound(NotFoundReason::TooFewCandidates {
            count: ranked.len(),
        }),
        [primary, other] => {
            if on_expected_side(primary, other) {
                Identification::Found(pair(primary, other, PairConfidence::Full))
            } else {
                Identification::NotFound(NotFoundReason::PositionMismatch)
            }
        }
        [primary, rest @ ..] => {
            let target = params.pairing_angle(primary.orientation);
            let partner = rest.iter().find(|c| {
                params.angle_matches(c.angle_deg(), target) && on_expected_side(primary, c)
            });
            match (partner, params.no_match_policy) {
                (Some(partner), _) => {
                    Identification::Found(pair(primary, partner, PairConfidence::Full))
                }
                (None, NoMatchPolicy::Reject) => {
                    Identification::NotFound(NotFoundReason::NoPartner {
                        scanned: rest.len(),
                    })
                }
                (None, NoMatchPolicy::NextRanked) => {
                    warn!(
                        "no partner among {} candidates, falling back to next-ranked",
                        rest.len()
                    );
                    Identification::Found(pair(primary, &rest[0], PairConfidence::Degraded))
                }
            }
        }
    };
    if log_enabled!(Level::Debug) {
        debug!("select_pair: {}", summarize(&outcome));
    }
    outcome
}

fn summarize(outcome: &Identification) -> String {
    match outcome {
        Identification::Found(p) => format!(
            "pair at x={:.1}/{:.1} ({:?})",
            p.primary.center_x(),
            p.partner.center_x(),
            p.confidence
        ),
        Identification::NotFound(why) => format!("none ({why:?})"),
    }
}

/// Classify, rank and pair in one call.
pub fn identify_targets(contours: &[Contour], params: &IdentifyParams) -> Identification {
    select_pair(&classify_candidates(contours, params), params)
}
