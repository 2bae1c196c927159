use retro_targets_core::{BinaryMask, Contour};

use crate::{GoodCandidate, Identification, TargetOffset, TargetPair};

/// Everything one detection run produced, for control and for tuning.
#[derive(Clone, Debug, PartialEq)]
pub struct TargetDetectionResult {
    /// HSV threshold output.
    pub mask: BinaryMask,
    /// Every traced contour.
    pub contours: Vec<Contour>,
    /// Contours that passed the geometric filter.
    pub filtered: Vec<Contour>,
    /// Classified candidates, largest area first.
    pub candidates: Vec<GoodCandidate>,
    pub identification: Identification,
    pub offset: TargetOffset,
}

impl TargetDetectionResult {
    pub fn pair(&self) -> Option<&TargetPair> {
        self.identification.pair()
    }

    pub fn offset_pixels(&self) -> Option<f64> {
        self.offset.pixels()
    }
}
