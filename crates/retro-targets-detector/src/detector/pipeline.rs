use log::{debug, warn};
use retro_targets_core::{BinaryMask, ColorImageView};

use super::{ParamsError, TargetDetectError, TargetDetectionResult, TargetDetectorParams};
use crate::{
    classify_candidates, compute_offset, extract_contours, filter_contours, segment, select_pair,
};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Stateless detector: holds only its parameters, so one instance can be
/// shared across threads and every call returns a fresh result.
#[derive(Clone, Debug)]
pub struct TargetDetector {
    params: TargetDetectorParams,
}

impl TargetDetector {
    /// Create a detector, rejecting inconsistent parameters.
    pub fn new(params: TargetDetectorParams) -> Result<Self, ParamsError> {
        params.validate()?;
        Ok(Self { params })
    }

    /// Detector parameters.
    #[inline]
    pub fn params(&self) -> &TargetDetectorParams {
        &self.params
    }

    /// Run every stage on a color frame.
    #[cfg_attr(
        feature = "tracing",
        instrument(level = "info", skip(self, frame), fields(width = frame.width, height = frame.height))
    )]
    pub fn detect(
        &self,
        frame: &ColorImageView<'_>,
    ) -> Result<TargetDetectionResult, TargetDetectError> {
        if let Err(err) = frame.validate() {
            warn!("rejecting frame: {err}");
            return Err(err.into());
        }
        let mask = segment(frame, &self.params.hsv)?;
        Ok(self.detect_mask(mask))
    }

    /// Run contour extraction onwards on an already segmented mask.
    #[cfg_attr(
        feature = "tracing",
        instrument(level = "info", skip(self, mask), fields(width = mask.width, height = mask.height))
    )]
    pub fn detect_mask(&self, mask: BinaryMask) -> TargetDetectionResult {
        let contours = extract_contours(&mask, &self.params.contours);
        let filtered = filter_contours(&contours, &self.params.filter);
        let candidates = classify_candidates(&filtered, &self.params.identify);
        let identification = select_pair(&candidates, &self.params.identify);
        let offset = compute_offset(&identification, self.params.reference_column);

        debug!(
            "detect: {} contours, {} filtered, {} candidates, offset {:?}",
            contours.len(),
            filtered.len(),
            candidates.len(),
            offset
        );

        TargetDetectionResult {
            mask,
            contours,
            filtered,
            candidates,
            identification,
            offset,
        }
    }
}
