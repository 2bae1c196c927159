use serde::{Deserialize, Serialize};

use super::ParamsError;
use crate::{ContourExtractParams, ContourFilterParams, HsvThresholds, IdentifyParams, ValueRange};

/// Configuration for the whole pipeline. Every field has a default, so a
/// partial JSON object is a valid config.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TargetDetectorParams {
    pub hsv: HsvThresholds,
    pub contours: ContourExtractParams,
    pub filter: ContourFilterParams,
    pub identify: IdentifyParams,
    /// Column, in the coordinates of the frame given to the detector, that
    /// counts as centered. The default 213 is the middle of a 426 px wide
    /// frame; callers that resize or crop must convert it themselves.
    pub reference_column: f64,
}

impl Default for TargetDetectorParams {
    fn default() -> Self {
        Self {
            hsv: HsvThresholds::default(),
            contours: ContourExtractParams::default(),
            filter: ContourFilterParams::default(),
            identify: IdentifyParams::default(),
            reference_column: 213.0,
        }
    }
}

impl TargetDetectorParams {
    /// Default thresholds with the reference column at the middle of a
    /// `frame_width` wide frame.
    pub fn centered_for_width(frame_width: usize) -> Self {
        Self {
            reference_column: 0.5 * frame_width as f64,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<(), ParamsError> {
        let ranges: [(&'static str, ValueRange); 8] = [
            ("hsv.hue", self.hsv.hue),
            ("hsv.saturation", self.hsv.saturation),
            ("hsv.value", self.hsv.value),
            ("filter.width", self.filter.width),
            ("filter.height", self.filter.height),
            ("filter.solidity", self.filter.solidity),
            ("filter.vertices", self.filter.vertices),
            ("filter.ratio", self.filter.ratio),
        ];
        for (name, r) in ranges {
            if !r.is_valid() {
                return Err(ParamsError::InvalidRange {
                    name,
                    min: r.min,
                    max: r.max,
                });
            }
        }

        let scalars = [
            ("filter.min_area", self.filter.min_area),
            ("filter.min_perimeter", self.filter.min_perimeter),
            ("identify.min_area", self.identify.min_area),
            ("identify.min_elongation", self.identify.min_elongation),
            ("identify.wide_angle_deg", self.identify.wide_angle_deg),
            ("identify.tall_angle_deg", self.identify.tall_angle_deg),
            ("identify.pair_tall_angle_deg", self.identify.pair_tall_angle_deg),
            ("identify.pair_wide_angle_deg", self.identify.pair_wide_angle_deg),
            ("reference_column", self.reference_column),
        ];
        for (name, value) in scalars {
            if !value.is_finite() {
                return Err(ParamsError::NotFinite { name, value });
            }
        }

        let tol = self.identify.angle_tolerance_deg;
        if tol.is_nan() || tol <= 0.0 {
            return Err(ParamsError::NotPositive {
                name: "identify.angle_tolerance_deg",
                value: tol,
            });
        }
        Ok(())
    }
}
