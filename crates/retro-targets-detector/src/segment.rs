//! HSV band segmentation.
//!
//! Hue, saturation and value use the 8-bit OpenCV scale: H in `[0, 180)`,
//! S and V in `[0, 255]`, each rounded to the nearest integer before the
//! band test. Thresholds tuned against OpenCV-based tools carry over as-is.

use log::debug;
use retro_targets_core::{BinaryMask, ColorImageView, ImageError};
use serde::{Deserialize, Serialize};

use crate::ValueRange;

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Inclusive HSV band selecting foreground pixels.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HsvThresholds {
    pub hue: ValueRange,
    pub saturation: ValueRange,
    pub value: ValueRange,
}

impl Default for HsvThresholds {
    fn default() -> Self {
        // Bright green ring light on retro-reflective tape.
        Self {
            hue: ValueRange::new(60.0, 110.0),
            saturation: ValueRange::new(150.0, 255.0),
            value: ValueRange::new(50.0, 255.0),
        }
    }
}

impl HsvThresholds {
    #[inline]
    pub fn contains(&self, hsv: [u8; 3]) -> bool {
        self.hue.contains(hsv[0] as f64)
            && self.saturation.contains(hsv[1] as f64)
            && self.value.contains(hsv[2] as f64)
    }
}

/// Convert one RGB pixel to 8-bit HSV.
pub fn rgb_to_hsv(rgb: [u8; 3]) -> [u8; 3] {
    let [r, g, b] = rgb.map(|c| c as f32);
    let v = r.max(g).max(b);
    let min = r.min(g).min(b);
    let diff = v - min;

    let s = if v > 0.0 { 255.0 * diff / v } else { 0.0 };

    let h = if diff > 0.0 {
        let mut h = if v == r {
            60.0 * (g - b) / diff
        } else if v == g {
            120.0 + 60.0 * (b - r) / diff
        } else {
            240.0 + 60.0 * (r - g) / diff
        };
        if h < 0.0 {
            h += 360.0;
        }
        h * 0.5
    } else {
        0.0
    };

    let mut h = h.round() as u8;
    if h >= 180 {
        h -= 180;
    }
    [h, s.round() as u8, v as u8]
}

/// Mark every pixel whose HSV value falls inside `thresholds`.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "debug", skip(frame, thresholds), fields(width = frame.width, height = frame.height))
)]
pub fn segment(
    frame: &ColorImageView<'_>,
    thresholds: &HsvThresholds,
) -> Result<BinaryMask, ImageError> {
    frame.validate()?;

    let mut mask = BinaryMask::new(frame.width, frame.height);
    for y in 0..frame.height {
        for x in 0..frame.width {
            if thresholds.contains(rgb_to_hsv(frame.rgb(x, y))) {
                mask.set(x, y, true);
            }
        }
    }

    debug!(
        "segment: {} of {} pixels in band",
        mask.count_foreground(),
        frame.width * frame.height
    );
    Ok(mask)
}
