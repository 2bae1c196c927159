//! Full detection pipeline.
//!
//! This module wires together HSV segmentation, contour extraction,
//! contour filtering, pair identification and the offset computation.

mod error;
mod params;
mod pipeline;
mod result;

pub use error::{ParamsError, TargetDetectError};
pub use params::TargetDetectorParams;
pub use pipeline::TargetDetector;
pub use result::TargetDetectionResult;
