//! Retro-reflective vision target detection.
//!
//! One call runs five stages on a color frame:
//! 1. HSV band segmentation into a binary mask ([`segment`]).
//! 2. Border following into closed contours ([`extract_contours`]).
//! 3. Geometric filtering: bounding box, area, perimeter, solidity, vertex
//!    count, aspect ratio ([`filter_contours`]).
//! 4. Classification of elongated tall/wide strips and selection of one
//!    left/right pair ([`classify_candidates`], [`select_pair`]).
//! 5. Offset of the pair midpoint from a reference column ([`compute_offset`]).
//!
//! ## Quickstart
//!
//! ```
//! use retro_targets_core::{ChannelOrder, ColorImageView};
//! use retro_targets_detector::{TargetDetector, TargetDetectorParams};
//!
//! let pixels = vec![0u8; 426 * 240 * 3];
//! let frame = ColorImageView::new(426, 240, ChannelOrder::Bgr, &pixels).unwrap();
//! let detector = TargetDetector::new(TargetDetectorParams::default()).unwrap();
//!
//! let result = detector.detect(&frame).unwrap();
//! println!("offset: {:?}", result.offset.pixels());
//! ```

mod candidate;
mod contours;
mod detector;
mod filter;
mod identify;
mod io;
mod offset;
mod range;
mod segment;

pub use candidate::Candidate;
pub use contours::{compress_straight_runs, extract_contours, ChainApprox, ContourExtractParams};
pub use detector::{
    ParamsError, TargetDetectError, TargetDetectionResult, TargetDetector, TargetDetectorParams,
};
pub use filter::{check_contour, filter_contours, solidity, ContourFilterParams, FilterRejection};
pub use identify::{
    classify, classify_candidates, identify_targets, rank_by_area, select_pair, GoodCandidate,
    Identification, IdentifyParams, NoMatchPolicy, NotFoundReason, Orientation, PairConfidence,
    TargetPair,
};
pub use io::{TargetDetectConfig, TargetDetectReport, TargetIoError};
pub use offset::{compute_offset, pair_offset, TargetOffset};
pub use range::ValueRange;
pub use segment::{rgb_to_hsv, segment, HsvThresholds};

pub use retro_targets_core::{BinaryMask, ColorImageView, Contour};
