//! High-level facade crate for the `retro-targets-*` workspace.
//!
//! This crate provides:
//! - re-exports of the core geometry and detector crates
//! - (feature-gated) end-to-end helpers that take an `image::RgbImage` or a
//!   raw interleaved buffer and return the detected pair and its offset.
//!
//! ## Quickstart
//!
//! ```no_run
//! use retro_targets::detect;
//! use retro_targets::TargetDetectorParams;
//! use image::ImageReader;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let img = ImageReader::open("frame.png")?.decode()?.to_rgb8();
//! let params = TargetDetectorParams::centered_for_width(img.width() as usize);
//!
//! let result = detect::detect_targets(&img, params)?;
//! match result.offset_pixels() {
//!     Some(px) => println!("steer by {px:.1} px"),
//!     None => println!("no target pair"),
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## API map
//! - `retro_targets::core`: image views, contours, convex hulls, rotated rectangles.
//! - `retro_targets::detector`: segmentation, filtering, pairing and offset.
//! - `retro_targets::detect` (feature `image`): end-to-end helpers from `image::RgbImage`.

pub use retro_targets_core as core;
pub use retro_targets_detector as detector;

pub use retro_targets_core::{BinaryMask, ChannelOrder, ColorImageView, Contour, RotatedRect};
pub use retro_targets_detector::{
    Identification, TargetDetectionResult, TargetDetector, TargetDetectorParams, TargetOffset,
    TargetPair,
};

#[cfg(feature = "image")]
pub mod detect;
