use crate::{core, detector};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Errors produced by the high-level facade helpers.
#[derive(thiserror::Error, Debug)]
pub enum DetectError {
    #[error("invalid color image buffer length (expected {expected} bytes, got {got})")]
    InvalidColorBuffer { expected: usize, got: usize },

    #[error("invalid color image dimensions (width={width}, height={height})")]
    InvalidColorDimensions { width: u32, height: u32 },

    #[error(transparent)]
    Params(#[from] detector::ParamsError),

    #[error(transparent)]
    Detect(#[from] detector::TargetDetectError),
}

/// Convert an `image::RgbImage` into the lightweight `retro-targets-core` view type.
pub fn rgb_view(img: &::image::RgbImage) -> core::ColorImageView<'_> {
    core::ColorImageView {
        width: img.width() as usize,
        height: img.height() as usize,
        order: core::ChannelOrder::Rgb,
        data: img.as_raw(),
    }
}

/// Run the full pipeline on an RGB image.
#[cfg_attr(
    feature = "tracing",
    instrument(level = "info", skip(img, params), fields(width = img.width(), height = img.height()))
)]
pub fn detect_targets(
    img: &::image::RgbImage,
    params: detector::TargetDetectorParams,
) -> Result<detector::TargetDetectionResult, DetectError> {
    let detector = detector::TargetDetector::new(params)?;
    Ok(detector.detect(&rgb_view(img))?)
}

/// Convenience overload with the reference column centered on the image.
pub fn detect_targets_default(
    img: &::image::RgbImage,
) -> Result<detector::TargetDetectionResult, DetectError> {
    let params = detector::TargetDetectorParams::centered_for_width(img.width() as usize);
    detect_targets(img, params)
}

fn checked_len(width: u32, height: u32) -> Result<usize, DetectError> {
    let w = usize::try_from(width).ok();
    let h = usize::try_from(height).ok();
    w.zip(h)
        .filter(|(w, h)| *w > 0 && *h > 0)
        .and_then(|(w, h)| w.checked_mul(h))
        .and_then(|n| n.checked_mul(3))
        .ok_or(DetectError::InvalidColorDimensions { width, height })
}

/// Build an `image::RgbImage` from a raw interleaved RGB buffer.
pub fn rgb_image_from_slice(
    width: u32,
    height: u32,
    pixels: &[u8],
) -> Result<::image::RgbImage, DetectError> {
    let expected = checked_len(width, height)?;
    if pixels.len() != expected {
        return Err(DetectError::InvalidColorBuffer {
            expected,
            got: pixels.len(),
        });
    }
    ::image::RgbImage::from_raw(width, height, pixels.to_vec())
        .ok_or(DetectError::InvalidColorDimensions { width, height })
}

/// Run the pipeline on a raw interleaved buffer in either channel order,
/// without copying it into an `image` container.
pub fn detect_targets_from_u8(
    width: u32,
    height: u32,
    order: core::ChannelOrder,
    pixels: &[u8],
    params: detector::TargetDetectorParams,
) -> Result<detector::TargetDetectionResult, DetectError> {
    let expected = checked_len(width, height)?;
    if pixels.len() != expected {
        return Err(DetectError::InvalidColorBuffer {
            expected,
            got: pixels.len(),
        });
    }
    let view = core::ColorImageView {
        width: width as usize,
        height: height as usize,
        order,
        data: pixels,
    };
    let detector = detector::TargetDetector::new(params)?;
    Ok(detector.detect(&view)?)
}

pub fn detect_targets_from_rgb_u8(
    width: u32,
    height: u32,
    pixels: &[u8],
    params: detector::TargetDetectorParams,
) -> Result<detector::TargetDetectionResult, DetectError> {
    detect_targets_from_u8(width, height, core::ChannelOrder::Rgb, pixels, params)
}

/// Convert a segmentation mask into an 8-bit grayscale image (0 or 255).
pub fn mask_to_image(mask: &core::BinaryMask) -> Option<::image::GrayImage> {
    let width = u32::try_from(mask.width).ok()?;
    let height = u32::try_from(mask.height).ok()?;
    ::image::GrayImage::from_raw(width, height, mask.data.clone())
}
