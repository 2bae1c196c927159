use retro_targets_core::ImageError;

/// Errors returned by [`TargetDetector::detect`](super::TargetDetector::detect).
#[derive(thiserror::Error, Debug)]
pub enum TargetDetectError {
    #[error("invalid input frame: {0}")]
    InvalidFrame(#[from] ImageError),
}

/// Rejected detector configuration.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ParamsError {
    #[error("range `{name}` is invalid (min={min}, max={max})")]
    InvalidRange {
        name: &'static str,
        min: f64,
        max: f64,
    },
    #[error("`{name}` must be a finite number (got {value})")]
    NotFinite { name: &'static str, value: f64 },
    #[error("`{name}` must be positive (got {value})")]
    NotPositive { name: &'static str, value: f64 },
}
