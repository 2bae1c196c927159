//! JSON configuration and report helpers.

use retro_targets_core::Contour;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{
    GoodCandidate, Identification, ParamsError, TargetDetectError, TargetDetectionResult,
    TargetDetector, TargetDetectorParams, TargetOffset,
};

#[derive(thiserror::Error, Debug)]
pub enum TargetIoError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Configuration for a single-image detection run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetDetectConfig {
    pub image_path: String,
    #[serde(default)]
    pub output_path: Option<String>,
    /// Where to write the HSV mask as PNG, if anywhere.
    #[serde(default)]
    pub mask_path: Option<String>,
    #[serde(default)]
    pub params: TargetDetectorParams,
}

impl TargetDetectConfig {
    /// Load a JSON config from disk.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, TargetIoError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Write this config to disk as pretty JSON.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), TargetIoError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Resolve the output report path.
    pub fn output_path(&self) -> PathBuf {
        self.output_path
            .as_ref()
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("target_detect_report.json"))
    }

    pub fn build_detector(&self) -> Result<TargetDetector, ParamsError> {
        TargetDetector::new(self.params)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetDetectReport {
    pub image_path: String,
    #[serde(default)]
    pub config_path: Option<String>,
    pub width: usize,
    pub height: usize,
    pub reference_column: f64,
    #[serde(default)]
    pub num_contours: usize,
    #[serde(default)]
    pub filtered: Vec<Contour>,
    #[serde(default)]
    pub candidates: Vec<GoodCandidate>,
    #[serde(default)]
    pub identification: Option<Identification>,
    pub offset: TargetOffset,
    #[serde(default)]
    pub error: Option<String>,
}

impl TargetDetectReport {
    /// Base report for a frame that has not been processed yet.
    pub fn new(
        image_path: impl Into<String>,
        config_path: Option<&Path>,
        width: usize,
        height: usize,
        reference_column: f64,
    ) -> Self {
        Self {
            image_path: image_path.into(),
            config_path: config_path.map(|p| p.to_string_lossy().into_owned()),
            width,
            height,
            reference_column,
            num_contours: 0,
            filtered: Vec::new(),
            candidates: Vec::new(),
            identification: None,
            offset: TargetOffset::NotFound,
            error: None,
        }
    }

    /// Populate report fields from a finished run.
    pub fn set_detection(&mut self, res: &TargetDetectionResult) {
        self.num_contours = res.contours.len();
        self.filtered = res.filtered.clone();
        self.candidates = res.candidates.clone();
        self.identification = Some(res.identification.clone());
        self.offset = res.offset;
        self.error = None;
    }

    /// Record a detection error.
    pub fn set_error(&mut self, err: &TargetDetectError) {
        self.error = Some(err.to_string());
        self.offset = TargetOffset::NotFound;
    }

    /// Load a report from JSON on disk.
    pub fn load_json(path: impl AsRef<Path>) -> Result<Self, TargetIoError> {
        let raw = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&raw)?)
    }

    /// Write this report to disk as pretty JSON, creating parent directories.
    pub fn write_json(&self, path: impl AsRef<Path>) -> Result<(), TargetIoError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use retro_targets_core::{BinaryMask, ImageError};

    #[test]
    fn config_round_trips_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cfg.json");
        let mut cfg = TargetDetectConfig {
            image_path: "frame.png".into(),
            output_path: None,
            mask_path: Some("mask.png".into()),
            params: TargetDetectorParams::default(),
        };
        cfg.params.reference_column = 320.0;
        cfg.write_json(&path).unwrap();

        let back = TargetDetectConfig::load_json(&path).unwrap();
        assert_eq!(back.image_path, "frame.png");
        assert_eq!(back.params, cfg.params);
        assert_eq!(back.output_path(), PathBuf::from("target_detect_report.json"));
        assert!(back.build_detector().is_ok());
    }

    #[test]
    fn bundled_config_matches_defaults() {
        let path = concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/../../testdata/target_detect_config.json"
        );
        let cfg = TargetDetectConfig::load_json(path).unwrap();
        assert_eq!(cfg.params, TargetDetectorParams::default());
        assert_eq!(cfg.mask_path.as_deref(), Some("tmpdata/target_mask.png"));
    }

    #[test]
    fn minimal_config_uses_default_params() {
        let cfg: TargetDetectConfig = serde_json::from_str(r#"{"image_path": "a.png"}"#).unwrap();
        assert_eq!(cfg.params, TargetDetectorParams::default());
        assert!(cfg.mask_path.is_none());
    }

    #[test]
    fn report_records_detection_and_errors() {
        let detector = TargetDetector::new(TargetDetectorParams::default()).unwrap();
        let res = detector.detect_mask(BinaryMask::new(8, 8));

        let mut report = TargetDetectReport::new("a.png", None, 8, 8, 213.0);
        report.set_detection(&res);
        assert_eq!(report.offset, TargetOffset::NotFound);
        assert!(report.identification.is_some());
        assert!(report.error.is_none());

        report.set_error(&TargetDetectError::InvalidFrame(ImageError::Empty {
            width: 0,
            height: 0,
        }));
        assert!(report.error.as_deref().unwrap().contains("empty image"));

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/report.json");
        report.write_json(&path).unwrap();
        let back = TargetDetectReport::load_json(&path).unwrap();
        assert_eq!(back.width, 8);
        assert_eq!(back.error, report.error);
    }
}
