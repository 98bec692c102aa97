//! Core types for conversion settings and results.

use serde::{Deserialize, Serialize};
use crate::utils::{ConvertResult, ImageFormat, ValidationError};

/// Settings applied to every image in a batch conversion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageConversionSettings {
    /// Output format for all images in the batch
    pub format: ImageFormat,
    /// Encode quality (1-100), mapped to [0,1] at the encoder boundary
    pub quality: u32,
    /// Optional target width in pixels; downscale only, aspect preserved
    #[serde(rename = "targetWidth")]
    pub target_width: Option<u32>,
    /// Optional rename prefix; output names become `{prefix}{n}.{ext}`
    #[serde(rename = "renamePrefix")]
    pub rename_prefix: Option<String>,
}

impl ImageConversionSettings {
    /// Validates quality and resize bounds before a batch starts.
    pub fn validate(&self) -> ConvertResult<()> {
        if self.quality == 0 || self.quality > 100 {
            return Err(ValidationError::settings(format!(
                "Invalid quality value: {}. Must be between 1 and 100",
                self.quality
            ))
            .into());
        }
        if let Some(width) = self.target_width {
            if width == 0 {
                return Err(ValidationError::settings("Target width cannot be 0").into());
            }
        }
        Ok(())
    }

    /// Encoder-boundary quality in [0,1].
    pub fn encoder_quality(&self) -> f32 {
        self.quality as f32 / 100.0
    }
}

/// Result of converting one asset (image or document).
///
/// Failed conversions keep their slot in the outcome list so the frontend
/// renders one row per input, in input order.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionOutcome {
    /// Derived output file name (extension mapped from the target format)
    pub file_name: String,
    /// Staged output file; `None` when the conversion failed
    pub output_path: Option<String>,
    /// Path of the source file, kept for the before/after compare view
    pub original_path: String,
    /// Source file size in bytes
    pub original_size: u64,
    /// Encoded output size in bytes (0 on failure)
    pub new_size: u64,
    /// Output pixel width (image conversions only)
    pub width: Option<u32>,
    /// Output pixel height (image conversions only)
    pub height: Option<u32>,
    /// Size delta as `(1 - new/old) * 100`, rounded to one decimal
    pub reduction_percent: f64,
    /// Human-facing delta with explicit sign, e.g. "-37.5%" or "+4.0%"
    pub reduction_display: String,
    /// Whether the conversion succeeded
    pub success: bool,
    /// Error message if the conversion failed
    pub error: Option<String>,
}

/// Summary of an uploaded image shown in the upload-ready list.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageAssetInfo {
    pub id: u64,
    pub file_name: String,
    pub size: u64,
    /// Whether an edited surface replaces the original for preview/convert
    pub edited: bool,
}

/// Summary of an uploaded document shown in the upload-ready list.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentAssetInfo {
    pub id: u64,
    pub file_name: String,
    pub size: u64,
    pub kind: crate::core::DocumentKind,
}

/// A file the store refused, with the user-visible reason.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RejectedFile {
    pub file_name: String,
    pub reason: String,
}

/// Outcome of an `add_images` call.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageUploadReport {
    pub added: Vec<ImageAssetInfo>,
    pub rejected: Vec<RejectedFile>,
}

/// Outcome of an `add_documents` call.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentUploadReport {
    pub added: Vec<DocumentAssetInfo>,
    pub rejected: Vec<RejectedFile>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(quality: u32) -> ImageConversionSettings {
        ImageConversionSettings {
            format: ImageFormat::Jpeg,
            quality,
            target_width: None,
            rename_prefix: None,
        }
    }

    #[test]
    fn quality_bounds_are_validated() {
        assert!(settings(0).validate().is_err());
        assert!(settings(101).validate().is_err());
        assert!(settings(1).validate().is_ok());
        assert!(settings(100).validate().is_ok());
    }

    #[test]
    fn encoder_quality_maps_to_unit_interval() {
        assert_eq!(settings(80).encoder_quality(), 0.8);
        assert_eq!(settings(100).encoder_quality(), 1.0);
    }

    #[test]
    fn zero_target_width_is_rejected() {
        let mut s = settings(80);
        s.target_width = Some(0);
        assert!(s.validate().is_err());
        s.target_width = Some(500);
        assert!(s.validate().is_ok());
    }
}
