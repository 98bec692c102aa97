use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;
use crate::utils::ConvertError;

/// Output formats for the image conversion path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    WebP,
    Jpeg,
    Png,
}

impl ImageFormat {
    /// File extension written for this format (jpeg maps to "jpg")
    pub fn extension(&self) -> &'static str {
        match self {
            Self::WebP => "webp",
            Self::Jpeg => "jpg",
            Self::Png => "png",
        }
    }

    /// MIME type as exposed to the frontend format tabs
    pub fn mime(&self) -> &'static str {
        match self {
            Self::WebP => "image/webp",
            Self::Jpeg => "image/jpeg",
            Self::Png => "image/png",
        }
    }
}

impl FromStr for ImageFormat {
    type Err = ConvertError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_lowercase().as_str() {
            "webp" | "image/webp" => Ok(Self::WebP),
            "jpg" | "jpeg" | "image/jpeg" => Ok(Self::Jpeg),
            "png" | "image/png" => Ok(Self::Png),
            other => Err(ConvertError::format(format!(
                "Unsupported image output format: {other}"
            ))),
        }
    }
}

/// Output formats for the document conversion path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentTarget {
    Pdf,
    Txt,
    Docx,
}

impl DocumentTarget {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Txt => "txt",
            Self::Docx => "docx",
        }
    }

    pub fn mime(&self) -> &'static str {
        match self {
            Self::Pdf => "application/pdf",
            Self::Txt => "text/plain",
            Self::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
        }
    }
}

impl FromStr for DocumentTarget {
    type Err = ConvertError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.to_lowercase().as_str() {
            "pdf" | "application/pdf" => Ok(Self::Pdf),
            "txt" | "text/plain" => Ok(Self::Txt),
            "docx"
            | "application/vnd.openxmlformats-officedocument.wordprocessingml.document" => {
                Ok(Self::Docx)
            }
            other => Err(ConvertError::format(format!(
                "Unsupported document output format: {other}"
            ))),
        }
    }
}

/// Raster input extensions accepted by the image upload path.
const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp", "gif", "bmp"];

/// Returns `true` when the path carries a supported raster extension.
pub fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| IMAGE_EXTENSIONS.contains(&e.to_lowercase().as_str()))
        .unwrap_or(false)
}

/// Derives the output file name from the original name and target extension.
///
/// The base name is everything before the last dot (or the whole name when
/// there is none). When `prefix` is supplied the base name is replaced by
/// `{prefix}{index}` where `index` is 1-based, matching the batch rename
/// behavior of the options panel.
pub fn output_file_name(
    original_name: &str,
    extension: &str,
    prefix: Option<&str>,
    index: usize,
) -> String {
    match prefix {
        Some(p) if !p.trim().is_empty() => format!("{}{}.{}", p.trim(), index + 1, extension),
        _ => {
            let base = match original_name.rfind('.') {
                Some(0) | None => original_name,
                Some(pos) => &original_name[..pos],
            };
            format!("{base}.{extension}")
        }
    }
}
