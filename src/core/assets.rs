//! In-memory store for uploaded images and documents.
//!
//! Assets live for the duration of the session only; there is no removal
//! operation and no persistence, matching the upload-then-convert flow.

use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use image::RgbaImage;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::types::{
    DocumentAssetInfo, DocumentUploadReport, ImageAssetInfo, ImageUploadReport, RejectedFile,
};
use crate::utils::{self, ConvertError, ConvertResult, is_supported_image};

/// Source kind of an uploaded document, derived from its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    /// Legacy word-processor document
    Rtf,
    Docx,
    Txt,
}

impl DocumentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Rtf => "rtf",
            Self::Docx => "docx",
            Self::Txt => "txt",
        }
    }
}

impl FromStr for DocumentKind {
    type Err = ConvertError;

    fn from_str(ext: &str) -> Result<Self, Self::Err> {
        match ext.to_lowercase().as_str() {
            "rtf" => Ok(Self::Rtf),
            "docx" => Ok(Self::Docx),
            "txt" => Ok(Self::Txt),
            other => Err(ConvertError::format(format!(
                "Unsupported document format: {other}"
            ))),
        }
    }
}

/// An uploaded image awaiting conversion.
#[derive(Debug, Clone)]
pub struct ImageAsset {
    pub id: u64,
    pub path: PathBuf,
    pub file_name: String,
    pub size: u64,
    /// Rendered replacement produced by the editor. Once set it takes
    /// precedence over the source file for preview, editing and conversion.
    pub edited: Option<Arc<RgbaImage>>,
}

impl ImageAsset {
    /// Returns the asset's current surface: the edited raster when one
    /// exists, otherwise the decoded source file.
    pub fn load_surface(&self) -> ConvertResult<Arc<RgbaImage>> {
        if let Some(edited) = &self.edited {
            return Ok(Arc::clone(edited));
        }
        let decoded = image::open(&self.path).map_err(|e| {
            ConvertError::processing(format!(
                "Failed to load '{}': {e}",
                self.path.display()
            ))
        })?;
        Ok(Arc::new(decoded.to_rgba8()))
    }

    pub fn info(&self) -> ImageAssetInfo {
        ImageAssetInfo {
            id: self.id,
            file_name: self.file_name.clone(),
            size: self.size,
            edited: self.edited.is_some(),
        }
    }
}

/// An uploaded document awaiting conversion. Immutable until converted.
#[derive(Debug, Clone)]
pub struct DocumentAsset {
    pub id: u64,
    pub path: PathBuf,
    pub file_name: String,
    pub size: u64,
    pub kind: DocumentKind,
}

impl DocumentAsset {
    pub fn info(&self) -> DocumentAssetInfo {
        DocumentAssetInfo {
            id: self.id,
            file_name: self.file_name.clone(),
            size: self.size,
            kind: self.kind,
        }
    }
}

/// Ordered store of everything uploaded this session.
#[derive(Debug, Default)]
pub struct AssetStore {
    images: Vec<ImageAsset>,
    documents: Vec<DocumentAsset>,
    next_id: u64,
}

impl AssetStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn allocate_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    /// Appends image files in input order, skipping anything that is not a
    /// supported raster file. Skipped files are reported, not fatal.
    pub fn add_images(&mut self, paths: &[PathBuf]) -> ImageUploadReport {
        let mut report = ImageUploadReport {
            added: Vec::new(),
            rejected: Vec::new(),
        };

        for path in paths {
            let name = utils::file_name(path);
            if !is_supported_image(path) {
                report.rejected.push(RejectedFile {
                    file_name: name,
                    reason: "Not a supported image file".to_string(),
                });
                continue;
            }
            match utils::file_size(path) {
                Ok(size) => {
                    let id = self.allocate_id();
                    let asset = ImageAsset {
                        id,
                        path: path.clone(),
                        file_name: name,
                        size,
                        edited: None,
                    };
                    report.added.push(asset.info());
                    self.images.push(asset);
                }
                Err(e) => report.rejected.push(RejectedFile {
                    file_name: name,
                    reason: e.to_string(),
                }),
            }
        }

        debug!(
            "Added {} images ({} rejected), store now holds {}",
            report.added.len(),
            report.rejected.len(),
            self.images.len()
        );
        report
    }

    /// Appends document files, validating extensions against the supported
    /// set and skipping duplicates by file name.
    pub fn add_documents(&mut self, paths: &[PathBuf]) -> DocumentUploadReport {
        let mut report = DocumentUploadReport {
            added: Vec::new(),
            rejected: Vec::new(),
        };

        for path in paths {
            let name = utils::file_name(path);
            let kind = match utils::extension(path)
                .ok_or_else(|| ConvertError::format("File has no extension"))
                .and_then(|ext| ext.parse::<DocumentKind>())
            {
                Ok(kind) => kind,
                Err(_) => {
                    report.rejected.push(RejectedFile {
                        file_name: name.clone(),
                        reason: format!(
                            "{name} is not a supported file type. Only RTF, DOCX and TXT files are supported."
                        ),
                    });
                    continue;
                }
            };

            // Duplicates by file name are silently skipped
            if self.documents.iter().any(|d| d.file_name == name) {
                continue;
            }

            match utils::file_size(path) {
                Ok(size) => {
                    let id = self.allocate_id();
                    let asset = DocumentAsset {
                        id,
                        path: path.clone(),
                        file_name: name,
                        size,
                        kind,
                    };
                    report.added.push(asset.info());
                    self.documents.push(asset);
                }
                Err(e) => report.rejected.push(RejectedFile {
                    file_name: name,
                    reason: e.to_string(),
                }),
            }
        }

        report
    }

    pub fn images(&self) -> &[ImageAsset] {
        &self.images
    }

    pub fn documents(&self) -> &[DocumentAsset] {
        &self.documents
    }

    pub fn image(&self, id: u64) -> Option<&ImageAsset> {
        self.images.iter().find(|a| a.id == id)
    }

    pub fn image_mut(&mut self, id: u64) -> Option<&mut ImageAsset> {
        self.images.iter_mut().find(|a| a.id == id)
    }
}

/// Writes a small raster to `dir` for tests that need a real image file.
#[cfg(test)]
pub(crate) fn write_test_png(dir: &std::path::Path, name: &str, width: u32, height: u32) -> PathBuf {
    let path = dir.join(name);
    let img = RgbaImage::from_pixel(width, height, image::Rgba([120, 30, 200, 255]));
    img.save(&path).unwrap();
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_images_filters_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        let png = write_test_png(dir.path(), "a.png", 4, 4);
        let txt = dir.path().join("note.txt");
        std::fs::write(&txt, "hello").unwrap();

        let mut store = AssetStore::new();
        let report = store.add_images(&[png, txt]);

        assert_eq!(report.added.len(), 1);
        assert_eq!(report.rejected.len(), 1);
        assert_eq!(store.images().len(), 1);
        assert_eq!(report.added[0].file_name, "a.png");
    }

    #[test]
    fn add_documents_rejects_unsupported_extension() {
        let dir = tempfile::tempdir().unwrap();
        let pdf = dir.path().join("report.pdf");
        std::fs::write(&pdf, b"%PDF-1.4").unwrap();

        let mut store = AssetStore::new();
        let report = store.add_documents(&[pdf]);

        assert!(report.added.is_empty());
        assert_eq!(report.rejected.len(), 1);
        assert!(report.rejected[0].reason.contains("not a supported file type"));
        assert!(store.documents().is_empty());
    }

    #[test]
    fn add_documents_skips_duplicates_by_name() {
        let dir = tempfile::tempdir().unwrap();
        let txt = dir.path().join("notes.txt");
        std::fs::write(&txt, "line").unwrap();

        let mut store = AssetStore::new();
        store.add_documents(&[txt.clone()]);
        let second = store.add_documents(&[txt]);

        assert!(second.added.is_empty());
        assert!(second.rejected.is_empty());
        assert_eq!(store.documents().len(), 1);
    }

    #[test]
    fn ids_are_unique_and_ordered() {
        let dir = tempfile::tempdir().unwrap();
        let a = write_test_png(dir.path(), "a.png", 2, 2);
        let b = write_test_png(dir.path(), "b.png", 2, 2);

        let mut store = AssetStore::new();
        let report = store.add_images(&[a, b]);
        assert!(report.added[0].id < report.added[1].id);
    }

    #[test]
    fn load_surface_prefers_edited_raster() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_test_png(dir.path(), "a.png", 4, 4);

        let mut store = AssetStore::new();
        let id = store.add_images(&[path]).added[0].id;

        let edited = Arc::new(RgbaImage::from_pixel(2, 2, image::Rgba([1, 2, 3, 255])));
        store.image_mut(id).unwrap().edited = Some(Arc::clone(&edited));

        let surface = store.image(id).unwrap().load_surface().unwrap();
        assert_eq!(surface.dimensions(), (2, 2));
    }
}
