//! Commands for the upload lists.

use std::path::PathBuf;

use serde::Serialize;
use tauri::State;
use tracing::debug;

use crate::core::{
    AppState, DocumentAssetInfo, DocumentUploadReport, ImageAssetInfo, ImageUploadReport,
};
use crate::processing::image::{apply_resize, encode_surface};
use crate::utils::{ConvertError, ConvertResult, ImageFormat};

/// Everything currently uploaded, for rebuilding the two upload lists.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetListing {
    pub images: Vec<ImageAssetInfo>,
    pub documents: Vec<DocumentAssetInfo>,
}

/// Queues image files for conversion.
///
/// Non-image files are skipped and reported back; nothing here is fatal.
#[tauri::command]
pub async fn add_images(
    state: State<'_, AppState>,
    paths: Vec<String>,
) -> ConvertResult<ImageUploadReport> {
    let paths: Vec<PathBuf> = paths.into_iter().map(PathBuf::from).collect();
    debug!("Received add_images command for {} files", paths.len());
    Ok(state.lock().assets.add_images(&paths))
}

/// Queues document files for conversion.
///
/// Unsupported extensions are rejected with a user-visible message naming
/// the file; duplicates by name are skipped.
#[tauri::command]
pub async fn add_documents(
    state: State<'_, AppState>,
    paths: Vec<String>,
) -> ConvertResult<DocumentUploadReport> {
    let paths: Vec<PathBuf> = paths.into_iter().map(PathBuf::from).collect();
    debug!("Received add_documents command for {} files", paths.len());
    Ok(state.lock().assets.add_documents(&paths))
}

/// Lists everything uploaded this session.
#[tauri::command]
pub fn list_assets(state: State<'_, AppState>) -> AssetListing {
    let session = state.lock();
    AssetListing {
        images: session.assets.images().iter().map(|a| a.info()).collect(),
        documents: session.assets.documents().iter().map(|a| a.info()).collect(),
    }
}

/// PNG-encoded preview of an image asset's current surface (edited raster
/// when one exists), downscaled for the upload list thumbnail.
#[tauri::command]
pub fn asset_preview(
    state: State<'_, AppState>,
    asset_id: u64,
    max_width: Option<u32>,
) -> ConvertResult<Vec<u8>> {
    let session = state.lock();
    let asset = session
        .assets
        .image(asset_id)
        .ok_or_else(|| ConvertError::processing(format!("No image with id {asset_id}")))?;

    let surface = asset.load_surface()?;
    let scaled = apply_resize((*surface).clone(), Some(max_width.unwrap_or(256)));
    encode_surface(&scaled, ImageFormat::Png, 1.0)
}
