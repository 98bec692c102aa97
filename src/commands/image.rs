//! Command handler for batch image conversion.

use tauri::Emitter;
use tauri::State;
use tracing::debug;

use crate::core::{AppState, ConversionOutcome, ImageConversionSettings};
use crate::processing::image::{self, ImageJob};
use crate::utils::ConvertResult;

/// Converts every queued image with the given settings.
///
/// Items run strictly sequentially; outcome order matches upload order.
/// Per-item failures are recorded in their row and do not abort the batch.
///
/// # Events Emitted
/// * `image_conversion_progress` - per-item progress updates
#[tauri::command]
pub async fn convert_images(
    app: tauri::AppHandle,
    state: State<'_, AppState>,
    settings: ImageConversionSettings,
) -> ConvertResult<Vec<ConversionOutcome>> {
    // Snapshot jobs and release the session lock before pixel work starts
    let (jobs, staging_dir) = {
        let mut session = state.lock();
        let staging_dir = session.results.staging_dir()?;
        let jobs: Vec<ImageJob> = session
            .assets
            .images()
            .iter()
            .map(ImageJob::from_asset)
            .collect();
        (jobs, staging_dir)
    };

    debug!("Received convert_images command for {} images", jobs.len());
    if jobs.is_empty() {
        return Ok(Vec::new());
    }

    let emitter = app.clone();
    let outcomes = image::execute_batch(jobs, settings, staging_dir, move |update| {
        let _ = emitter.emit("image_conversion_progress", &update);
    })
    .await?;

    state.lock().results.extend(outcomes.clone());
    Ok(outcomes)
}
