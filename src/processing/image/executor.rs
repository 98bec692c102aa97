//! Sequential batch executor for image conversions.
//!
//! Each image is converted inside a `tokio::task::spawn_blocking` call so
//! the async runtime is never blocked by pixel work. Items are dispatched
//! strictly sequentially and awaited one at a time, so outcome order always
//! matches input order and the result list sees no interleaved writes.

use std::path::PathBuf;
use std::sync::Arc;

use image::RgbaImage;
use tracing::{debug, warn};

use crate::core::{ConversionOutcome, ImageAsset, ImageConversionSettings, ProgressUpdate};
use crate::processing::image::{encode_surface, apply_resize};
use crate::utils::{self, ConvertError, ConvertResult, output_file_name};

/// Pixel source for one conversion: the committed edit wins over the file.
#[derive(Debug, Clone)]
pub enum ImageSource {
    Edited(Arc<RgbaImage>),
    File(PathBuf),
}

/// One image conversion job, snapshotted from the asset store so the
/// session lock is not held while encoding runs.
#[derive(Debug, Clone)]
pub struct ImageJob {
    pub file_name: String,
    pub original_path: PathBuf,
    pub original_size: u64,
    pub source: ImageSource,
}

impl ImageJob {
    pub fn from_asset(asset: &ImageAsset) -> Self {
        let source = match &asset.edited {
            Some(surface) => ImageSource::Edited(Arc::clone(surface)),
            None => ImageSource::File(asset.path.clone()),
        };
        Self {
            file_name: asset.file_name.clone(),
            original_path: asset.path.clone(),
            original_size: asset.size,
            source,
        }
    }
}

/// Processes all `jobs` sequentially, invoking `progress` after each image.
///
/// A failed item is recorded as a failed outcome and the batch keeps going;
/// only a panicked worker aborts the whole batch.
pub async fn execute_batch(
    jobs: Vec<ImageJob>,
    settings: ImageConversionSettings,
    staging_dir: PathBuf,
    progress: impl Fn(ProgressUpdate) + Send,
) -> ConvertResult<Vec<ConversionOutcome>> {
    settings.validate()?;

    let total = jobs.len();
    let mut outcomes = Vec::with_capacity(total);

    for (idx, job) in jobs.into_iter().enumerate() {
        let completed = idx + 1;
        let file_name = job.file_name.clone();
        let original_path = job.original_path.to_string_lossy().to_string();
        let original_size = job.original_size;

        let output_name = output_file_name(
            &job.file_name,
            settings.format.extension(),
            settings.rename_prefix.as_deref(),
            idx,
        );

        let job_settings = settings.clone();
        let dir = staging_dir.clone();
        let name = output_name.clone();
        let result = tokio::task::spawn_blocking(move || convert_single(job, job_settings, dir, name))
            .await
            .map_err(|e| ConvertError::processing(format!("Conversion task panicked: {e}")))?;

        match result {
            Ok(outcome) => {
                let metadata = serde_json::json!({
                    "formattedMessage": format!(
                        "{} converted ({} -> {} bytes, {})",
                        outcome.file_name, outcome.original_size, outcome.new_size,
                        outcome.reduction_display
                    ),
                    "fileName": outcome.file_name,
                    "originalSize": outcome.original_size,
                    "newSize": outcome.new_size,
                    "reduction": outcome.reduction_display,
                });
                debug!("{}", metadata["formattedMessage"].as_str().unwrap_or_default());
                progress(ProgressUpdate::item(completed, total, metadata));
                outcomes.push(outcome);
            }
            Err(e) => {
                let error_msg = e.to_string();
                warn!("Image conversion failed for {file_name}: {error_msg}");

                progress(ProgressUpdate::error(
                    completed,
                    total,
                    serde_json::json!({ "fileName": file_name, "error": error_msg }),
                ));
                outcomes.push(ConversionOutcome::failure(
                    output_name,
                    original_path,
                    original_size,
                    error_msg,
                ));
            }
        }
    }

    Ok(outcomes)
}

// ── Blocking conversion (runs on tokio's blocking thread pool) ─────────────────────────

/// Converts one image synchronously: load current surface, downscale,
/// encode, stage the bytes.
fn convert_single(
    job: ImageJob,
    settings: ImageConversionSettings,
    staging_dir: PathBuf,
    output_name: String,
) -> ConvertResult<ConversionOutcome> {
    let surface = match job.source {
        ImageSource::Edited(edited) => (*edited).clone(),
        ImageSource::File(path) => image::open(&path)
            .map_err(|e| {
                ConvertError::processing(format!("Failed to load '{}': {e}", path.display()))
            })?
            .to_rgba8(),
    };

    let resized = apply_resize(surface, settings.target_width);
    let (width, height) = resized.dimensions();

    let bytes = encode_surface(&resized, settings.format, settings.encoder_quality())?;
    let new_size = bytes.len() as u64;

    let output_path = utils::unique_path(&staging_dir, &output_name);
    std::fs::write(&output_path, &bytes)?;

    Ok(ConversionOutcome::success(
        output_name,
        output_path,
        job.original_path.to_string_lossy().to_string(),
        job.original_size,
        new_size,
        Some((width, height)),
    ))
}
