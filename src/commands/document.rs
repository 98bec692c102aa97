//! Command handlers for document conversion.

use tauri::Emitter;
use tauri::State;
use tracing::debug;

use crate::core::{AppState, ConversionOutcome, DocumentKind};
use crate::processing::document::{self, DocumentJob};
use crate::utils::{ConvertResult, DocumentTarget};

/// Converts every queued document to `target`.
///
/// Items run strictly sequentially. A failed item (including an unsupported
/// source/target pairing) keeps its row and is surfaced through the error
/// progress event naming the file; the batch continues.
///
/// # Events Emitted
/// * `document_conversion_progress` - per-item progress updates
#[tauri::command]
pub async fn convert_documents(
    app: tauri::AppHandle,
    state: State<'_, AppState>,
    target: DocumentTarget,
) -> ConvertResult<Vec<ConversionOutcome>> {
    let (jobs, staging_dir) = {
        let mut session = state.lock();
        let staging_dir = session.results.staging_dir()?;
        let jobs: Vec<DocumentJob> = session
            .assets
            .documents()
            .iter()
            .map(DocumentJob::from_asset)
            .collect();
        (jobs, staging_dir)
    };

    debug!(
        "Received convert_documents command for {} documents -> {}",
        jobs.len(),
        target.extension()
    );
    if jobs.is_empty() {
        return Ok(Vec::new());
    }

    let emitter = app.clone();
    let outcomes = document::execute_batch(jobs, target, staging_dir, move |update| {
        let _ = emitter.emit("document_conversion_progress", &update);
    })
    .await?;

    state.lock().results.extend(outcomes.clone());
    Ok(outcomes)
}

/// Target formats offered in the tabs for a given source kind.
#[tauri::command]
pub fn supported_targets(kind: DocumentKind) -> Vec<DocumentTarget> {
    document::supported_targets(kind)
}
