//! Commands for the result list and bulk download.

use serde::Serialize;
use tauri::State;

use crate::core::{AppState, ConversionOutcome};
use crate::utils::ConvertResult;

/// Result rows plus whether the bulk download is offered.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultListing {
    pub outcomes: Vec<ConversionOutcome>,
    pub archive_available: bool,
}

#[tauri::command]
pub fn list_results(state: State<'_, AppState>) -> ResultListing {
    let session = state.lock();
    ResultListing {
        outcomes: session.results.outcomes().to_vec(),
        archive_available: session.results.archive_available(),
    }
}

/// Builds the zip of all successful outputs and returns its staged path.
///
/// Errors when fewer than two results exist; the frontend only shows the
/// button past that threshold.
#[tauri::command]
pub fn build_archive(state: State<'_, AppState>) -> ConvertResult<String> {
    let path = state.lock().results.write_archive()?;
    Ok(path.to_string_lossy().to_string())
}

/// Drops all outcomes and deletes their staged files.
#[tauri::command]
pub fn clear_results(state: State<'_, AppState>) {
    state.lock().results.clear();
}
