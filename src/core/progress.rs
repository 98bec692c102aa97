//! Progress payloads emitted to the frontend during batch conversion.

use serde::{Deserialize, Serialize};

/// Progress update for the frontend progress bar, emitted once per item.
#[derive(Debug, Deserialize, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressUpdate {
    pub completed_tasks: usize,
    pub total_tasks: usize,
    pub progress_percentage: usize,
    pub status: String,
    #[serde(default)]
    pub metadata: Option<serde_json::Value>,
}

impl ProgressUpdate {
    /// Update for a successfully converted item. Status flips to "complete"
    /// on the final item of the batch.
    pub fn item(completed: usize, total: usize, metadata: serde_json::Value) -> Self {
        Self {
            completed_tasks: completed,
            total_tasks: total,
            progress_percentage: percentage(completed, total),
            status: if completed == total {
                "complete".to_string()
            } else {
                "processing".to_string()
            },
            metadata: Some(metadata),
        }
    }

    /// Update for an item whose conversion failed. The batch keeps going,
    /// so the percentage still advances.
    pub fn error(completed: usize, total: usize, metadata: serde_json::Value) -> Self {
        Self {
            completed_tasks: completed,
            total_tasks: total,
            progress_percentage: percentage(completed, total),
            status: "error".to_string(),
            metadata: Some(metadata),
        }
    }
}

fn percentage(completed: usize, total: usize) -> usize {
    if total > 0 { (completed * 100) / total } else { 0 }
}
