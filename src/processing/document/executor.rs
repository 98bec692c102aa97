//! Sequential batch executor for document conversions.
//!
//! Mirrors the image executor: one `spawn_blocking` per item, awaited in
//! order, failures recorded per item without aborting the batch. A failed
//! item's progress event names the file so the frontend can alert on it.

use std::path::PathBuf;

use tracing::{debug, warn};

use crate::core::{ConversionOutcome, DocumentAsset, DocumentKind, ProgressUpdate};
use crate::processing::document::router;
use crate::utils::{self, ConvertError, ConvertResult, DocumentTarget, output_file_name};

/// One document conversion job, snapshotted from the asset store.
#[derive(Debug, Clone)]
pub struct DocumentJob {
    pub file_name: String,
    pub path: PathBuf,
    pub size: u64,
    pub kind: DocumentKind,
}

impl DocumentJob {
    pub fn from_asset(asset: &DocumentAsset) -> Self {
        Self {
            file_name: asset.file_name.clone(),
            path: asset.path.clone(),
            size: asset.size,
            kind: asset.kind,
        }
    }
}

/// Converts all `jobs` to `target` sequentially, invoking `progress` after
/// each document.
pub async fn execute_batch(
    jobs: Vec<DocumentJob>,
    target: DocumentTarget,
    staging_dir: PathBuf,
    progress: impl Fn(ProgressUpdate) + Send,
) -> ConvertResult<Vec<ConversionOutcome>> {
    let total = jobs.len();
    let mut outcomes = Vec::with_capacity(total);

    for (idx, job) in jobs.into_iter().enumerate() {
        let completed = idx + 1;
        let file_name = job.file_name.clone();
        let original_path = job.path.to_string_lossy().to_string();
        let original_size = job.size;
        let output_name = output_file_name(&job.file_name, target.extension(), None, idx);

        let dir = staging_dir.clone();
        let name = output_name.clone();
        let result =
            tokio::task::spawn_blocking(move || convert_single(job, target, dir, name))
                .await
                .map_err(|e| ConvertError::processing(format!("Conversion task panicked: {e}")))?;

        match result {
            Ok(outcome) => {
                debug!(
                    "{} converted to {} ({} bytes)",
                    file_name,
                    target.extension(),
                    outcome.new_size
                );
                progress(ProgressUpdate::item(
                    completed,
                    total,
                    serde_json::json!({
                        "fileName": outcome.file_name,
                        "originalSize": outcome.original_size,
                        "newSize": outcome.new_size,
                    }),
                ));
                outcomes.push(outcome);
            }
            Err(e) => {
                let error_msg = e.to_string();
                warn!("Document conversion failed for {file_name}: {error_msg}");

                // The frontend alerts on this event, naming the file
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

fn convert_single(
    job: DocumentJob,
    target: DocumentTarget,
    staging_dir: PathBuf,
    output_name: String,
) -> ConvertResult<ConversionOutcome> {
    let bytes = std::fs::read(&job.path).map_err(|e| {
        ConvertError::processing(format!("Cannot read '{}': {e}", job.path.display()))
    })?;

    let output = router::convert_document(&bytes, job.kind, target)?;
    let new_size = output.len() as u64;

    let output_path = utils::unique_path(&staging_dir, &output_name);
    std::fs::write(&output_path, &output)?;

    Ok(ConversionOutcome::success(
        output_name,
        output_path,
        job.path.to_string_lossy().to_string(),
        job.size,
        new_size,
        None,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_doc(dir: &std::path::Path, name: &str, content: &[u8]) -> DocumentJob {
        let path = dir.join(name);
        std::fs::write(&path, content).unwrap();
        let kind: DocumentKind = utils::extension(&path).unwrap().parse().unwrap();
        DocumentJob {
            file_name: name.to_string(),
            path,
            size: content.len() as u64,
            kind,
        }
    }

    #[tokio::test]
    async fn txt_to_docx_produces_a_result_row() {
        let dir = tempfile::tempdir().unwrap();
        let staging = tempfile::tempdir().unwrap();
        let job = write_doc(dir.path(), "notes.txt", b"one\ntwo\n");

        let outcomes = execute_batch(
            vec![job],
            DocumentTarget::Docx,
            staging.path().to_path_buf(),
            |_| {},
        )
        .await
        .unwrap();

        assert_eq!(outcomes.len(), 1);
        assert!(outcomes[0].success);
        assert_eq!(outcomes[0].file_name, "notes.docx");
        let staged = std::fs::read(outcomes[0].output_path.as_ref().unwrap()).unwrap();
        assert_eq!(outcomes[0].new_size, staged.len() as u64);
    }

    #[tokio::test]
    async fn unsupported_pairing_fails_that_item_and_continues() {
        let dir = tempfile::tempdir().unwrap();
        let staging = tempfile::tempdir().unwrap();
        // txt -> txt has no route; the docx build afterwards still runs
        let jobs = vec![
            write_doc(dir.path(), "a.txt", b"alpha"),
            write_doc(dir.path(), "b.docx", b"not a real docx"),
        ];

        let mut events = Vec::new();
        let outcomes = execute_batch(jobs, DocumentTarget::Txt, staging.path().to_path_buf(), {
            let events = std::sync::Mutex::new(&mut events);
            move |u: ProgressUpdate| events.lock().unwrap().push(u)
        })
        .await
        .unwrap();

        assert_eq!(outcomes.len(), 2);
        assert!(!outcomes[0].success);
        assert!(outcomes[0]
            .error
            .as_ref()
            .unwrap()
            .contains("No conversion route"));
        assert!(!outcomes[1].success); // invalid docx bytes

        // Both failures were surfaced with the file name attached
        assert_eq!(events.len(), 2);
        assert!(events.iter().all(|e| e.status == "error"));
    }
}
