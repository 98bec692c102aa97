//! Accumulates conversion outcomes and owns their staged output files.
//!
//! Staged outputs live in one temp directory per session. Clearing the
//! collector (or dropping it at session end) deletes the directory, so
//! result bytes are released deterministically rather than accumulating
//! for the whole session.

use std::path::PathBuf;

use tempfile::TempDir;
use tracing::debug;

use crate::core::ConversionOutcome;
use crate::results::archive;
use crate::utils::{ConvertError, ConvertResult};

/// Size delta as a percentage: `(1 - new/old) * 100`, rounded to one
/// decimal. Positive means the output shrank.
pub fn reduction_percent(original_size: u64, new_size: u64) -> f64 {
    if original_size == 0 {
        return 0.0;
    }
    let raw = (1.0 - new_size as f64 / original_size as f64) * 100.0;
    (raw * 10.0).round() / 10.0
}

/// Display string for a reduction: shrinkage shows "-", growth shows "+".
pub fn format_reduction(percent: f64) -> String {
    let sign = if percent > 0.0 { '-' } else { '+' };
    format!("{sign}{:.1}%", percent.abs())
}

impl ConversionOutcome {
    /// Outcome row for a successful conversion.
    pub fn success(
        file_name: String,
        output_path: PathBuf,
        original_path: String,
        original_size: u64,
        new_size: u64,
        dimensions: Option<(u32, u32)>,
    ) -> Self {
        let percent = reduction_percent(original_size, new_size);
        Self {
            file_name,
            output_path: Some(output_path.to_string_lossy().to_string()),
            original_path,
            original_size,
            new_size,
            width: dimensions.map(|d| d.0),
            height: dimensions.map(|d| d.1),
            reduction_percent: percent,
            reduction_display: format_reduction(percent),
            success: true,
            error: None,
        }
    }

    /// Outcome row for a failed conversion; keeps its slot in the list so
    /// ordering still matches the inputs.
    pub fn failure(
        file_name: String,
        original_path: String,
        original_size: u64,
        error: String,
    ) -> Self {
        Self {
            file_name,
            output_path: None,
            original_path,
            original_size,
            new_size: 0,
            width: None,
            height: None,
            reduction_percent: 0.0,
            reduction_display: format_reduction(0.0),
            success: false,
            error: Some(error),
        }
    }
}

/// Ordered collection of conversion outcomes plus their staging directory.
#[derive(Debug, Default)]
pub struct ResultCollector {
    staging: Option<TempDir>,
    outcomes: Vec<ConversionOutcome>,
}

impl ResultCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Directory staged outputs are written to, created on first use.
    pub fn staging_dir(&mut self) -> ConvertResult<PathBuf> {
        if self.staging.is_none() {
            let dir = tempfile::Builder::new()
                .prefix("quickconvert-")
                .tempdir()
                .map_err(|e| ConvertError::IO(format!("Cannot create staging dir: {e}")))?;
            debug!("Created staging directory {}", dir.path().display());
            self.staging = Some(dir);
        }
        Ok(self.staging.as_ref().unwrap().path().to_path_buf())
    }

    pub fn push(&mut self, outcome: ConversionOutcome) {
        self.outcomes.push(outcome);
    }

    pub fn extend(&mut self, outcomes: Vec<ConversionOutcome>) {
        self.outcomes.extend(outcomes);
    }

    pub fn outcomes(&self) -> &[ConversionOutcome] {
        &self.outcomes
    }

    pub fn successful_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.success).count()
    }

    /// The bulk archive is offered only when more than one result exists.
    pub fn archive_available(&self) -> bool {
        self.successful_count() > 1
    }

    /// Builds the zip archive of all successful outputs into the staging
    /// directory and returns its path.
    pub fn write_archive(&mut self) -> ConvertResult<PathBuf> {
        let successful = self.successful_count();
        if successful < 2 {
            return Err(ConvertError::ArchiveUnavailable(successful));
        }

        let entries: Vec<PathBuf> = self
            .outcomes
            .iter()
            .filter(|o| o.success)
            .filter_map(|o| o.output_path.as_ref().map(PathBuf::from))
            .collect();

        let bytes = archive::build_archive(&entries)?;
        let dir = self.staging_dir()?;
        let path = dir.join(archive::ARCHIVE_NAME);
        std::fs::write(&path, bytes)?;
        Ok(path)
    }

    /// Drops all outcomes and deletes every staged file.
    pub fn clear(&mut self) {
        self.outcomes.clear();
        if let Some(dir) = self.staging.take() {
            debug!("Releasing staging directory {}", dir.path().display());
            // TempDir cleanup happens on drop; close() surfaces IO errors
            let _ = dir.close();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reduction_follows_the_documented_formula() {
        assert_eq!(reduction_percent(1000, 625), 37.5);
        assert_eq!(reduction_percent(1000, 1040), -4.0);
        assert_eq!(reduction_percent(1000, 1000), 0.0);
        assert_eq!(reduction_percent(0, 500), 0.0);
        // Rounded to one decimal
        assert_eq!(reduction_percent(3, 1), 66.7);
    }

    #[test]
    fn displayed_sign_flips_with_the_delta() {
        assert_eq!(format_reduction(37.5), "-37.5%");
        assert_eq!(format_reduction(-4.0), "+4.0%");
        assert_eq!(format_reduction(0.0), "+0.0%");
    }

    #[test]
    fn archive_requires_more_than_one_result() {
        let mut collector = ResultCollector::new();
        assert!(!collector.archive_available());
        assert!(matches!(
            collector.write_archive(),
            Err(ConvertError::ArchiveUnavailable(0))
        ));

        let dir = collector.staging_dir().unwrap();
        let staged = dir.join("one.txt");
        std::fs::write(&staged, b"data").unwrap();
        collector.push(ConversionOutcome::success(
            "one.txt".into(),
            staged,
            "/src/one.txt".into(),
            100,
            4,
            None,
        ));
        assert!(!collector.archive_available());

        let staged = dir.join("two.txt");
        std::fs::write(&staged, b"more data").unwrap();
        collector.push(ConversionOutcome::success(
            "two.txt".into(),
            staged,
            "/src/two.txt".into(),
            100,
            9,
            None,
        ));
        assert!(collector.archive_available());

        let archive_path = collector.write_archive().unwrap();
        assert!(archive_path.ends_with(archive::ARCHIVE_NAME));
        assert!(archive_path.exists());
    }

    #[test]
    fn failed_outcomes_do_not_count_toward_the_archive() {
        let mut collector = ResultCollector::new();
        collector.push(ConversionOutcome::failure(
            "a.pdf".into(),
            "/src/a.rtf".into(),
            10,
            "boom".into(),
        ));
        collector.push(ConversionOutcome::failure(
            "b.pdf".into(),
            "/src/b.rtf".into(),
            10,
            "boom".into(),
        ));
        assert_eq!(collector.successful_count(), 0);
        assert!(!collector.archive_available());
    }

    #[test]
    fn clear_deletes_staged_files() {
        let mut collector = ResultCollector::new();
        let dir = collector.staging_dir().unwrap();
        let staged = dir.join("out.jpg");
        std::fs::write(&staged, b"bytes").unwrap();

        collector.clear();
        assert!(!staged.exists());
        assert!(collector.outcomes().is_empty());
    }
}
