//! Bulk zip archive of staged conversion outputs.

use std::io::{Cursor, Write};
use std::path::PathBuf;

use zip::write::SimpleFileOptions;
use zip::ZipWriter;

use crate::utils::{ConvertError, ConvertResult};

/// File name offered for the bulk download.
pub const ARCHIVE_NAME: &str = "quickconvert_results.zip";

/// Packs the given staged files into one zip binary.
///
/// Entry names come from the staged file names, which are already unique
/// within the staging directory.
pub fn build_archive(files: &[PathBuf]) -> ConvertResult<Vec<u8>> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default();

    for path in files {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| ConvertError::processing(format!(
                "Staged file has no name: {}",
                path.display()
            )))?;
        let bytes = std::fs::read(path)?;

        writer
            .start_file(name, options)
            .map_err(|e| ConvertError::processing(format!("Archive entry failed: {e}")))?;
        writer.write_all(&bytes)?;
    }

    let cursor = writer
        .finish()
        .map_err(|e| ConvertError::processing(format!("Archive finalize failed: {e}")))?;
    Ok(cursor.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;

    #[test]
    fn archive_round_trips_entries() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("first.jpg");
        let b = dir.path().join("second.png");
        std::fs::write(&a, b"jpeg bytes").unwrap();
        std::fs::write(&b, b"png bytes").unwrap();

        let bytes = build_archive(&[a, b]).unwrap();

        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        assert_eq!(archive.len(), 2);

        let mut entry = archive.by_name("first.jpg").unwrap();
        let mut content = Vec::new();
        entry.read_to_end(&mut content).unwrap();
        assert_eq!(content, b"jpeg bytes");
    }

    #[test]
    fn missing_staged_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let gone = dir.path().join("missing.jpg");
        assert!(build_archive(&[gone]).is_err());
    }
}
