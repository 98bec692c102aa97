use std::path::{Path, PathBuf};
use crate::utils::{ConvertResult, ValidationError};

/// Get file size in bytes
pub fn file_size(path: impl AsRef<Path>) -> ConvertResult<u64> {
    let path = path.as_ref();
    let meta = std::fs::metadata(path)
        .map_err(|_| ValidationError::path_not_found(path))?;
    if !meta.is_file() {
        return Err(ValidationError::not_a_file(path).into());
    }
    Ok(meta.len())
}

/// Extract the file name component, falling back to the whole path string
pub fn file_name(path: &Path) -> String {
    path.file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(&path.to_string_lossy())
        .to_string()
}

/// Get file extension as lowercase string
pub fn extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
}

/// Returns a path under `dir` for `name` that does not collide with an
/// existing file, appending ` (n)` to the stem when needed.
///
/// Staged outputs share one directory per session and batch renaming can
/// produce identical names, so collisions are expected rather than errors.
pub fn unique_path(dir: &Path, name: &str) -> PathBuf {
    let candidate = dir.join(name);
    if !candidate.exists() {
        return candidate;
    }

    let (stem, ext) = match name.rfind('.') {
        Some(0) | None => (name, ""),
        Some(pos) => (&name[..pos], &name[pos + 1..]),
    };

    for n in 1.. {
        let alt = if ext.is_empty() {
            dir.join(format!("{stem} ({n})"))
        } else {
            dir.join(format!("{stem} ({n}).{ext}"))
        };
        if !alt.exists() {
            return alt;
        }
    }
    unreachable!()
}
