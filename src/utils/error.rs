//! Error types for the converter.
//!
//! Provides a hierarchy of error types using `thiserror` for ergonomic error handling.

use std::io;
use std::path::PathBuf;
use thiserror::Error;
use serde::Serialize;

/// Validation errors for input assets and settings.
#[derive(Error, Debug, Serialize)]
pub enum ValidationError {
    /// Path-related validation error
    #[error("Path error: {0}")]
    Path(#[from] PathError),
    /// Invalid settings error
    #[error("Settings error: {0}")]
    Settings(String),
}

/// File path errors.
#[derive(Error, Debug, Serialize)]
pub enum PathError {
    /// File does not exist
    #[error("File not found: {0}")]
    NotFound(PathBuf),
    /// Path exists but is not a file
    #[error("Not a file: {0}")]
    NotFile(PathBuf),
    /// IO error accessing the path
    #[error("IO error: {0}")]
    IO(String),
}

/// Main error type for the converter application.
///
/// All errors in the application are converted to this type before being
/// returned to the frontend.
#[derive(Error, Debug, Serialize)]
pub enum ConvertError {
    /// Asset or settings validation failed
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Image or document processing failed
    #[error("Processing error: {0}")]
    Processing(String),

    /// File IO error
    #[error("IO error: {0}")]
    IO(String),

    /// Unsupported or invalid format
    #[error("Format error: {0}")]
    Format(String),

    /// Document parsing or building error from an external library
    #[error("Document error: {0}")]
    Document(String),

    /// No conversion route exists for this (source, target) pairing.
    /// Reported per item rather than silently skipped.
    #[error("No conversion route from {source_kind} to {target}")]
    UnsupportedConversion {
        source_kind: String,
        target: String,
    },

    /// Editor session misuse (double open, operation on a closed session)
    #[error("Editor error: {0}")]
    Editor(String),

    /// Bulk archive requested with fewer than two results
    #[error("Archive requires more than one result ({0} available)")]
    ArchiveUnavailable(usize),
}

/// Convenience result type for converter operations.
pub type ConvertResult<T> = Result<T, ConvertError>;

// Helper methods for error creation
impl ConvertError {
    pub fn processing<T: Into<String>>(msg: T) -> Self {
        Self::Processing(msg.into())
    }

    pub fn format<T: Into<String>>(msg: T) -> Self {
        Self::Format(msg.into())
    }

    pub fn document<T: Into<String>>(msg: T) -> Self {
        Self::Document(msg.into())
    }

    pub fn editor<T: Into<String>>(msg: T) -> Self {
        Self::Editor(msg.into())
    }

    pub fn unsupported_conversion(source_kind: impl Into<String>, target: impl Into<String>) -> Self {
        Self::UnsupportedConversion {
            source_kind: source_kind.into(),
            target: target.into(),
        }
    }
}

// Helper methods for validation error creation
impl ValidationError {
    pub fn path_not_found(path: impl Into<PathBuf>) -> Self {
        Self::Path(PathError::NotFound(path.into()))
    }

    pub fn not_a_file(path: impl Into<PathBuf>) -> Self {
        Self::Path(PathError::NotFile(path.into()))
    }

    pub fn settings(msg: impl Into<String>) -> Self {
        Self::Settings(msg.into())
    }
}

// Convert std::io::Error to ConvertError
impl From<io::Error> for ConvertError {
    fn from(err: io::Error) -> Self {
        Self::IO(err.to_string())
    }
}

// Convert io::Error to PathError
impl From<io::Error> for PathError {
    fn from(err: io::Error) -> Self {
        Self::IO(err.to_string())
    }
}

// Convert PathError to ConvertError
impl From<PathError> for ConvertError {
    fn from(err: PathError) -> Self {
        Self::Validation(ValidationError::Path(err))
    }
}
