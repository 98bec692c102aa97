//! Core application types and state management.
//!
//! This module contains the fundamental types used throughout the application:
//! - [`AppState`] / [`ConvertSession`]: session state shared across commands
//! - [`AssetStore`]: uploaded images and documents
//! - [`ImageConversionSettings`] / [`ConversionOutcome`]: pipeline inputs and outputs
//! - [`ProgressUpdate`]: progress payloads for batch operations

pub mod assets;
mod progress;
mod state;
mod types;

pub use assets::{AssetStore, DocumentAsset, DocumentKind, ImageAsset};
pub use progress::ProgressUpdate;
pub use state::{AppState, ConvertSession};
pub use types::{
    ConversionOutcome, DocumentAssetInfo, DocumentUploadReport, ImageAssetInfo,
    ImageConversionSettings, ImageUploadReport, RejectedFile,
};
