//! Tauri command handlers for the frontend.
//!
//! This module exposes the commands invoked from the webview:
//! - assets: [`add_images`], [`add_documents`], [`list_assets`], [`asset_preview`]
//! - conversion: [`convert_images`], [`convert_documents`], [`supported_targets`]
//! - editor: [`open_editor`] and the per-session operations
//! - results: [`list_results`], [`build_archive`], [`clear_results`]
//! - settings: [`get_theme`], [`set_theme`]

mod assets;
mod document;
mod editor;
mod image;
mod results;
mod settings;

pub use self::assets::*;
pub use self::document::*;
pub use self::editor::*;
pub use self::image::*;
pub use self::results::*;
pub use self::settings::*;
