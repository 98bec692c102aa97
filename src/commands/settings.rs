//! Theme preference, persisted through the settings store.
//!
//! The single piece of durable state: read at startup, written on toggle.

use serde::{Deserialize, Serialize};
use tauri_plugin_store::StoreExt;
use tracing::debug;

use crate::utils::{ConvertError, ConvertResult};

const SETTINGS_STORE: &str = "settings.json";
const THEME_KEY: &str = "theme";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
}

#[tauri::command]
pub fn get_theme(app: tauri::AppHandle) -> ConvertResult<Theme> {
    let store = app
        .store(SETTINGS_STORE)
        .map_err(|e| ConvertError::IO(format!("Cannot open settings store: {e}")))?;

    Ok(store
        .get(THEME_KEY)
        .and_then(|v| serde_json::from_value(v).ok())
        .unwrap_or(Theme::Light))
}

#[tauri::command]
pub fn set_theme(app: tauri::AppHandle, theme: Theme) -> ConvertResult<()> {
    let store = app
        .store(SETTINGS_STORE)
        .map_err(|e| ConvertError::IO(format!("Cannot open settings store: {e}")))?;

    store.set(THEME_KEY, serde_json::json!(theme));
    store
        .save()
        .map_err(|e| ConvertError::IO(format!("Cannot persist settings: {e}")))?;
    debug!("Theme set to {theme:?}");
    Ok(())
}
