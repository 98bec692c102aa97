//! Commands backing the crop/draw modal.
//!
//! The webview owns the interactive widgets (crop box, pointer tracking);
//! these commands own the session surfaces and every coordinate-space rule.

use tauri::State;

use crate::core::AppState;
use crate::editor::{CropRect, EditMode, EditorInfo, StrokePoint, Viewport};
use crate::processing::image::{apply_resize, encode_surface};
use crate::utils::{ConvertResult, ImageFormat};

/// Opens the editor for one image asset. Errors when a session is already
/// open or the asset does not exist.
#[tauri::command]
pub fn open_editor(
    state: State<'_, AppState>,
    asset_id: u64,
    viewport: Viewport,
) -> ConvertResult<EditorInfo> {
    state.lock().open_editor(asset_id, viewport)
}

/// Switches between crop and draw mode.
#[tauri::command]
pub fn set_editor_mode(state: State<'_, AppState>, mode: EditMode) -> ConvertResult<EditorInfo> {
    let mut session = state.lock();
    let editor = session.editor_mut()?;
    editor.set_mode(mode);
    Ok(editor.info())
}

/// Steps the zoom and returns the clamped value.
#[tauri::command]
pub fn adjust_editor_zoom(state: State<'_, AppState>, delta: f64) -> ConvertResult<f64> {
    Ok(state.lock().editor_mut()?.adjust_zoom(delta))
}

/// Paints one freehand stroke onto the working surface.
#[tauri::command]
pub fn apply_editor_stroke(
    state: State<'_, AppState>,
    points: Vec<StrokePoint>,
    color: String,
    brush_size: f64,
) -> ConvertResult<()> {
    state
        .lock()
        .editor_mut()?
        .apply_stroke(&points, &color, brush_size)
}

/// Applies the crop rectangle reported by the crop widget.
#[tauri::command]
pub fn save_editor_crop(state: State<'_, AppState>, rect: CropRect) -> ConvertResult<EditorInfo> {
    let mut session = state.lock();
    let editor = session.editor_mut()?;
    editor.apply_crop(rect)?;
    Ok(editor.info())
}

/// Reverts the working surface to the session-open snapshot.
#[tauri::command]
pub fn clear_editor(state: State<'_, AppState>) -> ConvertResult<EditorInfo> {
    let mut session = state.lock();
    let editor = session.editor_mut()?;
    editor.clear();
    Ok(editor.info())
}

/// Commits the working surface to the asset and closes the session.
#[tauri::command]
pub fn save_editor(state: State<'_, AppState>) -> ConvertResult<()> {
    state.lock().save_editor()
}

/// Discards the session without committing.
#[tauri::command]
pub fn close_editor(state: State<'_, AppState>) {
    state.lock().close_editor();
}

/// PNG-encoded snapshot of the working surface, downscaled for display.
#[tauri::command]
pub fn editor_preview(
    state: State<'_, AppState>,
    max_width: Option<u32>,
) -> ConvertResult<Vec<u8>> {
    let mut session = state.lock();
    let editor = session.editor_mut()?;
    let surface = editor.working_surface().clone();
    let scaled = apply_resize(surface, max_width);
    encode_surface(&scaled, ImageFormat::Png, 1.0)
}
