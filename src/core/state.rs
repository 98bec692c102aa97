//! Session state shared across commands.
//!
//! All mutable session state (upload lists, current editing target,
//! results) lives in one explicit session object instead of module-level
//! globals, so operations are testable without the app shell.

use std::sync::{Arc, Mutex, MutexGuard};

use tracing::debug;

use crate::core::assets::AssetStore;
use crate::editor::{EditSession, EditorInfo, Viewport};
use crate::results::ResultCollector;
use crate::utils::{ConvertError, ConvertResult};

/// Everything one conversion session owns.
#[derive(Debug, Default)]
pub struct ConvertSession {
    pub assets: AssetStore,
    pub results: ResultCollector,
    editor: Option<EditSession>,
}

impl ConvertSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens the modal editor for `asset_id`.
    ///
    /// At most one session may be open at a time; a second open is an
    /// explicit error rather than silently replacing the first.
    pub fn open_editor(&mut self, asset_id: u64, viewport: Viewport) -> ConvertResult<EditorInfo> {
        if self.editor.is_some() {
            return Err(ConvertError::editor("An edit session is already open"));
        }
        let asset = self
            .assets
            .image(asset_id)
            .ok_or_else(|| ConvertError::editor(format!("No image with id {asset_id}")))?;
        let session = EditSession::open(asset, viewport)?;
        let info = session.info();
        self.editor = Some(session);
        Ok(info)
    }

    /// The open editor session, or an explicit error when none exists.
    pub fn editor_mut(&mut self) -> ConvertResult<&mut EditSession> {
        self.editor
            .as_mut()
            .ok_or_else(|| ConvertError::editor("No edit session is open"))
    }

    /// Commits the working surface to the asset's edited raster and closes
    /// the session.
    pub fn save_editor(&mut self) -> ConvertResult<()> {
        let session = self
            .editor
            .take()
            .ok_or_else(|| ConvertError::editor("No edit session is open"))?;
        let asset_id = session.asset_id();
        let surface = session.into_surface();

        let asset = self
            .assets
            .image_mut(asset_id)
            .ok_or_else(|| ConvertError::editor(format!("No image with id {asset_id}")))?;
        debug!(
            "Committed edited surface for '{}' ({}x{})",
            asset.file_name,
            surface.width(),
            surface.height()
        );
        asset.edited = Some(Arc::new(surface));
        Ok(())
    }

    /// Discards the open session without committing anything.
    pub fn close_editor(&mut self) {
        self.editor = None;
    }
}

/// Application state managed by Tauri.
///
/// A thin mutex around the session object; commands take the lock briefly
/// and never hold it across encode work.
#[derive(Clone, Default)]
pub struct AppState {
    session: Arc<Mutex<ConvertSession>>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lock(&self) -> MutexGuard<'_, ConvertSession> {
        self.session.lock().expect("session mutex poisoned")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::assets::write_test_png;

    fn session_with_image() -> (ConvertSession, u64, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let path = write_test_png(dir.path(), "img.png", 8, 8);
        let mut session = ConvertSession::new();
        let id = session.assets.add_images(&[path]).added[0].id;
        (session, id, dir)
    }

    #[test]
    fn only_one_editor_session_at_a_time() {
        let (mut session, id, _dir) = session_with_image();
        let viewport = Viewport { width: 100.0, height: 100.0 };

        session.open_editor(id, viewport).unwrap();
        assert!(session.open_editor(id, viewport).is_err());

        session.close_editor();
        assert!(session.open_editor(id, viewport).is_ok());
    }

    #[test]
    fn save_commits_the_surface_and_closes() {
        let (mut session, id, _dir) = session_with_image();
        session
            .open_editor(id, Viewport { width: 100.0, height: 100.0 })
            .unwrap();
        session.save_editor().unwrap();

        assert!(session.assets.image(id).unwrap().edited.is_some());
        assert!(session.editor_mut().is_err());
    }

    #[test]
    fn editor_operations_require_an_open_session() {
        let (mut session, _id, _dir) = session_with_image();
        assert!(session.editor_mut().is_err());
        assert!(session.save_editor().is_err());
    }

    #[test]
    fn open_editor_rejects_unknown_assets() {
        let (mut session, _id, _dir) = session_with_image();
        assert!(session
            .open_editor(999, Viewport { width: 100.0, height: 100.0 })
            .is_err());
    }
}
