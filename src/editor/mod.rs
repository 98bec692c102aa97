//! Crop/draw editing sessions over uploaded images.

pub mod draw;
mod session;

pub use draw::StrokePoint;
pub use session::{CropRect, EditMode, EditSession, EditorInfo, Viewport, ZOOM_MAX, ZOOM_MIN, ZOOM_STEP};
