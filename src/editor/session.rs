//! Modal editing session over a single image asset.
//!
//! One session exists at a time. The base snapshot captured at open is the
//! reversion target for "clear"; the working surface stays at the asset's
//! natural resolution regardless of on-screen zoom, so stroke precision is
//! decoupled from display scale.

use std::sync::Arc;

use image::{imageops, RgbaImage};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::ImageAsset;
use crate::editor::draw::{self, StrokePoint};
use crate::utils::{ConvertError, ConvertResult};

pub const ZOOM_MIN: f64 = 0.25;
pub const ZOOM_MAX: f64 = 5.0;
pub const ZOOM_STEP: f64 = 0.25;

/// Editing mode shown in the modal tabs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EditMode {
    Crop,
    Draw,
}

/// Available on-screen editing area, measured by the frontend once per open.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

/// Crop rectangle reported by the crop widget, in natural-resolution pixels.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct CropRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Session descriptor returned to the frontend.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EditorInfo {
    pub asset_id: u64,
    pub width: u32,
    pub height: u32,
    pub fit_scale: f64,
    pub zoom: f64,
    pub mode: EditMode,
}

/// A single crop/draw session against one image asset.
#[derive(Debug)]
pub struct EditSession {
    asset_id: u64,
    /// Pristine snapshot captured at open; what "clear" reverts to
    base: Arc<RgbaImage>,
    /// Paint surface at full natural resolution
    working: RgbaImage,
    /// min(1, avail_w/natural_w, avail_h/natural_h), computed once per
    /// session so zoom stays stable and reversible
    fit_scale: f64,
    zoom: f64,
    mode: EditMode,
}

impl EditSession {
    /// Opens a session against `asset`, snapshotting its current surface
    /// (edited raster when present, else the decoded source file).
    pub fn open(asset: &ImageAsset, viewport: Viewport) -> ConvertResult<Self> {
        if viewport.width <= 0.0 || viewport.height <= 0.0 {
            return Err(ConvertError::editor("Viewport must have positive dimensions"));
        }

        let base = asset.load_surface()?;
        let (w, h) = base.dimensions();
        let fit_scale = (viewport.width / w as f64)
            .min(viewport.height / h as f64)
            .min(1.0);

        debug!(
            "Editor opened for '{}': {w}x{h}, fit scale {:.3}",
            asset.file_name, fit_scale
        );

        let working = (*base).clone();
        Ok(Self {
            asset_id: asset.id,
            base,
            working,
            fit_scale,
            zoom: 1.0,
            mode: EditMode::Crop,
        })
    }

    pub fn asset_id(&self) -> u64 {
        self.asset_id
    }

    pub fn fit_scale(&self) -> f64 {
        self.fit_scale
    }

    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    pub fn mode(&self) -> EditMode {
        self.mode
    }

    pub fn natural_dimensions(&self) -> (u32, u32) {
        self.working.dimensions()
    }

    pub fn set_mode(&mut self, mode: EditMode) {
        self.mode = mode;
    }

    /// Steps the zoom by `delta` and clamps to [0.25, 5.0]. Display-only:
    /// the working surface resolution never changes.
    pub fn adjust_zoom(&mut self, delta: f64) -> f64 {
        self.zoom = (self.zoom + delta).clamp(ZOOM_MIN, ZOOM_MAX);
        self.zoom
    }

    /// Brush width in surface pixels for a requested on-screen width.
    ///
    /// Dividing by fit scale x zoom keeps perceived thickness constant
    /// across zoom levels.
    pub fn effective_brush_width(&self, brush_size: f64) -> f64 {
        let display_scale = self.fit_scale * self.zoom;
        if display_scale > 0.0 {
            brush_size / display_scale
        } else {
            brush_size
        }
    }

    /// Paints one freehand stroke onto the working surface.
    pub fn apply_stroke(
        &mut self,
        points: &[StrokePoint],
        color: &str,
        brush_size: f64,
    ) -> ConvertResult<()> {
        let color = draw::parse_color(color)?;
        let width = self.effective_brush_width(brush_size);
        draw::paint_stroke(&mut self.working, points, color, width);
        Ok(())
    }

    /// Crops the working surface to the rectangle reported by the crop
    /// widget. The rectangle is clamped to the surface bounds.
    pub fn apply_crop(&mut self, rect: CropRect) -> ConvertResult<()> {
        let (w, h) = self.working.dimensions();
        let x = rect.x.max(0.0).round() as u32;
        let y = rect.y.max(0.0).round() as u32;
        if x >= w || y >= h {
            return Err(ConvertError::editor("Crop rectangle outside the image"));
        }
        let cw = (rect.width.round() as u32).min(w - x);
        let ch = (rect.height.round() as u32).min(h - y);
        if cw == 0 || ch == 0 {
            return Err(ConvertError::editor("Crop rectangle is empty"));
        }

        self.working = imageops::crop_imm(&self.working, x, y, cw, ch).to_image();
        Ok(())
    }

    /// Discards in-progress strokes by reinitializing the working surface
    /// from the base snapshot. Prior committed edits are part of the base
    /// and therefore survive.
    pub fn clear(&mut self) {
        self.working = (*self.base).clone();
        self.zoom = 1.0;
    }

    /// Read access to the working surface, for previews.
    pub fn working_surface(&self) -> &RgbaImage {
        &self.working
    }

    /// Consumes the session, yielding the surface to commit to the asset.
    pub fn into_surface(self) -> RgbaImage {
        self.working
    }

    pub fn info(&self) -> EditorInfo {
        let (width, height) = self.natural_dimensions();
        EditorInfo {
            asset_id: self.asset_id,
            width,
            height,
            fit_scale: self.fit_scale,
            zoom: self.zoom,
            mode: self.mode,
        }
    }
}
