//! Text page rasterization.
//!
//! Text lines plus page geometry in, one bitmap per page out. Glyphs come
//! from a system font discovered at startup; there is no bundled font.

use std::path::PathBuf;

use ab_glyph::{Font, FontVec, PxScale, ScaleFont};
use image::{Rgba, RgbaImage};
use imageproc::drawing::draw_text_mut;
use lazy_static::lazy_static;
use tracing::debug;

use crate::processing::document::layout::PageGeometry;
use crate::utils::{ConvertError, ConvertResult};

/// Environment override for the page font, pointing at a .ttf/.otf file.
pub const FONT_ENV_VAR: &str = "QUICKCONVERT_FONT";

lazy_static! {
    /// Loaded once per process; pages of every conversion share it.
    static ref PAGE_FONT: Option<FontVec> = load_page_font();
}

/// Candidate font locations, checked in order. The env override wins.
fn font_candidates() -> Vec<PathBuf> {
    let mut candidates = Vec::new();
    if let Ok(path) = std::env::var(FONT_ENV_VAR) {
        candidates.push(PathBuf::from(path));
    }
    for path in [
        // Linux
        "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
        "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
        "/usr/share/fonts/truetype/freefont/FreeSans.ttf",
        "/usr/share/fonts/TTF/DejaVuSans.ttf",
        // macOS
        "/System/Library/Fonts/Supplemental/Arial.ttf",
        "/Library/Fonts/Arial.ttf",
        // Windows
        "C:\\Windows\\Fonts\\arial.ttf",
        "C:\\Windows\\Fonts\\segoeui.ttf",
    ] {
        candidates.push(PathBuf::from(path));
    }
    candidates
}

fn load_page_font() -> Option<FontVec> {
    for path in font_candidates() {
        if let Ok(bytes) = std::fs::read(&path) {
            if let Ok(font) = FontVec::try_from_vec(bytes) {
                debug!("Page font loaded from {}", path.display());
                return Some(font);
            }
        }
    }
    None
}

/// Whether a usable page font was found on this machine.
pub fn font_available() -> bool {
    PAGE_FONT.is_some()
}

/// Renders text lines onto fixed-geometry page bitmaps.
pub struct PageRasterizer {
    geometry: PageGeometry,
}

impl PageRasterizer {
    /// Errors when no system font could be loaded; document-to-PDF routes
    /// cannot run without one.
    pub fn new(geometry: PageGeometry) -> ConvertResult<Self> {
        if PAGE_FONT.is_none() {
            return Err(ConvertError::document(format!(
                "No usable system font found; set {FONT_ENV_VAR} to a TrueType font file"
            )));
        }
        Ok(Self { geometry })
    }

    fn font(&self) -> &'static FontVec {
        PAGE_FONT.as_ref().expect("checked in new()")
    }

    /// Pixel width of `text` at the page font size.
    pub fn measure(&self, text: &str) -> f32 {
        let font = self.font();
        let scaled = font.as_scaled(PxScale::from(self.geometry.font_size));
        text.chars()
            .map(|c| scaled.h_advance(font.glyph_id(c)))
            .sum()
    }

    /// Renders one page: white background, black text, fixed line height.
    pub fn render_page(&self, lines: &[String]) -> RgbaImage {
        let geo = &self.geometry;
        let mut page = RgbaImage::from_pixel(geo.width, geo.height, Rgba([255, 255, 255, 255]));

        let scale = PxScale::from(geo.font_size);
        let color = Rgba([0, 0, 0, 255]);
        for (row, line) in lines.iter().enumerate() {
            if line.is_empty() {
                continue;
            }
            let y = geo.margin as i32 + (row as f32 * geo.line_height) as i32;
            draw_text_mut(&mut page, color, geo.margin as i32, y, scale, self.font(), line);
        }
        page
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Rasterizer tests need a real font; they no-op on machines without one
    // rather than failing the suite.
    fn rasterizer() -> Option<PageRasterizer> {
        PageRasterizer::new(PageGeometry::a4()).ok()
    }

    #[test]
    fn new_reflects_font_availability() {
        assert_eq!(rasterizer().is_some(), font_available());
    }

    #[test]
    fn measure_grows_with_text_length() {
        let Some(r) = rasterizer() else { return };
        let short = r.measure("hi");
        let long = r.measure("hi there, longer line");
        assert!(long > short);
        assert_eq!(r.measure(""), 0.0);
    }

    #[test]
    fn rendered_page_has_geometry_dimensions_and_ink() {
        let Some(r) = rasterizer() else { return };
        let page = r.render_page(&["Some visible text".to_string()]);
        assert_eq!(page.dimensions(), (794, 1123));

        // At least one pixel darkened by a glyph
        let has_ink = page.pixels().any(|p| p.0[0] < 250);
        assert!(has_ink);
    }

    #[test]
    fn blank_page_stays_white() {
        let Some(r) = rasterizer() else { return };
        let page = r.render_page(&[]);
        assert!(page.pixels().all(|p| p.0 == [255, 255, 255, 255]));
    }
}
