//! Resize logic mapping the target-width setting onto a surface.

use image::imageops::{self, FilterType};
use image::RgbaImage;

/// Downscales `surface` so its width becomes `target_width`, preserving
/// aspect ratio.
///
/// Returns the surface unchanged when no target is set or the target is at
/// or above the current width: resizing never upscales.
pub fn apply_resize(surface: RgbaImage, target_width: Option<u32>) -> RgbaImage {
    let Some(target) = target_width else {
        return surface;
    };

    let (width, height) = surface.dimensions();
    if target == 0 || target >= width {
        return surface;
    }

    let ratio = target as f64 / width as f64;
    let new_height = ((height as f64 * ratio).round() as u32).max(1);
    imageops::resize(&surface, target, new_height, FilterType::Lanczos3)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn surface(w: u32, h: u32) -> RgbaImage {
        RgbaImage::from_pixel(w, h, Rgba([10, 20, 30, 255]))
    }

    #[test]
    fn downscales_preserving_aspect_ratio() {
        let out = apply_resize(surface(1000, 500), Some(500));
        assert_eq!(out.dimensions(), (500, 250));
    }

    #[test]
    fn never_upscales() {
        let out = apply_resize(surface(100, 50), Some(100));
        assert_eq!(out.dimensions(), (100, 50));

        let out = apply_resize(surface(100, 50), Some(4000));
        assert_eq!(out.dimensions(), (100, 50));
    }

    #[test]
    fn no_target_is_a_no_op() {
        let out = apply_resize(surface(33, 17), None);
        assert_eq!(out.dimensions(), (33, 17));
    }

    #[test]
    fn odd_ratios_round_to_nearest_pixel() {
        let out = apply_resize(surface(3, 3), Some(2));
        assert_eq!(out.dimensions(), (2, 2));
    }
}
