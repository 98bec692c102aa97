//! Raster encoding boundary.
//!
//! Mirrors the platform canvas encode call: a drawable surface, a target
//! format and a quality in [0,1] go in, encoded bytes come out. JPEG and
//! PNG go through the `image` crate encoders; WebP uses the `webp` crate
//! because the `image` WebP encoder is lossless-only.

use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{DynamicImage, ExtendedColorType, ImageEncoder, RgbaImage};

use crate::utils::{ConvertError, ConvertResult, ImageFormat};

/// Encodes `surface` to `format` at `quality` (clamped to [0,1]).
///
/// Quality is ignored for PNG, matching the canvas encode facility.
pub fn encode_surface(
    surface: &RgbaImage,
    format: ImageFormat,
    quality: f32,
) -> ConvertResult<Vec<u8>> {
    let quality = quality.clamp(0.0, 1.0);
    match format {
        ImageFormat::Jpeg => encode_jpeg(surface, quality),
        ImageFormat::Png => encode_png(surface),
        ImageFormat::WebP => encode_webp(surface, quality),
    }
}

/// Maps unit-interval quality onto the 1-100 range encoders expect.
fn quality_percent(quality: f32) -> u8 {
    (quality * 100.0).round().clamp(1.0, 100.0) as u8
}

fn encode_jpeg(surface: &RgbaImage, quality: f32) -> ConvertResult<Vec<u8>> {
    // JPEG carries no alpha; transparent pixels composite to black like the
    // canvas does
    let rgb = DynamicImage::ImageRgba8(surface.clone()).to_rgb8();
    let mut buf = Cursor::new(Vec::new());
    let encoder = JpegEncoder::new_with_quality(&mut buf, quality_percent(quality));
    encoder
        .write_image(
            rgb.as_raw(),
            rgb.width(),
            rgb.height(),
            ExtendedColorType::Rgb8,
        )
        .map_err(|e| ConvertError::processing(format!("JPEG encode failed: {e}")))?;
    Ok(buf.into_inner())
}

fn encode_png(surface: &RgbaImage) -> ConvertResult<Vec<u8>> {
    let mut buf = Cursor::new(Vec::new());
    let encoder = PngEncoder::new(&mut buf);
    encoder
        .write_image(
            surface.as_raw(),
            surface.width(),
            surface.height(),
            ExtendedColorType::Rgba8,
        )
        .map_err(|e| ConvertError::processing(format!("PNG encode failed: {e}")))?;
    Ok(buf.into_inner())
}

fn encode_webp(surface: &RgbaImage, quality: f32) -> ConvertResult<Vec<u8>> {
    let encoder = webp::Encoder::from_rgba(surface.as_raw(), surface.width(), surface.height());
    let memory = encoder.encode(quality_percent(quality) as f32);
    Ok(memory.to_vec())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn surface() -> RgbaImage {
        RgbaImage::from_pixel(16, 8, Rgba([200, 40, 90, 255]))
    }

    #[test]
    fn jpeg_output_decodes_to_input_dimensions() {
        let bytes = encode_surface(&surface(), ImageFormat::Jpeg, 0.8).unwrap();
        assert_eq!(&bytes[..2], &[0xFF, 0xD8]);
        let decoded = image::load_from_memory(&bytes).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (16, 8));
    }

    #[test]
    fn png_round_trips_pixels_exactly() {
        let src = surface();
        let bytes = encode_surface(&src, ImageFormat::Png, 0.8).unwrap();
        assert_eq!(&bytes[1..4], b"PNG");
        let decoded = image::load_from_memory(&bytes).unwrap().to_rgba8();
        assert_eq!(decoded.as_raw(), src.as_raw());
    }

    #[test]
    fn webp_output_carries_riff_container() {
        let bytes = encode_surface(&surface(), ImageFormat::WebP, 0.8).unwrap();
        assert_eq!(&bytes[..4], b"RIFF");
        assert_eq!(&bytes[8..12], b"WEBP");
    }

    #[test]
    fn lower_jpeg_quality_does_not_grow_output() {
        // Use a noisy surface so quality actually matters
        let mut src = RgbaImage::new(64, 64);
        for (x, y, px) in src.enumerate_pixels_mut() {
            *px = Rgba([(x * 7 % 256) as u8, (y * 13 % 256) as u8, ((x + y) % 256) as u8, 255]);
        }
        let high = encode_surface(&src, ImageFormat::Jpeg, 1.0).unwrap();
        let low = encode_surface(&src, ImageFormat::Jpeg, 0.2).unwrap();
        assert!(low.len() <= high.len());
    }

    #[test]
    fn out_of_range_quality_is_clamped() {
        assert!(encode_surface(&surface(), ImageFormat::Jpeg, 7.5).is_ok());
        assert!(encode_surface(&surface(), ImageFormat::WebP, -1.0).is_ok());
    }
}
