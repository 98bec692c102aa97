//! Freehand brush painting on the session's working surface.
//!
//! Strokes arrive from the frontend as polylines in natural-resolution
//! coordinates; painting stamps round brush tips along each segment so the
//! result matches a round-capped canvas stroke.

use image::{Rgba, RgbaImage};
use imageproc::drawing::draw_filled_circle_mut;
use serde::Deserialize;

use crate::utils::{ConvertError, ConvertResult};

/// One point of a stroke polyline, in natural-resolution pixels.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct StrokePoint {
    pub x: f64,
    pub y: f64,
}

/// Parses a `#rrggbb` color from the frontend color picker.
pub fn parse_color(hex: &str) -> ConvertResult<Rgba<u8>> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(ConvertError::editor(format!("Invalid brush color: {hex}")));
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&digits[range], 16).unwrap();
    Ok(Rgba([channel(0..2), channel(2..4), channel(4..6), 255]))
}

/// Paints a round-capped polyline of the given width onto `surface`.
///
/// A single point paints one brush tip. Width is the already-adjusted
/// effective width (the caller divides by fit scale x zoom).
pub fn paint_stroke(
    surface: &mut RgbaImage,
    points: &[StrokePoint],
    color: Rgba<u8>,
    width: f64,
) {
    if points.is_empty() {
        return;
    }

    let radius = ((width / 2.0).max(0.5)).round().max(1.0) as i32;

    let mut stamp = |p: &StrokePoint| {
        draw_filled_circle_mut(
            surface,
            (p.x.round() as i32, p.y.round() as i32),
            radius,
            color,
        );
    };

    stamp(&points[0]);
    for pair in points.windows(2) {
        let (a, b) = (&pair[0], &pair[1]);
        let dist = ((b.x - a.x).powi(2) + (b.y - a.y).powi(2)).sqrt();
        // Stamp spacing of half the radius keeps the segment solid
        let steps = (dist / (radius as f64 / 2.0).max(0.5)).ceil() as u32;
        for step in 1..=steps.max(1) {
            let t = step as f64 / steps.max(1) as f64;
            stamp(&StrokePoint {
                x: a.x + (b.x - a.x) * t,
                y: a.y + (b.y - a.y) * t,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hex_colors() {
        assert_eq!(parse_color("#000000").unwrap(), Rgba([0, 0, 0, 255]));
        assert_eq!(parse_color("#ff8001").unwrap(), Rgba([255, 128, 1, 255]));
        assert_eq!(parse_color("3366CC").unwrap(), Rgba([0x33, 0x66, 0xCC, 255]));
        assert!(parse_color("#fff").is_err());
        assert!(parse_color("#gggggg").is_err());
    }

    #[test]
    fn stroke_paints_along_the_whole_segment() {
        let mut surface = RgbaImage::from_pixel(40, 20, Rgba([255, 255, 255, 255]));
        let points = [
            StrokePoint { x: 5.0, y: 10.0 },
            StrokePoint { x: 35.0, y: 10.0 },
        ];
        paint_stroke(&mut surface, &points, Rgba([0, 0, 0, 255]), 4.0);

        // Start, middle and end of the segment are all covered
        for x in [5u32, 20, 35] {
            assert_eq!(surface.get_pixel(x, 10).0, [0, 0, 0, 255], "x={x}");
        }
        // Far corner stays untouched
        assert_eq!(surface.get_pixel(0, 0).0, [255, 255, 255, 255]);
    }

    #[test]
    fn single_point_paints_one_tip() {
        let mut surface = RgbaImage::from_pixel(10, 10, Rgba([255, 255, 255, 255]));
        paint_stroke(
            &mut surface,
            &[StrokePoint { x: 5.0, y: 5.0 }],
            Rgba([10, 20, 30, 255]),
            2.0,
        );
        assert_eq!(surface.get_pixel(5, 5).0, [10, 20, 30, 255]);
    }
}
