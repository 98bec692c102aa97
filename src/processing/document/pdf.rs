//! PDF assembly: page bitmaps in, PDF binary out.
//!
//! Each bitmap is embedded as a DCTDecode (JPEG) image XObject drawn across
//! the full width of an A4 page. Rendered pages go in as images; no text
//! layer is produced.

use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ExtendedColorType, ImageEncoder, RgbaImage};
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};

use crate::utils::{ConvertError, ConvertResult};

/// A4 in PDF points.
pub const PAGE_WIDTH_PT: f32 = 595.28;
pub const PAGE_HEIGHT_PT: f32 = 841.89;

/// Embed quality for page images.
const EMBED_JPEG_QUALITY: u8 = 95;

/// Assembles one PDF with one page per bitmap.
pub fn assemble_pdf(pages: &[RgbaImage]) -> ConvertResult<Vec<u8>> {
    if pages.is_empty() {
        return Err(ConvertError::processing("No pages to assemble"));
    }

    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let mut kids: Vec<Object> = Vec::with_capacity(pages.len());

    for bitmap in pages {
        let (image_stream, width, height) = jpeg_image_stream(bitmap)?;
        let image_id = doc.add_object(image_stream);

        // Draw across the full page width, top-aligned
        let scale = PAGE_WIDTH_PT / width as f32;
        let draw_height = height as f32 * scale;
        let y_offset = PAGE_HEIGHT_PT - draw_height;

        let content = Content {
            operations: vec![
                Operation::new("q", vec![]),
                Operation::new(
                    "cm",
                    vec![
                        PAGE_WIDTH_PT.into(),
                        0f32.into(),
                        0f32.into(),
                        draw_height.into(),
                        0f32.into(),
                        y_offset.into(),
                    ],
                ),
                Operation::new("Do", vec![Object::Name(b"Im0".to_vec())]),
                Operation::new("Q", vec![]),
            ],
        };
        let encoded = content
            .encode()
            .map_err(|e| ConvertError::processing(format!("PDF content encode failed: {e}")))?;
        let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));

        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![0.into(), 0.into(), PAGE_WIDTH_PT.into(), PAGE_HEIGHT_PT.into()],
            "Contents" => content_id,
            "Resources" => dictionary! {
                "XObject" => dictionary! { "Im0" => image_id },
            },
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
        }),
    );

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut buf = Cursor::new(Vec::new());
    doc.save_to(&mut buf)
        .map_err(|e| ConvertError::processing(format!("PDF write failed: {e}")))?;
    Ok(buf.into_inner())
}

/// Encodes a bitmap as a JPEG image XObject stream.
fn jpeg_image_stream(bitmap: &RgbaImage) -> ConvertResult<(Stream, u32, u32)> {
    let rgb = DynamicImage::ImageRgba8(bitmap.clone()).to_rgb8();
    let (width, height) = rgb.dimensions();

    let mut jpeg = Cursor::new(Vec::new());
    JpegEncoder::new_with_quality(&mut jpeg, EMBED_JPEG_QUALITY)
        .write_image(rgb.as_raw(), width, height, ExtendedColorType::Rgb8)
        .map_err(|e| ConvertError::processing(format!("Page JPEG encode failed: {e}")))?;
    let bytes = jpeg.into_inner();

    let dict = dictionary! {
        "Type" => "XObject",
        "Subtype" => "Image",
        "Width" => width as i64,
        "Height" => height as i64,
        "ColorSpace" => "DeviceRGB",
        "BitsPerComponent" => 8,
        "Filter" => "DCTDecode",
    };

    Ok((Stream::new(dict, bytes), width, height))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn page(width: u32, height: u32) -> RgbaImage {
        RgbaImage::from_pixel(width, height, Rgba([240, 240, 240, 255]))
    }

    #[test]
    fn produces_a_loadable_pdf_with_one_page_per_bitmap() {
        let bytes = assemble_pdf(&[page(100, 140), page(100, 140), page(100, 140)]).unwrap();
        assert!(bytes.starts_with(b"%PDF-1.5"));

        let doc = Document::load_mem(&bytes).unwrap();
        assert_eq!(doc.get_pages().len(), 3);
    }

    #[test]
    fn zero_pages_is_an_error() {
        assert!(assemble_pdf(&[]).is_err());
    }
}
