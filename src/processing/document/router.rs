//! Dispatch of (source kind, target format) pairs onto conversion routes.

use image::RgbaImage;
use tracing::debug;

use crate::core::DocumentKind;
use crate::processing::document::{docx, layout, pdf, raster, rtf};
use crate::utils::{ConvertError, ConvertResult, DocumentTarget};

/// The six supported transcoding routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentRoute {
    RtfToPdf,
    DocxToPdf,
    TxtToPdf,
    RtfToTxt,
    DocxToTxt,
    TxtToDocx,
}

/// Resolves a (source, target) pair to a route.
///
/// Every pairing outside the six routes is an explicit error, never a
/// silent skip.
pub fn resolve_route(kind: DocumentKind, target: DocumentTarget) -> ConvertResult<DocumentRoute> {
    match (kind, target) {
        (DocumentKind::Rtf, DocumentTarget::Pdf) => Ok(DocumentRoute::RtfToPdf),
        (DocumentKind::Docx, DocumentTarget::Pdf) => Ok(DocumentRoute::DocxToPdf),
        (DocumentKind::Txt, DocumentTarget::Pdf) => Ok(DocumentRoute::TxtToPdf),
        (DocumentKind::Rtf, DocumentTarget::Txt) => Ok(DocumentRoute::RtfToTxt),
        (DocumentKind::Docx, DocumentTarget::Txt) => Ok(DocumentRoute::DocxToTxt),
        (DocumentKind::Txt, DocumentTarget::Docx) => Ok(DocumentRoute::TxtToDocx),
        (kind, target) => Err(ConvertError::unsupported_conversion(
            kind.as_str(),
            target.extension(),
        )),
    }
}

/// Targets offered in the format tabs for a given source kind.
pub fn supported_targets(kind: DocumentKind) -> Vec<DocumentTarget> {
    match kind {
        DocumentKind::Rtf | DocumentKind::Docx => {
            vec![DocumentTarget::Pdf, DocumentTarget::Txt]
        }
        DocumentKind::Txt => vec![DocumentTarget::Pdf, DocumentTarget::Docx],
    }
}

/// Converts one document's bytes to the target format.
pub fn convert_document(
    bytes: &[u8],
    kind: DocumentKind,
    target: DocumentTarget,
) -> ConvertResult<Vec<u8>> {
    let route = resolve_route(kind, target)?;
    debug!("Converting {} -> {} ({route:?})", kind.as_str(), target.extension());

    match route {
        DocumentRoute::RtfToPdf => render_pdf(rtf::extract_lines(bytes)?),
        DocumentRoute::DocxToPdf => render_pdf(docx::extract_lines(bytes)?),
        DocumentRoute::TxtToPdf => render_pdf(text_lines(bytes)),
        DocumentRoute::RtfToTxt => Ok(rtf::extract_text(bytes)?.into_bytes()),
        DocumentRoute::DocxToTxt => Ok(docx::extract_text(bytes)?.into_bytes()),
        DocumentRoute::TxtToDocx => docx::build_from_lines(&text_lines(bytes)),
    }
}

/// Newline-delimited lines of a plain-text file, trailing empty line kept
/// (a paragraph per line includes the one after a final newline).
fn text_lines(bytes: &[u8]) -> Vec<String> {
    let text = String::from_utf8_lossy(bytes);
    let text = text.strip_prefix('\u{feff}').unwrap_or(&text);
    text.split('\n')
        .map(|l| l.trim_end_matches('\r').to_string())
        .collect()
}

/// Shared tail of the three PDF routes: wrap, paginate, rasterize, embed.
fn render_pdf(lines: Vec<String>) -> ConvertResult<Vec<u8>> {
    let geometry = layout::PageGeometry::a4();
    let rasterizer = raster::PageRasterizer::new(geometry)?;

    let wrapped = layout::wrap_lines(&lines, geometry.content_width(), |s| rasterizer.measure(s));
    let pages = layout::paginate(wrapped, geometry.lines_per_page());
    let bitmaps: Vec<RgbaImage> = pages.iter().map(|p| rasterizer.render_page(p)).collect();

    pdf::assemble_pdf(&bitmaps)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_six_routes_resolve() {
        assert!(resolve_route(DocumentKind::Rtf, DocumentTarget::Pdf).is_ok());
        assert!(resolve_route(DocumentKind::Docx, DocumentTarget::Pdf).is_ok());
        assert!(resolve_route(DocumentKind::Txt, DocumentTarget::Pdf).is_ok());
        assert!(resolve_route(DocumentKind::Rtf, DocumentTarget::Txt).is_ok());
        assert!(resolve_route(DocumentKind::Docx, DocumentTarget::Txt).is_ok());
        assert!(resolve_route(DocumentKind::Txt, DocumentTarget::Docx).is_ok());
    }

    #[test]
    fn unsupported_pairings_are_explicit_errors() {
        let err = resolve_route(DocumentKind::Txt, DocumentTarget::Txt).unwrap_err();
        assert!(matches!(err, ConvertError::UnsupportedConversion { .. }));

        let err = resolve_route(DocumentKind::Docx, DocumentTarget::Docx).unwrap_err();
        assert!(matches!(err, ConvertError::UnsupportedConversion { .. }));

        let err = resolve_route(DocumentKind::Rtf, DocumentTarget::Docx).unwrap_err();
        assert!(matches!(err, ConvertError::UnsupportedConversion { .. }));
    }

    #[test]
    fn target_tabs_follow_the_source_kind() {
        assert_eq!(
            supported_targets(DocumentKind::Txt),
            vec![DocumentTarget::Pdf, DocumentTarget::Docx]
        );
        assert_eq!(
            supported_targets(DocumentKind::Rtf),
            vec![DocumentTarget::Pdf, DocumentTarget::Txt]
        );
    }

    #[test]
    fn text_lines_keep_empty_and_trailing_lines() {
        assert_eq!(text_lines(b"a\n\nb\n"), vec!["a", "", "b", ""]);
        assert_eq!(text_lines(b"one\r\ntwo"), vec!["one", "two"]);
    }

    #[test]
    fn txt_to_docx_route_produces_a_zip_container() {
        let bytes = convert_document(b"hello\nworld", DocumentKind::Txt, DocumentTarget::Docx)
            .unwrap();
        assert_eq!(&bytes[..2], b"PK");
    }

    #[test]
    fn docx_to_txt_round_trips_text() {
        let docx_bytes =
            docx::build_from_lines(&["alpha".to_string(), "beta".to_string()]).unwrap();
        let txt = convert_document(&docx_bytes, DocumentKind::Docx, DocumentTarget::Txt).unwrap();
        assert_eq!(String::from_utf8(txt).unwrap(), "alpha\nbeta");
    }

    #[test]
    fn txt_to_pdf_route_renders_when_a_font_exists() {
        if !raster::font_available() {
            return;
        }
        let bytes = convert_document(b"hello pdf", DocumentKind::Txt, DocumentTarget::Pdf).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }
}
