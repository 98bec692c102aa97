//! DOCX extraction and building via `docx-rs`.

use std::io::Cursor;

use docx_rs::{read_docx, Docx, DocumentChild, Paragraph, ParagraphChild, Run, RunChild};

use crate::utils::{ConvertError, ConvertResult};

/// Extracts one text line per paragraph from a DOCX binary.
pub fn extract_lines(bytes: &[u8]) -> ConvertResult<Vec<String>> {
    let docx = read_docx(bytes)
        .map_err(|e| ConvertError::document(format!("DOCX read failed: {e:?}")))?;

    let mut lines = Vec::new();
    for child in &docx.document.children {
        if let DocumentChild::Paragraph(p) = child {
            lines.push(paragraph_text(p));
        }
    }
    Ok(lines)
}

/// Raw text extraction: paragraphs joined by newlines.
pub fn extract_text(bytes: &[u8]) -> ConvertResult<String> {
    Ok(extract_lines(bytes)?.join("\n"))
}

/// Builds a DOCX binary with one paragraph per input line, empty lines
/// included.
pub fn build_from_lines(lines: &[String]) -> ConvertResult<Vec<u8>> {
    let mut docx = Docx::new();
    for line in lines {
        docx = docx.add_paragraph(Paragraph::new().add_run(Run::new().add_text(line.as_str())));
    }

    let mut buf = Cursor::new(Vec::new());
    docx.build()
        .pack(&mut buf)
        .map_err(|e| ConvertError::document(format!("DOCX build failed: {e:?}")))?;
    Ok(buf.into_inner())
}

fn paragraph_text(paragraph: &Paragraph) -> String {
    let mut text = String::new();
    for child in &paragraph.children {
        if let ParagraphChild::Run(run) = child {
            for run_child in &run.children {
                match run_child {
                    RunChild::Text(t) => text.push_str(&t.text),
                    RunChild::Tab(_) => text.push('\t'),
                    RunChild::Break(_) => text.push('\n'),
                    _ => {}
                }
            }
        }
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;

    fn paragraph_count(docx_bytes: &[u8]) -> usize {
        let mut archive = zip::ZipArchive::new(Cursor::new(docx_bytes)).unwrap();
        let mut xml = String::new();
        archive
            .by_name("word/document.xml")
            .unwrap()
            .read_to_string(&mut xml)
            .unwrap();
        xml.matches("</w:p>").count()
    }

    #[test]
    fn build_creates_one_paragraph_per_line_including_empty() {
        let lines = vec![
            "first line".to_string(),
            String::new(),
            "third line".to_string(),
        ];
        let bytes = build_from_lines(&lines).unwrap();
        // DOCX is a zip container
        assert_eq!(&bytes[..2], b"PK");
        assert_eq!(paragraph_count(&bytes), 3);
    }

    #[test]
    fn built_docx_round_trips_through_the_extractor() {
        let lines = vec!["alpha".to_string(), "beta gamma".to_string()];
        let bytes = build_from_lines(&lines).unwrap();
        let extracted = extract_lines(&bytes).unwrap();
        assert_eq!(extracted, lines);
    }

    #[test]
    fn invalid_docx_is_a_document_error() {
        let err = extract_lines(b"definitely not a zip").unwrap_err();
        assert!(matches!(err, ConvertError::Document(_)));
    }
}
