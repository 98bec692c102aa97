//! Legacy word-processor rendering via `rtf-parser`.
//!
//! The renderer is treated as an opaque collaborator: raw bytes in, visible
//! text out. Styling is not preserved; downstream routes only need the text.

use rtf_parser::lexer::Lexer;
use rtf_parser::parser::Parser;

use crate::utils::{ConvertError, ConvertResult};

/// Extracts the visible text of an RTF document.
pub fn extract_text(bytes: &[u8]) -> ConvertResult<String> {
    // RTF is 7-bit ASCII with escapes; lossy decoding only affects bytes a
    // conforming file would not contain
    let content = String::from_utf8_lossy(bytes);

    let tokens = Lexer::scan(&content)
        .map_err(|e| ConvertError::document(format!("RTF lex failed: {e:?}")))?;
    let document = Parser::new(tokens)
        .parse()
        .map_err(|e| ConvertError::document(format!("RTF parse failed: {e:?}")))?;

    Ok(document.get_text())
}

/// Extracts visible text split into lines, with CR stripped.
pub fn extract_lines(bytes: &[u8]) -> ConvertResult<Vec<String>> {
    let text = extract_text(bytes)?;
    Ok(text
        .split('\n')
        .map(|l| l.trim_end_matches('\r').to_string())
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r"{\rtf1\ansi\deff0 {\fonttbl {\f0 Times;}}\f0\fs24 Hello legacy world.\par Second paragraph.}";

    #[test]
    fn extracts_visible_text() {
        let text = extract_text(SAMPLE.as_bytes()).unwrap();
        assert!(text.contains("Hello legacy world."));
        assert!(text.contains("Second paragraph."));
    }

    #[test]
    fn invalid_rtf_is_a_document_error() {
        let err = extract_text(b"not rtf at all").unwrap_err();
        assert!(matches!(err, ConvertError::Document(_)));
    }

    #[test]
    fn lines_are_split_on_newlines() {
        let lines = extract_lines(SAMPLE.as_bytes()).unwrap();
        assert!(!lines.is_empty());
        assert!(lines.iter().any(|l| l.contains("Hello legacy world.")));
    }
}
