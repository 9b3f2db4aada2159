//! Thin convenience wrapper composing `tx_io` + `tx_lexer` + `tx_parser` to
//! parse straight into a [`Document`].

use crate::document::Document;
use crate::error::DomError;
use crate::handler::DomHandler;
use tx_core::diag::DiagnosticCollector;
use tx_lexer::Lexer;
use tx_parser::{ErrKind, ParseError, SaxParser};

/// Parses `reader`'s contents into `doc`, which must be empty (no root yet).
pub fn parse_to_dom(reader: tx_io::TextReader, doc: &mut Document) -> Result<(), ParseError<DomError>> {
    parse_to_dom_collecting(reader, doc).0
}

/// Like [`parse_to_dom`], but also returns every diagnostic the parser
/// recorded: a resynchronised-past entry for each malformed string/number,
/// plus the grammar error (if any) that stopped the parse.
pub fn parse_to_dom_collecting(
    reader: tx_io::TextReader,
    doc: &mut Document,
) -> (Result<(), ParseError<DomError>>, DiagnosticCollector<ErrKind>) {
    let lexer = Lexer::new(reader);
    let handler = DomHandler::new(doc);
    let mut parser = SaxParser::new(lexer, handler);
    let result = parser.parse();
    (result, parser.into_diagnostics())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tx_io::{Policy, TextReader};

    #[test]
    fn parses_utf8_bytes_into_a_document() {
        let mut doc = Document::new();
        let reader = TextReader::from_reader(r#"{"k": 1}"#.as_bytes(), Policy::utf8(tx_codec::HeaderMode::Consume), "<memory>");
        parse_to_dom(reader, &mut doc).unwrap();
        assert!(doc.root().is_some());
    }

    #[test]
    fn syntax_error_surfaces_as_parse_error() {
        let mut doc = Document::new();
        let reader = TextReader::from_wide("[1, 2".encode_utf16().collect::<Vec<_>>(), "<memory>");
        let err = parse_to_dom(reader, &mut doc).unwrap_err();
        assert!(matches!(err, ParseError::Syntax { .. }));
    }

    #[test]
    fn malformed_number_is_collected_as_a_diagnostic_without_failing_the_parse() {
        let mut doc = Document::new();
        let reader = TextReader::from_wide("01".encode_utf16().collect::<Vec<_>>(), "<memory>");
        let (result, diagnostics) = parse_to_dom_collecting(reader, &mut doc);
        result.unwrap();
        assert_eq!(diagnostics.errors_count(), 1);
    }
}
