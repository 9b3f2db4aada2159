//! Recursive-descent push parser.
//!
//! ```text
//! doc     := value? EOF
//! value   := object | array | number | string | literal
//! object  := '{' (member (',' member)*)? '}'
//! member  := string ':' value
//! array   := '[' (value (',' value)*)? ']'
//! ```

use crate::errkind::ErrKind;
use crate::handler::{LiteralKind, SaxHandler};
use std::fmt;
use tx_core::diag::{DiagnosticCollector, MsgOrigin};
use tx_core::position::TextPosition;
use tx_lexer::{Lexeme, Lexer, Token};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError<E> {
    Syntax { kind: ErrKind, pos: TextPosition },
    Handler(E),
}

impl<E: fmt::Display> fmt::Display for ParseError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::Syntax { kind, pos } => write!(f, "{kind} at {pos}"),
            ParseError::Handler(e) => write!(f, "{e}"),
        }
    }
}

pub type Result<T, E> = std::result::Result<T, ParseError<E>>;

fn describe(lexeme: &Lexeme) -> String {
    match lexeme.token() {
        Token::BeginArray => "[".to_string(),
        Token::EndArray => "]".to_string(),
        Token::BeginObject => "{".to_string(),
        Token::EndObject => "}".to_string(),
        Token::NameSeparator => ":".to_string(),
        Token::ValueSeparator => ",".to_string(),
        _ => lexeme.text().to_string_lossy(),
    }
}

/// Drives a [`Lexer`] through the grammar above, calling into a [`SaxHandler`]
/// for each production. Recoverable lexical errors (a malformed string or
/// number) don't abort the parse: they're recorded in `diagnostics` and the
/// lexer resynchronises past them via [`Lexer::recover`]. A grammar-level
/// error still stops the parse, but is recorded as a diagnostic before it
/// propagates, so callers can inspect everything that went wrong through
/// [`SaxParser::diagnostics`] even after `parse` returns `Err`.
pub struct SaxParser<H: SaxHandler> {
    lexer: Lexer,
    handler: H,
    last_pos: TextPosition,
    diagnostics: DiagnosticCollector<ErrKind>,
}

impl<H: SaxHandler> SaxParser<H> {
    pub fn new(lexer: Lexer, handler: H) -> Self {
        let last_pos = lexer.pos();
        Self { lexer, handler, last_pos, diagnostics: DiagnosticCollector::new() }
    }

    pub fn into_handler(self) -> H {
        self.handler
    }

    pub fn into_diagnostics(self) -> DiagnosticCollector<ErrKind> {
        self.diagnostics
    }

    /// Every diagnostic recorded so far: a resynchronised-past lexer error
    /// for each malformed string/number, plus the grammar error (if any)
    /// that stopped the parse.
    pub fn diagnostics(&self) -> &DiagnosticCollector<ErrKind> {
        &self.diagnostics
    }

    fn syntax(&mut self, kind: ErrKind, pos: TextPosition) -> ParseError<H::Error> {
        self.diagnostics.add_error(MsgOrigin::Parser, kind.clone(), pos, self.lexer.source_name(), kind.to_string());
        ParseError::Syntax { kind, pos }
    }

    /// Fetches the next lexeme. A lexer error is resynchronised past rather
    /// than returned: it's recorded as a diagnostic and lexing resumes at the
    /// next whitespace or structural character, so one bad string or number
    /// doesn't abort the whole parse.
    fn next_optional(&mut self) -> Result<Option<Lexeme>, H::Error> {
        loop {
            match self.lexer.next_lexeme() {
                Ok(lexeme) => {
                    if let Some(lexeme) = &lexeme {
                        self.handler.textpos_changed(lexeme.pos());
                        self.last_pos = lexeme.pos();
                    }
                    return Ok(lexeme);
                }
                Err(e) => {
                    self.diagnostics.add_error(
                        MsgOrigin::Lexer,
                        ErrKind::Lexer(e.kind.clone()),
                        e.pos,
                        self.lexer.source_name(),
                        e.kind.to_string(),
                    );
                    self.lexer.recover().map_err(|re| self.syntax(ErrKind::Lexer(re.kind), re.pos))?;
                }
            }
        }
    }

    fn next_required(&mut self, eof_kind: ErrKind) -> Result<Lexeme, H::Error> {
        match self.next_optional()? {
            Some(lexeme) => Ok(lexeme),
            None => Err(self.syntax(eof_kind, self.last_pos)),
        }
    }

    /// Parses one document: an optional value followed by end of input.
    pub fn parse(&mut self) -> Result<(), H::Error> {
        self.handler.textpos_changed(self.lexer.pos());
        let first = match self.next_optional()? {
            Some(lexeme) => lexeme,
            None => return Ok(()),
        };
        self.value(first)?;
        if let Some(trailing) = self.next_optional()? {
            return Err(self.syntax(ErrKind::UnexpectedLexemeFmt { found: describe(&trailing) }, trailing.pos()));
        }
        Ok(())
    }

    fn value(&mut self, lexeme: Lexeme) -> Result<(), H::Error> {
        let pos = lexeme.pos();
        tracing::trace!(token = ?lexeme.token(), %pos, "value");
        match lexeme.token() {
            Token::BeginArray => self.array(pos),
            Token::BeginObject => self.object(pos),
            Token::LiteralFalse => self.handler.on_literal(LiteralKind::False, lexeme.text(), pos).map_err(ParseError::Handler),
            Token::LiteralTrue => self.handler.on_literal(LiteralKind::True, lexeme.text(), pos).map_err(ParseError::Handler),
            Token::LiteralNull => self.handler.on_literal(LiteralKind::Null, lexeme.text(), pos).map_err(ParseError::Handler),
            Token::String => self.handler.on_string(lexeme.text(), pos).map_err(ParseError::Handler),
            Token::NumberInt => self.handler.on_number(tx_core::numlit::NumKind::Integer, lexeme.text(), pos).map_err(ParseError::Handler),
            Token::NumberDecimal => self.handler.on_number(tx_core::numlit::NumKind::Decimal, lexeme.text(), pos).map_err(ParseError::Handler),
            Token::NumberFloat => self.handler.on_number(tx_core::numlit::NumKind::Float, lexeme.text(), pos).map_err(ParseError::Handler),
            _ => Err(self.syntax(ErrKind::ExpectedValueButFoundFmt { found: describe(&lexeme) }, pos)),
        }
    }

    fn array(&mut self, start: TextPosition) -> Result<(), H::Error> {
        tracing::trace!(%start, "array");
        self.handler.on_begin_array(start).map_err(ParseError::Handler)?;
        let mut count = 0usize;
        let mut next = self.next_required(ErrKind::UnclosedArray)?;
        if next.token() == Token::EndArray {
            return self.handler.on_end_array(count, next.pos()).map_err(ParseError::Handler);
        }
        loop {
            self.value(next)?;
            count += 1;
            next = self.next_required(ErrKind::UnclosedArray)?;
            match next.token() {
                Token::ValueSeparator => {
                    next = self.next_required(ErrKind::ExpectedArrayItem)?;
                }
                Token::EndArray => return self.handler.on_end_array(count, next.pos()).map_err(ParseError::Handler),
                _ => return Err(self.syntax(ErrKind::UnclosedArray, next.pos())),
            }
        }
    }

    fn object(&mut self, start: TextPosition) -> Result<(), H::Error> {
        tracing::trace!(%start, "object");
        self.handler.on_begin_object(start).map_err(ParseError::Handler)?;
        let mut count = 0usize;
        let mut next = self.next_required(ErrKind::UnclosedObject)?;
        if next.token() == Token::EndObject {
            return self.handler.on_end_object(count, next.pos()).map_err(ParseError::Handler);
        }
        loop {
            if next.token() != Token::String {
                return Err(self.syntax(ErrKind::ExpectedMemberName, next.pos()));
            }
            self.handler.on_member_name(next.text(), next.pos()).map_err(ParseError::Handler)?;
            let sep = self.next_required(ErrKind::UnclosedObject)?;
            if sep.token() != Token::NameSeparator {
                return Err(self.syntax(ErrKind::ExpectedNameSeparator, sep.pos()));
            }
            let value_lexeme = self.next_required(ErrKind::ExpectedValue)?;
            self.value(value_lexeme)?;
            count += 1;
            next = self.next_required(ErrKind::UnclosedObject)?;
            match next.token() {
                Token::ValueSeparator => {
                    next = self.next_required(ErrKind::ExpectedMemberName)?;
                }
                Token::EndObject => return self.handler.on_end_object(count, next.pos()).map_err(ParseError::Handler),
                _ => return Err(self.syntax(ErrKind::UnclosedObject, next.pos())),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tx_core::numlit::NumKind;
    use tx_core::WStr;
    use tx_io::TextReader;

    #[derive(Debug, Default)]
    struct RecordingHandler {
        events: Vec<String>,
    }

    impl SaxHandler for RecordingHandler {
        type Error = std::convert::Infallible;

        fn on_begin_array(&mut self, _pos: TextPosition) -> Result<(), Self::Error> {
            self.events.push("begin_array".into());
            Ok(())
        }
        fn on_end_array(&mut self, count: usize, _pos: TextPosition) -> Result<(), Self::Error> {
            self.events.push(format!("end_array({count})"));
            Ok(())
        }
        fn on_begin_object(&mut self, _pos: TextPosition) -> Result<(), Self::Error> {
            self.events.push("begin_object".into());
            Ok(())
        }
        fn on_end_object(&mut self, count: usize, _pos: TextPosition) -> Result<(), Self::Error> {
            self.events.push(format!("end_object({count})"));
            Ok(())
        }
        fn on_member_name(&mut self, text: &WStr, _pos: TextPosition) -> Result<(), Self::Error> {
            self.events.push(format!("member_name({})", text.to_string_lossy()));
            Ok(())
        }
        fn on_literal(&mut self, kind: LiteralKind, _text: &WStr, _pos: TextPosition) -> Result<(), Self::Error> {
            self.events.push(format!("literal({kind:?})"));
            Ok(())
        }
        fn on_number(&mut self, kind: NumKind, text: &WStr, _pos: TextPosition) -> Result<(), Self::Error> {
            self.events.push(format!("number({kind:?},{})", text.to_string_lossy()));
            Ok(())
        }
        fn on_string(&mut self, text: &WStr, _pos: TextPosition) -> Result<(), Self::Error> {
            self.events.push(format!("string({})", text.to_string_lossy()));
            Ok(())
        }
        fn textpos_changed(&mut self, _pos: TextPosition) {}
    }

    fn parse(s: &str) -> Result<Vec<String>, std::convert::Infallible> {
        let data: Vec<u16> = s.encode_utf16().collect();
        let lexer = Lexer::new(TextReader::from_wide(data, "<memory>"));
        let mut parser = SaxParser::new(lexer, RecordingHandler::default());
        parser.parse()?;
        Ok(parser.into_handler().events)
    }

    #[test]
    fn parses_nested_object_and_array() {
        let events = parse(r#"{"a": [1, 2.5, true, null, "x"]}"#).unwrap();
        assert_eq!(
            events,
            vec![
                "begin_object".to_string(),
                "member_name(a)".to_string(),
                "begin_array".to_string(),
                "number(Integer,1)".to_string(),
                "number(Decimal,2.5)".to_string(),
                "literal(True)".to_string(),
                "literal(Null)".to_string(),
                "string(x)".to_string(),
                "end_array(5)".to_string(),
                "end_object(1)".to_string(),
            ]
        );
    }

    #[test]
    fn empty_array_and_object() {
        assert_eq!(parse("[]").unwrap(), vec!["begin_array".to_string(), "end_array(0)".to_string()]);
        assert_eq!(parse("{}").unwrap(), vec!["begin_object".to_string(), "end_object(0)".to_string()]);
    }

    #[test]
    fn empty_document_is_valid() {
        assert_eq!(parse("").unwrap(), Vec::<String>::new());
    }

    #[test]
    fn unclosed_array_is_an_error() {
        let data: Vec<u16> = "[1, 2".encode_utf16().collect();
        let lexer = Lexer::new(TextReader::from_wide(data, "<memory>"));
        let mut parser = SaxParser::new(lexer, RecordingHandler::default());
        let err = parser.parse().unwrap_err();
        assert!(matches!(err, ParseError::Syntax { kind: ErrKind::UnclosedArray, .. }));
    }

    #[test]
    fn missing_name_separator_is_an_error() {
        let data: Vec<u16> = r#"{"a" 1}"#.encode_utf16().collect();
        let lexer = Lexer::new(TextReader::from_wide(data, "<memory>"));
        let mut parser = SaxParser::new(lexer, RecordingHandler::default());
        let err = parser.parse().unwrap_err();
        assert!(matches!(err, ParseError::Syntax { kind: ErrKind::ExpectedNameSeparator, .. }));
    }

    #[test]
    fn malformed_number_is_recorded_but_does_not_abort_parsing() {
        let data: Vec<u16> = "01".encode_utf16().collect();
        let lexer = Lexer::new(TextReader::from_wide(data, "<memory>"));
        let mut parser = SaxParser::new(lexer, RecordingHandler::default());
        // the lexer resynchronises past the malformed number and finds
        // nothing else, so the document is accepted as empty
        parser.parse().unwrap();
        assert_eq!(parser.diagnostics().errors_count(), 1);
        assert!(matches!(parser.diagnostics().errors().next().unwrap().kind(), ErrKind::Lexer(tx_lexer::ErrKind::InvalidNumber)));
    }

    #[test]
    fn resynchronised_lexer_error_and_the_grammar_error_it_exposes_are_both_recorded() {
        let data: Vec<u16> = "[1, 01, 2]".encode_utf16().collect();
        let lexer = Lexer::new(TextReader::from_wide(data, "<memory>"));
        let mut parser = SaxParser::new(lexer, RecordingHandler::default());
        let err = parser.parse().unwrap_err();
        assert!(matches!(err, ParseError::Syntax { kind: ErrKind::ExpectedValueButFoundFmt { .. }, .. }));
        let kinds: Vec<_> = parser.diagnostics().errors().map(|d| d.kind().clone()).collect();
        assert!(matches!(kinds[0], ErrKind::Lexer(tx_lexer::ErrKind::InvalidNumber)));
        assert!(matches!(kinds[1], ErrKind::ExpectedValueButFoundFmt { .. }));
    }

    #[test]
    fn trailing_garbage_is_an_error() {
        let data: Vec<u16> = "1 2".encode_utf16().collect();
        let lexer = Lexer::new(TextReader::from_wide(data, "<memory>"));
        let mut parser = SaxParser::new(lexer, RecordingHandler::default());
        let err = parser.parse().unwrap_err();
        assert!(matches!(err, ParseError::Syntax { kind: ErrKind::UnexpectedLexemeFmt { .. }, .. }));
    }
}
