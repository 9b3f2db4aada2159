//! JSON lexer: turns a wide-character stream into a sequence of lexemes.

use crate::errkind::ErrKind;
use crate::jsontext::is_unescaped;
use crate::token::{Lexeme, Token};
use tx_core::position::TextPosition;
use tx_core::numlit::{NumKind, NumLitRecognizer};
use tx_core::WString;
use tx_io::TextReader;

const QUOTE: u16 = 0x22;
const BACKSLASH: u16 = 0x5C;
const SLASH: u16 = 0x2F;
const MINUS: u16 = 0x2D;
const ZERO: u16 = 0x30;
const NINE: u16 = 0x39;

const WHITESPACE: [u16; 4] = [0x20, 0x09, 0x0D, 0x0A];

fn is_structural(c: u16) -> bool {
    matches!(c, 0x5B | 0x5D | 0x7B | 0x7D | 0x3A | 0x2C)
}

fn hex_digit_value(c: u16) -> Option<u16> {
    match c {
        0x30..=0x39 => Some(c - 0x30),
        0x41..=0x46 => Some(c - 0x41 + 10),
        0x61..=0x66 => Some(c - 0x61 + 10),
        _ => None,
    }
}

/// A lexer-level error: a recoverable syntax problem anchored at a position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexError {
    pub kind: ErrKind,
    pub pos: TextPosition,
}

impl std::fmt::Display for LexError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} at {}", self.kind, self.pos)
    }
}

impl std::error::Error for LexError {}

pub type Result<T> = std::result::Result<T, LexError>;

/// Tokenises a wide-character stream into JSON lexemes, tracking its own
/// `(line, column)` position (the underlying reader only counts characters).
pub struct Lexer {
    reader: TextReader,
    pos: TextPosition,
}

impl Lexer {
    pub fn new(reader: TextReader) -> Self {
        Self { reader, pos: TextPosition::default() }
    }

    pub fn pos(&self) -> TextPosition {
        self.pos
    }

    pub fn source_name(&self) -> &str {
        self.reader.source_name()
    }

    fn io_err(&self) -> LexError {
        LexError { kind: ErrKind::ReaderIo, pos: self.pos }
    }

    fn bump(&mut self) -> Result<Option<u16>> {
        let c = self.reader.next_char().map_err(|_| LexError { kind: ErrKind::ReaderIo, pos: self.pos })?;
        if let Some(c) = c {
            if c == 0x0A {
                self.pos.newline();
            } else {
                self.pos.advance();
            }
        }
        Ok(c)
    }

    fn peek(&mut self) -> Result<Option<u16>> {
        self.reader.peek().map_err(|_| self.io_err())
    }

    fn skip_whitespace(&mut self) -> Result<()> {
        while let Some(c) = self.peek()? {
            if WHITESPACE.contains(&c) {
                self.bump()?;
            } else {
                break;
            }
        }
        Ok(())
    }

    /// Yields the next lexeme, or `None` at end of stream.
    pub fn next_lexeme(&mut self) -> Result<Option<Lexeme>> {
        self.skip_whitespace()?;
        let start = self.pos;
        let c = match self.peek()? {
            Some(c) => c,
            None => return Ok(None),
        };
        if c == QUOTE {
            return Ok(Some(self.read_string(start)?));
        }
        if c == MINUS || (ZERO..=NINE).contains(&c) {
            return Ok(Some(self.read_number(start)?));
        }
        if is_structural(c) {
            self.bump()?;
            let token = match c {
                0x5B => Token::BeginArray,
                0x5D => Token::EndArray,
                0x7B => Token::BeginObject,
                0x7D => Token::EndObject,
                0x3A => Token::NameSeparator,
                _ => Token::ValueSeparator,
            };
            return Ok(Some(Lexeme::new(token, start, WString::from_vec(vec![c]))));
        }
        if c <= 0x7F && (c as u8 as char).is_ascii_alphabetic() {
            return Ok(Some(self.read_literal(start)?));
        }
        self.bump()?;
        Err(LexError { kind: ErrKind::UnexpectedCharFmt { c }, pos: start })
    }

    fn read_literal(&mut self, start: TextPosition) -> Result<Lexeme> {
        let mut text = Vec::new();
        while let Some(c) = self.peek()? {
            if WHITESPACE.contains(&c) || is_structural(c) {
                break;
            }
            text.push(c);
            self.bump()?;
        }
        let word = String::from_utf16_lossy(&text);
        let token = match word.as_str() {
            "false" => Token::LiteralFalse,
            "true" => Token::LiteralTrue,
            "null" => Token::LiteralNull,
            _ => return Err(LexError { kind: ErrKind::InvalidLiteralFmt { found: word }, pos: start }),
        };
        Ok(Lexeme::new(token, start, WString::from_vec(text)))
    }

    fn read_number(&mut self, start: TextPosition) -> Result<Lexeme> {
        let mut recognizer = NumLitRecognizer::new();
        let mut text = Vec::new();
        let mut last_pos = start;
        loop {
            let c = match self.peek()? {
                Some(c) => c,
                None => break,
            };
            if c > 0x7F {
                break;
            }
            last_pos = self.pos;
            if !recognizer.push(c as u8 as char) {
                break;
            }
            text.push(c);
            self.bump()?;
        }
        match recognizer.kind() {
            Some(NumKind::Integer) => Ok(Lexeme::new(Token::NumberInt, start, WString::from_vec(text))),
            Some(NumKind::Decimal) => Ok(Lexeme::new(Token::NumberDecimal, start, WString::from_vec(text))),
            Some(NumKind::Float) => Ok(Lexeme::new(Token::NumberFloat, start, WString::from_vec(text))),
            None => Err(LexError { kind: ErrKind::InvalidNumber, pos: last_pos }),
        }
    }

    fn read_string(&mut self, start: TextPosition) -> Result<Lexeme> {
        self.bump()?;
        let mut text = Vec::new();
        loop {
            let char_pos = self.pos;
            let c = match self.bump()? {
                Some(c) => c,
                None => return Err(LexError { kind: ErrKind::UnclosedString, pos: start }),
            };
            if c == QUOTE {
                break;
            }
            if c == BACKSLASH {
                let esc_pos = char_pos;
                let e = match self.bump()? {
                    Some(c) => c,
                    None => return Err(LexError { kind: ErrKind::UnclosedString, pos: start }),
                };
                match e {
                    QUOTE => text.push(QUOTE),
                    BACKSLASH => text.push(BACKSLASH),
                    SLASH => text.push(SLASH),
                    0x62 => text.push(0x08), // \b
                    0x66 => text.push(0x0C), // \f
                    0x6E => text.push(0x0A), // \n
                    0x72 => text.push(0x0D), // \r
                    0x74 => text.push(0x09), // \t
                    0x75 => {
                        // \u, exactly four hex digits
                        let mut value: u16 = 0;
                        for _ in 0..4 {
                            let digit = self.bump()?.and_then(hex_digit_value);
                            match digit {
                                Some(d) => value = value * 16 + d,
                                None => return Err(LexError { kind: ErrKind::UnallowedEscapeSeq, pos: esc_pos }),
                            }
                        }
                        text.push(value);
                    }
                    other => return Err(LexError { kind: ErrKind::UnrecognizedEscapeSeqFmt { c: other }, pos: esc_pos }),
                }
            } else if is_unescaped(c as u32) {
                text.push(c);
            } else {
                return Err(LexError { kind: ErrKind::UnallowedCharFmt { c }, pos: char_pos });
            }
        }
        Ok(Lexeme::new(Token::String, start, WString::from_vec(text)))
    }

    /// Skips forward to the next whitespace or structural character so
    /// lexing can resume after an error instead of aborting the stream.
    pub fn recover(&mut self) -> Result<()> {
        loop {
            match self.peek()? {
                None => return Ok(()),
                Some(c) if WHITESPACE.contains(&c) || is_structural(c) => return Ok(()),
                Some(_) => {
                    self.bump()?;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tx_io::TextReader;

    fn lexer_over(s: &str) -> Lexer {
        let data: Vec<u16> = s.encode_utf16().collect();
        Lexer::new(TextReader::from_wide(data, "<memory>"))
    }

    fn tokens(s: &str) -> Vec<Token> {
        let mut lx = lexer_over(s);
        let mut out = Vec::new();
        while let Some(lexeme) = lx.next_lexeme().unwrap() {
            out.push(lexeme.token());
        }
        out
    }

    #[test]
    fn structural_tokens() {
        assert_eq!(tokens("[]{}:,"), vec![
            Token::BeginArray,
            Token::EndArray,
            Token::BeginObject,
            Token::EndObject,
            Token::NameSeparator,
            Token::ValueSeparator,
        ]);
    }

    #[test]
    fn literals() {
        assert_eq!(tokens("true false null"), vec![Token::LiteralTrue, Token::LiteralFalse, Token::LiteralNull]);
    }

    #[test]
    fn invalid_literal_is_reported_at_its_start() {
        let mut lx = lexer_over("  truthy");
        let err = lx.next_lexeme().unwrap_err();
        assert_eq!(err.kind, ErrKind::InvalidLiteralFmt { found: "truthy".to_string() });
        assert_eq!(err.pos, TextPosition::new(1, 3));
    }

    #[test]
    fn numbers_classify_by_shape() {
        let mut lx = lexer_over("12 1.5 1e3");
        let a = lx.next_lexeme().unwrap().unwrap();
        assert_eq!(a.token(), Token::NumberInt);
        let b = lx.next_lexeme().unwrap().unwrap();
        assert_eq!(b.token(), Token::NumberDecimal);
        let c = lx.next_lexeme().unwrap().unwrap();
        assert_eq!(c.token(), Token::NumberFloat);
    }

    #[test]
    fn leading_zero_followed_by_digit_is_invalid_number() {
        let mut lx = lexer_over("01");
        let err = lx.next_lexeme().unwrap_err();
        assert_eq!(err.kind, ErrKind::InvalidNumber);
        assert_eq!(err.pos, TextPosition::new(1, 2));
    }

    #[test]
    fn trailing_dot_is_reported_at_the_dot() {
        let mut lx = lexer_over("123.");
        let err = lx.next_lexeme().unwrap_err();
        assert_eq!(err.kind, ErrKind::InvalidNumber);
        assert_eq!(err.pos, TextPosition::new(1, 4));
    }

    #[test]
    fn string_unescapes_short_forms() {
        let mut lx = lexer_over(r#""a\tb\n\"c""#);
        let lexeme = lx.next_lexeme().unwrap().unwrap();
        assert_eq!(lexeme.token(), Token::String);
        assert_eq!(lexeme.text().to_string_lossy(), "a\tb\n\"c");
    }

    #[test]
    fn string_unescapes_unicode_escape() {
        let mut lx = lexer_over(r#""A""#);
        let lexeme = lx.next_lexeme().unwrap().unwrap();
        assert_eq!(lexeme.text().to_string_lossy(), "A");
    }

    #[test]
    fn unclosed_string_is_reported_at_its_start() {
        let mut lx = lexer_over("\"abc");
        let err = lx.next_lexeme().unwrap_err();
        assert_eq!(err.kind, ErrKind::UnclosedString);
        assert_eq!(err.pos, TextPosition::new(1, 1));
    }

    #[test]
    fn control_char_inside_string_is_unallowed() {
        let mut lx = lexer_over("\"a\u{0001}b\"");
        let err = lx.next_lexeme().unwrap_err();
        assert_eq!(err.kind, ErrKind::UnallowedCharFmt { c: 0x0001 });
    }

    #[test]
    fn unknown_escape_is_reported() {
        let mut lx = lexer_over(r#""\q""#);
        let err = lx.next_lexeme().unwrap_err();
        assert_eq!(err.kind, ErrKind::UnrecognizedEscapeSeqFmt { c: 'q' as u16 });
        assert_eq!(err.pos, TextPosition::new(1, 2));
    }

    #[test]
    fn malformed_unicode_escape_is_reported_at_its_backslash() {
        let mut lx = lexer_over(r#""\u123""#);
        let err = lx.next_lexeme().unwrap_err();
        assert_eq!(err.kind, ErrKind::UnallowedEscapeSeq);
        assert_eq!(err.pos, TextPosition::new(1, 2));
    }

    #[test]
    fn newline_advances_line_and_resets_column() {
        let mut lx = lexer_over("[\n]");
        lx.next_lexeme().unwrap();
        let second = lx.next_lexeme().unwrap().unwrap();
        assert_eq!(second.pos(), TextPosition::new(2, 1));
    }

    #[test]
    fn recover_skips_to_next_structural_character() {
        let mut lx = lexer_over("garbage]");
        lx.recover().unwrap();
        let lexeme = lx.next_lexeme().unwrap().unwrap();
        assert_eq!(lexeme.token(), Token::EndArray);
    }

    #[test]
    fn stray_symbol_is_unexpected_char() {
        let mut lx = lexer_over("@");
        let err = lx.next_lexeme().unwrap_err();
        assert_eq!(err.kind, ErrKind::UnexpectedCharFmt { c: '@' as u16 });
    }
}
