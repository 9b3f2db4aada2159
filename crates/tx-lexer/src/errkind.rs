//! JSON lexer error kinds and their display messages.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrKind {
    InvalidLiteralFmt { found: String },
    InvalidNumber,
    ReaderIo,
    UnallowedCharFmt { c: u16 },
    UnallowedEscapeSeq,
    UnclosedString,
    UnexpectedCharFmt { c: u16 },
    UnrecognizedEscapeSeqFmt { c: u16 },
}

impl fmt::Display for ErrKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrKind::InvalidLiteralFmt { found } => {
                write!(f, "Invalid literal '{found}'. Expected 'false', 'true' or 'null'")
            }
            ErrKind::InvalidNumber => write!(f, "Invalid number"),
            ErrKind::ReaderIo => write!(f, "I/O error while reading"),
            ErrKind::UnallowedCharFmt { c } => write!(f, "Unallowed character: {:#06x}", c),
            ErrKind::UnallowedEscapeSeq => write!(f, "Unallowed escape sequence"),
            ErrKind::UnclosedString => write!(f, "Unclosed string"),
            ErrKind::UnexpectedCharFmt { c } => write!(f, "Unexpected character: {:#06x}", c),
            ErrKind::UnrecognizedEscapeSeqFmt { c } => write!(f, "Unrecognized escape sequence: \\{}", *c as u8 as char),
        }
    }
}
