//! `(line, column)` text positions.

use std::fmt;

/// A 1-based `(line, column)` position in some text source.
///
/// `advance()` moves one column to the right; `newline()` resets the column
/// and bumps the line. Advancing past a newline is the caller's
/// responsibility: the lexer calls `newline()` when it *sees* a `\n`, not
/// this type on every character read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TextPosition {
    line: u32,
    column: u32,
}

impl TextPosition {
    pub fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }

    pub fn line(&self) -> u32 {
        self.line
    }

    pub fn column(&self) -> u32 {
        self.column
    }

    pub fn advance(&mut self) {
        self.column += 1;
    }

    pub fn newline(&mut self) {
        self.line += 1;
        self.column = 1;
    }

    pub fn reset(&mut self) {
        self.line = 1;
        self.column = 1;
    }
}

impl Default for TextPosition {
    fn default() -> Self {
        Self { line: 1, column: 1 }
    }
}

impl fmt::Display for TextPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.line, self.column)
    }
}
