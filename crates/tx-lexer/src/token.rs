//! Lexical tokens produced by the lexer.

use tx_core::{position::TextPosition, WString};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token {
    BeginArray,
    EndArray,
    BeginObject,
    EndObject,
    NameSeparator,
    ValueSeparator,
    LiteralFalse,
    LiteralNull,
    LiteralTrue,
    String,
    NumberInt,
    NumberDecimal,
    NumberFloat,
}

/// A token together with its source position and text.
#[derive(Debug, Clone)]
pub struct Lexeme {
    token: Token,
    pos: TextPosition,
    text: WString,
}

impl Lexeme {
    pub fn new(token: Token, pos: TextPosition, text: WString) -> Self {
        Self { token, pos, text }
    }

    pub fn token(&self) -> Token {
        self.token
    }

    pub fn pos(&self) -> TextPosition {
        self.pos
    }

    pub fn text(&self) -> &WString {
        &self.text
    }
}
