//! The push-parser's callback set.

use tx_core::numlit::NumKind;
use tx_core::position::TextPosition;
use tx_core::WStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiteralKind {
    False,
    Null,
    True,
}

/// Receives one callback per grammar production as [`crate::parser::SaxParser`]
/// drives the token stream. `count` on the two closing callbacks is the number
/// of child values/members produced in that container, letting the handler
/// cross-check its own bookkeeping.
pub trait SaxHandler {
    type Error;

    fn on_begin_array(&mut self, pos: TextPosition) -> Result<(), Self::Error>;
    fn on_end_array(&mut self, count: usize, pos: TextPosition) -> Result<(), Self::Error>;
    fn on_begin_object(&mut self, pos: TextPosition) -> Result<(), Self::Error>;
    fn on_end_object(&mut self, count: usize, pos: TextPosition) -> Result<(), Self::Error>;
    fn on_member_name(&mut self, text: &WStr, pos: TextPosition) -> Result<(), Self::Error>;
    fn on_literal(&mut self, kind: LiteralKind, text: &WStr, pos: TextPosition) -> Result<(), Self::Error>;
    fn on_number(&mut self, kind: NumKind, text: &WStr, pos: TextPosition) -> Result<(), Self::Error>;
    fn on_string(&mut self, text: &WStr, pos: TextPosition) -> Result<(), Self::Error>;
    fn textpos_changed(&mut self, pos: TextPosition);
}
