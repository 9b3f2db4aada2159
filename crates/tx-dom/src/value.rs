//! Value identity and per-kind payloads. Values live in the document's arena
//! and are referenced by index rather than by pointer.

use tx_core::numlit::NumKind;
use tx_core::WString;
use tx_parser::LiteralKind;

/// An index into a [`crate::document::Document`]'s arena. Only meaningful
/// together with the document that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ValueId(pub(crate) usize);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Literal,
    Number,
    String,
    Array,
    Object,
}

/// A number's DOM-level subtype: `int` for a bare integer literal, `float`
/// for anything with a fractional part or exponent. Collapses the lexer's
/// finer `NumKind` (which distinguishes a decimal from an exponent form to
/// validate text shape) down to the two-valued set the DOM stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumSubtype {
    Int,
    Float,
}

impl From<NumKind> for NumSubtype {
    fn from(kind: NumKind) -> Self {
        match kind {
            NumKind::Integer => NumSubtype::Int,
            NumKind::Decimal | NumKind::Float => NumSubtype::Float,
        }
    }
}

/// One named member of an object, in insertion order.
#[derive(Debug, Clone)]
pub struct Member {
    name: WString,
    value: ValueId,
}

impl Member {
    pub fn name(&self) -> &WString {
        &self.name
    }

    pub fn value(&self) -> ValueId {
        self.value
    }
}

#[derive(Debug, Clone)]
pub(crate) enum NodeData {
    Literal(LiteralKind),
    Number { text: WString, subtype: NumSubtype },
    String(WString),
    Array(Vec<ValueId>),
    Object {
        members: Vec<Member>,
        /// Indices into `members`, kept sorted by name for binary search.
        by_name: Vec<usize>,
    },
}

impl NodeData {
    pub(crate) fn kind(&self) -> ValueKind {
        match self {
            NodeData::Literal(_) => ValueKind::Literal,
            NodeData::Number { .. } => ValueKind::Number,
            NodeData::String(_) => ValueKind::String,
            NodeData::Array(_) => ValueKind::Array,
            NodeData::Object { .. } => ValueKind::Object,
        }
    }
}

#[derive(Debug, Clone)]
pub(crate) struct Node {
    pub(crate) doc_id: u64,
    pub(crate) parent: Option<ValueId>,
    pub(crate) data: NodeData,
}
