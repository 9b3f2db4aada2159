//! The JSON DOM document. Values are owned by the document's arena and
//! referenced by [`ValueId`] rather than by pointer, so a value that's
//! rejected before attaching is simply never attached — it stays an
//! unreachable arena entry rather than something that needs explicit
//! destruction.

use crate::error::{DomError, Result};
use crate::value::{Member, Node, NodeData, NumSubtype, ValueId, ValueKind};
use std::sync::atomic::{AtomicU64, Ordering};
use tx_core::numlit::{NumKind, NumLitRecognizer};
use tx_core::{WStr, WString};
use tx_parser::LiteralKind;

static NEXT_DOC_ID: AtomicU64 = AtomicU64::new(1);

/// A JSON document: an arena of values plus, once parsing (or manual
/// construction) completes, a root.
#[derive(Debug)]
pub struct Document {
    id: u64,
    nodes: Vec<Node>,
    root: Option<ValueId>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    pub fn new() -> Self {
        Self { id: NEXT_DOC_ID.fetch_add(1, Ordering::Relaxed), nodes: Vec::new(), root: None }
    }

    pub fn root(&self) -> Option<ValueId> {
        self.root
    }

    pub fn kind(&self, id: ValueId) -> ValueKind {
        self.nodes[id.0].data.kind()
    }

    pub fn parent(&self, id: ValueId) -> Option<ValueId> {
        self.nodes[id.0].parent
    }

    fn push(&mut self, data: NodeData) -> ValueId {
        let id = ValueId(self.nodes.len());
        self.nodes.push(Node { doc_id: self.id, parent: None, data });
        id
    }

    fn check_owned(&self, id: ValueId) -> Result<()> {
        if self.nodes[id.0].doc_id == self.id {
            Ok(())
        } else {
            Err(DomError::ForeignValue)
        }
    }

    fn check_unparented(&self, id: ValueId) -> Result<()> {
        if self.nodes[id.0].parent.is_some() {
            Err(DomError::AlreadyHasParent)
        } else {
            Ok(())
        }
    }

    /// Makes `id` the document root. Errors if a root already exists or if
    /// `id` belongs to another document or is already attached somewhere.
    pub fn set_root(&mut self, id: ValueId) -> Result<()> {
        self.check_owned(id)?;
        self.check_unparented(id)?;
        if self.root.is_some() {
            return Err(DomError::RootAlreadySet);
        }
        self.root = Some(id);
        Ok(())
    }

    // --- factories -------------------------------------------------------

    /// Validates `text` is exactly `"false"`, `"true"`, or `"null"`.
    pub fn create_literal(&mut self, text: &WStr) -> Result<ValueId> {
        let kind = match text.to_string_lossy().as_str() {
            "false" => LiteralKind::False,
            "true" => LiteralKind::True,
            "null" => LiteralKind::Null,
            other => return Err(DomError::InvalidLiteralText(other.to_string())),
        };
        Ok(self.create_literal_kind(kind))
    }

    /// Constructs a literal directly from an already-classified kind, e.g.
    /// from a parser callback that has already done the classification.
    pub fn create_literal_kind(&mut self, kind: LiteralKind) -> ValueId {
        self.push(NodeData::Literal(kind))
    }

    /// Validates that `text` actually parses as `shape`, then stores it under
    /// the DOM's collapsed two-valued subtype.
    pub fn create_number(&mut self, text: &WStr, shape: NumKind) -> Result<ValueId> {
        let s = text.to_string_lossy();
        match NumLitRecognizer::validate(&s) {
            Some(found) if found == shape => {
                Ok(self.push(NodeData::Number { text: text.to_owned(), subtype: NumSubtype::from(shape) }))
            }
            _ => Err(DomError::InvalidNumberText(s)),
        }
    }

    pub fn create_number_from_i64(&mut self, value: i64) -> ValueId {
        self.push(NodeData::Number { text: WString::from_str(&value.to_string()), subtype: NumSubtype::Int })
    }

    pub fn create_number_from_u64(&mut self, value: u64) -> ValueId {
        self.push(NodeData::Number { text: WString::from_str(&value.to_string()), subtype: NumSubtype::Int })
    }

    /// `{value:?}` always renders a decimal point or exponent for `f64`, so
    /// the result is always the `float` subtype.
    pub fn create_number_from_f64(&mut self, value: f64) -> ValueId {
        let text = format!("{value:?}");
        self.push(NodeData::Number { text: WString::from_str(&text), subtype: NumSubtype::Float })
    }

    /// Stores unescaped text; an input still containing escape sequences is
    /// decoded first via the lexer's limited `\uXXXX`-only unescape pass.
    pub fn create_string(&mut self, text: &WStr) -> ValueId {
        let unescaped = tx_lexer::to_unescaped(&text.to_owned());
        self.push(NodeData::String(unescaped))
    }

    pub fn create_array(&mut self) -> ValueId {
        self.push(NodeData::Array(Vec::new()))
    }

    pub fn create_object(&mut self) -> ValueId {
        self.push(NodeData::Object { members: Vec::new(), by_name: Vec::new() })
    }

    // --- mutation ----------------------------------------------------------

    pub fn append_item(&mut self, array: ValueId, value: ValueId) -> Result<()> {
        self.check_owned(value)?;
        self.check_unparented(value)?;
        match &mut self.nodes[array.0].data {
            NodeData::Array(children) => children.push(value),
            _ => return Err(DomError::NotAnArray),
        }
        self.nodes[value.0].parent = Some(array);
        Ok(())
    }

    pub fn append_member(&mut self, object: ValueId, name: &WStr, value: ValueId) -> Result<()> {
        self.check_owned(value)?;
        self.check_unparented(value)?;
        let name = name.to_owned();
        match &mut self.nodes[object.0].data {
            NodeData::Object { members, by_name } => {
                let slot = by_name.binary_search_by(|&i| members[i].name().as_slice().cmp(name.as_slice()));
                match slot {
                    Ok(_) => return Err(DomError::DuplicateMember(name.to_string_lossy())),
                    Err(insert_at) => {
                        let member_index = members.len();
                        members.push(Member { name, value });
                        by_name.insert(insert_at, member_index);
                    }
                }
            }
            _ => return Err(DomError::NotAnObject),
        }
        self.nodes[value.0].parent = Some(object);
        Ok(())
    }

    // --- accessors -----------------------------------------------------------

    pub fn children(&self, array: ValueId) -> Result<&[ValueId]> {
        match &self.nodes[array.0].data {
            NodeData::Array(children) => Ok(children),
            _ => Err(DomError::NotAnArray),
        }
    }

    pub fn members(&self, object: ValueId) -> Result<&[Member]> {
        match &self.nodes[object.0].data {
            NodeData::Object { members, .. } => Ok(members),
            _ => Err(DomError::NotAnObject),
        }
    }

    pub fn find(&self, object: ValueId, name: &WStr) -> Result<Option<ValueId>> {
        match &self.nodes[object.0].data {
            NodeData::Object { members, by_name } => {
                let idx = by_name.binary_search_by(|&i| members[i].name().as_slice().cmp(name.as_slice()));
                Ok(idx.ok().map(|at| members[by_name[at]].value()))
            }
            _ => Err(DomError::NotAnObject),
        }
    }

    pub fn contains_member(&self, object: ValueId, name: &WStr) -> Result<bool> {
        Ok(self.find(object, name)?.is_some())
    }

    pub fn child_count(&self, id: ValueId) -> usize {
        match &self.nodes[id.0].data {
            NodeData::Array(children) => children.len(),
            NodeData::Object { members, .. } => members.len(),
            _ => 0,
        }
    }

    pub fn literal(&self, id: ValueId) -> Option<LiteralKind> {
        match &self.nodes[id.0].data {
            NodeData::Literal(kind) => Some(*kind),
            _ => None,
        }
    }

    pub fn number(&self, id: ValueId) -> Option<(&WString, NumSubtype)> {
        match &self.nodes[id.0].data {
            NodeData::Number { text, subtype } => Some((text, *subtype)),
            _ => None,
        }
    }

    pub fn string(&self, id: ValueId) -> Option<&WString> {
        match &self.nodes[id.0].data {
            NodeData::String(text) => Some(text),
            _ => None,
        }
    }

    /// The child at position `index`, whether the container is an array or
    /// an object (yielding the member's value).
    pub fn nth_child(&self, id: ValueId, index: usize) -> Option<ValueId> {
        match &self.nodes[id.0].data {
            NodeData::Array(children) => children.get(index).copied(),
            NodeData::Object { members, .. } => members.get(index).map(Member::value),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_nested_structure() {
        let mut doc = Document::new();
        let obj = doc.create_object();
        let arr = doc.create_array();
        let one = doc.create_number_from_i64(1);
        doc.append_item(arr, one).unwrap();
        doc.append_member(obj, &WString::from_str("items"), arr).unwrap();
        doc.set_root(obj).unwrap();

        assert_eq!(doc.root(), Some(obj));
        assert_eq!(doc.kind(obj), ValueKind::Object);
        assert_eq!(doc.child_count(obj), 1);
        assert_eq!(doc.find(obj, &WString::from_str("items")).unwrap(), Some(arr));
    }

    #[test]
    fn duplicate_member_name_is_rejected() {
        let mut doc = Document::new();
        let obj = doc.create_object();
        let a = doc.create_number_from_i64(1);
        let b = doc.create_number_from_i64(2);
        doc.append_member(obj, &WString::from_str("x"), a).unwrap();
        let err = doc.append_member(obj, &WString::from_str("x"), b).unwrap_err();
        assert_eq!(err, DomError::DuplicateMember("x".to_string()));
    }

    #[test]
    fn reattaching_a_value_is_rejected() {
        let mut doc = Document::new();
        let arr1 = doc.create_array();
        let arr2 = doc.create_array();
        let v = doc.create_number_from_i64(1);
        doc.append_item(arr1, v).unwrap();
        let err = doc.append_item(arr2, v).unwrap_err();
        assert_eq!(err, DomError::AlreadyHasParent);
    }

    #[test]
    fn foreign_value_is_rejected() {
        let mut a = Document::new();
        let mut b = Document::new();
        let arr = a.create_array();
        let v = b.create_number_from_i64(1);
        let err = a.append_item(arr, v).unwrap_err();
        assert_eq!(err, DomError::ForeignValue);
    }

    #[test]
    fn setting_root_twice_is_rejected() {
        let mut doc = Document::new();
        let a = doc.create_array();
        let b = doc.create_array();
        doc.set_root(a).unwrap();
        let err = doc.set_root(b).unwrap_err();
        assert_eq!(err, DomError::RootAlreadySet);
    }

    #[test]
    fn create_literal_validates_text() {
        let mut doc = Document::new();
        assert!(doc.create_literal(&WString::from_str("true")).is_ok());
        assert!(doc.create_literal(&WString::from_str("nope")).is_err());
    }

    #[test]
    fn create_number_validates_subtype_match() {
        let mut doc = Document::new();
        assert!(doc.create_number(&WString::from_str("1.5"), NumKind::Decimal).is_ok());
        assert!(doc.create_number(&WString::from_str("1.5"), NumKind::Integer).is_err());
    }

    #[test]
    fn create_string_unescapes_input() {
        let mut doc = Document::new();
        let id = doc.create_string(&WString::from_str("a\\u0041b"));
        assert_eq!(doc.string(id).unwrap().to_string_lossy(), "aAb");
    }
}
