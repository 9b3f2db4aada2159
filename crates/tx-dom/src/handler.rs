//! The SAX-to-DOM bridge: a [`SaxHandler`](tx_parser::SaxHandler) that builds
//! a [`Document`] as the parser's callbacks arrive.

use crate::document::Document;
use crate::error::DomError;
use crate::value::{ValueId, ValueKind};
use tx_core::numlit::NumKind;
use tx_core::position::TextPosition;
use tx_core::WStr;
use tx_parser::{LiteralKind, SaxHandler};

/// Builds a [`Document`] from push-parser callbacks. Keeps a container stack
/// (arrays/objects currently open) and a pending-name stack (member names
/// seen with no value yet).
pub struct DomHandler<'a> {
    doc: &'a mut Document,
    containers: Vec<ValueId>,
    pending_names: Vec<tx_core::WString>,
}

impl<'a> DomHandler<'a> {
    pub fn new(doc: &'a mut Document) -> Self {
        Self { doc, containers: Vec::new(), pending_names: Vec::new() }
    }

    fn attach(&mut self, id: ValueId) -> Result<(), DomError> {
        match self.containers.last().copied() {
            None => self.doc.set_root(id),
            Some(parent) => match self.doc.kind(parent) {
                ValueKind::Array => self.doc.append_item(parent, id),
                ValueKind::Object => {
                    let name = self.pending_names.pop().expect("object value with no pending member name");
                    self.doc.append_member(parent, &name, id)
                }
                _ => unreachable!("container stack holds only arrays and objects"),
            },
        }
    }
}

impl<'a> SaxHandler for DomHandler<'a> {
    type Error = DomError;

    fn on_begin_array(&mut self, _pos: TextPosition) -> Result<(), DomError> {
        let id = self.doc.create_array();
        self.attach(id)?;
        self.containers.push(id);
        Ok(())
    }

    fn on_end_array(&mut self, _count: usize, _pos: TextPosition) -> Result<(), DomError> {
        self.containers.pop();
        Ok(())
    }

    fn on_begin_object(&mut self, _pos: TextPosition) -> Result<(), DomError> {
        let id = self.doc.create_object();
        self.attach(id)?;
        self.containers.push(id);
        Ok(())
    }

    fn on_end_object(&mut self, _count: usize, _pos: TextPosition) -> Result<(), DomError> {
        self.containers.pop();
        Ok(())
    }

    fn on_member_name(&mut self, text: &WStr, _pos: TextPosition) -> Result<(), DomError> {
        self.pending_names.push(text.to_owned());
        Ok(())
    }

    fn on_literal(&mut self, kind: LiteralKind, _text: &WStr, _pos: TextPosition) -> Result<(), DomError> {
        let id = self.doc.create_literal_kind(kind);
        self.attach(id)
    }

    fn on_number(&mut self, kind: NumKind, text: &WStr, _pos: TextPosition) -> Result<(), DomError> {
        let id = self.doc.create_number(text, kind)?;
        self.attach(id)
    }

    fn on_string(&mut self, text: &WStr, _pos: TextPosition) -> Result<(), DomError> {
        let id = self.doc.create_string(text);
        self.attach(id)
    }

    fn textpos_changed(&mut self, _pos: TextPosition) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::NumSubtype;
    use tx_lexer::Lexer;
    use tx_parser::SaxParser;

    fn parse(s: &str) -> Document {
        let mut doc = Document::new();
        {
            let data: Vec<u16> = s.encode_utf16().collect();
            let lexer = Lexer::new(tx_io::TextReader::from_wide(data, "<memory>"));
            let handler = DomHandler::new(&mut doc);
            let mut parser = SaxParser::new(lexer, handler);
            parser.parse().unwrap();
        }
        doc
    }

    #[test]
    fn builds_document_tree_from_json_text() {
        let doc = parse(r#"{"a": [1, "x", true]}"#);
        let root = doc.root().unwrap();
        assert_eq!(doc.kind(root), ValueKind::Object);
        let arr = doc.find(root, &tx_core::WString::from_str("a")).unwrap().unwrap();
        assert_eq!(doc.kind(arr), ValueKind::Array);
        assert_eq!(doc.child_count(arr), 3);
    }

    #[test]
    fn scalar_document_root() {
        let doc = parse("42");
        let root = doc.root().unwrap();
        assert_eq!(doc.number(root).unwrap().1, NumSubtype::Int);
    }
}
