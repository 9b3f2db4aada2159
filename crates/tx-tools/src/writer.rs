//! DOM pretty-printer.

use crate::iter::DomIter;
use tx_core::WString;
use tx_dom::{Document, ValueKind};
use tx_parser::LiteralKind;

const QUOTE: u16 = 0x22;

fn literal_text(kind: LiteralKind) -> WString {
    match kind {
        LiteralKind::False => WString::from_str("false"),
        LiteralKind::True => WString::from_str("true"),
        LiteralKind::Null => WString::from_str("null"),
    }
}

/// Serialises a [`Document`] back to JSON text. `pretty_print` inserts a
/// newline and indentation before every value but the first; the closing
/// bracket of a container is appended at the point the iterator ascends past
/// it, with no indentation of its own.
pub struct DomWriter {
    pretty_print: bool,
}

impl DomWriter {
    pub fn new(pretty_print: bool) -> Self {
        Self { pretty_print }
    }

    pub fn write(&self, doc: &Document) -> WString {
        let mut out: Vec<u16> = Vec::new();
        let mut endings: Vec<(usize, u16)> = Vec::new();
        let mut iter = DomIter::new(doc);
        let mut first = true;

        while let Some(id) = iter.current() {
            let depth = iter.path().depth();
            while let Some(&(ending_depth, ch)) = endings.last() {
                if depth <= ending_depth {
                    out.push(ch);
                    endings.pop();
                } else {
                    break;
                }
            }

            if !first {
                if iter.has_prev_sibling() {
                    out.push(b',' as u16);
                }
                if self.pretty_print {
                    out.push(b'\n' as u16);
                    for _ in 0..depth.saturating_sub(1) {
                        out.push(b'\t' as u16);
                    }
                }
            }
            first = false;

            if let Some(parent) = doc.parent(id) {
                if doc.kind(parent) == ValueKind::Object {
                    let idx = *iter.path().components().last().expect("non-root value has a path component");
                    let name = doc.members(parent).expect("object parent has members").get(idx).expect("idx is this value's member position").name().clone();
                    out.push(QUOTE);
                    out.extend_from_slice(tx_lexer::to_escaped(&name).as_slice());
                    out.push(QUOTE);
                    out.push(b':' as u16);
                    if self.pretty_print {
                        out.push(b' ' as u16);
                    }
                }
            }

            match doc.kind(id) {
                ValueKind::Literal => out.extend_from_slice(literal_text(doc.literal(id).expect("kind is Literal")).as_slice()),
                ValueKind::Number => out.extend_from_slice(doc.number(id).expect("kind is Number").0.as_slice()),
                ValueKind::String => {
                    out.push(QUOTE);
                    out.extend_from_slice(tx_lexer::to_escaped(doc.string(id).expect("kind is String")).as_slice());
                    out.push(QUOTE);
                }
                ValueKind::Array => {
                    out.push(b'[' as u16);
                    if doc.child_count(id) == 0 {
                        out.push(b']' as u16);
                    } else {
                        endings.push((depth, b']' as u16));
                    }
                }
                ValueKind::Object => {
                    out.push(b'{' as u16);
                    if doc.child_count(id) == 0 {
                        out.push(b'}' as u16);
                    } else {
                        endings.push((depth, b'}' as u16));
                    }
                }
            }

            iter.advance();
        }

        while let Some((_, ch)) = endings.pop() {
            out.push(ch);
        }
        WString::from_vec(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_empty_containers_inline() {
        let mut doc = Document::new();
        let arr = doc.create_array();
        doc.set_root(arr).unwrap();
        assert_eq!(DomWriter::new(false).write(&doc).to_string_lossy(), "[]");
    }

    #[test]
    fn compact_nested_object() {
        let mut doc = Document::new();
        let obj = doc.create_object();
        let arr = doc.create_array();
        let one = doc.create_number_from_i64(1);
        let two = doc.create_number_from_i64(2);
        doc.append_item(arr, one).unwrap();
        doc.append_item(arr, two).unwrap();
        doc.append_member(obj, &WString::from_str("a"), arr).unwrap();
        doc.set_root(obj).unwrap();
        assert_eq!(DomWriter::new(false).write(&doc).to_string_lossy(), r#"{"a":[1,2]}"#);
    }

    #[test]
    fn pretty_print_adds_newlines_and_indent() {
        let mut doc = Document::new();
        let obj = doc.create_object();
        let s = doc.create_string(&WString::from_str("x"));
        doc.append_member(obj, &WString::from_str("k"), s).unwrap();
        doc.set_root(obj).unwrap();
        let text = DomWriter::new(true).write(&doc).to_string_lossy();
        assert_eq!(text, "{\n\t\"k\": \"x\"}");
    }

    #[test]
    fn strings_are_escaped() {
        let mut doc = Document::new();
        let s = doc.create_string(&WString::from_str("a\nb"));
        doc.set_root(s).unwrap();
        assert_eq!(DomWriter::new(false).write(&doc).to_string_lossy(), r#""a\nb""#);
    }

    #[test]
    fn scalar_root_writes_bare_value() {
        let mut doc = Document::new();
        let n = doc.create_number_from_i64(42);
        doc.set_root(n).unwrap();
        assert_eq!(DomWriter::new(false).write(&doc).to_string_lossy(), "42");
    }

    /// `["Hello", null, {"Str 1": "World", "Num 1": 123, "Arr 1": [],
    /// "Literal 1": false, "Arr 2": [456.78]}]`: top-level array elements get
    /// one tab, object members get two, and the nested non-empty array stays
    /// multi-line while the empty one collapses to `[]` on one line.
    #[test]
    fn pretty_print_mixed_document_matches_tab_depth_per_nesting_level() {
        let mut doc = Document::new();
        let root = doc.create_array();
        let hello = doc.create_string(&WString::from_str("Hello"));
        doc.append_item(root, hello).unwrap();
        let null = doc.create_literal(&WString::from_str("null")).unwrap();
        doc.append_item(root, null).unwrap();

        let obj = doc.create_object();
        let world = doc.create_string(&WString::from_str("World"));
        doc.append_member(obj, &WString::from_str("Str 1"), world).unwrap();
        let num = doc.create_number_from_i64(123);
        doc.append_member(obj, &WString::from_str("Num 1"), num).unwrap();
        let arr1 = doc.create_array();
        doc.append_member(obj, &WString::from_str("Arr 1"), arr1).unwrap();
        let lit1 = doc.create_literal(&WString::from_str("false")).unwrap();
        doc.append_member(obj, &WString::from_str("Literal 1"), lit1).unwrap();
        let arr2 = doc.create_array();
        let n = doc.create_number_from_f64(456.78);
        doc.append_item(arr2, n).unwrap();
        doc.append_member(obj, &WString::from_str("Arr 2"), arr2).unwrap();
        doc.append_item(root, obj).unwrap();

        doc.set_root(root).unwrap();

        let text = DomWriter::new(true).write(&doc).to_string_lossy();
        assert_eq!(
            text,
            "[\n\t\"Hello\",\n\tnull,\n\t{\n\t\t\"Str 1\": \"World\",\n\t\t\"Num 1\": 123,\n\t\t\"Arr 1\": [],\n\t\t\"Literal 1\": false,\n\t\t\"Arr 2\": [\n\t\t\t456.78]}]"
        );
    }
}
