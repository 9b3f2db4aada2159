//! Lock-step DOM comparison: walks two documents in parallel and reports
//! where they diverge.

use crate::iter::DomIter;
use tx_core::bom::equal_ci;
use tx_core::WString;
use tx_dom::{Document, DomPath, ValueKind};
use tx_parser::LiteralKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiffKind {
    Type,
    Path,
    Count,
    MemberName,
    Value,
    NumtypeDiff,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffItem {
    pub kind: DiffKind,
    pub path_a: DomPath,
    pub path_b: DomPath,
    pub detail: String,
}

#[derive(Debug, Clone, Copy)]
pub struct DiffOptions {
    pub case_sensitive: bool,
    pub compare_all: bool,
}

impl Default for DiffOptions {
    fn default() -> Self {
        Self { case_sensitive: true, compare_all: false }
    }
}

fn is_container(kind: ValueKind) -> bool {
    matches!(kind, ValueKind::Array | ValueKind::Object)
}

fn literal_text(kind: LiteralKind) -> WString {
    match kind {
        LiteralKind::False => WString::from_str("false"),
        LiteralKind::True => WString::from_str("true"),
        LiteralKind::Null => WString::from_str("null"),
    }
}

fn value_text(doc: &Document, id: tx_dom::ValueId) -> Option<WString> {
    match doc.kind(id) {
        ValueKind::Literal => Some(literal_text(doc.literal(id).expect("kind is Literal"))),
        ValueKind::Number => Some(doc.number(id).expect("kind is Number").0.clone()),
        ValueKind::String => Some(doc.string(id).expect("kind is String").clone()),
        ValueKind::Array | ValueKind::Object => None,
    }
}

fn texts_equal(a: &WString, b: &WString, case_sensitive: bool) -> bool {
    if case_sensitive {
        a == b
    } else {
        equal_ci(a, b)
    }
}

/// Compares two documents value-by-value in the order the DOM iterator
/// visits them. Stops descending into a pair once either document runs out
/// of values; a length mismatch surfaces as the preceding `path`/`count` diff.
pub fn diff(a: &Document, b: &Document, options: &DiffOptions) -> Vec<DiffItem> {
    let mut out = Vec::new();
    let mut ia = DomIter::new(a);
    let mut ib = DomIter::new(b);

    while let (Some(va), Some(vb)) = (ia.current(), ib.current()) {
        let mut pair = Vec::new();
        let mut stop = false;

        let kind_a = a.kind(va);
        let kind_b = b.kind(vb);
        if kind_a != kind_b {
            pair.push(DiffItem {
                kind: DiffKind::Type,
                path_a: ia.path().clone(),
                path_b: ib.path().clone(),
                detail: format!("{kind_a:?} vs {kind_b:?}"),
            });
            stop = !options.compare_all;
        }

        if !stop && ia.path() != ib.path() {
            pair.push(DiffItem {
                kind: DiffKind::Path,
                path_a: ia.path().clone(),
                path_b: ib.path().clone(),
                detail: format!("{} vs {}", ia.path(), ib.path()),
            });
            stop = !options.compare_all;
        }

        if !stop && is_container(kind_a) && is_container(kind_b) {
            let count_a = a.child_count(va);
            let count_b = b.child_count(vb);
            if count_a != count_b {
                pair.push(DiffItem {
                    kind: DiffKind::Count,
                    path_a: ia.path().clone(),
                    path_b: ib.path().clone(),
                    detail: format!("{count_a} vs {count_b} children"),
                });
                stop = !options.compare_all;
            }
        }

        if !stop {
            if let (Some(pa), Some(pb)) = (a.parent(va), b.parent(vb)) {
                if a.kind(pa) == ValueKind::Object && b.kind(pb) == ValueKind::Object {
                    let idx_a = *ia.path().components().last().expect("non-root value has a path component");
                    let idx_b = *ib.path().components().last().expect("non-root value has a path component");
                    let name_a = a.members(pa).expect("object parent").get(idx_a).expect("idx is this value's position").name();
                    let name_b = b.members(pb).expect("object parent").get(idx_b).expect("idx is this value's position").name();
                    if !texts_equal(name_a, name_b, options.case_sensitive) {
                        pair.push(DiffItem {
                            kind: DiffKind::MemberName,
                            path_a: ia.path().clone(),
                            path_b: ib.path().clone(),
                            detail: format!("{} vs {}", name_a.to_string_lossy(), name_b.to_string_lossy()),
                        });
                        stop = !options.compare_all;
                    }
                }
            }
        }

        if !stop && kind_a == ValueKind::Number && kind_b == ValueKind::Number {
            let subtype_a = a.number(va).expect("kind is Number").1;
            let subtype_b = b.number(vb).expect("kind is Number").1;
            if subtype_a != subtype_b {
                pair.push(DiffItem {
                    kind: DiffKind::NumtypeDiff,
                    path_a: ia.path().clone(),
                    path_b: ib.path().clone(),
                    detail: format!("{subtype_a:?} vs {subtype_b:?}"),
                });
                stop = !options.compare_all;
            }
        }

        if !stop {
            if let (Some(ta), Some(tb)) = (value_text(a, va), value_text(b, vb)) {
                if !texts_equal(&ta, &tb, options.case_sensitive) {
                    pair.push(DiffItem {
                        kind: DiffKind::Value,
                        path_a: ia.path().clone(),
                        path_b: ib.path().clone(),
                        detail: format!("{} vs {}", ta.to_string_lossy(), tb.to_string_lossy()),
                    });
                }
            }
        }

        out.extend(pair);
        ia.advance();
        ib.advance();
    }

    out
}
