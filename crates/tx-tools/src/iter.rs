//! Pre-order depth-first DOM iterator. Values are referenced by [`ValueId`] (a
//! plain index) rather than by pointer, so there's no separate mutable
//! variant: the caller borrows the document mutably, if at all, only after
//! reading an id back out of the iterator, never while the iterator itself
//! holds it.

use tx_dom::{Document, DomPath, ValueId};

/// Advances in pre-order: descend into the first child if any exist,
/// otherwise ascend until an unvisited next sibling is found, or become
/// `end` (`current() == None`) if none exists anywhere up the chain.
pub struct DomIter<'a> {
    doc: &'a Document,
    current: Option<ValueId>,
    path: DomPath,
}

impl<'a> DomIter<'a> {
    pub fn new(doc: &'a Document) -> Self {
        let current = doc.root();
        let path = if current.is_some() { DomPath::root() } else { DomPath::cleared() };
        Self { doc, current, path }
    }

    pub fn current(&self) -> Option<ValueId> {
        self.current
    }

    pub fn path(&self) -> &DomPath {
        &self.path
    }

    pub fn has_prev_sibling(&self) -> bool {
        self.path.has_prev_sibling()
    }

    pub fn is_end(&self) -> bool {
        self.current.is_none()
    }

    pub fn advance(&mut self) {
        let Some(cur) = self.current else { return };
        if self.doc.child_count(cur) > 0 {
            let child = self.doc.nth_child(cur, 0).expect("child_count > 0 implies a child 0");
            self.current = Some(child);
            self.path.push(0);
            return;
        }
        let mut node = cur;
        loop {
            let Some(parent) = self.doc.parent(node) else {
                self.current = None;
                self.path = DomPath::cleared();
                return;
            };
            let idx = *self.path.components().last().expect("non-root node has a path component");
            let next_idx = idx + 1;
            if next_idx < self.doc.child_count(parent) {
                let sibling = self.doc.nth_child(parent, next_idx).expect("next_idx < child_count");
                self.current = Some(sibling);
                *self.path.last_mut().expect("just checked components is non-empty") = next_idx;
                return;
            }
            self.path.pop();
            node = parent;
        }
    }
}

impl<'a> Iterator for DomIter<'a> {
    type Item = ValueId;

    fn next(&mut self) -> Option<ValueId> {
        let cur = self.current?;
        self.advance();
        Some(cur)
    }
}

impl<'a> PartialEq for DomIter<'a> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.doc, other.doc) && self.current == other.current
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tx_core::WString;

    fn sample() -> Document {
        let mut doc = Document::new();
        let obj = doc.create_object();
        let arr = doc.create_array();
        let one = doc.create_number_from_i64(1);
        let two = doc.create_number_from_i64(2);
        doc.append_item(arr, one).unwrap();
        doc.append_item(arr, two).unwrap();
        doc.append_member(obj, &WString::from_str("a"), arr).unwrap();
        doc.set_root(obj).unwrap();
        doc
    }

    #[test]
    fn visits_every_value_in_pre_order() {
        let doc = sample();
        let visited: Vec<_> = DomIter::new(&doc).collect();
        assert_eq!(visited.len(), 4); // object, array, 1, 2
        assert_eq!(visited[0], doc.root().unwrap());
    }

    #[test]
    fn has_prev_sibling_tracks_second_child_onward() {
        let doc = sample();
        let mut iter = DomIter::new(&doc);
        assert!(!iter.has_prev_sibling()); // root
        iter.advance();
        assert!(!iter.has_prev_sibling()); // array, only member
        iter.advance();
        assert!(!iter.has_prev_sibling()); // first element
        iter.advance();
        assert!(iter.has_prev_sibling()); // second element
    }

    #[test]
    fn end_clears_path_and_current() {
        let doc = sample();
        let mut iter = DomIter::new(&doc);
        for _ in 0..4 {
            iter.advance();
        }
        assert!(iter.is_end());
        assert_eq!(iter.path().depth(), 0);
    }

    #[test]
    fn empty_document_is_immediately_end() {
        let doc = Document::new();
        assert!(DomIter::new(&doc).is_end());
    }
}
