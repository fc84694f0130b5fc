extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use segment::Delimiters;
use x12_schema::{Decimal, SimpleDate, SimpleDateTime};

/// An owned, decoded field value — the tree's copy, independent of the input buffer.
#[derive(Debug, Clone, PartialEq)]
pub enum OwnedFieldValue {
    Null,
    Text(String),
    Decimal(Decimal),
    Date(SimpleDate),
    Time(String),
    DateTime(SimpleDateTime),
    Composite(Vec<OwnedFieldValue>),
}

impl OwnedFieldValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            OwnedFieldValue::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }
}

/// A decoded segment, owned by the document tree.
#[derive(Debug, Clone, PartialEq)]
pub struct OwnedSegment {
    pub name: String,
    pub fields: Vec<OwnedFieldValue>,
    /// 1-based position within the interchange, for diagnostics.
    pub index: usize,
}

impl OwnedSegment {
    pub fn field(&self, i: usize) -> &OwnedFieldValue {
        self.fields.get(i).unwrap_or(&OwnedFieldValue::Null)
    }
}

/// Index into a [`DocumentTree`]'s loop arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct LoopId(pub usize);

#[derive(Debug, Clone)]
pub struct LoopNodeData {
    pub loop_id: &'static str,
    pub parent: Option<LoopId>,
    pub segments: Vec<OwnedSegment>,
    pub children: Vec<LoopId>,
}

/// The document tree: an arena of loop nodes plus the fixed envelope shape
/// `{ header, <top-level loop>+, footer }`.
#[derive(Debug, Clone, Default)]
pub struct DocumentTree {
    arena: Vec<LoopNodeData>,
    pub header: Vec<OwnedSegment>,
    pub footer: Vec<OwnedSegment>,
    pub top_level: Vec<LoopId>,
    /// Delimiters discovered from the source interchange's `ISA` header;
    /// `serialize` emits against these unless overridden (§3: a segment
    /// self-serializes using the delimiters in effect when it was produced).
    pub delimiters: Delimiters,
}

impl DocumentTree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new loop node, attached under `parent` (or a root if `None`).
    pub fn create_loop(&mut self, loop_id: &'static str, parent: Option<LoopId>) -> LoopId {
        let id = LoopId(self.arena.len());
        self.arena.push(LoopNodeData {
            loop_id,
            parent,
            segments: Vec::new(),
            children: Vec::new(),
        });
        match parent {
            Some(p) => self.arena[p.0].children.push(id),
            None => self.top_level.push(id),
        }
        id
    }

    pub fn node(&self, id: LoopId) -> &LoopNodeData {
        &self.arena[id.0]
    }

    pub fn node_mut(&mut self, id: LoopId) -> &mut LoopNodeData {
        &mut self.arena[id.0]
    }

    pub fn append_segment(&mut self, loop_id: LoopId, segment: OwnedSegment) {
        self.arena[loop_id.0].segments.push(segment);
    }

    pub fn children(&self, id: LoopId) -> &[LoopId] {
        &self.arena[id.0].children
    }

    pub fn parent(&self, id: LoopId) -> Option<LoopId> {
        self.arena[id.0].parent
    }

    /// Walk from `id` up to (and including) the first ancestor (or `id`
    /// itself) whose loop id starts with `prefix`.
    pub fn nearest_with_prefix(&self, id: LoopId, prefix: &str) -> Option<LoopId> {
        let mut cur = Some(id);
        while let Some(c) = cur {
            if self.node(c).loop_id.starts_with(prefix) {
                return Some(c);
            }
            cur = self.parent(c);
        }
        None
    }

    pub fn walk_preorder(&self) -> PreorderIter<'_> {
        PreorderIter {
            tree: self,
            stack: self.top_level.iter().rev().copied().collect(),
        }
    }
}

/// Pre-order walk of the whole tree, document order (each loop's segments
/// then its child loops, in insertion order).
pub struct PreorderIter<'a> {
    tree: &'a DocumentTree,
    stack: Vec<LoopId>,
}

impl<'a> Iterator for PreorderIter<'a> {
    type Item = LoopId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        let children = self.tree.children(id);
        for child in children.iter().rev() {
            self.stack.push(*child);
        }
        Some(id)
    }
}
