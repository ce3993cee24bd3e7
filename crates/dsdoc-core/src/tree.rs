//! The linked document tree
//!
//! Records live in an arena indexed by [`RecordId`]. Parent and child edges
//! are ids into that arena, so the tree owns every record exactly once and
//! child order is the order in which links were made.

use std::collections::HashMap;
use std::fmt;
use std::ops::Deref;

use crate::record::DocumentRecord;

/// Index of a record in its registry or tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordId(pub(crate) usize);

impl RecordId {
    /// The synthetic root is always registered first
    pub const ROOT: RecordId = RecordId(0);

    /// Position of the record in registration order
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

/// Arena slot shared by the registry and the finished tree
#[derive(Debug, Clone)]
pub(crate) struct Node {
    pub(crate) record: DocumentRecord,
    pub(crate) parent: Option<RecordId>,
    pub(crate) children: Vec<RecordId>,
}

impl Node {
    pub(crate) fn new(record: DocumentRecord) -> Self {
        Self {
            record,
            parent: None,
            children: Vec::new(),
        }
    }
}

/// A fully linked tree of records rooted at `root`
///
/// Produced by [`Registry::finalize`](crate::Registry::finalize); every
/// record in it reaches the root through its parent chain.
#[derive(Debug, Clone)]
pub struct DocumentTree {
    nodes: Vec<Node>,
    index: HashMap<String, RecordId>,
}

impl DocumentTree {
    pub(crate) fn new(nodes: Vec<Node>, index: HashMap<String, RecordId>) -> Self {
        Self { nodes, index }
    }

    /// The synthetic root record
    #[must_use]
    pub fn root(&self) -> NodeRef<'_> {
        self.node(RecordId::ROOT)
    }

    /// Look up a record by identity key
    #[must_use]
    pub fn get(&self, key: &str) -> Option<NodeRef<'_>> {
        self.index.get(key).map(|&id| self.node(id))
    }

    /// Look up a record by id
    #[must_use]
    pub fn node(&self, id: RecordId) -> NodeRef<'_> {
        NodeRef { tree: self, id }
    }

    /// Number of records, root included
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Always false: the root is present in every tree
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All records in registration order, root first
    pub fn iter(&self) -> impl Iterator<Item = NodeRef<'_>> {
        (0..self.nodes.len()).map(move |i| self.node(RecordId(i)))
    }
}

/// A borrowed handle to one record in a [`DocumentTree`]
///
/// Dereferences to the [`DocumentRecord`].
#[derive(Clone, Copy)]
pub struct NodeRef<'t> {
    tree: &'t DocumentTree,
    id: RecordId,
}

impl<'t> NodeRef<'t> {
    #[must_use]
    pub fn id(&self) -> RecordId {
        self.id
    }

    #[must_use]
    pub fn record(&self) -> &'t DocumentRecord {
        &self.tree.nodes[self.id.0].record
    }

    /// The parent record, `None` for the root
    #[must_use]
    pub fn parent(&self) -> Option<NodeRef<'t>> {
        let tree = self.tree;
        tree.nodes[self.id.0].parent.map(|id| tree.node(id))
    }

    /// Child records in link order
    pub fn children(&self) -> impl ExactSizeIterator<Item = NodeRef<'t>> + 't {
        let tree = self.tree;
        tree.nodes[self.id.0]
            .children
            .iter()
            .map(move |&id| tree.node(id))
    }

    #[must_use]
    pub fn has_children(&self) -> bool {
        !self.tree.nodes[self.id.0].children.is_empty()
    }

    /// Number of edges between this record and the root
    #[must_use]
    pub fn depth(&self) -> usize {
        std::iter::successors(self.parent(), NodeRef::parent).count()
    }
}

impl Deref for NodeRef<'_> {
    type Target = DocumentRecord;

    fn deref(&self) -> &Self::Target {
        self.record()
    }
}

impl fmt::Debug for NodeRef<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRef")
            .field("id", &self.id)
            .field("key", &self.record().identity_key)
            .finish()
    }
}

impl PartialEq for NodeRef<'_> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.tree, other.tree) && self.id == other.id
    }
}

impl Eq for NodeRef<'_> {}
