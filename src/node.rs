//! Trie nodes and the two child table backends.
//!
//! Nodes live in an arena owned by the [`Trie`](crate::trie::Trie) and refer to
//! their children by [`NodeId`]. Two slots holding the same id are aliases of
//! one node, which is how case-insensitive branches share their subtree.

use std::collections::BTreeMap;

// =============================================================================
// Node id
// =============================================================================

/// Index of a node in the trie arena.
///
/// `NodeId::NULL` marks an empty slot in dense child tables.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeId(u32);

impl NodeId {
    pub(crate) const ROOT: NodeId = NodeId(0);
    pub(crate) const NULL: NodeId = NodeId(u32::MAX);

    #[inline]
    pub(crate) fn new(index: usize) -> Self {
        debug_assert!(index < u32::MAX as usize, "node arena overflow");
        Self(index as u32)
    }

    #[inline]
    pub(crate) fn index(self) -> usize {
        debug_assert!(!self.is_null());
        self.0 as usize
    }

    #[inline]
    pub(crate) fn is_null(self) -> bool {
        self == Self::NULL
    }
}

// =============================================================================
// Child tables
// =============================================================================

/// Storage for the labelled child links of one node.
pub trait ChildTable: Default {
    /// Short name used in log output.
    const NAME: &'static str;

    /// Whether `c` can be stored as a child label.
    fn accepts(c: char) -> bool;

    /// The child linked under `c`, if any.
    fn child(&self, c: char) -> Option<NodeId>;

    /// Links `child` under `c`, replacing any previous link.
    ///
    /// Callers must only pass labels for which [`accepts`](Self::accepts) holds.
    fn set_child(&mut self, c: char, child: NodeId);

    /// All links in ascending label order. Aliased nodes appear once per slot.
    fn links(&self) -> Vec<(char, NodeId)>;

    /// Approximate heap bytes held by this table.
    fn heap_size(&self) -> usize;
}

/// First code point the dense backend stores (space).
pub const DENSE_FIRST: char = ' ';
/// Last code point the dense backend stores (tilde).
pub const DENSE_LAST: char = '~';
const DENSE_SLOTS: usize = DENSE_LAST as usize - DENSE_FIRST as usize + 1;

/// Fixed array of child slots over printable ASCII (32..=126).
///
/// The array is allocated on the first link, so leaf nodes cost one pointer.
#[derive(Clone, Debug, Default)]
pub struct DenseChildren {
    slots: Option<Box<[NodeId; DENSE_SLOTS]>>,
}

impl DenseChildren {
    #[inline]
    fn slot(c: char) -> usize {
        c as usize - DENSE_FIRST as usize
    }
}

impl ChildTable for DenseChildren {
    const NAME: &'static str = "dense";

    #[inline]
    fn accepts(c: char) -> bool {
        (DENSE_FIRST..=DENSE_LAST).contains(&c)
    }

    #[inline]
    fn child(&self, c: char) -> Option<NodeId> {
        if !Self::accepts(c) {
            return None;
        }
        let slots = self.slots.as_ref()?;
        let id = slots[Self::slot(c)];
        (!id.is_null()).then_some(id)
    }

    fn set_child(&mut self, c: char, child: NodeId) {
        debug_assert!(Self::accepts(c));
        let slots = self
            .slots
            .get_or_insert_with(|| Box::new([NodeId::NULL; DENSE_SLOTS]));
        slots[Self::slot(c)] = child;
    }

    fn links(&self) -> Vec<(char, NodeId)> {
        let Some(slots) = &self.slots else {
            return Vec::new();
        };
        (DENSE_FIRST..=DENSE_LAST)
            .zip(slots.iter())
            .filter(|(_, id)| !id.is_null())
            .map(|(c, id)| (c, *id))
            .collect()
    }

    fn heap_size(&self) -> usize {
        self.slots
            .as_ref()
            .map_or(0, |_| std::mem::size_of::<[NodeId; DENSE_SLOTS]>())
    }
}

/// Ordered map of child links keyed by any code point.
#[derive(Clone, Debug, Default)]
pub struct SparseChildren {
    links: BTreeMap<char, NodeId>,
}

impl ChildTable for SparseChildren {
    const NAME: &'static str = "sparse";

    #[inline]
    fn accepts(_c: char) -> bool {
        true
    }

    #[inline]
    fn child(&self, c: char) -> Option<NodeId> {
        self.links.get(&c).copied()
    }

    fn set_child(&mut self, c: char, child: NodeId) {
        self.links.insert(c, child);
    }

    fn links(&self) -> Vec<(char, NodeId)> {
        self.links.iter().map(|(c, id)| (*c, *id)).collect()
    }

    fn heap_size(&self) -> usize {
        // Rough per-entry cost of a BTreeMap leaf slot.
        self.links.len() * (std::mem::size_of::<char>() + std::mem::size_of::<NodeId>() + 8)
    }
}

// =============================================================================
// Node
// =============================================================================

/// One trie level: the value registered for the path that reaches it, plus its children.
#[derive(Clone, Debug)]
pub(crate) struct Node<V, C> {
    /// Number of code points consumed to reach this node from the root.
    pub depth: u32,
    pub value: Option<V>,
    pub children: C,
}

impl<V, C: ChildTable> Node<V, C> {
    pub(crate) fn new(depth: u32) -> Self {
        Self {
            depth,
            value: None,
            children: C::default(),
        }
    }
}
