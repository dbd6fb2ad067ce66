//! The prefix trie: an arena of nodes walked one code point per level.

use log::debug;

use crate::case_fold::CaseFolding;
use crate::code_points::CodePoints;
use crate::error::{PrefixMapError, Result};
use crate::iter::AllMatches;
use crate::node::{ChildTable, Node, NodeId};

/// Arena backed trie. Node 0 is the root and is never removed.
///
/// Children are always allocated after their parent, so a child's index is
/// larger than its parent's. [`Trie::compact`] relies on this.
#[derive(Clone, Debug)]
pub(crate) struct Trie<V, C> {
    nodes: Vec<Node<V, C>>,
    folding: CaseFolding,
}

impl<V, C: ChildTable> Trie<V, C> {
    pub(crate) fn new(case_sensitive: bool, initial_capacity: usize) -> Self {
        let mut nodes = Vec::with_capacity(initial_capacity.max(1));
        nodes.push(Node::new(0));
        Self {
            nodes,
            folding: CaseFolding::new(case_sensitive),
        }
    }

    #[inline]
    pub(crate) fn folding(&self) -> CaseFolding {
        self.folding
    }

    #[inline]
    pub(crate) fn node(&self, id: NodeId) -> &Node<V, C> {
        &self.nodes[id.index()]
    }

    #[inline]
    pub(crate) fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub(crate) fn heap_size(&self) -> usize {
        self.nodes.capacity() * std::mem::size_of::<Node<V, C>>()
            + self
                .nodes
                .iter()
                .map(|node| node.children.heap_size())
                .sum::<usize>()
    }

    /// Follows the link for `c` out of `id`.
    ///
    /// Case-insensitive tries retry with the folded slot, which covers case
    /// variants that were never written as an alias (titlecase letters, `'ς'`).
    #[inline]
    pub(crate) fn step(&self, id: NodeId, c: char) -> Option<NodeId> {
        let children = &self.node(id).children;
        children.child(c).or_else(|| {
            self.folding
                .lookup_fallback(c)
                .and_then(|folded| children.child(folded))
        })
    }

    /// Rejects `prefix` if the backend cannot store one of its characters.
    fn validate(prefix: &str) -> Result<()> {
        match prefix.chars().enumerate().find(|(_, c)| !C::accepts(*c)) {
            None => Ok(()),
            Some((position, character)) => {
                debug!(
                    "{} trie rejected {:?} at position {} of {:?}",
                    C::NAME,
                    character,
                    position,
                    prefix
                );
                Err(PrefixMapError::InvalidPrefixCharacter {
                    prefix: prefix.to_string(),
                    position,
                    character,
                })
            }
        }
    }

    fn alloc(&mut self, depth: u32) -> NodeId {
        let id = NodeId::new(self.nodes.len());
        self.nodes.push(Node::new(depth));
        id
    }

    /// Stores `value` for `prefix`, returning the node it landed on and the value it replaced.
    ///
    /// The whole prefix is validated before any node is created, so an
    /// unsupported character leaves the trie untouched.
    pub(crate) fn insert(&mut self, prefix: &str, value: V) -> Result<(NodeId, Option<V>)> {
        Self::validate(prefix)?;

        let mut current = NodeId::ROOT;
        for c in CodePoints::new(prefix) {
            let slots = self.folding.insert_slots(c);
            let child = match self.node(current).children.child(slots.canonical) {
                Some(child) => child,
                None => {
                    let depth = self.node(current).depth + 1;
                    let child = self.alloc(depth);
                    self.nodes[current.index()]
                        .children
                        .set_child(slots.canonical, child);
                    child
                }
            };
            if let Some(alias) = slots.alias {
                if C::accepts(alias) {
                    self.nodes[current.index()].children.set_child(alias, child);
                }
            }
            current = child;
        }

        Ok((current, self.nodes[current.index()].value.replace(value)))
    }

    /// Clears the value stored for `prefix`. Nodes are kept.
    pub(crate) fn remove(&mut self, prefix: &str) -> Result<Option<V>> {
        Self::validate(prefix)?;

        let mut current = NodeId::ROOT;
        for c in CodePoints::new(prefix) {
            let slot = self.folding.remove_slot(c);
            match self.node(current).children.child(slot) {
                Some(child) => current = child,
                None => return Ok(None),
            }
        }
        Ok(self.nodes[current.index()].value.take())
    }

    /// Value registered for exactly the code points of `input`.
    pub(crate) fn get(&self, input: CodePoints<'_>) -> Option<&V> {
        let mut current = NodeId::ROOT;
        for c in input {
            current = self.step(current, c)?;
        }
        self.node(current).value.as_ref()
    }

    /// Value of the shortest registered prefix of `input`.
    pub(crate) fn shortest_match(&self, input: CodePoints<'_>) -> Option<&V> {
        let mut current = NodeId::ROOT;
        let mut input = input;
        loop {
            let node = self.node(current);
            if node.value.is_some() {
                return node.value.as_ref();
            }
            let c = input.next()?;
            current = self.step(current, c)?;
        }
    }

    /// Value of the longest registered prefix of `input`.
    pub(crate) fn longest_match(&self, input: CodePoints<'_>) -> Option<&V> {
        let mut current = NodeId::ROOT;
        let mut best = self.node(current).value.as_ref();
        for c in input {
            match self.step(current, c) {
                Some(child) => current = child,
                None => break,
            }
            if let Some(value) = self.node(current).value.as_ref() {
                best = Some(value);
            }
        }
        best
    }

    pub(crate) fn all_matches<'a>(&'a self, input: CodePoints<'a>) -> AllMatches<'a, V, C> {
        AllMatches::new(self, NodeId::ROOT, input)
    }

    /// Drops every node below the root in one step.
    pub(crate) fn clear(&mut self) {
        self.nodes.truncate(1);
        self.nodes[NodeId::ROOT.index()] = Node::new(0);
    }

    /// Rebuilds the arena with only the nodes that hold a value or lead to one.
    ///
    /// Alias slots keep pointing at a single node. Returns the new id of every
    /// old node, `NodeId::NULL` for the ones that were dropped.
    pub(crate) fn compact(&mut self) -> Vec<NodeId> {
        let before = self.nodes.len();

        // Children have larger indices than their parents, so a reverse scan
        // sees every child before its parent.
        let mut live = vec![false; before];
        for index in (0..before).rev() {
            let node = &self.nodes[index];
            live[index] = index == NodeId::ROOT.index()
                || node.value.is_some()
                || node
                    .children
                    .links()
                    .iter()
                    .any(|(_, child)| live[child.index()]);
        }

        let mut remap = vec![NodeId::NULL; before];
        let mut next = 0usize;
        for (index, is_live) in live.iter().enumerate() {
            if *is_live {
                remap[index] = NodeId::new(next);
                next += 1;
            }
        }

        let old_nodes = std::mem::take(&mut self.nodes);
        let mut new_nodes = Vec::with_capacity(next);
        for (index, old) in old_nodes.into_iter().enumerate() {
            if !live[index] {
                continue;
            }
            let mut node: Node<V, C> = Node::new(old.depth);
            node.value = old.value;
            for (c, child) in old.children.links() {
                let mapped = remap[child.index()];
                if !mapped.is_null() {
                    node.children.set_child(c, mapped);
                }
            }
            new_nodes.push(node);
        }
        self.nodes = new_nodes;

        let dropped = before - self.nodes.len();
        debug!(
            "{} trie compacted: {} nodes dropped, {} kept",
            C::NAME,
            dropped,
            self.nodes.len()
        );
        remap
    }
}
