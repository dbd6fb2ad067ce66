//! Lazy iteration over every prefix of an input that carries a value.

use std::fmt;
use std::iter::FusedIterator;

use crate::code_points::CodePoints;
use crate::error::{PrefixMapError, Result};
use crate::node::{ChildTable, NodeId};
use crate::trie::Trie;

/// Values of all registered prefixes of an input, shortest prefix first.
///
/// Created by [`PrefixMap::all_matches`](crate::PrefixMap::all_matches). The
/// walk down the trie happens one match at a time: the next value is looked
/// up eagerly one step ahead so that [`has_next`](Self::has_next) is exact,
/// and nodes without a value are passed over without ending the sequence.
pub struct AllMatches<'a, V, C> {
    trie: &'a Trie<V, C>,
    /// Node whose value has not been examined yet, `NULL` once the path ended.
    node: NodeId,
    input: CodePoints<'a>,
    /// Look-ahead: the value the next pull returns.
    pending: Option<&'a V>,
}

impl<'a, V, C: ChildTable> AllMatches<'a, V, C> {
    pub(crate) fn new(trie: &'a Trie<V, C>, start: NodeId, input: CodePoints<'a>) -> Self {
        let mut iter = Self {
            trie,
            node: start,
            input,
            pending: None,
        };
        iter.pending = iter.advance();
        iter
    }

    /// Walks forward to the next node holding a value and returns it.
    fn advance(&mut self) -> Option<&'a V> {
        let trie = self.trie;
        while !self.node.is_null() {
            let current = self.node;
            self.node = match self.input.next() {
                Some(c) => trie.step(current, c).unwrap_or(NodeId::NULL),
                None => NodeId::NULL,
            };
            if let Some(value) = trie.node(current).value.as_ref() {
                return Some(value);
            }
        }
        None
    }

    /// Whether another match remains.
    #[inline]
    pub fn has_next(&self) -> bool {
        self.pending.is_some()
    }

    /// Returns the next match, failing with [`PrefixMapError::IteratorExhausted`]
    /// once every match has been returned.
    pub fn pull(&mut self) -> Result<&'a V> {
        self.next().ok_or(PrefixMapError::IteratorExhausted)
    }
}

impl<'a, V, C: ChildTable> Iterator for AllMatches<'a, V, C> {
    type Item = &'a V;

    fn next(&mut self) -> Option<&'a V> {
        let result = self.pending.take()?;
        self.pending = self.advance();
        Some(result)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.pending.is_none() {
            return (0, Some(0));
        }
        // One value per remaining code point at most, plus the pending one.
        let (_, upper) = self.input.size_hint();
        (1, upper.map(|n| n + 1))
    }
}

impl<V, C: ChildTable> FusedIterator for AllMatches<'_, V, C> {}

impl<V: fmt::Debug, C> fmt::Debug for AllMatches<'_, V, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AllMatches")
            .field("pending", &self.pending)
            .field("remaining", &self.input.remaining())
            .finish()
    }
}
