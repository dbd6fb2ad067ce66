//! Append-only baseline that answers prefix queries with ordered-map probes.
//!
//! Each query probes the map once per prefix length of the input, so lookups
//! cost O(input length) map searches instead of one trie walk. It is useful as
//! a reference to compare [`PrefixMap`](crate::PrefixMap) against.

use std::collections::BTreeMap;

use crate::case_fold::CaseFolding;
use crate::code_points::CodePoints;
use crate::error::Result;
use crate::lookup::PrefixLookup;

/// Prefix lookup over a `BTreeMap` of canonical prefixes.
///
/// Supports `put` and the lookups only; `remove`, `clear` and `entries` report
/// [`UnsupportedOperation`](crate::PrefixMapError::UnsupportedOperation).
#[derive(Clone, Debug)]
pub struct ScanPrefixMap<V> {
    prefixes: BTreeMap<String, V>,
    folding: CaseFolding,
}

impl<V> ScanPrefixMap<V> {
    pub fn new(case_sensitive: bool) -> Self {
        Self {
            prefixes: BTreeMap::new(),
            folding: CaseFolding::new(case_sensitive),
        }
    }

    /// Byte offsets of every prefix of `input`, shortest first, starting with the empty prefix.
    fn prefix_ends(input: &str) -> impl DoubleEndedIterator<Item = usize> + '_ {
        std::iter::once(0).chain(input.char_indices().map(|(i, c)| i + c.len_utf8()))
    }

    fn canonical_input(&self, input: &str, offset: usize) -> Result<String> {
        let rest = CodePoints::from_offset(input, offset)?.remaining();
        Ok(self.folding.canonical_key(rest))
    }
}

impl<V> PrefixLookup<V> for ScanPrefixMap<V> {
    fn case_sensitive(&self) -> bool {
        self.folding.case_sensitive()
    }

    fn len(&self) -> usize {
        self.prefixes.len()
    }

    fn put(&mut self, prefix: &str, value: V) -> Result<Option<V>> {
        Ok(self
            .prefixes
            .insert(self.folding.canonical_key(prefix), value))
    }

    fn get(&self, prefix: &str) -> Option<&V> {
        self.prefixes.get(&self.folding.canonical_key(prefix))
    }

    fn shortest_match_from(&self, input: &str, offset: usize) -> Result<Option<&V>> {
        let input = self.canonical_input(input, offset)?;
        let found = Self::prefix_ends(&input).find_map(|end| self.prefixes.get(&input[..end]));
        Ok(found)
    }

    fn longest_match_from(&self, input: &str, offset: usize) -> Result<Option<&V>> {
        let input = self.canonical_input(input, offset)?;
        let found = Self::prefix_ends(&input)
            .rev()
            .find_map(|end| self.prefixes.get(&input[..end]));
        Ok(found)
    }
}
