//! # prefix-map
//!
//! Maps string prefixes to values and answers, for any input string, which
//! stored prefixes it starts with: the exact one, the shortest, the longest, or
//! all of them in order of length.
//!
//! A typical use is classifying identifiers such as device model numbers by
//! the best known prefix.
//!
//! ## Example
//!
//! ```rust
//! use prefix_map::StringPrefixMap;
//!
//! let mut brands: StringPrefixMap<&str> = StringPrefixMap::new(false);
//! brands.put("RM-", "Nokia").unwrap();
//! brands.put("GT-", "Samsung").unwrap();
//!
//! assert_eq!(brands.longest_match("gt-i8190N"), Some(&"Samsung"));
//! assert_eq!(brands.longest_match("Rm-1092"), Some(&"Nokia"));
//! assert_eq!(brands.longest_match("XT-1"), None);
//! ```
//!
//! ## Backends
//!
//! [`AsciiPrefixMap`] stores children in a fixed array over printable ASCII
//! (32..=126) and rejects other characters in stored prefixes.
//! [`StringPrefixMap`] stores children in an ordered map and accepts any
//! Unicode scalar value. Both match one code point per trie level.
//!
//! ## Case insensitivity
//!
//! A case-insensitive map links the folded and upper-case slot of every branch
//! to the same node, so `"gt-"`, `"GT-"` and `"Gt-"` are one prefix, and so
//! are `"σ"`, `"ς"` and `"Σ"`.

pub mod case_fold;
pub mod code_points;
pub mod error;
pub mod iter;
pub mod lookup;
pub mod node;
pub mod scan;
#[cfg(feature = "serde")]
mod serialization;
mod trie;

use std::collections::BTreeMap;
use std::fmt;

use log::{debug, trace};

pub use crate::code_points::CodePoints;
pub use crate::error::{PrefixMapError, Result};
pub use crate::iter::AllMatches;
pub use crate::lookup::PrefixLookup;
pub use crate::node::{ChildTable, DenseChildren, SparseChildren};
pub use crate::scan::ScanPrefixMap;

use crate::node::NodeId;
use crate::trie::Trie;

// =============================================================================
// Configuration
// =============================================================================

/// Construction options for a [`PrefixMap`].
#[derive(Debug, Clone)]
pub struct Config {
    /// Whether `'a'` and `'A'` are different characters. Fixed for the life of the map.
    pub case_sensitive: bool,
    /// Number of trie nodes to allocate up front.
    pub initial_capacity: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            case_sensitive: true,
            initial_capacity: 0,
        }
    }
}

// =============================================================================
// Prefix map
// =============================================================================

/// Prefix map accepting any Unicode prefix.
pub type StringPrefixMap<V> = PrefixMap<V, SparseChildren>;

/// Prefix map restricted to printable ASCII prefixes, with array child dispatch.
pub type AsciiPrefixMap<V> = PrefixMap<V, DenseChildren>;

/// Maps string prefixes to values.
///
/// `C` selects the child table backend, see [`StringPrefixMap`] and
/// [`AsciiPrefixMap`]. Values live in the trie; an ordered index from the
/// canonical prefix (case-folded when case-insensitive) to the trie node backs
/// enumeration and is updated together with the trie.
pub struct PrefixMap<V, C = SparseChildren> {
    trie: Trie<V, C>,
    len: usize,
    index: BTreeMap<String, NodeId>,
}

impl<V, C: ChildTable> PrefixMap<V, C> {
    pub fn new(case_sensitive: bool) -> Self {
        Self::with_config(Config {
            case_sensitive,
            ..Config::default()
        })
    }

    pub fn with_config(config: Config) -> Self {
        Self {
            trie: Trie::new(config.case_sensitive, config.initial_capacity),
            len: 0,
            index: BTreeMap::new(),
        }
    }

    /// Builds a map from `(prefix, value)` pairs, failing on the first prefix
    /// the backend cannot store.
    pub fn try_from_iter<I, K>(case_sensitive: bool, entries: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
    {
        let mut map = Self::new(case_sensitive);
        map.put_all(entries)?;
        Ok(map)
    }

    #[inline]
    pub fn case_sensitive(&self) -> bool {
        self.trie.folding().case_sensitive()
    }

    /// Number of prefixes holding a value.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Stores `value` for `prefix`, returning the value previously stored for it.
    ///
    /// Fails with [`PrefixMapError::InvalidPrefixCharacter`] if the backend
    /// cannot store a character of `prefix`; the map is then unchanged.
    pub fn put(&mut self, prefix: &str, value: V) -> Result<Option<V>> {
        let (node, previous) = self.trie.insert(prefix, value)?;
        if previous.is_none() {
            self.len += 1;
            self.index.insert(self.trie.folding().canonical_key(prefix), node);
        }
        trace!(
            "put {:?} ({} prefixes, {} replaced)",
            prefix,
            self.len,
            previous.is_some()
        );
        Ok(previous)
    }

    /// Stores every pair in order, stopping at the first failure.
    ///
    /// Pairs stored before the failing one are kept.
    pub fn put_all<I, K>(&mut self, entries: I) -> Result<()>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
    {
        for (prefix, value) in entries {
            self.put(prefix.as_ref(), value)?;
        }
        Ok(())
    }

    /// Removes the value stored for `prefix`.
    ///
    /// When case-insensitive this removes it for every case variant of `prefix`.
    pub fn remove(&mut self, prefix: &str) -> Result<Option<V>> {
        let removed = self.trie.remove(prefix)?;
        if removed.is_some() {
            self.len -= 1;
            self.index
                .remove(&self.trie.folding().canonical_key(prefix));
        }
        trace!(
            "remove {:?} ({} prefixes, found {})",
            prefix,
            self.len,
            removed.is_some()
        );
        Ok(removed)
    }

    /// Removes every prefix. The map stays usable with the same case sensitivity.
    pub fn clear(&mut self) {
        debug!("clearing {} prefixes from {} trie", self.len, C::NAME);
        self.trie.clear();
        self.index.clear();
        self.len = 0;
    }

    /// Value stored for exactly `prefix`.
    pub fn get(&self, prefix: &str) -> Option<&V> {
        self.trie.get(CodePoints::new(prefix))
    }

    /// Whether a value is stored for exactly `prefix`.
    pub fn contains_prefix(&self, prefix: &str) -> bool {
        self.get(prefix).is_some()
    }

    /// Value of the shortest stored prefix of `input`.
    pub fn shortest_match(&self, input: &str) -> Option<&V> {
        self.trie.shortest_match(CodePoints::new(input))
    }

    /// Like [`shortest_match`](Self::shortest_match) on `input` with the first
    /// `offset` code points skipped.
    pub fn shortest_match_from(&self, input: &str, offset: usize) -> Result<Option<&V>> {
        Ok(self
            .trie
            .shortest_match(CodePoints::from_offset(input, offset)?))
    }

    /// Value of the longest stored prefix of `input`.
    pub fn longest_match(&self, input: &str) -> Option<&V> {
        self.trie.longest_match(CodePoints::new(input))
    }

    /// Like [`longest_match`](Self::longest_match) on `input` with the first
    /// `offset` code points skipped.
    pub fn longest_match_from(&self, input: &str, offset: usize) -> Result<Option<&V>> {
        Ok(self
            .trie
            .longest_match(CodePoints::from_offset(input, offset)?))
    }

    /// Values of every stored prefix of `input`, shortest prefix first.
    pub fn all_matches<'a>(&'a self, input: &'a str) -> AllMatches<'a, V, C> {
        self.trie.all_matches(CodePoints::new(input))
    }

    pub fn all_matches_from<'a>(
        &'a self,
        input: &'a str,
        offset: usize,
    ) -> Result<AllMatches<'a, V, C>> {
        Ok(self
            .trie
            .all_matches(CodePoints::from_offset(input, offset)?))
    }

    /// Stored prefixes in canonical form with their values, in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> + '_ {
        self.index.iter().filter_map(|(key, node)| {
            self.trie
                .node(*node)
                .value
                .as_ref()
                .map(|value| (key.as_str(), value))
        })
    }

    /// Stored prefixes in canonical form, in order.
    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.iter().map(|(key, _)| key)
    }

    /// Stored values, ordered by their canonical prefix.
    pub fn values(&self) -> impl Iterator<Item = &V> + '_ {
        self.iter().map(|(_, value)| value)
    }

    /// Whether `key`, in canonical form, is a stored prefix.
    pub fn contains_key(&self, key: &str) -> bool {
        self.index
            .contains_key(&self.trie.folding().canonical_key(key))
    }

    pub fn contains_value(&self, value: &V) -> bool
    where
        V: PartialEq,
    {
        self.values().any(|stored| stored == value)
    }

    /// Number of trie nodes, including nodes left behind by removals.
    pub fn node_count(&self) -> usize {
        self.trie.node_count()
    }

    /// Approximate heap bytes used by the trie and the index.
    pub fn memory_usage(&self) -> usize {
        self.trie.heap_size()
            + self
                .index
                .keys()
                .map(|key| key.capacity() + std::mem::size_of::<(String, NodeId)>())
                .sum::<usize>()
    }

    /// Drops trie nodes that no longer lead to a value.
    ///
    /// Removal only clears values, so repeated removals leave dead branches
    /// behind. Returns the number of nodes dropped.
    pub fn compact(&mut self) -> usize {
        let before = self.trie.node_count();
        let remap = self.trie.compact();
        for node in self.index.values_mut() {
            *node = remap[node.index()];
        }
        before - self.trie.node_count()
    }
}

impl<V, C: ChildTable> Default for PrefixMap<V, C> {
    fn default() -> Self {
        Self::with_config(Config::default())
    }
}

impl<V: Clone, C: Clone> Clone for PrefixMap<V, C> {
    fn clone(&self) -> Self {
        Self {
            trie: self.trie.clone(),
            len: self.len,
            index: self.index.clone(),
        }
    }
}

impl<V: fmt::Debug, C: ChildTable> fmt::Debug for PrefixMap<V, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<V, C: ChildTable> PrefixLookup<V> for PrefixMap<V, C> {
    fn case_sensitive(&self) -> bool {
        PrefixMap::case_sensitive(self)
    }

    fn len(&self) -> usize {
        PrefixMap::len(self)
    }

    fn put(&mut self, prefix: &str, value: V) -> Result<Option<V>> {
        PrefixMap::put(self, prefix, value)
    }

    fn get(&self, prefix: &str) -> Option<&V> {
        PrefixMap::get(self, prefix)
    }

    fn shortest_match_from(&self, input: &str, offset: usize) -> Result<Option<&V>> {
        PrefixMap::shortest_match_from(self, input, offset)
    }

    fn longest_match_from(&self, input: &str, offset: usize) -> Result<Option<&V>> {
        PrefixMap::longest_match_from(self, input, offset)
    }

    fn remove(&mut self, prefix: &str) -> Result<Option<V>> {
        PrefixMap::remove(self, prefix)
    }

    fn clear(&mut self) -> Result<()> {
        PrefixMap::clear(self);
        Ok(())
    }

    fn entries(&self) -> Result<Vec<(&str, &V)>> {
        Ok(self.iter().collect())
    }
}


#[cfg(test)]
mod proptests;
