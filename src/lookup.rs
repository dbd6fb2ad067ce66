//! The capability surface shared by prefix map implementations.

use crate::error::{PrefixMapError, Result};

/// A map from string prefixes to values, queried with arbitrary input strings.
///
/// Retrieval is a `starts_with` check of the input against every stored
/// prefix, answered as the exact, shortest or longest matching prefix.
/// Implementations may match case sensitively or not; the choice is fixed
/// when they are built.
///
/// Only storing and matching are required. Mutation beyond `put` and the
/// enumeration of entries are optional capabilities: the provided methods fail
/// with [`PrefixMapError::UnsupportedOperation`] and implementations that
/// support them override the defaults.
pub trait PrefixLookup<V> {
    /// Whether `'a'` and `'A'` are different characters for this map.
    fn case_sensitive(&self) -> bool;

    /// Number of prefixes holding a value.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Stores `value` for `prefix`, returning the value it replaced.
    fn put(&mut self, prefix: &str, value: V) -> Result<Option<V>>;

    /// Stores every pair in order, stopping at the first failure.
    ///
    /// Pairs stored before the failing one are kept.
    fn put_all<I, K>(&mut self, entries: I) -> Result<()>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        Self: Sized,
    {
        for (prefix, value) in entries {
            self.put(prefix.as_ref(), value)?;
        }
        Ok(())
    }

    /// Value stored for exactly `prefix`.
    fn get(&self, prefix: &str) -> Option<&V>;

    fn contains_prefix(&self, prefix: &str) -> bool {
        self.get(prefix).is_some()
    }

    /// Value of the shortest stored prefix of `input[offset..]`, counted in code points.
    fn shortest_match_from(&self, input: &str, offset: usize) -> Result<Option<&V>>;

    fn shortest_match(&self, input: &str) -> Option<&V> {
        self.shortest_match_from(input, 0).ok().flatten()
    }

    /// Value of the longest stored prefix of `input[offset..]`, counted in code points.
    fn longest_match_from(&self, input: &str, offset: usize) -> Result<Option<&V>>;

    fn longest_match(&self, input: &str) -> Option<&V> {
        self.longest_match_from(input, 0).ok().flatten()
    }

    fn remove(&mut self, _prefix: &str) -> Result<Option<V>> {
        Err(PrefixMapError::UnsupportedOperation {
            operation: "remove",
        })
    }

    fn clear(&mut self) -> Result<()> {
        Err(PrefixMapError::UnsupportedOperation { operation: "clear" })
    }

    /// Stored prefixes in canonical form with their values, in key order.
    fn entries(&self) -> Result<Vec<(&str, &V)>> {
        Err(PrefixMapError::UnsupportedOperation {
            operation: "entries",
        })
    }
}
