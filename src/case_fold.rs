//! Case folding used by case-insensitive tries.
//!
//! A case-insensitive branch stores its child once, under the folded code
//! point (see [`fold`]), and writes the same [`NodeId`](crate::node::NodeId)
//! into the upper-case slot. Both slots then resolve to one node, so a value
//! written or removed through either case variant is seen through the other.
//!
//! Only single code point mappings are used. When Unicode maps a character to
//! several code points (`'ß'` upper-cases to `"SS"`), the character folds to
//! itself.

/// Lower-case variant of `c`, or `c` itself if there is no single code point mapping.
#[inline]
pub fn lower(c: char) -> char {
    if c.is_ascii() {
        return c.to_ascii_lowercase();
    }
    single(c.to_lowercase()).unwrap_or(c)
}

/// Upper-case variant of `c`, or `c` itself if there is no single code point mapping.
#[inline]
pub fn upper(c: char) -> char {
    if c.is_ascii() {
        return c.to_ascii_uppercase();
    }
    single(c.to_uppercase()).unwrap_or(c)
}

/// Simple case fold: `lower(upper(c))`.
///
/// Letters whose lower-case forms share one upper-case form fold together:
/// `'σ'`, `'ς'` and `'Σ'` all fold to `'σ'`, the Kelvin sign folds to `'k'`.
#[inline]
pub fn fold(c: char) -> char {
    if c.is_ascii() {
        return c.to_ascii_lowercase();
    }
    lower(upper(c))
}

#[inline]
fn single(mut mapped: impl Iterator<Item = char>) -> Option<char> {
    let first = mapped.next()?;
    match mapped.next() {
        None => Some(first),
        Some(_) => None,
    }
}

/// Slots a code point is written to on insert.
///
/// The first slot owns the child; the second, when present, aliases it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct InsertSlots {
    pub canonical: char,
    pub alias: Option<char>,
}

/// How a trie maps input code points onto child slots.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct CaseFolding {
    case_sensitive: bool,
}

impl CaseFolding {
    pub(crate) fn new(case_sensitive: bool) -> Self {
        Self { case_sensitive }
    }

    #[inline]
    pub(crate) fn case_sensitive(self) -> bool {
        self.case_sensitive
    }

    /// Slots for `c` on insert. The alias is omitted when it equals the canonical slot.
    #[inline]
    pub(crate) fn insert_slots(self, c: char) -> InsertSlots {
        if self.case_sensitive {
            return InsertSlots {
                canonical: c,
                alias: None,
            };
        }
        let canonical = fold(c);
        let alias = upper(canonical);
        InsertSlots {
            canonical,
            alias: (alias != canonical && fold(alias) == canonical).then_some(alias),
        }
    }

    /// The single slot followed on removal.
    #[inline]
    pub(crate) fn remove_slot(self, c: char) -> char {
        if self.case_sensitive {
            c
        } else {
            fold(c)
        }
    }

    /// Slot to retry when a lookup on the raw code point finds nothing.
    #[inline]
    pub(crate) fn lookup_fallback(self, c: char) -> Option<char> {
        if self.case_sensitive {
            return None;
        }
        let folded = fold(c);
        (folded != c).then_some(folded)
    }

    /// Canonical form of a whole prefix, as used for the enumeration index.
    pub(crate) fn canonical_key(self, prefix: &str) -> String {
        if self.case_sensitive {
            prefix.to_string()
        } else {
            prefix.chars().map(fold).collect()
        }
    }
}
