//! Splits input strings into the code points the trie dispatches on.
//!
//! Matching is always one Unicode scalar value per trie level, so characters
//! outside the Basic Multilingual Plane (emoji, historic scripts) are a single
//! step and never split.

use std::str::Chars;

use crate::error::{PrefixMapError, Result};

/// Forward-only sequence of the code points of a string.
///
/// Restarting means building a new sequence from the same input.
#[derive(Clone, Debug)]
pub struct CodePoints<'a> {
    chars: Chars<'a>,
}

impl<'a> CodePoints<'a> {
    pub fn new(input: &'a str) -> Self {
        Self {
            chars: input.chars(),
        }
    }

    /// Starts the sequence `offset` code points into `input`.
    ///
    /// An offset equal to the number of code points yields an empty sequence;
    /// anything larger is an [`PrefixMapError::InvalidArgument`].
    pub fn from_offset(input: &'a str, offset: usize) -> Result<Self> {
        let mut chars = input.chars();
        for skipped in 0..offset {
            if chars.next().is_none() {
                return Err(PrefixMapError::invalid_argument(format!(
                    "start offset {} is past the end of a {} code point input",
                    offset, skipped
                )));
            }
        }
        Ok(Self { chars })
    }

    /// The part of the input that has not been consumed yet.
    #[inline]
    pub fn remaining(&self) -> &'a str {
        self.chars.as_str()
    }
}

impl Iterator for CodePoints<'_> {
    type Item = char;

    #[inline]
    fn next(&mut self) -> Option<char> {
        self.chars.next()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.chars.size_hint()
    }
}

impl std::iter::FusedIterator for CodePoints<'_> {}
