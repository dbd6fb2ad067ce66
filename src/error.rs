//! Error type shared by every prefix map operation.

use std::fmt;

/// Error type for prefix map operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrefixMapError {
    /// An argument could not be used, e.g. a start offset past the end of the input.
    InvalidArgument {
        /// Human readable description of what was wrong.
        reason: String,
    },
    /// The dense backend only stores printable ASCII (32..=126).
    InvalidPrefixCharacter {
        /// The rejected prefix.
        prefix: String,
        /// Code point index of the offending character within `prefix`.
        position: usize,
        /// The offending character.
        character: char,
    },
    /// [`AllMatches::pull`](crate::AllMatches::pull) was called after the last match.
    IteratorExhausted,
    /// The implementation deliberately does not provide this operation.
    UnsupportedOperation {
        /// Name of the operation that was requested.
        operation: &'static str,
    },
}

impl PrefixMapError {
    pub(crate) fn invalid_argument(reason: impl Into<String>) -> Self {
        PrefixMapError::InvalidArgument {
            reason: reason.into(),
        }
    }
}

impl fmt::Display for PrefixMapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrefixMapError::InvalidArgument { reason } => write!(f, "invalid argument: {}", reason),
            PrefixMapError::InvalidPrefixCharacter {
                prefix,
                position,
                character,
            } => write!(
                f,
                "only readable ASCII is allowed as prefix: {:?} at position {} of {:?}",
                character, position, prefix
            ),
            PrefixMapError::IteratorExhausted => {
                write!(f, "no more matches: the iterator is exhausted")
            }
            PrefixMapError::UnsupportedOperation { operation } => {
                write!(f, "the '{}' operation is not supported", operation)
            }
        }
    }
}

impl std::error::Error for PrefixMapError {}

/// Result type for prefix map operations.
pub type Result<T> = std::result::Result<T, PrefixMapError>;
