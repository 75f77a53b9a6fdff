//! Error types for prefstore core.

use thiserror::Error;

/// Errors raised while building a [`Namespace`](crate::Namespace).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NamespaceError {
    #[error("namespace must have at least one segment")]
    Empty,

    #[error("invalid namespace segment {segment:?}: {reason}")]
    InvalidSegment { segment: String, reason: &'static str },
}

/// Errors raised when a key or value breaks the entry rules.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EntryError {
    #[error("key must not be empty")]
    EmptyKey,

    #[error("key is {len} characters long, maximum is {max}")]
    KeyTooLong { len: usize, max: usize },

    #[error("value is {len} characters long, maximum is {max}")]
    ValueTooLong { len: usize, max: usize },

    #[error("{0} contains a NUL character")]
    ContainsNul(&'static str),
}
