//! Error types for preference writes.
//!
//! Reads have no error type: they degrade to the caller's default.

use prefstore_core::EntryError;
use prefstore_store::StoreError;
use thiserror::Error;

/// A write that failed or could not be confirmed.
///
/// Every variant renders as a message fit to show a user.
#[derive(Debug, Error)]
pub enum WriteError {
    /// The key breaks the entry rules; nothing was written.
    #[error("invalid key {key:?}: {source}")]
    InvalidKey {
        key: String,
        #[source]
        source: EntryError,
    },

    /// The value breaks the entry rules; nothing was written.
    #[error("invalid value for key {key:?}: {source}")]
    InvalidValue {
        key: String,
        #[source]
        source: EntryError,
    },

    /// The backing medium refused or failed the write.
    #[error("cannot write to {identity}: {source}")]
    Store {
        identity: String,
        #[source]
        source: StoreError,
    },

    /// The write reported success but reading it back did not match.
    #[error("write of {key:?} to {identity} could not be confirmed: {reason}")]
    Unconfirmed {
        key: String,
        identity: String,
        reason: String,
    },
}

/// Result type for preference writes.
pub type Result<T> = std::result::Result<T, WriteError>;
