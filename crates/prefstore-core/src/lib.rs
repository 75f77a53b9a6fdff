//! # prefstore core
//!
//! Pure primitives for prefstore: namespaces, entries, and scopes.
//!
//! This crate contains no I/O. It defines what a valid namespace and a valid
//! entry look like, so every backend agrees on the same addressing rules.
//!
//! ## Key Types
//!
//! - [`Namespace`] - Hierarchical identifier scoping a set of entries
//! - [`Entry`] - A single key/value pair
//! - [`Scope`] - Which preference tree (user or system) a store binds to
//!
//! ## Limits
//!
//! Keys, values and namespace segments are bounded; see [`entry`] and
//! [`namespace`] for the exact rules.

pub mod entry;
pub mod error;
pub mod namespace;
pub mod types;

pub use entry::{validate_key, validate_value, Entry, MAX_KEY_LENGTH, MAX_VALUE_LENGTH};
pub use error::{EntryError, NamespaceError};
pub use namespace::{Namespace, MAX_NAME_LENGTH};
pub use types::Scope;
