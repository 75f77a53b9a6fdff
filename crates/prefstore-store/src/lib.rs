//! # prefstore store
//!
//! Persistence backends for prefstore. Provides a trait-based interface for
//! namespaced key/value storage with SQLite and in-memory implementations.
//!
//! ## Overview
//!
//! The [`Backend`] trait is the only thing the facade needs: read, write and
//! remove single entries, list and clear one namespace. All calls are
//! synchronous and blocking; preference I/O is small and short.
//!
//! ## Key Types
//!
//! - [`Backend`] - The storage interface
//! - [`SqliteBackend`] - Durable storage in a single SQLite file per root
//! - [`MemoryBackend`] - In-memory storage for tests, with fault injection
//! - [`StoreLocation`] - Where a scope's database lives on this host
//!
//! ## Usage
//!
//! ```rust,no_run
//! use prefstore_core::Namespace;
//! use prefstore_store::{Backend, SqliteBackend};
//!
//! let backend = SqliteBackend::new("/tmp/prefs/prefs.db");
//! let ns = Namespace::from_package("org.example.sampleapp").unwrap();
//!
//! backend.write(&ns, "sample-key", "sample-val").unwrap();
//! assert_eq!(
//!     backend.read(&ns, "sample-key").unwrap().as_deref(),
//!     Some("sample-val")
//! );
//! ```
//!
//! ## Design Notes
//!
//! - **Lazy open**: constructing a backend never touches the disk
//! - **Missing medium reads as empty**: a database that does not exist yet
//!   holds no entries
//! - **Namespace isolation**: entries are keyed by (absolute path, key)

pub mod error;
pub mod location;
pub mod memory;
pub mod migration;
pub mod sqlite;
pub mod traits;

pub use error::{Result, StoreError};
pub use location::{StoreLocation, DATABASE_FILE, SYSTEM_ROOT_ENV, USER_ROOT_ENV};
pub use memory::MemoryBackend;
pub use sqlite::SqliteBackend;
pub use traits::Backend;
