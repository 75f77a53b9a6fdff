//! # prefstore
//!
//! Small named settings that survive restarts, scoped to a namespace derived
//! from the application's identity.
//!
//! ## Overview
//!
//! A [`PreferenceStore`] is bound once to a [`Namespace`] and threaded through
//! to whatever needs settings. It offers:
//!
//! - **get** with a caller-supplied default, which never fails
//! - **put**, which reports a [`WriteError`] instead of failing the process
//! - **identity**, the resolved storage location for diagnostics
//!
//! plus `remove`, `keys`, `clear`, `child` and JSON [`Snapshot`] export/import.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use prefstore::{Namespace, PreferenceStore, StoreConfig};
//!
//! let ns = Namespace::from_package("org.example.sampleapp").unwrap();
//! let prefs = PreferenceStore::open(ns, &StoreConfig::default());
//!
//! println!("preferences at {}", prefs.identity());
//! let theme = prefs.get("theme", "light");
//!
//! if let Err(e) = prefs.put("theme", "dark") {
//!     eprintln!("could not save theme: {e}");
//! }
//! # let _ = theme;
//! ```
//!
//! ## Failure model
//!
//! - Reads degrade: a missing key and an unreadable medium both yield the
//!   default.
//! - Writes report: any failure to persist, or to confirm persistence, is a
//!   [`WriteError`] value. Other keys are never disturbed.
//!
//! ## Known limitation
//!
//! Some platforms accept unprivileged writes to machine-wide preferences and
//! quietly discard or redirect them. With [`StoreConfig::verify_writes`] on,
//! `put` reads the value back and reports a mismatch, which catches media
//! that drop writes. A layer that redirects both reads and writes to a private
//! copy looks successful from inside the process and cannot be detected, so a
//! successful `put` is not a guarantee of durability on such systems.
//!
//! ## Re-exports
//!
//! - `prefstore::core` - Namespaces, entries, scopes
//! - `prefstore::store` - Backends and storage locations

pub mod config;
pub mod error;
pub mod preferences;
pub mod snapshot;

pub use prefstore_core as core;
pub use prefstore_store as store;

pub use config::StoreConfig;
pub use error::WriteError;
pub use preferences::PreferenceStore;
pub use snapshot::Snapshot;

pub use prefstore_core::{Entry, EntryError, Namespace, NamespaceError, Scope};
pub use prefstore_store::{Backend, MemoryBackend, SqliteBackend, StoreError, StoreLocation};
