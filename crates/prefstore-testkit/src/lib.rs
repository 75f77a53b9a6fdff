//! # prefstore testkit
//!
//! Testing utilities for prefstore.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Fixtures**: temp-dir backed stores, simulated restarts, and media
//!   that refuse or drop writes
//! - **Generators**: Proptest strategies for namespaces, keys and values
//!
//! ## Test Fixtures
//!
//! ```rust
//! use prefstore_testkit::fixtures::TestFixture;
//!
//! let fixture = TestFixture::new();
//! let prefs = fixture.store("org.example.sampleapp");
//! prefs.put("sample-key", "sample-val").unwrap();
//!
//! // A fresh backend on the same file, as after a process restart.
//! let prefs = fixture.restart("org.example.sampleapp");
//! assert_eq!(prefs.get("sample-key", ""), "sample-val");
//! ```
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use prefstore_testkit::generators::{key, value};
//!
//! proptest! {
//!     #[test]
//!     fn round_trip(k in key(), v in value()) {
//!         let prefs = prefstore_testkit::fixtures::memory_store("org.example");
//!         prefs.put(&k, &v).unwrap();
//!         prop_assert_eq!(prefs.get(&k, ""), v);
//!     }
//! }
//! ```

pub mod fixtures;
pub mod generators;

pub use fixtures::{
    dropping_store, memory_store, namespace, read_only_store, TestFixture, UnwritableFixture,
};
pub use generators::{distinct_namespaces, entries, key, namespace_segments, value};
