//! The PreferenceStore: a namespace bound to a backing medium.
//!
//! Construction never fails and performs no I/O. Every later call is
//! independent: reads degrade to the caller's default, writes report a
//! [`WriteError`]. Nothing is cached in process, so two handles on the same
//! medium always agree.

use std::fmt;
use std::sync::Arc;

use tracing::{debug, warn};

use prefstore_core::{validate_key, validate_value, Entry, Namespace, NamespaceError};
use prefstore_store::{Backend, SqliteBackend, StoreError};

use crate::config::StoreConfig;
use crate::error::{Result, WriteError};
use crate::snapshot::Snapshot;

/// Handle for reading and writing the preferences of one namespace.
///
/// Cheap to clone; clones share the backend.
pub struct PreferenceStore<B: Backend = SqliteBackend> {
    namespace: Namespace,
    backend: Arc<B>,
    verify_writes: bool,
}

impl<B: Backend> Clone for PreferenceStore<B> {
    fn clone(&self) -> Self {
        Self {
            namespace: self.namespace.clone(),
            backend: Arc::clone(&self.backend),
            verify_writes: self.verify_writes,
        }
    }
}

impl<B: Backend> fmt::Debug for PreferenceStore<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PreferenceStore")
            .field("identity", &self.identity())
            .field("verify_writes", &self.verify_writes)
            .finish()
    }
}

impl PreferenceStore<SqliteBackend> {
    /// Bind to the SQLite database the configuration resolves to.
    ///
    /// Performs no I/O; an unwritable location only shows up on write.
    pub fn open(namespace: Namespace, config: &StoreConfig) -> Self {
        let location = config.location();
        debug!(%namespace, location = %location, "binding preference store");
        Self::with_backend(namespace, location.backend(), config)
    }
}

impl<B: Backend> PreferenceStore<B> {
    /// Bind to an explicit backend.
    pub fn with_backend(namespace: Namespace, backend: B, config: &StoreConfig) -> Self {
        Self::with_shared_backend(namespace, Arc::new(backend), config)
    }

    /// Bind to a backend shared with other stores.
    pub fn with_shared_backend(
        namespace: Namespace,
        backend: Arc<B>,
        config: &StoreConfig,
    ) -> Self {
        Self {
            namespace,
            backend,
            verify_writes: config.verify_writes,
        }
    }

    /// The namespace this store is bound to.
    pub fn namespace(&self) -> &Namespace {
        &self.namespace
    }

    /// The backend this store writes through.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Stable, human-readable storage location, for display only.
    ///
    /// Format: `<backend location>#<absolute namespace path>`.
    pub fn identity(&self) -> String {
        format!("{}#{}", self.backend.location(), self.namespace.absolute_path())
    }

    /// The stored value for `key`, or `default`.
    ///
    /// A missing key, an invalid key, and an unreadable medium all yield
    /// `default`; callers cannot tell them apart.
    pub fn get(&self, key: &str, default: &str) -> String {
        if let Err(e) = validate_key(key) {
            debug!(key, error = %e, "invalid key, using default");
            return default.to_string();
        }
        match self.backend.read(&self.namespace, key) {
            Ok(Some(value)) => value,
            Ok(None) => default.to_string(),
            Err(e) => {
                warn!(identity = %self.identity(), key, error = %e, "preference read degraded to default");
                default.to_string()
            }
        }
    }

    /// Persist `value` under `key`, replacing any previous value.
    ///
    /// On success a later `get`, in this process or after a restart, returns
    /// `value`. On failure nothing else in the namespace is touched.
    ///
    /// # Known limitation
    ///
    /// Some platforms report success for unprivileged writes they never
    /// persist. Read-back confirmation (on by default) catches media that
    /// drop such writes, but not layers that redirect reads as well, so
    /// success is not a durability guarantee there.
    pub fn put(&self, key: &str, value: &str) -> Result<()> {
        let entry = checked_entry(key, value)?;

        if self.verify_writes {
            self.write_confirmed(std::slice::from_ref(&entry))?;
        } else {
            self.backend
                .write(&self.namespace, key, value)
                .map_err(|e| self.store_error(e))?;
        }

        debug!(identity = %self.identity(), key, "preference written");
        Ok(())
    }

    /// Delete `key`. Deleting an absent key succeeds.
    pub fn remove(&self, key: &str) -> Result<()> {
        validate_key(key).map_err(|source| WriteError::InvalidKey {
            key: key.to_string(),
            source,
        })?;
        self.backend
            .remove(&self.namespace, key)
            .map_err(|e| self.store_error(e))
    }

    /// Keys stored in this namespace, sorted. Empty if the medium is unreadable.
    pub fn keys(&self) -> Vec<String> {
        self.backend.keys(&self.namespace).unwrap_or_else(|e| {
            warn!(identity = %self.identity(), error = %e, "listing keys degraded to empty");
            Vec::new()
        })
    }

    /// Delete every entry in this namespace, and only this namespace.
    pub fn clear(&self) -> Result<()> {
        self.backend
            .clear(&self.namespace)
            .map_err(|e| self.store_error(e))
    }

    /// A store for the child namespace `segment`, sharing this backend.
    pub fn child(&self, segment: &str) -> std::result::Result<Self, NamespaceError> {
        Ok(Self {
            namespace: self.namespace.child(segment)?,
            backend: Arc::clone(&self.backend),
            verify_writes: self.verify_writes,
        })
    }

    /// Everything currently readable in this namespace.
    ///
    /// Degrades like [`keys`](Self::keys): unreadable entries are left out.
    pub fn snapshot(&self) -> Snapshot {
        let mut snapshot = Snapshot::new(self.namespace.clone());
        for key in self.keys() {
            match self.backend.read(&self.namespace, &key) {
                Ok(Some(value)) => {
                    snapshot.entries.insert(key, value);
                }
                Ok(None) => {}
                Err(e) => {
                    warn!(identity = %self.identity(), key = %key, error = %e, "entry left out of snapshot");
                }
            }
        }
        snapshot
    }

    /// Write every entry of `snapshot` into this store's namespace.
    ///
    /// The snapshot's own namespace is informational; entries always land
    /// here. All entries are validated before anything is written, and the
    /// SQLite backend applies them in one transaction. Returns the number of
    /// entries written.
    pub fn import(&self, snapshot: &Snapshot) -> Result<usize> {
        let entries = snapshot
            .entries
            .iter()
            .map(|(key, value)| checked_entry(key, value))
            .collect::<Result<Vec<_>>>()?;

        if snapshot.namespace != self.namespace {
            debug!(from = %snapshot.namespace, into = %self.namespace, "importing snapshot into a different namespace");
        }

        if self.verify_writes {
            self.write_confirmed(&entries)?;
        } else {
            self.backend
                .write_batch(&self.namespace, &entries)
                .map_err(|e| self.store_error(e))?;
        }

        Ok(entries.len())
    }

    /// Write `entries` and check each one reads back as written.
    ///
    /// The backend does both under one lock, so a concurrent writer to the
    /// same key cannot turn a successful write into an unconfirmed one.
    fn write_confirmed(&self, entries: &[Entry]) -> Result<()> {
        let found = self
            .backend
            .write_confirmed(&self.namespace, entries)
            .map_err(|e| self.store_error(e))?;

        for (entry, actual) in entries.iter().zip(found) {
            let reason = match actual {
                Some(actual) if actual == entry.value => continue,
                Some(_) => "a different value was read back",
                None => "the value was not found after writing",
            };
            warn!(identity = %self.identity(), key = %entry.key, reason, "preference write not confirmed");
            return Err(WriteError::Unconfirmed {
                key: entry.key.clone(),
                identity: self.identity(),
                reason: reason.to_string(),
            });
        }
        Ok(())
    }

    fn store_error(&self, source: StoreError) -> WriteError {
        warn!(identity = %self.identity(), error = %source, "preference write failed");
        WriteError::Store {
            identity: self.identity(),
            source,
        }
    }
}

fn checked_entry(key: &str, value: &str) -> Result<Entry> {
    validate_key(key).map_err(|source| WriteError::InvalidKey {
        key: key.to_string(),
        source,
    })?;
    validate_value(value).map_err(|source| WriteError::InvalidValue {
        key: key.to_string(),
        source,
    })?;
    Ok(Entry {
        key: key.to_string(),
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use prefstore_core::MAX_VALUE_LENGTH;
    use prefstore_store::MemoryBackend;

    fn store() -> PreferenceStore<MemoryBackend> {
        let ns = Namespace::from_package("org.example.sampleapp").unwrap();
        PreferenceStore::with_backend(ns, MemoryBackend::new(), &StoreConfig::default())
    }

    #[test]
    fn test_get_default_when_absent() {
        let prefs = store();
        assert_eq!(prefs.get("sample-key", ""), "");
        assert_eq!(prefs.get("sample-key", "fallback"), "fallback");
    }

    #[test]
    fn test_put_then_get() {
        let prefs = store();
        prefs.put("sample-key", "sample-val").unwrap();
        assert_eq!(prefs.get("sample-key", ""), "sample-val");
    }

    #[test]
    fn test_value_returned_verbatim() {
        let prefs = store();
        prefs.put("k", "  spaced\tvalue\n").unwrap();
        assert_eq!(prefs.get("k", "x"), "  spaced\tvalue\n");

        prefs.put("empty", "").unwrap();
        assert_eq!(prefs.get("empty", "default"), "");
    }

    #[test]
    fn test_overwrite_and_idempotent_put() {
        let prefs = store();
        prefs.put("k", "v1").unwrap();
        prefs.put("k", "v2").unwrap();
        prefs.put("k", "v2").unwrap();
        assert_eq!(prefs.get("k", ""), "v2");
        assert_eq!(prefs.keys(), vec!["k"]);
    }

    #[test]
    fn test_invalid_key_get_degrades() {
        let prefs = store();
        assert_eq!(prefs.get("", "d"), "d");
        assert_eq!(prefs.get(&"k".repeat(200), "d"), "d");
    }

    #[test]
    fn test_invalid_entries_rejected_before_io() {
        let prefs = store();
        assert!(matches!(
            prefs.put("", "v"),
            Err(WriteError::InvalidKey { .. })
        ));
        assert!(matches!(
            prefs.put("k", &"v".repeat(MAX_VALUE_LENGTH + 1)),
            Err(WriteError::InvalidValue { .. })
        ));
        assert!(prefs.backend().is_empty().unwrap());
    }

    #[test]
    fn test_identity_stable() {
        let prefs = store();
        assert_eq!(prefs.identity(), "memory#/org/example/sampleapp");
        assert_eq!(prefs.identity(), prefs.identity());
    }

    #[test]
    fn test_read_only_medium() {
        let ns = Namespace::from_package("org.example.sampleapp").unwrap();
        let prefs =
            PreferenceStore::with_backend(ns, MemoryBackend::read_only(), &StoreConfig::default());

        let err = prefs.put("k", "v").unwrap_err();
        assert!(matches!(err, WriteError::Store { .. }));
        assert!(err.to_string().contains("memory#/org/example/sampleapp"));
        assert_eq!(prefs.get("k", "fallback"), "fallback");
    }

    #[test]
    fn test_dropped_write_is_unconfirmed() {
        let ns = Namespace::from_package("org.example.sampleapp").unwrap();
        let prefs = PreferenceStore::with_backend(
            ns,
            MemoryBackend::dropping_writes(),
            &StoreConfig::default(),
        );

        let err = prefs.put("k", "v").unwrap_err();
        assert!(matches!(err, WriteError::Unconfirmed { .. }));
        assert_eq!(prefs.get("k", "fallback"), "fallback");
    }

    #[test]
    fn test_dropped_write_undetected_without_verification() {
        let ns = Namespace::from_package("org.example.sampleapp").unwrap();
        let config = StoreConfig::default().verify_writes(false);
        let prefs =
            PreferenceStore::with_backend(ns, MemoryBackend::dropping_writes(), &config);

        // Documented limitation: the medium claimed success.
        prefs.put("k", "v").unwrap();
        assert_eq!(prefs.get("k", "fallback"), "fallback");
    }

    #[test]
    fn test_remove_and_clear() {
        let prefs = store();
        prefs.put("a", "1").unwrap();
        prefs.put("b", "2").unwrap();

        prefs.remove("a").unwrap();
        prefs.remove("a").unwrap();
        assert_eq!(prefs.get("a", "gone"), "gone");

        prefs.clear().unwrap();
        assert!(prefs.keys().is_empty());
    }

    #[test]
    fn test_child_shares_backend_not_entries() {
        let prefs = store();
        let child = prefs.child("window").unwrap();
        assert_eq!(child.namespace().absolute_path(), "/org/example/sampleapp/window");

        child.put("width", "640").unwrap();
        assert_eq!(prefs.get("width", "none"), "none");
        assert_eq!(prefs.backend().len().unwrap(), 1);

        prefs.clear().unwrap();
        assert_eq!(child.get("width", "none"), "640");
        assert!(prefs.child("a/b").is_err());
    }

    #[test]
    fn test_clone_shares_backend() {
        let prefs = store();
        let other = prefs.clone();
        prefs.put("k", "v").unwrap();
        assert_eq!(other.get("k", ""), "v");
    }

    #[test]
    fn test_snapshot_and_import() {
        let source = store();
        source.put("a", "1").unwrap();
        source.put("b", "").unwrap();
        let snapshot = source.snapshot();
        assert_eq!(snapshot.len(), 2);

        let ns = Namespace::from_package("org.example.copy").unwrap();
        let target =
            PreferenceStore::with_backend(ns, MemoryBackend::new(), &StoreConfig::default());
        assert_eq!(target.import(&snapshot).unwrap(), 2);
        assert_eq!(target.get("a", ""), "1");
        assert_eq!(target.get("b", "x"), "");
    }

    #[test]
    fn test_import_validates_everything_first() {
        let prefs = store();
        let mut snapshot = Snapshot::new(prefs.namespace().clone());
        snapshot.entries.insert("good".to_string(), "v".to_string());
        snapshot.entries.insert("bad".to_string(), "nul\0".to_string());

        assert!(matches!(
            prefs.import(&snapshot),
            Err(WriteError::InvalidValue { .. })
        ));
        assert!(prefs.keys().is_empty());
    }

    #[test]
    fn test_racing_puts_to_one_key_all_succeed() {
        let prefs = store();
        let handles: Vec<_> = (0..4)
            .map(|worker| {
                let prefs = prefs.clone();
                std::thread::spawn(move || {
                    (0..200)
                        .map(|i| prefs.put("shared", &format!("w{worker}-{i}")))
                        .filter(|result| result.is_err())
                        .count()
                })
            })
            .collect();

        let failures: usize = handles.into_iter().map(|h| h.join().unwrap()).sum();
        assert_eq!(failures, 0);
        assert!(prefs.get("shared", "").ends_with("-199"));
    }

    #[test]
    fn test_dropped_import_is_unconfirmed() {
        let ns = Namespace::from_package("org.example.sampleapp").unwrap();
        let prefs = PreferenceStore::with_backend(
            ns.clone(),
            MemoryBackend::dropping_writes(),
            &StoreConfig::default(),
        );
        let mut snapshot = Snapshot::new(ns);
        snapshot.entries.insert("k".to_string(), "v".to_string());

        let err = prefs.import(&snapshot).unwrap_err();
        assert!(matches!(err, WriteError::Unconfirmed { ref key, .. } if key == "k"));
    }

    #[test]
    fn test_debug_shows_identity() {
        let debug = format!("{:?}", store());
        assert!(debug.contains("memory#/org/example/sampleapp"));
    }
}
