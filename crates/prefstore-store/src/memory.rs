//! In-memory implementation of the Backend trait.
//!
//! This is primarily for testing. It has the same semantics as SQLite
//! but keeps everything in memory with no persistence. Two extra modes
//! stand in for media that misbehave on write.

use std::collections::BTreeMap;
use std::sync::RwLock;

use prefstore_core::{Entry, Namespace};

use crate::error::{Result, StoreError};
use crate::traits::Backend;

/// How the backend treats writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WriteMode {
    /// Writes are applied.
    Normal,
    /// Every mutating call fails.
    ReadOnly,
    /// Writes report success but are discarded.
    Dropping,
}

/// In-memory backend.
///
/// All data is lost when the backend is dropped. Thread-safe via RwLock.
#[derive(Debug)]
pub struct MemoryBackend {
    /// Entries keyed by (absolute namespace path, key).
    entries: RwLock<BTreeMap<(String, String), String>>,
    mode: WriteMode,
}

impl MemoryBackend {
    /// Create a new empty in-memory backend.
    pub fn new() -> Self {
        Self::with_mode(WriteMode::Normal)
    }

    /// A backend whose writes always fail, like a read-only medium.
    pub fn read_only() -> Self {
        Self::with_mode(WriteMode::ReadOnly)
    }

    /// A backend that reports success for writes and keeps nothing.
    ///
    /// Models platforms that silently deny unprivileged writes.
    pub fn dropping_writes() -> Self {
        Self::with_mode(WriteMode::Dropping)
    }

    fn with_mode(mode: WriteMode) -> Self {
        Self {
            entries: RwLock::new(BTreeMap::new()),
            mode,
        }
    }

    /// Seed an entry directly, bypassing the write mode.
    pub fn seed(&self, namespace: &Namespace, key: &str, value: &str) -> Result<()> {
        let mut entries = self.entries.write().map_err(|_| StoreError::Poisoned)?;
        entries.insert(
            (namespace.absolute_path(), key.to_string()),
            value.to_string(),
        );
        Ok(())
    }

    /// Number of entries across all namespaces.
    pub fn len(&self) -> Result<usize> {
        let entries = self.entries.read().map_err(|_| StoreError::Poisoned)?;
        Ok(entries.len())
    }

    /// Whether the backend holds no entries at all.
    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.len()? == 0)
    }

    /// Apply `f` to the entry map unless writes are refused or dropped.
    fn mutate<F>(&self, f: F) -> Result<()>
    where
        F: FnOnce(&mut BTreeMap<(String, String), String>),
    {
        match self.mode {
            WriteMode::ReadOnly => Err(StoreError::ReadOnly(self.location())),
            WriteMode::Dropping => Ok(()),
            WriteMode::Normal => {
                let mut entries = self.entries.write().map_err(|_| StoreError::Poisoned)?;
                f(&mut entries);
                Ok(())
            }
        }
    }
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl Backend for MemoryBackend {
    fn location(&self) -> String {
        "memory".to_string()
    }

    fn read(&self, namespace: &Namespace, key: &str) -> Result<Option<String>> {
        let entries = self.entries.read().map_err(|_| StoreError::Poisoned)?;
        Ok(entries
            .get(&(namespace.absolute_path(), key.to_string()))
            .cloned())
    }

    fn write(&self, namespace: &Namespace, key: &str, value: &str) -> Result<()> {
        self.mutate(|entries| {
            entries.insert(
                (namespace.absolute_path(), key.to_string()),
                value.to_string(),
            );
        })
    }

    fn write_batch(&self, namespace: &Namespace, batch: &[Entry]) -> Result<()> {
        let ns = namespace.absolute_path();
        self.mutate(|entries| {
            for entry in batch {
                entries.insert((ns.clone(), entry.key.clone()), entry.value.clone());
            }
        })
    }

    fn write_confirmed(
        &self,
        namespace: &Namespace,
        batch: &[Entry],
    ) -> Result<Vec<Option<String>>> {
        if self.mode == WriteMode::ReadOnly {
            return Err(StoreError::ReadOnly(self.location()));
        }

        let ns = namespace.absolute_path();
        let mut entries = self.entries.write().map_err(|_| StoreError::Poisoned)?;
        if self.mode == WriteMode::Normal {
            for entry in batch {
                entries.insert((ns.clone(), entry.key.clone()), entry.value.clone());
            }
        }
        Ok(batch
            .iter()
            .map(|entry| entries.get(&(ns.clone(), entry.key.clone())).cloned())
            .collect())
    }

    fn remove(&self, namespace: &Namespace, key: &str) -> Result<()> {
        self.mutate(|entries| {
            entries.remove(&(namespace.absolute_path(), key.to_string()));
        })
    }

    fn keys(&self, namespace: &Namespace) -> Result<Vec<String>> {
        let ns = namespace.absolute_path();
        let entries = self.entries.read().map_err(|_| StoreError::Poisoned)?;
        // BTreeMap order gives keys sorted within the namespace.
        Ok(entries
            .keys()
            .filter(|(n, _)| *n == ns)
            .map(|(_, k)| k.clone())
            .collect())
    }

    fn clear(&self, namespace: &Namespace) -> Result<()> {
        let ns = namespace.absolute_path();
        self.mutate(|entries| {
            entries.retain(|(n, _), _| *n != ns);
        })
    }
}
