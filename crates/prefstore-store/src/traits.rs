//! Backend trait: the minimal interface for preference persistence.

use prefstore_core::{Entry, Namespace};

use crate::error::Result;

/// The backend trait: namespaced string key/value persistence.
///
/// Implementations can be SQLite, in-memory, or anything else that can keep
/// flat string pairs apart per namespace. The facade doesn't care.
///
/// Backends do not validate keys or values; that happens before the call.
pub trait Backend: Send + Sync {
    /// Human-readable description of the medium, e.g. a file path.
    ///
    /// Must be pure: no I/O, same answer every time.
    fn location(&self) -> String;

    /// Read one entry. `Ok(None)` if absent, including when the medium
    /// does not exist yet.
    fn read(&self, namespace: &Namespace, key: &str) -> Result<Option<String>>;

    /// Write one entry, replacing any previous value.
    fn write(&self, namespace: &Namespace, key: &str, value: &str) -> Result<()>;

    /// Write many entries at once. SQLite applies them in one transaction.
    fn write_batch(&self, namespace: &Namespace, entries: &[Entry]) -> Result<()>;

    /// Write `entries`, then read each key back before any other writer can
    /// touch it. Returns what was found, in the order of `entries`.
    ///
    /// The read-back reports what the medium actually holds, so a medium that
    /// accepts writes and keeps nothing shows up as `None`.
    fn write_confirmed(
        &self,
        namespace: &Namespace,
        entries: &[Entry],
    ) -> Result<Vec<Option<String>>>;

    /// Remove one entry. Removing an absent key is not an error.
    fn remove(&self, namespace: &Namespace, key: &str) -> Result<()>;

    /// All keys stored in the namespace, sorted.
    fn keys(&self, namespace: &Namespace) -> Result<Vec<String>>;

    /// Remove every entry of the namespace and nothing else.
    fn clear(&self, namespace: &Namespace) -> Result<()>;
}
