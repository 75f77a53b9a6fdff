//! Snapshot: the exported form of one namespace.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use prefstore_core::Namespace;

/// Every entry of one namespace, as a flat document.
///
/// Serialises as `{"namespace": "/a/b", "entries": {"key": "value"}}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Where the entries came from.
    pub namespace: Namespace,
    /// Entries, ordered by key.
    #[serde(default)]
    pub entries: BTreeMap<String, String>,
}

impl Snapshot {
    /// An empty snapshot of `namespace`.
    pub fn new(namespace: Namespace) -> Self {
        Self {
            namespace,
            entries: BTreeMap::new(),
        }
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there are no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Pretty-printed JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Parse a JSON document produced by [`to_json`](Self::to_json).
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
