//! Configuration for preference stores.

use std::path::PathBuf;

use prefstore_core::Scope;
use prefstore_store::StoreLocation;

/// Configuration for a [`PreferenceStore`](crate::PreferenceStore).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    /// Which preference tree to bind to.
    pub scope: Scope,
    /// Base directory replacing the platform default; the scope gets its
    /// own subdirectory beneath it.
    pub root: Option<PathBuf>,
    /// Whether `put` reads the value back before reporting success.
    pub verify_writes: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            scope: Scope::User,
            root: None,
            verify_writes: true,
        }
    }
}

impl StoreConfig {
    /// Per-user preferences at the platform default location.
    pub fn user() -> Self {
        Self::default()
    }

    /// Machine-wide preferences at the platform default location.
    pub fn system() -> Self {
        Self {
            scope: Scope::System,
            ..Self::default()
        }
    }

    /// Use `root` as the base directory.
    pub fn with_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.root = Some(root.into());
        self
    }

    /// Turn read-back confirmation of writes on or off.
    pub fn verify_writes(mut self, verify: bool) -> Self {
        self.verify_writes = verify;
        self
    }

    /// Where the SQLite database for this configuration lives.
    pub fn location(&self) -> StoreLocation {
        StoreLocation::resolve(self.scope, self.root.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_default_config() {
        let config = StoreConfig::default();
        assert_eq!(config.scope, Scope::User);
        assert!(config.root.is_none());
        assert!(config.verify_writes);
    }

    #[test]
    fn test_builder() {
        let config = StoreConfig::system()
            .with_root("/tmp/prefs")
            .verify_writes(false);
        assert_eq!(config.scope, Scope::System);
        assert!(!config.verify_writes);
        assert_eq!(
            config.location().database_path(),
            Path::new("/tmp/prefs/system/prefs.db")
        );
    }
}
