//! Test fixtures and helpers.
//!
//! Common setup code for integration tests. Helpers panic on setup failure.

use std::path::{Path, PathBuf};

use tempfile::TempDir;

use prefstore::{PreferenceStore, StoreConfig};
use prefstore_core::Namespace;
use prefstore_store::MemoryBackend;

/// A temporary directory acting as the storage base for one test.
pub struct TestFixture {
    dir: TempDir,
    config: StoreConfig,
}

impl TestFixture {
    /// Create a fixture with user scope rooted in a fresh temp dir.
    pub fn new() -> Self {
        let dir = TempDir::new().expect("create temp dir");
        let config = StoreConfig::default().with_root(dir.path());
        Self { dir, config }
    }

    /// Create a fixture with a customised configuration. The root is
    /// always replaced by the temp dir.
    pub fn with_config(config: StoreConfig) -> Self {
        let dir = TempDir::new().expect("create temp dir");
        let config = config.with_root(dir.path());
        Self { dir, config }
    }

    /// The configuration stores are opened with.
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// The temp dir used as storage base.
    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Path of the SQLite database the stores write to.
    pub fn database_path(&self) -> PathBuf {
        self.config.location().database_path()
    }

    /// Open a store for the dotted `package` namespace.
    pub fn store(&self, package: &str) -> PreferenceStore {
        PreferenceStore::open(namespace(package), &self.config)
    }

    /// Open a store on a brand new backend over the same file, as a
    /// restarted process would.
    pub fn restart(&self, package: &str) -> PreferenceStore {
        self.store(package)
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// A storage base that cannot be created: it sits beneath a regular file.
///
/// Works the same when tests run as root, unlike permission bits.
pub struct UnwritableFixture {
    _dir: TempDir,
    config: StoreConfig,
}

impl UnwritableFixture {
    /// Create the blocking file and point the configuration beneath it.
    pub fn new() -> Self {
        let dir = TempDir::new().expect("create temp dir");
        let blocker = dir.path().join("blocker");
        std::fs::write(&blocker, b"not a directory").expect("write blocker file");
        let config = StoreConfig::system().with_root(blocker.join("prefs"));
        Self { _dir: dir, config }
    }

    /// The configuration stores are opened with.
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Open a store for the dotted `package` namespace.
    pub fn store(&self, package: &str) -> PreferenceStore {
        PreferenceStore::open(namespace(package), &self.config)
    }
}

impl Default for UnwritableFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse a dotted package name into a namespace.
pub fn namespace(package: &str) -> Namespace {
    Namespace::from_package(package).expect("valid package namespace")
}

/// A store over a fresh in-memory backend.
pub fn memory_store(package: &str) -> PreferenceStore<MemoryBackend> {
    PreferenceStore::with_backend(namespace(package), MemoryBackend::new(), &StoreConfig::default())
}

/// A store whose medium refuses every write.
pub fn read_only_store(package: &str) -> PreferenceStore<MemoryBackend> {
    PreferenceStore::with_backend(
        namespace(package),
        MemoryBackend::read_only(),
        &StoreConfig::default(),
    )
}

/// A store whose medium claims success and keeps nothing.
pub fn dropping_store(package: &str, config: &StoreConfig) -> PreferenceStore<MemoryBackend> {
    PreferenceStore::with_backend(namespace(package), MemoryBackend::dropping_writes(), config)
}
