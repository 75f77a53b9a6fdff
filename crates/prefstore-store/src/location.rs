//! Storage locations: where each scope's database lives on this host.
//!
//! Layout is `<base>/<scope>/prefs.db`, where the base defaults to
//! `<user config dir>/prefstore` for the user tree and to a machine-wide
//! directory for the system tree. Resolution never fails; when no home or
//! config directory can be found it falls back to the working directory.

use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};

use prefstore_core::Scope;

use crate::sqlite::SqliteBackend;

/// File name of the database inside a scope root.
pub const DATABASE_FILE: &str = "prefs.db";

/// Environment variable replacing the user scope root.
pub const USER_ROOT_ENV: &str = "PREFSTORE_USER_ROOT";

/// Environment variable replacing the system scope root.
pub const SYSTEM_ROOT_ENV: &str = "PREFSTORE_SYSTEM_ROOT";

const APP_DIR: &str = "prefstore";

/// Resolved storage location for one scope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreLocation {
    scope: Scope,
    /// Directory holding the database file.
    root: PathBuf,
}

impl StoreLocation {
    /// Resolve the location for `scope`.
    ///
    /// An explicit `base` wins and yields `<base>/<scope>`. Otherwise the
    /// scope's environment variable names the root directly, and failing
    /// that the platform default is used.
    pub fn resolve(scope: Scope, base: Option<&Path>) -> Self {
        resolve_with_env(scope, base, |name| std::env::var_os(name))
    }

    /// A location with an explicit scope root.
    pub fn at(scope: Scope, root: impl Into<PathBuf>) -> Self {
        Self {
            scope,
            root: root.into(),
        }
    }

    /// The scope this location serves.
    pub fn scope(&self) -> Scope {
        self.scope
    }

    /// Directory holding the database.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Full path of the database file.
    pub fn database_path(&self) -> PathBuf {
        self.root.join(DATABASE_FILE)
    }

    /// A lazily opened SQLite backend for this location.
    pub fn backend(&self) -> SqliteBackend {
        SqliteBackend::new(self.database_path())
    }
}

impl fmt::Display for StoreLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.database_path().display(), self.scope)
    }
}

fn resolve_with_env<E>(scope: Scope, base: Option<&Path>, env: E) -> StoreLocation
where
    E: Fn(&str) -> Option<OsString>,
{
    if let Some(base) = base {
        return StoreLocation::at(scope, base.join(scope.as_str()));
    }

    let var = match scope {
        Scope::User => USER_ROOT_ENV,
        Scope::System => SYSTEM_ROOT_ENV,
    };
    if let Some(root) = env(var).filter(|v| !v.is_empty()) {
        return StoreLocation::at(scope, PathBuf::from(root));
    }

    let base = match scope {
        Scope::User => user_base(),
        Scope::System => system_base(&env),
    };
    StoreLocation::at(scope, base.join(scope.as_str()))
}

fn user_base() -> PathBuf {
    dirs::config_dir()
        .or_else(|| dirs::home_dir().map(|home| home.join(".config")))
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
}

#[cfg(windows)]
fn system_base<E>(env: &E) -> PathBuf
where
    E: Fn(&str) -> Option<OsString>,
{
    env("PROGRAMDATA")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(r"C:\ProgramData"))
        .join(APP_DIR)
}

#[cfg(target_os = "macos")]
fn system_base<E>(_env: &E) -> PathBuf
where
    E: Fn(&str) -> Option<OsString>,
{
    PathBuf::from("/Library/Preferences").join(APP_DIR)
}

#[cfg(all(not(windows), not(target_os = "macos")))]
fn system_base<E>(_env: &E) -> PathBuf
where
    E: Fn(&str) -> Option<OsString>,
{
    PathBuf::from("/etc").join(APP_DIR)
}
