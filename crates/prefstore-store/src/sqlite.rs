//! SQLite implementation of the Backend trait.
//!
//! This is the durable backend. One database file holds every namespace of a
//! scope; rows are keyed by (absolute namespace path, key).
//!
//! The connection is opened lazily. Reads never create anything: if the file
//! does not exist yet there is nothing stored, and an existing file is opened
//! read-only. The first write creates the directory, opens read-write and runs
//! migrations. This is what lets a store for an unwritable location be built
//! and read from without error, with failures surfacing only on write.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use rusqlite::{params, Connection, OpenFlags, OptionalExtension, TransactionBehavior};
use tracing::debug;

use prefstore_core::{Entry, Namespace};

use crate::error::{Result, StoreError};
use crate::migration::{self, now_millis};
use crate::traits::Backend;

/// How long a writer waits on another process holding the database lock.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// SQLite-based backend.
///
/// Thread-safe via an internal Mutex around the connection.
pub struct SqliteBackend {
    /// Database file, or `None` for an in-memory database.
    path: Option<PathBuf>,
    /// The connection, opened on first use.
    conn: Mutex<Handle>,
}

enum Handle {
    Closed,
    ReadOnly(Connection),
    ReadWrite(Connection),
}

impl SqliteBackend {
    /// Bind to a database file. Performs no I/O.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
            conn: Mutex::new(Handle::Closed),
        }
    }

    /// Open a private in-memory database.
    ///
    /// Useful for testing.
    pub fn open_memory() -> Result<Self> {
        let mut conn = Connection::open_in_memory()?;
        migration::migrate(&mut conn)?;
        Ok(Self {
            path: None,
            conn: Mutex::new(Handle::ReadWrite(conn)),
        })
    }

    /// The database file, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Run a read against the database.
    ///
    /// Returns `T::default()` without opening anything if the file is missing.
    fn with_reader<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T>,
        T: Default,
    {
        let mut handle = self.conn.lock().map_err(|_| StoreError::Poisoned)?;

        if let Handle::Closed = *handle {
            let Some(path) = self.path.as_deref() else {
                return Ok(T::default());
            };
            if !path.exists() {
                debug!(path = %path.display(), "database does not exist yet, nothing stored");
                return Ok(T::default());
            }
            debug!(path = %path.display(), "opening database read-only");
            let conn = Connection::open_with_flags(
                path,
                OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
            )?;
            conn.busy_timeout(BUSY_TIMEOUT)?;
            *handle = Handle::ReadOnly(conn);
        }

        match &*handle {
            Handle::ReadOnly(conn) | Handle::ReadWrite(conn) => f(conn),
            Handle::Closed => Ok(T::default()),
        }
    }

    /// Run a write against the database, opening it read-write first.
    ///
    /// If opening fails the previous handle is kept, so reads keep working.
    fn with_writer<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&mut Connection) -> Result<T>,
    {
        let mut handle = self.conn.lock().map_err(|_| StoreError::Poisoned)?;

        if !matches!(*handle, Handle::ReadWrite(_)) {
            let conn = self.open_read_write()?;
            *handle = Handle::ReadWrite(conn);
        }

        match &mut *handle {
            Handle::ReadWrite(conn) => f(conn),
            // Unreachable: replaced above.
            Handle::ReadOnly(_) | Handle::Closed => Err(StoreError::ReadOnly(self.location())),
        }
    }

    fn open_read_write(&self) -> Result<Connection> {
        let path = self
            .path
            .as_deref()
            .ok_or_else(|| StoreError::ReadOnly(self.location()))?;

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        debug!(path = %path.display(), "opening database read-write");
        let mut conn = Connection::open(path)?;
        conn.busy_timeout(BUSY_TIMEOUT)?;
        migration::migrate(&mut conn)?;
        Ok(conn)
    }
}

impl fmt::Debug for SqliteBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SqliteBackend")
            .field("location", &self.location())
            .finish_non_exhaustive()
    }
}

const UPSERT: &str = "INSERT INTO entries (namespace, key, value, updated_at)
     VALUES (?1, ?2, ?3, ?4)
     ON CONFLICT (namespace, key) DO UPDATE SET
         value = excluded.value,
         updated_at = excluded.updated_at";

const SELECT_VALUE: &str = "SELECT value FROM entries WHERE namespace = ?1 AND key = ?2";

impl Backend for SqliteBackend {
    fn location(&self) -> String {
        match &self.path {
            Some(path) => path.display().to_string(),
            None => ":memory:".to_string(),
        }
    }

    fn read(&self, namespace: &Namespace, key: &str) -> Result<Option<String>> {
        let ns = namespace.absolute_path();
        self.with_reader(|conn| {
            let value = conn
                .query_row(SELECT_VALUE, params![ns, key], |row| row.get(0))
                .optional()?;
            Ok(value)
        })
    }

    fn write(&self, namespace: &Namespace, key: &str, value: &str) -> Result<()> {
        let ns = namespace.absolute_path();
        self.with_writer(|conn| {
            conn.execute(UPSERT, params![ns, key, value, now_millis()])?;
            Ok(())
        })
    }

    fn write_batch(&self, namespace: &Namespace, entries: &[Entry]) -> Result<()> {
        let ns = namespace.absolute_path();
        self.with_writer(|conn| {
            let tx = conn.transaction()?;
            {
                let mut stmt = tx.prepare(UPSERT)?;
                let now = now_millis();
                for entry in entries {
                    stmt.execute(params![ns, entry.key, entry.value, now])?;
                }
            }
            tx.commit()?;
            Ok(())
        })
    }

    fn write_confirmed(
        &self,
        namespace: &Namespace,
        entries: &[Entry],
    ) -> Result<Vec<Option<String>>> {
        let ns = namespace.absolute_path();
        // The connection mutex keeps out other threads; the immediate
        // transaction keeps out other processes until the read-back is done.
        self.with_writer(|conn| {
            let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
            let found = {
                let mut upsert = tx.prepare(UPSERT)?;
                let now = now_millis();
                for entry in entries {
                    upsert.execute(params![ns, entry.key, entry.value, now])?;
                }

                let mut select = tx.prepare(SELECT_VALUE)?;
                let mut found = Vec::with_capacity(entries.len());
                for entry in entries {
                    let value = select
                        .query_row(params![ns, entry.key], |row| row.get(0))
                        .optional()?;
                    found.push(value);
                }
                found
            };
            tx.commit()?;
            Ok(found)
        })
    }

    fn remove(&self, namespace: &Namespace, key: &str) -> Result<()> {
        let ns = namespace.absolute_path();
        self.with_writer(|conn| {
            conn.execute(
                "DELETE FROM entries WHERE namespace = ?1 AND key = ?2",
                params![ns, key],
            )?;
            Ok(())
        })
    }

    fn keys(&self, namespace: &Namespace) -> Result<Vec<String>> {
        let ns = namespace.absolute_path();
        self.with_reader(|conn| {
            let mut stmt =
                conn.prepare("SELECT key FROM entries WHERE namespace = ?1 ORDER BY key")?;
            let keys = stmt
                .query_map(params![ns], |row| row.get(0))?
                .collect::<rusqlite::Result<Vec<String>>>()?;
            Ok(keys)
        })
    }

    fn clear(&self, namespace: &Namespace) -> Result<()> {
        let ns = namespace.absolute_path();
        self.with_writer(|conn| {
            conn.execute("DELETE FROM entries WHERE namespace = ?1", params![ns])?;
            Ok(())
        })
    }
}
