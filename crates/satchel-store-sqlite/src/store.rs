//! [`SqliteStore`]: the SQLite implementation of [`KvStore`].

use std::{
  path::Path,
  sync::{Arc, Mutex},
};

use rusqlite::{Connection, OptionalExtension as _};

use satchel_core::store::KvStore;

use crate::{
  Error, Result,
  schema::{SCHEMA, SCHEMA_VERSION},
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Satchel key-value store backed by a single SQLite file.
///
/// Clones share one connection.
#[derive(Clone)]
pub struct SqliteStore {
  conn: Arc<Mutex<Connection>>,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = Connection::open(path.as_ref())?;
    tracing::debug!(path = %path.as_ref().display(), "opened sqlite store");
    Self::init(conn)
  }

  /// Open a throwaway in-memory store.
  pub fn open_in_memory() -> Result<Self> {
    Self::init(Connection::open_in_memory()?)
  }

  fn init(conn: Connection) -> Result<Self> {
    let version: i64 =
      conn.query_row("PRAGMA user_version", [], |row| row.get(0))?;
    if version > SCHEMA_VERSION {
      return Err(Error::SchemaVersion(version));
    }
    conn.execute_batch(SCHEMA)?;
    Ok(Self { conn: Arc::new(Mutex::new(conn)) })
  }

  fn with_conn<T>(&self, f: impl FnOnce(&Connection) -> rusqlite::Result<T>) -> Result<T> {
    let conn = self.conn.lock().map_err(|_| Error::Poisoned)?;
    Ok(f(&conn)?)
  }
}

// ─── KvStore impl ────────────────────────────────────────────────────────────

impl KvStore for SqliteStore {
  type Error = Error;

  fn get(&self, key: &str) -> Result<Option<String>> {
    self.with_conn(|conn| {
      conn
        .query_row(
          "SELECT value FROM entries WHERE key = ?1",
          rusqlite::params![key],
          |row| row.get(0),
        )
        .optional()
    })
  }

  fn set(&self, key: &str, value: &str) -> Result<()> {
    self.with_conn(|conn| {
      conn.execute(
        "INSERT INTO entries (key, value) VALUES (?1, ?2)
         ON CONFLICT(key) DO UPDATE SET value = excluded.value",
        rusqlite::params![key, value],
      )
    })?;
    tracing::trace!(key, bytes = value.len(), "stored entry");
    Ok(())
  }

  fn remove(&self, key: &str) -> Result<()> {
    self.with_conn(|conn| {
      conn.execute("DELETE FROM entries WHERE key = ?1", rusqlite::params![key])
    })?;
    tracing::trace!(key, "removed entry");
    Ok(())
  }
}
