//! Error type for `satchel-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] rusqlite::Error),

  #[error("unsupported schema version {0}")]
  SchemaVersion(i64),

  #[error("connection lock poisoned")]
  Poisoned,
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
