//! SQL schema for the Satchel SQLite store.
//!
//! Executed once at connection startup. `PRAGMA user_version` records the
//! layout; a database written by a newer layout is refused.

pub const SCHEMA_VERSION: i64 = 1;

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- One row per store key. Values are opaque text (JSON for registries).
CREATE TABLE IF NOT EXISTS entries (
    key    TEXT PRIMARY KEY,
    value  TEXT NOT NULL
);

PRAGMA user_version = 1;
";
