//! SQLite backend for the Satchel key-value store.
//!
//! One table, one row per key. The connection lives behind a mutex so the
//! store can be shared across threads while keeping the synchronous
//! [`satchel_core::store::KvStore`] contract.

mod schema;
mod store;

pub mod error;

pub use error::{Error, Result};
pub use store::SqliteStore;

#[cfg(test)]
mod tests;
