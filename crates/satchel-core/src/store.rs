//! The `KvStore` trait and an in-memory implementation.
//!
//! The trait models a per-profile durable key-value store: synchronous
//! get/set/remove over text, no transactions, no expiry. Registries are the
//! only writers; each owns exactly one key (or one key per scope).

use std::{
  collections::HashMap,
  sync::{
    Arc, Mutex,
    atomic::{AtomicBool, Ordering},
  },
};

use thiserror::Error;

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over a durable string-keyed store.
///
/// Writes overwrite the whole value for a key. There is no cross-key
/// transaction; two registries writing in sequence can be interrupted between
/// the writes.
pub trait KvStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  /// Return the value stored under `key`, or `None` if absent.
  fn get(&self, key: &str) -> Result<Option<String>, Self::Error>;

  /// Store `value` under `key`, replacing any previous value.
  fn set(&self, key: &str, value: &str) -> Result<(), Self::Error>;

  /// Delete `key`. Removing an absent key is not an error.
  fn remove(&self, key: &str) -> Result<(), Self::Error>;
}

impl<S: KvStore> KvStore for Arc<S> {
  type Error = S::Error;

  fn get(&self, key: &str) -> Result<Option<String>, Self::Error> {
    (**self).get(key)
  }

  fn set(&self, key: &str, value: &str) -> Result<(), Self::Error> {
    (**self).set(key, value)
  }

  fn remove(&self, key: &str) -> Result<(), Self::Error> {
    (**self).remove(key)
  }
}

// ─── MemoryStore ─────────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum MemoryStoreError {
  #[error("simulated read failure for key {0:?}")]
  Read(String),

  #[error("simulated write failure for key {0:?}")]
  Write(String),

  #[error("memory store lock poisoned")]
  Poisoned,
}

/// A [`KvStore`] held entirely in memory.
///
/// Reads and writes can be made to fail on demand, which is how the
/// degradation paths of the registries are exercised.
#[derive(Debug, Default)]
pub struct MemoryStore {
  entries:     Mutex<HashMap<String, String>>,
  fail_reads:  AtomicBool,
  fail_writes: AtomicBool,
}

impl MemoryStore {
  pub fn new() -> Self { Self::default() }

  /// Seed `key` with `value`, bypassing failure injection.
  pub fn with_entry(self, key: &str, value: &str) -> Self {
    if let Ok(mut entries) = self.entries.lock() {
      entries.insert(key.to_owned(), value.to_owned());
    }
    self
  }

  /// Make every subsequent `get` fail (or succeed again).
  pub fn fail_reads(&self, fail: bool) {
    self.fail_reads.store(fail, Ordering::SeqCst);
  }

  /// Make every subsequent `set`/`remove` fail (or succeed again).
  pub fn fail_writes(&self, fail: bool) {
    self.fail_writes.store(fail, Ordering::SeqCst);
  }

  /// Inspect a key without going through failure injection.
  pub fn peek(&self, key: &str) -> Option<String> {
    self.entries.lock().ok()?.get(key).cloned()
  }
}

impl KvStore for MemoryStore {
  type Error = MemoryStoreError;

  fn get(&self, key: &str) -> Result<Option<String>, Self::Error> {
    if self.fail_reads.load(Ordering::SeqCst) {
      return Err(MemoryStoreError::Read(key.to_owned()));
    }
    let entries = self.entries.lock().map_err(|_| MemoryStoreError::Poisoned)?;
    Ok(entries.get(key).cloned())
  }

  fn set(&self, key: &str, value: &str) -> Result<(), Self::Error> {
    if self.fail_writes.load(Ordering::SeqCst) {
      return Err(MemoryStoreError::Write(key.to_owned()));
    }
    let mut entries =
      self.entries.lock().map_err(|_| MemoryStoreError::Poisoned)?;
    entries.insert(key.to_owned(), value.to_owned());
    Ok(())
  }

  fn remove(&self, key: &str) -> Result<(), Self::Error> {
    if self.fail_writes.load(Ordering::SeqCst) {
      return Err(MemoryStoreError::Write(key.to_owned()));
    }
    let mut entries =
      self.entries.lock().map_err(|_| MemoryStoreError::Poisoned)?;
    entries.remove(key);
    Ok(())
  }
}
