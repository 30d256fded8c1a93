//! Load/save helpers shared by the registries.
//!
//! Every failure is logged here and reported to the caller only as an
//! outcome value, never as an error.

use serde::{Serialize, de::DeserializeOwned};

use crate::store::KvStore;

/// Outcome of reading one key.
pub(crate) enum Loaded<T> {
  /// No value is stored under the key.
  Absent,
  Value(T),
  /// The read failed or the stored text could not be decoded.
  Failed,
}

pub(crate) fn load_json<S, T>(store: &S, key: &str) -> Loaded<T>
where
  S: KvStore,
  T: DeserializeOwned,
{
  let raw = match store.get(key) {
    Ok(Some(raw)) => raw,
    Ok(None) => return Loaded::Absent,
    Err(e) => {
      tracing::warn!(key, error = %e, "failed to read from store");
      return Loaded::Failed;
    }
  };

  match serde_json::from_str(&raw) {
    Ok(value) => Loaded::Value(value),
    Err(e) => {
      tracing::warn!(key, error = %e, "discarding malformed stored value");
      Loaded::Failed
    }
  }
}

pub(crate) fn load_text<S: KvStore>(store: &S, key: &str) -> Option<String> {
  match store.get(key) {
    Ok(value) => value,
    Err(e) => {
      tracing::warn!(key, error = %e, "failed to read from store");
      None
    }
  }
}

/// Overwrite `key` with the JSON encoding of `value`. Returns `false` if the
/// write did not happen.
pub(crate) fn save_json<S, T>(store: &S, key: &str, value: &T) -> bool
where
  S: KvStore,
  T: Serialize + ?Sized,
{
  let encoded = match serde_json::to_string(value) {
    Ok(encoded) => encoded,
    Err(e) => {
      tracing::warn!(key, error = %e, "failed to encode value for store");
      return false;
    }
  };
  save_text(store, key, &encoded)
}

pub(crate) fn save_text<S: KvStore>(store: &S, key: &str, value: &str) -> bool {
  match store.set(key, value) {
    Ok(()) => true,
    Err(e) => {
      tracing::warn!(key, error = %e, "failed to write to store");
      false
    }
  }
}

pub(crate) fn remove<S: KvStore>(store: &S, key: &str) -> bool {
  match store.remove(key) {
    Ok(()) => true,
    Err(e) => {
      tracing::warn!(key, error = %e, "failed to remove key from store");
      false
    }
  }
}
