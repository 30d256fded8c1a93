//! Integration tests for `SqliteStore` against in-memory and on-disk
//! databases.

use std::sync::Arc;

use chrono::Utc;
use satchel_core::{
  Library,
  document::{Document, DocumentId},
  payload::DataUri,
  store::KvStore,
  subject::DEFAULT_SUBJECTS,
};

use crate::{Error, SqliteStore};

fn store() -> SqliteStore {
  SqliteStore::open_in_memory().expect("in-memory store")
}

fn document(name: &str, subject: &str) -> Document {
  Document {
    id:         DocumentId::generate(),
    name:       name.into(),
    summary:    "Summary.".into(),
    data_uri:   DataUri::pdf(name.as_bytes()),
    subject:    subject.into(),
    created_at: Utc::now(),
  }
}

// ─── Key-value contract ──────────────────────────────────────────────────────

#[test]
fn get_missing_returns_none() {
  let s = store();
  assert_eq!(s.get("nope").unwrap(), None);
}

#[test]
fn set_overwrites() {
  let s = store();
  s.set("k", "one").unwrap();
  s.set("k", "two").unwrap();
  assert_eq!(s.get("k").unwrap().as_deref(), Some("two"));
}

#[test]
fn remove_deletes_and_is_idempotent() {
  let s = store();
  s.set("k", "v").unwrap();
  s.remove("k").unwrap();
  s.remove("k").unwrap();
  assert_eq!(s.get("k").unwrap(), None);
}

#[test]
fn clones_share_the_connection() {
  let a = store();
  let b = a.clone();
  a.set("k", "v").unwrap();
  assert_eq!(b.get("k").unwrap().as_deref(), Some("v"));
}

// ─── Files ───────────────────────────────────────────────────────────────────

#[test]
fn data_survives_reopen() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("satchel.db");

  SqliteStore::open(&path).unwrap().set("k", "v").unwrap();
  let reopened = SqliteStore::open(&path).unwrap();
  assert_eq!(reopened.get("k").unwrap().as_deref(), Some("v"));
}

#[test]
fn newer_schema_is_refused() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("satchel.db");
  {
    let conn = rusqlite::Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 99;").unwrap();
  }
  assert!(matches!(
    SqliteStore::open(&path),
    Err(Error::SchemaVersion(99))
  ));
}

// ─── Library over SQLite ─────────────────────────────────────────────────────

#[test]
fn library_round_trips_through_sqlite() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("satchel.db");

  let original = document("cells.pdf", "Biology");
  {
    let store = Arc::new(SqliteStore::open(&path).unwrap());
    let mut library = Library::open(store);
    assert_eq!(library.subjects().list(), DEFAULT_SUBJECTS);
    library.add_document(original.clone()).unwrap();
  }

  let store = Arc::new(SqliteStore::open(&path).unwrap());
  let library = Library::open(store.clone());
  assert!(library.subjects().contains("Biology"));

  let found = library.find_document(&original.id).unwrap();
  assert_eq!(found, &original);
  assert_eq!(found.created_at, original.created_at);

  assert!(store.get("documents_guest").unwrap().is_some());
}

#[test]
fn deleting_last_document_removes_row() {
  let store = Arc::new(store());
  let mut library = Library::open(store.clone());
  let doc = document("a.pdf", "Maths");
  let id = doc.id.clone();
  library.add_document(doc).unwrap();
  assert!(store.get("documents_guest").unwrap().is_some());

  library.remove_document(&id);
  assert!(store.get("documents_guest").unwrap().is_none());
}
