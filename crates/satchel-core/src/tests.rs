//! Library-level scenarios against [`MemoryStore`] and fake gateways.

use std::sync::{Arc, Mutex};

use chrono::Utc;
use proptest::prelude::*;
use thiserror::Error;

use crate::{
  Library,
  document::{Document, DocumentId},
  gateway::{Extractor, Summarizer},
  payload::DataUri,
  session::Role,
  store::MemoryStore,
  subject::{DEFAULT_SUBJECTS, SUBJECTS_KEY},
  upload::{SUMMARY_FAILED, UploadRequest, summarize_upload},
};

// ─── Fake gateways ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
#[error("gateway unavailable")]
pub(crate) struct GatewayDown;

/// Answers every call with the same text and records extraction queries.
pub(crate) struct FixedGateway {
  reply:   String,
  queries: Mutex<Vec<String>>,
}

impl FixedGateway {
  pub(crate) fn new(reply: &str) -> Self {
    Self { reply: reply.to_owned(), queries: Mutex::new(Vec::new()) }
  }

  pub(crate) fn queries(&self) -> Vec<String> {
    self.queries.lock().unwrap().clone()
  }
}

impl Summarizer for FixedGateway {
  type Error = GatewayDown;

  async fn summarize(&self, _pdf: &DataUri) -> Result<String, GatewayDown> {
    Ok(self.reply.clone())
  }
}

impl Extractor for FixedGateway {
  type Error = GatewayDown;

  async fn extract(&self, _pdf: &DataUri, query: &str) -> Result<String, GatewayDown> {
    self.queries.lock().unwrap().push(query.to_owned());
    Ok(self.reply.clone())
  }
}

/// Fails every call.
pub(crate) struct FailingGateway;

impl Summarizer for FailingGateway {
  type Error = GatewayDown;

  async fn summarize(&self, _pdf: &DataUri) -> Result<String, GatewayDown> {
    Err(GatewayDown)
  }
}

impl Extractor for FailingGateway {
  type Error = GatewayDown;

  async fn extract(&self, _pdf: &DataUri, _query: &str) -> Result<String, GatewayDown> {
    Err(GatewayDown)
  }
}

// ─── Helpers ─────────────────────────────────────────────────────────────────

fn library() -> (Arc<MemoryStore>, Library<MemoryStore>) {
  let store = Arc::new(MemoryStore::new());
  let library = Library::open(store.clone());
  (store, library)
}

async fn upload(
  library: &mut Library<MemoryStore>,
  name: &str,
  subject: &str,
) -> DocumentId {
  let request = UploadRequest::new(name, subject, DataUri::pdf(name.as_bytes())).unwrap();
  let document = summarize_upload(&FixedGateway::new("Summary."), request).await;
  let id = document.id.clone();
  library.add_document(document).unwrap();
  id
}

// ─── Scenarios ───────────────────────────────────────────────────────────────

#[test]
fn fresh_library_has_default_subjects_and_no_documents() {
  let (_, library) = library();
  assert_eq!(library.subjects().list(), DEFAULT_SUBJECTS);
  assert!(library.documents().list().is_empty());
  assert!(library.session().current().is_none());
}

#[tokio::test]
async fn new_subject_is_discovered_from_document() {
  let (store, mut library) = library();
  upload(&mut library, "poems.pdf", "Poetry").await;

  assert!(library.subjects().contains("Poetry"));
  let stored: Vec<String> =
    serde_json::from_str(&store.peek(SUBJECTS_KEY).unwrap()).unwrap();
  assert!(stored.contains(&"Poetry".to_owned()));
}

#[tokio::test]
async fn whitespace_variants_share_one_subject() {
  let (_, mut library) = library();
  upload(&mut library, "a.pdf", "History ").await;
  upload(&mut library, "b.pdf", "History").await;

  let count = library
    .subjects()
    .list()
    .iter()
    .filter(|s| s.as_str() == "History")
    .count();
  assert_eq!(count, 1);
  assert_eq!(library.documents().in_subject("History").count(), 2);
}

#[tokio::test]
async fn removing_subject_keeps_documents() {
  let (_, mut library) = library();
  let id = upload(&mut library, "algebra.pdf", "Maths").await;

  assert!(library.remove_subject("Maths"));
  assert!(!library.subjects().contains("Maths"));

  let doc = library.find_document(&id).unwrap();
  assert_eq!(doc.subject, "Maths");
  assert_eq!(library.documents().in_subject("Maths").count(), 1);
}

#[tokio::test]
async fn removing_every_document_clears_the_key() {
  let (store, mut library) = library();
  let mut ids = Vec::new();
  for name in ["a.pdf", "b.pdf", "c.pdf"] {
    ids.push(upload(&mut library, name, "Science").await);
  }
  assert!(store.peek("documents_guest").is_some());

  for id in &ids {
    assert!(library.remove_document(id));
  }
  for id in &ids {
    assert!(library.find_document(id).is_none());
  }
  assert!(store.peek("documents_guest").is_none());
}

#[tokio::test]
async fn failed_summary_document_is_listed() {
  let (_, mut library) = library();
  let request =
    UploadRequest::new("broken.pdf", "Maths", DataUri::pdf(b"%PDF")).unwrap();
  let document = summarize_upload(&FailingGateway, request).await;
  let id = document.id.clone();
  library.add_document(document).unwrap();

  let listed = library.documents().list();
  assert_eq!(listed.len(), 1);
  assert_eq!(listed[0].id, id);
  assert_eq!(listed[0].summary, SUMMARY_FAILED);
}

#[tokio::test]
async fn duplicate_document_leaves_subjects_alone() {
  let (_, mut library) = library();
  let request = UploadRequest::new("a.pdf", "Maths", DataUri::pdf(b"%PDF")).unwrap();
  let document = summarize_upload(&FixedGateway::new("s"), request).await;
  library.add_document(document.clone()).unwrap();

  let mut again = document;
  again.subject = "Brand New".into();
  assert!(library.add_document(again).is_err());
  assert!(!library.subjects().contains("Brand New"));
  assert_eq!(library.documents().list().len(), 1);
}

#[tokio::test]
async fn login_switches_document_scope() {
  let (store, mut library) = library();
  upload(&mut library, "guest.pdf", "Maths").await;

  let user = library.login(None, "m@example.com").unwrap();
  assert_eq!(user.role, Role::Admin);
  assert!(library.documents().list().is_empty());
  upload(&mut library, "admin.pdf", "Maths").await;
  assert!(store.peek("documents_m@example.com").is_some());

  library.logout();
  let names: Vec<_> = library.documents().list().iter().map(|d| d.name.as_str()).collect();
  assert_eq!(names, ["guest.pdf"]);

  // Reopening restores the logged-in scope.
  library.login(Some("Admin".into()), "m@example.com").unwrap();
  let reopened = Library::open(store);
  let names: Vec<_> = reopened.documents().list().iter().map(|d| d.name.as_str()).collect();
  assert_eq!(names, ["admin.pdf"]);
}

#[tokio::test]
async fn documents_survive_reopen_newest_first() {
  let (store, mut library) = library();
  upload(&mut library, "first.pdf", "Maths").await;
  upload(&mut library, "second.pdf", "Maths").await;

  let reopened = Library::open(store);
  let names: Vec<_> = reopened.documents().list().iter().map(|d| d.name.as_str()).collect();
  assert_eq!(names, ["second.pdf", "first.pdf"]);
  assert_eq!(reopened.documents().list(), library.documents().list());
}

#[tokio::test]
async fn storage_outage_never_surfaces() {
  let store = Arc::new(MemoryStore::new());
  store.fail_reads(true);
  store.fail_writes(true);

  let mut library = Library::open(store.clone());
  assert_eq!(library.subjects().list(), DEFAULT_SUBJECTS);
  let id = upload(&mut library, "a.pdf", "Art").await;
  assert!(library.subjects().contains("Art"));
  assert!(library.remove_document(&id));
  library.login(None, "a@b.c").unwrap();
  library.logout();
}

// ─── Properties ──────────────────────────────────────────────────────────────

fn document(name: &str) -> Document {
  Document {
    id:         DocumentId::generate(),
    name:       name.to_owned(),
    summary:    "Summary.".into(),
    data_uri:   DataUri::pdf(name.as_bytes()),
    subject:    "Maths".into(),
    created_at: Utc::now(),
  }
}

/// Subject names that are mostly whitespace variants of a few words.
fn subject_name() -> impl Strategy<Value = String> {
  prop_oneof![
    "[ \t]{0,3}(Maths|Art|History)[ \t]{0,3}",
    "[ \t]{0,4}",
    "[A-Za-z ]{0,8}",
  ]
}

proptest! {
  #![proptest_config(ProptestConfig::with_cases(128))]

  #[test]
  fn subjects_never_hold_blank_or_duplicate_names(
    ops in prop::collection::vec((any::<bool>(), subject_name()), 0..40)
  ) {
    let (store, mut library) = library();
    for (add, name) in &ops {
      if *add {
        library.add_subject(name);
      } else {
        library.remove_subject(name);
      }
      let list = library.subjects().list();
      prop_assert!(list.iter().all(|s| !s.trim().is_empty() && s.trim() == s));
      let mut sorted = list.to_vec();
      sorted.sort();
      sorted.dedup();
      prop_assert_eq!(sorted.len(), list.len());
    }

    let reopened = Library::open(store);
    prop_assert_eq!(reopened.subjects().list(), library.subjects().list());
  }

  #[test]
  fn removing_every_document_leaves_nothing_behind(
    ops in prop::collection::vec((any::<bool>(), any::<prop::sample::Index>()), 1..30)
  ) {
    let (store, mut library) = library();
    let mut seen = Vec::new();
    let mut live: Vec<DocumentId> = Vec::new();

    for (n, (add, pick)) in ops.iter().enumerate() {
      if *add || live.is_empty() {
        let doc = document(&format!("{n}.pdf"));
        seen.push(doc.id.clone());
        live.push(doc.id.clone());
        library.add_document(doc).unwrap();
      } else {
        let id = live.remove(pick.index(live.len()));
        prop_assert!(library.remove_document(&id));
      }
      prop_assert_eq!(store.peek("documents_guest").is_some(), !live.is_empty());
    }

    for id in live.drain(..) {
      prop_assert!(library.remove_document(&id));
    }
    for id in &seen {
      prop_assert!(library.find_document(id).is_none());
    }
    prop_assert!(store.peek("documents_guest").is_none());
  }
}
