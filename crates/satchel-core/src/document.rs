//! Documents: uploaded PDFs with their generated summaries.
//!
//! Documents are immutable once created. The only lifecycle events are
//! insertion (always newest-first) and deletion.

use std::{fmt, sync::Arc};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
  Error, Result,
  payload::DataUri,
  persist::{self, Loaded},
  session::Scope,
  store::KvStore,
};

// ─── Identity ────────────────────────────────────────────────────────────────

/// Opaque document identifier. Generated ids are random v4 UUIDs, but any
/// string loaded from storage is accepted.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(String);

impl DocumentId {
  pub fn generate() -> Self { Self(Uuid::new_v4().hyphenated().to_string()) }

  pub fn as_str(&self) -> &str { &self.0 }
}

impl From<String> for DocumentId {
  fn from(s: String) -> Self { Self(s) }
}

impl From<&str> for DocumentId {
  fn from(s: &str) -> Self { Self(s.to_owned()) }
}

impl fmt::Display for DocumentId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

// ─── Document ────────────────────────────────────────────────────────────────

/// An uploaded PDF. Field names are camelCase on the wire and in storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
  pub id:         DocumentId,
  /// Original file name; display only.
  pub name:       String,
  pub summary:    String,
  pub data_uri:   DataUri,
  pub subject:    String,
  pub created_at: DateTime<Utc>,
}

impl Document {
  /// Whether this document is filed under `subject` (trimmed comparison).
  pub fn belongs_to(&self, subject: &str) -> bool {
    self.subject.trim() == subject.trim()
  }
}

// ─── DocumentList ────────────────────────────────────────────────────────────

/// Newest-first list of documents with unique ids.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentList {
  documents: Vec<Document>,
}

impl DocumentList {
  pub fn as_slice(&self) -> &[Document] { &self.documents }

  pub fn len(&self) -> usize { self.documents.len() }

  pub fn is_empty(&self) -> bool { self.documents.is_empty() }

  pub fn find(&self, id: &DocumentId) -> Option<&Document> {
    self.documents.iter().find(|d| &d.id == id)
  }

  /// Prepend `document`. Fails if its id is already present.
  pub fn insert(&mut self, document: Document) -> Result<()> {
    if self.find(&document.id).is_some() {
      return Err(Error::DuplicateDocument(document.id));
    }
    self.documents.insert(0, document);
    Ok(())
  }

  /// Remove every document with `id`. Returns `false` if none matched.
  pub fn remove(&mut self, id: &DocumentId) -> bool {
    let before = self.documents.len();
    self.documents.retain(|d| &d.id != id);
    self.documents.len() != before
  }

  pub fn in_subject<'a>(
    &'a self,
    subject: &'a str,
  ) -> impl Iterator<Item = &'a Document> + 'a {
    self.documents.iter().filter(move |d| d.belongs_to(subject))
  }
}

impl From<Vec<Document>> for DocumentList {
  fn from(documents: Vec<Document>) -> Self { Self { documents } }
}

// ─── DocumentRegistry ────────────────────────────────────────────────────────

/// The persisted document list for one [`Scope`].
///
/// The whole list is rewritten after every insertion. When a deletion leaves
/// the list empty, the scope's key is removed from the store instead of being
/// written as an empty array.
pub struct DocumentRegistry<S> {
  store:     Arc<S>,
  scope:     Scope,
  documents: DocumentList,
}

impl<S: KvStore> DocumentRegistry<S> {
  pub fn open(store: Arc<S>, scope: Scope) -> Self {
    let documents = Self::load(store.as_ref(), &scope);
    Self { store, scope, documents }
  }

  /// Absent, unreadable and malformed data all load as an empty list.
  fn load(store: &S, scope: &Scope) -> DocumentList {
    let key = scope.storage_key();
    match persist::load_json::<_, Vec<Document>>(store, &key) {
      Loaded::Value(documents) => {
        tracing::debug!(%scope, count = documents.len(), "loaded documents");
        DocumentList::from(documents)
      }
      Loaded::Absent | Loaded::Failed => DocumentList::default(),
    }
  }

  pub fn scope(&self) -> &Scope { &self.scope }

  /// Switch to another scope's collection.
  pub fn rescope(&mut self, scope: Scope) {
    if scope == self.scope {
      return;
    }
    self.documents = Self::load(self.store.as_ref(), &scope);
    tracing::info!(%scope, count = self.documents.len(), "switched document scope");
    self.scope = scope;
  }

  pub fn list(&self) -> &[Document] { self.documents.as_slice() }

  pub fn find(&self, id: &DocumentId) -> Option<&Document> {
    self.documents.find(id)
  }

  pub fn in_subject<'a>(
    &'a self,
    subject: &'a str,
  ) -> impl Iterator<Item = &'a Document> + 'a {
    self.documents.in_subject(subject)
  }

  pub fn add(&mut self, document: Document) -> Result<()> {
    self.documents.insert(document)?;
    self.save();
    Ok(())
  }

  pub fn remove(&mut self, id: &DocumentId) -> bool {
    let removed = self.documents.remove(id);
    if removed {
      if self.documents.is_empty() {
        persist::remove(self.store.as_ref(), &self.scope.storage_key());
      } else {
        self.save();
      }
    }
    removed
  }

  fn save(&self) {
    persist::save_json(
      self.store.as_ref(),
      &self.scope.storage_key(),
      self.documents.as_slice(),
    );
  }
}
