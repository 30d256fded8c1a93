//! [`Library`]: the per-profile service object owning every registry.
//!
//! Constructed once at startup over a shared store and passed by handle to
//! whatever needs it. It is the only place where the subject and document
//! registries meet.

use std::sync::Arc;

use crate::{
  Result,
  document::{Document, DocumentId, DocumentRegistry},
  preferences::Preferences,
  session::{Session, User},
  store::KvStore,
  subject::SubjectRegistry,
};

pub struct Library<S> {
  session:     Session<S>,
  subjects:    SubjectRegistry<S>,
  documents:   DocumentRegistry<S>,
  preferences: Preferences<S>,
}

impl<S: KvStore> Library<S> {
  /// Load all state from `store`. Never fails: unusable stored data degrades
  /// to defaults inside each registry.
  pub fn open(store: Arc<S>) -> Self {
    let session = Session::open(store.clone());
    let documents = DocumentRegistry::open(store.clone(), session.scope());
    let subjects = SubjectRegistry::open(store.clone());
    let preferences = Preferences::open(store);
    tracing::info!(
      scope = %documents.scope(),
      documents = documents.list().len(),
      subjects = subjects.list().len(),
      "library opened"
    );
    Self { session, subjects, documents, preferences }
  }

  pub fn session(&self) -> &Session<S> { &self.session }

  pub fn subjects(&self) -> &SubjectRegistry<S> { &self.subjects }

  pub fn documents(&self) -> &DocumentRegistry<S> { &self.documents }

  pub fn preferences(&self) -> &Preferences<S> { &self.preferences }

  pub fn preferences_mut(&mut self) -> &mut Preferences<S> { &mut self.preferences }

  // ── Session ───────────────────────────────────────────────────────────────

  /// Log in and switch the visible documents to that user's collection.
  pub fn login(&mut self, name: Option<String>, email: &str) -> Result<User> {
    let user = self.session.login(name, email)?.clone();
    self.documents.rescope(self.session.scope());
    Ok(user)
  }

  /// Log out and switch back to the guest collection.
  pub fn logout(&mut self) {
    self.session.logout();
    self.documents.rescope(self.session.scope());
  }

  // ── Subjects ──────────────────────────────────────────────────────────────

  pub fn add_subject(&mut self, name: &str) -> bool { self.subjects.add(name) }

  /// Remove a subject. Documents filed under it are kept.
  pub fn remove_subject(&mut self, name: &str) -> bool {
    self.subjects.remove(name)
  }

  // ── Documents ─────────────────────────────────────────────────────────────

  /// Insert `document`, registering its subject first.
  ///
  /// The subject is persisted before the document, so an interruption
  /// between the two writes can leave an unused subject but never a stored
  /// document whose subject was not stored.
  pub fn add_document(&mut self, mut document: Document) -> Result<()> {
    if self.documents.find(&document.id).is_some() {
      return Err(crate::Error::DuplicateDocument(document.id));
    }
    document.subject = document.subject.trim().to_owned();

    if self.subjects.add(&document.subject) {
      tracing::info!(subject = %document.subject, "registered subject from document");
    }
    tracing::info!(id = %document.id, name = %document.name, "document added");
    self.documents.add(document)
  }

  pub fn remove_document(&mut self, id: &DocumentId) -> bool {
    let removed = self.documents.remove(id);
    if removed {
      tracing::info!(%id, "document removed");
    }
    removed
  }

  pub fn find_document(&self, id: &DocumentId) -> Option<&Document> {
    self.documents.find(id)
  }
}
