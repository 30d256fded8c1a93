//! JSON REST API for Satchel.
//!
//! Exposes an axum [`Router`] over a [`Library`] and a gateway that can both
//! summarize and answer questions about PDFs. TLS and transport concerns are
//! the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", satchel_api::api_router(state))
//! ```

pub mod documents;
pub mod error;
pub mod preferences;
pub mod session;
pub mod subjects;

use std::{
  collections::HashMap,
  sync::{Arc, Mutex, MutexGuard},
};

use axum::{
  Router,
  routing::{get, post},
};
use satchel_core::{
  Library,
  chat::Transcript,
  document::DocumentId,
  gateway::{Extractor, Summarizer},
  store::KvStore,
};

pub use error::ApiError;

// ─── Application state ───────────────────────────────────────────────────────

/// Shared state threaded through all handlers.
///
/// The library lock is only ever held for synchronous sections; gateway
/// calls happen after it has been released. Anything that writes to the
/// store goes through [`AppState::run`] so store IO stays off the async
/// workers. Lock order is library, then transcripts.
pub struct AppState<S, G> {
  pub library:     Arc<Mutex<Library<S>>>,
  pub gateway:     Arc<G>,
  /// Volatile per-document chat history. Lost on restart.
  pub transcripts: Arc<Mutex<HashMap<DocumentId, Transcript>>>,
}

impl<S, G> Clone for AppState<S, G> {
  fn clone(&self) -> Self {
    Self {
      library:     self.library.clone(),
      gateway:     self.gateway.clone(),
      transcripts: self.transcripts.clone(),
    }
  }
}

impl<S: KvStore, G> AppState<S, G> {
  pub fn new(library: Library<S>, gateway: G) -> Self {
    Self {
      library:     Arc::new(Mutex::new(library)),
      gateway:     Arc::new(gateway),
      transcripts: Arc::new(Mutex::new(HashMap::new())),
    }
  }

  pub(crate) fn library(&self) -> Result<MutexGuard<'_, Library<S>>, ApiError> {
    self
      .library
      .lock()
      .map_err(|_| ApiError::Internal("library lock poisoned".into()))
  }

  pub(crate) fn transcripts(
    &self,
  ) -> Result<MutexGuard<'_, HashMap<DocumentId, Transcript>>, ApiError> {
    self
      .transcripts
      .lock()
      .map_err(|_| ApiError::Internal("transcript lock poisoned".into()))
  }
}

impl<S: KvStore + 'static, G> AppState<S, G> {
  /// Run `f` on the blocking pool with the library and the transcripts
  /// locked.
  pub(crate) async fn run<T, F>(&self, f: F) -> Result<T, ApiError>
  where
    T: Send + 'static,
    F: FnOnce(&mut Library<S>, &mut HashMap<DocumentId, Transcript>) -> Result<T, ApiError>
      + Send
      + 'static,
  {
    let library = self.library.clone();
    let transcripts = self.transcripts.clone();
    tokio::task::spawn_blocking(move || {
      let mut library = library
        .lock()
        .map_err(|_| ApiError::Internal("library lock poisoned".into()))?;
      let mut transcripts = transcripts
        .lock()
        .map_err(|_| ApiError::Internal("transcript lock poisoned".into()))?;
      f(&mut library, &mut transcripts)
    })
    .await
    .map_err(|e| ApiError::Internal(format!("blocking task failed: {e}")))?
  }
}

// ─── Router ──────────────────────────────────────────────────────────────────

/// Build a fully-materialised API router for `state`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S, G>(state: AppState<S, G>) -> Router<()>
where
  S: KvStore + 'static,
  G: Summarizer + Extractor + 'static,
{
  Router::new()
    // Session
    .route(
      "/session",
      get(session::current::<S, G>)
        .post(session::login::<S, G>)
        .delete(session::logout::<S, G>),
    )
    // Subjects
    .route("/subjects", get(subjects::list::<S, G>).post(subjects::create::<S, G>))
    .route("/subjects/{name}", axum::routing::delete(subjects::remove::<S, G>))
    .route("/subjects/{name}/documents", get(subjects::documents::<S, G>))
    // Documents
    .route("/documents", get(documents::list::<S, G>).post(documents::upload::<S, G>))
    .route(
      "/documents/{id}",
      get(documents::get_one::<S, G>).delete(documents::remove::<S, G>),
    )
    .route("/documents/{id}/ask", post(documents::ask::<S, G>))
    .route("/documents/{id}/transcript", get(documents::transcript::<S, G>))
    // Preferences
    .route(
      "/preferences",
      get(preferences::get::<S, G>).put(preferences::update::<S, G>),
    )
    .with_state(state)
}
