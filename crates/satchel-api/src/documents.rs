//! Handlers for `/documents` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/documents` | Current scope, newest first |
//! | `POST`   | `/documents` | Body: [`UploadBody`]; summarizes, stores, returns 201 + document |
//! | `GET`    | `/documents/{id}` | 404 if not found |
//! | `DELETE` | `/documents/{id}` | 204; also drops the transcript |
//! | `POST`   | `/documents/{id}/ask` | Body: `{"query"}`; returns `{"answer"}` |
//! | `GET`    | `/documents/{id}/transcript` | Messages exchanged since startup |

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
};
use satchel_core::{
  chat::{self, Message},
  document::{Document, DocumentId},
  gateway::{Extractor, Summarizer},
  payload::DataUri,
  store::KvStore,
  upload::{self, UploadRequest},
};
use serde::{Deserialize, Serialize};

use crate::{AppState, error::ApiError};

fn not_found(id: &DocumentId) -> ApiError {
  ApiError::NotFound(format!("document {id} not found"))
}

// ─── List ────────────────────────────────────────────────────────────────────

/// `GET /documents`
pub async fn list<S: KvStore, G>(
  State(state): State<AppState<S, G>>,
) -> Result<Json<Vec<Document>>, ApiError> {
  Ok(Json(state.library()?.documents().list().to_vec()))
}

// ─── Upload ──────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadBody {
  /// Original file name.
  pub name:     String,
  pub subject:  String,
  /// `data:application/pdf;base64,...`
  pub data_uri: String,
}

/// `POST /documents`
pub async fn upload<S, G>(
  State(state): State<AppState<S, G>>,
  Json(body): Json<UploadBody>,
) -> Result<(StatusCode, Json<Document>), ApiError>
where
  S: KvStore + 'static,
  G: Summarizer,
{
  let payload = DataUri::parse(body.data_uri)?;
  let request = UploadRequest::new(body.name, &body.subject, payload)?;

  let document = upload::summarize_upload(state.gateway.as_ref(), request).await;
  let stored = document.clone();
  state
    .run(move |library, _| Ok(library.add_document(stored)?))
    .await?;
  Ok((StatusCode::CREATED, Json(document)))
}

// ─── Get / delete ────────────────────────────────────────────────────────────

/// `GET /documents/{id}`
pub async fn get_one<S: KvStore, G>(
  State(state): State<AppState<S, G>>,
  Path(id): Path<DocumentId>,
) -> Result<Json<Document>, ApiError> {
  let library = state.library()?;
  let document = library.find_document(&id).ok_or_else(|| not_found(&id))?;
  Ok(Json(document.clone()))
}

/// `DELETE /documents/{id}`
pub async fn remove<S: KvStore + 'static, G>(
  State(state): State<AppState<S, G>>,
  Path(id): Path<DocumentId>,
) -> Result<StatusCode, ApiError> {
  state
    .run(move |library, transcripts| {
      if !library.remove_document(&id) {
        return Err(not_found(&id));
      }
      transcripts.remove(&id);
      Ok(StatusCode::NO_CONTENT)
    })
    .await
}

// ─── Chat ────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct AskBody {
  pub query: String,
}

#[derive(Debug, Serialize)]
pub struct AskResponse {
  pub answer: String,
}

/// `POST /documents/{id}/ask`
pub async fn ask<S, G>(
  State(state): State<AppState<S, G>>,
  Path(id): Path<DocumentId>,
  Json(body): Json<AskBody>,
) -> Result<Json<AskResponse>, ApiError>
where
  S: KvStore + 'static,
  G: Extractor,
{
  let pdf = {
    let library = state.library()?;
    let document = library.find_document(&id).ok_or_else(|| not_found(&id))?;
    document.data_uri.clone()
  };

  let answer = chat::ask(state.gateway.as_ref(), &pdf, &body.query).await?;

  // The document may have been deleted while the gateway was answering.
  let query = body.query;
  state
    .run(move |library, transcripts| {
      if library.find_document(&id).is_none() {
        return Err(not_found(&id));
      }
      transcripts.entry(id).or_default().exchange(query, answer.clone());
      Ok(Json(AskResponse { answer }))
    })
    .await
}

/// `GET /documents/{id}/transcript`
pub async fn transcript<S: KvStore, G>(
  State(state): State<AppState<S, G>>,
  Path(id): Path<DocumentId>,
) -> Result<Json<Vec<Message>>, ApiError> {
  if state.library()?.find_document(&id).is_none() {
    return Err(not_found(&id));
  }
  let messages = state
    .transcripts()?
    .get(&id)
    .map(|t| t.messages().to_vec())
    .unwrap_or_default();
  Ok(Json(messages))
}
