//! Handlers for `/subjects` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/subjects` | Names in insertion order |
//! | `POST`   | `/subjects` | Body: `{"name"}`; 201 when added, 200 when already present |
//! | `DELETE` | `/subjects/{name}` | 204; documents filed under it are kept |
//! | `GET`    | `/subjects/{name}/documents` | Documents in the current scope under that subject |

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
};
use satchel_core::{document::Document, store::KvStore};
use serde::Deserialize;

use crate::{AppState, error::ApiError};

/// `GET /subjects`
pub async fn list<S: KvStore, G>(
  State(state): State<AppState<S, G>>,
) -> Result<Json<Vec<String>>, ApiError> {
  Ok(Json(state.library()?.subjects().list().to_vec()))
}

#[derive(Debug, Deserialize)]
pub struct CreateBody {
  pub name: String,
}

/// `POST /subjects`. Responds with the full list.
pub async fn create<S: KvStore + 'static, G>(
  State(state): State<AppState<S, G>>,
  Json(body): Json<CreateBody>,
) -> Result<(StatusCode, Json<Vec<String>>), ApiError> {
  if body.name.trim().is_empty() {
    return Err(satchel_core::Error::MissingSubject.into());
  }
  state
    .run(move |library, _| {
      let status = if library.add_subject(&body.name) {
        StatusCode::CREATED
      } else {
        StatusCode::OK
      };
      Ok((status, Json(library.subjects().list().to_vec())))
    })
    .await
}

/// `DELETE /subjects/{name}`
pub async fn remove<S: KvStore + 'static, G>(
  State(state): State<AppState<S, G>>,
  Path(name): Path<String>,
) -> Result<StatusCode, ApiError> {
  state
    .run(move |library, _| {
      if library.remove_subject(&name) {
        Ok(StatusCode::NO_CONTENT)
      } else {
        Err(ApiError::NotFound(format!("subject {:?} not found", name.trim())))
      }
    })
    .await
}

/// `GET /subjects/{name}/documents`
pub async fn documents<S: KvStore, G>(
  State(state): State<AppState<S, G>>,
  Path(name): Path<String>,
) -> Result<Json<Vec<Document>>, ApiError> {
  let library = state.library()?;
  Ok(Json(library.documents().in_subject(&name).cloned().collect()))
}
