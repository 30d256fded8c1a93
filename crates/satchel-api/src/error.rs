//! API error type and [`axum::response::IntoResponse`] implementation.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// An error returned by an API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("not found: {0}")]
  NotFound(String),

  #[error("bad request: {0}")]
  BadRequest(String),

  #[error("internal error: {0}")]
  Internal(String),
}

impl From<satchel_core::Error> for ApiError {
  fn from(e: satchel_core::Error) -> Self {
    match e {
      satchel_core::Error::Io(_) => ApiError::Internal(e.to_string()),
      other => ApiError::BadRequest(other.to_string()),
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    let (status, message) = match &self {
      ApiError::NotFound(m) => (StatusCode::NOT_FOUND, m.clone()),
      ApiError::BadRequest(m) => (StatusCode::BAD_REQUEST, m.clone()),
      ApiError::Internal(m) => {
        tracing::error!(error = %m, "request failed");
        (StatusCode::INTERNAL_SERVER_ERROR, m.clone())
      }
    };
    (status, Json(json!({ "error": message }))).into_response()
  }
}
