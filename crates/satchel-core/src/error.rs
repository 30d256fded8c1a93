//! Error types for `satchel-core`.
//!
//! Storage and gateway failures never appear here: registries and the
//! upload/chat flows absorb them. What remains are caller mistakes.

use thiserror::Error;

use crate::document::DocumentId;

#[derive(Debug, Error)]
pub enum Error {
  #[error("document {0} already exists")]
  DuplicateDocument(DocumentId),

  #[error("no file selected")]
  MissingFile,

  #[error("no subject selected")]
  MissingSubject,

  #[error("email must not be empty")]
  MissingEmail,

  #[error("query must not be empty")]
  EmptyQuery,

  #[error("invalid data URI: {0}")]
  InvalidDataUri(String),

  #[error("invalid value {value:?} for preference {key}")]
  InvalidPreference { key: &'static str, value: String },

  #[error("failed to read file: {0}")]
  Io(#[from] std::io::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
