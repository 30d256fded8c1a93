//! Upload orchestration: file → payload → summary → [`Document`].
//!
//! Reading the file is the only terminal failure. A failed summarization still
//! yields a document carrying [`SUMMARY_FAILED`] as its summary.

use std::path::Path;

use chrono::Utc;

use crate::{
  Error, Result,
  document::{Document, DocumentId},
  gateway::Summarizer,
  payload::DataUri,
};

/// Summary stored when the summarization gateway fails.
pub const SUMMARY_FAILED: &str = "Could not generate summary for this document.";

/// A validated upload: a file and the subject it is filed under.
#[derive(Debug, Clone)]
pub struct UploadRequest {
  pub name:    String,
  pub subject: String,
  pub payload: DataUri,
}

impl UploadRequest {
  /// Both a file name and a non-blank subject are required.
  pub fn new(
    name: impl Into<String>,
    subject: &str,
    payload: DataUri,
  ) -> Result<Self> {
    let name = name.into();
    if name.trim().is_empty() {
      return Err(Error::MissingFile);
    }
    let subject = subject.trim();
    if subject.is_empty() {
      return Err(Error::MissingSubject);
    }
    Ok(Self { name, subject: subject.to_owned(), payload })
  }
}

/// Read a PDF from disk. Returns the file name and its data URI.
pub async fn read_pdf(path: impl AsRef<Path>) -> Result<(String, DataUri)> {
  let path = path.as_ref();
  let name = path
    .file_name()
    .map(|n| n.to_string_lossy().into_owned())
    .ok_or(Error::MissingFile)?;
  let bytes = tokio::fs::read(path).await?;
  tracing::debug!(file = %name, bytes = bytes.len(), "read pdf");
  Ok((name, DataUri::pdf(&bytes)))
}

/// Summarize the upload and build its [`Document`]. Never fails.
pub async fn summarize_upload<G: Summarizer>(
  summarizer: &G,
  request: UploadRequest,
) -> Document {
  let summary = match summarizer.summarize(&request.payload).await {
    Ok(summary) => summary,
    Err(e) => {
      tracing::error!(file = %request.name, error = %e, "summarization failed");
      SUMMARY_FAILED.to_owned()
    }
  };

  Document {
    id: DocumentId::generate(),
    name: request.name,
    summary,
    data_uri: request.payload,
    subject: request.subject,
    created_at: Utc::now(),
  }
}
