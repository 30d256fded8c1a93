//! Gateway traits for the external AI service.
//!
//! Implemented by `satchel-gateway` against a real model and by fakes in
//! tests. Callers in this crate never let a gateway error escape: see
//! [`crate::upload`] and [`crate::chat`].

use std::future::Future;

use crate::payload::DataUri;

/// The literal answer the extraction gateway gives when the document holds
/// nothing relevant to the query. Rendered verbatim, never translated.
pub const NO_ANSWER: &str = "no answer";

/// Produces a short summary of a PDF.
pub trait Summarizer: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  fn summarize<'a>(
    &'a self,
    pdf: &'a DataUri,
  ) -> impl Future<Output = Result<String, Self::Error>> + Send + 'a;
}

/// Answers a free-text query against a PDF, or returns [`NO_ANSWER`].
pub trait Extractor: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  fn extract<'a>(
    &'a self,
    pdf: &'a DataUri,
    query: &'a str,
  ) -> impl Future<Output = Result<String, Self::Error>> + Send + 'a;
}
