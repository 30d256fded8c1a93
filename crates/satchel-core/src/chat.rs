//! Question answering against a single document.
//!
//! Every query is sent on its own; no earlier turns go to the gateway. The
//! [`Transcript`] lives only in memory and is discarded with its owner.

use serde::{Deserialize, Serialize};

use crate::{Error, Result, gateway::Extractor, payload::DataUri};

/// Answer given when the extraction gateway fails.
pub const EXTRACTION_FAILED: &str =
  "Sorry, I could not extract the content. Please try again.";

/// Ask `query` about `pdf`. Gateway failures become [`EXTRACTION_FAILED`];
/// only a blank query is an error.
pub async fn ask<G: Extractor>(
  extractor: &G,
  pdf: &DataUri,
  query: &str,
) -> Result<String> {
  if query.trim().is_empty() {
    return Err(Error::EmptyQuery);
  }
  match extractor.extract(pdf, query).await {
    Ok(answer) => Ok(answer),
    Err(e) => {
      tracing::error!(error = %e, "content extraction failed");
      Ok(EXTRACTION_FAILED.to_owned())
    }
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
  User,
  Bot,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
  pub role:    Speaker,
  pub content: String,
}

/// The volatile chat history for one document.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(transparent)]
pub struct Transcript {
  messages: Vec<Message>,
}

impl Transcript {
  pub fn messages(&self) -> &[Message] { &self.messages }

  pub fn is_empty(&self) -> bool { self.messages.is_empty() }

  /// Record one question and its answer.
  pub fn exchange(&mut self, query: impl Into<String>, answer: impl Into<String>) {
    self.messages.push(Message { role: Speaker::User, content: query.into() });
    self.messages.push(Message { role: Speaker::Bot, content: answer.into() });
  }
}
