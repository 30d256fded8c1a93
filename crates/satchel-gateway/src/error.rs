//! Error type for `satchel-gateway`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("http error: {0}")]
  Http(#[from] reqwest::Error),

  #[error("gateway returned {status}: {body}")]
  Status { status: u16, body: String },

  #[error("response contained no candidate text")]
  NoCandidates,

  #[error("malformed structured output: {0}")]
  Malformed(#[from] serde_json::Error),

  #[error("model returned an empty {0}")]
  EmptyOutput(&'static str),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
