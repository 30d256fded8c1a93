//! `generateContent` request and response bodies. Private to this crate.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

// ─── Request ─────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest<'a> {
  pub contents:          Vec<Content<'a>>,
  pub generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
pub struct Content<'a> {
  pub role:  &'static str,
  pub parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum Part<'a> {
  Text { text: String },
  Inline {
    #[serde(rename = "inlineData")]
    inline_data: InlineData<'a>,
  },
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData<'a> {
  pub mime_type: &'a str,
  /// Base64 payload, borrowed straight from the document's data URI.
  pub data:      &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
  pub response_mime_type: &'static str,
  pub response_schema:    Value,
}

impl GenerationConfig {
  /// Ask for a JSON object with a single required string `field`.
  pub fn single_string(field: &str) -> Self {
    Self {
      response_mime_type: "application/json",
      response_schema:    json!({
        "type": "OBJECT",
        "properties": { field: { "type": "STRING" } },
        "required": [field],
      }),
    }
  }
}

// ─── Response ────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct GenerateResponse {
  #[serde(default)]
  pub candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
pub struct Candidate {
  #[serde(default)]
  pub content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
pub struct CandidateContent {
  #[serde(default)]
  pub parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
pub struct ResponsePart {
  #[serde(default)]
  pub text: Option<String>,
}

impl GenerateResponse {
  /// Concatenated text of the first candidate, if it has any.
  pub fn first_text(self) -> Option<String> {
    let content = self.candidates.into_iter().next()?.content?;
    let text: String = content.parts.into_iter().filter_map(|p| p.text).collect();
    (!text.trim().is_empty()).then_some(text)
  }
}

// ─── Structured outputs ──────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct SummaryOutput {
  pub summary: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionOutput {
  pub extracted_content: String,
}
