//! [`GeminiGateway`]: reqwest client for the `generateContent` endpoint.

use std::time::Duration;

use satchel_core::{
  gateway::{Extractor, Summarizer},
  payload::DataUri,
};
use serde::de::DeserializeOwned;

use crate::{
  Error, Result,
  config::GatewayConfig,
  prompt,
  wire::{
    Content, ExtractionOutput, GenerateRequest, GenerateResponse, GenerationConfig,
    InlineData, Part, SummaryOutput,
  },
};

const API_KEY_HEADER: &str = "x-goog-api-key";

/// Talks to a Gemini-compatible model over HTTPS.
///
/// Cloning shares the underlying connection pool.
#[derive(Clone)]
pub struct GeminiGateway {
  client: reqwest::Client,
  config: GatewayConfig,
}

impl GeminiGateway {
  pub fn new(config: GatewayConfig) -> Result<Self> {
    let client = reqwest::Client::builder()
      .timeout(Duration::from_secs(config.timeout_seconds))
      .build()?;
    if config.api_key.is_none() {
      tracing::warn!("no gateway api key configured; requests will likely be rejected");
    }
    Ok(Self { client, config })
  }

  fn endpoint(&self) -> String {
    format!(
      "{}/models/{}:generateContent",
      self.config.api_base_url.trim_end_matches('/'),
      self.config.model
    )
  }

  /// Send `prompt` plus the PDF and decode the candidate text as `T`.
  async fn generate<T: DeserializeOwned>(
    &self,
    prompt: String,
    pdf: &DataUri,
    field: &str,
  ) -> Result<T> {
    let body = GenerateRequest {
      contents:          vec![Content {
        role:  "user",
        parts: vec![
          Part::Text { text: prompt },
          Part::Inline {
            inline_data: InlineData {
              mime_type: pdf.mime_type(),
              data:      pdf.base64_data(),
            },
          },
        ],
      }],
      generation_config: GenerationConfig::single_string(field),
    };

    let mut request = self.client.post(self.endpoint()).json(&body);
    if let Some(key) = &self.config.api_key {
      request = request.header(API_KEY_HEADER, key);
    }

    tracing::debug!(model = %self.config.model, field, "calling gateway");
    let response = request.send().await?;
    let status = response.status();
    if !status.is_success() {
      let body = response.text().await.unwrap_or_default();
      return Err(Error::Status { status: status.as_u16(), body });
    }

    let text = response
      .json::<GenerateResponse>()
      .await?
      .first_text()
      .ok_or(Error::NoCandidates)?;
    Ok(serde_json::from_str(&text)?)
  }
}

impl Summarizer for GeminiGateway {
  type Error = Error;

  async fn summarize(&self, pdf: &DataUri) -> Result<String> {
    let output: SummaryOutput = self.generate(prompt::summarize(), pdf, "summary").await?;
    non_empty(output.summary, "summary")
  }
}

impl Extractor for GeminiGateway {
  type Error = Error;

  async fn extract(&self, pdf: &DataUri, query: &str) -> Result<String> {
    let output: ExtractionOutput = self
      .generate(prompt::extract(query), pdf, "extractedContent")
      .await?;
    non_empty(output.extracted_content, "extraction")
  }
}

fn non_empty(text: String, what: &'static str) -> Result<String> {
  let trimmed = text.trim();
  if trimmed.is_empty() {
    return Err(Error::EmptyOutput(what));
  }
  Ok(trimmed.to_owned())
}
