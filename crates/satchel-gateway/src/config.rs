//! Gateway connection settings.

use serde::Deserialize;

/// Settings for [`crate::GeminiGateway`], usually nested in the server's
/// configuration file under `[gateway]`.
#[derive(Debug, Clone, Deserialize)]
pub struct GatewayConfig {
  /// Base URL up to and excluding `/models`.
  #[serde(default = "default_api_base_url")]
  pub api_base_url:    String,
  #[serde(default = "default_model")]
  pub model:           String,
  /// Sent as `x-goog-api-key` when present.
  #[serde(default)]
  pub api_key:         Option<String>,
  #[serde(default = "default_timeout_seconds")]
  pub timeout_seconds: u64,
}

impl Default for GatewayConfig {
  fn default() -> Self {
    Self {
      api_base_url:    default_api_base_url(),
      model:           default_model(),
      api_key:         None,
      timeout_seconds: default_timeout_seconds(),
    }
  }
}

fn default_api_base_url() -> String {
  "https://generativelanguage.googleapis.com/v1beta".to_owned()
}

fn default_model() -> String { "gemini-2.0-flash".to_owned() }

fn default_timeout_seconds() -> u64 { 120 }
