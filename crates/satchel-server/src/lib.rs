//! Satchel server wiring: configuration, the HTTP application and the
//! command-line import path.

use std::path::{Path, PathBuf};

use axum::Router;
use satchel_api::{AppState, api_router};
use satchel_core::{
  Library,
  document::Document,
  gateway::{Extractor, Summarizer},
  store::KvStore,
  upload::{self, UploadRequest},
};
use satchel_gateway::GatewayConfig;
use serde::Deserialize;
use tower_http::trace::TraceLayer;

// ─── Configuration ───────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `SATCHEL_*` environment variables.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:       String,
  #[serde(default = "default_port")]
  pub port:       u16,
  #[serde(default = "default_store_path")]
  pub store_path: PathBuf,
  #[serde(default)]
  pub gateway:    GatewayConfig,
}

fn default_host() -> String { "127.0.0.1".to_owned() }

fn default_port() -> u16 { 8080 }

fn default_store_path() -> PathBuf { PathBuf::from("~/.local/share/satchel/satchel.db") }

impl ServerConfig {
  /// Load from an optional TOML file, then overlay the environment.
  ///
  /// Nested keys use a double underscore: `SATCHEL_GATEWAY__API_KEY`.
  pub fn load(path: &Path) -> Result<Self, config::ConfigError> {
    config::Config::builder()
      .add_source(config::File::from(path).required(false))
      .add_source(
        config::Environment::with_prefix("SATCHEL")
          .prefix_separator("_")
          .separator("__"),
      )
      .build()?
      .try_deserialize()
  }

  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}

// ─── Application ─────────────────────────────────────────────────────────────

/// The full HTTP application: the API under `/api`, with request tracing.
pub fn app<S, G>(state: AppState<S, G>) -> Router
where
  S: KvStore + 'static,
  G: Summarizer + Extractor + 'static,
{
  Router::new()
    .nest("/api", api_router(state))
    .layer(TraceLayer::new_for_http())
}

// ─── Import ──────────────────────────────────────────────────────────────────

/// Read the PDF at `path`, summarize it and file it under `subject` in the
/// library's current scope.
pub async fn import_pdf<S, G>(
  library: &mut Library<S>,
  gateway: &G,
  path: &Path,
  subject: &str,
) -> satchel_core::Result<Document>
where
  S: KvStore,
  G: Summarizer,
{
  let (name, payload) = upload::read_pdf(path).await?;
  let request = UploadRequest::new(name, subject, payload)?;
  let document = upload::summarize_upload(gateway, request).await;
  library.add_document(document.clone())?;
  Ok(document)
}
