//! satchel-server binary.
//!
//! Reads `config.toml` (or the path given with `--config`), opens the SQLite
//! store and either serves the HTTP API or imports a single PDF.
//!
//! ```text
//! satchel-server serve --config config.toml
//! satchel-server import ~/notes/cells.pdf --subject Biology
//! ```

use std::{path::PathBuf, sync::Arc};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use satchel_api::AppState;
use satchel_core::Library;
use satchel_gateway::GeminiGateway;
use satchel_server::{ServerConfig, app, expand_tilde, import_pdf};
use satchel_store_sqlite::SqliteStore;
use tokio::net::TcpListener;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about = "Satchel document library server")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "config.toml", global = true)]
  config: PathBuf,

  #[command(subcommand)]
  command: Command,
}

#[derive(Subcommand)]
enum Command {
  /// Serve the JSON API over HTTP.
  Serve,
  /// Summarize a PDF and add it to the current profile's library.
  Import {
    file:    PathBuf,
    /// Subject to file the document under. Created if new.
    #[arg(long)]
    subject: String,
  },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
  tracing_subscriber::fmt()
    .with_env_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    )
    .init();

  let cli = Cli::parse();

  let config = ServerConfig::load(&cli.config).context("failed to load configuration")?;

  let store_path = expand_tilde(&config.store_path);
  if let Some(parent) = store_path.parent() {
    std::fs::create_dir_all(parent)
      .with_context(|| format!("failed to create {parent:?}"))?;
  }
  let store = SqliteStore::open(&store_path)
    .with_context(|| format!("failed to open store at {store_path:?}"))?;
  let mut library = Library::open(Arc::new(store));

  let gateway =
    GeminiGateway::new(config.gateway.clone()).context("failed to build gateway client")?;

  match cli.command {
    Command::Serve => serve(&config, library, gateway).await,
    Command::Import { file, subject } => {
      let document = import_pdf(&mut library, &gateway, &file, &subject)
        .await
        .with_context(|| format!("failed to import {file:?}"))?;
      println!("{}\t{}\t{}", document.id, document.subject, document.summary);
      Ok(())
    }
  }
}

async fn serve(
  config: &ServerConfig,
  library: Library<SqliteStore>,
  gateway: GeminiGateway,
) -> anyhow::Result<()> {
  let app = app(AppState::new(library, gateway));
  let address = config.address();

  tracing::info!("Listening on http://{address}");
  let listener = TcpListener::bind(&address)
    .await
    .with_context(|| format!("failed to bind {address}"))?;

  axum::serve(listener, app).await.context("server error")?;
  Ok(())
}
