//! HTTP gateway to the language model that summarizes PDFs and answers
//! questions about them.
//!
//! [`GeminiGateway`] implements both [`satchel_core::gateway::Summarizer`]
//! and [`satchel_core::gateway::Extractor`] against a `generateContent`
//! endpoint, sending the PDF inline and asking for structured JSON output.

mod client;
mod prompt;
mod wire;

pub mod config;
pub mod error;

pub use client::GeminiGateway;
pub use config::GatewayConfig;
pub use error::{Error, Result};
