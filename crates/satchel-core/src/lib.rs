//! Domain model for the Satchel document library.
//!
//! Owns the subject and document registries, their persistence contract
//! against a [`store::KvStore`], and the gateway traits the AI backends
//! implement. No HTTP or SQL lives here.

// Gateway traits are implemented with native `async fn`; their futures are
// declared `Send` on the trait itself.
#![allow(async_fn_in_trait)]

pub mod chat;
pub mod document;
pub mod error;
pub mod gateway;
pub mod library;
pub mod payload;
pub mod preferences;
pub mod session;
pub mod store;
pub mod subject;
pub mod upload;

mod persist;

pub use error::{Error, Result};
pub use library::Library;

#[cfg(test)]
mod tests;
