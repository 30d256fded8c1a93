//! Embeddable document payloads.
//!
//! A PDF travels through the system as a `data:<mime>;base64,<data>` URI, the
//! same form a browser file reader produces. The URI is stored verbatim with
//! the document and handed unchanged to the gateways.

use std::fmt;

use base64::{Engine as _, engine::general_purpose::STANDARD as B64};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

pub const PDF_MIME: &str = "application/pdf";

const SCHEME: &str = "data:";
const BASE64_MARKER: &str = ";base64,";

/// A validated base64 data URI.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DataUri {
  raw:        String,
  /// Byte offset of the `;base64,` marker.
  marker_at:  usize,
}

impl DataUri {
  /// Encode `bytes` as a data URI with the given MIME type.
  pub fn from_bytes(mime_type: &str, bytes: &[u8]) -> Self {
    let raw = format!("{SCHEME}{mime_type}{BASE64_MARKER}{}", B64.encode(bytes));
    let marker_at = SCHEME.len() + mime_type.len();
    Self { raw, marker_at }
  }

  /// Encode PDF bytes.
  pub fn pdf(bytes: &[u8]) -> Self { Self::from_bytes(PDF_MIME, bytes) }

  /// Parse a data URI. Only the base64 form is accepted.
  pub fn parse(raw: impl Into<String>) -> Result<Self> {
    let raw = raw.into();
    let Some(rest) = raw.strip_prefix(SCHEME) else {
      return Err(Error::InvalidDataUri("missing `data:` scheme".into()));
    };
    let Some(offset) = rest.find(BASE64_MARKER) else {
      return Err(Error::InvalidDataUri("payload is not base64-encoded".into()));
    };
    if offset == 0 {
      return Err(Error::InvalidDataUri("missing MIME type".into()));
    }
    Ok(Self { marker_at: SCHEME.len() + offset, raw })
  }

  pub fn as_str(&self) -> &str { &self.raw }

  pub fn mime_type(&self) -> &str { &self.raw[SCHEME.len()..self.marker_at] }

  /// The base64 text after the marker, without decoding it.
  pub fn base64_data(&self) -> &str {
    &self.raw[self.marker_at + BASE64_MARKER.len()..]
  }

  pub fn decode(&self) -> Result<Vec<u8>> {
    B64
      .decode(self.base64_data())
      .map_err(|e| Error::InvalidDataUri(e.to_string()))
  }
}

impl TryFrom<String> for DataUri {
  type Error = Error;

  fn try_from(raw: String) -> Result<Self> { Self::parse(raw) }
}

impl From<DataUri> for String {
  fn from(uri: DataUri) -> Self { uri.raw }
}

// Payloads are megabytes of base64; keep them out of debug output.
impl fmt::Debug for DataUri {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("DataUri")
      .field("mime_type", &self.mime_type())
      .field("len", &self.raw.len())
      .finish()
  }
}
