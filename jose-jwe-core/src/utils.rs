//! Base64url helpers for JWE members.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;

use crate::error::{Error, Result};

/// Decodes one unpadded base64url member.
///
/// `field` names the member for the error message. An empty string decodes
/// to an empty vector.
///
/// # Errors
/// * `Error::Base64` - If the input contains characters outside the
///   URL-safe alphabet, carries padding, or has non-canonical trailing bits
pub fn decode_segment(field: &'static str, segment: &str) -> Result<Vec<u8>> {
    let bytes = URL_SAFE_NO_PAD
        .decode(segment)
        .map_err(|source| Error::Base64 { field, source })?;
    tracing::trace!(field, len = bytes.len(), "decoded base64url member");
    Ok(bytes)
}

/// Encodes bytes as unpadded base64url.
#[must_use]
pub fn encode_segment(bytes: &[u8]) -> String {
    URL_SAFE_NO_PAD.encode(bytes)
}
