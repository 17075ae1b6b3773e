//! Core type definitions shared by both serializations.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// A JOSE header: parameter names mapped to arbitrary JSON values.
pub type HeaderMap = HashMap<String, serde_json::Value>;

/// The textual shape a JWE arrived in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SerializationMode {
    /// Five dot-separated base64url segments, one implicit recipient
    Compact,
    /// General or flattened JSON object
    Json,
}

impl SerializationMode {
    /// Classifies raw input by its first non-whitespace character.
    ///
    /// Input starting with `{` is treated as JSON, everything else as
    /// compact. No validation happens here; malformed input is rejected by
    /// the decoder for the chosen mode.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use jose_jwe_core::SerializationMode;
    ///
    /// assert_eq!(SerializationMode::detect("  {\"iv\":\"\"}"), SerializationMode::Json);
    /// assert_eq!(SerializationMode::detect("a.b.c.d.e"), SerializationMode::Compact);
    /// ```
    #[must_use]
    pub fn detect(input: &str) -> Self {
        if input.trim().starts_with('{') {
            Self::Json
        } else {
            Self::Compact
        }
    }
}

impl fmt::Display for SerializationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Compact => write!(f, "compact"),
            Self::Json => write!(f, "json"),
        }
    }
}

/// One key holder of a JWE.
///
/// Holds the encrypted content encryption key and the per-recipient header.
/// The key is empty for algorithms without a wrapped key, such as `dir`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recipient {
    encrypted_key: Vec<u8>,
    header: HeaderMap,
}

impl Recipient {
    pub(crate) fn new(encrypted_key: Vec<u8>, header: HeaderMap) -> Self {
        Self {
            encrypted_key,
            header,
        }
    }

    /// The decoded encrypted key
    #[must_use]
    pub fn encrypted_key(&self) -> &[u8] {
        &self.encrypted_key
    }

    /// The per-recipient unprotected header; empty when none was given
    #[must_use]
    pub fn header(&self) -> &HeaderMap {
        &self.header
    }
}
