//! JWE (JSON Web Encryption) transport parsing.
//!
//! A JWE reaches a decryption pipeline either as a compact, dot-separated
//! string or as a JSON object in the general (many recipients) or flattened
//! (one recipient) layout of RFC 7516. This module detects which one it is,
//! decodes every base64url member and normalizes the result into a single
//! [`ParsedJwe`] value. No key unwrapping, decryption or tag verification
//! happens here.
//!
//! # Examples
//!
//! ```rust
//! use jose_jwe_core::{ParsedJwe, SerializationMode};
//!
//! let jwe: ParsedJwe = "eyJhbGciOiJBMTI4S1ciLCJlbmMiOiJBMTI4R0NNIn0.c2VjcmV0a2V5.aXZpdml2.Y2lwaGVy.dGFndGFn"
//!     .parse()
//!     .unwrap();
//!
//! assert_eq!(jwe.mode(), SerializationMode::Compact);
//! assert_eq!(jwe.recipients()[0].encrypted_key(), b"secretkey");
//! assert!(jwe.aad().is_none());
//! ```

use std::str::FromStr;

use crate::config::ParseOptions;
use crate::error::{Error, Result};
use crate::types::{HeaderMap, Recipient, SerializationMode};

pub mod compact;
pub mod header;
pub mod json;

/// A decoded JWE, independent of the serialization it was read from.
///
/// Produced once by [`ParsedJwe::parse`] and never modified afterwards.
/// All byte fields hold decoded data, not base64url text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedJwe {
    protected_header_bytes: Vec<u8>,
    unprotected_header: Option<HeaderMap>,
    recipients: Vec<Recipient>,
    aad: Option<Vec<u8>>,
    iv: Vec<u8>,
    ciphertext: Vec<u8>,
    auth_tag: Vec<u8>,
    mode: SerializationMode,
}

/// The decoded members common to both serializations.
pub(crate) struct Parts {
    pub protected_header_bytes: Vec<u8>,
    pub unprotected_header: Option<HeaderMap>,
    pub recipients: Vec<Recipient>,
    pub aad: Option<Vec<u8>>,
    pub iv: Vec<u8>,
    pub ciphertext: Vec<u8>,
    pub auth_tag: Vec<u8>,
}

impl ParsedJwe {
    /// Parses a compact or JSON serialized JWE without size limits.
    ///
    /// Use [`ParsedJwe::parse_with`] and [`ParseOptions::recommended`] for
    /// input from untrusted peers.
    ///
    /// # Errors
    /// * `Error::SegmentCount` - If compact input does not have five segments
    /// * `Error::Json` - If JSON input is malformed or has wrongly typed members
    /// * `Error::MissingField` - If a required JSON member is absent
    /// * `Error::Base64` - If any member fails base64url decoding
    pub fn parse(input: &str) -> Result<Self> {
        Self::parse_with(input, &ParseOptions::default())
    }

    /// Parses a compact or JSON serialized JWE using the given limits.
    ///
    /// # Errors
    /// As [`ParsedJwe::parse`], plus:
    /// * `Error::InputTooLarge` / `Error::TooManyRecipients` - If a limit is exceeded
    pub fn parse_with(input: &str, options: &ParseOptions) -> Result<Self> {
        if input.len() > options.max_input_len {
            return Err(Error::InputTooLarge {
                limit: options.max_input_len,
                actual: input.len(),
            });
        }

        let mode = SerializationMode::detect(input);
        tracing::debug!(%mode, "detected JWE serialization");

        let input = input.trim();
        let parsed = match mode {
            SerializationMode::Compact => compact::parse_compact(input)?,
            SerializationMode::Json => json::parse_json(input, options)?,
        };

        tracing::debug!(
            %mode,
            recipients = parsed.recipients.len(),
            "parsed JWE"
        );
        Ok(parsed)
    }

    /// Assembles the canonical value from decoded members.
    pub(crate) fn build(parts: Parts, mode: SerializationMode) -> Self {
        debug_assert!(!parts.recipients.is_empty());
        Self {
            protected_header_bytes: parts.protected_header_bytes,
            unprotected_header: parts.unprotected_header,
            recipients: parts.recipients,
            aad: parts.aad,
            iv: parts.iv,
            ciphertext: parts.ciphertext,
            auth_tag: parts.auth_tag,
            mode,
        }
    }

    /// The decoded protected header, exactly as transmitted.
    ///
    /// Empty when a JSON serialization has no `protected` member.
    #[must_use]
    pub fn protected_header_bytes(&self) -> &[u8] {
        &self.protected_header_bytes
    }

    /// The shared unprotected header.
    ///
    /// Always `None` for compact input. For JSON input, `None` means the
    /// `unprotected` member was absent, which is not the same as `Some` of
    /// an empty map.
    #[must_use]
    pub fn unprotected_header(&self) -> Option<&HeaderMap> {
        self.unprotected_header.as_ref()
    }

    /// The recipients in input order. Never empty.
    #[must_use]
    pub fn recipients(&self) -> &[Recipient] {
        &self.recipients
    }

    /// Additional authenticated data, if the JSON serialization carried any
    #[must_use]
    pub fn aad(&self) -> Option<&[u8]> {
        self.aad.as_deref()
    }

    /// The initialization vector
    #[must_use]
    pub fn iv(&self) -> &[u8] {
        &self.iv
    }

    /// The ciphertext
    #[must_use]
    pub fn ciphertext(&self) -> &[u8] {
        &self.ciphertext
    }

    /// The authentication tag
    #[must_use]
    pub fn auth_tag(&self) -> &[u8] {
        &self.auth_tag
    }

    /// The serialization this value was parsed from
    #[must_use]
    pub fn mode(&self) -> SerializationMode {
        self.mode
    }
}

impl FromStr for ParsedJwe {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}
