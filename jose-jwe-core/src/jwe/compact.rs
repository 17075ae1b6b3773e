//! Compact serialization: `header.encrypted_key.iv.ciphertext.tag`.

use super::{ParsedJwe, Parts};
use crate::error::{Error, Result};
use crate::types::{HeaderMap, Recipient, SerializationMode};
use crate::utils::{decode_segment, encode_segment};

/// Number of dot-separated segments in a compact JWE
pub const COMPACT_SEGMENTS: usize = 5;

/// Decodes a compact serialized JWE.
///
/// The result has exactly one recipient with an empty header, no
/// unprotected header and no AAD. Empty segments decode to empty byte
/// vectors; an empty encrypted key is how `dir` and `ECDH-ES` tokens are
/// transmitted.
///
/// # Errors
/// * `Error::SegmentCount` - If the input does not split into five segments
/// * `Error::Base64` - If a segment is not valid unpadded base64url
pub fn parse_compact(input: &str) -> Result<ParsedJwe> {
    let segments: [&str; COMPACT_SEGMENTS] = input
        .split('.')
        .collect::<Vec<_>>()
        .try_into()
        .map_err(|segments: Vec<&str>| Error::SegmentCount {
            expected: COMPACT_SEGMENTS,
            found: segments.len(),
        })?;
    let [protected, encrypted_key, iv, ciphertext, tag] = segments;

    let protected_header_bytes = decode_segment("protected", protected)?;
    let encrypted_key = decode_segment("encrypted_key", encrypted_key)?;
    let iv = decode_segment("iv", iv)?;
    let ciphertext = decode_segment("ciphertext", ciphertext)?;
    let auth_tag = decode_segment("tag", tag)?;

    Ok(ParsedJwe::build(
        Parts {
            protected_header_bytes,
            unprotected_header: None,
            recipients: vec![Recipient::new(encrypted_key, HeaderMap::new())],
            aad: None,
            iv,
            ciphertext,
            auth_tag,
        },
        SerializationMode::Compact,
    ))
}

impl ParsedJwe {
    /// Re-encodes this JWE in compact form.
    ///
    /// # Errors
    /// * `Error::InvalidFormat` - If the value has more than one recipient,
    ///   a non-empty recipient header, an unprotected header or AAD, none of
    ///   which the compact form can carry
    pub fn to_compact(&self) -> Result<String> {
        let [recipient] = self.recipients() else {
            return Err(Error::InvalidFormat(format!(
                "compact serialization requires one recipient, found {}",
                self.recipients().len()
            )));
        };
        if !recipient.header().is_empty() {
            return Err(Error::InvalidFormat(
                "compact serialization cannot carry a per-recipient header".into(),
            ));
        }
        if self.unprotected_header().is_some() {
            return Err(Error::InvalidFormat(
                "compact serialization cannot carry an unprotected header".into(),
            ));
        }
        if self.aad().is_some() {
            return Err(Error::InvalidFormat(
                "compact serialization cannot carry AAD".into(),
            ));
        }

        Ok([
            self.protected_header_bytes(),
            recipient.encrypted_key(),
            self.iv(),
            self.ciphertext(),
            self.auth_tag(),
        ]
        .map(encode_segment)
        .join("."))
    }
}
