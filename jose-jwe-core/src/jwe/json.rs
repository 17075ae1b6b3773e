//! General and flattened JSON serializations.
//!
//! Both layouts share one wire struct. Which one a document uses is decided
//! once, in `JweJson::into_shape`: a non-empty `recipients` array selects
//! the general layout, anything else falls back to the flattened layout with
//! `encrypted_key` and `header` at the top level.

use serde::{Deserialize, Serialize};

use super::{ParsedJwe, Parts};
use crate::config::ParseOptions;
use crate::error::{Error, Result};
use crate::types::{HeaderMap, Recipient, SerializationMode};
use crate::utils::{decode_segment, encode_segment};

/// One entry of the `recipients` array.
#[derive(Debug, Default, Serialize, Deserialize)]
struct RecipientJson {
    #[serde(skip_serializing_if = "Option::is_none")]
    encrypted_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    header: Option<HeaderMap>,
}

/// The JSON serialization as it appears on the wire.
///
/// Required members are `Option` too so that a missing one is reported as
/// `Error::MissingField` rather than a generic deserialization error.
#[derive(Debug, Default, Serialize, Deserialize)]
struct JweJson {
    #[serde(skip_serializing_if = "Option::is_none")]
    protected: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    unprotected: Option<HeaderMap>,
    #[serde(skip_serializing_if = "Option::is_none")]
    recipients: Option<Vec<RecipientJson>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    encrypted_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    header: Option<HeaderMap>,
    #[serde(skip_serializing_if = "Option::is_none")]
    aad: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    iv: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    ciphertext: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tag: Option<String>,
}

/// Recipient layout of a JSON document.
enum RecipientShape {
    /// `recipients: [{encrypted_key, header?}, ...]`
    General(Vec<RecipientJson>),
    /// `encrypted_key` and `header` at the top level
    Flattened(RecipientJson),
}

impl RecipientShape {
    fn into_recipients(self, options: &ParseOptions) -> Result<Vec<Recipient>> {
        match self {
            Self::General(entries) => {
                if entries.len() > options.max_recipients {
                    return Err(Error::TooManyRecipients {
                        limit: options.max_recipients,
                        actual: entries.len(),
                    });
                }
                entries.into_iter().map(RecipientJson::decode).collect()
            }
            Self::Flattened(entry) => Ok(vec![entry.decode()?]),
        }
    }
}

impl RecipientJson {
    fn decode(self) -> Result<Recipient> {
        let encrypted_key = self
            .encrypted_key
            .ok_or(Error::MissingField("encrypted_key"))?;
        Ok(Recipient::new(
            decode_segment("encrypted_key", &encrypted_key)?,
            self.header.unwrap_or_default(),
        ))
    }
}

struct Members {
    protected: Option<String>,
    unprotected: Option<HeaderMap>,
    aad: Option<String>,
    iv: Option<String>,
    ciphertext: Option<String>,
    tag: Option<String>,
}

impl JweJson {
    fn into_shape(self) -> (RecipientShape, Members) {
        let shape = match self.recipients {
            Some(recipients) if !recipients.is_empty() => RecipientShape::General(recipients),
            _ => RecipientShape::Flattened(RecipientJson {
                encrypted_key: self.encrypted_key,
                header: self.header,
            }),
        };
        let members = Members {
            protected: self.protected,
            unprotected: self.unprotected,
            aad: self.aad,
            iv: self.iv,
            ciphertext: self.ciphertext,
            tag: self.tag,
        };
        (shape, members)
    }
}

fn required(field: &'static str, value: Option<String>) -> Result<Vec<u8>> {
    let value = value.ok_or(Error::MissingField(field))?;
    decode_segment(field, &value)
}

fn optional(field: &'static str, value: Option<String>) -> Result<Option<Vec<u8>>> {
    value.map(|v| decode_segment(field, &v)).transpose()
}

/// Decodes a general or flattened JSON serialized JWE.
///
/// # Errors
/// * `Error::Json` - If the input is not a JSON object or a member has the
///   wrong JSON type
/// * `Error::MissingField` - If `iv`, `ciphertext`, `tag` or a required
///   `encrypted_key` is absent
/// * `Error::Base64` - If a base64url member fails to decode
/// * `Error::TooManyRecipients` - If `recipients` exceeds the configured limit
pub fn parse_json(input: &str, options: &ParseOptions) -> Result<ParsedJwe> {
    let document: JweJson = serde_json::from_str(input)?;
    let (shape, members) = document.into_shape();

    let iv = required("iv", members.iv)?;
    let ciphertext = required("ciphertext", members.ciphertext)?;
    let auth_tag = required("tag", members.tag)?;
    let protected_header_bytes = optional("protected", members.protected)?.unwrap_or_default();
    let aad = optional("aad", members.aad)?;

    if let RecipientShape::General(entries) = &shape {
        tracing::trace!(count = entries.len(), "general JSON serialization");
    } else {
        tracing::trace!("flattened JSON serialization");
    }
    let recipients = shape.into_recipients(options)?;

    Ok(ParsedJwe::build(
        Parts {
            protected_header_bytes,
            unprotected_header: members.unprotected,
            recipients,
            aad,
            iv,
            ciphertext,
            auth_tag,
        },
        SerializationMode::Json,
    ))
}

impl ParsedJwe {
    /// Re-encodes this JWE as JSON.
    ///
    /// A single recipient is written in the flattened layout, several in the
    /// general layout. Absent optional members are omitted, as are an empty
    /// protected header and empty per-recipient headers.
    ///
    /// # Errors
    /// * `Error::Json` - If serialization fails
    pub fn to_json(&self) -> Result<String> {
        let recipient_json = |recipient: &Recipient| RecipientJson {
            encrypted_key: Some(encode_segment(recipient.encrypted_key())),
            header: Some(recipient.header().clone()).filter(|h| !h.is_empty()),
        };

        let mut document = JweJson {
            protected: Some(self.protected_header_bytes())
                .filter(|p| !p.is_empty())
                .map(encode_segment),
            unprotected: self.unprotected_header().cloned(),
            aad: self.aad().map(encode_segment),
            iv: Some(encode_segment(self.iv())),
            ciphertext: Some(encode_segment(self.ciphertext())),
            tag: Some(encode_segment(self.auth_tag())),
            ..JweJson::default()
        };

        match self.recipients() {
            [single] => {
                let RecipientJson {
                    encrypted_key,
                    header,
                } = recipient_json(single);
                document.encrypted_key = encrypted_key;
                document.header = header;
            }
            many => document.recipients = Some(many.iter().map(recipient_json).collect()),
        }

        Ok(serde_json::to_string(&document)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn parse(value: &serde_json::Value) -> Result<ParsedJwe> {
        parse_json(&value.to_string(), &ParseOptions::default())
    }

    fn flattened() -> serde_json::Value {
        json!({
            "protected": "eyJlbmMiOiJBMTI4R0NNIn0",
            "iv": "aXZpdml2",
            "ciphertext": "Y2lwaGVy",
            "tag": "dGFndGFn",
            "encrypted_key": "a2V5a2V5"
        })
    }

    #[test]
    fn test_flattened() {
        let jwe = parse(&flattened()).unwrap();

        assert_eq!(jwe.mode(), SerializationMode::Json);
        assert_eq!(jwe.protected_header_bytes(), br#"{"enc":"A128GCM"}"#);
        assert_eq!(jwe.recipients().len(), 1);
        assert_eq!(jwe.recipients()[0].encrypted_key(), b"keykey");
        assert!(jwe.recipients()[0].header().is_empty());
        assert!(jwe.unprotected_header().is_none());
        assert!(jwe.aad().is_none());
        assert_eq!(jwe.iv(), b"iviviv");
        assert_eq!(jwe.ciphertext(), b"cipher");
        assert_eq!(jwe.auth_tag(), b"tagtag");
    }

    #[test]
    fn test_general_preserves_order() {
        let mut doc = flattened();
        doc.as_object_mut().unwrap().remove("encrypted_key");
        doc["recipients"] = json!([
            {"encrypted_key": "a2V5", "header": {"kid": "k1"}},
            {"encrypted_key": "a2V5Mg", "header": {"kid": "k2"}},
            {"encrypted_key": "a2V5Mw"}
        ]);

        let jwe = parse(&doc).unwrap();
        let recipients = jwe.recipients();
        assert_eq!(recipients.len(), 3);
        assert_eq!(recipients[0].encrypted_key(), b"key");
        assert_eq!(recipients[0].header()["kid"], "k1");
        assert_eq!(recipients[1].encrypted_key(), b"key2");
        assert_eq!(recipients[1].header()["kid"], "k2");
        assert_eq!(recipients[2].encrypted_key(), b"key3");
        assert!(recipients[2].header().is_empty());
    }

    #[test]
    fn test_recipients_take_precedence_over_top_level_key() {
        let mut doc = flattened();
        doc["recipients"] = json!([{"encrypted_key": "a2V5"}]);

        let jwe = parse(&doc).unwrap();
        assert_eq!(jwe.recipients().len(), 1);
        assert_eq!(jwe.recipients()[0].encrypted_key(), b"key");
    }

    #[test]
    fn test_empty_recipients_falls_back_to_flattened() {
        let mut doc = flattened();
        doc["recipients"] = json!([]);
        doc["header"] = json!({"kid": "top"});

        let jwe = parse(&doc).unwrap();
        assert_eq!(jwe.recipients().len(), 1);
        assert_eq!(jwe.recipients()[0].encrypted_key(), b"keykey");
        assert_eq!(jwe.recipients()[0].header()["kid"], "top");

        doc.as_object_mut().unwrap().remove("encrypted_key");
        let err = parse(&doc).unwrap_err();
        assert!(matches!(err, Error::MissingField("encrypted_key")));
        assert_eq!(err.kind(), ErrorKind::Format);
    }

    #[test]
    fn test_missing_required_members() {
        for field in ["iv", "ciphertext", "tag"] {
            let mut doc = flattened();
            doc.as_object_mut().unwrap().remove(field);
            let err = parse(&doc).unwrap_err();
            assert!(
                matches!(err, Error::MissingField(f) if f == field),
                "unexpected error for missing {field}: {err}"
            );
            assert_eq!(err.kind(), ErrorKind::Format);
        }
    }

    #[test]
    fn test_general_entry_without_key() {
        let mut doc = flattened();
        doc["recipients"] = json!([{"encrypted_key": "a2V5"}, {"header": {"kid": "k2"}}]);
        let err = parse(&doc).unwrap_err();
        assert!(matches!(err, Error::MissingField("encrypted_key")));
    }

    #[test]
    fn test_optional_members() {
        let mut doc = flattened();
        doc.as_object_mut().unwrap().remove("protected");
        doc["unprotected"] = json!({});
        doc["aad"] = json!("YWFk");

        let jwe = parse(&doc).unwrap();
        assert!(jwe.protected_header_bytes().is_empty());
        assert_eq!(jwe.unprotected_header(), Some(&HeaderMap::new()));
        assert_eq!(jwe.aad(), Some(&b"aad"[..]));
    }

    #[test]
    fn test_null_optional_members_are_absent() {
        let mut doc = flattened();
        doc["unprotected"] = serde_json::Value::Null;
        doc["aad"] = serde_json::Value::Null;

        let jwe = parse(&doc).unwrap();
        assert!(jwe.unprotected_header().is_none());
        assert!(jwe.aad().is_none());
    }

    #[test]
    fn test_arbitrary_header_values() {
        let mut doc = flattened();
        doc["unprotected"] = json!({
            "jku": "https://example.com/keys",
            "n": 42,
            "crit": ["exp"],
            "flag": true,
            "nothing": null,
            "epk": {"kty": "OKP", "crv": "X25519"}
        });

        let jwe = parse(&doc).unwrap();
        let header = jwe.unprotected_header().unwrap();
        assert_eq!(header["n"], 42);
        assert_eq!(header["crit"], json!(["exp"]));
        assert_eq!(header["flag"], true);
        assert!(header["nothing"].is_null());
        assert_eq!(header["epk"]["crv"], "X25519");
    }

    #[test]
    fn test_malformed_documents() {
        let options = ParseOptions::default();
        for input in ["{", "{\"iv\":", "{} trailing"] {
            let err = parse_json(input, &options).unwrap_err();
            assert!(matches!(err, Error::Json(_)), "{input}: {err}");
            assert_eq!(err.kind(), ErrorKind::Format);
        }

        let mut doc = flattened();
        doc["unprotected"] = json!("not an object");
        assert!(matches!(parse(&doc), Err(Error::Json(_))));

        let mut doc = flattened();
        doc["iv"] = json!(12);
        assert!(matches!(parse(&doc), Err(Error::Json(_))));
    }

    #[test]
    fn test_bad_base64_member() {
        let mut doc = flattened();
        doc["aad"] = json!("a+b/");
        let err = parse(&doc).unwrap_err();
        assert!(matches!(err, Error::Base64 { field: "aad", .. }));
        assert_eq!(err.kind(), ErrorKind::Encoding);
    }

    #[test]
    fn test_recipient_limit() {
        let mut doc = flattened();
        doc["recipients"] = json!([{"encrypted_key": "a2V5"}, {"encrypted_key": "a2V5"}]);
        let options = ParseOptions::default().with_max_recipients(1);
        let err = parse_json(&doc.to_string(), &options).unwrap_err();
        assert!(matches!(
            err,
            Error::TooManyRecipients {
                limit: 1,
                actual: 2
            }
        ));
    }

    #[test]
    fn test_to_json_layouts() {
        let jwe = parse(&flattened()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&jwe.to_json().unwrap()).unwrap();
        assert_eq!(value, flattened());

        let mut doc = flattened();
        doc.as_object_mut().unwrap().remove("encrypted_key");
        doc["aad"] = json!("YWFk");
        doc["unprotected"] = json!({"cty": "JWT"});
        doc["recipients"] = json!([
            {"encrypted_key": "a2V5", "header": {"kid": "k1"}},
            {"encrypted_key": "a2V5Mg"}
        ]);
        let jwe = parse(&doc).unwrap();
        let value: serde_json::Value = serde_json::from_str(&jwe.to_json().unwrap()).unwrap();
        assert_eq!(value, doc);
        assert_eq!(parse(&value).unwrap(), jwe);
    }
}
