//! JSON Web Encryption transport parsing.
//!
//! This crate turns a serialized JWE into a canonical, immutable
//! [`ParsedJwe`] value that a decryption pipeline can consume. It accepts all
//! three serializations defined by RFC 7516:
//!
//! - Compact: `BASE64URL(header).BASE64URL(key).BASE64URL(iv).BASE64URL(ciphertext).BASE64URL(tag)`
//! - General JSON: an object with a `recipients` array
//! - Flattened JSON: an object with `encrypted_key` and `header` at the top level
//!
//! # Architecture
//!
//! - `types`: Serialization mode detection, recipients and header maps
//! - `jwe`: The compact and JSON decoders and the `ParsedJwe` model
//! - `config`: Limits applied to untrusted input
//! - `error`: Error types and handling
//!
//! # Examples
//!
//! ```rust
//! use jose_jwe_core::{ParsedJwe, SerializationMode};
//!
//! let input = r#"{
//!     "protected": "eyJlbmMiOiJBMTI4R0NNIn0",
//!     "iv": "aXZpdml2",
//!     "ciphertext": "Y2lwaGVy",
//!     "tag": "dGFndGFn",
//!     "recipients": [
//!         {"encrypted_key": "a2V5", "header": {"kid": "k1"}},
//!         {"encrypted_key": "a2V5Mg", "header": {"kid": "k2"}}
//!     ]
//! }"#;
//!
//! let jwe = ParsedJwe::parse(input)?;
//! assert_eq!(jwe.mode(), SerializationMode::Json);
//! assert_eq!(jwe.recipients().len(), 2);
//! assert_eq!(jwe.recipients()[1].header()["kid"], "k2");
//! # Ok::<(), jose_jwe_core::Error>(())
//! ```
//!
//! # Security Considerations
//!
//! - Parsing does not authenticate anything; treat every field as untrusted
//!   until the authentication tag has been verified
//! - Use [`ParseOptions`] to bound input size and recipient count

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod jwe;
pub mod prelude;
pub mod types;
pub mod utils;


pub use config::ParseOptions;
pub use error::{Error, ErrorKind, Result};
pub use jwe::ParsedJwe;
pub use types::{HeaderMap, Recipient, SerializationMode};
