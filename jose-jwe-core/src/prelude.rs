//! Prelude module for commonly used types.
//!
//! Import everything from this module with `use jose_jwe_core::prelude::*`.
//!
//! # Example
//!
//! ```rust
//! use jose_jwe_core::prelude::*;
//!
//! fn first_key(token: &str) -> Result<Vec<u8>> {
//!     let jwe = ParsedJwe::parse_with(token, &ParseOptions::recommended())?;
//!     Ok(jwe.recipients()[0].encrypted_key().to_vec())
//! }
//! ```

// Re-export error types
pub use crate::error::{Error, ErrorKind, Result};

// Re-export configuration
pub use crate::config::ParseOptions;

// Re-export model types
pub use crate::jwe::ParsedJwe;
pub use crate::types::{HeaderMap, Recipient, SerializationMode};
