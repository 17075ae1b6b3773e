//! Error types for the jose-jwe-core crate.

use thiserror::Error;

/// Broad category of a parse failure.
///
/// Callers that only need to know whether the token was structurally wrong
/// or carried a bad base64url field can match on this instead of the
/// individual [`Error`] variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The serialization is structurally invalid (segment count, JSON shape,
    /// missing member, configured limit exceeded).
    Format,
    /// A member expected to be base64url could not be decoded.
    Encoding,
}

/// Error type for the JWE parser
#[derive(Debug, Error)]
pub enum Error {
    /// The compact serialization did not have the expected number of segments
    #[error("Invalid compact serialization: expected {expected} segments, found {found}")]
    SegmentCount {
        /// Number of segments a compact JWE must have
        expected: usize,
        /// Number of segments found in the input
        found: usize,
    },
    /// Missing required field
    #[error("Missing required field: {0}")]
    MissingField(&'static str),
    /// The JSON serialization could not be deserialized
    #[error("Invalid JSON serialization: {0}")]
    Json(#[from] serde_json::Error),
    /// Base64url decode error
    #[error("Base64url decode error in {field}: {source}")]
    Base64 {
        /// Name of the member or segment that failed to decode
        field: &'static str,
        /// Underlying decoder error
        #[source]
        source: base64::DecodeError,
    },
    /// Input exceeds the configured size limit
    #[error("Input too large: {actual} bytes exceeds limit of {limit}")]
    InputTooLarge {
        /// Configured maximum
        limit: usize,
        /// Actual input length
        actual: usize,
    },
    /// More recipients than the configured limit
    #[error("Too many recipients: {actual} exceeds limit of {limit}")]
    TooManyRecipients {
        /// Configured maximum
        limit: usize,
        /// Number of recipients in the input
        actual: usize,
    },
    /// A header parameter occurs in more than one of the protected,
    /// unprotected and per-recipient headers
    #[error("Duplicate header parameter: {0}")]
    DuplicateHeaderParameter(String),
    /// Invalid format error
    #[error("Invalid format: {0}")]
    InvalidFormat(String),
}

impl Error {
    /// Returns the category this error belongs to.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Base64 { .. } => ErrorKind::Encoding,
            Self::SegmentCount { .. }
            | Self::MissingField(_)
            | Self::Json(_)
            | Self::InputTooLarge { .. }
            | Self::TooManyRecipients { .. }
            | Self::DuplicateHeaderParameter(_)
            | Self::InvalidFormat(_) => ErrorKind::Format,
        }
    }
}

/// Result type for the JWE parser
pub type Result<T> = std::result::Result<T, Error>;
