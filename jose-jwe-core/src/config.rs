//! Parser limits.
//!
//! The parser itself is stateless; these options bound how much work a single
//! call may do on untrusted input. The default imposes no limits, so
//! [`ParsedJwe::parse`](crate::ParsedJwe::parse) accepts every well-formed JWE.

use serde::Deserialize;

/// Suggested maximum input length in bytes (256 KiB)
pub const RECOMMENDED_MAX_INPUT_LEN: usize = 256 * 1024;

/// Suggested maximum number of recipients in a JSON serialization
pub const RECOMMENDED_MAX_RECIPIENTS: usize = 100;

/// Configuration for [`ParsedJwe::parse_with`](crate::ParsedJwe::parse_with).
///
/// # Examples
///
/// ```rust
/// use jose_jwe_core::ParseOptions;
///
/// let options = ParseOptions::default().with_max_recipients(4);
/// assert_eq!(options.max_recipients, 4);
/// assert_eq!(options.max_input_len, usize::MAX);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ParseOptions {
    /// Maximum length of the raw input, in bytes
    pub max_input_len: usize,

    /// Maximum number of entries in a JSON `recipients` array
    pub max_recipients: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            max_input_len: usize::MAX,
            max_recipients: usize::MAX,
        }
    }
}

impl ParseOptions {
    /// Limits suited to input from untrusted peers: 256 KiB and 100 recipients.
    #[must_use]
    pub fn recommended() -> Self {
        Self {
            max_input_len: RECOMMENDED_MAX_INPUT_LEN,
            max_recipients: RECOMMENDED_MAX_RECIPIENTS,
        }
    }

    /// Sets the maximum input length.
    #[must_use]
    pub fn with_max_input_len(mut self, max_input_len: usize) -> Self {
        self.max_input_len = max_input_len;
        self
    }

    /// Sets the maximum number of recipients.
    #[must_use]
    pub fn with_max_recipients(mut self, max_recipients: usize) -> Self {
        self.max_recipients = max_recipients;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_unbounded() {
        let options = ParseOptions::default();
        assert_eq!(options.max_input_len, usize::MAX);
        assert_eq!(options.max_recipients, usize::MAX);
    }

    #[test]
    fn test_recommended_limits() {
        let options = ParseOptions::recommended();
        assert_eq!(options.max_input_len, RECOMMENDED_MAX_INPUT_LEN);
        assert_eq!(options.max_recipients, RECOMMENDED_MAX_RECIPIENTS);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let options: ParseOptions = serde_json::from_str(r#"{"max_recipients": 3}"#).unwrap();
        assert_eq!(options.max_recipients, 3);
        assert_eq!(options.max_input_len, usize::MAX);
    }
}
