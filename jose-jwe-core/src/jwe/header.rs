//! Header access for the decryption pipeline.

use std::fmt;

use serde::de::{Deserialize, Deserializer, MapAccess, Visitor};

use super::ParsedJwe;
use crate::error::{Error, Result};
use crate::types::{HeaderMap, Recipient};

/// Members of a JSON object in document order, repeated names included.
///
/// Deserializing straight into a `HashMap` keeps only the last value of a
/// repeated name.
struct HeaderEntries(Vec<(String, serde_json::Value)>);

impl<'de> Deserialize<'de> for HeaderEntries {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct EntriesVisitor;

        impl<'de> Visitor<'de> for EntriesVisitor {
            type Value = HeaderEntries;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a JSON object")
            }

            fn visit_map<A>(self, mut map: A) -> std::result::Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut entries = Vec::with_capacity(map.size_hint().unwrap_or_default());
                while let Some(entry) = map.next_entry()? {
                    entries.push(entry);
                }
                Ok(HeaderEntries(entries))
            }
        }

        deserializer.deserialize_map(EntriesVisitor)
    }
}

impl ParsedJwe {
    /// Parses the protected header bytes as a JSON object.
    ///
    /// An absent protected header yields an empty map.
    ///
    /// # Errors
    /// * `Error::Json` - If the decoded bytes are not a JSON object
    /// * `Error::DuplicateHeaderParameter` - If a member name occurs twice
    pub fn protected_header(&self) -> Result<HeaderMap> {
        if self.protected_header_bytes().is_empty() {
            return Ok(HeaderMap::new());
        }
        let HeaderEntries(entries) =
            serde_json::from_slice::<HeaderEntries>(self.protected_header_bytes())?;

        let mut header = HeaderMap::with_capacity(entries.len());
        for (name, value) in entries {
            if header.contains_key(&name) {
                return Err(Error::DuplicateHeaderParameter(name));
            }
            header.insert(name, value);
        }
        Ok(header)
    }

    /// Builds the JOSE header that applies to `recipient`.
    ///
    /// This is the union of the protected header, the shared unprotected
    /// header and the recipient's own header. A parameter name may appear in
    /// only one of them.
    ///
    /// # Errors
    /// * `Error::Json` - If the protected header is not a JSON object
    /// * `Error::DuplicateHeaderParameter` - If a name occurs more than once,
    ///   within the protected header or across the three headers
    pub fn joint_header(&self, recipient: &Recipient) -> Result<HeaderMap> {
        let mut joint = self.protected_header()?;
        let sources = self
            .unprotected_header()
            .into_iter()
            .chain(std::iter::once(recipient.header()));

        for header in sources {
            for (name, value) in header {
                if joint.contains_key(name) {
                    return Err(Error::DuplicateHeaderParameter(name.clone()));
                }
                joint.insert(name.clone(), value.clone());
            }
        }
        Ok(joint)
    }
}
