// SPDX-License-Identifier: MPL-2.0
//! Content references.
//!
//! A [`ContentReference`] names a content-addressed object (`sha1-…`,
//! `sha224-…`). The detail view never looks inside it: references are only
//! compared, hashed, and pasted into URLs.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Opaque, immutable identifier of a content-addressed object.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ContentReference(String);

impl ContentReference {
    /// Parses a reference, rejecting empty or whitespace-only input.
    pub fn parse(raw: impl Into<String>) -> Result<Self> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(Error::Snapshot("empty content reference".to_string()));
        }
        if trimmed.len() != raw.len() {
            return Ok(Self(trimmed.to_string()));
        }
        Ok(Self(raw))
    }

    /// Returns the reference as it appears on the wire.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContentReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ContentReference {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for ContentReference {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(value)
    }
}

impl From<ContentReference> for String {
    fn from(reference: ContentReference) -> Self {
        reference.0
    }
}
