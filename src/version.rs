//! Dotted numeric version strings.

use crate::error::{Error, Result};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

/// A dotted numeric version such as `114.0.5735.90`.
///
/// Ordering and equality are component-wise, left to right; missing trailing
/// components compare as zero, so `1.2` == `1.2.0` and `1.2` < `1.2.1`.
/// There are no semantic-versioning rules: four components are the norm for
/// Chrome, and pre-release tags are rejected outright.
///
/// A `Version` is immutable once parsed and displays as the text it was
/// parsed from (surrounding whitespace stripped).
#[derive(Debug, Clone)]
pub struct Version {
    text: String,
    parts: Vec<u64>,
}

impl Version {
    /// Parse a dot-separated numeric version string.
    ///
    /// Surrounding whitespace is stripped. Empty input, empty components, and
    /// non-numeric components are rejected; no partial value is ever
    /// produced.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MalformedVersion`] carrying the offending text.
    pub fn parse(text: &str) -> Result<Self> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(Error::MalformedVersion(text.to_string()));
        }

        let mut parts = Vec::new();
        for component in trimmed.split('.') {
            if component.is_empty() || !component.bytes().all(|b| b.is_ascii_digit()) {
                return Err(Error::MalformedVersion(text.to_string()));
            }
            let value = component
                .parse::<u64>()
                .map_err(|_| Error::MalformedVersion(text.to_string()))?;
            parts.push(value);
        }

        // Trailing zeros carry no ordering weight; stripping them makes the
        // component vectors compare exactly like zero-extended sequences.
        while parts.last() == Some(&0) {
            parts.pop();
        }

        Ok(Self {
            text: trimmed.to_string(),
            parts,
        })
    }
}

impl FromStr for Version {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.parts == other.parts
    }
}

impl Eq for Version {}

impl Hash for Version {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.parts.hash(state);
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        self.parts.cmp(&other.parts)
    }
}
