//! Practice identifiers.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Stable, human-assigned identifier of a practice.
///
/// Ids are kebab-case: lowercase ASCII letters and digits, with single
/// hyphens as separators (`continuous-integration`, `tdd`, `ci-2`).
/// Use [`PracticeId::parse`] to obtain a validated id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PracticeId(String);

impl PracticeId {
    /// Parse and validate a kebab-case practice id.
    ///
    /// Surrounding whitespace is not trimmed; `" tdd"` is rejected.
    pub fn parse(s: &str) -> Result<Self> {
        validate_kebab_case(s).map_err(|reason| Error::InvalidId {
            id: s.to_string(),
            reason: reason.to_string(),
        })?;
        Ok(Self(s.to_string()))
    }

    /// Wrap a string without validating it.
    ///
    /// Intended for ids that were already validated, such as ids read back
    /// out of a built graph.
    pub fn new_unchecked(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PracticeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for PracticeId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for PracticeId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Check the kebab-case rules, returning the first violated rule.
///
/// Equivalent to the regex `^[a-z0-9]+(-[a-z0-9]+)*$`, checked by hand so each
/// failure gets its own message.
fn validate_kebab_case(s: &str) -> std::result::Result<(), &'static str> {
    if s.is_empty() {
        return Err("id cannot be empty");
    }

    if !s
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
    {
        return Err("id must contain only lowercase letters, digits, and hyphens");
    }

    if s.starts_with('-') {
        return Err("id cannot start with a hyphen");
    }

    if s.ends_with('-') {
        return Err("id cannot end with a hyphen");
    }

    if s.contains("--") {
        return Err("id cannot contain consecutive hyphens");
    }

    Ok(())
}
