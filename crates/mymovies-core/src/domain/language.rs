//! Language preference value.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A locale tag such as `zh-TW` or `en-US`.
///
/// The empty tag means "unset": the remote catalog then answers in its
/// default language.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LanguageTag(String);

impl LanguageTag {
    /// Create a tag from any string. Surrounding whitespace is dropped.
    pub fn new(tag: impl Into<String>) -> Self {
        let tag = tag.into();
        let trimmed = tag.trim();
        if trimmed.len() == tag.len() {
            Self(tag)
        } else {
            Self(trimmed.to_string())
        }
    }

    /// The unset tag.
    #[must_use]
    pub const fn unset() -> Self {
        Self(String::new())
    }

    /// Whether no language has been chosen.
    #[must_use]
    pub fn is_unset(&self) -> bool {
        self.0.is_empty()
    }

    /// The tag as a string slice (empty when unset).
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The value to send as a `language` query parameter, if any.
    #[must_use]
    pub fn as_query(&self) -> Option<&str> {
        if self.is_unset() { None } else { Some(&self.0) }
    }
}

impl fmt::Display for LanguageTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LanguageTag {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for LanguageTag {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}
