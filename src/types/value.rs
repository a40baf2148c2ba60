//! Authority-qualified string values
//!
//! Many PREMIS leaf elements carry an optional pointer to the controlled
//! vocabulary the value was drawn from (`authority`, `authorityURI`,
//! `valueURI` attributes). This wrapper keeps the text together with those
//! attributes so they survive a round trip.

use std::fmt;

/// A text value with optional authority attribution
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StringPlusAuthority {
    /// The text content
    pub text: String,
    /// Name of the controlling vocabulary
    pub authority: Option<String>,
    /// URI of the controlling vocabulary
    pub authority_uri: Option<String>,
    /// URI of the value within the vocabulary
    pub value_uri: Option<String>,
}

impl StringPlusAuthority {
    /// Create a value with no authority attribution
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// Create a value attributed to a named authority
    pub fn with_authority(text: impl Into<String>, authority: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            authority: Some(authority.into()),
            ..Self::default()
        }
    }

    /// Check whether any authority attribute is set
    pub fn has_authority(&self) -> bool {
        self.authority.is_some() || self.authority_uri.is_some() || self.value_uri.is_some()
    }
}

impl fmt::Display for StringPlusAuthority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

impl From<&str> for StringPlusAuthority {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

impl From<String> for StringPlusAuthority {
    fn from(text: String) -> Self {
        Self::new(text)
    }
}
