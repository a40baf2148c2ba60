//! PREMIS identifiers
//!
//! An identifier is a (type, value) pair, e.g. ("UUID",
//! "8c9a...-..."). The same shape serves both as an entity's own key and as
//! the weak cross-entity references PREMIS calls "linking identifiers":
//! those reference another entity by identifier value only, never by
//! structural containment, so the document stays acyclic.

use crate::types::value::StringPlusAuthority;
use std::fmt;

/// A (type, value) identifier pair
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Identifier {
    /// Identifier type, e.g. "UUID" (may carry authority attribution)
    pub kind: StringPlusAuthority,
    /// Identifier value
    pub value: String,
    /// Optional simpleLink URI attribute on the identifier element
    pub simple_link: Option<String>,
}

impl Identifier {
    /// Create an identifier from a type term and value
    pub fn new(kind: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            kind: StringPlusAuthority::new(kind),
            value: value.into(),
            simple_link: None,
        }
    }

    /// Check whether this identifier has the given value
    pub fn matches(&self, value: &str) -> bool {
        self.value == value
    }

    /// Check whether this identifier has the given type and value
    pub fn matches_typed(&self, kind: &str, value: &str) -> bool {
        self.kind.text == kind && self.value == value
    }

    /// Check whether the identifier type is "UUID"
    pub fn is_uuid(&self) -> bool {
        self.kind.text == "UUID"
    }
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind.text, self.value)
    }
}

/// A weak reference to another entity, optionally qualified with roles
///
/// Roles describe what part the referenced entity played, e.g. an agent
/// linked as "implementer" of an event.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LinkingIdentifier {
    /// The referenced identifier
    pub identifier: Identifier,
    /// Roles of the referenced entity, in document order
    pub roles: Vec<StringPlusAuthority>,
}

impl LinkingIdentifier {
    /// Create a linking identifier without roles
    pub fn new(kind: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            identifier: Identifier::new(kind, value),
            roles: Vec::new(),
        }
    }

    /// Create a linking identifier with a single role
    pub fn with_role(
        kind: impl Into<String>,
        value: impl Into<String>,
        role: impl Into<String>,
    ) -> Self {
        Self {
            identifier: Identifier::new(kind, value),
            roles: vec![StringPlusAuthority::new(role)],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifier_matching() {
        let id = Identifier::new("UUID", "abc-123");
        assert!(id.is_uuid());
        assert!(id.matches("abc-123"));
        assert!(id.matches_typed("UUID", "abc-123"));
        assert!(!id.matches_typed("MD5", "abc-123"));
    }

    #[test]
    fn test_identifier_display() {
        let id = Identifier::new("UUID", "abc-123");
        assert_eq!(id.to_string(), "UUID:abc-123");
    }

    #[test]
    fn test_linking_identifier_roles() {
        let link = LinkingIdentifier::with_role("UUID", "abc-123", "implementer");
        assert_eq!(link.roles.len(), 1);
        assert_eq!(link.roles[0].text, "implementer");
        assert_eq!(link.identifier.value, "abc-123");
    }
}
