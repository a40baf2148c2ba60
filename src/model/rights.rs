//! The Rights entity
//!
//! A rights element aggregates one or more rights statements; each statement
//! names its legal basis and the objects it governs (weak references by
//! identifier value).

use crate::types::{Identifier, LinkingIdentifier, RightsBasis};

/// A rights entity holding one or more statements
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rights {
    /// The statements, in document order (at least one)
    pub statements: Vec<RightsStatement>,
}

impl Rights {
    /// Create a rights entity from a single statement
    pub fn new(statement: RightsStatement) -> Self {
        Self {
            statements: vec![statement],
        }
    }
}

/// One rights statement
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RightsStatement {
    /// The statement's identifier, unique among rights statements
    pub identifier: Identifier,
    /// Legal basis of the statement
    pub basis: RightsBasis,
    /// Objects governed by this statement (weak references)
    pub linking_object_identifiers: Vec<LinkingIdentifier>,
}

impl RightsStatement {
    /// Create a statement with no object links
    pub fn new(identifier: Identifier, basis: RightsBasis) -> Self {
        Self {
            identifier,
            basis,
            linking_object_identifiers: Vec::new(),
        }
    }
}
