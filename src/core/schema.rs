//! Explicit schema-mapping tables for the PREMIS v3.0 vocabulary
//!
//! All XML bindings used by the codec are declared here as plain data: the
//! element names of the schema, the cardinality vocabulary, and the binding
//! table for the many identifier element triples PREMIS defines. The parser
//! and serializer consume these tables uniformly instead of hard-coding
//! names at each call site.

/// PREMIS element local names, all bound in the PREMIS v3 namespace
pub mod elems {
    /// Document root
    pub const PREMIS: &str = "premis";
    /// Object entity
    pub const OBJECT: &str = "object";
    /// Event entity
    pub const EVENT: &str = "event";
    /// Agent entity
    pub const AGENT: &str = "agent";
    /// Rights entity
    pub const RIGHTS: &str = "rights";
    /// Rights statement inside a rights entity
    pub const RIGHTS_STATEMENT: &str = "rightsStatement";

    /// Object category (bound to xsi:type on the object element)
    pub const OBJECT_CATEGORY: &str = "objectCategory";
    /// Object characteristics container
    pub const OBJECT_CHARACTERISTICS: &str = "objectCharacteristics";
    /// Fixity container
    pub const FIXITY: &str = "fixity";
    /// Message digest algorithm
    pub const MESSAGE_DIGEST_ALGORITHM: &str = "messageDigestAlgorithm";
    /// Message digest
    pub const MESSAGE_DIGEST: &str = "messageDigest";
    /// Message digest originator
    pub const MESSAGE_DIGEST_ORIGINATOR: &str = "messageDigestOriginator";
    /// Object size in bytes
    pub const SIZE: &str = "size";
    /// Format container
    pub const FORMAT: &str = "format";
    /// Format designation container
    pub const FORMAT_DESIGNATION: &str = "formatDesignation";
    /// Format name
    pub const FORMAT_NAME: &str = "formatName";
    /// Format version
    pub const FORMAT_VERSION: &str = "formatVersion";
    /// Format registry container
    pub const FORMAT_REGISTRY: &str = "formatRegistry";
    /// Format registry name
    pub const FORMAT_REGISTRY_NAME: &str = "formatRegistryName";
    /// Format registry key
    pub const FORMAT_REGISTRY_KEY: &str = "formatRegistryKey";
    /// Format note
    pub const FORMAT_NOTE: &str = "formatNote";
    /// Original name of the object
    pub const ORIGINAL_NAME: &str = "originalName";
    /// Storage container
    pub const STORAGE: &str = "storage";
    /// Content location container
    pub const CONTENT_LOCATION: &str = "contentLocation";
    /// Content location type
    pub const CONTENT_LOCATION_TYPE: &str = "contentLocationType";
    /// Content location value
    pub const CONTENT_LOCATION_VALUE: &str = "contentLocationValue";
    /// Storage medium
    pub const STORAGE_MEDIUM: &str = "storageMedium";
    /// Relationship container
    pub const RELATIONSHIP: &str = "relationship";
    /// Relationship type
    pub const RELATIONSHIP_TYPE: &str = "relationshipType";
    /// Relationship subtype
    pub const RELATIONSHIP_SUB_TYPE: &str = "relationshipSubType";
    /// Significant properties container
    pub const SIGNIFICANT_PROPERTIES: &str = "significantProperties";
    /// Significant properties type
    pub const SIGNIFICANT_PROPERTIES_TYPE: &str = "significantPropertiesType";
    /// Significant properties value
    pub const SIGNIFICANT_PROPERTIES_VALUE: &str = "significantPropertiesValue";

    /// Event type
    pub const EVENT_TYPE: &str = "eventType";
    /// Event date/time
    pub const EVENT_DATE_TIME: &str = "eventDateTime";
    /// Event detail information container
    pub const EVENT_DETAIL_INFORMATION: &str = "eventDetailInformation";
    /// Event detail inside its information container
    pub const EVENT_DETAIL: &str = "eventDetail";
    /// Event outcome information container
    pub const EVENT_OUTCOME_INFORMATION: &str = "eventOutcomeInformation";
    /// Event outcome
    pub const EVENT_OUTCOME: &str = "eventOutcome";
    /// Event outcome detail container
    pub const EVENT_OUTCOME_DETAIL: &str = "eventOutcomeDetail";
    /// Event outcome detail note
    pub const EVENT_OUTCOME_DETAIL_NOTE: &str = "eventOutcomeDetailNote";

    /// Agent name
    pub const AGENT_NAME: &str = "agentName";
    /// Agent type
    pub const AGENT_TYPE: &str = "agentType";

    /// Rights basis
    pub const RIGHTS_BASIS: &str = "rightsBasis";
}

/// Allowed multiplicity of a field in the schema mapping
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cardinality {
    /// Exactly one occurrence
    RequiredOne,
    /// Zero or one occurrence
    OptionalOne,
    /// Any number of occurrences, document order preserved
    ZeroOrMore,
}

impl Cardinality {
    /// Human-readable phrase used in cardinality error messages
    pub fn expected(&self) -> &'static str {
        match self {
            Cardinality::RequiredOne => "exactly one",
            Cardinality::OptionalOne => "at most one",
            Cardinality::ZeroOrMore => "any number",
        }
    }
}

/// XML binding of one PREMIS identifier triple
///
/// PREMIS repeats the same (wrapper, type, value) shape under many names:
/// `objectIdentifier`/`objectIdentifierType`/`objectIdentifierValue`,
/// `linkingAgentIdentifier`/..., and so on. Each shape is declared once here
/// and decoded/encoded by a single codec routine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdentifierBinding {
    /// Local name of the wrapper element
    pub element: &'static str,
    /// Local name of the type child
    pub type_element: &'static str,
    /// Local name of the value child
    pub value_element: &'static str,
    /// Local name of the repeated role child, where the schema defines one
    pub role_element: Option<&'static str>,
}

/// objectIdentifier binding
pub const OBJECT_IDENTIFIER: IdentifierBinding = IdentifierBinding {
    element: "objectIdentifier",
    type_element: "objectIdentifierType",
    value_element: "objectIdentifierValue",
    role_element: None,
};

/// eventIdentifier binding
pub const EVENT_IDENTIFIER: IdentifierBinding = IdentifierBinding {
    element: "eventIdentifier",
    type_element: "eventIdentifierType",
    value_element: "eventIdentifierValue",
    role_element: None,
};

/// agentIdentifier binding
pub const AGENT_IDENTIFIER: IdentifierBinding = IdentifierBinding {
    element: "agentIdentifier",
    type_element: "agentIdentifierType",
    value_element: "agentIdentifierValue",
    role_element: None,
};

/// rightsStatementIdentifier binding
pub const RIGHTS_STATEMENT_IDENTIFIER: IdentifierBinding = IdentifierBinding {
    element: "rightsStatementIdentifier",
    type_element: "rightsStatementIdentifierType",
    value_element: "rightsStatementIdentifierValue",
    role_element: None,
};

/// linkingObjectIdentifier binding (carries roles)
pub const LINKING_OBJECT_IDENTIFIER: IdentifierBinding = IdentifierBinding {
    element: "linkingObjectIdentifier",
    type_element: "linkingObjectIdentifierType",
    value_element: "linkingObjectIdentifierValue",
    role_element: Some("linkingObjectRole"),
};

/// linkingAgentIdentifier binding (carries roles)
pub const LINKING_AGENT_IDENTIFIER: IdentifierBinding = IdentifierBinding {
    element: "linkingAgentIdentifier",
    type_element: "linkingAgentIdentifierType",
    value_element: "linkingAgentIdentifierValue",
    role_element: Some("linkingAgentRole"),
};

/// linkingEventIdentifier binding
pub const LINKING_EVENT_IDENTIFIER: IdentifierBinding = IdentifierBinding {
    element: "linkingEventIdentifier",
    type_element: "linkingEventIdentifierType",
    value_element: "linkingEventIdentifierValue",
    role_element: None,
};

/// linkingRightsStatementIdentifier binding
pub const LINKING_RIGHTS_STATEMENT_IDENTIFIER: IdentifierBinding = IdentifierBinding {
    element: "linkingRightsStatementIdentifier",
    type_element: "linkingRightsStatementIdentifierType",
    value_element: "linkingRightsStatementIdentifierValue",
    role_element: None,
};

/// relatedObjectIdentifier binding (inside relationship)
pub const RELATED_OBJECT_IDENTIFIER: IdentifierBinding = IdentifierBinding {
    element: "relatedObjectIdentifier",
    type_element: "relatedObjectIdentifierType",
    value_element: "relatedObjectIdentifierValue",
    role_element: None,
};

/// relatedEventIdentifier binding (inside relationship)
pub const RELATED_EVENT_IDENTIFIER: IdentifierBinding = IdentifierBinding {
    element: "relatedEventIdentifier",
    type_element: "relatedEventIdentifierType",
    value_element: "relatedEventIdentifierValue",
    role_element: None,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cardinality_phrases() {
        assert_eq!(Cardinality::RequiredOne.expected(), "exactly one");
        assert_eq!(Cardinality::OptionalOne.expected(), "at most one");
        assert_eq!(Cardinality::ZeroOrMore.expected(), "any number");
    }

    #[test]
    fn test_identifier_bindings_are_distinct() {
        let bindings = [
            OBJECT_IDENTIFIER,
            EVENT_IDENTIFIER,
            AGENT_IDENTIFIER,
            RIGHTS_STATEMENT_IDENTIFIER,
            LINKING_OBJECT_IDENTIFIER,
            LINKING_AGENT_IDENTIFIER,
            LINKING_EVENT_IDENTIFIER,
            LINKING_RIGHTS_STATEMENT_IDENTIFIER,
            RELATED_OBJECT_IDENTIFIER,
            RELATED_EVENT_IDENTIFIER,
        ];
        for (i, a) in bindings.iter().enumerate() {
            for b in &bindings[i + 1..] {
                assert_ne!(a.element, b.element);
            }
        }
    }

    #[test]
    fn test_role_elements() {
        assert_eq!(
            LINKING_AGENT_IDENTIFIER.role_element,
            Some("linkingAgentRole")
        );
        assert_eq!(OBJECT_IDENTIFIER.role_element, None);
    }
}
