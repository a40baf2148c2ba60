//! Error types for PREMIS operations
//!
//! This module defines the closed set of error kinds surfaced by the model
//! and codec. Structural and value-level errors carry the path of the
//! offending node from the document root; model-level lookup errors carry
//! the identifier that was searched for.

use crate::core::path::ElementPath;
use thiserror::Error;

/// Error types for PREMIS operations
#[derive(Debug, Error)]
pub enum PremisError {
    /// The document root is not a PREMIS v3.0 document
    #[error("schema mismatch at {path}: {detail}")]
    SchemaMismatch {
        /// Path of the offending element
        path: ElementPath,
        /// What was expected and what was found
        detail: String,
    },

    /// A required field is absent
    #[error("missing required field '{field}' at {path}")]
    MissingField {
        /// Path of the element the field belongs to
        path: ElementPath,
        /// Local name of the missing field
        field: String,
    },

    /// A field occurs more often than its declared cardinality allows
    #[error("field '{field}' at {path} occurs {found} times, expected {expected}")]
    Cardinality {
        /// Path of the element the field belongs to
        path: ElementPath,
        /// Local name of the offending field
        field: String,
        /// Declared cardinality
        expected: &'static str,
        /// Number of occurrences found
        found: usize,
    },

    /// A value is outside a closed vocabulary
    #[error("invalid value '{value}' at {path}: accepted values are [{}]", .accepted.join(", "))]
    InvalidEnumValue {
        /// Path of the offending element
        path: ElementPath,
        /// The rejected literal
        value: String,
        /// The accepted vocabulary terms
        accepted: Vec<&'static str>,
    },

    /// A leaf value could not be converted (dates, numbers)
    #[error("malformed value at {path}: {detail}")]
    MalformedValue {
        /// Path of the offending element
        path: ElementPath,
        /// Why conversion failed
        detail: String,
    },

    /// Two entities of the same kind share an identifier
    #[error("ambiguous identifier '{value}' ({kind}): multiple matches")]
    AmbiguousIdentifier {
        /// Entity kind searched (object, event, agent, rights statement)
        kind: &'static str,
        /// The identifier value searched for
        value: String,
    },

    /// No entity carries the requested identifier
    #[error("identifier '{value}' not found ({kind})")]
    NotFound {
        /// Entity kind searched (object, event, agent, rights statement)
        kind: &'static str,
        /// The identifier value searched for
        value: String,
    },

    /// Underlying XML reader error (malformed input)
    #[error("XML error: {0}")]
    Xml(String),

    /// IO error while writing output
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization failure (encoding, prefix assignment)
    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Result type alias for PREMIS operations
pub type PremisResult<T> = Result<T, PremisError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_field_display() {
        let err = PremisError::MissingField {
            path: ElementPath::root("Premis").indexed("Object", 0),
            field: "objectCategory".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "missing required field 'objectCategory' at Premis/Object[0]"
        );
    }

    #[test]
    fn test_invalid_enum_display_lists_accepted_set() {
        let err = PremisError::InvalidEnumValue {
            path: ElementPath::root("Premis").indexed("Event", 1).child("eventType"),
            value: "teleportation".to_string(),
            accepted: vec!["creation", "ingestion"],
        };
        let msg = err.to_string();
        assert!(msg.contains("teleportation"));
        assert!(msg.contains("[creation, ingestion]"));
        assert!(msg.contains("Premis/Event[1]/eventType"));
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: PremisError = io_err.into();
        assert!(matches!(err, PremisError::Io(_)));
    }
}
