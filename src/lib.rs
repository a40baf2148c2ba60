//! premiskit - Typed PREMIS v3.0 preservation metadata
//!
//! This crate provides an in-memory model for PREMIS 3.0 documents (the
//! Library of Congress preservation metadata dictionary) together with a
//! bidirectional, namespace-aware XML codec. Parsing validates structure,
//! cardinality, and controlled vocabularies, and reports the first violation
//! with the path of the offending element.
//!
//! # Example
//!
//! ```
//! use premiskit::Premis;
//!
//! let xml = r#"<premis:premis xmlns:premis="http://www.loc.gov/premis/v3"
//!     xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance" version="3.0">
//!   <premis:object xsi:type="premis:file">
//!     <premis:objectIdentifier>
//!       <premis:objectIdentifierType>UUID</premis:objectIdentifierType>
//!       <premis:objectIdentifierValue>abc-123</premis:objectIdentifierValue>
//!     </premis:objectIdentifier>
//!   </premis:object>
//! </premis:premis>"#;
//!
//! let premis: Premis = xml.parse().unwrap();
//! let object = premis.find_object("abc-123").unwrap();
//! assert_eq!(object.identifier.value, "abc-123");
//! ```

pub mod core;
pub mod model;
pub mod types;
pub mod utils;

pub use crate::core::{ElementPath, NamespaceMap, Premis, PremisError, PremisResult};
pub use model::{Agent, Event, Object, Rights, RightsStatement};
pub use types::{
    AgentType, EventType, Identifier, LinkingIdentifier, ObjectCategory, RightsBasis,
    StringPlusAuthority,
};
pub use utils::PremisDateTime;

/// Parse a PREMIS 3.0 document from XML text
pub fn parse(xml: &str) -> PremisResult<Premis> {
    xml.parse()
}

/// Serialize a document to namespace-declared XML
pub fn serialize(document: &Premis) -> PremisResult<String> {
    document.serialize()
}
