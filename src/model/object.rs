//! The Object entity
//!
//! An object is a digital or intellectual entity under preservation: the
//! identifier and category are required, everything else describes the
//! object (characteristics, storage) or relates it to other entities
//! (relationships, linking identifiers: weak references by identifier
//! value, never structural containment).

use crate::types::{Identifier, LinkingIdentifier, ObjectCategory, StringPlusAuthority};

/// A digital or intellectual entity under preservation
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Object {
    /// The object's identifier, unique among objects in the document
    pub identifier: Identifier,
    /// Object category (file, representation, bitstream, intellectual entity)
    pub category: ObjectCategory,
    /// Properties to preserve across migrations
    pub significant_properties: Vec<SignificantProperties>,
    /// Technical characteristics (format, fixity, size)
    pub characteristics: Option<ObjectCharacteristics>,
    /// The object's original name, e.g. the filename at ingest
    pub original_name: Option<OriginalName>,
    /// Where the object's content is stored
    pub storage: Vec<Storage>,
    /// Relationships to other objects and events
    pub relationships: Vec<Relationship>,
    /// Events this object was involved in (weak references)
    pub linking_event_identifiers: Vec<LinkingIdentifier>,
    /// Rights statements governing this object (weak references)
    pub linking_rights_statement_identifiers: Vec<LinkingIdentifier>,
}

impl Object {
    /// Create an object with only the required fields set
    pub fn new(identifier: Identifier, category: ObjectCategory) -> Self {
        Self {
            identifier,
            category,
            significant_properties: Vec::new(),
            characteristics: None,
            original_name: None,
            storage: Vec::new(),
            relationships: Vec::new(),
            linking_event_identifiers: Vec::new(),
            linking_rights_statement_identifiers: Vec::new(),
        }
    }

    /// Set the technical characteristics
    pub fn with_characteristics(mut self, characteristics: ObjectCharacteristics) -> Self {
        self.characteristics = Some(characteristics);
        self
    }

    /// Set the original name
    pub fn with_original_name(mut self, name: impl Into<String>) -> Self {
        self.original_name = Some(OriginalName::new(name));
        self
    }
}

/// A property of the object that must survive preservation actions
///
/// Type and value are both optional in the schema; a record with neither is
/// legal but says nothing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SignificantProperties {
    /// Facet of the object the property belongs to, e.g. "content"
    pub kind: Option<StringPlusAuthority>,
    /// The property itself
    pub value: Option<String>,
}

impl SignificantProperties {
    /// Create a record with both facet and value set
    pub fn new(kind: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            kind: Some(StringPlusAuthority::new(kind)),
            value: Some(value.into()),
        }
    }
}

/// The object's name in its original environment
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OriginalName {
    /// The name, e.g. the filename at ingest
    pub text: String,
    /// Optional simpleLink URI attribute
    pub simple_link: Option<String>,
}

impl OriginalName {
    /// Create an original name without a link
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            simple_link: None,
        }
    }
}

/// Technical characteristics of an object
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ObjectCharacteristics {
    /// Fixity information, one entry per digest
    pub fixity: Vec<Fixity>,
    /// Size in bytes
    pub size: Option<u64>,
    /// Format information
    pub formats: Vec<Format>,
}

/// One message digest over the object's content
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Fixity {
    /// Digest algorithm, e.g. "SHA-256"
    pub algorithm: StringPlusAuthority,
    /// The digest value
    pub digest: String,
    /// Who or what computed the digest
    pub originator: Option<StringPlusAuthority>,
}

impl Fixity {
    /// Create a fixity entry from an algorithm name and digest value
    pub fn new(algorithm: impl Into<String>, digest: impl Into<String>) -> Self {
        Self {
            algorithm: StringPlusAuthority::new(algorithm),
            digest: digest.into(),
            originator: None,
        }
    }
}

/// Format of an object, by designation, registry reference, or both
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Format {
    /// Format name and version
    pub designation: Option<FormatDesignation>,
    /// Reference into a format registry such as PRONOM
    pub registry: Option<FormatRegistry>,
    /// Free-text notes
    pub notes: Vec<String>,
}

/// A format name with optional version
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FormatDesignation {
    /// Format name, e.g. "image/tiff"
    pub name: StringPlusAuthority,
    /// Format version
    pub version: Option<String>,
}

impl FormatDesignation {
    /// Create a designation from a format name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: StringPlusAuthority::new(name),
            version: None,
        }
    }
}

/// A (registry, key) reference identifying a format externally
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FormatRegistry {
    /// Registry name, e.g. "PRONOM"
    pub name: StringPlusAuthority,
    /// Key of the format within the registry, e.g. "fmt/353"
    pub key: StringPlusAuthority,
}

/// Where and on what medium an object's content is stored
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Storage {
    /// Location of the content
    pub content_location: Option<ContentLocation>,
    /// Physical or logical medium
    pub medium: Option<StringPlusAuthority>,
}

/// A typed content location, e.g. ("URI", "data/representation/file.tiff")
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ContentLocation {
    /// Location type
    pub kind: StringPlusAuthority,
    /// Location value
    pub value: String,
}

/// A typed relationship from this object to other objects or events
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Relationship {
    /// Relationship type, e.g. "structural"
    pub kind: StringPlusAuthority,
    /// Relationship subtype, e.g. "is part of"
    pub sub_kind: StringPlusAuthority,
    /// Identifiers of related objects (weak references)
    pub related_object_identifiers: Vec<Identifier>,
    /// Identifiers of related events (weak references)
    pub related_event_identifiers: Vec<Identifier>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ObjectCategory;

    #[test]
    fn test_object_builder() {
        let object = Object::new(Identifier::new("UUID", "abc-123"), ObjectCategory::File)
            .with_original_name("photo.tiff")
            .with_characteristics(ObjectCharacteristics {
                fixity: vec![Fixity::new("MD5", "7e9c2")],
                size: Some(1024),
                formats: vec![Format {
                    designation: Some(FormatDesignation::new("image/tiff")),
                    registry: None,
                    notes: Vec::new(),
                }],
            });

        assert_eq!(object.identifier.value, "abc-123");
        assert_eq!(object.category, ObjectCategory::File);
        assert_eq!(object.original_name.unwrap().text, "photo.tiff");
        let characteristics = object.characteristics.unwrap();
        assert_eq!(characteristics.size, Some(1024));
        assert_eq!(characteristics.fixity[0].algorithm.text, "MD5");
    }
}
