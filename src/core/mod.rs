//! PREMIS core module
//!
//! This module contains the core functionality for PREMIS metadata
//! processing: the namespace-resolved XML layer, the schema binding tables,
//! and the parser and serializer built on them.

pub mod document;
pub mod error;
pub mod namespace;
pub mod parser;
pub mod path;
pub mod schema;
pub mod serializer;
pub mod xml;

pub use document::Premis;
pub use error::{PremisError, PremisResult};
pub use namespace::{ns, NamespaceMap};
pub use parser::PremisParser;
pub use path::{ElementPath, PathSegment};
pub use schema::{Cardinality, IdentifierBinding};
pub use serializer::PremisSerializer;
pub use xml::{read_document, XmlAttribute, XmlElement};
