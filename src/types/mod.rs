//! PREMIS value types
//!
//! Primitive value domains shared across the element models: identifiers,
//! authority-qualified strings, and the closed controlled vocabularies.

pub mod identifier;
pub mod value;
pub mod vocabulary;

pub use identifier::{Identifier, LinkingIdentifier};
pub use value::StringPlusAuthority;
pub use vocabulary::{AgentType, EventType, ObjectCategory, RightsBasis, Vocabulary};
