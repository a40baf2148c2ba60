//! The PREMIS document
//!
//! A `Premis` value is the root of the in-memory model: the four entity
//! collections plus the namespace declarations carried over from the XML
//! form. Entities reference each other by identifier value only, so lookups
//! resolve those weak references on demand.

use std::fmt;
use std::str::FromStr;

use crate::core::error::{PremisError, PremisResult};
use crate::core::namespace::NamespaceMap;
use crate::core::parser::PremisParser;
use crate::core::serializer::PremisSerializer;
use crate::model::{Agent, Event, Object, Rights, RightsStatement};
use crate::types::Identifier;

/// A complete PREMIS 3.0 document
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Premis {
    version: String,
    namespaces: NamespaceMap,
    schema_location: Option<String>,
    objects: Vec<Object>,
    events: Vec<Event>,
    agents: Vec<Agent>,
    rights: Vec<Rights>,
}

impl Premis {
    /// Create an empty document with the builtin namespace declarations
    pub fn new() -> Self {
        Self {
            version: "3.0".to_string(),
            namespaces: NamespaceMap::new(),
            schema_location: None,
            objects: Vec::new(),
            events: Vec::new(),
            agents: Vec::new(),
            rights: Vec::new(),
        }
    }

    pub(crate) fn from_parts(
        version: String,
        namespaces: NamespaceMap,
        schema_location: Option<String>,
        objects: Vec<Object>,
        events: Vec<Event>,
        agents: Vec<Agent>,
        rights: Vec<Rights>,
    ) -> Self {
        Self {
            version,
            namespaces,
            schema_location,
            objects,
            events,
            agents,
            rights,
        }
    }

    /// The PREMIS version attribute, always "3.0"
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Namespace prefixes declared on the document
    pub fn namespaces(&self) -> &NamespaceMap {
        &self.namespaces
    }

    /// The xsi:schemaLocation hint, if the document carried one
    pub fn schema_location(&self) -> Option<&str> {
        self.schema_location.as_deref()
    }

    pub fn objects(&self) -> &[Object] {
        &self.objects
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    pub fn rights(&self) -> &[Rights] {
        &self.rights
    }

    /// Add an object to the document
    pub fn push_object(&mut self, object: Object) {
        self.objects.push(object);
    }

    /// Add an event to the document
    pub fn push_event(&mut self, event: Event) {
        self.events.push(event);
    }

    /// Add an agent to the document
    pub fn push_agent(&mut self, agent: Agent) {
        self.agents.push(agent);
    }

    /// Add a rights entity to the document
    pub fn push_rights(&mut self, rights: Rights) {
        self.rights.push(rights);
    }

    /// Look up an object by identifier value
    ///
    /// Exactly one object must carry the value; zero matches is
    /// [`PremisError::NotFound`], several is
    /// [`PremisError::AmbiguousIdentifier`].
    pub fn find_object(&self, value: &str) -> PremisResult<&Object> {
        resolve("object", value, self.objects.iter(), |o| &o.identifier)
    }

    /// Look up an event by identifier value
    pub fn find_event(&self, value: &str) -> PremisResult<&Event> {
        resolve("event", value, self.events.iter(), |e| &e.identifier)
    }

    /// Look up an agent by identifier value
    pub fn find_agent(&self, value: &str) -> PremisResult<&Agent> {
        resolve("agent", value, self.agents.iter(), |a| &a.identifier)
    }

    /// Look up a rights statement by identifier value, across all rights
    /// entities in the document
    pub fn find_rights_statement(&self, value: &str) -> PremisResult<&RightsStatement> {
        resolve(
            "rights statement",
            value,
            self.rights.iter().flat_map(|r| r.statements.iter()),
            |s| &s.identifier,
        )
    }

    /// Serialize the document back to namespace-declared XML
    pub fn serialize(&self) -> PremisResult<String> {
        PremisSerializer::serialize(self)
    }
}

impl Default for Premis {
    fn default() -> Self {
        Self::new()
    }
}

impl FromStr for Premis {
    type Err = PremisError;

    fn from_str(xml: &str) -> PremisResult<Self> {
        PremisParser::parse(xml)
    }
}

impl fmt::Display for Premis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Premis v{} ({} objects, {} events, {} agents, {} rights)",
            self.version,
            self.objects.len(),
            self.events.len(),
            self.agents.len(),
            self.rights.len()
        )
    }
}

fn resolve<'a, T>(
    kind: &'static str,
    value: &str,
    candidates: impl Iterator<Item = &'a T>,
    identifier: impl Fn(&T) -> &Identifier,
) -> PremisResult<&'a T> {
    let mut matches = candidates.filter(|c| identifier(c).matches(value));
    let first = matches.next().ok_or_else(|| PremisError::NotFound {
        kind,
        value: value.to_string(),
    })?;
    if matches.next().is_some() {
        return Err(PremisError::AmbiguousIdentifier {
            kind,
            value: value.to_string(),
        });
    }
    Ok(first)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AgentType, ObjectCategory};

    fn sample() -> Premis {
        let mut premis = Premis::new();
        premis.push_object(Object::new(
            Identifier::new("UUID", "obj-1"),
            ObjectCategory::File,
        ));
        premis.push_object(Object::new(
            Identifier::new("UUID", "obj-2"),
            ObjectCategory::Representation,
        ));
        premis.push_agent(Agent::new(
            Identifier::new("UUID", "agent-1"),
            "validator",
            AgentType::Software,
        ));
        premis
    }

    #[test]
    fn test_find_object() {
        let premis = sample();
        let object = premis.find_object("obj-2").unwrap();
        assert_eq!(object.category, ObjectCategory::Representation);
    }

    #[test]
    fn test_find_missing_is_not_found() {
        let premis = sample();
        assert!(matches!(
            premis.find_object("obj-99"),
            Err(PremisError::NotFound { kind: "object", .. })
        ));
        assert!(matches!(
            premis.find_event("evt-1"),
            Err(PremisError::NotFound { kind: "event", .. })
        ));
    }

    #[test]
    fn test_duplicate_value_is_ambiguous() {
        let mut premis = sample();
        premis.push_object(Object::new(
            Identifier::new("ARK", "obj-1"),
            ObjectCategory::Bitstream,
        ));
        assert!(matches!(
            premis.find_object("obj-1"),
            Err(PremisError::AmbiguousIdentifier { .. })
        ));
    }

    #[test]
    fn test_display_counts() {
        assert_eq!(
            sample().to_string(),
            "Premis v3.0 (2 objects, 0 events, 1 agents, 0 rights)"
        );
    }
}
