//! PREMIS XML serializer
//!
//! Re-emits a document as namespace-declared, indented XML. Elements come
//! out grouped by entity kind and, within each element, in schema order, so
//! serialization is deterministic: the same document always produces the
//! same bytes. Prefixes follow the document's own declarations, falling back
//! to the conventional `premis`/`xsi` prefixes where none were recorded.

use std::io::Cursor;

use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event as XmlEvent};
use quick_xml::Writer;

use crate::core::error::{PremisError, PremisResult};
use crate::core::namespace::ns;
use crate::core::schema::{self, elems, IdentifierBinding};
use crate::model::{
    Agent, Event, Fixity, Format, Object, ObjectCharacteristics, Relationship, Rights,
    SignificantProperties, Storage,
};
use crate::types::{Identifier, LinkingIdentifier, StringPlusAuthority};
use crate::Premis;

/// Serializer for PREMIS documents
pub struct PremisSerializer {
    writer: Writer<Cursor<Vec<u8>>>,
    premis_prefix: String,
    xsi_prefix: String,
}

impl PremisSerializer {
    /// Serialize a document to an XML string
    pub fn serialize(document: &Premis) -> PremisResult<String> {
        let namespaces = document.namespaces();
        let premis_prefix = namespaces
            .get_prefix(ns::PREMIS)
            .unwrap_or(ns::PREMIS_PREFIX)
            .to_string();
        let xsi_prefix = namespaces
            .get_prefix(ns::XSI)
            .unwrap_or(ns::XSI_PREFIX)
            .to_string();

        let mut serializer = Self {
            writer: Writer::new_with_indent(Cursor::new(Vec::new()), b' ', 2),
            premis_prefix,
            xsi_prefix,
        };
        serializer.write_document(document)?;

        let bytes = serializer.writer.into_inner().into_inner();
        String::from_utf8(bytes).map_err(|e| PremisError::Serialization(e.to_string()))
    }

    fn write_document(&mut self, document: &Premis) -> PremisResult<()> {
        self.event(XmlEvent::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

        let root_name = self.qn(elems::PREMIS);
        let mut root = BytesStart::new(root_name.as_str());
        root.push_attribute(("version", document.version()));
        for (xmlns, uri) in self.declarations(document) {
            root.push_attribute((xmlns.as_str(), uri.as_str()));
        }
        if let Some(location) = document.schema_location() {
            let name = format!("{}:schemaLocation", self.xsi_prefix);
            root.push_attribute((name.as_str(), location));
        }
        self.event(XmlEvent::Start(root))?;

        for object in document.objects() {
            self.write_object(object)?;
        }
        for event in document.events() {
            self.write_event(event)?;
        }
        for agent in document.agents() {
            self.write_agent(agent)?;
        }
        for rights in document.rights() {
            self.write_rights(rights)?;
        }

        self.end(&root_name)
    }

    /// Namespace declarations for the root, in deterministic order
    ///
    /// The document's own declarations are kept; the PREMIS and XSI
    /// namespaces are always present since the codec cannot emit without
    /// them. The implicit xml binding is never declared.
    fn declarations(&self, document: &Premis) -> Vec<(String, String)> {
        let namespaces = document.namespaces();
        let mut decls = Vec::new();
        if !namespaces.has_uri(ns::PREMIS) {
            decls.push((format!("xmlns:{}", self.premis_prefix), ns::PREMIS.to_string()));
        }
        if !namespaces.has_uri(ns::XSI) {
            decls.push((format!("xmlns:{}", self.xsi_prefix), ns::XSI.to_string()));
        }
        for (uri, prefix) in namespaces.iter() {
            if uri == ns::XML || uri == ns::XMLNS {
                continue;
            }
            decls.push((format!("xmlns:{}", prefix), uri.to_string()));
        }
        decls.sort();
        decls
    }

    fn write_object(&mut self, object: &Object) -> PremisResult<()> {
        let name = self.qn(elems::OBJECT);
        let mut start = BytesStart::new(name.as_str());
        let type_attr = format!("{}:type", self.xsi_prefix);
        let type_value = format!("{}:{}", self.premis_prefix, object.category.as_term());
        start.push_attribute((type_attr.as_str(), type_value.as_str()));
        self.event(XmlEvent::Start(start))?;

        self.write_identifier(&object.identifier, &schema::OBJECT_IDENTIFIER)?;
        for properties in &object.significant_properties {
            self.write_significant_properties(properties)?;
        }
        if let Some(characteristics) = &object.characteristics {
            self.write_characteristics(characteristics)?;
        }
        if let Some(original_name) = &object.original_name {
            self.leaf_with_link(
                elems::ORIGINAL_NAME,
                &original_name.text,
                original_name.simple_link.as_deref(),
            )?;
        }
        for storage in &object.storage {
            self.write_storage(storage)?;
        }
        for relationship in &object.relationships {
            self.write_relationship(relationship)?;
        }
        for link in &object.linking_event_identifiers {
            self.write_linking_identifier(link, &schema::LINKING_EVENT_IDENTIFIER)?;
        }
        for link in &object.linking_rights_statement_identifiers {
            self.write_linking_identifier(link, &schema::LINKING_RIGHTS_STATEMENT_IDENTIFIER)?;
        }

        self.end(&name)
    }

    fn write_significant_properties(
        &mut self,
        properties: &SignificantProperties,
    ) -> PremisResult<()> {
        let name = self.start(elems::SIGNIFICANT_PROPERTIES)?;
        if let Some(kind) = &properties.kind {
            self.leaf_spa(elems::SIGNIFICANT_PROPERTIES_TYPE, kind)?;
        }
        if let Some(value) = &properties.value {
            self.leaf(elems::SIGNIFICANT_PROPERTIES_VALUE, value)?;
        }
        self.end(&name)
    }

    fn write_characteristics(
        &mut self,
        characteristics: &ObjectCharacteristics,
    ) -> PremisResult<()> {
        let name = self.start(elems::OBJECT_CHARACTERISTICS)?;
        for fixity in &characteristics.fixity {
            self.write_fixity(fixity)?;
        }
        if let Some(size) = characteristics.size {
            self.leaf(elems::SIZE, &size.to_string())?;
        }
        for format in &characteristics.formats {
            self.write_format(format)?;
        }
        self.end(&name)
    }

    fn write_fixity(&mut self, fixity: &Fixity) -> PremisResult<()> {
        let name = self.start(elems::FIXITY)?;
        self.leaf_spa(elems::MESSAGE_DIGEST_ALGORITHM, &fixity.algorithm)?;
        self.leaf(elems::MESSAGE_DIGEST, &fixity.digest)?;
        if let Some(originator) = &fixity.originator {
            self.leaf_spa(elems::MESSAGE_DIGEST_ORIGINATOR, originator)?;
        }
        self.end(&name)
    }

    fn write_format(&mut self, format: &Format) -> PremisResult<()> {
        let name = self.start(elems::FORMAT)?;
        if let Some(designation) = &format.designation {
            let inner = self.start(elems::FORMAT_DESIGNATION)?;
            self.leaf_spa(elems::FORMAT_NAME, &designation.name)?;
            if let Some(version) = &designation.version {
                self.leaf(elems::FORMAT_VERSION, version)?;
            }
            self.end(&inner)?;
        }
        if let Some(registry) = &format.registry {
            let inner = self.start(elems::FORMAT_REGISTRY)?;
            self.leaf_spa(elems::FORMAT_REGISTRY_NAME, &registry.name)?;
            self.leaf_spa(elems::FORMAT_REGISTRY_KEY, &registry.key)?;
            self.end(&inner)?;
        }
        for note in &format.notes {
            self.leaf(elems::FORMAT_NOTE, note)?;
        }
        self.end(&name)
    }

    fn write_storage(&mut self, storage: &Storage) -> PremisResult<()> {
        let name = self.start(elems::STORAGE)?;
        if let Some(location) = &storage.content_location {
            let inner = self.start(elems::CONTENT_LOCATION)?;
            self.leaf_spa(elems::CONTENT_LOCATION_TYPE, &location.kind)?;
            self.leaf(elems::CONTENT_LOCATION_VALUE, &location.value)?;
            self.end(&inner)?;
        }
        if let Some(medium) = &storage.medium {
            self.leaf_spa(elems::STORAGE_MEDIUM, medium)?;
        }
        self.end(&name)
    }

    fn write_relationship(&mut self, relationship: &Relationship) -> PremisResult<()> {
        let name = self.start(elems::RELATIONSHIP)?;
        self.leaf_spa(elems::RELATIONSHIP_TYPE, &relationship.kind)?;
        self.leaf_spa(elems::RELATIONSHIP_SUB_TYPE, &relationship.sub_kind)?;
        for related in &relationship.related_object_identifiers {
            self.write_identifier(related, &schema::RELATED_OBJECT_IDENTIFIER)?;
        }
        for related in &relationship.related_event_identifiers {
            self.write_identifier(related, &schema::RELATED_EVENT_IDENTIFIER)?;
        }
        self.end(&name)
    }

    fn write_event(&mut self, event: &Event) -> PremisResult<()> {
        let name = self.start(elems::EVENT)?;
        self.write_identifier(&event.identifier, &schema::EVENT_IDENTIFIER)?;
        self.leaf(elems::EVENT_TYPE, event.kind.as_term())?;
        self.leaf(elems::EVENT_DATE_TIME, &event.datetime.to_string())?;
        for information in &event.detail_information {
            let inner = self.start(elems::EVENT_DETAIL_INFORMATION)?;
            if let Some(detail) = &information.detail {
                self.leaf(elems::EVENT_DETAIL, detail)?;
            }
            self.end(&inner)?;
        }
        for outcome in &event.outcome_information {
            let inner = self.start(elems::EVENT_OUTCOME_INFORMATION)?;
            if let Some(value) = &outcome.outcome {
                self.leaf_spa(elems::EVENT_OUTCOME, value)?;
            }
            if let Some(note) = &outcome.detail_note {
                let detail = self.start(elems::EVENT_OUTCOME_DETAIL)?;
                self.leaf(elems::EVENT_OUTCOME_DETAIL_NOTE, note)?;
                self.end(&detail)?;
            }
            self.end(&inner)?;
        }
        for link in &event.linking_agent_identifiers {
            self.write_linking_identifier(link, &schema::LINKING_AGENT_IDENTIFIER)?;
        }
        for link in &event.linking_object_identifiers {
            self.write_linking_identifier(link, &schema::LINKING_OBJECT_IDENTIFIER)?;
        }
        self.end(&name)
    }

    fn write_agent(&mut self, agent: &Agent) -> PremisResult<()> {
        let name = self.start(elems::AGENT)?;
        self.write_identifier(&agent.identifier, &schema::AGENT_IDENTIFIER)?;
        self.leaf_spa(elems::AGENT_NAME, &agent.name)?;
        self.leaf(elems::AGENT_TYPE, agent.kind.as_term())?;
        self.end(&name)
    }

    fn write_rights(&mut self, rights: &Rights) -> PremisResult<()> {
        let name = self.start(elems::RIGHTS)?;
        for statement in &rights.statements {
            let inner = self.start(elems::RIGHTS_STATEMENT)?;
            self.write_identifier(&statement.identifier, &schema::RIGHTS_STATEMENT_IDENTIFIER)?;
            self.leaf(elems::RIGHTS_BASIS, statement.basis.as_term())?;
            for link in &statement.linking_object_identifiers {
                self.write_linking_identifier(link, &schema::LINKING_OBJECT_IDENTIFIER)?;
            }
            self.end(&inner)?;
        }
        self.end(&name)
    }

    fn write_identifier(
        &mut self,
        identifier: &Identifier,
        binding: &IdentifierBinding,
    ) -> PremisResult<()> {
        let name = self.start_identifier(binding, identifier)?;
        self.leaf_spa(binding.type_element, &identifier.kind)?;
        self.leaf(binding.value_element, &identifier.value)?;
        self.end(&name)
    }

    fn write_linking_identifier(
        &mut self,
        link: &LinkingIdentifier,
        binding: &IdentifierBinding,
    ) -> PremisResult<()> {
        let name = self.start_identifier(binding, &link.identifier)?;
        self.leaf_spa(binding.type_element, &link.identifier.kind)?;
        self.leaf(binding.value_element, &link.identifier.value)?;
        if let Some(role_element) = binding.role_element {
            for role in &link.roles {
                self.leaf_spa(role_element, role)?;
            }
        }
        self.end(&name)
    }

    /// Open an identifier wrapper, with its simpleLink attribute if set
    fn start_identifier(
        &mut self,
        binding: &IdentifierBinding,
        identifier: &Identifier,
    ) -> PremisResult<String> {
        let name = self.qn(binding.element);
        let mut start = BytesStart::new(name.as_str());
        if let Some(link) = &identifier.simple_link {
            start.push_attribute(("simpleLink", link.as_str()));
        }
        self.event(XmlEvent::Start(start))?;
        Ok(name)
    }

    /// Write a text-only element
    fn leaf(&mut self, local: &str, text: &str) -> PremisResult<()> {
        let name = self.start(local)?;
        self.event(XmlEvent::Text(BytesText::new(text)))?;
        self.end(&name)
    }

    /// Write a text element with an optional simpleLink attribute
    fn leaf_with_link(
        &mut self,
        local: &str,
        text: &str,
        simple_link: Option<&str>,
    ) -> PremisResult<()> {
        let name = self.qn(local);
        let mut start = BytesStart::new(name.as_str());
        if let Some(link) = simple_link {
            start.push_attribute(("simpleLink", link));
        }
        self.event(XmlEvent::Start(start))?;
        self.event(XmlEvent::Text(BytesText::new(text)))?;
        self.end(&name)
    }

    /// Write a text element with its authority attributes
    fn leaf_spa(&mut self, local: &str, value: &StringPlusAuthority) -> PremisResult<()> {
        let name = self.qn(local);
        let mut start = BytesStart::new(name.as_str());
        if let Some(authority) = &value.authority {
            start.push_attribute(("authority", authority.as_str()));
        }
        if let Some(uri) = &value.authority_uri {
            start.push_attribute(("authorityURI", uri.as_str()));
        }
        if let Some(uri) = &value.value_uri {
            start.push_attribute(("valueURI", uri.as_str()));
        }
        self.event(XmlEvent::Start(start))?;
        self.event(XmlEvent::Text(BytesText::new(&value.text)))?;
        self.end(&name)
    }

    fn start(&mut self, local: &str) -> PremisResult<String> {
        let name = self.qn(local);
        self.event(XmlEvent::Start(BytesStart::new(name.as_str())))?;
        Ok(name)
    }

    fn end(&mut self, name: &str) -> PremisResult<()> {
        self.event(XmlEvent::End(BytesEnd::new(name)))
    }

    fn event(&mut self, event: XmlEvent<'_>) -> PremisResult<()> {
        self.writer
            .write_event(event)
            .map_err(|e| PremisError::Serialization(e.to_string()))
    }

    fn qn(&self, local: &str) -> String {
        format!("{}:{}", self.premis_prefix, local)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{AgentType, ObjectCategory};

    #[test]
    fn test_serialize_empty_document() {
        let xml = Premis::new().serialize().unwrap();
        assert!(xml.contains(r#"<premis:premis version="3.0""#));
        assert!(xml.contains(r#"xmlns:premis="http://www.loc.gov/premis/v3""#));
        assert!(xml.contains(r#"xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance""#));
    }

    #[test]
    fn test_object_category_becomes_xsi_type() {
        let mut premis = Premis::new();
        premis.push_object(Object::new(
            Identifier::new("UUID", "obj-1"),
            ObjectCategory::Representation,
        ));
        let xml = premis.serialize().unwrap();
        assert!(xml.contains(r#"xsi:type="premis:representation""#));
        assert!(xml.contains("<premis:objectIdentifierValue>obj-1</premis:objectIdentifierValue>"));
    }

    #[test]
    fn test_serialize_is_deterministic() {
        let mut premis = Premis::new();
        premis.push_agent(Agent::new(
            Identifier::new("UUID", "agent-1"),
            "fixity-daemon",
            AgentType::Software,
        ));
        assert_eq!(premis.serialize().unwrap(), premis.serialize().unwrap());
    }

    #[test]
    fn test_text_is_escaped() {
        let mut premis = Premis::new();
        premis.push_agent(Agent::new(
            Identifier::new("UUID", "agent-1"),
            "a & b <tool>",
            AgentType::Software,
        ));
        let xml = premis.serialize().unwrap();
        assert!(xml.contains("a &amp; b &lt;tool&gt;"));
    }
}
