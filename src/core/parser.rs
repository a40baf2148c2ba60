//! PREMIS XML parser
//!
//! Recursive descent over the namespace-resolved element tree, building the
//! document model bottom-up. Every decode step goes through a [`Ctx`] that
//! tracks the path from the document root and enforces the declared
//! cardinality of each field, so the first violation anywhere aborts the
//! whole parse with a located error.

use crate::core::error::{PremisError, PremisResult};
use crate::core::namespace::{ns, NamespaceMap};
use crate::core::path::ElementPath;
use crate::core::schema::{self, elems, Cardinality, IdentifierBinding};
use crate::core::xml::{read_document, XmlElement};
use crate::model::{
    Agent, ContentLocation, Event, EventDetailInformation, EventOutcomeInformation, Fixity,
    Format, FormatDesignation, FormatRegistry, Object, ObjectCharacteristics, OriginalName,
    Relationship, Rights, RightsStatement, SignificantProperties, Storage,
};
use crate::types::{Identifier, LinkingIdentifier, StringPlusAuthority, Vocabulary};
use crate::utils::PremisDateTime;
use crate::Premis;

/// Parser for PREMIS documents
pub struct PremisParser;

impl PremisParser {
    /// Parse a PREMIS document from XML text
    pub fn parse(xml: &str) -> PremisResult<Premis> {
        let (root, declared) = read_document(xml)?;
        Self::parse_tree(&root, declared)
    }

    /// Parse a PREMIS document from an already-read element tree
    pub fn parse_tree(root: &XmlElement, declared: NamespaceMap) -> PremisResult<Premis> {
        let path = ElementPath::root("Premis");

        if !root.is(ns::PREMIS, elems::PREMIS) {
            return Err(PremisError::SchemaMismatch {
                path,
                detail: format!(
                    "expected root element {{{}}}{}, found {{{}}}{}",
                    ns::PREMIS,
                    elems::PREMIS,
                    root.namespace,
                    root.local
                ),
            });
        }

        let version = root.attr_local("version").ok_or_else(|| {
            PremisError::SchemaMismatch {
                path: path.clone(),
                detail: "missing version attribute".to_string(),
            }
        })?;
        if version != "3.0" {
            return Err(PremisError::SchemaMismatch {
                path,
                detail: format!("unsupported PREMIS version '{}', expected '3.0'", version),
            });
        }

        let schema_location = root.attr(ns::XSI, "schemaLocation").map(str::to_string);

        let mut objects = Vec::new();
        let mut events = Vec::new();
        let mut agents = Vec::new();
        let mut rights = Vec::new();

        for child in &root.children {
            if child.namespace != ns::PREMIS {
                continue;
            }
            match child.local.as_str() {
                elems::OBJECT => {
                    let ctx = Ctx::new(child, path.indexed("Object", objects.len()));
                    objects.push(parse_object(&ctx, &declared)?);
                }
                elems::EVENT => {
                    let ctx = Ctx::new(child, path.indexed("Event", events.len()));
                    events.push(parse_event(&ctx)?);
                }
                elems::AGENT => {
                    let ctx = Ctx::new(child, path.indexed("Agent", agents.len()));
                    agents.push(parse_agent(&ctx)?);
                }
                elems::RIGHTS => {
                    let ctx = Ctx::new(child, path.indexed("Rights", rights.len()));
                    rights.push(parse_rights(&ctx)?);
                }
                other => {
                    return Err(PremisError::SchemaMismatch {
                        path: path.child(other),
                        detail: format!("unexpected element '{}' under the premis root", other),
                    });
                }
            }
        }

        Ok(Premis::from_parts(
            version.to_string(),
            declared,
            schema_location,
            objects,
            events,
            agents,
            rights,
        ))
    }
}

/// Decoding context: one element plus its path from the document root
struct Ctx<'a> {
    element: &'a XmlElement,
    path: ElementPath,
}

impl<'a> Ctx<'a> {
    fn new(element: &'a XmlElement, path: ElementPath) -> Self {
        Self { element, path }
    }

    /// Locate exactly one PREMIS child element
    fn required_one(&self, local: &str) -> PremisResult<Ctx<'a>> {
        let mut matches = self.element.children_named(ns::PREMIS, local);
        let first = matches.next().ok_or_else(|| PremisError::MissingField {
            path: self.path.clone(),
            field: local.to_string(),
        })?;
        let extra = matches.count();
        if extra > 0 {
            return Err(PremisError::Cardinality {
                path: self.path.clone(),
                field: local.to_string(),
                expected: Cardinality::RequiredOne.expected(),
                found: extra + 1,
            });
        }
        Ok(Ctx::new(first, self.path.child(local)))
    }

    /// Locate at most one PREMIS child element
    fn optional_one(&self, local: &str) -> PremisResult<Option<Ctx<'a>>> {
        let mut matches = self.element.children_named(ns::PREMIS, local);
        let Some(first) = matches.next() else {
            return Ok(None);
        };
        let extra = matches.count();
        if extra > 0 {
            return Err(PremisError::Cardinality {
                path: self.path.clone(),
                field: local.to_string(),
                expected: Cardinality::OptionalOne.expected(),
                found: extra + 1,
            });
        }
        Ok(Some(Ctx::new(first, self.path.child(local))))
    }

    /// Collect all PREMIS children with the given name, in document order
    fn zero_or_more(&self, local: &str) -> Vec<Ctx<'a>> {
        self.element
            .children_named(ns::PREMIS, local)
            .enumerate()
            .map(|(i, child)| Ctx::new(child, self.path.indexed(local, i)))
            .collect()
    }

    fn text(&self) -> &'a str {
        &self.element.text
    }

    /// Read the element's text with its authority attributes
    fn string_plus_authority(&self) -> StringPlusAuthority {
        StringPlusAuthority {
            text: self.element.text.clone(),
            authority: self.element.attr_local("authority").map(str::to_string),
            authority_uri: self.element.attr_local("authorityURI").map(str::to_string),
            value_uri: self.element.attr_local("valueURI").map(str::to_string),
        }
    }

    /// Decode the element's text against a closed vocabulary
    fn vocab<V: Vocabulary>(&self) -> PremisResult<V> {
        let term = self.text();
        V::from_term(term).ok_or_else(|| PremisError::InvalidEnumValue {
            path: self.path.clone(),
            value: term.to_string(),
            accepted: V::ACCEPTED.to_vec(),
        })
    }
}

/// Decode one (type, value) identifier pair through its binding
fn parse_identifier(parent: &Ctx<'_>, binding: &IdentifierBinding) -> PremisResult<Identifier> {
    let kind = parent.required_one(binding.type_element)?;
    let value = parent.required_one(binding.value_element)?;
    Ok(Identifier {
        kind: kind.string_plus_authority(),
        value: value.text().to_string(),
        simple_link: parent.element.attr_local("simpleLink").map(str::to_string),
    })
}

/// Decode a linking identifier, with roles where the binding declares them
fn parse_linking_identifier(
    parent: &Ctx<'_>,
    binding: &IdentifierBinding,
) -> PremisResult<LinkingIdentifier> {
    let identifier = parse_identifier(parent, binding)?;
    let roles = match binding.role_element {
        Some(role) => parent
            .zero_or_more(role)
            .iter()
            .map(|ctx| ctx.string_plus_authority())
            .collect(),
        None => Vec::new(),
    };
    Ok(LinkingIdentifier { identifier, roles })
}

/// Collect all linking identifiers of one binding under a parent
fn parse_linking_identifiers(
    parent: &Ctx<'_>,
    binding: &IdentifierBinding,
) -> PremisResult<Vec<LinkingIdentifier>> {
    parent
        .zero_or_more(binding.element)
        .iter()
        .map(|ctx| parse_linking_identifier(ctx, binding))
        .collect()
}

fn parse_object(ctx: &Ctx<'_>, declared: &NamespaceMap) -> PremisResult<Object> {
    let category = parse_object_category(ctx, declared)?;
    let identifier_ctx = ctx.required_one(schema::OBJECT_IDENTIFIER.element)?;
    let identifier = parse_identifier(&identifier_ctx, &schema::OBJECT_IDENTIFIER)?;

    let significant_properties = ctx
        .zero_or_more(elems::SIGNIFICANT_PROPERTIES)
        .iter()
        .map(parse_significant_properties)
        .collect::<PremisResult<Vec<_>>>()?;

    let characteristics = ctx
        .optional_one(elems::OBJECT_CHARACTERISTICS)?
        .map(|c| parse_characteristics(&c))
        .transpose()?;

    let original_name = ctx.optional_one(elems::ORIGINAL_NAME)?.map(|c| OriginalName {
        text: c.text().to_string(),
        simple_link: c.element.attr_local("simpleLink").map(str::to_string),
    });

    let storage = ctx
        .zero_or_more(elems::STORAGE)
        .iter()
        .map(parse_storage)
        .collect::<PremisResult<Vec<_>>>()?;

    let relationships = ctx
        .zero_or_more(elems::RELATIONSHIP)
        .iter()
        .map(parse_relationship)
        .collect::<PremisResult<Vec<_>>>()?;

    Ok(Object {
        identifier,
        category,
        significant_properties,
        characteristics,
        original_name,
        storage,
        relationships,
        linking_event_identifiers: parse_linking_identifiers(
            ctx,
            &schema::LINKING_EVENT_IDENTIFIER,
        )?,
        linking_rights_statement_identifiers: parse_linking_identifiers(
            ctx,
            &schema::LINKING_RIGHTS_STATEMENT_IDENTIFIER,
        )?,
    })
}

/// Decode the object category from the xsi:type attribute
///
/// The attribute value is a QName ("premis:file"); its prefix is resolved
/// through the document's declared namespaces, never matched literally.
fn parse_object_category(
    ctx: &Ctx<'_>,
    declared: &NamespaceMap,
) -> PremisResult<crate::types::ObjectCategory> {
    let raw = ctx
        .element
        .attr(ns::XSI, "type")
        .ok_or_else(|| PremisError::MissingField {
            path: ctx.path.clone(),
            field: elems::OBJECT_CATEGORY.to_string(),
        })?;

    let path = ctx.path.child(elems::OBJECT_CATEGORY);
    let term = match raw.split_once(':') {
        Some((prefix, local)) => {
            match declared.get_uri(prefix) {
                Some(uri) if uri == ns::PREMIS => local,
                // Foreign or unbound namespace: the literal is not a PREMIS
                // category term.
                _ => raw,
            }
        }
        None => raw,
    };

    crate::types::ObjectCategory::from_term(term).ok_or_else(|| {
        PremisError::InvalidEnumValue {
            path,
            value: raw.to_string(),
            accepted: crate::types::ObjectCategory::ACCEPTED.to_vec(),
        }
    })
}

fn parse_characteristics(ctx: &Ctx<'_>) -> PremisResult<ObjectCharacteristics> {
    let fixity = ctx
        .zero_or_more(elems::FIXITY)
        .iter()
        .map(parse_fixity)
        .collect::<PremisResult<Vec<_>>>()?;

    let size = match ctx.optional_one(elems::SIZE)? {
        Some(size_ctx) => Some(size_ctx.text().parse::<u64>().map_err(|_| {
            PremisError::MalformedValue {
                path: size_ctx.path.clone(),
                detail: format!("'{}' is not a non-negative integer", size_ctx.text()),
            }
        })?),
        None => None,
    };

    let formats = ctx
        .zero_or_more(elems::FORMAT)
        .iter()
        .map(parse_format)
        .collect::<PremisResult<Vec<_>>>()?;

    Ok(ObjectCharacteristics {
        fixity,
        size,
        formats,
    })
}

fn parse_fixity(ctx: &Ctx<'_>) -> PremisResult<Fixity> {
    Ok(Fixity {
        algorithm: ctx
            .required_one(elems::MESSAGE_DIGEST_ALGORITHM)?
            .string_plus_authority(),
        digest: ctx.required_one(elems::MESSAGE_DIGEST)?.text().to_string(),
        originator: ctx
            .optional_one(elems::MESSAGE_DIGEST_ORIGINATOR)?
            .map(|c| c.string_plus_authority()),
    })
}

fn parse_format(ctx: &Ctx<'_>) -> PremisResult<Format> {
    let designation = match ctx.optional_one(elems::FORMAT_DESIGNATION)? {
        Some(d) => Some(FormatDesignation {
            name: d.required_one(elems::FORMAT_NAME)?.string_plus_authority(),
            version: d
                .optional_one(elems::FORMAT_VERSION)?
                .map(|v| v.text().to_string()),
        }),
        None => None,
    };

    let registry = match ctx.optional_one(elems::FORMAT_REGISTRY)? {
        Some(r) => Some(FormatRegistry {
            name: r
                .required_one(elems::FORMAT_REGISTRY_NAME)?
                .string_plus_authority(),
            key: r
                .required_one(elems::FORMAT_REGISTRY_KEY)?
                .string_plus_authority(),
        }),
        None => None,
    };

    let notes = ctx
        .zero_or_more(elems::FORMAT_NOTE)
        .iter()
        .map(|n| n.text().to_string())
        .collect();

    Ok(Format {
        designation,
        registry,
        notes,
    })
}

fn parse_storage(ctx: &Ctx<'_>) -> PremisResult<Storage> {
    let content_location = match ctx.optional_one(elems::CONTENT_LOCATION)? {
        Some(l) => Some(ContentLocation {
            kind: l
                .required_one(elems::CONTENT_LOCATION_TYPE)?
                .string_plus_authority(),
            value: l
                .required_one(elems::CONTENT_LOCATION_VALUE)?
                .text()
                .to_string(),
        }),
        None => None,
    };

    Ok(Storage {
        content_location,
        medium: ctx
            .optional_one(elems::STORAGE_MEDIUM)?
            .map(|m| m.string_plus_authority()),
    })
}

fn parse_relationship(ctx: &Ctx<'_>) -> PremisResult<Relationship> {
    Ok(Relationship {
        kind: ctx
            .required_one(elems::RELATIONSHIP_TYPE)?
            .string_plus_authority(),
        sub_kind: ctx
            .required_one(elems::RELATIONSHIP_SUB_TYPE)?
            .string_plus_authority(),
        related_object_identifiers: ctx
            .zero_or_more(schema::RELATED_OBJECT_IDENTIFIER.element)
            .iter()
            .map(|c| parse_identifier(c, &schema::RELATED_OBJECT_IDENTIFIER))
            .collect::<PremisResult<Vec<_>>>()?,
        related_event_identifiers: ctx
            .zero_or_more(schema::RELATED_EVENT_IDENTIFIER.element)
            .iter()
            .map(|c| parse_identifier(c, &schema::RELATED_EVENT_IDENTIFIER))
            .collect::<PremisResult<Vec<_>>>()?,
    })
}

fn parse_event(ctx: &Ctx<'_>) -> PremisResult<Event> {
    let identifier_ctx = ctx.required_one(schema::EVENT_IDENTIFIER.element)?;
    let identifier = parse_identifier(&identifier_ctx, &schema::EVENT_IDENTIFIER)?;

    let kind = ctx.required_one(elems::EVENT_TYPE)?.vocab()?;

    let datetime_ctx = ctx.required_one(elems::EVENT_DATE_TIME)?;
    let datetime = PremisDateTime::parse(datetime_ctx.text()).map_err(|detail| {
        PremisError::MalformedValue {
            path: datetime_ctx.path.clone(),
            detail,
        }
    })?;

    let detail_information = ctx
        .zero_or_more(elems::EVENT_DETAIL_INFORMATION)
        .iter()
        .map(parse_detail_information)
        .collect::<PremisResult<Vec<_>>>()?;

    let outcome_information = ctx
        .zero_or_more(elems::EVENT_OUTCOME_INFORMATION)
        .iter()
        .map(parse_outcome_information)
        .collect::<PremisResult<Vec<_>>>()?;

    Ok(Event {
        identifier,
        kind,
        datetime,
        detail_information,
        outcome_information,
        linking_agent_identifiers: parse_linking_identifiers(
            ctx,
            &schema::LINKING_AGENT_IDENTIFIER,
        )?,
        linking_object_identifiers: parse_linking_identifiers(
            ctx,
            &schema::LINKING_OBJECT_IDENTIFIER,
        )?,
    })
}

fn parse_significant_properties(ctx: &Ctx<'_>) -> PremisResult<SignificantProperties> {
    Ok(SignificantProperties {
        kind: ctx
            .optional_one(elems::SIGNIFICANT_PROPERTIES_TYPE)?
            .map(|c| c.string_plus_authority()),
        value: ctx
            .optional_one(elems::SIGNIFICANT_PROPERTIES_VALUE)?
            .map(|c| c.text().to_string()),
    })
}

fn parse_detail_information(ctx: &Ctx<'_>) -> PremisResult<EventDetailInformation> {
    Ok(EventDetailInformation {
        detail: ctx
            .optional_one(elems::EVENT_DETAIL)?
            .map(|c| c.text().to_string()),
    })
}

fn parse_outcome_information(ctx: &Ctx<'_>) -> PremisResult<EventOutcomeInformation> {
    let outcome = ctx
        .optional_one(elems::EVENT_OUTCOME)?
        .map(|c| c.string_plus_authority());

    let detail_note = match ctx.optional_one(elems::EVENT_OUTCOME_DETAIL)? {
        Some(detail) => detail
            .optional_one(elems::EVENT_OUTCOME_DETAIL_NOTE)?
            .map(|n| n.text().to_string()),
        None => None,
    };

    Ok(EventOutcomeInformation {
        outcome,
        detail_note,
    })
}

fn parse_agent(ctx: &Ctx<'_>) -> PremisResult<Agent> {
    let identifier_ctx = ctx.required_one(schema::AGENT_IDENTIFIER.element)?;
    Ok(Agent {
        identifier: parse_identifier(&identifier_ctx, &schema::AGENT_IDENTIFIER)?,
        name: ctx.required_one(elems::AGENT_NAME)?.string_plus_authority(),
        kind: ctx.required_one(elems::AGENT_TYPE)?.vocab()?,
    })
}

fn parse_rights(ctx: &Ctx<'_>) -> PremisResult<Rights> {
    let statement_ctxs = ctx.zero_or_more(elems::RIGHTS_STATEMENT);
    if statement_ctxs.is_empty() {
        return Err(PremisError::MissingField {
            path: ctx.path.clone(),
            field: elems::RIGHTS_STATEMENT.to_string(),
        });
    }
    let statements = statement_ctxs
        .iter()
        .map(parse_rights_statement)
        .collect::<PremisResult<Vec<_>>>()?;
    Ok(Rights { statements })
}

fn parse_rights_statement(ctx: &Ctx<'_>) -> PremisResult<RightsStatement> {
    let identifier_ctx = ctx.required_one(schema::RIGHTS_STATEMENT_IDENTIFIER.element)?;
    Ok(RightsStatement {
        identifier: parse_identifier(&identifier_ctx, &schema::RIGHTS_STATEMENT_IDENTIFIER)?,
        basis: ctx.required_one(elems::RIGHTS_BASIS)?.vocab()?,
        linking_object_identifiers: parse_linking_identifiers(
            ctx,
            &schema::LINKING_OBJECT_IDENTIFIER,
        )?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"<premis:premis xmlns:premis="http://www.loc.gov/premis/v3"
        xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance" version="3.0">
      <premis:object xsi:type="premis:file">
        <premis:objectIdentifier>
          <premis:objectIdentifierType>UUID</premis:objectIdentifierType>
          <premis:objectIdentifierValue>abc-123</premis:objectIdentifierValue>
        </premis:objectIdentifier>
      </premis:object>
    </premis:premis>"#;

    #[test]
    fn test_parse_minimal_document() {
        let premis = PremisParser::parse(MINIMAL).unwrap();
        assert_eq!(premis.objects().len(), 1);
        assert_eq!(premis.objects()[0].identifier.value, "abc-123");
        assert_eq!(
            premis.objects()[0].category,
            crate::types::ObjectCategory::File
        );
        assert!(premis.events().is_empty());
        assert!(premis.agents().is_empty());
        assert!(premis.rights().is_empty());
    }

    #[test]
    fn test_missing_category_reports_path() {
        let xml = MINIMAL.replace(r#" xsi:type="premis:file""#, "");
        let err = PremisParser::parse(&xml).unwrap_err();
        match err {
            PremisError::MissingField { path, field } => {
                assert_eq!(path.to_string(), "Premis/Object[0]");
                assert_eq!(field, "objectCategory");
            }
            other => panic!("expected MissingField, got {:?}", other),
        }
    }

    #[test]
    fn test_wrong_root_is_schema_mismatch() {
        let xml = r#"<mets xmlns="http://www.loc.gov/METS/"/>"#;
        assert!(matches!(
            PremisParser::parse(xml),
            Err(PremisError::SchemaMismatch { .. })
        ));
    }

    #[test]
    fn test_wrong_version_is_schema_mismatch() {
        let xml = MINIMAL.replace(r#"version="3.0""#, r#"version="2.2""#);
        assert!(matches!(
            PremisParser::parse(&xml),
            Err(PremisError::SchemaMismatch { .. })
        ));
    }

    #[test]
    fn test_duplicate_identifier_is_cardinality_error() {
        let duplicated = MINIMAL.replace(
            "</premis:objectIdentifier>",
            "</premis:objectIdentifier><premis:objectIdentifier>\
             <premis:objectIdentifierType>UUID</premis:objectIdentifierType>\
             <premis:objectIdentifierValue>def-456</premis:objectIdentifierValue>\
             </premis:objectIdentifier>",
        );
        let err = PremisParser::parse(&duplicated).unwrap_err();
        match err {
            PremisError::Cardinality {
                field,
                expected,
                found,
                ..
            } => {
                assert_eq!(field, "objectIdentifier");
                assert_eq!(expected, "exactly one");
                assert_eq!(found, 2);
            }
            other => panic!("expected Cardinality, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_premis_child_rejected() {
        let xml = MINIMAL.replace(
            "</premis:premis>",
            "<premis:wossname/></premis:premis>",
        );
        assert!(matches!(
            PremisParser::parse(&xml),
            Err(PremisError::SchemaMismatch { .. })
        ));
    }
}
