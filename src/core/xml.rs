//! Namespace-resolved XML element tree
//!
//! This module reads an XML document into a lightweight owned tree whose
//! element and attribute names are already resolved to (namespace URI, local
//! name) pairs. PREMIS producers bind the PREMIS namespace to arbitrary
//! prefixes, so every later lookup in the codec matches on the URI and never
//! on the literal prefix.

use crate::core::error::{PremisError, PremisResult};
use crate::core::namespace::{ns, NamespaceMap};
use quick_xml::escape::unescape;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::collections::HashMap;

/// An attribute with a resolved name
///
/// Unprefixed attributes have no namespace; the XML default namespace does
/// not apply to attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XmlAttribute {
    /// Namespace URI, empty for unprefixed attributes
    pub namespace: String,
    /// Local name
    pub local: String,
    /// Unescaped attribute value
    pub value: String,
}

/// An element with resolved names, attributes, text and child elements
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct XmlElement {
    /// Namespace URI of the element
    pub namespace: String,
    /// Local name of the element
    pub local: String,
    /// Attributes in document order, xmlns declarations excluded
    pub attributes: Vec<XmlAttribute>,
    /// Child elements in document order
    pub children: Vec<XmlElement>,
    /// Concatenated, trimmed text content
    pub text: String,
}

impl XmlElement {
    /// Check whether this element has the given resolved name
    pub fn is(&self, namespace: &str, local: &str) -> bool {
        self.namespace == namespace && self.local == local
    }

    /// Get an attribute value by resolved name
    pub fn attr(&self, namespace: &str, local: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|a| a.namespace == namespace && a.local == local)
            .map(|a| a.value.as_str())
    }

    /// Get an unprefixed attribute value by local name
    pub fn attr_local(&self, local: &str) -> Option<&str> {
        self.attr("", local)
    }

    /// Iterate child elements with the given resolved name, in document order
    ///
    /// The returned items borrow from the element, not from the name
    /// strings, so they may outlive short-lived lookup names.
    pub fn children_named<'a>(
        &'a self,
        namespace: &str,
        local: &str,
    ) -> impl Iterator<Item = &'a XmlElement> + use<'a> {
        let namespace = namespace.to_owned();
        let local = local.to_owned();
        self.children
            .iter()
            .filter(move |c| c.is(&namespace, &local))
    }
}

/// Read an XML document into an element tree
///
/// Returns the root element together with the namespace declarations seen in
/// the document (first binding of each prefix wins), so the serializer can
/// re-emit the same prefixes.
pub fn read_document(xml: &str) -> PremisResult<(XmlElement, NamespaceMap)> {
    let mut reader = Reader::from_str(xml);

    let mut buf = Vec::new();
    // Stack of prefix scopes; each element pushes its own declarations.
    let mut scopes: Vec<HashMap<String, String>> = vec![initial_scope()];
    let mut stack: Vec<XmlElement> = Vec::new();
    let mut declared = NamespaceMap::empty();
    let mut root: Option<XmlElement> = None;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => {
                let element = open_element(&e, &mut scopes, &mut declared)?;
                stack.push(element);
            }
            Ok(Event::Empty(e)) => {
                let element = open_element(&e, &mut scopes, &mut declared)?;
                scopes.pop();
                close_element(element, &mut stack, &mut root)?;
            }
            Ok(Event::Text(e)) => {
                // Fragments keep their spacing; the whole text is trimmed
                // once when the element closes.
                let raw = String::from_utf8_lossy(e.as_ref()).to_string();
                let text = match unescape(&raw) {
                    Ok(unescaped) => unescaped.to_string(),
                    Err(_) => raw,
                };
                if let Some(parent) = stack.last_mut() {
                    parent.text.push_str(&text);
                }
            }
            Ok(Event::GeneralRef(e)) => {
                let name = String::from_utf8_lossy(e.as_ref()).to_string();
                let resolved = resolve_reference(&name)?;
                if let Some(parent) = stack.last_mut() {
                    parent.text.push(resolved);
                }
            }
            Ok(Event::CData(e)) => {
                let text = String::from_utf8_lossy(e.as_ref()).to_string();
                if let Some(parent) = stack.last_mut() {
                    parent.text.push_str(&text);
                }
            }
            Ok(Event::End(_)) => {
                scopes.pop();
                let element = stack
                    .pop()
                    .ok_or_else(|| PremisError::Xml("unbalanced end tag".to_string()))?;
                close_element(element, &mut stack, &mut root)?;
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(e) => {
                return Err(PremisError::Xml(format!("XML parsing error: {}", e)));
            }
        }
        buf.clear();
    }

    if !stack.is_empty() {
        return Err(PremisError::Xml("unexpected end of document".to_string()));
    }
    let root = root.ok_or_else(|| PremisError::Xml("document has no root element".to_string()))?;
    Ok((root, declared))
}

fn initial_scope() -> HashMap<String, String> {
    let mut scope = HashMap::new();
    // xml: is implicitly bound in every document.
    scope.insert(ns::XML_PREFIX.to_string(), ns::XML.to_string());
    scope
}

/// Resolve one start tag into an element, pushing its namespace scope
fn open_element(
    e: &BytesStart<'_>,
    scopes: &mut Vec<HashMap<String, String>>,
    declared: &mut NamespaceMap,
) -> PremisResult<XmlElement> {
    let raw_attrs = collect_attributes(e);

    let mut scope = HashMap::new();
    for (name, value) in &raw_attrs {
        if name == "xmlns" {
            scope.insert(String::new(), value.clone());
        } else if let Some(prefix) = name.strip_prefix("xmlns:") {
            scope.insert(prefix.to_string(), value.clone());
            // First binding of a prefix wins for re-serialization.
            if !declared.has_prefix(prefix) {
                let _ = declared.register(value, prefix);
            }
        }
    }
    scopes.push(scope);

    let name = String::from_utf8_lossy(e.name().as_ref()).to_string();
    let (namespace, local) = resolve_name(&name, scopes, true)?;

    let mut attributes = Vec::new();
    for (attr_name, value) in raw_attrs {
        if attr_name == "xmlns" || attr_name.starts_with("xmlns:") {
            continue;
        }
        let (attr_ns, attr_local) = resolve_name(&attr_name, scopes, false)?;
        attributes.push(XmlAttribute {
            namespace: attr_ns,
            local: attr_local,
            value,
        });
    }

    Ok(XmlElement {
        namespace,
        local,
        attributes,
        children: Vec::new(),
        text: String::new(),
    })
}

/// Resolve a general entity reference to its replacement character
///
/// Only the five predefined XML entities and numeric character references
/// are supported; PREMIS documents carry no DTD that could define others.
fn resolve_reference(name: &str) -> PremisResult<char> {
    let resolved = match name {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "apos" => Some('\''),
        "quot" => Some('"'),
        _ => {
            let code = if let Some(hex) = name.strip_prefix("#x").or_else(|| name.strip_prefix("#X")) {
                u32::from_str_radix(hex, 16).ok()
            } else if let Some(dec) = name.strip_prefix('#') {
                dec.parse::<u32>().ok()
            } else {
                None
            };
            code.and_then(char::from_u32)
        }
    };
    resolved.ok_or_else(|| PremisError::Xml(format!("unresolvable entity reference '&{};'", name)))
}

fn close_element(
    mut element: XmlElement,
    stack: &mut [XmlElement],
    root: &mut Option<XmlElement>,
) -> PremisResult<()> {
    element.text = element.text.trim().to_string();
    if let Some(parent) = stack.last_mut() {
        parent.children.push(element);
    } else if root.is_none() {
        *root = Some(element);
    } else {
        return Err(PremisError::Xml(
            "multiple root elements in document".to_string(),
        ));
    }
    Ok(())
}

/// Resolve a possibly prefixed name against the current scope stack
///
/// The default namespace applies to elements only, never to attributes.
fn resolve_name(
    name: &str,
    scopes: &[HashMap<String, String>],
    use_default: bool,
) -> PremisResult<(String, String)> {
    let (prefix, local) = match name.split_once(':') {
        Some((prefix, local)) => (prefix, local),
        None => ("", name),
    };

    if prefix.is_empty() && !use_default {
        return Ok((String::new(), local.to_string()));
    }

    for scope in scopes.iter().rev() {
        if let Some(uri) = scope.get(prefix) {
            return Ok((uri.clone(), local.to_string()));
        }
    }

    if prefix.is_empty() {
        // No default namespace in scope.
        return Ok((String::new(), local.to_string()));
    }
    Err(PremisError::Xml(format!(
        "unbound namespace prefix '{}'",
        prefix
    )))
}

fn collect_attributes(e: &BytesStart<'_>) -> Vec<(String, String)> {
    e.attributes()
        .flatten()
        .map(|attr| {
            let key = String::from_utf8_lossy(attr.key.as_ref()).to_string();
            let raw_value = String::from_utf8_lossy(attr.value.as_ref());
            let value = match unescape(&raw_value) {
                Ok(unescaped) => unescaped.to_string(),
                Err(_) => raw_value.to_string(),
            };
            (key, value)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_resolves_prefixes_to_uris() {
        let xml = r#"<p:premis xmlns:p="http://www.loc.gov/premis/v3" version="3.0">
            <p:object/>
        </p:premis>"#;
        let (root, declared) = read_document(xml).unwrap();
        assert!(root.is(ns::PREMIS, "premis"));
        assert_eq!(root.attr_local("version"), Some("3.0"));
        assert_eq!(root.children.len(), 1);
        assert!(root.children[0].is(ns::PREMIS, "object"));
        assert_eq!(declared.get_prefix(ns::PREMIS), Some("p"));
    }

    #[test]
    fn test_default_namespace_applies_to_elements_only() {
        let xml = r#"<premis xmlns="http://www.loc.gov/premis/v3" version="3.0"/>"#;
        let (root, _) = read_document(xml).unwrap();
        assert!(root.is(ns::PREMIS, "premis"));
        // version is unprefixed, so it stays namespace-less
        assert_eq!(root.attr("", "version"), Some("3.0"));
    }

    #[test]
    fn test_nested_scope_shadowing() {
        let xml = r#"<a:root xmlns:a="urn:outer">
            <a:child xmlns:a="urn:inner"><a:leaf>x</a:leaf></a:child>
            <a:sibling/>
        </a:root>"#;
        let (root, _) = read_document(xml).unwrap();
        assert!(root.is("urn:outer", "root"));
        assert!(root.children[0].is("urn:inner", "child"));
        assert!(root.children[0].children[0].is("urn:inner", "leaf"));
        assert_eq!(root.children[0].children[0].text, "x");
        assert!(root.children[1].is("urn:outer", "sibling"));
    }

    #[test]
    fn test_unbound_prefix_is_rejected() {
        let xml = r#"<q:premis version="3.0"/>"#;
        assert!(matches!(read_document(xml), Err(PremisError::Xml(_))));
    }

    #[test]
    fn test_text_is_unescaped() {
        let xml = r#"<r xmlns="urn:x"><v>a &amp; b</v></r>"#;
        let (root, _) = read_document(xml).unwrap();
        assert_eq!(root.children[0].text, "a & b");
    }

    #[test]
    fn test_entity_references_keep_surrounding_spacing() {
        let xml = r#"<r xmlns="urn:x"><v>a &lt;b&gt; &#38; &#x63;</v></r>"#;
        let (root, _) = read_document(xml).unwrap();
        assert_eq!(root.children[0].text, "a <b> & c");
    }

    #[test]
    fn test_unknown_entity_is_rejected() {
        let xml = r#"<r xmlns="urn:x"><v>&nbsp;</v></r>"#;
        assert!(matches!(read_document(xml), Err(PremisError::Xml(_))));
    }

    #[test]
    fn test_indentation_is_not_element_text() {
        let xml = "<r xmlns=\"urn:x\">\n  <v>  padded  </v>\n</r>";
        let (root, _) = read_document(xml).unwrap();
        assert_eq!(root.text, "");
        assert_eq!(root.children[0].text, "padded");
    }

    #[test]
    fn test_children_named_items_outlive_name_strings() {
        let xml = r#"<r xmlns="urn:x"><v>1</v><v>2</v><w>3</w></r>"#;
        let (root, _) = read_document(xml).unwrap();
        let first = {
            let name = String::from("v");
            root.children_named("urn:x", &name).next()
        };
        assert_eq!(first.unwrap().text, "1");
    }
}
