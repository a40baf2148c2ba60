//! Namespace management for PREMIS documents
//!
//! This module handles namespace registration and lookup. PREMIS documents
//! may bind the PREMIS namespace to any prefix, so all matching elsewhere in
//! the crate is by namespace URI; prefixes only matter when re-emitting XML.

use crate::core::error::{PremisError, PremisResult};
use std::collections::BTreeMap;

/// Built-in namespaces
pub mod ns {
    /// PREMIS v3 namespace
    pub const PREMIS: &str = "http://www.loc.gov/premis/v3";
    /// XML Schema instance namespace (xsi:type, xsi:schemaLocation)
    pub const XSI: &str = "http://www.w3.org/2001/XMLSchema-instance";
    /// XML namespace (for xml:lang, etc.)
    pub const XML: &str = "http://www.w3.org/XML/1998/namespace";
    /// Namespace-declaration pseudo-namespace (xmlns attributes)
    pub const XMLNS: &str = "http://www.w3.org/2000/xmlns/";
    /// PREMIS prefix
    pub const PREMIS_PREFIX: &str = "premis";
    /// XSI prefix
    pub const XSI_PREFIX: &str = "xsi";
    /// XML prefix
    pub const XML_PREFIX: &str = "xml";
}

/// Map of namespace URI to prefix
///
/// Keeps both directions so the parser can resolve prefixes to URIs and the
/// serializer can assign the document's declared prefix to each URI. The map
/// is ordered so namespace declarations are re-emitted deterministically.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NamespaceMap {
    uri_to_prefix: BTreeMap<String, String>,
    prefix_to_uri: BTreeMap<String, String>,
}

impl NamespaceMap {
    /// Create a new namespace map with built-in namespaces registered
    pub fn new() -> Self {
        let mut map = Self::default();
        map.register_builtin_namespaces();
        map
    }

    /// Create an empty namespace map with no built-in registrations
    pub fn empty() -> Self {
        Self::default()
    }

    /// Register a namespace URI with a prefix
    ///
    /// Returns an error if the prefix is already registered to a different
    /// URI. Registering the same pair again is a no-op.
    pub fn register(&mut self, uri: &str, prefix: &str) -> PremisResult<()> {
        if let Some(existing_uri) = self.prefix_to_uri.get(prefix) {
            if existing_uri != uri {
                return Err(PremisError::Serialization(format!(
                    "prefix '{}' is already bound to '{}'",
                    prefix, existing_uri
                )));
            }
            return Ok(());
        }

        // Keep the first prefix seen for a URI; later aliases still resolve
        // through prefix_to_uri.
        self.uri_to_prefix
            .entry(uri.to_string())
            .or_insert_with(|| prefix.to_string());
        self.prefix_to_uri
            .insert(prefix.to_string(), uri.to_string());
        Ok(())
    }

    /// Get the prefix for a namespace URI
    pub fn get_prefix(&self, uri: &str) -> Option<&str> {
        self.uri_to_prefix.get(uri).map(|s| s.as_str())
    }

    /// Get the URI for a namespace prefix
    pub fn get_uri(&self, prefix: &str) -> Option<&str> {
        self.prefix_to_uri.get(prefix).map(|s| s.as_str())
    }

    /// Check if a namespace URI is registered
    pub fn has_uri(&self, uri: &str) -> bool {
        self.uri_to_prefix.contains_key(uri)
    }

    /// Check if a namespace prefix is registered
    pub fn has_prefix(&self, prefix: &str) -> bool {
        self.prefix_to_uri.contains_key(prefix)
    }

    /// Iterate all registered (uri, prefix) pairs in deterministic order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.uri_to_prefix
            .iter()
            .map(|(uri, prefix)| (uri.as_str(), prefix.as_str()))
    }

    fn register_builtin_namespaces(&mut self) {
        // These prefixes cannot collide in a fresh map.
        let _ = self.register(ns::PREMIS, ns::PREMIS_PREFIX);
        let _ = self.register(ns::XSI, ns::XSI_PREFIX);
        let _ = self.register(ns::XML, ns::XML_PREFIX);
    }
}
