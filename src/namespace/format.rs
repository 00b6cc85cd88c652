use std::path::Path;

use crate::constants::DEFAULT_NAMESPACE;
use crate::constants::PROPERTIES_SUFFIX;

/// Native format of a namespace, derived from its name's extension.
///
/// Unsupported or absent extensions fall back to [`Properties`], the flat
/// key/value format.
///
/// [`Properties`]: NamespaceFormat::Properties
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NamespaceFormat {
    Properties,
    Json,
    Xml,
    Yml,
    Yaml,
    Txt,
}

impl NamespaceFormat {
    /// Derives the format from a namespace name.
    pub fn from_namespace(namespace: &str) -> Self {
        match Path::new(namespace).extension().and_then(|e| e.to_str()) {
            Some("json") => NamespaceFormat::Json,
            Some("xml") => NamespaceFormat::Xml,
            Some("yml") => NamespaceFormat::Yml,
            Some("yaml") => NamespaceFormat::Yaml,
            Some("txt") => NamespaceFormat::Txt,
            _ => NamespaceFormat::Properties,
        }
    }

    pub fn is_properties(self) -> bool {
        self == NamespaceFormat::Properties
    }
}

/// Checks whether a namespace carries the flat key/value format.
pub fn is_properties(namespace: &str) -> bool {
    NamespaceFormat::from_namespace(namespace).is_properties()
}

/// Strips the redundant flat-format suffix from a namespace name.
pub(crate) fn normalize_namespace(namespace: &str) -> &str {
    namespace
        .strip_suffix(PROPERTIES_SUFFIX)
        .unwrap_or(namespace)
}

/// Normalizes a watch set: the default namespace is always included,
/// explicit `.properties` suffixes are stripped and duplicates removed.
pub(crate) fn refine_namespaces(namespaces: &[String]) -> Vec<String> {
    let mut refined: Vec<String> = Vec::with_capacity(namespaces.len() + 1);

    for namespace in namespaces
        .iter()
        .map(|ns| ns.as_str())
        .chain(std::iter::once(DEFAULT_NAMESPACE))
    {
        let namespace = normalize_namespace(namespace);
        if !refined.iter().any(|seen| seen == namespace) {
            refined.push(namespace.to_string());
        }
    }

    refined
}
