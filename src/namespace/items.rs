use std::collections::HashMap;

use serde::Deserialize;
use serde::Serialize;

use super::NamespaceFormat;
use super::TreeNode;
use crate::constants::CONTENT_KEY;

/// Flat key/value contents of one namespace.
///
/// An item set is replaced wholesale on every update and never mutated in
/// place once handed to a caller. An empty set is indistinguishable from a
/// missing one by contract.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemSet(HashMap<String, String>);

impl ItemSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Value of `key`, or the empty string when absent. Absence is not
    /// exceptional.
    pub fn get(&self, key: &str) -> String {
        self.0.get(key).cloned().unwrap_or_default()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &String)> {
        self.0.iter()
    }

    /// Renders the whole set as a single string.
    ///
    /// Flat namespaces expand their dotted keys into nested JSON; all other
    /// formats pass the reserved content entry through untouched.
    pub fn render(&self, namespace: &str) -> String {
        if NamespaceFormat::from_namespace(namespace).is_properties() {
            self.to_tree_json()
        } else {
            self.get(CONTENT_KEY)
        }
    }

    /// Dotted keys expanded into a nested JSON object.
    pub(crate) fn to_tree_json(&self) -> String {
        let value = TreeNode::build(self).to_root_value();
        serde_json::to_string(&value).unwrap_or_default()
    }
}

impl FromIterator<(String, String)> for ItemSet {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl From<HashMap<String, String>> for ItemSet {
    fn from(map: HashMap<String, String>) -> Self {
        Self(map)
    }
}
