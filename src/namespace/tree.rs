use serde_json::Map;
use serde_json::Value;

use super::ItemSet;

/// Intermediate node for expanding dotted keys into nested JSON.
///
/// Children are owned and uniquely named; the tree lives for a single
/// render call and is never retained. A node is a leaf iff it has no
/// children. When a key names both a leaf and an intermediate segment, the
/// first-registered node wins and the shadowed value silently disappears
/// from the rendered output.
#[derive(Debug, Default)]
pub(crate) struct TreeNode {
    name: String,
    value: String,
    children: Vec<TreeNode>,
}

impl TreeNode {
    fn named(name: &str) -> Self {
        TreeNode {
            name: name.to_string(),
            ..Default::default()
        }
    }

    /// Builds the tree for a whole item set, one child chain per dotted key.
    pub(crate) fn build(items: &ItemSet) -> Self {
        let mut root = TreeNode::default();
        for (key, value) in items.iter() {
            root.attach(key, value);
        }
        root
    }

    fn attach(&mut self, key: &str, value: &str) {
        let mut node = self;
        for segment in key.split('.') {
            node = node.child_mut(segment);
        }
        node.value = value.to_string();
    }

    /// Child named `name`, created when absent. An existing child is reused
    /// as-is.
    fn child_mut(&mut self, name: &str) -> &mut TreeNode {
        if let Some(i) = self.children.iter().position(|c| c.name == name) {
            return &mut self.children[i];
        }

        self.children.push(TreeNode::named(name));
        let last = self.children.len() - 1;
        &mut self.children[last]
    }

    fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    fn to_value(&self) -> Value {
        if self.is_leaf() {
            return Value::String(self.value.clone());
        }

        Value::Object(self.to_object())
    }

    fn to_object(&self) -> Map<String, Value> {
        self.children
            .iter()
            .map(|child| (child.name.clone(), child.to_value()))
            .collect()
    }

    /// The root always renders as an object, so an empty key set becomes an
    /// empty map rather than a scalar.
    pub(crate) fn to_root_value(&self) -> Value {
        Value::Object(self.to_object())
    }
}
