use async_trait::async_trait;
use dashmap::DashMap;

use super::Cache;
use crate::namespace::ItemSet;
use crate::Result;

/// In-memory cache, the default backend.
///
/// Entries live for the lifetime of the process. All operations are O(1)
/// amortized and safe for concurrent callers without external locking.
#[derive(Debug, Default)]
pub struct MemoryCache {
    items: DashMap<String, ItemSet>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Cache for MemoryCache {
    async fn get_items(&self, namespace: &str) -> ItemSet {
        self.items
            .get(namespace)
            .map(|entry| entry.value().clone())
            .unwrap_or_default()
    }

    async fn set_items(&self, namespace: &str, items: ItemSet) -> Result<()> {
        self.items.insert(namespace.to_string(), items);
        Ok(())
    }

    async fn namespaces(&self) -> Vec<String> {
        let mut names: Vec<String> = self.items.iter().map(|entry| entry.key().clone()).collect();
        names.sort();
        names
    }

    async fn delete(&self, namespace: &str) -> Result<()> {
        self.items.remove(namespace);
        Ok(())
    }

    async fn drain(&self) {
        self.items.clear();
    }
}
