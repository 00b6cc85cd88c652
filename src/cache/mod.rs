//! Pluggable local storage for namespace item sets.
//!
//! A cache is a read-through mirror of the remote source, keyed by
//! namespace name. An empty item set is equivalent to a cache miss; callers
//! distinguish the two only via emptiness, so a genuinely empty remote
//! namespace cannot be cached as present.

mod file;
mod memory;

pub use file::*;
pub use memory::*;

use async_trait::async_trait;

#[cfg(test)]
use mockall::automock;

use crate::namespace::ItemSet;
use crate::Result;

#[cfg_attr(test, automock)]
#[async_trait]
pub trait Cache: Send + Sync + 'static {
    /// Items stored for `namespace`; an empty set on miss, never an error.
    async fn get_items(&self, namespace: &str) -> ItemSet;

    /// Replaces the stored set wholesale. Only the file backend can fail.
    async fn set_items(&self, namespace: &str, items: ItemSet) -> Result<()>;

    /// Names of the namespaces currently stored, sorted.
    async fn namespaces(&self) -> Vec<String>;

    /// Removes one entry.
    async fn delete(&self, namespace: &str) -> Result<()>;

    /// Removes all entries, best effort.
    async fn drain(&self);
}
