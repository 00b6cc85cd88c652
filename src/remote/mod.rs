//! Remote configuration source boundary.
//!
//! The engine only ever talks to the service through the [`RemoteSource`]
//! capability, so transports are swappable at construction time. The
//! shipped implementation is [`HttpRemoteSource`]; tests substitute mocks.

mod http;
mod sign;

pub use http::*;

use async_trait::async_trait;
use serde::Deserialize;
use serde::Serialize;

#[cfg(test)]
use mockall::automock;

use crate::namespace::ItemSet;
use crate::Result;

/// Result of fetching one namespace from the remote source.
///
/// A "not modified" answer carries no items and an empty fingerprint; it
/// must never be confused with "the namespace is now empty".
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct NamespaceFetch {
    /// Full replacement item set; empty when unchanged.
    pub items: ItemSet,
    /// Opaque server-side version marker; empty when unchanged.
    pub fingerprint: String,
}

/// A namespace paired with its notification sequence.
///
/// Sent to the remote source as "the sequences I have seen" and received
/// back as "these namespaces moved past your sequences".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeNotification {
    pub namespace: String,
    pub sequence: i64,
}

#[cfg_attr(test, automock)]
#[async_trait]
pub trait RemoteSource: Send + Sync + 'static {
    /// Fetches `namespace` relative to the last seen `fingerprint`.
    ///
    /// Returns an empty fetch when the server reports nothing changed.
    async fn fetch_namespace(&self, namespace: &str, fingerprint: &str) -> Result<NamespaceFetch>;

    /// Long-polls for namespaces that changed past the sequences in `seen`.
    ///
    /// An empty answer means nothing changed, the expected common case.
    /// Namespaces never observed carry the sentinel sequence.
    async fn fetch_notifications(
        &self,
        seen: &[ChangeNotification],
    ) -> Result<Vec<ChangeNotification>>;

    /// Best-effort edge-cached read of a namespace, bypassing release
    /// tracking. Not part of the watch path.
    async fn fetch_cached(&self, namespace: &str) -> Result<ItemSet>;
}

#[cfg(test)]
mod http_test;
