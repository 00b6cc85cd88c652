//! The synchronization engine.
//!
//! A [`SyncEngine`] mirrors the namespaces of one application: it resolves
//! reads cache-first, tracks the release fingerprint and notification
//! sequence of every namespace it has fetched, and runs a single background
//! long-poll loop that pushes change notifications to subscribers.
//!
//! # Basic Usage
//! ```no_run
//! use confsync::{Settings, SyncEngine};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let engine = SyncEngine::builder("SampleApp")
//!         .settings(Settings::default())
//!         .build()
//!         .unwrap();
//!
//!     let timeout = engine.get_value("server.timeout").await.unwrap();
//!     println!("timeout: {timeout}");
//!
//!     let (mut changes, mut errors) = engine.watch(&["db".to_string()]).await;
//!     tokio::select! {
//!         Some(change) = changes.recv() => println!("changed: {}", change.namespace),
//!         Some(error) = errors.recv() => eprintln!("poll failed: {error}"),
//!     }
//!
//!     engine.stop();
//! }
//! ```

mod builder;
mod watcher;

pub use builder::*;

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use tokio::sync::mpsc;
use tokio::sync::Mutex;
use tracing::warn;

use crate::cache::Cache;
use crate::config::Settings;
use crate::constants::DEFAULT_NAMESPACE;
use crate::constants::INITIAL_NOTIFICATION_SEQUENCE;
use crate::namespace::normalize_namespace;
use crate::namespace::refine_namespaces;
use crate::namespace::ItemSet;
use crate::remote::ChangeNotification;
use crate::remote::RemoteSource;
use crate::Error;
use crate::Result;

use watcher::Watcher;

/// Read-only mirror of one application's configuration.
///
/// Cheap to clone; all clones share the same cache, namespace state and
/// poll loop. Namespace state is private to this instance: sharing a
/// [`Cache`] between engines is allowed, sharing state is not.
#[derive(Clone)]
pub struct SyncEngine {
    inner: Arc<EngineInner>,
}

pub(crate) struct EngineInner {
    app_id: String,
    settings: Settings,
    remote: Arc<dyn RemoteSource>,
    cache: Arc<dyn Cache>,
    /// namespace -> last seen release fingerprint
    fingerprints: DashMap<String, String>,
    /// namespace -> last seen notification sequence; membership in this map
    /// makes a namespace poll-eligible
    sequences: DashMap<String, i64>,
    stop_tx: mpsc::Sender<()>,
    stop_rx: Mutex<Option<mpsc::Receiver<()>>>,
}

impl SyncEngine {
    /// Create a configured engine builder for `app_id`.
    pub fn builder(app_id: impl Into<String>) -> SyncEngineBuilder {
        SyncEngineBuilder::new(app_id)
    }

    pub fn app_id(&self) -> &str {
        &self.inner.app_id
    }

    /// Value of `key` in the default namespace.
    pub async fn get_value(&self, key: &str) -> Result<String> {
        self.get_value_in(DEFAULT_NAMESPACE, key).await
    }

    /// Value of `key` in `namespace`; empty string when the key is absent.
    pub async fn get_value_in(&self, namespace: &str, key: &str) -> Result<String> {
        let items = self.get_items_in(namespace).await?;
        Ok(items.get(key))
    }

    /// All items of the default namespace.
    pub async fn get_items(&self) -> Result<ItemSet> {
        self.get_items_in(DEFAULT_NAMESPACE).await
    }

    /// All items of `namespace`, cache-first.
    ///
    /// A non-empty cache entry is served without contacting the remote
    /// source; a miss fetches, records namespace state and fills the cache.
    pub async fn get_items_in(&self, namespace: &str) -> Result<ItemSet> {
        let items = self.inner.cache.get_items(namespace).await;
        if !items.is_empty() {
            return Ok(items);
        }

        self.sync_namespace(namespace).await
    }

    /// Rendered content of `namespace`: nested JSON for flat namespaces,
    /// the raw content blob for everything else.
    pub async fn get_content(&self, namespace: &str) -> Result<String> {
        let items = self.get_items_in(namespace).await?;
        Ok(items.render(namespace))
    }

    /// Snapshot of namespace -> release fingerprint for everything fetched
    /// so far.
    pub fn release_fingerprints(&self) -> HashMap<String, String> {
        self.inner
            .fingerprints
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().clone()))
            .collect()
    }

    /// Watch `namespaces` for changes.
    ///
    /// The watch set always includes the default namespace. Every namespace
    /// is fetched once up front so its state exists, then a single
    /// background long-poll loop takes over. Returns the change channel and
    /// the error channel; both stay open after [`stop`](SyncEngine::stop).
    ///
    /// The loop blocks on an unconsumed change notification, so a slow
    /// subscriber delays further polling instead of growing a backlog.
    /// Watching more than once per engine is a caller-contract violation:
    /// later calls log a warning and return channels no loop feeds.
    pub async fn watch(
        &self,
        namespaces: &[String],
    ) -> (
        mpsc::Receiver<ChangeNotification>,
        mpsc::Receiver<Error>,
    ) {
        for namespace in refine_namespaces(namespaces) {
            if let Err(e) = self.sync_namespace(&namespace).await {
                warn!(namespace = %namespace, error = %e, "initial fetch failed");
            }
        }

        let capacity = self.inner.settings.poll.channel_capacity.max(1);
        let (watch_tx, watch_rx) = mpsc::channel(capacity);
        let (err_tx, err_rx) = mpsc::channel(1);

        let Some(stop_rx) = self.inner.stop_rx.lock().await.take() else {
            warn!("watch already started; long poll not restarted");
            return (watch_rx, err_rx);
        };

        let interval = Duration::from_millis(self.inner.settings.poll.interval_ms);
        let watcher = Watcher::new(self.clone(), watch_tx, err_tx, stop_rx);
        tokio::spawn(watcher.run(interval));

        (watch_rx, err_rx)
    }

    /// Signal the poll loop to exit after its current tick.
    ///
    /// The stop channel has depth one: at most one stop may be in flight,
    /// and sending a second one before the loop consumed the first is a
    /// caller-contract violation. With no loop running the signal parks
    /// and stops the next loop as soon as it starts.
    pub fn stop(&self) {
        let _ = self.inner.stop_tx.try_send(());
    }

    /// Fetch `namespace` from the remote source and fold the result into
    /// local state. This is the slow path behind every cache miss and every
    /// change notification.
    pub(crate) async fn sync_namespace(&self, namespace: &str) -> Result<ItemSet> {
        let namespace = normalize_namespace(namespace);
        let fingerprint = self.fingerprint_of(namespace);

        let fetch = self
            .inner
            .remote
            .fetch_namespace(namespace, &fingerprint)
            .await?;

        // "unchanged" answers carry an empty fingerprint
        if !fetch.fingerprint.is_empty() {
            self.inner
                .fingerprints
                .insert(namespace.to_string(), fetch.fingerprint.clone());
        }

        // first fetch makes the namespace poll-eligible, sequence pending
        self.inner
            .sequences
            .entry(namespace.to_string())
            .or_insert(INITIAL_NOTIFICATION_SEQUENCE);

        // empty means "no update", never "clear the cache"
        if !fetch.items.is_empty() {
            if let Err(e) = self
                .inner
                .cache
                .set_items(namespace, fetch.items.clone())
                .await
            {
                warn!(namespace = %namespace, error = %e, "cache update failed");
            }
        }

        Ok(fetch.items)
    }

    fn fingerprint_of(&self, namespace: &str) -> String {
        self.inner
            .fingerprints
            .entry(namespace.to_string())
            .or_default()
            .clone()
    }

    /// The full tracked set, sent to the remote source on every poll tick.
    pub(crate) fn tracked(&self) -> Vec<ChangeNotification> {
        self.inner
            .sequences
            .iter()
            .map(|entry| ChangeNotification {
                namespace: entry.key().clone(),
                sequence: *entry.value(),
            })
            .collect()
    }

    pub(crate) fn record_sequence(&self, namespace: &str, sequence: i64) {
        self.inner
            .sequences
            .insert(namespace.to_string(), sequence);
    }

    pub(crate) fn remote(&self) -> &dyn RemoteSource {
        self.inner.remote.as_ref()
    }

    /// Handle to the underlying cache, e.g. for draining it wholesale.
    pub fn cache(&self) -> Arc<dyn Cache> {
        Arc::clone(&self.inner.cache)
    }
}
