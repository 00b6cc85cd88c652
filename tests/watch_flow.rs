//! End-to-end flows through the public API with a scripted remote source.

use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::timeout;

use confsync::ChangeNotification;
use confsync::ItemSet;
use confsync::MemoryCache;
use confsync::NamespaceFetch;
use confsync::RemoteSource;
use confsync::Result;
use confsync::Settings;
use confsync::SyncEngine;

/// Serves "ns" in two versions: v1 until the change notification has been
/// handed out, v2 afterwards.
#[derive(Default)]
struct ScriptedRemote {
    fetches: AtomicUsize,
    notifications: AtomicUsize,
}

impl ScriptedRemote {
    fn version(&self) -> usize {
        if self.notifications.load(Ordering::SeqCst) > 0 {
            2
        } else {
            1
        }
    }
}

#[async_trait]
impl RemoteSource for ScriptedRemote {
    async fn fetch_namespace(&self, namespace: &str, _fingerprint: &str) -> Result<NamespaceFetch> {
        self.fetches.fetch_add(1, Ordering::SeqCst);

        if namespace != "ns" {
            return Ok(NamespaceFetch::default());
        }

        let version = self.version();
        let mut items = ItemSet::new();
        items.insert("k", format!("v{version}"));

        Ok(NamespaceFetch {
            items,
            fingerprint: format!("r{version}"),
        })
    }

    async fn fetch_notifications(
        &self,
        _seen: &[ChangeNotification],
    ) -> Result<Vec<ChangeNotification>> {
        if self.notifications.fetch_add(1, Ordering::SeqCst) == 0 {
            Ok(vec![ChangeNotification {
                namespace: "ns".to_string(),
                sequence: 2,
            }])
        } else {
            Ok(vec![])
        }
    }

    async fn fetch_cached(&self, _namespace: &str) -> Result<ItemSet> {
        Ok(ItemSet::new())
    }
}

fn engine(remote: Arc<ScriptedRemote>) -> SyncEngine {
    let mut settings = Settings::default();
    settings.poll.interval_ms = 10;

    SyncEngine::builder("SampleApp")
        .settings(settings)
        .remote(remote)
        .cache(Arc::new(MemoryCache::new()))
        .build()
        .unwrap()
}

#[tokio::test]
async fn resolve_hits_cache_after_first_fetch() {
    let remote = Arc::new(ScriptedRemote::default());
    let engine = engine(remote.clone());

    assert_eq!("v1", engine.get_value_in("ns", "k").await.unwrap());
    assert_eq!("v1", engine.get_value_in("ns", "k").await.unwrap());

    assert_eq!(1, remote.fetches.load(Ordering::SeqCst));
    assert_eq!(
        Some(&"r1".to_string()),
        engine.release_fingerprints().get("ns")
    );
}

#[tokio::test]
async fn watch_refreshes_cache_before_notifying() {
    let remote = Arc::new(ScriptedRemote::default());
    let engine = engine(remote.clone());

    let (mut changes, _errors) = engine.watch(&["ns".to_string()]).await;

    let change = timeout(Duration::from_secs(5), changes.recv())
        .await
        .expect("no notification within timeout")
        .expect("watch channel closed");

    assert_eq!("ns", change.namespace);
    assert_eq!(2, change.sequence);

    // a subscriber reacting to the change reads the new version
    assert_eq!("v2", engine.get_value_in("ns", "k").await.unwrap());
    assert_eq!(
        Some(&"r2".to_string()),
        engine.release_fingerprints().get("ns")
    );

    engine.stop();
}
