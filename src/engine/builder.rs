use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::mpsc;
use tokio::sync::Mutex;

use super::EngineInner;
use super::SyncEngine;
use crate::cache::Cache;
use crate::cache::FileCache;
use crate::cache::MemoryCache;
use crate::config::CacheBackend;
use crate::config::Settings;
use crate::remote::HttpRemoteSource;
use crate::remote::RemoteSource;
use crate::Result;

/// Configurable construction of a [`SyncEngine`].
///
/// The remote source and the cache are capabilities chosen here, once; by
/// default the HTTP source and the backend named in the settings are used.
pub struct SyncEngineBuilder {
    app_id: String,
    settings: Settings,
    remote: Option<Arc<dyn RemoteSource>>,
    cache: Option<Arc<dyn Cache>>,
}

impl SyncEngineBuilder {
    pub(crate) fn new(app_id: impl Into<String>) -> Self {
        SyncEngineBuilder {
            app_id: app_id.into(),
            settings: Settings::default(),
            remote: None,
            cache: None,
        }
    }

    /// Replace the default settings wholesale.
    pub fn settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }

    /// Use a custom remote source instead of the HTTP implementation.
    pub fn remote(mut self, remote: Arc<dyn RemoteSource>) -> Self {
        self.remote = Some(remote);
        self
    }

    /// Use a custom cache instead of the backend named in the settings.
    pub fn cache(mut self, cache: Arc<dyn Cache>) -> Self {
        self.cache = Some(cache);
        self
    }

    pub fn build(self) -> Result<SyncEngine> {
        let remote: Arc<dyn RemoteSource> = match self.remote {
            Some(remote) => remote,
            None => Arc::new(HttpRemoteSource::new(
                &self.app_id,
                &self.settings.connection,
            )?),
        };

        let cache: Arc<dyn Cache> = match self.cache {
            Some(cache) => cache,
            None => match self.settings.cache.backend {
                CacheBackend::Memory => Arc::new(MemoryCache::new()),
                CacheBackend::File => Arc::new(FileCache::new(
                    &self.app_id,
                    &self.settings.cache.file_root,
                )?),
            },
        };

        let (stop_tx, stop_rx) = mpsc::channel(1);

        Ok(SyncEngine {
            inner: Arc::new(EngineInner {
                app_id: self.app_id,
                settings: self.settings,
                remote,
                cache,
                fingerprints: DashMap::new(),
                sequences: DashMap::new(),
                stop_tx,
                stop_rx: Mutex::new(Some(stop_rx)),
            }),
        })
    }
}
