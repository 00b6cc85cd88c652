use std::fs::create_dir_all;
use std::path::Path;
use std::path::PathBuf;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::warn;

use super::Cache;
use crate::constants::CONTENT_KEY;
use crate::errors::CacheError;
use crate::namespace::is_properties;
use crate::namespace::ItemSet;
use crate::Result;

/// File-backed cache: one regular file per namespace under
/// `{root}/{app_id}/`.
///
/// Flat namespaces are stored as UTF-8 JSON objects, everything else as
/// the raw bytes of the reserved content entry. The file system gives no
/// per-key atomicity, so every operation serializes through one mutex.
pub struct FileCache {
    dir: PathBuf,
    lock: Mutex<()>,
}

impl FileCache {
    /// Creates the cache, establishing its root directory eagerly.
    pub fn new(app_id: &str, root: impl AsRef<Path>) -> Result<Self> {
        let dir = root.as_ref().join(app_id);
        create_dir_all(&dir).map_err(|e| CacheError::CreateDir {
            path: dir.clone(),
            source: e,
        })?;

        Ok(FileCache {
            dir,
            lock: Mutex::new(()),
        })
    }

    fn path_of(&self, namespace: &str) -> PathBuf {
        self.dir.join(namespace)
    }
}

#[async_trait]
impl Cache for FileCache {
    async fn get_items(&self, namespace: &str) -> ItemSet {
        let _guard = self.lock.lock().await;

        let path = self.path_of(namespace);
        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return ItemSet::new(),
            Err(e) => {
                warn!(path = %path.display(), error = %e, "cache read failed");
                return ItemSet::new();
            }
        };

        if is_properties(namespace) {
            match serde_json::from_slice(&bytes) {
                Ok(items) => items,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "cache entry is not valid json");
                    ItemSet::new()
                }
            }
        } else {
            let content = String::from_utf8_lossy(&bytes).into_owned();
            [(CONTENT_KEY.to_string(), content)].into_iter().collect()
        }
    }

    async fn set_items(&self, namespace: &str, items: ItemSet) -> Result<()> {
        let _guard = self.lock.lock().await;

        let bytes = if is_properties(namespace) {
            serde_json::to_vec(&items).map_err(CacheError::Serialize)?
        } else {
            items.get(CONTENT_KEY).into_bytes()
        };

        let path = self.path_of(namespace);
        tokio::fs::write(&path, bytes)
            .await
            .map_err(|e| CacheError::Io { path, source: e })?;

        Ok(())
    }

    async fn namespaces(&self) -> Vec<String> {
        let _guard = self.lock.lock().await;

        let mut names = Vec::new();
        let mut entries = match tokio::fs::read_dir(&self.dir).await {
            Ok(entries) => entries,
            Err(e) => {
                warn!(dir = %self.dir.display(), error = %e, "cache dir unreadable");
                return names;
            }
        };

        while let Ok(Some(entry)) = entries.next_entry().await {
            if entry.file_type().await.map(|t| t.is_file()).unwrap_or(false) {
                names.push(entry.file_name().to_string_lossy().into_owned());
            }
        }

        names.sort();
        names
    }

    async fn delete(&self, namespace: &str) -> Result<()> {
        let _guard = self.lock.lock().await;

        let path = self.path_of(namespace);
        tokio::fs::remove_file(&path)
            .await
            .map_err(|e| CacheError::Io { path, source: e })?;

        Ok(())
    }

    async fn drain(&self) {
        let _guard = self.lock.lock().await;

        let mut entries = match tokio::fs::read_dir(&self.dir).await {
            Ok(entries) => entries,
            Err(e) => {
                warn!(dir = %self.dir.display(), error = %e, "cache dir unreadable");
                return;
            }
        };

        // a single stuck file must not abort the sweep
        while let Ok(Some(entry)) = entries.next_entry().await {
            if let Err(e) = tokio::fs::remove_file(entry.path()).await {
                warn!(path = %entry.path().display(), error = %e, "cache drain skipped a file");
            }
        }
    }
}
