use std::path::PathBuf;

use serde::Deserialize;

/// Local cache backend selection.
#[derive(Debug, Deserialize, Clone)]
pub struct CacheSettings {
    #[serde(default)]
    pub backend: CacheBackend,

    /// Root directory for the file backend; entries land under
    /// `{file_root}/{app_id}/`
    #[serde(default = "default_file_root")]
    pub file_root: PathBuf,
}

#[derive(Debug, Deserialize, Clone, Copy, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CacheBackend {
    #[default]
    Memory,
    File,
}

impl Default for CacheSettings {
    fn default() -> Self {
        CacheSettings {
            backend: CacheBackend::default(),
            file_root: default_file_root(),
        }
    }
}

fn default_file_root() -> PathBuf {
    std::env::temp_dir().join("confsync")
}
