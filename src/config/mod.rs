//! Settings for the synchronization engine.
//!
//! Hierarchical loading with priority:
//! 1. Default values (hardcoded)
//! 2. Optional settings file
//! 3. Environment variables (highest priority)

mod connection;
mod poll;
mod storage;

pub use connection::*;
pub use poll::*;
pub use storage::*;

//---
use config::Config;
use config::Environment;
use config::File;
use serde::Deserialize;

use crate::Result;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Settings {
    /// Remote service endpoint and credentials
    #[serde(default)]
    pub connection: ConnectionSettings,
    /// Long-poll cadence and notification channel sizing
    #[serde(default)]
    pub poll: PollSettings,
    /// Local cache backend selection
    #[serde(default)]
    pub cache: CacheSettings,
}

impl Settings {
    /// Load configuration, later sources overriding earlier ones:
    /// 1. Defaults
    /// 2. `path`, when given
    /// 3. `CONFSYNC__*` environment variables
    pub fn load(path: Option<&str>) -> Result<Self> {
        let mut config = Config::builder();

        if let Some(path) = path {
            config = config.add_source(File::with_name(path).required(true));
        }

        config = config.add_source(
            Environment::with_prefix("CONFSYNC")
                .separator("__")
                .ignore_empty(true)
                .try_parsing(true),
        );

        config
            .build()?
            .try_deserialize()
            .map_err(crate::Error::Config)
    }
}
