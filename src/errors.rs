//! Error hierarchy for the configuration mirror.
//!
//! Failures are grouped by collaborator: the remote configuration service,
//! the local cache backend, and settings loading. Nothing in this crate is
//! fatal to the process; every failure is reported as a value.

use std::path::PathBuf;

use config::ConfigError;

#[doc(hidden)]
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Remote configuration service failures (transport, protocol, parse)
    #[error(transparent)]
    Remote(#[from] RemoteError),

    /// Local cache storage failures (file backend only)
    #[error(transparent)]
    Cache(#[from] CacheError),

    /// Settings loading and validation failures
    #[error(transparent)]
    Config(#[from] ConfigError),
}

#[derive(Debug, thiserror::Error)]
pub enum RemoteError {
    /// Transport-level failures reaching the configuration service
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    /// Non-success status outside the not-modified protocol
    #[error("unexpected status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    /// Malformed response payloads
    #[error("invalid response body: {0}")]
    Parse(#[from] serde_json::Error),

    /// Malformed server address or endpoint path
    #[error("invalid server url: {0}")]
    InvalidUrl(String),

    /// Application id missing at client construction
    #[error("app id can not be empty")]
    EmptyAppId,
}

#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    /// Disk I/O failure on a namespace file
    #[error("cache file error at {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Cache root directory could not be created
    #[error("failed to create cache dir {path}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Serialization failure for a flat namespace file
    #[error("cache serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

// ============== Conversion Implementations ============== //
impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::Remote(RemoteError::Http(e))
    }
}
