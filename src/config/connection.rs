use serde::Deserialize;

/// Remote service connection parameters.
#[derive(Debug, Deserialize, Clone)]
pub struct ConnectionSettings {
    /// Server address; a bare `host:port` is promoted to `http://host:port`
    #[serde(default = "default_server_url")]
    pub server_url: String,

    /// Cluster the application reads from
    #[serde(default = "default_cluster")]
    pub cluster: String,

    /// Secret for HMAC request signing; unsigned requests when absent
    #[serde(default)]
    pub access_key_secret: Option<String>,

    /// Client address reported to the service for grayscale rules
    #[serde(default)]
    pub client_ip: Option<String>,

    /// Per-request timeout; must exceed the server's notification hold
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
}

impl Default for ConnectionSettings {
    fn default() -> Self {
        ConnectionSettings {
            server_url: default_server_url(),
            cluster: default_cluster(),
            access_key_secret: None,
            client_ip: None,
            request_timeout_ms: default_request_timeout_ms(),
        }
    }
}

fn default_server_url() -> String {
    "http://localhost:8080".to_string()
}

fn default_cluster() -> String {
    "default".to_string()
}

fn default_request_timeout_ms() -> u64 {
    90_000
}
