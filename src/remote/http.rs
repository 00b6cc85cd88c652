use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use super::sign;
use super::ChangeNotification;
use super::NamespaceFetch;
use super::RemoteSource;
use crate::config::ConnectionSettings;
use crate::constants::DEFAULT_NAMESPACE;
use crate::constants::INITIAL_NOTIFICATION_SEQUENCE;
use crate::errors::RemoteError;
use crate::namespace::ItemSet;
use crate::Result;

/// HTTP implementation of the remote source.
///
/// Endpoints:
/// - `GET /configs/{app}/{cluster}/{namespace}?fingerprint=&ip=`: realtime
///   fetch; `304 Not Modified` when the fingerprint still matches.
/// - `GET /notifications?appId=&cluster=&seen=`: long poll, held by the
///   server until something changes or its own timeout elapses.
/// - `GET /configfiles/{app}/{cluster}/{namespace}`: edge-cached bulk read.
///
/// When an access-key secret is configured every request carries an
/// `Authorization: {appId}:{signature}` header over the timestamped path.
#[derive(Debug)]
pub struct HttpRemoteSource {
    http: reqwest::Client,
    base: Url,
    app_id: String,
    cluster: String,
    access_key_secret: Option<String>,
    client_ip: Option<String>,
}

impl HttpRemoteSource {
    pub fn new(app_id: &str, settings: &ConnectionSettings) -> Result<Self> {
        if app_id.is_empty() {
            return Err(RemoteError::EmptyAppId.into());
        }

        let server = normalize_server_url(&settings.server_url);
        let base = Url::parse(&server).map_err(|e| RemoteError::InvalidUrl(e.to_string()))?;

        // the notifications endpoint is held open server-side, so the
        // client timeout must exceed the server's hold duration
        let http = reqwest::Client::builder()
            .timeout(Duration::from_millis(settings.request_timeout_ms))
            .build()
            .map_err(RemoteError::Http)?;

        Ok(HttpRemoteSource {
            http,
            base,
            app_id: app_id.to_string(),
            cluster: settings.cluster.clone(),
            access_key_secret: settings.access_key_secret.clone(),
            client_ip: settings.client_ip.clone(),
        })
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| RemoteError::InvalidUrl(self.base.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Issues one GET, signing it when a secret is configured.
    ///
    /// `None` means the server answered `304 Not Modified`.
    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<Option<T>> {
        debug!(%url, "remote request");

        let mut request = self.http.get(url.clone());
        if let Some(secret) = &self.access_key_secret {
            for (name, value) in sign::auth_headers(&path_with_query(&url), &self.app_id, secret) {
                request = request.header(name, value);
            }
        }

        let response = request.send().await.map_err(RemoteError::Http)?;
        let status = response.status();
        debug!(%url, status = status.as_u16(), "remote response");

        match status {
            StatusCode::OK => Ok(Some(response.json::<T>().await.map_err(RemoteError::Http)?)),
            StatusCode::NOT_MODIFIED => Ok(None),
            status => Err(RemoteError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            }
            .into()),
        }
    }
}

#[async_trait]
impl RemoteSource for HttpRemoteSource {
    async fn fetch_namespace(&self, namespace: &str, fingerprint: &str) -> Result<NamespaceFetch> {
        let mut url = self.endpoint(&["configs", &self.app_id, &self.cluster, namespace])?;
        url.query_pairs_mut().append_pair("fingerprint", fingerprint);
        if let Some(ip) = &self.client_ip {
            url.query_pairs_mut().append_pair("ip", ip);
        }

        Ok(self.get_json(url).await?.unwrap_or_default())
    }

    async fn fetch_notifications(
        &self,
        seen: &[ChangeNotification],
    ) -> Result<Vec<ChangeNotification>> {
        // a watcher that has seen nothing still polls the default namespace
        let fallback;
        let seen = if seen.is_empty() {
            fallback = [ChangeNotification {
                namespace: DEFAULT_NAMESPACE.to_string(),
                sequence: INITIAL_NOTIFICATION_SEQUENCE,
            }];
            &fallback[..]
        } else {
            seen
        };

        let encoded = serde_json::to_string(seen)
            .map_err(|e| crate::Error::Remote(RemoteError::Parse(e)))?;

        let mut url = self.endpoint(&["notifications"])?;
        url.query_pairs_mut()
            .append_pair("appId", &self.app_id)
            .append_pair("cluster", &self.cluster)
            .append_pair("seen", &encoded);

        Ok(self.get_json(url).await?.unwrap_or_default())
    }

    async fn fetch_cached(&self, namespace: &str) -> Result<ItemSet> {
        let mut url = self.endpoint(&["configfiles", &self.app_id, &self.cluster, namespace])?;
        if let Some(ip) = &self.client_ip {
            url.query_pairs_mut().append_pair("ip", ip);
        }

        Ok(self.get_json(url).await?.unwrap_or_default())
    }
}

/// Accepts bare host:port addresses and trims trailing slashes.
pub(crate) fn normalize_server_url(server: &str) -> String {
    let server = server.trim_end_matches('/');

    if server.starts_with("http://") || server.starts_with("https://") {
        server.to_string()
    } else {
        format!("http://{server}")
    }
}

fn path_with_query(url: &Url) -> String {
    match url.query() {
        Some(query) => format!("{}?{}", url.path(), query),
        None => url.path().to_string(),
    }
}
