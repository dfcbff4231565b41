// RouterOS REST HTTP client
//
// Wraps `reqwest::Client` with RouterOS URL construction, Basic auth, and
// error-body decoding. Menu-specific endpoints (leases, ARP, options) are
// implemented as inherent methods in sibling files to keep this module
// focused on transport mechanics.

use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::routeros::models::RosErrorBody;
use crate::transport::TransportConfig;

/// Raw HTTP client for the RouterOS v7 REST API.
///
/// Every request carries HTTP Basic credentials; RouterOS keeps no
/// server-side session for the REST surface. Dropping the client closes
/// its connection pool.
pub struct RouterOsClient {
    http: reqwest::Client,
    base_url: Url,
    username: String,
    password: SecretString,
}

impl RouterOsClient {
    /// Create a new client from a `TransportConfig`.
    ///
    /// The `base_url` is the router root (e.g. `https://192.168.88.1`);
    /// `/rest/...` is appended per request.
    pub fn new(
        base_url: Url,
        username: String,
        password: SecretString,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self {
            http,
            base_url,
            username,
            password,
        })
    }

    /// Create a client with a pre-built `reqwest::Client`.
    pub fn with_client(
        http: reqwest::Client,
        base_url: Url,
        username: String,
        password: SecretString,
    ) -> Self {
        Self {
            http,
            base_url,
            username,
            password,
        }
    }

    /// The router base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The API user name.
    pub fn username(&self) -> &str {
        &self.username
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// Build `{base}/rest/{path}`.
    pub(crate) fn rest_url(&self, path: &str) -> Result<Url, Error> {
        let base = self.base_url.as_str().trim_end_matches('/');
        let full = format!("{base}/rest/{}", path.trim_start_matches('/'));
        Ok(Url::parse(&full)?)
    }

    /// Build `{base}/rest/{path}?{key}={value}` (RouterOS equality filter).
    pub(crate) fn filtered_url(&self, path: &str, key: &str, value: &str) -> Result<Url, Error> {
        let mut url = self.rest_url(path)?;
        url.query_pairs_mut().append_pair(key, value);
        Ok(url)
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Send a GET request and decode the body.
    pub(crate) async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<T, Error> {
        debug!("GET {}", url);

        let resp = self
            .http
            .get(url)
            .basic_auth(&self.username, Some(self.password.expose_secret()))
            .send()
            .await
            .map_err(Error::Transport)?;

        Self::parse_response(resp).await
    }

    /// Send a PUT request (RouterOS "add") with JSON body and decode the created record.
    pub(crate) async fn put<T: DeserializeOwned>(
        &self,
        url: Url,
        body: &(impl Serialize + Sync),
    ) -> Result<T, Error> {
        debug!("PUT {}", url);

        let resp = self
            .http
            .put(url)
            .basic_auth(&self.username, Some(self.password.expose_secret()))
            .json(body)
            .send()
            .await
            .map_err(Error::Transport)?;

        Self::parse_response(resp).await
    }

    /// Send a DELETE request. RouterOS answers `204 No Content` on success.
    pub(crate) async fn delete(&self, url: Url) -> Result<(), Error> {
        debug!("DELETE {}", url);

        let resp = self
            .http
            .delete(url)
            .basic_auth(&self.username, Some(self.password.expose_secret()))
            .send()
            .await
            .map_err(Error::Transport)?;

        Self::check_status(resp).await.map(drop)
    }

    /// Map non-success statuses to `Error`, passing successful responses through.
    async fn check_status(resp: reqwest::Response) -> Result<reqwest::Response, Error> {
        let status = resp.status();

        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(Error::Authentication {
                message: "router rejected the API credentials".into(),
            });
        }

        if status.is_success() {
            return Ok(resp);
        }

        let body = resp.text().await.unwrap_or_default();
        let decoded = serde_json::from_str::<RosErrorBody>(&body).ok();
        let (message, detail) = match decoded {
            Some(err) => (
                err.message
                    .unwrap_or_else(|| status.canonical_reason().unwrap_or("error").to_owned()),
                err.detail,
            ),
            None => (body.chars().take(200).collect(), None),
        };

        Err(Error::Api {
            status: status.as_u16(),
            message,
            detail,
        })
    }

    /// Decode a successful JSON body, or map the error body.
    async fn parse_response<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, Error> {
        let resp = Self::check_status(resp).await?;
        let body = resp.text().await.map_err(Error::Transport)?;

        serde_json::from_str(&body).map_err(|e| {
            let preview: String = body.chars().take(200).collect();
            Error::Deserialization {
                message: format!("{e} (body preview: {preview:?})"),
                body: body.clone(),
            }
        })
    }
}
