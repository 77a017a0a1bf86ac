// Remote store HTTP client
//
// Wraps `reqwest::Client` with store-specific URL construction and error
// envelope parsing. The endpoint surfaces (auth, rows) are implemented as
// inherent methods in separate files to keep this module focused on
// transport mechanics.

use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::transport::TransportConfig;

/// Rows-endpoint errors arrive as `{"message": "...", "code": "..."}`.
#[derive(serde::Deserialize)]
struct StoreErrorBody {
    message: Option<String>,
    code: Option<String>,
}

/// Truncate a response body for diagnostics without splitting a
/// multibyte character.
pub(crate) fn body_preview(body: &str) -> &str {
    const MAX: usize = 200;
    let mut end = body.len().min(MAX);
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    &body[..end]
}

/// Raw HTTP client for the catalog's remote store.
///
/// Handles URL construction for the auth (`/auth/v1/`) and rows
/// (`/rest/v1/`) surfaces, bearer-token attachment, and the store's JSON
/// error envelope. All methods return decoded payloads -- the envelope is
/// stripped before the caller sees it.
pub struct StoreClient {
    http: reqwest::Client,
    base_url: Url,
}

impl StoreClient {
    /// Create a new client from a `TransportConfig`.
    ///
    /// The `base_url` is the store root (e.g. `https://abc.example.co`);
    /// the public API key is attached to every request as a default header.
    pub fn new(
        base_url: Url,
        api_key: &secrecy::SecretString,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let http = transport.build_client(api_key)?;
        Ok(Self { http, base_url })
    }

    /// Create a client with a pre-built `reqwest::Client`.
    ///
    /// Use this in tests or when the caller already manages default headers.
    pub fn with_client(http: reqwest::Client, base_url: Url) -> Self {
        Self { http, base_url }
    }

    /// The store base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// The underlying HTTP client (for auth flows that need direct access).
    pub(crate) fn http(&self) -> &reqwest::Client {
        &self.http
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// Build a full URL for an auth endpoint: `{base}/auth/v1/{path}`
    pub(crate) fn auth_url(&self, path: &str) -> Result<Url, Error> {
        let base = self.base_url.as_str().trim_end_matches('/');
        Url::parse(&format!("{base}/auth/v1/{path}")).map_err(Error::InvalidUrl)
    }

    /// Build a full URL for a rows endpoint: `{base}/rest/v1/{table}`
    pub(crate) fn rows_url(&self, table: &str) -> Result<Url, Error> {
        let base = self.base_url.as_str().trim_end_matches('/');
        Url::parse(&format!("{base}/rest/v1/{table}")).map_err(Error::InvalidUrl)
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Attach a bearer token when one is available.
    ///
    /// Anonymous reads go out with the API key header alone.
    pub(crate) fn apply_bearer(
        builder: RequestBuilder,
        access_token: Option<&str>,
    ) -> RequestBuilder {
        match access_token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    /// Send a request expecting a JSON payload back.
    pub(crate) async fn send_json<T: DeserializeOwned>(
        builder: RequestBuilder,
    ) -> Result<T, Error> {
        let resp = builder.send().await.map_err(Error::Transport)?;
        let body = Self::check_status(resp).await?;

        serde_json::from_str(&body).map_err(|e| {
            let preview = body_preview(&body);
            Error::Deserialization {
                message: format!("{e} (body preview: {preview:?})"),
                body,
            }
        })
    }

    /// Send a request where only success/failure matters.
    pub(crate) async fn send_ok(builder: RequestBuilder) -> Result<(), Error> {
        let resp = builder.send().await.map_err(Error::Transport)?;
        Self::check_status(resp).await?;
        Ok(())
    }

    /// Return the response body on 2xx, or parse the store's error
    /// envelope into a typed error.
    async fn check_status(resp: reqwest::Response) -> Result<String, Error> {
        let status = resp.status();

        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(Error::SessionExpired);
        }

        let body = resp.text().await.map_err(Error::Transport)?;

        if status.is_success() {
            return Ok(body);
        }

        debug!(status = status.as_u16(), "store request failed");

        // The rows endpoint reports failures as {"message": ..., "code": ...}.
        let parsed: Option<StoreErrorBody> = serde_json::from_str(&body).ok();
        let (message, code) = match parsed {
            Some(e) => (
                e.message
                    .unwrap_or_else(|| format!("HTTP {}", status.as_u16())),
                e.code,
            ),
            None => (
                format!("HTTP {}: {}", status.as_u16(), body_preview(&body)),
                None,
            ),
        };

        Err(Error::Store {
            message,
            code,
            status: status.as_u16(),
        })
    }
}
