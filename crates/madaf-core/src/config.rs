// ── Runtime connection configuration ──
//
// Describes *how* to reach the remote store. Carries the endpoint and the
// public API key, but never touches disk -- `madaf-config` loads files and
// environment and hands a `StoreConfig` in.

use std::time::Duration;

use secrecy::SecretString;
use url::Url;

/// Configuration for connecting to the catalog's remote store.
///
/// Built by the host (usually via `madaf-config`), passed to
/// [`CatalogController::from_config`](crate::CatalogController::from_config).
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Store root URL (e.g. `https://abc.example.co`).
    pub url: Url,
    /// Public (anon) API key attached to every request.
    pub api_key: SecretString,
    /// Request timeout.
    pub timeout: Duration,
}

impl StoreConfig {
    pub fn new(url: Url, api_key: SecretString) -> Self {
        Self {
            url,
            api_key,
            timeout: Duration::from_secs(30),
        }
    }
}
