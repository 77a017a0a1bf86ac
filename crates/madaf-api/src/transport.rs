// Shared transport configuration for building reqwest::Client instances.
//
// The auth and rows surfaces share timeout and default-header settings
// through this module, avoiding duplicated builder logic.

use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue};
use secrecy::{ExposeSecret, SecretString};

/// Shared transport configuration for building HTTP clients.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub timeout: Duration,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
        }
    }
}

impl TransportConfig {
    /// Build a `reqwest::Client` carrying the store's public API key as a
    /// default `apikey` header on every request.
    pub fn build_client(&self, api_key: &SecretString) -> Result<reqwest::Client, crate::Error> {
        let mut headers = HeaderMap::new();
        let key_value = HeaderValue::from_str(api_key.expose_secret())
            .map_err(|_| crate::Error::InvalidApiKey)?;
        headers.insert("apikey", key_value);

        reqwest::Client::builder()
            .timeout(self.timeout)
            .user_agent("madaf/0.1.0")
            .default_headers(headers)
            .build()
            .map_err(crate::Error::Transport)
    }
}
