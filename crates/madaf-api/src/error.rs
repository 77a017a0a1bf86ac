use thiserror::Error;

/// Top-level error type for the `madaf-api` crate.
///
/// Covers every failure mode across both API surfaces: the auth endpoint
/// and the rows endpoint. `madaf-core` maps these into user-facing
/// diagnostics.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// Sign-in failed (wrong credentials, account disabled, etc.)
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    /// Access token expired or revoked (HTTP 401 on a rows request).
    #[error("Session expired -- re-authentication required")]
    SessionExpired,

    /// The public API key was rejected by the store.
    #[error("Invalid API key")]
    InvalidApiKey,

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ── Rows endpoint ───────────────────────────────────────────────
    /// Structured error from the rows endpoint
    /// (parsed from the `{"message": ..., "code": ...}` body).
    #[error("Store error (HTTP {status}): {message}")]
    Store {
        message: String,
        code: Option<String>,
        status: u16,
    },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}
