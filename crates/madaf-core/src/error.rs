// ── Core error types ──
//
// User-facing errors from madaf-core. These are NOT API-specific --
// consumers never see HTTP status codes or JSON parse failures directly.
// The `From<madaf_api::Error>` impl translates transport-layer errors
// into domain-appropriate variants.

use thiserror::Error;

/// Unified error type for the core crate.
#[derive(Debug, Error)]
pub enum CoreError {
    // ── Configuration errors (fatal, pre-network) ────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    // ── Authentication errors (recoverable, operator retries) ────────
    #[error("Authentication failed: {message}")]
    Authentication { message: String },

    /// A mutation was attempted with no active session. Raised by the
    /// controller's capability guard before any repository dispatch.
    #[error("Not authenticated: an active admin session is required")]
    NotAuthenticated,

    // ── Validation errors (local, never reach the repository) ────────
    #[error("Validation failed: {field} {reason}")]
    Validation { field: String, reason: String },

    // ── Repository errors (recoverable, previous state preserved) ────
    #[error("Catalog store error: {message}")]
    Repository { message: String },

    // ── Internal errors ──────────────────────────────────────────────
    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    pub(crate) fn validation(field: &str, reason: &str) -> Self {
        Self::Validation {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<madaf_api::Error> for CoreError {
    fn from(err: madaf_api::Error) -> Self {
        match err {
            madaf_api::Error::Authentication { message } => CoreError::Authentication { message },
            madaf_api::Error::SessionExpired => CoreError::Authentication {
                message: "session expired -- sign in again".into(),
            },
            madaf_api::Error::InvalidApiKey => CoreError::Config {
                message: "the store rejected the public API key".into(),
            },
            madaf_api::Error::InvalidUrl(e) => CoreError::Config {
                message: format!("invalid store URL: {e}"),
            },
            madaf_api::Error::Transport(e) => CoreError::Repository {
                message: e.to_string(),
            },
            madaf_api::Error::Store {
                message,
                code,
                status: _,
            } => CoreError::Repository {
                message: match code {
                    Some(code) => format!("{message} (code {code})"),
                    None => message,
                },
            },
            madaf_api::Error::Deserialization { message, body: _ } => {
                CoreError::Internal(format!("deserialization error: {message}"))
            }
        }
    }
}
