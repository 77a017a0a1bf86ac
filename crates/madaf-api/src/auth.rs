// Auth endpoint
//
// Email/password sign-in and token revocation against the store's auth
// surface. Sign-in returns an access token that the rows endpoint accepts
// as a bearer credential; everything else about the session is opaque.

use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde_json::json;
use tracing::debug;

use crate::client::StoreClient;
use crate::error::Error;

/// A successful sign-in response.
///
/// Only the fields the catalog needs are decoded; the store sends more
/// (refresh token, expiry) which callers can ignore.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthSession {
    pub access_token: String,
    #[serde(default)]
    pub user: Option<AuthUser>,
}

/// Operator identity attached to a session.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthUser {
    pub id: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// Sign-in failures arrive as `{"error_description": ...}` or `{"msg": ...}`
/// depending on the failure class.
#[derive(Deserialize)]
struct AuthErrorBody {
    error_description: Option<String>,
    msg: Option<String>,
}

impl StoreClient {
    /// Authenticate an operator with email/password.
    ///
    /// `POST /auth/v1/token?grant_type=password`. Invalid credentials come
    /// back as HTTP 400 with an error body; both that and transport
    /// failures surface as [`Error::Authentication`].
    pub async fn sign_in(
        &self,
        email: &str,
        password: &SecretString,
    ) -> Result<AuthSession, Error> {
        let mut url = self.auth_url("token")?;
        url.query_pairs_mut().append_pair("grant_type", "password");

        debug!(%email, "signing in");

        let body = json!({
            "email": email,
            "password": password.expose_secret(),
        });

        let resp = self
            .http()
            .post(url)
            .json(&body)
            .send()
            .await
            .map_err(Error::Transport)?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            let message = serde_json::from_str::<AuthErrorBody>(&body)
                .ok()
                .and_then(|e| e.error_description.or(e.msg))
                .unwrap_or_else(|| format!("sign-in failed (HTTP {status})"));
            return Err(Error::Authentication { message });
        }

        let body = resp.text().await.map_err(Error::Transport)?;
        let session: AuthSession = serde_json::from_str(&body).map_err(|e| {
            let preview = crate::client::body_preview(&body);
            Error::Deserialization {
                message: format!("{e} (body preview: {preview:?})"),
                body,
            }
        })?;

        debug!("sign-in successful");
        Ok(session)
    }

    /// Revoke the current access token.
    ///
    /// `POST /auth/v1/logout`. The local session is gone either way;
    /// callers may treat a failure here as non-fatal.
    pub async fn sign_out(&self, access_token: &str) -> Result<(), Error> {
        let url = self.auth_url("logout")?;

        debug!("signing out");

        Self::send_ok(self.http().post(url).bearer_auth(access_token)).await?;

        debug!("sign-out complete");
        Ok(())
    }
}
