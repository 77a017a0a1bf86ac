// ── Session store ──
//
// Holds the authenticated-operator session and notifies observers of every
// auth transition through a `watch` channel. Dropping the receiver is the
// unsubscribe -- the controller's watcher task owns exactly one receiver
// and releases it on disposal.

use std::sync::Arc;

use async_trait::async_trait;
use secrecy::SecretString;
use tokio::sync::watch;
use tracing::{debug, warn};

use madaf_api::StoreClient;

use crate::error::CoreError;
use crate::model::Session;

/// The authentication seam consumed by the controller.
///
/// A trait so tests can substitute a fake that emits arbitrary auth
/// transitions (including external expiry).
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// The cached session, if any. Never blocks on the network.
    fn current(&self) -> Option<Session>;

    /// Observe every auth transition for the lifetime of the receiver.
    fn subscribe(&self) -> watch::Receiver<Option<Session>>;

    /// Authenticate with email/password. Success triggers the change
    /// notification.
    async fn sign_in(&self, email: &str, password: &SecretString) -> Result<(), CoreError>;

    /// Clear the session and notify. Remote revocation is best-effort.
    async fn sign_out(&self) -> Result<(), CoreError>;
}

/// `SessionStore` backed by the remote store's auth endpoint.
pub struct ApiSessionStore {
    client: Arc<StoreClient>,
    state: watch::Sender<Option<Session>>,
}

impl ApiSessionStore {
    pub fn new(client: Arc<StoreClient>) -> Self {
        let (state, _) = watch::channel(None);
        Self { client, state }
    }
}

#[async_trait]
impl SessionStore for ApiSessionStore {
    fn current(&self) -> Option<Session> {
        self.state.borrow().clone()
    }

    fn subscribe(&self) -> watch::Receiver<Option<Session>> {
        self.state.subscribe()
    }

    async fn sign_in(&self, email: &str, password: &SecretString) -> Result<(), CoreError> {
        let auth = self.client.sign_in(email, password).await?;

        let session = Session {
            access_token: auth.access_token,
            operator_email: auth.user.and_then(|u| u.email),
        };

        debug!("operator session established");
        // send_modify notifies even with zero receivers attached yet.
        self.state.send_modify(|s| *s = Some(session));
        Ok(())
    }

    async fn sign_out(&self) -> Result<(), CoreError> {
        let token = self.state.borrow().as_ref().map(|s| s.access_token.clone());

        // Drop the local session first: the operator is signed out from the
        // catalog's point of view even if revocation fails.
        self.state.send_modify(|s| *s = None);

        if let Some(token) = token {
            if let Err(e) = self.client.sign_out(&token).await {
                warn!(error = %e, "remote sign-out failed (non-fatal)");
            }
        }

        debug!("operator session cleared");
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use madaf_api::TransportConfig;

    #[test]
    fn api_store_starts_anonymous() {
        let url = url::Url::parse("https://store.invalid").unwrap();
        let key = SecretString::from("anon-key".to_string());
        let client = Arc::new(StoreClient::new(url, &key, &TransportConfig::default()).unwrap());
        let store = ApiSessionStore::new(client);
        assert!(store.current().is_none());
    }
}
