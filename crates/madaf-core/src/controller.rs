// ── Catalog controller ──
//
// Orchestrates the session store and the catalog repository. Owns the
// in-memory list, the loading/error flags, and every mutation workflow.
// The list is a cache: after any successful mutation the full catalog is
// re-fetched and replaced wholesale, never patched incrementally. That
// trades latency for a single source of truth; the catalog is small and
// admin mutations are rare.

use std::sync::Arc;

use tokio::sync::{Mutex, watch};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use secrecy::SecretString;

use madaf_api::{StoreClient, TransportConfig};

use crate::config::StoreConfig;
use crate::error::CoreError;
use crate::model::{CatalogRecord, NewProject, ProjectPatchInput, RecordId, Session};
use crate::repository::{ApiCatalogRepository, CatalogRepository};
use crate::session::{ApiSessionStore, SessionStore};

/// The main entry point for consumers.
///
/// Cheaply cloneable via `Arc<ControllerInner>`. State is exposed through
/// `watch` channels: snapshot accessors for pull-style hosts, `subscribe_*`
/// receivers for reactive ones.
#[derive(Clone)]
pub struct CatalogController {
    inner: Arc<ControllerInner>,
}

struct ControllerInner {
    sessions: Arc<dyn SessionStore>,
    repository: Arc<dyn CatalogRepository>,
    records: watch::Sender<Arc<Vec<CatalogRecord>>>,
    session: watch::Sender<Option<Session>>,
    is_loading: watch::Sender<bool>,
    last_error: watch::Sender<Option<String>>,
    cancel: CancellationToken,
    watcher: Mutex<Option<JoinHandle<()>>>,
}

impl CatalogController {
    /// Create a controller over explicit seams. Does NOT load anything --
    /// call [`initialize()`](Self::initialize) to subscribe and fetch.
    pub fn new(sessions: Arc<dyn SessionStore>, repository: Arc<dyn CatalogRepository>) -> Self {
        let (records, _) = watch::channel(Arc::new(Vec::new()));
        let (session, _) = watch::channel(None);
        let (is_loading, _) = watch::channel(false);
        let (last_error, _) = watch::channel(None);

        Self {
            inner: Arc::new(ControllerInner {
                sessions,
                repository,
                records,
                session,
                is_loading,
                last_error,
                cancel: CancellationToken::new(),
                watcher: Mutex::new(None),
            }),
        }
    }

    /// Build the production wiring from a [`StoreConfig`]: one shared
    /// HTTP client behind an [`ApiSessionStore`] and an
    /// [`ApiCatalogRepository`].
    pub fn from_config(config: &StoreConfig) -> Result<Self, CoreError> {
        let transport = TransportConfig {
            timeout: config.timeout,
        };
        let client = Arc::new(StoreClient::new(
            config.url.clone(),
            &config.api_key,
            &transport,
        )?);

        let sessions: Arc<dyn SessionStore> = Arc::new(ApiSessionStore::new(Arc::clone(&client)));
        let repository: Arc<dyn CatalogRepository> =
            Arc::new(ApiCatalogRepository::new(client, Arc::clone(&sessions)));

        Ok(Self::new(sessions, repository))
    }

    // ── Lifecycle ────────────────────────────────────────────────────

    /// Subscribe to the session store, seed the session mirror, and run
    /// the initial catalog load.
    ///
    /// The subscription lives in a single background task that
    /// [`dispose()`](Self::dispose) cancels; after disposal, late auth
    /// notifications become no-ops. A failed initial load is returned and
    /// recorded in `last_error` -- the subscription is still established,
    /// so a later `refresh()` recovers.
    pub async fn initialize(&self) -> Result<(), CoreError> {
        // Subscribe before seeding so no transition can fall in the gap.
        let mut rx = self.inner.sessions.subscribe();
        // send_replace stores the value even with zero subscribers.
        self.inner.session.send_replace(self.inner.sessions.current());

        let session_tx = self.inner.session.clone();
        let cancel = self.inner.cancel.clone();
        let handle = tokio::spawn(async move {
            loop {
                tokio::select! {
                    biased;
                    () = cancel.cancelled() => break,
                    changed = rx.changed() => {
                        if changed.is_err() {
                            break;
                        }
                        let session = rx.borrow_and_update().clone();
                        debug!(present = session.is_some(), "auth state changed");
                        session_tx.send_replace(session);
                    }
                }
            }
        });
        *self.inner.watcher.lock().await = Some(handle);

        info!("controller initialized");
        self.refresh().await
    }

    /// Tear the controller down: cancel the session watcher and join it.
    ///
    /// Idempotent. Must be called exactly once per initialized controller
    /// to release the session-store subscription.
    pub async fn dispose(&self) {
        self.inner.cancel.cancel();
        if let Some(handle) = self.inner.watcher.lock().await.take() {
            let _ = handle.await;
        }
        debug!("controller disposed");
    }

    // ── Catalog synchronization ──────────────────────────────────────

    /// Re-fetch the full catalog and replace the cached list atomically.
    ///
    /// On failure the previous records are left untouched
    /// (stale-but-available) and `last_error` is set. The loading flag is
    /// cleared on every exit path.
    pub async fn refresh(&self) -> Result<(), CoreError> {
        self.inner.is_loading.send_replace(true);

        let outcome = match self.inner.repository.list_all().await {
            Ok(records) => {
                debug!(count = records.len(), "catalog refreshed");
                self.inner.records.send_modify(|r| *r = Arc::new(records));
                self.inner.last_error.send_replace(None);
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "catalog refresh failed; keeping previous records");
                self.inner.last_error.send_replace(Some(e.to_string()));
                Err(e)
            }
        };

        self.inner.is_loading.send_replace(false);
        outcome
    }

    // ── Mutation workflows ───────────────────────────────────────────

    /// Create a catalog entry, then re-fetch the list.
    ///
    /// The Hebrew name is required; an empty one is rejected locally with
    /// no repository call. A failed post-create refresh does not fail the
    /// operation -- the record exists, and the error lands in `last_error`.
    pub async fn add_project(&self, input: &NewProject) -> Result<RecordId, CoreError> {
        if input.name.he.trim().is_empty() {
            return Err(CoreError::validation("name_he", "is required"));
        }

        let id = self.inner.repository.create(input).await?;
        info!(%id, "project added");

        if let Err(e) = self.refresh().await {
            warn!(error = %e, "refresh after create failed");
        }
        Ok(id)
    }

    /// Update a catalog entry, then re-fetch the list.
    ///
    /// Requires an active session; refused before dispatch otherwise.
    pub async fn edit_project(
        &self,
        id: RecordId,
        input: &ProjectPatchInput,
    ) -> Result<(), CoreError> {
        self.require_session()?;

        self.inner.repository.update(id, input).await?;
        info!(%id, "project updated");

        if let Err(e) = self.refresh().await {
            warn!(error = %e, "refresh after update failed");
        }
        Ok(())
    }

    /// Delete a catalog entry, then re-fetch the list.
    ///
    /// Requires an active session. Confirmation is the caller's concern --
    /// this method never prompts. Deleting an absent id succeeds.
    pub async fn delete_project(&self, id: RecordId) -> Result<(), CoreError> {
        self.require_session()?;

        self.inner.repository.delete(id).await?;
        info!(%id, "project deleted");

        if let Err(e) = self.refresh().await {
            warn!(error = %e, "refresh after delete failed");
        }
        Ok(())
    }

    // ── Session pass-through ─────────────────────────────────────────

    /// Sign the operator in. Failure surfaces the auth error and leaves
    /// the records untouched.
    pub async fn sign_in(&self, email: &str, password: &SecretString) -> Result<(), CoreError> {
        self.inner.sessions.sign_in(email, password).await?;
        // Mirror immediately rather than waiting on the watcher task, so
        // the capability guard is correct as soon as this call returns.
        self.inner.session.send_replace(self.inner.sessions.current());
        Ok(())
    }

    /// Sign the operator out.
    pub async fn sign_out(&self) -> Result<(), CoreError> {
        self.inner.sessions.sign_out().await?;
        self.inner.session.send_replace(None);
        Ok(())
    }

    /// Capability guard: mutations require a present session. The check
    /// runs before dispatch, not only at the backend.
    fn require_session(&self) -> Result<(), CoreError> {
        if self.inner.session.borrow().is_some() {
            Ok(())
        } else {
            Err(CoreError::NotAuthenticated)
        }
    }

    // ── State observation ────────────────────────────────────────────

    /// The current catalog snapshot (cheap `Arc` clone), newest first.
    pub fn records_snapshot(&self) -> Arc<Vec<CatalogRecord>> {
        self.inner.records.borrow().clone()
    }

    /// Subscribe to catalog snapshot changes.
    pub fn subscribe_records(&self) -> watch::Receiver<Arc<Vec<CatalogRecord>>> {
        self.inner.records.subscribe()
    }

    /// The mirrored session, if any.
    pub fn session(&self) -> Option<Session> {
        self.inner.session.borrow().clone()
    }

    /// Subscribe to session presence changes.
    pub fn subscribe_session(&self) -> watch::Receiver<Option<Session>> {
        self.inner.session.subscribe()
    }

    pub fn is_loading(&self) -> bool {
        *self.inner.is_loading.borrow()
    }

    pub fn subscribe_loading(&self) -> watch::Receiver<bool> {
        self.inner.is_loading.subscribe()
    }

    /// The most recent operation error, if the latest operation failed.
    /// An empty catalog with `None` here is the valid "no projects yet"
    /// state, distinct from an empty catalog behind a failed load.
    pub fn last_error(&self) -> Option<String> {
        self.inner.last_error.borrow().clone()
    }

    pub fn subscribe_errors(&self) -> watch::Receiver<Option<String>> {
        self.inner.last_error.subscribe()
    }
}
