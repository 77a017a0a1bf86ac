//! Catalog synchronization and session-gated mutation for the Madaf
//! project catalog.
//!
//! This crate owns the business logic between `madaf-api` and whatever
//! presentation layer hosts it:
//!
//! - **[`CatalogController`]** — Central facade managing the full
//!   lifecycle: [`initialize()`](CatalogController::initialize) subscribes
//!   to the session store and loads the catalog;
//!   [`refresh()`](CatalogController::refresh) re-fetches and replaces the
//!   list wholesale; add/edit/delete run the mutation workflows and
//!   refresh afterwards.
//!
//! - **[`SessionStore`] / [`CatalogRepository`]** — The two seams the
//!   controller consumes, as traits so hosts and tests can substitute
//!   their own. [`ApiSessionStore`] and [`ApiCatalogRepository`] are the
//!   production implementations over [`madaf_api::StoreClient`].
//!
//! - **[`project`]** — Pure bilingual projection: a record plus an active
//!   [`Language`] yields the display strings, falling back to Hebrew.
//!
//! - **Domain model** ([`model`]) — [`CatalogRecord`], [`Localized`],
//!   [`Session`], and the create/edit input types.

pub mod config;
pub mod controller;
pub mod error;
pub mod locale;
pub mod model;
pub mod repository;
pub mod session;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::StoreConfig;
pub use controller::CatalogController;
pub use error::CoreError;
pub use locale::{DEFAULT_ACCENT_COLOR, Language, Projection, project};
pub use model::{CatalogRecord, Localized, NewProject, ProjectPatchInput, RecordId, Session};
pub use repository::{ApiCatalogRepository, CatalogRepository};
pub use session::{ApiSessionStore, SessionStore};
