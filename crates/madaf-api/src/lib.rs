// madaf-api: Async Rust client for the catalog's remote store (auth + rows)

pub mod auth;
pub mod client;
pub mod error;
pub mod rows;
pub mod transport;

pub use auth::AuthSession;
pub use client::StoreClient;
pub use error::Error;
pub use rows::{NewProjectRow, ProjectPatch, ProjectRow};
pub use transport::TransportConfig;
