// ── Catalog repository ──
//
// Pure data access against the remote row store: no business rules, no
// state. Owns the wire row <-> domain record mapping and the canonical
// recency ordering.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use madaf_api::{NewProjectRow, ProjectPatch, ProjectRow, StoreClient};

use crate::error::CoreError;
use crate::locale::DEFAULT_ACCENT_COLOR;
use crate::model::{CatalogRecord, Localized, NewProject, ProjectPatchInput, RecordId};
use crate::session::SessionStore;

/// The data-access seam consumed by the controller.
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    /// The full catalog, newest first. Full set or error, never partial.
    async fn list_all(&self) -> Result<Vec<CatalogRecord>, CoreError>;

    /// Create a record; the store assigns the id.
    async fn create(&self, input: &NewProject) -> Result<RecordId, CoreError>;

    /// Apply a partial update to an existing record.
    async fn update(&self, id: RecordId, patch: &ProjectPatchInput) -> Result<(), CoreError>;

    /// Delete a record. Deleting an absent id is a success no-op.
    async fn delete(&self, id: RecordId) -> Result<(), CoreError>;
}

/// `CatalogRepository` backed by the remote rows endpoint.
///
/// Reads go out anonymously (public catalog); mutations carry the bearer
/// token of whatever session the session store currently holds. The store
/// itself enforces row-level permissions -- the capability guard in the
/// controller exists so no unauthenticated mutation is even dispatched.
pub struct ApiCatalogRepository {
    client: Arc<StoreClient>,
    sessions: Arc<dyn SessionStore>,
}

impl ApiCatalogRepository {
    pub fn new(client: Arc<StoreClient>, sessions: Arc<dyn SessionStore>) -> Self {
        Self { client, sessions }
    }

    fn access_token(&self) -> Option<String> {
        self.sessions.current().map(|s| s.access_token)
    }
}

#[async_trait]
impl CatalogRepository for ApiCatalogRepository {
    async fn list_all(&self) -> Result<Vec<CatalogRecord>, CoreError> {
        let token = self.access_token();
        let rows = self.client.list_rows(token.as_deref()).await?;

        let mut records: Vec<CatalogRecord> = rows.into_iter().map(record_from_row).collect();

        // The query already orders by created_at descending; re-sort so an
        // upstream ordering mismatch can never leak through. Timestamp is
        // the sort key, id only breaks ties.
        records.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.0.cmp(&a.id.0))
        });

        debug!(count = records.len(), "catalog listed");
        Ok(records)
    }

    async fn create(&self, input: &NewProject) -> Result<RecordId, CoreError> {
        let token = self.access_token();
        let row = new_row_from_input(input);
        let stored = self.client.insert_row(token.as_deref(), &row).await?;

        debug!(id = stored.id, "record created");
        Ok(RecordId(stored.id))
    }

    async fn update(&self, id: RecordId, patch: &ProjectPatchInput) -> Result<(), CoreError> {
        let token = self.access_token();
        let wire = patch_from_input(patch);
        self.client.update_row(token.as_deref(), id.0, &wire).await?;

        debug!(%id, "record updated");
        Ok(())
    }

    async fn delete(&self, id: RecordId) -> Result<(), CoreError> {
        let token = self.access_token();
        self.client.delete_row(token.as_deref(), id.0).await?;

        debug!(%id, "record deleted");
        Ok(())
    }
}

// ── Wire mapping ─────────────────────────────────────────────────────

fn record_from_row(row: ProjectRow) -> CatalogRecord {
    CatalogRecord {
        id: RecordId(row.id),
        name: Localized {
            he: row.name_he,
            en: row.name_en.unwrap_or_default(),
        },
        description: Localized {
            he: row.description_he.unwrap_or_default(),
            en: row.description_en.unwrap_or_default(),
        },
        launch_url: row.url,
        image_url: row.image_url.filter(|u| !u.is_empty()),
        accent_color: row
            .accent_color
            .filter(|c| !c.is_empty())
            .unwrap_or_else(|| DEFAULT_ACCENT_COLOR.to_owned()),
        created_at: row.created_at,
    }
}

fn new_row_from_input(input: &NewProject) -> NewProjectRow {
    NewProjectRow {
        name_he: input.name.he.clone(),
        name_en: non_empty(&input.name.en),
        description_he: non_empty(&input.description.he),
        description_en: non_empty(&input.description.en),
        url: input.launch_url.clone(),
        image_url: input.image_url.clone().filter(|u| !u.is_empty()),
        accent_color: input.accent_color.clone().filter(|c| !c.is_empty()),
    }
}

fn patch_from_input(patch: &ProjectPatchInput) -> ProjectPatch {
    ProjectPatch {
        name_he: patch.name_he.clone(),
        name_en: patch.name_en.clone(),
        description_he: patch.description_he.clone(),
        description_en: patch.description_en.clone(),
        url: patch.launch_url.clone(),
        image_url: patch.image_url.clone(),
        accent_color: patch.accent_color.clone(),
    }
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn row(id: i64, accent: Option<&str>) -> ProjectRow {
        ProjectRow {
            id,
            name_he: "ניהול".into(),
            name_en: None,
            description_he: None,
            description_en: None,
            url: "https://x".into(),
            image_url: Some(String::new()),
            accent_color: accent.map(String::from),
            created_at: Utc.with_ymd_and_hms(2024, 6, 1, 8, 0, 0).single().expect("valid"),
        }
    }

    #[test]
    fn missing_accent_color_defaults_to_brand_blue() {
        let rec = record_from_row(row(1, None));
        assert_eq!(rec.accent_color, DEFAULT_ACCENT_COLOR);

        let rec = record_from_row(row(1, Some("")));
        assert_eq!(rec.accent_color, DEFAULT_ACCENT_COLOR);

        let rec = record_from_row(row(1, Some("#ff0000")));
        assert_eq!(rec.accent_color, "#ff0000");
    }

    #[test]
    fn empty_image_url_maps_to_none() {
        let rec = record_from_row(row(1, None));
        assert!(rec.image_url.is_none());
    }

    #[test]
    fn absent_translations_map_to_empty_strings() {
        let rec = record_from_row(row(1, None));
        assert_eq!(rec.name.en, "");
        assert_eq!(rec.description.he, "");
    }
}
