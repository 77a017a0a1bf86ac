// Rows endpoint
//
// CRUD on the `projects` table. Row types here mirror the wire schema
// exactly; `madaf-core` owns the mapping to domain types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::client::StoreClient;
use crate::error::Error;

const TABLE: &str = "projects";

/// One stored catalog row, as the rows endpoint returns it.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProjectRow {
    pub id: i64,
    pub name_he: String,
    #[serde(default)]
    pub name_en: Option<String>,
    #[serde(default)]
    pub description_he: Option<String>,
    #[serde(default)]
    pub description_en: Option<String>,
    pub url: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub accent_color: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Payload for creating a row. The store assigns `id` and `created_at`.
#[derive(Debug, Clone, Serialize)]
pub struct NewProjectRow {
    pub name_he: String,
    pub name_en: Option<String>,
    pub description_he: Option<String>,
    pub description_en: Option<String>,
    pub url: String,
    pub image_url: Option<String>,
    pub accent_color: Option<String>,
}

/// Partial update payload. Absent fields are left untouched by the store.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProjectPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_he: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_en: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description_he: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description_en: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub accent_color: Option<String>,
}

impl StoreClient {
    /// Fetch the full catalog, newest first.
    ///
    /// `GET /rest/v1/projects?select=*&order=created_at.desc`. Either the
    /// complete set comes back or an error does -- never a partial page.
    pub async fn list_rows(&self, access_token: Option<&str>) -> Result<Vec<ProjectRow>, Error> {
        let mut url = self.rows_url(TABLE)?;
        url.query_pairs_mut()
            .append_pair("select", "*")
            .append_pair("order", "created_at.desc");

        debug!("GET {url}");

        let builder = Self::apply_bearer(self.http().get(url), access_token);
        Self::send_json(builder).await
    }

    /// Insert a row and return the stored representation (with the
    /// assigned `id` and `created_at`).
    pub async fn insert_row(
        &self,
        access_token: Option<&str>,
        row: &NewProjectRow,
    ) -> Result<ProjectRow, Error> {
        let url = self.rows_url(TABLE)?;

        debug!("POST {url}");

        let builder = Self::apply_bearer(
            self.http()
                .post(url)
                .header("Prefer", "return=representation")
                .json(row),
            access_token,
        );

        // With return=representation the endpoint answers with an array
        // containing the inserted row.
        let mut rows: Vec<ProjectRow> = Self::send_json(builder).await?;
        rows.pop().ok_or_else(|| Error::Store {
            message: "insert returned no representation".into(),
            code: None,
            status: 200,
        })
    }

    /// Apply a partial update to the row with the given id.
    pub async fn update_row(
        &self,
        access_token: Option<&str>,
        id: i64,
        patch: &ProjectPatch,
    ) -> Result<(), Error> {
        let mut url = self.rows_url(TABLE)?;
        url.query_pairs_mut().append_pair("id", &format!("eq.{id}"));

        debug!("PATCH {url}");

        let builder = Self::apply_bearer(self.http().patch(url).json(patch), access_token);
        Self::send_ok(builder).await
    }

    /// Delete the row with the given id.
    ///
    /// The endpoint answers 2xx whether or not a row matched, so deleting
    /// an absent id is a success no-op.
    pub async fn delete_row(&self, access_token: Option<&str>, id: i64) -> Result<(), Error> {
        let mut url = self.rows_url(TABLE)?;
        url.query_pairs_mut().append_pair("id", &format!("eq.{id}"));

        debug!("DELETE {url}");

        let builder = Self::apply_bearer(self.http().delete(url), access_token);
        Self::send_ok(builder).await
    }
}
