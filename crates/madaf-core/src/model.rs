// ── Domain model ──
//
// Canonical catalog types. The wire row shape lives in `madaf-api`;
// `repository` owns the mapping between the two.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::locale::Language;

/// Store-assigned record identifier. Unique, immutable after creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(pub i64);

impl std::fmt::Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl From<i64> for RecordId {
    fn from(raw: i64) -> Self {
        Self(raw)
    }
}

/// A bilingual text field: one value per supported language.
///
/// Either side may be empty; display-time fallback is the
/// [`project`](crate::locale::project) function's concern.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Localized {
    pub he: String,
    pub en: String,
}

impl Localized {
    pub fn new(he: impl Into<String>, en: impl Into<String>) -> Self {
        Self {
            he: he.into(),
            en: en.into(),
        }
    }

    /// The raw value for a language, no fallback applied.
    pub fn get(&self, language: Language) -> &str {
        match language {
            Language::He => &self.he,
            Language::En => &self.en,
        }
    }
}

/// One project entry on the public catalog page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogRecord {
    pub id: RecordId,
    pub name: Localized,
    pub description: Localized,
    /// Target the visitor opens to use the project. Not validated as a
    /// well-formed URL here; that is the presentation boundary's call.
    pub launch_url: String,
    /// `None` renders a placeholder; no fetch is attempted.
    pub image_url: Option<String>,
    pub accent_color: String,
    /// Recency-ordering key only, never business logic.
    pub created_at: DateTime<Utc>,
}

/// Form input for creating a record. The store assigns id and timestamp.
#[derive(Debug, Clone, Default)]
pub struct NewProject {
    pub name: Localized,
    pub description: Localized,
    pub launch_url: String,
    pub image_url: Option<String>,
    pub accent_color: Option<String>,
}

/// Partial edit input; `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct ProjectPatchInput {
    pub name_he: Option<String>,
    pub name_en: Option<String>,
    pub description_he: Option<String>,
    pub description_en: Option<String>,
    pub launch_url: Option<String>,
    pub image_url: Option<String>,
    pub accent_color: Option<String>,
}

/// Proof that the current actor is an authenticated admin.
///
/// Presence alone grants mutation capability; beyond the bearer token
/// the session is opaque identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub access_token: String,
    pub operator_email: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn localized_get_returns_raw_values() {
        let name = Localized::new("ניהול", "Mgmt");
        assert_eq!(name.get(Language::He), "ניהול");
        assert_eq!(name.get(Language::En), "Mgmt");
    }

    #[test]
    fn record_id_displays_as_raw_integer() {
        assert_eq!(RecordId(42).to_string(), "42");
    }
}
