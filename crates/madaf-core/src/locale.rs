// ── Language projection ──
//
// Pure mapping from a bilingual record and an active language tag to the
// strings the page displays. No side effects; safe on every render.

use serde::{Deserialize, Serialize};

use crate::model::CatalogRecord;

/// Brand accent used when a row carries no color of its own.
pub const DEFAULT_ACCENT_COLOR: &str = "#2563eb";

/// Supported display languages. Hebrew is the primary language: forms
/// require it and projection falls back to it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    He,
    En,
}

impl Language {
    /// Parse a language tag (`"he"` / `"en"`).
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "he" => Some(Self::He),
            "en" => Some(Self::En),
            _ => None,
        }
    }

    pub fn as_tag(self) -> &'static str {
        match self {
            Self::He => "he",
            Self::En => "en",
        }
    }
}

/// The display strings derived for one record in one language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Projection {
    pub display_name: String,
    pub display_description: String,
}

/// Project a record into the active display language.
///
/// The requested language's field wins; an empty or absent field falls
/// back to the other language, Hebrew first. The display name is never
/// empty when either language has content.
pub fn project(record: &CatalogRecord, language: Language) -> Projection {
    Projection {
        display_name: pick(record.name.get(language), &record.name.he, &record.name.en),
        display_description: pick(
            record.description.get(language),
            &record.description.he,
            &record.description.en,
        ),
    }
}

fn pick(requested: &str, he: &str, en: &str) -> String {
    for candidate in [requested, he, en] {
        if !candidate.trim().is_empty() {
            return candidate.to_owned();
        }
    }
    String::new()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Localized, RecordId};
    use chrono::Utc;

    fn record(name: Localized, description: Localized) -> CatalogRecord {
        CatalogRecord {
            id: RecordId(1),
            name,
            description,
            launch_url: "https://x".into(),
            image_url: None,
            accent_color: DEFAULT_ACCENT_COLOR.into(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn projects_requested_language_when_present() {
        let rec = record(
            Localized::new("ניהול", "Mgmt"),
            Localized::new("תיאור", "Description"),
        );

        let en = project(&rec, Language::En);
        assert_eq!(en.display_name, "Mgmt");
        assert_eq!(en.display_description, "Description");

        let he = project(&rec, Language::He);
        assert_eq!(he.display_name, "ניהול");
    }

    #[test]
    fn falls_back_to_hebrew_when_english_is_empty() {
        let rec = record(Localized::new("ניהול", ""), Localized::new("תיאור", "  "));

        let en = project(&rec, Language::En);
        assert_eq!(en.display_name, "ניהול");
        assert_eq!(en.display_description, "תיאור");
    }

    #[test]
    fn name_falls_back_to_english_when_hebrew_is_empty() {
        let rec = record(Localized::new("", "Only English"), Localized::default());

        let he = project(&rec, Language::He);
        assert_eq!(he.display_name, "Only English");
        assert_eq!(he.display_description, "");
    }

    #[test]
    fn language_tags_round_trip() {
        assert_eq!(Language::from_tag("he"), Some(Language::He));
        assert_eq!(Language::from_tag("en"), Some(Language::En));
        assert_eq!(Language::from_tag("fr"), None);
        assert_eq!(Language::En.as_tag(), "en");
    }
}
