//! Data models for the article table at each stage of the pipeline.
//!
//! - [`RawRecord`]: a row as read from the input file, nothing guaranteed
//! - [`CleanedRecord`]: a row that survived normalization
//! - [`AnnotatedRecord`]: a cleaned row plus its [`EntitySets`]
//! - [`EntitySpan`] / [`EntityLabel`]: what a recognizer returns
//!
//! Column names follow the dataset (`fecha_yyyy_mm_dd`, `personas`, `lugares`,
//! `organizaciones`) since downstream analysts read them by those names.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A row of the input table.
///
/// Only the five columns the pipeline cares about are kept; any other column
/// in the file is ignored on load. Empty or missing cells are `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRecord {
    pub date: Option<String>,
    pub media_outlet: Option<String>,
    pub title: Option<String>,
    pub text: Option<String>,
    pub url: Option<String>,
}

/// A row that passed every normalization filter.
///
/// `date` is always a valid calendar date and `fecha_yyyy_mm_dd` is always
/// its `YYYY-MM-DD` rendering.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CleanedRecord {
    pub date: NaiveDate,
    pub media_outlet: Option<String>,
    pub title: String,
    pub text: String,
    pub url: Option<String>,
    pub fecha_yyyy_mm_dd: String,
}

/// Category of an entity span as reported by a recognizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntityLabel {
    /// `PER`
    Person,
    /// `LOC`
    Location,
    /// `GPE`
    GeoPolitical,
    /// `ORG`
    Organization,
    /// Any other code (`MISC`, `DATE`, ...). Ignored by the tagger.
    Other(String),
}

impl EntityLabel {
    /// Map a label code onto a category. Codes are case-sensitive.
    pub fn from_code(code: &str) -> Self {
        match code.trim() {
            "PER" => Self::Person,
            "LOC" => Self::Location,
            "GPE" => Self::GeoPolitical,
            "ORG" => Self::Organization,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn code(&self) -> &str {
        match self {
            Self::Person => "PER",
            Self::Location => "LOC",
            Self::GeoPolitical => "GPE",
            Self::Organization => "ORG",
            Self::Other(code) => code,
        }
    }
}

impl std::fmt::Display for EntityLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// One entity mention found by a recognizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntitySpan {
    pub text: String,
    pub label: EntityLabel,
}

impl EntitySpan {
    pub fn new(text: impl Into<String>, label: EntityLabel) -> Self {
        Self {
            text: text.into(),
            label,
        }
    }
}

/// The three entity collections attached to every annotated row.
///
/// Each collection is a set of trimmed names; `LOC` and `GPE` mentions share
/// `lugares`. All three are empty when extraction failed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct EntitySets {
    pub personas: BTreeSet<String>,
    pub lugares: BTreeSet<String>,
    pub organizaciones: BTreeSet<String>,
}

impl EntitySets {
    /// Bucket spans by category, trimming names and dropping duplicates.
    pub fn from_spans<I>(spans: I) -> Self
    where
        I: IntoIterator<Item = EntitySpan>,
    {
        let mut sets = Self::default();
        for span in spans {
            let name = span.text.trim();
            if name.is_empty() {
                continue;
            }
            let bucket = match span.label {
                EntityLabel::Person => &mut sets.personas,
                EntityLabel::Location | EntityLabel::GeoPolitical => &mut sets.lugares,
                EntityLabel::Organization => &mut sets.organizaciones,
                EntityLabel::Other(_) => continue,
            };
            bucket.insert(name.to_string());
        }
        sets
    }

    pub fn is_empty(&self) -> bool {
        self.personas.is_empty() && self.lugares.is_empty() && self.organizaciones.is_empty()
    }
}

/// A cleaned row with its extracted entities.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct AnnotatedRecord {
    #[serde(flatten)]
    pub record: CleanedRecord,
    #[serde(flatten)]
    pub entities: EntitySets,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cleaned() -> CleanedRecord {
        CleanedRecord {
            date: NaiveDate::from_ymd_opt(2025, 9, 24).unwrap(),
            media_outlet: Some("La Tercera".to_string()),
            title: "Titular".to_string(),
            text: "cuerpo".to_string(),
            url: None,
            fecha_yyyy_mm_dd: "2025-09-24".to_string(),
        }
    }

    #[test]
    fn test_label_codes() {
        assert_eq!(EntityLabel::from_code("PER"), EntityLabel::Person);
        assert_eq!(EntityLabel::from_code(" LOC "), EntityLabel::Location);
        assert_eq!(EntityLabel::from_code("GPE"), EntityLabel::GeoPolitical);
        assert_eq!(EntityLabel::from_code("ORG"), EntityLabel::Organization);
        assert_eq!(
            EntityLabel::from_code("per"),
            EntityLabel::Other("per".to_string())
        );
        assert_eq!(EntityLabel::from_code("MISC").to_string(), "MISC");
    }

    #[test]
    fn test_entity_sets_merge_places_and_dedupe() {
        let sets = EntitySets::from_spans(vec![
            EntitySpan::new("Juan Pérez", EntityLabel::Person),
            EntitySpan::new(" Juan Pérez ", EntityLabel::Person),
            EntitySpan::new("Santiago", EntityLabel::Location),
            EntitySpan::new("Chile", EntityLabel::GeoPolitical),
            EntitySpan::new("Santiago\n", EntityLabel::GeoPolitical),
            EntitySpan::new("ONU", EntityLabel::Organization),
            EntitySpan::new("Fiestas Patrias", EntityLabel::Other("MISC".to_string())),
            EntitySpan::new("   ", EntityLabel::Person),
        ]);

        assert_eq!(sets.personas.len(), 1);
        assert!(sets.personas.contains("Juan Pérez"));
        assert_eq!(sets.lugares.len(), 2);
        assert!(sets.lugares.contains("Santiago"));
        assert!(sets.lugares.contains("Chile"));
        assert_eq!(sets.organizaciones.len(), 1);
        assert!(!sets.is_empty());
    }

    #[test]
    fn test_entity_sets_default_is_empty() {
        assert!(EntitySets::default().is_empty());
    }

    #[test]
    fn test_annotated_record_serialization_is_flat() {
        let annotated = AnnotatedRecord {
            record: cleaned(),
            entities: EntitySets::from_spans(vec![EntitySpan::new("ONU", EntityLabel::Organization)]),
        };

        let value = serde_json::to_value(&annotated).unwrap();
        assert_eq!(value["date"], "2025-09-24");
        assert_eq!(value["fecha_yyyy_mm_dd"], "2025-09-24");
        assert_eq!(value["organizaciones"][0], "ONU");
        assert!(value["personas"].as_array().unwrap().is_empty());

        let back: AnnotatedRecord = serde_json::from_value(value).unwrap();
        assert_eq!(back, annotated);
    }
}
