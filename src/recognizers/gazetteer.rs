//! Dictionary-based entity recognition.
//!
//! A gazetteer is a YAML file mapping label codes to known names:
//!
//! ```yaml
//! PER: [Juan Pérez, Gabriel Boric]
//! LOC: [Santiago, Valparaíso]
//! GPE: [Chile]
//! ORG: [ONU, Codelco]
//! ```
//!
//! Every case-sensitive, whole-word occurrence of a name yields one span.
//! No model endpoint is needed, which makes this backend handy for offline
//! runs and reproducible tests.

use super::EntityRecognizer;
use crate::errors::{ExtractionError, GazetteerError};
use crate::models::{EntityLabel, EntitySpan};
use regex::Regex;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{info, instrument, warn};

/// Recognizer that matches a fixed list of names.
#[derive(Debug)]
pub struct GazetteerRecognizer {
    terms: Vec<(Regex, EntityLabel)>,
}

impl GazetteerRecognizer {
    /// Load a gazetteer from a YAML file.
    #[instrument(level = "info", skip_all, fields(path = %path.as_ref().display()))]
    pub fn load(path: impl AsRef<Path>) -> Result<Self, GazetteerError> {
        let yaml = std::fs::read_to_string(path.as_ref())?;
        let gazetteer = Self::from_yaml_str(&yaml)?;
        if gazetteer.is_empty() {
            warn!("Gazetteer has no terms; every article will come back untagged");
        }
        info!(terms = gazetteer.len(), "Loaded gazetteer");
        Ok(gazetteer)
    }

    /// Build a gazetteer from YAML text.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, GazetteerError> {
        let entries: BTreeMap<String, Vec<String>> = serde_yaml::from_str(yaml)?;

        let mut terms = Vec::new();
        for (code, names) in entries {
            let label = EntityLabel::from_code(&code);
            for name in names {
                let name = name.trim();
                if name.is_empty() {
                    continue;
                }
                let pattern = Regex::new(&whole_word_pattern(name)).map_err(|source| {
                    GazetteerError::Pattern {
                        term: name.to_string(),
                        source,
                    }
                })?;
                terms.push((pattern, label.clone()));
            }
        }
        Ok(Self { terms })
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

/// Escape `name` and anchor it at word boundaries.
///
/// Boundaries are only added on sides that start or end with a word
/// character, otherwise names like `EE.UU.` could never match.
fn whole_word_pattern(name: &str) -> String {
    let is_word = |c: char| c.is_alphanumeric() || c == '_';
    let starts_word = name.chars().next().is_some_and(is_word);
    let ends_word = name.chars().next_back().is_some_and(is_word);
    format!(
        "{}{}{}",
        if starts_word { r"\b" } else { "" },
        regex::escape(name),
        if ends_word { r"\b" } else { "" },
    )
}

impl EntityRecognizer for GazetteerRecognizer {
    async fn recognize(&self, text: &str) -> Result<Vec<EntitySpan>, ExtractionError> {
        let spans = self
            .terms
            .iter()
            .flat_map(|(pattern, label)| {
                pattern
                    .find_iter(text)
                    .map(move |m| EntitySpan::new(m.as_str(), label.clone()))
            })
            .collect();
        Ok(spans)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const YAML: &str = r#"
PER: [Juan Pérez]
LOC: [Santiago]
GPE: [Chile, EE.UU.]
ORG: [ONU]
MISC: [Fiestas Patrias]
"#;

    #[tokio::test]
    async fn test_finds_whole_word_matches() {
        let gazetteer = GazetteerRecognizer::from_yaml_str(YAML).unwrap();
        assert_eq!(gazetteer.len(), 6);

        let spans = gazetteer
            .recognize("Juan Pérez visitó Santiago y trabajó para la ONU.")
            .await
            .unwrap();
        assert!(spans.contains(&EntitySpan::new("Juan Pérez", EntityLabel::Person)));
        assert!(spans.contains(&EntitySpan::new("Santiago", EntityLabel::Location)));
        assert!(spans.contains(&EntitySpan::new("ONU", EntityLabel::Organization)));
        assert_eq!(spans.len(), 3);
    }

    #[tokio::test]
    async fn test_ignores_partial_words() {
        let gazetteer = GazetteerRecognizer::from_yaml_str(YAML).unwrap();
        let spans = gazetteer
            .recognize("Los chilenos de Chilecito y la ONUDI")
            .await
            .unwrap();
        assert!(spans.is_empty());
    }

    #[tokio::test]
    async fn test_repeated_mentions_yield_repeated_spans() {
        let gazetteer = GazetteerRecognizer::from_yaml_str(YAML).unwrap();
        let spans = gazetteer
            .recognize("Chile y EE.UU. firmaron; Chile celebró.")
            .await
            .unwrap();
        let chile = spans.iter().filter(|s| s.text == "Chile").count();
        assert_eq!(chile, 2);
        assert!(spans.contains(&EntitySpan::new("EE.UU.", EntityLabel::GeoPolitical)));
    }

    #[test]
    fn test_invalid_yaml_is_rejected() {
        let err = GazetteerRecognizer::from_yaml_str("PER: [unclosed").unwrap_err();
        assert!(matches!(err, GazetteerError::Yaml(_)));
    }

    #[test]
    fn test_load_missing_file() {
        let err = GazetteerRecognizer::load("/no/such/gazetteer.yaml").unwrap_err();
        assert!(matches!(err, GazetteerError::Io(_)));
    }
}
