//! Named-entity recognizers the tagger can drive.
//!
//! Each backend implements [`EntityRecognizer`]: given an article text, return
//! the entity spans it finds, each with a category label.
//!
//! # Backends
//!
//! | Backend | Module | Notes |
//! |---------|--------|-------|
//! | LLM | [`llm`] | OpenAI-compatible chat model via `awful_aj`, JSON reply |
//! | Gazetteer | [`gazetteer`] | Offline dictionary of known names, whole-word matches |
//!
//! A recognizer is built once at startup and handed to the
//! [`EntityTagger`](crate::tagger::EntityTagger), which owns it for the rest
//! of the run. Recognizers are never mutated after construction.

use crate::errors::ExtractionError;
use crate::models::EntitySpan;

pub mod gazetteer;
pub mod llm;

/// Trait for async named-entity recognition.
///
/// Implementors turn a text into a list of labelled spans. Spans may repeat
/// and may carry labels the caller does not care about; filtering and
/// de-duplication happen in the tagger.
pub trait EntityRecognizer {
    /// Find the entity mentions in `text`.
    ///
    /// # Errors
    ///
    /// Any failure of the underlying engine. The tagger treats an error as
    /// "no entities" for that row and keeps going.
    async fn recognize(&self, text: &str) -> Result<Vec<EntitySpan>, ExtractionError>;
}
