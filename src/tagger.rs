//! Per-article entity tagging.
//!
//! The [`EntityTagger`] owns a recognizer and walks the cleaned table one row
//! at a time, in input order. Each row's text is cut to
//! [`DEFAULT_MAX_TEXT_CHARS`] characters (configurable) before the
//! recognizer sees it. Spans are bucketed into `personas`, `lugares` (`LOC`
//! and `GPE`) and `organizaciones`.
//!
//! A failed extraction never stops the batch: the row gets three empty sets,
//! and the failure is counted in the [`TaggingReport`] so it can be told apart
//! from a row where the model legitimately found nothing.

use crate::errors::ExtractionError;
use crate::models::{AnnotatedRecord, CleanedRecord, EntitySets};
use crate::recognizers::EntityRecognizer;
use crate::utils::truncate_chars;
use std::time::Instant;
use tracing::{debug, info, instrument, warn};

/// Longest text, in characters, handed to a recognizer.
pub const DEFAULT_MAX_TEXT_CHARS: usize = 500_000;

/// Log a progress line every this many rows by default.
pub const DEFAULT_PROGRESS_EVERY: usize = 1_000;

/// Outcome counts for one tagging run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TaggingReport {
    /// Rows processed.
    pub total: usize,
    /// Rows whose extraction returned an error.
    pub failed: usize,
    /// Rows extracted successfully but with no entity of interest.
    pub empty: usize,
}

/// Drives a recognizer over a table of cleaned rows.
#[derive(Debug)]
pub struct EntityTagger<R> {
    recognizer: R,
    max_text_chars: usize,
    progress_every: usize,
}

impl<R: EntityRecognizer> EntityTagger<R> {
    pub fn new(recognizer: R) -> Self {
        Self {
            recognizer,
            max_text_chars: DEFAULT_MAX_TEXT_CHARS,
            progress_every: DEFAULT_PROGRESS_EVERY,
        }
    }

    pub fn with_max_text_chars(mut self, max_text_chars: usize) -> Self {
        self.max_text_chars = max_text_chars;
        self
    }

    /// Set the progress milestone interval; `0` turns milestones off.
    pub fn with_progress_every(mut self, progress_every: usize) -> Self {
        self.progress_every = progress_every;
        self
    }

    /// Extract the entity sets of a single text.
    pub async fn extract(&self, text: &str) -> Result<EntitySets, ExtractionError> {
        let text = truncate_chars(text, self.max_text_chars);
        let spans = self.recognizer.recognize(text).await?;
        Ok(EntitySets::from_spans(spans))
    }

    /// Annotate every row, sequentially and in order.
    ///
    /// The output has exactly one record per input row.
    #[instrument(level = "info", skip_all, fields(rows = rows.len()))]
    pub async fn tag_entities(
        &self,
        rows: Vec<CleanedRecord>,
    ) -> (Vec<AnnotatedRecord>, TaggingReport) {
        let t0 = Instant::now();
        let total = rows.len();
        let mut report = TaggingReport {
            total,
            ..TaggingReport::default()
        };
        info!(total, "Extracting named entities");

        let mut annotated = Vec::with_capacity(total);
        for (index, record) in rows.into_iter().enumerate() {
            let entities = match self.extract(&record.text).await {
                Ok(entities) => {
                    if entities.is_empty() {
                        report.empty += 1;
                    }
                    debug!(
                        index,
                        personas = entities.personas.len(),
                        lugares = entities.lugares.len(),
                        organizaciones = entities.organizaciones.len(),
                        "Tagged article"
                    );
                    entities
                }
                Err(e) => {
                    report.failed += 1;
                    warn!(index, title = %record.title, error = %e, "Entity extraction failed; leaving row untagged");
                    EntitySets::default()
                }
            };
            annotated.push(AnnotatedRecord { record, entities });

            let done = index + 1;
            if self.progress_every > 0 && done % self.progress_every == 0 {
                info!(done, total, elapsed_secs = t0.elapsed().as_secs(), "Tagging progress");
            }
        }

        info!(
            total = report.total,
            failed = report.failed,
            empty = report.empty,
            elapsed_ms = t0.elapsed().as_millis() as u128,
            "Entities extracted"
        );
        (annotated, report)
    }
}
