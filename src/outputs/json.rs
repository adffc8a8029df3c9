//! JSON output of the annotated corpus, keyed by date.
//!
//! Articles are grouped by `fecha_yyyy_mm_dd`. Each date gets its own file
//! holding a JSON array of [`AnnotatedRecord`]s in their input order, and an
//! `index.json` lists every date with its article count.

use crate::models::AnnotatedRecord;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use std::error::Error;
use tokio::fs;
use tracing::{error, info, instrument};

/// Name of the index file written next to the per-date files.
pub const INDEX_FILENAME: &str = "index.json";

/// One line of `index.json`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct DateIndexEntry {
    pub fecha_yyyy_mm_dd: String,
    pub articles: usize,
    pub file: String,
}

/// Write the annotated corpus under `json_output_dir`.
///
/// # Returns
///
/// The index entries that were written, sorted by date.
///
/// # Output Path
///
/// Each date is written to `{json_output_dir}/{fecha_yyyy_mm_dd}.json`.
#[instrument(level = "info", skip_all, fields(json_output_dir = %json_output_dir, rows = records.len()))]
pub async fn write_corpus(
    records: &[AnnotatedRecord],
    json_output_dir: &str,
) -> Result<Vec<DateIndexEntry>, Box<dyn Error>> {
    if let Err(e) = fs::create_dir_all(json_output_dir).await {
        error!(%json_output_dir, error = %e, "Failed to create JSON dir");
        return Err(e.into());
    }

    let by_date = records
        .iter()
        .into_group_map_by(|r| r.record.fecha_yyyy_mm_dd.clone());

    let mut index = Vec::with_capacity(by_date.len());
    for (fecha, articles) in by_date.into_iter().sorted_by(|a, b| a.0.cmp(&b.0)) {
        let file = format!("{}.json", fecha);
        let path = format!("{}/{}", json_output_dir.trim_end_matches('/'), file);
        let json = serde_json::to_string_pretty(&articles)?;
        fs::write(&path, json).await?;
        info!(%path, articles = articles.len(), "Wrote date file");

        index.push(DateIndexEntry {
            fecha_yyyy_mm_dd: fecha,
            articles: articles.len(),
            file,
        });
    }

    let index_path = format!("{}/{}", json_output_dir.trim_end_matches('/'), INDEX_FILENAME);
    fs::write(&index_path, serde_json::to_string_pretty(&index)?).await?;
    info!(path = %index_path, dates = index.len(), "Wrote date index");

    Ok(index)
}
