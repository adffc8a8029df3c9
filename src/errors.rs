//! Error types for ingestion, entity extraction and gazetteer loading.
//!
//! Ingestion and gazetteer errors are fatal and end the run. Extraction
//! errors are per row: the tagger logs them and moves on.

use std::io;

use thiserror::Error;

/// Failure to load the input table.
#[derive(Debug, Error)]
pub enum IngestError {
    #[error("input file is unreadable: {0}")]
    Io(#[from] io::Error),
    #[error("input file is not valid delimited text: {0}")]
    Csv(#[from] csv::Error),
    #[error("required column '{0}' is missing from the input header")]
    MissingColumn(&'static str),
}

/// Failure of a single model invocation.
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("model call failed: {0}")]
    Model(String),
    #[error("model response was cut off before the JSON closed: {0}")]
    TruncatedResponse(serde_json::Error),
    #[error("model response is not the expected JSON: {0}")]
    MalformedResponse(serde_json::Error),
}

/// Failure to load the gazetteer dictionary.
#[derive(Debug, Error)]
pub enum GazetteerError {
    #[error("gazetteer file is unreadable: {0}")]
    Io(#[from] io::Error),
    #[error("gazetteer file is not valid YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("gazetteer term '{term}' does not compile to a pattern: {source}")]
    Pattern {
        term: String,
        #[source]
        source: regex::Error,
    },
}
