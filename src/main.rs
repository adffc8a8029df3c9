//! # News Entity Tagger
//!
//! A batch pipeline that cleans a news-article dataset and annotates every
//! article with the people, places and organizations it mentions, producing
//! an entity-tagged corpus keyed by date.
//!
//! ## Usage
//!
//! ```sh
//! news_entity_tagger -i ./noticias.csv -j ./corpus
//! ```
//!
//! ## Architecture
//!
//! The application is a two-stage pipeline:
//! 1. **Normalizing**: Load the table, drop invalid rows, parse dates
//! 2. **Tagging**: Run a named-entity recognizer over each article, one at a time
//! 3. **Output**: Optionally write one JSON file per date plus an index

use clap::Parser;
use std::error::Error;
use tracing::{debug, error, info, instrument};
use tracing_subscriber::{fmt as tfmt, EnvFilter};

mod cli;
mod errors;
mod ingest;
mod models;
mod normalize;
mod outputs;
mod recognizers;
mod tagger;
mod utils;

use cli::{Backend, Cli};
use models::AnnotatedRecord;
use outputs::json;
use recognizers::gazetteer::GazetteerRecognizer;
use recognizers::llm::LlmRecognizer;
use recognizers::EntityRecognizer;
use tagger::{EntityTagger, TaggingReport};
use utils::{ensure_writable_dir, truncate_for_log};

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("news_entity_tagger starting up");

    let args = Cli::parse();
    debug!(?args, "Parsed CLI arguments");
    let delimiter = args.delimiter_byte()?;

    // Early check: fail before any model work if the output can't be written
    if let Some(dir) = &args.json_output_dir {
        if let Err(e) = ensure_writable_dir(dir).await {
            error!(
                path = %dir,
                error = %e,
                "JSON output directory is not writable (fix perms or choose a different path)"
            );
            return Err(e);
        }
    }

    // ---- Load the recognizer before any data work ----
    let report = match args.backend {
        Backend::Llm => {
            let recognizer = LlmRecognizer::load(args.config.as_deref(), &args.template).await?;
            run(recognizer, &args, delimiter).await?
        }
        Backend::Gazetteer => {
            let path = args
                .gazetteer
                .as_deref()
                .ok_or("--gazetteer is required with --backend gazetteer")?;
            let recognizer = GazetteerRecognizer::load(path)?;
            run(recognizer, &args, delimiter).await?
        }
    };

    let elapsed = start_time.elapsed();
    info!(
        ?elapsed,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        articles = report.total,
        failed = report.failed,
        "Execution complete"
    );

    Ok(())
}

/// Load, clean and tag the dataset with `recognizer`, then write or preview it.
async fn run<R: EntityRecognizer>(
    recognizer: R,
    args: &Cli,
    delimiter: u8,
) -> Result<TaggingReport, Box<dyn Error>> {
    let tagger = EntityTagger::new(recognizer)
        .with_max_text_chars(args.max_text_chars)
        .with_progress_every(args.progress_every);

    // ---- Load and clean ----
    let raw = ingest::load_raw_records(&args.input, delimiter)?;
    let cleaned = normalize::normalize(raw);

    // ---- Tag entities ----
    let (annotated, report) = tagger.tag_entities(cleaned).await;

    // ---- Output ----
    match &args.json_output_dir {
        Some(dir) => {
            let index = json::write_corpus(&annotated, dir).await?;
            info!(dates = index.len(), articles = annotated.len(), "Annotated corpus written");
        }
        None => log_preview(&annotated),
    }

    Ok(report)
}

/// Log the first few annotated rows when nothing is written to disk.
fn log_preview(annotated: &[AnnotatedRecord]) {
    for row in annotated.iter().take(5) {
        info!(
            title = %truncate_for_log(&row.record.title, 80),
            personas = ?row.entities.personas,
            lugares = ?row.entities.lugares,
            organizaciones = ?row.entities.organizaciones,
            "Annotated article"
        );
    }
}
