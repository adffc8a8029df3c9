//! Command-line interface definitions for News Entity Tagger.
//!
//! This module defines the CLI arguments and options using the `clap` crate.
//! Every option has a default matching the historical fixed setup, so a bare
//! invocation reads the September 2025 Chilean press dataset with the LLM
//! backend and keeps the result in memory.

use crate::tagger::{DEFAULT_MAX_TEXT_CHARS, DEFAULT_PROGRESS_EVERY};
use clap::{Parser, ValueEnum};

/// Input file used when `--input` is not given.
pub const DEFAULT_INPUT: &str =
    "/workspaces/TratamientoAutomaticoDelLenguaje/Datos/dataset_proyecto_chile_septiembre2025.csv";

/// Which recognizer performs the entity extraction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Backend {
    /// OpenAI-compatible chat model configured through `config.yaml`
    Llm,
    /// Offline dictionary of known names (requires `--gazetteer`)
    Gazetteer,
}

/// Command-line arguments for the News Entity Tagger application.
///
/// # Examples
///
/// ```sh
/// # Defaults: fixed dataset path, LLM backend, no files written
/// news_entity_tagger
///
/// # Persist the annotated corpus keyed by date
/// news_entity_tagger -i ./noticias.csv -j ./corpus
///
/// # Run offline against a dictionary of names
/// news_entity_tagger -i ./noticias.csv --backend gazetteer -g ./nombres.yaml
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Delimited text file with at least date, media_outlet, title, text, url columns
    #[arg(short, long, env = "NEWS_INPUT_CSV", default_value = DEFAULT_INPUT)]
    pub input: String,

    /// Field delimiter of the input file
    #[arg(long, default_value_t = ',')]
    pub delimiter: char,

    /// Output directory for the annotated corpus (one JSON file per date); omit to keep it in memory
    #[arg(short, long, env = "NEWS_JSON_OUTPUT_DIR")]
    pub json_output_dir: Option<String>,

    /// Entity recognition backend
    #[arg(long, value_enum, default_value_t = Backend::Llm)]
    pub backend: Backend,

    /// Optional path to the LLM client's config.yaml
    #[arg(short, long)]
    pub config: Option<String>,

    /// Chat template used by the LLM backend
    #[arg(long, default_value = crate::recognizers::llm::DEFAULT_TEMPLATE)]
    pub template: String,

    /// YAML gazetteer used by the gazetteer backend
    #[arg(short, long, env = "NEWS_GAZETTEER", required_if_eq("backend", "gazetteer"))]
    pub gazetteer: Option<String>,

    /// Characters of each article handed to the recognizer
    #[arg(long, default_value_t = DEFAULT_MAX_TEXT_CHARS)]
    pub max_text_chars: usize,

    /// Log a progress line every N articles (0 disables)
    #[arg(long, default_value_t = DEFAULT_PROGRESS_EVERY)]
    pub progress_every: usize,
}

impl Cli {
    /// The delimiter as the single byte the CSV reader wants.
    pub fn delimiter_byte(&self) -> Result<u8, String> {
        u8::try_from(self.delimiter)
            .ok()
            .filter(u8::is_ascii)
            .ok_or_else(|| format!("delimiter '{}' is not a single ASCII character", self.delimiter))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(["news_entity_tagger"]);

        assert_eq!(cli.input, DEFAULT_INPUT);
        assert_eq!(cli.json_output_dir, None);
        assert_eq!(cli.backend, Backend::Llm);
        assert_eq!(cli.template, "ner_tagger");
        assert_eq!(cli.max_text_chars, 500_000);
        assert_eq!(cli.progress_every, 1_000);
        assert_eq!(cli.delimiter_byte(), Ok(b','));
    }

    #[test]
    fn test_cli_short_flags() {
        let cli = Cli::parse_from([
            "news_entity_tagger",
            "-i",
            "/tmp/noticias.csv",
            "-j",
            "/tmp/corpus",
            "-g",
            "/tmp/nombres.yaml",
            "--backend",
            "gazetteer",
        ]);

        assert_eq!(cli.input, "/tmp/noticias.csv");
        assert_eq!(cli.json_output_dir.as_deref(), Some("/tmp/corpus"));
        assert_eq!(cli.gazetteer.as_deref(), Some("/tmp/nombres.yaml"));
        assert_eq!(cli.backend, Backend::Gazetteer);
    }

    #[test]
    fn test_cli_gazetteer_backend_needs_gazetteer() {
        let res = Cli::try_parse_from(["news_entity_tagger", "--backend", "gazetteer"]);
        assert!(res.is_err());

        let res = Cli::try_parse_from(["news_entity_tagger", "--backend", "llm"]);
        assert!(res.is_ok());
    }

    #[test]
    fn test_cli_delimiter() {
        let cli = Cli::parse_from(["news_entity_tagger", "--delimiter", ";"]);
        assert_eq!(cli.delimiter_byte(), Ok(b';'));

        let cli = Cli::parse_from(["news_entity_tagger", "--delimiter", "é"]);
        assert!(cli.delimiter_byte().is_err());
    }
}
