//! Entity recognition through an OpenAI-compatible chat model.
//!
//! The model is driven by the `awful_aj` client with a chat template (by
//! default `ner_tagger`) instructing it to answer with JSON of the form:
//!
//! ```json
//! {"entities": [{"text": "Juan Pérez", "label": "PER"}, {"text": "ONU", "label": "ORG"}]}
//! ```
//!
//! Replies wrapped in a Markdown code fence are accepted. A single call is
//! made per article; failures are returned to the tagger, not retried.

use super::EntityRecognizer;
use crate::errors::ExtractionError;
use crate::models::{EntityLabel, EntitySpan};
use crate::utils::{looks_truncated, truncate_for_log};
use awful_aj::api::ask;
use awful_aj::{config, config::AwfulJadeConfig, config_dir, template, template::ChatTemplate};
use serde::Deserialize;
use std::error::Error;
use std::fmt;
use std::time::Instant;
use tracing::{debug, info, instrument, warn};

/// Template used when none is given on the command line.
pub const DEFAULT_TEMPLATE: &str = "ner_tagger";

#[derive(Debug, Deserialize)]
struct EntityReply {
    #[serde(default)]
    entities: Vec<ReplySpan>,
}

#[derive(Debug, Deserialize)]
struct ReplySpan {
    text: String,
    label: String,
}

/// Recognizer backed by an LLM endpoint.
///
/// Owns the client configuration (endpoint, model, API key) and the chat
/// template, both loaded once by [`LlmRecognizer::load`].
pub struct LlmRecognizer {
    config: AwfulJadeConfig,
    template: ChatTemplate,
    template_name: String,
}

impl fmt::Debug for LlmRecognizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LlmRecognizer")
            .field("template", &self.template_name)
            .finish()
    }
}

impl LlmRecognizer {
    /// Load the client config and chat template.
    ///
    /// # Arguments
    ///
    /// * `config_path` - Path to `config.yaml`; defaults to the client's own
    ///   config directory
    /// * `template_name` - Name of the chat template to load
    ///
    /// # Errors
    ///
    /// Fails if either file cannot be found or parsed. This ends the run.
    #[instrument(level = "info", skip_all, fields(template = %template_name))]
    pub async fn load(
        config_path: Option<&str>,
        template_name: &str,
    ) -> Result<Self, Box<dyn Error>> {
        let template = template::load_template(template_name).await?;
        info!("Loaded template");

        let config_path = match config_path {
            Some(path) => path.to_string(),
            None => config_dir()?
                .join("config.yaml")
                .to_str()
                .ok_or("Not a valid config filename")?
                .to_string(),
        };
        let config = config::load_config(&config_path)?;
        info!(%config_path, "Loaded configuration");

        Ok(Self {
            config,
            template,
            template_name: template_name.to_string(),
        })
    }
}

impl EntityRecognizer for LlmRecognizer {
    #[instrument(level = "debug", skip_all, fields(bytes = text.len()))]
    async fn recognize(&self, text: &str) -> Result<Vec<EntitySpan>, ExtractionError> {
        let t0 = Instant::now();
        let res = ask(&self.config, text.to_string(), &self.template, None, None).await;
        let dt = t0.elapsed();

        let reply = match res {
            Ok(reply) => reply,
            Err(e) => {
                warn!(elapsed_ms = dt.as_millis() as u128, error = %e, "API call failed");
                return Err(ExtractionError::Model(e.to_string()));
            }
        };
        debug!(elapsed_ms = dt.as_millis() as u128, "API call succeeded");

        parse_entity_reply(&reply).inspect_err(|e| {
            warn!(
                error = %e,
                response_preview = %truncate_for_log(&reply, 300),
                "Model returned non-conforming JSON"
            )
        })
    }
}

/// Decode a model reply into spans.
pub fn parse_entity_reply(reply: &str) -> Result<Vec<EntitySpan>, ExtractionError> {
    let body = strip_code_fence(reply);
    let parsed: EntityReply = serde_json::from_str(body).map_err(|e| {
        if looks_truncated(&e) {
            ExtractionError::TruncatedResponse(e)
        } else {
            ExtractionError::MalformedResponse(e)
        }
    })?;

    Ok(parsed
        .entities
        .into_iter()
        .map(|span| EntitySpan::new(span.text, EntityLabel::from_code(&span.label)))
        .collect())
}

/// Remove a surrounding ```` ```json ... ``` ```` fence, if any.
fn strip_code_fence(reply: &str) -> &str {
    let trimmed = reply.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop the info string ("json") on the opening line.
    let rest = match rest.split_once('\n') {
        Some((_, body)) => body,
        None => rest,
    };
    rest.trim_end().trim_end_matches("```").trim()
}
