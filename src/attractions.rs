//! Attraction generation via an OpenAI-compatible chat-completions API.
//!
//! The model is asked for a JSON array of attractions; its reply is parsed
//! tolerantly (models like to wrap JSON in markdown fences) and anything
//! unusable fails closed to an empty list.

use serde::Deserialize;
use tracing::{debug, warn};

use crate::config::LlmConfig;
use crate::models::Attraction;
use crate::Result;
use crate::TripdeskError;

const SYSTEM_PROMPT: &str = "You are a travel assistant. Given the user's stated preferences, \
respond with a JSON array of at least 10 attraction objects. Each object must have exactly \
these string fields: \"name\", \"description\", \"address\", \"opening-hours\", \
\"ticket_price\", \"website_url\". Respond with the JSON array only, no prose and no \
markdown formatting.";

/// Client for the attraction-generating LLM.
#[derive(Debug, Clone)]
pub struct AttractionClient {
    http: reqwest::Client,
    config: LlmConfig,
}

impl AttractionClient {
    pub fn new(http: reqwest::Client, config: LlmConfig) -> Self {
        Self { http, config }
    }

    /// Ask the LLM for attractions matching the user's message.
    ///
    /// The message may be empty. Unparseable model output yields an empty
    /// list, not an error; `Err` is reserved for transport/HTTP failures.
    pub async fn generate(&self, message: &str) -> Result<Vec<Attraction>> {
        let url = format!("{}/v1/chat/completions", self.config.base_url);
        let request = serde_json::json!({
            "model": self.config.model,
            "messages": [
                {"role": "system", "content": SYSTEM_PROMPT},
                {"role": "user", "content": message},
            ],
        });

        let response = self
            .http
            .post(url)
            .bearer_auth(&self.config.api_key)
            .json(&request)
            .send()
            .await?
            .error_for_status()?;

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| TripdeskError::upstream(format!("chat completion response: {e}")))?;

        let Some(content) = completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message)
            .and_then(|message| message.content)
        else {
            warn!("chat completion had no message content");
            return Ok(Vec::new());
        };

        Ok(parse_attractions(&content))
    }
}

/// Parse LLM output into attractions, tolerantly.
///
/// Strict JSON parse first, then a fence-stripped retry; a top-level object
/// is wrapped into a one-element array; any remaining failure yields `[]`.
pub fn parse_attractions(raw: &str) -> Vec<Attraction> {
    let trimmed = raw.trim();
    let candidate = if trimmed.starts_with("```") {
        strip_code_fence(trimmed)
    } else {
        trimmed
    };

    match serde_json::from_str::<serde_json::Value>(candidate) {
        Ok(serde_json::Value::Array(items)) => items
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect(),
        Ok(value @ serde_json::Value::Object(_)) => serde_json::from_value(value)
            .map(|attraction| vec![attraction])
            .unwrap_or_default(),
        Ok(_) => {
            debug!("LLM output parsed but was not an array or object");
            Vec::new()
        }
        Err(e) => {
            warn!("could not parse LLM output as JSON: {e}");
            Vec::new()
        }
    }
}

/// Strip a leading/trailing markdown code fence (``` or ```json).
fn strip_code_fence(text: &str) -> &str {
    let mut inner = text.trim();
    if let Some(rest) = inner.strip_prefix("```") {
        // Drop the language tag on the opening fence line.
        inner = match rest.split_once('\n') {
            Some((_, body)) => body,
            None => rest,
        };
    }
    if let Some(rest) = inner.trim_end().strip_suffix("```") {
        inner = rest;
    }
    inner.trim()
}

/// Chat-completions response, reduced to the fields this service reads.
#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: Option<ChatMessage>,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: Option<String>,
}
