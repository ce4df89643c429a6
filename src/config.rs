//! Configuration for the `Tripdesk` service
//!
//! Everything is loaded from environment variables (a `.env` file is read by
//! the binary before this runs). Base URLs are overridable so tests can point
//! the clients at a mock server.

use std::env;

use serde::{Deserialize, Serialize};

use crate::TripdeskError;

const FLIGHT_API_HOST: &str = "sky-scrapper.p.rapidapi.com";

/// Root configuration for the `Tripdesk` service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TripdeskConfig {
    /// Flight-search upstream (sky-scrapper via RapidAPI)
    pub flight_api: FlightApiConfig,
    /// LLM upstream (OpenAI-compatible chat completions)
    pub llm: LlmConfig,
    /// Port the HTTP server binds to
    pub port: u16,
}

/// Flight-search API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlightApiConfig {
    /// RapidAPI key, sent as `x-rapidapi-key`
    pub api_key: String,
    /// Host header value expected by RapidAPI
    pub host: String,
    /// Base URL of the flight-search API
    pub base_url: String,
}

/// LLM API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Bearer token for the completions endpoint
    pub api_key: String,
    /// Base URL of the OpenAI-compatible API
    pub base_url: String,
    /// Model name used for attraction generation
    pub model: String,
}

fn default_flight_base_url() -> String {
    format!("https://{FLIGHT_API_HOST}")
}

fn default_llm_base_url() -> String {
    "https://api.openai.com".to_string()
}

fn default_llm_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_port() -> u16 {
    5000
}

impl TripdeskConfig {
    /// Load configuration from the process environment.
    ///
    /// `RAPIDAPI_KEY` and `OPENAI_API_KEY` are required; everything else has
    /// a default.
    pub fn from_env() -> Result<Self, TripdeskError> {
        let flight_key = env::var("RAPIDAPI_KEY")
            .map_err(|_| TripdeskError::config("Missing RAPIDAPI_KEY env var"))?;
        let llm_key = env::var("OPENAI_API_KEY")
            .map_err(|_| TripdeskError::config("Missing OPENAI_API_KEY env var"))?;

        let port = match env::var("PORT") {
            Ok(raw) => raw
                .parse()
                .map_err(|_| TripdeskError::config(format!("Invalid PORT value: {raw}")))?,
            Err(_) => default_port(),
        };

        Ok(Self {
            flight_api: FlightApiConfig {
                api_key: flight_key,
                host: FLIGHT_API_HOST.to_string(),
                base_url: env::var("FLIGHT_API_BASE_URL")
                    .unwrap_or_else(|_| default_flight_base_url()),
            },
            llm: LlmConfig {
                api_key: llm_key,
                base_url: env::var("OPENAI_BASE_URL").unwrap_or_else(|_| default_llm_base_url()),
                model: env::var("OPENAI_MODEL").unwrap_or_else(|_| default_llm_model()),
            },
            port,
        })
    }
}

impl Default for TripdeskConfig {
    fn default() -> Self {
        Self {
            flight_api: FlightApiConfig {
                api_key: String::new(),
                host: FLIGHT_API_HOST.to_string(),
                base_url: default_flight_base_url(),
            },
            llm: LlmConfig {
                api_key: String::new(),
                base_url: default_llm_base_url(),
                model: default_llm_model(),
            },
            port: default_port(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = TripdeskConfig::default();
        assert_eq!(config.port, 5000);
        assert_eq!(config.flight_api.host, "sky-scrapper.p.rapidapi.com");
        assert!(config.flight_api.base_url.starts_with("https://"));
        assert_eq!(config.llm.model, "gpt-4o-mini");
    }
}
