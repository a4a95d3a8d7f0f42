//! OpenAI-compatible chat completions adapter.
//!
//! Sends each rendered prompt as a single user message to
//! `{endpoint}/chat/completions` and returns `choices[0].message.content`.
//! Works with any provider exposing the same API (OpenAI, Groq, vLLM,
//! Ollama).

use crate::config::FileLlmConfig;
use assistant_application::ports::llm_gateway::{GatewayError, LlmGateway};
use async_trait::async_trait;
use reqwest::Client;
use serde_json::{Value, json};
use thiserror::Error;
use tracing::debug;

/// Errors building the adapter from configuration
#[derive(Error, Debug)]
pub enum OpenAiConfigError {
    #[error("API key environment variable '{env}' is not set")]
    MissingApiKey { env: String },
}

/// Chat completions client for the language model collaborator
pub struct OpenAiChatGateway {
    client: Client,
    endpoint: String,
    api_key: String,
    model: String,
    temperature: Option<f32>,
    max_tokens: Option<u32>,
}

impl OpenAiChatGateway {
    /// Build from the `[llm]` section, reading the key from `api_key_env`.
    ///
    /// Local endpoints (localhost, 127.0.0.1) do not require a key.
    pub fn from_config(config: &FileLlmConfig) -> Result<Self, OpenAiConfigError> {
        let api_key = match std::env::var(&config.api_key_env) {
            Ok(key) if !key.trim().is_empty() => key,
            _ if is_local(&config.endpoint) => {
                debug!("No API key set for local endpoint; sending a placeholder token");
                "local".to_string()
            }
            _ => {
                return Err(OpenAiConfigError::MissingApiKey {
                    env: config.api_key_env.clone(),
                });
            }
        };

        Ok(Self::new(&config.endpoint, &config.model, api_key)
            .with_temperature(config.temperature)
            .with_max_tokens(config.max_tokens))
    }

    pub fn new(endpoint: &str, model: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            endpoint: endpoint.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            model: model.into(),
            temperature: None,
            max_tokens: None,
        }
    }

    pub fn with_temperature(mut self, temperature: Option<f32>) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: Option<u32>) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    fn request_body(&self, prompt: &str) -> Value {
        let mut body = json!({
            "model": self.model,
            "messages": [{ "role": "user", "content": prompt }],
            "stream": false,
        });
        if let Some(t) = self.temperature {
            body["temperature"] = json!(t);
        }
        if let Some(max) = self.max_tokens {
            body["max_tokens"] = json!(max);
        }
        body
    }

    fn parse_response(body: &Value) -> Result<String, GatewayError> {
        body.get("choices")
            .and_then(|c| c.get(0))
            .and_then(|c| c.get("message"))
            .and_then(|m| m.get("content"))
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| {
                GatewayError::InvalidResponse("no choices[0].message.content in response".into())
            })
    }
}

fn is_local(endpoint: &str) -> bool {
    endpoint.contains("localhost") || endpoint.contains("127.0.0.1")
}

#[async_trait]
impl LlmGateway for OpenAiChatGateway {
    fn model(&self) -> &str {
        &self.model
    }

    async fn generate(&self, prompt: &str) -> Result<String, GatewayError> {
        let url = format!("{}/chat/completions", self.endpoint);
        debug!(url = %url, model = %self.model, "Sending chat completion request");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&self.request_body(prompt))
            .send()
            .await
            .map_err(|e| GatewayError::ConnectionError(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| GatewayError::ConnectionError(format!("reading body: {}", e)))?;

        if !status.is_success() {
            return Err(GatewayError::RequestFailed(format!("HTTP {}: {}", status, text)));
        }

        let json: Value = serde_json::from_str(&text)
            .map_err(|e| GatewayError::InvalidResponse(format!("invalid JSON: {}", e)))?;
        Self::parse_response(&json)
    }
}
