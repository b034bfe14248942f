//! Client for the Anthropic Messages API

use std::time::Duration;

use serde::{Deserialize, Serialize};

use rowboat_core::{Generator, GeneratorError, RecapPrompt};

use crate::openai_compatible::DEFAULT_TIMEOUT_MS;

const API_URL: &str = "https://api.anthropic.com/v1/messages";
const API_VERSION: &str = "2023-06-01";

/// Generator backed by Anthropic's `/v1/messages` endpoint.
#[derive(Debug, Clone)]
pub struct AnthropicClient {
    api_key: String,
    model: String,
    temperature: f64,
    max_tokens: u32,
    timeout_ms: u64,
    http_client: reqwest::Client,
}

impl AnthropicClient {
    /// Build a client for the given API key and model.
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: model.into(),
            temperature: 0.3,
            max_tokens: 512,
            timeout_ms: DEFAULT_TIMEOUT_MS,
            http_client: reqwest::Client::new(),
        }
    }

    /// Override the sampling temperature.
    pub fn with_temperature(mut self, temperature: f64) -> Self {
        self.temperature = temperature;
        self
    }

    /// Override the completion token cap.
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Override the per-request time budget.
    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }
}

#[derive(Debug, Serialize)]
struct MessagesRequest {
    model: String,
    max_tokens: u32,
    temperature: f64,
    system: String,
    messages: Vec<MessageParam>,
}

#[derive(Debug, Serialize)]
struct MessageParam {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(default)]
    text: Option<String>,
}

fn first_text(response: MessagesResponse) -> Option<String> {
    response
        .content
        .into_iter()
        .find_map(|block| block.text)
        .filter(|text| !text.trim().is_empty())
}

#[async_trait::async_trait]
impl Generator for AnthropicClient {
    async fn invoke(&self, prompt: &RecapPrompt) -> Result<String, GeneratorError> {
        let request = MessagesRequest {
            model: self.model.clone(),
            max_tokens: self.max_tokens,
            temperature: self.temperature,
            system: prompt.system.clone(),
            messages: vec![MessageParam {
                role: "user".to_string(),
                content: prompt.conversation.clone(),
            }],
        };

        let response = self
            .http_client
            .post(API_URL)
            .timeout(Duration::from_millis(self.timeout_ms))
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", API_VERSION)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|err| {
                if err.is_timeout() {
                    GeneratorError::Timeout {
                        budget_ms: self.timeout_ms,
                    }
                } else {
                    GeneratorError::Service(err.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GeneratorError::Service(format!(
                "anthropic returned {status}: {body}"
            )));
        }

        let messages: MessagesResponse = response
            .json()
            .await
            .map_err(|err| GeneratorError::Service(format!("anthropic: bad response body: {err}")))?;

        first_text(messages)
            .ok_or_else(|| GeneratorError::Service("anthropic: message carried no text".to_string()))
    }
}
