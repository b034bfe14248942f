//! Client for OpenAI-style chat completion endpoints
//!
//! Works against api.openai.com and any self-hosted server speaking the same
//! protocol (vLLM, Ollama, LM Studio, gateway proxies).

use std::time::Duration;

use serde::{Deserialize, Serialize};

use rowboat_core::{Generator, GeneratorError, RecapPrompt};

/// Default per-request time budget.
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// Generator backed by an OpenAI-compatible `/chat/completions` endpoint.
#[derive(Debug, Clone)]
pub struct OpenAICompatibleClient {
    /// Display name used in logs and router diagnostics.
    pub name: String,
    api_key: Option<String>,
    base_url: String,
    model: String,
    temperature: f64,
    max_tokens: u32,
    timeout_ms: u64,
    http_client: reqwest::Client,
}

impl OpenAICompatibleClient {
    /// Build a client. `base_url` is the API root, without a trailing slash.
    pub fn new(
        name: impl Into<String>,
        api_key: Option<String>,
        base_url: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            api_key,
            base_url: base_url.into().trim_end_matches('/').to_string(),
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

    fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }
}

#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
    temperature: f64,
}

#[derive(Debug, Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

fn first_content(response: ChatCompletionResponse) -> Option<String> {
    response
        .choices
        .into_iter()
        .next()
        .map(|choice| choice.message.content)
        .filter(|content| !content.trim().is_empty())
}

fn classify_transport_error(err: reqwest::Error, budget_ms: u64) -> GeneratorError {
    if err.is_timeout() {
        GeneratorError::Timeout { budget_ms }
    } else {
        GeneratorError::Service(err.to_string())
    }
}

#[async_trait::async_trait]
impl Generator for OpenAICompatibleClient {
    async fn invoke(&self, prompt: &RecapPrompt) -> Result<String, GeneratorError> {
        let request = ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: prompt.system.clone(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: prompt.conversation.clone(),
                },
            ],
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        };

        let mut builder = self
            .http_client
            .post(self.endpoint())
            .timeout(Duration::from_millis(self.timeout_ms))
            .header("Content-Type", "application/json");
        if let Some(api_key) = &self.api_key {
            builder = builder.header("Authorization", format!("Bearer {api_key}"));
        }

        let response = builder
            .json(&request)
            .send()
            .await
            .map_err(|err| classify_transport_error(err, self.timeout_ms))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(GeneratorError::Service(format!(
                "{} returned {status}: {body}",
                self.name
            )));
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|err| GeneratorError::Service(format!("{}: bad response body: {err}", self.name)))?;

        first_content(completion).ok_or_else(|| {
            GeneratorError::Service(format!("{}: completion carried no content", self.name))
        })
    }
}
