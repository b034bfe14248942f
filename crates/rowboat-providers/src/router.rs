//! Environment-driven provider selection with ordered fallback
//!
//! Reads provider credentials from the environment (after a best-effort
//! `.env` load), builds every configured client, and tries them in order on
//! each invocation. `ROWBOAT_PROVIDER` moves a provider to the front of the
//! order without removing the others.

use std::sync::Arc;

use anyhow::Result;

use rowboat_core::{Generator, GeneratorError, RecapPrompt};

use crate::anthropic::AnthropicClient;
use crate::openai_compatible::OpenAICompatibleClient;

#[derive(Debug, Clone)]
struct ProviderEntry {
    name: String,
    client: Arc<dyn Generator>,
}

/// A generator that fans out over configured providers in priority order.
///
/// A provider failure is logged and the next provider is tried; only when
/// every provider fails does the router surface an error, and it surfaces
/// the last one because later providers are the deliberate fallbacks.
#[derive(Debug, Clone)]
pub struct ProviderRouter {
    providers: Vec<ProviderEntry>,
}

impl ProviderRouter {
    /// Build a router from environment variables.
    ///
    /// Recognized providers, in default priority order:
    /// - `openai`: `OPENAI_API_KEY`, optional `OPENAI_MODEL`, `OPENAI_BASE_URL`
    /// - `anthropic`: `ANTHROPIC_API_KEY`, optional `ANTHROPIC_MODEL`
    /// - `openai_compatible`: `ROWBOAT_LLM_BASE_URL` + `ROWBOAT_LLM_MODEL`,
    ///   optional `ROWBOAT_LLM_API_KEY`, `ROWBOAT_LLM_NAME`
    ///
    /// Set `ROWBOAT_PROVIDER` to prefer one of the names above. Fails only
    /// when no provider is configured at all.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let mut order = Vec::new();
        if let Ok(preferred) = std::env::var("ROWBOAT_PROVIDER") {
            order.push(preferred.to_lowercase());
        }
        order.extend(vec![
            "openai".to_string(),
            "anthropic".to_string(),
            "openai_compatible".to_string(),
        ]);

        let mut providers = Vec::new();
        for name in order {
            if providers.iter().any(|entry: &ProviderEntry| entry.name == name) {
                continue;
            }
            if let Some(entry) = build_provider_from_env(&name) {
                providers.push(entry);
            }
        }

        if providers.is_empty() {
            anyhow::bail!(
                "No recap providers found. Set OPENAI_API_KEY, ANTHROPIC_API_KEY, or ROWBOAT_LLM_BASE_URL + ROWBOAT_LLM_MODEL."
            );
        }

        tracing::debug!(
            providers = ?providers.iter().map(|p| p.name.as_str()).collect::<Vec<_>>(),
            "provider router configured"
        );
        Ok(Self { providers })
    }

    /// Build a router from pre-constructed clients, in the given order.
    pub fn from_clients(clients: Vec<(String, Arc<dyn Generator>)>) -> Result<Self> {
        if clients.is_empty() {
            anyhow::bail!("Provider router needs at least one client.");
        }
        let providers = clients
            .into_iter()
            .map(|(name, client)| ProviderEntry { name, client })
            .collect();
        Ok(Self { providers })
    }

    /// Names of the configured providers, in invocation order.
    pub fn provider_names(&self) -> Vec<&str> {
        self.providers.iter().map(|p| p.name.as_str()).collect()
    }
}

fn build_provider_from_env(name: &str) -> Option<ProviderEntry> {
    match name {
        "openai" => {
            let api_key = std::env::var("OPENAI_API_KEY").ok()?;
            let model =
                std::env::var("OPENAI_MODEL").unwrap_or_else(|_| "gpt-4o-mini".to_string());
            let base_url = std::env::var("OPENAI_BASE_URL")
                .unwrap_or_else(|_| "https://api.openai.com/v1".to_string());
            let client = OpenAICompatibleClient::new("OpenAI", Some(api_key), base_url, model);
            Some(ProviderEntry {
                name: name.to_string(),
                client: Arc::new(client),
            })
        }
        "anthropic" => {
            let api_key = std::env::var("ANTHROPIC_API_KEY").ok()?;
            let model = std::env::var("ANTHROPIC_MODEL")
                .unwrap_or_else(|_| "claude-3-5-sonnet-20240620".to_string());
            let client = AnthropicClient::new(api_key, model);
            Some(ProviderEntry {
                name: name.to_string(),
                client: Arc::new(client),
            })
        }
        "openai_compatible" => {
            let base_url = std::env::var("ROWBOAT_LLM_BASE_URL").ok()?;
            let model = std::env::var("ROWBOAT_LLM_MODEL").ok()?;
            let display_name = std::env::var("ROWBOAT_LLM_NAME")
                .unwrap_or_else(|_| "OpenAI-Compatible".to_string());
            let api_key = std::env::var("ROWBOAT_LLM_API_KEY").ok();
            let client = OpenAICompatibleClient::new(display_name, api_key, base_url, model);
            Some(ProviderEntry {
                name: "openai_compatible".to_string(),
                client: Arc::new(client),
            })
        }
        _ => None,
    }
}

#[async_trait::async_trait]
impl Generator for ProviderRouter {
    async fn invoke(&self, prompt: &RecapPrompt) -> Result<String, GeneratorError> {
        let mut last_error = GeneratorError::Service("no providers configured".to_string());

        for provider in &self.providers {
            match provider.client.invoke(prompt).await {
                Ok(raw) => {
                    tracing::debug!(provider = %provider.name, "provider answered");
                    return Ok(raw);
                }
                Err(err) => {
                    tracing::warn!(provider = %provider.name, error = %err, "provider failed, trying next");
                    last_error = err;
                }
            }
        }

        Err(last_error)
    }
}
