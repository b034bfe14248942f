//! Pipeline orchestration
//!
//! Wires transcript rendering, the generator call, parsing, sanitization, and
//! the rule-based fallback into one request-scoped run. Every failure mode is
//! absorbed here: the caller always receives a [`PipelineResult`] carrying a
//! valid recap, with the failure classified in `error_type`.

use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, warn};

use crate::fallback;
use crate::generator::Generator;
use crate::parser;
use crate::sanitize;
use crate::transcript::{self, MAX_CONTEXT_CHARS};
use crate::types::{ConversationMessage, FallbackReason, PipelineResult, Recap};

/// Tunable knobs for a pipeline instance.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Character budget for the rendered transcript.
    pub max_context_chars: usize,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            max_context_chars: MAX_CONTEXT_CHARS,
        }
    }
}

/// The recap pipeline. Stateless across runs; cheap to clone behind `Arc`.
#[derive(Debug)]
pub struct RecapPipeline {
    generator: Option<Arc<dyn Generator>>,
    config: PipelineConfig,
}

impl RecapPipeline {
    /// Build a pipeline with default configuration.
    ///
    /// Pass `None` to run fallback-only, e.g. when no provider is configured.
    pub fn new(generator: Option<Arc<dyn Generator>>) -> Self {
        Self::with_config(generator, PipelineConfig::default())
    }

    /// Build a pipeline with explicit configuration.
    pub fn with_config(generator: Option<Arc<dyn Generator>>, config: PipelineConfig) -> Self {
        Self { generator, config }
    }

    /// Produce a recap for the conversation. Never fails.
    pub async fn run(&self, messages: &[ConversationMessage]) -> PipelineResult {
        let started = Instant::now();
        let (recap, error_type) = self.produce(messages).await;
        let used_fallback = error_type.is_some();
        let message = if used_fallback {
            "Recap card ready (safe mode)"
        } else {
            "Recap card ready"
        };
        PipelineResult {
            message: message.to_string(),
            recap,
            used_fallback,
            error_type,
            latency_ms: started.elapsed().as_millis() as u64,
        }
    }

    async fn produce(
        &self,
        messages: &[ConversationMessage],
    ) -> (Recap, Option<FallbackReason>) {
        let Some(generator) = &self.generator else {
            debug!("no generator configured, synthesizing recap from rules");
            return (
                fallback::generate(messages),
                Some(FallbackReason::NoAiProvider),
            );
        };

        let prompt = transcript::build_prompt(messages, self.config.max_context_chars);
        let raw = match generator.invoke(&prompt).await {
            Ok(raw) => raw,
            Err(err) => {
                warn!(error = %err, "generator call failed, falling back");
                return (fallback::generate(messages), Some(err.fallback_reason()));
            }
        };

        match parser::parse(&raw) {
            Some(partial) if partial.is_complete() => {
                // The rule-based recap backs any field the sanitizer has to
                // replace; the parse still counts as the primary source.
                let repair_fallback = fallback::generate(messages);
                let recap = sanitize::sanitize(&partial, &repair_fallback);
                // The sanitizer is expected to always validate; a miss still
                // counts as dirty format rather than reaching the caller.
                if recap.is_valid() {
                    debug!(
                        blockers = recap.blockers.len(),
                        actions = recap.actions.len(),
                        "recap parsed from generator output"
                    );
                    (recap, None)
                } else {
                    warn!("sanitized recap failed validation, falling back");
                    (
                        fallback::generate(messages),
                        Some(FallbackReason::DirtyFormat),
                    )
                }
            }
            _ => {
                warn!(
                    raw_chars = raw.chars().count(),
                    "no complete recap in generator output, falling back"
                );
                (
                    fallback::generate(messages),
                    Some(FallbackReason::DirtyFormat),
                )
            }
        }
    }
}
