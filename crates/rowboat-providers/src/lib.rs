//! Rowboat Providers - LLM generator backends for the recap pipeline
//!
//! HTTP clients implementing [`rowboat_core::Generator`] against hosted
//! chat-completion APIs, plus an environment-driven [`ProviderRouter`] that
//! tries configured providers in order and falls through on failure.
//!
//! Every client resolves each invocation into either raw text or a
//! [`rowboat_core::GeneratorError`] within its own timeout; classification
//! and fallback stay in the core pipeline.

#![deny(unsafe_code)]

pub mod anthropic;
pub mod openai_compatible;
pub mod router;

pub use anthropic::AnthropicClient;
pub use openai_compatible::OpenAICompatibleClient;
pub use router::ProviderRouter;
