//! Generator capability seam
//!
//! The pipeline treats the language model as an abstract capability: prompt
//! in, raw text out, typed failure otherwise. Concrete HTTP clients live in
//! the `rowboat-providers` crate; tests use in-memory fakes.

use crate::error::GeneratorError;
use crate::types::RecapPrompt;

/// An unreliable free-text generator.
///
/// Implementations own their timeout and cancellation behaviour and must
/// resolve to either text or a [`GeneratorError`]; the pipeline never retries.
#[async_trait::async_trait]
pub trait Generator: Send + Sync + std::fmt::Debug {
    /// Invoke the generator with the rendered prompt.
    async fn invoke(&self, prompt: &RecapPrompt) -> Result<String, GeneratorError>;
}
