//! Error types for the recap pipeline
//!
//! The pipeline itself never fails outward; the only typed failures belong to
//! the generator capability, and each of them maps onto a
//! [`FallbackReason`] that the orchestrator records as diagnostic metadata.

use thiserror::Error;

use crate::types::FallbackReason;

/// Failure signalled by a generator capability.
///
/// Providers must resolve every invocation into either raw text or one of
/// these variants within their own time budget; the pipeline performs no
/// retries and no cancellation of its own.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GeneratorError {
    /// The call exceeded the provider's time budget.
    #[error("generator timed out after {budget_ms}ms")]
    Timeout {
        /// The budget that was exceeded, in milliseconds.
        budget_ms: u64,
    },

    /// Any other transport, protocol, or service failure.
    #[error("generator unavailable: {0}")]
    Service(String),
}

impl GeneratorError {
    /// Classify this failure for the result envelope.
    pub fn fallback_reason(&self) -> FallbackReason {
        match self {
            GeneratorError::Timeout { .. } => FallbackReason::AiTimeout,
            GeneratorError::Service(_) => FallbackReason::AiError,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timeout_classifies_as_ai_timeout() {
        let err = GeneratorError::Timeout { budget_ms: 30_000 };
        assert_eq!(err.fallback_reason(), FallbackReason::AiTimeout);
        assert!(err.to_string().contains("30000ms"));
    }

    #[test]
    fn service_failure_classifies_as_ai_error() {
        let err = GeneratorError::Service("HTTP 502".to_string());
        assert_eq!(err.fallback_reason(), FallbackReason::AiError);
    }
}
