//! Data model for the recap pipeline
//!
//! The caller-facing contract lives here: conversation input, the validated
//! [`Recap`] output, and the [`PipelineResult`] envelope. [`PartialRecap`] is
//! the parser's intermediate shape and never crosses the crate boundary.

use serde::{Deserialize, Serialize};

use crate::fallback::rules::{has_action_verb, MAX_ACTION_CHARS};

/// Author of a conversation message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The person talking to the assistant.
    User,
    /// The assistant itself.
    Assistant,
    /// Injected system instructions.
    System,
}

impl Role {
    /// Human-readable label used when rendering transcripts.
    pub fn label(&self) -> &'static str {
        match self {
            Role::User => "User",
            Role::Assistant => "Rowboat",
            Role::System => "System",
        }
    }
}

/// A single immutable message supplied by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationMessage {
    /// Who authored the message.
    pub role: Role,
    /// Raw message text; may be empty or contain arbitrary whitespace.
    pub content: String,
}

impl ConversationMessage {
    /// Build a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    /// Build an assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }

    /// Build a system message.
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }
}

/// The validated recap card - the pipeline's output contract.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Recap {
    /// One summary sentence, trailing punctuation stripped.
    pub summary: String,
    /// 1-2 distinct short blocker sentences.
    pub blockers: Vec<String>,
    /// 1-3 distinct actions, each short and containing an action verb.
    pub actions: Vec<String>,
    /// One encouragement sentence.
    pub encouragement: String,
}

impl Recap {
    /// Check the shape invariant the pipeline guarantees on every output.
    ///
    /// Valid means: non-empty summary and encouragement, 1..=2 blockers,
    /// 1..=3 actions, and every action at most [`MAX_ACTION_CHARS`] chars
    /// with at least one verb from the action vocabulary.
    pub fn is_valid(&self) -> bool {
        if self.summary.trim().is_empty() || self.encouragement.trim().is_empty() {
            return false;
        }
        if self.blockers.is_empty() || self.blockers.len() > 2 {
            return false;
        }
        if self.actions.is_empty() || self.actions.len() > 3 {
            return false;
        }
        self.actions
            .iter()
            .all(|action| action.chars().count() <= MAX_ACTION_CHARS && has_action_verb(action))
    }
}

/// Parser output where any field may still be missing.
///
/// Empty strings and empty vectors mean "not found". A partial recap is only
/// promoted to the primary candidate when every field is populated; otherwise
/// the whole parse attempt counts as failed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartialRecap {
    /// Candidate summary, possibly empty.
    pub summary: String,
    /// Candidate blockers, possibly empty.
    pub blockers: Vec<String>,
    /// Candidate actions, possibly empty.
    pub actions: Vec<String>,
    /// Candidate encouragement, possibly empty.
    pub encouragement: String,
}

impl PartialRecap {
    /// True when every field carries content.
    pub fn is_complete(&self) -> bool {
        !self.summary.trim().is_empty()
            && !self.encouragement.trim().is_empty()
            && !self.blockers.is_empty()
            && !self.actions.is_empty()
    }
}

/// Prompt handed to the generator capability.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecapPrompt {
    /// Fixed system instructions describing the required JSON shape.
    pub system: String,
    /// Bounded, line-numbered transcript of the conversation.
    pub conversation: String,
}

/// Why the pipeline fell back to rule-based generation.
///
/// Diagnostic metadata only; rendering never depends on it. Serializes to the
/// snake_case strings consumed by logging and analytics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FallbackReason {
    /// No generator capability was configured.
    NoAiProvider,
    /// The generator answered but no complete recap could be parsed.
    DirtyFormat,
    /// The generator call exceeded its time budget.
    AiTimeout,
    /// The generator call failed for any other reason.
    AiError,
}

/// Result envelope produced once per [`crate::pipeline::RecapPipeline::run`].
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineResult {
    /// Short human-readable status line; cosmetic only.
    pub message: String,
    /// The validated recap card.
    pub recap: Recap,
    /// Whether the rule-based fallback produced the recap.
    pub used_fallback: bool,
    /// Failure classification when a fallback was taken.
    pub error_type: Option<FallbackReason>,
    /// End-to-end wall time of the run.
    pub latency_ms: u64,
}
