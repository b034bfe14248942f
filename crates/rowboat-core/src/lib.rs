//! Rowboat Core - Resilient structured recap extraction
//!
//! Rowboat turns a free-form conversation plus an unreliable language-model
//! generator into a strictly-shaped "recap card": one summary sentence, 1-2
//! blockers, 1-3 short actions, one encouragement line. The generator may be
//! absent, time out, or answer in any format it likes; the pipeline still
//! returns a validated [`types::Recap`], never an error.
//!
//! # Architecture
//!
//! The pipeline is a straight line with a safety net under every stage:
//!
//! 1. **Transcript** (`transcript`): bounded, line-numbered prompt rendering
//! 2. **Parser** (`parser`): ordered extraction strategies over raw output
//! 3. **Sanitizer** (`sanitize`): shape repair that cannot fail
//! 4. **Fallback** (`fallback`): rule-based recap synthesis with no generator
//! 5. **Pipeline** (`pipeline`): orchestration, failure taxonomy, latency
//!
//! # Quick Start
//!
//! ```
//! use rowboat_core::pipeline::RecapPipeline;
//! use rowboat_core::types::ConversationMessage;
//!
//! # let rt = tokio::runtime::Builder::new_current_thread().build().unwrap();
//! # rt.block_on(async {
//! let messages = vec![
//!     ConversationMessage::assistant("How has the week been?"),
//!     ConversationMessage::user("Too many deadlines, I can't fit it all in."),
//! ];
//!
//! // No generator configured: the rule-based fallback still produces a
//! // complete, valid recap.
//! let pipeline = RecapPipeline::new(None);
//! let result = pipeline.run(&messages).await;
//! assert!(result.recap.is_valid());
//! assert!(result.used_fallback);
//! # });
//! ```
//!
//! # Design Principles
//!
//! 1. **Always valid**: no input reaches the caller as a malformed recap
//! 2. **Repair over reject**: fixable generator output is salvaged, not dropped
//! 3. **Stateless**: every run is request-scoped, no shared mutable state
//! 4. **Declarative tables**: field aliases, rules, and the verb vocabulary
//!    are immutable configuration, not conditionals

#![deny(unsafe_code)]
#![warn(
    missing_docs,
    rust_2018_idioms,
    missing_debug_implementations,
    clippy::all
)]

pub mod error;
pub mod fallback;
pub mod generator;
pub mod parser;
pub mod pipeline;
pub mod sanitize;
pub mod text;
pub mod transcript;
pub mod types;

pub use error::GeneratorError;
pub use fallback::rules::{has_action_verb, MAX_ACTION_CHARS};
pub use generator::Generator;
pub use pipeline::{PipelineConfig, RecapPipeline};
pub use types::{ConversationMessage, FallbackReason, PipelineResult, Recap, RecapPrompt, Role};
