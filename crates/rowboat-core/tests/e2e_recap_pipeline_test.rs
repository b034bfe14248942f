//! End-to-end pipeline tests
//!
//! Drives the full pipeline through scripted generators covering every
//! outcome a caller can observe: clean output, each failure classification,
//! repairable output, and long conversations.

use std::sync::Arc;

use rowboat_core::{
    ConversationMessage, FallbackReason, Generator, GeneratorError, RecapPipeline, RecapPrompt,
};

#[derive(Debug)]
struct ScriptedGenerator {
    response: Result<String, GeneratorError>,
}

impl ScriptedGenerator {
    fn ok(raw: &str) -> Arc<dyn Generator> {
        Arc::new(Self {
            response: Ok(raw.to_string()),
        })
    }

    fn err(err: GeneratorError) -> Arc<dyn Generator> {
        Arc::new(Self { response: Err(err) })
    }
}

#[async_trait::async_trait]
impl Generator for ScriptedGenerator {
    async fn invoke(&self, _prompt: &RecapPrompt) -> Result<String, GeneratorError> {
        self.response.clone()
    }
}

fn short_conversation() -> Vec<ConversationMessage> {
    vec![
        ConversationMessage::assistant("How has the week been treating you?"),
        ConversationMessage::user("Too many deadlines, I can't fit it all in."),
        ConversationMessage::assistant("Which one is weighing the most?"),
        ConversationMessage::user("The launch. I keep putting it off."),
    ]
}

#[tokio::test]
async fn clean_json_produces_normalized_recap() {
    let raw = r#"Here is your card:
```json
{
  "summary": "The launch is crowding out everything else.",
  "blockers": ["Deadlines are stacked in the same week"],
  "actions": ["List tomorrow's top 3 tasks", "Ask to move one deadline"],
  "encouragement": "You already named the hard part"
}
```"#;
    let pipeline = RecapPipeline::new(Some(ScriptedGenerator::ok(raw)));
    let result = pipeline.run(&short_conversation()).await;

    assert!(!result.used_fallback);
    assert_eq!(result.error_type, None);
    assert_eq!(result.message, "Recap card ready");
    // Terminal punctuation stripped from the summary.
    assert_eq!(result.recap.summary, "The launch is crowding out everything else");
    assert_eq!(result.recap.actions.len(), 2);
    assert!(result.recap.is_valid());
}

#[tokio::test]
async fn messy_but_repairable_output_is_salvaged() {
    // Smart quotes, a trailing comma, a verbless action, an overlong action.
    let raw = "{“summary”: “Holding steady.”, “blockers”: [“The plan is vague”],
        “actions”: [“the kickoff note”, “write the full retrospective for the quarter tonight”,],
        “encouragement”: “Keep rowing”}";
    let pipeline = RecapPipeline::new(Some(ScriptedGenerator::ok(raw)));
    let result = pipeline.run(&short_conversation()).await;

    assert!(!result.used_fallback);
    assert!(result.recap.is_valid());
    assert_eq!(result.recap.actions[0], "Do the kickoff note");
    assert!(result.recap.actions[1].chars().count() <= 30);
}

#[tokio::test]
async fn labeled_sections_parse_without_json() {
    let raw = "Summary: the launch has taken over the week
Blockers:
- deadlines are stacked together
Actions:
- write a one-line launch plan
Encouragement: one clean step is enough for today";
    let pipeline = RecapPipeline::new(Some(ScriptedGenerator::ok(raw)));
    let result = pipeline.run(&short_conversation()).await;

    assert!(!result.used_fallback);
    assert_eq!(result.recap.summary, "the launch has taken over the week");
    assert!(result.recap.is_valid());
}

#[tokio::test]
async fn missing_generator_falls_back_as_no_ai_provider() {
    let pipeline = RecapPipeline::new(None);
    let result = pipeline.run(&short_conversation()).await;

    assert!(result.used_fallback);
    assert_eq!(result.error_type, Some(FallbackReason::NoAiProvider));
    assert_eq!(result.message, "Recap card ready (safe mode)");
    assert!(result.recap.is_valid());
}

#[tokio::test]
async fn prose_output_falls_back_as_dirty_format() {
    let raw = "It sounds like a heavy week. Be kind to yourself and rest well tonight.";
    let pipeline = RecapPipeline::new(Some(ScriptedGenerator::ok(raw)));
    let result = pipeline.run(&short_conversation()).await;

    assert!(result.used_fallback);
    assert_eq!(result.error_type, Some(FallbackReason::DirtyFormat));
    assert!(result.recap.is_valid());
    // The fallback keyed off the conversation: "keep putting it off" fires
    // the procrastination rule first, "deadlines"/"can't fit" the overload
    // rule second, so the blockers come from those two pools in that order.
    let procrastination_pool = [
        "Starting feels heavier than doing",
        "The first step is still undefined",
    ];
    let overload_pool = [
        "Everything is competing for the same hours",
        "The week has no protected focus time",
    ];
    assert_eq!(result.recap.blockers.len(), 2);
    assert!(procrastination_pool.contains(&result.recap.blockers[0].as_str()));
    assert!(overload_pool.contains(&result.recap.blockers[1].as_str()));
}

#[tokio::test]
async fn timeout_falls_back_as_ai_timeout() {
    let pipeline = RecapPipeline::new(Some(ScriptedGenerator::err(GeneratorError::Timeout {
        budget_ms: 30_000,
    })));
    let result = pipeline.run(&short_conversation()).await;

    assert!(result.used_fallback);
    assert_eq!(result.error_type, Some(FallbackReason::AiTimeout));
    assert!(result.recap.is_valid());
}

#[tokio::test]
async fn service_failure_falls_back_as_ai_error() {
    let pipeline = RecapPipeline::new(Some(ScriptedGenerator::err(GeneratorError::Service(
        "connection refused".to_string(),
    ))));
    let result = pipeline.run(&short_conversation()).await;

    assert!(result.used_fallback);
    assert_eq!(result.error_type, Some(FallbackReason::AiError));
    assert!(result.recap.is_valid());
}

#[tokio::test]
async fn long_conversation_still_produces_valid_recap() {
    let mut messages = Vec::new();
    for i in 0..70 {
        messages.push(ConversationMessage::assistant(format!(
            "Checking in on round {i}, what changed since last time?"
        )));
        messages.push(ConversationMessage::user(format!(
            "Round {i}: still too busy, the backlog keeps growing and growing."
        )));
    }
    let pipeline = RecapPipeline::new(None);
    let result = pipeline.run(&messages).await;

    assert!(result.recap.is_valid());
    assert!(result.used_fallback);
}

#[tokio::test]
async fn result_envelope_serializes_for_callers() {
    let pipeline = RecapPipeline::new(None);
    let result = pipeline.run(&short_conversation()).await;
    let value = serde_json::to_value(&result).unwrap();

    assert_eq!(value["usedFallback"], true);
    assert_eq!(value["errorType"], "no_ai_provider");
    assert!(value["latencyMs"].is_u64());
    assert!(value["recap"]["summary"].is_string());
}
