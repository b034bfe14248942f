//! Conversation formatting and prompt construction
//!
//! Renders a message list into a line-numbered, role-labeled transcript
//! bounded to a character budget. When the history is too long we keep the
//! most recent characters rather than dropping whole messages: mid-message
//! cuts are bounded and predictable, whereas message-count truncation can
//! still blow the budget on one oversized message.

use crate::text::normalize_inline;
use crate::types::{ConversationMessage, RecapPrompt};

/// Default character budget for the rendered transcript.
pub const MAX_CONTEXT_CHARS: usize = 3600;

/// Prefix added when older context has been cut away.
pub const TRUNCATION_MARKER: &str = "[earlier conversation truncated]";

/// Fixed system instructions sent with every recap request.
pub const RECAP_SYSTEM_PROMPT: &str = "\
You are Rowboat, a grounded reflection companion. From the transcript, produce a recap card.
Output JSON only, with no commentary before or after it.
The JSON shape must be:
{\"summary\":\"\", \"blockers\":[\"\"], \"actions\":[\"\"], \"encouragement\":\"\"}
Rules:
1) summary is one sentence
2) blockers has 1-2 entries
3) actions has 1-3 entries, each at most 30 characters, each containing an action verb (do/write/send/ask/organize/review/submit/...)
4) encouragement is one sincere sentence in Rowboat's voice, no platitudes";

/// Render the transcript, keeping at most `max_chars` of the most recent text.
///
/// Empty-content messages are dropped. An empty message list yields an empty
/// string, not an error.
pub fn format_transcript(messages: &[ConversationMessage], max_chars: usize) -> String {
    let lines: Vec<String> = messages
        .iter()
        .map(|m| (m.role, normalize_inline(&m.content)))
        .filter(|(_, content)| !content.is_empty())
        .enumerate()
        .map(|(index, (role, content))| format!("{}. {}: {}", index + 1, role.label(), content))
        .collect();

    let full = lines.join("\n");
    let total = full.chars().count();
    if total <= max_chars {
        return full;
    }

    let tail: String = full.chars().skip(total - max_chars).collect();
    format!("{}\n{}", TRUNCATION_MARKER, tail)
}

/// Build the full generator prompt for a conversation.
pub fn build_prompt(messages: &[ConversationMessage], max_chars: usize) -> RecapPrompt {
    RecapPrompt {
        system: RECAP_SYSTEM_PROMPT.to_string(),
        conversation: format_transcript(messages, max_chars),
    }
}
