//! Rule-based recap synthesis
//!
//! The safety net under the whole pipeline: given only the conversation, with
//! no generator at all, produce a complete recap that satisfies the output
//! contract. Topic rules pick relevant blocker and action pools; random
//! draws keep repeated fallbacks from reading identically.

pub mod rules;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::text::{normalize_inline, truncate};
use crate::types::{ConversationMessage, Recap, Role};

use rules::{ENCOURAGEMENT, GENERIC_ACTIONS, GENERIC_BLOCKERS, RULES};

/// Topic excerpts in the summary are cut to this many characters.
const MAX_TOPIC_CHARS: usize = 18;

/// Synthesize a complete recap from the conversation alone.
///
/// Matching runs over the concatenated user messages; at most two topic rules
/// contribute, and generic pools fill in when nothing matches. The result is
/// valid by construction.
pub fn generate(messages: &[ConversationMessage]) -> Recap {
    let mut rng = rand::thread_rng();
    generate_with(messages, &mut rng)
}

/// Same as [`generate`], but with a caller-supplied source of randomness.
pub fn generate_with<R: Rng>(messages: &[ConversationMessage], rng: &mut R) -> Recap {
    let user_texts: Vec<String> = messages
        .iter()
        .filter(|m| m.role == Role::User)
        .map(|m| normalize_inline(&m.content))
        .filter(|text| !text.is_empty())
        .collect();
    let merged = user_texts.join(" ");
    let latest = user_texts.last().cloned().unwrap_or_default();

    let mut blockers = Vec::new();
    let mut actions = Vec::new();
    for rule in RULES.iter() {
        if blockers.len() >= 2 {
            break;
        }
        if rule.pattern.is_match(&merged) {
            blockers.push(pick(rng, rule.blockers));
            actions.push(pick(rng, rule.actions));
        }
    }
    dedup_keep_order(&mut blockers);
    dedup_keep_order(&mut actions);

    if blockers.is_empty() {
        blockers.push(pick(rng, GENERIC_BLOCKERS));
    }
    if actions.is_empty() {
        actions.push(pick(rng, GENERIC_ACTIONS));
    }

    Recap {
        summary: summary_for(&latest),
        blockers,
        actions,
        encouragement: ENCOURAGEMENT.to_string(),
    }
}

fn summary_for(latest_user_text: &str) -> String {
    if latest_user_text.is_empty() {
        return "You're working to put the problem into words and take one step forward"
            .to_string();
    }
    let topic = truncate(latest_user_text, MAX_TOPIC_CHARS);
    format!("You've been circling \"{topic}\" and have started to untangle it")
}

fn pick<R: Rng>(rng: &mut R, pool: &'static [&'static str]) -> String {
    pool.choose(rng).copied().unwrap_or_default().to_string()
}

fn dedup_keep_order(items: &mut Vec<String>) {
    let mut seen = Vec::with_capacity(items.len());
    items.retain(|item| {
        if seen.contains(item) {
            false
        } else {
            seen.push(item.clone());
            true
        }
    });
}
