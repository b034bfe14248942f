//! Shape repair for parsed recaps
//!
//! Takes a complete [`PartialRecap`] and forces it into the output contract.
//! The policy is repair over reject: a fixable field is trimmed, verbed, or
//! truncated rather than discarded, and a field that empties out entirely is
//! replaced from the rule-based fallback recap. Sanitization is total and
//! cannot fail.

use lazy_static::lazy_static;
use regex::Regex;

use crate::fallback::rules::{has_action_verb, MAX_ACTION_CHARS};
use crate::text::{normalize_sentence, truncate};
use crate::types::{PartialRecap, Recap};

lazy_static! {
    // Leading ordinal or bullet markers: "1. ", "2)", "- ", "• ".
    static ref ACTION_MARKER_RE: Regex = Regex::new(r"^(\d+[.)、）]\s*|[-*•]\s*)+").unwrap();
}

/// Force a parsed recap into the output contract.
///
/// `fallback` supplies the substitute for any field that normalizes to
/// nothing; it is expected to already satisfy the recap invariant, which the
/// rule-based generator guarantees by construction.
pub fn sanitize(partial: &PartialRecap, fallback: &Recap) -> Recap {
    let mut summary = normalize_sentence(&partial.summary);
    if summary.is_empty() {
        summary = fallback.summary.clone();
    }

    let mut encouragement = normalize_sentence(&partial.encouragement);
    if encouragement.is_empty() {
        encouragement = fallback.encouragement.clone();
    }

    Recap {
        summary,
        blockers: sanitize_blockers(&partial.blockers, &fallback.blockers),
        actions: sanitize_actions(&partial.actions, &fallback.actions),
        encouragement,
    }
}

fn sanitize_blockers(blockers: &[String], fallback: &[String]) -> Vec<String> {
    // Sentence normalization before dedup, so punctuation variants of the
    // same blocker collapse to one entry.
    let mut out: Vec<String> = blockers
        .iter()
        .map(|blocker| normalize_sentence(blocker))
        .filter(|blocker| !blocker.is_empty())
        .collect();
    dedup_keep_order(&mut out);
    out.truncate(2);
    if out.is_empty() {
        out.extend(fallback.iter().take(2).cloned());
    }
    out
}

fn sanitize_actions(actions: &[String], fallback: &[String]) -> Vec<String> {
    let mut out: Vec<String> = actions.iter().filter_map(|a| sanitize_action(a)).collect();
    dedup_keep_order(&mut out);
    out.truncate(3);
    if out.is_empty() {
        // Fallback actions are already compliant; the repair is a no-op but
        // keeps the same path for both sources.
        out.extend(fallback.iter().filter_map(|a| sanitize_action(a)).take(3));
    }
    out
}

/// Repair a single action, or drop it when nothing remains after cleanup.
///
/// A verbless action gets "Do " prepended; an overlong one is truncated. When
/// truncation cuts away the only verb, the verb is re-prepended inside a
/// tighter cut so both halves of the invariant hold at once.
fn sanitize_action(raw: &str) -> Option<String> {
    let normalized = normalize_sentence(raw);
    let mut action = ACTION_MARKER_RE.replace(&normalized, "").trim().to_string();
    if action.is_empty() {
        return None;
    }
    if !has_action_verb(&action) {
        action = format!("Do {action}");
    }
    if action.chars().count() > MAX_ACTION_CHARS {
        action = truncate(&action, MAX_ACTION_CHARS);
        if !has_action_verb(&action) {
            action = format!("Do {}", truncate(&action, MAX_ACTION_CHARS - 3));
        }
    }
    Some(action)
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fallback;

    fn partial(summary: &str, blockers: &[&str], actions: &[&str], enc: &str) -> PartialRecap {
        PartialRecap {
            summary: summary.to_string(),
            blockers: blockers.iter().map(|s| s.to_string()).collect(),
            actions: actions.iter().map(|s| s.to_string()).collect(),
            encouragement: enc.to_string(),
        }
    }

    fn fallback_recap() -> Recap {
        fallback::generate(&[])
    }

    #[test]
    fn well_formed_input_passes_through() {
        let recap = sanitize(
            &partial(
                "A clear week ahead",
                &["One thread is open"],
                &["Write the kickoff note"],
                "Keep rowing",
            ),
            &fallback_recap(),
        );
        assert!(recap.is_valid());
        assert_eq!(recap.summary, "A clear week ahead");
        assert_eq!(recap.actions, vec!["Write the kickoff note"]);
    }

    #[test]
    fn strips_terminal_punctuation_from_summary() {
        let recap = sanitize(
            &partial("Done for today.", &["b"], &["do x"], "e"),
            &fallback_recap(),
        );
        assert_eq!(recap.summary, "Done for today");
    }

    #[test]
    fn normalizes_encouragement_and_collapses_punctuation_variant_blockers() {
        let recap = sanitize(
            &partial(
                "s",
                &["Thread open.", "Thread open"],
                &["do x"],
                "Keep rowing。",
            ),
            &fallback_recap(),
        );
        assert_eq!(recap.encouragement, "Keep rowing");
        assert_eq!(recap.blockers, vec!["Thread open"]);
    }

    #[test]
    fn strips_leading_list_markers_from_actions() {
        let recap = sanitize(
            &partial("s", &["b"], &["1. write one page", "- ask for review"], "e"),
            &fallback_recap(),
        );
        assert_eq!(recap.actions, vec!["write one page", "ask for review"]);
    }

    #[test]
    fn prepends_verb_to_verbless_action() {
        let recap = sanitize(
            &partial("s", &["b"], &["the kickoff note"], "e"),
            &fallback_recap(),
        );
        assert_eq!(recap.actions, vec!["Do the kickoff note"]);
        assert!(recap.is_valid());
    }

    #[test]
    fn truncates_overlong_action() {
        let recap = sanitize(
            &partial(
                "s",
                &["b"],
                &["write the full project retrospective document tonight"],
                "e",
            ),
            &fallback_recap(),
        );
        assert!(recap.actions[0].chars().count() <= MAX_ACTION_CHARS);
        assert!(recap.actions[0].starts_with("write"));
        assert!(recap.is_valid());
    }

    #[test]
    fn reprepends_verb_when_truncation_cuts_it_away() {
        // The only verb sits past the cut point.
        let recap = sanitize(
            &partial(
                "s",
                &["b"],
                &["a very long preamble before we finally write"],
                "e",
            ),
            &fallback_recap(),
        );
        assert!(recap.is_valid());
        assert!(has_action_verb(&recap.actions[0]));
        assert!(recap.actions[0].chars().count() <= MAX_ACTION_CHARS);
    }

    #[test]
    fn dedups_and_caps_lists() {
        let recap = sanitize(
            &partial(
                "s",
                &["same", "same", "other", "third"],
                &["do a", "do a", "do b", "do c", "do d"],
                "e",
            ),
            &fallback_recap(),
        );
        assert_eq!(recap.blockers, vec!["same", "other"]);
        assert_eq!(recap.actions, vec!["do a", "do b", "do c"]);
    }

    #[test]
    fn substitutes_from_fallback_when_everything_normalizes_to_nothing() {
        let fallback = fallback_recap();
        let recap = sanitize(&partial("...", &["  "], &["\t"], " "), &fallback);
        assert!(recap.is_valid());
        assert_eq!(recap.summary, fallback.summary);
        assert_eq!(recap.blockers, fallback.blockers);
        assert_eq!(recap.actions, fallback.actions);
        assert_eq!(recap.encouragement, fallback.encouragement);
    }
}
