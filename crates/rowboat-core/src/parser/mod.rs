//! Multi-strategy parser for raw generator output
//!
//! Strategies run in strict priority order and the first one to yield any
//! object-shaped result wins, even if fields are missing - completeness is
//! judged later by the orchestrator. Keeping each strategy as a plain
//! function consumed by one first-success loop keeps them independently
//! testable.

mod json;
mod sections;

use crate::types::PartialRecap;

pub use json::extract_json_candidates;

/// A single extraction strategy over normalized raw text.
type Strategy = fn(&str) -> Option<PartialRecap>;

/// Ordered strategy table: explicit JSON first, section heuristics last.
const STRATEGIES: &[Strategy] = &[json::parse_json_object, sections::parse_labeled_sections];

/// Parse raw generator output into a partial recap, if any strategy applies.
///
/// Returns `None` for blank input or when no strategy recognizes anything at
/// all; the caller treats both the same as an incomplete parse.
pub fn parse(raw: &str) -> Option<PartialRecap> {
    let text = raw.replace("\r\n", "\n");
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    STRATEGIES.iter().find_map(|strategy| strategy(text))
}
