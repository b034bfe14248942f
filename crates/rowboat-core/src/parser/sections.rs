//! Section-heading heuristic strategy
//!
//! Last resort when the generator produced no JSON object at all: classify
//! each line by a leading label (English or Chinese), bucket labeled lines,
//! and let unlabeled lines continue whichever list was last opened. Labels
//! outside the fixed bilingual set are not recognized; such output fails
//! over to the rule-based fallback by design.

use lazy_static::lazy_static;
use regex::Regex;

use crate::types::PartialRecap;

lazy_static! {
    static ref LIST_MARKER_RE: Regex = Regex::new(r"^[-*•\d.、)）\s]+").unwrap();
    static ref SUMMARY_LABEL_RE: Regex =
        Regex::new(r"(?i)^(summary|status|一句话概括|一句话|当前状态|状态)\s*[:：]?").unwrap();
    static ref BLOCKER_LABEL_RE: Regex =
        Regex::new(r"(?i)^(blockers?|sticking points?|核心卡点|卡点|阻碍)\s*[:：]?").unwrap();
    static ref ACTION_LABEL_RE: Regex =
        Regex::new(r"(?i)^(actions?|next steps?|小动作|行动|明天前可做)\s*[:：]?").unwrap();
    static ref ENCOURAGEMENT_LABEL_RE: Regex =
        Regex::new(r"(?i)^(encouragement|鼓励句|鼓励)\s*[:：]?").unwrap();
}

/// Which list the most recent label opened.
#[derive(Clone, Copy, PartialEq, Eq)]
enum OpenBucket {
    None,
    Blockers,
    Actions,
}

/// Strategy entry point: bucket lines by leading labels.
pub(super) fn parse_labeled_sections(text: &str) -> Option<PartialRecap> {
    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();
    if lines.is_empty() {
        return None;
    }

    let mut partial = PartialRecap::default();
    let mut open = OpenBucket::None;

    for raw_line in lines {
        let line = LIST_MARKER_RE.replace(raw_line, "").trim().to_string();

        if SUMMARY_LABEL_RE.is_match(&line) {
            if let Some(value) = after_colon(&line) {
                partial.summary = value;
            }
            open = OpenBucket::None;
        } else if BLOCKER_LABEL_RE.is_match(&line) {
            if let Some(value) = after_colon(&line) {
                partial.blockers.push(value);
            }
            open = OpenBucket::Blockers;
        } else if ACTION_LABEL_RE.is_match(&line) {
            if let Some(value) = after_colon(&line) {
                partial.actions.push(value);
            }
            open = OpenBucket::Actions;
        } else if ENCOURAGEMENT_LABEL_RE.is_match(&line) {
            partial.encouragement = after_colon(&line).unwrap_or(line);
            open = OpenBucket::None;
        } else {
            match open {
                OpenBucket::Blockers => partial.blockers.push(line),
                OpenBucket::Actions => partial.actions.push(line),
                OpenBucket::None => {}
            }
        }
    }

    Some(partial)
}

/// Text after the first `:` or `：`, if the line has one with content.
fn after_colon(line: &str) -> Option<String> {
    let index = line.find([':', '：'])?;
    let (_, rest) = line.split_at(index);
    let value = rest
        .trim_start_matches([':', '：'])
        .trim();
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}
