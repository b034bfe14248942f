//! JSON extraction strategy
//!
//! Finds candidate JSON substrings (fenced blocks first, then the outermost
//! brace span), tolerant-repairs each one, and reads recap fields from the
//! first candidate that parses into an object. Field names are matched
//! against declarative alias tables because generators rename keys freely.

use lazy_static::lazy_static;
use regex::Regex;
use serde_json::{Map, Value};

use crate::types::PartialRecap;

lazy_static! {
    static ref FENCED_BLOCK_RE: Regex = Regex::new(r"(?is)```(?:json)?\s*(.*?)```").unwrap();
    static ref TRAILING_COMMA_RE: Regex = Regex::new(r",\s*([}\]])").unwrap();
    static ref LIST_DELIMITER_RE: Regex = Regex::new(r"[|｜\n,，;；]").unwrap();
}

/// Accepted key aliases per field, checked in priority order. The canonical
/// name comes first, then natural-language labels generators are known to
/// substitute, in English and Chinese.
const SUMMARY_ALIASES: &[&str] = &[
    "summary",
    "status",
    "one_line_summary",
    "当前状态",
    "一句话概括",
    "一句话",
];
const BLOCKER_ALIASES: &[&str] = &[
    "blockers",
    "blocker",
    "sticking_points",
    "核心卡点",
    "卡点",
    "阻碍",
];
const ACTION_ALIASES: &[&str] = &[
    "actions",
    "action",
    "next_steps",
    "小动作",
    "行动",
    "明天前行动",
];
const ENCOURAGEMENT_ALIASES: &[&str] = &["encouragement", "encourage", "鼓励句", "鼓励"];

/// Extract candidate JSON substrings, fenced blocks before the brace span.
///
/// Fenced blocks are preferred because an explicitly marked block beats
/// whatever braces happen to appear in surrounding prose.
pub fn extract_json_candidates(text: &str) -> Vec<String> {
    let mut candidates = Vec::new();

    for capture in FENCED_BLOCK_RE.captures_iter(text) {
        if let Some(block) = capture.get(1) {
            let block = block.as_str().trim();
            if !block.is_empty() {
                candidates.push(block.to_string());
            }
        }
    }

    if let (Some(first), Some(last)) = (text.find('{'), text.rfind('}')) {
        if last > first {
            candidates.push(text[first..=last].to_string());
        }
    }

    // Order-preserving global dedup; with several fenced blocks a duplicate
    // is not necessarily adjacent.
    let mut unique = Vec::with_capacity(candidates.len());
    for candidate in candidates {
        if !unique.contains(&candidate) {
            unique.push(candidate);
        }
    }
    unique
}

/// Repair the common ways generators break strict JSON: smart quotes and
/// trailing commas before a closing brace or bracket.
fn repair_json(input: &str) -> String {
    let straightened: String = input
        .chars()
        .map(|ch| match ch {
            '“' | '”' => '"',
            '‘' | '’' => '\'',
            other => other,
        })
        .collect();
    TRAILING_COMMA_RE
        .replace_all(&straightened, "${1}")
        .into_owned()
}

/// Strategy entry point: first candidate that parses into an object wins.
pub(super) fn parse_json_object(text: &str) -> Option<PartialRecap> {
    for candidate in extract_json_candidates(text) {
        let repaired = repair_json(&candidate);
        if let Ok(Value::Object(object)) = serde_json::from_str::<Value>(&repaired) {
            return Some(extract_fields(&object));
        }
    }
    None
}

fn extract_fields(object: &Map<String, Value>) -> PartialRecap {
    PartialRecap {
        summary: pick_first_string(object, SUMMARY_ALIASES),
        blockers: pick_first_list(object, BLOCKER_ALIASES),
        actions: pick_first_list(object, ACTION_ALIASES),
        encouragement: pick_first_string(object, ENCOURAGEMENT_ALIASES),
    }
}

fn pick_first_string(object: &Map<String, Value>, aliases: &[&str]) -> String {
    for key in aliases {
        if let Some(Value::String(text)) = object.get(*key) {
            let trimmed = text.trim();
            if !trimmed.is_empty() {
                return trimmed.to_string();
            }
        }
    }
    String::new()
}

/// Read a list-valued field, accepting either a native array of strings or a
/// single delimiter-separated string.
fn pick_first_list(object: &Map<String, Value>, aliases: &[&str]) -> Vec<String> {
    for key in aliases {
        match object.get(*key) {
            Some(Value::Array(items)) => {
                let list: Vec<String> = items
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::trim)
                    .filter(|item| !item.is_empty())
                    .map(str::to_string)
                    .collect();
                if !list.is_empty() {
                    return list;
                }
            }
            Some(Value::String(text)) => {
                let list: Vec<String> = LIST_DELIMITER_RE
                    .split(text)
                    .map(str::trim)
                    .filter(|item| !item.is_empty())
                    .map(str::to_string)
                    .collect();
                if !list.is_empty() {
                    return list;
                }
            }
            _ => {}
        }
    }
    Vec::new()
}
