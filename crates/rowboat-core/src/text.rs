//! Text normalization primitives
//!
//! Total functions over all strings, including the empty string. Every other
//! component funnels free text through these before making decisions about it.

/// Characters treated as sentence terminators when trimming.
const SENTENCE_TERMINATORS: &[char] = &['.', '!', '?', '。', '！', '？'];

/// Characters trimmed when a truncation leaves a dangling clause boundary.
const DANGLING_PUNCTUATION: &[char] = &[
    ',', '，', '.', '。', '!', '！', '?', '？', '、', ';', '；', ':', '：', ' ',
];

/// Collapse whitespace runs to single spaces, strip control characters, trim.
pub fn normalize_inline(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut pending_space = false;
    for ch in text.chars() {
        if ch.is_whitespace() {
            pending_space = !out.is_empty();
        } else if ch.is_control() {
            continue;
        } else {
            if pending_space {
                out.push(' ');
                pending_space = false;
            }
            out.push(ch);
        }
    }
    out
}

/// Normalize to a single inline sentence with no terminal punctuation.
///
/// Callers re-append their own terminator, so stripping here prevents doubled
/// punctuation like `"done.."`.
pub fn normalize_sentence(text: &str) -> String {
    normalize_inline(text)
        .trim_end_matches(SENTENCE_TERMINATORS)
        .to_string()
}

/// Cut to at most `max_chars` characters, then trim punctuation or spaces
/// left dangling by the cut so the result never ends mid-clause on a comma.
pub fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let cut: String = text.chars().take(max_chars).collect();
    cut.trim_end_matches(DANGLING_PUNCTUATION).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_inline_collapses_whitespace() {
        assert_eq!(normalize_inline("  a \t b\n\nc  "), "a b c");
    }

    #[test]
    fn normalize_inline_strips_control_characters() {
        assert_eq!(normalize_inline("a\u{0000}b\u{0007}c"), "abc");
    }

    #[test]
    fn normalize_inline_handles_empty_input() {
        assert_eq!(normalize_inline(""), "");
        assert_eq!(normalize_inline("   \n\t "), "");
    }

    #[test]
    fn normalize_sentence_strips_terminal_punctuation() {
        assert_eq!(normalize_sentence("Take a breath.."), "Take a breath");
        assert_eq!(normalize_sentence("Really?!"), "Really");
        assert_eq!(normalize_sentence("稳住。"), "稳住");
    }

    #[test]
    fn normalize_sentence_keeps_interior_punctuation() {
        assert_eq!(
            normalize_sentence("First this, then that."),
            "First this, then that"
        );
    }

    #[test]
    fn truncate_short_input_is_identity() {
        assert_eq!(truncate("short", 10), "short");
    }

    #[test]
    fn truncate_trims_dangling_punctuation() {
        // The naive cut would end on ", " mid-clause.
        assert_eq!(truncate("one, two, three", 5), "one");
        assert_eq!(truncate("a, b", 3), "a");
    }

    #[test]
    fn truncate_counts_characters_not_bytes() {
        let text = "你好世界你好世界";
        assert_eq!(truncate(text, 4), "你好世界");
    }

    #[test]
    fn truncate_empty_input() {
        assert_eq!(truncate("", 5), "");
    }
}
