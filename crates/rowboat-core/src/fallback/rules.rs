//! Declarative tables driving the rule-based fallback
//!
//! Topic rules pair a detection pattern with hand-written blocker and action
//! pools. Every pooled action is valid by construction: at most
//! [`MAX_ACTION_CHARS`] characters and carrying a verb from the action
//! vocabulary, so fallback output never needs repair.

use lazy_static::lazy_static;
use regex::Regex;

/// Maximum length of a single action, in characters.
pub const MAX_ACTION_CHARS: usize = 30;

lazy_static! {
    static ref ACTION_VERB_RE: Regex = Regex::new(
        r"(?i)\b(do|write|send|ask|organize|review|submit|list|contact|confirm|schedule|try|complete|check|communicate|plan|pick|set)\b",
    )
    .unwrap();
}

/// True when the text contains at least one verb from the action vocabulary.
pub fn has_action_verb(text: &str) -> bool {
    ACTION_VERB_RE.is_match(text)
}

/// A topic rule: a detection pattern over user text plus curated pools.
pub(crate) struct RecapRule {
    /// Matches user messages that touch this topic, in English or Chinese.
    pub pattern: Regex,
    /// Blocker candidates; one is drawn at random per match.
    pub blockers: &'static [&'static str],
    /// Action candidates; one is drawn at random per match.
    pub actions: &'static [&'static str],
}

impl std::fmt::Debug for RecapRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecapRule")
            .field("pattern", &self.pattern.as_str())
            .finish()
    }
}

lazy_static! {
    /// Topic rules in priority order. Matching stops once two topics hit.
    pub(crate) static ref RULES: Vec<RecapRule> = vec![
        // Lost direction
        RecapRule {
            pattern: Regex::new(
                r"(?i)(don't know (what|where)|not sure (what|where)|no direction|which (way|path)|feel(ing)? lost|aimless|迷茫|没有方向|不知道该)",
            )
            .unwrap(),
            blockers: &[
                "The goal is still too fuzzy to act on",
                "Too many directions competing at once",
            ],
            actions: &[
                "List 3 paths and 1 step each",
                "Write the goal in one line",
                "Ask one person for their view",
            ],
        },
        // Procrastination
        RecapRule {
            pattern: Regex::new(
                r"(?i)(procrastinat|keep putting (it )?off|can't (get )?start|cannot start|haven't started|avoid(ing)? it|拖延|开始不了|一直没做)",
            )
            .unwrap(),
            blockers: &[
                "Starting feels heavier than doing",
                "The first step is still undefined",
            ],
            actions: &[
                "Do one 25-minute starter task",
                "Set a 10-minute timer and start",
                "Pick the smallest piece first",
            ],
        },
        // Anxiety
        RecapRule {
            pattern: Regex::new(
                r"(?i)(anxious|anxiety|worried|worry|afraid|scared|panic|overthink|焦虑|担心|害怕|紧张)",
            )
            .unwrap(),
            blockers: &[
                "Worry is arriving before the facts",
                "The worst case is taking up all the room",
            ],
            actions: &[
                "Write the worry down in full",
                "List what is in your control",
                "Do one 5-minute calming reset",
            ],
        },
        // Overload / no time
        RecapRule {
            pattern: Regex::new(
                r"(?i)(no time|too busy|too many (tasks|things)|deadline|overloaded|can't fit|cannot fit|swamped|backlog|没时间|太忙|忙不过来)",
            )
            .unwrap(),
            blockers: &[
                "Everything is competing for the same hours",
                "The week has no protected focus time",
            ],
            actions: &[
                "List tomorrow's top 3 tasks",
                "Plan tomorrow in time blocks",
                "Ask to move one deadline",
            ],
        },
        // Interpersonal friction
        RecapRule {
            pattern: Regex::new(
                r"(?i)(my (boss|manager|coworker|teammate|partner|friend)|conflict|argument|awkward|hard conversation|misunderst|同事|老板|吵架|沟通|关系)",
            )
            .unwrap(),
            blockers: &[
                "The hard conversation keeps sliding",
                "Expectations were never said out loud",
            ],
            actions: &[
                "Ask one question to confirm",
                "Send a short honest message",
                "Write the first sentence only",
            ],
        },
    ];
}

/// Blockers used when no topic rule matches.
pub(crate) const GENERIC_BLOCKERS: &[&str] = &[
    "The next step is not yet concrete",
    "Energy and clarity are both low today",
];

/// Actions used when no topic rule matches. The first entry doubles as the
/// sanitizer's last-resort substitute for an unrepairable action.
pub(crate) const GENERIC_ACTIONS: &[&str] = &[
    "Do one small 10-minute task",
    "Write down a single next step",
];

/// Fixed encouragement line. Kept invariant: topic-specific generation adds
/// more noise than value in this one field.
pub(crate) const ENCOURAGEMENT: &str =
    "One small stroke at a time; the water widens as you row";
