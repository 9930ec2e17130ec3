//! Keyword-frequency topic classifier.
//!
//! Deliberately simple: no stemming, no semantics, just substring hits
//! against a fixed keyword table. The table order doubles as the tie-break
//! order, so entries must not be reordered.

use crate::models::Topic;

/// Keyword table, scanned in order. Each keyword counts at most once per
/// message regardless of repetition.
const TOPIC_KEYWORDS: [(Topic, &[&str]); 5] = [
    (
        Topic::Technical,
        &["code", "bug", "error", "function", "variable", "debug", "implement", "deploy"],
    ),
    (
        Topic::Question,
        &["what", "how", "why", "when", "where", "?"],
    ),
    (
        Topic::Discussion,
        &["think", "opinion", "discuss", "consider", "suggest", "propose"],
    ),
    (
        Topic::Planning,
        &["plan", "schedule", "deadline", "milestone", "timeline", "sprint"],
    ),
    (
        Topic::Feedback,
        &["feedback", "review", "comment", "suggestion", "improve", "better"],
    ),
];

/// Classify message content into one topic label.
///
/// The topic with the strictly highest keyword count wins; on a tie the
/// earlier table entry keeps the slot. Zero hits (or empty content) maps
/// to [`Topic::General`].
pub fn detect_topic(content: &str) -> Topic {
    if content.is_empty() {
        return Topic::General;
    }

    let lowered = content.to_lowercase();
    let mut best = Topic::General;
    let mut best_count = 0usize;

    for (topic, keywords) in TOPIC_KEYWORDS {
        let count = keywords.iter().filter(|kw| lowered.contains(*kw)).count();
        if count > best_count {
            best = topic;
            best_count = count;
        }
    }

    best
}
