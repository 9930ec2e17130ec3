use std::sync::OnceLock;

use chrono::{Duration, Utc};
use log::debug;
use regex::Regex;

use crate::models::{Message, Section};
use crate::segmentation::config::SegmentOptions;
use crate::segmentation::topic::detect_topic;

/// Markdown-style heading line, first match anywhere in the content.
fn heading_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?m)^#+\s*(.+)$").unwrap())
}

/// `section:`/`topic:`/`discuss:` label line with trailing text.
fn label_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?mi)^(?:section|topic|discuss)[:\s]+(.+)$").unwrap())
}

/// Main segmentation function: scan messages in order and cut them into
/// sections at boundary triggers.
///
/// At most one section is open at a time. A message starts a new section
/// when any of these fire:
/// - no section is open yet,
/// - the gap since the open section's `end_time` exceeds the configured
///   time gap,
/// - the content contains a section marker,
/// - topic-change detection is on and the detected topic differs from the
///   previous message's (both contents non-empty).
///
/// Otherwise the message is appended to the open section: `end_time` takes
/// the message's timestamp as-is (no clamping) and participants are
/// recomputed over the full membership. The section's topic stays whatever
/// its opening message classified to.
pub fn detect_sections(messages: &[Message], options: &SegmentOptions) -> Vec<Section> {
    // Edge case: empty input
    if messages.is_empty() {
        return Vec::new();
    }

    // Messages without timestamps all resolve to one ingestion instant so
    // gap checks stay deterministic within a run.
    let ingestion_time = Utc::now();

    let lowered_markers: Vec<String> = options
        .section_markers
        .iter()
        .map(|marker| marker.to_lowercase())
        .collect();

    let mut sections: Vec<Section> = Vec::new();
    let mut current: Option<Section> = None;
    let mut counter: u64 = 0;
    let mut prev_content: Option<&str> = None;

    for message in messages {
        let timestamp = message.timestamp.unwrap_or(ingestion_time);

        let start_new = match &current {
            None => true,
            Some(open) => {
                let gap_exceeded =
                    timestamp - open.end_time > Duration::minutes(options.time_gap_minutes);
                let has_marker = contains_marker(&message.content, &lowered_markers);
                let topic_changed = options.detect_topic_changes
                    && prev_content.is_some_and(|prev| {
                        !prev.is_empty()
                            && !message.content.is_empty()
                            && detect_topic(prev) != detect_topic(&message.content)
                    });

                gap_exceeded || has_marker || topic_changed
            }
        };

        let mut stored = message.clone();
        stored.timestamp = Some(timestamp);

        if start_new {
            if let Some(done) = current.take() {
                sections.push(done);
            }

            let id = counter;
            counter += 1;

            // Fallback titles are 1-based while stored ids are 0-based;
            // downstream consumers rely on "Section 1" naming the first one.
            let title = extract_section_title(&message.content)
                .unwrap_or_else(|| format!("Section {}", id + 1));
            let topic = detect_topic(&message.content);
            debug!("opening section {id} ({title:?}, topic {})", topic.as_str());

            let participants = collect_participants(std::slice::from_ref(&stored));
            current = Some(Section {
                id,
                title,
                messages: vec![stored],
                start_time: timestamp,
                end_time: timestamp,
                topic,
                participants,
            });
        } else if let Some(open) = current.as_mut() {
            open.messages.push(stored);
            open.end_time = timestamp;
            open.participants = collect_participants(&open.messages);
        }

        prev_content = Some(message.content.as_str());
    }

    if let Some(done) = current.take() {
        sections.push(done);
    }

    sections
}

/// Case-insensitive substring check. Markers must already be lowercased;
/// `detect_sections` lowers the set once per run.
fn contains_marker(content: &str, lowered_markers: &[String]) -> bool {
    if content.is_empty() {
        return false;
    }
    let lowered = content.to_lowercase();
    lowered_markers
        .iter()
        .any(|marker| lowered.contains(marker.as_str()))
}

/// Best-effort title for a section, from its opening message.
///
/// Preference order: markdown heading line, then a `section:`-style label
/// line, then the first line when it is under 100 characters, then nothing
/// (the caller falls back to `Section {n}`).
pub fn extract_section_title(content: &str) -> Option<String> {
    if let Some(caps) = heading_pattern().captures(content) {
        let title = caps[1].trim();
        if !title.is_empty() {
            return Some(title.to_string());
        }
    }

    if let Some(caps) = label_pattern().captures(content) {
        let title = caps[1].trim();
        if !title.is_empty() {
            return Some(title.to_string());
        }
    }

    let first_line = content.lines().next().unwrap_or("").trim();
    if !first_line.is_empty() && first_line.chars().count() < 100 {
        return Some(first_line.to_string());
    }

    None
}

/// Ordered-unique participant labels over a message list. Each message may
/// carry `author`, `user`, or both.
pub fn collect_participants(messages: &[Message]) -> Vec<String> {
    let mut participants: Vec<String> = Vec::new();
    for message in messages {
        for label in message.participants() {
            if !participants.iter().any(|p| p == label) {
                participants.push(label.to_string());
            }
        }
    }
    participants
}
