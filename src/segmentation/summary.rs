use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{Section, Topic};

/// Frequency of one topic label across a section list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TopicCount {
    pub topic: Topic,
    pub count: usize,
}

/// Span between the first section's start and the last section's end, in
/// several display units. Hours keep two decimals as a string.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DurationStats {
    pub milliseconds: i64,
    pub seconds: i64,
    pub minutes: i64,
    pub hours: String,
}

/// Aggregate statistics over a finished section list.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionSummary {
    pub total_sections: usize,
    pub total_messages: usize,
    /// Formatted to two decimals; `"0.00"` for an empty section list.
    pub average_messages_per_section: String,
    /// Sorted descending by count; ties keep first-seen order.
    pub topics: Vec<TopicCount>,
    pub participants: Vec<String>,
    pub duration: Option<DurationStats>,
}

impl SectionSummary {
    fn empty() -> Self {
        Self {
            total_sections: 0,
            total_messages: 0,
            average_messages_per_section: "0.00".to_string(),
            topics: Vec::new(),
            participants: Vec::new(),
            duration: None,
        }
    }
}

/// Pure aggregation pass over a finished section list.
///
/// Duration is taken from the first and last sections of the list as given;
/// the input is not re-sorted by time.
pub fn generate_section_summary(sections: &[Section]) -> SectionSummary {
    if sections.is_empty() {
        return SectionSummary::empty();
    }

    let total_sections = sections.len();
    let total_messages: usize = sections.iter().map(|s| s.message_count()).sum();
    let average = total_messages as f64 / total_sections as f64;

    let mut topics: Vec<TopicCount> = Vec::new();
    for section in sections {
        match topics.iter_mut().find(|t| t.topic == section.topic) {
            Some(entry) => entry.count += 1,
            None => topics.push(TopicCount {
                topic: section.topic,
                count: 1,
            }),
        }
    }
    // sort_by is stable, so equal counts keep first-seen order
    topics.sort_by(|a, b| b.count.cmp(&a.count));

    let mut participants: Vec<String> = Vec::new();
    for section in sections {
        for label in &section.participants {
            if !participants.contains(label) {
                participants.push(label.clone());
            }
        }
    }

    let first = &sections[0];
    let last = &sections[total_sections - 1];
    let duration = Some(duration_stats(first.start_time, last.end_time));

    SectionSummary {
        total_sections,
        total_messages,
        average_messages_per_section: format!("{average:.2}"),
        topics,
        participants,
        duration,
    }
}

fn duration_stats(start: DateTime<Utc>, end: DateTime<Utc>) -> DurationStats {
    let milliseconds = (end - start).num_milliseconds();
    let seconds = (milliseconds as f64 / 1000.0).round() as i64;
    let minutes = (milliseconds as f64 / 60_000.0).round() as i64;
    let hours = milliseconds as f64 / 3_600_000.0;
    DurationStats {
        milliseconds,
        seconds,
        minutes,
        hours: format!("{hours:.2}"),
    }
}
