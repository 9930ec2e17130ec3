use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::models::Message;

/// Closed vocabulary of topic labels the classifier can assign.
///
/// Variant order matters: it is the tie-break order when two topics score
/// the same keyword count, so it must stay in sync with the keyword table
/// in `segmentation::topic`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Topic {
    Technical,
    Question,
    Discussion,
    Planning,
    Feedback,
    General,
}

impl Topic {
    pub fn as_str(&self) -> &'static str {
        match self {
            Topic::Technical => "technical",
            Topic::Question => "question",
            Topic::Discussion => "discussion",
            Topic::Planning => "planning",
            Topic::Feedback => "feedback",
            Topic::General => "general",
        }
    }
}

/// A contiguous run of messages judged to belong to one topical unit.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    /// Sequential 0-based id, unique within one segmentation run.
    pub id: u64,
    pub title: String,
    pub messages: Vec<Message>,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    /// Assigned once from the section's opening message, never recomputed
    /// as later messages are appended.
    pub topic: Topic,
    /// Ordered-unique participant labels, recomputed on every append.
    pub participants: Vec<String>,
}

impl Section {
    pub fn duration(&self) -> Duration {
        self.end_time - self.start_time
    }

    pub fn message_count(&self) -> usize {
        self.messages.len()
    }
}
