//! Chat message data model.
//!
//! A `Message` is the unit of input for the whole pipeline: the raw-text
//! parser produces them and the segmenter consumes them. Captured messages
//! arrive from outside with whatever fields the capture layer managed to
//! scrape, so everything except `content` is optional.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single chat message in a time-ordered transcript.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Missing timestamps are resolved to the wall clock by the segmenter.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(default)]
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    /// Alternate participant field; some capture sources fill this instead
    /// of `author`. Both count toward a section's participants.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<String>,
    /// Raw segment text before author stripping, kept by the parser when
    /// `preserve_formatting` is on.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_content: Option<String>,
}

impl Message {
    /// Participant labels carried by this message, in field order.
    pub fn participants(&self) -> impl Iterator<Item = &str> {
        self.author
            .as_deref()
            .into_iter()
            .chain(self.user.as_deref())
    }
}
