//! Raw-text front door.
//!
//! Turns unstructured pasted text into the message records the segmenter
//! consumes: split on a delimiter, pull a leading `Author:` label off each
//! segment, drop segments with nothing left.

use chrono::Utc;
use log::debug;
use regex::Regex;

use crate::models::Message;

/// Configuration for raw-conversation parsing.
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Boundary between messages in the pasted text.
    pub delimiter: String,
    /// Anchored at segment start; capture group 1 is the author label.
    pub author_pattern: Regex,
    /// Keep the unmodified segment text on each message.
    pub preserve_formatting: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            delimiter: "\n\n".to_string(),
            author_pattern: Regex::new(r"^([\w\s]+):\s*").unwrap(),
            preserve_formatting: true,
        }
    }
}

/// Parse pasted conversation text into time-ordered messages.
///
/// Ids are positional over the kept segments, so they stay contiguous even
/// when empty segments are discarded. Timestamps are the wall clock at
/// parse time; the text itself is never consulted for times. Segments whose
/// content is empty after author stripping are dropped without reserving an
/// id.
pub fn parse_raw_conversation(text: &str, options: &ParseOptions) -> Vec<Message> {
    if text.is_empty() {
        return Vec::new();
    }

    let parsed_at = Utc::now();
    let mut messages: Vec<Message> = Vec::new();

    for segment in text.split(&options.delimiter) {
        let trimmed = segment.trim();
        if trimmed.is_empty() {
            continue;
        }

        let (author, content) = match options.author_pattern.captures(trimmed) {
            Some(caps) => {
                let author = caps[1].trim().to_string();
                let rest = trimmed[caps.get(0).map_or(0, |m| m.end())..].trim();
                (author, rest.to_string())
            }
            None => ("Unknown".to_string(), trimmed.to_string()),
        };

        if content.is_empty() {
            continue;
        }

        messages.push(Message {
            id: Some(messages.len().to_string()),
            timestamp: Some(parsed_at),
            content,
            author: Some(author),
            user: None,
            original_content: options
                .preserve_formatting
                .then(|| segment.to_string()),
        });
    }

    debug!("parsed {} messages from raw text", messages.len());
    messages
}
