//! Heuristic segmentation of chat transcripts into topical sections.
//!
//! The pipeline is a chain of pure transformations: raw text (optionally)
//! becomes [`Message`] records via [`parse_raw_conversation`], the
//! segmenter cuts them into [`Section`]s at time gaps, explicit markers and
//! topic changes, the merger fuses adjacent same-topic sections, and the
//! summarizer aggregates the result. The [`store`] module is the boundary
//! to whatever key-value persistence the embedding application provides.

pub mod models;
pub mod parser;
pub mod segmentation;
pub mod store;

pub use models::{Conversation, Message, Section, Topic};
pub use parser::{parse_raw_conversation, ParseOptions};
pub use segmentation::{
    detect_sections, detect_topic, generate_section_summary, merge_similar_sections,
    MergeOptions, SectionSummary, SegmentOptions,
};
pub use store::{ConversationStore, MemoryBackend, StorageBackend};
