pub mod algorithm;
pub mod config;
pub mod merge;
pub mod summary;
pub mod topic;

pub use algorithm::detect_sections;
pub use config::{MergeOptions, SegmentOptions};
pub use merge::merge_similar_sections;
pub use summary::{generate_section_summary, SectionSummary};
pub use topic::detect_topic;
