/// Configuration for section detection with tunable thresholds.
#[derive(Debug, Clone)]
pub struct SegmentOptions {
    /// Maximum gap between consecutive messages (minutes) before a new
    /// section is forced.
    pub time_gap_minutes: i64,

    /// Case-insensitive substrings that force a new section when they
    /// appear anywhere in a message.
    pub section_markers: Vec<String>,

    /// Start a new section when the detected topic changes between
    /// consecutive messages.
    pub detect_topic_changes: bool,
}

impl Default for SegmentOptions {
    fn default() -> Self {
        Self {
            time_gap_minutes: 30,
            section_markers: ["section:", "topic:", "discuss:", "new topic", "---", "==="]
                .iter()
                .map(|m| m.to_string())
                .collect(),
            detect_topic_changes: true,
        }
    }
}

/// Configuration for the section merge pass.
#[derive(Debug, Clone)]
pub struct MergeOptions {
    /// Similarity bound for fusing adjacent sections. Similarity is binary
    /// (1.0 on exact topic match, 0.0 otherwise), so any threshold in
    /// (0.0, 1.0] gates on topic equality.
    pub threshold: f64,
}

impl Default for MergeOptions {
    fn default() -> Self {
        Self { threshold: 0.7 }
    }
}
