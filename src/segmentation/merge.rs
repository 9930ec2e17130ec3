use log::debug;

use crate::models::Section;
use crate::segmentation::algorithm::collect_participants;
use crate::segmentation::config::MergeOptions;

/// Fuse adjacent sections whose topics match.
///
/// Similarity between two sections is binary: 1.0 when the topic labels are
/// exactly equal, 0.0 otherwise. The numeric threshold only gates that
/// binary value; there is no graded topic similarity. When a pair fuses,
/// the left (surviving) section keeps its `id`, `title`, `topic` and
/// `start_time`; the absorbed section contributes its messages, its
/// `end_time` and its participants.
pub fn merge_similar_sections(sections: Vec<Section>, options: &MergeOptions) -> Vec<Section> {
    if sections.len() < 2 {
        return sections;
    }

    let mut merged: Vec<Section> = Vec::with_capacity(sections.len());

    for section in sections {
        let Some(last) = merged.last_mut() else {
            merged.push(section);
            continue;
        };

        let similarity = if last.topic == section.topic { 1.0 } else { 0.0 };
        if similarity >= options.threshold {
            debug!(
                "fusing section {} into section {} (topic {})",
                section.id,
                last.id,
                last.topic.as_str()
            );
            last.messages.extend(section.messages);
            last.end_time = section.end_time;
            last.participants = collect_participants(&last.messages);
        } else {
            merged.push(section);
        }
    }

    merged
}
