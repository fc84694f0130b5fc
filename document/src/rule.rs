use crate::cursor::AttachTo;
use x12_schema::DecodedSegment;

/// A predicate over a trigger segment's decoded fields.
#[derive(Debug, Clone, Copy)]
pub enum Qualifier {
    /// Always fires, regardless of field values.
    Always,
    /// Fires iff the field at `field_index` (as text) is a member of `values`.
    FieldIn {
        field_index: usize,
        values: &'static [&'static str],
    },
}

impl Qualifier {
    pub fn matches(&self, segment: &DecodedSegment<'_>) -> bool {
        match self {
            Qualifier::Always => true,
            Qualifier::FieldIn { field_index, values } => segment
                .field(*field_index)
                .as_text()
                .map(|v| values.contains(&v))
                .unwrap_or(false),
        }
    }
}

/// One loop-start rule: `(trigger_segment, qualifier_predicate,
/// legal_parent_prefix_set, target_loop_id, attach_to, initial_segment_lists)`.
#[derive(Debug, Clone, Copy)]
pub struct Rule {
    pub trigger_segment: &'static str,
    pub when: Qualifier,
    pub legal_parent_prefixes: &'static [&'static str],
    pub opens: &'static str,
    pub attach_to: AttachTo,
    /// Segment names this rule guarantees the new loop will eventually hold,
    /// documented so downstream readers know to expect them even when absent.
    pub initial_segment_lists: &'static [&'static str],
}

impl Rule {
    pub fn legal_parent(&self, current_loop_id: &str) -> bool {
        self.legal_parent_prefixes
            .iter()
            .any(|p| current_loop_id.starts_with(p))
    }
}
