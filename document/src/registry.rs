use crate::rule::Rule;
use x12_schema::DecodedSegment;

/// A declarative, read-only table of loop-start rules for one transaction/version.
///
/// Constructed once at startup and shared freely across concurrently-parsed
/// interchanges (§5); rules are evaluated strictly in registration order.
#[derive(Debug, Clone, Copy)]
pub struct RuleRegistry {
    rules: &'static [Rule],
}

impl RuleRegistry {
    pub const fn new(rules: &'static [Rule]) -> Self {
        Self { rules }
    }

    /// The first rule (in registration order) whose trigger matches `segment`'s
    /// name, whose qualifier predicate matches its decoded fields, and whose
    /// legal-parent prefixes include `current_loop_id`.
    pub fn first_match(
        &self,
        segment: &DecodedSegment<'_>,
        current_loop_id: &str,
    ) -> Option<&'static Rule> {
        self.rules.iter().find(|rule| {
            rule.trigger_segment == segment.name()
                && rule.legal_parent(current_loop_id)
                && rule.when.matches(segment)
        })
    }
}
