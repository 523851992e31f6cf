//! Rule 7: connectivity gaps.

use hd_protocol::{PatternKind, Recommendation};

use super::{EvidenceRule, RuleInput, format_timestamp};

pub struct ConnectivityGapRule;

impl EvidenceRule for ConnectivityGapRule {
    fn name(&self) -> &'static str {
        "connectivity_gap"
    }

    fn evaluate(&self, input: &RuleInput<'_>) -> Vec<Recommendation> {
        let pattern = input.pattern;
        if pattern.kind != PatternKind::ConnectivityGap {
            return Vec::new();
        }
        let [start, .., end] = pattern.evidence.as_slice() else {
            return Vec::new();
        };
        vec![
            Recommendation::evidence(format!(
                "Connectivity gap detected between {} and {}.",
                format_timestamp(start.timestamp),
                format_timestamp(end.timestamp)
            )),
            Recommendation::action("Check network connectivity and device signal strength."),
        ]
    }
}
