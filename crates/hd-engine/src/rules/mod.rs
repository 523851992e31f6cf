//! Evidence rule engine: an ordered list of independent rules, each of
//! which may emit recommendations justified by a specific fact in the
//! context or pattern.
//!
//! Rule order is the final recommendation order; nothing re-sorts later.
//! Every rule's output passes through the speculation guard before it is
//! kept.

pub mod automation;
pub mod connectivity;
pub mod health;

use hd_protocol::{DiagnosticContext, Pattern, Recommendation};

use crate::classifier::AUTOMATION_CONFIDENCE_THRESHOLD;
use crate::guard;
use crate::manufacturer;

/// Everything a rule may look at.
#[derive(Debug, Clone, Copy)]
pub struct RuleInput<'a> {
    pub context: &'a DiagnosticContext,
    pub pattern: &'a Pattern,
    /// Companion app when the manufacturer-app path applies for this run.
    /// Computed once so the mutually exclusive rules agree.
    pub manufacturer_app: Option<&'static str>,
}

impl<'a> RuleInput<'a> {
    pub fn new(context: &'a DiagnosticContext, pattern: &'a Pattern) -> Self {
        Self {
            context,
            pattern,
            manufacturer_app: manufacturer_priority(context, pattern),
        }
    }

    /// Automation-like pattern at or above the high-confidence bar.
    pub fn high_confidence_automation(&self) -> bool {
        self.pattern.kind.is_automation_like()
            && self.pattern.confidence_percent >= AUTOMATION_CONFIDENCE_THRESHOLD
    }
}

/// Companion app to send the user to, if the pattern is a confident
/// automation pattern and the manufacturer's automations are invisible to
/// the platform.
pub fn manufacturer_priority(
    context: &DiagnosticContext,
    pattern: &Pattern,
) -> Option<&'static str> {
    if !pattern.kind.is_automation_like()
        || pattern.confidence_percent < AUTOMATION_CONFIDENCE_THRESHOLD
    {
        return None;
    }
    context
        .device
        .manufacturer
        .as_deref()
        .and_then(manufacturer::proprietary_app)
}

/// A single evidence rule.
pub trait EvidenceRule: Send + Sync {
    /// Rule name (for logging).
    fn name(&self) -> &'static str;

    /// Emit zero or more recommendations. Must be a pure function of `input`.
    fn evaluate(&self, input: &RuleInput<'_>) -> Vec<Recommendation>;
}

/// Ordered rule set.
pub struct RuleEngine {
    rules: Vec<Box<dyn EvidenceRule>>,
}

impl RuleEngine {
    pub fn new(rules: Vec<Box<dyn EvidenceRule>>) -> Self {
        Self { rules }
    }

    /// The standard rule order.
    pub fn standard() -> Self {
        Self::new(vec![
            Box::new(health::OfflineRule),
            Box::new(health::LowBatteryRule),
            Box::new(automation::ManufacturerPriorityRule),
            Box::new(automation::MotionSensorRule),
            Box::new(automation::PlatformAutomationsRule),
            Box::new(automation::UnidentifiedAutomationRule),
            Box::new(connectivity::ConnectivityGapRule),
        ])
    }

    /// Run every rule in order and return the vetted recommendations.
    pub fn evaluate(&self, context: &DiagnosticContext, pattern: &Pattern) -> Vec<Recommendation> {
        let input = RuleInput::new(context, pattern);
        let mut out = Vec::new();
        for rule in &self.rules {
            let emitted = guard::vet(rule.name(), rule.evaluate(&input));
            if !emitted.is_empty() {
                tracing::debug!(rule = rule.name(), count = emitted.len(), "rule fired");
            }
            out.extend(emitted);
        }
        out
    }

    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl Default for RuleEngine {
    fn default() -> Self {
        Self::standard()
    }
}

/// Wrap a user-supplied field in double quotes for recommendation text.
///
/// Inner double quotes become single quotes so the guard can tell the
/// field apart from the surrounding wording.
pub fn quoted(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "'"))
}

/// Timestamp format used in recommendation text.
pub(crate) fn format_timestamp(ts: chrono::DateTime<chrono::Utc>) -> String {
    ts.to_rfc3339_opts(chrono::SecondsFormat::Secs, true)
}

#[cfg(test)]
pub(crate) mod fixtures {
    use chrono::{DateTime, TimeZone, Utc};
    use hd_protocol::{
        DeviceMeta, DiagnosticContext, EvidenceItem, HealthSnapshot, IdentifiedAutomation,
        Pattern, PatternKind,
    };

    pub fn ts(h: u32, m: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 1, h, m, s).unwrap()
    }

    pub fn context(manufacturer: Option<&str>) -> DiagnosticContext {
        DiagnosticContext {
            device: DeviceMeta {
                label: "Porch Light".into(),
                manufacturer: manufacturer.map(String::from),
            },
            health_data: Some(HealthSnapshot {
                online: true,
                battery_level: None,
                last_communication: None,
            }),
            identified_automations: vec![],
        }
    }

    pub fn with_automations(
        mut ctx: DiagnosticContext,
        automations: Vec<IdentifiedAutomation>,
    ) -> DiagnosticContext {
        ctx.identified_automations = automations;
        ctx
    }

    pub fn automation_pattern(confidence: u8) -> Pattern {
        let kind = if confidence >= 80 {
            PatternKind::AutomationTrigger
        } else {
            PatternKind::RapidStateChange
        };
        Pattern::new(
            kind,
            confidence,
            vec![
                EvidenceItem::new(ts(22, 0, 0), "switch changed to \"off\""),
                EvidenceItem::new(ts(22, 0, 3), "switch changed to \"on\""),
            ],
        )
    }

    pub fn gap_pattern() -> Pattern {
        Pattern::new(
            PatternKind::ConnectivityGap,
            90,
            vec![
                EvidenceItem::new(ts(21, 0, 0), "before"),
                EvidenceItem::new(ts(22, 15, 0), "after"),
            ],
        )
    }
}
