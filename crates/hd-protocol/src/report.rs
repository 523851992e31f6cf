use serde::{Deserialize, Serialize};

use crate::device::{DeviceMeta, HealthSnapshot, IdentifiedAutomation};
use crate::pattern::Pattern;
use crate::recommendation::Recommendation;

/// Everything the rule engine may look at besides the pattern.
///
/// An empty `identified_automations` means none were found, not that none exist.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosticContext {
    pub device: DeviceMeta,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub health_data: Option<HealthSnapshot>,
    #[serde(default)]
    pub identified_automations: Vec<IdentifiedAutomation>,
}

impl DiagnosticContext {
    /// Context with every lookup absent.
    pub fn absent(device_id: &str) -> Self {
        Self {
            device: DeviceMeta::absent(device_id),
            health_data: None,
            identified_automations: Vec::new(),
        }
    }
}

/// Final output of one diagnostic run.
///
/// Zero recommendations is valid: there was not enough evidence to recommend
/// any action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiagnosticReport {
    pub device_id: String,
    pub pattern: Pattern,
    pub diagnostic_context: DiagnosticContext,
    pub recommendations: Vec<Recommendation>,
}

impl DiagnosticReport {
    /// One-line human-readable summary.
    pub fn summary(&self) -> String {
        format!(
            "{} ({}% confidence) on \"{}\": {} recommendation(s)",
            self.pattern.kind,
            self.pattern.confidence_percent,
            self.diagnostic_context.device.label,
            self.recommendations.len()
        )
    }
}
