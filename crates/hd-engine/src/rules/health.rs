//! Rules driven by health telemetry.

use hd_protocol::Recommendation;

use super::{EvidenceRule, RuleInput};

/// Battery percentage below which a replacement is recommended.
pub const LOW_BATTERY_THRESHOLD: u8 = 20;

/// Rule 1: the health snapshot says the device is offline.
pub struct OfflineRule;

impl EvidenceRule for OfflineRule {
    fn name(&self) -> &'static str {
        "offline"
    }

    fn evaluate(&self, input: &RuleInput<'_>) -> Vec<Recommendation> {
        match &input.context.health_data {
            Some(health) if !health.online => vec![
                Recommendation::evidence("Device is offline."),
                Recommendation::action("Check device power supply and network connectivity."),
            ],
            _ => Vec::new(),
        }
    }
}

/// Rule 2: a reported battery level under the threshold.
pub struct LowBatteryRule;

impl EvidenceRule for LowBatteryRule {
    fn name(&self) -> &'static str {
        "low_battery"
    }

    fn evaluate(&self, input: &RuleInput<'_>) -> Vec<Recommendation> {
        let Some(level) = input
            .context
            .health_data
            .as_ref()
            .and_then(|h| h.battery_level)
        else {
            return Vec::new();
        };
        if level >= LOW_BATTERY_THRESHOLD {
            return Vec::new();
        }
        vec![
            Recommendation::evidence(format!(
                "Battery level is {level}% (below {LOW_BATTERY_THRESHOLD}% threshold)."
            )),
            Recommendation::action("Replace battery soon to prevent device offline issues."),
        ]
    }
}
