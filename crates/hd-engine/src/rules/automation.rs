//! Rules about what is switching the device: manufacturer apps, motion
//! sensors, and platform automations.

use hd_protocol::Recommendation;

use super::{EvidenceRule, RuleInput, quoted};

/// Rule 3: confident automation pattern on a device whose automations live
/// in a manufacturer app the platform cannot see.
///
/// Takes precedence over rules 5 and 6 via `RuleInput::manufacturer_app`.
pub struct ManufacturerPriorityRule;

impl EvidenceRule for ManufacturerPriorityRule {
    fn name(&self) -> &'static str {
        "manufacturer_priority"
    }

    fn evaluate(&self, input: &RuleInput<'_>) -> Vec<Recommendation> {
        let Some(app) = input.manufacturer_app else {
            return Vec::new();
        };
        vec![
            Recommendation::evidence(format!(
                "Automation pattern detected ({}% confidence) but manufacturer app automations are NOT visible via platform API.",
                input.pattern.confidence_percent
            )),
            Recommendation::priority(format!(
                "Open {app} app FIRST → Check for automations, schedules, or scenes controlling {}.",
                quoted(&input.context.device.label)
            )),
        ]
    }
}

/// Rule 4: an identified automation uses a motion sensor.
///
/// Fires only on an explicit motion role. Nothing else in the context may
/// produce motion-related text.
pub struct MotionSensorRule;

impl EvidenceRule for MotionSensorRule {
    fn name(&self) -> &'static str {
        "motion_sensor"
    }

    fn evaluate(&self, input: &RuleInput<'_>) -> Vec<Recommendation> {
        let mut recs: Vec<Recommendation> = input
            .context
            .identified_automations
            .iter()
            .filter(|a| a.has_motion_role())
            .map(|a| {
                Recommendation::evidence(format!(
                    "Automation {} uses motion sensor as trigger.",
                    quoted(&a.rule_name)
                ))
            })
            .collect();
        if !recs.is_empty() {
            recs.push(Recommendation::action(
                "Check motion sensor activity in the platform app → device history.",
            ));
        }
        recs
    }
}

/// Rule 5: list the platform automations found for the device.
pub struct PlatformAutomationsRule;

impl EvidenceRule for PlatformAutomationsRule {
    fn name(&self) -> &'static str {
        "platform_automations"
    }

    fn evaluate(&self, input: &RuleInput<'_>) -> Vec<Recommendation> {
        let automations = &input.context.identified_automations;
        if automations.is_empty() || input.manufacturer_app.is_some() {
            return Vec::new();
        }

        let mut recs = Vec::with_capacity(automations.len() + 1);
        recs.push(Recommendation::evidence(format!(
            "{} automation(s) identified controlling this device:",
            automations.len()
        )));
        for automation in automations {
            let name = quoted(&automation.rule_name);
            let line = if automation.device_roles.is_empty() {
                name
            } else {
                let roles: Vec<String> =
                    automation.device_roles.iter().map(|r| quoted(r)).collect();
                format!("{name} (roles: {})", roles.join(", "))
            };
            recs.push(Recommendation::observation(line));
        }
        recs
    }
}

/// Rule 6: confident automation pattern, but no automation could be named.
pub struct UnidentifiedAutomationRule;

impl EvidenceRule for UnidentifiedAutomationRule {
    fn name(&self) -> &'static str {
        "unidentified_automation"
    }

    fn evaluate(&self, input: &RuleInput<'_>) -> Vec<Recommendation> {
        if !input.high_confidence_automation()
            || !input.context.identified_automations.is_empty()
            || input.manufacturer_app.is_some()
        {
            return Vec::new();
        }
        vec![
            Recommendation::evidence(format!(
                "Automation pattern detected ({}% confidence) but unable to identify specific automation.",
                input.pattern.confidence_percent
            )),
            Recommendation::action(
                "Open platform app → Automations → search for rules affecting this device.",
            ),
        ]
    }
}
