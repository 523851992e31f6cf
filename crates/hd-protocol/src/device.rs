use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeSet;

/// Static device metadata from the platform's device registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceMeta {
    /// User-assigned label ("Porch Light").
    pub label: String,
    /// Manufacturer name as reported by the platform, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manufacturer: Option<String>,
}

impl DeviceMeta {
    /// Metadata used when the registry lookup produced nothing.
    ///
    /// The device id stands in for the label so recommendations still name
    /// the device.
    pub fn absent(device_id: &str) -> Self {
        Self {
            label: device_id.to_string(),
            manufacturer: None,
        }
    }
}

/// Point-in-time health telemetry for a device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthSnapshot {
    pub online: bool,
    /// Battery percentage (0-100). None for mains-powered devices.
    ///
    /// Readings outside 0-100 are discarded on deserialize: a bogus
    /// reading is no evidence of battery state.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "battery_percent"
    )]
    pub battery_level: Option<u8>,
    /// Last time the hub heard from the device.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_communication: Option<DateTime<Utc>>,
}

pub const MAX_BATTERY_PERCENT: u8 = 100;

fn battery_percent<'de, D>(deserializer: D) -> Result<Option<u8>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<f64>::deserialize(deserializer)?;
    Ok(raw.and_then(|level| {
        (0.0..=f64::from(MAX_BATTERY_PERCENT))
            .contains(&level)
            .then(|| level.round() as u8)
    }))
}

/// A platform automation found to reference the device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdentifiedAutomation {
    pub rule_name: String,
    /// Roles the device plays in the rule ("Switch", "Motion Sensor").
    #[serde(default)]
    pub device_roles: BTreeSet<String>,
}

impl IdentifiedAutomation {
    pub fn new<I, S>(rule_name: impl Into<String>, roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            rule_name: rule_name.into(),
            device_roles: roles.into_iter().map(Into::into).collect(),
        }
    }

    /// True if any role names a motion sensor (case-insensitive substring).
    pub fn has_motion_role(&self) -> bool {
        self.device_roles
            .iter()
            .any(|role| role.to_lowercase().contains("motion"))
    }
}
