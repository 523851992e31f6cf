use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single attribute observation reported by the platform's event store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceEvent {
    /// When the platform recorded the observation.
    pub timestamp: DateTime<Utc>,
    /// Capability attribute (e.g., "switch", "level", "motion").
    pub attribute: String,
    /// Reported value, as the platform stringifies it ("on", "off", "42").
    pub value: String,
    /// Platform device identifier.
    pub device_id: String,
}

impl DeviceEvent {
    pub fn new(
        device_id: impl Into<String>,
        attribute: impl Into<String>,
        value: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            timestamp,
            attribute: attribute.into(),
            value: value.into(),
            device_id: device_id.into(),
        }
    }
}
