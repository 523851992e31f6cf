//! File-backed collaborator: serves one device's captured platform data
//! from a JSON snapshot.
//!
//! Snapshot layout:
//!
//! ```json
//! {
//!   "device_id": "porch-1",
//!   "meta": { "label": "Porch Light", "manufacturer": "Sengled" },
//!   "health": { "online": true },
//!   "automations": [ { "rule_name": "Sunset", "device_roles": ["Switch"] } ],
//!   "events": [ { "timestamp": "...", "attribute": "switch", "value": "on", "device_id": "porch-1" } ]
//! }
//! ```

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;

use hd_protocol::{DeviceEvent, DeviceMeta, HealthSnapshot, IdentifiedAutomation};

use crate::error::{LookupError, LookupResult};
use crate::source::{AutomationLookup, DeviceMetaLookup, EventSource, HealthLookup};

/// Captured platform data for a single device.
#[derive(Debug, Clone, Deserialize)]
pub struct SnapshotFile {
    pub device_id: String,
    pub meta: DeviceMeta,
    #[serde(default)]
    pub health: Option<HealthSnapshot>,
    #[serde(default)]
    pub automations: Vec<IdentifiedAutomation>,
    #[serde(default)]
    pub events: Vec<DeviceEvent>,
}

impl SnapshotFile {
    /// Read and parse a snapshot from disk.
    pub async fn load(path: &str) -> LookupResult<Self> {
        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                LookupError::NotFound(path.to_string())
            } else {
                LookupError::Io(format!("{path}: {e}"))
            }
        })?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LookupResult<Self> {
        serde_json::from_str(content).map_err(|e| LookupError::Parse(e.to_string()))
    }

    fn ensure_device(&self, device_id: &str) -> LookupResult<()> {
        if device_id == self.device_id {
            Ok(())
        } else {
            Err(LookupError::NotFound(device_id.to_string()))
        }
    }
}

#[async_trait]
impl EventSource for SnapshotFile {
    async fn fetch_recent_events(
        &self,
        device_id: &str,
        since: DateTime<Utc>,
    ) -> LookupResult<Vec<DeviceEvent>> {
        self.ensure_device(device_id)?;
        Ok(self
            .events
            .iter()
            .filter(|e| e.timestamp >= since)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl HealthLookup for SnapshotFile {
    async fn fetch_health(&self, device_id: &str) -> LookupResult<Option<HealthSnapshot>> {
        self.ensure_device(device_id)?;
        Ok(self.health.clone())
    }
}

#[async_trait]
impl AutomationLookup for SnapshotFile {
    async fn fetch_identified_automations(
        &self,
        device_id: &str,
    ) -> LookupResult<Vec<IdentifiedAutomation>> {
        self.ensure_device(device_id)?;
        Ok(self.automations.clone())
    }
}

#[async_trait]
impl DeviceMetaLookup for SnapshotFile {
    async fn fetch_device_meta(&self, device_id: &str) -> LookupResult<DeviceMeta> {
        self.ensure_device(device_id)?;
        Ok(self.meta.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    const SAMPLE: &str = r#"{
        "device_id": "hall-1",
        "meta": { "label": "Hall Lamp", "manufacturer": "LIFX" },
        "health": { "online": false, "battery_level": 12 },
        "automations": [
            { "rule_name": "Hallway Motion", "device_roles": ["Motion Sensor", "Switch"] }
        ],
        "events": [
            { "timestamp": "2025-03-01T22:00:00Z", "attribute": "switch", "value": "off", "device_id": "hall-1" },
            { "timestamp": "2025-03-01T22:00:03Z", "attribute": "switch", "value": "on", "device_id": "hall-1" }
        ]
    }"#;

    #[test]
    fn parse_sample() {
        let snapshot = SnapshotFile::parse(SAMPLE).unwrap();
        assert_eq!(snapshot.device_id, "hall-1");
        assert_eq!(snapshot.events.len(), 2);
        assert!(snapshot.automations[0].has_motion_role());
        assert_eq!(snapshot.health.unwrap().battery_level, Some(12));
    }

    #[test]
    fn parse_minimal() {
        let snapshot =
            SnapshotFile::parse(r#"{"device_id":"d","meta":{"label":"D"}}"#).unwrap();
        assert!(snapshot.health.is_none());
        assert!(snapshot.automations.is_empty());
        assert!(snapshot.events.is_empty());
    }

    #[test]
    fn parse_error() {
        assert!(matches!(
            SnapshotFile::parse("{not json"),
            Err(LookupError::Parse(_))
        ));
    }

    #[tokio::test]
    async fn load_missing_file() {
        let result = SnapshotFile::load("/nonexistent/snapshot.json").await;
        assert!(matches!(result, Err(LookupError::NotFound(_))));
    }

    #[tokio::test]
    async fn events_respect_since() {
        let snapshot = SnapshotFile::parse(SAMPLE).unwrap();
        let since = Utc.with_ymd_and_hms(2025, 3, 1, 22, 0, 1).unwrap();
        let events = snapshot.fetch_recent_events("hall-1", since).await.unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].value, "on");
    }

    #[tokio::test]
    async fn other_device_not_found() {
        let snapshot = SnapshotFile::parse(SAMPLE).unwrap();
        assert!(snapshot.fetch_device_meta("kitchen-2").await.is_err());
    }
}
