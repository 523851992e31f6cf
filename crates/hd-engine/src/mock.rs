//! Mock platform for testing: serves pre-loaded device data with scripted
//! failures and delays per lookup.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::time::Duration;

use hd_protocol::{DeviceEvent, DeviceMeta, HealthSnapshot, IdentifiedAutomation};

use crate::error::{LookupError, LookupResult};
use crate::source::{AutomationLookup, DeviceMetaLookup, EventSource, HealthLookup, LookupKind};

/// A mock platform holding one device's data.
pub struct MockPlatform {
    device_id: String,
    meta: DeviceMeta,
    health: Option<HealthSnapshot>,
    automations: Vec<IdentifiedAutomation>,
    events: Vec<DeviceEvent>,
    failing: HashSet<LookupKind>,
    delays: HashMap<LookupKind, Duration>,
    /// Every lookup made, in call order (for test assertions).
    calls: Mutex<Vec<LookupKind>>,
}

impl MockPlatform {
    /// A device with a label, no manufacturer, no health, no automations.
    pub fn new(device_id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            device_id: device_id.into(),
            meta: DeviceMeta {
                label: label.into(),
                manufacturer: None,
            },
            health: None,
            automations: Vec::new(),
            events: Vec::new(),
            failing: HashSet::new(),
            delays: HashMap::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_manufacturer(mut self, manufacturer: impl Into<String>) -> Self {
        self.meta.manufacturer = Some(manufacturer.into());
        self
    }

    pub fn with_health(mut self, health: HealthSnapshot) -> Self {
        self.health = Some(health);
        self
    }

    pub fn with_automation(mut self, automation: IdentifiedAutomation) -> Self {
        self.automations.push(automation);
        self
    }

    pub fn with_events(mut self, events: Vec<DeviceEvent>) -> Self {
        self.events = events;
        self
    }

    /// Make every call to `lookup` fail with `LookupError::Unavailable`.
    pub fn failing(mut self, lookup: LookupKind) -> Self {
        self.failing.insert(lookup);
        self
    }

    /// Delay every call to `lookup` by `delay` before answering.
    pub fn delayed(mut self, lookup: LookupKind, delay: Duration) -> Self {
        self.delays.insert(lookup, delay);
        self
    }

    /// Lookups made so far, in call order.
    pub fn calls(&self) -> Vec<LookupKind> {
        self.calls.lock().unwrap().clone()
    }

    /// A Sengled bulb at "Porch Light", online, no platform automations.
    pub fn sengled_porch_light() -> Self {
        Self::new("porch-1", "Porch Light")
            .with_manufacturer("Sengled")
            .with_health(HealthSnapshot {
                online: true,
                battery_level: None,
                last_communication: None,
            })
    }

    async fn simulate(&self, lookup: LookupKind, device_id: &str) -> LookupResult<()> {
        self.calls.lock().unwrap().push(lookup);
        if let Some(delay) = self.delays.get(&lookup) {
            tokio::time::sleep(*delay).await;
        }
        if self.failing.contains(&lookup) {
            return Err(LookupError::Unavailable(format!("mock {lookup} lookup failure")));
        }
        if device_id != self.device_id {
            return Err(LookupError::NotFound(device_id.to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl EventSource for MockPlatform {
    async fn fetch_recent_events(
        &self,
        device_id: &str,
        since: DateTime<Utc>,
    ) -> LookupResult<Vec<DeviceEvent>> {
        self.simulate(LookupKind::Events, device_id).await?;
        Ok(self
            .events
            .iter()
            .filter(|e| e.timestamp >= since)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl HealthLookup for MockPlatform {
    async fn fetch_health(&self, device_id: &str) -> LookupResult<Option<HealthSnapshot>> {
        self.simulate(LookupKind::Health, device_id).await?;
        Ok(self.health.clone())
    }
}

#[async_trait]
impl AutomationLookup for MockPlatform {
    async fn fetch_identified_automations(
        &self,
        device_id: &str,
    ) -> LookupResult<Vec<IdentifiedAutomation>> {
        self.simulate(LookupKind::Automations, device_id).await?;
        Ok(self.automations.clone())
    }
}

#[async_trait]
impl DeviceMetaLookup for MockPlatform {
    async fn fetch_device_meta(&self, device_id: &str) -> LookupResult<DeviceMeta> {
        self.simulate(LookupKind::DeviceMeta, device_id).await?;
        Ok(self.meta.clone())
    }
}
