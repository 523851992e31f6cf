//! Collaborator abstractions: where events, health, automations and device
//! metadata come from.
//!
//! The engine never fetches anything itself. Platform clients, file
//! snapshots and test mocks all plug in through these traits.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use hd_protocol::{DeviceEvent, DeviceMeta, HealthSnapshot, IdentifiedAutomation};

use crate::error::LookupResult;

/// Which collaborator a lookup went to (used in logs and by the mock).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LookupKind {
    Events,
    Health,
    Automations,
    DeviceMeta,
}

impl LookupKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Events => "events",
            Self::Health => "health",
            Self::Automations => "automations",
            Self::DeviceMeta => "device_meta",
        }
    }
}

impl std::fmt::Display for LookupKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Recent event history for a device.
#[async_trait]
pub trait EventSource: Send + Sync {
    async fn fetch_recent_events(
        &self,
        device_id: &str,
        since: DateTime<Utc>,
    ) -> LookupResult<Vec<DeviceEvent>>;
}

/// Device health telemetry.
#[async_trait]
pub trait HealthLookup: Send + Sync {
    /// `Ok(None)` is a valid answer: the device reports no health data.
    async fn fetch_health(&self, device_id: &str) -> LookupResult<Option<HealthSnapshot>>;
}

/// Platform automations that reference a device.
///
/// Only automations visible through the platform API are returned. An empty
/// list does not mean no automation controls the device.
#[async_trait]
pub trait AutomationLookup: Send + Sync {
    async fn fetch_identified_automations(
        &self,
        device_id: &str,
    ) -> LookupResult<Vec<IdentifiedAutomation>>;
}

/// Device registry metadata (label, manufacturer).
#[async_trait]
pub trait DeviceMetaLookup: Send + Sync {
    async fn fetch_device_meta(&self, device_id: &str) -> LookupResult<DeviceMeta>;
}

/// Borrowed handles to every collaborator a run needs.
#[derive(Clone, Copy)]
pub struct Collaborators<'a> {
    pub events: &'a dyn EventSource,
    pub health: &'a dyn HealthLookup,
    pub automations: &'a dyn AutomationLookup,
    pub meta: &'a dyn DeviceMetaLookup,
}

impl<'a> Collaborators<'a> {
    /// Use one value that implements every collaborator trait.
    pub fn from_platform<P>(platform: &'a P) -> Self
    where
        P: EventSource + HealthLookup + AutomationLookup + DeviceMetaLookup,
    {
        Self {
            events: platform,
            health: platform,
            automations: platform,
            meta: platform,
        }
    }
}
