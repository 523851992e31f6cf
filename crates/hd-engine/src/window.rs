//! Event window: the ordered, state-change-only event history of one device.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use hd_protocol::DeviceEvent;

/// Time-ordered state changes for a single device.
///
/// Construction re-establishes the window invariants regardless of what the
/// event store handed over: events are stably sorted by timestamp, events
/// for other devices are dropped, and an event is kept only if its value
/// differs from the previous retained event on the same attribute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventWindow {
    device_id: String,
    events: Vec<DeviceEvent>,
}

impl EventWindow {
    /// Build a window from raw event-store output.
    pub fn new(device_id: impl Into<String>, events: Vec<DeviceEvent>) -> Self {
        let device_id = device_id.into();
        let received = events.len();

        let mut events: Vec<DeviceEvent> = events
            .into_iter()
            .filter(|e| e.device_id == device_id)
            .collect();
        let foreign = received - events.len();
        if foreign > 0 {
            tracing::warn!(
                device_id = %device_id,
                dropped = foreign,
                "event window received events for other devices"
            );
        }

        // Stable: events sharing a timestamp keep their store order.
        events.sort_by_key(|e| e.timestamp);

        let mut last_value: HashMap<String, String> = HashMap::new();
        let mut retained = Vec::with_capacity(events.len());
        for event in events {
            if last_value.get(&event.attribute) == Some(&event.value) {
                continue;
            }
            last_value.insert(event.attribute.clone(), event.value.clone());
            retained.push(event);
        }

        tracing::debug!(
            device_id = %device_id,
            received,
            retained = retained.len(),
            "event window built"
        );

        Self {
            device_id,
            events: retained,
        }
    }

    /// Build a window from events at or after `since`.
    pub fn since(
        device_id: impl Into<String>,
        events: Vec<DeviceEvent>,
        since: DateTime<Utc>,
    ) -> Self {
        let events = events.into_iter().filter(|e| e.timestamp >= since).collect();
        Self::new(device_id, events)
    }

    pub fn empty(device_id: impl Into<String>) -> Self {
        Self {
            device_id: device_id.into(),
            events: Vec::new(),
        }
    }

    pub fn device_id(&self) -> &str {
        &self.device_id
    }

    /// Retained events, oldest first.
    pub fn events(&self) -> &[DeviceEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
