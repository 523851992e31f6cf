//! Shared harness for end-to-end diagnostic scenarios.

#![allow(dead_code)]

use chrono::{DateTime, TimeDelta, TimeZone, Utc};

use hd_engine::{Collaborators, DiagnosticService, EngineConfig, EventWindow, MockPlatform};
use hd_protocol::{DeviceEvent, DiagnosticReport};

/// Fixed reference instant so reports are reproducible.
pub fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 1, 22, 0, 0).unwrap()
}

/// `switch` event `ms` milliseconds after `t0`.
pub fn switch(device_id: &str, value: &str, ms: i64) -> DeviceEvent {
    DeviceEvent::new(device_id, "switch", value, t0() + TimeDelta::milliseconds(ms))
}

/// off → on with the given gap.
pub fn toggle(device_id: &str, gap_ms: i64) -> Vec<DeviceEvent> {
    vec![switch(device_id, "off", 0), switch(device_id, "on", gap_ms)]
}

/// Wraps a mock platform and runs diagnostics against it.
pub struct TestHarness {
    pub platform: MockPlatform,
    pub config: EngineConfig,
}

impl TestHarness {
    pub fn new(platform: MockPlatform) -> Self {
        Self {
            platform,
            config: EngineConfig::default(),
        }
    }

    /// Run one diagnostic for `device_id` over `events`.
    pub async fn run(&self, device_id: &str, events: Vec<DeviceEvent>) -> DiagnosticReport {
        let service = DiagnosticService::new(
            Collaborators::from_platform(&self.platform),
            self.config.clone(),
        );
        let window = EventWindow::new(device_id, events);
        service.run_diagnostic(device_id, &window).await
    }
}

/// Recommendation texts in report order.
pub fn texts(report: &DiagnosticReport) -> Vec<String> {
    report
        .recommendations
        .iter()
        .map(|r| r.text.clone())
        .collect()
}

/// Does any recommendation mention `needle` (case-insensitive)?
pub fn mentions(report: &DiagnosticReport, needle: &str) -> bool {
    let needle = needle.to_lowercase();
    report
        .recommendations
        .iter()
        .any(|r| r.text.to_lowercase().contains(&needle))
}
