//! E2E tests for event-window classification through `run_diagnostic`.

mod helpers;

use std::time::{Duration, Instant};

use hd_engine::{EventWindow, MockPlatform, classify};
use hd_protocol::{DeviceEvent, MAX_CONFIDENCE, PatternKind};

use helpers::{TestHarness, switch, t0, toggle};

fn harness() -> TestHarness {
    TestHarness::new(MockPlatform::new("lamp-1", "Living Room Lamp"))
}

#[tokio::test]
async fn e2e_empty_window_is_normal() {
    let report = harness().run("lamp-1", vec![]).await;
    assert_eq!(report.pattern.kind, PatternKind::Normal);
    assert_eq!(report.pattern.confidence_percent, 0);
    assert!(report.recommendations.is_empty());
}

#[tokio::test]
async fn e2e_single_event_is_normal() {
    let report = harness().run("lamp-1", vec![switch("lamp-1", "on", 0)]).await;
    assert_eq!(report.pattern.kind, PatternKind::Normal);
    assert_eq!(report.pattern.confidence_percent, 0);
}

#[tokio::test]
async fn e2e_three_second_toggle_is_automation_trigger() {
    let report = harness().run("lamp-1", toggle("lamp-1", 3_000)).await;
    assert_eq!(report.pattern.kind, PatternKind::AutomationTrigger);
    assert_eq!(report.pattern.confidence_percent, 95);
}

#[tokio::test]
async fn e2e_ten_and_eleven_second_boundaries() {
    let report = harness().run("lamp-1", toggle("lamp-1", 10_000)).await;
    assert_eq!(report.pattern.kind, PatternKind::RapidStateChange);
    assert_eq!(report.pattern.confidence_percent, 50);

    let report = harness().run("lamp-1", toggle("lamp-1", 11_000)).await;
    assert_eq!(report.pattern.kind, PatternKind::Normal);
    assert_eq!(report.pattern.confidence_percent, 0);
}

#[tokio::test]
async fn e2e_gap_over_thirty_minutes_by_under_a_second() {
    let report = harness().run("lamp-1", toggle("lamp-1", 1_800_900)).await;
    assert_eq!(report.pattern.kind, PatternKind::ConnectivityGap);

    let report = harness().run("lamp-1", toggle("lamp-1", 1_800_000)).await;
    assert_eq!(report.pattern.kind, PatternKind::Normal);
}

/// Unsorted, duplicated store output is repaired rather than rejected.
#[tokio::test]
async fn e2e_malformed_window_is_normalised() {
    let events = vec![
        switch("lamp-1", "on", 3_000),
        switch("lamp-1", "off", 0),
        switch("lamp-1", "on", 3_000),
        switch("lamp-1", "off", 0),
    ];
    let report = harness().run("lamp-1", events).await;
    assert_eq!(report.pattern.kind, PatternKind::AutomationTrigger);
    assert_eq!(report.pattern.confidence_percent, 95);
    assert_eq!(report.pattern.evidence[0].timestamp, t0());
}

#[test]
fn e2e_confidence_never_exceeds_cap() {
    for gap_ms in (0..=12_000).step_by(100) {
        for attr in ["switch", "level"] {
            let events = vec![
                DeviceEvent::new("lamp-1", attr, "a", t0()),
                DeviceEvent::new(
                    "lamp-1",
                    attr,
                    "b",
                    t0() + chrono::TimeDelta::milliseconds(gap_ms),
                ),
            ];
            let pattern = classify(&EventWindow::new("lamp-1", events));
            assert!(pattern.confidence_percent <= MAX_CONFIDENCE);
        }
    }
}

#[test]
fn e2e_hundred_event_window_under_budget() {
    // Alternating rapid and slow toggles across 100 events.
    let mut ms = 0;
    let events: Vec<_> = (0..100)
        .map(|i| {
            ms += if i % 7 == 0 { 4_000 } else { 45_000 };
            switch("lamp-1", if i % 2 == 0 { "on" } else { "off" }, ms)
        })
        .collect();
    let window = EventWindow::new("lamp-1", events);
    assert_eq!(window.len(), 100);

    let start = Instant::now();
    let pattern = classify(&window);
    assert!(start.elapsed() < Duration::from_millis(100));
    assert_eq!(pattern.kind, PatternKind::AutomationTrigger);
}
