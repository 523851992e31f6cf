//! Pattern classifier: turns an event window into a single `Pattern`.
//!
//! Checks run in priority order and the first match wins:
//! 1. connectivity gap between any two consecutive events,
//! 2. rapid transitions on the primary switch attribute,
//! 3. otherwise `Normal` at 0%.
//!
//! Pure and deterministic: one linear pass per check, no allocation beyond
//! the returned evidence.

use chrono::{DateTime, SecondsFormat, TimeDelta, Utc};
use hd_protocol::{DeviceEvent, EvidenceItem, MAX_CONFIDENCE, Pattern, PatternKind};

use crate::window::EventWindow;

/// Silence longer than this between consecutive events (strictly greater)
/// is a connectivity gap. Any retained event on any attribute ends a gap.
pub const CONNECTIVITY_GAP_THRESHOLD_SECS: i64 = 30 * 60;

/// Gap length is observed directly, so confidence is high but not capped.
pub const CONNECTIVITY_GAP_CONFIDENCE: u8 = 90;

/// The controllable on/off attribute scanned for rapid transitions.
pub const PRIMARY_ATTRIBUTE: &str = "switch";

/// Transitions further apart than this are not rapid.
pub const RAPID_MAX_GAP_SECS: f64 = 10.0;

/// Transitions this close or closer get full (capped) confidence.
pub const RAPID_FULL_CONFIDENCE_GAP_SECS: f64 = 3.0;

/// Confidence at exactly `RAPID_MAX_GAP_SECS`.
pub const RAPID_MIN_CONFIDENCE: u8 = 50;

/// At or above this confidence a rapid transition is called an automation
/// trigger. Rules use the same bar for "high confidence".
pub const AUTOMATION_CONFIDENCE_THRESHOLD: u8 = 80;

/// Classify a window. Never fails; worst case is `Pattern::normal()`.
pub fn classify(window: &EventWindow) -> Pattern {
    let events = window.events();
    if events.len() < 2 {
        return Pattern::normal();
    }

    if let Some(pattern) = detect_connectivity_gap(events) {
        return pattern;
    }
    if let Some(pattern) = detect_rapid_change(events) {
        return pattern;
    }
    Pattern::normal()
}

/// Confidence for a pair of transitions `gap_secs` apart, or None if the
/// pair is not rapid.
///
/// Linear from 95 at 3s down to 50 at 10s. Rounding is half away from zero
/// (`f64::round`) on the millisecond-precision gap, so 6.5s → 72.5 → 73.
pub fn rapid_confidence(gap_secs: f64) -> Option<u8> {
    if !(0.0..=RAPID_MAX_GAP_SECS).contains(&gap_secs) {
        return None;
    }
    if gap_secs <= RAPID_FULL_CONFIDENCE_GAP_SECS {
        return Some(MAX_CONFIDENCE);
    }

    let span = RAPID_MAX_GAP_SECS - RAPID_FULL_CONFIDENCE_GAP_SECS;
    let drop = f64::from(MAX_CONFIDENCE - RAPID_MIN_CONFIDENCE);
    let raw =
        f64::from(MAX_CONFIDENCE) - (gap_secs - RAPID_FULL_CONFIDENCE_GAP_SECS) / span * drop;
    let clamped = raw
        .round()
        .clamp(f64::from(RAPID_MIN_CONFIDENCE), f64::from(MAX_CONFIDENCE));
    Some(clamped as u8)
}

fn detect_connectivity_gap(events: &[DeviceEvent]) -> Option<Pattern> {
    // Full precision: 30m0.9s is over the threshold.
    let threshold = TimeDelta::seconds(CONNECTIVITY_GAP_THRESHOLD_SECS);

    // Longest gap wins; ties go to the most recent.
    let mut longest: Option<(&DeviceEvent, &DeviceEvent, TimeDelta)> = None;
    for pair in events.windows(2) {
        let gap = pair[1].timestamp - pair[0].timestamp;
        if gap <= threshold {
            continue;
        }
        if longest.is_none_or(|(_, _, best)| gap >= best) {
            longest = Some((&pair[0], &pair[1], gap));
        }
    }

    let (before, after, gap) = longest?;
    Some(Pattern::new(
        PatternKind::ConnectivityGap,
        CONNECTIVITY_GAP_CONFIDENCE,
        vec![
            EvidenceItem::new(
                before.timestamp,
                format!("Last event before silence: {}", describe(before)),
            ),
            EvidenceItem::new(
                after.timestamp,
                format!(
                    "First event after {} minutes of silence: {}",
                    gap.num_minutes(),
                    describe(after)
                ),
            ),
        ],
    ))
}

fn detect_rapid_change(events: &[DeviceEvent]) -> Option<Pattern> {
    let mut previous: Option<&DeviceEvent> = None;
    let mut best: Option<(&DeviceEvent, &DeviceEvent, f64, u8)> = None;

    for event in events.iter().filter(|e| e.attribute == PRIMARY_ATTRIBUTE) {
        if let Some(prev) = previous {
            let gap_secs = gap_seconds(prev.timestamp, event.timestamp);
            if let Some(confidence) = rapid_confidence(gap_secs) {
                // >= so later pairs win ties.
                if best.is_none_or(|(_, _, _, c)| confidence >= c) {
                    best = Some((prev, event, gap_secs, confidence));
                }
            }
        }
        previous = Some(event);
    }

    let (first, second, gap_secs, confidence) = best?;
    let kind = if confidence >= AUTOMATION_CONFIDENCE_THRESHOLD {
        PatternKind::AutomationTrigger
    } else {
        PatternKind::RapidStateChange
    };

    Some(Pattern::new(
        kind,
        confidence,
        vec![
            EvidenceItem::new(first.timestamp, describe(first)),
            EvidenceItem::new(second.timestamp, describe(second)),
            EvidenceItem::new(
                second.timestamp,
                format!("{gap_secs:.1}s between consecutive {PRIMARY_ATTRIBUTE} transitions"),
            ),
        ],
    ))
}

fn gap_seconds(from: DateTime<Utc>, to: DateTime<Utc>) -> f64 {
    (to - from).num_milliseconds() as f64 / 1000.0
}

fn describe(event: &DeviceEvent) -> String {
    format!(
        "{} changed to \"{}\" at {}",
        event.attribute,
        event.value,
        event.timestamp.to_rfc3339_opts(SecondsFormat::Secs, true)
    )
}
