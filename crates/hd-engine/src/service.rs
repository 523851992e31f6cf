//! Diagnostic service: the single entry point callers use.
//!
//! classify → assemble context → evaluate rules → assemble report. Only
//! context assembly suspends; everything else is synchronous and pure.
//! Nothing below `run_diagnostic` returns an error.

use chrono::Utc;
use tokio::time::Instant;

use hd_protocol::DiagnosticReport;

use crate::assembler::{self, ContextAssembler};
use crate::classifier;
use crate::config::EngineConfig;
use crate::report::assemble_report;
use crate::rules::RuleEngine;
use crate::source::{Collaborators, LookupKind};
use crate::window::EventWindow;

/// Runs diagnostics against a fixed set of collaborators.
///
/// Holds no per-run state, so concurrent runs for different devices can
/// share one service.
pub struct DiagnosticService<'a> {
    collaborators: Collaborators<'a>,
    assembler: ContextAssembler,
    rules: RuleEngine,
    config: EngineConfig,
}

impl<'a> DiagnosticService<'a> {
    pub fn new(collaborators: Collaborators<'a>, config: EngineConfig) -> Self {
        Self {
            collaborators,
            assembler: ContextAssembler::new(config.lookup_timeout()),
            rules: RuleEngine::standard(),
            config,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Diagnose `device_id` from an already-built event window.
    pub async fn run_diagnostic(&self, device_id: &str, window: &EventWindow) -> DiagnosticReport {
        let deadline = Instant::now() + self.config.run_deadline();

        let pattern = if window.device_id() == device_id {
            classifier::classify(window)
        } else {
            tracing::warn!(
                device_id,
                window_device_id = window.device_id(),
                "event window belongs to another device, classifying as empty"
            );
            classifier::classify(&EventWindow::empty(device_id))
        };

        let context = self
            .assembler
            .assemble(device_id, &self.collaborators, deadline)
            .await;
        let recommendations = self.rules.evaluate(&context, &pattern);
        let report = assemble_report(device_id, pattern, context, recommendations);

        tracing::info!(
            device_id,
            kind = %report.pattern.kind,
            confidence = report.pattern.confidence_percent,
            recommendations = report.recommendations.len(),
            "diagnostic complete"
        );
        report
    }

    /// Fetch recent events from the event source, then diagnose.
    ///
    /// A failed or slow event lookup yields an empty window.
    pub async fn run_for_device(&self, device_id: &str) -> DiagnosticReport {
        let now = Utc::now();
        let since = now
            .checked_sub_signed(self.config.event_lookback())
            .unwrap_or(chrono::DateTime::<Utc>::MIN_UTC);
        let bound = Instant::now() + self.config.lookup_timeout();

        let events = assembler::settle(
            LookupKind::Events,
            device_id,
            bound,
            self.collaborators.events.fetch_recent_events(device_id, since),
        )
        .await
        .unwrap_or_default();

        let window = EventWindow::since(device_id, events, since);
        self.run_diagnostic(device_id, &window).await
    }
}
