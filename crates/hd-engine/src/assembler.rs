//! Diagnostic context assembler: concurrent, partial-failure-tolerant
//! fan-out to the health, automation and device metadata collaborators.
//!
//! Each lookup is bounded independently and settles to either a value or
//! its absent form (health = None, automations = [], meta = device id label
//! with no manufacturer). Failures are logged, never returned.

use std::future::Future;
use std::time::Duration;

use tokio::time::{self, Instant};

use hd_protocol::{DeviceMeta, DiagnosticContext};

use crate::error::{LookupError, LookupResult};
use crate::source::{Collaborators, LookupKind};

/// Builds a `DiagnosticContext` from the external collaborators.
#[derive(Debug, Clone)]
pub struct ContextAssembler {
    lookup_timeout: Duration,
}

impl ContextAssembler {
    pub fn new(lookup_timeout: Duration) -> Self {
        Self { lookup_timeout }
    }

    /// Issue all three lookups concurrently and merge what comes back.
    ///
    /// No lookup outlives `deadline`; whatever has not answered by then is
    /// abandoned and treated as absent.
    pub async fn assemble(
        &self,
        device_id: &str,
        collaborators: &Collaborators<'_>,
        deadline: Instant,
    ) -> DiagnosticContext {
        let bound = deadline.min(Instant::now() + self.lookup_timeout);

        let (health, automations, meta) = tokio::join!(
            settle(
                LookupKind::Health,
                device_id,
                bound,
                collaborators.health.fetch_health(device_id),
            ),
            settle(
                LookupKind::Automations,
                device_id,
                bound,
                collaborators.automations.fetch_identified_automations(device_id),
            ),
            settle(
                LookupKind::DeviceMeta,
                device_id,
                bound,
                collaborators.meta.fetch_device_meta(device_id),
            ),
        );

        DiagnosticContext {
            device: meta.unwrap_or_else(|| DeviceMeta::absent(device_id)),
            health_data: health.flatten(),
            identified_automations: automations.unwrap_or_default(),
        }
    }
}

/// Await one lookup until `bound`, folding failure and timeout into `None`.
pub(crate) async fn settle<T, F>(
    lookup: LookupKind,
    device_id: &str,
    bound: Instant,
    fut: F,
) -> Option<T>
where
    F: Future<Output = LookupResult<T>>,
{
    let started = Instant::now();
    match time::timeout_at(bound, fut).await {
        Ok(Ok(value)) => {
            tracing::debug!(device_id, lookup = %lookup, "lookup succeeded");
            Some(value)
        }
        Ok(Err(e)) => {
            tracing::warn!(
                device_id,
                lookup = %lookup,
                error = %e,
                "lookup failed, treating as absent"
            );
            None
        }
        Err(_) => {
            let e = timed_out(started, bound);
            tracing::warn!(
                device_id,
                lookup = %lookup,
                error = %e,
                "lookup timed out, treating as absent"
            );
            None
        }
    }
}

fn timed_out(started: Instant, bound: Instant) -> LookupError {
    let waited = bound.saturating_duration_since(started);
    LookupError::Timeout {
        timeout_ms: u64::try_from(waited.as_millis()).unwrap_or(u64::MAX),
    }
}
