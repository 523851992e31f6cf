//! Engine configuration, loadable from TOML or environment.
//!
//! Only I/O bounds live here. Classification and rule thresholds are fixed
//! constants in `classifier` and `rules`.

use std::time::Duration;

use serde::Deserialize;

/// Runtime bounds for a diagnostic run.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct EngineConfig {
    /// Independent timeout applied to each collaborator lookup.
    #[serde(default = "default_lookup_timeout_ms")]
    pub lookup_timeout_ms: u64,
    /// Deadline for context assembly across all lookups in one run.
    #[serde(default = "default_run_deadline_ms")]
    pub run_deadline_ms: u64,
    /// How far back `run_for_device` asks the event source for history.
    #[serde(default = "default_event_lookback_mins")]
    pub event_lookback_mins: u64,
}

fn default_lookup_timeout_ms() -> u64 {
    3000
}

fn default_run_deadline_ms() -> u64 {
    8000
}

fn default_event_lookback_mins() -> u64 {
    60
}

impl EngineConfig {
    /// Load config from a TOML file path.
    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load config from `HD_*` environment variables, defaulting anything
    /// missing or unparseable.
    pub fn from_env() -> Self {
        fn var_u64(name: &str, default: u64) -> u64 {
            std::env::var(name)
                .ok()
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(default)
        }

        Self {
            lookup_timeout_ms: var_u64("HD_LOOKUP_TIMEOUT_MS", default_lookup_timeout_ms()),
            run_deadline_ms: var_u64("HD_RUN_DEADLINE_MS", default_run_deadline_ms()),
            event_lookback_mins: var_u64("HD_EVENT_LOOKBACK_MINS", default_event_lookback_mins()),
        }
    }

    pub fn lookup_timeout(&self) -> Duration {
        Duration::from_millis(self.lookup_timeout_ms)
    }

    pub fn run_deadline(&self) -> Duration {
        Duration::from_millis(self.run_deadline_ms)
    }

    pub fn event_lookback(&self) -> chrono::TimeDelta {
        i64::try_from(self.event_lookback_mins)
            .ok()
            .and_then(chrono::TimeDelta::try_minutes)
            .unwrap_or(chrono::TimeDelta::MAX)
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            lookup_timeout_ms: default_lookup_timeout_ms(),
            run_deadline_ms: default_run_deadline_ms(),
            event_lookback_mins: default_event_lookback_mins(),
        }
    }
}
