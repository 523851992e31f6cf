use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Upper bound on any pattern confidence. Timing inference is never proof.
pub const MAX_CONFIDENCE: u8 = 95;

/// What the classifier believes produced the observed state changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternKind {
    RapidStateChange,
    AutomationTrigger,
    ConnectivityGap,
    Normal,
}

impl PatternKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RapidStateChange => "rapid_state_change",
            Self::AutomationTrigger => "automation_trigger",
            Self::ConnectivityGap => "connectivity_gap",
            Self::Normal => "normal",
        }
    }

    /// Kinds that point at something switching the device on a schedule or trigger.
    pub fn is_automation_like(&self) -> bool {
        matches!(self, Self::AutomationTrigger | Self::RapidStateChange)
    }
}

impl std::fmt::Display for PatternKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One observed fact backing a pattern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvidenceItem {
    pub timestamp: DateTime<Utc>,
    pub description: String,
}

impl EvidenceItem {
    pub fn new(timestamp: DateTime<Utc>, description: impl Into<String>) -> Self {
        Self {
            timestamp,
            description: description.into(),
        }
    }
}

/// Classified event pattern for one diagnostic run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pattern {
    pub kind: PatternKind,
    /// 0–95. Never 100.
    pub confidence_percent: u8,
    /// Ordered oldest first.
    pub evidence: Vec<EvidenceItem>,
}

impl Pattern {
    /// Build a pattern, capping confidence at [`MAX_CONFIDENCE`].
    pub fn new(kind: PatternKind, confidence_percent: u8, evidence: Vec<EvidenceItem>) -> Self {
        Self {
            kind,
            confidence_percent: confidence_percent.min(MAX_CONFIDENCE),
            evidence,
        }
    }

    /// No recognisable pattern: `Normal`, 0% confidence, no evidence.
    pub fn normal() -> Self {
        Self::new(PatternKind::Normal, 0, Vec::new())
    }
}
