//! Recommendation text and its fixed line prefixes.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when interpreting protocol values.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProtocolError {
    #[error("recommendation has no known prefix: {0}")]
    UnknownPrefix(String),
}

/// The fixed prefixes every recommendation starts with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationKind {
    Evidence,
    Observation,
    Action,
    Priority,
}

impl RecommendationKind {
    pub const ALL: [RecommendationKind; 4] = [
        Self::Evidence,
        Self::Observation,
        Self::Action,
        Self::Priority,
    ];

    /// Prefix including the trailing colon, without the separating space.
    pub fn prefix(&self) -> &'static str {
        match self {
            Self::Evidence => "Evidence:",
            Self::Observation => "Observation:",
            Self::Action => "Action:",
            Self::Priority => "PRIORITY:",
        }
    }
}

/// A single user-facing recommendation line.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Recommendation {
    pub text: String,
}

impl Recommendation {
    pub fn new(kind: RecommendationKind, body: impl AsRef<str>) -> Self {
        Self {
            text: format!("{} {}", kind.prefix(), body.as_ref()),
        }
    }

    pub fn evidence(body: impl AsRef<str>) -> Self {
        Self::new(RecommendationKind::Evidence, body)
    }

    pub fn observation(body: impl AsRef<str>) -> Self {
        Self::new(RecommendationKind::Observation, body)
    }

    pub fn action(body: impl AsRef<str>) -> Self {
        Self::new(RecommendationKind::Action, body)
    }

    pub fn priority(body: impl AsRef<str>) -> Self {
        Self::new(RecommendationKind::Priority, body)
    }

    /// Recover the kind from the text prefix.
    pub fn kind(&self) -> Result<RecommendationKind, ProtocolError> {
        RecommendationKind::ALL
            .into_iter()
            .find(|k| self.text.starts_with(k.prefix()))
            .ok_or_else(|| ProtocolError::UnknownPrefix(self.text.clone()))
    }
}

impl std::fmt::Display for Recommendation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}
