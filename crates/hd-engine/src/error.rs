//! Collaborator lookup error types.

use thiserror::Error;

/// Errors a collaborator lookup can report.
///
/// None of these escape a diagnostic run; the assembler logs them and
/// substitutes the lookup's absent value.
#[derive(Debug, Error)]
pub enum LookupError {
    #[error("collaborator unavailable: {0}")]
    Unavailable(String),

    #[error("lookup timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("not found: {0}")]
    NotFound(String),

    #[error("I/O error: {0}")]
    Io(String),

    #[error("parse error: {0}")]
    Parse(String),
}

/// Convenience alias for lookup results.
pub type LookupResult<T> = Result<T, LookupError>;
