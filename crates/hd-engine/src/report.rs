//! Report assembler: packages the final `DiagnosticReport`.

use std::collections::HashSet;

use hd_protocol::{DiagnosticContext, DiagnosticReport, Pattern, Recommendation};

/// Build the report, dropping exact-text duplicates (first occurrence kept,
/// order otherwise unchanged).
///
/// Nothing is filtered for wording here; that happens in the rule engine.
pub fn assemble_report(
    device_id: &str,
    pattern: Pattern,
    context: DiagnosticContext,
    mut recommendations: Vec<Recommendation>,
) -> DiagnosticReport {
    let mut seen = HashSet::new();
    recommendations.retain(|rec| seen.insert(rec.text.clone()));

    DiagnosticReport {
        device_id: device_id.to_string(),
        pattern,
        diagnostic_context: context,
        recommendations,
    }
}
