//! Speculation guard: the single place the "no speculation" wording rule
//! is enforced.
//!
//! Every recommendation must start with a known prefix and its wording must
//! not contain a hedging token in any letter case. A violation is a defect
//! in the rule that produced it; at runtime the text is logged and dropped so
//! it never reaches a user.
//!
//! Rules wrap every user-supplied field (device labels, automation names,
//! device roles) with `rules::quoted`, which keeps double quotes out of the
//! field itself. Quoted spans are the user's words reproduced verbatim, not
//! engine wording, so they are masked before the token scan: a lamp called
//! "Mighty Porch Light" keeps its recommendations.

use regex::Regex;
use std::borrow::Cow;
use std::sync::LazyLock;
use thiserror::Error;

use hd_protocol::Recommendation;

/// Hedging phrases that must never appear in recommendation text.
pub const FORBIDDEN_TOKENS: [&str; 5] = ["may be", "possibly", "might", "could be", "likely"];

static FORBIDDEN: LazyLock<Regex> = LazyLock::new(|| {
    let alternation = FORBIDDEN_TOKENS.map(regex::escape).join("|");
    Regex::new(&format!("(?i)({alternation})")).unwrap()
});

static QUOTED: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#""[^"]*""#).unwrap());

/// The engine's own wording in `text`, with every quoted span emptied.
///
/// An unbalanced quote leaves the tail unmasked.
pub fn engine_wording(text: &str) -> Cow<'_, str> {
    QUOTED.replace_all(text, "\"\"")
}

/// Why a recommendation was rejected.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SpeculationError {
    #[error("forbidden token {token:?} in recommendation: {text}")]
    ForbiddenToken { token: String, text: String },

    #[error("recommendation lacks an Evidence/Observation/Action/PRIORITY prefix: {text}")]
    MissingPrefix { text: String },
}

/// Check one recommendation against the wording rules.
pub fn check(rec: &Recommendation) -> Result<(), SpeculationError> {
    if rec.kind().is_err() {
        return Err(SpeculationError::MissingPrefix {
            text: rec.text.clone(),
        });
    }
    if let Some(m) = FORBIDDEN.find(&engine_wording(&rec.text)) {
        return Err(SpeculationError::ForbiddenToken {
            token: m.as_str().to_lowercase(),
            text: rec.text.clone(),
        });
    }
    Ok(())
}

/// Keep the recommendations that pass `check`; log and drop the rest.
pub fn vet(rule: &str, recs: Vec<Recommendation>) -> Vec<Recommendation> {
    recs.into_iter()
        .filter(|rec| match check(rec) {
            Ok(()) => true,
            Err(e) => {
                tracing::error!(
                    rule,
                    error = %e,
                    "dropping recommendation that fails speculation guard"
                );
                false
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_text_passes() {
        assert!(check(&Recommendation::evidence("Device is offline.")).is_ok());
    }

    #[test]
    fn every_token_is_caught_in_any_case() {
        for token in FORBIDDEN_TOKENS {
            for variant in [token.to_string(), token.to_uppercase(), capitalize(token)] {
                let rec = Recommendation::observation(format!("The bulb {variant} faulty."));
                let err = check(&rec).unwrap_err();
                assert_eq!(
                    err,
                    SpeculationError::ForbiddenToken {
                        token: token.to_string(),
                        text: rec.text.clone(),
                    }
                );
            }
        }
    }

    #[test]
    fn substring_matches_count() {
        // "unlikely" still carries the hedge.
        let rec = Recommendation::observation("A failure is unlikely.");
        assert!(check(&rec).is_err());
    }

    #[test]
    fn quoted_user_fields_are_not_engine_wording() {
        let rec = Recommendation::priority(
            "Open Sengled Home app FIRST → Check for automations, schedules, or scenes controlling \"Mighty Porch Light\".",
        );
        assert!(check(&rec).is_ok());
        let rec =
            Recommendation::evidence("Automation \"Possibly Home\" uses motion sensor as trigger.");
        assert!(check(&rec).is_ok());
    }

    #[test]
    fn hedging_outside_quotes_is_still_caught() {
        let rec = Recommendation::observation("\"Sunset\" might control this device.");
        assert!(matches!(
            check(&rec),
            Err(SpeculationError::ForbiddenToken { .. })
        ));
    }

    #[test]
    fn unbalanced_quote_leaves_tail_checked() {
        assert_eq!(engine_wording("a \"b\" c \"d"), "a \"\" c \"d");
        let rec = Recommendation::observation("\"Sunset\" then \"possibly later");
        assert!(check(&rec).is_err());
    }

    #[test]
    fn missing_prefix_is_rejected() {
        let rec = Recommendation {
            text: "Replace the battery.".into(),
        };
        assert!(matches!(
            check(&rec),
            Err(SpeculationError::MissingPrefix { .. })
        ));
    }

    #[test]
    fn vet_drops_only_violations() {
        let kept = vet(
            "test",
            vec![
                Recommendation::evidence("Battery level is 5%."),
                Recommendation::action("It might be the router."),
                Recommendation::action("Replace battery soon."),
            ],
        );
        assert_eq!(kept.len(), 2);
        assert!(kept.iter().all(|r| !r.text.contains("might")));
    }

    fn capitalize(s: &str) -> String {
        let mut chars = s.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}
