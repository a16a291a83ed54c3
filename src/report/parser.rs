//! Response normalization — strip markdown fences from the model reply
//! and parse the constrained JSON into a typed report.

use serde::Deserialize;

use crate::openfda::truncate_chars;

use super::types::{Interaction, ModelReport, RiskScore};
use super::ReportError;

/// Raw excerpt length included in the "not valid JSON" error.
const ERROR_EXCERPT_MAX_CHARS: usize = 500;

/// Remove surrounding markdown code fences, if present.
///
/// The model is told not to emit fences but does anyway often enough that
/// the original implementations all normalized them away.
pub fn strip_code_fences(content: &str) -> &str {
    let trimmed = content.trim();
    let Some(inner) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let inner = inner.strip_prefix("json").unwrap_or(inner);
    let inner = inner.strip_suffix("```").unwrap_or(inner);
    inner.trim()
}

/// Parse the model reply into a typed report.
///
/// A reply that is not a JSON object at all is an error. Within a valid
/// object the parse is lenient: interaction entries that fail to
/// deserialize are skipped, a missing summary becomes empty, and a
/// missing or unrecognized risk score falls back to `Moderate`.
pub fn parse_model_report(content: &str) -> Result<ModelReport, ReportError> {
    #[derive(Deserialize)]
    struct RawReport {
        interactions: Option<Vec<serde_json::Value>>,
        summary: Option<String>,
        risk_score: Option<serde_json::Value>,
    }

    let json_str = strip_code_fences(content);
    let raw: RawReport = serde_json::from_str(json_str).map_err(|_| {
        ReportError::InvalidModelJson {
            excerpt: truncate_chars(content.trim(), ERROR_EXCERPT_MAX_CHARS),
        }
    })?;

    let interactions: Vec<Interaction> = parse_array_lenient(raw.interactions.as_deref());
    let risk_score = raw
        .risk_score
        .and_then(|value| serde_json::from_value(value).ok())
        .unwrap_or(RiskScore::Moderate);

    Ok(ModelReport {
        interactions,
        summary: raw.summary.unwrap_or_default(),
        risk_score,
    })
}

/// Parse an array leniently — skip items that fail to deserialize.
fn parse_array_lenient<T: for<'de> Deserialize<'de>>(
    items: Option<&[serde_json::Value]>,
) -> Vec<T> {
    match items {
        None => vec![],
        Some(values) => values
            .iter()
            .filter_map(|value| serde_json::from_value(value.clone()).ok())
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::types::Severity;

    fn sample_reply() -> &'static str {
        r#"{
            "interactions": [
                {
                    "drug1": "Warfarin",
                    "drug2": "Aspirin",
                    "severity": "major",
                    "interaction_type": "Pharmacodynamic",
                    "mechanism": "Additive antiplatelet and anticoagulant effects",
                    "clinical_significance": "Substantially increased bleeding risk",
                    "recommendation": "Avoid combination unless clearly indicated"
                }
            ],
            "summary": "High-risk combination.",
            "risk_score": "high"
        }"#
    }

    #[test]
    fn parses_plain_json_reply() {
        let report = parse_model_report(sample_reply()).unwrap();
        assert_eq!(report.interactions.len(), 1);
        assert_eq!(report.interactions[0].drug1, "Warfarin");
        assert_eq!(report.interactions[0].severity, Severity::Major);
        assert_eq!(report.summary, "High-risk combination.");
        assert_eq!(report.risk_score, RiskScore::High);
    }

    #[test]
    fn strips_bare_fences() {
        let fenced = format!("```\n{}\n```", sample_reply());
        let report = parse_model_report(&fenced).unwrap();
        assert_eq!(report.risk_score, RiskScore::High);
    }

    #[test]
    fn strips_json_fences_and_whitespace() {
        let fenced = format!("  ```json\n{}\n```  ", sample_reply());
        let report = parse_model_report(&fenced).unwrap();
        assert_eq!(report.interactions.len(), 1);
    }

    #[test]
    fn unfenced_content_passes_through() {
        assert_eq!(strip_code_fences("  {\"a\": 1}  "), "{\"a\": 1}");
    }

    #[test]
    fn non_json_reply_is_an_error_with_excerpt() {
        let err = parse_model_report("I cannot analyze these medications.").unwrap_err();
        match err {
            ReportError::InvalidModelJson { excerpt } => {
                assert!(excerpt.contains("cannot analyze"));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn error_excerpt_is_truncated() {
        let long = "x".repeat(2000);
        let err = parse_model_report(&long).unwrap_err();
        match err {
            ReportError::InvalidModelJson { excerpt } => {
                assert_eq!(excerpt.chars().count(), 500);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn bad_interaction_entries_are_skipped() {
        let reply = r#"{
            "interactions": [
                {"drug1": "A", "drug2": "B", "severity": "catastrophic",
                 "interaction_type": "", "mechanism": "", "clinical_significance": "",
                 "recommendation": ""},
                {"drug1": "Warfarin", "drug2": "Aspirin", "severity": "minor",
                 "interaction_type": "Pharmacodynamic", "mechanism": "m",
                 "clinical_significance": "c", "recommendation": "r"}
            ],
            "summary": "Mixed quality reply.",
            "risk_score": "low"
        }"#;
        let report = parse_model_report(reply).unwrap();
        assert_eq!(report.interactions.len(), 1);
        assert_eq!(report.interactions[0].severity, Severity::Minor);
    }

    #[test]
    fn missing_fields_get_defaults() {
        let report = parse_model_report(r#"{"interactions": []}"#).unwrap();
        assert!(report.interactions.is_empty());
        assert_eq!(report.summary, "");
        assert_eq!(report.risk_score, RiskScore::Moderate);
    }

    #[test]
    fn unrecognized_risk_score_falls_back() {
        let report =
            parse_model_report(r#"{"interactions": [], "risk_score": "extreme"}"#).unwrap();
        assert_eq!(report.risk_score, RiskScore::Moderate);
    }
}
