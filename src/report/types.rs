use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::formulary::DrugInfo;

/// Request bounds for one interaction check.
pub const MIN_MEDICATIONS: usize = 2;
pub const MAX_MEDICATIONS: usize = 8;

/// Body of `POST /api/check`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckRequest {
    pub medications: Vec<String>,
}

/// Severity tier assigned by the model to one interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Major,
    Moderate,
    Minor,
}

/// Overall risk of the medication combination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskScore {
    Low,
    Moderate,
    High,
    Critical,
}

/// One pairwise interaction as reasoned by the model.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Interaction {
    pub drug1: String,
    pub drug2: String,
    pub severity: Severity,
    pub interaction_type: String,
    pub mechanism: String,
    pub clinical_significance: String,
    pub recommendation: String,
}

/// The model's reply after fence stripping and JSON parsing.
#[derive(Debug, Clone)]
pub struct ModelReport {
    pub interactions: Vec<Interaction>,
    pub summary: String,
    pub risk_score: RiskScore,
}

/// FAERS co-occurrence count for one unordered drug pair.
#[derive(Debug, Clone)]
pub struct PairCount {
    pub drug1: String,
    pub drug2: String,
    pub reports: u64,
}

/// Full response of `POST /api/check`: the model report plus local
/// enrichment and provenance fields.
#[derive(Debug, Clone, Serialize)]
pub struct CheckResponse {
    pub interactions: Vec<Interaction>,
    pub summary: String,
    pub risk_score: RiskScore,
    pub drug_details: BTreeMap<String, DrugInfo>,
    pub model_used: String,
    pub powered_by: &'static str,
    pub data_sources: [&'static str; 3],
}

pub const POWERED_BY: &str = "NVIDIA NIM + Nemotron";
pub const DATA_SOURCES: [&str; 3] = [
    "Local Drug Database",
    "openFDA Drug Labels",
    "FDA FAERS Adverse Events",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_uses_lowercase_wire_form() {
        let severity: Severity = serde_json::from_str("\"major\"").unwrap();
        assert_eq!(severity, Severity::Major);
        assert_eq!(serde_json::to_string(&Severity::Minor).unwrap(), "\"minor\"");
    }

    #[test]
    fn unknown_severity_is_rejected() {
        let result: Result<Severity, _> = serde_json::from_str("\"catastrophic\"");
        assert!(result.is_err());
    }

    #[test]
    fn risk_score_round_trips() {
        for (text, score) in [
            ("\"low\"", RiskScore::Low),
            ("\"moderate\"", RiskScore::Moderate),
            ("\"high\"", RiskScore::High),
            ("\"critical\"", RiskScore::Critical),
        ] {
            let parsed: RiskScore = serde_json::from_str(text).unwrap();
            assert_eq!(parsed, score);
        }
    }

    #[test]
    fn check_request_deserializes() {
        let request: CheckRequest =
            serde_json::from_str(r#"{"medications": ["warfarin", "aspirin"]}"#).unwrap();
        assert_eq!(request.medications.len(), 2);
    }
}
