//! openFDA client — drug label lookups and FAERS adverse-event counts.
//!
//! Both operations are best-effort enrichment: the public API has no data
//! for many drugs and is rate-limited without a key, so every failure
//! (network, non-2xx, malformed body, empty result set) collapses to
//! "no data" rather than an error. Callers never see an `OpenFdaError`;
//! it exists to keep the failure paths legible and logged.

use std::collections::HashMap;
use std::time::Duration;

use serde::Deserialize;
use thiserror::Error;

/// Sent on every openFDA request.
const USER_AGENT: &str = "DrugSafeAI/1.0";

/// Per-call socket timeout. Lookups are sequential, so this bounds the
/// worst-case enrichment time per drug/pair.
const LOOKUP_TIMEOUT_SECS: u64 = 10;

// Label sections are truncated to keep the assembled prompt manageable.
const INTERACTIONS_MAX_CHARS: usize = 1500;
const WARNINGS_MAX_CHARS: usize = 800;
const INDICATIONS_MAX_CHARS: usize = 500;
const MECHANISM_MAX_CHARS: usize = 500;

#[derive(Error, Debug)]
pub enum OpenFdaError {
    #[error("HTTP client error: {0}")]
    HttpClient(String),

    #[error("openFDA returned error (status {status})")]
    Status { status: u16 },

    #[error("Response parsing error: {0}")]
    ResponseParsing(String),
}

/// Extract of an openFDA drug label. `found == false` means the API had
/// no record for the drug (or the lookup failed); all fields empty.
#[derive(Debug, Clone, Default)]
pub struct DrugLabel {
    pub found: bool,
    pub brand_name: Option<String>,
    pub generic_name: Option<String>,
    pub drug_interactions: Option<String>,
    pub warnings: Option<String>,
    pub indications_and_usage: Option<String>,
    pub mechanism_of_action: Option<String>,
}

/// Seam over the two openFDA operations so the checker can be exercised
/// without network access.
pub trait DrugData: Send + Sync {
    /// Label data for one drug; a default (not-found) label on any failure.
    fn fetch_label(&self, drug: &str) -> DrugLabel;

    /// Number of FAERS reports co-mentioning both drugs; 0 on any failure.
    fn adverse_event_count(&self, drug1: &str, drug2: &str) -> u64;
}

/// Blocking HTTP client against the public openFDA API.
pub struct OpenFdaClient {
    base_url: String,
    client: reqwest::blocking::Client,
}

impl OpenFdaClient {
    pub fn new(base_url: &str) -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(LOOKUP_TIMEOUT_SECS))
            .user_agent(USER_AGENT)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    fn try_fetch_label(&self, drug: &str) -> Result<DrugLabel, OpenFdaError> {
        let url = format!("{}/drug/label.json", self.base_url);
        // Generic name is the most reliable label index.
        let search = format!("openfda.generic_name:\"{}\"", drug.trim().to_lowercase());

        let response = self
            .client
            .get(&url)
            .query(&[("search", search.as_str()), ("limit", "1")])
            .send()
            .map_err(|e| OpenFdaError::HttpClient(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(OpenFdaError::Status {
                status: status.as_u16(),
            });
        }

        let parsed: LabelResponse = response
            .json()
            .map_err(|e| OpenFdaError::ResponseParsing(e.to_string()))?;

        Ok(label_from_response(parsed))
    }

    fn try_adverse_event_count(&self, drug1: &str, drug2: &str) -> Result<u64, OpenFdaError> {
        let url = format!("{}/drug/event.json", self.base_url);
        let search = format!(
            "patient.drug.openfda.generic_name:\"{}\" AND patient.drug.openfda.generic_name:\"{}\"",
            drug1.trim().to_lowercase(),
            drug2.trim().to_lowercase()
        );

        let response = self
            .client
            .get(&url)
            .query(&[("search", search.as_str()), ("limit", "1")])
            .send()
            .map_err(|e| OpenFdaError::HttpClient(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(OpenFdaError::Status {
                status: status.as_u16(),
            });
        }

        let parsed: EventResponse = response
            .json()
            .map_err(|e| OpenFdaError::ResponseParsing(e.to_string()))?;

        Ok(event_total(parsed))
    }
}

impl DrugData for OpenFdaClient {
    fn fetch_label(&self, drug: &str) -> DrugLabel {
        match self.try_fetch_label(drug) {
            Ok(label) => label,
            Err(e) => {
                // openFDA has no data for many drugs; treat as absent.
                tracing::debug!(drug = %drug, error = %e, "openFDA label lookup failed");
                DrugLabel::default()
            }
        }
    }

    fn adverse_event_count(&self, drug1: &str, drug2: &str) -> u64 {
        match self.try_adverse_event_count(drug1, drug2) {
            Ok(count) => count,
            Err(e) => {
                tracing::debug!(
                    drug1 = %drug1,
                    drug2 = %drug2,
                    error = %e,
                    "openFDA adverse event lookup failed"
                );
                0
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

// Label fields come back as arrays of strings; only the first entry is used.

#[derive(Deserialize)]
struct LabelResponse {
    #[serde(default)]
    results: Vec<LabelRecord>,
}

#[derive(Deserialize, Default)]
struct LabelRecord {
    #[serde(default)]
    openfda: OpenFdaFields,
    drug_interactions: Option<Vec<String>>,
    warnings: Option<Vec<String>>,
    indications_and_usage: Option<Vec<String>>,
    mechanism_of_action: Option<Vec<String>>,
}

#[derive(Deserialize, Default)]
struct OpenFdaFields {
    brand_name: Option<Vec<String>>,
    generic_name: Option<Vec<String>>,
}

#[derive(Deserialize)]
struct EventResponse {
    meta: Option<EventMeta>,
}

#[derive(Deserialize)]
struct EventMeta {
    results: Option<EventResultsMeta>,
}

#[derive(Deserialize)]
struct EventResultsMeta {
    total: Option<u64>,
}

fn label_from_response(response: LabelResponse) -> DrugLabel {
    let Some(record) = response.results.into_iter().next() else {
        return DrugLabel::default();
    };

    let first =
        |field: Option<Vec<String>>| field.and_then(|values| values.into_iter().next());

    DrugLabel {
        found: true,
        brand_name: first(record.openfda.brand_name),
        generic_name: first(record.openfda.generic_name),
        drug_interactions: first(record.drug_interactions)
            .map(|text| truncate_chars(&text, INTERACTIONS_MAX_CHARS)),
        warnings: first(record.warnings).map(|text| truncate_chars(&text, WARNINGS_MAX_CHARS)),
        indications_and_usage: first(record.indications_and_usage)
            .map(|text| truncate_chars(&text, INDICATIONS_MAX_CHARS)),
        mechanism_of_action: first(record.mechanism_of_action)
            .map(|text| truncate_chars(&text, MECHANISM_MAX_CHARS)),
    }
}

fn event_total(response: EventResponse) -> u64 {
    response
        .meta
        .and_then(|meta| meta.results)
        .and_then(|results| results.total)
        .unwrap_or(0)
}

/// Truncate to at most `max` characters, respecting UTF-8 boundaries.
pub fn truncate_chars(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}

// ---------------------------------------------------------------------------
// Mock
// ---------------------------------------------------------------------------

/// Mock drug data source for testing — serves labels and counts from maps.
#[derive(Default)]
pub struct MockDrugData {
    labels: HashMap<String, DrugLabel>,
    counts: HashMap<(String, String), u64>,
}

impl MockDrugData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_label(mut self, drug: &str, label: DrugLabel) -> Self {
        self.labels.insert(drug.to_lowercase(), label);
        self
    }

    pub fn with_count(mut self, drug1: &str, drug2: &str, count: u64) -> Self {
        self.counts
            .insert((drug1.to_lowercase(), drug2.to_lowercase()), count);
        self
    }
}

impl DrugData for MockDrugData {
    fn fetch_label(&self, drug: &str) -> DrugLabel {
        self.labels
            .get(&drug.trim().to_lowercase())
            .cloned()
            .unwrap_or_default()
    }

    fn adverse_event_count(&self, drug1: &str, drug2: &str) -> u64 {
        let key = (drug1.trim().to_lowercase(), drug2.trim().to_lowercase());
        let reversed = (key.1.clone(), key.0.clone());
        self.counts
            .get(&key)
            .or_else(|| self.counts.get(&reversed))
            .copied()
            .unwrap_or(0)
    }
}
