//! Interaction check orchestration.
//!
//! One linear, strictly sequential pass: N label lookups, N*(N-1)/2
//! adverse-event lookups, prompt assembly, one model call, parse, enrich.
//! openFDA failures are absorbed inside the client; only the model call
//! can fail the check.

use std::collections::BTreeMap;

use crate::config::Config;
use crate::formulary::{self, title_case};
use crate::nim::{ChatCompletion, NimClient};
use crate::openfda::{DrugData, DrugLabel, OpenFdaClient};

use super::parser::parse_model_report;
use super::prompt::{build_check_prompt, SYSTEM_PROMPT};
use super::types::{
    CheckResponse, PairCount, DATA_SOURCES, MAX_MEDICATIONS, MIN_MEDICATIONS, POWERED_BY,
};
use super::ReportError;

/// Runs the full check pipeline. Holds the outbound clients behind their
/// trait seams so tests can substitute mocks.
pub struct InteractionChecker {
    drug_data: Box<dyn DrugData>,
    chat: Box<dyn ChatCompletion>,
    model: String,
}

impl InteractionChecker {
    pub fn new(
        drug_data: Box<dyn DrugData>,
        chat: Box<dyn ChatCompletion>,
        model: String,
    ) -> Self {
        Self {
            drug_data,
            chat,
            model,
        }
    }

    /// Wire up the real openFDA and NIM clients from configuration.
    ///
    /// Constructs blocking HTTP clients; call off the async runtime.
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            Box::new(OpenFdaClient::new(&config.openfda_base_url)),
            Box::new(NimClient::new(
                &config.nim_base_url,
                &config.api_key,
                &config.model,
            )),
            config.model.clone(),
        )
    }

    /// Run one interaction check over 2-8 medication names.
    pub fn check(&self, medications: &[String]) -> Result<CheckResponse, ReportError> {
        if medications.len() < MIN_MEDICATIONS {
            return Err(ReportError::TooFewMedications);
        }
        if medications.len() > MAX_MEDICATIONS {
            return Err(ReportError::TooManyMedications);
        }

        let meds: Vec<String> = medications.iter().map(|m| m.trim().to_string()).collect();
        tracing::info!(count = meds.len(), "Starting interaction check");

        // Best-effort enrichment, one blocking call at a time.
        let labels: Vec<(String, DrugLabel)> = meds
            .iter()
            .map(|med| (med.clone(), self.drug_data.fetch_label(med)))
            .collect();

        let mut co_occurrences = Vec::new();
        for i in 0..meds.len() {
            for j in (i + 1)..meds.len() {
                co_occurrences.push(PairCount {
                    drug1: meds[i].clone(),
                    drug2: meds[j].clone(),
                    reports: self.drug_data.adverse_event_count(&meds[i], &meds[j]),
                });
            }
        }

        let labels_found = labels.iter().filter(|(_, label)| label.found).count();
        tracing::debug!(
            labels_found,
            pairs = co_occurrences.len(),
            "openFDA enrichment complete"
        );

        let prompt = build_check_prompt(&meds, &labels, &co_occurrences);
        let content = self.chat.complete(SYSTEM_PROMPT, &prompt)?;
        let report = parse_model_report(&content)?;

        let mut drug_details = BTreeMap::new();
        for med in &meds {
            if let Some(info) = formulary::lookup(med) {
                drug_details.insert(title_case(med), *info);
            }
        }

        tracing::info!(
            interactions = report.interactions.len(),
            risk_score = ?report.risk_score,
            "Interaction check complete"
        );

        Ok(CheckResponse {
            interactions: report.interactions,
            summary: report.summary,
            risk_score: report.risk_score,
            drug_details,
            model_used: self.model.clone(),
            powered_by: POWERED_BY,
            data_sources: DATA_SOURCES,
        })
    }
}
