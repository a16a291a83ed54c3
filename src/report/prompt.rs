//! Prompt assembly — stitches the formulary, openFDA labels, and FAERS
//! counts into one instruction with a mandated JSON output schema.

use crate::formulary::{self, title_case};
use crate::openfda::{truncate_chars, DrugLabel};

use super::types::PairCount;

/// System message for every interaction check.
pub const SYSTEM_PROMPT: &str = "You are a clinical pharmacology expert. You analyze drug \
interactions with precision and return structured JSON responses. Always respond with valid \
JSON only.";

/// Warnings get a second, tighter cut inside the prompt.
const PROMPT_WARNINGS_MAX_CHARS: usize = 400;

/// Task description and output schema. Static tail of every prompt.
const TASK_AND_FORMAT: &str = r#"## Task
Analyze ALL pairwise drug interactions between these medications. Use BOTH the local drug database properties AND the FDA label data provided above to ground your analysis. For each interaction found, provide:

1. **Drug Pair**: The two drugs involved
2. **Severity**: Exactly one of: "major", "moderate", or "minor"
3. **Interaction Type**: e.g., Pharmacokinetic, Pharmacodynamic, or both
4. **Mechanism**: How the interaction occurs (enzyme inhibition/induction, additive effects, etc.)
5. **Clinical Significance**: What could happen to the patient
6. **Recommendation**: What a clinician should consider

If no interaction exists between a pair, skip it.

## IMPORTANT: Response Format
You MUST respond with ONLY valid JSON in this exact format, with no other text before or after:
{
  "interactions": [
    {
      "drug1": "Drug Name 1",
      "drug2": "Drug Name 2",
      "severity": "major|moderate|minor",
      "interaction_type": "Pharmacokinetic|Pharmacodynamic|Both",
      "mechanism": "Description of mechanism",
      "clinical_significance": "What could happen",
      "recommendation": "What to do about it"
    }
  ],
  "summary": "Brief overall assessment of this medication combination",
  "risk_score": "low|moderate|high|critical"
}

Respond with ONLY the JSON object. No markdown, no code fences, no explanation outside the JSON."#;

/// Build the user prompt for one interaction check.
///
/// `labels` carries one entry per requested medication (found or not);
/// `co_occurrences` one entry per unordered pair. Absent data simply
/// drops out of the prompt.
pub fn build_check_prompt(
    medications: &[String],
    labels: &[(String, DrugLabel)],
    co_occurrences: &[PairCount],
) -> String {
    let drug_context = build_drug_context(medications);
    let fda_context = build_fda_context(labels);
    let ae_context = build_adverse_event_context(co_occurrences);

    let mut prompt = format!(
        "You are a clinical pharmacology AI assistant powered by NVIDIA Nemotron. Analyze \
potential drug-drug interactions for the following medications.\n\n\
## Medications & Known Properties\n{drug_context}\n{fda_context}\n{ae_context}\n\n"
    );
    prompt.push_str(TASK_AND_FORMAT);
    prompt
}

/// Formulary bullet per recognized drug, plus a note for unrecognized ones.
fn build_drug_context(medications: &[String]) -> String {
    let mut lines = Vec::new();
    let mut unrecognized = Vec::new();

    for med in medications {
        let name = med.trim();
        match formulary::lookup(name) {
            Some(info) => lines.push(format!(
                "- **{}**: Class: {} | Mechanism: {} | Metabolism: {} | Uses: {}",
                title_case(name),
                info.class,
                info.mechanism,
                info.metabolism,
                info.common_uses
            )),
            None => unrecognized.push(name.to_string()),
        }
    }

    let mut context = if lines.is_empty() {
        "No drug details available in local database.".to_string()
    } else {
        lines.join("\n")
    };

    if !unrecognized.is_empty() {
        context.push_str(&format!(
            "\n\nNote: The following medications were not found in the local database but \
should still be analyzed using your medical knowledge: {}",
            unrecognized.join(", ")
        ));
    }

    context
}

/// Label section — only drugs openFDA actually had a record for.
fn build_fda_context(labels: &[(String, DrugLabel)]) -> String {
    let mut sections = Vec::new();

    for (name, label) in labels {
        if !label.found {
            continue;
        }
        let mut parts = vec![format!("- **{}** (FDA Label)", title_case(name))];
        if let Some(generic) = &label.generic_name {
            parts.push(format!("  Generic: {generic}"));
        }
        if let Some(interactions) = &label.drug_interactions {
            parts.push(format!("  FDA Drug Interactions: {interactions}"));
        }
        if let Some(mechanism) = &label.mechanism_of_action {
            parts.push(format!("  FDA Mechanism: {mechanism}"));
        }
        if let Some(warnings) = &label.warnings {
            parts.push(format!(
                "  FDA Warnings (excerpt): {}",
                truncate_chars(warnings, PROMPT_WARNINGS_MAX_CHARS)
            ));
        }
        sections.push(parts.join("\n"));
    }

    if sections.is_empty() {
        return String::new();
    }

    format!(
        "\n\n## FDA Drug Label Data (from openFDA)\n{}",
        sections.join("\n\n")
    )
}

/// FAERS section — only pairs with at least one co-occurrence report.
fn build_adverse_event_context(co_occurrences: &[PairCount]) -> String {
    let lines: Vec<String> = co_occurrences
        .iter()
        .filter(|pair| pair.reports > 0)
        .map(|pair| {
            format!(
                "- {} + {}: {} adverse event reports in FDA FAERS database",
                title_case(&pair.drug1),
                title_case(&pair.drug2),
                format_report_count(pair.reports)
            )
        })
        .collect();

    if lines.is_empty() {
        return String::new();
    }

    format!(
        "\n\n## FDA Adverse Event Co-occurrence Data\n{}\n(Higher counts may indicate a \
signal but also reflect common co-prescribing. Use clinical judgment.)",
        lines.join("\n")
    )
}

/// Group digits with thousands separators: 12847 -> "12,847".
fn format_report_count(count: u64) -> String {
    let digits = count.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, digit) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meds(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn system_prompt_demands_json() {
        assert!(SYSTEM_PROMPT.contains("valid JSON only"));
        assert!(SYSTEM_PROMPT.contains("clinical pharmacology"));
    }

    #[test]
    fn prompt_lists_recognized_drugs_with_metadata() {
        let prompt = build_check_prompt(&meds(&["warfarin", "aspirin"]), &[], &[]);
        assert!(prompt.contains("- **Warfarin**: Class: Anticoagulant"));
        assert!(prompt.contains("- **Aspirin**: Class: NSAID / Antiplatelet"));
        assert!(prompt.contains("## Medications & Known Properties"));
        assert!(!prompt.contains("Note: The following medications"));
    }

    #[test]
    fn unrecognized_drugs_get_analysis_note() {
        let prompt = build_check_prompt(&meds(&["warfarin", "examplinib"]), &[], &[]);
        assert!(prompt.contains("not found in the local database"));
        assert!(prompt.contains("examplinib"));
    }

    #[test]
    fn no_recognized_drugs_uses_placeholder() {
        let prompt = build_check_prompt(&meds(&["examplinib", "placebium"]), &[], &[]);
        assert!(prompt.contains("No drug details available in local database."));
    }

    #[test]
    fn fda_section_present_only_when_labels_found() {
        let without = build_check_prompt(&meds(&["warfarin", "aspirin"]), &[], &[]);
        assert!(!without.contains("## FDA Drug Label Data"));

        let labels = vec![(
            "warfarin".to_string(),
            DrugLabel {
                found: true,
                generic_name: Some("warfarin sodium".into()),
                drug_interactions: Some("CYP2C9 inhibitors increase exposure.".into()),
                warnings: Some("Bleeding risk.".into()),
                ..Default::default()
            },
        )];
        let with = build_check_prompt(&meds(&["warfarin", "aspirin"]), &labels, &[]);
        assert!(with.contains("## FDA Drug Label Data (from openFDA)"));
        assert!(with.contains("- **Warfarin** (FDA Label)"));
        assert!(with.contains("  Generic: warfarin sodium"));
        assert!(with.contains("  FDA Drug Interactions: CYP2C9"));
        assert!(with.contains("  FDA Warnings (excerpt): Bleeding risk."));
    }

    #[test]
    fn warnings_excerpt_is_tightened_for_prompt() {
        let labels = vec![(
            "warfarin".to_string(),
            DrugLabel {
                found: true,
                warnings: Some("w".repeat(800)),
                ..Default::default()
            },
        )];
        let prompt = build_check_prompt(&meds(&["warfarin", "aspirin"]), &labels, &[]);
        let excerpt_line = prompt
            .lines()
            .find(|line| line.starts_with("  FDA Warnings (excerpt): "))
            .unwrap();
        let excerpt = excerpt_line.trim_start_matches("  FDA Warnings (excerpt): ");
        assert_eq!(excerpt.chars().count(), 400);
    }

    #[test]
    fn adverse_event_section_formats_counts() {
        let pairs = vec![
            PairCount {
                drug1: "warfarin".into(),
                drug2: "aspirin".into(),
                reports: 12847,
            },
            PairCount {
                drug1: "warfarin".into(),
                drug2: "metformin".into(),
                reports: 0,
            },
        ];
        let prompt = build_check_prompt(&meds(&["warfarin", "aspirin", "metformin"]), &[], &pairs);
        assert!(prompt.contains("## FDA Adverse Event Co-occurrence Data"));
        assert!(prompt
            .contains("- Warfarin + Aspirin: 12,847 adverse event reports in FDA FAERS database"));
        assert!(!prompt.contains("Warfarin + Metformin"));
        assert!(prompt.contains("Use clinical judgment."));
    }

    #[test]
    fn zero_count_pairs_omit_the_section() {
        let pairs = vec![PairCount {
            drug1: "warfarin".into(),
            drug2: "aspirin".into(),
            reports: 0,
        }];
        let prompt = build_check_prompt(&meds(&["warfarin", "aspirin"]), &[], &pairs);
        assert!(!prompt.contains("## FDA Adverse Event Co-occurrence Data"));
    }

    #[test]
    fn prompt_ends_with_schema_mandate() {
        let prompt = build_check_prompt(&meds(&["warfarin", "aspirin"]), &[], &[]);
        assert!(prompt.contains("\"severity\": \"major|moderate|minor\""));
        assert!(prompt.contains("\"risk_score\": \"low|moderate|high|critical\""));
        assert!(prompt.ends_with("No markdown, no code fences, no explanation outside the JSON."));
    }

    #[test]
    fn report_counts_grouped_by_thousands() {
        assert_eq!(format_report_count(0), "0");
        assert_eq!(format_report_count(999), "999");
        assert_eq!(format_report_count(1000), "1,000");
        assert_eq!(format_report_count(12847), "12,847");
        assert_eq!(format_report_count(1234567), "1,234,567");
    }
}
