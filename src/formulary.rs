//! Curated drug reference table.
//!
//! A small formulary of common medications with pharmacology metadata that
//! grounds the model prompt. A real deployment would sit on a full
//! FDA/DrugBank integration; this table is deliberately a demo-scale subset.

use serde::Serialize;

/// Pharmacology metadata for one drug. Static, never mutated at runtime.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct DrugInfo {
    pub class: &'static str,
    pub mechanism: &'static str,
    pub common_uses: &'static str,
    pub metabolism: &'static str,
}

/// The formulary, keyed by lowercase generic name.
const FORMULARY: &[(&str, DrugInfo)] = &[
    (
        "warfarin",
        DrugInfo {
            class: "Anticoagulant",
            mechanism: "Vitamin K antagonist; inhibits clotting factors II, VII, IX, X",
            common_uses: "Blood clot prevention, atrial fibrillation, DVT, PE",
            metabolism: "CYP2C9, CYP3A4, CYP1A2",
        },
    ),
    (
        "aspirin",
        DrugInfo {
            class: "NSAID / Antiplatelet",
            mechanism: "Irreversibly inhibits COX-1 and COX-2; blocks thromboxane A2",
            common_uses: "Pain relief, fever reduction, cardiovascular protection",
            metabolism: "Hepatic hydrolysis, CYP2C9",
        },
    ),
    (
        "omeprazole",
        DrugInfo {
            class: "Proton Pump Inhibitor (PPI)",
            mechanism: "Irreversibly inhibits H+/K+ ATPase in gastric parietal cells",
            common_uses: "GERD, peptic ulcer disease, H. pylori eradication",
            metabolism: "CYP2C19, CYP3A4",
        },
    ),
    (
        "lisinopril",
        DrugInfo {
            class: "ACE Inhibitor",
            mechanism: "Inhibits angiotensin-converting enzyme, reducing angiotensin II",
            common_uses: "Hypertension, heart failure, post-MI",
            metabolism: "Not hepatically metabolized; renally excreted",
        },
    ),
    (
        "metformin",
        DrugInfo {
            class: "Biguanide",
            mechanism: "Decreases hepatic glucose production, increases insulin sensitivity",
            common_uses: "Type 2 diabetes mellitus",
            metabolism: "Not metabolized; renally excreted unchanged",
        },
    ),
    (
        "atorvastatin",
        DrugInfo {
            class: "HMG-CoA Reductase Inhibitor (Statin)",
            mechanism: "Inhibits HMG-CoA reductase, reducing cholesterol synthesis",
            common_uses: "Hyperlipidemia, cardiovascular risk reduction",
            metabolism: "CYP3A4",
        },
    ),
    (
        "metoprolol",
        DrugInfo {
            class: "Beta-1 Selective Blocker",
            mechanism: "Blocks beta-1 adrenergic receptors in the heart",
            common_uses: "Hypertension, angina, heart failure, post-MI",
            metabolism: "CYP2D6",
        },
    ),
    (
        "amlodipine",
        DrugInfo {
            class: "Calcium Channel Blocker (Dihydropyridine)",
            mechanism: "Blocks L-type calcium channels in vascular smooth muscle",
            common_uses: "Hypertension, angina",
            metabolism: "CYP3A4",
        },
    ),
    (
        "sertraline",
        DrugInfo {
            class: "SSRI (Selective Serotonin Reuptake Inhibitor)",
            mechanism: "Inhibits serotonin reuptake in the synaptic cleft",
            common_uses: "Depression, anxiety, OCD, PTSD, panic disorder",
            metabolism: "CYP2B6, CYP2C19, CYP3A4, CYP2D6",
        },
    ),
    (
        "gabapentin",
        DrugInfo {
            class: "Anticonvulsant / Analgesic",
            mechanism: "Binds alpha-2-delta subunit of voltage-gated calcium channels",
            common_uses: "Neuropathic pain, epilepsy, restless leg syndrome",
            metabolism: "Not metabolized; renally excreted unchanged",
        },
    ),
    (
        "levothyroxine",
        DrugInfo {
            class: "Thyroid Hormone",
            mechanism: "Synthetic T4; converted to active T3 in peripheral tissues",
            common_uses: "Hypothyroidism, thyroid cancer (TSH suppression)",
            metabolism: "Deiodination in liver, kidney, and other tissues",
        },
    ),
    (
        "ibuprofen",
        DrugInfo {
            class: "NSAID",
            mechanism: "Non-selective COX-1 and COX-2 inhibitor",
            common_uses: "Pain, inflammation, fever",
            metabolism: "CYP2C9, CYP2C19",
        },
    ),
    (
        "amoxicillin",
        DrugInfo {
            class: "Aminopenicillin (Beta-Lactam Antibiotic)",
            mechanism: "Inhibits bacterial cell wall synthesis by binding PBPs",
            common_uses: "Upper/lower respiratory infections, UTI, H. pylori",
            metabolism: "Hepatic (partial); renally excreted",
        },
    ),
    (
        "hydrochlorothiazide",
        DrugInfo {
            class: "Thiazide Diuretic",
            mechanism: "Inhibits Na+/Cl- cotransporter in distal convoluted tubule",
            common_uses: "Hypertension, edema",
            metabolism: "Not metabolized; renally excreted unchanged",
        },
    ),
    (
        "prednisone",
        DrugInfo {
            class: "Corticosteroid",
            mechanism: "Converted to prednisolone; modulates gene transcription via glucocorticoid receptor",
            common_uses: "Inflammatory conditions, autoimmune disorders, asthma exacerbations",
            metabolism: "CYP3A4 (converted to prednisolone in liver)",
        },
    ),
    (
        "clopidogrel",
        DrugInfo {
            class: "Antiplatelet (P2Y12 Inhibitor)",
            mechanism: "Irreversibly blocks P2Y12 ADP receptor on platelets",
            common_uses: "ACS, recent MI/stroke, peripheral artery disease, stent placement",
            metabolism: "CYP2C19, CYP3A4, CYP1A2",
        },
    ),
    (
        "fluoxetine",
        DrugInfo {
            class: "SSRI",
            mechanism: "Inhibits serotonin reuptake; strong CYP2D6 inhibitor",
            common_uses: "Depression, OCD, bulimia nervosa, panic disorder",
            metabolism: "CYP2D6, CYP2C9",
        },
    ),
    (
        "tramadol",
        DrugInfo {
            class: "Opioid Analgesic (Atypical)",
            mechanism: "Mu-opioid receptor agonist + serotonin/norepinephrine reuptake inhibitor",
            common_uses: "Moderate to moderately severe pain",
            metabolism: "CYP2D6, CYP3A4",
        },
    ),
    (
        "ciprofloxacin",
        DrugInfo {
            class: "Fluoroquinolone Antibiotic",
            mechanism: "Inhibits bacterial DNA gyrase and topoisomerase IV",
            common_uses: "UTI, respiratory infections, GI infections",
            metabolism: "CYP1A2 inhibitor; partially hepatic, renally excreted",
        },
    ),
    (
        "alprazolam",
        DrugInfo {
            class: "Benzodiazepine",
            mechanism: "Enhances GABA-A receptor activity",
            common_uses: "Anxiety disorders, panic disorder",
            metabolism: "CYP3A4",
        },
    ),
];

/// Look up a drug by name. Trims whitespace and ignores case.
pub fn lookup(name: &str) -> Option<&'static DrugInfo> {
    let key = name.trim().to_lowercase();
    FORMULARY
        .iter()
        .find(|(n, _)| *n == key)
        .map(|(_, info)| info)
}

/// All formulary drug names, title-cased and sorted. Used for autocomplete.
pub fn drug_list() -> Vec<String> {
    let mut names: Vec<String> = FORMULARY.iter().map(|(n, _)| title_case(n)).collect();
    names.sort();
    names
}

/// Capitalize the first letter of each whitespace-separated word.
pub fn title_case(name: &str) -> String {
    name.split_whitespace()
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_is_case_insensitive_and_trims() {
        assert!(lookup("warfarin").is_some());
        assert!(lookup("  Warfarin ").is_some());
        assert!(lookup("WARFARIN").is_some());
    }

    #[test]
    fn lookup_unknown_drug_returns_none() {
        assert!(lookup("unobtanium").is_none());
        assert!(lookup("").is_none());
    }

    #[test]
    fn warfarin_metadata() {
        let info = lookup("warfarin").unwrap();
        assert_eq!(info.class, "Anticoagulant");
        assert!(info.metabolism.contains("CYP2C9"));
    }

    #[test]
    fn drug_list_is_sorted_and_title_cased() {
        let drugs = drug_list();
        assert_eq!(drugs.len(), 20);
        assert_eq!(drugs.first().map(String::as_str), Some("Alprazolam"));
        assert_eq!(drugs.last().map(String::as_str), Some("Warfarin"));
        let mut sorted = drugs.clone();
        sorted.sort();
        assert_eq!(drugs, sorted);
    }

    #[test]
    fn title_case_handles_multiple_words() {
        assert_eq!(title_case("acetylsalicylic acid"), "Acetylsalicylic Acid");
        assert_eq!(title_case("warfarin"), "Warfarin");
        assert_eq!(title_case(""), "");
    }
}
