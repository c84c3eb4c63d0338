//! Default taxonomy for the preferences screen.
//!
//! Each entry pairs the canonical backend key stored in the preference
//! document with the label shown to the user. Edits are made against entries,
//! so the working copy only ever holds keys.

use super::preferences::PreferenceKind;

/// One selectable taxonomy option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogEntry {
    pub key: &'static str,
    pub label: &'static str,
}

const fn entry(key: &'static str, label: &'static str) -> CatalogEntry {
    CatalogEntry { key, label }
}

pub const SUBSPECIALTIES: &[CatalogEntry] = &[
    entry("Vascular Neurology (Stroke)", "Vascular Neurology (Stroke)"),
    entry("Epilepsy", "Epilepsy"),
    entry("Movement Disorders", "Movement Disorders"),
    entry("Neuromuscular", "Neuromuscular"),
    entry("Multiple Sclerosis & Neuroimmunology", "Multiple Sclerosis & Neuroimmunology"),
    entry("Cognitive & Behavioral Neurology (Dementia)", "Cognitive & Behavioral Neurology (Dementia)"),
    entry("Neuro-Oncology", "Neuro-Oncology"),
    entry("Headache & Pain", "Headache & Pain"),
    entry("Neurocritical Care", "Neurocritical Care"),
    entry("Pediatric Neurology", "Pediatric Neurology"),
    entry("Neuro-Ophthalmology", "Neuro-Ophthalmology"),
    entry("Neuro-Infectious Disease", "Neuro-Infectious Disease"),
];

pub const RESEARCH_TYPES: &[CatalogEntry] = &[
    entry("Randomized Controlled Trial", "Randomized Controlled Trial"),
    entry("Systematic Review & Meta-Analysis", "Systematic Review & Meta-Analysis"),
    entry("Guidelines & Consensus", "Guidelines & Consensus"),
    entry("Case Report & Series", "Case Report & Series"),
    entry("Review Article", "Review Article"),
    entry("Observational Study (Cohort/Case-Control)", "Observational Study"),
    entry("Basic Science / Preclinical", "Basic Science / Preclinical"),
];

/// Entries for one preference kind, in display order.
#[must_use]
pub const fn entries(kind: PreferenceKind) -> &'static [CatalogEntry] {
    match kind {
        PreferenceKind::Subspecialty => SUBSPECIALTIES,
        PreferenceKind::ResearchType => RESEARCH_TYPES,
    }
}

/// Canonical keys for one preference kind.
#[must_use]
pub fn keys(kind: PreferenceKind) -> Vec<&'static str> {
    entries(kind).iter().map(|e| e.key).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_can_differ_from_keys() {
        let observational = RESEARCH_TYPES
            .iter()
            .find(|e| e.label == "Observational Study")
            .unwrap();
        assert_eq!(observational.key, "Observational Study (Cohort/Case-Control)");
    }

    #[test]
    fn keys_are_unique() {
        for kind in [PreferenceKind::Subspecialty, PreferenceKind::ResearchType] {
            let keys = keys(kind);
            let unique: std::collections::HashSet<_> = keys.iter().collect();
            assert_eq!(unique.len(), keys.len());
        }
    }
}
