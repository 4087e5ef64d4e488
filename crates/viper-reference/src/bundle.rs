//! The reference bundle: every lookup table the pipeline needs, loaded
//! once at startup and passed read-only through the run.
//!
//! There is deliberately no module-level cache here. The bundle is an
//! explicit constructed object so tests can swap in fixtures and so no
//! hidden global state survives between runs.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Deserialize;

use viper_model::{Language, TranslationDomain};

/// A vaccine's disease coverage in `vaccine_reference.json`. Combination
/// vaccines list several diseases; single-target entries may be a bare
/// string.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum DiseaseCoverage {
    One(String),
    Many(Vec<String>),
}

impl DiseaseCoverage {
    pub fn diseases(&self) -> Vec<String> {
        match self {
            DiseaseCoverage::One(name) => vec![name.clone()],
            DiseaseCoverage::Many(names) => names.clone(),
        }
    }
}

/// Run parameters from `parameters.yaml`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RunParameters {
    /// Notice delivery date used for the over-16 check. Absent means the
    /// check falls back to the numeric age column or the documented
    /// `false` default.
    pub date_notice_delivery: Option<NaiveDate>,
    /// Ordered allow-list of diseases shown individually in the chart.
    /// Empty means chart collapsing is disabled and all diseases pass
    /// through unfiltered.
    pub chart_diseases_header: Vec<String>,
    /// Placeholder vaccine names meaning "no specific vaccine recorded",
    /// discarded during history parsing.
    pub replace_unspecified: Option<Vec<String>>,
}

impl RunParameters {
    /// Placeholder strings used when the parameters file does not
    /// override them. These are the registry export's literal spellings.
    pub fn default_replace_unspecified() -> Vec<String> {
        [
            "-unspecified",
            "unspecified",
            "Not Specified",
            "Not specified",
            "Not Specified-unspecified",
        ]
        .iter()
        .map(|s| (*s).to_string())
        .collect()
    }

    pub fn replace_unspecified(&self) -> Vec<String> {
        self.replace_unspecified
            .clone()
            .unwrap_or_else(Self::default_replace_unspecified)
    }
}

/// All reference tables for one run. Read-only after construction.
#[derive(Debug, Clone, Default)]
pub struct ReferenceBundle {
    /// Vaccine code → diseases it protects against.
    pub vaccine_reference: BTreeMap<String, DiseaseCoverage>,
    /// Raw disease string → canonical English disease name.
    pub normalization: BTreeMap<String, String>,
    /// (domain, language) → canonical name → localized display string.
    pub translations: BTreeMap<(TranslationDomain, Language), BTreeMap<String, String>>,
    pub parameters: RunParameters,
}

impl ReferenceBundle {
    /// Translation table for one display context, empty when the file
    /// was absent.
    pub fn translations_for(
        &self,
        domain: TranslationDomain,
        language: Language,
    ) -> Option<&BTreeMap<String, String>> {
        self.translations.get(&(domain, language))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coverage_flattens_one_and_many() {
        let one = DiseaseCoverage::One("Measles".to_string());
        assert_eq!(one.diseases(), vec!["Measles"]);
        let many = DiseaseCoverage::Many(vec!["Measles".to_string(), "Mumps".to_string()]);
        assert_eq!(many.diseases().len(), 2);
    }

    #[test]
    fn default_placeholders_cover_registry_spellings() {
        let defaults = RunParameters::default_replace_unspecified();
        assert!(defaults.contains(&"unspecified".to_string()));
        assert!(defaults.contains(&"Not Specified-unspecified".to_string()));
    }
}
