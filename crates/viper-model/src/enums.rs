//! Closed enumerations for values the pipeline receives as strings.
//!
//! Language codes and translation domains arrive from the CLI and from
//! reference-data filenames. Parsing them up front keeps invalid values
//! from leaking into the artifact.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Output language for notices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    En,
    Fr,
}

impl Language {
    /// Two-letter ISO 639-1 code, as stored in the artifact.
    pub fn code(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Fr => "fr",
        }
    }

    /// All valid codes, for CLI help and error messages.
    pub fn all_codes() -> &'static [&'static str] {
        &["en", "fr"]
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "en" => Ok(Language::En),
            "fr" => Ok(Language::Fr),
            other => Err(format!(
                "Unknown language: {other}. Valid options: {}",
                Language::all_codes().join(", ")
            )),
        }
    }
}

/// Display context for disease translations.
///
/// The same canonical disease may have different localized phrasing in the
/// overdue list than in the immunization-history chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum TranslationDomain {
    DiseasesOverdue,
    DiseasesChart,
}

impl TranslationDomain {
    /// Name as used in translation-table filenames (`{lang}_{domain}.json`).
    pub fn as_str(&self) -> &'static str {
        match self {
            TranslationDomain::DiseasesOverdue => "diseases_overdue",
            TranslationDomain::DiseasesChart => "diseases_chart",
        }
    }
}

impl fmt::Display for TranslationDomain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TranslationDomain {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "diseases_overdue" => Ok(TranslationDomain::DiseasesOverdue),
            "diseases_chart" => Ok(TranslationDomain::DiseasesChart),
            other => Err(format!(
                "Unknown translation domain: {other}. Valid options: diseases_overdue, diseases_chart"
            )),
        }
    }
}
