//! Filesystem loading for the reference bundle.
//!
//! Layout under the config directory:
//!
//! ```text
//! config/
//!   vaccine_reference.json
//!   disease_normalization.json
//!   parameters.yaml
//!   translations/
//!     en_diseases_overdue.json
//!     fr_diseases_chart.json
//!     ...
//! ```
//!
//! Missing optional files degrade to empty tables (the feature is simply
//! disabled). A file that exists but fails to parse is a configuration
//! error and aborts the run.

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::{debug, warn};

use viper_model::{Language, TranslationDomain};

use crate::bundle::{DiseaseCoverage, ReferenceBundle, RunParameters};

pub const VACCINE_REFERENCE_FILE: &str = "vaccine_reference.json";
pub const NORMALIZATION_FILE: &str = "disease_normalization.json";
pub const PARAMETERS_FILE: &str = "parameters.yaml";
pub const TRANSLATIONS_DIR: &str = "translations";

/// Load the full bundle for one run.
///
/// Translation tables are loaded for the requested language only; the
/// pipeline never consults another language mid-run.
pub fn load_bundle(config_dir: &Path, language: Language) -> Result<ReferenceBundle> {
    let vaccine_reference = load_vaccine_reference(config_dir)?;
    let normalization = load_normalization(config_dir)?;
    let parameters = load_parameters(config_dir)?;

    let mut translations = BTreeMap::new();
    for domain in [
        TranslationDomain::DiseasesOverdue,
        TranslationDomain::DiseasesChart,
    ] {
        let table = load_translations(config_dir, domain, language)?;
        translations.insert((domain, language), table);
    }

    Ok(ReferenceBundle {
        vaccine_reference,
        normalization,
        translations,
        parameters,
    })
}

fn load_vaccine_reference(config_dir: &Path) -> Result<BTreeMap<String, DiseaseCoverage>> {
    let path = config_dir.join(VACCINE_REFERENCE_FILE);
    if !path.exists() {
        warn!(path = %path.display(), "vaccine reference not found; codes will pass through unmapped");
        return Ok(BTreeMap::new());
    }
    let text = std::fs::read_to_string(&path)
        .with_context(|| format!("read vaccine reference: {}", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("parse vaccine reference: {}", path.display()))
}

fn load_normalization(config_dir: &Path) -> Result<BTreeMap<String, String>> {
    let path = config_dir.join(NORMALIZATION_FILE);
    if !path.exists() {
        debug!(path = %path.display(), "disease normalization map not found; tokens pass through");
        return Ok(BTreeMap::new());
    }
    let text = std::fs::read_to_string(&path)
        .with_context(|| format!("read normalization map: {}", path.display()))?;
    serde_json::from_str(&text)
        .with_context(|| format!("parse normalization map: {}", path.display()))
}

fn load_parameters(config_dir: &Path) -> Result<RunParameters> {
    let path = config_dir.join(PARAMETERS_FILE);
    if !path.exists() {
        debug!(path = %path.display(), "parameters file not found; using defaults");
        return Ok(RunParameters::default());
    }
    let text = std::fs::read_to_string(&path)
        .with_context(|| format!("read parameters: {}", path.display()))?;
    serde_yaml::from_str(&text).with_context(|| format!("parse parameters: {}", path.display()))
}

fn load_translations(
    config_dir: &Path,
    domain: TranslationDomain,
    language: Language,
) -> Result<BTreeMap<String, String>> {
    let path = config_dir
        .join(TRANSLATIONS_DIR)
        .join(format!("{}_{}.json", language.code(), domain.as_str()));
    if !path.exists() {
        debug!(path = %path.display(), "translation table not found; canonical names will be used");
        return Ok(BTreeMap::new());
    }
    let text = std::fs::read_to_string(&path)
        .with_context(|| format!("read translations: {}", path.display()))?;
    serde_json::from_str(&text).with_context(|| format!("parse translations: {}", path.display()))
}
