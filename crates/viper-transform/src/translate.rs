//! Canonical-to-display translation.
//!
//! Stage two of normalize→translate: canonical English disease names
//! become localized display strings per (domain, language). Missing
//! entries fall back to the canonical name; each unique missing triple
//! warns exactly once per run so large batches do not storm the log.

use std::collections::BTreeSet;

use tracing::warn;

use viper_model::{Language, TranslationDomain, WarningSet};
use viper_reference::ReferenceBundle;

/// Stateful translator for one run. Holds the set of already-reported
/// missing keys; there is intentionally no global cache behind it.
#[derive(Debug)]
pub struct Translator<'a> {
    bundle: &'a ReferenceBundle,
    language: Language,
    reported_missing: BTreeSet<(TranslationDomain, String)>,
}

impl<'a> Translator<'a> {
    pub fn new(bundle: &'a ReferenceBundle, language: Language) -> Self {
        Self {
            bundle,
            language,
            reported_missing: BTreeSet::new(),
        }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    /// Localized display label for a canonical disease name.
    ///
    /// Falls back to the canonical name when no translation exists,
    /// recording one warning per unique (domain, language, key).
    pub fn display_label(
        &mut self,
        domain: TranslationDomain,
        key: &str,
        warnings: &mut WarningSet,
    ) -> String {
        if let Some(label) = self
            .bundle
            .translations_for(domain, self.language)
            .and_then(|table| table.get(key))
        {
            return label.clone();
        }

        if self.reported_missing.insert((domain, key.to_string())) {
            warn!(
                domain = domain.as_str(),
                language = self.language.code(),
                key,
                "missing translation; using canonical name"
            );
            warnings.push(format!(
                "Missing translation for {domain} in language {}: {key}. Using canonical name.",
                self.language
            ));
        }
        key.to_string()
    }

    /// Translate a list in place, preserving order.
    pub fn display_labels(
        &mut self,
        domain: TranslationDomain,
        keys: &[String],
        warnings: &mut WarningSet,
    ) -> Vec<String> {
        keys.iter()
            .map(|key| self.display_label(domain, key, warnings))
            .collect()
    }
}
