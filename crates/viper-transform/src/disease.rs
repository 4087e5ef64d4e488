//! Disease-name normalization and dose-group enrichment.
//!
//! Stage one of the normalize→translate pipeline: raw tokens become
//! canonical English disease names, and parsed vaccine codes expand to
//! the diseases they protect against. Unknown tokens pass through
//! unchanged so data-entry variants surface for curation instead of
//! silently vanishing.

use viper_model::{DoseGroup, EnrichedDoseGroup};
use viper_reference::ReferenceBundle;

/// Literal bucket name for diseases outside the configured chart set.
pub const OTHER_BUCKET: &str = "Other";

/// Marker substituted for "unspecified" vaccine-code suffixes before
/// reference lookup.
const UNSPECIFIED_MARKER: &str = "*";

/// Normalize one raw disease token to its canonical English name.
/// Tokens absent from the normalization table pass through unchanged.
pub fn normalize_disease<'a>(token: &'a str, bundle: &'a ReferenceBundle) -> &'a str {
    let token = token.trim();
    bundle
        .normalization
        .get(token)
        .map(String::as_str)
        .unwrap_or(token)
}

/// Map a comma-separated overdue-disease string to canonical names.
/// Empty tokens are dropped; stray quotes are stripped.
pub fn overdue_diseases(raw: &str, bundle: &ReferenceBundle) -> Vec<String> {
    if raw.trim().is_empty() {
        return Vec::new();
    }
    raw.split(',')
        .map(|token| normalize_disease(token, bundle).replace(['\'', '"'], ""))
        .filter(|token| !token.trim().is_empty())
        .collect()
}

fn rewrite_unspecified(vaccine: &str) -> String {
    vaccine
        .replace("-unspecified", UNSPECIFIED_MARKER)
        .replace(" unspecified", UNSPECIFIED_MARKER)
}

/// Enrich dose groups with disease coverage.
///
/// Each vaccine code maps through the vaccine→disease reference table;
/// a combination vaccine expands to several diseases and an unknown
/// code yields itself. When a chart allow-list is configured, diseases
/// off the list are dropped and replaced by a single `"Other"` bucket
/// per group. An empty allow-list disables collapsing entirely.
pub fn enrich_dose_groups(
    groups: Vec<DoseGroup>,
    bundle: &ReferenceBundle,
) -> Vec<EnrichedDoseGroup> {
    let chart = &bundle.parameters.chart_diseases_header;
    groups
        .into_iter()
        .map(|group| {
            let vaccines: Vec<String> =
                group.vaccine.iter().map(|v| rewrite_unspecified(v)).collect();

            let mut diseases: Vec<String> = Vec::new();
            for vaccine in &vaccines {
                match bundle.vaccine_reference.get(vaccine) {
                    Some(coverage) => diseases.extend(coverage.diseases()),
                    None => diseases.push(vaccine.clone()),
                }
            }

            if !chart.is_empty() {
                let mut filtered: Vec<String> = Vec::new();
                let mut has_unmapped = false;
                for disease in diseases {
                    if chart.contains(&disease) {
                        filtered.push(disease);
                    } else {
                        has_unmapped = true;
                    }
                }
                if has_unmapped && !filtered.iter().any(|d| d == OTHER_BUCKET) {
                    filtered.push(OTHER_BUCKET.to_string());
                }
                diseases = filtered;
            }

            EnrichedDoseGroup {
                date_given: group.date_given,
                vaccine: vaccines,
                diseases,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use viper_reference::{DiseaseCoverage, RunParameters};

    use super::*;

    fn bundle_with_chart(chart: &[&str]) -> ReferenceBundle {
        let mut vaccine_reference = BTreeMap::new();
        vaccine_reference.insert(
            "MMR".to_string(),
            DiseaseCoverage::Many(vec![
                "Measles".to_string(),
                "Mumps".to_string(),
                "Rubella".to_string(),
            ]),
        );
        vaccine_reference.insert(
            "Var".to_string(),
            DiseaseCoverage::One("Varicella".to_string()),
        );
        let mut normalization = BTreeMap::new();
        normalization.insert("Poliomyelitis".to_string(), "Polio".to_string());
        ReferenceBundle {
            vaccine_reference,
            normalization,
            translations: BTreeMap::new(),
            parameters: RunParameters {
                date_notice_delivery: None,
                chart_diseases_header: chart.iter().map(|d| (*d).to_string()).collect(),
                replace_unspecified: None,
            },
        }
    }

    fn group(date: &str, vaccines: &[&str]) -> DoseGroup {
        DoseGroup {
            date_given: date.to_string(),
            vaccine: vaccines.iter().map(|v| (*v).to_string()).collect(),
        }
    }

    #[test]
    fn unknown_tokens_pass_through() {
        let bundle = bundle_with_chart(&[]);
        assert_eq!(normalize_disease("Poliomyelitis", &bundle), "Polio");
        assert_eq!(normalize_disease("Mystery Illness", &bundle), "Mystery Illness");
    }

    #[test]
    fn overdue_list_normalizes_and_cleans() {
        let bundle = bundle_with_chart(&[]);
        let diseases = overdue_diseases("Poliomyelitis, 'Measles', , Mumps", &bundle);
        assert_eq!(diseases, vec!["Polio", "Measles", "Mumps"]);
    }

    #[test]
    fn combination_vaccine_expands() {
        let bundle = bundle_with_chart(&[]);
        let enriched = enrich_dose_groups(vec![group("2020-01-01", &["MMR", "Var"])], &bundle);
        assert_eq!(
            enriched[0].diseases,
            vec!["Measles", "Mumps", "Rubella", "Varicella"]
        );
    }

    #[test]
    fn unknown_vaccine_code_yields_itself() {
        let bundle = bundle_with_chart(&[]);
        let enriched = enrich_dose_groups(vec![group("2020-01-01", &["NovelVax"])], &bundle);
        assert_eq!(enriched[0].diseases, vec!["NovelVax"]);
    }

    #[test]
    fn unspecified_suffix_rewrites_to_marker() {
        let bundle = bundle_with_chart(&[]);
        let enriched = enrich_dose_groups(
            vec![group("2020-01-01", &["MMR-unspecified", "Var unspecified"])],
            &bundle,
        );
        assert_eq!(enriched[0].vaccine, vec!["MMR*", "Var*"]);
        // The marker forms are not in the reference, so they pass through.
        assert_eq!(enriched[0].diseases, vec!["MMR*", "Var*"]);
    }

    #[test]
    fn chart_collapses_to_single_other() {
        let bundle = bundle_with_chart(&["Measles", "Mumps"]);
        let enriched = enrich_dose_groups(vec![group("2020-01-01", &["MMR", "Var"])], &bundle);
        // Rubella and Varicella both fall off the chart but produce one
        // "Other", not one per unmapped disease.
        assert_eq!(enriched[0].diseases, vec!["Measles", "Mumps", "Other"]);
    }

    #[test]
    fn empty_chart_disables_collapsing() {
        let bundle = bundle_with_chart(&[]);
        let enriched = enrich_dose_groups(vec![group("2020-01-01", &["Var"])], &bundle);
        assert_eq!(enriched[0].diseases, vec!["Varicella"]);
    }
}
