//! Vaccination-history parsing.
//!
//! The "imms given" field is system-generated free text with zero or
//! more entries of the exact shape `"<Mon> <D>, <YYYY> - <vaccine>"`,
//! separated by arbitrary delimiters. Vaccine names never contain
//! commas. A date that matches the entry shape but fails to parse means
//! the export itself is corrupted, so it aborts the run rather than
//! producing a warning.

use std::sync::OnceLock;

use regex::Regex;

use viper_model::{DoseGroup, Result, ViperError};

use crate::dates::parse_history_date;

fn entry_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        // Vaccine names never contain commas; semicolons are excluded
        // too so a semicolon-delimited export does not bleed one entry
        // into the next.
        Regex::new(r"\w{3} \d{1,2}, \d{4} - [^,;]+").expect("history entry pattern")
    })
}

/// Parse the free-text history field into chronologically ordered,
/// date-grouped entries.
///
/// Placeholder names in `replace_unspecified` (registry spellings for
/// "no specific vaccine recorded") are skipped. Empty input yields an
/// empty list. Ties on the same date keep original appearance order and
/// merge into one group.
pub fn parse_history(text: &str, replace_unspecified: &[String]) -> Result<Vec<DoseGroup>> {
    if text.trim().is_empty() {
        return Ok(Vec::new());
    }

    let mut entries: Vec<(String, String)> = Vec::new();
    for found in entry_pattern().find_iter(text) {
        let entry = found.as_str();
        let Some((date_part, vaccine_part)) = entry.split_once(" - ") else {
            // Unreachable given the pattern, but the split keeps the
            // parse total.
            continue;
        };
        let vaccine = vaccine_part.trim();
        if replace_unspecified.iter().any(|p| p == vaccine) {
            continue;
        }
        let date = parse_history_date(date_part)
            .ok_or_else(|| ViperError::MalformedHistoryDate(date_part.trim().to_string()))?;
        entries.push((date.format("%Y-%m-%d").to_string(), vaccine.to_string()));
    }

    // Stable: same-date entries keep their appearance order.
    entries.sort_by(|a, b| a.0.cmp(&b.0));

    let mut grouped: Vec<DoseGroup> = Vec::new();
    for (date_given, vaccine) in entries {
        match grouped.last_mut() {
            Some(group) if group.date_given == date_given => group.vaccine.push(vaccine),
            _ => grouped.push(DoseGroup {
                date_given,
                vaccine: vec![vaccine],
            }),
        }
    }
    Ok(grouped)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn no_placeholders() -> Vec<String> {
        Vec::new()
    }

    #[test]
    fn empty_input_yields_empty_list() {
        assert!(parse_history("", &no_placeholders()).unwrap().is_empty());
        assert!(parse_history("   ", &no_placeholders()).unwrap().is_empty());
    }

    #[test]
    fn groups_same_date_doses() {
        let text = "Jan 1, 2020 - DTaP; Jan 1, 2020 - IPV; Feb 2, 2021 - MMR";
        let groups = parse_history(text, &no_placeholders()).unwrap();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].date_given, "2020-01-01");
        assert_eq!(groups[0].vaccine, vec!["DTaP", "IPV"]);
        assert_eq!(groups[1].date_given, "2021-02-02");
        assert_eq!(groups[1].vaccine, vec!["MMR"]);
    }

    #[test]
    fn sorts_unordered_entries_chronologically() {
        let text = "Mar 3, 2022 - Tdap, Jan 1, 2020 - DTaP";
        let groups = parse_history(text, &no_placeholders()).unwrap();
        assert_eq!(groups[0].date_given, "2020-01-01");
        assert_eq!(groups[1].date_given, "2022-03-03");
    }

    #[test]
    fn skips_unspecified_placeholders() {
        let placeholders = vec!["unspecified".to_string()];
        let text = "Jan 1, 2020 - unspecified; Jan 1, 2020 - IPV";
        let groups = parse_history(text, &placeholders).unwrap();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].vaccine, vec!["IPV"]);
    }

    #[test]
    fn entirely_placeholder_history_is_empty_not_error() {
        let placeholders = vec!["unspecified".to_string()];
        let groups = parse_history("Jan 1, 2020 - unspecified", &placeholders).unwrap();
        assert!(groups.is_empty());
    }

    #[test]
    fn corrupt_date_aborts() {
        let err = parse_history("Foo 99, 2020 - IPV", &no_placeholders()).unwrap_err();
        assert!(matches!(err, ViperError::MalformedHistoryDate(_)));
    }

    #[test]
    fn non_matching_text_is_ignored() {
        let groups = parse_history("no vaccination data on file", &no_placeholders()).unwrap();
        assert!(groups.is_empty());
    }
}
