//! Partial-ratio scoring for header matching.
//!
//! The registry export's headers vary in casing, separators, and
//! punctuation run to run. Partial-ratio similarity on normalized names
//! tolerates extra characters ("SCHOOL NAME (ENGLISH)" still matches
//! "SCHOOL NAME") while rejecting genuinely different headers.

use rapidfuzz::fuzz::ratio;

/// Minimum partial-ratio score (0-100) for a header match to be accepted.
pub const MATCH_THRESHOLD: f64 = 80.0;

/// Normalize a header for comparison.
///
/// - Trims and lowercases
/// - Maps `_` and `-` to spaces
/// - Collapses whitespace runs
pub fn normalize(s: &str) -> String {
    s.trim()
        .to_lowercase()
        .replace(['_', '-'], " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Partial-ratio similarity between two normalized headers, 0-100.
pub fn score(raw: &str, canonical: &str) -> f64 {
    partial_ratio(&normalize(raw), &normalize(canonical))
}

/// Best full-ratio of the shorter string against every equal-length
/// window of the longer, scaled to 0-100. A shorter header that aligns
/// fully inside a longer one scores 100 regardless of the surplus
/// characters around it.
pub fn partial_ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let (needle, haystack) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    if needle.is_empty() {
        return if haystack.is_empty() { 100.0 } else { 0.0 };
    }
    haystack
        .windows(needle.len())
        .map(|window| ratio(needle.iter().copied(), window.iter().copied()))
        .fold(0.0, f64::max)
        * 100.0
}

/// Threshold decision, kept separate so the boundary is testable exactly.
pub fn accepts(score: f64) -> bool {
    score >= MATCH_THRESHOLD
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_collapses_separators() {
        assert_eq!(normalize("  School_Name "), "school name");
        assert_eq!(normalize("DATE-OF-BIRTH"), "date of birth");
        assert_eq!(normalize("CLIENT   ID"), "client id");
    }

    #[test]
    fn threshold_boundary() {
        assert!(accepts(80.0));
        assert!(accepts(80.1));
        assert!(!accepts(79.0));
        assert!(!accepts(79.999));
    }

    #[test]
    fn exact_match_scores_100() {
        assert!((score("SCHOOL NAME", "SCHOOL NAME") - 100.0).abs() < f64::EPSILON);
        assert!((score("school_name", "SCHOOL NAME") - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn substring_scores_100_under_partial_ratio() {
        // The shorter normalized name aligns fully inside the longer one.
        assert!((score("PROVINCE", "PROVINCE/TERRITORY") - 100.0).abs() < f64::EPSILON);
    }

    #[test]
    fn alignment_window_can_sit_mid_string() {
        // The best window is neither a prefix nor a suffix of the
        // longer header.
        assert!(
            (partial_ratio("address line", "street address line 1") - 100.0).abs() < f64::EPSILON
        );
    }

    #[test]
    fn single_substitution_on_five_chars_is_exactly_80() {
        // 4 of 5 characters match: 2*4 / (5+5) = 80.0
        let s = score("abcde", "abcdf");
        assert!((s - 80.0).abs() < 1e-9, "expected exactly 80, got {s}");
        assert!(accepts(s));
    }

    #[test]
    fn empty_inputs_do_not_match_nonempty() {
        assert!((partial_ratio("", "") - 100.0).abs() < f64::EPSILON);
        assert!(partial_ratio("", "school name").abs() < f64::EPSILON);
        assert!(partial_ratio("school name", "").abs() < f64::EPSILON);
    }

    #[test]
    fn unrelated_headers_score_below_threshold() {
        assert!(!accepts(score("SCHOOL ID", "SCHOOL NAME")));
        assert!(!accepts(score("DOB", "DATE OF BIRTH")));
        assert!(!accepts(score("NOTES", "CLIENT ID")));
    }
}
