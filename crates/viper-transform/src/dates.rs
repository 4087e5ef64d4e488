//! Date parsing and locale-aware formatting.

use chrono::{Datelike, Locale, NaiveDate};

use viper_model::Language;

/// Strict ISO date format used for the date-of-birth column.
pub const ISO_FORMAT: &str = "%Y-%m-%d";

/// Parse an ISO `YYYY-MM-DD` date. Returns `None` for anything else;
/// callers decide whether that is a warning or an error.
pub fn parse_iso_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), ISO_FORMAT).ok()
}

/// Render a date in the long display format for the target language:
/// "August 31, 2025" (en) or "31 août 2025" (fr). Null-safe: a missing
/// date formats as `None` rather than an error.
pub fn format_display_date(date: Option<NaiveDate>, language: Language) -> Option<String> {
    let date = date?;
    let formatted = match language {
        Language::En => date.format_localized("%B %-d, %Y", Locale::en_US),
        Language::Fr => date.format_localized("%-d %B %Y", Locale::fr_FR),
    };
    Some(formatted.to_string())
}

/// Parse a vaccination-history date in the registry's display format
/// ("Jan 1, 2020").
pub fn parse_history_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%b %d, %Y").ok()
}

/// Whole years between `dob` and `as_of`, decremented when the birthday
/// has not yet occurred in the `as_of` year. Exact birthday-aware
/// difference, not floor division of days.
pub fn age_in_years(dob: NaiveDate, as_of: NaiveDate) -> i32 {
    let mut age = as_of.year() - dob.year();
    if (as_of.month(), as_of.day()) < (dob.month(), dob.day()) {
        age -= 1;
    }
    age
}
