//! Row normalization: raw string cells to typed, cleaned fields.
//!
//! Runs per row, independent of row order. Anything that fails to
//! coerce becomes a null-like default here; deciding whether that
//! deserves a warning is the record builder's job, since warnings are
//! keyed by client id.

use chrono::NaiveDate;

use viper_map::MappedTable;
use viper_model::{CanonicalColumn, schema::optional};

use crate::dates::parse_iso_date;

/// Placeholder for an empty postal code.
pub const POSTAL_NOT_PROVIDED: &str = "Not provided";

/// Upstream provincial-registry match provenance, carried into record
/// metadata untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PhixProvenance {
    pub id: Option<String>,
    pub match_type: String,
    pub confidence: i64,
    pub phu_name: Option<String>,
    pub phu_code: Option<String>,
    pub target_phu_code: Option<String>,
    pub target_phu_label: Option<String>,
}

/// A fully typed, cleaned input row.
#[derive(Debug, Clone, Default)]
pub struct NormalizedRow {
    pub school_name: String,
    pub client_id: String,
    pub first_name: String,
    pub last_name: String,
    /// Strictly `YYYY-MM-DD`; anything else is null here and a warning
    /// downstream.
    pub date_of_birth: Option<NaiveDate>,
    /// Numeric age column when the export carries one.
    pub age: Option<f64>,
    pub city: String,
    pub province: String,
    /// Defaults to [`POSTAL_NOT_PROVIDED`] when empty.
    pub postal_code: String,
    /// Both street lines joined with a single space, empty segments
    /// dropped.
    pub street: String,
    pub overdue_disease: String,
    pub imms_given: String,
    /// Raw ids, possibly empty; the identifier synthesizer fills gaps.
    pub school_id: String,
    pub board_name: String,
    pub board_id: String,
    pub unique_id: String,
    pub phix: PhixProvenance,
}

fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Normalize one raw row against the mapped column index.
pub fn normalize_row(table: &MappedTable, row: &[String]) -> NormalizedRow {
    let cell = |column: CanonicalColumn| table.cell(row, column).trim().to_string();
    let opt = |name: &str| table.value(row, name).trim().to_string();

    let street_1 = cell(CanonicalColumn::StreetAddressLine1);
    let street_2 = cell(CanonicalColumn::StreetAddressLine2);
    let street = [street_1.as_str(), street_2.as_str()]
        .iter()
        .filter(|segment| !segment.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join(" ");

    let postal = cell(CanonicalColumn::PostalCode);
    let postal_code = if postal.is_empty() {
        POSTAL_NOT_PROVIDED.to_string()
    } else {
        postal
    };

    let phix = PhixProvenance {
        id: non_empty(table.value(row, optional::PHIX_ID)),
        match_type: non_empty(table.value(row, optional::PHIX_MATCH_TYPE))
            .unwrap_or_else(|| "none".to_string()),
        confidence: table
            .value(row, optional::PHIX_MATCH_CONFIDENCE)
            .trim()
            .parse::<f64>()
            .map(|c| c as i64)
            .unwrap_or(0),
        phu_name: non_empty(table.value(row, optional::PHIX_MATCHED_PHU)),
        phu_code: non_empty(table.value(row, optional::PHIX_MATCHED_PHU_CODE)),
        target_phu_code: non_empty(table.value(row, optional::PHIX_TARGET_PHU_CODE)),
        target_phu_label: non_empty(table.value(row, optional::PHIX_TARGET_PHU_LABEL)),
    };

    NormalizedRow {
        school_name: cell(CanonicalColumn::SchoolName),
        client_id: cell(CanonicalColumn::ClientId),
        first_name: cell(CanonicalColumn::FirstName),
        last_name: cell(CanonicalColumn::LastName),
        date_of_birth: parse_iso_date(table.cell(row, CanonicalColumn::DateOfBirth)),
        age: table.value(row, optional::AGE).trim().parse::<f64>().ok(),
        city: cell(CanonicalColumn::City),
        province: cell(CanonicalColumn::Province),
        postal_code,
        street,
        overdue_disease: cell(CanonicalColumn::OverdueDisease),
        imms_given: cell(CanonicalColumn::ImmsGiven),
        school_id: opt(optional::SCHOOL_ID),
        board_name: opt(optional::BOARD_NAME),
        board_id: opt(optional::BOARD_ID),
        unique_id: opt(optional::UNIQUE_ID),
        phix,
    }
}

#[cfg(test)]
mod tests {
    use viper_ingest::RawTable;
    use viper_map::map_columns;

    use super::*;

    fn mapped(headers: &[&str], row: &[&str]) -> (MappedTable, Vec<String>) {
        let table = RawTable {
            headers: headers.iter().map(|h| (*h).to_string()).collect(),
            rows: vec![row.iter().map(|v| (*v).to_string()).collect()],
        };
        let (mapped, _) = map_columns(&table);
        let row = mapped.rows[0].clone();
        (mapped, row)
    }

    #[test]
    fn normalizes_core_fields() {
        let (table, row) = mapped(
            &[
                "SCHOOL NAME",
                "CLIENT ID",
                "FIRST NAME",
                "LAST NAME",
                "DATE OF BIRTH",
                "CITY",
                "POSTAL CODE",
                "PROVINCE/TERRITORY",
                "OVERDUE DISEASE",
                "IMMS GIVEN",
                "STREET ADDRESS LINE 1",
                "STREET ADDRESS LINE 2",
                "AGE",
            ],
            &[
                " Harbor Elementary ",
                "111",
                "Grace",
                "Hopper",
                "2010-03-05",
                "Kingston",
                "",
                "ON",
                "Measles",
                "",
                "1 Dock St",
                "  ",
                "15",
            ],
        );
        let normalized = normalize_row(&table, &row);
        assert_eq!(normalized.school_name, "Harbor Elementary");
        assert_eq!(
            normalized.date_of_birth,
            NaiveDate::from_ymd_opt(2010, 3, 5)
        );
        assert_eq!(normalized.age, Some(15.0));
        assert_eq!(normalized.postal_code, POSTAL_NOT_PROVIDED);
        // Empty second line drops; no double space.
        assert_eq!(normalized.street, "1 Dock St");
        assert_eq!(normalized.phix.match_type, "none");
        assert_eq!(normalized.phix.confidence, 0);
    }

    #[test]
    fn invalid_dob_becomes_null_not_error() {
        let (table, row) = mapped(
            &["DATE OF BIRTH", "CLIENT ID"],
            &["03/05/2010", "111"],
        );
        let normalized = normalize_row(&table, &row);
        assert_eq!(normalized.date_of_birth, None);
    }

    #[test]
    fn street_lines_join_with_single_space() {
        let (table, row) = mapped(
            &["STREET ADDRESS LINE 1", "STREET ADDRESS LINE 2"],
            &["100 Main St", "Unit 4"],
        );
        let normalized = normalize_row(&table, &row);
        assert_eq!(normalized.street, "100 Main St Unit 4");
    }
}
