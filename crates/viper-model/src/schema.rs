//! The canonical input schema.
//!
//! Input files are produced by hand from a registry export, so the raw
//! header spelling varies run to run. Fuzzy mapping (viper-map) renames
//! raw headers onto these fixed canonical names; everything downstream
//! addresses columns only through this enum.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A required canonical column. Every output record must have all twelve
/// populated (possibly with placeholder values) before record building.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum CanonicalColumn {
    SchoolName,
    ClientId,
    FirstName,
    LastName,
    DateOfBirth,
    City,
    PostalCode,
    Province,
    OverdueDisease,
    ImmsGiven,
    StreetAddressLine1,
    StreetAddressLine2,
}

impl CanonicalColumn {
    /// Canonical header text, as it appears in the registry export spec.
    pub fn as_str(&self) -> &'static str {
        match self {
            CanonicalColumn::SchoolName => "SCHOOL NAME",
            CanonicalColumn::ClientId => "CLIENT ID",
            CanonicalColumn::FirstName => "FIRST NAME",
            CanonicalColumn::LastName => "LAST NAME",
            CanonicalColumn::DateOfBirth => "DATE OF BIRTH",
            CanonicalColumn::City => "CITY",
            CanonicalColumn::PostalCode => "POSTAL CODE",
            CanonicalColumn::Province => "PROVINCE/TERRITORY",
            CanonicalColumn::OverdueDisease => "OVERDUE DISEASE",
            CanonicalColumn::ImmsGiven => "IMMS GIVEN",
            CanonicalColumn::StreetAddressLine1 => "STREET ADDRESS LINE 1",
            CanonicalColumn::StreetAddressLine2 => "STREET ADDRESS LINE 2",
        }
    }

    /// All required columns, in schema order. Order matters: fuzzy-match
    /// ties resolve to the column enumerated first.
    pub fn required() -> &'static [CanonicalColumn] {
        &[
            CanonicalColumn::SchoolName,
            CanonicalColumn::ClientId,
            CanonicalColumn::FirstName,
            CanonicalColumn::LastName,
            CanonicalColumn::DateOfBirth,
            CanonicalColumn::City,
            CanonicalColumn::PostalCode,
            CanonicalColumn::Province,
            CanonicalColumn::OverdueDisease,
            CanonicalColumn::ImmsGiven,
            CanonicalColumn::StreetAddressLine1,
            CanonicalColumn::StreetAddressLine2,
        ]
    }
}

impl fmt::Display for CanonicalColumn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Optional columns carried through to the record when the export
/// includes them. Matched exactly (after header normalization), not
/// fuzzily, since absence is the common case.
pub mod optional {
    pub const AGE: &str = "AGE";
    pub const BOARD_NAME: &str = "BOARD NAME";
    pub const BOARD_ID: &str = "BOARD ID";
    pub const SCHOOL_ID: &str = "SCHOOL ID";
    pub const UNIQUE_ID: &str = "UNIQUE ID";

    /// Upstream provincial-registry match provenance, surfaced verbatim
    /// in record metadata.
    pub const PHIX_ID: &str = "PHIX ID";
    pub const PHIX_MATCH_TYPE: &str = "PHIX MATCH TYPE";
    pub const PHIX_MATCH_CONFIDENCE: &str = "PHIX MATCH CONFIDENCE";
    pub const PHIX_MATCHED_PHU: &str = "PHIX MATCHED PHU";
    pub const PHIX_MATCHED_PHU_CODE: &str = "PHIX MATCHED PHU CODE";
    pub const PHIX_TARGET_PHU_CODE: &str = "PHIX TARGET PHU CODE";
    pub const PHIX_TARGET_PHU_LABEL: &str = "PHIX TARGET PHU LABEL";
}
