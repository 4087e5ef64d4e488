//! The client record: the unit every downstream stage consumes.
//!
//! Field names and nesting here are the artifact contract; downstream
//! stages deserialize these without re-validating, so the serde shape
//! is treated as frozen.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// One or more vaccine administrations recorded on the same calendar
/// date, merged into a single grouped entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DoseGroup {
    /// ISO-8601 date the doses were given.
    pub date_given: String,
    /// Vaccine codes administered on that date, in input order.
    pub vaccine: Vec<String>,
}

/// A dose group enriched with the diseases its vaccines protect
/// against. Diseases outside the configured chart set collapse into the
/// literal `"Other"` bucket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnrichedDoseGroup {
    pub date_given: String,
    pub vaccine: Vec<String>,
    pub diseases: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub first_name: String,
    pub last_name: String,
    /// ISO date, empty string when the source DOB was unparseable.
    pub date_of_birth: String,
    /// Long locale-formatted date, e.g. "August 31, 2025" / "31 août 2025".
    pub date_of_birth_display: String,
    /// Duplicate of `date_of_birth`; downstream templates read this key.
    pub date_of_birth_iso: String,
    /// Numeric age from the source, stringified; empty when absent.
    pub age: String,
    pub over_16: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct School {
    pub name: String,
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    pub name: String,
    pub id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    pub street: String,
    pub city: String,
    pub province: String,
    pub postal_code: String,
}

/// Immutable per-client output record.
///
/// Built once per surviving input row, never mutated afterward.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientRecord {
    /// 5-digit zero-padded, 1-based, assigned after the global stable sort.
    pub sequence: String,
    pub client_id: String,
    /// Two-letter language code; equals the run's language for every record.
    pub language: String,
    pub person: Person,
    pub school: School,
    pub board: Board,
    pub contact: Contact,
    /// Comma-joined overdue disease display names, or null when none.
    pub vaccines_due: Option<String>,
    #[serde(default)]
    pub vaccines_due_list: Vec<String>,
    #[serde(default)]
    pub received: Vec<EnrichedDoseGroup>,
    /// Free-form provenance (unique id, upstream match details).
    pub metadata: BTreeMap<String, serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_serializes_with_contract_keys() {
        let record = ClientRecord {
            sequence: "00001".to_string(),
            client_id: "12345".to_string(),
            language: "en".to_string(),
            person: Person {
                first_name: "Ada".to_string(),
                last_name: "Lovelace".to_string(),
                date_of_birth: "2010-12-10".to_string(),
                date_of_birth_display: "December 10, 2010".to_string(),
                date_of_birth_iso: "2010-12-10".to_string(),
                age: "".to_string(),
                over_16: false,
            },
            school: School {
                name: "Analytical High".to_string(),
                id: "sch_0123456789".to_string(),
            },
            board: Board {
                name: "".to_string(),
                id: "brd_abcdefabcd".to_string(),
            },
            contact: Contact {
                street: "1 Engine Way".to_string(),
                city: "London".to_string(),
                province: "ON".to_string(),
                postal_code: "Not provided".to_string(),
            },
            vaccines_due: None,
            vaccines_due_list: Vec::new(),
            received: Vec::new(),
            metadata: BTreeMap::new(),
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["sequence"], "00001");
        assert_eq!(json["person"]["over_16"], false);
        assert_eq!(json["contact"]["postal_code"], "Not provided");
        assert!(json["vaccines_due"].is_null());
        assert_eq!(json["vaccines_due_list"], serde_json::json!([]));
    }
}
