//! Header-to-schema mapping.
//!
//! Built once per input file. Each raw header is scored against every
//! canonical name; the best match at or above the threshold claims the
//! canonical name. Collisions resolve deterministically: the first raw
//! column in input order wins, and later contenders are dropped.

use std::collections::BTreeMap;

use tracing::{debug, warn};

use viper_ingest::RawTable;
use viper_model::{CanonicalColumn, Result, ViperError, schema::optional};

use crate::score::{accepts, normalize, score};

/// Raw header → canonical column assignments for one input file.
#[derive(Debug, Clone, Default)]
pub struct ColumnMapping {
    /// In raw-header input order. At most one raw header per canonical
    /// column.
    pub assignments: Vec<(String, CanonicalColumn)>,
}

impl ColumnMapping {
    pub fn canonical_for(&self, raw: &str) -> Option<CanonicalColumn> {
        self.assignments
            .iter()
            .find(|(header, _)| header == raw)
            .map(|(_, canonical)| *canonical)
    }
}

/// The renamed table handed to normalization: canonical and optional
/// column names resolved to cell indexes, plus the untouched rows.
#[derive(Debug, Clone)]
pub struct MappedTable {
    index: BTreeMap<String, usize>,
    pub rows: Vec<Vec<String>>,
}

impl MappedTable {
    /// Cell value for a named column in a row; empty string when the
    /// column is absent from this file.
    pub fn value<'a>(&self, row: &'a [String], name: &str) -> &'a str {
        self.index
            .get(name)
            .and_then(|&idx| row.get(idx))
            .map(String::as_str)
            .unwrap_or("")
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn cell<'a>(&self, row: &'a [String], column: CanonicalColumn) -> &'a str {
        self.value(row, column.as_str())
    }
}

/// Optional columns matched exactly (after normalization) rather than
/// fuzzily; absence is the common case and a fuzzy match here would
/// risk stealing a required column's header.
const OPTIONAL_COLUMNS: &[&str] = &[
    optional::AGE,
    optional::BOARD_NAME,
    optional::BOARD_ID,
    optional::SCHOOL_ID,
    optional::UNIQUE_ID,
    optional::PHIX_ID,
    optional::PHIX_MATCH_TYPE,
    optional::PHIX_MATCH_CONFIDENCE,
    optional::PHIX_MATCHED_PHU,
    optional::PHIX_MATCHED_PHU_CODE,
    optional::PHIX_TARGET_PHU_CODE,
    optional::PHIX_TARGET_PHU_LABEL,
];

/// Fuzzy-map raw headers onto the canonical schema.
///
/// Raw headers that clear the threshold for no canonical name are
/// dropped unless they exactly match a known optional column.
pub fn map_columns(table: &RawTable) -> (MappedTable, ColumnMapping) {
    let mut mapping = ColumnMapping::default();
    let mut index: BTreeMap<String, usize> = BTreeMap::new();
    let mut claimed: Vec<CanonicalColumn> = Vec::new();

    for (col_idx, raw) in table.headers.iter().enumerate() {
        // Best canonical match; ties keep the column enumerated first
        // in the schema (strict inequality below).
        let mut best: Option<(CanonicalColumn, f64)> = None;
        for &canonical in CanonicalColumn::required() {
            let s = score(raw, canonical.as_str());
            if best.is_none_or(|(_, best_score)| s > best_score) {
                best = Some((canonical, s));
            }
        }

        if let Some((canonical, best_score)) = best
            && accepts(best_score)
        {
            if claimed.contains(&canonical) {
                warn!(
                    raw,
                    canonical = canonical.as_str(),
                    "header also matches an already-claimed column; first match wins, dropping"
                );
                continue;
            }
            debug!(raw, canonical = canonical.as_str(), score = best_score, "matched header");
            claimed.push(canonical);
            index.insert(canonical.as_str().to_string(), col_idx);
            mapping.assignments.push((raw.clone(), canonical));
            continue;
        }

        let normalized = normalize(raw);
        if let Some(name) = OPTIONAL_COLUMNS
            .iter()
            .find(|name| normalize(name) == normalized)
        {
            debug!(raw, optional = *name, "matched optional header");
            index.insert((*name).to_string(), col_idx);
        } else {
            debug!(raw, "header matched nothing; dropped");
        }
    }

    (
        MappedTable {
            index,
            rows: table.rows.clone(),
        },
        mapping,
    )
}

/// Fail fast when any required canonical column is still missing after
/// mapping. Catches both absent columns and headers whose best fuzzy
/// score fell below the threshold.
pub fn ensure_required(mapped: &MappedTable, raw_headers: &[String]) -> Result<()> {
    let missing: Vec<String> = CanonicalColumn::required()
        .iter()
        .filter(|column| !mapped.has_column(column.as_str()))
        .map(|column| column.as_str().to_string())
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(ViperError::MissingColumns {
            missing,
            found: raw_headers.to_vec(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(headers: &[&str]) -> RawTable {
        RawTable {
            headers: headers.iter().map(|h| (*h).to_string()).collect(),
            rows: vec![headers.iter().map(|_| String::new()).collect()],
        }
    }

    #[test]
    fn maps_messy_headers() {
        let raw = table(&[
            "school_name",
            "Client ID ",
            "FIRST  NAME",
            "Last-Name",
            "Date of Birth",
            "City",
            "Postal Code",
            "Province/Territory",
            "Overdue Disease",
            "IMMS Given",
            "Street Address Line 1",
            "Street Address Line 2",
        ]);
        let (mapped, mapping) = map_columns(&raw);
        assert_eq!(mapping.assignments.len(), 12);
        assert!(ensure_required(&mapped, &raw.headers).is_ok());
        assert_eq!(
            mapping.canonical_for("Date of Birth"),
            Some(CanonicalColumn::DateOfBirth)
        );
    }

    #[test]
    fn first_raw_column_wins_collisions() {
        let raw = table(&["CLIENT ID", "CLIENT ID (LEGACY)"]);
        let (mapped, mapping) = map_columns(&raw);
        assert_eq!(mapping.assignments.len(), 1);
        assert_eq!(mapping.assignments[0].0, "CLIENT ID");
        let row = vec!["first".to_string(), "second".to_string()];
        assert_eq!(mapped.cell(&row, CanonicalColumn::ClientId), "first");
    }

    #[test]
    fn optional_columns_match_exactly() {
        let raw = table(&["AGE", "Board_Name", "UNIQUE ID"]);
        let (mapped, mapping) = map_columns(&raw);
        assert!(mapping.assignments.is_empty());
        assert!(mapped.has_column(optional::AGE));
        assert!(mapped.has_column(optional::BOARD_NAME));
        assert!(mapped.has_column(optional::UNIQUE_ID));
    }

    #[test]
    fn missing_required_column_fails_fast() {
        let raw = table(&["SCHOOL NAME", "CLIENT ID"]);
        let (mapped, _) = map_columns(&raw);
        let err = ensure_required(&mapped, &raw.headers).unwrap_err();
        match err {
            ViperError::MissingColumns { missing, found } => {
                assert!(missing.contains(&"DATE OF BIRTH".to_string()));
                assert_eq!(found.len(), 2);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn low_scoring_header_is_dropped() {
        let raw = table(&["DOB"]);
        let (mapped, mapping) = map_columns(&raw);
        assert!(mapping.assignments.is_empty());
        assert!(!mapped.has_column("DATE OF BIRTH"));
    }
}
