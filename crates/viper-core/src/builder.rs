//! Client record building.
//!
//! Combines the mapped table, reference bundle, and per-field
//! transforms into the final record set. Rows are sorted once, globally,
//! before sequence numbers are assigned; the sort is stable so repeated
//! runs over unchanged input yield identical sequences, which downstream
//! filenames depend on.

use std::collections::BTreeMap;

use tracing::debug;

use viper_map::MappedTable;
use viper_model::{
    Board, ClientRecord, Contact, Language, Person, PreprocessResult, Result, School,
    TranslationDomain, WarningSet,
};
use viper_reference::ReferenceBundle;
use viper_transform::{
    BOARD_PREFIX, NormalizedRow, SCHOOL_PREFIX, Translator, age_in_years, enrich_dose_groups,
    format_display_date, normalize_row, overdue_diseases, parse_history, synthesize_identifier,
};

/// Build the full record set plus run warnings from a mapped table.
///
/// Structural failures (corrupt history dates) abort; data-quality
/// issues become warnings and processing continues.
pub fn build_preprocess_result(
    table: &MappedTable,
    language: Language,
    bundle: &ReferenceBundle,
) -> Result<PreprocessResult> {
    let mut warnings = WarningSet::new();
    let mut translator = Translator::new(bundle, language);
    let replace_unspecified = bundle.parameters.replace_unspecified();

    let mut rows: Vec<NormalizedRow> = table
        .rows
        .iter()
        .map(|row| {
            let mut normalized = normalize_row(table, row);
            normalized.school_id = synthesize_identifier(
                &normalized.school_id,
                &normalized.school_name,
                SCHOOL_PREFIX,
            );
            normalized.board_id =
                synthesize_identifier(&normalized.board_id, &normalized.board_name, BOARD_PREFIX);
            normalized
        })
        .collect();

    warn_missing_board_names(&rows, &mut warnings);

    // Global stable sort; ties keep original input row order.
    rows.sort_by(|a, b| {
        (&a.school_name, &a.last_name, &a.first_name, &a.client_id).cmp(&(
            &b.school_name,
            &b.last_name,
            &b.first_name,
            &b.client_id,
        ))
    });

    let mut clients = Vec::with_capacity(rows.len());
    for (idx, row) in rows.iter().enumerate() {
        let sequence = format!("{:05}", idx + 1);
        clients.push(build_client(
            row,
            sequence,
            language,
            bundle,
            &replace_unspecified,
            &mut translator,
            &mut warnings,
        )?);
    }

    warn_duplicate_client_ids(&clients, &mut warnings);

    debug!(clients = clients.len(), warnings = warnings.len(), "built record set");
    Ok(PreprocessResult {
        clients,
        warnings: warnings.into_sorted(),
    })
}

fn build_client(
    row: &NormalizedRow,
    sequence: String,
    language: Language,
    bundle: &ReferenceBundle,
    replace_unspecified: &[String],
    translator: &mut Translator<'_>,
    warnings: &mut WarningSet,
) -> Result<ClientRecord> {
    let dob_iso = row
        .date_of_birth
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_default();
    if dob_iso.is_empty() {
        warnings.push(format!("Missing date of birth for client {}", row.client_id));
    }
    let dob_display = format_display_date(row.date_of_birth, language).unwrap_or_default();

    let canonical_due = overdue_diseases(&row.overdue_disease, bundle);
    let vaccines_due_list = translator.display_labels(
        TranslationDomain::DiseasesOverdue,
        &canonical_due,
        warnings,
    );
    let vaccines_due = if vaccines_due_list.is_empty() {
        None
    } else {
        Some(vaccines_due_list.join(", "))
    };

    let grouped = parse_history(&row.imms_given, replace_unspecified)?;
    let mut received = enrich_dose_groups(grouped, bundle);
    for group in &mut received {
        group.diseases =
            translator.display_labels(TranslationDomain::DiseasesChart, &group.diseases, warnings);
    }

    let over_16 = match (row.age, row.date_of_birth, bundle.parameters.date_notice_delivery) {
        (Some(age), _, _) => age >= 16.0,
        (None, Some(dob), Some(delivery)) => age_in_years(dob, delivery) >= 16,
        // Documented silent default: without an age source, assume the
        // client is under 16 and route correspondence to the parent.
        _ => false,
    };

    Ok(ClientRecord {
        sequence,
        client_id: row.client_id.clone(),
        language: language.code().to_string(),
        person: Person {
            first_name: row.first_name.clone(),
            last_name: row.last_name.clone(),
            date_of_birth: dob_iso.clone(),
            date_of_birth_display: dob_display,
            date_of_birth_iso: dob_iso,
            age: row.age.map(format_age).unwrap_or_default(),
            over_16,
        },
        school: School {
            name: row.school_name.clone(),
            id: row.school_id.clone(),
        },
        board: Board {
            name: row.board_name.clone(),
            id: row.board_id.clone(),
        },
        contact: Contact {
            street: row.street.clone(),
            city: row.city.clone(),
            province: row.province.clone(),
            postal_code: row.postal_code.clone(),
        },
        vaccines_due,
        vaccines_due_list,
        received,
        metadata: build_metadata(row),
    })
}

/// Render an age the way the upstream export carries it: whole-number
/// ages keep one decimal place ("16.0", not "16").
fn format_age(age: f64) -> String {
    if age.fract() == 0.0 {
        format!("{age:.1}")
    } else {
        age.to_string()
    }
}

fn build_metadata(row: &NormalizedRow) -> BTreeMap<String, serde_json::Value> {
    let optional_string = |value: &Option<String>| match value {
        Some(text) => serde_json::Value::String(text.clone()),
        None => serde_json::Value::Null,
    };

    let mut metadata = BTreeMap::new();
    metadata.insert(
        "unique_id".to_string(),
        if row.unique_id.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::Value::String(row.unique_id.clone())
        },
    );
    metadata.insert(
        "phix_validation".to_string(),
        serde_json::json!({
            "id": optional_string(&row.phix.id),
            "match_type": row.phix.match_type,
            "confidence": row.phix.confidence,
            "phu_name": optional_string(&row.phix.phu_name),
            "phu_code": optional_string(&row.phix.phu_code),
            "target_phu_code": optional_string(&row.phix.target_phu_code),
            "target_phu_label": optional_string(&row.phix.target_phu_label),
        }),
    );
    if let Some(code) = &row.phix.target_phu_code {
        metadata.insert(
            "phix_target_phu_code".to_string(),
            serde_json::Value::String(code.clone()),
        );
    }
    if let Some(label) = &row.phix.target_phu_label {
        metadata.insert(
            "phix_target_phu_label".to_string(),
            serde_json::Value::String(label.clone()),
        );
    }
    metadata
}

/// One aggregate warning naming every school whose rows lack a board
/// name, rather than one warning per row.
fn warn_missing_board_names(rows: &[NormalizedRow], warnings: &mut WarningSet) {
    let mut affected: Vec<&str> = rows
        .iter()
        .filter(|row| row.board_name.is_empty())
        .map(|row| row.school_name.as_str())
        .filter(|name| !name.is_empty())
        .collect();
    let any_missing = rows.iter().any(|row| row.board_name.is_empty());
    if !any_missing {
        return;
    }
    affected.sort_unstable();
    affected.dedup();
    if affected.is_empty() {
        warnings.push("Missing board name for one or more schools.");
    } else {
        warnings.push(format!("Missing board name for: {}", affected.join(", ")));
    }
}

/// One warning per duplicated client id, naming the repeat count. No
/// record is dropped; downstream consumers own any last-write-wins
/// semantics.
fn warn_duplicate_client_ids(clients: &[ClientRecord], warnings: &mut WarningSet) {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for client in clients {
        *counts.entry(client.client_id.as_str()).or_default() += 1;
    }
    for (client_id, count) in counts {
        if count > 1 {
            warnings.push(format!(
                "Duplicate client ID '{client_id}' found {count} times. \
                 Later records will overwrite earlier ones in generated notices."
            ));
        }
    }
}
