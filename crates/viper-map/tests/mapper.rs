use viper_ingest::RawTable;
use viper_map::{ensure_required, map_columns};
use viper_model::{CanonicalColumn, schema::optional};

fn export_headers() -> Vec<String> {
    // A realistic registry export: mixed casing, separators, extra
    // columns the schema knows nothing about.
    [
        "School Name",
        "BOARD NAME",
        "client_id",
        "First Name",
        "LAST NAME",
        "DATE-OF-BIRTH",
        "AGE",
        "Street Address Line 1",
        "STREET ADDRESS LINE 2",
        "City",
        "Province/Territory",
        "POSTAL CODE",
        "Overdue Disease",
        "Imms Given",
        "Internal Review Notes",
    ]
    .iter()
    .map(|h| (*h).to_string())
    .collect()
}

#[test]
fn full_export_maps_and_validates() {
    let headers = export_headers();
    let row: Vec<String> = (0..headers.len()).map(|i| format!("v{i}")).collect();
    let table = RawTable {
        headers: headers.clone(),
        rows: vec![row.clone()],
    };

    let (mapped, mapping) = map_columns(&table);
    ensure_required(&mapped, &headers).expect("all required columns present");

    // Every required column mapped exactly once.
    assert_eq!(mapping.assignments.len(), 12);

    // Values resolve through the renamed index.
    assert_eq!(mapped.cell(&row, CanonicalColumn::SchoolName), "v0");
    assert_eq!(mapped.cell(&row, CanonicalColumn::ClientId), "v2");
    assert_eq!(mapped.cell(&row, CanonicalColumn::DateOfBirth), "v5");
    assert_eq!(mapped.cell(&row, CanonicalColumn::Province), "v10");

    // Optional columns resolved by exact match.
    assert_eq!(mapped.value(&row, optional::BOARD_NAME), "v1");
    assert_eq!(mapped.value(&row, optional::AGE), "v6");

    // The junk column was dropped entirely.
    assert!(!mapped.has_column("Internal Review Notes"));
    // Absent optional columns read back as empty.
    assert_eq!(mapped.value(&row, optional::BOARD_ID), "");
}

#[test]
fn omitting_date_of_birth_aborts_before_building() {
    let headers: Vec<String> = export_headers()
        .into_iter()
        .filter(|h| h != "DATE-OF-BIRTH")
        .collect();
    let table = RawTable {
        headers: headers.clone(),
        rows: Vec::new(),
    };
    let (mapped, _) = map_columns(&table);
    let err = ensure_required(&mapped, &headers).unwrap_err();
    assert!(format!("{err}").contains("DATE OF BIRTH"));
}
