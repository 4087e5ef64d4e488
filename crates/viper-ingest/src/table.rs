//! Raw tabular input.
//!
//! The input is a human-produced registry export, so this reader is
//! tolerant about encoding and delimiter but strict about file type.
//! CSV and Excel workbooks are accepted; rows come out as plain string
//! cells and all typing happens later in the normalization pass.

use std::path::Path;

use anyhow::{Context, Result, bail};
use calamine::{Data, Reader, open_workbook_auto};
use csv::ReaderBuilder;
use tracing::{debug, info};

use viper_model::ViperError;

/// An ordered header list plus rows of raw string cells.
#[derive(Debug, Clone, Default)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    /// Index of a header by exact name.
    pub fn column_index(&self, header: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == header)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

fn normalize_header(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('\u{feff}');
    trimmed.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn normalize_cell(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').to_string()
}

/// Decode file bytes as UTF-8, falling back to Latin-1.
///
/// Registry exports are sometimes saved from legacy tooling as Latin-1;
/// every byte is a valid Latin-1 code point, so the fallback cannot fail.
fn decode_bytes(bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(text) => text.to_string(),
        Err(_) => {
            debug!("input is not valid UTF-8; decoding as Latin-1");
            bytes.iter().map(|&b| b as char).collect()
        }
    }
}

/// Pick the delimiter by counting candidates in the header line.
fn sniff_delimiter(text: &str) -> u8 {
    let first_line = text.lines().next().unwrap_or("");
    // max_by_key keeps the last maximum, so comma wins ties.
    let candidates = [b'\t', b';', b','];
    candidates
        .into_iter()
        .max_by_key(|&delim| first_line.matches(delim as char).count())
        .unwrap_or(b',')
}

/// Render one spreadsheet cell as the string the rest of the pipeline
/// expects. Empty cells become empty strings so blank-row detection and
/// short-row padding behave the same as the CSV path.
fn spreadsheet_cell(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(value) => normalize_cell(value),
        other => normalize_cell(&other.to_string()),
    }
}

/// Read a supported input file into a `RawTable`.
///
/// `.csv`, `.xlsx`, and `.xls` are supported; any other extension is a
/// hard failure. The first non-empty row is the header row. Short rows
/// are padded with empty cells and long rows truncated to the header
/// width.
pub fn read_input(path: &Path) -> Result<RawTable> {
    if !path.exists() {
        bail!(ViperError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("input file not found: {}", path.display()),
        )));
    }
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();
    let raw_rows = match extension.as_str() {
        "csv" => read_csv_rows(path)?,
        "xlsx" | "xls" => read_spreadsheet_rows(path)?,
        _ => bail!(ViperError::UnsupportedFileType {
            path: path.to_path_buf(),
            extension: format!(".{extension}"),
        }),
    };
    Ok(assemble_table(path, raw_rows))
}

fn read_csv_rows(path: &Path) -> Result<Vec<Vec<String>>> {
    let bytes =
        std::fs::read(path).with_context(|| format!("read input: {}", path.display()))?;
    let text = decode_bytes(&bytes);
    let delimiter = sniff_delimiter(&text);

    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter)
        .from_reader(text.as_bytes());

    let mut raw_rows: Vec<Vec<String>> = Vec::new();
    for record in reader.records() {
        let record = record.with_context(|| format!("read record: {}", path.display()))?;
        raw_rows.push(record.iter().map(normalize_cell).collect());
    }
    Ok(raw_rows)
}

/// Read the first worksheet of an Excel workbook as raw string rows.
fn read_spreadsheet_rows(path: &Path) -> Result<Vec<Vec<String>>> {
    let mut workbook = open_workbook_auto(path)
        .with_context(|| format!("open workbook: {}", path.display()))?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| anyhow::anyhow!("workbook has no worksheets: {}", path.display()))?
        .with_context(|| format!("read worksheet: {}", path.display()))?;
    Ok(range
        .rows()
        .map(|row| row.iter().map(spreadsheet_cell).collect())
        .collect())
}

/// Drop all-empty rows, take the first remaining row as the header row,
/// and normalize every data row to the header width.
fn assemble_table(path: &Path, raw_rows: Vec<Vec<String>>) -> RawTable {
    let raw_rows: Vec<Vec<String>> = raw_rows
        .into_iter()
        .filter(|row| !row.iter().all(|value| value.is_empty()))
        .collect();
    if raw_rows.is_empty() {
        return RawTable::default();
    }

    let headers: Vec<String> = raw_rows[0].iter().map(|v| normalize_header(v)).collect();
    let mut rows = Vec::with_capacity(raw_rows.len() - 1);
    for record in raw_rows.iter().skip(1) {
        let mut row = Vec::with_capacity(headers.len());
        for idx in 0..headers.len() {
            row.push(record.get(idx).cloned().unwrap_or_default());
        }
        rows.push(row);
    }
    info!(rows = rows.len(), path = %path.display(), "loaded input table");
    RawTable { headers, rows }
}
