use std::path::PathBuf;

use thiserror::Error;

/// Errors that abort a preprocessing run.
///
/// Only structural problems live here: anything that makes the run unsafe
/// to continue (unreadable input, schema gaps, corrupted system-generated
/// fields). Per-record data-quality issues are collected as warnings
/// instead and never surface as an error.
#[derive(Debug, Error)]
pub enum ViperError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("unsupported file type '{extension}' for {path} (expected .csv, .xlsx, or .xls)")]
    UnsupportedFileType { path: PathBuf, extension: String },

    #[error("missing required columns: {missing:?}\nfound columns: {found:?}")]
    MissingColumns {
        missing: Vec<String>,
        found: Vec<String>,
    },

    #[error("malformed vaccination history date '{0}': expected 'Mon D, YYYY'")]
    MalformedHistoryDate(String),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    Message(String),
}

pub type Result<T> = std::result::Result<T, ViperError>;
