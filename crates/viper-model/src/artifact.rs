//! Artifact payload: the sole output of preprocessing and the sole input
//! every downstream stage trusts without re-validating.

use serde::{Deserialize, Serialize};

use crate::record::ClientRecord;

/// Result of the record-building pass, before run metadata is attached.
#[derive(Debug, Clone)]
pub struct PreprocessResult {
    pub clients: Vec<ClientRecord>,
    /// Sorted, de-duplicated data-quality messages.
    pub warnings: Vec<String>,
}

/// The serialized artifact. Top-level key set is the downstream contract.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactPayload {
    /// Opaque run identifier, also embedded in the artifact filename.
    pub run_id: String,
    /// Two-letter code; equals every client's own language field.
    pub language: String,
    /// RFC 3339 UTC timestamp; the only field that varies between
    /// repeated runs over unchanged input.
    pub created_at: String,
    /// Always equals `clients.len()`.
    pub total_clients: usize,
    pub warnings: Vec<String>,
    pub clients: Vec<ClientRecord>,
}

impl ArtifactPayload {
    pub fn new(
        run_id: impl Into<String>,
        language: impl Into<String>,
        created_at: impl Into<String>,
        result: PreprocessResult,
    ) -> Self {
        Self {
            run_id: run_id.into(),
            language: language.into(),
            created_at: created_at.into(),
            total_clients: result.clients.len(),
            warnings: result.warnings,
            clients: result.clients,
        }
    }
}
