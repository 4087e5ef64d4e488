//! Artifact serialization.
//!
//! A run is atomic: either a complete artifact lands on disk or nothing
//! does. The payload is serialized to a temporary file in the target
//! directory and renamed into place, so an abort mid-write never leaves
//! a partial artifact for downstream stages to trust.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tempfile::NamedTempFile;
use tracing::info;

use viper_model::ArtifactPayload;

/// Subdirectory for artifacts under the run's output directory.
pub const ARTIFACTS_DIR: &str = "artifacts";

/// Artifact filename for a run id.
pub fn artifact_filename(run_id: &str) -> String {
    format!("preprocessed_clients_{run_id}.json")
}

/// Write the payload under `<output_dir>/artifacts/`, atomically.
pub fn write_artifact(output_dir: &Path, payload: &ArtifactPayload) -> Result<PathBuf> {
    let artifacts_dir = output_dir.join(ARTIFACTS_DIR);
    std::fs::create_dir_all(&artifacts_dir)
        .with_context(|| format!("create artifacts dir: {}", artifacts_dir.display()))?;

    let json = serde_json::to_string_pretty(payload).context("serialize artifact payload")?;

    // Temp file lives in the target directory so the final rename stays
    // on one filesystem.
    let mut temp = NamedTempFile::new_in(&artifacts_dir)
        .with_context(|| format!("create temp file in {}", artifacts_dir.display()))?;
    temp.write_all(json.as_bytes()).context("write artifact")?;
    temp.write_all(b"\n").context("write artifact")?;

    let path = artifacts_dir.join(artifact_filename(&payload.run_id));
    temp.persist(&path)
        .with_context(|| format!("persist artifact: {}", path.display()))?;

    info!(path = %path.display(), clients = payload.total_clients, "wrote artifact");
    Ok(path)
}
