//! The single-pass preprocessing pipeline.
//!
//! One process reads the whole input table, transforms it in component
//! order, and writes one artifact. There is no parallelism across rows:
//! row transforms are cheap relative to I/O and the global stable sort
//! for sequencing wants a single ordered pass.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{SecondsFormat, Utc};
use tracing::{info, info_span};

use viper_model::{ArtifactPayload, Language};
use viper_reference::load_bundle;

use crate::builder::build_preprocess_result;

/// Inputs for one preprocessing run.
#[derive(Debug, Clone)]
pub struct RunOptions {
    pub input: PathBuf,
    pub language: Language,
    pub config_dir: PathBuf,
    pub output_dir: PathBuf,
    /// Opaque run identifier, embedded in the artifact filename.
    pub run_id: String,
}

/// What a successful run produced.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub artifact_path: PathBuf,
    pub total_clients: usize,
    pub warnings: Vec<String>,
}

/// Execute the full pipeline: ingest, map, build, write.
///
/// Structural errors propagate; the artifact is written atomically only
/// after every record built successfully.
pub fn run(options: &RunOptions) -> Result<RunOutcome> {
    let span = info_span!("preprocess", run_id = %options.run_id, language = %options.language);
    let _guard = span.enter();

    let bundle = load_bundle(&options.config_dir, options.language)
        .with_context(|| format!("load reference data from {}", options.config_dir.display()))?;

    let raw = viper_ingest::read_input(&options.input)?;
    let (mapped, mapping) = viper_map::map_columns(&raw);
    info!(
        raw_columns = raw.headers.len(),
        mapped_columns = mapping.assignments.len(),
        rows = raw.rows.len(),
        "mapped input columns"
    );
    viper_map::ensure_required(&mapped, &raw.headers)?;

    let result = build_preprocess_result(&mapped, options.language, &bundle)?;
    for warning in &result.warnings {
        tracing::warn!("{warning}");
    }

    let payload = ArtifactPayload::new(
        options.run_id.clone(),
        options.language.code(),
        Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
        result,
    );
    let artifact_path = viper_output::write_artifact(&options.output_dir, &payload)?;

    Ok(RunOutcome {
        artifact_path,
        total_clients: payload.total_clients,
        warnings: payload.warnings,
    })
}

/// Run id in the orchestration convention: UTC `YYYYMMDDTHHMMSS`.
pub fn generate_run_id() -> String {
    Utc::now().format("%Y%m%dT%H%M%S").to_string()
}

/// Default config directory relative to a working directory.
pub fn default_config_dir(base: &Path) -> PathBuf {
    base.join("config")
}
