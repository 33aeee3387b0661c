//! One-shot `find` / `apply` runs without the interactive UI.

use std::io::Write;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::Config;
use crate::download::{save_artifact, DownloadError, ProcessedArtifact};
use crate::intake::{IntakeError, IntakePolicy};
use crate::results::{render_apply, render_find, ResultPanel};
use crate::service::{ServiceClient, ServiceError};

#[derive(Debug, Error)]
pub enum HeadlessError {
    #[error("{0}")]
    Intake(#[from] IntakeError),

    #[error("Search failed: {0}")]
    Search(#[source] ServiceError),

    #[error("Translation failed: {0}")]
    Apply(#[source] ServiceError),

    #[error("{0}")]
    Download(#[from] DownloadError),

    #[error("Unknown template type '{given}' (expected one of: {expected})")]
    UnknownTemplate { given: String, expected: String },

    #[error("Failed to write output: {0}")]
    Output(#[from] std::io::Error),

    #[error("{0}")]
    Client(#[source] ServiceError),
}

/// Pick the template type for a run: an explicit choice must be one of the
/// configured ones, otherwise the configured default applies.
pub fn resolve_template(config: &Config, requested: Option<&str>) -> Result<String, HeadlessError> {
    let Some(given) = requested else {
        return Ok(config.templates.default.clone());
    };
    if config.templates.available.iter().any(|t| t == given) {
        Ok(given.to_string())
    } else {
        Err(HeadlessError::UnknownTemplate {
            given: given.to_string(),
            expected: config.templates.available.join(", "),
        })
    }
}

fn write_panel(out: &mut impl Write, panel: &ResultPanel) -> std::io::Result<()> {
    for line in panel.plain_lines() {
        writeln!(out, "{}", line)?;
    }
    Ok(())
}

/// Search `path` for untemplated Korean text and print the report.
pub async fn run_find(
    config: &Config,
    path: &Path,
    template_type: Option<&str>,
    out: &mut impl Write,
) -> Result<(), HeadlessError> {
    let template_type = resolve_template(config, template_type)?;
    let file = IntakePolicy::from(&config.intake).load(path)?;
    let client = ServiceClient::new(&config.service).map_err(HeadlessError::Client)?;

    let result = client
        .search(&file, &template_type)
        .await
        .map_err(HeadlessError::Search)?;

    write_panel(out, &render_find(&result))?;
    Ok(())
}

/// Apply templates to `path`, print the report and save the processed file
/// into `output_dir`. Returns the saved path.
pub async fn run_apply(
    config: &Config,
    path: &Path,
    template_type: Option<&str>,
    output_dir: &Path,
    out: &mut impl Write,
) -> Result<PathBuf, HeadlessError> {
    let template_type = resolve_template(config, template_type)?;
    let file = IntakePolicy::from(&config.intake).load(path)?;
    let client = ServiceClient::new(&config.service).map_err(HeadlessError::Client)?;

    let outcome = client
        .apply(&file, &template_type)
        .await
        .map_err(HeadlessError::Apply)?;
    write_panel(out, &render_apply(&outcome))?;

    let artifact = ProcessedArtifact {
        payload: outcome.payload,
        source_name: file.name,
    };
    let saved = save_artifact(Some(&artifact), output_dir)?;
    writeln!(out, "Saved {}", saved.display())?;
    Ok(saved)
}
