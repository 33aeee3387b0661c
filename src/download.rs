//! Saving the processed artifact to disk.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Prefix of every saved artifact.
pub const SAVED_PREFIX: &str = "processed_";

#[derive(Debug, Error)]
pub enum DownloadError {
    #[error("No processed file available")]
    NothingToSave,

    #[error("Failed to write '{path}': {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// The last successful Apply response, kept until saved over or reset.
#[derive(Clone, PartialEq, Eq)]
pub struct ProcessedArtifact {
    pub payload: Vec<u8>,
    /// Name of the uploaded file that produced this artifact.
    pub source_name: String,
}

impl ProcessedArtifact {
    pub fn saved_name(&self) -> String {
        saved_file_name(&self.source_name)
    }
}

impl std::fmt::Debug for ProcessedArtifact {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProcessedArtifact")
            .field("payload_len", &self.payload.len())
            .field("source_name", &self.source_name)
            .finish()
    }
}

/// `processed_<name>`, keeping only the final path component of `name`.
pub fn saved_file_name(source_name: &str) -> String {
    let base = Path::new(source_name)
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| source_name.to_string());
    format!("{}{}", SAVED_PREFIX, base)
}

/// Write `artifact` into `directory` and return the saved path.
///
/// The payload goes to a `.part` file that is renamed into place; the
/// temporary is removed on every failure path.
pub fn save_artifact(
    artifact: Option<&ProcessedArtifact>,
    directory: &Path,
) -> Result<PathBuf, DownloadError> {
    let artifact = artifact.ok_or(DownloadError::NothingToSave)?;

    let target = directory.join(artifact.saved_name());
    let partial = directory.join(format!("{}.part", artifact.saved_name()));
    let write_error = |path: &Path, source: std::io::Error| DownloadError::Write {
        path: path.to_path_buf(),
        source,
    };

    fs::create_dir_all(directory).map_err(|e| write_error(directory, e))?;

    let cleanup = scopeguard::guard(partial.clone(), |path| {
        let _ = fs::remove_file(path);
    });

    let mut file = fs::File::create(&partial).map_err(|e| write_error(&partial, e))?;
    file.write_all(&artifact.payload)
        .and_then(|_| file.sync_all())
        .map_err(|e| write_error(&partial, e))?;
    drop(file);

    fs::rename(&partial, &target).map_err(|e| write_error(&target, e))?;
    scopeguard::ScopeGuard::into_inner(cleanup);

    tracing::info!(
        "Saved {} bytes to {}",
        artifact.payload.len(),
        target.display()
    );
    Ok(target)
}
