//! File intake: validation of candidate files and their display form.
//!
//! Both input paths (explicit browse and drop) converge on
//! [`IntakePolicy::load`], which checks the name and size from metadata
//! before any file body is read.

use std::fmt;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::IntakeConfig;

/// Why a candidate file was not accepted.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum IntakeError {
    #[error("Please select a {suffix} file")]
    WrongExtension { suffix: String },

    #[error("File size must be less than {limit}")]
    TooLarge { limit: String, size: u64 },

    #[error("Cannot read '{path}': {reason}")]
    Unreadable { path: PathBuf, reason: String },
}

/// A file accepted by intake, ready to be sent to the service.
#[derive(Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    pub size: u64,
    pub bytes: Vec<u8>,
}

impl SelectedFile {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let size = bytes.len() as u64;
        Self {
            name: name.into(),
            size,
            bytes,
        }
    }

    /// Size line shown in the upload area.
    pub fn summary(&self) -> String {
        format!("{} • Ready to process", format_file_size(self.size))
    }
}

impl fmt::Debug for SelectedFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectedFile")
            .field("name", &self.name)
            .field("size", &self.size)
            .finish_non_exhaustive()
    }
}

/// Acceptance rules for candidate files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntakePolicy {
    accepted_suffix: String,
    max_bytes: u64,
}

impl IntakePolicy {
    pub fn new(accepted_suffix: impl Into<String>, max_bytes: u64) -> Self {
        Self {
            accepted_suffix: accepted_suffix.into(),
            max_bytes,
        }
    }

    pub fn accepted_suffix(&self) -> &str {
        &self.accepted_suffix
    }

    /// Check a candidate by name and size alone.
    pub fn check(&self, name: &str, size: u64) -> Result<(), IntakeError> {
        let suffix = self.accepted_suffix.to_lowercase();
        if !name.to_lowercase().ends_with(&suffix) {
            return Err(IntakeError::WrongExtension {
                suffix: self.accepted_suffix.clone(),
            });
        }
        if size > self.max_bytes {
            return Err(IntakeError::TooLarge {
                limit: format_file_size(self.max_bytes),
                size,
            });
        }
        Ok(())
    }

    /// Validate an in-memory candidate.
    pub fn accept(&self, name: &str, bytes: Vec<u8>) -> Result<SelectedFile, IntakeError> {
        self.check(name, bytes.len() as u64)?;
        Ok(SelectedFile::new(name, bytes))
    }

    /// Validate a file on disk and read it.
    ///
    /// Name and size are checked from metadata first, so an oversized or
    /// mistyped file is never read.
    pub fn load(&self, path: &Path) -> Result<SelectedFile, IntakeError> {
        let unreadable = |reason: String| IntakeError::Unreadable {
            path: path.to_path_buf(),
            reason,
        };

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| unreadable("not a file path".to_string()))?;
        let metadata = std::fs::metadata(path).map_err(|e| unreadable(e.to_string()))?;
        if !metadata.is_file() {
            return Err(unreadable("not a regular file".to_string()));
        }

        self.check(&name, metadata.len())?;

        let bytes = std::fs::read(path).map_err(|e| unreadable(e.to_string()))?;
        // The file may have grown between stat and read.
        self.check(&name, bytes.len() as u64)?;
        Ok(SelectedFile::new(name, bytes))
    }
}

impl From<&IntakeConfig> for IntakePolicy {
    fn from(config: &IntakeConfig) -> Self {
        Self::new(config.accepted_suffix.clone(), config.max_file_bytes)
    }
}

impl Default for IntakePolicy {
    fn default() -> Self {
        Self::from(&IntakeConfig::default())
    }
}

/// Human-readable size: the largest unit among Bytes/KB/MB/GB (base 1024),
/// up to two decimals with trailing zeros trimmed.
pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];
    const K: f64 = 1024.0;

    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut index = 0;
    let mut scaled = bytes as f64;
    while scaled >= K && index + 1 < UNITS.len() {
        scaled /= K;
        index += 1;
    }

    let rounded = format!("{:.2}", scaled);
    let trimmed = rounded.trim_end_matches('0').trim_end_matches('.');
    format!("{} {}", trimmed, UNITS[index])
}

/// Turn pasted or typed text into a path.
///
/// Terminals deliver dropped files as pasted text, sometimes quoted,
/// sometimes as a `file://` URL, often with a trailing newline or with
/// spaces escaped by a backslash.
pub fn normalize_dropped_path(raw: &str) -> Option<PathBuf> {
    let mut text = raw.trim();
    if let Some(first_line) = text.lines().next() {
        text = first_line.trim();
    }
    for quote in ['"', '\''] {
        if text.len() >= 2 && text.starts_with(quote) && text.ends_with(quote) {
            text = &text[1..text.len() - 1];
        }
    }
    let text = text.strip_prefix("file://").unwrap_or(text);
    if text.is_empty() {
        return None;
    }
    Some(PathBuf::from(text.replace("\\ ", " ")))
}
