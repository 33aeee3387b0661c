//! Thread-safe configuration storage.
//!
//! Provides a simple in-memory config container with interior mutability.
//! The UI thread, the request worker and the connectivity probe all read
//! through the same store.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::RwLock;

use crate::config::loader::ConfigError;
use crate::config::types::Config;

/// Thread-safe config container with interior mutability.
#[derive(Clone)]
pub struct ConfigStore {
    inner: Arc<RwLock<Config>>,
    path: PathBuf,
}

impl ConfigStore {
    /// Create a new ConfigStore from initial config and path.
    pub fn new(config: Config, path: PathBuf) -> Self {
        Self {
            inner: Arc::new(RwLock::new(config)),
            path,
        }
    }

    /// Get a clone of the current config.
    pub fn get(&self) -> Config {
        self.inner.read().clone()
    }

    /// Apply an in-place change, e.g. a CLI override.
    ///
    /// The change is validated; on failure the previous config is kept.
    pub fn update<F: FnOnce(&mut Config)>(&self, change: F) -> Result<(), ConfigError> {
        let mut next = self.get();
        change(&mut next);
        next.validate()?;
        *self.inner.write() = next;
        Ok(())
    }

    /// Reload config from the file.
    ///
    /// On success, atomically replaces the current config.
    /// On failure, keeps the old config and returns the error.
    pub fn reload(&self) -> Result<(), ConfigError> {
        let config = Config::load_from(&self.path)?;
        *self.inner.write() = config;
        Ok(())
    }

    /// Get the config file path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}
