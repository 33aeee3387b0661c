//! Shared test utilities and mock infrastructure.

#![allow(dead_code, unused_imports)]

pub mod mock_service;

use locale_tool::config::{Config, ConfigStore, ServiceConfig};
use locale_tool::ui::app::{App, UiCommand};
use std::path::PathBuf;
use tokio::sync::mpsc;

/// Service settings pointing at `base_url` with short timeouts.
pub fn service_config(base_url: &str) -> ServiceConfig {
    let mut config = Config::default().service;
    config.base_url = base_url.to_string();
    config.timeout_seconds = 5;
    config.connect_timeout_seconds = 2;
    config
}

pub fn test_config(base_url: &str) -> Config {
    let mut config = Config::default();
    config.service = service_config(base_url);
    config
}

/// App wired to a command channel, downloads going to `download_dir`.
pub fn make_app(download_dir: Option<PathBuf>) -> (App, mpsc::Receiver<UiCommand>) {
    let mut config = test_config("http://127.0.0.1:9");
    config.download.directory = download_dir;
    let store = ConfigStore::new(config, PathBuf::from("/tmp/locale-tool-tests.toml"));
    let mut app = App::new(store);
    let (tx, rx) = mpsc::channel(8);
    app.set_command_sender(tx);
    (app, rx)
}

/// Write a file of `size` bytes named `name` under `dir`.
pub fn write_file(dir: &std::path::Path, name: &str, size: usize) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, vec![b'a'; size]).expect("Failed to write test file");
    path
}
