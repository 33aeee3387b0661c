use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Root configuration container.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub service: ServiceConfig,
    #[serde(default)]
    pub intake: IntakeConfig,
    #[serde(default)]
    pub templates: TemplateConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub download: DownloadConfig,
}

/// Remote text-processing service settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceConfig {
    /// Base URL of the service (scheme + host, no trailing path).
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Upper bound for a single search/apply call, in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u32,
    /// Connection timeout in seconds.
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_seconds: u32,
    /// Interval between health probes. Zero disables the probe.
    #[serde(default = "default_probe_interval")]
    pub probe_interval_seconds: u32,
}

/// Client-side file acceptance rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntakeConfig {
    /// Required filename suffix, matched case-insensitively (e.g. ".tsx").
    #[serde(default = "default_accepted_suffix")]
    pub accepted_suffix: String,
    /// Largest accepted file, in bytes.
    #[serde(default = "default_max_file_bytes")]
    pub max_file_bytes: u64,
}

/// Template-type options forwarded to the service verbatim.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateConfig {
    #[serde(default = "default_template")]
    pub default: String,
    #[serde(default = "default_available_templates")]
    pub available: Vec<String>,
}

/// Static asset server settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind_host")]
    pub bind_host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_assets_dir")]
    pub assets_dir: PathBuf,
    /// Document served for any path that does not match a file.
    #[serde(default = "default_index_file")]
    pub index_file: String,
}

/// Where processed artifacts are saved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct DownloadConfig {
    /// Target directory. Defaults to the OS download dir, then the cwd.
    #[serde(default)]
    pub directory: Option<PathBuf>,
}

impl DownloadConfig {
    pub fn resolve_directory(&self) -> PathBuf {
        self.directory
            .clone()
            .or_else(dirs::download_dir)
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

fn default_base_url() -> String {
    "https://kslocaletool-production.up.railway.app".to_string()
}

fn default_timeout() -> u32 {
    120
}

fn default_connect_timeout() -> u32 {
    10
}

fn default_probe_interval() -> u32 {
    30
}

fn default_accepted_suffix() -> String {
    ".tsx".to_string()
}

fn default_max_file_bytes() -> u64 {
    10 * 1024 * 1024
}

fn default_template() -> String {
    "bt".to_string()
}

fn default_available_templates() -> Vec<String> {
    vec!["bt".to_string(), "bvt".to_string()]
}

fn default_bind_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    80
}

fn default_assets_dir() -> PathBuf {
    PathBuf::from("assets")
}

fn default_index_file() -> String {
    "index.html".to_string()
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_seconds: default_timeout(),
            connect_timeout_seconds: default_connect_timeout(),
            probe_interval_seconds: default_probe_interval(),
        }
    }
}

impl Default for IntakeConfig {
    fn default() -> Self {
        Self {
            accepted_suffix: default_accepted_suffix(),
            max_file_bytes: default_max_file_bytes(),
        }
    }
}

impl Default for TemplateConfig {
    fn default() -> Self {
        Self {
            default: default_template(),
            available: default_available_templates(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_host: default_bind_host(),
            port: default_port(),
            assets_dir: default_assets_dir(),
            index_file: default_index_file(),
        }
    }
}
