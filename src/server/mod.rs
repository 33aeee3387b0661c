//! Static asset server with single-page fallback routing.

mod shutdown;

pub use shutdown::ShutdownManager;

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use axum::Router;
use thiserror::Error;
use tokio::net::TcpListener;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Invalid bind address '{addr}'")]
    InvalidAddress { addr: String },

    #[error("Failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("Asset directory not found: {0}")]
    MissingAssets(PathBuf),

    #[error("Server error: {0}")]
    Serve(#[from] std::io::Error),
}

/// Every file under `assets_dir` is served as-is; any other path answers
/// with `index_file` and status 200.
pub fn build_router(assets_dir: &Path, index_file: &str) -> Router {
    let index = ServeFile::new(assets_dir.join(index_file));
    let assets = ServeDir::new(assets_dir).fallback(index);

    Router::new()
        .fallback_service(assets)
        .layer(TraceLayer::new_for_http())
}

pub struct AssetServer {
    pub addr: SocketAddr,
    assets_dir: PathBuf,
    index_file: String,
    shutdown: ShutdownManager,
}

impl AssetServer {
    pub fn new(config: &ServerConfig) -> Result<Self, ServerError> {
        let raw = format!("{}:{}", config.bind_host, config.port);
        let addr: SocketAddr = raw
            .parse()
            .map_err(|_| ServerError::InvalidAddress { addr: raw.clone() })?;
        Ok(Self {
            addr,
            assets_dir: config.assets_dir.clone(),
            index_file: config.index_file.clone(),
            shutdown: ShutdownManager::new(),
        })
    }

    pub fn shutdown_handle(&self) -> ShutdownManager {
        self.shutdown.clone()
    }

    pub async fn run(&self) -> Result<(), ServerError> {
        if !self.assets_dir.is_dir() {
            return Err(ServerError::MissingAssets(self.assets_dir.clone()));
        }

        let listener = TcpListener::bind(self.addr)
            .await
            .map_err(|source| ServerError::Bind {
                addr: self.addr,
                source,
            })?;
        tracing::info!(
            "Serving {} on {}",
            self.assets_dir.display(),
            self.addr
        );

        let app = build_router(&self.assets_dir, &self.index_file);
        let shutdown = self.shutdown.clone();
        axum::serve(listener, app)
            .with_graceful_shutdown(async move {
                if let Err(e) = shutdown.wait_for_shutdown().await {
                    tracing::error!("Signal handler failed: {}", e);
                }
            })
            .await?;

        tracing::info!("Server stopped");
        Ok(())
    }
}
