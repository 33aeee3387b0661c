//! Error types for calls to the remote service.
//!
//! Every variant renders a message fit for a toast; the workflow prefixes it
//! with the operation ("Search failed: ...").

use thiserror::Error;

/// Errors that can occur while talking to the service.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The service answered with a non-success status.
    #[error("{message}")]
    Rejected { status: u16, message: String },

    /// The request could not be sent or the body could not be read.
    #[error("{0}")]
    Transport(#[source] reqwest::Error),

    /// The call exceeded the configured request timeout.
    #[error("Request timed out after {duration}s")]
    Timeout { duration: u64 },

    /// A success response carried a body that could not be decoded.
    #[error("Malformed response: {0}")]
    Decode(#[source] serde_json::Error),

    /// The HTTP client could not be constructed.
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(#[source] reqwest::Error),
}

impl ServiceError {
    /// Short classification for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            ServiceError::Rejected { .. } => "rejected",
            ServiceError::Transport(_) => "transport",
            ServiceError::Timeout { .. } => "timeout",
            ServiceError::Decode(_) => "decode",
            ServiceError::ClientBuild(_) => "client_build",
        }
    }

    /// HTTP status for rejected requests.
    pub fn status(&self) -> Option<u16> {
        match self {
            ServiceError::Rejected { status, .. } => Some(*status),
            _ => None,
        }
    }
}
