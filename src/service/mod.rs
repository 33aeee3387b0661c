//! Request dispatch to the remote text-processing service.

mod client;
mod error;
mod types;

pub use client::{ServiceClient, APPLY_PATH, DEFAULT_ARTIFACT_NAME, HEALTH_PATH, SEARCH_PATH};
pub use error::ServiceError;
pub use types::{filename_from_disposition, ApplyOutcome, FindResult, FoundElement, ProcessingTime};
