use std::future::Future;
use std::time::Duration;

use reqwest::header::CONTENT_DISPOSITION;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, StatusCode};
use tokio::time::timeout;

use crate::config::ServiceConfig;
use crate::intake::SelectedFile;
use crate::service::error::ServiceError;
use crate::service::types::{filename_from_disposition, ApplyOutcome, ErrorBody, FindResult};

pub const SEARCH_PATH: &str = "/api/search/";
pub const APPLY_PATH: &str = "/api/apply/";
pub const HEALTH_PATH: &str = "/api/health/";

/// Name used when the apply response carries no `Content-Disposition`.
pub const DEFAULT_ARTIFACT_NAME: &str = "processed_file.tsx";

const SEARCH_FAILED: &str = "Search failed";
const APPLY_FAILED: &str = "Apply failed";
const APPLY_MESSAGE: &str = "Translation applied successfully!";

/// HTTP client for the search/apply service.
///
/// Issues exactly one request per call; nothing is retried.
#[derive(Clone)]
pub struct ServiceClient {
    client: Client,
    base_url: String,
    request_timeout: Duration,
    probe_timeout: Duration,
}

impl ServiceClient {
    pub fn new(config: &ServiceConfig) -> Result<Self, ServiceError> {
        let connect_timeout = Duration::from_secs(config.connect_timeout_seconds.into());
        let client = Client::builder()
            .connect_timeout(connect_timeout)
            .build()
            .map_err(ServiceError::ClientBuild)?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            request_timeout: Duration::from_secs(config.timeout_seconds.into()),
            probe_timeout: connect_timeout,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `POST /api/search/` with the file and template type.
    pub async fn search(
        &self,
        file: &SelectedFile,
        template_type: &str,
    ) -> Result<FindResult, ServiceError> {
        tracing::info!(
            "Searching '{}' ({} bytes, template_type={})",
            file.name,
            file.size,
            template_type
        );
        self.bounded(self.do_search(file, template_type)).await
    }

    /// `POST /api/apply/` asking for the transformed file back.
    pub async fn apply(
        &self,
        file: &SelectedFile,
        template_type: &str,
    ) -> Result<ApplyOutcome, ServiceError> {
        tracing::info!(
            "Applying templates to '{}' ({} bytes, template_type={})",
            file.name,
            file.size,
            template_type
        );
        self.bounded(self.do_apply(file, template_type)).await
    }

    /// `GET /api/health/`; true when the service answers with 2xx.
    pub async fn health(&self) -> bool {
        let request = self
            .client
            .get(self.endpoint(HEALTH_PATH))
            .timeout(self.probe_timeout)
            .send();
        match request.await {
            Ok(response) => response.status().is_success(),
            Err(e) => {
                tracing::debug!("Health probe failed: {}", e);
                false
            }
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn bounded<T, F>(&self, call: F) -> Result<T, ServiceError>
    where
        F: Future<Output = Result<T, ServiceError>>,
    {
        match timeout(self.request_timeout, call).await {
            Ok(result) => result,
            Err(_) => Err(ServiceError::Timeout {
                duration: self.request_timeout.as_secs(),
            }),
        }
    }

    async fn do_search(
        &self,
        file: &SelectedFile,
        template_type: &str,
    ) -> Result<FindResult, ServiceError> {
        let response = self
            .client
            .post(self.endpoint(SEARCH_PATH))
            .multipart(file_form(file, template_type))
            .send()
            .await
            .map_err(ServiceError::Transport)?;

        let status = response.status();
        let body = response.bytes().await.map_err(ServiceError::Transport)?;
        if !status.is_success() {
            return Err(rejection(status, &body, SEARCH_FAILED));
        }

        let result: FindResult = serde_json::from_slice(&body).map_err(ServiceError::Decode)?;
        tracing::info!(
            "Search finished: success={} count={} elements={}",
            result.success,
            result.count,
            result.elements.len()
        );
        Ok(result)
    }

    async fn do_apply(
        &self,
        file: &SelectedFile,
        template_type: &str,
    ) -> Result<ApplyOutcome, ServiceError> {
        let form = file_form(file, template_type).text("return_file", "true");
        let response = self
            .client
            .post(self.endpoint(APPLY_PATH))
            .multipart(form)
            .send()
            .await
            .map_err(ServiceError::Transport)?;

        let status = response.status();
        let suggested_filename = response
            .headers()
            .get(CONTENT_DISPOSITION)
            .and_then(|v| v.to_str().ok())
            .and_then(filename_from_disposition)
            .unwrap_or_else(|| DEFAULT_ARTIFACT_NAME.to_string());

        let body = response.bytes().await.map_err(ServiceError::Transport)?;
        if !status.is_success() {
            return Err(rejection(status, &body, APPLY_FAILED));
        }

        tracing::info!(
            "Apply finished: {} bytes returned as '{}'",
            body.len(),
            suggested_filename
        );
        Ok(ApplyOutcome {
            payload: body.to_vec(),
            suggested_filename,
            message: APPLY_MESSAGE.to_string(),
        })
    }
}

fn file_form(file: &SelectedFile, template_type: &str) -> Form {
    let part = Part::bytes(file.bytes.clone()).file_name(file.name.clone());
    Form::new()
        .part("file", part)
        .text("template_type", template_type.to_string())
}

/// Build the error for a non-2xx response.
///
/// An unparseable error body falls back to the per-operation default.
fn rejection(status: StatusCode, body: &[u8], fallback: &str) -> ServiceError {
    let message = serde_json::from_slice::<ErrorBody>(body)
        .ok()
        .and_then(ErrorBody::into_message)
        .unwrap_or_else(|| fallback.to_string());
    tracing::warn!("Service rejected request: {} - {}", status.as_u16(), message);
    ServiceError::Rejected {
        status: status.as_u16(),
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejection_uses_body_message() {
        let err = rejection(
            StatusCode::BAD_REQUEST,
            br#"{"message": "Only TSX files are supported."}"#,
            SEARCH_FAILED,
        );
        assert_eq!(err.to_string(), "Only TSX files are supported.");
        assert_eq!(err.status(), Some(400));
    }

    #[test]
    fn rejection_falls_back_on_unparseable_body() {
        let err = rejection(StatusCode::BAD_GATEWAY, b"<html>502</html>", APPLY_FAILED);
        assert_eq!(err.to_string(), "Apply failed");
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let config = ServiceConfig {
            base_url: "http://127.0.0.1:5000/".to_string(),
            ..ServiceConfig::default()
        };
        let client = ServiceClient::new(&config).unwrap();
        assert_eq!(client.base_url(), "http://127.0.0.1:5000");
        assert_eq!(client.endpoint(SEARCH_PATH), "http://127.0.0.1:5000/api/search/");
    }
}
