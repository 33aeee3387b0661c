//! Wire types for the remote text-processing service.

use std::fmt;

use serde::Deserialize;

/// Response body of `POST /api/search/`.
#[derive(Debug, Clone, PartialEq, Deserialize, Default)]
pub struct FindResult {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub duration: Option<ProcessingTime>,
    #[serde(default)]
    pub filename: Option<String>,
    #[serde(default)]
    pub elements: Vec<FoundElement>,
}

/// One untemplated element reported by the service.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FoundElement {
    pub start: u64,
    #[serde(default)]
    pub inner_text: String,
}

/// Processing time as reported by the service.
///
/// The service sends seconds as a float; older deployments sent a
/// preformatted string, which is shown as-is.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ProcessingTime {
    Seconds(f64),
    Text(String),
}

impl fmt::Display for ProcessingTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessingTime::Seconds(secs) => write!(f, "{:.2}s", secs),
            ProcessingTime::Text(text) => f.write_str(text),
        }
    }
}

/// Result of a successful `POST /api/apply/`.
#[derive(Clone, PartialEq, Eq)]
pub struct ApplyOutcome {
    pub payload: Vec<u8>,
    pub suggested_filename: String,
    pub message: String,
}

impl fmt::Debug for ApplyOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApplyOutcome")
            .field("payload_len", &self.payload.len())
            .field("suggested_filename", &self.suggested_filename)
            .field("message", &self.message)
            .finish()
    }
}

/// Error body returned with non-2xx responses.
///
/// Some endpoints answer with `error`, others with `message`.
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ErrorBody {
    pub(crate) fn into_message(self) -> Option<String> {
        self.message
            .filter(|m| !m.is_empty())
            .or(self.error.filter(|e| !e.is_empty()))
    }
}

/// Extract the filename from a `Content-Disposition` value.
///
/// Takes the value after the first `filename=`, up to the next `;`,
/// with quotes removed.
pub fn filename_from_disposition(header: &str) -> Option<String> {
    let (_, rest) = header.split_once("filename=")?;
    let value = rest.split(';').next().unwrap_or(rest);
    let name = value.trim().replace('"', "");
    if name.is_empty() {
        None
    } else {
        Some(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn find_result_tolerates_missing_fields() {
        let result: FindResult = serde_json::from_str(r#"{"success": true}"#).unwrap();
        assert!(result.success);
        assert_eq!(result.count, 0);
        assert!(result.elements.is_empty());
        assert!(result.duration.is_none());
    }

    #[test]
    fn find_result_ignores_extra_fields() {
        let body = r#"{
            "success": true,
            "count": 1,
            "duration": 0.0123,
            "filename": "report.tsx",
            "template_type": "bt",
            "debug_info": {"file_size": 10},
            "elements": [{"tag": "span", "start": 12, "end": 20, "inner_text": "안녕"}]
        }"#;
        let result: FindResult = serde_json::from_str(body).unwrap();
        assert_eq!(result.count, 1);
        assert_eq!(result.elements[0].start, 12);
        assert_eq!(result.elements[0].inner_text, "안녕");
        assert_eq!(result.duration.unwrap().to_string(), "0.01s");
    }

    #[test]
    fn string_duration_is_shown_verbatim() {
        let result: FindResult =
            serde_json::from_str(r#"{"success": true, "duration": "1.2 sec"}"#).unwrap();
        assert_eq!(result.duration.unwrap().to_string(), "1.2 sec");
    }

    #[test]
    fn error_body_prefers_message_then_error() {
        let body: ErrorBody = serde_json::from_str(r#"{"message": "bad", "error": "x"}"#).unwrap();
        assert_eq!(body.into_message().as_deref(), Some("bad"));

        let body: ErrorBody = serde_json::from_str(r#"{"error": "File is required"}"#).unwrap();
        assert_eq!(body.into_message().as_deref(), Some("File is required"));

        let body: ErrorBody = serde_json::from_str("{}").unwrap();
        assert_eq!(body.into_message(), None);
    }

    #[test]
    fn disposition_filename_is_unquoted() {
        assert_eq!(
            filename_from_disposition(r#"attachment; filename="done.tsx""#).as_deref(),
            Some("done.tsx")
        );
        assert_eq!(
            filename_from_disposition("attachment; filename=plain.tsx; size=10").as_deref(),
            Some("plain.tsx")
        );
        assert_eq!(filename_from_disposition("attachment"), None);
        assert_eq!(filename_from_disposition("attachment; filename=\"\""), None);
    }
}
