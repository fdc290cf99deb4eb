use std::fmt;
use std::path::PathBuf;

use serde::Deserialize;
use thiserror::Error;

use crate::PersistError;

pub type AttemptId = u64;

/// Multipart field the processing endpoint reads the file from.
pub const FILE_FIELD: &str = "file";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadRequest {
    /// Name sent as the multipart file name.
    pub file_name: String,
    pub path: PathBuf,
}

/// JSON body returned by `/process`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct ProcessResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub output_file: Option<String>,
    #[serde(default)]
    pub download_url: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub details: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    /// `/process` answered with a success status; the body is being read.
    ResponseReceived { attempt: AttemptId },
    UploadCompleted {
        attempt: AttemptId,
        result: Result<ProcessResponse, UploadError>,
    },
    DownloadCompleted {
        artifact: String,
        result: Result<PathBuf, String>,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {message}")]
pub struct UploadError {
    pub kind: FailureKind,
    pub message: String,
}

impl UploadError {
    pub(crate) fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    FileRead,
    HttpStatus(u16),
    Timeout,
    Network,
    InvalidBody,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::FileRead => write!(f, "file read failed"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::Network => write!(f, "network error"),
            FailureKind::InvalidBody => write!(f, "invalid response body"),
        }
    }
}

#[derive(Debug, Error)]
pub enum DownloadError {
    #[error("http status {0}")]
    HttpStatus(u16),
    #[error("network error: {0}")]
    Network(String),
    #[error(transparent)]
    Persist(#[from] PersistError),
}

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("invalid server url {0}")]
    InvalidServerUrl(String),
    #[error("http client setup failed: {0}")]
    Client(String),
    #[error("engine runtime failed to start: {0}")]
    Runtime(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_fields_are_optional() {
        let parsed: ProcessResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(parsed, ProcessResponse::default());

        let parsed: ProcessResponse = serde_json::from_str(
            r#"{"success": true, "download_url": "/download/a.docx", "output_file": "a.docx"}"#,
        )
        .unwrap();
        assert!(parsed.success);
        assert_eq!(parsed.output_file.as_deref(), Some("a.docx"));
    }

    #[test]
    fn null_fields_parse_as_none() {
        let parsed: ProcessResponse =
            serde_json::from_str(r#"{"success": false, "error": null, "extra": 1}"#).unwrap();
        assert!(!parsed.success);
        assert_eq!(parsed.error, None);
    }
}
