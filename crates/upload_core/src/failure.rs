use std::fmt;

pub const MSG_BAD_REQUEST: &str = "Bad request, please check the file format";
pub const MSG_TOO_LARGE: &str = "File too large to process";
pub const MSG_SERVER_ERROR: &str = "Internal server error, please try again later";
pub const MSG_PROCESSING_FAILED: &str = "An error occurred while processing the file";
pub const MSG_UPLOAD_FAILED: &str = "An error occurred while uploading or processing the file";

/// Why a submission attempt ended without an artifact.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadFailure {
    /// The endpoint answered with a non-success status.
    HttpStatus(u16),
    /// The body parsed but did not report success.
    Rejected { message: Option<String> },
    /// The body reported success without naming the artifact.
    MissingArtifact,
    /// The artifact name cannot be used as a download path segment.
    InvalidArtifact { name: String },
    /// The request never produced a usable body.
    Transport { detail: String },
}

impl UploadFailure {
    /// Text for the error banner.
    pub fn user_message(&self) -> String {
        match self {
            UploadFailure::HttpStatus(400) => MSG_BAD_REQUEST.to_string(),
            UploadFailure::HttpStatus(413) => MSG_TOO_LARGE.to_string(),
            UploadFailure::HttpStatus(500) => MSG_SERVER_ERROR.to_string(),
            UploadFailure::HttpStatus(code) => format!("Server responded with an error ({code})"),
            UploadFailure::Rejected {
                message: Some(message),
            } if !message.trim().is_empty() => message.clone(),
            UploadFailure::Rejected { .. }
            | UploadFailure::MissingArtifact
            | UploadFailure::InvalidArtifact { .. } => MSG_PROCESSING_FAILED.to_string(),
            UploadFailure::Transport { .. } => MSG_UPLOAD_FAILED.to_string(),
        }
    }
}

impl fmt::Display for UploadFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UploadFailure::HttpStatus(code) => write!(f, "http status {code}"),
            UploadFailure::Rejected { message } => {
                write!(f, "rejected: {}", message.as_deref().unwrap_or("<no message>"))
            }
            UploadFailure::MissingArtifact => write!(f, "success without output_file"),
            UploadFailure::InvalidArtifact { name } => write!(f, "unusable output_file {name:?}"),
            UploadFailure::Transport { detail } => write!(f, "transport: {detail}"),
        }
    }
}
