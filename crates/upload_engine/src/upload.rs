use std::path::Path;

use reqwest::multipart::{Form, Part};
use upload_logging::{upload_debug, upload_info, upload_warn};

use crate::{
    AttemptId, EngineError, EngineEvent, EngineSettings, Endpoints, FailureKind, ProcessResponse,
    UploadError, UploadRequest, FILE_FIELD,
};

pub trait ProgressSink: Send + Sync {
    fn emit(&self, event: EngineEvent);
}

pub struct ChannelProgressSink {
    tx: std::sync::mpsc::Sender<EngineEvent>,
}

impl ChannelProgressSink {
    pub fn new(tx: std::sync::mpsc::Sender<EngineEvent>) -> Self {
        Self { tx }
    }
}

impl ProgressSink for ChannelProgressSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send(event);
    }
}

#[async_trait::async_trait]
pub trait Uploader: Send + Sync {
    /// Posts the file and returns the parsed body of a success response.
    async fn upload(
        &self,
        attempt: AttemptId,
        request: &UploadRequest,
        sink: &dyn ProgressSink,
    ) -> Result<ProcessResponse, UploadError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestUploader {
    client: reqwest::Client,
    endpoints: Endpoints,
}

impl ReqwestUploader {
    pub fn new(settings: &EngineSettings) -> Result<Self, EngineError> {
        Ok(Self {
            client: build_client(settings)?,
            endpoints: Endpoints::parse(&settings.server)?,
        })
    }

    async fn build_form(
        &self,
        attempt: AttemptId,
        request: &UploadRequest,
    ) -> Result<Form, UploadError> {
        let bytes = tokio::fs::read(&request.path).await.map_err(|err| {
            UploadError::new(
                FailureKind::FileRead,
                format!("{}: {err}", request.path.display()),
            )
        })?;
        upload_debug!(attempt = attempt; "read {} bytes from {:?}", bytes.len(), request.path);

        let part = Part::bytes(bytes)
            .file_name(request.file_name.clone())
            .mime_str(mime_for(&request.file_name))
            .map_err(|err| UploadError::new(FailureKind::FileRead, err.to_string()))?;
        Ok(Form::new().part(FILE_FIELD, part))
    }
}

#[async_trait::async_trait]
impl Uploader for ReqwestUploader {
    async fn upload(
        &self,
        attempt: AttemptId,
        request: &UploadRequest,
        sink: &dyn ProgressSink,
    ) -> Result<ProcessResponse, UploadError> {
        let form = self.build_form(attempt, request).await?;
        let url = self.endpoints.process_url();
        upload_info!(attempt = attempt; "POST {} ({})", url, request.file_name);

        let response = self
            .client
            .post(url)
            .multipart(form)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            // The server explains failures in the body; keep that for the log only.
            if let Ok(text) = response.text().await {
                if let Ok(body) = serde_json::from_str::<ProcessResponse>(&text) {
                    upload_warn!(
                        attempt = attempt;
                        "/process returned {}: error={:?} details={:?}",
                        status,
                        body.error,
                        body.details
                    );
                }
            }
            return Err(UploadError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        sink.emit(EngineEvent::ResponseReceived { attempt });

        let body = response.bytes().await.map_err(map_reqwest_error)?;
        serde_json::from_slice::<ProcessResponse>(&body)
            .map_err(|err| UploadError::new(FailureKind::InvalidBody, err.to_string()))
    }
}

pub(crate) fn build_client(settings: &EngineSettings) -> Result<reqwest::Client, EngineError> {
    reqwest::Client::builder()
        .connect_timeout(settings.connect_timeout)
        .timeout(settings.request_timeout)
        .build()
        .map_err(|err| EngineError::Client(err.to_string()))
}

fn mime_for(file_name: &str) -> &'static str {
    let extension = Path::new(file_name)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);
    match extension.as_deref() {
        Some("pdf") => "application/pdf",
        Some("ppt") => "application/vnd.ms-powerpoint",
        Some("pptx") => {
            "application/vnd.openxmlformats-officedocument.presentationml.presentation"
        }
        _ => "application/octet-stream",
    }
}

fn map_reqwest_error(err: reqwest::Error) -> UploadError {
    if err.is_timeout() {
        return UploadError::new(FailureKind::Timeout, err.to_string());
    }
    if err.is_decode() || err.is_body() {
        return UploadError::new(FailureKind::InvalidBody, err.to_string());
    }
    UploadError::new(FailureKind::Network, err.to_string())
}

#[cfg(test)]
mod tests {
    use super::mime_for;

    #[test]
    fn mime_follows_extension() {
        assert_eq!(mime_for("a.PDF"), "application/pdf");
        assert_eq!(mime_for("a.ppt"), "application/vnd.ms-powerpoint");
        assert!(mime_for("a.pptx").contains("presentationml"));
        assert_eq!(mime_for("pdf"), "application/octet-stream");
    }
}
