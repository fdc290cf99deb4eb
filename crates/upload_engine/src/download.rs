use std::path::PathBuf;

use futures_util::StreamExt;
use upload_logging::upload_info;

use crate::filename::safe_file_name;
use crate::upload::build_client;
use crate::{AtomicFileWriter, DownloadError, EngineError, EngineSettings, Endpoints};

#[async_trait::async_trait]
pub trait Downloader: Send + Sync {
    /// Fetches `/download/{artifact}` and returns where it was saved.
    async fn download(&self, artifact: &str) -> Result<PathBuf, DownloadError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestDownloader {
    client: reqwest::Client,
    endpoints: Endpoints,
    writer: AtomicFileWriter,
}

impl ReqwestDownloader {
    pub fn new(settings: &EngineSettings) -> Result<Self, EngineError> {
        Ok(Self {
            client: build_client(settings)?,
            endpoints: Endpoints::parse(&settings.server)?,
            writer: AtomicFileWriter::new(settings.download_dir.clone()),
        })
    }
}

#[async_trait::async_trait]
impl Downloader for ReqwestDownloader {
    async fn download(&self, artifact: &str) -> Result<PathBuf, DownloadError> {
        let url = self.endpoints.download_url(artifact);
        upload_info!("GET {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|err| DownloadError::Network(err.to_string()))?;
        let status = response.status();
        if !status.is_success() {
            return Err(DownloadError::HttpStatus(status.as_u16()));
        }

        let mut pending = self.writer.begin()?;
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(|err| DownloadError::Network(err.to_string()))?;
            pending.write_chunk(&chunk)?;
        }

        let written = pending.written();
        let saved = pending.commit(&safe_file_name(artifact))?;
        upload_info!("saved {} bytes to {:?}", written, saved);
        Ok(saved)
    }
}
