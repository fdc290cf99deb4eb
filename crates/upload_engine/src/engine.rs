use std::sync::{mpsc, Arc};
use std::thread;

use crate::download::{Downloader, ReqwestDownloader};
use crate::upload::{ChannelProgressSink, ReqwestUploader, Uploader};
use crate::{AttemptId, EngineError, EngineEvent, EngineSettings, UploadRequest};

enum EngineCommand {
    Upload {
        attempt: AttemptId,
        request: UploadRequest,
    },
    Download {
        artifact: String,
    },
}

/// Runs requests on a background tokio runtime and reports [`EngineEvent`]s
/// on the channel given at construction.
#[derive(Clone)]
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
}

impl EngineHandle {
    pub fn new(
        settings: EngineSettings,
        event_tx: mpsc::Sender<EngineEvent>,
    ) -> Result<Self, EngineError> {
        let uploader: Arc<dyn Uploader> = Arc::new(ReqwestUploader::new(&settings)?);
        let downloader: Arc<dyn Downloader> = Arc::new(ReqwestDownloader::new(&settings)?);
        Self::with_backends(uploader, downloader, event_tx)
    }

    pub fn with_backends(
        uploader: Arc<dyn Uploader>,
        downloader: Arc<dyn Downloader>,
        event_tx: mpsc::Sender<EngineEvent>,
    ) -> Result<Self, EngineError> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let runtime = tokio::runtime::Runtime::new()?;

        thread::Builder::new()
            .name("upload-engine".to_string())
            .spawn(move || {
                while let Ok(command) = cmd_rx.recv() {
                    let uploader = uploader.clone();
                    let downloader = downloader.clone();
                    let event_tx = event_tx.clone();
                    runtime.spawn(async move {
                        handle_command(uploader.as_ref(), downloader.as_ref(), command, event_tx)
                            .await;
                    });
                }
            })?;

        Ok(Self { cmd_tx })
    }

    pub fn submit(&self, attempt: AttemptId, request: UploadRequest) {
        let _ = self.cmd_tx.send(EngineCommand::Upload { attempt, request });
    }

    pub fn download(&self, artifact: impl Into<String>) {
        let _ = self.cmd_tx.send(EngineCommand::Download {
            artifact: artifact.into(),
        });
    }
}

async fn handle_command(
    uploader: &dyn Uploader,
    downloader: &dyn Downloader,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    match command {
        EngineCommand::Upload { attempt, request } => {
            let sink = ChannelProgressSink::new(event_tx.clone());
            let result = uploader.upload(attempt, &request, &sink).await;
            let _ = event_tx.send(EngineEvent::UploadCompleted { attempt, result });
        }
        EngineCommand::Download { artifact } => {
            let result = downloader
                .download(&artifact)
                .await
                .map_err(|err| err.to_string());
            let _ = event_tx.send(EngineEvent::DownloadCompleted { artifact, result });
        }
    }
}
