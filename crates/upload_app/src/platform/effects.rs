use std::sync::mpsc;
use std::thread;
use std::time::Instant;

use upload_core::{Effect, Msg, ProcessReply, UploadFailure};
use upload_engine::{
    EngineError, EngineEvent, EngineHandle, EngineSettings, FailureKind, ProcessResponse,
    UploadError, UploadRequest,
};
use upload_logging::{upload_debug, upload_info};

use super::app::AppEvent;
use super::timers::TimerQueue;

pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(
        settings: EngineSettings,
        app_tx: mpsc::Sender<AppEvent>,
    ) -> Result<Self, EngineError> {
        let (event_tx, event_rx) = mpsc::channel();
        let engine = EngineHandle::new(settings, event_tx)?;
        spawn_event_loop(event_rx, app_tx)?;
        Ok(Self { engine })
    }

    pub fn run(&self, effects: Vec<Effect>, timers: &mut TimerQueue, now: Instant) {
        for effect in effects {
            match effect {
                Effect::Upload { attempt, file } => {
                    upload_info!(
                        "Upload attempt={} name={} size={}",
                        attempt,
                        file.name(),
                        file.size()
                    );
                    self.engine.submit(
                        attempt,
                        UploadRequest {
                            file_name: file.name().to_string(),
                            path: file.path().to_path_buf(),
                        },
                    );
                }
                Effect::Schedule { delay, timer } => {
                    upload_debug!("Schedule {:?} in {:?}", timer, delay);
                    timers.schedule(now, delay, timer);
                }
                Effect::OpenDownload { artifact } => {
                    upload_info!("OpenDownload {}", artifact.download_path());
                    self.engine.download(artifact.as_str());
                }
            }
        }
    }
}

fn spawn_event_loop(
    event_rx: mpsc::Receiver<EngineEvent>,
    app_tx: mpsc::Sender<AppEvent>,
) -> Result<(), EngineError> {
    thread::Builder::new()
        .name("engine-events".to_string())
        .spawn(move || {
            while let Ok(event) = event_rx.recv() {
                if app_tx.send(AppEvent::Msg(map_event(event))).is_err() {
                    break;
                }
            }
        })?;
    Ok(())
}

pub(crate) fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::ResponseReceived { attempt } => Msg::ResponseReceived { attempt },
        EngineEvent::UploadCompleted { attempt, result } => Msg::UploadFinished {
            attempt,
            result: result.map(map_reply).map_err(map_failure),
        },
        EngineEvent::DownloadCompleted { artifact, result } => {
            Msg::DownloadFinished { artifact, result }
        }
    }
}

fn map_reply(response: ProcessResponse) -> ProcessReply {
    ProcessReply {
        success: response.success,
        output_file: response.output_file,
        error: response.error,
    }
}

fn map_failure(err: UploadError) -> UploadFailure {
    match err.kind {
        FailureKind::HttpStatus(code) => UploadFailure::HttpStatus(code),
        FailureKind::FileRead
        | FailureKind::Timeout
        | FailureKind::Network
        | FailureKind::InvalidBody => UploadFailure::Transport {
            detail: err.to_string(),
        },
    }
}
