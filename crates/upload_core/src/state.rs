use std::path::PathBuf;

use upload_logging::{upload_debug, upload_info, upload_warn};

use crate::limits::{ERROR_BANNER_TIMEOUT, FINALIZE_DELAY, REVEAL_DELAY};
use crate::view_model::ViewModel;
use crate::{ArtifactName, Effect, FileCandidate, SelectedFile, Timer, UploadFailure};

pub type AttemptId = u64;

/// Parsed body of a 2xx `/process` response.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProcessReply {
    pub success: bool,
    pub output_file: Option<String>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessingStage {
    /// Status accepted, body still being read.
    AwaitingBody,
    /// Body parsed, held until the finalize timer fires.
    Generating { reply: ProcessReply },
    /// Artifact stored, waiting for the reveal timer.
    Complete { artifact: ArtifactName },
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    FileSelected {
        file: SelectedFile,
    },
    Uploading {
        file: SelectedFile,
        attempt: AttemptId,
    },
    Processing {
        file: SelectedFile,
        attempt: AttemptId,
        stage: ProcessingStage,
    },
    Done {
        source: String,
        artifact: ArtifactName,
    },
    Failed {
        failure: UploadFailure,
    },
}

/// Coarse state tag used by renderers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UiState {
    #[default]
    Idle,
    FileSelected,
    Uploading,
    Processing,
    Done,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DownloadStatus {
    #[default]
    NotStarted,
    InProgress,
    Saved(PathBuf),
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct ErrorBanner {
    message: String,
    generation: u64,
}

/// State for one upload/download widget.
///
/// Every user or engine event goes through [`crate::update`]; the operation
/// methods are public so front ends and tests can drive them directly.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct UploadController {
    phase: Phase,
    generated: Option<ArtifactName>,
    banner: Option<ErrorBanner>,
    banner_generation: u64,
    highlight: bool,
    last_attempt: AttemptId,
    download: DownloadStatus,
    dirty: bool,
}

impl UploadController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn ui_state(&self) -> UiState {
        match self.phase {
            Phase::Idle => UiState::Idle,
            Phase::FileSelected { .. } => UiState::FileSelected,
            Phase::Uploading { .. } => UiState::Uploading,
            Phase::Processing { .. } => UiState::Processing,
            Phase::Done { .. } => UiState::Done,
            Phase::Failed { .. } => UiState::Error,
        }
    }

    pub fn selected_file(&self) -> Option<&SelectedFile> {
        match &self.phase {
            Phase::FileSelected { file }
            | Phase::Uploading { file, .. }
            | Phase::Processing { file, .. } => Some(file),
            Phase::Idle | Phase::Done { .. } | Phase::Failed { .. } => None,
        }
    }

    pub fn generated_file_name(&self) -> Option<&ArtifactName> {
        self.generated.as_ref()
    }

    pub fn error_message(&self) -> Option<&str> {
        self.banner.as_ref().map(|banner| banner.message.as_str())
    }

    pub fn is_highlighted(&self) -> bool {
        self.highlight
    }

    pub fn download_status(&self) -> &DownloadStatus {
        &self.download
    }

    pub fn in_flight(&self) -> bool {
        matches!(
            self.phase,
            Phase::Uploading { .. } | Phase::Processing { .. }
        )
    }

    /// The control is enabled for a selected file and released again after a
    /// failure. A click with no file selected is still a no-op.
    pub fn upload_enabled(&self) -> bool {
        matches!(
            self.phase,
            Phase::FileSelected { .. } | Phase::Failed { .. }
        )
    }

    pub fn view(&self) -> ViewModel {
        ViewModel::from_controller(self)
    }

    /// Returns whether anything visible changed since the last call.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub fn handle_file_select(&mut self, candidate: FileCandidate) -> Vec<Effect> {
        if self.in_flight() {
            upload_warn!(
                "ignoring selection of {:?} while an upload is in flight",
                candidate.name
            );
            return Vec::new();
        }

        match SelectedFile::validate(candidate) {
            Ok(file) => {
                upload_info!("selected {:?} ({} bytes)", file.name(), file.size());
                self.hide_error();
                self.phase = Phase::FileSelected { file };
                self.mark_dirty();
                Vec::new()
            }
            Err(err) => {
                upload_info!("selection rejected: {:?}", err);
                self.show_error(err.to_string())
            }
        }
    }

    pub fn set_highlight(&mut self, highlight: bool) {
        if self.highlight != highlight {
            self.highlight = highlight;
            self.mark_dirty();
        }
    }

    pub fn submit_upload(&mut self) -> Vec<Effect> {
        let file = match &self.phase {
            Phase::FileSelected { file } => file.clone(),
            _ => {
                upload_debug!("upload clicked without a selectable file; ignored");
                return Vec::new();
            }
        };

        self.last_attempt += 1;
        let attempt = self.last_attempt;
        upload_info!("submitting {:?} as attempt {}", file.name(), attempt);
        self.phase = Phase::Uploading {
            file: file.clone(),
            attempt,
        };
        self.mark_dirty();
        vec![Effect::Upload { attempt, file }]
    }

    pub fn apply_response_received(&mut self, attempt: AttemptId) {
        let phase = std::mem::take(&mut self.phase);
        self.phase = match phase {
            Phase::Uploading {
                file,
                attempt: current,
            } if current == attempt => {
                self.dirty = true;
                Phase::Processing {
                    file,
                    attempt,
                    stage: ProcessingStage::AwaitingBody,
                }
            }
            other => {
                upload_debug!("stale response notice for attempt {}", attempt);
                other
            }
        };
    }

    pub fn apply_upload_result(
        &mut self,
        attempt: AttemptId,
        result: Result<ProcessReply, UploadFailure>,
    ) -> Vec<Effect> {
        if !self.awaits_result(attempt) {
            upload_debug!("stale upload result for attempt {}", attempt);
            return Vec::new();
        }

        match result {
            Ok(reply) => {
                let file = match std::mem::take(&mut self.phase) {
                    Phase::Uploading { file, .. } | Phase::Processing { file, .. } => file,
                    other => {
                        self.phase = other;
                        return Vec::new();
                    }
                };
                self.phase = Phase::Processing {
                    file,
                    attempt,
                    stage: ProcessingStage::Generating { reply },
                };
                self.mark_dirty();
                vec![Effect::Schedule {
                    delay: FINALIZE_DELAY,
                    timer: Timer::Finalize { attempt },
                }]
            }
            Err(failure) => self.fail_attempt(failure),
        }
    }

    fn awaits_result(&self, attempt: AttemptId) -> bool {
        match &self.phase {
            Phase::Uploading {
                attempt: current, ..
            } => *current == attempt,
            Phase::Processing {
                attempt: current,
                stage: ProcessingStage::AwaitingBody,
                ..
            } => *current == attempt,
            _ => false,
        }
    }

    pub fn apply_timer(&mut self, timer: Timer) -> Vec<Effect> {
        match timer {
            Timer::Finalize { attempt } => self.finalize(attempt),
            Timer::Reveal { attempt } => {
                self.reveal(attempt);
                Vec::new()
            }
            Timer::DismissError { generation } => {
                let current = self.banner.as_ref().map(|banner| banner.generation);
                if current == Some(generation) {
                    self.hide_error();
                }
                Vec::new()
            }
        }
    }

    fn finalize(&mut self, attempt: AttemptId) -> Vec<Effect> {
        let (file, reply) = match std::mem::take(&mut self.phase) {
            Phase::Processing {
                file,
                attempt: current,
                stage: ProcessingStage::Generating { reply },
            } if current == attempt => (file, reply),
            other => {
                self.phase = other;
                return Vec::new();
            }
        };

        let artifact = match evaluate_reply(reply) {
            Ok(artifact) => artifact,
            Err(failure) => return self.fail_attempt(failure),
        };

        upload_info!("artifact {} ready", artifact);
        self.generated = Some(artifact.clone());
        self.download = DownloadStatus::NotStarted;
        self.phase = Phase::Processing {
            file,
            attempt,
            stage: ProcessingStage::Complete { artifact },
        };
        self.mark_dirty();
        vec![Effect::Schedule {
            delay: REVEAL_DELAY,
            timer: Timer::Reveal { attempt },
        }]
    }

    fn reveal(&mut self, attempt: AttemptId) {
        self.phase = match std::mem::take(&mut self.phase) {
            Phase::Processing {
                file,
                attempt: current,
                stage: ProcessingStage::Complete { artifact },
            } if current == attempt => {
                self.dirty = true;
                Phase::Done {
                    source: file.name().to_string(),
                    artifact,
                }
            }
            other => other,
        };
    }

    fn fail_attempt(&mut self, failure: UploadFailure) -> Vec<Effect> {
        upload_warn!("upload failed: {}", failure);
        let message = failure.user_message();
        self.reset_upload_area();
        self.phase = Phase::Failed { failure };
        self.show_error(message)
    }

    pub fn trigger_download(&mut self) -> Vec<Effect> {
        let Some(artifact) = self.generated.clone() else {
            upload_debug!("download clicked before any artifact exists; ignored");
            return Vec::new();
        };
        if self.download == DownloadStatus::InProgress {
            upload_debug!("download of {} already running", artifact);
            return Vec::new();
        }
        upload_info!("opening {}", artifact.download_path());
        self.download = DownloadStatus::InProgress;
        self.mark_dirty();
        vec![Effect::OpenDownload { artifact }]
    }

    pub fn apply_download_result(
        &mut self,
        artifact: &str,
        result: Result<PathBuf, String>,
    ) -> Vec<Effect> {
        let current = self.generated.as_ref().map(ArtifactName::as_str);
        if current != Some(artifact) || self.download != DownloadStatus::InProgress {
            upload_debug!("stale download result for {:?}", artifact);
            return Vec::new();
        }
        self.mark_dirty();
        match result {
            Ok(path) => {
                upload_info!("artifact saved to {:?}", path);
                self.download = DownloadStatus::Saved(path);
                Vec::new()
            }
            Err(err) => {
                upload_warn!("download failed: {}", err);
                self.download = DownloadStatus::Failed;
                self.show_error(format!("Download failed: {err}"))
            }
        }
    }

    /// Shows `message` in the banner and schedules its dismissal.
    pub fn show_error(&mut self, message: impl Into<String>) -> Vec<Effect> {
        self.banner_generation += 1;
        let generation = self.banner_generation;
        self.banner = Some(ErrorBanner {
            message: message.into(),
            generation,
        });
        self.mark_dirty();
        vec![Effect::Schedule {
            delay: ERROR_BANNER_TIMEOUT,
            timer: Timer::DismissError { generation },
        }]
    }

    pub fn hide_error(&mut self) {
        if self.banner.take().is_some() {
            self.mark_dirty();
        }
    }

    /// Puts the picker back to its empty prompt and forgets the selected file.
    pub fn reset_upload_area(&mut self) {
        self.phase = match std::mem::take(&mut self.phase) {
            Phase::FileSelected { .. } | Phase::Uploading { .. } | Phase::Processing { .. } => {
                Phase::Idle
            }
            other => other,
        };
        self.highlight = false;
        self.mark_dirty();
    }
}

fn evaluate_reply(reply: ProcessReply) -> Result<ArtifactName, UploadFailure> {
    if !reply.success {
        return Err(UploadFailure::Rejected {
            message: reply.error,
        });
    }
    match reply.output_file.as_deref() {
        Some(name) => ArtifactName::parse(name),
        None => Err(UploadFailure::MissingArtifact),
    }
}
