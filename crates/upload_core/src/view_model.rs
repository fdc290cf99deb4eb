use std::path::PathBuf;

use crate::limits::{PROGRESS_COMPLETE, PROGRESS_PARSED, PROGRESS_RESPONSE, PROGRESS_SENDING};
use crate::selection::supported_formats_hint;
use crate::{DownloadStatus, Phase, ProcessingStage, UiState, UploadController};

pub const PROMPT_TEXT: &str = "Click or drag a file here to upload";
pub const STATUS_UPLOADING: &str = "Uploading file...";
pub const STATUS_PROCESSING: &str = "Processing file...";
pub const STATUS_GENERATING: &str = "Generating Word document...";
pub const STATUS_COMPLETE: &str = "Processing complete!";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PickerView {
    Prompt { text: String, hint: String },
    Selected { name: String, size_label: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProgressView {
    pub visible: bool,
    pub percent: u8,
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultView {
    pub artifact: String,
    pub download_path: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewModel {
    pub state: UiState,
    pub picker: PickerView,
    pub highlight: bool,
    pub upload_enabled: bool,
    pub progress: ProgressView,
    /// Shown once the result area has been revealed, kept for later cycles.
    pub result: Option<ResultView>,
    pub error: Option<String>,
    pub download: DownloadStatus,
    pub saved_to: Option<PathBuf>,
}

impl ViewModel {
    pub(crate) fn from_controller(controller: &UploadController) -> Self {
        let picker = match controller.selected_file() {
            Some(file) => PickerView::Selected {
                name: file.name().to_string(),
                size_label: file.size_label(),
            },
            None => PickerView::Prompt {
                text: PROMPT_TEXT.to_string(),
                hint: supported_formats_hint(),
            },
        };

        let result_revealed = !matches!(
            controller.phase(),
            Phase::Processing {
                stage: ProcessingStage::Complete { .. },
                ..
            }
        );
        let result = controller
            .generated_file_name()
            .filter(|_| result_revealed)
            .map(|artifact| ResultView {
                artifact: artifact.to_string(),
                download_path: artifact.download_path(),
            });

        let saved_to = match controller.download_status() {
            DownloadStatus::Saved(path) => Some(path.clone()),
            _ => None,
        };

        Self {
            state: controller.ui_state(),
            picker,
            highlight: controller.is_highlighted(),
            upload_enabled: controller.upload_enabled(),
            progress: progress_for(controller.phase()),
            result,
            error: controller.error_message().map(ToOwned::to_owned),
            download: controller.download_status().clone(),
            saved_to,
        }
    }
}

fn progress_for(phase: &Phase) -> ProgressView {
    let (percent, status) = match phase {
        Phase::Uploading { .. } => (PROGRESS_SENDING, STATUS_UPLOADING),
        Phase::Processing { stage, .. } => match stage {
            ProcessingStage::AwaitingBody => (PROGRESS_RESPONSE, STATUS_PROCESSING),
            ProcessingStage::Generating { .. } => (PROGRESS_PARSED, STATUS_GENERATING),
            ProcessingStage::Complete { .. } => (PROGRESS_COMPLETE, STATUS_COMPLETE),
        },
        _ => return ProgressView::default(),
    };
    ProgressView {
        visible: true,
        percent,
        status: status.to_string(),
    }
}
