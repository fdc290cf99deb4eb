//! Upload core: pure controller state machine and view-model helpers.
mod artifact;
mod effect;
mod failure;
pub mod limits;
mod msg;
mod selection;
mod state;
mod update;
mod view_model;

pub use artifact::ArtifactName;
pub use effect::{Effect, Timer};
pub use failure::{
    UploadFailure, MSG_BAD_REQUEST, MSG_PROCESSING_FAILED, MSG_SERVER_ERROR, MSG_TOO_LARGE,
    MSG_UPLOAD_FAILED,
};
pub use msg::Msg;
pub use selection::{FileCandidate, FileKind, SelectedFile, SelectionError};
pub use state::{
    AttemptId, DownloadStatus, Phase, ProcessReply, ProcessingStage, UiState, UploadController,
};
pub use update::update;
pub use view_model::{
    PickerView, ProgressView, ResultView, ViewModel, PROMPT_TEXT, STATUS_COMPLETE,
    STATUS_GENERATING, STATUS_PROCESSING, STATUS_UPLOADING,
};
