use std::path::PathBuf;

use crate::{AttemptId, FileCandidate, ProcessReply, Timer, UploadFailure};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User picked a file through the file dialog.
    FileChosen(FileCandidate),
    /// A drag entered the upload area.
    DragEntered,
    /// The drag left the upload area without dropping.
    DragLeft,
    /// A file was dropped onto the upload area.
    FileDropped(FileCandidate),
    /// User clicked Upload.
    UploadClicked,
    /// The endpoint accepted the request and answered with a success status.
    ResponseReceived { attempt: AttemptId },
    /// Engine finished the request for an attempt.
    UploadFinished {
        attempt: AttemptId,
        result: Result<ProcessReply, UploadFailure>,
    },
    /// A scheduled timer elapsed.
    TimerFired(Timer),
    /// User clicked Download.
    DownloadClicked,
    /// The download of `artifact` ended.
    DownloadFinished {
        artifact: String,
        result: Result<PathBuf, String>,
    },
    /// Render tick.
    Tick,
    NoOp,
}
