//! Upload engine: HTTP requests and file IO behind the controller's effects.
mod download;
mod engine;
mod filename;
mod persist;
mod settings;
mod types;
mod upload;

pub use download::{Downloader, ReqwestDownloader};
pub use engine::EngineHandle;
pub use filename::safe_file_name;
pub use persist::{ensure_output_dir, AtomicFileWriter, PendingFile, PersistError};
pub use settings::{EngineSettings, Endpoints, DEFAULT_SERVER};
pub use types::{
    AttemptId, DownloadError, EngineError, EngineEvent, FailureKind, ProcessResponse,
    UploadError, UploadRequest, FILE_FIELD,
};
pub use upload::{ChannelProgressSink, ProgressSink, ReqwestUploader, Uploader};
