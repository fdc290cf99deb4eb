use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};
use upload_engine::{EngineSettings, DEFAULT_SERVER};

use crate::platform::logging::LogDestination;

#[derive(Debug, Parser)]
#[command(
    name = "slide-upload",
    version,
    about = "Upload a PPT, PPTX or PDF file for conversion and fetch the generated document"
)]
pub struct Cli {
    /// File to upload. Without it, commands are read from stdin.
    pub file: Option<PathBuf>,

    /// Base URL of the processing server.
    #[arg(long, env = "SLIDE_UPLOAD_SERVER", default_value = DEFAULT_SERVER)]
    pub server: String,

    /// Directory generated documents are saved to.
    #[arg(long, env = "SLIDE_UPLOAD_OUT", default_value = "downloads")]
    pub out: PathBuf,

    /// Stop once the document is ready instead of downloading it.
    #[arg(long)]
    pub no_download: bool,

    /// Whole-request timeout in seconds, conversion included.
    #[arg(long, default_value_t = 120)]
    pub timeout_secs: u64,

    #[arg(long, value_enum, default_value_t = LogTarget::File)]
    pub log: LogTarget,

    #[arg(long, default_value = "slide-upload.log")]
    pub log_file: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogTarget {
    File,
    Terminal,
    Both,
    Off,
}

impl Cli {
    pub fn engine_settings(&self) -> EngineSettings {
        EngineSettings {
            server: self.server.clone(),
            request_timeout: Duration::from_secs(self.timeout_secs),
            download_dir: self.out.clone(),
            ..EngineSettings::default()
        }
    }

    pub fn log_destination(&self) -> Option<LogDestination> {
        match self.log {
            LogTarget::File => Some(LogDestination::File(self.log_file.clone())),
            LogTarget::Terminal => Some(LogDestination::Terminal),
            LogTarget::Both => Some(LogDestination::Both(self.log_file.clone())),
            LogTarget::Off => None,
        }
    }
}
