use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistError {
    #[error("output directory missing or not writable: {0}")]
    OutputDir(String),
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}

/// Ensure the download directory exists; create if missing.
pub fn ensure_output_dir(dir: &Path) -> Result<(), PersistError> {
    if dir.exists() {
        let meta = fs::metadata(dir).map_err(|e| PersistError::OutputDir(e.to_string()))?;
        if !meta.is_dir() {
            return Err(PersistError::OutputDir("path is not a directory".into()));
        }
    } else {
        fs::create_dir_all(dir).map_err(|e| PersistError::OutputDir(e.to_string()))?;
    }
    Ok(())
}

/// Writes files into `dir` through a temp file that is renamed into place,
/// so a failed download never leaves a truncated document behind.
#[derive(Debug, Clone)]
pub struct AtomicFileWriter {
    dir: PathBuf,
}

impl AtomicFileWriter {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// Opens a temp file for chunked writes; nothing is visible until `commit`.
    pub fn begin(&self) -> Result<PendingFile, PersistError> {
        ensure_output_dir(&self.dir)?;
        let tmp = NamedTempFile::new_in(&self.dir)?;
        Ok(PendingFile {
            dir: self.dir.clone(),
            tmp,
            written: 0,
        })
    }
}

pub struct PendingFile {
    dir: PathBuf,
    tmp: NamedTempFile,
    written: u64,
}

impl PendingFile {
    pub fn write_chunk(&mut self, chunk: &[u8]) -> Result<(), PersistError> {
        self.tmp.write_all(chunk)?;
        self.written += chunk.len() as u64;
        Ok(())
    }

    pub fn written(&self) -> u64 {
        self.written
    }

    pub fn commit(mut self, filename: &str) -> Result<PathBuf, PersistError> {
        self.tmp.flush()?;
        self.tmp.as_file_mut().sync_all()?;

        let target = self.dir.join(filename);
        // Replace an earlier download of the same artifact.
        if target.exists() {
            fs::remove_file(&target)?;
        }
        self.tmp
            .persist(&target)
            .map_err(|e| PersistError::Io(e.error))?;
        Ok(target)
    }
}
