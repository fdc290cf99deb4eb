use std::fmt;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::limits::{ALLOWED_EXTENSIONS, MAX_FILE_BYTES};

/// A file offered by the user, before validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileCandidate {
    pub name: String,
    pub size: u64,
    pub path: PathBuf,
}

impl FileCandidate {
    pub fn new(name: impl Into<String>, size: u64, path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            size,
            path: path.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKind {
    Ppt,
    Pptx,
    Pdf,
}

impl FileKind {
    pub fn extension(self) -> &'static str {
        match self {
            FileKind::Ppt => "ppt",
            FileKind::Pptx => "pptx",
            FileKind::Pdf => "pdf",
        }
    }

    /// Matches the text after the last `.`; a name without a dot is matched whole.
    pub fn from_file_name(name: &str) -> Option<Self> {
        let extension = name.rsplit('.').next().unwrap_or(name).to_ascii_lowercase();
        match extension.as_str() {
            "ppt" => Some(FileKind::Ppt),
            "pptx" => Some(FileKind::Pptx),
            "pdf" => Some(FileKind::Pdf),
            _ => None,
        }
    }
}

impl fmt::Display for FileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// A candidate that passed the extension and size checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    name: String,
    size: u64,
    kind: FileKind,
    path: PathBuf,
}

impl SelectedFile {
    pub fn validate(candidate: FileCandidate) -> Result<Self, SelectionError> {
        let kind = FileKind::from_file_name(&candidate.name).ok_or_else(|| {
            SelectionError::UnsupportedFormat {
                name: candidate.name.clone(),
            }
        })?;
        if candidate.size > MAX_FILE_BYTES {
            return Err(SelectionError::TooLarge {
                size: candidate.size,
            });
        }
        Ok(Self {
            name: candidate.name,
            size: candidate.size,
            kind,
            path: candidate.path,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn size(&self) -> u64 {
        self.size
    }

    pub fn kind(&self) -> FileKind {
        self.kind
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Size in MiB with two decimals, e.g. `"1.50 MB"`.
    pub fn size_label(&self) -> String {
        format!("{:.2} MB", self.size as f64 / 1024.0 / 1024.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("Unsupported file format. Please upload a PPT, PPTX or PDF file.")]
    UnsupportedFormat { name: String },
    #[error("File exceeds the size limit. Please upload a file smaller than 20MB.")]
    TooLarge { size: u64 },
}

/// Hint shown by the empty picker.
pub fn supported_formats_hint() -> String {
    let list = ALLOWED_EXTENSIONS
        .iter()
        .map(|ext| format!(".{ext}"))
        .collect::<Vec<_>>()
        .join(", ");
    format!("Supported formats: {list}")
}
