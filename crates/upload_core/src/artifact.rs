use std::fmt;

use crate::UploadFailure;

/// Server-assigned name of the generated document.
///
/// Kept exactly as the server sent it. It is a single path segment: no
/// separators, never `.` or `..`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactName(String);

impl ArtifactName {
    pub fn parse(raw: &str) -> Result<Self, UploadFailure> {
        let unusable = raw.is_empty()
            || raw == "."
            || raw == ".."
            || raw.contains(['/', '\\']);
        if unusable {
            return Err(UploadFailure::InvalidArtifact {
                name: raw.to_string(),
            });
        }
        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Unescaped `/download/{name}` route for display. The engine encodes
    /// the name as one path segment when it builds the request URL.
    pub fn download_path(&self) -> String {
        format!("/download/{}", self.0)
    }
}

impl fmt::Display for ArtifactName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
