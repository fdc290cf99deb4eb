use std::path::PathBuf;
use std::time::Duration;

use url::Url;

use crate::EngineError;

pub const DEFAULT_SERVER: &str = "http://127.0.0.1:5000/";

#[derive(Debug, Clone)]
pub struct EngineSettings {
    /// Base URL the `/process` and `/download` routes are resolved against.
    pub server: String,
    pub connect_timeout: Duration,
    /// Covers the whole round trip, including server-side conversion.
    pub request_timeout: Duration,
    pub download_dir: PathBuf,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            server: DEFAULT_SERVER.to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(120),
            download_dir: PathBuf::from("downloads"),
        }
    }
}

/// Route builder for the processing server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    base: Url,
}

impl Endpoints {
    pub fn parse(server: &str) -> Result<Self, EngineError> {
        let base = Url::parse(server.trim())
            .map_err(|err| EngineError::InvalidServerUrl(format!("{server}: {err}")))?;
        if !matches!(base.scheme(), "http" | "https") || base.cannot_be_a_base() {
            return Err(EngineError::InvalidServerUrl(format!(
                "{server}: expected an http(s) base URL"
            )));
        }
        Ok(Self { base })
    }

    pub fn process_url(&self) -> Url {
        self.with_segments(&["process"])
    }

    /// `/download/{artifact}` with the artifact percent-encoded as one segment.
    pub fn download_url(&self, artifact: &str) -> Url {
        self.with_segments(&["download", artifact])
    }

    fn with_segments(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        url.set_query(None);
        url.set_fragment(None);
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }
}
