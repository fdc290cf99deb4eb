use std::time::Duration;

use crate::{ArtifactName, AttemptId, SelectedFile};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// POST the file to the processing endpoint.
    Upload {
        attempt: AttemptId,
        file: SelectedFile,
    },
    /// Deliver `Msg::TimerFired(timer)` after `delay`.
    Schedule { delay: Duration, timer: Timer },
    /// Navigate to the artifact's download route.
    OpenDownload { artifact: ArtifactName },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Timer {
    /// Move a parsed response from "generating" to "complete".
    Finalize { attempt: crate::AttemptId },
    /// Reveal the result area.
    Reveal { attempt: crate::AttemptId },
    /// Hide the error banner if it is still the one with this generation.
    DismissError { generation: u64 },
}
