use std::path::PathBuf;

use upload_core::{DownloadStatus, Msg, UiState, ViewModel};

/// How a one-shot run ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Saved(PathBuf),
    /// Document generated, download skipped; carries the download route.
    Ready(String),
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptStep {
    Continue(Vec<Msg>),
    Finished(Outcome),
}

/// Clicks through select → upload → download for a file given on the command line.
#[derive(Debug, Clone)]
pub struct AutoScript {
    download: bool,
    upload_sent: bool,
    download_sent: bool,
}

impl AutoScript {
    pub fn new(download: bool) -> Self {
        Self {
            download,
            upload_sent: false,
            download_sent: false,
        }
    }

    pub fn next(&mut self, view: &ViewModel) -> ScriptStep {
        match view.state {
            UiState::FileSelected if view.upload_enabled && !self.upload_sent => {
                self.upload_sent = true;
                ScriptStep::Continue(vec![Msg::UploadClicked])
            }
            UiState::Idle if view.error.is_some() => ScriptStep::Finished(failed(view)),
            UiState::Error => ScriptStep::Finished(failed(view)),
            UiState::Done => self.after_done(view),
            _ => ScriptStep::Continue(Vec::new()),
        }
    }

    fn after_done(&mut self, view: &ViewModel) -> ScriptStep {
        if !self.download {
            let route = view
                .result
                .as_ref()
                .map(|result| result.download_path.clone())
                .unwrap_or_default();
            return ScriptStep::Finished(Outcome::Ready(route));
        }
        match &view.download {
            DownloadStatus::NotStarted if !self.download_sent => {
                self.download_sent = true;
                ScriptStep::Continue(vec![Msg::DownloadClicked])
            }
            DownloadStatus::Saved(path) => ScriptStep::Finished(Outcome::Saved(path.clone())),
            DownloadStatus::Failed => ScriptStep::Finished(failed(view)),
            _ => ScriptStep::Continue(Vec::new()),
        }
    }
}

fn failed(view: &ViewModel) -> Outcome {
    Outcome::Failed(
        view.error
            .clone()
            .unwrap_or_else(|| upload_core::MSG_UPLOAD_FAILED.to_string()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use upload_core::{
        update, FileCandidate, ProcessReply, Timer, UploadController, UploadFailure,
    };

    fn apply(state: UploadController, msgs: Vec<Msg>) -> UploadController {
        msgs.into_iter().fold(state, |state, msg| update(state, msg).0)
    }

    #[test]
    fn walks_the_happy_path() {
        let mut script = AutoScript::new(true);
        let state = apply(
            UploadController::new(),
            vec![Msg::FileChosen(FileCandidate::new("d.pdf", 1, "/tmp/d.pdf"))],
        );

        let ScriptStep::Continue(msgs) = script.next(&state.view()) else {
            panic!("expected upload click");
        };
        assert_eq!(msgs, vec![Msg::UploadClicked]);
        let state = apply(state, msgs);
        assert_eq!(script.next(&state.view()), ScriptStep::Continue(Vec::new()));

        let state = apply(
            state,
            vec![
                Msg::ResponseReceived { attempt: 1 },
                Msg::UploadFinished {
                    attempt: 1,
                    result: Ok(ProcessReply {
                        success: true,
                        output_file: Some("d.docx".into()),
                        error: None,
                    }),
                },
                Msg::TimerFired(Timer::Finalize { attempt: 1 }),
                Msg::TimerFired(Timer::Reveal { attempt: 1 }),
            ],
        );
        assert_eq!(
            script.next(&state.view()),
            ScriptStep::Continue(vec![Msg::DownloadClicked])
        );

        let state = apply(
            state,
            vec![
                Msg::DownloadClicked,
                Msg::DownloadFinished {
                    artifact: "d.docx".into(),
                    result: Ok("/tmp/out/d.docx".into()),
                },
            ],
        );
        assert_eq!(
            script.next(&state.view()),
            ScriptStep::Finished(Outcome::Saved("/tmp/out/d.docx".into()))
        );
    }

    #[test]
    fn stops_on_validation_error() {
        let mut script = AutoScript::new(true);
        let state = apply(
            UploadController::new(),
            vec![Msg::FileChosen(FileCandidate::new("d.txt", 1, "/tmp/d.txt"))],
        );
        assert!(matches!(
            script.next(&state.view()),
            ScriptStep::Finished(Outcome::Failed(_))
        ));
    }

    #[test]
    fn stops_on_upload_failure_with_banner_text() {
        let mut script = AutoScript::new(false);
        let state = apply(
            UploadController::new(),
            vec![
                Msg::FileChosen(FileCandidate::new("d.pdf", 1, "/tmp/d.pdf")),
                Msg::UploadClicked,
                Msg::UploadFinished {
                    attempt: 1,
                    result: Err(UploadFailure::HttpStatus(500)),
                },
            ],
        );
        assert_eq!(
            script.next(&state.view()),
            ScriptStep::Finished(Outcome::Failed(upload_core::MSG_SERVER_ERROR.to_string()))
        );
    }
}
