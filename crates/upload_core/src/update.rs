use crate::{Effect, Msg, UploadController};

/// Pure update function: applies a message to the controller and returns any effects.
pub fn update(mut state: UploadController, msg: Msg) -> (UploadController, Vec<Effect>) {
    let effects = match msg {
        Msg::FileChosen(candidate) => state.handle_file_select(candidate),
        Msg::DragEntered => {
            state.set_highlight(true);
            Vec::new()
        }
        Msg::DragLeft => {
            state.set_highlight(false);
            Vec::new()
        }
        Msg::FileDropped(candidate) => {
            state.set_highlight(false);
            state.handle_file_select(candidate)
        }
        Msg::UploadClicked => state.submit_upload(),
        Msg::ResponseReceived { attempt } => {
            state.apply_response_received(attempt);
            Vec::new()
        }
        Msg::UploadFinished { attempt, result } => state.apply_upload_result(attempt, result),
        Msg::TimerFired(timer) => state.apply_timer(timer),
        Msg::DownloadClicked => state.trigger_download(),
        Msg::DownloadFinished { artifact, result } => {
            state.apply_download_result(&artifact, result)
        }
        Msg::Tick | Msg::NoOp => Vec::new(),
    };

    (state, effects)
}
