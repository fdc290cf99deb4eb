use upload_core::{DownloadStatus, PickerView, UiState, ViewModel};

const BAR_WIDTH: usize = 20;

/// Renders the widget as text lines, top to bottom.
pub fn render(view: &ViewModel) -> Vec<String> {
    let mut lines = Vec::new();

    let frame = if view.highlight { "[*]" } else { "[ ]" };
    match &view.picker {
        PickerView::Prompt { text, hint } => {
            lines.push(format!("{frame} {text}"));
            lines.push(format!("    {hint}"));
        }
        PickerView::Selected { name, size_label } => {
            lines.push(format!("{frame} {name}"));
            lines.push(format!("    {size_label}"));
        }
    }

    let upload = if view.upload_enabled {
        "[Upload]"
    } else {
        "[Upload (disabled)]"
    };
    lines.push(format!("State: {} {upload}", state_label(view.state)));

    if view.progress.visible {
        lines.push(format!(
            "{} {:>3}% {}",
            progress_bar(view.progress.percent),
            view.progress.percent,
            view.progress.status
        ));
    }

    if let Some(result) = &view.result {
        let download = match &view.download {
            DownloadStatus::NotStarted => "[Download]".to_string(),
            DownloadStatus::InProgress => "[Downloading...]".to_string(),
            DownloadStatus::Saved(path) => format!("[Saved to {}]", path.display()),
            DownloadStatus::Failed => "[Download failed]".to_string(),
        };
        lines.push(format!(
            "Ready: {} ({}) {download}",
            result.artifact, result.download_path
        ));
    }

    if let Some(error) = &view.error {
        lines.push(format!("Error: {error}"));
    }

    lines
}

fn state_label(state: UiState) -> &'static str {
    match state {
        UiState::Idle => "Idle",
        UiState::FileSelected => "File selected",
        UiState::Uploading => "Uploading",
        UiState::Processing => "Processing",
        UiState::Done => "Done",
        UiState::Error => "Error",
    }
}

fn progress_bar(percent: u8) -> String {
    let filled = usize::from(percent.min(100)) * BAR_WIDTH / 100;
    format!("[{}{}]", "#".repeat(filled), ".".repeat(BAR_WIDTH - filled))
}
