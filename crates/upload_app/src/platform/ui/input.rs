use std::fs;
use std::path::Path;

use upload_core::{FileCandidate, Msg};

pub const HELP: &str =
    "commands: select <path> | drop <path> | drag | leave | upload | download | help | quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Msg(Msg),
    Help,
    Quit,
}

/// Parses one line typed by the user.
pub fn parse_command(line: &str) -> Result<Command, String> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word.to_ascii_lowercase().as_str() {
        "select" | "pick" => Command::Msg(Msg::FileChosen(candidate_from_path(required(rest)?)?)),
        "drop" => Command::Msg(Msg::FileDropped(candidate_from_path(required(rest)?)?)),
        "drag" => Command::Msg(Msg::DragEntered),
        "leave" => Command::Msg(Msg::DragLeft),
        "upload" => Command::Msg(Msg::UploadClicked),
        "download" => Command::Msg(Msg::DownloadClicked),
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        "" => return Err(HELP.to_string()),
        other => return Err(format!("unknown command {other:?}; {HELP}")),
    };
    Ok(command)
}

fn required(rest: &str) -> Result<&str, String> {
    if rest.is_empty() {
        Err("missing file path".to_string())
    } else {
        Ok(rest)
    }
}

/// Reads the file name and size the picker would report for `path`.
pub fn candidate_from_path(path: impl AsRef<Path>) -> Result<FileCandidate, String> {
    let path = path.as_ref();
    let meta = fs::metadata(path).map_err(|err| format!("cannot read {}: {err}", path.display()))?;
    if !meta.is_file() {
        return Err(format!("{} is not a file", path.display()));
    }
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();
    Ok(FileCandidate::new(name, meta.len(), path))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn select_reads_name_and_size() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("Deck Final.PPTX");
        fs::write(&path, vec![0u8; 2048]).unwrap();

        let command = parse_command(&format!("select {}", path.display())).unwrap();
        assert_eq!(
            command,
            Command::Msg(Msg::FileChosen(FileCandidate::new(
                "Deck Final.PPTX",
                2048,
                path.clone()
            )))
        );
    }

    #[test]
    fn simple_commands() {
        assert_eq!(parse_command("upload").unwrap(), Command::Msg(Msg::UploadClicked));
        assert_eq!(parse_command(" DOWNLOAD ").unwrap(), Command::Msg(Msg::DownloadClicked));
        assert_eq!(parse_command("drag").unwrap(), Command::Msg(Msg::DragEntered));
        assert_eq!(parse_command("quit").unwrap(), Command::Quit);
        assert_eq!(parse_command("help").unwrap(), Command::Help);
    }

    #[test]
    fn bad_input_explains_itself() {
        assert!(parse_command("select").unwrap_err().contains("missing file path"));
        assert!(parse_command("frobnicate").unwrap_err().contains("unknown command"));
        assert!(parse_command("select /no/such/file.pdf")
            .unwrap_err()
            .starts_with("cannot read"));

        let dir = TempDir::new().unwrap();
        assert!(parse_command(&format!("drop {}", dir.path().display()))
            .unwrap_err()
            .ends_with("is not a file"));
    }
}
