/// Maps a server-provided artifact name to a file name that stays inside the
/// download directory on every platform.
pub fn safe_file_name(artifact: &str) -> String {
    let cleaned: String = artifact
        .chars()
        .map(|c| if is_forbidden(c) { '_' } else { c })
        .collect();
    let cleaned = cleaned.trim_matches(&['_', ' ', '.'][..]);

    let mut compacted = String::with_capacity(cleaned.len());
    let mut prev_underscore = false;
    for c in cleaned.chars() {
        if c == '_' && prev_underscore {
            continue;
        }
        prev_underscore = c == '_';
        compacted.push(c);
    }

    let mut name: String = compacted.chars().take(120).collect();
    if name.is_empty() {
        name = "download".to_string();
    }
    if is_reserved_windows_name(&name) {
        name.insert(0, '_');
    }
    name
}

fn is_forbidden(c: char) -> bool {
    matches!(c,
        '\\' | '/' | ':' | '*' | '?' | '"' | '<' | '>' | '|' | '\0'..='\u{1F}'
    )
}

fn is_reserved_windows_name(name: &str) -> bool {
    const RESERVED: &[&str] = &[
        "CON", "PRN", "AUX", "NUL", "COM1", "COM2", "COM3", "COM4", "COM5", "COM6", "COM7", "COM8",
        "COM9", "LPT1", "LPT2", "LPT3", "LPT4", "LPT5", "LPT6", "LPT7", "LPT8", "LPT9",
    ];
    let stem = name.split('.').next().unwrap_or(name);
    RESERVED.iter().any(|r| r.eq_ignore_ascii_case(stem))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_names_pass_through() {
        assert_eq!(safe_file_name("deck_explained.docx"), "deck_explained.docx");
        assert_eq!(safe_file_name("讲义.docx"), "讲义.docx");
    }

    #[test]
    fn separators_and_traversal_are_neutralised() {
        assert_eq!(safe_file_name("../../etc/passwd"), "etc_passwd");
        assert_eq!(safe_file_name("a\\b:c.docx"), "a_b_c.docx");
        assert_eq!(safe_file_name(".."), "download");
    }

    #[test]
    fn reserved_device_names_get_suffix() {
        assert_eq!(safe_file_name("con.docx"), "_con.docx");
        assert_eq!(safe_file_name("LPT1"), "_LPT1");
    }

    #[test]
    fn long_names_are_truncated_on_char_boundaries() {
        let long = "é".repeat(200);
        assert_eq!(safe_file_name(&long).chars().count(), 120);
    }
}
