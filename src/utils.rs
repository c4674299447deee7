use std::fs;
use std::path::Path;

/// Wrap `text` in an OSC8 terminal hyperlink to `url`
pub fn osc8_link(url: &str, text: &str) -> String {
    format!("\x1b]8;;{}\x1b\\{}\x1b]8;;\x1b\\", url, text)
}

/// OSC8 file:// hyperlink, so report paths are clickable
pub fn osc8_file_link(path: &Path) -> String {
    let abs_path = fs::canonicalize(path)
        .map(|p| p.to_string_lossy().to_string())
        .unwrap_or_else(|_| path.display().to_string());
    format!(
        "\x1b]8;;file://{}\x1b\\{}\x1b]8;;\x1b\\",
        abs_path,
        path.display()
    )
}

/// Shorten `s` to at most `max` characters for table output
pub fn ellipsize(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let kept: String = s.chars().take(max.saturating_sub(1)).collect();
    format!("{}…", kept)
}
