// Output formatting for the terminal. JSON output is plain serde_json.

pub mod terminal;

/// Truncate a string to at most `max_chars` characters, appending "..." if truncated.
///
/// Unlike byte slicing (`&text[..120]`), this respects UTF-8 character boundaries
/// and will never panic on multi-byte characters. Newlines are flattened so a
/// preview always stays on one line.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    let flat = text.replace('\n', " ");
    let char_count = flat.chars().count();
    if char_count <= max_chars {
        flat
    } else {
        let truncated: String = flat.chars().take(max_chars).collect();
        format!("{truncated}...")
    }
}

/// Human-readable byte size.
pub fn format_bytes(bytes: u64) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else if bytes < 1024 * 1024 {
        format!("{:.1} KB", bytes as f64 / 1024.0)
    } else {
        format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
    }
}
