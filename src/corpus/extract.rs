// Text extraction: raw upload bytes to an ordered list of paragraphs.
//
// Only plain text is handled. Paragraphs are separated by a blank line;
// Windows line endings are normalised first so "\r\n\r\n" splits too.

use std::path::Path;

use crate::error::CheckError;

/// File extensions the extractor accepts (lowercase, without the dot).
pub const SUPPORTED_EXTENSIONS: &[&str] = &["txt"];

/// Lowercased extension of a file name, without the dot ("" when absent).
pub fn extension_of(filename: &str) -> String {
    Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default()
}

pub fn is_supported(filename: &str) -> bool {
    SUPPORTED_EXTENSIONS.contains(&extension_of(filename).as_str())
}

/// Reject file types the extractor can't read.
pub fn check_extension(filename: &str) -> Result<(), CheckError> {
    if is_supported(filename) {
        Ok(())
    } else {
        Err(CheckError::UnsupportedFormat {
            extension: extension_of(filename),
        })
    }
}

/// Split in-memory text into trimmed, non-empty paragraphs.
pub fn extract_str(text: &str) -> Vec<String> {
    text.replace("\r\n", "\n")
        .split("\n\n")
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect()
}

/// Extract paragraphs from an uploaded file's bytes.
///
/// Invalid UTF-8 is replaced rather than rejected. A supported file with no
/// visible text is `EmptyDocument`.
pub fn extract_bytes(filename: &str, contents: &[u8]) -> Result<Vec<String>, CheckError> {
    check_extension(filename)?;
    let text = String::from_utf8_lossy(contents);
    let paragraphs = extract_str(&text);
    if paragraphs.is_empty() {
        return Err(CheckError::EmptyDocument);
    }
    Ok(paragraphs)
}

/// Reduce an arbitrary client-supplied name to a safe, flat file name.
///
/// Directory components are discarded, whitespace becomes `_`, anything
/// outside `[A-Za-z0-9._-]` is dropped and leading dots/underscores are
/// stripped. Returns `None` when nothing usable is left.
pub fn sanitize_filename(name: &str) -> Option<String> {
    let base = name.rsplit(['/', '\\']).next().unwrap_or(name);
    let cleaned: String = base
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'))
        .collect();
    let cleaned = cleaned.trim_start_matches(['.', '_']).to_string();
    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned)
    }
}
