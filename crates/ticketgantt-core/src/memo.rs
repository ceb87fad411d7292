//! Memo extraction from ticket descriptions

/// First line whose trimmed text starts with `//`, marker removed
///
/// Returns an empty string when the description has no such line.
pub fn extract_memo(description: &str) -> String {
    description
        .lines()
        .map(str::trim)
        .find_map(|line| line.strip_prefix("//"))
        .map(|memo| memo.trim().to_string())
        .unwrap_or_default()
}
