//! Path utilities: cache filename sanitization, expand ~, etc.

use std::path::PathBuf;

/// Map an opaque storage key to a single safe filename component.
/// Separators and anything outside `[A-Za-z0-9._-]` become `_`, and leading
/// dots are stripped so a key can never climb out of the cache directory.
pub fn sanitize_key(key: &str) -> String {
    let mapped: String = key
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let trimmed = mapped.trim_start_matches('.');
    if trimmed.is_empty() {
        "_".to_string()
    } else {
        trimmed.to_string()
    }
}

pub fn expand_tilde(path: &str) -> PathBuf {
    if path.starts_with("~/")
        && let Some(home) = dirs::home_dir()
    {
        return home.join(path.trim_start_matches("~/"));
    }
    PathBuf::from(path)
}
