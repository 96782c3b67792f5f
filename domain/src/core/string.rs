//! String utilities for the domain layer.

/// Truncate a string to at most `max_len` bytes, ending in `...` when cut (UTF-8 safe).
///
/// The returned string never exceeds `max_len` bytes, ellipsis included.
pub fn truncate(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        return s.to_string();
    }
    if max_len < 3 {
        return truncate_str(s, max_len).to_string();
    }
    format!("{}...", truncate_str(s, max_len - 3))
}

/// Cut a string to at most `max_bytes` without splitting a UTF-8 character.
///
/// Returns a sub-slice; short strings come back unchanged.
pub fn truncate_str(s: &str, max_bytes: usize) -> &str {
    if s.len() <= max_bytes {
        return s;
    }
    let mut end = max_bytes;
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}
