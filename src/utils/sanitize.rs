//! Utilities for sanitizing error messages and log fields.
//!
//! Status strings and progress lines carry fragments of provider errors and
//! user-supplied addresses; both are cleaned of control characters and cut
//! to a fixed number of characters (never bytes, addresses are mostly
//! Cyrillic).

/// Removes control characters, folding line breaks and tabs into spaces.
///
/// Non-ASCII text is kept as is.
pub fn sanitize_error_message(message: &str) -> String {
    message
        .chars()
        .filter_map(|c| match c {
            '\n' | '\r' | '\t' => Some(' '),
            c if c.is_control() => None,
            c => Some(c),
        })
        .collect()
}

/// Truncates to at most `max_chars` characters.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((byte_idx, _)) => text[..byte_idx].to_string(),
        None => text.to_string(),
    }
}

/// Sanitizes and truncates an error message to `MAX_ERROR_DETAIL_CHARS`.
pub fn sanitize_and_truncate_error_message(message: &str) -> String {
    truncate_chars(
        &sanitize_error_message(message),
        crate::config::MAX_ERROR_DETAIL_CHARS,
    )
}
