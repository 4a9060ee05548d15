//! Cleanup of error text before it is recorded in bulk results or history.

/// Removes control characters (except newline, tab and carriage return).
pub fn sanitize_error_message(message: &str) -> String {
    message
        .chars()
        .filter(|c| !c.is_control() || matches!(c, '\n' | '\t' | '\r'))
        .collect()
}

/// Sanitizes and truncates a message to `crate::config::MAX_ERROR_MESSAGE_LENGTH` chars.
pub fn sanitize_and_truncate_error_message(message: &str) -> String {
    let sanitized = sanitize_error_message(message);
    let length = sanitized.chars().count();

    if length > crate::config::MAX_ERROR_MESSAGE_LENGTH {
        // Leave room for the truncation note
        let keep = crate::config::MAX_ERROR_MESSAGE_LENGTH.saturating_sub(50);
        let truncated: String = sanitized.chars().take(keep).collect();
        format!("{}... (truncated, original length: {} chars)", truncated, length)
    } else {
        sanitized
    }
}
