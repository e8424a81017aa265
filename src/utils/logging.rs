//! Logging utilities
//!
//! Shared helpers for logging upstream traffic without flooding the output

/// Set to true to log complete upstream response bodies at debug level
/// Default is false to reduce log verbosity
pub const VERBOSE_BODY_LOGGING: bool = false;

/// Maximum number of characters of a body kept in a log line
pub const MAX_LOGGED_BODY_CHARS: usize = 500;

/// Truncate a string with a note about original length
pub fn truncate_content(s: &str, max_len: usize) -> String {
    match s.char_indices().nth(max_len) {
        Some((cut, _)) => {
            let total = s.chars().count();
            format!("{}... ({} chars truncated)", &s[..cut], total - max_len)
        }
        None => s.to_string(),
    }
}

/// Create a printable summary of an HTTP body for logging
///
/// JSON bodies are re-rendered compactly, anything else is logged as lossy UTF-8.
pub fn summarize_body(body: &[u8]) -> String {
    if body.is_empty() {
        return "<empty>".to_string();
    }

    let rendered = match serde_json::from_slice::<serde_json::Value>(body) {
        Ok(value) => value.to_string(),
        Err(_) => String::from_utf8_lossy(body).into_owned(),
    };

    if VERBOSE_BODY_LOGGING {
        rendered
    } else {
        truncate_content(&rendered, MAX_LOGGED_BODY_CHARS)
    }
}
