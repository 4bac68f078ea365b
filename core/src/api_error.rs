use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use crate::Response;

// Both patterns are anchored over the whole body: leading/trailing
// whitespace aside, the body must be a JSON object carrying the field.
static ERROR_CODE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?s)\A\s*\{.*"ErrorCode"\s*:\s*"([a-zA-Z0-9_]+)".*\}\s*\z"#)
        .expect("valid error code pattern")
});

// The message value is a JSON string: standard escapes are accepted and the
// capture is kept raw, still escaped.
static ERROR_MESSAGE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?s)\A\s*\{.*"ErrorMessage"\s*:\s*"((?:\\(?:["/\\bfnrt]|u[0-9a-f]{4})|[^"\\])*)".*\}\s*\z"#)
        .expect("valid error message pattern")
});

/// A structured error returned by the admin API.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("admin api error {code}: {message}")]
pub struct ApiError {
    /// Error code identifier, e.g. `UserNotExists`.
    pub code: String,
    /// Human-readable message, kept exactly as captured (JSON escapes are
    /// not unescaped).
    pub message: String,
}

/// Detect and extract a structured API error from a failed response.
///
/// Runs only when the status code is outside `[200, 300)` and a body is
/// present. Both the `ErrorCode` and the `ErrorMessage` pattern must match
/// the whole body for translation to occur.
///
/// This is deliberately fail-open: a malformed or unexpected error body
/// yields `None` so the raw HTTP failure surfaces to the caller instead of
/// being masked by a secondary parse error.
pub fn translate(response: &Response) -> Option<ApiError> {
    if response.status.is_success() {
        return None;
    }

    let body = response.body.as_ref()?;
    let text = String::from_utf8_lossy(body);

    let code = ERROR_CODE.captures(&text)?;
    let message = ERROR_MESSAGE.captures(&text)?;

    Some(ApiError {
        code: code[1].to_string(),
        message: message[1].to_string(),
    })
}
