//! Error types shared across the quizmaster crates.
//!
//! `ChatError` lives in `quizmaster-core` so callers can downcast and
//! classify chat-provider failures without string matching. `LoadError` is
//! the one loader failure that escapes the fallback chain: custom files the
//! caller explicitly asked for.

use thiserror::Error;

/// Errors from loading an explicitly requested custom question file.
///
/// Declared-category loads never fail (they fall through to built-in
/// questions); custom files instead signal "not found" or "unreadable" so
/// the boundary layer can redirect.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The requested custom file does not exist.
    #[error("question file not found: {0}")]
    NotFound(String),

    /// The file exists but is not a JSON array of question records.
    #[error("malformed question file {file}: {reason}")]
    Malformed { file: String, reason: String },
}

/// Errors that can occur when talking to a chat provider.
#[derive(Debug, Error)]
pub enum ChatError {
    /// The API returned a 429 rate limit response.
    #[error("rate limited, retry after {retry_after_ms}ms")]
    RateLimited { retry_after_ms: u64 },

    /// Authentication failed (invalid API key).
    #[error("authentication failed: {0}")]
    AuthenticationFailed(String),

    /// The API returned an error response.
    #[error("API error (HTTP {status}): {message}")]
    ApiError { status: u16, message: String },

    /// The request timed out.
    #[error("request timed out after {0}s")]
    Timeout(u64),

    /// A network error occurred.
    #[error("network error: {0}")]
    NetworkError(String),
}

impl ChatError {
    /// Returns `true` if this error is permanent and retrying cannot help.
    pub fn is_permanent(&self) -> bool {
        matches!(self, ChatError::AuthenticationFailed(_))
    }
}

/// The fixed message the user sees when the chat service fails.
pub const CHAT_FAILURE_MESSAGE: &str = "Sorry, I encountered an error. Please try again.";
