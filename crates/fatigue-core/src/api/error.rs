//! Structured errors for prediction API calls.

use std::fmt;

use serde_json::Value;

use super::types::SessionId;

/// Categories of API errors for consistent handling in the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiErrorKind {
    /// Request never produced a response (connect, DNS, reset, client timeout)
    Network,
    /// Non-2xx HTTP status
    HttpStatus,
    /// Response body was not the expected JSON
    Parse,
    /// Poll attempts exhausted before the result was processed
    Timeout,
    /// Work was abandoned because its session was superseded
    Cancelled,
    /// Poll response belonged to a different session
    SessionMismatch,
}

impl fmt::Display for ApiErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiErrorKind::Network => write!(f, "network"),
            ApiErrorKind::HttpStatus => write!(f, "http_status"),
            ApiErrorKind::Parse => write!(f, "parse"),
            ApiErrorKind::Timeout => write!(f, "timeout"),
            ApiErrorKind::Cancelled => write!(f, "cancelled"),
            ApiErrorKind::SessionMismatch => write!(f, "session_mismatch"),
        }
    }
}

/// Error from an API call, with a one-line message suitable for display.
#[derive(Debug, Clone)]
pub struct ApiError {
    /// Error category
    pub kind: ApiErrorKind,
    /// Human-readable summary
    pub message: String,
    /// HTTP status, when the server answered
    pub status: Option<u16>,
    /// Raw body or underlying cause, for logs
    pub details: Option<String>,
}

impl ApiError {
    pub fn new(kind: ApiErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            status: None,
            details: None,
        }
    }

    /// Creates a network error from a failed request.
    pub fn network(err: &reqwest::Error) -> Self {
        Self {
            kind: ApiErrorKind::Network,
            message: format!("Network error: {err}"),
            status: None,
            details: Some(format!("{err:?}")),
        }
    }

    /// Creates an HTTP status error.
    ///
    /// Uses the server's `detail` field as the message when the body carries
    /// one, otherwise falls back to `HTTP <status>`.
    pub fn http_status(status: u16, body: &str) -> Self {
        let message = server_detail(body).unwrap_or_else(|| format!("HTTP {status}"));
        Self {
            kind: ApiErrorKind::HttpStatus,
            message,
            status: Some(status),
            details: (!body.is_empty()).then(|| body.to_string()),
        }
    }

    pub fn parse(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Parse, message)
    }

    pub fn timeout(message: impl Into<String>) -> Self {
        Self::new(ApiErrorKind::Timeout, message)
    }

    pub fn cancelled() -> Self {
        Self::new(ApiErrorKind::Cancelled, "Cancelled")
    }

    pub fn session_mismatch(expected: SessionId, actual: SessionId) -> Self {
        Self::new(
            ApiErrorKind::SessionMismatch,
            format!("Received result for session #{actual} while waiting for #{expected}"),
        )
    }

    pub fn is_cancelled(&self) -> bool {
        self.kind == ApiErrorKind::Cancelled
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ApiError {}

/// Result type for API operations.
pub type ApiResult<T> = std::result::Result<T, ApiError>;

/// Extracts `detail` from an error body.
///
/// Validation failures carry a list of `{msg, ..}` objects instead of a
/// string; their messages are joined.
fn server_detail(body: &str) -> Option<String> {
    let json: Value = serde_json::from_str(body).ok()?;
    match json.get("detail")? {
        Value::String(detail) if !detail.trim().is_empty() => Some(detail.clone()),
        Value::Array(items) => {
            let messages: Vec<&str> = items
                .iter()
                .filter_map(|item| item.get("msg").and_then(Value::as_str))
                .collect();
            (!messages.is_empty()).then(|| messages.join("; "))
        }
        _ => None,
    }
}
