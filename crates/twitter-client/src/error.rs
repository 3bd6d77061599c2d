//! Error taxonomy for Twitter API operations
//!
//! Every failure surfaced by the client is a [`TwitterError`]. Transport
//! failures are classified from the HTTP status before they leave the
//! transport, so callers can branch on [`TwitterError::kind`] (for example to
//! tell "already following" apart from a network failure).

use crate::json::JsonError;
use thiserror::Error;

/// Phrase the server puts in the body of a rate-limited response
pub const RATE_LIMIT_PHRASE: &str = "Rate limit exceeded";

/// Boxed lower-level cause carried by [`TwitterError::Api`]
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Result type for Twitter operations
pub type Result<T> = std::result::Result<T, TwitterError>;

/// Closed set of client-facing error kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Any 5xx status; transient, retry later
    ServerError,
    /// 403: rejected by policy, which may mean "already in that state"
    Forbidden,
    /// 404: resource absent or subject suspended
    NotFound,
    /// Rate limit phrase found in an otherwise unclassified error body
    RateLimited,
    /// Any other non-2xx status or transport-level failure
    Api,
    /// Response body could not be read as the expected JSON
    Json,
    /// Caller-side precondition violated before any network call
    Validation,
}

/// Errors that can occur during Twitter operations
#[derive(Debug, Error)]
pub enum TwitterError {
    /// Server-side failure (500-599)
    #[error("Server error ({status}): {message}")]
    ServerError {
        /// HTTP status code
        status: u16,
        /// Response body and request URI
        message: String,
    },

    /// Request rejected by policy (403)
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Resource absent or user suspended (404)
    #[error("Not found: {0}")]
    NotFound(String),

    /// Too many requests for the current window
    #[error("Rate limit exceeded: {0}")]
    RateLimited(String),

    /// Unclassified API or transport failure
    #[error("API error: {message}")]
    Api {
        /// HTTP status code, if a response was received at all
        status: Option<u16>,
        /// Error message
        message: String,
        /// Underlying cause
        #[source]
        source: Option<BoxError>,
    },

    /// JSON parsing error
    #[error("JSON error: {0}")]
    Json(#[from] JsonError),

    /// Invalid input
    #[error("Invalid input: {0}")]
    Validation(String),
}

impl TwitterError {
    /// Create an unclassified API error without an underlying cause
    pub fn api(status: Option<u16>, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
            source: None,
        }
    }

    /// Wrap a transport-level failure (DNS, connection reset, timeout)
    pub fn transport(message: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self::Api {
            status: None,
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Get the kind of this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::ServerError { .. } => ErrorKind::ServerError,
            Self::Forbidden(_) => ErrorKind::Forbidden,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::RateLimited(_) => ErrorKind::RateLimited,
            Self::Api { .. } => ErrorKind::Api,
            Self::Json(_) => ErrorKind::Json,
            Self::Validation(_) => ErrorKind::Validation,
        }
    }

    /// HTTP status that produced this error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::ServerError { status, .. } => Some(*status),
            Self::Forbidden(_) => Some(403),
            Self::NotFound(_) => Some(404),
            Self::Api { status, .. } => *status,
            Self::RateLimited(_) | Self::Json(_) | Self::Validation(_) => None,
        }
    }

    /// Whether the caller may reasonably try again later
    ///
    /// The client never retries on its own.
    pub fn is_recoverable(&self) -> bool {
        matches!(self.kind(), ErrorKind::ServerError | ErrorKind::RateLimited)
    }
}

/// Classify a non-2xx response
///
/// `uri` is appended to the message so the failing endpoint shows up in logs.
pub fn classify_status(status: u16, body: &str, uri: &str) -> TwitterError {
    let message = format!("{} {}", body.trim(), uri);
    match status {
        500..=599 => TwitterError::ServerError { status, message },
        403 => TwitterError::Forbidden(message),
        404 => TwitterError::NotFound(message),
        _ if body.contains(RATE_LIMIT_PHRASE) => TwitterError::RateLimited(body.trim().to_string()),
        _ => TwitterError::api(Some(status), message),
    }
}
