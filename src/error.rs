//! Unified error types.

use thiserror::Error;

/// Top-level error.
#[derive(Error, Debug)]
pub enum SdkError {
    #[error("HTTP error: {0}")]
    Http(#[from] HttpError),

    #[error("Fetch error: {0}")]
    Fetch(#[from] FetchError),

    #[error("Validation error: {0}")]
    Validation(String),
}

/// HTTP-layer errors.
#[derive(Error, Debug)]
pub enum HttpError {
    #[cfg(feature = "http")]
    #[error("Request failed: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("Response body could not be decoded: {0}")]
    Decode(String),

    #[error("Server error {status}: {body}")]
    ServerError { status: u16, body: String },

    #[error("Rate limited (retry after {retry_after_ms:?}ms)")]
    RateLimited { retry_after_ms: Option<u64> },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request {status}: {body}")]
    BadRequest { status: u16, body: String },

    #[error("Timeout")]
    Timeout,

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Max retries exceeded after {attempts} attempts: {last_error}")]
    MaxRetriesExceeded {
        attempts: u32,
        last_error: Box<HttpError>,
    },
}

/// Broad class of a market fetch failure. Only used for diagnostics; the
/// dashboard presents every class the same way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FetchErrorKind {
    /// Network unreachable, connection reset, timeout.
    Transport,
    /// The upstream answered with a non-success status.
    Upstream,
    /// The body was not the expected shape or lacked required fields.
    Malformed,
    /// The fetch was superseded and dropped before it resolved.
    Cancelled,
}

/// Outcome of a market fetch that did not produce entities.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FetchError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Upstream responded {status}: {body}")]
    Upstream { status: u16, body: String },

    #[error("Malformed response: {0}")]
    Malformed(String),

    #[error("Fetch cancelled")]
    Cancelled,
}

impl FetchError {
    pub fn kind(&self) -> FetchErrorKind {
        match self {
            FetchError::Transport(_) => FetchErrorKind::Transport,
            FetchError::Upstream { .. } => FetchErrorKind::Upstream,
            FetchError::Malformed(_) => FetchErrorKind::Malformed,
            FetchError::Cancelled => FetchErrorKind::Cancelled,
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, FetchError::Cancelled)
    }
}

impl From<HttpError> for FetchError {
    fn from(err: HttpError) -> Self {
        match err {
            #[cfg(feature = "http")]
            HttpError::Reqwest(e) => {
                if e.is_decode() {
                    FetchError::Malformed(e.to_string())
                } else if let Some(status) = e.status() {
                    FetchError::Upstream {
                        status: status.as_u16(),
                        body: e.to_string(),
                    }
                } else {
                    FetchError::Transport(e.to_string())
                }
            }
            HttpError::Decode(msg) => FetchError::Malformed(msg),
            HttpError::ServerError { status, body } | HttpError::BadRequest { status, body } => {
                FetchError::Upstream { status, body }
            }
            HttpError::RateLimited { .. } => FetchError::Upstream {
                status: 429,
                body: "rate limited".to_string(),
            },
            HttpError::NotFound(body) => FetchError::Upstream { status: 404, body },
            HttpError::Timeout => FetchError::Transport("request timed out".to_string()),
            HttpError::InvalidRequest(msg) => FetchError::Transport(msg),
            HttpError::MaxRetriesExceeded { last_error, .. } => FetchError::from(*last_error),
        }
    }
}
