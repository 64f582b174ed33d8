//! Registry client error types.

use std::sync::Arc;

use ustawka_core::Error;

/// Errors from the Sejm ELI API client.
#[derive(Debug, thiserror::Error)]
pub enum SejmError {
    /// Base URL cannot carry path segments.
    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),

    /// HTTP error response.
    #[error("HTTP error: {status}")]
    HttpError { status: u16 },

    /// Request timeout.
    #[error("request timeout")]
    Timeout,

    /// Network error.
    #[error("network error: {0}")]
    Network(Arc<reqwest::Error>),

    /// Response parse error.
    #[error("parse error: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for SejmError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() { SejmError::Timeout } else { SejmError::Network(Arc::new(err)) }
    }
}

impl From<SejmError> for Error {
    fn from(err: SejmError) -> Self {
        match err {
            SejmError::Timeout => Error::DeadlineExceeded(err.to_string()),
            SejmError::Parse(_) => Error::Decode(err.to_string()),
            SejmError::InvalidBaseUrl(_) | SejmError::HttpError { .. } | SejmError::Network(_) => {
                Error::Upstream(err.to_string())
            }
        }
    }
}
