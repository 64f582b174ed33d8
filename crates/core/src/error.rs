//! Unified error types for ustawka.
//!
//! The display strings carry a stable `CODE:` prefix so failures stay
//! recognisable in logs and in tool responses.

use rmcp::model::{ErrorCode, ErrorData as McpError};
use tokio_rusqlite::rusqlite;

/// Unified error type for the act cache and its collaborators.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Invalid input parameters (e.g., malformed act identifier).
    #[error("INVALID_INPUT: {0}")]
    InvalidInput(String),

    /// Upstream registry answered with a non-success status or the transport failed.
    #[error("UPSTREAM_ERROR: {0}")]
    Upstream(String),

    /// Upstream payload could not be parsed into the expected shape.
    #[error("DECODE_ERROR: {0}")]
    Decode(String),

    /// The bounded upstream call did not finish in time.
    #[error("DEADLINE_EXCEEDED: {0}")]
    DeadlineExceeded(String),

    /// A structured column could not be encoded or decoded.
    #[error("SERIALIZATION_ERROR: {field}: {reason}")]
    Serialization { field: &'static str, reason: String },

    /// Nothing could be resolved from either the cache or the origin.
    #[error("NO_DATA: {0}")]
    NoData(String),

    /// Database operation failed.
    #[error("CACHE_ERROR: {0}")]
    Database(tokio_rusqlite::Error),

    /// Migration failed to apply.
    #[error("CACHE_ERROR: migration failed: {0}")]
    MigrationFailed(String),

    /// Another error with the operation that failed prepended.
    #[error("{context}: {source}")]
    Context {
        context: String,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Wrap this error with a short description of the failed operation.
    pub fn context(self, context: impl Into<String>) -> Self {
        Error::Context { context: context.into(), source: Box::new(self) }
    }

    /// The innermost error, skipping any context layers.
    pub fn root(&self) -> &Error {
        match self {
            Error::Context { source, .. } => source.root(),
            other => other,
        }
    }

    /// True when the root cause is an elapsed upstream deadline.
    pub fn is_deadline(&self) -> bool {
        matches!(self.root(), Error::DeadlineExceeded(_))
    }
}

impl From<tokio_rusqlite::Error<Error>> for Error {
    fn from(err: tokio_rusqlite::Error<Error>) -> Self {
        match err {
            tokio_rusqlite::Error::Error(e) => e,
            tokio_rusqlite::Error::ConnectionClosed => Error::Database(tokio_rusqlite::Error::ConnectionClosed),
            tokio_rusqlite::Error::Close(c) => Error::Database(tokio_rusqlite::Error::Close(c)),
            _ => Error::Database(tokio_rusqlite::Error::ConnectionClosed),
        }
    }
}

impl From<tokio_rusqlite::Error<rusqlite::Error>> for Error {
    fn from(err: tokio_rusqlite::Error<rusqlite::Error>) -> Self {
        Error::Database(err)
    }
}

impl From<rusqlite::Error> for Error {
    fn from(err: rusqlite::Error) -> Self {
        Error::Database(tokio_rusqlite::Error::Error(err))
    }
}

impl From<Error> for McpError {
    fn from(err: Error) -> Self {
        let code = match err.root() {
            Error::InvalidInput(_) => -32602,
            Error::Decode(_) | Error::Serialization { .. } => -32000,
            Error::NoData(_) => -32001,
            Error::Database(_) | Error::MigrationFailed(_) => -32002,
            Error::DeadlineExceeded(_) => -32006,
            Error::Upstream(_) => -32008,
            Error::Context { .. } => -32603,
        };

        McpError { code: ErrorCode(code), message: err.to_string().into(), data: None }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::NoData("no data available for year 2024".to_string());
        assert!(err.to_string().contains("NO_DATA"));
        assert!(err.to_string().contains("2024"));
    }

    #[test]
    fn test_serialization_names_field() {
        let err = Error::Serialization { field: "keywords", reason: "expected value".into() };
        assert_eq!(err.to_string(), "SERIALIZATION_ERROR: keywords: expected value");
    }

    #[test]
    fn test_context_chain() {
        let err = Error::DeadlineExceeded("5s".into()).context("failed to fetch acts");
        assert!(err.to_string().starts_with("failed to fetch acts: DEADLINE_EXCEEDED"));
        assert!(err.is_deadline());
        assert!(matches!(err.root(), Error::DeadlineExceeded(_)));
    }

    #[test]
    fn test_error_to_mcp_error() {
        let err = Error::NoData("nothing".to_string());
        let mcp_err: McpError = err.into();
        assert_eq!(mcp_err.code.0, -32001);

        let wrapped = Error::Upstream("status 500".into()).context("failed to fetch act details");
        let mcp_err: McpError = wrapped.into();
        assert_eq!(mcp_err.code.0, -32008);
        assert!(mcp_err.message.contains("failed to fetch act details"));
    }
}
