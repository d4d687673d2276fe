//! Client error types.

use std::path::PathBuf;

use thiserror::Error;

/// Client error type.
#[derive(Debug, Error)]
pub enum Error {
    /// The request never produced a response: connection refused, timeout,
    /// reset, or an interrupted body.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing failed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// JSON serialization/deserialization failed.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Server answered with a non-2xx status or a non-zero envelope code.
    #[error("API error (code {code}, HTTP {status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Envelope `code` reported by the server.
        code: i64,
        /// Error message from server.
        message: String,
    },

    /// Request rejected locally before it was sent.
    #[error("invalid request (code {code}): {message}")]
    Validation {
        /// Envelope code the server would have used for this failure.
        code: i64,
        /// What was wrong with the request.
        message: String,
    },

    /// Invalid configuration.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Stream error.
    #[error("Stream error: {0}")]
    Stream(String),

    /// Reading an upload from disk failed.
    #[error("failed to read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Coarse classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Network-level failure; no server answer was decoded.
    Transport,
    /// The server (or local validation) rejected the request.
    Api,
    /// A response arrived but could not be decoded.
    Decode,
    /// The client was misconfigured.
    Config,
    /// Local file access failed.
    Io,
}

impl Error {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Transport(e) if e.is_decode() => ErrorKind::Decode,
            Error::Transport(_) => ErrorKind::Transport,
            Error::Api { .. } | Error::Validation { .. } => ErrorKind::Api,
            Error::Json(_) | Error::Stream(_) => ErrorKind::Decode,
            Error::InvalidUrl(_) | Error::Config(_) => ErrorKind::Config,
            Error::Io { .. } => ErrorKind::Io,
        }
    }

    /// Envelope code carried by this error, if any.
    pub fn code(&self) -> Option<i64> {
        match self {
            Error::Api { code, .. } | Error::Validation { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// Check if this is a transport-level failure.
    pub fn is_transport(&self) -> bool {
        self.kind() == ErrorKind::Transport
    }

    /// Check if this is a not-found error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::Api { status: 404, .. })
            || self.code() == Some(RetCode::NotFound.as_i64())
    }

    /// Check if this is an authentication error.
    pub fn is_auth_error(&self) -> bool {
        match self {
            Error::Api { status, code, .. } => {
                matches!(*status, 401 | 403)
                    || matches!(
                        RetCode::from_code(*code),
                        Some(
                            RetCode::AuthenticationError
                                | RetCode::Unauthorized
                                | RetCode::Forbidden
                        )
                    )
            }
            _ => false,
        }
    }

    /// Check if the request itself was invalid.
    pub fn is_validation_error(&self) -> bool {
        match self {
            Error::Validation { .. } => true,
            Error::Api { code, .. } => matches!(
                RetCode::from_code(*code),
                Some(RetCode::ArgumentError | RetCode::DataError)
            ),
            _ => false,
        }
    }

    /// Check if this is a server error.
    pub fn is_server_error(&self) -> bool {
        matches!(self, Error::Api { status, .. } if *status >= 500)
            || self.code() == Some(RetCode::ServerError.as_i64())
    }

    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Error::Validation {
            code: RetCode::ArgumentError.as_i64(),
            message: message.into(),
        }
    }
}

/// Result type for client operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Envelope codes used by the RAGFlow server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetCode {
    Success,
    NotEffective,
    ExceptionError,
    ArgumentError,
    DataError,
    OperatingError,
    ConnectionError,
    Running,
    PermissionError,
    AuthenticationError,
    Unauthorized,
    Forbidden,
    NotFound,
    ServerError,
}

impl RetCode {
    /// Map a raw envelope code.
    pub fn from_code(code: i64) -> Option<Self> {
        Some(match code {
            0 => RetCode::Success,
            10 => RetCode::NotEffective,
            100 => RetCode::ExceptionError,
            101 => RetCode::ArgumentError,
            102 => RetCode::DataError,
            103 => RetCode::OperatingError,
            105 => RetCode::ConnectionError,
            106 => RetCode::Running,
            108 => RetCode::PermissionError,
            109 => RetCode::AuthenticationError,
            401 => RetCode::Unauthorized,
            403 => RetCode::Forbidden,
            404 => RetCode::NotFound,
            500 => RetCode::ServerError,
            _ => return None,
        })
    }

    /// Raw envelope code.
    pub fn as_i64(self) -> i64 {
        match self {
            RetCode::Success => 0,
            RetCode::NotEffective => 10,
            RetCode::ExceptionError => 100,
            RetCode::ArgumentError => 101,
            RetCode::DataError => 102,
            RetCode::OperatingError => 103,
            RetCode::ConnectionError => 105,
            RetCode::Running => 106,
            RetCode::PermissionError => 108,
            RetCode::AuthenticationError => 109,
            RetCode::Unauthorized => 401,
            RetCode::Forbidden => 403,
            RetCode::NotFound => 404,
            RetCode::ServerError => 500,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api(status: u16, code: i64) -> Error {
        Error::Api {
            status,
            code,
            message: "boom".to_string(),
        }
    }

    #[test]
    fn test_retcode_roundtrip() {
        for code in [0, 10, 100, 101, 102, 103, 105, 106, 108, 109, 401, 403, 404, 500] {
            let ret = RetCode::from_code(code).unwrap();
            assert_eq!(ret.as_i64(), code);
        }
        assert!(RetCode::from_code(42).is_none());
    }

    #[test]
    fn test_auth_errors() {
        assert!(api(200, 109).is_auth_error());
        assert!(api(401, 401).is_auth_error());
        assert!(api(403, 0).is_auth_error());
        assert!(!api(200, 102).is_auth_error());
    }

    #[test]
    fn test_validation_errors() {
        assert!(api(200, 101).is_validation_error());
        assert!(api(200, 102).is_validation_error());
        assert!(Error::validation("`question` is required.").is_validation_error());
        assert!(!api(500, 500).is_validation_error());
    }

    #[test]
    fn test_kind() {
        assert_eq!(api(200, 102).kind(), ErrorKind::Api);
        assert_eq!(Error::validation("x").kind(), ErrorKind::Api);
        assert_eq!(Error::Config("x".into()).kind(), ErrorKind::Config);
        assert_eq!(Error::Stream("x".into()).kind(), ErrorKind::Decode);
        assert!(api(500, 500).is_server_error());
        assert!(api(200, 404).is_not_found());
    }
}
