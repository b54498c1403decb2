use crate::http::response::StatusCode;
use thiserror::Error;

/// A request failure that is answered with an HTTP error response.
///
/// Each variant maps to exactly one status code. The payload is a detail
/// string for the log, it is never sent to the client.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HttpError {
    #[error("malformed request: {0}")]
    BadRequest(String),

    #[error("access denied: {0}")]
    Forbidden(String),

    #[error("resource not found: {0}")]
    NotFound(String),

    #[error("method not allowed: {0}")]
    MethodNotAllowed(String),

    #[error("unsupported media type: {0}")]
    UnsupportedMediaType(String),

    #[error("HTTP version not supported: {0}")]
    HttpVersionNotSupported(String),
}

impl HttpError {
    pub fn status(&self) -> StatusCode {
        match self {
            HttpError::BadRequest(_) => StatusCode::BadRequest,
            HttpError::Forbidden(_) => StatusCode::Forbidden,
            HttpError::NotFound(_) => StatusCode::NotFound,
            HttpError::MethodNotAllowed(_) => StatusCode::MethodNotAllowed,
            HttpError::UnsupportedMediaType(_) => StatusCode::UnsupportedMediaType,
            HttpError::HttpVersionNotSupported(_) => StatusCode::HttpVersionNotSupported,
        }
    }

    pub fn detail(&self) -> &str {
        match self {
            HttpError::BadRequest(d)
            | HttpError::Forbidden(d)
            | HttpError::NotFound(d)
            | HttpError::MethodNotAllowed(d)
            | HttpError::UnsupportedMediaType(d)
            | HttpError::HttpVersionNotSupported(d) => d,
        }
    }
}
