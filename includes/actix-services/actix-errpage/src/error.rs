//! Error and status capability module

use actix_web::{ResponseError, http::StatusCode};
use derive_more::{Display, Error};

/// Capability of an error to report the HTTP status it stands for.
///
/// Errors that do not carry their own status return `None` and the
/// annotator falls back to `500 Internal Server Error`. Actix errors
/// report the status their `ResponseError` renders with.
pub trait HttpStatus {
    fn http_status(&self) -> Option<StatusCode>;
}

/// Structured HTTP-level error carrying its own status code.
///
/// Return it from handlers (or default services) so the real status
/// survives into the custom error page annotations.
#[derive(Debug, Display, Error)]
#[display("{status}: {message}")]
pub struct HttpError {
    status: StatusCode,
    message: String,
}

impl HttpError {
    /// Creates a new error with the given status and message
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    /// `404 Not Found` with the canonical reason as message
    pub fn not_found() -> Self {
        Self::from(StatusCode::NOT_FOUND)
    }

    #[inline]
    pub fn status(&self) -> StatusCode {
        self.status
    }

    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<StatusCode> for HttpError {
    fn from(status: StatusCode) -> Self {
        let message = status.canonical_reason().unwrap_or("Unknown Error");
        Self::new(status, message)
    }
}

impl ResponseError for HttpError {
    fn status_code(&self) -> StatusCode {
        self.status
    }
}

impl HttpStatus for HttpError {
    fn http_status(&self) -> Option<StatusCode> {
        Some(self.status)
    }
}

impl HttpStatus for actix_web::Error {
    fn http_status(&self) -> Option<StatusCode> {
        Some(self.as_response_error().status_code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_error_status() {
        let err = HttpError::new(StatusCode::SERVICE_UNAVAILABLE, "maintenance");
        assert_eq!(err.http_status(), Some(StatusCode::SERVICE_UNAVAILABLE));
        assert_eq!(err.status_code(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(err.to_string(), "503 Service Unavailable: maintenance");
    }

    #[test]
    fn test_actix_error_capability() {
        let err: actix_web::Error = HttpError::not_found().into();
        assert_eq!(err.http_status(), Some(StatusCode::NOT_FOUND));

        let err = actix_web::error::ErrorBadRequest("bad input");
        assert_eq!(err.http_status(), Some(StatusCode::BAD_REQUEST));

        let err: actix_web::Error = std::io::Error::other("disk gone").into();
        assert_eq!(err.http_status(), Some(StatusCode::INTERNAL_SERVER_ERROR));
    }
}
