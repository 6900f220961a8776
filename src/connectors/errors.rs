use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use crate::helpers::JsonResponse;
use std::fmt;

/// Errors that can occur while talking to an external service
#[derive(Debug)]
pub enum ConnectorError {
    /// HTTP request/response error
    HttpError(String),
    /// Service unreachable or timeout
    ServiceUnavailable(String),
    /// The service answered, but refused the request
    Rejected(String),
    /// Invalid response format from external service
    InvalidResponse(String),
}

impl fmt::Display for ConnectorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::HttpError(msg) => write!(f, "HTTP error: {}", msg),
            Self::ServiceUnavailable(msg) => write!(f, "Service unavailable: {}", msg),
            Self::Rejected(msg) => write!(f, "Rejected: {}", msg),
            Self::InvalidResponse(msg) => write!(f, "Invalid response: {}", msg),
        }
    }
}

impl std::error::Error for ConnectorError {}

impl ResponseError for ConnectorError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::HttpError(_) | Self::Rejected(_) | Self::InvalidResponse(_) => {
                StatusCode::BAD_GATEWAY
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        tracing::error!("External service failure: {}", self);
        let message = match self {
            Self::ServiceUnavailable(_) => "Service unavailable",
            _ => "External service error",
        };

        JsonResponse::<()>::build().to_http_response(self.status_code(), message)
    }
}

impl From<reqwest::Error> for ConnectorError {
    fn from(err: reqwest::Error) -> Self {
        // request urls may carry credentials (bot tokens)
        let err = err.without_url();
        if err.is_timeout() {
            Self::ServiceUnavailable(format!("Request timeout: {}", err))
        } else if err.is_connect() {
            Self::ServiceUnavailable(format!("Connection failed: {}", err))
        } else if err.is_decode() {
            Self::InvalidResponse(err.to_string())
        } else if let Some(status) = err.status() {
            Self::Rejected(format!("{}: {}", status, err))
        } else {
            Self::HttpError(err.to_string())
        }
    }
}
