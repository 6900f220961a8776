//! Behavior of the action routes, written against small store traits so it
//! can run on PostgreSQL in production and on in-memory stores in tests.

pub mod account;
pub mod catalog;
pub mod comment;
pub mod favorite;
pub mod rating;

#[cfg(test)]
pub(crate) mod mock;

use crate::forms::FormRejection;
use crate::helpers::{JsonResponse, StorageError};
use crate::middleware::authorization::DenyReason;
use actix_web::{http::StatusCode, HttpResponse, ResponseError};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(String),
    #[error("password hashing failed: {0}")]
    Hashing(String),
    #[error("file storage error: {0}")]
    Storage(String),
}

impl From<StorageError> for StoreError {
    fn from(err: StorageError) -> Self {
        StoreError::Storage(err.to_string())
    }
}

impl From<String> for StoreError {
    fn from(err: String) -> Self {
        StoreError::Database(err)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("{0}")]
    Invalid(FormRejection),
    /// The referenced entity does not exist. Actions answer this with a 400.
    #[error("{0}")]
    NotFound(String),
    #[error(transparent)]
    Denied(#[from] DenyReason),
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<FormRejection> for ServiceError {
    fn from(rejection: FormRejection) -> Self {
        ServiceError::Invalid(rejection)
    }
}

impl ResponseError for ServiceError {
    fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::Invalid(_) | ServiceError::NotFound(_) => StatusCode::BAD_REQUEST,
            ServiceError::Denied(reason) => reason.status_code(),
            ServiceError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            ServiceError::Invalid(rejection) => JsonResponse::<()>::build()
                .set_rejection(rejection.clone())
                .to_http_response(self.status_code(), rejection.to_string()),
            ServiceError::Store(err) => {
                tracing::error!("Store failure: {}", err);
                JsonResponse::<()>::build().to_http_response(self.status_code(), "Internal error")
            }
            _ => JsonResponse::<()>::build().to_http_response(self.status_code(), self.to_string()),
        }
    }
}
