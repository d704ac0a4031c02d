use axum::http::StatusCode;
use thiserror::Error;

use crate::store::StoreError;

/// Failure categories reported to API clients
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// Malformed path, unparseable parameter or malformed body
    #[error("{0}")]
    BadRequest(String),
    /// Wrong content type on a mutation
    #[error("need content-type `application/json`, but got `{0}`")]
    UnsupportedMediaType(String),
    #[error("{0}")]
    NotFound(String),
    /// Valid path, wrong method. Carries the methods the path accepts.
    #[error("method not allowed")]
    MethodNotAllowed(Vec<&'static str>),
    #[error("401 - Unauthorized")]
    Unauthorized,
    /// The detail is for the log only and never sent to the client
    #[error("internal server error")]
    Internal(String),
}

impl ApiError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        ApiError::BadRequest(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        ApiError::NotFound(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        ApiError::Internal(msg.into())
    }

    /// HTTP status for this error
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::UnsupportedMediaType(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::MethodNotAllowed(_) => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::NotFound(_) => ApiError::NotFound(e.to_string()),
        }
    }
}
