use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use pageshot_core::FieldErrors;
use pageshot_engine::{CreateError, StoreError};
use serde_json::json;
use thiserror::Error;

/// Every way a request can fail, mapped to its HTTP status in one place.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("content type must be application/json")]
    UnsupportedMediaType,
    #[error("validation failed")]
    BadRequest(FieldErrors),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::UnsupportedMediaType => StatusCode::UNSUPPORTED_MEDIA_TYPE,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            ApiError::UnsupportedMediaType => "UnsupportedMediaType",
            ApiError::BadRequest(_) => "BadRequest",
            ApiError::NotFound(_) => "NotFound",
            ApiError::Internal(_) => "InternalError",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        match self {
            // Validation failures answer with the field map itself.
            ApiError::BadRequest(errors) => (status, Json(errors)).into_response(),
            other => {
                let body = json!({ "code": other.code(), "message": other.to_string() });
                (status, Json(body)).into_response()
            }
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(_) => ApiError::NotFound(err.to_string()),
            StoreError::DirectoryRead(_) | StoreError::ImagesDir(_) | StoreError::Io(_) => {
                ApiError::Internal(err.to_string())
            }
        }
    }
}

impl From<CreateError> for ApiError {
    fn from(err: CreateError) -> Self {
        match err {
            CreateError::Validation(errors) => ApiError::BadRequest(errors),
            CreateError::Capture(message) => ApiError::Internal(message),
            CreateError::Store(store) => ApiError::Internal(store.to_string()),
        }
    }
}
