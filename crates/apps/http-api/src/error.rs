use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use todo_feature::TodoFeatureError;
use tracing::error;
use user_feature::UserFeatureError;

use crate::types::ErrorBody;

/// Every failure a handler can report. Rendered as `{"error": "..."}`.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    MalformedBody(String),

    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    NotFound(String),

    /// Cause is logged, never sent to the client
    #[error("internal server error")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MalformedBody(_) | ApiError::Validation(_) | ApiError::Conflict(_) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn unauthenticated() -> Self {
        ApiError::Unauthorized(UserFeatureError::Unauthenticated.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Internal(cause) = &self {
            error!(error = %cause, "Request failed");
        }

        let body = ErrorBody {
            error: self.to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}

impl From<UserFeatureError> for ApiError {
    fn from(err: UserFeatureError) -> Self {
        match err {
            UserFeatureError::Validation(msg) => ApiError::Validation(msg),
            UserFeatureError::UsernameTaken(_) => ApiError::Conflict(err.to_string()),
            UserFeatureError::InvalidCredentials | UserFeatureError::Unauthenticated => {
                ApiError::Unauthorized(err.to_string())
            }
            UserFeatureError::NotFound(_) => ApiError::NotFound(err.to_string()),
            UserFeatureError::Domain(_)
            | UserFeatureError::Hashing(_)
            | UserFeatureError::SessionLifetime
            | UserFeatureError::Token(_) => ApiError::Internal(err.to_string()),
        }
    }
}

impl From<TodoFeatureError> for ApiError {
    fn from(err: TodoFeatureError) -> Self {
        match err {
            TodoFeatureError::Validation(msg) => ApiError::Validation(msg),
            TodoFeatureError::NotFound(_) => ApiError::NotFound(err.to_string()),
            TodoFeatureError::Domain(_) | TodoFeatureError::Storage(_) => {
                ApiError::Internal(err.to_string())
            }
        }
    }
}
