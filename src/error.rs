use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::repository::RepositoryError;

/// Failures surfaced by the services and turned into HTTP responses.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{0}")]
    Validation(String),

    #[error("{resource} {id} not found")]
    NotFound { resource: &'static str, id: i64 },

    #[error("{0}")]
    InvalidReference(String),

    #[error("{0}")]
    Conflict(String),

    #[error("store failure: {0}")]
    Repository(RepositoryError),
}

impl Error {
    pub fn missing_field(field: &str) -> Self {
        Self::Validation(format!("Missing `{field}` in request body"))
    }

    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::InvalidReference(_) => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::Repository(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<RepositoryError> for Error {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::InvalidReference(detail) => Self::InvalidReference(detail),
            RepositoryError::Conflict(detail) => Self::Conflict(detail),
            RepositoryError::InvalidText(detail) => Self::Validation(detail),
            other => Self::Repository(other),
        }
    }
}

impl From<JsonRejection> for Error {
    fn from(rejection: JsonRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

impl From<QueryRejection> for Error {
    fn from(rejection: QueryRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

impl From<PathRejection> for Error {
    fn from(rejection: PathRejection) -> Self {
        Self::Validation(rejection.body_text())
    }
}

/// JSON body of every error response.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// HTTP status code
    pub status: u16,
    /// Human readable description
    pub message: String,
}

impl ErrorResponse {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status: status.as_u16(),
            message: message.into(),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let message = if let Self::Repository(e) = &self {
            tracing::error!("request failed on store access: {e}");
            "Internal server error".to_string()
        } else {
            tracing::debug!("request rejected: {self}");
            self.to_string()
        };

        (status, Json(ErrorResponse::new(status, message))).into_response()
    }
}
