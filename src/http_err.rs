use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tracing::{debug, error};
use validator::ValidationErrors;

use crate::database::StorageError;

#[derive(Debug, Serialize)]
pub struct ErrorRep {
    pub message: String,
}

#[derive(Serialize)]
struct ValidationErrorRep {
    message: String,
    fields: ValidationErrors,
}

#[derive(Debug)]
pub enum ApiError {
    /// The request body or parameters were malformed.
    BadRequestReason(String),
    /// The request body failed field level validation.
    InvalidFields(ValidationErrors),
    Unauthorized(String),
    Forbidden,
    NotFound(String),
    Conflict(String),
    InternalServerError,
    /// A call to an external service failed. The message is safe to show to
    /// the client.
    Upstream(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            Self::InvalidFields(fields) => {
                return (
                    StatusCode::BAD_REQUEST,
                    Json(ValidationErrorRep {
                        message: "Invalid request body.".to_owned(),
                        fields,
                    }),
                )
                    .into_response()
            }
            Self::BadRequestReason(reason) => (StatusCode::BAD_REQUEST, reason),
            Self::Unauthorized(reason) => (StatusCode::UNAUTHORIZED, reason),
            Self::Forbidden => (
                StatusCode::FORBIDDEN,
                "You may not access another user's resources.".to_owned(),
            ),
            Self::NotFound(reason) => (StatusCode::NOT_FOUND, reason),
            Self::Conflict(reason) => (StatusCode::CONFLICT, reason),
            Self::InternalServerError => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error.".to_owned(),
            ),
            Self::Upstream(reason) => (StatusCode::INTERNAL_SERVER_ERROR, reason),
        };

        (status, Json(ErrorRep { message })).into_response()
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        debug!(?errors, "Request failed validation.");

        Self::InvalidFields(errors)
    }
}

impl From<StorageError> for ApiError {
    fn from(error: StorageError) -> Self {
        match error {
            StorageError::Conflict(constraint) => {
                debug!(%constraint, "Write rejected by unique constraint.");

                Self::Conflict("A resource with the same identifier already exists.".to_owned())
            }
            StorageError::MissingReference(constraint) => {
                debug!(%constraint, "Write references a missing row.");

                Self::NotFound("A referenced resource does not exist.".to_owned())
            }
            error => {
                error!(?error, "Database call failed.");

                Self::InternalServerError
            }
        }
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(error: anyhow::Error) -> Self {
        error!(?error, "Received error.");

        Self::InternalServerError
    }
}

pub type ApiResponse<T> = Result<T, ApiError>;
