use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};

use crate::{
    extract::JsonBody,
    http_err::{ApiError, ApiResponse},
    server::AppState,
};

use super::services::{RegisterError, UserService};

pub mod reps;

pub fn routes() -> Router<AppState> {
    Router::new().route("/users/register", post(register))
}

pub enum RegisterResponse {
    Created(reps::NewUserResponse),
    BadRequest(reps::NewUserValidationError),
}

impl IntoResponse for RegisterResponse {
    fn into_response(self) -> Response {
        match self {
            Self::Created(rep) => (StatusCode::CREATED, Json(rep)).into_response(),
            Self::BadRequest(error) => (StatusCode::BAD_REQUEST, Json(error)).into_response(),
        }
    }
}

async fn register(
    State(user_service): State<UserService>,
    JsonBody(new_user): JsonBody<reps::NewUserRequest>,
) -> ApiResponse<RegisterResponse> {
    match user_service.register(new_user.into()).await {
        Ok(user) => Ok(RegisterResponse::Created(reps::NewUserResponse {
            status: "user registered",
            user: reps::User::first_login(&user),
        })),
        Err(RegisterError::InvalidUser(context)) => Ok(RegisterResponse::BadRequest(context.into())),
        Err(RegisterError::DuplicateEmail) => Err(ApiError::Conflict(
            "A user with that email address already exists.".to_owned(),
        )),
        Err(RegisterError::DuplicateId) => Err(ApiError::Conflict(
            "A user with that ID already exists.".to_owned(),
        )),
        Err(RegisterError::Other(error)) => Err(error.into()),
    }
}
