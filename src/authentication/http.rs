use axum::{extract::State, routing::post, Json, Router};
use axum_extra::extract::{
    cookie::{Cookie, SameSite},
    PrivateCookieJar,
};
use cookie::CookieBuilder;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    extract::JsonBody,
    http_err::{ApiError, ApiResponse},
    identities::{http::reps::User, services::UserService},
    server::AppState,
};

use super::{domain::session::SESSION_COOKIE, DynTokenService};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/users/login", post(login))
        .route("/user/logout", post(logout))
}

#[derive(Deserialize)]
struct EmailPasswordPair {
    email: String,
    password: String,
}

#[derive(Serialize)]
struct LoginResponse {
    status: &'static str,
    token: String,
    user: User,
}

#[derive(Serialize)]
struct LogoutResponse {
    status: &'static str,
}

/// Only sent over HTTPS, and withheld from cross-site subrequests.
fn session_cookie_builder(value: String) -> CookieBuilder<'static> {
    Cookie::build(SESSION_COOKIE, value)
        .path("/")
        .http_only(true)
        .secure(true)
        .same_site(SameSite::Lax)
}

fn session_cookie(value: String, lifetime: chrono::Duration) -> Cookie<'static> {
    session_cookie_builder(value)
        .max_age(cookie::time::Duration::seconds(lifetime.num_seconds()))
        .finish()
}

async fn login(
    State(user_service): State<UserService>,
    State(tokens): State<DynTokenService>,
    cookies: PrivateCookieJar,
    JsonBody(credentials): JsonBody<EmailPasswordPair>,
) -> ApiResponse<(PrivateCookieJar, Json<LoginResponse>)> {
    let user = match user_service
        .authenticate(&credentials.email, &credentials.password)
        .await?
    {
        Some(user) => user,
        None => {
            return Err(ApiError::Unauthorized(
                "Invalid email or password.".to_owned(),
            ))
        }
    };

    let token = tokens.issue(user.id)?;
    let cookies = cookies.add(session_cookie(token.clone(), tokens.lifetime()));

    debug!(user_id = %user.id, "Created session.");

    Ok((
        cookies,
        Json(LoginResponse {
            status: "login successful",
            token,
            user: User::returning(&user),
        }),
    ))
}

/// Expire the session cookie. Requests without a session are accepted.
async fn logout(cookies: PrivateCookieJar) -> (PrivateCookieJar, Json<LogoutResponse>) {
    let expired = session_cookie_builder(String::new())
        .max_age(cookie::time::Duration::ZERO)
        .expires(cookie::time::OffsetDateTime::UNIX_EPOCH)
        .finish();

    (
        cookies.add(expired),
        Json(LogoutResponse {
            status: "logged out",
        }),
    )
}
