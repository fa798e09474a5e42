use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts},
};
use axum_extra::extract::{cookie::Key, PrivateCookieJar};
use tracing::debug;
use uuid::Uuid;

use crate::{
    authentication::{DynTokenService, TokenError},
    http_err::ApiError,
};

/// Name of the private cookie holding the session token.
pub const SESSION_COOKIE: &str = "session";

/// An authenticated session.
///
/// Extracting a session from a request fails with a 401 unless the request
/// carries a valid token, either as a bearer token or in the session cookie.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Session {
    id: Uuid,
    user_id: Uuid,
}

impl Session {
    pub fn new(id: Uuid, user_id: Uuid) -> Self {
        Self { id, user_id }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn user_id(&self) -> Uuid {
        self.user_id
    }

    /// Resolve the owner of a resource named in a request.
    ///
    /// A request may only name the session's own user. When no owner is
    /// named, the session's user is assumed.
    pub fn owner(&self, requested: Option<Uuid>) -> Result<Uuid, ApiError> {
        match requested {
            None => Ok(self.user_id),
            Some(user_id) if user_id == self.user_id => Ok(user_id),
            Some(user_id) => {
                debug!(session_user = %self.user_id, requested_user = %user_id, "Rejected access to another user's resources.");

                Err(ApiError::Forbidden)
            }
        }
    }
}

fn bearer_token(parts: &Parts) -> Option<Result<&str, TokenError>> {
    let header = parts.headers.get(AUTHORIZATION)?;

    Some(
        header
            .to_str()
            .ok()
            .and_then(|value| value.trim().split_once(' '))
            .filter(|(scheme, _)| scheme.eq_ignore_ascii_case("Bearer"))
            .map(|(_, token)| token.trim())
            .ok_or(TokenError::Invalid),
    )
}

#[async_trait]
impl<S> FromRequestParts<S> for Session
where
    DynTokenService: FromRef<S>,
    Key: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let tokens = DynTokenService::from_ref(state);

        let result = match bearer_token(parts) {
            Some(Ok(token)) => tokens.validate(token),
            Some(Err(error)) => Err(error),
            None => {
                let jar = PrivateCookieJar::<Key>::from_request_parts(parts, state)
                    .await
                    .map_err(|_| ApiError::InternalServerError)?;

                match jar.get(SESSION_COOKIE) {
                    Some(cookie) => tokens.validate(cookie.value()),
                    None => {
                        debug!("Request has no session token.");

                        return Err(ApiError::Unauthorized(
                            "No authentication token provided.".to_owned(),
                        ));
                    }
                }
            }
        };

        match result {
            Ok(session) => {
                debug!(user_id = %session.user_id(), session_id = %session.id(), "Authenticated request.");

                Ok(session)
            }
            Err(error) => {
                debug!(%error, "Rejected session token.");

                let message = match error {
                    TokenError::Expired => "Authentication token has expired.",
                    TokenError::Invalid => "Invalid authentication token.",
                };

                Err(ApiError::Unauthorized(message.to_owned()))
            }
        }
    }
}
