use std::sync::Arc;

use chrono::{Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use super::domain::session::Session;

/// Claims carried by a session token.
#[derive(Debug, Deserialize, Serialize)]
struct TokenClaims {
    /// The user the token was issued to.
    sub: Uuid,
    /// Identifies the login that produced the token.
    sid: Uuid,
    iat: i64,
    exp: i64,
}

#[derive(Debug, Error, Eq, PartialEq)]
pub enum TokenError {
    #[error("token is malformed or has an invalid signature")]
    Invalid,

    #[error("token has expired")]
    Expired,
}

pub type DynTokenService = Arc<dyn TokenService + Send + Sync>;

/// Issues and validates the tokens that identify a session.
///
/// Tokens are self-contained. Nothing is stored server side, so a token stays
/// valid until it expires even after the user logs out.
pub trait TokenService {
    /// Issue a token for a new session belonging to `user_id`.
    fn issue(&self, user_id: Uuid) -> anyhow::Result<String>;

    fn validate(&self, token: &str) -> Result<Session, TokenError>;

    /// How long an issued token remains valid.
    fn lifetime(&self) -> Duration;
}

/// A [`TokenService`] that issues HS256 signed JWTs.
pub struct JwtTokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    lifetime: Duration,
}

impl JwtTokenService {
    pub fn new(secret: &[u8], lifetime: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            lifetime,
        }
    }
}

impl TokenService for JwtTokenService {
    fn issue(&self, user_id: Uuid) -> anyhow::Result<String> {
        let now = Utc::now();
        let claims = TokenClaims {
            sub: user_id,
            sid: Uuid::new_v4(),
            iat: now.timestamp(),
            exp: (now + self.lifetime).timestamp(),
        };

        Ok(encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &self.encoding_key,
        )?)
    }

    fn validate(&self, token: &str) -> Result<Session, TokenError> {
        let validation = Validation::new(Algorithm::HS256);

        match decode::<TokenClaims>(token, &self.decoding_key, &validation) {
            Ok(data) => Ok(Session::new(data.claims.sid, data.claims.sub)),
            Err(error) => match error.kind() {
                ErrorKind::ExpiredSignature => Err(TokenError::Expired),
                _ => Err(TokenError::Invalid),
            },
        }
    }

    fn lifetime(&self) -> Duration {
        self.lifetime
    }
}
