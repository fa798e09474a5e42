use std::convert::TryFrom;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::identities::domain::users::NewUser;

#[derive(Clone, Debug, sqlx::FromRow)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    #[sqlx(rename = "password")]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// A user ready to be inserted. The email is stored in its normalized form.
#[derive(Clone, Debug)]
pub struct NewUserModel {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
}

impl TryFrom<&NewUser> for NewUserModel {
    type Error = anyhow::Error;

    fn try_from(user: &NewUser) -> Result<Self, Self::Error> {
        Ok(Self {
            id: user.id(),
            email: user.email().normalized(),
            password_hash: user.password_hash()?.value().to_owned(),
        })
    }
}
