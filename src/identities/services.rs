use std::convert::TryFrom;

use anyhow::Context;
use semval::ValidatedFrom;
use thiserror::Error;
use tracing::{debug, info};

use crate::{
    database::StorageError,
    models::{self, User},
    passwords,
    repos::DynUserRepo,
};

use super::domain::{
    email::Email,
    users::{NewUser, NewUserData, NewUserInvalidity},
};

/// Primary key constraint of the users table.
const USERS_PKEY: &str = "users_pkey";

#[derive(Debug, Error)]
pub enum RegisterError {
    /// The provided user data is invalid.
    #[error("invalid user data: {0:?}")]
    InvalidUser(semval::context::Context<NewUserInvalidity>),

    #[error("email address is already registered")]
    DuplicateEmail,

    #[error("user ID is already taken")]
    DuplicateId,

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// A service object providing functionality relating to users.
#[derive(Clone)]
pub struct UserService {
    user_repo: DynUserRepo,
}

impl UserService {
    pub fn new(user_repo: DynUserRepo) -> Self {
        Self { user_repo }
    }

    /// Register a new user.
    ///
    /// Uniqueness of the email address is enforced by the database, so two
    /// concurrent registrations for the same address cannot both succeed.
    pub async fn register(&self, new_user_data: NewUserData) -> Result<User, RegisterError> {
        let new_user = NewUser::validated_from(new_user_data)
            .map_err(|(_, context)| RegisterError::InvalidUser(context))?;

        let user_model = models::NewUserModel::try_from(&new_user)
            .context("Failed to convert from domain to model.")?;

        match self.user_repo.insert_user(&user_model).await {
            Ok(user) => {
                info!(user_id = %user.id, "Registered new user.");

                Ok(user)
            }
            Err(StorageError::Conflict(constraint)) if constraint == USERS_PKEY => {
                debug!(user_id = %user_model.id, "Rejected registration for existing ID.");

                Err(RegisterError::DuplicateId)
            }
            Err(StorageError::Conflict(_)) => {
                debug!("Rejected registration for existing email.");

                Err(RegisterError::DuplicateEmail)
            }
            Err(error) => Err(anyhow::Error::from(error)
                .context("Failed to persist new user.")
                .into()),
        }
    }

    /// Find the user identified by an email and password.
    ///
    /// # Returns
    ///
    /// The matching user, or [`None`] if there is no user with the email or
    /// the password is wrong. Callers cannot tell the two cases apart.
    pub async fn authenticate(&self, email: &str, password: &str) -> anyhow::Result<Option<User>> {
        let normalized = Email::unvalidated(email.to_owned()).normalized();

        let user = match self
            .user_repo
            .find_by_email(&normalized)
            .await
            .context("Failed to find user by email.")?
        {
            Some(user) => user,
            None => {
                debug!("Login attempted for unknown email.");
                passwords::Hash::unmatchable().matches_raw_password(password)?;

                return Ok(None);
            }
        };

        let hash = passwords::Hash::from_hash_str(&user.password_hash)
            .context("Invalid password hash received from model.")?;

        if hash.matches_raw_password(password)? {
            debug!(user_id = %user.id, "Validated user credentials.");

            Ok(Some(user))
        } else {
            debug!(user_id = %user.id, "Login attempted with wrong password.");

            Ok(None)
        }
    }
}
