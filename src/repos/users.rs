use std::sync::Arc;

use async_trait::async_trait;

use crate::{
    database::{PostgresConnection, StorageError},
    models::{NewUserModel, User},
};

pub type DynUserRepo = Arc<dyn UserRepo + Send + Sync>;

#[async_trait]
pub trait UserRepo {
    /// Insert a new user.
    ///
    /// Fails with [`StorageError::Conflict`] if the email address is already
    /// registered.
    async fn insert_user(&self, user: &NewUserModel) -> Result<User, StorageError>;

    /// Find a user by their normalized email address.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StorageError>;
}

#[async_trait]
impl UserRepo for PostgresConnection {
    async fn insert_user(&self, user: &NewUserModel) -> Result<User, StorageError> {
        self.within_deadline(
            sqlx::query_as::<_, User>(
                r#"
                INSERT INTO users (id, email, password)
                VALUES ($1, $2, $3)
                RETURNING id, email, password, created_at
                "#,
            )
            .bind(user.id)
            .bind(&user.email)
            .bind(&user.password_hash)
            .fetch_one(&**self),
        )
        .await
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StorageError> {
        self.within_deadline(
            sqlx::query_as::<_, User>(
                r#"
                SELECT id, email, password, created_at
                FROM users
                WHERE email = $1
                "#,
            )
            .bind(email)
            .fetch_optional(&**self),
        )
        .await
    }
}
