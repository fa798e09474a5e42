use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    budgeting::domain::{
        categories::{CategoryUpdate, NewCategory},
        EntryType,
    },
    database::{decode_rows, PostgresConnection, StorageError},
    models::Category,
};

pub type DynCategoryRepo = Arc<dyn CategoryRepo + Send + Sync>;

#[async_trait]
pub trait CategoryRepo {
    /// List the shared categories of a given type. These have no owner.
    async fn list_global(&self, entry_type: EntryType) -> Result<Vec<Category>, StorageError>;

    /// List the categories owned by a user.
    async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<Category>, StorageError>;

    /// Whether `user_id` may reference the category, either because it is
    /// global or because they own it.
    async fn is_usable_by(&self, user_id: Uuid, id: Uuid) -> Result<bool, StorageError>;

    async fn insert(&self, category: &NewCategory) -> Result<Category, StorageError>;

    /// Update the name and color of a category owned by `user_id`.
    ///
    /// # Returns
    ///
    /// The updated category, or [`None`] if the user owns no category with
    /// the given ID.
    async fn update(
        &self,
        user_id: Uuid,
        id: Uuid,
        update: &CategoryUpdate,
    ) -> Result<Option<Category>, StorageError>;

    /// Delete a category owned by `user_id`. Deleting a category that does not
    /// exist is not an error.
    async fn delete(&self, user_id: Uuid, id: Uuid) -> Result<(), StorageError>;
}

#[async_trait]
impl CategoryRepo for PostgresConnection {
    async fn list_global(&self, entry_type: EntryType) -> Result<Vec<Category>, StorageError> {
        let rows = self
            .within_deadline(
                sqlx::query(
                    r#"
                    SELECT id, name, user_id, type, color
                    FROM categories
                    WHERE user_id IS NULL AND type = $1
                    ORDER BY name
                    "#,
                )
                .bind(entry_type)
                .fetch_all(&**self),
            )
            .await?;

        Ok(decode_rows(&rows))
    }

    async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<Category>, StorageError> {
        let rows = self
            .within_deadline(
                sqlx::query(
                    r#"
                    SELECT id, name, user_id, type, color
                    FROM categories
                    WHERE user_id = $1
                    ORDER BY name
                    "#,
                )
                .bind(user_id)
                .fetch_all(&**self),
            )
            .await?;

        Ok(decode_rows(&rows))
    }

    async fn is_usable_by(&self, user_id: Uuid, id: Uuid) -> Result<bool, StorageError> {
        self.within_deadline(
            sqlx::query_scalar::<_, bool>(
                r#"
                SELECT EXISTS (
                    SELECT 1
                    FROM categories
                    WHERE id = $1 AND (user_id IS NULL OR user_id = $2)
                )
                "#,
            )
            .bind(id)
            .bind(user_id)
            .fetch_one(&**self),
        )
        .await
    }

    async fn insert(&self, category: &NewCategory) -> Result<Category, StorageError> {
        self.within_deadline(
            sqlx::query_as::<_, Category>(
                r#"
                INSERT INTO categories (id, name, user_id, type, color)
                VALUES ($1, $2, $3, $4, $5)
                RETURNING id, name, user_id, type, color
                "#,
            )
            .bind(category.id)
            .bind(&category.name)
            .bind(category.user_id)
            .bind(category.entry_type)
            .bind(&category.color)
            .fetch_one(&**self),
        )
        .await
    }

    async fn update(
        &self,
        user_id: Uuid,
        id: Uuid,
        update: &CategoryUpdate,
    ) -> Result<Option<Category>, StorageError> {
        self.within_deadline(
            sqlx::query_as::<_, Category>(
                r#"
                UPDATE categories
                SET name = $3, color = $4
                WHERE id = $1 AND user_id = $2
                RETURNING id, name, user_id, type, color
                "#,
            )
            .bind(id)
            .bind(user_id)
            .bind(&update.name)
            .bind(&update.color)
            .fetch_optional(&**self),
        )
        .await
    }

    async fn delete(&self, user_id: Uuid, id: Uuid) -> Result<(), StorageError> {
        self.within_deadline(
            sqlx::query("DELETE FROM categories WHERE id = $1 AND user_id = $2")
                .bind(id)
                .bind(user_id)
                .execute(&**self),
        )
        .await?;

        Ok(())
    }
}
