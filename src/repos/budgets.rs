use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{
    budgeting::domain::budgets::{BudgetDetails, NewBudget},
    database::{decode_rows, PostgresConnection, StorageError},
    models::Budget,
};

pub type DynBudgetRepo = Arc<dyn BudgetRepo + Send + Sync>;

#[async_trait]
pub trait BudgetRepo {
    async fn insert(&self, budget: &NewBudget) -> Result<Budget, StorageError>;

    /// List a user's budgets, oldest first.
    ///
    /// # Arguments
    ///
    /// * `user_id` - The owner of the budgets.
    /// * `starts_before` - If provided, only budgets with a start date before
    ///   this instant are listed.
    async fn list_for_user(
        &self,
        user_id: Uuid,
        starts_before: Option<DateTime<Utc>>,
    ) -> Result<Vec<Budget>, StorageError>;

    async fn get(&self, user_id: Uuid, id: Uuid) -> Result<Option<Budget>, StorageError>;

    /// Replace the details of a budget owned by `user_id`.
    ///
    /// # Returns
    ///
    /// The updated budget, or [`None`] if the user owns no budget with the
    /// given ID.
    async fn update(
        &self,
        user_id: Uuid,
        id: Uuid,
        details: &BudgetDetails,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<Budget>, StorageError>;

    async fn delete(&self, user_id: Uuid, id: Uuid) -> Result<(), StorageError>;
}

#[async_trait]
impl BudgetRepo for PostgresConnection {
    async fn insert(&self, budget: &NewBudget) -> Result<Budget, StorageError> {
        self.within_deadline(
            sqlx::query_as::<_, Budget>(
                r#"
                WITH inserted AS (
                    INSERT INTO budgets (
                        id, user_id, name, amount, type, category_id,
                        created_at, updated_at, start_date
                    )
                    VALUES ($1, $2, $3, $4, $5, $6, $7, $7, $8)
                    RETURNING *
                )
                SELECT b.*, c.name AS category_name
                FROM inserted b
                    LEFT JOIN categories c ON b.category_id = c.id
                "#,
            )
            .bind(budget.id)
            .bind(budget.user_id)
            .bind(&budget.details.name)
            .bind(budget.details.amount)
            .bind(budget.details.entry_type)
            .bind(budget.details.category_id)
            .bind(budget.created_at)
            .bind(budget.start_date())
            .fetch_one(&**self),
        )
        .await
    }

    async fn list_for_user(
        &self,
        user_id: Uuid,
        starts_before: Option<DateTime<Utc>>,
    ) -> Result<Vec<Budget>, StorageError> {
        let rows = self
            .within_deadline(
                sqlx::query(
                    r#"
                    SELECT b.*, c.name AS category_name
                    FROM budgets b
                        LEFT JOIN categories c ON b.category_id = c.id
                    WHERE b.user_id = $1
                        AND ($2::timestamptz IS NULL OR b.start_date < $2)
                    ORDER BY b.start_date, b.created_at
                    "#,
                )
                .bind(user_id)
                .bind(starts_before)
                .fetch_all(&**self),
            )
            .await?;

        Ok(decode_rows(&rows))
    }

    async fn get(&self, user_id: Uuid, id: Uuid) -> Result<Option<Budget>, StorageError> {
        self.within_deadline(
            sqlx::query_as::<_, Budget>(
                r#"
                SELECT b.*, c.name AS category_name
                FROM budgets b
                    LEFT JOIN categories c ON b.category_id = c.id
                WHERE b.id = $1 AND b.user_id = $2
                "#,
            )
            .bind(id)
            .bind(user_id)
            .fetch_optional(&**self),
        )
        .await
    }

    async fn update(
        &self,
        user_id: Uuid,
        id: Uuid,
        details: &BudgetDetails,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<Budget>, StorageError> {
        self.within_deadline(
            sqlx::query_as::<_, Budget>(
                r#"
                WITH updated AS (
                    UPDATE budgets
                    SET name = $3,
                        amount = $4,
                        type = $5,
                        category_id = $6,
                        start_date = COALESCE($7, start_date),
                        updated_at = $8
                    WHERE id = $1 AND user_id = $2
                    RETURNING *
                )
                SELECT b.*, c.name AS category_name
                FROM updated b
                    LEFT JOIN categories c ON b.category_id = c.id
                "#,
            )
            .bind(id)
            .bind(user_id)
            .bind(&details.name)
            .bind(details.amount)
            .bind(details.entry_type)
            .bind(details.category_id)
            .bind(details.start_date)
            .bind(updated_at)
            .fetch_optional(&**self),
        )
        .await
    }

    async fn delete(&self, user_id: Uuid, id: Uuid) -> Result<(), StorageError> {
        self.within_deadline(
            sqlx::query("DELETE FROM budgets WHERE id = $1 AND user_id = $2")
                .bind(id)
                .bind(user_id)
                .execute(&**self),
        )
        .await?;

        Ok(())
    }
}
