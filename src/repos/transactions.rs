use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use crate::{
    budgeting::domain::transactions::{NewTransaction, TransactionDetails},
    database::{decode_rows, PostgresConnection, StorageError},
    models::Transaction,
};

pub type DynTransactionRepo = Arc<dyn TransactionRepo + Send + Sync>;

#[async_trait]
pub trait TransactionRepo {
    async fn insert(&self, transaction: &NewTransaction) -> Result<Transaction, StorageError>;

    /// List a user's transactions, most recent first.
    async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<Transaction>, StorageError>;

    async fn get(&self, user_id: Uuid, id: Uuid) -> Result<Option<Transaction>, StorageError>;

    /// Replace the details of a transaction owned by `user_id`.
    ///
    /// # Returns
    ///
    /// The updated transaction, or [`None`] if the user owns no transaction
    /// with the given ID.
    async fn update(
        &self,
        user_id: Uuid,
        id: Uuid,
        details: &TransactionDetails,
    ) -> Result<Option<Transaction>, StorageError>;

    async fn delete(&self, user_id: Uuid, id: Uuid) -> Result<(), StorageError>;
}

#[async_trait]
impl TransactionRepo for PostgresConnection {
    async fn insert(&self, transaction: &NewTransaction) -> Result<Transaction, StorageError> {
        let details = &transaction.details;

        self.within_deadline(
            sqlx::query_as::<_, Transaction>(
                r#"
                WITH inserted AS (
                    INSERT INTO transactions (
                        id, user_id, budget_id, category_id, type, amount,
                        note, date, frequency, due_day
                    )
                    VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
                    RETURNING *
                )
                SELECT t.*, c.name AS category_name, c.color
                FROM inserted t
                    LEFT JOIN categories c ON t.category_id = c.id
                "#,
            )
            .bind(transaction.id)
            .bind(transaction.user_id)
            .bind(details.budget_id)
            .bind(details.category_id)
            .bind(details.entry_type)
            .bind(details.amount)
            .bind(&details.note)
            .bind(details.date)
            .bind(details.frequency)
            .bind(details.due_day)
            .fetch_one(&**self),
        )
        .await
    }

    async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<Transaction>, StorageError> {
        let rows = self
            .within_deadline(
                sqlx::query(
                    r#"
                    SELECT t.*, c.name AS category_name, c.color
                    FROM transactions t
                        LEFT JOIN categories c ON t.category_id = c.id
                    WHERE t.user_id = $1
                    ORDER BY t.date DESC, t.id
                    "#,
                )
                .bind(user_id)
                .fetch_all(&**self),
            )
            .await?;

        Ok(decode_rows(&rows))
    }

    async fn get(&self, user_id: Uuid, id: Uuid) -> Result<Option<Transaction>, StorageError> {
        self.within_deadline(
            sqlx::query_as::<_, Transaction>(
                r#"
                SELECT t.*, c.name AS category_name, c.color
                FROM transactions t
                    LEFT JOIN categories c ON t.category_id = c.id
                WHERE t.id = $1 AND t.user_id = $2
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
        details: &TransactionDetails,
    ) -> Result<Option<Transaction>, StorageError> {
        self.within_deadline(
            sqlx::query_as::<_, Transaction>(
                r#"
                WITH updated AS (
                    UPDATE transactions
                    SET budget_id = $3,
                        category_id = $4,
                        type = $5,
                        amount = $6,
                        note = $7,
                        date = $8,
                        frequency = $9,
                        due_day = $10
                    WHERE id = $1 AND user_id = $2
                    RETURNING *
                )
                SELECT t.*, c.name AS category_name, c.color
                FROM updated t
                    LEFT JOIN categories c ON t.category_id = c.id
                "#,
            )
            .bind(id)
            .bind(user_id)
            .bind(details.budget_id)
            .bind(details.category_id)
            .bind(details.entry_type)
            .bind(details.amount)
            .bind(&details.note)
            .bind(details.date)
            .bind(details.frequency)
            .bind(details.due_day)
            .fetch_optional(&**self),
        )
        .await
    }

    async fn delete(&self, user_id: Uuid, id: Uuid) -> Result<(), StorageError> {
        self.within_deadline(
            sqlx::query("DELETE FROM transactions WHERE id = $1 AND user_id = $2")
                .bind(id)
                .bind(user_id)
                .execute(&**self),
        )
        .await?;

        Ok(())
    }
}
