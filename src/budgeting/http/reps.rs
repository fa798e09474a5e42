use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    budgeting::domain::{EntryType, Frequency},
    models,
};

#[derive(Debug, Serialize)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub user_id: Option<Uuid>,
    #[serde(rename = "type")]
    pub entry_type: EntryType,
    pub color: Option<String>,
}

impl From<models::Category> for Category {
    fn from(category: models::Category) -> Self {
        Self {
            id: category.id,
            name: category.name,
            user_id: category.user_id,
            entry_type: category.entry_type,
            color: category.color,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct Budget {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub amount: Decimal,
    #[serde(rename = "type")]
    pub entry_type: EntryType,
    pub category_id: Option<Uuid>,
    pub category_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub start_date: DateTime<Utc>,
}

impl From<models::Budget> for Budget {
    fn from(budget: models::Budget) -> Self {
        Self {
            id: budget.id,
            user_id: budget.user_id,
            name: budget.name,
            amount: budget.amount,
            entry_type: budget.entry_type,
            category_id: budget.category_id,
            category_name: budget.category_name,
            created_at: budget.created_at,
            updated_at: budget.updated_at,
            start_date: budget.start_date,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct Transaction {
    pub id: Uuid,
    pub user_id: Uuid,
    pub budget_id: Option<Uuid>,
    pub category_id: Option<Uuid>,
    pub category_name: Option<String>,
    pub color: Option<String>,
    #[serde(rename = "type")]
    pub entry_type: EntryType,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub amount: Decimal,
    pub note: String,
    pub date: DateTime<Utc>,
    pub frequency: Frequency,
    pub due_day: Option<i32>,
}

impl From<models::Transaction> for Transaction {
    fn from(transaction: models::Transaction) -> Self {
        Self {
            id: transaction.id,
            user_id: transaction.user_id,
            budget_id: transaction.budget_id,
            category_id: transaction.category_id,
            category_name: transaction.category_name,
            color: transaction.color,
            entry_type: transaction.entry_type,
            amount: transaction.amount,
            note: transaction.note,
            date: transaction.date,
            frequency: transaction.frequency,
            due_day: transaction.due_day,
        }
    }
}

#[derive(Deserialize)]
pub struct CategoryListParams {
    #[serde(rename = "type")]
    pub entry_type: EntryType,
}

#[derive(Deserialize)]
pub struct BudgetListParams {
    pub month: Option<u32>,
    pub year: Option<i32>,
}

#[derive(Deserialize)]
pub struct TransactionListParams {
    pub user_id: Option<Uuid>,
}
