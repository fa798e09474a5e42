use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::budgeting::domain::{EntryType, Frequency};

#[derive(Clone, Debug, PartialEq, sqlx::FromRow)]
pub struct Transaction {
    pub id: Uuid,
    pub user_id: Uuid,
    pub budget_id: Option<Uuid>,
    pub category_id: Option<Uuid>,
    #[sqlx(rename = "type")]
    pub entry_type: EntryType,
    pub amount: Decimal,
    pub note: String,
    pub date: DateTime<Utc>,
    pub frequency: Frequency,
    pub due_day: Option<i32>,
    // The category's name and color are joined at read time.
    pub category_name: Option<String>,
    pub color: Option<String>,
}
