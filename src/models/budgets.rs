use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::budgeting::domain::EntryType;

#[derive(Clone, Debug, PartialEq, sqlx::FromRow)]
pub struct Budget {
    pub id: Uuid,
    pub user_id: Uuid,
    pub name: String,
    pub amount: Decimal,
    #[sqlx(rename = "type")]
    pub entry_type: EntryType,
    pub category_id: Option<Uuid>,
    /// Name of the linked category, joined at read time.
    pub category_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub start_date: DateTime<Utc>,
}
