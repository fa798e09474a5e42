use uuid::Uuid;

use crate::budgeting::domain::EntryType;

/// A category. Categories without an owner are shared defaults.
#[derive(Clone, Debug, PartialEq, sqlx::FromRow)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub user_id: Option<Uuid>,
    #[sqlx(rename = "type")]
    pub entry_type: EntryType,
    pub color: Option<String>,
}
