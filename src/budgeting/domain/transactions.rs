use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;
use validator::{Validate, ValidationErrors};

use super::{validate_amount, EntryType, Frequency};

/// Transaction data provided by a client, used both to create and to replace
/// a transaction.
#[derive(Debug, Deserialize, Validate)]
pub struct TransactionData {
    /// Ignored on update.
    pub id: Option<Uuid>,

    pub user_id: Option<Uuid>,

    pub budget_id: Option<Uuid>,

    pub category_id: Option<Uuid>,

    #[serde(rename = "type")]
    pub entry_type: EntryType,

    #[validate(custom = "validate_amount")]
    pub amount: Decimal,

    #[serde(default)]
    #[validate(length(max = 1000))]
    pub note: String,

    pub date: DateTime<Utc>,

    pub frequency: Frequency,

    /// Day of the month a recurring payment is due.
    #[serde(alias = "dueDay")]
    #[validate(range(min = 1, max = 31))]
    pub due_day: Option<i32>,
}

/// The fields of a transaction a user controls.
#[derive(Clone, Debug, PartialEq)]
pub struct TransactionDetails {
    pub budget_id: Option<Uuid>,
    pub category_id: Option<Uuid>,
    pub entry_type: EntryType,
    pub amount: Decimal,
    pub note: String,
    pub date: DateTime<Utc>,
    pub frequency: Frequency,
    pub due_day: Option<i32>,
}

impl TransactionDetails {
    pub fn from_data(data: TransactionData) -> Result<Self, ValidationErrors> {
        data.validate()?;

        Ok(Self {
            budget_id: data.budget_id,
            category_id: data.category_id,
            entry_type: data.entry_type,
            amount: data.amount,
            note: data.note,
            date: data.date,
            frequency: data.frequency,
            due_day: data.due_day,
        })
    }
}

/// A transaction that has not been persisted yet.
#[derive(Clone, Debug, PartialEq)]
pub struct NewTransaction {
    pub id: Uuid,
    pub user_id: Uuid,
    pub details: TransactionDetails,
}

impl NewTransaction {
    /// Build a transaction owned by `owner_id`, generating an ID if the client
    /// did not supply one.
    pub fn from_data(owner_id: Uuid, data: TransactionData) -> Result<Self, ValidationErrors> {
        let id = data.id.filter(|id| !id.is_nil()).unwrap_or_else(Uuid::new_v4);

        Ok(Self {
            id,
            user_id: owner_id,
            details: TransactionDetails::from_data(data)?,
        })
    }
}
