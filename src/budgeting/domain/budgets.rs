use chrono::{DateTime, Datelike, NaiveDate, TimeZone, Utc};
use rust_decimal::Decimal;
use serde::Deserialize;
use uuid::Uuid;
use validator::{Validate, ValidationErrors};

use super::{validate_amount, EntryType};

/// Budget data provided by a client, used both to create and to replace a
/// budget.
#[derive(Debug, Deserialize, Validate)]
pub struct BudgetData {
    /// Ignored on update.
    pub id: Option<Uuid>,

    pub user_id: Option<Uuid>,

    #[validate(length(min = 1, max = 100))]
    pub name: String,

    #[validate(custom = "validate_amount")]
    pub amount: Decimal,

    #[serde(rename = "type")]
    pub entry_type: EntryType,

    pub category_id: Option<Uuid>,

    pub start_date: Option<DateTime<Utc>>,
}

/// The fields of a budget a user controls.
#[derive(Clone, Debug, PartialEq)]
pub struct BudgetDetails {
    pub name: String,
    pub amount: Decimal,
    pub entry_type: EntryType,
    pub category_id: Option<Uuid>,
    /// When absent on update, the stored start date is kept.
    pub start_date: Option<DateTime<Utc>>,
}

impl BudgetDetails {
    pub fn from_data(data: BudgetData) -> Result<Self, ValidationErrors> {
        data.validate()?;

        Ok(Self {
            name: data.name.trim().to_owned(),
            amount: data.amount,
            entry_type: data.entry_type,
            category_id: data.category_id,
            start_date: data.start_date,
        })
    }
}

/// A budget that has not been persisted yet.
#[derive(Clone, Debug, PartialEq)]
pub struct NewBudget {
    pub id: Uuid,
    pub user_id: Uuid,
    pub details: BudgetDetails,
    pub created_at: DateTime<Utc>,
}

impl NewBudget {
    /// Build a budget owned by `owner_id`, generating an ID if the client did
    /// not supply one and stamping the creation time.
    pub fn from_data(
        owner_id: Uuid,
        data: BudgetData,
        now: DateTime<Utc>,
    ) -> Result<Self, ValidationErrors> {
        let id = data.id.filter(|id| !id.is_nil()).unwrap_or_else(Uuid::new_v4);

        Ok(Self {
            id,
            user_id: owner_id,
            details: BudgetDetails::from_data(data)?,
            created_at: now,
        })
    }

    pub fn start_date(&self) -> DateTime<Utc> {
        self.details.start_date.unwrap_or(self.created_at)
    }
}

/// The first instant after the given month ends.
///
/// Budgets that start before this instant are in effect for the month.
/// Returns [`None`] for an invalid month or year.
pub fn month_end(year: i32, month: u32) -> Option<DateTime<Utc>> {
    let first_of_month = NaiveDate::from_ymd_opt(year, month, 1)?;
    let first_of_next = if first_of_month.month() == 12 {
        NaiveDate::from_ymd_opt(year.checked_add(1)?, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };

    Utc.from_local_datetime(&first_of_next.and_hms_opt(0, 0, 0)?)
        .single()
}

#[cfg(test)]
mod test {
    use std::str::FromStr;

    use super::*;

    fn data() -> BudgetData {
        BudgetData {
            id: None,
            user_id: None,
            name: "Rent".to_owned(),
            amount: Decimal::from_str("1250.50").unwrap(),
            entry_type: EntryType::Expense,
            category_id: Some(Uuid::new_v4()),
            start_date: None,
        }
    }

    #[test]
    fn new_budget_generates_id_and_defaults_start_date() {
        let now = Utc::now();

        let budget = NewBudget::from_data(Uuid::new_v4(), data(), now).expect("should be valid");

        assert!(!budget.id.is_nil());
        assert_eq!(now, budget.start_date());
    }

    #[test]
    fn new_budget_keeps_client_id() {
        let id = Uuid::new_v4();
        let input = BudgetData {
            id: Some(id),
            ..data()
        };

        let budget = NewBudget::from_data(Uuid::new_v4(), input, Utc::now()).expect("valid");

        assert_eq!(id, budget.id);
    }

    #[test]
    fn negative_amount_is_rejected() {
        let input = BudgetData {
            amount: Decimal::from_str("-1").unwrap(),
            ..data()
        };

        let errors = BudgetDetails::from_data(input).expect_err("should be invalid");

        assert!(errors.field_errors().contains_key("amount"));
    }

    #[test]
    fn empty_name_is_rejected() {
        let input = BudgetData {
            name: String::new(),
            ..data()
        };

        let errors = BudgetDetails::from_data(input).expect_err("should be invalid");

        assert_eq!("length", errors.field_errors()["name"][0].code);
    }

    #[test]
    fn month_end_rolls_into_next_month() {
        let end = month_end(2024, 2).expect("valid month");

        assert_eq!(Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap(), end);
    }

    #[test]
    fn month_end_rolls_into_next_year() {
        let end = month_end(2024, 12).expect("valid month");

        assert_eq!(Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(), end);
    }

    #[test]
    fn month_end_rejects_invalid_month() {
        assert!(month_end(2024, 0).is_none());
        assert!(month_end(2024, 13).is_none());
    }
}
