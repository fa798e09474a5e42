//! In-memory repositories used to exercise the HTTP layer without Postgres.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::{BudgetRepo, CategoryRepo, TransactionRepo, UserRepo};
use crate::{
    budgeting::domain::{
        budgets::{BudgetDetails, NewBudget},
        categories::{CategoryUpdate, NewCategory},
        transactions::{NewTransaction, TransactionDetails},
        EntryType,
    },
    database::StorageError,
    models::{Budget, Category, NewUserModel, Transaction, User},
};

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    categories: Vec<Category>,
    budgets: Vec<Budget>,
    transactions: Vec<Transaction>,
}

#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn with_categories(categories: Vec<Category>) -> Self {
        let store = Self::default();
        store.tables.lock().unwrap().categories = categories;

        store
    }
}

impl Tables {
    fn category(&self, id: Option<Uuid>) -> Option<&Category> {
        id.and_then(|id| self.categories.iter().find(|c| c.id == id))
    }

    fn check_category(&self, id: Option<Uuid>) -> Result<(), StorageError> {
        match id {
            Some(_) if self.category(id).is_none() => Err(StorageError::MissingReference(
                "category_id_fkey".to_owned(),
            )),
            _ => Ok(()),
        }
    }

    fn budget_with_joins(&self, mut budget: Budget) -> Budget {
        budget.category_name = self.category(budget.category_id).map(|c| c.name.clone());

        budget
    }

    fn transaction_with_joins(&self, mut transaction: Transaction) -> Transaction {
        let category = self.category(transaction.category_id);
        transaction.category_name = category.map(|c| c.name.clone());
        transaction.color = category.and_then(|c| c.color.clone());

        transaction
    }
}

#[async_trait]
impl UserRepo for MemoryStore {
    async fn insert_user(&self, user: &NewUserModel) -> Result<User, StorageError> {
        let mut tables = self.tables.lock().unwrap();
        if tables.users.iter().any(|u| u.id == user.id) {
            return Err(StorageError::Conflict("users_pkey".to_owned()));
        }
        if tables.users.iter().any(|u| u.email == user.email) {
            return Err(StorageError::Conflict("users_email_key".to_owned()));
        }

        let stored = User {
            id: user.id,
            email: user.email.clone(),
            password_hash: user.password_hash.clone(),
            created_at: Utc::now(),
        };
        tables.users.push(stored.clone());

        Ok(stored)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StorageError> {
        let tables = self.tables.lock().unwrap();

        Ok(tables.users.iter().find(|u| u.email == email).cloned())
    }
}

#[async_trait]
impl CategoryRepo for MemoryStore {
    async fn list_global(&self, entry_type: EntryType) -> Result<Vec<Category>, StorageError> {
        let tables = self.tables.lock().unwrap();

        let mut categories: Vec<Category> = tables
            .categories
            .iter()
            .filter(|c| c.user_id.is_none() && c.entry_type == entry_type)
            .cloned()
            .collect();
        categories.sort_by(|a, b| a.name.cmp(&b.name));

        Ok(categories)
    }

    async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<Category>, StorageError> {
        let tables = self.tables.lock().unwrap();

        let mut categories: Vec<Category> = tables
            .categories
            .iter()
            .filter(|c| c.user_id == Some(user_id))
            .cloned()
            .collect();
        categories.sort_by(|a, b| a.name.cmp(&b.name));

        Ok(categories)
    }

    async fn is_usable_by(&self, user_id: Uuid, id: Uuid) -> Result<bool, StorageError> {
        let tables = self.tables.lock().unwrap();

        Ok(tables
            .categories
            .iter()
            .any(|c| c.id == id && c.user_id.map_or(true, |owner| owner == user_id)))
    }

    async fn insert(&self, category: &NewCategory) -> Result<Category, StorageError> {
        let mut tables = self.tables.lock().unwrap();
        if tables.categories.iter().any(|c| c.id == category.id) {
            return Err(StorageError::Conflict("categories_pkey".to_owned()));
        }

        let stored = Category {
            id: category.id,
            name: category.name.clone(),
            user_id: Some(category.user_id),
            entry_type: category.entry_type,
            color: category.color.clone(),
        };
        tables.categories.push(stored.clone());

        Ok(stored)
    }

    async fn update(
        &self,
        user_id: Uuid,
        id: Uuid,
        update: &CategoryUpdate,
    ) -> Result<Option<Category>, StorageError> {
        let mut tables = self.tables.lock().unwrap();

        Ok(tables
            .categories
            .iter_mut()
            .find(|c| c.id == id && c.user_id == Some(user_id))
            .map(|category| {
                category.name = update.name.clone();
                category.color = update.color.clone();

                category.clone()
            }))
    }

    async fn delete(&self, user_id: Uuid, id: Uuid) -> Result<(), StorageError> {
        let mut tables = self.tables.lock().unwrap();
        tables
            .categories
            .retain(|c| !(c.id == id && c.user_id == Some(user_id)));

        Ok(())
    }
}

#[async_trait]
impl BudgetRepo for MemoryStore {
    async fn insert(&self, budget: &NewBudget) -> Result<Budget, StorageError> {
        let mut tables = self.tables.lock().unwrap();
        if tables.budgets.iter().any(|b| b.id == budget.id) {
            return Err(StorageError::Conflict("budgets_pkey".to_owned()));
        }
        tables.check_category(budget.details.category_id)?;

        let stored = Budget {
            id: budget.id,
            user_id: budget.user_id,
            name: budget.details.name.clone(),
            amount: budget.details.amount,
            entry_type: budget.details.entry_type,
            category_id: budget.details.category_id,
            category_name: None,
            created_at: budget.created_at,
            updated_at: budget.created_at,
            start_date: budget.start_date(),
        };
        tables.budgets.push(stored.clone());

        Ok(tables.budget_with_joins(stored))
    }

    async fn list_for_user(
        &self,
        user_id: Uuid,
        starts_before: Option<DateTime<Utc>>,
    ) -> Result<Vec<Budget>, StorageError> {
        let tables = self.tables.lock().unwrap();
        let mut budgets: Vec<Budget> = tables
            .budgets
            .iter()
            .filter(|b| b.user_id == user_id)
            .filter(|b| starts_before.map_or(true, |end| b.start_date < end))
            .map(|b| tables.budget_with_joins(b.clone()))
            .collect();
        budgets.sort_by_key(|b| (b.start_date, b.created_at));

        Ok(budgets)
    }

    async fn get(&self, user_id: Uuid, id: Uuid) -> Result<Option<Budget>, StorageError> {
        let tables = self.tables.lock().unwrap();

        Ok(tables
            .budgets
            .iter()
            .find(|b| b.id == id && b.user_id == user_id)
            .map(|b| tables.budget_with_joins(b.clone())))
    }

    async fn update(
        &self,
        user_id: Uuid,
        id: Uuid,
        details: &BudgetDetails,
        updated_at: DateTime<Utc>,
    ) -> Result<Option<Budget>, StorageError> {
        let mut tables = self.tables.lock().unwrap();
        tables.check_category(details.category_id)?;

        let updated = tables
            .budgets
            .iter_mut()
            .find(|b| b.id == id && b.user_id == user_id)
            .map(|budget| {
                budget.name = details.name.clone();
                budget.amount = details.amount;
                budget.entry_type = details.entry_type;
                budget.category_id = details.category_id;
                budget.start_date = details.start_date.unwrap_or(budget.start_date);
                budget.updated_at = updated_at;

                budget.clone()
            });

        Ok(updated.map(|b| tables.budget_with_joins(b)))
    }

    async fn delete(&self, user_id: Uuid, id: Uuid) -> Result<(), StorageError> {
        let mut tables = self.tables.lock().unwrap();
        tables
            .budgets
            .retain(|b| !(b.id == id && b.user_id == user_id));

        Ok(())
    }
}

#[async_trait]
impl TransactionRepo for MemoryStore {
    async fn insert(&self, transaction: &NewTransaction) -> Result<Transaction, StorageError> {
        let mut tables = self.tables.lock().unwrap();
        if tables.transactions.iter().any(|t| t.id == transaction.id) {
            return Err(StorageError::Conflict("transactions_pkey".to_owned()));
        }
        tables.check_category(transaction.details.category_id)?;

        let details = &transaction.details;
        let stored = Transaction {
            id: transaction.id,
            user_id: transaction.user_id,
            budget_id: details.budget_id,
            category_id: details.category_id,
            entry_type: details.entry_type,
            amount: details.amount,
            note: details.note.clone(),
            date: details.date,
            frequency: details.frequency,
            due_day: details.due_day,
            category_name: None,
            color: None,
        };
        tables.transactions.push(stored.clone());

        Ok(tables.transaction_with_joins(stored))
    }

    async fn list_for_user(&self, user_id: Uuid) -> Result<Vec<Transaction>, StorageError> {
        let tables = self.tables.lock().unwrap();
        let mut transactions: Vec<Transaction> = tables
            .transactions
            .iter()
            .filter(|t| t.user_id == user_id)
            .map(|t| tables.transaction_with_joins(t.clone()))
            .collect();
        transactions.sort_by(|a, b| b.date.cmp(&a.date).then(a.id.cmp(&b.id)));

        Ok(transactions)
    }

    async fn get(&self, user_id: Uuid, id: Uuid) -> Result<Option<Transaction>, StorageError> {
        let tables = self.tables.lock().unwrap();

        Ok(tables
            .transactions
            .iter()
            .find(|t| t.id == id && t.user_id == user_id)
            .map(|t| tables.transaction_with_joins(t.clone())))
    }

    async fn update(
        &self,
        user_id: Uuid,
        id: Uuid,
        details: &TransactionDetails,
    ) -> Result<Option<Transaction>, StorageError> {
        let mut tables = self.tables.lock().unwrap();
        tables.check_category(details.category_id)?;

        let updated = tables
            .transactions
            .iter_mut()
            .find(|t| t.id == id && t.user_id == user_id)
            .map(|transaction| {
                transaction.budget_id = details.budget_id;
                transaction.category_id = details.category_id;
                transaction.entry_type = details.entry_type;
                transaction.amount = details.amount;
                transaction.note = details.note.clone();
                transaction.date = details.date;
                transaction.frequency = details.frequency;
                transaction.due_day = details.due_day;

                transaction.clone()
            });

        Ok(updated.map(|t| tables.transaction_with_joins(t)))
    }

    async fn delete(&self, user_id: Uuid, id: Uuid) -> Result<(), StorageError> {
        let mut tables = self.tables.lock().unwrap();
        tables
            .transactions
            .retain(|t| !(t.id == id && t.user_id == user_id));

        Ok(())
    }
}
