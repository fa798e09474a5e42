mod budgets;
mod categories;
#[cfg(test)]
pub mod memory;
mod transactions;
mod users;

pub use budgets::{BudgetRepo, DynBudgetRepo};
pub use categories::{CategoryRepo, DynCategoryRepo};
pub use transactions::{DynTransactionRepo, TransactionRepo};
pub use users::{DynUserRepo, UserRepo};
