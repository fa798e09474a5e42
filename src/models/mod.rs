//! Rows as they are stored in the database.

mod budgets;
mod categories;
mod transactions;
mod users;

pub use budgets::Budget;
pub use categories::Category;
pub use transactions::Transaction;
pub use users::{NewUserModel, User};
